//! Computational domain: grid shape, spacing, spatial and spectral axes
//!
//! The domain is a value object. Two domains are equal when their grid shape
//! and spacing agree; the derived axes follow from those two quantities.

use crate::error::{Error, Result};
use crate::engine::field::Complex64;
use ndarray::{Array1, ArrayD, IxDyn};
use num_complex::Complex;
use std::f64::consts::PI;

/// Centered spatial coordinates for one axis
///
/// Even lengths put the origin at index `n/2`, odd lengths at `(n-1)/2`:
/// `spatial_axis(4, 1.0) == [-2, -1, 0, 1]`, `spatial_axis(5, 1.0) == [-2, -1, 0, 1, 2]`.
pub fn spatial_axis(n: usize, dx: f64) -> Array1<f64> {
    let offset = if n % 2 == 0 {
        dx * n as f64 / 2.0
    } else {
        dx * (n as f64 - 1.0) / 2.0
    };
    Array1::from_iter((0..n).map(|i| i as f64 * dx - offset))
}

/// Angular wavenumbers `2π·fftfreq(n, dx)` for one axis
///
/// Bin order follows the DFT convention: `[0, 1, ..., ⌈n/2⌉-1, -⌊n/2⌋, ..., -1] / (n·dx)`.
pub fn wavenumber_axis(n: usize, dx: f64) -> Array1<f64> {
    let scale = 2.0 * PI / (n as f64 * dx);
    Array1::from_iter((0..n).map(|i| {
        let bin = if i <= (n - 1) / 2 {
            i as f64
        } else {
            i as f64 - n as f64
        };
        bin * scale
    }))
}

/// Broadcast a 1D profile along `axis` of an n-dimensional grid.
pub(crate) fn along_axis<T: Clone>(values: &Array1<T>, shape: &[usize], axis: usize) -> ArrayD<T> {
    ArrayD::from_shape_fn(IxDyn(shape), |idx| values[idx[axis]].clone())
}

/// Wavenumbers shifted by half a cell, for staggered-grid derivatives
#[derive(Debug, Clone, PartialEq)]
pub struct StaggeredWavenumbers {
    /// `k·exp(+i·k·dx/2)` per axis
    pub backward: Vec<Array1<Complex64>>,
    /// `k·exp(-i·k·dx/2)` per axis
    pub forward: Vec<Array1<Complex64>>,
}

/// Full-grid wavenumber components after applying a k-space correction
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedWavenumbers {
    pub plain: Vec<ArrayD<Complex64>>,
    pub backward: Vec<ArrayD<Complex64>>,
    pub forward: Vec<ArrayD<Complex64>>,
}

/// Multiplicative correction applied to the wavenumber grid
///
/// Implementations receive the wavenumber magnitude `|k|` at each grid point,
/// a reference sound speed and the time step.
pub trait KSpaceCorrection {
    fn factor(&self, k_magnitude: f64, c_ref: f64, dt: f64) -> f64;
}

/// Disabled correction, every wavenumber is left untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCorrection;

impl KSpaceCorrection for IdentityCorrection {
    fn factor(&self, _k_magnitude: f64, _c_ref: f64, _dt: f64) -> f64 {
        1.0
    }
}

/// Rectangular grid with per-axis sampling
#[derive(Debug, Clone)]
pub struct Domain {
    n: Vec<usize>,
    dx: Vec<f64>,
    space_axis: Vec<Array1<f64>>,
    k_vec: Vec<Array1<f64>>,
    cell_volume: f64,
    k_staggered: Option<StaggeredWavenumbers>,
    k_with_kspaceop: Option<ModifiedWavenumbers>,
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.dx == other.dx
    }
}

impl Domain {
    /// Create a new domain from the number of points and the spacing per axis
    pub fn new(n: &[usize], dx: &[f64]) -> Result<Self> {
        if n.is_empty() {
            return Err(Error::invalid_dimension("a domain needs at least one axis"));
        }
        if n.len() != dx.len() {
            return Err(Error::shape_mismatch(format!(
                "grid has {} axes but {} spacings were given",
                n.len(),
                dx.len()
            )));
        }
        if let Some(axis) = n.iter().position(|&len| len == 0) {
            return Err(Error::invalid_parameter(format!(
                "axis {} has zero grid points",
                axis
            )));
        }
        if let Some(axis) = dx.iter().position(|&d| d <= 0.0 || !d.is_finite()) {
            return Err(Error::invalid_parameter(format!(
                "axis {} has non-positive spacing {}",
                axis, dx[axis]
            )));
        }

        let space_axis = n.iter().zip(dx).map(|(&len, &d)| spatial_axis(len, d)).collect();
        let k_vec = n
            .iter()
            .zip(dx)
            .map(|(&len, &d)| wavenumber_axis(len, d))
            .collect();
        let cell_volume = dx.iter().product();

        Ok(Self {
            n: n.to_vec(),
            dx: dx.to_vec(),
            space_axis,
            k_vec,
            cell_volume,
            k_staggered: None,
            k_with_kspaceop: None,
        })
    }

    /// Number of grid points per axis
    pub fn shape(&self) -> &[usize] {
        &self.n
    }

    /// Grid spacing per axis
    pub fn dx(&self) -> &[f64] {
        &self.dx
    }

    /// Number of spatial axes
    pub fn ndim(&self) -> usize {
        self.n.len()
    }

    /// Total number of grid points
    pub fn len(&self) -> usize {
        self.n.iter().product()
    }

    /// A domain always holds at least one point
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Volume (area, length) of one grid cell
    pub fn cell_volume(&self) -> f64 {
        self.cell_volume
    }

    /// Physical extent `N·dx` of each axis
    pub fn domain_size(&self) -> Vec<f64> {
        self.n.iter().zip(&self.dx).map(|(&n, &d)| n as f64 * d).collect()
    }

    /// Centered coordinate arrays, one per axis
    pub fn space_axis(&self) -> &[Array1<f64>] {
        &self.space_axis
    }

    /// Angular wavenumber arrays, one per axis
    pub fn wavenumbers(&self) -> &[Array1<f64>] {
        &self.k_vec
    }

    /// Staggered wavenumbers, present after [`Domain::to_staggered`]
    pub fn staggered_wavenumbers(&self) -> Option<&StaggeredWavenumbers> {
        self.k_staggered.as_ref()
    }

    /// Corrected wavenumbers, present after [`Domain::apply_kspace_operator`]
    pub fn modified_wavenumbers(&self) -> Option<&ModifiedWavenumbers> {
        self.k_with_kspaceop.as_ref()
    }

    /// Coordinate of every grid point, one array per axis (`ij` indexing)
    pub fn grid(&self) -> Vec<ArrayD<f64>> {
        self.space_axis
            .iter()
            .enumerate()
            .map(|(axis, values)| along_axis(values, &self.n, axis))
            .collect()
    }

    /// Copy of the domain with the staggered wavenumbers populated
    pub fn to_staggered(&self) -> Self {
        let shifted = |sign: f64| -> Vec<Array1<Complex64>> {
            self.k_vec
                .iter()
                .zip(&self.dx)
                .map(|(k, &d)| {
                    k.mapv(|kv| Complex::new(kv, 0.0) * Complex::new(0.0, sign * kv * d / 2.0).exp())
                })
                .collect()
        };

        let mut domain = self.clone();
        domain.k_staggered = Some(StaggeredWavenumbers {
            backward: shifted(1.0),
            forward: shifted(-1.0),
        });
        domain
    }

    /// Copy of the domain with k-space corrected wavenumber grids
    ///
    /// Only meaningful for first-order derivatives. Requires the staggered
    /// state produced by [`Domain::to_staggered`].
    pub fn apply_kspace_operator<C: KSpaceCorrection>(
        &self,
        c_ref: f64,
        dt: f64,
        correction: &C,
    ) -> Result<Self> {
        let staggered = self.k_staggered.as_ref().ok_or_else(|| {
            Error::invalid_parameter("k-space operator requires a staggered domain")
        })?;

        let magnitude = self
            .k_vec
            .iter()
            .enumerate()
            .map(|(axis, k)| along_axis(k, &self.n, axis).mapv(|kv| kv * kv))
            .fold(ArrayD::<f64>::zeros(IxDyn(&self.n)), |acc, k2| acc + k2)
            .mapv(f64::sqrt);
        let op = magnitude.mapv(|km| correction.factor(km, c_ref, dt));

        let corrected = |vectors: Vec<Array1<Complex64>>| -> Vec<ArrayD<Complex64>> {
            vectors
                .iter()
                .enumerate()
                .map(|(axis, k)| {
                    let mut grid = along_axis(k, &self.n, axis);
                    grid.zip_mut_with(&op, |kv, &f| *kv *= f);
                    grid
                })
                .collect()
        };

        let plain = self
            .k_vec
            .iter()
            .map(|k| k.mapv(|kv| Complex::new(kv, 0.0)))
            .collect();

        let mut domain = self.clone();
        domain.k_with_kspaceop = Some(ModifiedWavenumbers {
            plain: corrected(plain),
            backward: corrected(staggered.backward.clone()),
            forward: corrected(staggered.forward.clone()),
        });
        Ok(domain)
    }

    /// Fail with `DomainMismatch` unless `other` describes the same grid
    pub fn ensure_same(&self, other: &Domain, what: &str) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(Error::domain_mismatch(format!(
                "{} is defined on N={:?}, dx={:?} but the operating domain is N={:?}, dx={:?}",
                what, other.n, other.dx, self.n, self.dx
            )))
        }
    }
}
