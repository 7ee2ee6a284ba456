//! Complex perfectly matched layer profiles
//!
//! Every axis gets its own damping map. Inside the domain the map is exactly
//! one; within `pml_size` points of an edge it tapers to `1 / (1 + i·ω·σ)`
//! with `σ = alpha_max · r^exponent` and `r` the normalized depth into the
//! layer.

use crate::engine::discretization::Discretization;
use crate::engine::field::{Complex64, VectorField};
use crate::geometry::domain::{along_axis, spatial_axis};
use crate::geometry::medium::Medium;
use ndarray::Array1;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Shape of the absorption profile inside the layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmlConfig {
    /// Power of the normalized depth
    pub exponent: f64,
    /// Absorption at the outer edge of the layer
    pub alpha_max: f64,
}

impl Default for PmlConfig {
    fn default() -> Self {
        Self {
            exponent: 2.0,
            alpha_max: 2.0,
        }
    }
}

/// Damping profile along a single axis of `n` points
///
/// Depth is measured on the centered axis `spatial_axis(n, 1)`. For even `n`
/// that axis runs from `-n/2` to `n/2 - 1`, so the high-index side of the
/// layer holds one damped point fewer than the low-index side and its last
/// point stops one step short of the full absorption `alpha_max`.
pub fn pml_profile_1d(n: usize, pml_size: usize, omega: f64, config: &PmlConfig) -> Array1<Complex64> {
    let one = Complex::new(1.0, 0.0);
    if pml_size == 0 {
        return Array1::from_elem(n, one);
    }

    let interior = n as f64 / 2.0 - pml_size as f64;
    spatial_axis(n, 1.0).mapv(|x| {
        let depth = x.abs() - interior;
        if depth <= 0.0 {
            return one;
        }
        let sigma = config.alpha_max * (depth / pml_size as f64).powf(config.exponent);
        one / Complex::new(1.0, omega * sigma)
    })
}

/// Per-axis complex PML for `medium` at angular frequency `omega`
pub fn complex_pml_on_grid<D: Discretization>(medium: &Medium<D>, omega: f64) -> VectorField<D> {
    complex_pml_with_config(medium, omega, &PmlConfig::default())
}

/// Same as [`complex_pml_on_grid`] with an explicit profile
pub fn complex_pml_with_config<D: Discretization>(
    medium: &Medium<D>,
    omega: f64,
    config: &PmlConfig,
) -> VectorField<D> {
    let domain = medium.domain_arc();
    let shape = domain.shape();
    let components = shape
        .iter()
        .enumerate()
        .map(|(axis, &n)| {
            let profile = pml_profile_1d(n, medium.pml_size(), omega, config);
            along_axis(&profile, shape, axis)
        })
        .collect();

    log::trace!(
        "PML of {} points for N={:?} at omega={}",
        medium.pml_size(),
        shape,
        omega
    );
    VectorField::from_parts(domain.clone(), components)
}
