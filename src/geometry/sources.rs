//! Acoustic sources: sampled point sources, time-harmonic and complex sources

use crate::engine::discretization::Discretization;
use crate::engine::field::{Complex64, Field};
use crate::error::{Error, Result};
use crate::geometry::domain::Domain;
use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex;
use std::sync::Arc;

/// Check per-axis index lists against a grid and return the number of points
pub(crate) fn check_positions(positions: &[Vec<usize>], shape: &[usize]) -> Result<usize> {
    if positions.len() != shape.len() {
        return Err(Error::invalid_dimension(format!(
            "positions have {} axes but the grid has {}",
            positions.len(),
            shape.len()
        )));
    }
    let count = positions.first().map_or(0, Vec::len);
    for (axis, (indices, &n)) in positions.iter().zip(shape).enumerate() {
        if indices.len() != count {
            return Err(Error::shape_mismatch(format!(
                "axis {} lists {} positions, axis 0 lists {}",
                axis,
                indices.len(),
                count
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
            return Err(Error::shape_mismatch(format!(
                "position {} is outside axis {} of length {}",
                bad, axis, n
            )));
        }
    }
    Ok(count)
}

/// Grid index of the `point`-th entry of per-axis position lists
pub(crate) fn point_index(positions: &[Vec<usize>], point: usize) -> Vec<usize> {
    positions.iter().map(|axis| axis[point]).collect()
}

/// Point sources driven by sampled time signals
#[derive(Debug, Clone)]
pub struct Sources {
    positions: Vec<Vec<usize>>,
    /// One row per source, one column per time sample
    signals: Array2<f64>,
    dt: f64,
    domain: Arc<Domain>,
}

impl Sources {
    /// Create sources at `positions` (one index list per axis)
    pub fn new(
        positions: Vec<Vec<usize>>,
        signals: Array2<f64>,
        dt: f64,
        domain: Arc<Domain>,
    ) -> Result<Self> {
        let count = check_positions(&positions, domain.shape())?;
        if count != signals.nrows() {
            return Err(Error::shape_mismatch(format!(
                "{} source positions but {} signal rows",
                count,
                signals.nrows()
            )));
        }
        if dt <= 0.0 || !dt.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "sampling interval must be positive, got {}",
                dt
            )));
        }
        Ok(Self {
            positions,
            signals,
            dt,
            domain,
        })
    }

    /// Source set without any source
    pub fn empty(domain: Arc<Domain>, dt: f64) -> Result<Self> {
        let positions = vec![Vec::new(); domain.ndim()];
        Self::new(positions, Array2::zeros((0, 0)), dt, domain)
    }

    pub fn positions(&self) -> &[Vec<usize>] {
        &self.positions
    }

    pub fn signals(&self) -> &Array2<f64> {
        &self.signals
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.signals.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source term at time `t` on the full grid, with a trailing unit axis
    ///
    /// The nearest sample `round(t/dt)` of every signal is divided by the
    /// number of spatial axes, so that the injection is split evenly over
    /// the derivative directions.
    pub fn on_grid(&self, t: f64) -> Result<ArrayD<f64>> {
        let mut shape = self.domain.shape().to_vec();
        shape.push(1);
        let mut grid = ArrayD::<f64>::zeros(IxDyn(&shape));
        if self.is_empty() {
            return Ok(grid);
        }

        let step = (t / self.dt).round();
        let n_samples = self.signals.ncols();
        if !(step >= 0.0 && step < n_samples as f64) {
            return Err(Error::time_out_of_range(format!(
                "t = {} maps to sample {} but signals hold {} samples",
                t, step, n_samples
            )));
        }
        let column = self.signals.column(step as usize);
        let ndim = self.domain.ndim() as f64;

        for (point, &value) in column.iter().enumerate() {
            let mut index = point_index(&self.positions, point);
            index.push(0);
            grid[IxDyn(&index)] = value / ndim;
        }

        Ok(grid)
    }
}

/// Continuous complex source oscillating at a single angular frequency
#[derive(Debug, Clone)]
pub struct TimeHarmonicSource<D: Discretization> {
    amplitude: Field<D>,
    omega: f64,
}

impl<D: Discretization> TimeHarmonicSource<D> {
    pub fn new(amplitude: Field<D>, omega: f64) -> Self {
        Self { amplitude, omega }
    }

    pub fn amplitude(&self) -> &Field<D> {
        &self.amplitude
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn domain(&self) -> &Domain {
        self.amplitude.domain()
    }

    /// `amplitude · exp(i·ω·t)`
    pub fn on_grid(&self, t: f64) -> Field<D> {
        let phase = Complex::new(0.0, self.omega * t).exp();
        self.amplitude.clone() * phase
    }
}

/// Complex point amplitudes at grid positions
#[derive(Debug, Clone)]
pub struct ComplexSources {
    positions: Vec<Vec<usize>>,
    amplitude: Vec<Complex64>,
}

impl ComplexSources {
    pub fn new(positions: Vec<Vec<usize>>, amplitude: Vec<Complex64>) -> Self {
        Self {
            positions,
            amplitude,
        }
    }

    pub fn positions(&self) -> &[Vec<usize>] {
        &self.positions
    }

    pub fn amplitude(&self) -> &[Complex64] {
        &self.amplitude
    }

    /// Zero field with the amplitudes written at their positions
    pub fn to_field<D: Discretization>(&self, domain: Arc<Domain>) -> Result<Field<D>> {
        let count = check_positions(&self.positions, domain.shape())?;
        if count != self.amplitude.len() {
            return Err(Error::shape_mismatch(format!(
                "{} positions but {} amplitudes",
                count,
                self.amplitude.len()
            )));
        }
        let mut values = ArrayD::<Complex64>::zeros(IxDyn(domain.shape()));
        for (point, &amplitude) in self.amplitude.iter().enumerate() {
            values[IxDyn(&point_index(&self.positions, point))] = amplitude;
        }
        Field::new(domain, values)
    }
}
