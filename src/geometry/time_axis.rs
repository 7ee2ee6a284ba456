//! Time sampling for simulations driven by the acoustic operators

use crate::engine::discretization::Discretization;
use crate::error::{Error, Result};
use crate::geometry::medium::Medium;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Parameters used to derive a [`TimeAxis`] from a medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisConfig {
    /// Courant number
    pub cfl: f64,
    /// Final time; when absent the slowest wave crossing time is used
    pub t_end: Option<f64>,
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self {
            cfl: 0.3,
            t_end: None,
        }
    }
}

/// Uniform time sampling `[0, dt, 2·dt, ...) < t_end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub dt: f64,
    pub t_end: f64,
}

impl TimeAxis {
    /// Derive a stable time step from the medium
    ///
    /// `dt = cfl · min(dx) / max(c)`. Without `t_end` the axis ends when the
    /// slowest wave has crossed the domain diagonal, `|N·dx| / min(c)`.
    pub fn from_medium<D: Discretization>(
        medium: &Medium<D>,
        cfl: f64,
        t_end: Option<f64>,
    ) -> Result<Self> {
        if cfl <= 0.0 || !cfl.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "CFL number must be positive, got {}",
                cfl
            )));
        }

        if let Some(t_end) = t_end {
            if t_end <= 0.0 || !t_end.is_finite() {
                return Err(Error::invalid_parameter(format!(
                    "final time must be positive and finite, got {}",
                    t_end
                )));
            }
        }

        let domain = medium.domain();
        let min_dx = domain.dx().iter().copied().fold(f64::INFINITY, f64::min);
        let c_max = medium.sound_speed().max_real();
        let c_min = medium.sound_speed().min_real();
        if c_min <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "sound speed must be positive everywhere, minimum is {}",
                c_min
            )));
        }

        let dt = cfl * min_dx / c_max;
        let t_end = t_end.unwrap_or_else(|| {
            let diagonal = domain
                .domain_size()
                .iter()
                .map(|l| l * l)
                .sum::<f64>()
                .sqrt();
            diagonal / c_min
        });

        log::debug!("time axis: dt = {:.3e}, t_end = {:.3e}", dt, t_end);
        Ok(Self { dt, t_end })
    }

    /// Same as [`TimeAxis::from_medium`] with the values of `config`
    pub fn from_config<D: Discretization>(medium: &Medium<D>, config: &TimeAxisConfig) -> Result<Self> {
        Self::from_medium(medium, config.cfl, config.t_end)
    }

    /// Number of samples on the axis
    pub fn len(&self) -> usize {
        (self.t_end / self.dt).ceil().max(0.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample times
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_iter((0..self.len()).map(|i| i as f64 * self.dt))
    }
}
