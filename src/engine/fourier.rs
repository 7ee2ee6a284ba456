//! Fourier pseudospectral discretization
//!
//! Derivatives are taken by transforming along one axis, multiplying by
//! `i·k` and transforming back. The FFT plans and the `i·k` multipliers are
//! the expensive part; they live in [`FourierParams`] and are reused by any
//! call that is handed the same bundle.

use crate::engine::discretization::Discretization;
use crate::engine::field::Complex64;
use crate::geometry::domain::Domain;
use ndarray::{Array1, ArrayD, Axis};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Marker for fields represented by their Fourier series on a periodic grid
#[derive(Debug, Clone, Copy, Default)]
pub struct FourierSeries;

struct AxisPlan {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    /// `i·k / n`, folding the inverse transform normalization into the multiplier
    ik_scaled: Array1<Complex64>,
}

struct FourierPlans {
    shape: Vec<usize>,
    dx: Vec<f64>,
    axes: Vec<AxisPlan>,
}

/// Planned transforms and spectral multipliers for one domain
#[derive(Clone)]
pub struct FourierParams {
    inner: Arc<FourierPlans>,
}

impl FourierParams {
    /// Plan transforms for every axis of `domain`
    pub fn new(domain: &Domain) -> Self {
        let mut planner = FftPlanner::new();
        let axes = domain
            .shape()
            .iter()
            .zip(domain.wavenumbers())
            .map(|(&n, k)| {
                let norm = 1.0 / n as f64;
                AxisPlan {
                    forward: planner.plan_fft_forward(n),
                    inverse: planner.plan_fft_inverse(n),
                    ik_scaled: k.mapv(|kv| Complex::new(0.0, kv * norm)),
                }
            })
            .collect();

        Self {
            inner: Arc::new(FourierPlans {
                shape: domain.shape().to_vec(),
                dx: domain.dx().to_vec(),
                axes,
            }),
        }
    }

    /// True when both handles point at the same planned bundle
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FourierParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FourierParams")
            .field("shape", &self.inner.shape)
            .field("dx", &self.inner.dx)
            .finish()
    }
}

impl Discretization for FourierSeries {
    type Params = FourierParams;

    const NAME: &'static str = "fourier";

    fn init_params(domain: &Domain) -> FourierParams {
        FourierParams::new(domain)
    }

    fn params_match(params: &FourierParams, domain: &Domain) -> bool {
        params.inner.shape == domain.shape() && params.inner.dx == domain.dx()
    }

    fn derivative(
        values: &ArrayD<Complex64>,
        axis: usize,
        _domain: &Domain,
        params: &FourierParams,
    ) -> ArrayD<Complex64> {
        let plan = &params.inner.axes[axis];
        let n = plan.ik_scaled.len();
        let scratch_len = plan
            .forward
            .get_inplace_scratch_len()
            .max(plan.inverse.get_inplace_scratch_len());

        let mut out = values.clone();
        let mut buffer = vec![Complex64::new(0.0, 0.0); n];
        let mut scratch = vec![Complex64::new(0.0, 0.0); scratch_len];

        for mut lane in out.lanes_mut(Axis(axis)) {
            for (b, &v) in buffer.iter_mut().zip(lane.iter()) {
                *b = v;
            }
            plan.forward.process_with_scratch(&mut buffer, &mut scratch);
            for (b, &ik) in buffer.iter_mut().zip(plan.ik_scaled.iter()) {
                *b *= ik;
            }
            plan.inverse.process_with_scratch(&mut buffer, &mut scratch);
            for (v, &b) in lane.iter_mut().zip(buffer.iter()) {
                *v = b;
            }
        }

        out
    }
}
