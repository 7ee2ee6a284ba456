//! Pointwise grid discretization with periodic central differences

use crate::engine::discretization::Discretization;
use crate::engine::field::Complex64;
use crate::geometry::domain::Domain;
use ndarray::{ArrayD, Axis, Zip};

/// Marker for fields stored as plain grid samples
///
/// Derivatives use the second-order stencil `(u[i+1] - u[i-1]) / (2·dx)` with
/// periodic wrap-around. There is nothing worth caching, so the parameter
/// bundle is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiniteDifferences;

impl Discretization for FiniteDifferences {
    type Params = ();

    const NAME: &'static str = "finite-differences";

    fn init_params(_domain: &Domain) {}

    fn params_match(_params: &(), _domain: &Domain) -> bool {
        true
    }

    fn derivative(
        values: &ArrayD<Complex64>,
        axis: usize,
        domain: &Domain,
        _params: &(),
    ) -> ArrayD<Complex64> {
        let n = values.len_of(Axis(axis));
        let mut out = ArrayD::zeros(values.raw_dim());
        if n < 2 {
            return out;
        }
        let inv_2dx = 1.0 / (2.0 * domain.dx()[axis]);

        Zip::from(out.lanes_mut(Axis(axis)))
            .and(values.lanes(Axis(axis)))
            .for_each(|mut dst, src| {
                for i in 0..n {
                    let next = src[(i + 1) % n];
                    let prev = src[(i + n - 1) % n];
                    dst[i] = (next - prev) * inv_2dx;
                }
            });

        out
    }
}
