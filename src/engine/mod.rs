//! Engine module containing fields and their discretizations

pub mod discretization;
pub mod field;
pub mod finite_differences;
pub mod fourier;

pub use discretization::{compose, diag_jacobian, gradient, sum_over_dims, Discretization};
pub use field::{Complex64, Field, VectorField};
pub use finite_differences::FiniteDifferences;
pub use fourier::{FourierParams, FourierSeries};
