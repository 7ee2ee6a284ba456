//! Differentiation engine shared by every discretization
//!
//! Each discretization supplies a single-axis derivative and an opaque
//! parameter bundle holding whatever setup it can reuse between calls.
//! The generic [`gradient`] and [`diag_jacobian`] accept an optional bundle
//! and always hand one back, so callers can thread it into the next call.

use crate::engine::field::{Complex64, Field, VectorField};
use crate::error::{Error, Result};
use crate::geometry::domain::Domain;
use ndarray::ArrayD;
use rayon::prelude::*;
use std::fmt::Debug;

/// Strategy used to differentiate fields on a grid
pub trait Discretization: Clone + Debug + Send + Sync + 'static {
    /// Reusable setup, cheap to clone
    type Params: Clone + Debug + Send + Sync;

    /// Short name for logs
    const NAME: &'static str;

    /// Build the parameter bundle for a domain
    fn init_params(domain: &Domain) -> Self::Params;

    /// Whether a bundle was built for this domain
    fn params_match(params: &Self::Params, domain: &Domain) -> bool;

    /// Derivative of `values` along `axis`
    fn derivative(
        values: &ArrayD<Complex64>,
        axis: usize,
        domain: &Domain,
        params: &Self::Params,
    ) -> ArrayD<Complex64>;
}

fn resolve_params<D: Discretization>(domain: &Domain, params: Option<&D::Params>) -> Result<D::Params> {
    match params {
        Some(params) if D::params_match(params, domain) => Ok(params.clone()),
        Some(_) => Err(Error::domain_mismatch(format!(
            "{} parameters were built for a different domain than N={:?}",
            D::NAME,
            domain.shape()
        ))),
        None => {
            log::trace!("building {} parameters for N={:?}", D::NAME, domain.shape());
            Ok(D::init_params(domain))
        }
    }
}

/// Gradient of a scalar field, one component per axis
pub fn gradient<D: Discretization>(
    field: &Field<D>,
    params: Option<&D::Params>,
) -> Result<(VectorField<D>, D::Params)> {
    let domain = field.domain();
    let params = resolve_params::<D>(domain, params)?;

    let components = (0..domain.ndim())
        .into_par_iter()
        .map(|axis| D::derivative(field.values(), axis, domain, &params))
        .collect();

    Ok((
        VectorField::from_parts(field.domain_arc().clone(), components),
        params,
    ))
}

/// Diagonal of the Jacobian: component `i` differentiated along axis `i`
pub fn diag_jacobian<D: Discretization>(
    field: &VectorField<D>,
    params: Option<&D::Params>,
) -> Result<(VectorField<D>, D::Params)> {
    let domain = field.domain();
    let params = resolve_params::<D>(domain, params)?;

    let components = field
        .components()
        .par_iter()
        .enumerate()
        .map(|(axis, values)| D::derivative(values, axis, domain, &params))
        .collect();

    Ok((
        VectorField::from_parts(field.domain_arc().clone(), components),
        params,
    ))
}

/// Elementwise sum of the axis components
pub fn sum_over_dims<D: Discretization>(field: &VectorField<D>) -> Field<D> {
    field.sum_over_dims()
}

/// Apply a scalar function to every sample of a field
pub fn compose<D, F>(field: &Field<D>, f: F) -> Field<D>
where
    D: Discretization,
    F: Fn(Complex64) -> Complex64,
{
    field.map(f)
}
