//! Discretized fields over a [`Domain`]
//!
//! A [`Field`] holds one complex sample per grid point and is tagged with the
//! discretization used to differentiate it. A [`VectorField`] holds one such
//! array per spatial axis, as produced by gradients.

use crate::engine::discretization::Discretization;
use crate::error::{Error, Result};
use crate::geometry::domain::Domain;
use ndarray::{ArrayD, IxDyn, Zip};
use num_complex::Complex;
use num_traits::Zero;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

/// Type alias for Complex64
pub type Complex64 = Complex<f64>;

/// Scalar field sampled on every point of a domain
#[derive(Debug, Clone)]
pub struct Field<D: Discretization> {
    domain: Arc<Domain>,
    values: ArrayD<Complex64>,
    _repr: PhantomData<D>,
}

impl<D: Discretization> Field<D> {
    /// Wrap grid samples, which must have exactly the domain shape
    pub fn new(domain: Arc<Domain>, values: ArrayD<Complex64>) -> Result<Self> {
        if values.shape() != domain.shape() {
            return Err(Error::shape_mismatch(format!(
                "field samples have shape {:?} but the domain is {:?}",
                values.shape(),
                domain.shape()
            )));
        }
        Ok(Self::from_parts(domain, values))
    }

    /// Wrap real grid samples
    pub fn from_real(domain: Arc<Domain>, values: ArrayD<f64>) -> Result<Self> {
        Self::new(domain, values.mapv(|v| Complex::new(v, 0.0)))
    }

    /// Field holding the same value everywhere
    pub fn constant(domain: Arc<Domain>, value: Complex64) -> Self {
        let values = ArrayD::from_elem(IxDyn(domain.shape()), value);
        Self::from_parts(domain, values)
    }

    /// Field of zeros
    pub fn zeros(domain: Arc<Domain>) -> Self {
        Self::constant(domain, Complex64::zero())
    }

    pub(crate) fn from_parts(domain: Arc<Domain>, values: ArrayD<Complex64>) -> Self {
        Self {
            domain,
            values,
            _repr: PhantomData,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn domain_arc(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn values(&self) -> &ArrayD<Complex64> {
        &self.values
    }

    pub fn into_values(self) -> ArrayD<Complex64> {
        self.values
    }

    /// Apply a scalar function to every sample, keeping the domain
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Complex64) -> Complex64,
    {
        Self::from_parts(self.domain.clone(), self.values.mapv(f))
    }

    /// Combine two fields sample by sample; both must share a domain
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(Complex64, Complex64) -> Complex64,
    {
        self.domain.ensure_same(&other.domain, "right-hand field")?;
        Ok(self.zip_unchecked(other, f))
    }

    pub(crate) fn zip_unchecked<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(Complex64, Complex64) -> Complex64,
    {
        let mut values = ArrayD::zeros(self.values.raw_dim());
        Zip::from(&mut values)
            .and(&self.values)
            .and(&other.values)
            .for_each(|o, &a, &b| *o = f(a, b));
        Self::from_parts(self.domain.clone(), values)
    }

    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a * b)
    }

    pub fn try_div(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Compute the norm squared of the field
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Largest real part over the grid
    pub fn max_real(&self) -> f64 {
        self.values.iter().fold(f64::NEG_INFINITY, |acc, c| acc.max(c.re))
    }

    /// Smallest real part over the grid
    pub fn min_real(&self) -> f64 {
        self.values.iter().fold(f64::INFINITY, |acc, c| acc.min(c.re))
    }
}

impl<D: Discretization> Add<Complex64> for Field<D> {
    type Output = Self;

    fn add(mut self, scalar: Complex64) -> Self {
        self.values.mapv_inplace(|v| v + scalar);
        self
    }
}

impl<D: Discretization> Sub<Complex64> for Field<D> {
    type Output = Self;

    fn sub(mut self, scalar: Complex64) -> Self {
        self.values.mapv_inplace(|v| v - scalar);
        self
    }
}

impl<D: Discretization> Mul<Complex64> for Field<D> {
    type Output = Self;

    fn mul(mut self, scalar: Complex64) -> Self {
        self.values.mapv_inplace(|v| v * scalar);
        self
    }
}

/// One scalar array per spatial axis, sharing a domain
#[derive(Debug, Clone)]
pub struct VectorField<D: Discretization> {
    domain: Arc<Domain>,
    components: Vec<ArrayD<Complex64>>,
    _repr: PhantomData<D>,
}

impl<D: Discretization> VectorField<D> {
    /// Build from per-axis fields; there must be one per spatial axis
    pub fn from_components(components: Vec<Field<D>>) -> Result<Self> {
        let domain = match components.first() {
            Some(first) => first.domain.clone(),
            None => return Err(Error::invalid_dimension("vector field without components")),
        };
        if components.len() != domain.ndim() {
            return Err(Error::invalid_dimension(format!(
                "{} components for a {}-dimensional domain",
                components.len(),
                domain.ndim()
            )));
        }
        for (axis, component) in components.iter().enumerate() {
            domain.ensure_same(&component.domain, &format!("component {}", axis))?;
        }
        let components = components.into_iter().map(Field::into_values).collect();
        Ok(Self::from_parts(domain, components))
    }

    pub(crate) fn from_parts(domain: Arc<Domain>, components: Vec<ArrayD<Complex64>>) -> Self {
        Self {
            domain,
            components,
            _repr: PhantomData,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn domain_arc(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn components(&self) -> &[ArrayD<Complex64>] {
        &self.components
    }

    /// Copy out the component along `axis`
    pub fn component(&self, axis: usize) -> Option<Field<D>> {
        self.components
            .get(axis)
            .map(|values| Field::from_parts(self.domain.clone(), values.clone()))
    }

    /// Multiply matching components elementwise
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.domain.ensure_same(&other.domain, "right-hand vector field")?;
        Ok(self.mul_unchecked(other))
    }

    pub(crate) fn mul_unchecked(&self, other: &Self) -> Self {
        let components = self
            .components
            .iter()
            .zip(&other.components)
            .map(|(a, b)| a * b)
            .collect();
        Self::from_parts(self.domain.clone(), components)
    }

    /// Sum of the per-axis components
    pub fn sum_over_dims(&self) -> Field<D> {
        let mut total = ArrayD::<Complex64>::zeros(IxDyn(self.domain.shape()));
        for component in &self.components {
            total += component;
        }
        Field::from_parts(self.domain.clone(), total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fourier::FourierSeries;

    fn domain() -> Arc<Domain> {
        Arc::new(Domain::new(&[4, 3], &[1.0, 1.0]).unwrap())
    }

    #[test]
    fn test_field_creation() {
        let field = Field::<FourierSeries>::constant(domain(), Complex::new(2.0, 1.0));
        assert_eq!(field.values().shape(), &[4, 3]);
        assert_eq!(field.values()[[3, 2]], Complex::new(2.0, 1.0));

        let wrong = ArrayD::zeros(IxDyn(&[3, 3]));
        assert!(matches!(
            Field::<FourierSeries>::new(domain(), wrong),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_field_arithmetic() {
        let a = Field::<FourierSeries>::constant(domain(), Complex::new(1.0, 0.0));
        let b = Field::<FourierSeries>::constant(domain(), Complex::new(2.0, 1.0));

        assert_eq!(a.try_add(&b).unwrap().values()[[0, 0]], Complex::new(3.0, 1.0));
        assert_eq!(a.try_sub(&b).unwrap().values()[[1, 1]], Complex::new(-1.0, -1.0));
        assert_eq!(b.try_mul(&b).unwrap().values()[[2, 2]], Complex::new(3.0, 4.0));
        assert_eq!(b.try_div(&b).unwrap().values()[[3, 0]], Complex::new(1.0, 0.0));

        let scaled = b.clone() * Complex::new(2.0, 0.0) + Complex::new(1.0, 0.0);
        assert_eq!(scaled.values()[[0, 1]], Complex::new(5.0, 2.0));
    }

    #[test]
    fn test_field_domain_mismatch() {
        let other = Arc::new(Domain::new(&[4, 3], &[1.0, 0.5]).unwrap());
        let a = Field::<FourierSeries>::zeros(domain());
        let b = Field::<FourierSeries>::zeros(other);
        assert!(matches!(a.try_add(&b), Err(Error::DomainMismatch(_))));
    }

    #[test]
    fn test_map_and_extrema() {
        let mut values = ArrayD::from_elem(IxDyn(&[4, 3]), 1.0);
        values[[1, 2]] = 3.0;
        values[[0, 0]] = -2.0;
        let field = Field::<FourierSeries>::from_real(domain(), values).unwrap();
        assert_eq!(field.max_real(), 3.0);
        assert_eq!(field.min_real(), -2.0);

        let squared = field.map(|v| v * v);
        assert_eq!(squared.values()[[1, 2]], Complex::new(9.0, 0.0));
        assert_eq!(squared.norm_squared(), 81.0 + 16.0 + 10.0);
    }

    #[test]
    fn test_vector_field_sum_over_dims() {
        let x = Field::<FourierSeries>::constant(domain(), Complex::new(1.0, 0.0));
        let y = Field::<FourierSeries>::constant(domain(), Complex::new(0.0, 2.0));
        let v = VectorField::from_components(vec![x, y]).unwrap();

        let doubled = v.try_mul(&v).unwrap();
        assert_eq!(doubled.components()[1][[0, 0]], Complex::new(-4.0, 0.0));

        let y_back = v.component(1).unwrap();
        assert_eq!(y_back.domain(), v.domain());
        assert_eq!(y_back.values()[[3, 2]], Complex::new(0.0, 2.0));
        assert!(v.component(2).is_none());

        let total = v.sum_over_dims();
        assert_eq!(total.values()[[2, 1]], Complex::new(1.0, 2.0));

        let single = Field::<FourierSeries>::zeros(domain());
        assert!(matches!(
            VectorField::from_components(vec![single]),
            Err(Error::InvalidDimension(_))
        ));
    }
}
