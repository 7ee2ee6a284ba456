//! Acoustic medium description
//!
//! The material maps (sound speed, density, attenuation) are the
//! differentiable parameters of a medium. The domain and PML thickness are
//! static configuration. [`Medium::parameters`] and [`Medium::config`] expose
//! the two halves separately and [`Medium::from_parts`] puts them back
//! together, so tree-style tooling can walk the parameters without ever
//! touching the configuration.

use crate::engine::discretization::Discretization;
use crate::engine::field::{Complex64, Field};
use crate::error::{Error, Result};
use crate::geometry::domain::Domain;
use log::warn;
use num_complex::Complex;
use std::sync::Arc;

/// A material property: either one value for the whole domain or a map
#[derive(Debug, Clone)]
pub enum Parameter<D: Discretization> {
    Scalar(f64),
    Field(Field<D>),
}

impl<D: Discretization> Parameter<D> {
    pub fn is_field(&self) -> bool {
        matches!(self, Parameter::Field(_))
    }

    pub fn as_field(&self) -> Option<&Field<D>> {
        match self {
            Parameter::Field(field) => Some(field),
            Parameter::Scalar(_) => None,
        }
    }

    /// Sample the parameter on `domain`, broadcasting scalars
    pub fn to_field(&self, domain: Arc<Domain>) -> Field<D> {
        match self {
            Parameter::Scalar(value) => Field::constant(domain, Complex::new(*value, 0.0)),
            Parameter::Field(field) => field.clone(),
        }
    }

    /// Apply `f` to the value or to every sample of the map
    pub fn map<F>(&self, f: F) -> MappedParameter<D>
    where
        F: Fn(Complex64) -> Complex64,
    {
        match self {
            Parameter::Scalar(value) => MappedParameter::Scalar(f(Complex::new(*value, 0.0))),
            Parameter::Field(field) => MappedParameter::Field(field.map(f)),
        }
    }

    pub fn max_real(&self) -> f64 {
        match self {
            Parameter::Scalar(value) => *value,
            Parameter::Field(field) => field.max_real(),
        }
    }

    pub fn min_real(&self) -> f64 {
        match self {
            Parameter::Scalar(value) => *value,
            Parameter::Field(field) => field.min_real(),
        }
    }

    /// Every value is finite with a strictly positive real part
    pub fn is_positive(&self) -> bool {
        let positive = |v: f64| v > 0.0 && v.is_finite();
        match self {
            Parameter::Scalar(value) => positive(*value),
            Parameter::Field(field) => field.values().iter().all(|c| positive(c.re)),
        }
    }

    fn check_domain(&self, domain: &Domain, name: &str) -> Result<()> {
        match self {
            Parameter::Scalar(_) => Ok(()),
            Parameter::Field(field) => domain.ensure_same(field.domain(), name),
        }
    }
}

impl<D: Discretization> From<f64> for Parameter<D> {
    fn from(value: f64) -> Self {
        Parameter::Scalar(value)
    }
}

impl<D: Discretization> From<Field<D>> for Parameter<D> {
    fn from(field: Field<D>) -> Self {
        Parameter::Field(field)
    }
}

/// A parameter after an elementwise transform, which may leave the real line
#[derive(Debug, Clone)]
pub enum MappedParameter<D: Discretization> {
    Scalar(Complex64),
    Field(Field<D>),
}

/// Differentiable part of a medium
#[derive(Debug, Clone)]
pub struct MediumParameters<D: Discretization> {
    pub sound_speed: Parameter<D>,
    pub density: Parameter<D>,
    pub attenuation: Parameter<D>,
}

/// Static part of a medium
#[derive(Debug, Clone, PartialEq)]
pub struct MediumConfig {
    pub domain: Arc<Domain>,
    /// PML thickness in grid points, applied on both ends of every axis
    pub pml_size: usize,
}

/// Heterogeneous acoustic medium
#[derive(Debug, Clone)]
pub struct Medium<D: Discretization> {
    domain: Arc<Domain>,
    sound_speed: Parameter<D>,
    density: Parameter<D>,
    attenuation: Parameter<D>,
    pml_size: usize,
}

impl<D: Discretization> Medium<D> {
    /// Create a medium, checking that every map lives on `domain`
    pub fn new(
        domain: Arc<Domain>,
        sound_speed: impl Into<Parameter<D>>,
        density: impl Into<Parameter<D>>,
        attenuation: impl Into<Parameter<D>>,
        pml_size: usize,
    ) -> Result<Self> {
        let sound_speed = sound_speed.into();
        let density = density.into();
        let attenuation = attenuation.into();

        sound_speed.check_domain(&domain, "sound speed")?;
        density.check_domain(&domain, "density")?;
        attenuation.check_domain(&domain, "attenuation")?;

        for (name, parameter) in [("sound speed", &sound_speed), ("density", &density)] {
            if !parameter.is_positive() {
                return Err(Error::invalid_parameter(format!(
                    "{} must be positive and finite everywhere, smallest value is {}",
                    name,
                    parameter.min_real()
                )));
            }
        }

        for (axis, &n) in domain.shape().iter().enumerate() {
            if 2 * pml_size >= n && pml_size > 0 {
                return Err(Error::invalid_pml_size(format!(
                    "{} points per side does not fit axis {} with {} points",
                    pml_size, axis, n
                )));
            }
            if 4 * pml_size > n {
                warn!(
                    "PML of {} points covers more than half of axis {} ({} points)",
                    pml_size, axis, n
                );
            }
        }

        Ok(Self {
            domain,
            sound_speed,
            density,
            attenuation,
            pml_size,
        })
    }

    /// Medium with the same properties everywhere
    pub fn homogeneous(
        domain: Arc<Domain>,
        sound_speed: f64,
        density: f64,
        attenuation: f64,
        pml_size: usize,
    ) -> Result<Self> {
        Self::new(domain, sound_speed, density, attenuation, pml_size)
    }

    /// Rebuild a medium from its two halves
    pub fn from_parts(parameters: MediumParameters<D>, config: MediumConfig) -> Result<Self> {
        Self::new(
            config.domain,
            parameters.sound_speed,
            parameters.density,
            parameters.attenuation,
            config.pml_size,
        )
    }

    pub fn parameters(&self) -> MediumParameters<D> {
        MediumParameters {
            sound_speed: self.sound_speed.clone(),
            density: self.density.clone(),
            attenuation: self.attenuation.clone(),
        }
    }

    pub fn config(&self) -> MediumConfig {
        MediumConfig {
            domain: self.domain.clone(),
            pml_size: self.pml_size,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn domain_arc(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn sound_speed(&self) -> &Parameter<D> {
        &self.sound_speed
    }

    pub fn density(&self) -> &Parameter<D> {
        &self.density
    }

    pub fn attenuation(&self) -> &Parameter<D> {
        &self.attenuation
    }

    pub fn pml_size(&self) -> usize {
        self.pml_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fourier::FourierSeries;

    fn domain(dx: f64) -> Arc<Domain> {
        Arc::new(Domain::new(&[16, 16], &[dx, dx]).unwrap())
    }

    #[test]
    fn test_homogeneous_medium() {
        let medium = Medium::<FourierSeries>::homogeneous(domain(1.0), 1500.0, 1000.0, 0.0, 4).unwrap();
        assert!(!medium.density().is_field());
        assert_eq!(medium.sound_speed().max_real(), 1500.0);
        assert_eq!(medium.pml_size(), 4);
    }

    #[test]
    fn test_field_parameter_domain_mismatch() {
        let density = Field::<FourierSeries>::constant(domain(0.5), Complex::new(1.0, 0.0));
        let result = Medium::new(domain(1.0), 1.0, density, 0.0, 2);
        assert!(matches!(result, Err(Error::DomainMismatch(_))));
    }

    #[test]
    fn test_pml_size_bound() {
        let result = Medium::<FourierSeries>::homogeneous(domain(1.0), 1.0, 1.0, 0.0, 8);
        assert!(matches!(result, Err(Error::InvalidPmlSize(_))));
        assert!(Medium::<FourierSeries>::homogeneous(domain(1.0), 1.0, 1.0, 0.0, 7).is_ok());
        assert!(Medium::<FourierSeries>::homogeneous(domain(1.0), 1.0, 1.0, 0.0, 0).is_ok());
    }

    #[test]
    fn test_non_positive_sound_speed() {
        let result = Medium::<FourierSeries>::homogeneous(domain(1.0), 0.0, 1.0, 0.0, 0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_density_map_with_zero_sample() {
        let mut values = ndarray::ArrayD::from_elem(ndarray::IxDyn(&[16, 16]), 1000.0);
        values[[5, 9]] = 0.0;
        let density = Field::<FourierSeries>::from_real(domain(1.0), values).unwrap();
        let result = Medium::new(domain(1.0), 1500.0, density, 0.0, 0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let speed = Field::<FourierSeries>::constant(domain(1.0), Complex::new(f64::NAN, 0.0));
        let result = Medium::new(domain(1.0), speed, 1000.0, 0.0, 0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_parameter_config_split() {
        let speed = Field::<FourierSeries>::constant(domain(1.0), Complex::new(2.0, 0.0));
        let medium = Medium::new(domain(1.0), speed, 1.0, 0.5, 3).unwrap();

        let mut parameters = medium.parameters();
        let config = medium.config();
        assert_eq!(config.pml_size, 3);
        assert!(parameters.sound_speed.is_field());

        parameters.attenuation = Parameter::Scalar(0.25);
        let rebuilt = Medium::from_parts(parameters, config).unwrap();
        assert_eq!(rebuilt.attenuation().max_real(), 0.25);
        assert_eq!(rebuilt.pml_size(), 3);
        assert_eq!(rebuilt.domain(), medium.domain());
    }

    #[test]
    fn test_parameter_map() {
        let scalar = Parameter::<FourierSeries>::Scalar(2.0);
        match scalar.map(|v| v * v) {
            MappedParameter::Scalar(v) => assert_eq!(v, Complex::new(4.0, 0.0)),
            MappedParameter::Field(_) => panic!("scalar must stay scalar"),
        }
    }
}
