//! Geometry module: grids, media, sources, sensors and time sampling

pub mod domain;
pub mod medium;
pub mod sensors;
pub mod sources;
pub mod time_axis;

pub use domain::{spatial_axis, wavenumber_axis, Domain, IdentityCorrection, KSpaceCorrection};
pub use medium::{Medium, MediumConfig, MediumParameters, Parameter};
pub use sensors::Sensors;
pub use sources::{ComplexSources, Sources, TimeHarmonicSource};
pub use time_axis::{TimeAxis, TimeAxisConfig};
