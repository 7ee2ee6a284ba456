//! pswave - Pseudospectral acoustic operators for heterogeneous media
//!
//! This library builds the frequency-domain (Helmholtz) wave operator on a
//! Fourier grid, including a complex perfectly matched layer and corrections
//! for variable density and attenuation, together with the geometry needed to
//! drive it: domains, media, sources, sensors and time axes.

pub mod acoustics;
pub mod engine;
pub mod error;
pub mod geometry;

// Re-export commonly used types
pub use acoustics::{helmholtz, laplacian_with_pml, wavevector, HelmholtzParams, LaplacianParams};
pub use engine::{Complex64, Field, FiniteDifferences, FourierSeries, VectorField};
pub use error::{Error, Result};
pub use geometry::{Domain, Medium, Sensors, Sources, TimeAxis, TimeHarmonicSource};

pub mod prelude {
    //! Common imports for using the pswave library
    pub use crate::acoustics::{
        complex_pml_on_grid, db_to_neper, helmholtz, laplacian_with_pml, wavevector,
        HelmholtzParams, LaplacianParams, PmlConfig,
    };
    pub use crate::engine::{
        diag_jacobian, gradient, sum_over_dims, Complex64, Discretization, Field,
        FiniteDifferences, FourierSeries, VectorField,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        ComplexSources, Domain, Medium, Parameter, Sensors, Sources, TimeAxis, TimeAxisConfig,
        TimeHarmonicSource,
    };
}
