//! Acoustic operators in the frequency domain

pub mod conversion;
pub mod operators;
pub mod pml;

pub use conversion::{db_to_neper, neper_to_db};
pub use operators::{
    density_correction, helmholtz, laplacian_with_pml, wavevector, HelmholtzParams,
    LaplacianParams,
};
pub use pml::{complex_pml_on_grid, complex_pml_with_config, PmlConfig};
