//! Frequency-domain acoustic operators
//!
//! The Helmholtz operator is the sum of a PML-damped Laplacian with a
//! variable-density correction and the complex squared wavenumber term:
//!
//! ```text
//! H u = Σ_i γ_i ∂_i (γ_i ∂_i u) - Σ_i (γ_i ∂_i u)(∂_i ρ) / ρ + k² u
//! k²  = (ω/c)² + 2i·ω³·α/c
//! ```
//!
//! Spectral setup (PML maps, transform plans) is carried in an explicit
//! [`LaplacianParams`] bundle. Every operator returns the bundle it used, and
//! feeding it back into the next call at the same domain and frequency skips
//! the setup without changing the result.

use crate::acoustics::conversion::{db_to_neper_factor, DEFAULT_POWER_LAW_EXPONENT};
use crate::acoustics::pml::{complex_pml_with_config, PmlConfig};
use crate::engine::discretization::{diag_jacobian, gradient, Discretization};
use crate::engine::field::{Complex64, Field, VectorField};
use crate::error::Result;
use crate::geometry::medium::{MappedParameter, Medium, Parameter};
use log::{debug, warn};
use num_complex::Complex;

/// Reusable setup for [`laplacian_with_pml`] and [`helmholtz`]
#[derive(Debug, Clone)]
pub struct LaplacianParams<D: Discretization> {
    /// Complex damping map per axis
    pub pml: VectorField<D>,
    /// Transform parameters for derivatives of the wavefield
    pub fft_u: D::Params,
    /// Transform parameters for the density gradient, only for density maps
    pub fft_rho0: Option<D::Params>,
    omega: f64,
    pml_size: usize,
    pml_config: PmlConfig,
}

/// The Helmholtz operator threads the Laplacian bundle unchanged
pub type HelmholtzParams<D> = LaplacianParams<D>;

impl<D: Discretization> LaplacianParams<D> {
    /// Build the bundle for `medium` at `omega` with the default PML profile
    pub fn new(medium: &Medium<D>, omega: f64) -> Self {
        Self::with_pml_config(medium, omega, PmlConfig::default())
    }

    /// Build the bundle with an explicit PML profile
    pub fn with_pml_config(medium: &Medium<D>, omega: f64, pml_config: PmlConfig) -> Self {
        debug!(
            "building {} Laplacian parameters for N={:?}, omega={}",
            D::NAME,
            medium.domain().shape(),
            omega
        );
        let fft_rho0 = medium
            .density()
            .as_field()
            .map(|rho0| D::init_params(rho0.domain()));

        Self {
            pml: complex_pml_with_config(medium, omega, &pml_config),
            fft_u: D::init_params(medium.domain()),
            fft_rho0,
            omega,
            pml_size: medium.pml_size(),
            pml_config,
        }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn pml_config(&self) -> &PmlConfig {
        &self.pml_config
    }

    fn built_for(&self, medium: &Medium<D>, omega: f64) -> bool {
        self.omega == omega
            && self.pml_size == medium.pml_size()
            && self.pml.domain() == medium.domain()
    }
}

/// Use the caller's bundle when it fits, otherwise build a fresh one
fn resolve_params<D: Discretization>(
    medium: &Medium<D>,
    omega: f64,
    params: Option<&LaplacianParams<D>>,
) -> LaplacianParams<D> {
    match params {
        Some(params) if params.built_for(medium, omega) => {
            debug!("reusing {} Laplacian parameters", D::NAME);
            params.clone()
        }
        Some(params) => {
            warn!(
                "Laplacian parameters built for omega={} on N={:?} do not match omega={} on N={:?}, rebuilding",
                params.omega,
                params.pml.domain().shape(),
                omega,
                medium.domain().shape()
            );
            LaplacianParams::with_pml_config(medium, omega, params.pml_config)
        }
        None => LaplacianParams::new(medium, omega),
    }
}

/// Density correction `Σ_i (γ_i ∂_i u)(∂_i ρ) / ρ`
///
/// A scalar density has no gradient: the correction is an exact zero field
/// and no derivative of the density is taken.
pub fn density_correction<D: Discretization>(
    mod_grad_u: &VectorField<D>,
    density: &Parameter<D>,
    fft_rho0: Option<&D::Params>,
) -> Result<(Field<D>, Option<D::Params>)> {
    match density {
        Parameter::Scalar(_) => Ok((Field::zeros(mod_grad_u.domain_arc().clone()), None)),
        Parameter::Field(rho0) => {
            let (grad_rho0, fft_rho0) = gradient(rho0, fft_rho0)?;
            let rho_u = mod_grad_u
                .mul_unchecked(&grad_rho0)
                .sum_over_dims()
                .zip_unchecked(rho0, |num, rho| num / rho);
            Ok((rho_u, Some(fft_rho0)))
        }
    }
}

/// PML-damped Laplacian with variable-density correction
///
/// Returns the result together with the parameter bundle that produced it.
pub fn laplacian_with_pml<D: Discretization>(
    u: &Field<D>,
    medium: &Medium<D>,
    omega: f64,
    params: Option<&LaplacianParams<D>>,
) -> Result<(Field<D>, LaplacianParams<D>)> {
    medium.domain().ensure_same(u.domain(), "wavefield")?;
    let mut params = resolve_params(medium, omega, params);

    let (grad_u, fft_u) = gradient(u, Some(&params.fft_u))?;
    let mod_grad_u = grad_u.mul_unchecked(&params.pml);
    let (diag, _) = diag_jacobian(&mod_grad_u, Some(&fft_u))?;
    let nabla_u = diag.mul_unchecked(&params.pml).sum_over_dims();

    let (rho_u, fft_rho0) =
        density_correction(&mod_grad_u, medium.density(), params.fft_rho0.as_ref())?;
    if params.fft_rho0.is_none() {
        params.fft_rho0 = fft_rho0;
    }

    Ok((nabla_u.zip_unchecked(&rho_u, |a, b| a - b), params))
}

/// Squared complex wavenumber `(ω/c)² + 2i·ω³·α/c` at one point
fn squared_wavenumber(c: Complex64, alpha: Complex64, omega: f64) -> Complex64 {
    (Complex::new(omega, 0.0) / c).powi(2) + Complex::new(0.0, 2.0 * omega.powi(3)) * alpha / c
}

/// Wavenumber term `k² · u`
///
/// Attenuation is given in dB/(MHz^y cm) and converted to Nepers with a
/// quadratic power law.
pub fn wavevector<D: Discretization>(
    u: &Field<D>,
    medium: &Medium<D>,
    omega: f64,
) -> Result<Field<D>> {
    medium.domain().ensure_same(u.domain(), "wavefield")?;
    let to_neper = db_to_neper_factor(DEFAULT_POWER_LAW_EXPONENT);
    let alpha = medium.attenuation().map(|a| a * to_neper);

    let result = match (medium.sound_speed(), alpha) {
        (Parameter::Scalar(c), MappedParameter::Scalar(alpha)) => {
            u.clone() * squared_wavenumber(Complex::new(*c, 0.0), alpha, omega)
        }
        (sound_speed, alpha) => {
            let domain = u.domain_arc().clone();
            let alpha = match alpha {
                MappedParameter::Scalar(value) => Field::constant(domain.clone(), value),
                MappedParameter::Field(field) => field,
            };
            let k2 = sound_speed
                .to_field(domain)
                .zip_unchecked(&alpha, |c, a| squared_wavenumber(c, a, omega));
            u.zip_unchecked(&k2, |v, k| v * k)
        }
    };

    Ok(result)
}

/// Full Helmholtz operator `laplacian_with_pml(u) + wavevector(u)`
///
/// Pass the returned bundle back in to reuse the spectral setup on the next
/// call at the same domain and frequency.
pub fn helmholtz<D: Discretization>(
    u: &Field<D>,
    medium: &Medium<D>,
    omega: f64,
    params: Option<&HelmholtzParams<D>>,
) -> Result<(Field<D>, HelmholtzParams<D>)> {
    let (laplacian, params) = laplacian_with_pml(u, medium, omega, params)?;
    let k = wavevector(u, medium, omega)?;
    Ok((laplacian.zip_unchecked(&k, |a, b| a + b), params))
}
