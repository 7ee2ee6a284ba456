//! Unit conversions for acoustic attenuation

use std::f64::consts::{E, PI};

/// Power-law exponent used by the wavevector operator
pub const DEFAULT_POWER_LAW_EXPONENT: f64 = 2.0;

/// Factor turning dB/(MHz^y cm) into Np/((rad/s)^y m)
pub fn db_to_neper_factor(y: f64) -> f64 {
    100.0 * (1e-6 / (2.0 * PI)).powf(y) / (20.0 * E.log10())
}

/// Convert an attenuation coefficient in dB/(MHz^y cm) to Np/((rad/s)^y m)
pub fn db_to_neper(alpha: f64, y: f64) -> f64 {
    alpha * db_to_neper_factor(y)
}

/// Inverse of [`db_to_neper`]
pub fn neper_to_db(alpha: f64, y: f64) -> f64 {
    alpha / db_to_neper_factor(y)
}
