//! Helmholtz operator on a 2D medium with a circular inclusion
//!
//! Applies the PML-damped Helmholtz operator to a point source at a few
//! frequencies and reports how the operator output is distributed between
//! the interior and the absorbing layer. The parameter bundle is reused for
//! repeated applications at the same frequency.

use flexi_logger::Logger;
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex;
use pswave::prelude::*;
use std::f64::consts::PI;
use std::sync::Arc;

const N: usize = 128;
const DX: f64 = 1e-4;
const PML_SIZE: usize = 16;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let domain = Arc::new(Domain::new(&[N, N], &[DX, DX])?);

    // water background with a denser, faster disc in the middle
    let grid = domain.grid();
    let radius = 20.0 * DX;
    let inside = |idx: &IxDyn| {
        let (x, y) = (grid[0][idx], grid[1][idx]);
        (x * x + y * y).sqrt() < radius
    };
    let speed = ArrayD::from_shape_fn(IxDyn(&[N, N]), |idx| {
        if inside(&idx) {
            2000.0
        } else {
            1500.0
        }
    });
    let density = ArrayD::from_shape_fn(IxDyn(&[N, N]), |idx| {
        if inside(&idx) {
            1200.0
        } else {
            1000.0
        }
    });

    let medium = Medium::<FourierSeries>::new(
        domain.clone(),
        Field::from_real(domain.clone(), speed)?,
        Field::from_real(domain.clone(), density)?,
        0.5,
        PML_SIZE,
    )?;

    let source = ComplexSources::new(vec![vec![N / 4], vec![N / 2]], vec![Complex::new(1.0, 0.0)])
        .to_field::<FourierSeries>(domain.clone())?;
    let sensors = Sensors::new(vec![vec![N / 2, 3 * N / 4], vec![N / 2, N / 2]]);

    for frequency in [0.5e6, 1.0e6, 1.5e6] {
        let omega = 2.0 * PI * frequency;
        let (mut output, mut params) = helmholtz(&source, &medium, omega, None)?;

        // a few repeated applications, as an iterative solver would do
        for _ in 0..3 {
            let (next, reused) = helmholtz(&output, &medium, omega, Some(&params))?;
            let scale = 1.0 / next.norm_squared().sqrt();
            output = next * Complex::new(scale, 0.0);
            params = reused;
        }

        let (interior, layer) = energy_split(&output, PML_SIZE);
        let recorded = sensors.record(&output)?;
        log::info!(
            "f = {:.1} MHz: interior {:.3e}, layer {:.3e}, sensors {:?}",
            frequency / 1e6,
            interior,
            layer,
            recorded.iter().map(|v| v.norm()).collect::<Vec<_>>()
        );
    }

    Ok(())
}

/// Squared norm inside the domain and within the absorbing layer
fn energy_split(field: &Field<FourierSeries>, pml_size: usize) -> (f64, f64) {
    let in_layer = |i: usize| i < pml_size || i >= N - pml_size;
    field
        .values()
        .indexed_iter()
        .fold((0.0, 0.0), |(interior, layer), (idx, value)| {
            if in_layer(idx[0]) || in_layer(idx[1]) {
                (interior, layer + value.norm_sqr())
            } else {
                (interior + value.norm_sqr(), layer)
            }
        })
}
