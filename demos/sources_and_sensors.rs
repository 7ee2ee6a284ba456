//! Time sampling, point sources and sensors
//!
//! Derives a time axis from a layered medium, injects a tone burst at one
//! grid point and reads a time-harmonic field back at a line of sensors.

use flexi_logger::Logger;
use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex;
use pswave::prelude::*;
use std::f64::consts::PI;
use std::sync::Arc;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let shape = [64, 48];
    let domain = Arc::new(Domain::new(&shape, &[0.5e-3, 0.5e-3])?);

    let speed = ArrayD::from_shape_fn(IxDyn(&shape), |idx| if idx[1] < 24 { 1500.0 } else { 1800.0 });
    let medium = Medium::<FourierSeries>::new(
        domain.clone(),
        Field::from_real(domain.clone(), speed)?,
        1000.0,
        0.0,
        8,
    )?;

    let time_axis = TimeAxis::from_config(&medium, &TimeAxisConfig::default())?;
    let times = time_axis.to_array();
    log::info!(
        "dt = {:.3e} s, t_end = {:.3e} s, {} steps",
        time_axis.dt,
        time_axis.t_end,
        times.len()
    );

    // three-cycle tone burst at 1 MHz
    let frequency = 1e6;
    let cycles = 3.0;
    let burst = times.mapv(|t| {
        if t * frequency < cycles {
            (2.0 * PI * frequency * t).sin() * (PI * t * frequency / cycles).sin().powi(2)
        } else {
            0.0
        }
    });
    let signals = Array2::from_shape_vec((1, burst.len()), burst.to_vec())?;
    let sources = Sources::new(vec![vec![32], vec![12]], signals, time_axis.dt, domain.clone())?;

    let peak = times
        .iter()
        .map(|&t| sources.on_grid(t).map(|grid| grid.iter().fold(0.0_f64, |m, v| m.max(v.abs()))))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .fold(0.0_f64, f64::max);
    log::info!("peak injected value per axis: {:.3}", peak);

    let amplitude = ComplexSources::new(vec![vec![32], vec![12]], vec![Complex::new(1.0, 0.0)])
        .to_field::<FourierSeries>(domain.clone())?;
    let harmonic = TimeHarmonicSource::new(amplitude, 2.0 * PI * frequency);
    let sensors = Sensors::new(vec![(8..56).step_by(8).collect(), vec![36; 6]]);

    for &t in times.iter().take(4) {
        let field = harmonic.on_grid(t);
        let (response, _) = helmholtz(&field, &medium, harmonic.omega(), None)?;
        let recorded = sensors.record(&response)?;
        log::info!(
            "t = {:.3e} s: |H u| at sensors {:?}",
            t,
            recorded.iter().map(|v| format!("{:.2e}", v.norm())).collect::<Vec<_>>()
        );
    }

    Ok(())
}
