//! Point sensors recording field values at grid positions

use crate::engine::discretization::Discretization;
use crate::engine::field::{Complex64, Field};
use crate::error::{Error, Result};
use crate::geometry::sources::{check_positions, point_index};
use ndarray::{Array1, ArrayD, IxDyn};

/// Sensors at grid positions, one index list per axis
#[derive(Debug, Clone, PartialEq)]
pub struct Sensors {
    pub positions: Vec<Vec<usize>>,
}

impl Sensors {
    pub fn new(positions: Vec<Vec<usize>>) -> Self {
        Self { positions }
    }

    /// Number of sensors
    pub fn len(&self) -> usize {
        self.positions.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gather raw grid samples at the sensor positions
    ///
    /// Positions must describe 1, 2 or 3 axes and match the grid rank.
    pub fn sample<T: Copy>(&self, values: &ArrayD<T>) -> Result<Array1<T>> {
        let ndim = self.positions.len();
        if !(1..=3).contains(&ndim) {
            return Err(Error::invalid_dimension(format!(
                "sensors support 1 to 3 axes, got {}",
                ndim
            )));
        }
        let count = check_positions(&self.positions, values.shape())?;

        Ok((0..count)
            .map(|point| values[IxDyn(&point_index(&self.positions, point))])
            .collect())
    }

    /// Values of `field` at the sensor positions
    pub fn record<D: Discretization>(&self, field: &Field<D>) -> Result<Array1<Complex64>> {
        self.sample(field.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fourier::FourierSeries;
    use crate::geometry::domain::Domain;
    use num_complex::Complex;
    use std::sync::Arc;

    #[test]
    fn test_record_uniform_field() {
        let domain = Arc::new(Domain::new(&[8, 8], &[1.0, 1.0]).unwrap());
        let field = Field::<FourierSeries>::constant(domain, Complex::new(5.0, 0.0));
        let sensors = Sensors::new(vec![vec![3], vec![4]]);

        let recorded = sensors.record(&field).unwrap();
        assert_eq!(recorded.to_vec(), vec![Complex::new(5.0, 0.0)]);
    }

    #[test]
    fn test_sample_order_follows_positions() {
        let values = ArrayD::from_shape_fn(IxDyn(&[4, 4]), |idx| (idx[0] * 10 + idx[1]) as f64);
        let sensors = Sensors::new(vec![vec![3, 0, 2], vec![1, 2, 2]]);
        assert_eq!(sensors.len(), 3);
        assert_eq!(sensors.sample(&values).unwrap().to_vec(), vec![31.0, 2.0, 22.0]);
    }

    #[test]
    fn test_invalid_dimension() {
        let values = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2, 2]));
        let sensors = Sensors::new(vec![vec![0]; 4]);
        assert!(matches!(
            sensors.sample(&values),
            Err(Error::InvalidDimension(_))
        ));

        let empty = Sensors::new(Vec::new());
        assert!(matches!(
            empty.sample(&values),
            Err(Error::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_rank_mismatch() {
        let values = ArrayD::<f64>::zeros(IxDyn(&[4, 4, 4]));
        let sensors = Sensors::new(vec![vec![0], vec![1]]);
        assert!(sensors.sample(&values).is_err());
    }
}
