//! Time axis primitives shared by the raw and derived series.

use crate::errors::{GwpError, GwpResult};
use is_close::is_close;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Value type used across the crate.
pub type FloatValue = f64;

/// Simulation time in years since the pulse emission.
pub type Time = f64;

/// A uniformly spaced, strictly increasing time axis.
///
/// All substance columns share a single axis, so the axis is validated once
/// at load time and the per-row step is exposed as [`timestep`](Self::timestep).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    values: Array1<Time>,
    timestep: Time,
}

impl TimeAxis {
    /// Build an axis from raw time values, validating monotonicity and
    /// uniform spacing.
    pub fn from_values(values: Array1<Time>) -> GwpResult<Self> {
        if values.len() < 2 {
            return Err(GwpError::Data(format!(
                "time axis requires at least 2 rows, got {}",
                values.len()
            )));
        }

        let n = values.len();
        let timestep = (values[n - 1] - values[0]) / (n - 1) as Time;
        if timestep <= 0.0 {
            return Err(GwpError::Data(format!(
                "time axis must be strictly increasing (first={}, last={})",
                values[0],
                values[n - 1]
            )));
        }

        for (i, window) in values.windows(2).into_iter().enumerate() {
            let step = window[1] - window[0];
            if step <= 0.0 {
                return Err(GwpError::Data(format!(
                    "time axis not strictly increasing at row {}: {} -> {}",
                    i, window[0], window[1]
                )));
            }
            if !is_close!(step, timestep, rel_tol = 1e-6, abs_tol = 1e-9) {
                return Err(GwpError::Data(format!(
                    "irregular time axis at row {}: step {} does not match uniform step {}",
                    i, step, timestep
                )));
            }
        }

        Ok(Self { values, timestep })
    }

    pub fn values(&self) -> &Array1<Time> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Time {
        self.values[index]
    }

    pub fn first(&self) -> Time {
        self.values[0]
    }

    pub fn last(&self) -> Time {
        self.values[self.values.len() - 1]
    }

    /// Uniform step between consecutive rows, derived as
    /// `(t_last - t_first) / (n_rows - 1)`.
    pub fn timestep(&self) -> Time {
        self.timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn uniform_axis() {
        let axis = TimeAxis::from_values(array![0.0, 10.0, 20.0, 30.0]).unwrap();
        assert_eq!(axis.timestep(), 10.0);
        assert_eq!(axis.len(), 4);
        assert_eq!(axis.first(), 0.0);
        assert_eq!(axis.last(), 30.0);
    }

    #[test]
    fn rejects_non_monotonic() {
        let result = TimeAxis::from_values(array![0.0, 10.0, 5.0]);
        assert!(matches!(result, Err(GwpError::Data(_))));
    }

    #[test]
    fn rejects_irregular_step() {
        let result = TimeAxis::from_values(array![0.0, 1.0, 2.0, 10.0]);
        assert!(matches!(result, Err(GwpError::Data(_))));
    }

    #[test]
    fn rejects_single_row() {
        let result = TimeAxis::from_values(array![0.0]);
        assert!(matches!(result, Err(GwpError::Data(_))));
    }
}
