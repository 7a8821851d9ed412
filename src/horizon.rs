//! Horizon lookups and the crossing predicate used for annotations.

use crate::errors::{GwpError, GwpResult};
use crate::integration::DerivedSeries;
use crate::timeseries::{FloatValue, Time, TimeAxis};
use serde::{Deserialize, Serialize};

/// A fixed GWP evaluation time, in years.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Horizon(pub f64);

impl Horizon {
    pub fn years(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GWP{}", self.0)
    }
}

/// Maps the configured horizons onto row positions of the derived series.
///
/// Horizons are static, read-only configuration; the index is validated once
/// against the loaded time axis so later lookups cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonIndex {
    horizons: Vec<Horizon>,
    timestep: Time,
    n_rows: usize,
    time_max: Time,
}

impl HorizonIndex {
    /// Build the index, rejecting any horizon beyond the series' last time.
    pub fn new(horizons: &[f64], time: &TimeAxis) -> GwpResult<Self> {
        let index = Self {
            horizons: horizons.iter().copied().map(Horizon).collect(),
            timestep: time.timestep(),
            n_rows: time.len(),
            time_max: time.last(),
        };
        for horizon in &index.horizons {
            index.row_for(*horizon)?;
        }
        Ok(index)
    }

    pub fn horizons(&self) -> &[Horizon] {
        &self.horizons
    }

    /// Nearest-step row for a horizon: `round(h / timestep)`, clamped to the
    /// valid row range.
    pub fn row_for(&self, horizon: Horizon) -> GwpResult<usize> {
        if horizon.years() > self.time_max {
            return Err(GwpError::Range(format!(
                "horizon {} yr exceeds the series' maximum time {} yr",
                horizon.years(),
                self.time_max
            )));
        }
        let row = (horizon.years() / self.timestep).round() as usize;
        Ok(row.min(self.n_rows - 1))
    }

    /// GWP value of one substance at a horizon.
    pub fn value_at(
        &self,
        horizon: Horizon,
        derived: &DerivedSeries,
        substance: usize,
    ) -> GwpResult<FloatValue> {
        Ok(derived.gwp_at(self.row_for(horizon)?, substance))
    }

    /// Horizons newly crossed by the time step `t_prev -> t_cur`.
    ///
    /// A horizon h is crossed iff `t_prev < h <= t_cur`, so over a
    /// monotonically advancing sweep each horizon fires exactly once, and a
    /// restart from t=0 re-fires them all.
    pub fn crossed_between(&self, t_prev: Time, t_cur: Time) -> impl Iterator<Item = Horizon> + '_ {
        self.horizons
            .iter()
            .copied()
            .filter(move |h| t_prev < h.years() && h.years() <= t_cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn axis(n: usize, step: f64) -> TimeAxis {
        TimeAxis::from_values(Array1::from_iter((0..n).map(|i| i as f64 * step))).unwrap()
    }

    #[test]
    fn rows_round_to_nearest_step() {
        let index = HorizonIndex::new(&[20.0, 100.0, 500.0], &axis(1001, 1.0)).unwrap();
        assert_eq!(index.row_for(Horizon(20.0)).unwrap(), 20);
        assert_eq!(index.row_for(Horizon(100.0)).unwrap(), 100);
        assert_eq!(index.row_for(Horizon(500.0)).unwrap(), 500);

        let coarse = HorizonIndex::new(&[20.0], &axis(101, 7.0)).unwrap();
        assert_eq!(coarse.row_for(Horizon(20.0)).unwrap(), 3);
    }

    #[test]
    fn row_lookup_is_idempotent() {
        let index = HorizonIndex::new(&[100.0], &axis(201, 1.0)).unwrap();
        let first = index.row_for(Horizon(100.0)).unwrap();
        let second = index.row_for(Horizon(100.0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn horizon_beyond_series_is_range_error() {
        let result = HorizonIndex::new(&[20.0, 100.0, 500.0], &axis(101, 1.0));
        assert!(matches!(result, Err(GwpError::Range(_))));
    }

    #[test]
    fn crossing_fires_on_the_step_reaching_the_horizon() {
        let index = HorizonIndex::new(&[20.0, 100.0], &axis(201, 1.0)).unwrap();

        let crossed: Vec<_> = index.crossed_between(19.0, 20.0).collect();
        assert_eq!(crossed, vec![Horizon(20.0)]);

        // Not re-fired once past.
        assert_eq!(index.crossed_between(20.0, 21.0).count(), 0);
        // Not fired before the horizon is reached.
        assert_eq!(index.crossed_between(18.0, 19.5).count(), 0);
        // A large step picks up every horizon inside it.
        let crossed: Vec<_> = index.crossed_between(0.0, 150.0).collect();
        assert_eq!(crossed, vec![Horizon(20.0), Horizon(100.0)]);
    }

    #[test]
    fn crossing_fires_exactly_once_over_a_sweep() {
        let index = HorizonIndex::new(&[20.0, 100.0, 500.0], &axis(1001, 1.0)).unwrap();
        let mut fired = 0;
        let mut t_prev = 0.0;
        for frame in 0..=1000 {
            let t_cur = frame as f64;
            fired += index.crossed_between(t_prev, t_cur).count();
            t_prev = t_cur;
        }
        assert_eq!(fired, 3);
    }
}
