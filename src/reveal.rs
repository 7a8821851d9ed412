//! The incremental-reveal state machine driven by the rendering loop.

use crate::errors::GwpResult;
use crate::frames::{time_to_row, FrameMapping};
use crate::horizon::HorizonIndex;
use crate::integration::DerivedSeries;
use crate::render::{format_gwp, CurvePrefix, FrameInstructions, GwpLabel, HorizonAnnotation};
use crate::table::ForcingTable;
use crate::timeseries::Time;
use ndarray::s;

/// Tracks how much of each series has been revealed and emits per-frame
/// draw instructions.
///
/// The machine owns no series data, only references into the loaded table
/// and its derived series plus a single row cursor. The cursor never
/// decreases during playback; the only way back is an explicit
/// [`reset`](Self::reset), after which a replay re-fires every horizon
/// annotation. Playback is inherently sequential, so the machine is meant
/// to be advanced from a single rendering call path.
#[derive(Debug)]
pub struct RevealStateMachine<'a> {
    table: &'a ForcingTable,
    derived: &'a DerivedSeries,
    horizons: &'a HorizonIndex,
    mapping: &'a dyn FrameMapping,
    /// Last revealed row; `None` until the first frame is drawn.
    row: Option<usize>,
    /// Simulation time of the last emitted frame, for crossing detection.
    t_prev: Time,
}

impl<'a> RevealStateMachine<'a> {
    pub fn new(
        table: &'a ForcingTable,
        derived: &'a DerivedSeries,
        horizons: &'a HorizonIndex,
        mapping: &'a dyn FrameMapping,
    ) -> Self {
        Self {
            table,
            derived,
            horizons,
            mapping,
            row: None,
            t_prev: 0.0,
        }
    }

    /// Advance to `frame` and emit the frame's draw instructions.
    ///
    /// Returns `None` when the frame does not reveal a new row: the visible
    /// prefix never shrinks, so stale or backward frame requests emit
    /// nothing. Out-of-range frames are clamped by the mapping, never
    /// rejected.
    pub fn advance(&mut self, frame: u32) -> GwpResult<Option<FrameInstructions<'a>>> {
        let t_cur = self.mapping.frame_to_time(frame);
        let row = time_to_row(t_cur, self.table.timestep(), self.table.n_rows());
        if let Some(current) = self.row {
            if row <= current {
                return Ok(None);
            }
        }

        let substances = self.table.substances();
        let time = self.table.time().values();
        let mut instant = Vec::with_capacity(substances.len());
        let mut integrated = Vec::with_capacity(substances.len());
        let mut gwp = Vec::with_capacity(substances.len());
        for (index, substance) in substances.iter().enumerate() {
            let emphasis = substances.is_reference(index);
            instant.push(CurvePrefix {
                substance: &substance.name,
                color: &substance.color,
                emphasis,
                x: time.slice(s![..=row]),
                y: self.table.values().slice(s![..=row, index]),
            });
            integrated.push(CurvePrefix {
                substance: &substance.name,
                color: &substance.color,
                emphasis,
                x: time.slice(s![..=row]),
                y: self.derived.integrated().slice(s![..=row, index]),
            });
            gwp.push(CurvePrefix {
                substance: &substance.name,
                color: &substance.color,
                emphasis,
                x: time.slice(s![..=row]),
                y: self.derived.gwp().slice(s![..=row, index]),
            });
        }

        let mut annotations = Vec::new();
        for horizon in self.horizons.crossed_between(self.t_prev, t_cur) {
            let mut labels = Vec::with_capacity(substances.len());
            for (index, substance) in substances.iter().enumerate() {
                let value = self.horizons.value_at(horizon, self.derived, index)?;
                labels.push(GwpLabel {
                    substance: &substance.name,
                    color: &substance.color,
                    // Convention from the reference animation: only the
                    // 100-year horizon gets bold labels.
                    bold: horizon.years() == 100.0,
                    value,
                    text: format_gwp(value),
                });
            }
            log::debug!("horizon {} crossed at frame {}", horizon, frame);
            annotations.push(HorizonAnnotation {
                horizon,
                caption: horizon.to_string(),
                labels,
            });
        }

        self.row = Some(row);
        self.t_prev = t_cur;

        Ok(Some(FrameInstructions {
            frame,
            time: t_cur,
            row,
            instant,
            integrated,
            gwp,
            annotations,
        }))
    }

    /// Last revealed row, if playback has started.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// The whole series is visible; further frames emit nothing.
    pub fn is_terminal(&self) -> bool {
        self.row == Some(self.table.n_rows() - 1)
    }

    /// Return to the not-started state. The next playback re-reveals the
    /// series from row 0 and re-fires every horizon crossing.
    pub fn reset(&mut self) {
        self.row = None;
        self.t_prev = 0.0;
    }
}
