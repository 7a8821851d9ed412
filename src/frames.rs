//! Mapping animation frames to simulation time and rows.
//!
//! The frame count is a rendering concern (fixed for smooth playback) and
//! the simulation time a modeling one, so the mapping between them is kept
//! behind a trait. The reveal logic only sees times and rows and never cares
//! which mapping produced them.

use crate::errors::{GwpError, GwpResult};
use crate::timeseries::Time;
use std::fmt::Debug;

/// A monotone mapping from a bounded frame range onto `[0, time_max]`.
///
/// Implementations clamp out-of-range frames rather than fail: rendering
/// drivers are allowed to request the initial or final frame defensively at
/// setup and teardown.
pub trait FrameMapping: Debug {
    fn frame_to_time(&self, frame: u32) -> Time;
    fn frame_max(&self) -> u32;
}

/// Linear rescale of `[0, frame_max)` onto `[0, time_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapping {
    frame_max: u32,
    time_max: Time,
}

impl LinearMapping {
    pub fn new(frame_max: u32, time_max: Time) -> GwpResult<Self> {
        if frame_max == 0 {
            return Err(GwpError::Config(
                "frame_max must be positive".to_string(),
            ));
        }
        Ok(Self {
            frame_max,
            time_max,
        })
    }
}

impl FrameMapping for LinearMapping {
    fn frame_to_time(&self, frame: u32) -> Time {
        let frame = frame.min(self.frame_max);
        frame as Time * self.time_max / self.frame_max as Time
    }

    fn frame_max(&self) -> u32 {
        self.frame_max
    }
}

/// Logarithmic mapping: one decade of simulation time per
/// `frames_per_decade` frames, capped at `time_max`.
///
/// Spends most of the playback on the early years where the forcing curves
/// actually move, at the cost of a rushed tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogMapping {
    frame_max: u32,
    time_max: Time,
    frames_per_decade: Time,
}

impl LogMapping {
    pub fn new(frame_max: u32, time_max: Time, frames_per_decade: Time) -> GwpResult<Self> {
        if frame_max == 0 {
            return Err(GwpError::Config(
                "frame_max must be positive".to_string(),
            ));
        }
        if frames_per_decade <= 0.0 {
            return Err(GwpError::Config(format!(
                "frames_per_decade must be positive, got {}",
                frames_per_decade
            )));
        }
        Ok(Self {
            frame_max,
            time_max,
            frames_per_decade,
        })
    }
}

impl FrameMapping for LogMapping {
    fn frame_to_time(&self, frame: u32) -> Time {
        let frame = frame.min(self.frame_max);
        let time = 10f64.powf(frame as Time / self.frames_per_decade);
        time.min(self.time_max)
    }

    fn frame_max(&self) -> u32 {
        self.frame_max
    }
}

/// Row index holding at time `t`: `floor(t / timestep)`, clamped to the
/// valid row range.
pub fn time_to_row(t: Time, timestep: Time, n_rows: usize) -> usize {
    let row = (t.max(0.0) / timestep).floor() as usize;
    row.min(n_rows - 1)
}
