//! Per-frame draw instructions and the rendering seam.
//!
//! The core never touches a plotting back-end's retained objects. Each
//! frame it emits a declarative, replayable [`FrameInstructions`] value and
//! hands it to whatever [`RenderAdapter`] the driver installed. Curve data
//! is borrowed straight from the derived series, so emitting a frame never
//! copies the series.

use crate::errors::GwpResult;
use crate::horizon::Horizon;
use crate::timeseries::{FloatValue, Time};
use ndarray::ArrayView1;
use serde::{Serialize, Serializer};
use std::io::Write;

/// A revealed prefix of one substance's curve in one panel.
#[derive(Debug, Serialize)]
pub struct CurvePrefix<'a> {
    pub substance: &'a str,
    pub color: &'a str,
    /// The reference substance is drawn with emphasis (thicker line,
    /// hatched fill).
    pub emphasis: bool,
    #[serde(serialize_with = "serialize_view")]
    pub x: ArrayView1<'a, Time>,
    #[serde(serialize_with = "serialize_view")]
    pub y: ArrayView1<'a, FloatValue>,
}

/// One substance's rounded GWP value at a just-crossed horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwpLabel<'a> {
    pub substance: &'a str,
    pub color: &'a str,
    /// Bold only for the 100-year horizon.
    pub bold: bool,
    pub value: FloatValue,
    /// Display text, rounded to 3 significant figures.
    pub text: String,
}

/// A horizon annotation due this frame: a dashed vertical marker at `x = h`,
/// a rotated caption, and one value label per substance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonAnnotation<'a> {
    pub horizon: Horizon,
    /// Caption text, e.g. `GWP100`.
    pub caption: String,
    pub labels: Vec<GwpLabel<'a>>,
}

/// Everything the rendering back-end needs to draw one frame.
///
/// `instant` carries filled-area descriptors; `integrated` and `gwp` carry
/// line data over the same revealed prefix.
#[derive(Debug, Serialize)]
pub struct FrameInstructions<'a> {
    pub frame: u32,
    pub time: Time,
    /// Last visible row, inclusive.
    pub row: usize,
    pub instant: Vec<CurvePrefix<'a>>,
    pub integrated: Vec<CurvePrefix<'a>>,
    pub gwp: Vec<CurvePrefix<'a>>,
    pub annotations: Vec<HorizonAnnotation<'a>>,
}

/// The external rendering collaborator's side of the contract.
pub trait RenderAdapter {
    fn apply(&mut self, instructions: &FrameInstructions<'_>) -> GwpResult<()>;
}

/// Writes one JSON object per frame, newline delimited.
///
/// Stands in for a real plotting back-end; the stream can be replayed into
/// any renderer after the fact.
#[derive(Debug)]
pub struct JsonLinesAdapter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesAdapter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderAdapter for JsonLinesAdapter<W> {
    fn apply(&mut self, instructions: &FrameInstructions<'_>) -> GwpResult<()> {
        serde_json::to_writer(&mut self.writer, instructions)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Format a GWP value for display at 3 significant figures, shrinking the
/// decimal precision as the magnitude grows:
/// `round(value, 3 - digit_count(int(value)))`.
///
/// This is the reference animation's deliberately low-precision label
/// convention, not a computation step.
pub fn format_gwp(value: FloatValue) -> String {
    let digits = (value.trunc().abs() as i64).to_string().len() as i32;
    let rounded = if digits >= 3 {
        // Rounding to tens/hundreds/...: scale down by a whole power of ten
        // so the final multiply is exact.
        let factor = 10f64.powi(digits - 3);
        (value / factor).round() * factor
    } else {
        let factor = 10f64.powi(3 - digits);
        (value * factor).round() / factor
    };
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn serialize_view<S>(view: &ArrayView1<'_, FloatValue>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(view.iter())
}
