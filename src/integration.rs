//! Derivation of the integrated-forcing and GWP series from the raw table.

use crate::errors::{GwpError, GwpResult};
use crate::table::ForcingTable;
use crate::timeseries::FloatValue;
use ndarray::{s, Array2, ArrayView1, Axis};

/// The two series derived from a raw forcing table, both rows × substances
/// in the table's substance order.
///
/// Derivation is a pure function of the table and the constants, computed
/// once per load. Per-frame consumers only borrow views into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// Cumulative forcing in joules accumulated globally, per pulse.
    integrated: Array2<FloatValue>,
    /// Integrated forcing relative to the reference substance; the
    /// reference column is identically 1.
    gwp: Array2<FloatValue>,
}

impl DerivedSeries {
    pub fn integrated(&self) -> &Array2<FloatValue> {
        &self.integrated
    }

    pub fn gwp(&self) -> &Array2<FloatValue> {
        &self.gwp
    }

    pub fn integrated_column(&self, substance: usize) -> ArrayView1<'_, FloatValue> {
        self.integrated.slice(s![.., substance])
    }

    pub fn gwp_column(&self, substance: usize) -> ArrayView1<'_, FloatValue> {
        self.gwp.slice(s![.., substance])
    }

    pub fn gwp_at(&self, row: usize, substance: usize) -> FloatValue {
        self.gwp[[row, substance]]
    }

    pub fn n_rows(&self) -> usize {
        self.integrated.nrows()
    }
}

/// Derive the integrated-forcing and GWP series.
///
/// The integral is the inclusive running sum over time-ordered rows (a
/// left-Riemann approximation at the table's fixed step; no sub-step
/// interpolation is performed), scaled by `seconds_per_year * earth_area_m2`
/// to convert W/m² into joules accumulated globally per yearly row. GWP is
/// the row-wise ratio against the reference substance's column.
///
/// A zero reference denominator is only admissible at row 0, where the
/// ratio is defined as 1 (the pulse has not decayed yet); at any later row
/// it indicates corrupt input and fails with [`GwpError::Arithmetic`].
pub fn integrate(
    table: &ForcingTable,
    seconds_per_year: FloatValue,
    earth_area_m2: FloatValue,
) -> GwpResult<DerivedSeries> {
    let reference = table.substances().reference_index();

    let mut integrated = table.values().clone();
    integrated.accumulate_axis_inplace(Axis(0), |&prev, cur| *cur += prev);
    integrated *= seconds_per_year * earth_area_m2;

    let mut gwp = Array2::zeros(integrated.raw_dim());
    for (row, mut gwp_row) in gwp.axis_iter_mut(Axis(0)).enumerate() {
        let denominator = integrated[[row, reference]];
        if denominator == 0.0 {
            if row == 0 {
                // A zero-forcing start: the t=0 ratio convention.
                gwp_row.fill(1.0);
                continue;
            }
            return Err(GwpError::Arithmetic(format!(
                "reference substance {:?} has zero integrated forcing at row {}",
                table.substances().reference().name,
                row
            )));
        }
        gwp_row.assign(&integrated.slice(s![row, ..]));
        gwp_row /= denominator;
    }

    log::debug!(
        "derived integrated + GWP series over {} rows ({} substances)",
        integrated.nrows(),
        integrated.ncols()
    );

    Ok(DerivedSeries { integrated, gwp })
}
