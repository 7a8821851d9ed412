//! Loading and validation of the raw instantaneous-forcing table.
//!
//! The table is the precomputed output of the atmospheric decay model: one
//! row per time step, one time column, one column of instantaneous radiative
//! forcing (W/m² per kg of pulse) per substance. Loading scales the values
//! to the configured pulse mass so everything downstream works in W/m² per
//! pulse (1 Mt by default).

use crate::config::PipelineConfig;
use crate::errors::{GwpError, GwpResult};
use crate::substance::SubstanceSet;
use crate::timeseries::{FloatValue, Time, TimeAxis};
use ndarray::{s, Array1, Array2, ArrayView1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The raw forcing table: a shared time axis plus one column per substance,
/// in the order fixed by the [`SubstanceSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForcingTable {
    time: TimeAxis,
    /// Rows × substances, W/m² per pulse.
    values: Array2<FloatValue>,
    substances: SubstanceSet,
}

impl ForcingTable {
    /// Load and validate a table from CSV.
    ///
    /// Fails with [`GwpError::Schema`] if the time column or any substance
    /// column is missing, and with [`GwpError::Data`] if values do not parse
    /// or the time axis is not uniform and strictly increasing.
    pub fn load(reader: impl Read, config: &PipelineConfig) -> GwpResult<Self> {
        let substances = config.substance_set()?;
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let time_column = headers
            .iter()
            .position(|h| h == config.time_column)
            .ok_or_else(|| {
                GwpError::Schema(format!("missing time column {:?}", config.time_column))
            })?;
        let columns = substances
            .iter()
            .map(|substance| {
                headers
                    .iter()
                    .position(|h| h == substance.name)
                    .ok_or_else(|| {
                        GwpError::Schema(format!("missing substance column {:?}", substance.name))
                    })
            })
            .collect::<GwpResult<Vec<usize>>>()?;

        let mut times: Vec<Time> = Vec::new();
        let mut values: Vec<FloatValue> = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            times.push(parse_field(&record, time_column, row)?);
            for &column in &columns {
                values.push(parse_field(&record, column, row)? * config.pulse_mass_kg);
            }
        }

        let time = TimeAxis::from_values(Array1::from_vec(times))?;
        let values = Array2::from_shape_vec((time.len(), substances.len()), values)
            .map_err(|e| GwpError::Data(format!("ragged table: {}", e)))?;

        log::info!(
            "loaded forcing table: {} rows x {} substances, timestep {} yr",
            time.len(),
            substances.len(),
            time.timestep()
        );

        Ok(Self {
            time,
            values,
            substances,
        })
    }

    pub fn load_path(path: impl AsRef<Path>, config: &PipelineConfig) -> GwpResult<Self> {
        Self::load(File::open(path)?, config)
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn timestep(&self) -> Time {
        self.time.timestep()
    }

    pub fn n_rows(&self) -> usize {
        self.time.len()
    }

    pub fn substances(&self) -> &SubstanceSet {
        &self.substances
    }

    /// Full rows × substances value matrix, W/m² per pulse.
    pub fn values(&self) -> &Array2<FloatValue> {
        &self.values
    }

    /// One substance's forcing series.
    pub fn column(&self, substance: usize) -> ArrayView1<'_, FloatValue> {
        self.values.slice(s![.., substance])
    }
}

fn parse_field(record: &csv::StringRecord, column: usize, row: usize) -> GwpResult<FloatValue> {
    let raw = record.get(column).ok_or_else(|| {
        GwpError::Data(format!("row {} is missing column {}", row, column))
    })?;
    raw.parse::<FloatValue>().map_err(|_| {
        GwpError::Data(format!(
            "row {} column {}: {:?} is not a number",
            row, column, raw
        ))
    })
}
