//! The pipeline context object: load once, derive once, replay frames.

use crate::config::PipelineConfig;
use crate::errors::GwpResult;
use crate::frames::{FrameMapping, LinearMapping, LogMapping};
use crate::horizon::HorizonIndex;
use crate::integration::{integrate, DerivedSeries};
use crate::render::RenderAdapter;
use crate::reveal::RevealStateMachine;
use crate::table::ForcingTable;
use std::io::Read;
use std::path::Path;

/// Default playback density of the logarithmic mapping, matching the
/// reference animation's 100 frames per decade.
const LOG_FRAMES_PER_DECADE: f64 = 100.0;

/// Everything the rendering driver needs, constructed in one explicit step.
///
/// The table is loaded and the derived series computed exactly once, here;
/// a stale pipeline is invalidated by constructing a new one, never by a
/// hidden reload check. Per-frame work only borrows from the pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    table: ForcingTable,
    derived: DerivedSeries,
    horizons: HorizonIndex,
}

impl Pipeline {
    pub fn from_reader(reader: impl Read, config: PipelineConfig) -> GwpResult<Self> {
        let table = ForcingTable::load(reader, &config)?;
        let derived = integrate(&table, config.seconds_per_year, config.earth_area_m2)?;
        let horizons = HorizonIndex::new(&config.horizons, table.time())?;
        log::info!(
            "pipeline ready: {} substances, {} rows, horizons {:?}",
            table.substances().len(),
            table.n_rows(),
            config.horizons
        );
        Ok(Self {
            config,
            table,
            derived,
            horizons,
        })
    }

    pub fn from_path(path: impl AsRef<Path>, config: PipelineConfig) -> GwpResult<Self> {
        let table = ForcingTable::load_path(path, &config)?;
        let derived = integrate(&table, config.seconds_per_year, config.earth_area_m2)?;
        let horizons = HorizonIndex::new(&config.horizons, table.time())?;
        Ok(Self {
            config,
            table,
            derived,
            horizons,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn table(&self) -> &ForcingTable {
        &self.table
    }

    pub fn derived(&self) -> &DerivedSeries {
        &self.derived
    }

    pub fn horizons(&self) -> &HorizonIndex {
        &self.horizons
    }

    /// The configured linear frame mapping.
    ///
    /// Fails with [`GwpError::Config`](crate::errors::GwpError::Config) if
    /// the configured frame range is empty.
    pub fn linear_mapping(&self) -> GwpResult<LinearMapping> {
        LinearMapping::new(self.config.frame_max, self.config.time_max)
    }

    /// The alternative logarithmic frame mapping.
    pub fn log_mapping(&self) -> GwpResult<LogMapping> {
        LogMapping::new(
            self.config.frame_max,
            self.config.time_max,
            LOG_FRAMES_PER_DECADE,
        )
    }

    /// A fresh reveal machine borrowing this pipeline's series.
    pub fn reveal<'a>(&'a self, mapping: &'a dyn FrameMapping) -> RevealStateMachine<'a> {
        RevealStateMachine::new(&self.table, &self.derived, &self.horizons, mapping)
    }

    /// Replay the full frame range once into a render adapter.
    pub fn play(
        &self,
        mapping: &dyn FrameMapping,
        adapter: &mut dyn RenderAdapter,
    ) -> GwpResult<()> {
        let mut reveal = self.reveal(mapping);
        for frame in 0..mapping.frame_max() {
            if let Some(instructions) = reveal.advance(frame)? {
                adapter.apply(&instructions)?;
            }
        }
        Ok(())
    }
}
