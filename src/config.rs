//! Pipeline configuration: physical constants, horizons, substances and the
//! frame range, loadable from a TOML file.

use crate::errors::GwpResult;
use crate::substance::{Substance, SubstanceSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mean Earth surface area in m².
pub const EARTH_AREA_M2: f64 = 5.10072e14;

/// Seconds in a Gregorian mean year.
pub const SECONDS_PER_YEAR: f64 = 365.2425 * 24.0 * 3600.0;

/// kg per megatonne, converting the per-kg source table to a 1 Mt pulse.
pub const KG_PER_MT: f64 = 1.0e9;

/// Canonical GWP reporting horizons, in years.
pub const CANONICAL_HORIZONS: [f64; 3] = [20.0, 100.0, 500.0];

/// Full pipeline configuration.
///
/// Every field has a default matching the reference AR5 animation, so a
/// config file only needs to state what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Earth surface area used to convert W/m² into global watts.
    pub earth_area_m2: f64,
    /// Seconds per year used to convert global watts into joules per row.
    pub seconds_per_year: f64,
    /// Pulse mass in kg (the source table is per kg of emission).
    pub pulse_mass_kg: f64,
    /// Number of animation frames in a full sweep.
    pub frame_max: u32,
    /// Simulation time covered by the full sweep, in years.
    pub time_max: f64,
    /// GWP reporting horizons, in years.
    pub horizons: Vec<f64>,
    /// Name of the time column in the input table.
    pub time_column: String,
    /// Ordered substance list; order fixes the column order of every
    /// derived series.
    pub substances: Vec<Substance>,
    /// Name of the GWP reference substance; must be one of `substances`.
    pub reference: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // Colors follow the reference animation's default palette, in the
        // same order as the substance list.
        Self {
            earth_area_m2: EARTH_AREA_M2,
            seconds_per_year: SECONDS_PER_YEAR,
            pulse_mass_kg: KG_PER_MT,
            frame_max: 1000,
            time_max: 10_000.0,
            horizons: CANONICAL_HORIZONS.to_vec(),
            time_column: "time(years)".to_string(),
            substances: vec![
                Substance::new("Sulfur hexafluoride(Air/)", "#1f77b4"),
                Substance::new("Dinitrogen monoxide(Air/)", "#ff7f0e"),
                Substance::new("Methane, fossil(Air/)", "#2ca02c"),
                Substance::new("Ethane, 1,1-difluoro-, HFC-152a(Air/high. pop.)", "#d62728"),
                Substance::new(
                    "Ethane, 1,1,1,2-tetrafluoro-, HFC-134a(Air/high. pop.)",
                    "#9467bd",
                ),
                Substance::new("Methane, trichlorofluoro-, CFC-11(Air/high. pop.)", "#8c564b"),
                Substance::new("Methane, tetrafluoro-, CFC-14(Air/high. pop.)", "#e377c2"),
                Substance::new("Carbon dioxide(Air/)", "#7f7f7f"),
            ],
            reference: "Carbon dioxide(Air/)".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(raw: &str) -> GwpResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> GwpResult<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Build the validated substance set used by the rest of the pipeline.
    pub fn substance_set(&self) -> GwpResult<SubstanceSet> {
        SubstanceSet::new(self.substances.clone(), &self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GwpError;

    #[test]
    fn defaults_match_reference_animation() {
        let config = PipelineConfig::default();
        assert_eq!(config.substances.len(), 8);
        assert_eq!(config.horizons, vec![20.0, 100.0, 500.0]);
        assert_eq!(config.frame_max, 1000);
        assert_eq!(config.time_max, 10_000.0);

        let set = config.substance_set().unwrap();
        assert_eq!(set.reference().name, "Carbon dioxide(Air/)");
        assert_eq!(set.reference_index(), 7);
    }

    #[test]
    fn overrides_from_toml() {
        let config = PipelineConfig::from_toml_str(
            r##"
            frame_max = 300
            time_max = 1000.0
            horizons = [20.0, 100.0]
            reference = "Carbon dioxide(Air/)"

            [[substances]]
            name = "Carbon dioxide(Air/)"
            color = "#7f7f7f"

            [[substances]]
            name = "Methane, fossil(Air/)"
            color = "#2ca02c"
            "##,
        )
        .unwrap();

        assert_eq!(config.frame_max, 300);
        assert_eq!(config.substances.len(), 2);
        assert_eq!(config.substances[0].color, "#7f7f7f");
        assert_eq!(config.substances[1].color, "#2ca02c");
        // Unstated fields keep their defaults.
        assert_eq!(config.earth_area_m2, EARTH_AREA_M2);
    }

    #[test]
    fn reference_outside_set_is_rejected() {
        let mut config = PipelineConfig::default();
        config.reference = "Water vapour(Air/)".to_string();
        assert!(matches!(
            config.substance_set(),
            Err(GwpError::Config(_))
        ));
    }
}
