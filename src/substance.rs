//! The fixed, ordered set of greenhouse gases tracked by the pipeline.

use crate::errors::{GwpError, GwpResult};
use serde::{Deserialize, Serialize};

/// A greenhouse gas, identified by the column name used in the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    /// Column name in the forcing table, e.g. `Carbon dioxide(Air/)`.
    pub name: String,
    /// Display color for every curve and label belonging to this substance.
    pub color: String,
}

impl Substance {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// An ordered set of substances with one designated as the GWP reference.
///
/// The order is fixed at construction and shared by every series derived
/// from the table, so a substance can be addressed by index everywhere
/// downstream of the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceSet {
    substances: Vec<Substance>,
    reference: usize,
}

impl SubstanceSet {
    /// Build a set, designating `reference_name` (CO2) as the GWP denominator.
    pub fn new(substances: Vec<Substance>, reference_name: &str) -> GwpResult<Self> {
        if substances.is_empty() {
            return Err(GwpError::Config("substance set is empty".to_string()));
        }
        let reference = substances
            .iter()
            .position(|s| s.name == reference_name)
            .ok_or_else(|| {
                GwpError::Config(format!(
                    "reference substance {:?} is not a member of the substance set",
                    reference_name
                ))
            })?;
        Ok(Self {
            substances,
            reference,
        })
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substance> {
        self.substances.iter()
    }

    pub fn get(&self, index: usize) -> &Substance {
        &self.substances[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.substances.iter().position(|s| s.name == name)
    }

    /// Index of the reference substance (CO2).
    pub fn reference_index(&self) -> usize {
        self.reference
    }

    pub fn reference(&self) -> &Substance {
        &self.substances[self.reference]
    }

    /// The reference substance is rendered with emphasis (thicker line,
    /// hatched fill) in every panel.
    pub fn is_reference(&self, index: usize) -> bool {
        index == self.reference
    }
}
