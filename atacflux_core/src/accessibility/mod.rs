//! Module for chromatin accessibility: the accessibility tables, the interventions which select
//! between them, and the per-gene accessibility vector consumed by the flux solver

pub mod intervention;
pub mod table;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accessibility::intervention::Intervention;
use crate::accessibility::table::AccessibilityTable;
use crate::pathway::gene::Gene;

/// Accessibility of every gene, in [0, 1], keyed by gene id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneAccessibility(IndexMap<String, f64>);

impl GeneAccessibility {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Accessibility of a gene
    pub fn get(&self, gene: &str) -> Result<f64, AccessibilityError> {
        self.0
            .get(gene)
            .copied()
            .ok_or_else(|| AccessibilityError::GeneNotFound(gene.to_string()))
    }

    pub fn insert(&mut self, gene: &str, accessibility: f64) {
        self.0.insert(gene.to_string(), accessibility);
    }

    /// Copy of this vector with a single gene changed
    pub fn with(&self, gene: &str, accessibility: f64) -> Self {
        let mut updated = self.clone();
        updated.insert(gene, accessibility);
        updated
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, f64>> for GeneAccessibility {
    fn from(value: IndexMap<String, f64>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, f64)> for GeneAccessibility {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve the accessibility of a gene under an intervention
///
/// Passive genes can't be targeted, so they always resolve to their baseline accessibility
/// whatever intervention is passed.
///
/// # Examples
/// ```rust
/// use atacflux_core::accessibility::intervention::Intervention;
/// use atacflux_core::accessibility::resolve_accessibility;
/// use atacflux_core::datasets::ehrlich;
/// let dataset = ehrlich().unwrap();
/// let atf1 = dataset.pathway.gene("ATF1").unwrap();
/// let open = resolve_accessibility(atf1, Intervention::Activate, &dataset.accessibility).unwrap();
/// assert!((open - 0.70).abs() < 1e-12);
/// ```
pub fn resolve_accessibility(
    gene: &Gene,
    intervention: Intervention,
    tables: &AccessibilityTable,
) -> Result<f64, AccessibilityError> {
    if gene.passive {
        tables.accessibility(&gene.id, Intervention::Normal)
    } else {
        tables.accessibility(&gene.id, intervention)
    }
}

/// Errors in the accessibility tables or in looking up a gene
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AccessibilityError {
    #[error("Gene {0} has no accessibility value")]
    GeneNotFound(String),
    #[error("Accessibility {value} of gene {gene} is outside of [0, 1]")]
    OutOfRange { gene: String, value: f64 },
    #[error("Accessibility of gene {0} must satisfy repressed <= baseline <= activated")]
    Ordering(String),
    #[error("Passive gene {0} must have the same accessibility in every table")]
    PassiveNotConstant(String),
    #[error("Unknown intervention {0}, expected normal, activate, or repress")]
    UnknownIntervention(String),
}
