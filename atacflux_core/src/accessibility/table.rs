//! Provides the three accessibility tables (baseline, activated, repressed)
use indexmap::IndexMap;

use crate::accessibility::intervention::Intervention;
use crate::accessibility::{AccessibilityError, GeneAccessibility};
use crate::pathway::model::Pathway;

/// Baseline, activated, and repressed chromatin accessibility of every gene
///
/// The tables are validated when created: every gene appears in all three tables, every value
/// lies in [0, 1], and `repressed <= baseline <= activated`.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessibilityTable {
    /// Default chromatin openness
    baseline: IndexMap<String, f64>,
    /// Accessibility after a CRISPRa style activation
    activated: IndexMap<String, f64>,
    /// Accessibility after a CRISPRi style repression
    repressed: IndexMap<String, f64>,
}

impl AccessibilityTable {
    /// Create a new set of accessibility tables
    pub fn new(
        baseline: IndexMap<String, f64>,
        activated: IndexMap<String, f64>,
        repressed: IndexMap<String, f64>,
    ) -> Result<Self, AccessibilityError> {
        for (gene, &base) in &baseline {
            let active = lookup(&activated, gene)?;
            let repress = lookup(&repressed, gene)?;
            for value in [base, active, repress] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(AccessibilityError::OutOfRange {
                        gene: gene.clone(),
                        value,
                    });
                }
            }
            if repress > base || base > active {
                return Err(AccessibilityError::Ordering(gene.clone()));
            }
        }
        // Genes only present in one of the other tables
        for gene in activated.keys().chain(repressed.keys()) {
            lookup(&baseline, gene)?;
        }
        Ok(Self {
            baseline,
            activated,
            repressed,
        })
    }

    /// Table selected by an intervention
    pub fn table(&self, intervention: Intervention) -> &IndexMap<String, f64> {
        match intervention {
            Intervention::Normal => &self.baseline,
            Intervention::Activate => &self.activated,
            Intervention::Repress => &self.repressed,
        }
    }

    /// Accessibility of a gene in the table selected by an intervention
    pub fn accessibility(
        &self,
        gene: &str,
        intervention: Intervention,
    ) -> Result<f64, AccessibilityError> {
        lookup(self.table(intervention), gene)
    }

    /// Baseline accessibility of every gene
    pub fn baseline(&self) -> GeneAccessibility {
        self.baseline
            .iter()
            .map(|(gene, &value)| (gene.clone(), value))
            .collect()
    }

    /// Gene ids covered by the tables
    pub fn genes(&self) -> impl Iterator<Item = &String> {
        self.baseline.keys()
    }

    /// Check that the tables cover every gene of a pathway and that passive genes are constant
    pub fn check_pathway(&self, pathway: &Pathway) -> Result<(), AccessibilityError> {
        for gene in pathway.genes().values() {
            let base = lookup(&self.baseline, &gene.id)?;
            if gene.passive
                && (lookup(&self.activated, &gene.id)? != base
                    || lookup(&self.repressed, &gene.id)? != base)
            {
                return Err(AccessibilityError::PassiveNotConstant(gene.id.clone()));
            }
        }
        Ok(())
    }
}

/// Accessibility of a gene in a single table
pub fn lookup(table: &IndexMap<String, f64>, gene: &str) -> Result<f64, AccessibilityError> {
    table
        .get(gene)
        .copied()
        .ok_or_else(|| AccessibilityError::GeneNotFound(gene.to_string()))
}
