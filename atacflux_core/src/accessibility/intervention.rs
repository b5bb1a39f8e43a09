//! Provides the intervention state applied to the controllable genes
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::accessibility::table::AccessibilityTable;
use crate::accessibility::{resolve_accessibility, AccessibilityError, GeneAccessibility};
use crate::pathway::model::Pathway;

/// Intervention on the chromatin of a single gene
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intervention {
    /// No intervention, baseline accessibility
    #[default]
    #[serde(alias = "baseline", alias = "off")]
    Normal,
    /// Chromatin opened (e.g. dCas9-VPR)
    #[serde(alias = "on")]
    Activate,
    /// Chromatin closed
    Repress,
}

impl Intervention {
    /// Next state when cycling through interventions: normal, activate, repress, normal
    pub fn next(self) -> Self {
        match self {
            Intervention::Normal => Intervention::Activate,
            Intervention::Activate => Intervention::Repress,
            Intervention::Repress => Intervention::Normal,
        }
    }
}

/// On/off interventions are the subset: on is activate, off is normal
impl From<bool> for Intervention {
    fn from(value: bool) -> Self {
        if value {
            Intervention::Activate
        } else {
            Intervention::Normal
        }
    }
}

impl FromStr for Intervention {
    type Err = AccessibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "baseline" | "off" => Ok(Intervention::Normal),
            "activate" | "on" => Ok(Intervention::Activate),
            "repress" => Ok(Intervention::Repress),
            _ => Err(AccessibilityError::UnknownIntervention(s.to_string())),
        }
    }
}

impl Display for Intervention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Intervention::Normal => write!(f, "normal"),
            Intervention::Activate => write!(f, "activate"),
            Intervention::Repress => write!(f, "repress"),
        }
    }
}

/// Interventions applied to the genes of a pathway
///
/// The state is a value: every change returns a new state. Genes without an entry are
/// [`Intervention::Normal`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionState {
    interventions: IndexMap<String, Intervention>,
}

impl InterventionState {
    /// State with no interventions
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every controllable gene of the pathway explicitly set to normal
    pub fn all_normal(pathway: &Pathway) -> Self {
        Self {
            interventions: pathway
                .controllable_genes()
                .map(|g| (g.id.clone(), Intervention::Normal))
                .collect(),
        }
    }

    /// Intervention applied to a gene
    pub fn get(&self, gene: &str) -> Intervention {
        self.interventions.get(gene).copied().unwrap_or_default()
    }

    /// Copy of this state with one gene set to an intervention
    pub fn with(&self, gene: &str, intervention: Intervention) -> Self {
        let mut interventions = self.interventions.clone();
        interventions.insert(gene.to_string(), intervention);
        Self { interventions }
    }

    /// Copy of this state with one gene moved to its next intervention
    pub fn toggled(&self, gene: &str) -> Self {
        self.with(gene, self.get(gene).next())
    }

    /// Whether any gene has an intervention other than normal
    pub fn is_modified(&self) -> bool {
        self.interventions
            .values()
            .any(|&i| i != Intervention::Normal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Intervention)> {
        self.interventions.iter()
    }

    /// Resolve the accessibility of every gene of the pathway under these interventions
    ///
    /// Fails with [`AccessibilityError::GeneNotFound`] if the state names a gene the pathway
    /// doesn't have.
    pub fn resolve(
        &self,
        pathway: &Pathway,
        tables: &AccessibilityTable,
    ) -> Result<GeneAccessibility, AccessibilityError> {
        if let Some(unknown) = self
            .interventions
            .keys()
            .find(|gene| pathway.gene(gene.as_str()).is_none())
        {
            return Err(AccessibilityError::GeneNotFound(unknown.clone()));
        }
        pathway
            .genes()
            .values()
            .map(|gene| {
                resolve_accessibility(gene, self.get(&gene.id), tables)
                    .map(|value| (gene.id.clone(), value))
            })
            .collect::<Result<IndexMap<String, f64>, AccessibilityError>>()
            .map(GeneAccessibility::from)
    }
}

impl FromIterator<(String, Intervention)> for InterventionState {
    fn from_iter<T: IntoIterator<Item = (String, Intervention)>>(iter: T) -> Self {
        Self {
            interventions: iter.into_iter().collect(),
        }
    }
}
