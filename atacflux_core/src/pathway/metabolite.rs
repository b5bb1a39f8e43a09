//! This module provides the metabolite struct representing a node of the pathway

use std::fmt::{Display, Formatter};
use std::hash::Hash;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Represents a metabolite
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    pub name: String,
    /// Abbreviated name used for labels
    #[builder(default = "None")]
    pub short_name: Option<String>,
    /// Role of the metabolite in the pathway (see [`MetaboliteType`])
    #[builder(default = "MetaboliteType::Intermediate")]
    pub kind: MetaboliteType,
}

impl Metabolite {
    pub fn new(id: &str, name: &str, kind: MetaboliteType) -> Metabolite {
        Metabolite {
            id: id.to_string(),
            name: name.to_string(),
            short_name: None,
            kind,
        }
    }

    /// Label used when drawing the metabolite, the short name if one is present
    pub fn label(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether this metabolite ends a branch of the pathway
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, MetaboliteType::Product | MetaboliteType::Waste)
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
    }
}

impl Display for Metabolite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Role a metabolite plays in the pathway
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaboliteType {
    /// Source of the pathway, receives the input flux
    Input,
    /// Metabolite on the main path
    Intermediate,
    /// Metabolite whose flux is split between several genes
    Branch,
    /// Desired end product
    Product,
    /// Flux lost from the pathway (export, side products)
    Waste,
}

impl Display for MetaboliteType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaboliteType::Input => write!(f, "input"),
            MetaboliteType::Intermediate => write!(f, "intermediate"),
            MetaboliteType::Branch => write!(f, "branch"),
            MetaboliteType::Product => write!(f, "product"),
            MetaboliteType::Waste => write!(f, "waste"),
        }
    }
}

#[cfg(test)]
mod metabolite_tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let met = MetaboliteBuilder::default()
            .id("kic".to_string())
            .name("α-ketoisocaproate".to_string())
            .build()
            .unwrap();
        assert_eq!(met.kind, MetaboliteType::Intermediate);
        assert_eq!(met.label(), "α-ketoisocaproate");
        assert!(!met.is_terminal());
    }

    #[test]
    fn label_prefers_short_name() {
        let met = MetaboliteBuilder::default()
            .id("iamac".to_string())
            .name("isoamyl acetate".to_string())
            .short_name(Some("IAM-Ac".to_string()))
            .kind(MetaboliteType::Product)
            .build()
            .unwrap();
        assert_eq!(met.label(), "IAM-Ac");
        assert!(met.is_terminal());
    }

    #[test]
    fn type_names() {
        let kind: MetaboliteType = serde_json::from_str("\"waste\"").unwrap();
        assert_eq!(kind, MetaboliteType::Waste);
        assert_eq!(format!("{}", MetaboliteType::Branch), "branch");
    }
}
