//! This module provides the Gene struct, representing the gene catalyzing a step of the pathway
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use derive_builder::Builder;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Gene {
    /// Used to identify the gene (e.g. `ATF1`)
    pub id: String,
    /// Human Readable name of the encoded enzyme
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Systematic open reading frame name (e.g. `YOR377W`)
    #[builder(default = "None")]
    pub systematic_name: Option<String>,
    /// Enzyme Commission classification code
    #[builder(default = "None")]
    pub ec_code: Option<String>,
    /// Passive genes (such as export) can't be targeted by an intervention
    ///
    /// ### Note
    /// The accessibility of a passive gene is the same in the baseline, activated, and
    /// repressed tables, and the resolver always uses the baseline value.
    #[builder(default = "false")]
    pub passive: bool,
}

impl Gene {
    pub fn new(id: &str, name: Option<&str>, passive: bool) -> Gene {
        Gene {
            id: id.to_string(),
            name: name.map(str::to_string),
            systematic_name: None,
            ec_code: None,
            passive,
        }
    }

    /// Whether an intervention can change the accessibility of this gene
    pub fn is_controllable(&self) -> bool {
        !self.passive
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Hash for Gene {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let gene = GeneBuilder::default()
            .id("ATF1".to_string())
            .name(Some("alcohol acetyltransferase".to_string()))
            .systematic_name(Some("YOR377W".to_string()))
            .ec_code(Some("2.3.1.84".to_string()))
            .build()
            .unwrap();
        assert!(gene.is_controllable());
        assert_eq!(format!("{}", gene), "ATF1");
    }

    #[test]
    fn test_passive() {
        let export = Gene::new("EXPORT", Some("passive export"), true);
        assert!(!export.is_controllable());
        assert_eq!(export.systematic_name, None);
    }
}
