//! This module provides the Edge struct, a gene catalyzed conversion between two metabolites
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A directed conversion `from -> to`, gated by the accessibility of `gene`
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the substrate metabolite
    pub from: String,
    /// Id of the product metabolite
    pub to: String,
    /// Id of the gene catalyzing the conversion
    pub gene: String,
}

impl Edge {
    pub fn new(from: &str, to: &str, gene: &str) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            gene: gene.to_string(),
        }
    }

    /// Key used for the edge in flux maps
    ///
    /// # Note:
    /// The key is "{from}-{to}", which is why [`Pathway`](crate::pathway::model::Pathway)
    /// rejects metabolite ids containing '-'.
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.gene, self.to)
    }
}
