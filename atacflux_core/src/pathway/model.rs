//! This module provides the Pathway struct for representing the immutable pathway topology
use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::pathway::edge::Edge;
use crate::pathway::gene::Gene;
use crate::pathway::metabolite::{Metabolite, MetaboliteType};

/// Represents a pathway of metabolites connected by gene catalyzed edges
///
/// The pathway is validated when it is created and can't be changed afterward. The outgoing
/// edge index and the topological order used by the flux solver are computed once here.
#[derive(Clone, Debug)]
pub struct Pathway {
    /// Id associated with the pathway
    pub id: Option<String>,
    /// Human readable pathway name
    pub name: Option<String>,
    /// Map of metabolite ids to Metabolites
    metabolites: IndexMap<String, Metabolite>,
    /// Map of gene ids to Genes
    genes: IndexMap<String, Gene>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    /// Map of metabolite ids to the indices (into `edges`) of their outgoing edges
    outgoing: IndexMap<String, Vec<usize>>,
    /// Id of the single input metabolite
    input: String,
    /// Metabolite ids in topological order
    order: Vec<String>,
}

impl Pathway {
    /// Create a new pathway, validating the topology
    ///
    /// # Parameters
    /// - metabolites: Nodes of the pathway, exactly one must be an input
    /// - genes: Genes which can catalyze the edges
    /// - edges: Gene catalyzed conversions between the metabolites
    ///
    /// # Examples
    /// ```rust
    /// use atacflux_core::pathway::edge::Edge;
    /// use atacflux_core::pathway::gene::Gene;
    /// use atacflux_core::pathway::metabolite::{Metabolite, MetaboliteType};
    /// use atacflux_core::pathway::model::Pathway;
    /// let pathway = Pathway::new(
    ///     vec![
    ///         Metabolite::new("a", "A", MetaboliteType::Input),
    ///         Metabolite::new("b", "B", MetaboliteType::Product),
    ///     ],
    ///     vec![Gene::new("G1", None, false)],
    ///     vec![Edge::new("a", "b", "G1")],
    /// )
    /// .unwrap();
    /// assert_eq!(pathway.input(), "a");
    /// ```
    pub fn new(
        metabolites: Vec<Metabolite>,
        genes: Vec<Gene>,
        edges: Vec<Edge>,
    ) -> Result<Pathway, PathwayError> {
        let mut metabolite_map: IndexMap<String, Metabolite> = IndexMap::new();
        for met in metabolites {
            // Edge keys join metabolite ids with '-'
            if met.id.is_empty() || met.id.contains('-') {
                return Err(PathwayError::InvalidMetaboliteId(met.id));
            }
            if metabolite_map.contains_key(&met.id) {
                return Err(PathwayError::DuplicateMetabolite(met.id));
            }
            metabolite_map.insert(met.id.clone(), met);
        }
        let mut gene_map: IndexMap<String, Gene> = IndexMap::new();
        for gene in genes {
            if gene_map.contains_key(&gene.id) {
                return Err(PathwayError::DuplicateGene(gene.id));
            }
            gene_map.insert(gene.id.clone(), gene);
        }

        let inputs: Vec<&String> = metabolite_map
            .values()
            .filter(|m| m.kind == MetaboliteType::Input)
            .map(|m| &m.id)
            .collect();
        let input = match inputs.as_slice() {
            [input] => (*input).clone(),
            _ => return Err(PathwayError::InputCount(inputs.len())),
        };

        let mut outgoing: IndexMap<String, Vec<usize>> = metabolite_map
            .keys()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        let mut keys: IndexSet<String> = IndexSet::new();
        for (idx, edge) in edges.iter().enumerate() {
            for end in [&edge.from, &edge.to] {
                if !metabolite_map.contains_key(end) {
                    return Err(PathwayError::UnknownMetabolite {
                        edge: edge.key(),
                        metabolite: end.clone(),
                    });
                }
            }
            if !gene_map.contains_key(&edge.gene) {
                return Err(PathwayError::UnknownGene {
                    edge: edge.key(),
                    gene: edge.gene.clone(),
                });
            }
            if !keys.insert(edge.key()) {
                return Err(PathwayError::DuplicateEdge(edge.key()));
            }
            // Every exit of a branch point has to be gated by its own gene
            let exits = outgoing
                .get_mut(&edge.from)
                .ok_or_else(|| PathwayError::UnknownMetabolite {
                    edge: edge.key(),
                    metabolite: edge.from.clone(),
                })?;
            if exits.iter().any(|&other| edges[other].gene == edge.gene) {
                return Err(PathwayError::SharedBranchGene {
                    node: edge.from.clone(),
                    gene: edge.gene.clone(),
                });
            }
            exits.push(idx);
        }

        let order = topological_order(&metabolite_map, &edges)?;

        Ok(Pathway {
            id: None,
            name: None,
            metabolites: metabolite_map,
            genes: gene_map,
            edges,
            outgoing,
            input,
            order,
        })
    }

    /// Set the id and the name of the pathway
    pub fn with_id(mut self, id: Option<String>, name: Option<String>) -> Self {
        self.id = id;
        self.name = name;
        self
    }

    /// Map of metabolite ids to Metabolites, in insertion order
    pub fn metabolites(&self) -> &IndexMap<String, Metabolite> {
        &self.metabolites
    }

    /// Map of gene ids to Genes, in insertion order
    pub fn genes(&self) -> &IndexMap<String, Gene> {
        &self.genes
    }

    /// Edges of the pathway, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn metabolite(&self, id: &str) -> Option<&Metabolite> {
        self.metabolites.get(id)
    }

    pub fn gene(&self, id: &str) -> Option<&Gene> {
        self.genes.get(id)
    }

    /// Id of the input metabolite
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Metabolite ids ordered so that every edge points forward
    pub fn topological_order(&self) -> &[String] {
        &self.order
    }

    /// Outgoing edges of a metabolite, in insertion order
    pub fn outgoing(&self, node: &str) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }

    /// Number of outgoing edges of a metabolite
    pub fn exit_count(&self, node: &str) -> usize {
        self.outgoing.get(node).map_or(0, Vec::len)
    }

    /// Genes an intervention can act on, in canonical (insertion) order
    pub fn controllable_genes(&self) -> impl Iterator<Item = &Gene> + '_ {
        self.genes.values().filter(|g| g.is_controllable())
    }

    /// Metabolites of a given type, in insertion order
    pub fn metabolites_of(&self, kind: MetaboliteType) -> impl Iterator<Item = &Metabolite> + '_ {
        self.metabolites.values().filter(move |m| m.kind == kind)
    }
}

/// Order the metabolites with Kahn's algorithm, ties are broken by insertion order
fn topological_order(
    metabolites: &IndexMap<String, Metabolite>,
    edges: &[Edge],
) -> Result<Vec<String>, PathwayError> {
    let mut in_degree: IndexMap<&str, usize> =
        metabolites.keys().map(|id| (id.as_str(), 0)).collect();
    for edge in edges {
        if let Some(degree) = in_degree.get_mut(edge.to.as_str()) {
            *degree += 1;
        }
    }
    let mut ready: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(metabolites.len());
    while let Some(node) = ready.pop_front() {
        order.push(node.to_string());
        for edge in edges.iter().filter(|e| e.from == node) {
            if let Some(degree) = in_degree.get_mut(edge.to.as_str()) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(edge.to.as_str());
                }
            }
        }
    }
    if order.len() != metabolites.len() {
        // Whatever was never released sits on (or behind) a cycle
        let stuck = in_degree
            .iter()
            .find(|(_, &degree)| degree > 0)
            .map(|(&id, _)| id.to_string())
            .unwrap_or_default();
        return Err(PathwayError::Cycle(stuck));
    }
    Ok(order)
}

/// Configuration errors found while building a pathway
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PathwayError {
    #[error("Metabolite {0} is defined more than once")]
    DuplicateMetabolite(String),
    #[error("Metabolite id {0:?} must be non-empty and can't contain '-'")]
    InvalidMetaboliteId(String),
    #[error("Gene {0} is defined more than once")]
    DuplicateGene(String),
    #[error("Pathway must have exactly one input metabolite, found {0}")]
    InputCount(usize),
    #[error("Edge {edge} references unknown metabolite {metabolite}")]
    UnknownMetabolite { edge: String, metabolite: String },
    #[error("Edge {edge} references unknown gene {gene}")]
    UnknownGene { edge: String, gene: String },
    #[error("Edge {0} is defined more than once")]
    DuplicateEdge(String),
    #[error("Gene {gene} gates more than one exit of {node}")]
    SharedBranchGene { node: String, gene: String },
    #[error("Pathway contains a cycle through {0}")]
    Cycle(String),
}

#[cfg(test)]
mod pathway_tests {
    use super::*;

    fn metabolites() -> Vec<Metabolite> {
        vec![
            Metabolite::new("leu", "L-Leucine", MetaboliteType::Input),
            Metabolite::new("kic", "α-ketoisocaproate", MetaboliteType::Intermediate),
            Metabolite::new("iamoh", "isoamylol", MetaboliteType::Branch),
            Metabolite::new("iamac", "isoamyl acetate", MetaboliteType::Product),
            Metabolite::new("waste", "fusel alcohol export", MetaboliteType::Waste),
        ]
    }

    fn genes() -> Vec<Gene> {
        vec![
            Gene::new("BAT2", None, false),
            Gene::new("ADH6", None, false),
            Gene::new("ATF1", None, false),
            Gene::new("EXPORT", None, true),
        ]
    }

    fn edges() -> Vec<Edge> {
        vec![
            Edge::new("leu", "kic", "BAT2"),
            Edge::new("kic", "iamoh", "ADH6"),
            Edge::new("iamoh", "iamac", "ATF1"),
            Edge::new("iamoh", "waste", "EXPORT"),
        ]
    }

    #[test]
    fn build_pathway() {
        let pathway = Pathway::new(metabolites(), genes(), edges()).unwrap();
        assert_eq!(pathway.input(), "leu");
        assert_eq!(
            pathway.topological_order(),
            &["leu", "kic", "iamoh", "iamac", "waste"]
        );
        assert_eq!(pathway.exit_count("iamoh"), 2);
        assert_eq!(pathway.exit_count("waste"), 0);
        let exits: Vec<&str> = pathway.outgoing("iamoh").map(|e| e.gene.as_str()).collect();
        assert_eq!(exits, vec!["ATF1", "EXPORT"]);
        let controllable: Vec<&str> = pathway
            .controllable_genes()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(controllable, vec!["BAT2", "ADH6", "ATF1"]);
    }

    #[test]
    fn order_respects_edges_not_insertion() {
        // Metabolites listed out of order still produce a valid order
        let mut mets = metabolites();
        mets.reverse();
        let pathway = Pathway::new(mets, genes(), edges()).unwrap();
        let order = pathway.topological_order();
        let position = |id: &str| order.iter().position(|o| o == id).unwrap();
        for edge in pathway.edges() {
            assert!(position(&edge.from) < position(&edge.to));
        }
    }

    #[test]
    fn input_count() {
        let mut mets = metabolites();
        mets[1].kind = MetaboliteType::Input;
        assert_eq!(
            Pathway::new(mets, genes(), edges()).unwrap_err(),
            PathwayError::InputCount(2)
        );
        let mut mets = metabolites();
        mets[0].kind = MetaboliteType::Intermediate;
        assert_eq!(
            Pathway::new(mets, genes(), edges()).unwrap_err(),
            PathwayError::InputCount(0)
        );
    }

    #[test]
    fn unknown_references() {
        let mut bad_edges = edges();
        bad_edges.push(Edge::new("kic", "nowhere", "BAT2"));
        match Pathway::new(metabolites(), genes(), bad_edges) {
            Err(PathwayError::UnknownMetabolite { metabolite, .. }) => {
                assert_eq!(metabolite, "nowhere")
            }
            other => panic!("Unknown metabolite not caught: {:?}", other),
        }

        let mut bad_edges = edges();
        bad_edges.push(Edge::new("kic", "waste", "PDC1"));
        match Pathway::new(metabolites(), genes(), bad_edges) {
            Err(PathwayError::UnknownGene { gene, .. }) => assert_eq!(gene, "PDC1"),
            other => panic!("Unknown gene not caught: {:?}", other),
        }
    }

    #[test]
    fn duplicates() {
        let mut mets = metabolites();
        mets.push(Metabolite::new("kic", "again", MetaboliteType::Intermediate));
        assert_eq!(
            Pathway::new(mets, genes(), edges()).unwrap_err(),
            PathwayError::DuplicateMetabolite("kic".to_string())
        );

        let mut bad_edges = edges();
        bad_edges.push(Edge::new("leu", "kic", "ADH6"));
        assert_eq!(
            Pathway::new(metabolites(), genes(), bad_edges).unwrap_err(),
            PathwayError::DuplicateEdge("leu-kic".to_string())
        );
    }

    #[test]
    fn dashed_metabolite_ids() {
        // "a-b" -> "c" and "a" -> "b-c" would share the edge key "a-b-c"
        let mets = vec![
            Metabolite::new("a", "A", MetaboliteType::Input),
            Metabolite::new("a-b", "AB", MetaboliteType::Branch),
            Metabolite::new("b-c", "BC", MetaboliteType::Product),
            Metabolite::new("c", "C", MetaboliteType::Waste),
        ];
        let genes = vec![
            Gene::new("G1", None, false),
            Gene::new("G2", None, false),
            Gene::new("G3", None, false),
        ];
        let edges = vec![
            Edge::new("a", "a-b", "G1"),
            Edge::new("a-b", "c", "G2"),
            Edge::new("a", "b-c", "G3"),
        ];
        assert_eq!(
            Pathway::new(mets, genes, edges).unwrap_err(),
            PathwayError::InvalidMetaboliteId("a-b".to_string())
        );

        let mut mets = metabolites();
        mets.push(Metabolite::new("", "nameless", MetaboliteType::Waste));
        assert_eq!(
            Pathway::new(mets, self::genes(), self::edges()).unwrap_err(),
            PathwayError::InvalidMetaboliteId(String::new())
        );
    }

    #[test]
    fn shared_branch_gene() {
        let mut bad_edges = edges();
        bad_edges.push(Edge::new("iamoh", "kic", "ATF1"));
        assert_eq!(
            Pathway::new(metabolites(), genes(), bad_edges).unwrap_err(),
            PathwayError::SharedBranchGene {
                node: "iamoh".to_string(),
                gene: "ATF1".to_string()
            }
        );
    }

    #[test]
    fn cycle() {
        let mut bad_edges = edges();
        bad_edges.push(Edge::new("iamac", "kic", "BAT2"));
        match Pathway::new(metabolites(), genes(), bad_edges) {
            Err(PathwayError::Cycle(_)) => {}
            other => panic!("Cycle not caught: {:?}", other),
        }
    }
}
