//! Provides the struct representing the flux distribution found by the solver
use indexmap::IndexMap;

use crate::accessibility::GeneAccessibility;
use crate::configuration;
use crate::pathway::edge::Edge;
use crate::pathway::metabolite::MetaboliteType;
use crate::pathway::model::Pathway;

/// Flux distribution across every metabolite and edge of a pathway
#[derive(Clone, Debug, PartialEq)]
pub struct FluxSolution {
    /// Whether the solve needed the degenerate branch fallback (see [`FluxStatus`])
    pub status: FluxStatus,
    /// Flux entering at the input metabolite
    pub input_flux: f64,
    /// Flux reaching each metabolite, keyed by metabolite id. Unreached metabolites hold 0.
    pub node_flux: IndexMap<String, f64>,
    /// Flux carried by each edge, keyed by `"{from}-{to}"`
    pub edge_flux: IndexMap<String, f64>,
    /// Accessibility vector the solution was computed from
    pub accessibility: GeneAccessibility,
    /// Ids of the branch metabolites whose exits all had zero accessibility
    pub degenerate_branches: Vec<String>,
}

impl FluxSolution {
    /// Flux reaching a metabolite, 0 for unknown ids
    pub fn node(&self, id: &str) -> f64 {
        self.node_flux.get(id).copied().unwrap_or(0.0)
    }

    /// Flux carried by an edge
    pub fn edge(&self, edge: &Edge) -> f64 {
        self.edge_flux.get(&edge.key()).copied().unwrap_or(0.0)
    }

    /// Total flux reaching all metabolites of a type (e.g. every product terminal)
    pub fn total_of(&self, pathway: &Pathway, kind: MetaboliteType) -> f64 {
        pathway
            .metabolites_of(kind)
            .map(|m| self.node(&m.id))
            .sum()
    }

    /// Largest difference between the flux leaving and the flux entering any branch point
    ///
    /// # Note:
    /// Only metabolites with more than one exit conserve flux, single exits are throttled by
    /// the accessibility of their gene, so they are not part of this check.
    pub fn branch_imbalance(&self, pathway: &Pathway) -> f64 {
        pathway
            .topological_order()
            .iter()
            .filter(|node| pathway.exit_count(node) > 1)
            .map(|node| {
                let leaving: f64 = pathway.outgoing(node).map(|e| self.edge(e)).sum();
                (leaving - self.node(node)).abs()
            })
            .fold(0.0, f64::max)
    }

    /// Whether every branch point conserves flux, within the configured tolerance
    ///
    /// The tolerance is relative to the input flux once it exceeds 1.
    pub fn is_conserved(&self, pathway: &Pathway) -> bool {
        let tolerance = configuration::current().tolerance * self.input_flux.max(1.0);
        self.branch_imbalance(pathway) <= tolerance
    }

    pub fn is_degenerate(&self) -> bool {
        self.status == FluxStatus::DegenerateBranch
    }
}

/// Status of a flux solution
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FluxStatus {
    /// Every branch was split by relative accessibility
    Steady,
    /// At least one branch had zero total accessibility and was split evenly
    DegenerateBranch,
}
