//! Provides the flux solver, a single topological pass over the pathway
use indexmap::IndexMap;
use log::{debug, warn};

use crate::accessibility::GeneAccessibility;
use crate::configuration;
use crate::flux::solution::{FluxSolution, FluxStatus};
use crate::flux::SolveError;
use crate::pathway::edge::Edge;
use crate::pathway::model::Pathway;

/// Solve the flux distribution of a pathway
///
/// # Parameters
/// - pathway: Validated pathway topology
/// - accessibility: Accessibility of every gene gating an edge
/// - input_flux: Flux entering at the input metabolite
///
/// # Examples
/// ```rust
/// use atacflux_core::datasets::ehrlich;
/// use atacflux_core::flux::solver::solve;
/// let dataset = ehrlich().unwrap();
/// let baseline = dataset.accessibility.baseline();
/// let solution = solve(&dataset.pathway, &baseline, 1.0).unwrap();
/// assert!((solution.node("kic") - 0.65).abs() < 1e-12);
/// ```
pub fn solve(
    pathway: &Pathway,
    accessibility: &GeneAccessibility,
    input_flux: f64,
) -> Result<FluxSolution, SolveError> {
    FluxSolver::new(pathway)
        .with_input_flux(input_flux)
        .solve(accessibility)
}

/// Propagates flux through a pathway
///
/// Metabolites are visited in the topological order computed when the pathway was built.
/// - A metabolite with a single exit is a restrictive step: the edge carries the incoming flux
///   times the accessibility of its gene, the remainder is lost.
/// - A metabolite with several exits is a branch point: the incoming flux is conserved and
///   split between the exits in proportion to their accessibility. When every exit has zero
///   accessibility the flux is split evenly and the solution is flagged
///   [`FluxStatus::DegenerateBranch`].
///
/// The solver holds no state between solves, so one solver can be shared across threads.
#[derive(Clone, Debug)]
pub struct FluxSolver<'a> {
    pathway: &'a Pathway,
    input_flux: f64,
}

impl<'a> FluxSolver<'a> {
    /// Create a solver using the configured input flux
    pub fn new(pathway: &'a Pathway) -> Self {
        Self {
            pathway,
            input_flux: configuration::current().input_flux,
        }
    }

    /// Change the flux entering at the input metabolite
    pub fn with_input_flux(mut self, input_flux: f64) -> Self {
        self.input_flux = input_flux;
        self
    }

    pub fn input_flux(&self) -> f64 {
        self.input_flux
    }

    pub fn pathway(&self) -> &'a Pathway {
        self.pathway
    }

    /// Compute the flux through every metabolite and edge
    pub fn solve(&self, accessibility: &GeneAccessibility) -> Result<FluxSolution, SolveError> {
        if !self.input_flux.is_finite() || self.input_flux < 0.0 {
            return Err(SolveError::InvalidInputFlux(self.input_flux));
        }
        let pathway = self.pathway;
        debug!(
            "Solving flux through {} metabolites with input flux {}",
            pathway.metabolites().len(),
            self.input_flux
        );

        let mut node_flux: IndexMap<String, f64> = pathway
            .metabolites()
            .keys()
            .map(|id| (id.clone(), 0.0))
            .collect();
        let mut edge_flux: IndexMap<String, f64> =
            pathway.edges().iter().map(|e| (e.key(), 0.0)).collect();
        let mut degenerate_branches = Vec::new();
        add_flux(&mut node_flux, pathway.input(), self.input_flux);

        for node in pathway.topological_order() {
            let flux = node_flux.get(node).copied().unwrap_or(0.0);
            let exits: Vec<&Edge> = pathway.outgoing(node).collect();
            match exits.as_slice() {
                [] => {}
                [exit] => {
                    let carried = flux * rate(accessibility, exit)?;
                    edge_flux.insert(exit.key(), carried);
                    add_flux(&mut node_flux, &exit.to, carried);
                }
                _ => {
                    let rates = exits
                        .iter()
                        .map(|e| rate(accessibility, e))
                        .collect::<Result<Vec<f64>, SolveError>>()?;
                    let total_rate: f64 = rates.iter().sum();
                    let shares: Vec<f64> = if total_rate > 0.0 {
                        rates.iter().map(|r| r / total_rate).collect()
                    } else {
                        warn!(
                            "Every exit of branch {} has zero accessibility, splitting flux evenly across {} exits",
                            node,
                            exits.len()
                        );
                        degenerate_branches.push(node.clone());
                        vec![1.0 / exits.len() as f64; exits.len()]
                    };
                    for (exit, share) in exits.iter().zip(shares) {
                        let carried = flux * share;
                        edge_flux.insert(exit.key(), carried);
                        add_flux(&mut node_flux, &exit.to, carried);
                    }
                }
            }
        }

        let status = if degenerate_branches.is_empty() {
            FluxStatus::Steady
        } else {
            FluxStatus::DegenerateBranch
        };
        Ok(FluxSolution {
            status,
            input_flux: self.input_flux,
            node_flux,
            edge_flux,
            accessibility: accessibility.clone(),
            degenerate_branches,
        })
    }
}

/// Accessibility gating an edge
fn rate(accessibility: &GeneAccessibility, edge: &Edge) -> Result<f64, SolveError> {
    accessibility
        .get(&edge.gene)
        .map_err(|_| SolveError::MissingAccessibility {
            edge: edge.key(),
            gene: edge.gene.clone(),
        })
}

fn add_flux(node_flux: &mut IndexMap<String, f64>, node: &str, flux: f64) {
    *node_flux.entry(node.to_string()).or_insert(0.0) += flux;
}
