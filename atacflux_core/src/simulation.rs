//! Evaluates intervention states against a fixed pathway and its baseline
use crate::accessibility::intervention::InterventionState;
use crate::accessibility::table::AccessibilityTable;
use crate::accessibility::GeneAccessibility;
use crate::datasets::PathwayDataset;
use crate::flux::solution::FluxSolution;
use crate::flux::solver::FluxSolver;
use crate::flux::SolveError;
use crate::metrics::{derive_metrics, PathwayMetrics};
use crate::pathway::model::Pathway;

/// Owns a pathway, its accessibility tables, and the baseline solution
///
/// All fields are immutable once the simulator is built, so evaluations can run from many
/// threads at once without any locking.
#[derive(Clone, Debug)]
pub struct Simulator {
    pathway: Pathway,
    tables: AccessibilityTable,
    baseline: FluxSolution,
}

/// Result of evaluating one intervention state
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub interventions: InterventionState,
    pub accessibility: GeneAccessibility,
    pub flux: FluxSolution,
    pub metrics: PathwayMetrics,
}

impl Simulator {
    /// Create a simulator, solving the baseline (every gene at normal accessibility)
    pub fn new(pathway: Pathway, tables: AccessibilityTable) -> Result<Self, SolveError> {
        tables.check_pathway(&pathway)?;
        let accessibility = InterventionState::all_normal(&pathway).resolve(&pathway, &tables)?;
        let baseline = FluxSolver::new(&pathway).solve(&accessibility)?;
        Ok(Simulator {
            pathway,
            tables,
            baseline,
        })
    }

    /// Evaluate an intervention state: resolve accessibility, solve, and derive the metrics
    ///
    /// # Examples
    /// ```rust
    /// use atacflux_core::accessibility::intervention::{Intervention, InterventionState};
    /// use atacflux_core::datasets::ehrlich;
    /// use atacflux_core::simulation::Simulator;
    /// let simulator = Simulator::try_from(ehrlich().unwrap()).unwrap();
    /// let state = InterventionState::new().with("ATF1", Intervention::Activate);
    /// let evaluation = simulator.evaluate(&state).unwrap();
    /// assert!((evaluation.metrics.capture_rate.unwrap() - 0.7).abs() < 1e-9);
    /// ```
    pub fn evaluate(&self, interventions: &InterventionState) -> Result<Evaluation, SolveError> {
        let accessibility = interventions.resolve(&self.pathway, &self.tables)?;
        let flux = FluxSolver::new(&self.pathway)
            .with_input_flux(self.baseline.input_flux)
            .solve(&accessibility)?;
        let metrics = derive_metrics(&self.pathway, &flux, &self.baseline);
        Ok(Evaluation {
            interventions: interventions.clone(),
            accessibility,
            flux,
            metrics,
        })
    }

    pub fn pathway(&self) -> &Pathway {
        &self.pathway
    }

    pub fn accessibility(&self) -> &AccessibilityTable {
        &self.tables
    }

    /// Solution with every gene at baseline accessibility
    pub fn baseline(&self) -> &FluxSolution {
        &self.baseline
    }
}

impl TryFrom<PathwayDataset> for Simulator {
    type Error = SolveError;

    fn try_from(dataset: PathwayDataset) -> Result<Self, Self::Error> {
        Simulator::new(dataset.pathway, dataset.accessibility)
    }
}

#[cfg(test)]
mod simulation_tests {
    use super::*;
    use crate::accessibility::intervention::Intervention;
    use crate::accessibility::AccessibilityError;
    use crate::datasets::ehrlich;
    use crate::pathway::metabolite::MetaboliteType;

    fn simulator() -> Simulator {
        Simulator::try_from(ehrlich().unwrap()).unwrap()
    }

    #[test]
    fn baseline_scenario() {
        let sim = simulator();
        let evaluation = sim.evaluate(&InterventionState::new()).unwrap();
        let flux = &evaluation.flux;
        assert!((flux.node("kic") - 0.65).abs() < 1e-12);
        assert!((flux.node("mbal") - 0.468).abs() < 1e-12);
        assert!((flux.node("iamoh") - 0.31824).abs() < 1e-12);
        assert!((flux.node("iamac") - 0.053).abs() < 1e-3);
        assert!((flux.node("waste") - 0.265).abs() < 1e-3);
        assert!((evaluation.metrics.capture_rate.unwrap() - 1.0 / 6.0).abs() < 1e-12);
        assert!((evaluation.metrics.fold_change.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(&evaluation.flux, sim.baseline());
    }

    #[test]
    fn activate_atf1_scenario() {
        let sim = simulator();
        let state = InterventionState::new().with("ATF1", Intervention::Activate);
        let evaluation = sim.evaluate(&state).unwrap();
        let product = evaluation.flux.total_of(sim.pathway(), MetaboliteType::Product);
        let waste = evaluation.flux.total_of(sim.pathway(), MetaboliteType::Waste);
        assert!((product - 0.31824 * 0.70).abs() < 1e-12);
        assert!((waste - 0.31824 * 0.30).abs() < 1e-12);
        assert!((evaluation.metrics.capture_rate.unwrap() - 0.70).abs() < 1e-9);
        assert!((evaluation.metrics.fold_change.unwrap() - 4.2).abs() < 1e-9);
        assert_eq!(evaluation.interventions.get("ATF1"), Intervention::Activate);
        assert!((evaluation.accessibility.get("ATF1").unwrap() - 0.70).abs() < 1e-25);
    }

    #[test]
    fn repression_lowers_product() {
        let sim = simulator();
        let state = InterventionState::new().with("BAT2", Intervention::Repress);
        let evaluation = sim.evaluate(&state).unwrap();
        assert!(evaluation.metrics.fold_change.unwrap() < 1.0);
        // Capture rate only depends on the branch
        assert!((evaluation.metrics.capture_rate.unwrap() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn passive_gene_ignores_interventions() {
        let sim = simulator();
        let state = InterventionState::new().with("EXPORT", Intervention::Activate);
        let evaluation = sim.evaluate(&state).unwrap();
        assert_eq!(&evaluation.flux, sim.baseline());
    }

    #[test]
    fn unknown_gene_is_rejected() {
        let sim = simulator();
        let state = InterventionState::new().with("ATF", Intervention::Activate);
        match sim.evaluate(&state) {
            Err(SolveError::Accessibility(AccessibilityError::GeneNotFound(gene))) => {
                assert_eq!(gene, "ATF")
            }
            other => panic!("Unknown gene not reported: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_tables() {
        let dataset = ehrlich().unwrap();
        let mut baseline = indexmap::IndexMap::new();
        baseline.insert("BAT2".to_string(), 0.5);
        let tables =
            AccessibilityTable::new(baseline.clone(), baseline.clone(), baseline).unwrap();
        match Simulator::new(dataset.pathway, tables) {
            Err(SolveError::Accessibility(AccessibilityError::GeneNotFound(gene))) => {
                assert_eq!(gene, "ARO10")
            }
            other => panic!("Missing gene not reported: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn concurrent_evaluations() {
        let sim = simulator();
        let genes: Vec<String> = sim
            .pathway()
            .controllable_genes()
            .map(|g| g.id.clone())
            .collect();
        let expected: Vec<Evaluation> = genes
            .iter()
            .map(|g| {
                sim.evaluate(&InterventionState::new().with(g, Intervention::Activate))
                    .unwrap()
            })
            .collect();
        std::thread::scope(|s| {
            let handles: Vec<_> = genes
                .iter()
                .map(|g| {
                    let sim = &sim;
                    s.spawn(move || {
                        sim.evaluate(&InterventionState::new().with(g, Intervention::Activate))
                            .unwrap()
                    })
                })
                .collect();
            for (handle, expected) in handles.into_iter().zip(expected.iter()) {
                assert_eq!(&handle.join().unwrap(), expected);
            }
        });
    }
}
