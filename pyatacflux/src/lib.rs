use std::collections::HashMap;

use atacflux_core::accessibility::intervention::{Intervention, InterventionState};
use atacflux_core::accessibility::GeneAccessibility;
use atacflux_core::datasets::{ehrlich, PathwayDataset};
use atacflux_core::flux::solver::solve as solve_flux;
use atacflux_core::simulation;
use atacflux_core::visual::band;
use atacflux_core::visual::flow;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_error<E: std::fmt::Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn ehrlich_dataset() -> PyResult<PathwayDataset> {
    ehrlich().map_err(value_error)
}

/// Solve the flux through the Ehrlich pathway for an accessibility vector
///
/// Returns the flux reaching each metabolite and the flux carried by each edge (keyed by
/// "from-to").
#[pyfunction]
#[pyo3(signature = (accessibility, input_flux=1.0))]
fn solve(
    accessibility: HashMap<String, f64>,
    input_flux: f64,
) -> PyResult<(HashMap<String, f64>, HashMap<String, f64>)> {
    let dataset = ehrlich_dataset()?;
    let accessibility: GeneAccessibility = accessibility.into_iter().collect();
    let solution = solve_flux(&dataset.pathway, &accessibility, input_flux).map_err(value_error)?;
    Ok((
        solution.node_flux.into_iter().collect(),
        solution.edge_flux.into_iter().collect(),
    ))
}

/// Accessibility of a gene of the Ehrlich pathway under an intervention
/// ("normal", "activate", or "repress")
#[pyfunction]
fn resolve_accessibility(gene: &str, state: &str) -> PyResult<f64> {
    let dataset = ehrlich_dataset()?;
    let intervention: Intervention = state.parse().map_err(value_error)?;
    let gene = dataset
        .pathway
        .gene(gene)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown gene {}", gene)))?;
    atacflux_core::accessibility::resolve_accessibility(gene, intervention, &dataset.accessibility)
        .map_err(value_error)
}

/// Band label ("open", "moderate", "restricted", "closed") of an accessibility value
#[pyfunction]
fn classify_accessibility(value: f64) -> String {
    band::classify_accessibility(value).label().to_string()
}

#[pyfunction]
fn accessibility_color(value: f64) -> String {
    band::accessibility_color(value).to_string()
}

/// Animation class name of an edge rate
#[pyfunction]
fn classify_flow_speed(value: f64) -> String {
    flow::classify_flow_speed(value).class_name().to_string()
}

/// Read only result of a simulator evaluation
#[pyclass(name = "Evaluation", get_all, frozen)]
struct PyEvaluation {
    interventions: HashMap<String, String>,
    accessibility: HashMap<String, f64>,
    node_flux: HashMap<String, f64>,
    edge_flux: HashMap<String, f64>,
    degenerate: bool,
    product_flux: f64,
    waste_flux: f64,
    capture_rate: Option<f64>,
    waste_ratio: Option<f64>,
    fold_change: Option<f64>,
    bottleneck_gene: Option<String>,
}

impl From<simulation::Evaluation> for PyEvaluation {
    fn from(evaluation: simulation::Evaluation) -> Self {
        PyEvaluation {
            interventions: evaluation
                .interventions
                .iter()
                .map(|(gene, intervention)| (gene.clone(), intervention.to_string()))
                .collect(),
            accessibility: evaluation
                .accessibility
                .iter()
                .map(|(gene, &value)| (gene.clone(), value))
                .collect(),
            degenerate: evaluation.flux.is_degenerate(),
            node_flux: evaluation.flux.node_flux.into_iter().collect(),
            edge_flux: evaluation.flux.edge_flux.into_iter().collect(),
            product_flux: evaluation.metrics.product_flux,
            waste_flux: evaluation.metrics.waste_flux,
            capture_rate: evaluation.metrics.capture_rate,
            waste_ratio: evaluation.metrics.waste_ratio,
            fold_change: evaluation.metrics.fold_change,
            bottleneck_gene: evaluation.metrics.bottleneck_gene,
        }
    }
}

/// Simulator over a pathway dataset, the Ehrlich pathway unless a json path is given
#[pyclass(name = "Simulator", frozen)]
struct PySimulator {
    inner: simulation::Simulator,
}

#[pymethods]
impl PySimulator {
    #[new]
    #[pyo3(signature = (path=None))]
    fn new(path: Option<&str>) -> PyResult<Self> {
        let dataset = match path {
            Some(path) => PathwayDataset::read_json(path).map_err(value_error)?,
            None => ehrlich_dataset()?,
        };
        let inner = simulation::Simulator::try_from(dataset).map_err(value_error)?;
        Ok(PySimulator { inner })
    }

    /// Evaluate a mapping of gene id to intervention name
    fn evaluate(&self, interventions: HashMap<String, String>) -> PyResult<PyEvaluation> {
        let mut state = InterventionState::new();
        for (gene, name) in interventions {
            let intervention: Intervention = name.parse().map_err(value_error)?;
            state = state.with(&gene, intervention);
        }
        let evaluation = self.inner.evaluate(&state).map_err(value_error)?;
        Ok(PyEvaluation::from(evaluation))
    }

    /// Controllable gene ids in pathway order
    fn genes(&self) -> Vec<String> {
        self.inner
            .pathway()
            .controllable_genes()
            .map(|g| g.id.clone())
            .collect()
    }
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_accessibility, m)?)?;
    m.add_function(wrap_pyfunction!(classify_accessibility, m)?)?;
    m.add_function(wrap_pyfunction!(accessibility_color, m)?)?;
    m.add_function(wrap_pyfunction!(classify_flow_speed, m)?)?;
    m.add_class::<PySimulator>()?;
    m.add_class::<PyEvaluation>()?;
    Ok(())
}
