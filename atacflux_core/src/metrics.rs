//! Summary metrics derived from flux solutions
//!
//! Metrics whose denominator is zero are `None`. They are never reported as 0 % or as an
//! infinite fold change.
use crate::accessibility::GeneAccessibility;
use crate::flux::solution::FluxSolution;
use crate::pathway::metabolite::MetaboliteType;
use crate::pathway::model::Pathway;

/// Metrics summarizing a flux solution against the baseline solution
#[derive(Clone, Debug, PartialEq)]
pub struct PathwayMetrics {
    /// Flux reaching the product terminals
    pub product_flux: f64,
    /// Flux reaching the waste terminals
    pub waste_flux: f64,
    /// Fraction of the terminal flux reaching the product
    pub capture_rate: Option<f64>,
    /// Fraction of the terminal flux lost to waste
    pub waste_ratio: Option<f64>,
    /// Product flux relative to the baseline product flux
    pub fold_change: Option<f64>,
    /// Controllable gene with the lowest accessibility
    pub bottleneck_gene: Option<String>,
}

/// Derive all metrics of a solution, comparing it to a baseline solution
pub fn derive_metrics(
    pathway: &Pathway,
    current: &FluxSolution,
    baseline: &FluxSolution,
) -> PathwayMetrics {
    let product_flux = current.total_of(pathway, MetaboliteType::Product);
    let waste_flux = current.total_of(pathway, MetaboliteType::Waste);
    PathwayMetrics {
        product_flux,
        waste_flux,
        capture_rate: capture_rate(product_flux, waste_flux),
        waste_ratio: waste_ratio(product_flux, waste_flux),
        fold_change: fold_change(
            product_flux,
            baseline.total_of(pathway, MetaboliteType::Product),
        ),
        bottleneck_gene: bottleneck_gene(pathway, &current.accessibility),
    }
}

/// Fraction of the terminal flux reaching the product, `None` if no flux reached a terminal
pub fn capture_rate(product_flux: f64, waste_flux: f64) -> Option<f64> {
    ratio(product_flux, product_flux + waste_flux)
}

/// Fraction of the terminal flux lost to waste, `None` if no flux reached a terminal
pub fn waste_ratio(product_flux: f64, waste_flux: f64) -> Option<f64> {
    ratio(waste_flux, product_flux + waste_flux)
}

/// Product flux relative to the baseline, `None` if the baseline produced nothing
pub fn fold_change(product_flux: f64, baseline_product_flux: f64) -> Option<f64> {
    ratio(product_flux, baseline_product_flux)
}

/// The controllable gene with the lowest accessibility
///
/// Ties go to the gene coming first in the pathway's gene order. Genes without an
/// accessibility value are skipped.
pub fn bottleneck_gene(pathway: &Pathway, accessibility: &GeneAccessibility) -> Option<String> {
    let mut lowest: Option<(&str, f64)> = None;
    for gene in pathway.controllable_genes() {
        let Ok(value) = accessibility.get(&gene.id) else {
            continue;
        };
        match lowest {
            Some((_, min)) if value >= min => {}
            _ => lowest = Some((gene.id.as_str(), value)),
        }
    }
    lowest.map(|(gene, _)| gene.to_string())
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 && denominator.is_finite() {
        Some(numerator / denominator)
    } else {
        None
    }
}

#[cfg(test)]
mod metrics_tests {
    use super::*;
    use crate::accessibility::intervention::{Intervention, InterventionState};
    use crate::datasets::ehrlich;
    use crate::flux::solver::solve;

    #[test]
    fn baseline_capture_rate() {
        let dataset = ehrlich().unwrap();
        let baseline = solve(&dataset.pathway, &dataset.accessibility.baseline(), 1.0).unwrap();
        let metrics = derive_metrics(&dataset.pathway, &baseline, &baseline);
        assert!((metrics.capture_rate.unwrap() - 1.0 / 6.0).abs() < 1e-12);
        assert!((metrics.waste_ratio.unwrap() - 5.0 / 6.0).abs() < 1e-12);
        assert!((metrics.fold_change.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(metrics.bottleneck_gene.as_deref(), Some("ATF1"));
    }

    #[test]
    fn activated_fold_change() {
        let dataset = ehrlich().unwrap();
        let baseline = solve(&dataset.pathway, &dataset.accessibility.baseline(), 1.0).unwrap();
        let acc = InterventionState::new()
            .with("ATF1", Intervention::Activate)
            .resolve(&dataset.pathway, &dataset.accessibility)
            .unwrap();
        let current = solve(&dataset.pathway, &acc, 1.0).unwrap();
        let metrics = derive_metrics(&dataset.pathway, &current, &baseline);
        assert!((metrics.capture_rate.unwrap() - 0.70).abs() < 1e-9);
        assert!((metrics.fold_change.unwrap() - 4.2).abs() < 1e-9);
        // ATF1 is open now, BAT2 is the least accessible controllable gene
        assert_eq!(metrics.bottleneck_gene.as_deref(), Some("BAT2"));
    }

    #[test]
    fn undefined_metrics() {
        assert_eq!(capture_rate(0.0, 0.0), None);
        assert_eq!(waste_ratio(0.0, 0.0), None);
        assert_eq!(fold_change(0.2, 0.0), None);
        assert!((fold_change(0.0, 0.2).unwrap()).abs() < 1e-25);

        // Nothing reaches the terminals when the first step is closed
        let dataset = ehrlich().unwrap();
        let baseline = solve(&dataset.pathway, &dataset.accessibility.baseline(), 1.0).unwrap();
        let closed = dataset.accessibility.baseline().with("BAT2", 0.0);
        let current = solve(&dataset.pathway, &closed, 1.0).unwrap();
        let metrics = derive_metrics(&dataset.pathway, &current, &baseline);
        assert_eq!(metrics.capture_rate, None);
        assert_eq!(metrics.waste_ratio, None);
        assert!((metrics.fold_change.unwrap()).abs() < 1e-25);
        // and a closed baseline makes the fold change undefined
        let reversed = derive_metrics(&dataset.pathway, &baseline, &current);
        assert_eq!(reversed.fold_change, None);
    }

    #[test]
    fn bottleneck_tie_break() {
        let dataset = ehrlich().unwrap();
        let acc = dataset
            .accessibility
            .baseline()
            .with("ARO10", 0.1)
            .with("ADH6", 0.1)
            .with("ATF1", 0.1);
        assert_eq!(
            bottleneck_gene(&dataset.pathway, &acc).as_deref(),
            Some("ARO10")
        );
        // The passive export gene is never the bottleneck
        let acc = dataset.accessibility.baseline().with("EXPORT", 0.0);
        assert_eq!(
            bottleneck_gene(&dataset.pathway, &acc).as_deref(),
            Some("ATF1")
        );
    }
}
