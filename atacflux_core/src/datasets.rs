//! Datasets bundled with the crate
use crate::accessibility::table::AccessibilityTable;
use crate::io::json::JsonError;
use crate::pathway::model::Pathway;

/// A pathway together with the accessibility tables of its genes
#[derive(Clone, Debug)]
pub struct PathwayDataset {
    pub pathway: Pathway,
    pub accessibility: AccessibilityTable,
}

const EHRLICH_JSON: &str = include_str!("../data/ehrlich.json");

/// The Ehrlich pathway from L-leucine to isoamyl acetate in yeast
///
/// Leucine is converted by BAT2, ARO10, and ADH6 to isoamylol, which branches to the product
/// isoamyl acetate (ATF1) and to passive export of the fusel alcohol (EXPORT). Baseline
/// accessibility comes from ATAC-seq, activated accessibility is the prediction after
/// dCas9-VPR targeting.
pub fn ehrlich() -> Result<PathwayDataset, JsonError> {
    PathwayDataset::from_json_str(EHRLICH_JSON)
}

#[cfg(test)]
mod dataset_tests {
    use super::*;
    use crate::pathway::metabolite::MetaboliteType;

    #[test]
    fn ehrlich_topology() {
        let dataset = ehrlich().unwrap();
        let pathway = &dataset.pathway;
        assert_eq!(pathway.id.as_deref(), Some("ehrlich"));
        assert_eq!(pathway.metabolites().len(), 6);
        assert_eq!(pathway.edges().len(), 5);
        assert_eq!(pathway.input(), "leu");
        assert_eq!(
            pathway.topological_order(),
            &["leu", "kic", "mbal", "iamoh", "iamac", "waste"]
        );
        assert_eq!(pathway.metabolites_of(MetaboliteType::Product).count(), 1);
        assert_eq!(pathway.metabolites_of(MetaboliteType::Waste).count(), 1);
        assert!(pathway.gene("EXPORT").unwrap().passive);
        assert_eq!(
            pathway.gene("ATF1").unwrap().systematic_name.as_deref(),
            Some("YOR377W")
        );
    }
}
