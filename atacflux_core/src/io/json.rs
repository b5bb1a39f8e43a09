//! Module providing JSON IO for pathway datasets
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accessibility::intervention::Intervention;
use crate::accessibility::table::AccessibilityTable;
use crate::accessibility::AccessibilityError;
use crate::datasets::PathwayDataset;
use crate::pathway::edge::Edge;
use crate::pathway::gene::Gene;
use crate::pathway::metabolite::{Metabolite, MetaboliteType};
use crate::pathway::model::{Pathway, PathwayError};

// region JSON Dataset
/// Represents a JSON serialized dataset, used for reading and writing datasets in json format
#[derive(Serialize, Deserialize)]
struct JsonDataset {
    id: Option<String>,
    name: Option<String>,
    metabolites: Vec<JsonMetabolite>,
    genes: Vec<JsonGene>,
    edges: Vec<Edge>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: String,
    short_name: Option<String>,
    #[serde(rename = "type")]
    kind: MetaboliteType,
}

#[derive(Serialize, Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
    systematic_name: Option<String>,
    ec_code: Option<String>,
    #[serde(default)]
    passive: bool,
    baseline: f64,
    /// Defaults to the baseline when absent
    activated: Option<f64>,
    /// Defaults to the baseline when absent
    repressed: Option<f64>,
}
// endregion JSON Dataset

// region Conversions
impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            short_name: m.short_name,
            kind: m.kind,
        }
    }
}

impl From<&Metabolite> for JsonMetabolite {
    fn from(m: &Metabolite) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            short_name: m.short_name.clone(),
            kind: m.kind,
        }
    }
}

impl From<&JsonGene> for Gene {
    fn from(g: &JsonGene) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            systematic_name: g.systematic_name.clone(),
            ec_code: g.ec_code.clone(),
            passive: g.passive,
        }
    }
}

impl PathwayDataset {
    /// Read a dataset from a json file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<PathwayDataset, JsonError> {
        let dataset_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        PathwayDataset::from_json_str(&dataset_str)
    }

    /// Parse a dataset from a json string
    pub fn from_json_str(data: &str) -> Result<PathwayDataset, JsonError> {
        let json_dataset = match serde_json::from_str::<JsonDataset>(data) {
            Ok(dataset) => dataset,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        PathwayDataset::from_json(json_dataset)
    }

    /// Write the dataset to a json file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Serialize the dataset to a json string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&self.to_json()?)?)
    }

    fn from_json(json_dataset: JsonDataset) -> Result<Self, JsonError> {
        let mut baseline: IndexMap<String, f64> = IndexMap::new();
        let mut activated: IndexMap<String, f64> = IndexMap::new();
        let mut repressed: IndexMap<String, f64> = IndexMap::new();
        for g in &json_dataset.genes {
            baseline.insert(g.id.clone(), g.baseline);
            activated.insert(g.id.clone(), g.activated.unwrap_or(g.baseline));
            repressed.insert(g.id.clone(), g.repressed.unwrap_or(g.baseline));
        }
        let genes: Vec<Gene> = json_dataset.genes.iter().map(Gene::from).collect();
        let metabolites: Vec<Metabolite> = json_dataset
            .metabolites
            .into_iter()
            .map(Metabolite::from)
            .collect();

        let pathway = Pathway::new(metabolites, genes, json_dataset.edges)?
            .with_id(json_dataset.id, json_dataset.name);
        let accessibility = AccessibilityTable::new(baseline, activated, repressed)?;
        accessibility.check_pathway(&pathway)?;
        info!(
            "Loaded pathway {} with {} metabolites, {} genes, and {} edges",
            pathway.id.as_deref().unwrap_or("<unnamed>"),
            pathway.metabolites().len(),
            pathway.genes().len(),
            pathway.edges().len()
        );
        Ok(PathwayDataset {
            pathway,
            accessibility,
        })
    }

    fn to_json(&self) -> Result<JsonDataset, JsonError> {
        let pathway = &self.pathway;
        let tables = &self.accessibility;
        let mut json_genes: Vec<JsonGene> = Vec::new();
        for (_, g) in pathway.genes() {
            json_genes.push(JsonGene {
                id: g.id.clone(),
                name: g.name.clone(),
                systematic_name: g.systematic_name.clone(),
                ec_code: g.ec_code.clone(),
                passive: g.passive,
                baseline: tables.accessibility(&g.id, Intervention::Normal)?,
                activated: Some(tables.accessibility(&g.id, Intervention::Activate)?),
                repressed: Some(tables.accessibility(&g.id, Intervention::Repress)?),
            })
        }
        Ok(JsonDataset {
            id: pathway.id.clone(),
            name: pathway.name.clone(),
            metabolites: pathway.metabolites().values().map(JsonMetabolite::from).collect(),
            genes: json_genes,
            edges: pathway.edges().to_vec(),
        })
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Invalid pathway: {0}")]
    InvalidPathway(#[from] PathwayError),
    #[error("Invalid accessibility tables: {0}")]
    InvalidAccessibility(#[from] AccessibilityError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions
