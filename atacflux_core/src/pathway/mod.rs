//! Module providing the Pathway struct for representing a small metabolic pathway, whose edges
//! are gated by the chromatin accessibility of the catalyzing genes.

pub mod edge;
pub mod gene;
pub mod metabolite;
pub mod model;
