//! Chromatin accessibility gated flux through linear and branching metabolic pathways
//!
//! A [`pathway::model::Pathway`] is a DAG of metabolites whose edges are catalyzed by genes.
//! The accessibility of each gene's chromatin, chosen from baseline/activated/repressed tables by
//! an [`accessibility::intervention::InterventionState`], throttles single exit steps and
//! splits flux at branch points. [`simulation::Simulator`] ties this together with the
//! derived [`metrics`], while [`visual`] maps the results onto a pathway diagram.
pub mod accessibility;
pub mod configuration;
pub mod datasets;
pub mod flux;
pub mod io;
pub mod metrics;
pub mod pathway;
pub mod simulation;
pub mod visual;
