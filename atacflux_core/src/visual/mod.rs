//! Module for mapping accessibility and flux onto the pathway diagram: color bands, animation
//! speed classes, and the node and edge geometry

pub mod band;
pub mod flow;
pub mod layout;
