//! Provides the animation speed classes and stroke widths of the flux arrows
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::flux::solution::FluxSolution;
use crate::metrics::waste_ratio;
use crate::pathway::edge::Edge;
use crate::pathway::metabolite::MetaboliteType;
use crate::pathway::model::Pathway;

/// Animation speed of a flow arrow
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowSpeed {
    Fast,
    Medium,
    Slow,
}

impl FlowSpeed {
    /// Style class driving the animation
    pub fn class_name(&self) -> &'static str {
        match self {
            FlowSpeed::Fast => "flowFast",
            FlowSpeed::Medium => "flowMedium",
            FlowSpeed::Slow => "flowSlow",
        }
    }
}

impl Display for FlowSpeed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// Speed class for a rate in [0, 1]: above 0.7 fast, above 0.3 medium, slow otherwise
pub fn classify_flow_speed(rate: f64) -> FlowSpeed {
    if rate > 0.7 {
        FlowSpeed::Fast
    } else if rate > 0.3 {
        FlowSpeed::Medium
    } else {
        FlowSpeed::Slow
    }
}

/// Speed class for an absolute flux: at least 0.15 fast, at least 0.08 medium, slow otherwise
pub fn classify_flux_speed(flux: f64) -> FlowSpeed {
    if flux >= 0.15 {
        FlowSpeed::Fast
    } else if flux >= 0.08 {
        FlowSpeed::Medium
    } else {
        FlowSpeed::Slow
    }
}

/// Stroke width of a flux arrow, proportional to the flux and kept within [2, 8]
pub fn flux_stroke_width(flux: f64) -> f64 {
    (flux * 12.0).clamp(2.0, 8.0)
}

/// Rate used to color and animate an edge
///
/// Edges gated by a passive gene have no accessibility to show, so they display the share of
/// the terminal flux going to waste, or 0.5 when no flux reached a terminal. Other edges
/// display the accessibility of their gene. Unknown genes display as 0.5.
pub fn edge_display_rate(pathway: &Pathway, edge: &Edge, solution: &FluxSolution) -> f64 {
    let passive = pathway.gene(&edge.gene).is_some_and(|g| g.passive);
    if passive {
        waste_ratio(
            solution.total_of(pathway, MetaboliteType::Product),
            solution.total_of(pathway, MetaboliteType::Waste),
        )
        .unwrap_or(0.5)
    } else {
        solution.accessibility.get(&edge.gene).unwrap_or(0.5)
    }
}
