//! Provides the layout of the pathway diagram: a vertical main path with lateral branches
//!
//! Every position is computed from the pathway topology and a declarative [`LayoutConfig`].
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::pathway::edge::Edge;
use crate::pathway::metabolite::MetaboliteType;
use crate::pathway::model::Pathway;

// region Layout Configuration
/// Declarative layout configuration, missing fields take the default values
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub view_box: ViewBox,
    /// Column positions as fractions of the view box width
    pub columns: Columns,
    pub nodes: NodeSizes,
    pub spacing: Spacing,
    pub arrows: ArrowStyle,
    pub chromatin_bar: BarSize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewBox {
    pub width: f64,
    pub base_height: f64,
    pub padding: Padding,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: 700.,
            base_height: 650.,
            padding: Padding::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 70.,
            bottom: 50.,
            left: 80.,
            right: 80.,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    /// Column of the main path
    pub main: f64,
    /// Column of the product terminals
    pub product: f64,
    /// Column of the waste terminals
    pub waste: f64,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            main: 0.5,
            product: 0.85,
            waste: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
    /// Corner radius
    pub rx: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizes {
    pub metabolite: NodeSize,
    /// Enzyme pill drawn on top of its edge
    pub enzyme: NodeSize,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            metabolite: NodeSize {
                width: 160.,
                height: 42.,
                rx: 8.,
            },
            enzyme: NodeSize {
                width: 72.,
                height: 28.,
                rx: 14.,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Vertical gap between metabolites of the main path
    pub node_gap: f64,
    /// Additional gap before the branch terminals
    pub branch_gap: f64,
    /// Gap between a node border and the arrow
    pub arrow_padding: f64,
    pub enzyme_overlap: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            node_gap: 130.,
            branch_gap: 60.,
            arrow_padding: 14.,
            enzyme_overlap: 0.,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    pub main_thickness: f64,
    pub branch_thickness: f64,
    pub dash_array: String,
    pub arrow_head_size: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            main_thickness: 4.,
            branch_thickness: 3.,
            dash_array: "6 5".to_string(),
            arrow_head_size: 5.,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSize {
    pub width: f64,
    pub height: f64,
}

impl Default for BarSize {
    fn default() -> Self {
        Self {
            width: 54.,
            height: 6.,
        }
    }
}
// endregion Layout Configuration

// region Layout
/// Position of a node center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position of an enzyme pill
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnzymePosition {
    pub x: f64,
    pub y: f64,
    /// Whether the enzyme sits on a vertical edge of the main path
    pub on_main_path: bool,
}

/// Computed layout of a pathway
#[derive(Clone, Debug, PartialEq)]
pub struct PathwayLayout {
    /// Center of every placed metabolite
    pub positions: IndexMap<String, Point>,
    /// Enzyme pill position keyed by gene id
    pub enzyme_positions: IndexMap<String, EnzymePosition>,
    /// Metabolites from the input down to the first branch point
    pub main_path: Vec<String>,
    /// Metabolites off the main path
    pub branch_nodes: Vec<String>,
    pub view_box_width: f64,
    pub view_box_height: f64,
    /// Height of the branch terminals
    pub branch_y: f64,
}

impl PathwayLayout {
    /// Drawing path of an edge, `None` when an end has no position
    pub fn edge_path(&self, edge: &Edge, config: &LayoutConfig) -> Option<EdgePath> {
        let from = self.positions.get(&edge.from)?;
        let to = self.positions.get(&edge.to)?;
        Some(edge_path(*from, *to, config.nodes.metabolite.height, config))
    }
}

/// Compute the layout of a pathway
///
/// The main path walks from the input through single exit metabolites and ends at the first
/// branch point. It is stacked vertically in the main column. Product and waste terminals are
/// placed in their columns below the last main path metabolite. Other metabolites off the main
/// path are not placed.
pub fn compute_layout(pathway: &Pathway, config: &LayoutConfig) -> PathwayLayout {
    let LayoutConfig {
        view_box,
        columns,
        nodes,
        spacing,
        ..
    } = config;

    let mut main_path: Vec<String> = Vec::new();
    let mut current = Some(pathway.input());
    while let Some(node) = current {
        if main_path.iter().any(|m| m == node) {
            break;
        }
        main_path.push(node.to_string());
        let mut exits = pathway.outgoing(node);
        current = match (exits.next(), exits.next()) {
            (Some(exit), None) => Some(exit.to.as_str()),
            _ => None,
        };
    }
    let branch_nodes: Vec<String> = pathway
        .metabolites()
        .keys()
        .filter(|id| !main_path.contains(id))
        .cloned()
        .collect();

    let mut positions: IndexMap<String, Point> = IndexMap::new();
    let start_y = view_box.padding.top + nodes.metabolite.height / 2.;
    for (i, node) in main_path.iter().enumerate() {
        positions.insert(
            node.clone(),
            Point::new(
                view_box.width * columns.main,
                start_y + i as f64 * spacing.node_gap,
            ),
        );
    }

    let last_y = start_y + (main_path.len().saturating_sub(1)) as f64 * spacing.node_gap;
    let branch_y = last_y + spacing.node_gap + spacing.branch_gap;
    let mut placed_products = 0usize;
    let mut placed_wastes = 0usize;
    for node in &branch_nodes {
        let Some(met) = pathway.metabolite(node) else {
            continue;
        };
        let (column, stacked) = match met.kind {
            MetaboliteType::Product => (columns.product, &mut placed_products),
            MetaboliteType::Waste => (columns.waste, &mut placed_wastes),
            _ => {
                debug!("Metabolite {} has no column in the layout", node);
                continue;
            }
        };
        // Several terminals of one kind stack downward
        let y = branch_y + *stacked as f64 * spacing.node_gap;
        *stacked += 1;
        positions.insert(node.clone(), Point::new(view_box.width * column, y));
    }

    let mut enzyme_positions: IndexMap<String, EnzymePosition> = IndexMap::new();
    for edge in pathway.edges() {
        let (Some(from), Some(to)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
            continue;
        };
        let enzyme = if from.x == to.x {
            EnzymePosition {
                x: from.x,
                y: (from.y + to.y) / 2.,
                on_main_path: true,
            }
        } else {
            EnzymePosition {
                x: (from.x + to.x) / 2.,
                y: (from.y + to.y) / 2. + 30.,
                on_main_path: false,
            }
        };
        enzyme_positions.insert(edge.gene.clone(), enzyme);
    }

    let max_y = positions
        .values()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    PathwayLayout {
        positions,
        enzyme_positions,
        main_path,
        branch_nodes,
        view_box_width: view_box.width,
        view_box_height: max_y + view_box.padding.bottom + nodes.metabolite.height,
        branch_y,
    }
}
// endregion Layout

// region Edge Paths
/// Drawing path of an edge
#[derive(Clone, Debug, PartialEq)]
pub enum EdgePath {
    /// Straight arrow between two metabolites of the same column
    Vertical { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// L shaped path, down from the source, across, then into the target
    Branch { points: [Point; 3] },
}

impl EdgePath {
    /// SVG path data
    pub fn svg_path(&self) -> String {
        match self {
            EdgePath::Vertical { x1, y1, x2, y2 } => format!("M {} {} L {} {}", x1, y1, x2, y2),
            EdgePath::Branch { points: [start, corner, end] } => format!(
                "M {} {} L {} {} L {} {}",
                start.x, start.y, corner.x, corner.y, end.x, end.y
            ),
        }
    }

    /// Point the arrow head is drawn at
    pub fn end(&self) -> Point {
        match self {
            EdgePath::Vertical { x2, y2, .. } => Point::new(*x2, *y2),
            EdgePath::Branch { points } => points[2],
        }
    }
}

/// Drawing path between two metabolite centers
pub fn edge_path(from: Point, to: Point, node_height: f64, config: &LayoutConfig) -> EdgePath {
    let padding = config.spacing.arrow_padding;
    if from.x == to.x {
        EdgePath::Vertical {
            x1: from.x,
            y1: from.y + node_height / 2. + padding,
            x2: to.x,
            y2: to.y - node_height / 2. - padding,
        }
    } else {
        let mid_y = from.y + (to.y - from.y) * 0.4;
        EdgePath::Branch {
            points: [
                Point::new(from.x, from.y + node_height / 2. + padding),
                Point::new(from.x, mid_y),
                Point::new(to.x, to.y),
            ],
        }
    }
}
// endregion Edge Paths
