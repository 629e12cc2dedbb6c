//! Layout configuration
//!
//! [`LayoutOptions::default`] is the fixed configuration every render
//! uses. Callers can override single entries per call with string
//! key/value pairs through [`LayoutOptions::with_override`].

use roadmap_model::NodeKind;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::Size;

/// Layout algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Nodes in layers along the flow direction
    #[default]
    Layered,
}

/// Flow direction of the main spine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Top to bottom
    #[default]
    Down,
    /// Left to right
    Right,
}

/// Shape of edge routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRouting {
    /// Axis-parallel segments, bending halfway between layers
    #[default]
    Orthogonal,
    /// Straight segment from source to target
    Polyline,
}

/// How nodes are spread across a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodePlacement {
    /// Spine nodes sit straight under their predecessor; branches fan out
    /// beside them
    #[default]
    Aligned,
    /// Every layer packed from the leading edge in input order
    Packed,
}

/// Fixed box size per node kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizes {
    pub phase: Size,
    pub topic: Size,
    pub option: Size,
    pub checkpoint: Size,
    pub extra: Size,
    pub related: Size,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            phase: Size::new(300.0, 60.0),
            topic: Size::new(180.0, 50.0),
            option: Size::new(150.0, 40.0),
            checkpoint: Size::new(250.0, 40.0),
            extra: Size::new(180.0, 50.0),
            related: Size::new(160.0, 40.0),
        }
    }
}

impl NodeSizes {
    /// Box size for `kind`
    #[must_use]
    pub const fn get(&self, kind: NodeKind) -> Size {
        match kind {
            NodeKind::Phase => self.phase,
            NodeKind::Topic => self.topic,
            NodeKind::Option => self.option,
            NodeKind::Checkpoint => self.checkpoint,
            NodeKind::Extra => self.extra,
            NodeKind::Related => self.related,
        }
    }
}

/// Layout settings for one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub algorithm: Algorithm,
    pub direction: Direction,
    pub edge_routing: EdgeRouting,
    /// Gap between consecutive layers
    pub spacing_between_layers: f64,
    /// Gap between neighbours within a layer
    pub spacing_node_node: f64,
    pub node_placement: NodePlacement,
    /// Let branches alternate sides of the spine instead of all going to
    /// one side
    pub allow_side_switch: bool,
    /// Empty border around the laid-out graph
    pub padding: f64,
    pub node_sizes: NodeSizes,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Layered,
            direction: Direction::Down,
            edge_routing: EdgeRouting::Orthogonal,
            spacing_between_layers: 40.0,
            spacing_node_node: 50.0,
            node_placement: NodePlacement::Aligned,
            allow_side_switch: true,
            padding: 12.0,
            node_sizes: NodeSizes::default(),
        }
    }
}

impl LayoutOptions {
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_edge_routing(mut self, edge_routing: EdgeRouting) -> Self {
        self.edge_routing = edge_routing;
        self
    }

    #[must_use]
    pub fn with_node_placement(mut self, node_placement: NodePlacement) -> Self {
        self.node_placement = node_placement;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, between_layers: f64, node_node: f64) -> Self {
        self.spacing_between_layers = between_layers;
        self.spacing_node_node = node_node;
        self
    }

    #[must_use]
    pub fn with_side_switch(mut self, allow: bool) -> Self {
        self.allow_side_switch = allow;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Apply one string override.
    ///
    /// Keys may carry an `elk.` or `elk.layered.` prefix. Enum values are
    /// matched case-insensitively.
    ///
    /// # Errors
    /// [`LayoutError::InvalidOption`] for an unknown key or a value that
    /// does not parse.
    pub fn with_override(mut self, key: &str, value: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::invalid_option(key, value);
        let bare = key
            .strip_prefix("elk.layered.")
            .or_else(|| key.strip_prefix("elk."))
            .unwrap_or(key);
        let value = value.trim();

        match bare {
            "algorithm" => {
                self.algorithm = match_keyword(value, &[("layered", Algorithm::Layered)])
                    .ok_or_else(invalid)?;
            }
            "direction" => {
                self.direction = match_keyword(
                    value,
                    &[("down", Direction::Down), ("right", Direction::Right)],
                )
                .ok_or_else(invalid)?;
            }
            "edgeRouting" => {
                self.edge_routing = match_keyword(
                    value,
                    &[
                        ("orthogonal", EdgeRouting::Orthogonal),
                        ("polyline", EdgeRouting::Polyline),
                    ],
                )
                .ok_or_else(invalid)?;
            }
            "spacing.nodeNodeBetweenLayers" => {
                self.spacing_between_layers = parse_length(value).ok_or_else(invalid)?;
            }
            "spacing.nodeNode" => {
                self.spacing_node_node = parse_length(value).ok_or_else(invalid)?;
            }
            "nodePlacement.strategy" => {
                self.node_placement = match_keyword(
                    value,
                    &[
                        ("brandes_koepf", NodePlacement::Aligned),
                        ("aligned", NodePlacement::Aligned),
                        ("simple", NodePlacement::Packed),
                        ("packed", NodePlacement::Packed),
                    ],
                )
                .ok_or_else(invalid)?;
            }
            "allowNonFlowPortsToSwitchSides" => {
                self.allow_side_switch = value.parse().map_err(|_| invalid())?;
            }
            "padding" => {
                self.padding = parse_length(value).ok_or_else(invalid)?;
            }
            _ => return Err(invalid()),
        }
        Ok(self)
    }

    /// Apply overrides in order; later keys win.
    ///
    /// # Errors
    /// The first override that fails.
    pub fn with_overrides<'a, I>(self, overrides: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        overrides
            .into_iter()
            .try_fold(self, |options, (key, value)| options.with_override(key, value))
    }
}

fn match_keyword<T: Copy>(value: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, variant)| *variant)
}

fn parse_length(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|length| length.is_finite() && *length >= 0.0)
}
