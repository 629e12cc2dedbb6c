//! Canvas size from a finished layout.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutResult;

/// Border added around the tightest bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasMargins {
    /// Added to every node's far edge before taking the maximum
    pub margin: f64,
    /// Added once more after the maximum
    pub padding: f64,
}

impl Default for CanvasMargins {
    fn default() -> Self {
        Self {
            margin: 40.0,
            padding: 40.0,
        }
    }
}

/// Drawable area for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Derives the drawable canvas from a [`LayoutResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasSizer {
    margins: CanvasMargins,
}

impl CanvasSizer {
    #[must_use]
    pub const fn new(margins: CanvasMargins) -> Self {
        Self { margins }
    }

    /// `max(layout extent, node far edge + margin) + padding` on each axis
    #[must_use]
    pub fn size(&self, layout: &LayoutResult) -> Canvas {
        let CanvasMargins { margin, padding } = self.margins;
        let (width, height) = layout.nodes.iter().fold(
            (layout.width, layout.height),
            |(width, height), node| {
                (
                    width.max(node.x + node.width + margin),
                    height.max(node.y + node.height + margin),
                )
            },
        );

        Canvas {
            width: width + padding,
            height: height + padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PositionedNode;
    use roadmap_model::NodeKind;

    fn positioned(x: f64, y: f64, width: f64, height: f64) -> PositionedNode {
        PositionedNode {
            id: format!("topic__{x}_{y}"),
            kind: NodeKind::Topic,
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn adds_margin_then_padding() {
        let layout = LayoutResult {
            nodes: vec![positioned(12.0, 12.0, 180.0, 50.0), positioned(100.0, 300.0, 150.0, 40.0)],
            edges: Vec::new(),
            width: 0.0,
            height: 0.0,
        };

        let canvas = CanvasSizer::default().size(&layout);
        assert_eq!(canvas, Canvas { width: 330.0, height: 420.0 });
    }

    #[test]
    fn reported_extent_wins_when_larger() {
        let layout = LayoutResult {
            nodes: vec![positioned(0.0, 0.0, 10.0, 10.0)],
            edges: Vec::new(),
            width: 500.0,
            height: 20.0,
        };

        let canvas = CanvasSizer::new(CanvasMargins { margin: 5.0, padding: 1.0 }).size(&layout);
        assert_eq!(canvas, Canvas { width: 501.0, height: 21.0 });
    }

    #[test]
    fn empty_layout_is_padding_only() {
        let canvas = CanvasSizer::default().size(&LayoutResult::default());
        assert_eq!(canvas, Canvas { width: 40.0, height: 40.0 });
    }
}
