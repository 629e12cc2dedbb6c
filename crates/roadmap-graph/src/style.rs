//! Visual contract per node type and edge kind.

use roadmap_model::NodeKind;
use serde::Serialize;

use crate::builder::EdgeKind;

/// Classes and corner radius for drawing a node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub rect_class: &'static str,
    pub text_class: &'static str,
    pub rx: u8,
}

impl NodeStyle {
    /// Fallback for unrecognized types
    pub const DEFAULT: Self = Self {
        rect_class: "fill-slate-800 stroke-slate-600",
        text_class: "text-slate-300",
        rx: 4,
    };

    /// Style for a raw type name. Never fails; unknown or missing names
    /// get [`NodeStyle::DEFAULT`].
    #[must_use]
    pub fn for_type(kind: Option<&str>) -> Self {
        kind.and_then(|name| name.parse::<NodeKind>().ok())
            .map_or(Self::DEFAULT, Self::for_kind)
    }

    #[must_use]
    pub const fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Phase => Self {
                rect_class: "fill-transparent stroke-none",
                text_class: "text-slate-500 font-black text-xl uppercase tracking-widest",
                rx: 0,
            },
            NodeKind::Topic => Self {
                rect_class: "fill-[#FFD700] stroke-yellow-600 stroke-[3px]",
                text_class: "text-slate-900 font-extrabold text-sm uppercase tracking-wide",
                rx: 6,
            },
            NodeKind::Option => Self {
                rect_class: "fill-[#F5F5DC] stroke-stone-400 stroke-1",
                text_class: "text-slate-700 text-xs font-semibold",
                rx: 4,
            },
            NodeKind::Checkpoint => Self {
                rect_class: "fill-slate-800 stroke-indigo-500/50 stroke-[1px] stroke-dashed",
                text_class: "text-indigo-300 text-xs italic",
                rx: 20,
            },
            NodeKind::Extra => Self {
                rect_class: "fill-purple-100 stroke-purple-300 stroke-2",
                text_class: "text-purple-900 font-bold text-sm",
                rx: 6,
            },
            NodeKind::Related => Self::DEFAULT,
        }
    }
}

/// Stroke for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: u8,
    /// SVG `stroke-dasharray`; `None` draws solid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

impl EdgeStyle {
    #[must_use]
    pub const fn for_kind(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Main => Self {
                stroke: "#94a3b8",
                stroke_width: 3,
                dash: None,
            },
            EdgeKind::Sub => Self {
                stroke: "#cbd5e1",
                stroke_width: 2,
                dash: Some("6,4"),
            },
        }
    }
}
