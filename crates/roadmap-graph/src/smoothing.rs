//! Rounded edge paths
//!
//! Turns a route polyline into a path with quadratic corners. The corner
//! radius shrinks to half of the shorter adjacent segment so an arc never
//! overruns its segment.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::layout::EdgeRoute;

const DEGENERATE: f64 = 1e-9;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { control: Point, to: Point },
}

impl Display for PathCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { to } => write!(f, "M {} {}", to.x, to.y),
            Self::LineTo { to } => write!(f, "L {} {}", to.x, to.y),
            Self::QuadTo { control, to } => {
                write!(f, "Q {} {} {} {}", control.x, control.y, to.x, to.y)
            }
        }
    }
}

/// Ordered drawing commands; `Display` yields an SVG `d` attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDescriptor {
    pub commands: Vec<PathCommand>,
}

impl Display for PathDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut commands = self.commands.iter();
        if let Some(first) = commands.next() {
            write!(f, "{first}")?;
        }
        for command in commands {
            write!(f, " {command}")?;
        }
        Ok(())
    }
}

/// Rounds the interior corners of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSmoother {
    radius: f64,
}

impl Default for PathSmoother {
    fn default() -> Self {
        Self { radius: 12.0 }
    }
}

impl PathSmoother {
    /// Smoother with the given corner radius. Negative or NaN radii draw
    /// sharp corners.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius: if radius > 0.0 { radius } else { 0.0 },
        }
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Path through `points`, first to last.
    ///
    /// Fewer than three points is a single straight segment. A corner
    /// whose adjacent segment has zero length, or that does not turn, is
    /// drawn as a plain line through the point.
    #[must_use]
    pub fn smooth(&self, points: &[Point]) -> PathDescriptor {
        let Some((&start, rest)) = points.split_first() else {
            return PathDescriptor::default();
        };

        let mut commands = vec![PathCommand::MoveTo { to: start }];
        if let [interior @ .., end] = rest {
            let mut prev = start;
            for (i, &corner) in interior.iter().enumerate() {
                let next = interior.get(i + 1).copied().unwrap_or(*end);
                commands.extend(self.corner(prev, corner, next));
                prev = corner;
            }
            commands.push(PathCommand::LineTo { to: *end });
        }

        PathDescriptor { commands }
    }

    /// [`smooth`](Self::smooth) over a layout route
    #[must_use]
    pub fn smooth_route(&self, route: &EdgeRoute) -> PathDescriptor {
        self.smooth(&route.points())
    }

    fn corner(&self, prev: Point, corner: Point, next: Point) -> Vec<PathCommand> {
        let incoming = prev.to(corner);
        let outgoing = corner.to(next);
        let (len_in, len_out) = (incoming.length(), outgoing.length());

        let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
        let dot = incoming.x * outgoing.x + incoming.y * outgoing.y;
        let straight = cross.abs() <= DEGENERATE * len_in * len_out && dot > 0.0;

        let r = self.radius.min(len_in / 2.0).min(len_out / 2.0);
        if len_in <= DEGENERATE || len_out <= DEGENERATE || straight || r <= 0.0 {
            return vec![PathCommand::LineTo { to: corner }];
        }

        let arc_start = Point::new(
            corner.x - incoming.x * r / len_in,
            corner.y - incoming.y * r / len_in,
        );
        let arc_end = Point::new(
            corner.x + outgoing.x * r / len_out,
            corner.y + outgoing.y * r / len_out,
        );
        vec![
            PathCommand::LineTo { to: arc_start },
            PathCommand::QuadTo {
                control: corner,
                to: arc_end,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn two_points_are_move_then_line() {
        let path = PathSmoother::default().smooth(&[p(0.0, 0.0), p(0.0, 40.0)]);
        assert_eq!(path.to_string(), "M 0 0 L 0 40");
    }

    #[test]
    fn single_and_empty_inputs() {
        assert_eq!(PathSmoother::default().smooth(&[]).to_string(), "");
        assert_eq!(PathSmoother::default().smooth(&[p(3.0, 4.0)]).to_string(), "M 3 4");
    }

    #[test]
    fn right_angle_gets_a_full_radius_arc() {
        let path = PathSmoother::default().smooth(&[p(0.0, 0.0), p(0.0, 100.0), p(100.0, 100.0)]);
        assert_eq!(path.to_string(), "M 0 0 L 0 88 Q 0 100 12 100 L 100 100");
    }

    #[test]
    fn short_segments_clamp_the_radius() {
        // Outgoing segment is 10 long, so the arc may use at most 5 of it.
        let path = PathSmoother::new(12.0).smooth(&[p(0.0, 0.0), p(0.0, 100.0), p(10.0, 100.0)]);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo { to: p(0.0, 0.0) },
                PathCommand::LineTo { to: p(0.0, 95.0) },
                PathCommand::QuadTo {
                    control: p(0.0, 100.0),
                    to: p(5.0, 100.0)
                },
                PathCommand::LineTo { to: p(10.0, 100.0) },
            ]
        );
    }

    #[test]
    fn orthogonal_route_rounds_both_bends_within_half_segments() {
        let points = [p(0.0, 0.0), p(0.0, 20.0), p(50.0, 20.0), p(50.0, 40.0)];
        let path = PathSmoother::default().smooth(&points);
        assert_eq!(
            path.to_string(),
            "M 0 0 L 0 10 Q 0 20 10 20 L 40 20 Q 50 20 50 30 L 50 40"
        );
    }

    #[test]
    fn zero_length_segment_degrades_to_a_line() {
        let path = PathSmoother::default().smooth(&[p(0.0, 0.0), p(0.0, 0.0), p(30.0, 0.0)]);
        assert_eq!(path.to_string(), "M 0 0 L 0 0 L 30 0");
        assert!(!path.to_string().contains("NaN"));
    }

    #[test]
    fn collinear_bend_degrades_to_a_line() {
        let path = PathSmoother::default().smooth(&[p(0.0, 0.0), p(0.0, 50.0), p(0.0, 100.0)]);
        assert_eq!(path.to_string(), "M 0 0 L 0 50 L 0 100");
    }

    #[test]
    fn zero_radius_draws_sharp_corners() {
        let path = PathSmoother::new(0.0).smooth(&[p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0)]);
        assert_eq!(path.to_string(), "M 0 0 L 0 10 L 10 10");
    }

    #[test]
    fn route_helper_uses_start_bends_end() {
        let route = EdgeRoute {
            id: "e-0".into(),
            kind: crate::builder::EdgeKind::Sub,
            start: p(0.0, 0.0),
            end: p(40.0, 40.0),
            bends: smallvec::smallvec![p(0.0, 20.0), p(40.0, 20.0)],
        };
        let path = PathSmoother::default().smooth_route(&route);
        assert_eq!(path.commands.len(), 6);
        assert_eq!(path.commands.last(), Some(&PathCommand::LineTo { to: p(40.0, 40.0) }));
    }
}
