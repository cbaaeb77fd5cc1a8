//! Per-tick drawing output.
//!
//! The animator never touches a canvas. Each tick returns a [`RenderFrame`]
//! of screen-space commands (y down) that the host replays in order.

use epi_core::Point;
use serde::Serialize;

/// One quadratic piece of a smoothed trail, with its opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSegment {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderCommand {
    /// A construction circle of one epicycle.
    Circle { center: Point, radius: f64 },
    /// The rotating vector of one epicycle.
    Vector { from: Point, to: Point },
    /// A chain's trail, newest segment first, fading toward the oldest.
    Trail { chain: usize, segments: Vec<TrailSegment> },
    /// The traced point of a chain this tick.
    Tip { chain: usize, position: Point },
    /// An expanding click ripple.
    Ripple { center: Point, radius: f64, alpha: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    /// Rotation clock after this tick.
    pub time: f64,
    /// Linear transition progress, 1 when settled.
    pub transition_progress: f64,
    /// Cursor blend in [0, 1].
    pub cursor_blend: f64,
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            time: 0.0,
            transition_progress: 1.0,
            cursor_blend: 0.0,
            commands: Vec::new(),
        }
    }

    pub fn tips(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Tip { chain, position } => Some((*chain, *position)),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Circle { .. }))
            .count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Smooth a newest-first polyline into quadratic pieces through its midpoints.
///
/// Piece `i` runs from the midpoint before vertex `i` to the midpoint after
/// it, with vertex `i` as control. Opacity falls linearly from 1 at the
/// newest piece toward 0 at the oldest.
pub fn smooth_trail(points: &[Point]) -> Vec<TrailSegment> {
    let n = points.len();
    if n < 3 {
        return match points {
            [a, b] => vec![TrailSegment { start: *a, control: a.midpoint(b), end: *b, alpha: 1.0 }],
            _ => Vec::new(),
        };
    }

    (1..n - 1)
        .map(|i| TrailSegment {
            start: points[i - 1].midpoint(&points[i]),
            control: points[i],
            end: points[i].midpoint(&points[i + 1]),
            alpha: 1.0 - (i - 1) as f64 / (n - 2) as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_trail_short() {
        assert!(smooth_trail(&[]).is_empty());
        assert!(smooth_trail(&[Point::ZERO]).is_empty());
        assert_eq!(smooth_trail(&[Point::ZERO, Point::new(1.0, 0.0)]).len(), 1);
    }

    #[test]
    fn test_smooth_trail_joins_midpoints() {
        let pts: Vec<Point> = (0..6).map(|i| Point::new(i as f64, (i * i) as f64)).collect();
        let segs = smooth_trail(&pts);
        assert_eq!(segs.len(), 4);
        for w in segs.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
        assert_eq!(segs[0].alpha, 1.0);
        for w in segs.windows(2) {
            assert!(w[0].alpha > w[1].alpha);
        }
        assert!(segs.last().map(|s| s.alpha).unwrap_or(1.0) > 0.0);
    }

    #[test]
    fn test_serialize_tagged() {
        let frame = RenderFrame {
            commands: vec![RenderCommand::Circle { center: Point::ZERO, radius: 2.0 }],
            ..RenderFrame::empty(10.0, 10.0)
        };
        let json = frame.to_json().unwrap();
        assert!(json.contains(r#""type":"circle""#));
    }
}
