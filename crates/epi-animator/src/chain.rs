use std::collections::VecDeque;

use epi_core::{Coefficient, Point};

use crate::config::ChainConfig;
use crate::frame::{smooth_trail, RenderCommand};

/// Radius a construction circle is drawn with.
///
/// Small terms get up to `1 + boost` times their amplitude so they stay
/// visible next to the dominant ones.
pub fn drawn_radius(amp: f64, max_amp: f64, boost: f64) -> f64 {
    if max_amp <= 0.0 {
        return amp;
    }
    amp * (1.0 + boost * (1.0 - amp / max_amp))
}

/// One instance of the epicycle construction and the trail it leaves.
#[derive(Debug, Clone)]
pub struct EpicycleChain {
    phase_offset: f64,
    scale: f64,
    show_circles: bool,
    trail: VecDeque<Point>,
    max_trail: usize,
}

impl EpicycleChain {
    pub fn new(config: &ChainConfig, max_trail: usize) -> Self {
        Self {
            phase_offset: config.phase_offset,
            scale: config.scale,
            show_circles: config.show_circles,
            trail: VecDeque::with_capacity(max_trail),
            max_trail,
        }
    }

    pub fn shows_circles(&self) -> bool {
        self.show_circles
    }

    /// Trail points, newest first.
    pub fn trail(&self) -> &VecDeque<Point> {
        &self.trail
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Walk the chain at clock time `t` from screen point `center`.
    ///
    /// `coeffs` are visited in the given order. Curve space is y up, so each
    /// step is flipped into screen space. Circles and vectors are emitted
    /// when this chain shows them. Returns the traced tip.
    pub fn trace(
        &self,
        coeffs: &[Coefficient],
        center: Point,
        t: f64,
        circle_boost: f64,
        commands: &mut Vec<RenderCommand>,
    ) -> Point {
        let t = t + self.phase_offset;
        let max_amp = coeffs.iter().map(|c| c.amp()).fold(0.0, f64::max);
        let mut acc = center;

        for c in coeffs {
            let v = c.vector_at(t);
            let next = acc + Point::new(v.x, -v.y) * self.scale;
            if self.show_circles {
                commands.push(RenderCommand::Circle {
                    center: acc,
                    radius: drawn_radius(c.amp(), max_amp, circle_boost) * self.scale,
                });
                commands.push(RenderCommand::Vector { from: acc, to: next });
            }
            acc = next;
        }

        acc
    }

    /// Move the trail from one viewport to another, scaling about the centre.
    pub fn remap_trail(&mut self, from: Point, to: Point, factor: f64) {
        for p in &mut self.trail {
            *p = to + (*p - from) * factor;
        }
    }

    /// Record a traced point at the front of the trail.
    pub fn push_trail(&mut self, tip: Point) {
        self.trail.push_front(tip);
        self.trail.truncate(self.max_trail);
    }

    pub fn trail_command(&self, index: usize) -> Option<RenderCommand> {
        if self.trail.len() < 2 {
            return None;
        }
        let points: Vec<Point> = self.trail.iter().copied().collect();
        Some(RenderCommand::Trail {
            chain: index,
            segments: smooth_trail(&points),
        })
    }
}
