use epi_core::Point;

use crate::config::RippleConfig;
use crate::frame::RenderCommand;

/// Ripples alive at once; older ones are dropped first.
const MAX_RIPPLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ripple {
    center: Point,
    age_ms: f64,
}

/// Expanding, fading circles spawned by clicks.
#[derive(Debug, Clone)]
pub struct RippleField {
    ripples: Vec<Ripple>,
    duration_ms: f64,
    max_radius: f64,
}

impl RippleField {
    pub fn new(config: &RippleConfig) -> Self {
        Self {
            ripples: Vec::new(),
            duration_ms: config.duration_ms,
            max_radius: config.max_radius,
        }
    }

    pub fn spawn(&mut self, center: Point) {
        if self.ripples.len() == MAX_RIPPLES {
            self.ripples.remove(0);
        }
        self.ripples.push(Ripple { center, age_ms: 0.0 });
    }

    pub fn advance(&mut self, dt_ms: f64) {
        for r in &mut self.ripples {
            r.age_ms += dt_ms.max(0.0);
        }
        let duration = self.duration_ms;
        self.ripples.retain(|r| r.age_ms < duration);
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }

    /// Radius eases out (fast start); opacity falls linearly.
    pub fn commands(&self) -> impl Iterator<Item = RenderCommand> + '_ {
        self.ripples.iter().map(|r| {
            let p = (r.age_ms / self.duration_ms).clamp(0.0, 1.0);
            let eased = 1.0 - (1.0 - p) * (1.0 - p);
            RenderCommand::Ripple {
                center: r.center,
                radius: self.max_radius * eased,
                alpha: 1.0 - p,
            }
        })
    }
}
