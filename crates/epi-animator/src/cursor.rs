//! Cursor-follow mode.
//!
//! While the pointer is active the drawn coefficients blend from the
//! parametric curve toward a small fixed pattern that circles the pointer.
//! The pattern runs on its own rotation clock, so both sets are blended by
//! effective phase (`phase + freq * clock`) rather than raw phase.
//!
//! Offset lifecycle, with blend `b` in [0, 1]:
//! * entering with `0 < b < 1`: per-frequency offsets are re-synced every
//!   frame so the pattern's effective phases match the parametric curve's;
//! * `b` reaches 1: offsets freeze;
//! * frozen offsets survive following, leaving, and re-entering mid-blend;
//! * offsets clear only when `b` is back at exactly 0.

use std::collections::HashMap;

use epi_core::{lerp_angle, wrap_angle, Coefficient, CoefficientSet, Point, RotationClock};

use crate::config::CursorConfig;
use crate::pointer::PointerSnapshot;

/// Frequencies and relative radii of the pattern traced around the pointer.
const PATTERN: [(i32, f64); 3] = [(1, 1.0), (-2, 0.3), (3, 0.12)];

fn pattern_set(radius: f64) -> CoefficientSet {
    PATTERN
        .iter()
        .map(|&(freq, k)| Coefficient::from_polar(freq, radius * k, 0.0))
        .collect()
}

/// What the chains should draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFrame {
    pub coefficients: CoefficientSet,
    pub center: Point,
    pub blend: f64,
}

pub struct CursorFollower {
    config: CursorConfig,
    pattern: CoefficientSet,
    clock: RotationClock,
    blend: f64,
    offsets: Option<HashMap<i32, f64>>,
    frozen: bool,
    position: Option<Point>,
    last_moves: u64,
    idle_ms: f64,
}

impl CursorFollower {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            config: config.clone(),
            pattern: pattern_set(config.pattern_radius),
            clock: RotationClock::new(),
            blend: 0.0,
            offsets: None,
            frozen: false,
            position: None,
            last_moves: 0,
            idle_ms: 0.0,
        }
    }

    pub fn blend(&self) -> f64 {
        self.blend
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn offset(&self, freq: i32) -> Option<f64> {
        self.offsets.as_ref().and_then(|o| o.get(&freq).copied())
    }

    pub fn pattern(&self) -> &CoefficientSet {
        &self.pattern
    }

    fn pointer_active(&mut self, pointer: &PointerSnapshot, dt_ms: f64) -> bool {
        if pointer.moves != self.last_moves {
            self.last_moves = pointer.moves;
            self.idle_ms = 0.0;
        } else {
            self.idle_ms += dt_ms;
        }
        self.config.enabled && pointer.inside && self.idle_ms < self.config.idle_timeout_ms
    }

    fn sync_offsets(&mut self, parametric: &CoefficientSet, t: f64) {
        let tau = self.clock.time();
        let offsets = self
            .pattern
            .iter()
            .map(|p| {
                let offset = parametric
                    .get(p.freq())
                    .map(|c| wrap_angle(c.effective_phase(t) - p.effective_phase(tau)))
                    .unwrap_or(0.0);
                (p.freq(), offset)
            })
            .collect();
        self.offsets = Some(offsets);
    }

    /// Advance one frame and resolve the coefficients and centre to draw.
    ///
    /// `t` is the shared rotation clock after this tick and `step` its
    /// per-tick advance; `home` is the chain centre without a pointer.
    pub fn update(
        &mut self,
        dt_ms: f64,
        pointer: &PointerSnapshot,
        parametric: &CoefficientSet,
        t: f64,
        step: f64,
        home: Point,
    ) -> CursorFrame {
        let active = self.pointer_active(pointer, dt_ms);
        let rate = dt_ms.max(0.0) / self.config.blend_duration_ms;
        self.blend = if active {
            (self.blend + rate).min(1.0)
        } else {
            (self.blend - rate).max(0.0)
        };

        if active {
            let target = pointer.position;
            self.position = Some(match self.position {
                Some(p) => p + (target - p) * self.config.smoothing,
                None => target,
            });
        }

        if self.blend <= 0.0 {
            if self.offsets.is_some() {
                log::debug!("cursor mode left, phase offsets cleared");
            }
            self.offsets = None;
            self.frozen = false;
            self.position = None;
            self.clock.reset();
            return CursorFrame {
                coefficients: parametric.clone(),
                center: home,
                blend: 0.0,
            };
        }

        self.clock.advance(step);
        if (active && !self.frozen) || self.offsets.is_none() {
            self.sync_offsets(parametric, t);
        }
        if self.blend >= 1.0 && !self.frozen {
            self.frozen = true;
            log::debug!("cursor mode entered, phase offsets frozen");
        }

        let center = home.lerp(&self.position.unwrap_or(home), self.blend);
        CursorFrame {
            coefficients: self.blend_with_pattern(parametric, t),
            center,
            blend: self.blend,
        }
    }

    fn blend_with_pattern(&self, parametric: &CoefficientSet, t: f64) -> CoefficientSet {
        let b = self.blend;
        let tau = self.clock.time();
        let pattern_phase = |p: &Coefficient| p.effective_phase(tau) + self.offset(p.freq()).unwrap_or(0.0);
        let mut out = Vec::with_capacity(parametric.len() + self.pattern.len());

        for c in parametric {
            let e1 = c.effective_phase(t);
            let (amp, eff) = match self.pattern.get(c.freq()) {
                Some(p) => (
                    c.amp() + (p.amp() - c.amp()) * b,
                    lerp_angle(e1, pattern_phase(p), b),
                ),
                None => (c.amp() * (1.0 - b), e1),
            };
            out.push(Coefficient::from_polar(c.freq(), amp, wrap_angle(eff - c.freq() as f64 * t)));
        }

        for p in &self.pattern {
            if parametric.get(p.freq()).is_none() {
                let phase = wrap_angle(pattern_phase(p) - p.freq() as f64 * t);
                out.push(Coefficient::from_polar(p.freq(), p.amp() * b, phase));
            }
        }

        let mut set = CoefficientSet::new(out);
        set.sort_by_amplitude();
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 0.01;

    fn follower() -> CursorFollower {
        CursorFollower::new(&CursorConfig {
            enabled: true,
            blend_duration_ms: 100.0,
            smoothing: 1.0,
            pattern_radius: 10.0,
            idle_timeout_ms: 1000.0,
        })
    }

    fn parametric(phase: f64) -> CoefficientSet {
        [
            Coefficient::from_polar(1, 100.0, phase),
            Coefficient::from_polar(5, 20.0, 0.3),
        ]
        .into_iter()
        .collect()
    }

    struct Pointer {
        moves: u64,
    }

    impl Pointer {
        fn at(&mut self, x: f64, y: f64) -> PointerSnapshot {
            self.moves += 1;
            PointerSnapshot { position: Point::new(x, y), inside: true, moves: self.moves }
        }

        fn gone(&self) -> PointerSnapshot {
            PointerSnapshot { position: Point::ZERO, inside: false, moves: self.moves }
        }
    }

    #[test]
    fn test_disabled_passes_through() {
        let mut f = CursorFollower::new(&CursorConfig::default());
        let mut ptr = Pointer { moves: 0 };
        let set = parametric(0.4);
        let out = f.update(16.0, &ptr.at(5.0, 5.0), &set, 1.0, STEP, Point::new(50.0, 50.0));
        assert_eq!(out.coefficients, set);
        assert_eq!(out.center, Point::new(50.0, 50.0));
        assert_eq!(out.blend, 0.0);
    }

    #[test]
    fn test_entering_resyncs_then_freezes() {
        let mut f = follower();
        let mut ptr = Pointer { moves: 0 };
        let mut t = 0.0;

        t += STEP;
        f.update(25.0, &ptr.at(1.0, 1.0), &parametric(0.0), t, STEP, Point::ZERO);
        assert!((f.blend() - 0.25).abs() < 1e-12);
        assert!(!f.is_frozen());

        // parametric phase moves; offsets follow while blending in
        t += STEP;
        let out = f.update(25.0, &ptr.at(1.0, 1.0), &parametric(0.7), t, STEP, Point::ZERO);
        let c = out.coefficients.get(1).unwrap();
        assert!((wrap_angle(c.phase() - 0.7)).abs() < 1e-9, "shared freq keeps parametric phase");

        for _ in 0..2 {
            t += STEP;
            f.update(25.0, &ptr.at(1.0, 1.0), &parametric(0.7), t, STEP, Point::ZERO);
        }
        assert_eq!(f.blend(), 1.0);
        assert!(f.is_frozen());
        let frozen = f.offset(1).unwrap();

        t += STEP;
        f.update(25.0, &ptr.at(1.0, 1.0), &parametric(-2.0), t, STEP, Point::ZERO);
        assert_eq!(f.offset(1), Some(frozen));
    }

    #[test]
    fn test_full_blend_is_pattern() {
        let mut f = follower();
        let mut ptr = Pointer { moves: 0 };
        let out = f.update(200.0, &ptr.at(30.0, 40.0), &parametric(0.0), 0.5, STEP, Point::ZERO);
        assert_eq!(out.blend, 1.0);
        assert_eq!(out.center, Point::new(30.0, 40.0));
        assert!((out.coefficients.get(1).unwrap().amp() - 10.0).abs() < 1e-12);
        assert!(out.coefficients.get(5).unwrap().amp().abs() < 1e-12);
        assert!((out.coefficients.get(-2).unwrap().amp() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_leaving_keeps_offsets_until_zero() {
        let mut f = follower();
        let mut ptr = Pointer { moves: 0 };
        f.update(100.0, &ptr.at(0.0, 0.0), &parametric(0.0), 0.1, STEP, Point::ZERO);
        assert!(f.is_frozen());
        let frozen = f.offset(1);

        f.update(50.0, &ptr.gone(), &parametric(1.0), 0.2, STEP, Point::ZERO);
        assert!((f.blend() - 0.5).abs() < 1e-12);
        assert_eq!(f.offset(1), frozen);

        // re-entering mid-blend does not re-sync
        f.update(25.0, &ptr.at(0.0, 0.0), &parametric(2.0), 0.3, STEP, Point::ZERO);
        assert_eq!(f.offset(1), frozen);
        assert!(f.is_frozen());

        f.update(200.0, &ptr.gone(), &parametric(2.0), 0.4, STEP, Point::ZERO);
        assert_eq!(f.blend(), 0.0);
        assert_eq!(f.offset(1), None);
        assert!(!f.is_frozen());
    }

    #[test]
    fn test_idle_pointer_releases() {
        let mut f = follower();
        let mut ptr = Pointer { moves: 0 };
        let still = ptr.at(0.0, 0.0);
        f.update(100.0, &still, &parametric(0.0), 0.1, STEP, Point::ZERO);
        assert_eq!(f.blend(), 1.0);
        // no further movement: idle after 1000 ms
        for _ in 0..10 {
            f.update(100.0, &still, &parametric(0.0), 0.1, STEP, Point::ZERO);
        }
        assert!(f.blend() < 1.0);
    }

    #[test]
    fn test_smoothed_center() {
        let mut f = CursorFollower::new(&CursorConfig {
            enabled: true,
            smoothing: 0.5,
            blend_duration_ms: 1.0,
            ..CursorConfig::default()
        });
        let mut ptr = Pointer { moves: 0 };
        f.update(16.0, &ptr.at(0.0, 0.0), &parametric(0.0), 0.0, STEP, Point::ZERO);
        let out = f.update(16.0, &ptr.at(10.0, 0.0), &parametric(0.0), 0.0, STEP, Point::ZERO);
        assert_eq!(out.center, Point::new(5.0, 0.0));
    }
}
