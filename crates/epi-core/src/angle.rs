use std::f64::consts::{PI, TAU};

/// Wrap an angle into (-pi, pi].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle - TAU * ((angle + PI) / TAU).floor();
    // floor puts exact odd multiples of pi at -pi; fold them onto +pi
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed shortest rotation that takes `from` onto `to`, in (-pi, pi].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Interpolate between two angles along the shortest arc.
///
/// The result is not re-wrapped, so `lerp_angle(a, b, 0.0) == a` exactly.
pub fn lerp_angle(from: f64, to: f64, t: f64) -> f64 {
    from + shortest_delta(from, to) * t
}

/// Rotation clock shared by every epicycle chain.
///
/// Advances by a fixed step per frame, independent of wall-clock time, and
/// is never wrapped: `freq * t` must stay continuous for every integer freq.
#[derive(Debug, Clone, Default)]
pub struct RotationClock {
    t: f64,
}

impl RotationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, step: f64) -> f64 {
        self.t += step;
        self.t
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn reset(&mut self) {
        self.t = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert!(wrap_angle(4.0 * PI).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shortest_delta_crosses_seam() {
        let from = PI - 0.01;
        let to = -PI + 0.01;
        let d = shortest_delta(from, to);
        assert!((d - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_angle_short_path() {
        let from = PI - 0.01;
        let to = -PI + 0.01;
        let mut travelled = 0.0;
        let mut prev = from;
        for i in 1..=10 {
            let a = lerp_angle(from, to, i as f64 / 10.0);
            travelled += (a - prev).abs();
            prev = a;
        }
        assert!(travelled < 0.1);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = RotationClock::new();
        for _ in 0..100 {
            clock.advance(0.01);
        }
        assert!((clock.time() - 1.0).abs() < 1e-9);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
    }
}
