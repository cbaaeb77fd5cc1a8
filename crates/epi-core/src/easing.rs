use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Timing curve applied to a linear progress value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EaseCurve {
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow finish.
    #[default]
    EaseInOutCubic,
    EaseInOutSine,
    Smoothstep,
}

impl EaseCurve {
    /// Map `progress` (clamped to [0, 1]) through the curve.
    ///
    /// Every curve fixes the endpoints: `apply(0) == 0`, `apply(1) == 1`.
    pub fn apply(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            EaseCurve::Linear => p,
            EaseCurve::EaseInOutCubic => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    let q = -2.0 * p + 2.0;
                    1.0 - q * q * q / 2.0
                }
            }
            EaseCurve::EaseInOutSine => -((PI * p).cos() - 1.0) / 2.0,
            EaseCurve::Smoothstep => p * p * (3.0 - 2.0 * p),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EaseCurve::Linear => "Linear",
            EaseCurve::EaseInOutCubic => "Ease In-Out Cubic",
            EaseCurve::EaseInOutSine => "Ease In-Out Sine",
            EaseCurve::Smoothstep => "Smoothstep",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EaseCurve; 4] = [
        EaseCurve::Linear,
        EaseCurve::EaseInOutCubic,
        EaseCurve::EaseInOutSine,
        EaseCurve::Smoothstep,
    ];

    #[test]
    fn test_endpoints_fixed() {
        for curve in ALL {
            assert!(curve.apply(0.0).abs() < 1e-12, "{} at 0", curve.name());
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{} at 1", curve.name());
        }
    }

    #[test]
    fn test_monotonic() {
        for curve in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = curve.apply(i as f64 / 100.0);
                assert!(v >= prev - 1e-12, "{} not monotonic", curve.name());
                prev = v;
            }
        }
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(EaseCurve::EaseInOutCubic.apply(-1.0), 0.0);
        assert_eq!(EaseCurve::EaseInOutCubic.apply(2.0), 1.0);
    }

    #[test]
    fn test_cubic_midpoint() {
        assert!((EaseCurve::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
