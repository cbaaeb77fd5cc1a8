//! Timed cross-fade between two coefficient sets.

use std::collections::HashMap;

use epi_core::{lerp_angle, Coefficient, CoefficientSet, EaseCurve};

enum TransitionState {
    Settled,
    Transitioning {
        previous: CoefficientSet,
        elapsed_ms: f64,
    },
}

/// Owns the current and previous coefficient sets and the fade between them.
///
/// Every snapshot handed out is a fresh value; nothing outside can mutate
/// the sets mid-transition.
pub struct TransitionManager {
    current: CoefficientSet,
    state: TransitionState,
    duration_ms: f64,
    easing: EaseCurve,
}

impl TransitionManager {
    pub fn new(duration_ms: f64, easing: EaseCurve) -> Self {
        Self {
            current: CoefficientSet::empty(),
            state: TransitionState::Settled,
            duration_ms,
            easing,
        }
    }

    pub fn current(&self) -> &CoefficientSet {
        &self.current
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    /// Linear progress in [0, 1]; 1 when settled.
    pub fn progress(&self) -> f64 {
        match &self.state {
            TransitionState::Settled => 1.0,
            TransitionState::Transitioning { elapsed_ms, .. } => {
                (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
            }
        }
    }

    pub fn set_duration(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
    }

    pub fn set_easing(&mut self, easing: EaseCurve) {
        self.easing = easing;
    }

    /// Replace the current set without a fade, abandoning any transition.
    pub fn set_immediate(&mut self, set: CoefficientSet) {
        self.current = set;
        self.state = TransitionState::Settled;
    }

    /// Start fading from the current set to `next`.
    ///
    /// Refused (returns `false`) while a transition is already running.
    pub fn begin(&mut self, next: CoefficientSet) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.state = TransitionState::Transitioning { previous, elapsed_ms: 0.0 };
        log::debug!("transition started ({:.0} ms)", self.duration_ms);
        true
    }

    /// Advance wall-clock time. Returns `true` on the call that settles.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let TransitionState::Transitioning { elapsed_ms, .. } = &mut self.state else {
            return false;
        };
        *elapsed_ms += dt_ms.max(0.0);
        if *elapsed_ms >= self.duration_ms {
            self.state = TransitionState::Settled;
            log::debug!("transition settled");
            return true;
        }
        false
    }

    /// The coefficient set to draw this frame.
    pub fn interpolated(&self) -> CoefficientSet {
        match &self.state {
            TransitionState::Settled => self.current.clone(),
            TransitionState::Transitioning { previous, .. } => {
                let t = self.easing.apply(self.progress());
                interpolate_sets(previous, &self.current, t)
            }
        }
    }

    /// Multiply every amplitude by `factor`, e.g. after a viewport resize.
    ///
    /// An in-progress transition keeps its progress.
    pub fn rescale(&mut self, factor: f64) {
        self.current = self.current.scaled(factor);
        if let TransitionState::Transitioning { previous, .. } = &mut self.state {
            *previous = previous.scaled(factor);
        }
    }
}

/// Blend two coefficient sets at eased progress `t`.
///
/// Frequencies in both sets lerp amplitude and take the shortest arc in
/// phase; frequencies in only one fade out (`amp * (1 - t)`) or in
/// (`amp * t`) with their phase unchanged. The result is sorted by
/// descending amplitude.
pub fn interpolate_sets(previous: &CoefficientSet, current: &CoefficientSet, t: f64) -> CoefficientSet {
    let t = t.clamp(0.0, 1.0);
    let by_freq: HashMap<i32, &Coefficient> = current.iter().map(|c| (c.freq(), c)).collect();
    let mut out = Vec::with_capacity(previous.len() + current.len());

    for prev in previous {
        match by_freq.get(&prev.freq()) {
            Some(cur) => {
                let amp = prev.amp() + (cur.amp() - prev.amp()) * t;
                let phase = lerp_angle(prev.phase(), cur.phase(), t);
                out.push(Coefficient::from_polar(prev.freq(), amp, phase));
            }
            None => out.push(prev.scaled(1.0 - t)),
        }
    }

    for cur in current {
        if previous.get(cur.freq()).is_none() {
            out.push(cur.scaled(t));
        }
    }

    let mut set = CoefficientSet::new(out);
    set.sort_by_amplitude();
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn set(coeffs: &[(i32, f64, f64)]) -> CoefficientSet {
        coeffs
            .iter()
            .map(|&(f, a, p)| Coefficient::from_polar(f, a, p))
            .collect()
    }

    #[test]
    fn test_settled_returns_current() {
        let mut tm = TransitionManager::new(1000.0, EaseCurve::Linear);
        tm.set_immediate(set(&[(1, 5.0, 0.0)]));
        assert!(!tm.is_transitioning());
        assert_eq!(tm.interpolated(), *tm.current());
        assert_eq!(tm.progress(), 1.0);
    }

    #[test]
    fn test_endpoints() {
        let a = set(&[(1, 10.0, 0.5), (2, 4.0, 1.0)]);
        let b = set(&[(1, 6.0, -0.5), (-3, 2.0, 2.0)]);

        let start = interpolate_sets(&a, &b, 0.0);
        assert!((start.get(1).unwrap().amp() - 10.0).abs() < 1e-12);
        assert!((start.get(1).unwrap().phase() - 0.5).abs() < 1e-12);
        assert!((start.get(2).unwrap().amp() - 4.0).abs() < 1e-12);
        assert!(start.get(-3).unwrap().amp().abs() < 1e-12);

        let end = interpolate_sets(&a, &b, 1.0);
        assert!((end.get(1).unwrap().amp() - 6.0).abs() < 1e-12);
        assert!((end.get(1).unwrap().phase() + 0.5).abs() < 1e-12);
        assert!(end.get(2).unwrap().amp().abs() < 1e-12);
        assert!((end.get(-3).unwrap().amp() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_phase_takes_shortest_arc() {
        let a = set(&[(1, 1.0, PI - 0.1)]);
        let b = set(&[(1, 1.0, -PI + 0.1)]);
        let mid = interpolate_sets(&a, &b, 0.5);
        let phase = mid.get(1).unwrap().phase();
        // across the seam, not through zero
        assert!(phase.abs() > PI - 0.01, "phase {phase}");
    }

    #[test]
    fn test_fades_keep_phase() {
        let a = set(&[(4, 2.0, 1.2)]);
        let b = set(&[(5, 3.0, -0.7)]);
        let mid = interpolate_sets(&a, &b, 0.25);
        let out = mid.get(4).unwrap();
        assert!((out.amp() - 1.5).abs() < 1e-12);
        assert!((out.phase() - 1.2).abs() < 1e-12);
        let incoming = mid.get(5).unwrap();
        assert!((incoming.amp() - 0.75).abs() < 1e-12);
        assert!((incoming.phase() + 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_result_sorted_by_amplitude() {
        let a = set(&[(1, 1.0, 0.0), (2, 8.0, 0.0)]);
        let b = set(&[(1, 9.0, 0.0), (3, 5.0, 0.0)]);
        let mid = interpolate_sets(&a, &b, 0.5);
        let amps: Vec<f64> = mid.iter().map(|c| c.amp()).collect();
        for w in amps.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut tm = TransitionManager::new(100.0, EaseCurve::Linear);
        tm.set_immediate(set(&[(1, 1.0, 0.0)]));
        assert!(tm.begin(set(&[(1, 3.0, 0.0)])));
        assert!(!tm.begin(set(&[(1, 9.0, 0.0)])), "second begin must be refused");

        assert!(!tm.advance(40.0));
        assert!((tm.progress() - 0.4).abs() < 1e-12);
        assert!((tm.interpolated().get(1).unwrap().amp() - 1.8).abs() < 1e-12);

        assert!(tm.advance(60.0));
        assert!(!tm.is_transitioning());
        assert!((tm.interpolated().get(1).unwrap().amp() - 3.0).abs() < 1e-12);
        assert!(!tm.advance(10.0));
    }

    #[test]
    fn test_rescale_mid_transition() {
        let mut tm = TransitionManager::new(100.0, EaseCurve::Linear);
        tm.set_immediate(set(&[(1, 2.0, 0.0)]));
        tm.begin(set(&[(1, 4.0, 0.0)]));
        tm.advance(50.0);
        tm.rescale(0.5);
        assert!(tm.is_transitioning());
        assert!((tm.interpolated().get(1).unwrap().amp() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut tm = TransitionManager::new(100.0, EaseCurve::Linear);
        tm.set_immediate(set(&[(1, 2.0, 0.0)]));
        let snapshot = tm.interpolated();
        tm.rescale(10.0);
        assert!((snapshot.get(1).unwrap().amp() - 2.0).abs() < 1e-12);
    }
}
