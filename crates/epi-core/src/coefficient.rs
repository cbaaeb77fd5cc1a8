use crate::point::{ComplexSample, Point};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// One frequency component of a closed curve: a vector of length `amp`
/// rotating `freq` times per period, starting at angle `phase`.
///
/// The complex value and its `amp`/`phase` polar view are kept together.
/// The fields are private so every mutation goes through a constructor or
/// setter that rebuilds the other view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    freq: i32,
    value: ComplexSample,
    amp: f64,
    phase: f64,
}

impl Coefficient {
    /// Build from a complex value.
    pub fn from_value(freq: i32, value: ComplexSample) -> Self {
        let (amp, phase) = value.to_polar();
        Self { freq, value, amp, phase }
    }

    /// Build from the rectangular form.
    pub fn from_complex(freq: i32, re: f64, im: f64) -> Self {
        Self::from_value(freq, ComplexSample::new(re, im))
    }

    /// Build from the polar form.
    pub fn from_polar(freq: i32, amp: f64, phase: f64) -> Self {
        Self {
            freq,
            value: ComplexSample::from_polar(amp, phase),
            amp,
            phase,
        }
    }

    pub fn freq(&self) -> i32 {
        self.freq
    }

    pub fn re(&self) -> f64 {
        self.value.re
    }

    pub fn im(&self) -> f64 {
        self.value.im
    }

    pub fn amp(&self) -> f64 {
        self.amp
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn as_complex(&self) -> ComplexSample {
        self.value
    }

    /// Same value under a different harmonic index.
    pub fn with_freq(&self, freq: i32) -> Self {
        Self { freq, ..*self }
    }

    pub fn set_polar(&mut self, amp: f64, phase: f64) {
        *self = Self::from_polar(self.freq, amp, phase);
    }

    pub fn set_complex(&mut self, re: f64, im: f64) {
        *self = Self::from_complex(self.freq, re, im);
    }

    /// Amplitude scaled by `factor`, phase untouched.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            freq: self.freq,
            value: self.value * factor,
            amp: self.amp * factor,
            phase: self.phase,
        }
    }

    /// Angle of the rotating vector at time `t`: `phase + freq * t`.
    pub fn effective_phase(&self, t: f64) -> f64 {
        self.phase + self.freq as f64 * t
    }

    /// The rotating vector at time `t`: `value * e^(i * freq * t)`.
    pub fn vector_at(&self, t: f64) -> Point {
        (self.value * ComplexSample::cis(self.freq as f64 * t)).into()
    }
}

/// Descending amplitude, ties broken by ascending |freq| then positive first.
fn amplitude_order(a: &Coefficient, b: &Coefficient) -> Ordering {
    b.amp
        .total_cmp(&a.amp)
        .then_with(|| construction_order(a, b))
}

/// Ascending |freq|, positive before negative at equal magnitude.
fn construction_order(a: &Coefficient, b: &Coefficient) -> Ordering {
    a.freq
        .unsigned_abs()
        .cmp(&b.freq.unsigned_abs())
        .then_with(|| b.freq.cmp(&a.freq))
}

/// The Fourier description of one closed curve: coefficients unique by `freq`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    coeffs: Vec<Coefficient>,
}

impl CoefficientSet {
    /// Build a set, keeping the first coefficient seen for each frequency.
    pub fn new(coeffs: Vec<Coefficient>) -> Self {
        let mut seen = HashSet::with_capacity(coeffs.len());
        let coeffs = coeffs.into_iter().filter(|c| seen.insert(c.freq)).collect();
        Self { coeffs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coefficient> {
        self.coeffs.iter()
    }

    pub fn as_slice(&self) -> &[Coefficient] {
        &self.coeffs
    }

    pub fn get(&self, freq: i32) -> Option<&Coefficient> {
        self.coeffs.iter().find(|c| c.freq == freq)
    }

    pub fn frequencies(&self) -> Vec<i32> {
        self.coeffs.iter().map(|c| c.freq).collect()
    }

    /// Sort in place by descending amplitude.
    pub fn sort_by_amplitude(&mut self) {
        self.coeffs.sort_by(amplitude_order);
    }

    /// Coefficients in rendering order: ascending |freq|, +f before -f.
    pub fn construction_order(&self) -> Vec<Coefficient> {
        let mut ordered = self.coeffs.clone();
        ordered.sort_by(construction_order);
        ordered
    }

    pub fn max_amplitude(&self) -> f64 {
        self.coeffs.iter().map(|c| c.amp).fold(0.0, f64::max)
    }

    /// Sum of all amplitudes: an upper bound on the traced radius.
    pub fn total_amplitude(&self) -> f64 {
        self.coeffs.iter().map(|c| c.amp).sum()
    }

    /// Every amplitude multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c.scaled(factor)).collect(),
        }
    }

    /// Tip position of the full epicycle chain at time `t` (origin-centred).
    pub fn evaluate(&self, t: f64) -> Point {
        self.coeffs.iter().map(|c| c.vector_at(t)).sum()
    }
}

impl FromIterator<Coefficient> for CoefficientSet {
    fn from_iter<I: IntoIterator<Item = Coefficient>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CoefficientSet {
    type Item = Coefficient;
    type IntoIter = std::vec::IntoIter<Coefficient>;

    fn into_iter(self) -> Self::IntoIter {
        self.coeffs.into_iter()
    }
}

impl<'a> IntoIterator for &'a CoefficientSet {
    type Item = &'a Coefficient;
    type IntoIter = std::slice::Iter<'a, Coefficient>;

    fn into_iter(self) -> Self::IntoIter {
        self.coeffs.iter()
    }
}
