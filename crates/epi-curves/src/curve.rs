//! Closed parametric curve families.
//!
//! Each family is a parameter struct with a `point_at(t)` evaluator, a
//! `period()` after which the curve closes, and a `random` constructor that
//! draws parameters known to give a closed, visually interesting figure.

use std::f64::consts::{PI, TAU};

use epi_core::geometry::recenter;
use epi_core::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// The curve families a [`CurveSpec`] can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    Trochoid,
    Lissajous,
    Harmonic,
    Rose,
}

impl CurveKind {
    pub const ALL: [CurveKind; 4] = [
        CurveKind::Trochoid,
        CurveKind::Lissajous,
        CurveKind::Harmonic,
        CurveKind::Rose,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CurveKind::Trochoid => "trochoid",
            CurveKind::Lissajous => "lissajous",
            CurveKind::Harmonic => "harmonic",
            CurveKind::Rose => "rose",
        }
    }
}

/// Hypotrochoid (`epi == false`) or epitrochoid (`epi == true`).
///
/// A point at distance `d` from the centre of a circle of radius `small_r`
/// rolling inside (or outside) a fixed circle of radius `big_r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrochoidParams {
    pub big_r: u32,
    pub small_r: u32,
    pub d: f64,
    pub epi: bool,
}

impl TrochoidParams {
    pub fn point_at(&self, t: f64) -> Point {
        let big = self.big_r as f64;
        let small = (self.small_r as f64).max(1.0);
        if self.epi {
            let sum = big + small;
            let k = sum / small;
            Point::new(
                sum * t.cos() - self.d * (k * t).cos(),
                sum * t.sin() - self.d * (k * t).sin(),
            )
        } else {
            let diff = big - small;
            let k = diff / small;
            Point::new(
                diff * t.cos() + self.d * (k * t).cos(),
                diff * t.sin() - self.d * (k * t).sin(),
            )
        }
    }

    /// The rolling circle returns to its start after `small_r / gcd` turns.
    pub fn period(&self) -> f64 {
        let g = gcd(self.big_r, self.small_r);
        if g == 0 {
            return TAU;
        }
        TAU * (self.small_r / g) as f64
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let big_r = rng.gen_range(3..=9);
        let small_r = rng.gen_range(1..big_r);
        let d = small_r as f64 * rng.gen_range(0.3..1.5);
        Self {
            big_r,
            small_r,
            d,
            epi: rng.gen_bool(0.5),
        }
    }
}

/// `x = A cos(a t + delta)`, `y = A sin(b t)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LissajousParams {
    pub a: u32,
    pub b: u32,
    pub delta: f64,
    pub amplitude: f64,
}

impl LissajousParams {
    pub fn point_at(&self, t: f64) -> Point {
        Point::new(
            self.amplitude * (self.a as f64 * t + self.delta).cos(),
            self.amplitude * (self.b as f64 * t).sin(),
        )
    }

    pub fn period(&self) -> f64 {
        TAU
    }

    /// Coprime, distinct integer ratio so the figure is traced exactly once.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let a = rng.gen_range(1..=5);
            let b = rng.gen_range(1..=5);
            if a != b && gcd(a, b) == 1 {
                return Self {
                    a,
                    b,
                    delta: rng.gen_range(0.0..PI),
                    amplitude: 100.0,
                };
            }
        }
    }
}

/// One rotating term of a [`HarmonicParams`] sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub freq: i32,
    pub amp: f64,
    pub phase: f64,
}

/// A short sum of rotating vectors: `sum amp * exp(i (freq t + phase))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicParams {
    pub harmonics: Vec<Harmonic>,
}

impl HarmonicParams {
    pub const MIN_HARMONICS: usize = 3;
    pub const MAX_HARMONICS: usize = 6;
    const MAX_FREQ: i32 = 7;

    pub fn point_at(&self, t: f64) -> Point {
        self.harmonics
            .iter()
            .map(|h| Point::from_polar(h.amp, h.freq as f64 * t + h.phase))
            .sum()
    }

    pub fn period(&self) -> f64 {
        TAU
    }

    /// A dominant unit circle at `freq = 1` plus smaller distinct harmonics.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let count = rng.gen_range(Self::MIN_HARMONICS..=Self::MAX_HARMONICS);
        let mut harmonics = vec![Harmonic {
            freq: 1,
            amp: 1.0,
            phase: rng.gen_range(0.0..TAU),
        }];

        while harmonics.len() < count {
            let freq = rng.gen_range(-Self::MAX_FREQ..=Self::MAX_FREQ);
            if freq == 0 || harmonics.iter().any(|h| h.freq == freq) {
                continue;
            }
            harmonics.push(Harmonic {
                freq,
                amp: rng.gen_range(0.1..0.5),
                phase: rng.gen_range(0.0..TAU),
            });
        }

        Self { harmonics }
    }
}

/// Rhodonea curve `r = A cos(k theta)` with `k = n / d` in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoseParams {
    pub n: u32,
    pub d: u32,
    pub amplitude: f64,
}

impl RoseParams {
    pub fn point_at(&self, theta: f64) -> Point {
        let k = self.n as f64 / self.d.max(1) as f64;
        let r = self.amplitude * (k * theta).cos();
        Point::new(r * theta.cos(), r * theta.sin())
    }

    /// `pi * d` when `n * d` is odd, otherwise `2 pi * d`.
    pub fn period(&self) -> f64 {
        let d = self.d.max(1);
        if (self.n * d) % 2 == 1 {
            PI * d as f64
        } else {
            TAU * d as f64
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let n = rng.gen_range(1..=7);
            let d = rng.gen_range(1..=4);
            if n != d && gcd(n, d) == 1 {
                return Self { n, d, amplitude: 100.0 };
            }
        }
    }
}

/// A fully parameterised closed curve of one family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveSpec {
    Trochoid(TrochoidParams),
    Lissajous(LissajousParams),
    Harmonic(HarmonicParams),
    Rose(RoseParams),
}

impl CurveSpec {
    pub fn kind(&self) -> CurveKind {
        match self {
            CurveSpec::Trochoid(_) => CurveKind::Trochoid,
            CurveSpec::Lissajous(_) => CurveKind::Lissajous,
            CurveSpec::Harmonic(_) => CurveKind::Harmonic,
            CurveSpec::Rose(_) => CurveKind::Rose,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        match self {
            CurveSpec::Trochoid(p) => p.point_at(t),
            CurveSpec::Lissajous(p) => p.point_at(t),
            CurveSpec::Harmonic(p) => p.point_at(t),
            CurveSpec::Rose(p) => p.point_at(t),
        }
    }

    pub fn period(&self) -> f64 {
        match self {
            CurveSpec::Trochoid(p) => p.period(),
            CurveSpec::Lissajous(p) => p.period(),
            CurveSpec::Harmonic(p) => p.period(),
            CurveSpec::Rose(p) => p.period(),
        }
    }

    /// `count` points at even parameter steps over one period, centroid at the origin.
    ///
    /// The closing point is not repeated: the DFT treats the sequence as periodic.
    pub fn sample(&self, count: usize) -> Vec<Point> {
        if count == 0 {
            return Vec::new();
        }
        let period = self.period();
        let points: Vec<Point> = (0..count)
            .map(|i| self.point_at(period * i as f64 / count as f64))
            .collect();
        recenter(&points)
    }
}
