//! Direct discrete Fourier transform over closed polylines.
//!
//! The transform is the normalised forward DFT,
//! `X[k] = (1/N) * sum_n x[n] * exp(-2*pi*i*k*n/N)`, computed by direct
//! summation. It only runs when a new source curve arrives, so O(N^2) at a
//! few hundred samples is fine.

use std::f64::consts::TAU;

use crate::coefficient::{Coefficient, CoefficientSet};
use crate::geometry::{normalize_radius, recenter};
use crate::point::{to_samples, ComplexSample, Point};

/// Default number of epicycles kept after truncation.
pub const DEFAULT_TERMS: usize = 80;

/// Forward DFT in raw output order: entry `k` has `freq == k` for k in [0, N).
pub fn dft(samples: &[ComplexSample]) -> Vec<Coefficient> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }
    let inv_n = 1.0 / n as f64;

    (0..n)
        .map(|k| {
            let sum: ComplexSample = samples
                .iter()
                .enumerate()
                // k * i mod n keeps the angle small for large N
                .map(|(i, x)| x * ComplexSample::cis(-TAU * ((k * i) % n) as f64 * inv_n))
                .sum();
            Coefficient::from_value(k as i32, sum * inv_n)
        })
        .collect()
}

/// Remap raw DFT output to signed frequencies in (-N/2, N/2].
///
/// The result is `[DC, +1, -1, +2, -2, ...]`. For even N the Nyquist bin
/// (k = N/2) appears once, as `+N/2`, so the output always has exactly N
/// entries and inverts exactly.
pub fn reorder_frequencies(raw: &[Coefficient]) -> Vec<Coefficient> {
    let n = raw.len();
    if n == 0 {
        return Vec::new();
    }

    let mut reordered = Vec::with_capacity(n);
    reordered.push(raw[0].with_freq(0));

    for k in 1..=n / 2 {
        reordered.push(raw[k].with_freq(k as i32));
        let neg_k = n - k;
        if neg_k != k {
            reordered.push(raw[neg_k].with_freq(-(k as i32)));
        }
    }

    reordered
}

/// Drop DC, sort by descending amplitude, keep the largest `terms`.
pub fn select_terms(coeffs: &[Coefficient], terms: usize) -> CoefficientSet {
    let mut set: CoefficientSet = coeffs.iter().filter(|c| c.freq() != 0).copied().collect();
    set.sort_by_amplitude();
    set.into_iter().take(terms).collect()
}

/// Signed-frequency DFT of a polyline, all N coefficients, DC included.
pub fn transform_points(points: &[Point]) -> Vec<Coefficient> {
    reorder_frequencies(&dft(&to_samples(points)))
}

/// The full source-to-epicycles step: centre the curve on its centroid,
/// scale it so its farthest sample sits at `target_radius`, transform, then
/// truncate to `terms`.
pub fn compute_coefficients(points: &[Point], terms: usize, target_radius: f64) -> CoefficientSet {
    let scaled = normalize_radius(&recenter(points), target_radius);
    let set = select_terms(&transform_points(&scaled), terms);
    log::debug!(
        "computed {} epicycles from {} samples (target radius {:.1})",
        set.len(),
        points.len(),
        target_radius
    );
    set
}

/// Inverse transform evaluated at the `n` sample instants `t = 2*pi*j/n`.
///
/// With every coefficient from [`transform_points`] this reproduces the input.
pub fn reconstruct(coeffs: &[Coefficient], n: usize) -> Vec<Point> {
    (0..n)
        .map(|j| {
            let t = TAU * j as f64 / n as f64;
            coeffs.iter().map(|c| c.vector_at(t)).sum()
        })
        .collect()
}

/// Mean squared distance between two equal-length point sequences.
pub fn mean_squared_error(a: &[Point], b: &[Point]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return f64::INFINITY;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(p, q)| {
            let d = *p - *q;
            d.dot(&d)
        })
        .sum();
    sum / a.len() as f64
}
