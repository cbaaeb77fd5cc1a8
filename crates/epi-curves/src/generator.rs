use epi_core::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::curve::CurveSpec;
use crate::registry::{build_registry, CurveEntry};

/// A freshly drawn curve: its parameters and its sampled points.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCurve {
    pub spec: CurveSpec,
    pub points: Vec<Point>,
}

/// Draws random closed curves from the registry.
///
/// Each call picks a family uniformly, draws fresh parameters for it and
/// samples `sample_count` points. With a seed the sequence is reproducible.
pub struct CurveGenerator {
    rng: StdRng,
    registry: Vec<CurveEntry>,
    sample_count: usize,
}

impl CurveGenerator {
    pub fn new(sample_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            registry: build_registry(),
            sample_count,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn set_sample_count(&mut self, sample_count: usize) {
        self.sample_count = sample_count;
    }

    /// Draw parameters for a uniformly chosen family.
    pub fn random_spec(&mut self) -> CurveSpec {
        let index = self.rng.gen_range(0..self.registry.len());
        (self.registry[index].constructor)(&mut self.rng)
    }

    pub fn generate(&mut self) -> GeneratedCurve {
        let spec = self.random_spec();
        let points = spec.sample(self.sample_count);
        log::debug!("generated {} curve with {} points", spec.kind().id(), points.len());
        GeneratedCurve { spec, points }
    }

    /// A random closed curve, centred, with exactly `sample_count` points.
    pub fn generate_random_parametric_path(&mut self) -> Vec<Point> {
        self.generate().points
    }
}
