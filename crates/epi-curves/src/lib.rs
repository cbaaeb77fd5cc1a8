pub mod curve;
pub mod registry;
pub mod generator;

pub use curve::{
    CurveKind, CurveSpec, Harmonic, HarmonicParams, LissajousParams, RoseParams, TrochoidParams,
};
pub use generator::{CurveGenerator, GeneratedCurve};
pub use registry::{build_registry, CurveEntry};
