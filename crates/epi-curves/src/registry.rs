use rand::rngs::StdRng;

use crate::curve::{CurveKind, CurveSpec, HarmonicParams, LissajousParams, RoseParams, TrochoidParams};

/// An entry in the curve registry: identity plus a random constructor.
pub struct CurveEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CurveKind,
    pub constructor: fn(&mut StdRng) -> CurveSpec,
}

/// Build the registry of every parametric curve family.
///
/// The generator draws entries uniformly, so each family is equally likely
/// regardless of how many parameter combinations it has.
pub fn build_registry() -> Vec<CurveEntry> {
    vec![
        CurveEntry {
            id: "trochoid",
            name: "Hypotrochoid / Epitrochoid",
            kind: CurveKind::Trochoid,
            constructor: |rng| CurveSpec::Trochoid(TrochoidParams::random(rng)),
        },
        CurveEntry {
            id: "lissajous",
            name: "Lissajous",
            kind: CurveKind::Lissajous,
            constructor: |rng| CurveSpec::Lissajous(LissajousParams::random(rng)),
        },
        CurveEntry {
            id: "harmonic",
            name: "Harmonic Sum",
            kind: CurveKind::Harmonic,
            constructor: |rng| CurveSpec::Harmonic(HarmonicParams::random(rng)),
        },
        CurveEntry {
            id: "rose",
            name: "Rose",
            kind: CurveKind::Rose,
            constructor: |rng| CurveSpec::Rose(RoseParams::random(rng)),
        },
    ]
}

/// Look up a registry entry by id.
pub fn find_entry(id: &str) -> Option<CurveEntry> {
    build_registry().into_iter().find(|e| e.id == id)
}
