pub mod point;
pub mod coefficient;
pub mod geometry;
pub mod dft;
pub mod mask;
pub mod contour;
pub mod angle;
pub mod easing;

pub use point::{ComplexSample, Point};
pub use coefficient::{Coefficient, CoefficientSet};
pub use geometry::{convex_hull, resample, signed_area, SimilarityTransform};
pub use dft::{compute_coefficients, dft, reorder_frequencies, select_terms};
pub use mask::Mask;
pub use contour::trace_contour;
pub use angle::{lerp_angle, wrap_angle, RotationClock};
pub use easing::EaseCurve;
