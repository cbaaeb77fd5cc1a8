//! Pure polyline utilities: arclength resampling, convex hull, signed area,
//! radius normalisation and least-squares similarity fitting.
//!
//! Degenerate input is never an error here. Functions hand back their input
//! (or an identity transform) and let the caller carry on.

use crate::point::Point;

/// Below this, lengths and norms count as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Arithmetic mean of the points, or the origin for an empty slice.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    points.iter().copied().sum::<Point>() / points.len() as f64
}

/// Translate the points so their centroid is the origin.
pub fn recenter(points: &[Point]) -> Vec<Point> {
    let c = centroid(points);
    points.iter().map(|p| *p - c).collect()
}

/// Axis-aligned bounds as `(min, max)`.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Largest distance of any point from the origin.
pub fn max_radius(points: &[Point]) -> f64 {
    points.iter().map(|p| p.magnitude()).fold(0.0, f64::max)
}

/// Uniformly scale about the origin so the farthest point lands on `target`.
///
/// A curve with zero radius is returned unchanged.
pub fn normalize_radius(points: &[Point], target: f64) -> Vec<Point> {
    let r = max_radius(points);
    if r < GEOMETRY_EPSILON {
        return points.to_vec();
    }
    let k = target / r;
    points.iter().map(|p| *p * k).collect()
}

/// Perimeter of the polyline treated as closed.
pub fn closed_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    open + points[points.len() - 1].distance(&points[0])
}

/// Resample a closed polyline to exactly `n` points evenly spaced by arclength.
///
/// The first output point is the first input point; the closing edge from
/// the last point back to the first is part of the path. The result is
/// recentred on its centroid. Fewer than two points, `n == 0`, or a
/// zero-length path return the input unchanged.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    if points.len() < 2 || n == 0 {
        return points.to_vec();
    }

    let m = points.len();
    let mut dists = Vec::with_capacity(m);
    dists.push(0.0);
    let mut total = 0.0;
    for w in points.windows(2) {
        total += w[0].distance(&w[1]);
        dists.push(total);
    }
    total += points[m - 1].distance(&points[0]);

    if total < GEOMETRY_EPSILON {
        return points.to_vec();
    }

    let step = total / n as f64;
    let mut out = Vec::with_capacity(n);
    let mut seg = 0;

    for j in 0..n {
        let target = j as f64 * step;
        while seg < m - 1 && dists[seg + 1] < target {
            seg += 1;
        }

        let a = points[seg];
        let (b, seg_end) = if seg + 1 < m {
            (points[seg + 1], dists[seg + 1])
        } else {
            (points[0], total)
        };
        let seg_len = seg_end - dists[seg];
        let t = if seg_len > GEOMETRY_EPSILON {
            ((target - dists[seg]) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(a.lerp(&b, t));
    }

    recenter(&out)
}

/// Convex hull by Graham scan.
///
/// The pivot is the lowest point (smallest y, then smallest x). Remaining
/// points are sorted by polar angle about the pivot, ties by ascending
/// distance. The hull is returned counter-clockwise starting at the pivot;
/// collinear boundary points are dropped. Fewer than three points come back
/// as a copy.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut pts = points.to_vec();
    let mut bottom = 0;
    for (i, p) in pts.iter().enumerate().skip(1) {
        let b = pts[bottom];
        if p.y < b.y || (p.y == b.y && p.x < b.x) {
            bottom = i;
        }
    }
    pts.swap(0, bottom);

    let pivot = pts[0];
    pts.sort_by(|a, b| {
        let angle_a = (a.y - pivot.y).atan2(a.x - pivot.x);
        let angle_b = (b.y - pivot.y).atan2(b.x - pivot.x);
        angle_a
            .total_cmp(&angle_b)
            .then_with(|| pivot.distance(a).total_cmp(&pivot.distance(b)))
    });

    let mut hull: Vec<Point> = vec![pts[0], pts[1]];
    for &p in &pts[2..] {
        while hull.len() > 1 {
            let p1 = hull[hull.len() - 2];
            let p2 = hull[hull.len() - 1];
            if (p2 - p1).cross(&(p - p1)) <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(p);
    }

    hull
}

/// Shoelace area over consecutive vertex pairs. Positive means
/// counter-clockwise winding (y-up).
///
/// No closing edge is added: pass the first vertex again at the end to
/// measure the closed polygon.
pub fn signed_area(polygon: &[Point]) -> f64 {
    let twice: f64 = polygon.windows(2).map(|w| w[0].cross(&w[1])).sum();
    twice / 2.0
}

/// The polyline with counter-clockwise winding, reversing it if needed.
///
/// Winding is judged on the closed polygon.
pub fn ensure_ccw(points: &[Point]) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut closed = points.to_vec();
    closed.push(first);
    if signed_area(&closed) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// RMS distance of the convex hull vertices from their centroid.
///
/// Used as a scale measure that ignores interior detail. Near-zero hulls
/// report 1.0 so callers can divide by it unconditionally.
pub fn hull_radius(points: &[Point]) -> f64 {
    let hull = convex_hull(points);
    if hull.is_empty() {
        return 1.0;
    }
    let c = centroid(&hull);
    let mean_sq = hull.iter().map(|p| (*p - c).dot(&(*p - c))).sum::<f64>() / hull.len() as f64;
    let r = mean_sq.sqrt();
    if r < GEOMETRY_EPSILON {
        1.0
    } else {
        r
    }
}

/// Scale + rotation + translation: `p -> scale * R(rotation) * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityTransform {
    pub scale: f64,
    pub rotation: f64,
    pub translation: Point,
}

impl Default for SimilarityTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SimilarityTransform {
    pub const fn identity() -> Self {
        Self { scale: 1.0, rotation: 0.0, translation: Point::ZERO }
    }

    /// Least-squares fit of the transform mapping `src[i]` onto `dst[i]`.
    ///
    /// Treating centred points as complex numbers, the optimum is
    /// `z = sum(conj(a) * b) / sum(|a|^2)`. Mismatched lengths, fewer than two
    /// points, or a near-zero denominator yield the identity; a near-zero `z`
    /// keeps scale 1 and no rotation but still aligns the centroids.
    pub fn fit(src: &[Point], dst: &[Point]) -> Self {
        if src.len() != dst.len() || src.len() < 2 {
            return Self::identity();
        }

        let cs = centroid(src);
        let cd = centroid(dst);
        let mut denom = 0.0;
        let mut num_re = 0.0;
        let mut num_im = 0.0;
        for (s, d) in src.iter().zip(dst) {
            let a = *s - cs;
            let b = *d - cd;
            denom += a.dot(&a);
            num_re += a.dot(&b);
            num_im += a.cross(&b);
        }

        if denom < GEOMETRY_EPSILON {
            return Self::identity();
        }

        let norm = num_re.hypot(num_im);
        let (scale, rotation) = if norm < GEOMETRY_EPSILON {
            (1.0, 0.0)
        } else {
            (norm / denom, num_im.atan2(num_re))
        };

        let translation = cd - cs.rotated(rotation) * scale;
        Self { scale, rotation, translation }
    }

    pub fn apply(&self, p: Point) -> Point {
        p.rotated(self.rotation) * self.scale + self.translation
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply(*p)).collect()
    }
}

/// Rotate `candidate` about its centroid to best match `reference`.
///
/// Both curves are compared at hull-normalised scale so a raw size mismatch
/// does not bias the fit. Only the rotation is applied; size and position
/// of `candidate` are kept. Mismatched lengths return `candidate` unchanged.
pub fn align_rotation(reference: &[Point], candidate: &[Point]) -> Vec<Point> {
    if reference.len() != candidate.len() || candidate.len() < 2 {
        return candidate.to_vec();
    }

    let c = centroid(candidate);
    let cand = recenter(candidate);
    let refc = recenter(reference);
    let ks = 1.0 / hull_radius(&cand);
    let kr = 1.0 / hull_radius(&refc);
    let cand_n: Vec<Point> = cand.iter().map(|p| *p * ks).collect();
    let ref_n: Vec<Point> = refc.iter().map(|p| *p * kr).collect();

    let fit = SimilarityTransform::fit(&cand_n, &ref_n);
    cand.iter().map(|p| p.rotated(fit.rotation) + c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn circle(n: usize, r: f64) -> Vec<Point> {
        (0..n)
            .map(|i| Point::from_polar(r, TAU * i as f64 / n as f64))
            .collect()
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 3.0)]);
        assert!(c.approx_eq(&Point::new(1.0, 1.0), 1e-12));
        assert_eq!(centroid(&[]), Point::ZERO);
    }

    #[test]
    fn test_resample_count_and_centre() {
        let pts = vec![
            Point::new(10.0, 10.0),
            Point::new(14.0, 10.0),
            Point::new(14.0, 13.0),
        ];
        let out = resample(&pts, 37);
        assert_eq!(out.len(), 37);
        assert!(centroid(&out).approx_eq(&Point::ZERO, 1e-9));
    }

    #[test]
    fn test_resample_even_spacing() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let out = resample(&square, 8);
        for i in 0..8 {
            let d = out[i].distance(&out[(i + 1) % 8]);
            assert!((d - 0.5).abs() < 1e-9, "gap {i} = {d}");
        }
    }

    #[test]
    fn test_resample_degenerate() {
        assert!(resample(&[], 10).is_empty());
        let single = vec![Point::new(3.0, 4.0)];
        assert_eq!(resample(&single, 10), single);
        let same = vec![Point::new(1.0, 1.0); 5];
        assert_eq!(resample(&same, 10), same);
    }

    #[test]
    fn test_resample_idempotent() {
        let square = vec![
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
        ];
        let once = resample(&square, 40);
        let twice = resample(&once, 40);
        for (a, b) in once.iter().zip(&twice) {
            assert!(a.approx_eq(b, 1e-9), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_resample_idempotent_smooth_curve() {
        let once = resample(&circle(1000, 50.0), 120);
        let twice = resample(&once, 120);
        for (a, b) in once.iter().zip(&twice) {
            assert!(a.approx_eq(b, 0.05), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_hull_square_with_interior() {
        let pts = vec![
            Point::new(1.0, 1.0),
            Point::new(4.0, 4.0),
            Point::new(2.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(3.0, 2.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 0.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(
            hull,
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
            ]
        );
        assert!(signed_area(&hull) > 0.0);
    }

    #[test]
    fn test_hull_convex_position_keeps_all() {
        let pentagon = circle(5, 3.0);
        let hull = convex_hull(&pentagon);
        assert_eq!(hull.len(), 5);
        for p in &pentagon {
            assert!(hull.iter().any(|h| h.approx_eq(p, 1e-12)));
        }
    }

    #[test]
    fn test_hull_tolerates_nan() {
        let mut pts = circle(8, 2.0);
        pts.push(Point::new(f64::NAN, 0.5));
        let hull = convex_hull(&pts);
        assert!(hull.len() >= 3);
    }

    #[test]
    fn test_hull_small_input() {
        let two = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(convex_hull(&two), two);
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);
        let cw: Vec<Point> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
        assert_eq!(ensure_ccw(&cw), ccw);
        assert_eq!(ensure_ccw(&ccw), ccw);
    }

    #[test]
    fn test_signed_area_open_unless_closed() {
        let square = vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0),
        ];
        assert!((signed_area(&square) - 5.0).abs() < 1e-12);
        let mut closed = square.clone();
        closed.push(square[0]);
        assert!((signed_area(&closed) - 4.0).abs() < 1e-12);
        assert_eq!(signed_area(&square[..2]), 0.0);
    }

    #[test]
    fn test_ensure_ccw_uses_closing_edge() {
        // open-sum is positive here, closed winding is clockwise
        let cw = vec![Point::new(10.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 10.0)];
        assert!(signed_area(&cw) > 0.0);
        let fixed = ensure_ccw(&cw);
        assert_eq!(fixed[0], Point::new(0.0, 10.0));
        assert!(ensure_ccw(&[]).is_empty());
    }

    #[test]
    fn test_normalize_radius() {
        let pts = circle(10, 0.5);
        let out = normalize_radius(&pts, 120.0);
        assert!((max_radius(&out) - 120.0).abs() < 1e-9);
        let zero = vec![Point::ZERO; 3];
        assert_eq!(normalize_radius(&zero, 10.0), zero);
    }

    #[test]
    fn test_similarity_fit_recovers_transform() {
        let src = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(-1.0, 3.0),
        ];
        let truth = SimilarityTransform {
            scale: 2.5,
            rotation: 0.7,
            translation: Point::new(-4.0, 9.0),
        };
        let dst = truth.apply_all(&src);
        let fit = SimilarityTransform::fit(&src, &dst);
        assert!((fit.scale - 2.5).abs() < 1e-9);
        assert!((fit.rotation - 0.7).abs() < 1e-9);
        assert!(fit.translation.approx_eq(&Point::new(-4.0, 9.0), 1e-9));
    }

    #[test]
    fn test_similarity_fit_degenerate_is_identity() {
        let src = vec![Point::new(1.0, 1.0); 4];
        let dst = vec![Point::new(5.0, 2.0), Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(3.0, 3.0)];
        assert_eq!(SimilarityTransform::fit(&src, &dst), SimilarityTransform::identity());
        assert_eq!(SimilarityTransform::fit(&src[..1], &dst[..1]), SimilarityTransform::identity());
    }

    #[test]
    fn test_hull_radius_guard() {
        assert_eq!(hull_radius(&[Point::ZERO; 4]), 1.0);
        let r = hull_radius(&circle(64, 7.0));
        assert!((r - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_align_rotation_undoes_rotation() {
        let reference = resample(&[
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 2.0),
            Point::new(0.0, 2.0),
        ], 40);
        let rotated: Vec<Point> = reference.iter().map(|p| p.rotated(1.1) * 3.0).collect();
        let aligned = align_rotation(&reference, &rotated);
        for (a, r) in aligned.iter().zip(&reference) {
            assert!(a.approx_eq(&(*r * 3.0), 1e-6));
        }
    }
}
