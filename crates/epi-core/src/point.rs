use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A planar coordinate.
///
/// Curve generators, the contour tracer and the epicycle renderer all speak
/// in `Point`s. Screen-space points use a y-down convention; curve-space
/// points are centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

const EPSILON: f64 = 1e-9;

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` scaled by `radius`.
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        self.lerp(other, 0.5)
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotated(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Approximate equality using an absolute epsilon.
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// A point reinterpreted as a complex number for the DFT (`re = x`, `im = y`).
pub type ComplexSample = Complex64;

impl From<Point> for ComplexSample {
    fn from(p: Point) -> Self {
        Complex64::new(p.x, p.y)
    }
}

impl From<ComplexSample> for Point {
    fn from(c: ComplexSample) -> Self {
        Point { x: c.re, y: c.im }
    }
}

/// Convert a polyline into DFT input.
pub fn to_samples(points: &[Point]) -> Vec<ComplexSample> {
    points.iter().copied().map(ComplexSample::from).collect()
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point::new(rhs.x * self, rhs.y * self)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Point {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl std::iter::Sum for Point {
    fn sum<I: Iterator<Item = Point>>(iter: I) -> Point {
        iter.fold(Point::ZERO, |acc, p| acc + p)
    }
}

impl Point {
    /// Exact-zero check with a tiny tolerance, used by degenerate-input guards.
    pub fn is_zero(&self) -> bool {
        self.x.abs() < EPSILON && self.y.abs() < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        let p = Point::default();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert!(p.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a + b, Point::new(5.0, 7.0));
        assert_eq!(b - a, Point::new(3.0, 3.0));
    }

    #[test]
    fn test_point_magnitude() {
        let p = Point::new(3.0, 4.0);
        assert!((p.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_rotate() {
        let p = Point::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_sign() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert!(a.cross(&b) > 0.0);
        assert!(b.cross(&a) < 0.0);
    }

    #[test]
    fn test_complex_round_trip() {
        let p = Point::new(-2.5, 7.0);
        let c = ComplexSample::from(p);
        assert_eq!(c.re, -2.5);
        assert_eq!(c.im, 7.0);
        assert_eq!(Point::from(c), p);
    }

    #[test]
    fn test_sum() {
        let pts = [Point::new(1.0, 1.0), Point::new(2.0, -1.0), Point::new(-3.0, 0.5)];
        let s: Point = pts.iter().copied().sum();
        assert!(s.approx_eq(&Point::new(0.0, 0.5), 1e-12));
    }
}
