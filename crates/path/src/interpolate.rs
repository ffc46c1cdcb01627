use crate::geom::interpolate::step;
use crate::geom::Interpolate;
use crate::{Path, Spline};

impl Interpolate<f64> for Spline {
    /// Splines with the same number of curves and the same closedness are
    /// blended curve by curve. Other splines jump to `other` at `u = 1`.
    fn lerp(&self, other: &Self, u: f64) -> Self {
        if self.len() != other.len() || self.is_closed() != other.is_closed() {
            return step(self, other, u, |a, _| a.clone());
        }

        let curves = self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a.lerp(b, u))
            .collect();

        Spline::new(curves, self.is_closed())
    }
}

impl Interpolate<f64> for Path {
    /// Paths with the same number of splines are blended spline by spline.
    /// Other paths jump to `other` at `u = 1`.
    fn lerp(&self, other: &Self, u: f64) -> Self {
        if self.len() != other.len() {
            return step(self, other, u, |a, _| a.clone());
        }

        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.lerp(b, u))
            .collect()
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn triangle(size: f64) -> Path {
    let mut builder = Path::builder();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(size, 0.0));
    builder.quadratic_curve_to(point(size, size), point(0.0, size));
    builder.close_path();
    builder.build()
}

#[test]
fn boundaries_are_exact() {
    let a = triangle(1.0);
    let b = triangle(3.7);
    let i = a.interpolate_to(&b);
    assert_eq!(i.interpolate(0.0), a);
    assert_eq!(i.interpolate(1.0), b);
}

#[test]
fn mid_point() {
    let a = triangle(2.0);
    let b = triangle(4.0);
    assert_eq!(a.lerp(&b, 0.5), triangle(3.0));
}

#[test]
fn mismatched_structure() {
    let a = triangle(2.0);
    let mut builder = Path::builder();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    let b = builder.build();

    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 0.5), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    assert_eq!(a[0].lerp(&b[0], 1.0), b[0]);
}
