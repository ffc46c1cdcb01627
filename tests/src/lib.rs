//! Cross-crate tests and shared helpers for the benchmarks.

use figura::geom::utils::fuzzy_eq;
use figura::geom::{
    ArcFlags, BoundingBox, Box2D, Circle, CubicCurve, Curve, EllipticCurve, Interpolate,
    LineSegment, ParametricCurve, QuadraticCurve, Shape, SvgArc,
};
use figura::math::{point, vector, Angle, Point};
use figura::path::{FormatOptions, Path, Spline};
use figura::svg::{parse_chunks, parse_path, PathParser};

/// A point that wanders around a 50x25 area without repeating for a while.
fn wander(i: usize) -> Point {
    point(
        ((i * 37) % 101) as f64 * 0.5,
        ((i * 53) % 97) as f64 * 0.25,
    )
}

/// Builds a path with `splines` splines using every kind of command.
pub fn generate_path(splines: usize) -> Path {
    let mut builder = Path::builder();
    let mut i = 0;
    let mut next = || {
        i += 1;
        wander(i)
    };

    for n in 0..splines {
        builder.move_to(next());
        let p = next();
        builder.line_to(p);
        builder.horizontal_line_to(p.x + 3.0);
        builder.quadratic_curve_to(next(), next());
        builder.smooth_quadratic_curve_to(next());
        builder.cubic_curve_to(next(), next(), next());
        builder.smooth_cubic_curve_to(next(), next());
        builder.arc_to(
            vector(60.0, 40.0),
            Angle::degrees(n as f64 * 15.0),
            ArcFlags {
                large_arc: n % 3 == 0,
                sweep: n % 2 == 0,
            },
            next(),
        );
        builder.line_to(next());
        if n % 2 == 0 {
            builder.close_path();
        }
    }

    builder.build()
}

pub fn generate_path_string(splines: usize) -> String {
    generate_path(splines).to_string()
}

pub fn fuzzy_eq_point(a: Point, b: Point, epsilon: f64) -> bool {
    fuzzy_eq(a.x, b.x, epsilon) && fuzzy_eq(a.y, b.y, epsilon)
}

pub fn assert_curves_eq(a: &Curve<f64>, b: &Curve<f64>, epsilon: f64) {
    assert_eq!(a.kind(), b.kind(), "{:?} {:?}", a, b);
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        assert!(
            fuzzy_eq_point(a.sample(t), b.sample(t), epsilon),
            "{:?} and {:?} differ at {}",
            a,
            b,
            t
        );
    }
}

pub fn assert_paths_eq(a: &Path, b: &Path, epsilon: f64) {
    assert_eq!(a.len(), b.len());
    for (sa, sb) in a.iter().zip(b.iter()) {
        assert_splines_eq(sa, sb, epsilon);
    }
}

pub fn assert_splines_eq(a: &Spline, b: &Spline, epsilon: f64) {
    assert_eq!(a.len(), b.len(), "{} / {}", a, b);
    assert_eq!(a.is_closed(), b.is_closed());
    for (ca, cb) in a.iter().zip(b.iter()) {
        assert_curves_eq(ca, cb, epsilon);
    }
}

fn sample_curves() -> Vec<Curve<f64>> {
    vec![
        Curve::Line(LineSegment::new(0.0, 0.0, 10.0, 5.0)),
        Curve::Quadratic(QuadraticCurve::new(
            point(0.0, 0.0),
            point(5.0, 10.0),
            point(10.0, 0.0),
        )),
        Curve::Cubic(CubicCurve::new(
            point(-1.0, 3.0),
            point(4.0, -8.0),
            point(6.0, 12.0),
            point(11.0, 2.0),
        )),
        Curve::Elliptic(EllipticCurve {
            center: point(3.0, 4.0),
            radii: vector(5.0, 2.0),
            x_rotation: Angle::degrees(30.0),
            start_angle: Angle::degrees(-45.0),
            sweep_angle: Angle::degrees(250.0),
        }),
    ]
}

#[test]
fn round_trip() {
    let path = generate_path(8);
    assert!(path.is_defined());

    let parsed = parse_path(path.path_string()).unwrap();
    assert_paths_eq(&path, &parsed, 1e-9);

    let relative = path.to_path_string(&FormatOptions::relative());
    let parsed = parse_path(&relative).unwrap();
    assert_paths_eq(&path, &parsed, 1e-9);

    let rounded = path.to_path_string(&FormatOptions::precision(3));
    let parsed = parse_path(&rounded).unwrap();
    assert_paths_eq(&path, &parsed, 0.05);
}

#[test]
fn chunk_boundaries_do_not_matter() {
    let src = generate_path_string(3);
    let whole = parse_path(&src).unwrap();

    for chunk_size in [1, 2, 3, 7, 64] {
        let chunks: Vec<&str> = src
            .as_bytes()
            .chunks(chunk_size)
            .map(|bytes| std::str::from_utf8(bytes).unwrap())
            .collect();
        let chunked = parse_chunks(PathParser::new(), chunks).unwrap();
        assert_eq!(chunked, whole, "chunk size {}", chunk_size);
    }
}

#[test]
fn bounds_monotonicity() {
    let shapes = [
        Shape::Point(point(-3.0, 7.0)),
        Shape::Segment(LineSegment::new(1.0, 1.0, 4.0, -2.0)),
        Shape::Box(Box2D::new(0.0, 0.0, 10.0, 10.0)),
        Shape::Box(Box2D::new(20.0, 20.0, 30.0, 30.0)),
        Shape::Circle(Circle::new(15.0, 5.0, 4.0)),
        Shape::Circle(Circle::new(-2.5, 0.5, 0.25)),
    ];

    for a in &shapes {
        for b in &shapes {
            let union = Shape::Box(a.union(b));
            assert!(union.contains(a), "{:?} U {:?} should contain {:?}", a, b, a);
            assert!(union.contains(b), "{:?} U {:?} should contain {:?}", a, b, b);
        }
    }

    // Spline and path bounds contain every curve.
    let path = generate_path(4);
    let bounds = path.bounding_box();
    for spline in path.iter() {
        assert!(bounds.contains_box(&spline.bounding_box()));
        for curve in spline.iter() {
            assert!(bounds.contains_box(&curve.bounding_box()));
        }
    }
}

#[test]
fn split_consistency() {
    for curve in sample_curves() {
        for u in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
            let (a, b) = curve.split(u);
            assert!(fuzzy_eq_point(a.to(), b.from(), 1e-9), "{:?} at {}", curve, u);
            assert!(fuzzy_eq_point(a.to(), curve.sample(u), 1e-9));
            assert!(fuzzy_eq_point(a.from(), curve.from(), 1e-9));
            assert!(fuzzy_eq_point(b.to(), curve.to(), 1e-9));
        }
    }

    let path = generate_path(3);
    for u in [0.0, 0.3, 0.5, 0.77, 1.0] {
        let (a, b) = path.split(u);
        let sampled = path.sample(u).unwrap();
        let first_end = a.iter().last().and_then(|spline| spline.to()).unwrap();
        let second_start = b.iter().next().and_then(|spline| spline.from()).unwrap();
        assert!(fuzzy_eq_point(first_end, sampled, 1e-9));
        assert!(fuzzy_eq_point(second_start, sampled, 1e-9));
    }
}

#[test]
fn arc_endpoint_round_trip() {
    for (large_arc, sweep) in [(false, false), (false, true), (true, false), (true, true)] {
        let svg = SvgArc {
            from: point(1.0, 2.0),
            to: point(8.0, 5.0),
            radii: vector(10.0, 8.0),
            x_rotation: Angle::degrees(20.0),
            flags: ArcFlags { large_arc, sweep },
        };

        let arc = svg.to_arc();
        let back = arc.to_svg_arc();
        assert!(fuzzy_eq_point(back.from, svg.from, 1e-9));
        assert!(fuzzy_eq_point(back.to, svg.to, 1e-9));
        assert!(fuzzy_eq(back.radii.x, svg.radii.x, 1e-9));
        assert!(fuzzy_eq(back.radii.y, svg.radii.y, 1e-9));
        assert!(fuzzy_eq(back.x_rotation.radians, svg.x_rotation.radians, 1e-9));
        assert_eq!(back.flags, svg.flags);

        let again = back.to_arc();
        assert_curves_eq(&Curve::Elliptic(arc), &Curve::Elliptic(again), 1e-9);
    }
}

#[test]
fn interpolator_boundaries() {
    let curves = sample_curves();
    for a in &curves {
        for b in &curves {
            let i = a.interpolate_to(b);
            assert_eq!(i.interpolate(0.0), *a);
            assert_eq!(i.interpolate(1.0), *b);
        }
    }

    let a = generate_path(2);
    let b = a.transformed(&figura::math::Rotation::new(Angle::degrees(40.0)));
    let c = generate_path(3);
    for (from, to) in [(&a, &b), (&a, &c)] {
        let i = from.interpolate_to(to);
        assert_eq!(i.interpolate(0.0), *from);
        assert_eq!(i.interpolate(1.0), *to);
    }

    let circles = Circle::new(0.0, 0.0, 1.0).interpolate_to(&Circle::new(3.0, 4.0, 0.1));
    assert_eq!(circles.interpolate(1.0), Circle::new(3.0, 4.0, 0.1));
    assert_eq!(
        Box2D::new(0.0, 0.0, 1.0, 1.0).lerp(&Box2D::new(2.0, 2.0, 5.0, 5.0), 0.5),
        Box2D::new(1.0, 1.0, 3.0, 3.0)
    );
}

#[test]
fn segment_intersection_symmetry() {
    let mut segments = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            segments.push(LineSegment {
                from: wander(i),
                to: wander(j + 10),
            });
        }
    }
    // Collinear, touching and degenerate segments.
    segments.push(LineSegment::new(0.0, 0.0, 10.0, 0.0));
    segments.push(LineSegment::new(5.0, 0.0, 15.0, 0.0));
    segments.push(LineSegment::new(10.0, 0.0, 10.0, 10.0));
    segments.push(LineSegment::new(3.0, 3.0, 3.0, 3.0));

    for p in &segments {
        for q in &segments {
            assert_eq!(p.intersects(q), q.intersects(p), "{:?} {:?}", p, q);
        }
    }
}

#[test]
fn box_union() {
    let a = Box2D::new(0.0, 0.0, 10.0, 10.0);
    let b = Box2D::new(20.0, 20.0, 30.0, 30.0);
    assert_eq!(a.union(&b), Box2D::new(0.0, 0.0, 30.0, 30.0));
}

#[test]
fn box_circle_intersection() {
    let b = Box2D::new(0.0, 0.0, 10.0, 10.0);
    assert!(!b.intersects_circle(&Circle::new(15.0, 5.0, 4.0)));
    assert!(b.intersects_circle(&Circle::new(15.0, 5.0, 6.0)));
}

#[test]
fn quadratic_split_midpoint() {
    let curve = QuadraticCurve::new(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0));
    let (a, b) = curve.split(0.5);
    assert_eq!(a.to, b.from);
    assert_eq!(a.to, curve.sample(0.5));
    assert_eq!(a.to, point(5.0, 5.0));
}
