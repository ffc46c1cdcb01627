#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [figura](https://docs.rs/figura/).
//!
//! # Overview.
//!
//! This crate implements the maths to work with:
//!
//! - points, vectors and line segments,
//! - axis-aligned boxes and circles,
//! - quadratic and cubic bézier curves,
//! - elliptic arcs, in both center and SVG endpoint parameterization,
//! - linear interpolation between two shapes of the same kind.
//!
//! All types are plain `Copy` values. Operations never mutate, they return
//! new values instead.
//!
//! # Shapes
//!
//! The [`Shape`] enum is the closed set of primitive shapes that can be tested
//! against each other with `contains` and `intersects`. Anything else that
//! implements [`BoundingBox`] (curves, splines, paths) can still be tested for
//! containment against a box, using its bounds only.
//!
//! # Curves
//!
//! Curves are parameterized by `t ∈ [0, 1]`. The [`Curve`] enum gathers the
//! four curve kinds behind a single type, the [`ParametricCurve`] trait
//! exposes the API they have in common.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
mod box2d;
mod circle;
pub mod cubic_bezier;
mod curve;
mod error;
pub mod interpolate;
mod line;
pub mod quadratic_bezier;
mod shape;
pub mod utils;

#[doc(inline)]
pub use crate::arc::{ArcFlags, EllipticCurve, SvgArc};
#[doc(inline)]
pub use crate::box2d::Box2D;
#[doc(inline)]
pub use crate::circle::Circle;
#[doc(inline)]
pub use crate::cubic_bezier::CubicCurve;
#[doc(inline)]
pub use crate::curve::{BoundingBox, Curve, ParametricCurve};
#[doc(inline)]
pub use crate::error::InitError;
#[doc(inline)]
pub use crate::interpolate::{Interpolate, Interpolator};
#[doc(inline)]
pub use crate::line::{segment_hit, LineSegment};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticCurve;
#[doc(inline)]
pub use crate::shape::Shape;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;

        const MIN: Self;
        const MAX: Self;

        const EPSILON: Self;

        /// Epsilon constants are usually not a good way to deal with float precision.
        /// Float precision depends on the magnitude of the values and so should appropriate
        /// epsilons.
        fn epsilon_for(_reference: Self) -> Self {
            Self::EPSILON
        }

        fn value(v: f32) -> Self;

        /// Bit pattern used for hashing.
        ///
        /// Positive and negative zero hash the same since they compare equal.
        fn hash_bits(self) -> u64;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;

        const MIN: Self = f32::MIN;
        const MAX: Self = f32::MAX;

        const EPSILON: Self = 1e-4;

        fn epsilon_for(reference: Self) -> Self {
            // Thresholds picked empirically from the spacing of f32 values at
            // each magnitude.
            let magnitude = Float::abs(reference) as i32;
            match magnitude {
                0..=7 => 1e-5,
                8..=1023 => 1e-3,
                1024..=4095 => 1e-2,
                4096..=65535 => 1e-1,
                65536..=8_388_607 => 0.5,
                _ => 1.0,
            }
        }

        #[inline]
        fn value(v: f32) -> Self {
            v
        }

        #[inline]
        fn hash_bits(self) -> u64 {
            if self == 0.0 {
                0
            } else {
                self.to_bits() as u64
            }
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;

        const MIN: Self = f64::MIN;
        const MAX: Self = f64::MAX;

        const EPSILON: Self = 1e-8;

        fn epsilon_for(reference: Self) -> Self {
            let magnitude = Float::abs(reference) as i64;
            match magnitude {
                0..=65_535 => 1e-8,
                65_536..=8_388_607 => 1e-5,
                8_388_608..=4_294_967_295 => 1e-3,
                _ => 1e-1,
            }
        }

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }

        #[inline]
        fn hash_bits(self) -> u64 {
            if self == 0.0 {
                0
            } else {
                self.to_bits()
            }
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Transform2D`
pub type Transform<S> = euclid::default::Transform2D<S>;

/// Alias for `euclid::default::Rotation2D`
pub type Rotation<S> = euclid::default::Rotation2D<S>;

/// Alias for `euclid::default::Translation2D`
pub type Translation<S> = euclid::Translation2D<S, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Scale`
pub use euclid::default::Scale;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    //! Coordinate transformations.
    //!
    //! Shapes and curves never implement coordinate spaces themselves, they call
    //! back into a [`Transformation`] provided by the caller, one coordinate at a
    //! time.

    pub use crate::curve::{BoundingBox, ParametricCurve};
    pub use crate::interpolate::Interpolate;

    use crate::{point, Point, Rotation, Scalar, Scale, Transform, Translation, Vector};

    pub trait Transformation<S> {
        /// Returns the transformed x coordinate of the point `(x, y)`.
        fn transform_x(&self, x: S, y: S) -> S;

        /// Returns the transformed y coordinate of the point `(x, y)`.
        fn transform_y(&self, x: S, y: S) -> S;

        #[inline]
        fn transform_point(&self, p: Point<S>) -> Point<S>
        where
            S: Copy,
        {
            point(self.transform_x(p.x, p.y), self.transform_y(p.x, p.y))
        }
    }

    impl<S: Scalar> Transformation<S> for Transform<S> {
        fn transform_x(&self, x: S, y: S) -> S {
            x * self.m11 + y * self.m21 + self.m31
        }

        fn transform_y(&self, x: S, y: S) -> S {
            x * self.m12 + y * self.m22 + self.m32
        }

        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }
    }

    impl<S: Scalar> Transformation<S> for Rotation<S> {
        fn transform_x(&self, x: S, y: S) -> S {
            self.transform_point(point(x, y)).x
        }

        fn transform_y(&self, x: S, y: S) -> S {
            self.transform_point(point(x, y)).y
        }
    }

    impl<S: Scalar> Transformation<S> for Translation<S> {
        fn transform_x(&self, x: S, _y: S) -> S {
            x + self.x
        }

        fn transform_y(&self, _x: S, y: S) -> S {
            y + self.y
        }
    }

    impl<S: Scalar> Transformation<S> for Scale<S> {
        fn transform_x(&self, x: S, _y: S) -> S {
            x * self.0
        }

        fn transform_y(&self, _x: S, y: S) -> S {
            y * self.0
        }
    }

    /// Adapts a closure mapping points to points into a [`Transformation`].
    #[derive(Copy, Clone, Debug)]
    pub struct FnTransform<F>(pub F);

    impl<S: Scalar, F: Fn(Point<S>) -> Point<S>> Transformation<S> for FnTransform<F> {
        fn transform_x(&self, x: S, y: S) -> S {
            (self.0)(point(x, y)).x
        }

        fn transform_y(&self, x: S, y: S) -> S {
            (self.0)(point(x, y)).y
        }

        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (self.0)(p)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, S: Scalar, T: Transformation<S>> Transformation<S> for &'l T {
        #[inline]
        fn transform_x(&self, x: S, y: S) -> S {
            (*self).transform_x(x, y)
        }

        #[inline]
        fn transform_y(&self, x: S, y: S) -> S {
            (*self).transform_y(x, y)
        }

        #[inline]
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (*self).transform_point(p)
        }
    }

    /// Transforms a displacement by mapping its two ends from the origin.
    pub(crate) fn transform_vector<S: Scalar, T: Transformation<S>>(
        transform: &T,
        v: Vector<S>,
    ) -> Vector<S> {
        let origin = transform.transform_point(point(S::ZERO, S::ZERO));
        transform.transform_point(v.to_point()) - origin
    }
}
