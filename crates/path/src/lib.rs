#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Splines and compound paths.
//!
//! A [`Spline`] is a chain of curves where each curve starts where the
//! previous one ends, optionally closed. A [`Path`] is an ordered list of
//! splines. Both are immutable once built, and lazily cache their bounding box
//! and their SVG path string.
//!
//! This crate is reexported in [figura](https://docs.rs/figura/).
//!
//! # Examples
//!
//! ```
//! use figura_path::Path;
//! use figura_path::math::point;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! builder.close_path();
//!
//! let path = builder.build();
//!
//! assert_eq!(path.len(), 1);
//! assert_eq!(path.to_string(), "M0,0H10V10Z");
//! ```

pub use figura_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod interpolate;
pub mod path;
pub mod serializer;
pub mod spline;

#[doc(inline)]
pub use crate::builder::{PathBuilder, PathSink};
#[doc(inline)]
pub use crate::path::Path;
#[doc(inline)]
pub use crate::serializer::{FormatOptions, PathSerializer};
#[doc(inline)]
pub use crate::spline::Spline;

pub use crate::geom::{ArcFlags, Curve};

pub mod traits {
    //! `figura_path` traits reexported here for convenience.

    pub use crate::builder::PathSink;
    pub use crate::geom::traits::*;
}

pub mod math {
    //! f64 version of the figura_geom types used everywhere.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```figura_geom::Box2D<f64>```.
    pub type Box2D = crate::geom::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```
    pub type Transform = euclid::default::Transform2D<f64>;

    /// Alias for ```euclid::default::Rotation2D<f64>```
    pub type Rotation = euclid::default::Rotation2D<f64>;

    /// Alias for ```euclid::default::Translation2D<f64>```
    pub type Translation = euclid::Translation2D<f64, euclid::UnknownUnit, euclid::UnknownUnit>;

    /// Alias for ```euclid::default::Scale<f64>```
    pub type Scale = euclid::default::Scale<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}
