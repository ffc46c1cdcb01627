#![deny(bare_trait_objects)]

//! 2D path geometry in Rust.
//!
//! # Crates
//!
//! This meta-crate (`figura`) reexports the following sub-crates for convenience:
//!
//! * **figura_geom** - Shapes, bézier curves, elliptic arcs and interpolators.
//! * **figura_path** - Splines, paths, the path builder and the SVG path serializer.
//! * **figura_svg** - A resumable parser for the SVG path syntax.
//!
//! Each `figura_<name>` crate is reexported as a `<name>` module in `figura`. For example:
//!
//! ```ignore
//! use figura_svg::parse_path;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use figura::svg::parse_path;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Parsing, splitting and printing a path
//!
//! ```
//! use figura::math::point;
//! use figura::svg::parse_path;
//!
//! let path = parse_path("M0,0 L10,0 L10,10 Z").unwrap();
//! assert_eq!(path.bounding_box().max, point(10.0, 10.0));
//!
//! let (first, second) = path.split(0.5);
//! assert_eq!(first.to_string(), "M0,0H10V5");
//! assert_eq!(second.to_string(), "M10,5V10L0,0");
//! ```
//!
//! ## Building a path
//!
//! ```
//! use figura::math::{point, vector, Angle};
//! use figura::path::{ArcFlags, FormatOptions, Path};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.arc_to(
//!     vector(5.0, 5.0),
//!     Angle::zero(),
//!     ArcFlags { large_arc: false, sweep: true },
//!     point(10.0, 0.0),
//! );
//! let path = builder.build();
//!
//! // Arc end points are sampled, so round them when printing.
//! let svg = path.to_path_string(&FormatOptions::precision(6));
//! assert_eq!(svg, "M0,0A5,5 0 0,1 10,0");
//! ```
//!
//! ## Tweening between two paths
//!
//! ```
//! use figura::geom::Interpolate;
//! use figura::svg::parse_path;
//!
//! let from = parse_path("M0,0 L10,0").unwrap();
//! let to = parse_path("M0,10 L20,10").unwrap();
//! let tween = from.interpolate_to(&to);
//!
//! assert_eq!(tween.interpolate(0.5).to_string(), "M0,5H15");
//! ```

pub extern crate figura_geom;
pub extern crate figura_path;
pub extern crate figura_svg;

pub use figura_geom as geom;
pub use figura_path as path;
pub use figura_svg as svg;

pub use figura_path::math;
