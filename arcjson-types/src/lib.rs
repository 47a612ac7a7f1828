//! Ring geometry primitives used by the `arcjson` codec.
//!
//! The crate works directly on coordinate arrays (`Vec<f64>`, `[f64; 2]`, ...) through the [`CartesianPoint2d`]
//! trait and provides:
//! * ring closing and winding ([`Contour`], [`ClosedContour`], [`Winding`]),
//! * point-in-ring and ring-in-ring tests,
//! * segment intersection ([`Segment`]),
//! * the rectangle contour used for envelopes ([`Rect`]).

pub mod contour;
pub use contour::{ClosedContour, Contour, Winding};

mod point;
pub use point::{CartesianPoint2d, NewCartesianPoint2d};

mod rect;
pub use rect::Rect;

pub mod segment;
pub use segment::Segment;

#[cfg(feature = "geo-types")]
mod geo_types_impls;
