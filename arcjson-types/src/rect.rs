use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::contour::ClosedContour;
use crate::point::NewCartesianPoint2d;

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Minimum x.
    pub x_min: N,
    /// Minimum y.
    pub y_min: N,
    /// Maximum x.
    pub x_max: N,
    /// Maximum y.
    pub y_max: N,
}

impl<N: Float> Rect<N> {
    /// Creates a new rectangle.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Corners of the rectangle starting from the top right one and going counterclockwise:
    /// `(max, max)`, `(min, max)`, `(min, min)`, `(max, min)`.
    pub fn into_quadrangle<P: NewCartesianPoint2d<N>>(self) -> [P; 4] {
        [
            P::new(self.x_max, self.y_max),
            P::new(self.x_min, self.y_max),
            P::new(self.x_min, self.y_min),
            P::new(self.x_max, self.y_min),
        ]
    }

    /// Closed contour along the border of the rectangle, in the order of [`Rect::into_quadrangle`], with the
    /// first corner repeated at the end.
    ///
    /// The closing corner is always appended, so the contour has five points even for a rectangle of zero size.
    pub fn into_contour<P: NewCartesianPoint2d<N>>(self) -> ClosedContour<P> {
        let mut points = Vec::from(self.into_quadrangle());
        points.push(P::new(self.x_max, self.y_max));
        ClosedContour::from_closed_points(points)
    }
}
