//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - a path whose last point is not connected to the first one. ArcGIS polyline paths and rings read from
//!   the wire before they are validated are represented as [`Contour`].
//! * **closed** - a ring whose last point repeats the first one. Only [`ClosedContour`] has a defined winding, an
//!   inside and an outside, so winding and containment tests are only available on it.
//!
//! Unlike some geometry models, a closed contour here *does* store the closing point explicitly, following the
//! layout both GeoJSON and ArcGIS JSON use on the wire. The only way to obtain a [`ClosedContour`] is to call
//! [`Contour::close`], which appends the first point when it is missing.

use std::ops::Deref;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::point::CartesianPoint2d;
use crate::segment::{any_segments_intersect, iter_segments, Segment};

/// Rotational direction of a closed contour.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    CounterClockwise,
}

/// Sequence of points that is not guaranteed to be closed.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Contour<Point> {
    points: Vec<Point>,
}

impl<Point> Deref for Contour<Point> {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<Point> Contour<Point> {
    /// Creates a new contour.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Consumes the contour and returns its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<Point: PartialEq + Clone> Contour<Point> {
    /// Closes the contour by appending a copy of the first point, unless the last point already equals it in every
    /// component. An empty contour stays empty.
    pub fn close(self) -> ClosedContour<Point> {
        let mut points = self.points;
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first.clone());
            }
        }

        ClosedContour { points }
    }
}

impl<P: CartesianPoint2d> Contour<P> {
    /// Returns true if any segment of this contour intersects any segment of the `other` point sequence.
    pub fn intersects<Q: CartesianPoint2d<Num = P::Num>>(&self, other: &[Q]) -> bool {
        any_segments_intersect(&self.points, other)
    }
}

/// A closed contour: the last point equals the first one. See module documentation for details.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClosedContour<Point> {
    points: Vec<Point>,
}

impl<Point> Deref for ClosedContour<Point> {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<Point> ClosedContour<Point> {
    /// Wraps points whose last point is known to repeat the first one.
    pub(crate) fn from_closed_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Consumes the contour and returns its points, including the closing one.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Returns the contour with the order of its points reversed. The first and the last points stay equal, so the
    /// result is still closed, with the opposite winding.
    pub fn into_reversed(mut self) -> Self {
        self.points.reverse();
        self
    }
}

impl<Point: PartialEq + Clone> ClosedContour<Point> {
    /// Returns the contour itself. Closing is idempotent: a closed contour never gets a second closing point.
    pub fn close(self) -> Self {
        self
    }
}

impl<P: CartesianPoint2d> ClosedContour<P> {
    /// Signed area accumulator of the contour: the sum of `(x[i+1] - x[i]) * (y[i+1] + y[i])` over consecutive
    /// point pairs. It equals twice the area of the ring, positive for clockwise rings and negative for
    /// counterclockwise ones.
    pub fn winding_sum(&self) -> P::Num {
        iter_segments(&self.points).fold(P::Num::zero(), |total, Segment(p1, p2)| {
            total + (p2.x() - p1.x()) * (p2.y() + p1.y())
        })
    }

    /// Winding of the contour.
    ///
    /// A contour with zero area (including contours of less than two points) is reported as clockwise.
    pub fn winding(&self) -> Winding {
        if self.winding_sum() >= P::Num::zero() {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Shortcut for `self.winding() == Winding::Clockwise`.
    pub fn is_clockwise(&self) -> bool {
        self.winding() == Winding::Clockwise
    }

    /// Returns the contour with the given winding, reversing it if necessary.
    pub fn with_winding(self, winding: Winding) -> Self {
        if self.winding() == winding {
            self
        } else {
            self.into_reversed()
        }
    }

    /// Returns true if the `point` lies inside the contour, using the even-odd rule.
    ///
    /// The segment from the last point back to the first one is always tested, so the result does not depend on
    /// the closing point being present. Points exactly on the boundary may be reported either way.
    pub fn contains_point<Q: CartesianPoint2d<Num = P::Num> + ?Sized>(&self, point: &Q) -> bool {
        let (x, y) = (point.x(), point.y());
        let mut contains = false;

        let Some(mut prev) = self.points.last() else {
            return false;
        };

        for curr in &self.points {
            let crosses_y = (curr.y() <= y && y < prev.y()) || (prev.y() <= y && y < curr.y());
            if crosses_y
                && x < (prev.x() - curr.x()) * (y - curr.y()) / (prev.y() - curr.y()) + curr.x()
            {
                contains = !contains;
            }

            prev = curr;
        }

        contains
    }

    /// Returns true if any segment of this contour intersects any segment of the `other` point sequence.
    pub fn intersects<Q: CartesianPoint2d<Num = P::Num>>(&self, other: &[Q]) -> bool {
        any_segments_intersect(&self.points, other)
    }

    /// Returns true if the `inner` point sequence lies inside this contour: the boundaries do not cross and the
    /// first point of `inner` is inside. An empty `inner` sequence is never contained.
    pub fn contains_contour<Q: CartesianPoint2d<Num = P::Num>>(&self, inner: &[Q]) -> bool {
        match inner.first() {
            Some(first) => !self.intersects(inner) && self.contains_point(first),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ring(points: &[[f64; 2]]) -> Contour<Vec<f64>> {
        Contour::new(points.iter().map(|p| p.to_vec()).collect())
    }

    fn square(min: f64, max: f64) -> ClosedContour<Vec<f64>> {
        ring(&[[min, min], [min, max], [max, max], [max, min]]).close()
    }

    #[test]
    fn close_appends_first_point() {
        let closed = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).close();
        assert_eq!(closed.len(), 4);
        assert_eq!(closed[0], closed[3]);
    }

    #[test]
    fn close_is_idempotent() {
        let once = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).close();
        let twice = Contour::new(once.clone().into_points()).close();
        assert_eq!(once, twice);
        assert_eq!(once.clone().close(), once);
    }

    #[test]
    fn close_compares_all_components() {
        let contour = Contour::new(vec![
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![0.0, 0.0, 2.0],
        ]);
        assert_eq!(contour.close().len(), 4);
    }

    #[test]
    fn close_empty() {
        let closed = Contour::<Vec<f64>>::new(vec![]).close();
        assert!(closed.is_empty());
        assert!(closed.is_clockwise());
    }

    #[test]
    fn winding() {
        let clockwise = ring(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]).close();
        assert_eq!(clockwise.winding(), Winding::Clockwise);
        assert_relative_eq!(clockwise.winding_sum(), 200.0);

        let counter = clockwise.into_reversed();
        assert_eq!(counter.winding(), Winding::CounterClockwise);
        assert_relative_eq!(counter.winding_sum(), -200.0);
    }

    #[test]
    fn winding_of_short_contours() {
        let single = ring(&[[3.0, 4.0]]).close();
        assert_eq!(single.len(), 1);
        assert_eq!(single.winding(), Winding::Clockwise);

        let flat = ring(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).close();
        assert_eq!(flat.winding(), Winding::Clockwise);
    }

    #[test]
    fn reversed_winding_differs() {
        let rings = [
            square(0.0, 1.0),
            ring(&[[0.0, 0.0], [5.0, 1.0], [3.0, 4.0], [-1.0, 2.0]]).close(),
            ring(&[[-10.0, -10.0], [-10.5, 3.0], [2.0, 2.0]]).close(),
        ];

        for r in rings {
            assert_ne!(r.is_clockwise(), r.clone().into_reversed().is_clockwise());
        }
    }

    #[test]
    fn with_winding() {
        let clockwise = square(0.0, 1.0);
        let counter = clockwise.clone().with_winding(Winding::CounterClockwise);
        assert_eq!(counter, clockwise.clone().into_reversed());
        assert_eq!(clockwise.clone().with_winding(Winding::Clockwise), clockwise);
    }

    #[test]
    fn contains_point() {
        let contour = square(0.0, 10.0);
        assert!(contour.contains_point(&[5.0, 5.0]));
        assert!(contour.contains_point(&vec![0.5, 9.5]));
        assert!(!contour.contains_point(&[15.0, 5.0]));
        assert!(!contour.contains_point(&[-1.0, -1.0]));
        assert!(!contour.contains_point(&[5.0]));

        let concave = ring(&[[0.0, 0.0], [0.0, 10.0], [5.0, 2.0], [10.0, 10.0], [10.0, 0.0]]).close();
        assert!(concave.contains_point(&[1.0, 2.0]));
        assert!(!concave.contains_point(&[5.0, 8.0]));
    }

    #[test]
    fn contains_point_without_closing_point() {
        let open = ring(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]);
        let closed = ClosedContour {
            points: open.into_points(),
        };
        assert!(closed.contains_point(&[5.0, 5.0]));
    }

    #[test]
    fn contains_contour() {
        let outer = square(0.0, 10.0);
        let hole = square(2.0, 4.0);
        let crossing = square(8.0, 12.0);
        let outside = square(20.0, 30.0);

        assert!(outer.contains_contour(&hole));
        assert!(!outer.contains_contour(&crossing));
        assert!(!outer.contains_contour(&outside));
        assert!(!outer.contains_contour::<Vec<f64>>(&[]));
    }

    #[test]
    fn intersects() {
        let outer = square(0.0, 10.0);
        assert!(outer.intersects(&square(8.0, 12.0)));
        assert!(!outer.intersects(&square(2.0, 4.0)));

        let path = ring(&[[-5.0, 5.0], [5.0, 5.0]]);
        assert!(path.intersects(&outer));
        assert!(!ring(&[[-5.0, 5.0], [-1.0, 5.0]]).intersects(&outer));
    }
}
