//! Straight line segments between two points.

use num_traits::{One, Zero};

use crate::point::CartesianPoint2d;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point: ?Sized>(pub &'a Point, pub &'a Point);

impl<P: CartesianPoint2d + ?Sized> Segment<'_, P> {
    /// Returns true, if the segment has at least one common point with the `other` segment.
    ///
    /// The intersection parameters `ua` and `ub` along both segments are solved with the 2d line intersection
    /// determinant, and the segments intersect when both parameters lie in `[0, 1]`. Parallel, collinear and
    /// zero-length segments have a zero determinant and are reported as non-intersecting.
    pub fn intersects<Point: CartesianPoint2d<Num = P::Num> + ?Sized>(
        &self,
        other: &Segment<Point>,
    ) -> bool {
        let (a1, a2) = (self.0, self.1);
        let (b1, b2) = (other.0, other.1);

        let ua_t = (b2.x() - b1.x()) * (a1.y() - b1.y()) - (b2.y() - b1.y()) * (a1.x() - b1.x());
        let ub_t = (a2.x() - a1.x()) * (a1.y() - b1.y()) - (a2.y() - a1.y()) * (a1.x() - b1.x());
        let u_b = (b2.y() - b1.y()) * (a2.x() - a1.x()) - (b2.x() - b1.x()) * (a2.y() - a1.y());

        if u_b == P::Num::zero() {
            return false;
        }

        let ua = ua_t / u_b;
        let ub = ub_t / u_b;
        let unit = P::Num::zero()..=P::Num::one();

        unit.contains(&ua) && unit.contains(&ub)
    }
}

/// Iterates over the segments between consecutive points. The last point is not connected back to the first one.
pub fn iter_segments<P>(points: &[P]) -> impl Iterator<Item = Segment<'_, P>> {
    points.windows(2).map(|pair| Segment(&pair[0], &pair[1]))
}

/// Returns true if any segment of the `a` point sequence intersects any segment of the `b` sequence.
pub fn any_segments_intersect<P, Q>(a: &[P], b: &[Q]) -> bool
where
    P: CartesianPoint2d,
    Q: CartesianPoint2d<Num = P::Num>,
{
    iter_segments(a).any(|sa| iter_segments(b).any(|sb| sa.intersects(&sb)))
}
