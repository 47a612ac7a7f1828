//! Points in 2d cartesian coordinates.
//!
//! Both ArcGIS JSON and GeoJSON store coordinates as plain numeric arrays (`[x, y]`, `[x, y, z]` and, in ArcGIS,
//! `[x, y, z, m]`). The [`CartesianPoint2d`] trait is implemented for these arrays directly, so the ring algorithms
//! in this crate run on the wire values without copying them into an intermediate point type.

use num_traits::Float;

/// A point with `x` and `y` coordinates.
///
/// Coordinate arrays shorter than two components report the missing coordinates as `NaN`. Every comparison with
/// `NaN` is false, so such points never end up inside a ring or on a segment.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;
}

/// Point type that can be constructed from its coordinates.
pub trait NewCartesianPoint2d<Num: Float = f64>: CartesianPoint2d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num) -> Self;
}

impl<N: Float> CartesianPoint2d for [N] {
    type Num = N;

    fn x(&self) -> N {
        self.first().copied().unwrap_or_else(N::nan)
    }

    fn y(&self) -> N {
        self.get(1).copied().unwrap_or_else(N::nan)
    }
}

impl<N: Float> CartesianPoint2d for Vec<N> {
    type Num = N;

    fn x(&self) -> N {
        self.as_slice().x()
    }

    fn y(&self) -> N {
        self.as_slice().y()
    }
}

impl<N: Float> NewCartesianPoint2d<N> for Vec<N> {
    fn new(x: N, y: N) -> Self {
        vec![x, y]
    }
}

impl<N: Float, const D: usize> CartesianPoint2d for [N; D] {
    type Num = N;

    fn x(&self) -> N {
        self.as_slice().x()
    }

    fn y(&self) -> N {
        self.as_slice().y()
    }
}

impl<N: Float> NewCartesianPoint2d<N> for [N; 2] {
    fn new(x: N, y: N) -> Self {
        [x, y]
    }
}

impl<T: CartesianPoint2d + ?Sized> CartesianPoint2d for &T {
    type Num = T::Num;

    fn x(&self) -> Self::Num {
        (**self).x()
    }

    fn y(&self) -> Self::Num {
        (**self).y()
    }
}
