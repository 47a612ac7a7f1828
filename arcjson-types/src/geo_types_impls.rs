use geo_types::{coord, point, Coord, CoordFloat, Point};

use crate::point::{CartesianPoint2d, NewCartesianPoint2d};

impl<T: CoordFloat> CartesianPoint2d for Coord<T> {
    type Num = T;

    fn x(&self) -> Self::Num {
        self.x
    }

    fn y(&self) -> Self::Num {
        self.y
    }
}

impl<T: CoordFloat> NewCartesianPoint2d<T> for Coord<T> {
    fn new(x: T, y: T) -> Self {
        coord!(x: x, y: y)
    }
}

impl<T: CoordFloat> CartesianPoint2d for Point<T> {
    type Num = T;

    fn x(&self) -> Self::Num {
        self.0.x
    }

    fn y(&self) -> Self::Num {
        self.0.y
    }
}

impl<T: CoordFloat> NewCartesianPoint2d<T> for Point<T> {
    fn new(x: T, y: T) -> Self {
        point!(x: x, y: y)
    }
}
