//! Conversion between ungrouped ArcGIS rings and GeoJSON polygons.
//!
//! ArcGIS polygons are a flat list of rings: outer rings are clockwise, holes are counterclockwise, and nothing
//! records which outer ring a hole belongs to. GeoJSON polygons are groups of rings with the outer ring first,
//! wound counterclockwise, followed by clockwise holes.

use std::iter;

use arcjson_types::{ClosedContour, Contour, Winding};
use geojson::{PolygonType, Position, Value};

/// Minimum number of points in a closed ring, including the closing point. Shorter rings are dropped.
pub const MIN_RING_LEN: usize = 4;

/// Outer ring with the holes assigned to it, in GeoJSON winding.
struct RingGroup {
    outer: ClosedContour<Position>,
    holes: Vec<ClosedContour<Position>>,
}

impl RingGroup {
    fn new(outer: ClosedContour<Position>) -> Self {
        Self {
            outer,
            holes: vec![],
        }
    }

    fn into_polygon(self) -> PolygonType {
        iter::once(self.outer)
            .chain(self.holes)
            .map(ClosedContour::into_points)
            .collect()
    }
}

fn close_ring(ring: &[Position]) -> Option<ClosedContour<Position>> {
    let closed = Contour::new(ring.to_vec()).close();
    if closed.len() < MIN_RING_LEN {
        log::trace!(
            "Dropping ring with {} points, at least {MIN_RING_LEN} are required",
            closed.len()
        );
        return None;
    }

    Some(closed)
}

/// Groups ArcGIS rings into a GeoJSON `Polygon` (if there is exactly one outer ring) or `MultiPolygon`.
///
/// Every ring is closed first and rings with less than [`MIN_RING_LEN`] points are dropped. Clockwise rings start
/// new polygons, counterclockwise rings are holes. The winding of all rings is reversed to follow the GeoJSON
/// convention.
///
/// Holes are assigned to polygons in two passes, both taking holes from the last one found and checking polygons
/// from the last one created:
/// 1. a hole goes to the first polygon whose outer ring contains it without crossing it;
/// 2. remaining holes go to the first polygon whose outer ring crosses them. A hole that matches no polygon becomes
///    the outer ring of a polygon of its own.
///
/// Every valid input ring is present in the output.
pub fn group_rings(rings: &[Vec<Position>]) -> Value {
    let mut groups: Vec<RingGroup> = vec![];
    let mut holes = vec![];

    for ring in rings.iter().filter_map(|ring| close_ring(ring)) {
        match ring.winding() {
            Winding::Clockwise => groups.push(RingGroup::new(ring.into_reversed())),
            Winding::CounterClockwise => holes.push(ring.into_reversed()),
        }
    }

    let mut uncontained_holes = vec![];
    while let Some(hole) = holes.pop() {
        match groups
            .iter_mut()
            .rev()
            .find(|group| group.outer.contains_contour(&hole))
        {
            Some(group) => group.holes.push(hole),
            None => uncontained_holes.push(hole),
        }
    }

    while let Some(hole) = uncontained_holes.pop() {
        match groups
            .iter_mut()
            .rev()
            .find(|group| group.outer.intersects(&hole))
        {
            Some(group) => group.holes.push(hole),
            None => {
                log::debug!("Hole is outside of all outer rings, converting it into a separate polygon");
                groups.push(RingGroup::new(hole.into_reversed()));
            }
        }
    }

    let polygons: Vec<PolygonType> = groups.into_iter().map(RingGroup::into_polygon).collect();
    match <[PolygonType; 1]>::try_from(polygons) {
        Ok([polygon]) => Value::Polygon(polygon),
        Err(polygons) => Value::MultiPolygon(polygons),
    }
}

/// Converts the rings of one GeoJSON polygon into ArcGIS rings: the outer ring is made clockwise and the holes
/// counterclockwise.
///
/// All rings are closed. Holes with less than [`MIN_RING_LEN`] points are dropped. If the outer ring is too short,
/// the whole polygon is dropped, holes included.
pub fn orient_rings(polygon: &[Vec<Position>]) -> Vec<Vec<Position>> {
    let Some((outer, holes)) = polygon.split_first() else {
        return vec![];
    };

    let Some(outer) = close_ring(outer) else {
        return vec![];
    };

    iter::once(outer.with_winding(Winding::Clockwise))
        .chain(
            holes
                .iter()
                .filter_map(|hole| close_ring(hole))
                .map(|hole| hole.with_winding(Winding::CounterClockwise)),
        )
        .map(ClosedContour::into_points)
        .collect()
}

/// Converts the polygons of a GeoJSON multipolygon into a single flat list of ArcGIS rings. See [`orient_rings`].
pub fn flatten_multi_polygon_rings(polygons: &[PolygonType]) -> Vec<Vec<Position>> {
    polygons
        .iter()
        .flat_map(|polygon| orient_rings(polygon))
        .collect()
}
