//! ArcGIS JSON data model.
//!
//! ArcGIS JSON objects carry no type tag: the kind of a geometry is defined by the fields present in the object
//! (`x`/`y` for a point, `rings` for a polygon etc). [`ArcGis::from_value`] looks at the fields once, at the
//! boundary, and produces one of the variants below. The rest of the crate only matches on these variants.
//!
//! Classification never fails. Objects that match no known shape become [`ArcGis::Empty`], shape fields of the
//! wrong JSON type are treated as absent and coordinates with non-numeric components are skipped.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ArcJsonError;

/// Coordinate array: `[x, y]`, `[x, y, z]`, `[x, y, m]` or `[x, y, z, m]`.
pub type Position = Vec<f64>;

/// Coordinate reference annotation of an ArcGIS object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReference {
    /// Well-known id of the reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<u32>,
    /// Latest well-known id of the reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_wkid: Option<u32>,
    /// Well-known text definition of the reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
}

impl SpatialReference {
    /// Well-known id of WGS84 longitude/latitude in degrees, the only reference GeoJSON allows.
    pub const WGS84_WKID: u32 = 4326;

    /// WGS84 longitude/latitude reference.
    pub fn wgs84() -> Self {
        Self {
            wkid: Some(Self::WGS84_WKID),
            ..Default::default()
        }
    }

    /// Returns true if the `wkid` or the `latestWkid` of the reference is WGS84. References given only by their
    /// WKT definition are never considered WGS84.
    pub fn is_wgs84(&self) -> bool {
        self.wkid == Some(Self::WGS84_WKID) || self.latest_wkid == Some(Self::WGS84_WKID)
    }

    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let value = object.get("spatialReference").filter(|v| !v.is_null())?;
        match serde_json::from_value(value.clone()) {
            Ok(reference) => Some(reference),
            Err(err) => {
                log::warn!(
                    "Spatial reference {value} can not be read, coordinates are not reprojected: {err}"
                );
                None
            }
        }
    }
}

/// Point geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Elevation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Measure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Set of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiPoint {
    /// Points.
    pub points: Vec<Position>,
    /// Whether the points have elevation.
    #[serde(skip_serializing_if = "is_false")]
    pub has_z: bool,
    /// Whether the points have measures.
    #[serde(skip_serializing_if = "is_false")]
    pub has_m: bool,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Set of paths. A single path corresponds to a GeoJSON `LineString`, several paths to a `MultiLineString`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    /// Paths. Paths are open, the last point is not connected to the first one.
    pub paths: Vec<Vec<Position>>,
    /// Whether the paths have elevation.
    #[serde(skip_serializing_if = "is_false")]
    pub has_z: bool,
    /// Whether the paths have measures.
    #[serde(skip_serializing_if = "is_false")]
    pub has_m: bool,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Set of rings.
///
/// Rings are not grouped into polygons and carry no outer/hole tagging. By convention outer rings are clockwise
/// and holes are counterclockwise, but which outer ring a hole belongs to is not recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    /// Rings.
    pub rings: Vec<Vec<Position>>,
    /// Whether the rings have elevation.
    #[serde(skip_serializing_if = "is_false")]
    pub has_z: bool,
    /// Whether the rings have measures.
    #[serde(skip_serializing_if = "is_false")]
    pub has_m: bool,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Minimum x.
    pub xmin: f64,
    /// Minimum y.
    pub ymin: f64,
    /// Maximum x.
    pub xmax: f64,
    /// Maximum y.
    pub ymax: f64,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// ArcGIS geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Geometry {
    /// Point.
    Point(Point),
    /// Multipoint.
    MultiPoint(MultiPoint),
    /// Polyline.
    Polyline(Polyline),
    /// Polygon.
    Polygon(Polygon),
    /// Envelope.
    Envelope(Envelope),
    /// List of geometries, serialized as a JSON array. ArcGIS has no collection geometry type; this variant keeps
    /// the members of a GeoJSON geometry collection when it is the geometry of a feature.
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Coordinate reference of the geometry.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        match self {
            Geometry::Point(v) => v.spatial_reference.as_ref(),
            Geometry::MultiPoint(v) => v.spatial_reference.as_ref(),
            Geometry::Polyline(v) => v.spatial_reference.as_ref(),
            Geometry::Polygon(v) => v.spatial_reference.as_ref(),
            Geometry::Envelope(v) => v.spatial_reference.as_ref(),
            Geometry::Collection(_) => None,
        }
    }

    /// Name of the geometry type as used in the `geometryType` field of feature sets. Collections have no type
    /// name.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Geometry::Point(_) => Some("esriGeometryPoint"),
            Geometry::MultiPoint(_) => Some("esriGeometryMultipoint"),
            Geometry::Polyline(_) => Some("esriGeometryPolyline"),
            Geometry::Polygon(_) => Some("esriGeometryPolygon"),
            Geometry::Envelope(_) => Some("esriGeometryEnvelope"),
            Geometry::Collection(_) => None,
        }
    }

    /// Classifies a JSON value as a geometry. Returns `None` if the value has none of the geometry shape fields.
    ///
    /// An array is read as [`Geometry::Collection`] if every element is a geometry.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            Value::Array(items) => items
                .iter()
                .map(Self::from_value)
                .collect::<Option<Vec<_>>>()
                .map(Geometry::Collection),
            _ => None,
        }
    }

    /// Shape fields are checked in a fixed order and the first one present wins:
    /// `x`/`y`, `points`, `paths`, `rings`, `xmin`/`ymin`/`xmax`/`ymax`.
    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let spatial_reference = || SpatialReference::from_object(object);
        let has_z = flag(object, "hasZ");
        let has_m = flag(object, "hasM");

        if let (Some(x), Some(y)) = (number(object, "x"), number(object, "y")) {
            return Some(Geometry::Point(Point {
                x,
                y,
                z: number(object, "z"),
                m: number(object, "m"),
                spatial_reference: spatial_reference(),
            }));
        }

        if let Some(points) = object.get("points").and_then(Value::as_array) {
            return Some(Geometry::MultiPoint(MultiPoint {
                points: positions(points),
                has_z,
                has_m,
                spatial_reference: spatial_reference(),
            }));
        }

        if let Some(paths) = object.get("paths").and_then(Value::as_array) {
            return Some(Geometry::Polyline(Polyline {
                paths: position_lists(paths),
                has_z,
                has_m,
                spatial_reference: spatial_reference(),
            }));
        }

        if let Some(rings) = object.get("rings").and_then(Value::as_array) {
            return Some(Geometry::Polygon(Polygon {
                rings: position_lists(rings),
                has_z,
                has_m,
                spatial_reference: spatial_reference(),
            }));
        }

        if let (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) = (
            number(object, "xmin"),
            number(object, "ymin"),
            number(object, "xmax"),
            number(object, "ymax"),
        ) {
            return Some(Geometry::Envelope(Envelope {
                xmin,
                ymin,
                xmax,
                ymax,
                spatial_reference: spatial_reference(),
            }));
        }

        None
    }
}

/// Feature: a geometry with attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Geometry of the feature. `None` if the feature has no geometry or the geometry is not recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    /// Attributes of the feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

impl Feature {
    /// Reads a feature from a JSON value. Values that are not objects produce an empty feature.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_object).unwrap_or_default()
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let geometry = object.get("geometry").and_then(Geometry::from_value);
        if geometry.is_none() && object.get("geometry").is_some_and(|v| !v.is_null()) {
            log::debug!("Feature geometry is not recognized, treating it as empty");
        }

        Self {
            geometry,
            attributes: object.get("attributes").and_then(Value::as_object).cloned(),
            spatial_reference: SpatialReference::from_object(object),
        }
    }
}

/// Ordered list of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    /// Features.
    pub features: Vec<Feature>,
    /// Type of the features geometries, e.g. `esriGeometryPolygon`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    /// Coordinate reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Any ArcGIS JSON value the codec understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcGis {
    /// A single geometry.
    Geometry(Geometry),
    /// A single feature.
    Feature(Feature),
    /// A list of features, read from an object with a `features` field or from an array of features.
    FeatureSet(FeatureSet),
    /// A list of geometries, serialized as a JSON array.
    Geometries(Vec<Geometry>),
    /// A value with no recognized shape. Serialized as an empty object.
    Empty,
}

impl ArcGis {
    /// Classifies a JSON value.
    ///
    /// Objects are checked for, in this order: a `features` array, geometry shape fields (see [`Geometry`]), a
    /// `geometry` or `attributes` field. Arrays become [`ArcGis::FeatureSet`] when every element is a feature and
    /// [`ArcGis::Geometries`] when every element is a geometry. Anything else is [`ArcGis::Empty`].
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(object) => Self::from_object(object),
            Value::Array(items) => Self::from_array(items),
            _ => ArcGis::Empty,
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        if let Some(features) = object.get("features").and_then(Value::as_array) {
            return ArcGis::FeatureSet(FeatureSet {
                features: features.iter().map(Feature::from_value).collect(),
                geometry_type: object
                    .get("geometryType")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                spatial_reference: SpatialReference::from_object(object),
            });
        }

        if let Some(geometry) = Geometry::from_object(object) {
            return ArcGis::Geometry(geometry);
        }

        if object.contains_key("geometry") || object.contains_key("attributes") {
            return ArcGis::Feature(Feature::from_object(object));
        }

        ArcGis::Empty
    }

    fn from_array(items: &[Value]) -> Self {
        let classified: Vec<ArcGis> = items.iter().map(Self::from_value).collect();

        if classified.iter().all(|v| matches!(v, ArcGis::Geometry(_))) {
            return ArcGis::Geometries(
                classified
                    .into_iter()
                    .filter_map(|v| match v {
                        ArcGis::Geometry(geometry) => Some(geometry),
                        _ => None,
                    })
                    .collect(),
            );
        }

        if classified.iter().all(|v| matches!(v, ArcGis::Feature(_))) {
            return ArcGis::FeatureSet(FeatureSet {
                features: classified
                    .into_iter()
                    .filter_map(|v| match v {
                        ArcGis::Feature(feature) => Some(feature),
                        _ => None,
                    })
                    .collect(),
                ..Default::default()
            });
        }

        log::warn!("Array mixes features and geometries or contains unknown values, ignoring it");
        ArcGis::Empty
    }

    /// Serializes the value into a JSON value.
    pub fn to_value(&self) -> Result<Value, ArcJsonError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reads a value from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArcJsonError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(&value))
    }
}

impl FromStr for ArcGis {
    type Err = ArcJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_value(&value))
    }
}

impl From<Geometry> for ArcGis {
    fn from(value: Geometry) -> Self {
        Self::Geometry(value)
    }
}

impl From<Feature> for ArcGis {
    fn from(value: Feature) -> Self {
        Self::Feature(value)
    }
}

impl From<FeatureSet> for ArcGis {
    fn from(value: FeatureSet) -> Self {
        Self::FeatureSet(value)
    }
}

impl Serialize for ArcGis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ArcGis::Geometry(v) => v.serialize(serializer),
            ArcGis::Feature(v) => v.serialize(serializer),
            ArcGis::FeatureSet(v) => v.serialize(serializer),
            ArcGis::Geometries(v) => v.serialize(serializer),
            ArcGis::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for ArcGis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn number(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object.get(key).and_then(Value::as_f64)
}

fn flag(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn position(value: &Value) -> Option<Position> {
    value
        .as_array()?
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Position>>()
}

fn positions(values: &[Value]) -> Vec<Position> {
    values
        .iter()
        .filter_map(|value| {
            let position = position(value);
            if position.is_none() {
                log::debug!("Skipping invalid coordinate {value}");
            }
            position
        })
        .collect()
}

fn position_lists(values: &[Value]) -> Vec<Vec<Position>> {
    values
        .iter()
        .map(|value| value.as_array().map(|v| positions(v)).unwrap_or_default())
        .collect()
}
