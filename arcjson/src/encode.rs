//! GeoJSON to ArcGIS JSON conversion.

use arcjson_types::CartesianPoint2d;
use geojson::{Feature, GeoJson, Position};

use crate::arcgis::{self, ArcGis, FeatureSet, SpatialReference};
use crate::error::ArcJsonError;
use crate::id::{id_to_value, DEFAULT_ID_FIELD};
use crate::rings::{flatten_multi_polygon_rings, orient_rings};

/// Converts a GeoJSON value into ArcGIS JSON.
///
/// The feature id is written into the `id_field` attribute, or into `OBJECTID` if no field is given. Every
/// geometry is annotated with the WGS84 spatial reference.
///
/// * feature collections become [`ArcGis::FeatureSet`], with `geometryType` set if all features have geometries
///   of the same type;
/// * geometry collections become [`ArcGis::Geometries`], with nested collections flattened in order.
pub fn encode(geojson: &GeoJson, id_field: Option<&str>) -> ArcGis {
    match geojson {
        GeoJson::Geometry(geometry) => encode_geometry(geometry),
        GeoJson::Feature(feature) => ArcGis::Feature(encode_feature(feature, id_field)),
        GeoJson::FeatureCollection(collection) => {
            let features: Vec<_> = collection
                .features
                .iter()
                .map(|feature| encode_feature(feature, id_field))
                .collect();

            ArcGis::FeatureSet(FeatureSet {
                geometry_type: common_geometry_type(&features),
                features,
                spatial_reference: None,
            })
        }
    }
}

/// Parses GeoJSON text and converts it into ArcGIS JSON.
pub fn encode_str(text: &str, id_field: Option<&str>) -> Result<ArcGis, ArcJsonError> {
    let geojson: GeoJson = text.parse()?;
    Ok(encode(&geojson, id_field))
}

/// Converts a GeoJSON geometry. Geometry collections become [`ArcGis::Geometries`], other geometries
/// [`ArcGis::Geometry`].
pub fn encode_geometry(geometry: &geojson::Geometry) -> ArcGis {
    match encode_value(&geometry.value) {
        arcgis::Geometry::Collection(geometries) => ArcGis::Geometries(geometries),
        geometry => ArcGis::Geometry(geometry),
    }
}

/// Converts a GeoJSON feature.
///
/// Properties are copied into attributes, and the feature id (if any) is added as the `id_field` attribute
/// (`OBJECTID` by default), replacing a property with the same name. A feature without properties gets empty
/// attributes.
///
/// A geometry collection is encoded as [`arcgis::Geometry::Collection`], a list of the encoded member geometries.
pub fn encode_feature(feature: &Feature, id_field: Option<&str>) -> arcgis::Feature {
    let mut attributes = feature.properties.clone().unwrap_or_default();
    if let Some(id) = &feature.id {
        attributes.insert(
            id_field.unwrap_or(DEFAULT_ID_FIELD).to_string(),
            id_to_value(id),
        );
    }

    arcgis::Feature {
        geometry: feature
            .geometry
            .as_ref()
            .map(|geometry| encode_value(&geometry.value)),
        attributes: Some(attributes),
        spatial_reference: None,
    }
}

fn common_geometry_type(features: &[arcgis::Feature]) -> Option<String> {
    let mut names = features
        .iter()
        .map(|feature| feature.geometry.as_ref().and_then(arcgis::Geometry::type_name));
    let first = names.next()??;
    names
        .all(|name| name == Some(first))
        .then(|| first.to_string())
}

/// Geometry collections are flattened into a single [`arcgis::Geometry::Collection`].
fn encode_value(value: &geojson::Value) -> arcgis::Geometry {
    let spatial_reference = Some(SpatialReference::wgs84());

    match value {
        geojson::Value::Point(position) => arcgis::Geometry::Point(arcgis::Point {
            x: position.x(),
            y: position.y(),
            z: position.get(2).copied(),
            m: None,
            spatial_reference,
        }),
        geojson::Value::MultiPoint(points) => arcgis::Geometry::MultiPoint(arcgis::MultiPoint {
            points: points.clone(),
            has_z: has_z(points.first()),
            has_m: false,
            spatial_reference,
        }),
        geojson::Value::LineString(line) => arcgis::Geometry::Polyline(arcgis::Polyline {
            paths: vec![line.clone()],
            has_z: has_z(line.first()),
            has_m: false,
            spatial_reference,
        }),
        geojson::Value::MultiLineString(lines) => arcgis::Geometry::Polyline(arcgis::Polyline {
            paths: lines.clone(),
            has_z: has_z(lines.first().and_then(|line| line.first())),
            has_m: false,
            spatial_reference,
        }),
        geojson::Value::Polygon(polygon) => arcgis::Geometry::Polygon(arcgis::Polygon {
            rings: orient_rings(polygon),
            has_z: has_z(polygon.first().and_then(|ring| ring.first())),
            has_m: false,
            spatial_reference,
        }),
        geojson::Value::MultiPolygon(polygons) => arcgis::Geometry::Polygon(arcgis::Polygon {
            rings: flatten_multi_polygon_rings(polygons),
            has_z: has_z(
                polygons
                    .first()
                    .and_then(|polygon| polygon.first())
                    .and_then(|ring| ring.first()),
            ),
            has_m: false,
            spatial_reference,
        }),
        geojson::Value::GeometryCollection(geometries) => {
            let mut flattened = vec![];
            for geometry in geometries {
                match encode_value(&geometry.value) {
                    arcgis::Geometry::Collection(nested) => flattened.extend(nested),
                    encoded => flattened.push(encoded),
                }
            }
            arcgis::Geometry::Collection(flattened)
        }
    }
}

fn has_z(first_position: Option<&Position>) -> bool {
    first_position.is_some_and(|position| position.len() > 2)
}
