//! ArcGIS JSON to GeoJSON conversion.

use arcjson_types::Rect;
use geojson::{Feature, FeatureCollection, GeoJson, Position};
use serde_json::Value;

use crate::arcgis::{self, ArcGis, SpatialReference};
use crate::error::ArcJsonError;
use crate::id::resolve_id;
use crate::rings::group_rings;

/// Converts an ArcGIS value into GeoJSON.
///
/// `id_field` names the attribute to use as the feature id, before the default `OBJECTID` and `FID` attributes
/// (see [`resolve_id`]).
///
/// The conversion never fails. A value of unrecognized shape ([`ArcGis::Empty`]) becomes a feature without
/// geometry and properties, so callers always get a usable object. Spatial references other than WGS84 are
/// reported with a warning, but the coordinates are not reprojected.
pub fn decode(arcgis: &ArcGis, id_field: Option<&str>) -> GeoJson {
    match arcgis {
        ArcGis::Geometry(geometry) => GeoJson::Geometry(decode_geometry(geometry)),
        ArcGis::Feature(feature) => GeoJson::Feature(decode_feature(feature, id_field)),
        ArcGis::FeatureSet(feature_set) => {
            GeoJson::FeatureCollection(decode_feature_set(feature_set, id_field))
        }
        ArcGis::Geometries(geometries) => GeoJson::Geometry(geojson::Geometry::new(
            geojson::Value::GeometryCollection(geometries.iter().map(decode_geometry).collect()),
        )),
        ArcGis::Empty => {
            log::debug!("Value has no recognized shape, decoding it as an empty feature");
            GeoJson::Feature(empty_feature())
        }
    }
}

/// Classifies a JSON value (see [`ArcGis::from_value`]) and converts it into GeoJSON.
pub fn decode_value(value: &Value, id_field: Option<&str>) -> GeoJson {
    decode(&ArcGis::from_value(value), id_field)
}

/// Parses ArcGIS JSON text and converts it into GeoJSON.
pub fn decode_str(text: &str, id_field: Option<&str>) -> Result<GeoJson, ArcJsonError> {
    let arcgis: ArcGis = text.parse()?;
    Ok(decode(&arcgis, id_field))
}

/// Converts an ArcGIS geometry into a GeoJSON geometry.
///
/// * point - `Point`, with the elevation as the third coordinate if present;
/// * multipoint - `MultiPoint`;
/// * polyline - `LineString` if it has exactly one path, `MultiLineString` otherwise;
/// * polygon - `Polygon` or `MultiPolygon`, see [`group_rings`];
/// * envelope - `Polygon` with one rectangular ring;
/// * collection - `GeometryCollection`.
pub fn decode_geometry(geometry: &arcgis::Geometry) -> geojson::Geometry {
    check_spatial_reference(geometry.spatial_reference());

    let value = match geometry {
        arcgis::Geometry::Point(point) => {
            let mut position = vec![point.x, point.y];
            position.extend(point.z);
            geojson::Value::Point(position)
        }
        arcgis::Geometry::MultiPoint(multi_point) => {
            geojson::Value::MultiPoint(multi_point.points.clone())
        }
        arcgis::Geometry::Polyline(polyline) => match polyline.paths.as_slice() {
            [path] => geojson::Value::LineString(path.clone()),
            paths => geojson::Value::MultiLineString(paths.to_vec()),
        },
        arcgis::Geometry::Polygon(polygon) => group_rings(&polygon.rings),
        arcgis::Geometry::Envelope(envelope) => {
            let rect = Rect::new(envelope.xmin, envelope.ymin, envelope.xmax, envelope.ymax);
            let ring: Vec<Position> = rect.into_contour().into_points();
            geojson::Value::Polygon(vec![ring])
        }
        arcgis::Geometry::Collection(geometries) => {
            geojson::Value::GeometryCollection(geometries.iter().map(decode_geometry).collect())
        }
    };

    geojson::Geometry::new(value)
}

/// Converts an ArcGIS feature into a GeoJSON feature. Attributes are copied into properties as is.
pub fn decode_feature(feature: &arcgis::Feature, id_field: Option<&str>) -> Feature {
    check_spatial_reference(feature.spatial_reference.as_ref());

    Feature {
        bbox: None,
        geometry: feature.geometry.as_ref().map(decode_geometry),
        id: feature
            .attributes
            .as_ref()
            .and_then(|attributes| resolve_id(attributes, id_field)),
        properties: feature.attributes.clone(),
        foreign_members: None,
    }
}

/// Converts an ArcGIS feature set into a GeoJSON feature collection.
pub fn decode_feature_set(
    feature_set: &arcgis::FeatureSet,
    id_field: Option<&str>,
) -> FeatureCollection {
    check_spatial_reference(feature_set.spatial_reference.as_ref());

    FeatureCollection {
        bbox: None,
        features: feature_set
            .features
            .iter()
            .map(|feature| decode_feature(feature, id_field))
            .collect(),
        foreign_members: None,
    }
}

fn empty_feature() -> Feature {
    Feature {
        bbox: None,
        geometry: None,
        id: None,
        properties: None,
        foreign_members: None,
    }
}

fn check_spatial_reference(spatial_reference: Option<&SpatialReference>) {
    if let Some(spatial_reference) = spatial_reference {
        if !spatial_reference.is_wgs84() {
            log::warn!(
                "Object converted in non-standard crs, coordinates are not reprojected: {spatial_reference:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geojson::feature::Id;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{capture_logs, warned};

    fn decode_json(value: Value, id_field: Option<&str>) -> GeoJson {
        decode_value(&value, id_field)
    }

    fn geometry_value(geojson: GeoJson) -> geojson::Value {
        match geojson {
            GeoJson::Geometry(geometry) => geometry.value,
            other => panic!("expected geometry, got {other:?}"),
        }
    }

    #[test]
    fn point() {
        let value = geometry_value(decode_json(json!({"x": 1, "y": 2}), None));
        assert_eq!(value, geojson::Value::Point(vec![1.0, 2.0]));

        let value = geometry_value(decode_json(json!({"x": 1, "y": 2, "z": 0, "m": 5}), None));
        assert_eq!(value, geojson::Value::Point(vec![1.0, 2.0, 0.0]));
    }

    #[test]
    fn multi_point() {
        let value = geometry_value(decode_json(json!({"points": [[1, 2], [3, 4]]}), None));
        assert_eq!(
            value,
            geojson::Value::MultiPoint(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        );
    }

    #[test]
    fn polylines() {
        let value = geometry_value(decode_json(json!({"paths": [[[0, 0], [1, 1]]]}), None));
        assert_eq!(
            value,
            geojson::Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]])
        );

        let value = geometry_value(decode_json(
            json!({"paths": [[[0, 0], [1, 1]], [[2, 2], [3, 3]]]}),
            None,
        ));
        assert_matches!(value, geojson::Value::MultiLineString(lines) if lines.len() == 2);

        let value = geometry_value(decode_json(json!({"paths": []}), None));
        assert_eq!(value, geojson::Value::MultiLineString(vec![]));
    }

    #[test]
    fn envelope() {
        let value = geometry_value(decode_json(
            json!({"xmin": 0, "ymin": 0, "xmax": 10, "ymax": 10}),
            None,
        ));
        assert_eq!(
            value,
            geojson::Value::Polygon(vec![vec![
                vec![10.0, 10.0],
                vec![0.0, 10.0],
                vec![0.0, 0.0],
                vec![10.0, 0.0],
                vec![10.0, 10.0],
            ]])
        );
    }

    #[test]
    fn polygon() {
        let value = geometry_value(decode_json(
            json!({"rings": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]}),
            None,
        ));
        assert_eq!(
            value,
            geojson::Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![10.0, 0.0],
                vec![10.0, 10.0],
                vec![0.0, 10.0],
                vec![0.0, 0.0],
            ]])
        );
    }

    #[test]
    fn feature() {
        let geojson = decode_json(
            json!({
                "geometry": {"x": 1, "y": 2},
                "attributes": {"OBJECTID": 12, "name": "Tower"}
            }),
            None,
        );
        assert_matches!(geojson, GeoJson::Feature(feature) => {
            assert_eq!(feature.id, Some(Id::Number(12.into())));
            assert_matches!(
                feature.geometry,
                Some(geojson::Geometry { value: geojson::Value::Point(_), .. })
            );
            let properties = feature.properties.unwrap();
            assert_eq!(properties["name"], json!("Tower"));
            assert_eq!(properties["OBJECTID"], json!(12));
        });
    }

    #[test]
    fn feature_with_custom_id_field() {
        let value = json!({"attributes": {"code": "A1", "OBJECTID": 12}});
        assert_matches!(
            decode_json(value.clone(), Some("code")),
            GeoJson::Feature(Feature { id: Some(Id::String(id)), .. }) if id == "A1"
        );
        assert_matches!(
            decode_json(value, None),
            GeoJson::Feature(Feature { id: Some(Id::Number(id)), .. }) if id.as_u64() == Some(12)
        );
    }

    #[test]
    fn feature_without_id_or_attributes() {
        assert_matches!(
            decode_json(json!({"geometry": {"x": 1, "y": 2}}), None),
            GeoJson::Feature(Feature { id: None, properties: None, geometry: Some(_), .. })
        );
        assert_matches!(
            decode_json(json!({"attributes": {"name": "x"}}), None),
            GeoJson::Feature(Feature { id: None, properties: Some(_), geometry: None, .. })
        );
    }

    #[test]
    fn feature_with_unknown_geometry() {
        assert_matches!(
            decode_json(json!({"geometry": {}, "attributes": {}}), None),
            GeoJson::Feature(Feature { geometry: None, .. })
        );
    }

    #[test]
    fn feature_set() {
        let value = json!({
            "features": [
                {"geometry": {"x": 1, "y": 2}, "attributes": {"FID": 1}},
                {"geometry": {"paths": [[[0, 0], [1, 1]]]}, "attributes": {"FID": 2}}
            ]
        });
        assert_matches!(decode_json(value, None), GeoJson::FeatureCollection(collection) => {
            assert_eq!(collection.features.len(), 2);
            assert_eq!(collection.features[1].id, Some(Id::Number(2.into())));
        });
    }

    #[test]
    fn geometry_list() {
        let value = geometry_value(decode_json(json!([{"x": 1, "y": 2}, {"points": []}]), None));
        assert_matches!(value, geojson::Value::GeometryCollection(geometries) if geometries.len() == 2);
    }

    #[test]
    fn unknown_value() {
        assert_eq!(decode_json(json!({"foo": 1}), None), GeoJson::Feature(empty_feature()));
        assert_eq!(decode(&ArcGis::Empty, Some("id")), GeoJson::Feature(empty_feature()));
    }

    #[test]
    fn non_standard_spatial_reference_is_not_reprojected() {
        capture_logs();

        let value = geometry_value(decode_json(
            json!({"x": 1000000, "y": 2000000, "spatialReference": {"wkid": 102113}}),
            None,
        ));
        assert_eq!(value, geojson::Value::Point(vec![1000000.0, 2000000.0]));
        assert!(warned("102113"));
    }

    #[test]
    fn wkt_spatial_reference_warns() {
        capture_logs();

        let value = json!({
            "geometry": {"x": 1, "y": 2},
            "attributes": {},
            "spatialReference": {"wkt": "PROJCS[\"Local_Mercator_Grid\"]"}
        });
        assert_matches!(decode_json(value, None), GeoJson::Feature(Feature { geometry: Some(_), .. }));
        assert!(warned("Local_Mercator_Grid"));
    }

    #[test]
    fn feature_with_geometry_list() {
        let value = json!({"geometry": [{"x": 1, "y": 2}], "attributes": {"FID": 4}});
        assert_matches!(decode_json(value, None), GeoJson::Feature(feature) => {
            assert_eq!(feature.id, Some(Id::Number(4.into())));
            assert_eq!(
                feature.geometry.map(|geometry| geometry.value),
                Some(geojson::Value::GeometryCollection(vec![geojson::Geometry::new(
                    geojson::Value::Point(vec![1.0, 2.0])
                )]))
            );
        });
    }

    #[test]
    fn parse_and_decode() {
        let geojson = decode_str(r#"{"x": 1, "y": 2}"#, None).unwrap();
        assert_eq!(geometry_value(geojson), geojson::Value::Point(vec![1.0, 2.0]));

        assert_matches!(decode_str("not json", None), Err(ArcJsonError::Json(_)));
    }
}
