//! Feature identifier lookup in ArcGIS attributes.

use geojson::feature::Id;
use serde_json::{Map, Value};

/// Attribute that receives the feature id when encoding, if no other field is given.
pub const DEFAULT_ID_FIELD: &str = "OBJECTID";

/// Attributes checked for the feature id after the explicitly requested one, in this order.
pub const FALLBACK_ID_FIELDS: [&str; 2] = [DEFAULT_ID_FIELD, "FID"];

/// Finds the feature id in the `attributes`.
///
/// Checks `id_field` (if given) and then [`FALLBACK_ID_FIELDS`]. The first attribute that is present and holds a
/// string or a number is the id. Returns `None` if there is no such attribute.
pub fn resolve_id(attributes: &Map<String, Value>, id_field: Option<&str>) -> Option<Id> {
    id_field
        .into_iter()
        .chain(FALLBACK_ID_FIELDS)
        .find_map(|key| match attributes.get(key)? {
            Value::String(v) => Some(Id::String(v.clone())),
            Value::Number(v) => Some(Id::Number(v.clone())),
            _ => None,
        })
}

/// Converts a GeoJSON feature id into an attribute value.
pub fn id_to_value(id: &Id) -> Value {
    match id {
        Id::String(v) => Value::String(v.clone()),
        Id::Number(v) => Value::Number(v.clone()),
    }
}
