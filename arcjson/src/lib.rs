//! Conversion of geometries and features between ArcGIS JSON and GeoJSON.
//!
//! ArcGIS JSON is the format used by ArcGIS REST services. Its objects have no type field, and polygons are
//! stored as a flat list of rings where the winding order tells outer rings apart from holes. This crate
//! classifies such objects ([`ArcGis`]), reconstructs polygons with holes from the ring lists and converts the
//! values to [`geojson`] types and back.
//!
//! ```
//! use arcjson::{decode_str, encode};
//!
//! let geojson = decode_str(r#"{"x": 10.5, "y": 20.1}"#, None).unwrap();
//! let arcgis = encode(&geojson, None);
//! assert_eq!(
//!     arcgis.to_value().unwrap(),
//!     serde_json::json!({"x": 10.5, "y": 20.1, "spatialReference": {"wkid": 4326}})
//! );
//! ```
//!
//! Both directions are fail-soft: malformed parts of the input are skipped (with a log message) instead of
//! failing the whole conversion. Errors are only returned when the input text is not valid JSON or GeoJSON.
//!
//! Coordinates are never reprojected. GeoJSON produced from ArcGIS objects in a reference system other than
//! WGS84 keeps the original coordinates and a warning is logged.

pub mod arcgis;
pub mod decode;
pub mod encode;
pub mod error;
pub mod id;
pub mod rings;

#[cfg(test)]
mod test_utils;

pub use arcgis::ArcGis;
pub use decode::{decode, decode_str, decode_value};
pub use encode::{encode, encode_str};
pub use error::ArcJsonError;
