//! Error type used by the crate.

use thiserror::Error;

/// Error returned when text can not be read as a JSON value.
///
/// Conversion between in-memory values never fails. Errors only come from the parsing and serialization helpers
/// around it.
#[derive(Debug, Error)]
pub enum ArcJsonError {
    /// The input is not valid JSON, or a value could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is valid JSON but not a valid GeoJSON object.
    #[error("invalid geojson: {0}")]
    GeoJson(#[from] geojson::Error),
}
