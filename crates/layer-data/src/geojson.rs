//! GeoJSON FeatureCollection parsing.
//!
//! Only the collection envelope and feature members are validated. Geometry
//! is kept as raw JSON and extra members (`crs`, `totalFeatures`, ...) are ignored.

use ogc_common::{OgcError, OgcResult};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::record::{FeatureRecord, RecordSet};

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    type_: String,
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "type", default)]
    type_: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// Parse a response body as a GeoJSON `FeatureCollection`.
pub fn parse_feature_collection(body: &[u8]) -> OgcResult<RecordSet> {
    let raw: RawCollection = serde_json::from_slice(body)?;

    if raw.type_ != "FeatureCollection" {
        return Err(OgcError::Parse(format!(
            "expected a FeatureCollection, got '{}'",
            raw.type_
        )));
    }

    raw.features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| feature_record(index, feature))
        .collect::<OgcResult<Vec<_>>>()
        .map(RecordSet::new)
}

fn feature_record(index: usize, feature: RawFeature) -> OgcResult<FeatureRecord> {
    match feature.type_.as_deref() {
        Some("Feature") => {}
        Some(other) => {
            return Err(OgcError::Parse(format!(
                "feature {}: expected type 'Feature', got '{}'",
                index, other
            )))
        }
        None => {
            return Err(OgcError::Parse(format!(
                "feature {}: missing 'type' member",
                index
            )))
        }
    }

    let id = match feature.id {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(FeatureRecord {
        id,
        geometry: feature.geometry.filter(|g| !g.is_null()),
        properties: feature.properties.unwrap_or_default(),
    })
}
