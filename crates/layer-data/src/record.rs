//! Feature records and record sets.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Country code property of indicator layers.
pub const ISO3_COLUMN: &str = "iso3";
/// Indicator value property of indicator layers.
pub const VALUE_COLUMN: &str = "data_value";
/// Observation year property of indicator layers.
pub const YEAR_COLUMN: &str = "data_year";

/// One feature of a layer: optional id, untouched geometry and its properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Raw GeoJSON geometry; never interpreted here.
    #[serde(default)]
    pub geometry: Option<Value>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl FeatureRecord {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self {
            id: None,
            geometry: None,
            properties,
        }
    }

    pub fn property(&self, column: &str) -> Option<&Value> {
        self.properties.get(column)
    }

    /// Textual form of a scalar property, used for equality filters.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text.
    /// Null, arrays, objects and missing properties have no text.
    pub fn property_text(&self, column: &str) -> Option<Cow<'_, str>> {
        match self.property(column)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// Integer year held in `column`, accepting integer-valued strings.
    pub fn year_in(&self, column: &str) -> Option<i32> {
        match self.property(column)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => i32::try_from(i).ok(),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                    .map(|f| f as i32),
            },
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iso3(&self) -> Option<&str> {
        self.property(ISO3_COLUMN).and_then(Value::as_str)
    }

    /// Indicator value; numeric strings are accepted.
    pub fn data_value(&self) -> Option<f64> {
        match self.property(VALUE_COLUMN)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn data_year(&self) -> Option<i32> {
        self.year_in(YEAR_COLUMN)
    }

    /// Typed view of an indicator row, if all three indicator properties are present.
    pub fn observation(&self) -> Option<Observation> {
        Some(Observation {
            iso3: self.iso3()?.to_string(),
            value: self.data_value()?,
            year: self.data_year()?,
        })
    }
}

/// A single indicator observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub iso3: String,
    pub value: f64,
    pub year: i32,
}

/// Ordered rows of a layer.
///
/// Rows are shared: cloning or filtering a set never copies or mutates records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    rows: Vec<Arc<FeatureRecord>>,
}

impl RecordSet {
    pub fn new(records: Vec<FeatureRecord>) -> Self {
        records.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.rows.iter().map(Arc::as_ref)
    }

    pub fn get(&self, index: usize) -> Option<&FeatureRecord> {
        self.rows.get(index).map(Arc::as_ref)
    }

    /// Subset of rows satisfying `predicate`, sharing records with `self`.
    pub fn retain_matching<P>(&self, mut predicate: P) -> RecordSet
    where
        P: FnMut(&FeatureRecord) -> bool,
    {
        RecordSet {
            rows: self
                .rows
                .iter()
                .filter(|row| predicate(row))
                .cloned()
                .collect(),
        }
    }

    /// True when both sets hold the very same record allocations in the same order.
    pub fn shares_rows_with(&self, other: &RecordSet) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }

    /// Indicator observations of every complete row, in order.
    pub fn observations(&self) -> Vec<Observation> {
        self.iter().filter_map(FeatureRecord::observation).collect()
    }
}

impl FromIterator<FeatureRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = FeatureRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
