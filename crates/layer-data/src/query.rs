//! In-memory queries over a layer's record set.

use std::collections::BTreeSet;

use crate::record::{RecordSet, YEAR_COLUMN};

/// Year column used when the caller does not name one.
pub const DEFAULT_YEAR_COLUMN: &str = YEAR_COLUMN;

/// Rows whose `column` equals `value`.
///
/// An empty `column` or `value` means "no filter" and returns `records`
/// unchanged. Values are compared against the property's textual form, so
/// `"1990"` matches both `1990` and `"1990"`.
pub fn filter_layer(records: &RecordSet, column: &str, value: &str) -> RecordSet {
    if column.is_empty() || value.is_empty() {
        return records.clone();
    }

    records.retain_matching(|record| {
        record
            .property_text(column)
            .is_some_and(|text| text == value)
    })
}

/// Distinct integer years found in `year_column`, ascending.
///
/// Rows without a usable year are skipped.
pub fn distinct_years(records: &RecordSet, year_column: &str) -> BTreeSet<i32> {
    records
        .iter()
        .filter_map(|record| record.year_in(year_column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FeatureRecord;
    use serde_json::{json, Value};

    fn rows(values: &[Value]) -> RecordSet {
        values
            .iter()
            .map(|v| FeatureRecord::new(v.as_object().cloned().unwrap_or_default()))
            .collect()
    }

    fn years_fixture() -> RecordSet {
        rows(&[
            json!({"iso3": "EGY", "year": "2000"}),
            json!({"iso3": "JOR", "year": 2000}),
            json!({"iso3": "TUN", "year": "2001"}),
            json!({"iso3": "LBN"}),
        ])
    }

    #[test]
    fn test_empty_column_or_value_is_identity() {
        let rs = years_fixture();
        assert!(filter_layer(&rs, "", "2000").shares_rows_with(&rs));
        assert!(filter_layer(&rs, "year", "").shares_rows_with(&rs));
    }

    #[test]
    fn test_filter_matches_text_form() {
        let rs = years_fixture();
        let filtered = filter_layer(&rs, "year", "2000");

        let codes: Vec<&str> = filtered.iter().filter_map(|r| r.iso3()).collect();
        assert_eq!(codes, vec!["EGY", "JOR"]);
        assert_eq!(rs.len(), 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rs = years_fixture();
        let once = filter_layer(&rs, "year", "2000");
        let twice = filter_layer(&once, "year", "2000");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_unknown_column_is_empty() {
        assert!(filter_layer(&years_fixture(), "region", "MENA").is_empty());
    }

    #[test]
    fn test_distinct_years() {
        let rs = rows(&[
            json!({"data_year": 1990}),
            json!({"data_year": 1990}),
            json!({"data_year": 1992}),
            json!({"data_year": null}),
        ]);
        let years: Vec<i32> = distinct_years(&rs, DEFAULT_YEAR_COLUMN).into_iter().collect();
        assert_eq!(years, vec![1990, 1992]);
    }

    #[test]
    fn test_distinct_years_custom_column() {
        let years = distinct_years(&years_fixture(), "year");
        assert_eq!(years, BTreeSet::from([2000, 2001]));
    }
}
