//! Data behind the dashboard views.
//!
//! Builders here are pure functions of a record set; they decide what is
//! plotted, never how it looks.

use layer_data::record::ISO3_COLUMN;
use layer_data::{filter_layer, RecordSet};
use ogc_protocol::TileUrlTemplate;
use serde::Serialize;

pub const NO_COUNTRY_TITLE: &str = "No Country Selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// Categories on x, values on y.
    #[serde(rename = "v")]
    Vertical,
    /// Values on x, categories on y.
    #[serde(rename = "h")]
    Horizontal,
}

/// One bar: a category label and its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

/// A bar chart series with its axis titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub title: String,
    pub orientation: Orientation,
    pub category_axis: String,
    pub value_axis: String,
    pub points: Vec<BarPoint>,
}

impl BarSeries {
    /// Category labels in plotting order.
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Bar values in plotting order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Raster layer for the map view: a WMS tile template plus provider token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterSource {
    #[serde(rename = "sourcetype")]
    pub source_type: &'static str,
    pub tiles: Vec<TileUrlTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Horizontal ranking of every country in a single-year layer.
///
/// Rows missing `iso3` or `data_value` are skipped; order follows the layer.
pub fn ranking_series(records: &RecordSet, name: &str) -> BarSeries {
    let points = records
        .iter()
        .filter_map(|r| {
            Some(BarPoint {
                label: r.iso3()?.to_string(),
                value: r.data_value()?,
            })
        })
        .collect();

    BarSeries {
        name: name.to_string(),
        title: name.to_string(),
        orientation: Orientation::Horizontal,
        category_axis: "Country".to_string(),
        value_axis: "Value".to_string(),
        points,
    }
}

/// Yearly values of one country from a multi-year layer.
///
/// No country selected gives an empty series titled [`NO_COUNTRY_TITLE`].
pub fn country_series(records: &RecordSet, country: Option<&str>, name: &str) -> BarSeries {
    let country = country.unwrap_or_default();
    let points = if country.is_empty() {
        Vec::new()
    } else {
        filter_layer(records, ISO3_COLUMN, country)
            .iter()
            .filter_map(|r| {
                Some(BarPoint {
                    label: r.data_year()?.to_string(),
                    value: r.data_value()?,
                })
            })
            .collect()
    };

    BarSeries {
        name: name.to_string(),
        title: if country.is_empty() {
            NO_COUNTRY_TITLE.to_string()
        } else {
            country.to_string()
        },
        orientation: Orientation::Vertical,
        category_axis: "Year".to_string(),
        value_axis: "Value".to_string(),
        points,
    }
}

/// Raster source for the map view of one tile template.
pub fn map_source(template: TileUrlTemplate, access_token: Option<&str>) -> RasterSource {
    RasterSource {
        source_type: "raster",
        tiles: vec![template],
        access_token: access_token.map(str::to_string),
    }
}
