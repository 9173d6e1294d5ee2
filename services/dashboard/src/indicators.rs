//! Catalogue of indicators published on the map server.

use std::ops::RangeInclusive;

use ogc_common::{LayerId, OgcError, OgcResult};
use serde::Serialize;

/// First year offered by the year selector.
pub const FIRST_YEAR: i32 = 1990;
/// Last year offered by the year selector.
pub const LAST_YEAR: i32 = 2014;

/// An indicator with one layer per year and one multi-year layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub key: &'static str,
    pub title: &'static str,
    /// Per-year layer name; `{}` is replaced by the year.
    pub layer_template: &'static str,
    /// Layer holding every year, used for country time series.
    pub series_layer: &'static str,
}

pub const FISCAL_BALANCE: Indicator = Indicator {
    key: "fiscal_balance",
    title: "Fiscal Balance indicator",
    layer_template: "geonode:fiscal_balance_{}",
    series_layer: "geonode:fiscal_balance_layer",
};

pub const INDICATORS: &[Indicator] = &[FISCAL_BALANCE];

/// Years offered by the year selector.
pub fn selectable_years() -> RangeInclusive<i32> {
    FIRST_YEAR..=LAST_YEAR
}

/// Look an indicator up by key.
pub fn find(key: &str) -> OgcResult<&'static Indicator> {
    INDICATORS
        .iter()
        .find(|i| i.key == key)
        .ok_or_else(|| OgcError::invalid_input(format!("unknown indicator '{}'", key)))
}

impl Indicator {
    /// Layer holding this indicator's values for `year`.
    pub fn layer_for_year(&self, year: i32) -> OgcResult<LayerId> {
        LayerId::parse(self.layer_template.replacen("{}", &year.to_string(), 1))
    }

    pub fn series_layer(&self) -> OgcResult<LayerId> {
        LayerId::parse(self.series_layer)
    }
}
