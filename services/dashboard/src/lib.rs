//! Indicator dashboard service library.
//!
//! Turns GeoServer indicator layers into the data behind the dashboard's
//! three views: the per-year country ranking, a country's time series and
//! the raster map source.

pub mod config;
pub mod indicators;
pub mod state;
pub mod views;

pub use config::DashboardConfig;
pub use indicators::{Indicator, FISCAL_BALANCE, INDICATORS};
pub use state::DashboardState;
pub use views::{BarPoint, BarSeries, Orientation, RasterSource};
