//! Layer data access for WFS indicator layers.
//!
//! A layer is fetched whole as a GeoJSON feature collection, optionally kept
//! in an injected [`LayerCache`], and narrowed in memory by column/value
//! filters. Nothing here reads configuration or the environment; endpoints,
//! fetchers and caches are supplied by the caller.

pub mod cache;
pub mod fetcher;
pub mod geojson;
pub mod query;
pub mod record;
pub mod source;

pub use cache::{CachedLayerSource, LayerCache, LayerCacheStats};
pub use fetcher::{HttpFetcher, ReqwestFetcher, DEFAULT_TIMEOUT};
pub use geojson::parse_feature_collection;
pub use query::{distinct_years, filter_layer, DEFAULT_YEAR_COLUMN};
pub use record::{FeatureRecord, Observation, RecordSet};
pub use source::{get_filtered_layer, layer_years, LayerSource, WfsLayerSource};
