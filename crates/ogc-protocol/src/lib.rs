//! OGC WFS and WMS request URL construction.
//!
//! Supports:
//! - WFS 1.0.0 `GetFeature` with GeoJSON output
//! - WMS 1.1.1 `GetMap` tile templates in EPSG:3857

pub mod encode;
pub mod endpoints;
pub mod params;
pub mod wfs;
pub mod wms;

pub use endpoints::ServiceEndpoints;
pub use params::QueryParams;
pub use wfs::{build_feature_query_url, build_feature_query_url_with_params};
pub use wms::{build_tile_query_url, TileUrlTemplate, BBOX_PLACEHOLDER};
