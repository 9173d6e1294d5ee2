//! WMS GetMap tile URL templates.
//!
//! The tile URL is handed to a web map client which fetches tiles itself,
//! replacing [`BBOX_PLACEHOLDER`] with the extent of every tile it needs.

use ogc_common::{BoundingBox, LayerId, OgcResult};
use serde::{Deserialize, Serialize};

use crate::encode::{merge_params, FORM_QUERY_COMPONENT};
use crate::params::QueryParams;

/// Token substituted by the map client with the tile extent in EPSG:3857.
pub const BBOX_PLACEHOLDER: &str = "{bbox-epsg-3857}";

pub const WMS_SERVICE: &str = "WMS";
pub const WMS_VERSION: &str = "1.1.1";
pub const GET_MAP: &str = "GetMap";
pub const TILE_FORMAT: &str = "image/png";
pub const TILE_SRS: &str = "EPSG:3857";
pub const TILE_SIZE: u32 = 256;

/// Vendor parameter carrying an ECQL filter expression.
pub const CQL_FILTER: &str = "CQL_FILTER";

/// The fixed parameters of a transparent 256px PNG tile request.
pub fn tile_query_params(layer: &LayerId) -> QueryParams {
    QueryParams::new()
        .with("SERVICE", WMS_SERVICE)
        .with("VERSION", WMS_VERSION)
        .with("REQUEST", GET_MAP)
        .with("FORMAT", TILE_FORMAT)
        .with("TRANSPARENT", "TRUE")
        .with("SRS", TILE_SRS)
        .with("bbox", BBOX_PLACEHOLDER)
        .with("LAYERS", layer.as_str())
        .with("WIDTH", TILE_SIZE.to_string())
        .with("HEIGHT", TILE_SIZE.to_string())
}

/// Build a `GetMap` tile template URL for `layer_id`.
///
/// An empty or absent `filter_expression` adds no filter parameter.
pub fn build_tile_query_url(
    base_url: &str,
    layer_id: &str,
    filter_expression: Option<&str>,
) -> OgcResult<String> {
    let layer = LayerId::parse(layer_id)?;
    let mut params = tile_query_params(&layer);
    if let Some(filter) = filter_expression.filter(|f| !f.is_empty()) {
        params.insert(CQL_FILTER, filter);
    }

    let url = merge_params(base_url, &params, FORM_QUERY_COMPONENT, &[BBOX_PLACEHOLDER])?;
    Ok(url.into())
}

/// A tile URL still holding the bbox placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileUrlTemplate(String);

impl TileUrlTemplate {
    pub fn build(
        base_url: &str,
        layer_id: &str,
        filter_expression: Option<&str>,
    ) -> OgcResult<Self> {
        build_tile_query_url(base_url, layer_id, filter_expression).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Concrete URL for one tile, as the map client would request it.
    pub fn resolve(&self, bbox: &BoundingBox) -> String {
        self.0.replace(BBOX_PLACEHOLDER, &bbox.to_wms_string())
    }

    /// Concrete URL for XYZ tile `(z, x, y)`.
    pub fn resolve_tile(&self, z: u32, x: u32, y: u32) -> String {
        self.resolve(&BoundingBox::web_mercator_tile(z, x, y))
    }
}

impl std::fmt::Display for TileUrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
