//! WFS GetFeature URL construction.

use ogc_common::{LayerId, OgcResult};

use crate::encode::{merge_params, RELAXED_QUERY_COMPONENT};
use crate::params::QueryParams;

pub const WFS_SERVICE: &str = "WFS";
pub const WFS_VERSION: &str = "1.0.0";
pub const GET_FEATURE: &str = "GetFeature";
pub const GEOJSON_OUTPUT_FORMAT: &str = "application/json";

/// The protocol-mandated parameters of a GeoJSON `GetFeature` request.
pub fn feature_query_params(layer: &LayerId) -> QueryParams {
    QueryParams::new()
        .with("service", WFS_SERVICE)
        .with("version", WFS_VERSION)
        .with("request", GET_FEATURE)
        .with("typeName", layer.as_str())
        .with("outputFormat", GEOJSON_OUTPUT_FORMAT)
}

/// Build the `GetFeature` URL that returns every feature of `layer_id` as GeoJSON.
///
/// ```
/// let url = ogc_protocol::build_feature_query_url(
///     "http://example.com/geoserver/wfs",
///     "geonode:cpi_layer",
/// ).unwrap();
/// assert_eq!(
///     url,
///     "http://example.com/geoserver/wfs?service=WFS&version=1.0.0&request=GetFeature\
///      &typeName=geonode:cpi_layer&outputFormat=application/json"
/// );
/// ```
pub fn build_feature_query_url(base_url: &str, layer_id: &str) -> OgcResult<String> {
    build_feature_query_url_with_params(base_url, layer_id, &QueryParams::new())
}

/// Like [`build_feature_query_url`], with extra vendor parameters such as
/// `maxFeatures` or `CQL_FILTER`.
///
/// The fixed parameters win over extras and base URL pairs of the same name.
/// `extra` is not modified.
pub fn build_feature_query_url_with_params(
    base_url: &str,
    layer_id: &str,
    extra: &QueryParams,
) -> OgcResult<String> {
    let layer = LayerId::parse(layer_id)?;
    let params = extra.merged(&feature_query_params(&layer));

    let url = merge_params(base_url, &params, RELAXED_QUERY_COMPONENT, &[])?;
    Ok(url.into())
}
