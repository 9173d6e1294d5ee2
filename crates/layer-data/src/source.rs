//! Layer sources: where record sets come from.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use ogc_common::{LayerId, OgcResult};
use ogc_protocol::{build_feature_query_url, encode::parse_base_url};
use tracing::{info, instrument};

use crate::fetcher::{HttpFetcher, ReqwestFetcher};
use crate::geojson::parse_feature_collection;
use crate::query::{distinct_years, filter_layer};
use crate::record::RecordSet;

/// Something that can produce the full record set of a layer.
#[async_trait]
pub trait LayerSource: Send + Sync {
    async fn fetch_layer(&self, layer: &LayerId) -> OgcResult<RecordSet>;
}

#[async_trait]
impl<S: LayerSource + ?Sized> LayerSource for Arc<S> {
    async fn fetch_layer(&self, layer: &LayerId) -> OgcResult<RecordSet> {
        (**self).fetch_layer(layer).await
    }
}

/// Fetches layers from a WFS endpoint as GeoJSON.
pub struct WfsLayerSource {
    wfs_url: String,
    fetcher: Arc<dyn HttpFetcher>,
}

impl WfsLayerSource {
    /// Source for `wfs_url`; fails with `InvalidInput` if it is not an absolute URL.
    pub fn new(wfs_url: impl Into<String>, fetcher: Arc<dyn HttpFetcher>) -> OgcResult<Self> {
        let wfs_url = wfs_url.into();
        parse_base_url(&wfs_url)?;
        Ok(Self { wfs_url, fetcher })
    }

    /// Source using a [`ReqwestFetcher`] with the default timeout.
    pub fn with_reqwest(wfs_url: impl Into<String>) -> OgcResult<Self> {
        Self::new(wfs_url, Arc::new(ReqwestFetcher::new()?))
    }

    /// The WFS endpoint requests are built against.
    pub fn wfs_url(&self) -> &str {
        &self.wfs_url
    }

    /// The `GetFeature` URL requested for `layer`.
    pub fn feature_url(&self, layer: &LayerId) -> OgcResult<String> {
        build_feature_query_url(&self.wfs_url, layer.as_str())
    }
}

#[async_trait]
impl LayerSource for WfsLayerSource {
    #[instrument(skip(self), fields(layer = %layer))]
    async fn fetch_layer(&self, layer: &LayerId) -> OgcResult<RecordSet> {
        let url = self.feature_url(layer)?;
        counter!("layer_fetches_total").increment(1);

        let body = self.fetcher.get(&url).await?;
        let records = parse_feature_collection(&body)?;

        info!(features = records.len(), bytes = body.len(), "Fetched layer");
        Ok(records)
    }
}

/// Fetch `layer` through `source`, then keep rows where `column == value`.
///
/// A missing or empty column or value returns the whole layer.
pub async fn get_filtered_layer<S>(
    source: &S,
    layer: &LayerId,
    column: Option<&str>,
    value: Option<&str>,
) -> OgcResult<RecordSet>
where
    S: LayerSource + ?Sized,
{
    let records = source.fetch_layer(layer).await?;
    Ok(filter_layer(
        &records,
        column.unwrap_or_default(),
        value.unwrap_or_default(),
    ))
}

/// Distinct years available in `layer`, for populating a year selector.
pub async fn layer_years<S>(
    source: &S,
    layer: &LayerId,
    year_column: &str,
) -> OgcResult<BTreeSet<i32>>
where
    S: LayerSource + ?Sized,
{
    let records = source.fetch_layer(layer).await?;
    Ok(distinct_years(&records, year_column))
}
