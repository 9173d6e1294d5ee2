//! Shared state for answering dashboard queries.

use std::collections::BTreeSet;
use std::sync::Arc;

use layer_data::{
    layer_years, CachedLayerSource, HttpFetcher, LayerCache, LayerSource, RecordSet,
    ReqwestFetcher, WfsLayerSource, DEFAULT_YEAR_COLUMN,
};
use ogc_common::{LayerId, OgcResult};
use ogc_protocol::{build_feature_query_url, ServiceEndpoints, TileUrlTemplate};
use tracing::{info, instrument, warn};

use crate::config::DashboardConfig;
use crate::indicators::{selectable_years, Indicator};
use crate::views::{country_series, map_source, ranking_series, BarSeries, RasterSource};

/// Endpoints, the cached layer source and the map token.
pub struct DashboardState {
    endpoints: ServiceEndpoints,
    source: CachedLayerSource<WfsLayerSource>,
    access_token: Option<String>,
}

impl DashboardState {
    /// Build state with a reqwest fetcher configured from `config`.
    pub fn from_config(config: &DashboardConfig) -> OgcResult<Self> {
        let fetcher = Arc::new(ReqwestFetcher::with_timeout(config.http_timeout())?);
        Self::new(
            config.endpoints()?,
            fetcher,
            Arc::new(LayerCache::new()),
            config.mapbox_access_token.clone(),
        )
    }

    pub fn new(
        endpoints: ServiceEndpoints,
        fetcher: Arc<dyn HttpFetcher>,
        cache: Arc<LayerCache>,
        access_token: Option<String>,
    ) -> OgcResult<Self> {
        let source = WfsLayerSource::new(endpoints.wfs_url.clone(), fetcher)?;
        info!(wfs = %endpoints.wfs_url, wms = %endpoints.wms_url, "Dashboard endpoints configured");

        Ok(Self {
            endpoints,
            source: CachedLayerSource::new(source, cache),
            access_token,
        })
    }

    /// WFS and WMS endpoints derived from the server root.
    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// The layer cache shared by every query.
    pub fn cache(&self) -> &Arc<LayerCache> {
        self.source.cache()
    }

    /// Full record set of `layer`, through the cache.
    pub async fn layer(&self, layer: &LayerId) -> OgcResult<RecordSet> {
        self.source.fetch_layer(layer).await
    }

    /// `GetFeature` URL of `layer` on the WFS endpoint.
    pub fn feature_url(&self, layer: &LayerId) -> OgcResult<String> {
        build_feature_query_url(&self.endpoints.wfs_url, layer.as_str())
    }

    /// Tile template of `layer` on the WMS endpoint.
    pub fn tile_template(
        &self,
        layer: &LayerId,
        filter_expression: Option<&str>,
    ) -> OgcResult<TileUrlTemplate> {
        TileUrlTemplate::build(&self.endpoints.wms_url, layer.as_str(), filter_expression)
    }

    /// Years present in the indicator's multi-year layer.
    pub async fn years(&self, indicator: &Indicator) -> OgcResult<BTreeSet<i32>> {
        layer_years(&self.source, &indicator.series_layer()?, DEFAULT_YEAR_COLUMN).await
    }

    /// Country ranking for `year` from the indicator's per-year layer.
    #[instrument(skip(self, indicator), fields(indicator = indicator.key))]
    pub async fn ranking(&self, indicator: &Indicator, year: i32) -> OgcResult<BarSeries> {
        warn_if_unlisted(year);
        let records = self.layer(&indicator.layer_for_year(year)?).await?;
        Ok(ranking_series(&records, indicator.title))
    }

    /// Yearly values of `country` from the indicator's multi-year layer.
    ///
    /// With no country selected nothing is fetched.
    #[instrument(skip(self, indicator), fields(indicator = indicator.key))]
    pub async fn country(&self, indicator: &Indicator, country: Option<&str>) -> OgcResult<BarSeries> {
        let records = match country.filter(|c| !c.is_empty()) {
            Some(_) => self.layer(&indicator.series_layer()?).await?,
            None => RecordSet::default(),
        };
        Ok(country_series(&records, country, indicator.title))
    }

    /// Raster source of the indicator's per-year layer.
    pub fn map(&self, indicator: &Indicator, year: i32) -> OgcResult<RasterSource> {
        warn_if_unlisted(year);
        let template = self.tile_template(&indicator.layer_for_year(year)?, None)?;
        Ok(map_source(template, self.access_token.as_deref()))
    }
}

fn warn_if_unlisted(year: i32) {
    if !selectable_years().contains(&year) {
        warn!(year, "Year is outside the selectable range");
    }
}
