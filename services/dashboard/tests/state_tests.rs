//! Dashboard state against a mock map server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dashboard::views::NO_COUNTRY_TITLE;
use dashboard::{DashboardState, Orientation, FISCAL_BALANCE};
use layer_data::{HttpFetcher, LayerCache};
use ogc_common::{OgcError, OgcResult};
use ogc_protocol::{ServiceEndpoints, BBOX_PLACEHOLDER};
use test_utils::{fiscal_balance_bytes, indicator_collection_bytes};

/// Serves bodies by `typeName` and records every requested layer.
#[derive(Default)]
struct LayerServer {
    layers: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl LayerServer {
    fn with_layer(mut self, name: &str, body: Vec<u8>) -> Self {
        self.layers.insert(name.to_string(), body);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for LayerServer {
    async fn get(&self, url: &str) -> OgcResult<Bytes> {
        let type_name = url
            .split('&')
            .find_map(|pair| pair.strip_prefix("typeName="))
            .unwrap_or_default()
            .to_string();
        self.requested.lock().unwrap().push(type_name.clone());

        match self.layers.get(&type_name) {
            Some(body) => Ok(Bytes::from(body.clone())),
            None => Err(OgcError::remote_fetch(url, "HTTP 404 Not Found")),
        }
    }
}

fn endpoints() -> ServiceEndpoints {
    ServiceEndpoints::from_root("http://geo.example.com/geoserver/").unwrap()
}

fn state(server: Arc<LayerServer>, token: Option<&str>) -> DashboardState {
    DashboardState::new(
        endpoints(),
        server,
        Arc::new(LayerCache::new()),
        token.map(str::to_string),
    )
    .unwrap()
}

#[tokio::test]
async fn test_ranking_uses_year_layer() {
    let rows_1995 = [("EGY", -5.0, 1995), ("JOR", -1.5, 1995)];
    let server = Arc::new(
        LayerServer::default()
            .with_layer("geonode:fiscal_balance_1995", indicator_collection_bytes(&rows_1995)),
    );
    let state = state(server.clone(), None);

    let series = state.ranking(&FISCAL_BALANCE, 1995).await.unwrap();

    assert_eq!(series.orientation, Orientation::Horizontal);
    assert_eq!(series.labels(), vec!["EGY", "JOR"]);
    assert_eq!(series.values(), vec![-5.0, -1.5]);
    assert_eq!(server.requested(), vec!["geonode:fiscal_balance_1995"]);
}

#[tokio::test]
async fn test_country_series_reuses_cached_series_layer() {
    let server = Arc::new(
        LayerServer::default().with_layer("geonode:fiscal_balance_layer", fiscal_balance_bytes()),
    );
    let state = state(server.clone(), None);

    let egypt = state.country(&FISCAL_BALANCE, Some("EGY")).await.unwrap();
    let tunisia = state.country(&FISCAL_BALANCE, Some("TUN")).await.unwrap();
    let years = state.years(&FISCAL_BALANCE).await.unwrap();

    assert_eq!(egypt.labels(), vec!["1990", "1991", "1992"]);
    assert_eq!(tunisia.labels(), vec!["1990", "1992"]);
    assert_eq!(years.into_iter().collect::<Vec<_>>(), vec![1990, 1991, 1992]);
    assert_eq!(server.requested().len(), 1);
    assert_eq!(state.cache().stats().hits(), 2);
}

#[tokio::test]
async fn test_country_without_selection_fetches_nothing() {
    let server = Arc::new(LayerServer::default());
    let state = state(server.clone(), None);

    let series = state.country(&FISCAL_BALANCE, None).await.unwrap();

    assert_eq!(series.title, NO_COUNTRY_TITLE);
    assert!(series.points.is_empty());
    assert!(server.requested().is_empty());
}

#[tokio::test]
async fn test_missing_layer_surfaces_remote_error() {
    let state = state(Arc::new(LayerServer::default()), None);

    let err = state.ranking(&FISCAL_BALANCE, 2003).await.unwrap_err();
    assert!(err.is_retryable());
}

#[test]
fn test_map_source_carries_template_and_token() {
    let state = state(Arc::new(LayerServer::default()), Some("pk.test"));

    let source = state.map(&FISCAL_BALANCE, 1990).unwrap();
    let tile = source.tiles[0].as_str();

    assert!(tile.starts_with("http://geo.example.com/geoserver/wms?SERVICE=WMS"));
    assert!(tile.contains(BBOX_PLACEHOLDER));
    assert!(tile.contains("LAYERS=geonode%3Afiscal_balance_1990"));
    assert_eq!(source.access_token.as_deref(), Some("pk.test"));

    let json = serde_json::to_value(&source).unwrap();
    assert_eq!(json["sourcetype"], "raster");
}

#[test]
fn test_feature_url_matches_endpoint() {
    let state = state(Arc::new(LayerServer::default()), None);
    let layer = FISCAL_BALANCE.series_layer().unwrap();

    assert_eq!(
        state.feature_url(&layer).unwrap(),
        "http://geo.example.com/geoserver/wfs?service=WFS&version=1.0.0&request=GetFeature&typeName=geonode:fiscal_balance_layer&outputFormat=application/json"
    );
}
