//! Dashboard configuration from command-line flags and the environment.

use std::time::Duration;

use clap::Args;
use ogc_common::OgcResult;
use ogc_protocol::ServiceEndpoints;

pub const DEFAULT_GEOSERVER_LOCATION: &str = "http://plotly.cartoview.net/geoserver/";

/// Settings shared by every dashboard subcommand.
#[derive(Debug, Clone, Args)]
pub struct DashboardConfig {
    /// Root URL of the GeoServer instance; `wfs` and `wms` are resolved against it
    #[arg(
        long,
        env = "GEOSERVER_LOCATION",
        default_value = DEFAULT_GEOSERVER_LOCATION,
        global = true
    )]
    pub geoserver_location: String,

    /// Access token for the raster map provider
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub mapbox_access_token: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "GEODASH_HTTP_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub http_timeout_secs: u64,

    /// Log level
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

impl DashboardConfig {
    /// Configuration pointing at `geoserver_location` with defaults elsewhere.
    pub fn new(geoserver_location: impl Into<String>) -> Self {
        Self {
            geoserver_location: geoserver_location.into(),
            mapbox_access_token: None,
            http_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }

    pub fn endpoints(&self) -> OgcResult<ServiceEndpoints> {
        ServiceEndpoints::from_root(&self.geoserver_location)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
