//! Service endpoint resolution from a map server root URL.

use ogc_common::{OgcError, OgcResult};
use serde::{Deserialize, Serialize};

use crate::encode::parse_base_url;

/// WFS and WMS endpoints of one map server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub wfs_url: String,
    pub wms_url: String,
}

impl ServiceEndpoints {
    /// Resolve `wfs` and `wms` relative to `root`.
    ///
    /// Uses standard reference resolution, so `http://host/geoserver/` gives
    /// `http://host/geoserver/wfs` while `http://host/geoserver` (no trailing
    /// slash) gives `http://host/wfs`.
    pub fn from_root(root: &str) -> OgcResult<Self> {
        let root = parse_base_url(root)?;
        let join = |path: &str| {
            root.join(path)
                .map(String::from)
                .map_err(|e| OgcError::invalid_input(format!("cannot resolve '{}': {}", path, e)))
        };

        Ok(Self {
            wfs_url: join("wfs")?,
            wms_url: join("wms")?,
        })
    }
}
