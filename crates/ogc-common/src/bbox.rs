//! Bounding boxes for WMS tile requests.

use serde::{Deserialize, Serialize};

use crate::{OgcError, OgcResult};

/// Half the width of the EPSG:3857 world square, in meters.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = 20_037_508.342_789_244;

/// A geographic or projected bounding box.
///
/// Tile requests built by this workspace use EPSG:3857, so coordinates are
/// usually meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The full EPSG:3857 extent.
    pub fn web_mercator_world() -> Self {
        Self::new(
            -WEB_MERCATOR_HALF_EXTENT,
            -WEB_MERCATOR_HALF_EXTENT,
            WEB_MERCATOR_HALF_EXTENT,
            WEB_MERCATOR_HALF_EXTENT,
        )
    }

    /// Extent of XYZ tile `(z, x, y)` in EPSG:3857 meters.
    pub fn web_mercator_tile(z: u32, x: u32, y: u32) -> Self {
        let tiles = 2f64.powi(z as i32);
        let size = 2.0 * WEB_MERCATOR_HALF_EXTENT / tiles;
        let min_x = -WEB_MERCATOR_HALF_EXTENT + x as f64 * size;
        let max_y = WEB_MERCATOR_HALF_EXTENT - y as f64 * size;
        Self::new(min_x, max_y - size, min_x + size, max_y)
    }

    /// Parse a WMS BBOX parameter string: "minx,miny,maxx,maxy"
    pub fn from_wms_string(s: &str) -> OgcResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(OgcError::invalid_input(format!(
                "invalid BBOX '{}': expected 'minx,miny,maxx,maxy'",
                s
            )));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| OgcError::invalid_input(format!("invalid number in BBOX: {}", part)))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Format as the WMS BBOX parameter value.
    pub fn to_wms_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when min corners are strictly below max corners.
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_y < self.max_y
    }
}
