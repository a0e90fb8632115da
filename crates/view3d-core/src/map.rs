//! 2D map inputs read by the 3D view

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visible extent of the 2D map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBBox {
    /// `[minx, miny, maxx, maxy]` in map projection units
    pub bounds: [f64; 4],
    /// Map rotation in radians
    pub rotation: f64,
}

impl Default for MapBBox {
    fn default() -> Self {
        Self {
            bounds: [0.0, 0.0, 0.0, 0.0],
            rotation: 0.0,
        }
    }
}

impl MapBBox {
    /// Create a bbox without rotation
    pub fn new(bounds: [f64; 4]) -> Self {
        Self {
            bounds,
            rotation: 0.0,
        }
    }

    /// Width and height of the extent
    pub fn size(&self) -> (f64, f64) {
        (
            self.bounds[2] - self.bounds[0],
            self.bounds[3] - self.bounds[1],
        )
    }
}

/// Map state of the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    /// Current extent
    pub bbox: MapBBox,
    /// Projection identifier, e.g. `EPSG:3857`
    pub projection: String,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            bbox: MapBBox::default(),
            projection: "EPSG:3857".to_string(),
        }
    }
}

/// A search provider registered with the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProvider {
    /// Human readable label
    pub label: String,
    /// Provider options
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Search providers available to the 3D view, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchProviderRegistry {
    /// Providers by name
    pub providers: BTreeMap<String, SearchProvider>,
}

impl SearchProviderRegistry {
    /// Register a provider, replacing one with the same name
    pub fn register(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.providers.insert(
            name.into(),
            SearchProvider {
                label: label.into(),
                params: serde_json::Value::Null,
            },
        );
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
