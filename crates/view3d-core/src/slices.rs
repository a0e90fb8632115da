//! Host state slices mirrored into the embedded container
//!
//! The host owns these values. Each one is shared behind an `Arc`; an edit in
//! the host always produces a new `Arc`, so change detection is a pointer
//! comparison. The embedded container only ever holds copies of these `Arc`s.

use crate::mode::PresentationMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Names of the four mirrored slices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MirroredSlice {
    /// Map theme
    Theme,
    /// Local application configuration
    LocalConfig,
    /// Layer collection
    Layers,
    /// Display state (presentation mode, fullscreen flag)
    Display,
}

impl MirroredSlice {
    /// All slices, in the order they are synced
    pub fn all() -> &'static [MirroredSlice] {
        &[
            MirroredSlice::Display,
            MirroredSlice::Theme,
            MirroredSlice::LocalConfig,
            MirroredSlice::Layers,
        ]
    }
}

impl fmt::Display for MirroredSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme => write!(f, "theme"),
            Self::LocalConfig => write!(f, "localConfig"),
            Self::Layers => write!(f, "layers"),
            Self::Display => write!(f, "display"),
        }
    }
}

/// Map theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Theme {
    /// Theme identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Background layer shown by default
    #[serde(default)]
    pub default_background: Option<String>,
    /// Remaining theme attributes, passed through untouched
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Theme {
    /// Create a theme with an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Launch parameters (URL query / command line `key=value` pairs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StartupParams(pub BTreeMap<String, String>);

impl StartupParams {
    /// Parse `key=value` pairs. Entries without `=` map to an empty value.
    pub fn parse<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Self {
        let params = pairs
            .into_iter()
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
                None => (pair.trim().to_string(), String::new()),
            })
            .collect();
        Self(params)
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// A single plugin entry of the host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Plugin name
    pub name: String,
    /// Plugin specific configuration
    #[serde(default)]
    pub cfg: serde_json::Value,
}

/// Plugin configuration, split by the view the plugins belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PluginsConfig {
    /// Plugins of the 2D map view
    #[serde(default)]
    pub map2d: Vec<PluginEntry>,
    /// Plugins rendered inside the fullscreen 3D view
    #[serde(default)]
    pub map3d: Vec<PluginEntry>,
}

/// Local application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocalConfig {
    /// Launch parameters
    #[serde(default)]
    pub startup_params: StartupParams,
    /// Plugin configuration
    #[serde(default)]
    pub plugins: PluginsConfig,
    /// Remaining settings
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// A map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    /// Unique layer id
    pub id: String,
    /// Layer name
    pub name: String,
    /// Visibility
    pub visible: bool,
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl MapLayer {
    /// Create a visible, opaque layer
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            opacity: 1.0,
        }
    }
}

/// Ordered layer collection (bottom first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LayerCollection {
    /// Layers
    pub layers: Vec<MapLayer>,
}

impl LayerCollection {
    /// Create a collection from layers
    pub fn new(layers: Vec<MapLayer>) -> Self {
        Self { layers }
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Find a layer by id
    pub fn get(&self, id: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.id == id)
    }
}

/// Display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayState {
    /// Presentation mode of the 3D view
    pub view3d_mode: PresentationMode,
    /// Application fullscreen flag
    pub fullscreen: bool,
}

/// The four mirrored slices as one snapshot
#[derive(Debug, Clone, Default)]
pub struct Mirrors {
    /// Display state
    pub display: Arc<DisplayState>,
    /// Theme
    pub theme: Arc<Theme>,
    /// Local configuration
    pub local_config: Arc<LocalConfig>,
    /// Layers
    pub layers: Arc<LayerCollection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_params_parse() {
        let params = StartupParams::parse(["v=3d", "c=100;200", "flag", ""]);
        assert_eq!(params.get("v"), Some("3d"));
        assert_eq!(params.get("c"), Some("100;200"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.0.len(), 3);
    }

    #[test]
    fn test_slice_order() {
        let all = MirroredSlice::all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], MirroredSlice::Display);
        assert_eq!(MirroredSlice::LocalConfig.to_string(), "localConfig");
    }

    #[test]
    fn test_layer_lookup() {
        let layers = LayerCollection::new(vec![MapLayer::new("a", "A"), MapLayer::new("b", "B")]);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.get("b").map(|l| l.name.as_str()), Some("B"));
        assert!(layers.get("c").is_none());
    }

    #[test]
    fn test_local_config_deserialize_defaults() {
        let config: LocalConfig = serde_json::from_str("{}").unwrap();
        assert!(config.startup_params.0.is_empty());
        assert!(config.plugins.map3d.is_empty());
    }
}
