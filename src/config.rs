//! Editor configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Size;

/// Errors raised while loading an [`EditorConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// How far collapsing a node hides its descendants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollapsePolicy {
    /// Only direct children of a collapsed node are hidden
    #[default]
    Shallow,
    /// Everything reachable from a collapsed node's children is hidden
    Subtree,
}

/// What `Enter` creates relative to the selected node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnterBehavior {
    /// A child of the selected node (same as `Tab`)
    #[default]
    CreateChild,
    /// A child of the selected node's parent
    CreateSibling,
}

/// Parameters of the hierarchical layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between consecutive ranks
    pub rank_separation: f64,
    /// Gap between neighbouring nodes of one rank
    pub node_separation: f64,
    /// Upper bound on barycenter sweeps during crossing minimisation
    pub ordering_sweeps: usize,
    /// Coordinate refinement passes after ordering
    pub alignment_passes: usize,
}

impl LayoutConfig {
    /// The fixed bounding box every node gets
    pub fn node_size(&self) -> Size {
        Size {
            width: self.node_width,
            height: self.node_height,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 172.0,
            node_height: 36.0,
            rank_separation: 50.0,
            node_separation: 50.0,
            ordering_sweeps: 24,
            alignment_passes: 4,
        }
    }
}

/// Configuration of a mind map session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Label of the seeded root node
    pub root_label: String,
    /// New nodes are labelled `"<label_prefix> <id>"`
    pub label_prefix: String,
    /// Area new nodes are scattered over before the first layout
    pub spawn_area: Size,
    /// Seed for spawn positions; `None` draws one from the OS
    pub seed: Option<u64>,
    pub collapse_policy: CollapsePolicy,
    pub enter_behavior: EnterBehavior,
    pub layout: LayoutConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            root_label: "Root".to_string(),
            label_prefix: "Node".to_string(),
            spawn_area: Size {
                width: 400.0,
                height: 400.0,
            },
            seed: None,
            collapse_policy: CollapsePolicy::default(),
            enter_behavior: EnterBehavior::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Same config with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Size::new(self.spawn_area.width, self.spawn_area.height)
            .map_err(|e| ConfigError::Invalid(format!("spawn_area: {e}")))?;
        Size::new(self.layout.node_width, self.layout.node_height)
            .map_err(|e| ConfigError::Invalid(format!("node size: {e}")))?;
        if self.layout.rank_separation < 0.0 || self.layout.node_separation < 0.0 {
            return Err(ConfigError::Invalid(
                "layout separations must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
