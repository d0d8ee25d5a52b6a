//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scan::AdjacencyRule;

use super::sections::{ClusterSection, GridSection, NormalSection, ScanSection};

/// Default configuration file, relative to the working directory.
const DEFAULT_PATH: &str = "configs/frontier.yaml";

/// Full frontier pipeline configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct FrontierConfig {
    /// Grid construction
    #[serde(default)]
    pub grid: GridSection,

    /// Frontier scan
    #[serde(default)]
    pub scan: ScanSection,

    /// Normal filter
    #[serde(default)]
    pub normals: NormalSection,

    /// Cluster filter
    #[serde(default)]
    pub clustering: ClusterSection,
}

impl FrontierConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/frontier.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using defaults", DEFAULT_PATH);
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Enable or disable the normal filter.
    pub fn with_normal_filter(mut self, enabled: bool) -> Self {
        self.normals.enabled = enabled;
        self
    }

    /// Enable or disable the cluster filter.
    pub fn with_clustering(mut self, enabled: bool) -> Self {
        self.clustering.enabled = enabled;
        self
    }

    /// Select the ground-plane (`true`) or full (`false`) adjacency rule.
    pub fn with_ground_plane(mut self, ground_plane: bool) -> Self {
        self.scan.rule = if ground_plane {
            AdjacencyRule::GroundPlane
        } else {
            AdjacencyRule::Full
        };
        self
    }

    /// Set the verticality threshold.
    pub fn with_max_normal_z(mut self, max_normal_z: f32) -> Self {
        self.normals.max_normal_z = max_normal_z;
        self
    }

    /// Set the smallest kept cluster.
    pub fn with_min_cluster_size(mut self, min_size: usize) -> Self {
        self.clustering.min_size = min_size;
        self
    }

    /// Disable rayon in every stage (deterministic timing for tests).
    pub fn sequential(mut self) -> Self {
        self.scan.parallel = false;
        self.normals.parallel = false;
        self
    }
}
