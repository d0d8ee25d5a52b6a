//! Configuration sections, one per pipeline stage.
//!
//! Distances are given as factors of the voxel size, which is only known
//! once the occupancy source is.

use serde::{Deserialize, Serialize};

use crate::core::Point3D;
use crate::scan::AdjacencyRule;

use super::defaults;

/// Grid construction settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Unseen voxel layers around the populated region (at least 1)
    #[serde(default = "defaults::padding_voxels")]
    pub padding_voxels: usize,

    /// Octree leaf values above this are occupied (log-odds)
    #[serde(default = "defaults::occupied_threshold")]
    pub occupied_threshold: f32,

    /// Samples with intensity <= factor * voxel_size are occupied
    #[serde(default = "defaults::free_distance_factor")]
    pub free_distance_factor: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            padding_voxels: defaults::padding_voxels(),
            occupied_threshold: defaults::occupied_threshold(),
            free_distance_factor: defaults::free_distance_factor(),
        }
    }
}

/// Frontier scan settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanSection {
    /// Adjacency rule (`full` or `ground_plane`)
    #[serde(default)]
    pub rule: AdjacencyRule,

    /// Scan voxels with rayon
    #[serde(default = "defaults::parallel")]
    pub parallel: bool,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            rule: AdjacencyRule::default(),
            parallel: defaults::parallel(),
        }
    }
}

/// Normal filter settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalSection {
    /// Run the normal filter (false passes every point through)
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Largest accepted |normal.z|
    #[serde(default = "defaults::max_normal_z")]
    pub max_normal_z: f32,

    /// Neighbourhood radius = factor * voxel_size
    #[serde(default = "defaults::search_radius_factor")]
    pub search_radius_factor: f32,

    /// Normals are flipped to face this point
    #[serde(default = "defaults::viewpoint")]
    pub viewpoint: Point3D,

    /// Estimate normals with rayon
    #[serde(default = "defaults::parallel")]
    pub parallel: bool,
}

impl Default for NormalSection {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            max_normal_z: defaults::max_normal_z(),
            search_radius_factor: defaults::search_radius_factor(),
            viewpoint: defaults::viewpoint(),
            parallel: defaults::parallel(),
        }
    }
}

/// Cluster filter settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterSection {
    /// Run the cluster filter (false makes one cluster of everything)
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Connection distance = factor * voxel_size
    #[serde(default = "defaults::tolerance_factor")]
    pub tolerance_factor: f32,

    /// Smallest kept cluster
    #[serde(default = "defaults::min_cluster_size")]
    pub min_size: usize,

    /// Largest kept cluster
    #[serde(default = "defaults::max_cluster_size")]
    pub max_size: usize,
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            tolerance_factor: defaults::tolerance_factor(),
            min_size: defaults::min_cluster_size(),
            max_size: defaults::max_cluster_size(),
        }
    }
}
