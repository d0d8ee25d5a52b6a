//! Default value functions for serde deserialization.

use crate::core::Point3D;

pub fn padding_voxels() -> usize {
    1
}

pub fn occupied_threshold() -> f32 {
    0.0
}

pub fn free_distance_factor() -> f32 {
    2.1
}

pub fn enabled() -> bool {
    true
}

pub fn parallel() -> bool {
    true
}

pub fn max_normal_z() -> f32 {
    0.4
}

pub fn search_radius_factor() -> f32 {
    2.1
}

pub fn viewpoint() -> Point3D {
    Point3D::ZERO
}

pub fn tolerance_factor() -> f32 {
    1.5
}

pub fn min_cluster_size() -> usize {
    50
}

pub fn max_cluster_size() -> usize {
    usize::MAX
}
