//! Per-voxel state types.

use serde::{Deserialize, Serialize};

/// Exploration state of a single voxel.
///
/// `seen = false, occupied = true` is never produced by the grid builder
/// but is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelState {
    /// Observed by a sensor at least once
    pub seen: bool,
    /// Observed as an obstacle
    pub occupied: bool,
}

impl VoxelState {
    /// Never observed (grid default)
    pub const UNSEEN: VoxelState = VoxelState {
        seen: false,
        occupied: false,
    };

    /// Observed and free
    pub const FREE: VoxelState = VoxelState {
        seen: true,
        occupied: false,
    };

    /// Observed and occupied
    pub const OCCUPIED: VoxelState = VoxelState {
        seen: true,
        occupied: true,
    };

    /// Create a state from its two flags
    #[inline]
    pub fn new(seen: bool, occupied: bool) -> Self {
        Self { seen, occupied }
    }

    /// Seen and not occupied: the only state that can be a frontier
    #[inline]
    pub fn is_seen_free(&self) -> bool {
        self.seen && !self.occupied
    }
}

/// Estimated local surface normal.
///
/// `curvature` is the surface variation `λ0 / (λ0 + λ1 + λ2)` of the
/// neighbourhood covariance, 0 for a perfect plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceNormal {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component (vertical)
    pub z: f32,
    /// Surface variation
    pub curvature: f32,
}

impl SurfaceNormal {
    /// Create a new normal
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, curvature: f32) -> Self {
        Self { x, y, z, curvature }
    }

    /// Magnitude of the vertical component
    #[inline]
    pub fn verticality(&self) -> f32 {
        self.z.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unseen() {
        assert_eq!(VoxelState::default(), VoxelState::UNSEEN);
        assert!(!VoxelState::UNSEEN.is_seen_free());
    }

    #[test]
    fn test_seen_free() {
        assert!(VoxelState::FREE.is_seen_free());
        assert!(!VoxelState::OCCUPIED.is_seen_free());
        assert!(!VoxelState::new(false, true).is_seen_free());
    }

    #[test]
    fn test_verticality() {
        assert_eq!(SurfaceNormal::new(0.0, 0.6, -0.8, 0.0).verticality(), 0.8);
    }
}
