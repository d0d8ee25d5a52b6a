//! Core types for the frontier pipeline.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`VoxelCoord`]: Integer voxel indices for grid access
//! - [`Point3D`]: Floating-point world coordinates in meters
//! - [`GridSize`]: Grid dimensions in voxels
//! - [`Bounds3D`]: Axis-aligned world-space extent
//!
//! ### Voxel Data
//! - [`VoxelState`]: Seen / occupied flags of a single voxel
//! - [`SurfaceNormal`]: Local surface orientation of a frontier point
//!
//! All world coordinates are Z-up.

mod bounds;
mod point;
mod voxel;

pub use bounds::Bounds3D;
pub use point::{GridSize, Point3D, VoxelCoord};
pub use voxel::{SurfaceNormal, VoxelState};
