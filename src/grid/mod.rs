//! Dense voxel grids and their construction.
//!
//! ## Key Types
//!
//! - [`VoxelGrid`]: Flat owned buffer with world <-> voxel conversion, generic
//!   over the per-voxel payload
//! - [`SeenOccupancyGrid`]: `VoxelGrid<VoxelState>`, the scanner input
//! - [`GridBuilder`]: Builds padded seen/occupied grids from octree-like
//!   sources or labeled point samples
//!
//! ## Memory Layout
//!
//! ```text
//! z = 0 plane               z = 1 plane
//! [x0y0 x1y0 .. xNy0]       [x0y0 x1y0 .. xNy0]
//! [x0y1 x1y1 .. xNy1]  ...  [x0y1 x1y1 .. xNy1]
//!  └── idx = x + y*nx + z*nx*ny ──┘
//! ```

pub mod builder;
mod storage;

pub use builder::{GridBuilder, LabeledSample, LeafMap, OctreeLeaf, OctreeSource};
pub use storage::{SeenOccupancyGrid, VoxelCounts, VoxelGrid, is_valid_voxel_size};
