//! # VastuFrontier
//!
//! 3D exploration frontier extraction from volumetric occupancy maps.
//!
//! ## Overview
//!
//! A frontier voxel is a seen, free voxel bordering unseen space. Given an
//! occupancy source (an octree map or labeled point samples), the
//! [`FrontierPipeline`]:
//!
//! 1. Rasterises it into a dense seen/occupied voxel grid, padded by at
//!    least one unseen layer on every face
//! 2. Scans the grid for frontier voxels (full 6-neighbour or ground-plane
//!    4-neighbour rule)
//! 3. Keeps points whose surface normal is near-horizontal (optional)
//! 4. Groups them into Euclidean clusters and drops clusters outside a size
//!    range (optional)
//! 5. Returns a [`Frontier`]: an ordered voxel list plus a lookup grid
//!    mapping positions back to list indices
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_frontier::{FrontierConfig, FrontierPipeline, LeafMap, Point3D};
//!
//! let mut map = LeafMap::new(0.1);
//! map.insert(Point3D::new(0.05, 0.05, 0.05), -2.0); // free
//!
//! let config = FrontierConfig::load_default()?.with_ground_plane(true);
//! let frontier = FrontierPipeline::new(config).compute_from_octree(&map);
//!
//! for voxel in &frontier.list {
//!     println!("{:?} cluster {}", voxel.position, voxel.cluster);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! World coordinates in meters, Z up. Voxel `(x, y, z)` has linear index
//! `x + y * nx + z * nx * ny` and spans `[min + coord * size, min + (coord + 1) * size)`.

#![warn(missing_docs)]

// Geometry and voxel value types
pub mod core;

// Dense voxel grids and grid construction
pub mod grid;

// Frontier detection over a seen/occupancy grid
pub mod scan;

// Normal and cluster filters
pub mod filter;

// Frontier result container
pub mod frontier;

// End-to-end pipeline and stage observers
pub mod pipeline;

// Unified configuration
pub mod config;

// Result transport
pub mod io;

mod error;

// Re-export commonly used types
pub use crate::core::{Bounds3D, GridSize, Point3D, SurfaceNormal, VoxelCoord, VoxelState};

pub use grid::{
    GridBuilder, LabeledSample, LeafMap, OctreeLeaf, OctreeSource, SeenOccupancyGrid, VoxelGrid,
};

pub use scan::{AdjacencyRule, FrontierScanner};

pub use filter::{
    ClusterFilter, ClusterParams, ClusterSet, Clusterer, EuclideanClusterer, NormalEstimator,
    NormalFilter, OrientedPoint, PcaNormalEstimator,
};

pub use frontier::{Frontier, FrontierAssembler, FrontierCell, FrontierVoxel, UNASSIGNED};

pub use pipeline::{
    FrontierPipeline, LogObserver, Stage, StageObserver, StageTiming, TimingRecorder,
};

pub use config::FrontierConfig;

pub use io::FrontierCloudMessage;

pub use error::{FrontierError, Result};
