//! Test utilities for vastu-frontier.
//!
//! Builders for synthetic occupancy sources and grids.

#![allow(dead_code)]

use vastu_frontier::{
    GridSize, LabeledSample, LeafMap, Point3D, SeenOccupancyGrid, VoxelCoord, VoxelState,
};

/// Slab extent in voxels.
pub const SLAB_X: i32 = 10;
pub const SLAB_Y: i32 = 10;
pub const SLAB_Z: i32 = 3;

/// Free-space value for octree leaves (log-odds).
pub const FREE_LOG_ODDS: f32 = -1.0;
/// Occupied value for octree leaves (log-odds).
pub const OCCUPIED_LOG_ODDS: f32 = 1.0;

/// Initialise test logging once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Slab cell state: `None` for the unseen corner column.
///
/// The slab is 10x10x3 voxels, free except a 3x3x1 occupied block in the
/// middle layer (x, y in 4..7, z = 1) and an unseen column at x = y = 0.
pub fn slab_cell(x: i32, y: i32, z: i32) -> Option<VoxelState> {
    if x == 0 && y == 0 {
        None
    } else if is_block(x, y, z) {
        Some(VoxelState::OCCUPIED)
    } else {
        Some(VoxelState::FREE)
    }
}

/// Whether a slab cell belongs to the occupied block.
pub fn is_block(x: i32, y: i32, z: i32) -> bool {
    (4..7).contains(&x) && (4..7).contains(&y) && z == 1
}

/// World centre of slab cell `(x, y, z)` at voxel size `res`.
pub fn slab_center(x: i32, y: i32, z: i32, res: f32) -> Point3D {
    Point3D::new(
        (x as f32 + 0.5) * res,
        (y as f32 + 0.5) * res,
        (z as f32 + 0.5) * res,
    )
}

/// Iterate every slab cell coordinate.
pub fn slab_cells() -> impl Iterator<Item = (i32, i32, i32)> {
    (0..SLAB_Z).flat_map(|z| (0..SLAB_Y).flat_map(move |y| (0..SLAB_X).map(move |x| (x, y, z))))
}

/// The slab as an octree leaf map.
pub fn slab_leaf_map(res: f32) -> LeafMap {
    let mut map = LeafMap::new(res);
    for (x, y, z) in slab_cells() {
        if let Some(state) = slab_cell(x, y, z) {
            let value = if state.occupied {
                OCCUPIED_LOG_ODDS
            } else {
                FREE_LOG_ODDS
            };
            map.insert(slab_center(x, y, z, res), value);
        }
    }
    map
}

/// The slab as labeled point samples (intensity = distance to nearest surface).
pub fn slab_samples(res: f32) -> Vec<LabeledSample> {
    slab_cells()
        .filter_map(|(x, y, z)| {
            slab_cell(x, y, z).map(|state| {
                let intensity = if state.occupied { 0.0 } else { 10.0 * res };
                LabeledSample::new(slab_center(x, y, z, res), intensity)
            })
        })
        .collect()
}

/// Unit-voxel grid filled with `fill`.
pub fn uniform_grid(nx: usize, ny: usize, nz: usize, fill: VoxelState) -> SeenOccupancyGrid {
    SeenOccupancyGrid::new(1.0, GridSize::new(nx, ny, nz), Point3D::ZERO, fill)
}

/// Unit-voxel grid with free voxels along x at fixed (y, z).
pub fn line_grid(nx: usize, runs: &[std::ops::Range<i32>]) -> SeenOccupancyGrid {
    let mut grid = uniform_grid(nx, 5, 3, VoxelState::UNSEEN);
    for run in runs {
        for x in run.clone() {
            grid.set(VoxelCoord::new(x, 2, 1), VoxelState::FREE);
        }
    }
    grid
}

/// Half-explored room as an octree leaf map.
///
/// `side x side x height` voxels; only `x < side / 2` is explored. The
/// explored half has walls at `x = 0`, `y = 0`, `y = side - 1` and a floor
/// at `z = 0`. The unexplored half leaves a vertical frontier wall at
/// `x = side / 2 - 1`.
pub fn room_leaf_map(side: usize, height: usize, res: f32) -> LeafMap {
    let mut map = LeafMap::new(res);
    let explored = side / 2;
    for z in 0..height {
        for y in 0..side {
            for x in 0..explored {
                let wall = y == 0 || y == side - 1 || x == 0 || z == 0;
                let value = if wall {
                    OCCUPIED_LOG_ODDS
                } else {
                    FREE_LOG_ODDS
                };
                map.insert(slab_center(x as i32, y as i32, z as i32, res), value);
            }
        }
    }
    map
}
