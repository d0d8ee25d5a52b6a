//! Raw frontier extraction from a seen/occupied grid.
//!
//! A frontier voxel is a seen, unoccupied voxel adjacent to unseen space.
//! Adjacency is decided by an [`AdjacencyRule`]:
//!
//! ```text
//! Full (6-neighbour)            GroundPlane (4-neighbour, in-plane only)
//!
//!        +z                              +y
//!        |  +y                           |
//!        | /                       -x ---o--- +x
//!  -x ---o--- +x                         |
//!       /|                              -y
//!     -y |
//!        -z
//! ```
//!
//! The ground-plane rule is meant for thin horizontal slab maps where
//! vertical neighbours carry no exploration meaning. It additionally rejects
//! any voxel with an occupied in-plane neighbour.
//!
//! Neighbours are addressed by linear-index deltas, so only voxels whose
//! examined neighbours are inside the grid are candidates. Grids from
//! [`GridBuilder`](crate::grid::GridBuilder) always have an unseen padding
//! layer, so no populated voxel is ever excluded by this.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ScanSection;
use crate::core::{GridSize, Point3D};
use crate::grid::SeenOccupancyGrid;

/// Neighbour rule used to decide whether a seen-free voxel is frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyRule {
    /// Any of the 6 face neighbours is unseen.
    #[default]
    Full,
    /// No in-plane neighbour is occupied and at least one is unseen.
    GroundPlane,
}

impl AdjacencyRule {
    /// Number of leading entries of the neighbour delta table examined.
    #[inline]
    fn neighbor_count(self) -> usize {
        match self {
            AdjacencyRule::Full => 6,
            AdjacencyRule::GroundPlane => 4,
        }
    }

    /// Whether the rule reads the ±z neighbours.
    #[inline]
    fn uses_vertical(self) -> bool {
        matches!(self, AdjacencyRule::Full)
    }
}

/// Linear-index offsets of the face neighbours: +x, -x, +y, -y, +z, -z.
#[inline]
fn neighbor_deltas(size: GridSize) -> [isize; 6] {
    let nx = size.x as isize;
    let plane = (size.x * size.y) as isize;
    [1, -1, nx, -nx, plane, -plane]
}

/// Sweeps a [`SeenOccupancyGrid`] for frontier voxels.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierScanner {
    rule: AdjacencyRule,
    parallel: bool,
}

impl FrontierScanner {
    /// Create a sequential scanner for the given rule.
    pub fn new(rule: AdjacencyRule) -> Self {
        Self {
            rule,
            parallel: false,
        }
    }

    /// Create a scanner from the scan configuration section.
    pub fn from_config(config: &ScanSection) -> Self {
        Self {
            rule: config.rule,
            parallel: config.parallel,
        }
    }

    /// Enable or disable the rayon scan (output is identical either way).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rule in use.
    pub fn rule(&self) -> AdjacencyRule {
        self.rule
    }

    /// Frontier voxel centres, in linear-index order.
    pub fn scan(&self, grid: &SeenOccupancyGrid) -> Vec<Point3D> {
        self.scan_indices(grid)
            .into_iter()
            .map(|i| grid.index_to_position(i))
            .collect()
    }

    /// Linear indices of frontier voxels, ascending.
    pub fn scan_indices(&self, grid: &SeenOccupancyGrid) -> Vec<usize> {
        let deltas = neighbor_deltas(grid.size());
        let count = grid.cell_count();

        if self.parallel {
            (0..count)
                .into_par_iter()
                .filter(|&i| self.check(grid, &deltas, i))
                .collect()
        } else {
            (0..count)
                .filter(|&i| self.check(grid, &deltas, i))
                .collect()
        }
    }

    /// Check a single voxel against the scanner's rule.
    pub fn is_frontier(&self, grid: &SeenOccupancyGrid, index: usize) -> bool {
        index < grid.cell_count() && self.check(grid, &neighbor_deltas(grid.size()), index)
    }

    fn check(&self, grid: &SeenOccupancyGrid, deltas: &[isize; 6], index: usize) -> bool {
        let voxels = grid.voxels();
        if !voxels[index].is_seen_free() || !self.has_neighbors_inside(grid, index) {
            return false;
        }

        let mut neighbors = deltas[..self.rule.neighbor_count()]
            .iter()
            .map(|d| voxels[(index as isize + d) as usize]);

        match self.rule {
            AdjacencyRule::Full => neighbors.any(|n| !n.seen),
            AdjacencyRule::GroundPlane => {
                let mut any_unseen = false;
                for n in neighbors {
                    if n.occupied {
                        return false;
                    }
                    any_unseen |= !n.seen;
                }
                any_unseen
            }
        }
    }

    #[inline]
    fn has_neighbors_inside(&self, grid: &SeenOccupancyGrid, index: usize) -> bool {
        let size = grid.size();
        let c = grid.index_to_coord(index);
        let inside = |v: i32, n: usize| v >= 1 && (v as usize) + 1 < n;
        inside(c.x, size.x)
            && inside(c.y, size.y)
            && (!self.rule.uses_vertical() || inside(c.z, size.z))
    }
}
