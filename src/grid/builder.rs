//! Seen/occupied grid construction from external occupancy sources.
//!
//! Two kinds of source are supported:
//!
//! - **Octree-like** ([`OctreeSource`]): leaf cells with a stored log-odds
//!   value. Leaves coarser than the source resolution are expanded into every
//!   voxel they cover.
//! - **Labeled point samples** ([`LabeledSample`]): positions carrying a
//!   scalar intensity such as a Euclidean distance-transform value.
//!
//! The produced grid always carries `padding_voxels` layers of unseen voxels
//! around the populated region, so neighbour lookups during the frontier scan
//! never leave the grid. The grid is placed so that source cells land on voxel
//! centres, which keeps the `floor` in world-to-voxel conversion away from
//! voxel faces.

use serde::{Deserialize, Serialize};

use crate::config::GridSection;
use crate::core::{Bounds3D, Point3D, VoxelState};

use super::storage::{SeenOccupancyGrid, is_valid_voxel_size};

/// A leaf cell of an octree-like occupancy source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctreeLeaf {
    /// Centre of the leaf cell
    pub center: Point3D,
    /// Edge length of the leaf cell (a power-of-two multiple of the resolution)
    pub size: f32,
    /// Stored occupancy value (log-odds, > threshold means occupied)
    pub value: f32,
}

/// Octree-like occupancy map: anything that can enumerate its leaves.
pub trait OctreeSource {
    /// Edge length of the finest cells in meters.
    fn resolution(&self) -> f32;

    /// Metric bounds of all leaf cells (corners, not centres).
    fn metric_bounds(&self) -> Bounds3D;

    /// Every leaf cell of the map.
    fn leaves(&self) -> impl Iterator<Item = OctreeLeaf> + '_;
}

/// A single labeled sample of a point-sample occupancy source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    /// Sample position
    pub position: Point3D,
    /// Scalar label, e.g. distance to the nearest obstacle
    pub intensity: f32,
}

impl LabeledSample {
    /// Create a new sample
    pub fn new(position: Point3D, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// In-memory leaf list implementing [`OctreeSource`].
#[derive(Clone, Debug, Default)]
pub struct LeafMap {
    resolution: f32,
    leaves: Vec<OctreeLeaf>,
}

impl LeafMap {
    /// Create an empty leaf map with the given finest resolution.
    pub fn new(resolution: f32) -> Self {
        Self {
            resolution,
            leaves: Vec::new(),
        }
    }

    /// Insert a finest-resolution leaf.
    pub fn insert(&mut self, center: Point3D, value: f32) {
        self.leaves.push(OctreeLeaf {
            center,
            size: self.resolution,
            value,
        });
    }

    /// Insert a leaf of arbitrary size.
    pub fn insert_leaf(&mut self, leaf: OctreeLeaf) {
        self.leaves.push(leaf);
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True if no leaves have been inserted.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

impl OctreeSource for LeafMap {
    fn resolution(&self) -> f32 {
        self.resolution
    }

    fn metric_bounds(&self) -> Bounds3D {
        let mut bounds = Bounds3D::empty();
        for leaf in &self.leaves {
            let half = leaf.size * 0.5;
            let h = Point3D::new(half, half, half);
            bounds.expand_to_include(leaf.center - h);
            bounds.expand_to_include(leaf.center + h);
        }
        bounds
    }

    fn leaves(&self) -> impl Iterator<Item = OctreeLeaf> + '_ {
        self.leaves.iter().copied()
    }
}

/// Builds [`SeenOccupancyGrid`]s from occupancy sources.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    padding_voxels: usize,
    occupied_threshold: f32,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::from_config(&GridSection::default())
    }
}

impl GridBuilder {
    /// Create a builder from the grid configuration section.
    ///
    /// Padding below one voxel is raised to one.
    pub fn from_config(config: &GridSection) -> Self {
        Self {
            padding_voxels: config.padding_voxels.max(1),
            occupied_threshold: config.occupied_threshold,
        }
    }

    /// Unseen layers added around the populated region.
    pub fn padding_voxels(&self) -> usize {
        self.padding_voxels
    }

    /// Build a grid from an octree-like source.
    ///
    /// Voxel size is the source resolution. Every visited leaf is seen;
    /// it is occupied iff its value is above the occupied threshold.
    pub fn from_octree<S: OctreeSource + ?Sized>(&self, source: &S) -> SeenOccupancyGrid {
        let voxel_size = source.resolution();
        if !is_valid_voxel_size(voxel_size) {
            log::debug!("Octree resolution {} is not usable, skipping leaves", voxel_size);
            return Self::empty_grid(voxel_size);
        }
        let mut bounds = source.metric_bounds();
        if bounds.is_empty() || !bounds.min.is_finite() || !bounds.max.is_finite() {
            bounds = Bounds3D::from_point(Point3D::ZERO);
        }

        // Bounds are leaf corners: whole-voxel padding keeps leaf centres on voxel centres.
        let padded = bounds.padded(self.padding_voxels as f32 * voxel_size);
        let mut grid =
            SeenOccupancyGrid::from_bounds(voxel_size, padded.min, padded.max, VoxelState::UNSEEN);

        let mut leaves = 0usize;
        let mut skipped = 0usize;
        for leaf in source.leaves() {
            leaves += 1;
            let state = VoxelState::new(true, leaf.value > self.occupied_threshold);
            let per_axis = (leaf.size / voxel_size).round().max(1.0) as usize;
            if per_axis == 1 {
                if !grid.set_world(leaf.center, state) {
                    skipped += 1;
                }
                continue;
            }

            // Coarse leaf: mark every finest voxel it covers
            let first =
                leaf.center - Point3D::new(1.0, 1.0, 1.0) * (leaf.size * 0.5 - voxel_size * 0.5);
            for iz in 0..per_axis {
                for iy in 0..per_axis {
                    for ix in 0..per_axis {
                        let offset = Point3D::new(ix as f32, iy as f32, iz as f32) * voxel_size;
                        if !grid.set_world(first + offset, state) {
                            skipped += 1;
                        }
                    }
                }
            }
        }

        log::debug!(
            "Octree -> grid: {} leaves, {}x{}x{} voxels, {} writes outside bounds",
            leaves,
            grid.size().x,
            grid.size().y,
            grid.size().z,
            skipped
        );
        grid
    }

    /// Build a grid from labeled point samples.
    ///
    /// Bounds are the tight box over all finite sample positions. A sample
    /// is occupied iff `intensity <= min_free_distance`.
    pub fn from_samples(
        &self,
        samples: &[LabeledSample],
        voxel_size: f32,
        min_free_distance: f32,
    ) -> SeenOccupancyGrid {
        if !is_valid_voxel_size(voxel_size) {
            log::debug!("Sample voxel size {} is not usable, skipping samples", voxel_size);
            return Self::empty_grid(voxel_size);
        }
        let mut bounds = Bounds3D::from_points(
            samples
                .iter()
                .map(|s| s.position)
                .filter(|p| p.is_finite()),
        );
        if bounds.is_empty() {
            bounds = Bounds3D::from_point(Point3D::ZERO);
        }

        // Samples are voxel centres: the extra half voxel puts them mid-cell.
        let padded = bounds.padded((self.padding_voxels as f32 + 0.5) * voxel_size);
        let mut grid =
            SeenOccupancyGrid::from_bounds(voxel_size, padded.min, padded.max, VoxelState::UNSEEN);

        let mut skipped = 0usize;
        for sample in samples {
            let state = VoxelState::new(true, sample.intensity <= min_free_distance);
            if !grid.set_world(sample.position, state) {
                log::trace!("Skipping sample at {:?}", sample.position);
                skipped += 1;
            }
        }

        log::debug!(
            "Samples -> grid: {} samples, {}x{}x{} voxels, {} skipped",
            samples.len(),
            grid.size().x,
            grid.size().y,
            grid.size().z,
            skipped
        );
        grid
    }

    fn empty_grid(voxel_size: f32) -> SeenOccupancyGrid {
        SeenOccupancyGrid::from_bounds(voxel_size, Point3D::ZERO, Point3D::ZERO, VoxelState::UNSEEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VoxelCoord;

    fn free_block(resolution: f32, n: i32) -> LeafMap {
        let mut map = LeafMap::new(resolution);
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let c = Point3D::new(
                        (x as f32 + 0.5) * resolution,
                        (y as f32 + 0.5) * resolution,
                        (z as f32 + 0.5) * resolution,
                    );
                    map.insert(c, -2.0);
                }
            }
        }
        map
    }

    #[test]
    fn test_octree_grid_is_padded() {
        let map = free_block(0.1, 4);
        let grid = GridBuilder::default().from_octree(&map);

        assert_eq!(grid.voxel_size(), 0.1);
        let size = grid.size();
        assert!(size.x >= 6 && size.y >= 6 && size.z >= 6);

        // Every border voxel is unseen
        for (coord, state) in grid.iter() {
            let on_border = coord.x == 0
                || coord.y == 0
                || coord.z == 0
                || coord.x as usize == size.x - 1
                || coord.y as usize == size.y - 1
                || coord.z as usize == size.z - 1;
            if on_border {
                assert_eq!(*state, VoxelState::UNSEEN, "border voxel {:?} seen", coord);
            }
        }
        assert_eq!(grid.count_states().free, 64);
    }

    #[test]
    fn test_octree_occupancy_threshold() {
        let mut map = LeafMap::new(0.1);
        map.insert(Point3D::new(0.05, 0.05, 0.05), 0.0);
        map.insert(Point3D::new(0.15, 0.05, 0.05), 0.01);
        let grid = GridBuilder::default().from_octree(&map);

        assert_eq!(
            grid.get_world(Point3D::new(0.05, 0.05, 0.05)),
            Some(&VoxelState::FREE)
        );
        assert_eq!(
            grid.get_world(Point3D::new(0.15, 0.05, 0.05)),
            Some(&VoxelState::OCCUPIED)
        );
    }

    #[test]
    fn test_coarse_leaf_is_expanded() {
        let mut map = LeafMap::new(0.1);
        map.insert_leaf(OctreeLeaf {
            center: Point3D::new(0.2, 0.2, 0.2),
            size: 0.4,
            value: -1.0,
        });
        let grid = GridBuilder::default().from_octree(&map);

        assert_eq!(grid.count_states().free, 64);
        assert_eq!(
            grid.get_world(Point3D::new(0.35, 0.05, 0.25)),
            Some(&VoxelState::FREE)
        );
    }

    #[test]
    fn test_samples_occupied_by_distance() {
        let samples = vec![
            LabeledSample::new(Point3D::new(0.0, 0.0, 0.0), 0.05),
            LabeledSample::new(Point3D::new(0.1, 0.0, 0.0), 0.21),
            LabeledSample::new(Point3D::new(0.2, 0.0, 0.0), 0.5),
        ];
        let grid = GridBuilder::default().from_samples(&samples, 0.1, 0.21);

        assert_eq!(grid.get_world(samples[0].position), Some(&VoxelState::OCCUPIED));
        assert_eq!(grid.get_world(samples[1].position), Some(&VoxelState::OCCUPIED));
        assert_eq!(grid.get_world(samples[2].position), Some(&VoxelState::FREE));

        // The first sample is one padding layer in from the minimum corner
        let c = grid.coord_of(samples[0].position).unwrap();
        assert_eq!(c, VoxelCoord::new(1, 1, 1));
    }

    #[test]
    fn test_samples_land_on_voxel_centres() {
        let samples: Vec<_> = (0..20)
            .map(|i| LabeledSample::new(Point3D::new(i as f32 * 0.05, 0.3, -0.1), 1.0))
            .collect();
        let grid = GridBuilder::default().from_samples(&samples, 0.05, 0.1);

        // No two samples share a voxel
        assert_eq!(grid.count_states().free, 20);
        for s in &samples {
            let c = grid.coord_of(s.position).unwrap();
            let centre = grid.coord_to_world(c);
            assert!(centre.distance(&s.position) < 1e-4);
        }
    }

    #[test]
    fn test_empty_sources_give_unseen_grid() {
        let grid = GridBuilder::default().from_samples(&[], 0.1, 0.2);
        assert!(grid.cell_count() > 0);
        assert_eq!(grid.count_states().seen(), 0);

        let grid = GridBuilder::default().from_octree(&LeafMap::new(0.1));
        assert_eq!(grid.count_states().seen(), 0);
    }

    #[test]
    fn test_non_finite_sample_skipped() {
        let samples = vec![
            LabeledSample::new(Point3D::new(f32::NAN, 0.0, 0.0), 1.0),
            LabeledSample::new(Point3D::new(0.0, 0.0, 0.0), 1.0),
        ];
        let grid = GridBuilder::default().from_samples(&samples, 0.1, 0.2);
        assert_eq!(grid.count_states().free, 1);
    }

    #[test]
    fn test_invalid_voxel_size_gives_unseen_voxel() {
        let builder = GridBuilder::default();

        let mut map = LeafMap::new(0.0);
        map.insert(Point3D::new(0.5, 0.5, 0.5), -1.0);
        map.insert_leaf(OctreeLeaf {
            center: Point3D::new(2.0, 2.0, 2.0),
            size: 4.0,
            value: 1.0,
        });
        let grid = builder.from_octree(&map);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.count_states().unseen, 1);

        let samples = [LabeledSample::new(Point3D::new(0.5, 0.5, 0.5), 5.0)];
        for voxel_size in [0.0, -0.1, f32::NAN] {
            let grid = builder.from_samples(&samples, voxel_size, 0.2);
            assert_eq!(grid.cell_count(), 1);
            assert_eq!(grid.count_states().unseen, 1);
        }
    }

    #[test]
    fn test_padding_clamped_to_one() {
        let builder = GridBuilder::from_config(&GridSection {
            padding_voxels: 0,
            ..GridSection::default()
        });
        assert_eq!(builder.padding_voxels(), 1);
    }
}
