//! The assembled frontier: an ordered voxel list plus an O(1) lookup grid.
//!
//! ```text
//! list:  [v0 v1 v2 v3 ...]           (cluster by cluster)
//!          ^        ^
//! map:   voxel(p0) -> (true, 0)      every other voxel -> (false, -1)
//!        voxel(p3) -> (true, 3)
//! ```
//!
//! For every voxel in the list, looking up its position in the map yields
//! its own zero-based list index.

use crate::core::{Point3D, SurfaceNormal};
use crate::filter::ClusterSet;
use crate::grid::VoxelGrid;

/// Sentinel for an unassigned cluster or group id.
pub const UNASSIGNED: i32 = -1;

/// A single frontier voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierVoxel {
    /// Voxel centre
    pub position: Point3D,
    /// Estimated surface normal (None if normal filtering was bypassed)
    pub normal: Option<SurfaceNormal>,
    /// Cluster ordinal, or [`UNASSIGNED`]
    pub cluster: i32,
    /// Reserved for downstream grouping, [`UNASSIGNED`] here
    pub group: i32,
}

impl FrontierVoxel {
    /// Create an unclustered voxel.
    pub fn new(position: Point3D, normal: Option<SurfaceNormal>) -> Self {
        Self {
            position,
            normal,
            cluster: UNASSIGNED,
            group: UNASSIGNED,
        }
    }
}

/// Lookup-grid entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrontierCell {
    /// Whether this voxel is frontier
    pub is_frontier: bool,
    /// Zero-based index into [`Frontier::list`], -1 when not frontier
    pub index: i32,
}

impl FrontierCell {
    /// Not a frontier voxel.
    pub const EMPTY: FrontierCell = FrontierCell {
        is_frontier: false,
        index: -1,
    };

    /// Frontier voxel at list position `index`.
    #[inline]
    pub fn at(index: usize) -> Self {
        Self {
            is_frontier: true,
            index: index as i32,
        }
    }

    /// List index if this voxel is frontier.
    #[inline]
    pub fn list_index(&self) -> Option<usize> {
        (self.is_frontier && self.index >= 0).then_some(self.index as usize)
    }
}

impl Default for FrontierCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Terminal artifact of the pipeline.
#[derive(Clone, Debug)]
pub struct Frontier {
    /// Frontier voxels in assembly order
    pub list: Vec<FrontierVoxel>,
    /// Per-voxel frontier flag and list index over the source grid extent
    pub map: VoxelGrid<FrontierCell>,
}

impl Frontier {
    /// Empty frontier over the geometry of `grid`.
    pub fn empty_like<T>(grid: &VoxelGrid<T>) -> Self {
        Self {
            list: Vec::new(),
            map: VoxelGrid::with_geometry_of(grid, FrontierCell::EMPTY),
        }
    }

    /// Number of frontier voxels.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True if there are no frontier voxels.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Lookup-grid entry for a world position (EMPTY outside the grid).
    pub fn cell(&self, point: Point3D) -> FrontierCell {
        self.map.get_world(point).copied().unwrap_or(FrontierCell::EMPTY)
    }

    /// Whether the voxel containing `point` is frontier.
    pub fn is_frontier(&self, point: Point3D) -> bool {
        self.cell(point).is_frontier
    }

    /// List index of the frontier voxel containing `point`.
    pub fn index_of(&self, point: Point3D) -> Option<usize> {
        self.cell(point).list_index()
    }

    /// Frontier voxel containing `point`.
    pub fn get(&self, point: Point3D) -> Option<&FrontierVoxel> {
        self.index_of(point).and_then(|i| self.list.get(i))
    }

    /// Number of distinct clusters.
    pub fn cluster_count(&self) -> usize {
        self.list
            .iter()
            .map(|v| v.cluster)
            .filter(|&c| c != UNASSIGNED)
            .max()
            .map_or(0, |c| c as usize + 1)
    }

    /// Voxels belonging to cluster `id`.
    pub fn cluster(&self, id: i32) -> impl Iterator<Item = &FrontierVoxel> + '_ {
        self.list.iter().filter(move |v| v.cluster == id)
    }

    /// Positions of all frontier voxels, in list order.
    pub fn positions(&self) -> Vec<Point3D> {
        self.list.iter().map(|v| v.position).collect()
    }
}

/// Builds a [`Frontier`] from clustered points.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierAssembler;

impl FrontierAssembler {
    /// Assemble clusters over the geometry of the source grid.
    ///
    /// Cluster ids are cluster ordinals. Points outside the lookup grid (or
    /// non-finite) and repeats of an already listed voxel are skipped, so
    /// every listed voxel resolves back to itself.
    pub fn assemble<T>(&self, clusters: &ClusterSet, grid: &VoxelGrid<T>) -> Frontier {
        let mut frontier = Frontier::empty_like(grid);
        frontier.list.reserve(clusters.point_count());

        let mut skipped = 0usize;
        for (cluster_id, cluster) in clusters.clusters().enumerate() {
            for point in cluster {
                let Some(coord) = frontier.map.coord_of(point.position) else {
                    log::trace!("Skipping frontier point outside grid: {:?}", point.position);
                    skipped += 1;
                    continue;
                };

                if frontier.map.get(coord).is_some_and(|c| c.is_frontier) {
                    log::trace!("Skipping duplicate frontier voxel at {:?}", point.position);
                    skipped += 1;
                    continue;
                }

                let mut voxel = FrontierVoxel::new(point.position, point.normal);
                voxel.cluster = cluster_id as i32;
                frontier.list.push(voxel);
                frontier.map.set(coord, FrontierCell::at(frontier.list.len() - 1));
            }
        }

        log::debug!(
            "Assembled {} frontier voxels in {} clusters ({} skipped)",
            frontier.len(),
            clusters.cluster_count(),
            skipped
        );
        frontier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridSize;
    use crate::filter::OrientedPoint;

    fn grid() -> VoxelGrid<()> {
        VoxelGrid::new(1.0, GridSize::new(10, 10, 3), Point3D::ZERO, ())
    }

    fn set_of(clusters: Vec<Vec<Point3D>>) -> ClusterSet {
        let mut set = ClusterSet::default();
        for cluster in clusters {
            let start = set.points.len();
            set.points.extend(cluster.into_iter().map(OrientedPoint::unoriented));
            set.ranges.push(start..set.points.len());
        }
        set
    }

    #[test]
    fn test_index_round_trip() {
        let set = set_of(vec![
            vec![Point3D::new(1.5, 1.5, 0.5), Point3D::new(2.5, 1.5, 0.5)],
            vec![Point3D::new(7.5, 7.5, 1.5)],
        ]);
        let frontier = FrontierAssembler.assemble(&set, &grid());

        assert_eq!(frontier.len(), 3);
        for (i, voxel) in frontier.list.iter().enumerate() {
            let cell = frontier.cell(voxel.position);
            assert!(cell.is_frontier);
            assert_eq!(cell.index, i as i32);
            assert_eq!(frontier.get(voxel.position), Some(voxel));
        }
    }

    #[test]
    fn test_cluster_ids_are_ordinals() {
        let set = set_of(vec![
            vec![Point3D::new(0.5, 0.5, 0.5)],
            vec![Point3D::new(3.5, 0.5, 0.5), Point3D::new(4.5, 0.5, 0.5)],
        ]);
        let frontier = FrontierAssembler.assemble(&set, &grid());

        let ids: Vec<i32> = frontier.list.iter().map(|v| v.cluster).collect();
        assert_eq!(ids, vec![0, 1, 1]);
        assert_eq!(frontier.cluster_count(), 2);
        assert_eq!(frontier.cluster(1).count(), 2);
        assert!(frontier.list.iter().all(|v| v.group == UNASSIGNED));
    }

    #[test]
    fn test_out_of_bounds_points_skipped() {
        let set = set_of(vec![vec![
            Point3D::new(0.5, 0.5, 0.5),
            Point3D::new(f32::NAN, 0.5, 0.5),
            Point3D::new(20.0, 0.5, 0.5),
            Point3D::new(1.5, 0.5, 0.5),
        ]]);
        let frontier = FrontierAssembler.assemble(&set, &grid());

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.index_of(Point3D::new(1.5, 0.5, 0.5)), Some(1));
    }

    #[test]
    fn test_duplicate_voxel_keeps_first() {
        let set = set_of(vec![
            vec![Point3D::new(2.5, 2.5, 0.5)],
            vec![Point3D::new(2.4, 2.6, 0.5), Point3D::new(3.5, 2.5, 0.5)],
        ]);
        let frontier = FrontierAssembler.assemble(&set, &grid());

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.get(Point3D::new(2.5, 2.5, 0.5)).unwrap().cluster, 0);
        assert_eq!(frontier.index_of(Point3D::new(3.5, 2.5, 0.5)), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let frontier = FrontierAssembler.assemble(&ClusterSet::default(), &grid());
        assert!(frontier.is_empty());
        assert_eq!(frontier.map.size(), GridSize::new(10, 10, 3));
        assert!(frontier.map.voxels().iter().all(|c| *c == FrontierCell::EMPTY));
        assert_eq!(frontier.cluster_count(), 0);
    }

    #[test]
    fn test_lookup_outside_grid_is_empty() {
        let frontier = FrontierAssembler.assemble(&ClusterSet::default(), &grid());
        assert_eq!(frontier.cell(Point3D::new(-5.0, 0.0, 0.0)), FrontierCell::EMPTY);
        assert!(!frontier.is_frontier(Point3D::new(0.5, 0.5, 0.5)));
        assert_eq!(FrontierCell::EMPTY.list_index(), None);
    }
}
