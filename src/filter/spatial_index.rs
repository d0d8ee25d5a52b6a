//! R-tree point index for radius neighbourhood queries.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::core::Point3D;

/// A point tagged with its position in the source cloud.
#[derive(Clone, Copy, Debug)]
struct IndexedPoint {
    point: [f32; 3],
    index: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Spatial index over a point cloud.
///
/// Non-finite points are left out of the index and never returned.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load an index over `cloud`.
    pub fn new(cloud: &[Point3D]) -> Self {
        let indexed: Vec<IndexedPoint> = cloud
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(index, p)| IndexedPoint {
                point: p.to_array(),
                index,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Cloud indices of all points within `radius` of `point` (inclusive),
    /// including the point itself if it is in the cloud. Order is unspecified.
    pub fn within_radius(&self, point: Point3D, radius: f32) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_within_distance(point.to_array(), radius * radius)
            .map(|p| p.index)
    }
}
