//! Contiguity clustering of oriented frontier points.
//!
//! Points closer than `tolerance` are connected; connected components form
//! clusters. Clusters outside `[min_size, max_size]` are dropped entirely.
//!
//! The accepted points are re-laid out cluster by cluster, so each cluster
//! is a contiguous, zero-based range of the filtered output list:
//!
//! ```text
//! input:   p0 p1 p2 p3 p4 p5 p6        clusters {p4 p5 p6} {p0 p2} {p1}
//! output:  p4 p5 p6 | p0 p2            min_size = 2
//!          0..3       3..5
//! ```

use std::collections::VecDeque;
use std::ops::Range;

use crate::config::ClusterSection;
use crate::core::Point3D;

use super::normal::OrientedPoint;
use super::spatial_index::PointIndex;

/// Parameters handed to a [`Clusterer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterParams {
    /// Maximum distance between connected points, in meters
    pub tolerance: f32,
    /// Smallest accepted cluster
    pub min_size: usize,
    /// Largest accepted cluster
    pub max_size: usize,
}

/// Euclidean clustering service.
pub trait Clusterer: Sync {
    /// Extract clusters from `cloud`.
    ///
    /// Returns one index set per accepted cluster, indices into `cloud`.
    fn extract(&self, cloud: &[Point3D], params: &ClusterParams) -> Vec<Vec<usize>>;
}

/// Region-growing Euclidean clusterer over an R-tree.
///
/// Indices within a cluster are ascending; clusters are ordered by size,
/// largest first (ties keep discovery order).
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanClusterer;

impl Clusterer for EuclideanClusterer {
    fn extract(&self, cloud: &[Point3D], params: &ClusterParams) -> Vec<Vec<usize>> {
        let index = PointIndex::new(cloud);
        let mut processed: Vec<bool> = cloud.iter().map(|p| !p.is_finite()).collect();
        let mut clusters = Vec::new();
        let mut queue = VecDeque::new();

        for seed in 0..cloud.len() {
            if processed[seed] {
                continue;
            }

            processed[seed] = true;
            queue.push_back(seed);
            let mut members = Vec::new();

            while let Some(current) = queue.pop_front() {
                members.push(current);
                for neighbor in index.within_radius(cloud[current], params.tolerance) {
                    if !processed[neighbor] {
                        processed[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            if members.len() >= params.min_size && members.len() <= params.max_size {
                members.sort_unstable();
                clusters.push(members);
            }
        }

        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        clusters
    }
}

/// Clustered frontier points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterSet {
    /// Accepted points, laid out cluster by cluster
    pub points: Vec<OrientedPoint>,
    /// Range of `points` occupied by each cluster
    pub ranges: Vec<Range<usize>>,
}

impl ClusterSet {
    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.ranges.len()
    }

    /// Total number of accepted points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True if no cluster was accepted.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Points of cluster `id`.
    pub fn cluster(&self, id: usize) -> Option<&[OrientedPoint]> {
        self.ranges.get(id).map(|r| &self.points[r.clone()])
    }

    /// Iterate clusters in order.
    pub fn clusters(&self) -> impl Iterator<Item = &[OrientedPoint]> + '_ {
        self.ranges.iter().map(|r| &self.points[r.clone()])
    }
}

/// Size-bounded contiguity filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterFilter {
    params: ClusterParams,
}

impl ClusterFilter {
    /// Create a filter with explicit parameters.
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    /// Create a filter from configuration; tolerance scales with voxel size.
    pub fn from_config(config: &ClusterSection, voxel_size: f32) -> Self {
        Self::new(ClusterParams {
            tolerance: config.tolerance_factor * voxel_size,
            min_size: config.min_size,
            max_size: config.max_size,
        })
    }

    /// Parameters in use.
    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Cluster `points` and keep accepted clusters.
    ///
    /// Size bounds are re-checked here after discarding indices the
    /// clusterer returned out of range. Indices in the result refer to the
    /// filtered list.
    pub fn apply<C: Clusterer + ?Sized>(
        &self,
        clusterer: &C,
        points: &[OrientedPoint],
    ) -> ClusterSet {
        let cloud: Vec<Point3D> = points.iter().map(|p| p.position).collect();
        let clusters = clusterer.extract(&cloud, &self.params);

        let mut set = ClusterSet::default();
        let mut dropped = 0usize;
        for cluster in clusters {
            let members: Vec<usize> = cluster.into_iter().filter(|&i| i < points.len()).collect();
            if members.len() < self.params.min_size || members.len() > self.params.max_size {
                dropped += 1;
                continue;
            }

            let start = set.points.len();
            set.points.extend(members.iter().map(|&i| points[i]));
            set.ranges.push(start..set.points.len());
        }

        log::debug!(
            "Cluster filter kept {} clusters ({} points) of {} input points, dropped {}",
            set.cluster_count(),
            set.point_count(),
            points.len(),
            dropped
        );
        set
    }

    /// Treat all points as a single cluster (no cluster for empty input).
    pub fn bypass(points: Vec<OrientedPoint>) -> ClusterSet {
        if points.is_empty() {
            return ClusterSet::default();
        }
        let len = points.len();
        ClusterSet {
            points,
            ranges: vec![0..len],
        }
    }
}
