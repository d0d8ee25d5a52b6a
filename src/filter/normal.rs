//! Surface-orientation filtering of raw frontier points.
//!
//! Each raw frontier point gets a local surface normal fitted to its
//! neighbours within `search_radius`, taken from the raw frontier cloud
//! itself. Points whose normal is predominantly vertical (floor or ceiling
//! facing frontier) are discarded:
//!
//! ```text
//! keep  iff  |n.z| <= max_normal_z
//! ```
//!
//! Normal estimation is a pluggable service ([`NormalEstimator`]); the default
//! [`PcaNormalEstimator`] fits a least-squares plane through each
//! neighbourhood.

use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

use crate::config::NormalSection;
use crate::core::{Point3D, SurfaceNormal};

use super::spatial_index::PointIndex;

/// Minimum neighbourhood size for a plane fit.
const MIN_NEIGHBORS: usize = 3;

/// A frontier point with its (optional) estimated normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedPoint {
    /// Voxel centre
    pub position: Point3D,
    /// Estimated normal, `None` when filtering was bypassed
    pub normal: Option<SurfaceNormal>,
}

impl OrientedPoint {
    /// Point without an estimated normal
    pub fn unoriented(position: Point3D) -> Self {
        Self {
            position,
            normal: None,
        }
    }
}

/// Per-point surface normal estimation service.
pub trait NormalEstimator: Sync {
    /// Estimate a normal for every point of `cloud` from its neighbours
    /// within `radius`.
    ///
    /// Must return exactly one slot per input point; `None` marks points
    /// whose neighbourhood is too small or degenerate.
    fn estimate(&self, cloud: &[Point3D], radius: f32) -> Vec<Option<SurfaceNormal>>;
}

/// Least-squares plane fit via covariance eigen decomposition.
///
/// The normal is the eigenvector of the smallest eigenvalue of the
/// neighbourhood covariance, flipped to face `viewpoint`.
#[derive(Clone, Copy, Debug)]
pub struct PcaNormalEstimator {
    viewpoint: Point3D,
    parallel: bool,
}

impl Default for PcaNormalEstimator {
    fn default() -> Self {
        Self {
            viewpoint: Point3D::ZERO,
            parallel: true,
        }
    }
}

impl PcaNormalEstimator {
    /// Create an estimator orienting normals towards `viewpoint`.
    pub fn new(viewpoint: Point3D) -> Self {
        Self {
            viewpoint,
            ..Self::default()
        }
    }

    /// Create an estimator from the normal configuration section.
    pub fn from_config(config: &NormalSection) -> Self {
        Self {
            viewpoint: config.viewpoint,
            parallel: config.parallel,
        }
    }

    /// Enable or disable per-point parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn estimate_one(
        &self,
        index: &PointIndex,
        cloud: &[Point3D],
        i: usize,
        radius: f32,
    ) -> Option<SurfaceNormal> {
        let query = cloud[i];
        if !query.is_finite() {
            return None;
        }

        let neighbors: Vec<Vector3<f64>> = index
            .within_radius(query, radius)
            .map(|j| {
                let p = cloud[j];
                Vector3::new(p.x as f64, p.y as f64, p.z as f64)
            })
            .collect();
        if neighbors.len() < MIN_NEIGHBORS {
            return None;
        }

        let count = neighbors.len() as f64;
        let centroid = neighbors
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, p| acc + p)
            / count;
        let covariance = neighbors.iter().fold(Matrix3::<f64>::zeros(), |acc, p| {
            let d = p - centroid;
            acc + d * d.transpose()
        }) / count;

        let eigen = covariance.symmetric_eigen();
        let (min_idx, min_val) = eigen
            .eigenvalues
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let sum = eigen.eigenvalues.sum();

        let n = eigen.eigenvectors.column(min_idx);
        let mut normal = Point3D::new(n[0] as f32, n[1] as f32, n[2] as f32);
        if !normal.is_finite() || normal.length() == 0.0 {
            return None;
        }
        if (self.viewpoint - query).dot(&normal) < 0.0 {
            normal = normal * -1.0;
        }

        let curvature = if sum > 0.0 { (min_val.max(0.0) / sum) as f32 } else { 0.0 };
        Some(SurfaceNormal::new(normal.x, normal.y, normal.z, curvature))
    }
}

impl NormalEstimator for PcaNormalEstimator {
    fn estimate(&self, cloud: &[Point3D], radius: f32) -> Vec<Option<SurfaceNormal>> {
        let index = PointIndex::new(cloud);
        if self.parallel {
            (0..cloud.len())
                .into_par_iter()
                .map(|i| self.estimate_one(&index, cloud, i, radius))
                .collect()
        } else {
            (0..cloud.len())
                .map(|i| self.estimate_one(&index, cloud, i, radius))
                .collect()
        }
    }
}

/// Verticality filter over estimated normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalFilter {
    /// Largest accepted `|n.z|` (inclusive)
    pub max_normal_z: f32,
    /// Neighbourhood radius handed to the estimator, in meters
    pub search_radius: f32,
}

impl NormalFilter {
    /// Create a filter with explicit threshold and radius.
    pub fn new(max_normal_z: f32, search_radius: f32) -> Self {
        Self {
            max_normal_z,
            search_radius,
        }
    }

    /// Create a filter from configuration; the radius scales with voxel size.
    pub fn from_config(config: &NormalSection, voxel_size: f32) -> Self {
        Self::new(config.max_normal_z, config.search_radius_factor * voxel_size)
    }

    /// Whether a normal satisfies the verticality threshold.
    #[inline]
    pub fn accepts(&self, normal: &SurfaceNormal) -> bool {
        normal.verticality() <= self.max_normal_z
    }

    /// Estimate normals for `raw` and keep the points that pass.
    ///
    /// Points without an estimate are dropped. Input order is preserved.
    pub fn apply<E: NormalEstimator + ?Sized>(
        &self,
        estimator: &E,
        raw: &[Point3D],
    ) -> Vec<OrientedPoint> {
        let normals = estimator.estimate(raw, self.search_radius);
        if normals.len() != raw.len() {
            log::warn!(
                "Normal estimator returned {} normals for {} points",
                normals.len(),
                raw.len()
            );
        }

        let kept: Vec<OrientedPoint> = raw
            .iter()
            .zip(normals)
            .filter_map(|(&position, normal)| {
                let normal = normal?;
                self.accepts(&normal).then_some(OrientedPoint {
                    position,
                    normal: Some(normal),
                })
            })
            .collect();

        log::debug!("Normal filter kept {} of {} points", kept.len(), raw.len());
        kept
    }

    /// Pass every point through without a normal.
    pub fn bypass(raw: &[Point3D]) -> Vec<OrientedPoint> {
        raw.iter().copied().map(OrientedPoint::unoriented).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Estimator returning a fixed normal per point.
    struct FixedNormals(Vec<Option<SurfaceNormal>>);

    impl NormalEstimator for FixedNormals {
        fn estimate(&self, _cloud: &[Point3D], _radius: f32) -> Vec<Option<SurfaceNormal>> {
            self.0.clone()
        }
    }

    fn plane_cloud(vertical: bool, n: i32, spacing: f32) -> Vec<Point3D> {
        let mut cloud = Vec::new();
        for a in 0..n {
            for b in 0..n {
                let (u, v) = (a as f32 * spacing, b as f32 * spacing);
                cloud.push(if vertical {
                    Point3D::new(2.0, u, v)
                } else {
                    Point3D::new(u, v, 1.0)
                });
            }
        }
        cloud
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = NormalFilter::new(0.4, 0.21);
        let raw = vec![Point3D::ZERO, Point3D::new(1.0, 0.0, 0.0), Point3D::new(2.0, 0.0, 0.0)];
        let estimator = FixedNormals(vec![
            Some(SurfaceNormal::new(0.0, 0.0, 0.4, 0.0)),
            Some(SurfaceNormal::new(0.0, 0.0, -0.4001, 0.0)),
            Some(SurfaceNormal::new(1.0, 0.0, 0.0, 0.0)),
        ]);

        let kept = filter.apply(&estimator, &raw);
        let positions: Vec<Point3D> = kept.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![raw[0], raw[2]]);
    }

    #[test]
    fn test_missing_normal_dropped() {
        let filter = NormalFilter::new(1.0, 0.21);
        let raw = vec![Point3D::ZERO, Point3D::new(1.0, 0.0, 0.0)];
        let estimator = FixedNormals(vec![None, Some(SurfaceNormal::new(1.0, 0.0, 0.0, 0.0))]);
        let kept = filter.apply(&estimator, &raw);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].position, raw[1]);
    }

    #[test]
    fn test_bypass_keeps_everything() {
        let raw = plane_cloud(false, 4, 0.1);
        let out = NormalFilter::bypass(&raw);
        assert_eq!(out.len(), raw.len());
        assert!(out.iter().all(|p| p.normal.is_none()));
    }

    #[test]
    fn test_pca_vertical_wall_normal_is_horizontal() {
        let cloud = plane_cloud(true, 6, 0.1);
        let normals = PcaNormalEstimator::default().estimate(&cloud, 0.21);
        assert_eq!(normals.len(), cloud.len());
        for n in normals {
            let n = n.expect("planar neighbourhood");
            assert_relative_eq!(n.z, 0.0, epsilon = 1e-3);
            assert_relative_eq!(n.x.abs(), 1.0, epsilon = 1e-3);
            // Viewpoint at origin, wall at x = 2: normal faces -x
            assert!(n.x < 0.0);
            assert!(n.curvature < 1e-4);
        }
    }

    #[test]
    fn test_pca_floor_is_filtered() {
        let cloud = plane_cloud(false, 6, 0.1);
        let filter = NormalFilter::new(0.4, 0.21);
        let kept = filter.apply(&PcaNormalEstimator::default(), &cloud);
        assert!(kept.is_empty());

        let wall = plane_cloud(true, 6, 0.1);
        let kept = filter.apply(&PcaNormalEstimator::default(), &wall);
        assert_eq!(kept.len(), wall.len());
    }

    #[test]
    fn test_pca_sparse_points_have_no_normal() {
        let cloud = vec![Point3D::ZERO, Point3D::new(5.0, 0.0, 0.0), Point3D::new(0.1, 0.0, 0.0)];
        let normals = PcaNormalEstimator::default().estimate(&cloud, 0.21);
        assert!(normals.iter().all(|n| n.is_none()));
    }

    #[test]
    fn test_pca_parallel_matches_sequential() {
        let cloud = plane_cloud(true, 5, 0.1);
        let par = PcaNormalEstimator::default().estimate(&cloud, 0.21);
        let seq = PcaNormalEstimator::default().with_parallel(false).estimate(&cloud, 0.21);
        assert_eq!(par, seq);
    }

    #[test]
    fn test_from_config_scales_radius() {
        let filter = NormalFilter::from_config(&NormalSection::default(), 0.1);
        assert_relative_eq!(filter.search_radius, 0.21, epsilon = 1e-6);
        assert_eq!(filter.max_normal_z, 0.4);
    }
}
