//! End-to-end frontier extraction.
//!
//! The pipeline runs five stages strictly in sequence:
//!
//! ```text
//! occupancy source ──► SeenOccupancyGrid ──► raw frontier points
//!                                               │
//!          Frontier ◄── clusters ◄── oriented points (normal filter)
//! ```
//!
//! Normal estimation and clustering are injected as [`NormalEstimator`] and
//! [`Clusterer`] services, so tests can swap in deterministic fakes. Each
//! call owns all of its intermediate state; a pipeline can be shared between
//! threads.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_frontier::{FrontierConfig, FrontierPipeline, LeafMap};
//!
//! let pipeline = FrontierPipeline::new(FrontierConfig::default());
//! let frontier = pipeline.compute_from_octree(&map);
//! for voxel in &frontier.list {
//!     println!("{:?} in cluster {}", voxel.position, voxel.cluster);
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::FrontierConfig;
use crate::core::Point3D;
use crate::filter::{
    ClusterFilter, ClusterSet, Clusterer, EuclideanClusterer, NormalEstimator, NormalFilter,
    OrientedPoint, PcaNormalEstimator,
};
use crate::frontier::{Frontier, FrontierAssembler};
use crate::grid::{GridBuilder, LabeledSample, OctreeSource, SeenOccupancyGrid};
use crate::scan::FrontierScanner;

/// Pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Occupancy source to seen/occupied grid
    BuildGrid,
    /// Grid scan for raw frontier points
    Scan,
    /// Normal estimation and verticality filter
    Normals,
    /// Euclidean clustering
    Clusters,
    /// Frontier list and lookup grid
    Assemble,
}

impl Stage {
    /// Human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::BuildGrid => "Built occupancy grid",
            Stage::Scan => "Found frontier points",
            Stage::Normals => "Filtered frontier normals",
            Stage::Clusters => "Clustered frontier points",
            Stage::Assemble => "Assembled frontier",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timing of one completed stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageTiming {
    /// Which stage finished
    pub stage: Stage,
    /// Wall time spent in the stage
    pub elapsed: Duration,
    /// Size of the stage output (voxels, points, or frontier entries)
    pub output_len: usize,
}

/// Receives a callback after every pipeline stage.
pub trait StageObserver: Send + Sync {
    /// Called once per stage, in stage order.
    fn stage_completed(&self, timing: &StageTiming);
}

/// Logs each stage at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn stage_completed(&self, timing: &StageTiming) {
        log::info!(
            "{} ({}) in: {:.5}s",
            timing.stage,
            timing.output_len,
            timing.elapsed.as_secs_f64()
        );
    }
}

/// Collects stage timings for later inspection.
#[derive(Debug, Default)]
pub struct TimingRecorder {
    timings: Mutex<Vec<StageTiming>>,
}

impl TimingRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded timings, oldest first.
    pub fn timings(&self) -> Vec<StageTiming> {
        self.timings.lock().clone()
    }

    /// Stages recorded so far, oldest first.
    pub fn stages(&self) -> Vec<Stage> {
        self.timings.lock().iter().map(|t| t.stage).collect()
    }

    /// Sum of all recorded stage durations.
    pub fn total(&self) -> Duration {
        self.timings.lock().iter().map(|t| t.elapsed).sum()
    }

    /// Drop all recorded timings.
    pub fn clear(&self) {
        self.timings.lock().clear();
    }
}

impl StageObserver for TimingRecorder {
    fn stage_completed(&self, timing: &StageTiming) {
        self.timings.lock().push(*timing);
    }
}

/// Frontier extraction pipeline.
pub struct FrontierPipeline<N = PcaNormalEstimator, C = EuclideanClusterer> {
    config: FrontierConfig,
    builder: GridBuilder,
    scanner: FrontierScanner,
    estimator: N,
    clusterer: C,
    observer: Option<Arc<dyn StageObserver>>,
}

impl FrontierPipeline {
    /// Create a pipeline with the PCA normal estimator and Euclidean clusterer.
    pub fn new(config: FrontierConfig) -> Self {
        let estimator = PcaNormalEstimator::from_config(&config.normals);
        Self::with_services(config, estimator, EuclideanClusterer)
    }
}

impl Default for FrontierPipeline {
    fn default() -> Self {
        Self::new(FrontierConfig::default())
    }
}

impl<N: NormalEstimator, C: Clusterer> FrontierPipeline<N, C> {
    /// Create a pipeline with custom normal estimation and clustering services.
    pub fn with_services(config: FrontierConfig, estimator: N, clusterer: C) -> Self {
        Self {
            builder: GridBuilder::from_config(&config.grid),
            scanner: FrontierScanner::from_config(&config.scan),
            config,
            estimator,
            clusterer,
            observer: None,
        }
    }

    /// Attach a stage observer.
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Extract the frontier of an octree map.
    ///
    /// The voxel size is the octree resolution.
    pub fn compute_from_octree<S: OctreeSource + ?Sized>(&self, source: &S) -> Frontier {
        let grid = self.timed(
            Stage::BuildGrid,
            || self.builder.from_octree(source),
            SeenOccupancyGrid::cell_count,
        );
        self.compute_from_grid(&grid)
    }

    /// Extract the frontier of a labeled point-sample map.
    pub fn compute_from_samples(&self, samples: &[LabeledSample], voxel_size: f32) -> Frontier {
        let min_free_distance = self.config.grid.free_distance_factor * voxel_size;
        let grid = self.timed(
            Stage::BuildGrid,
            || self.builder.from_samples(samples, voxel_size, min_free_distance),
            SeenOccupancyGrid::cell_count,
        );
        self.compute_from_grid(&grid)
    }

    /// Extract the frontier of an already-built grid.
    pub fn compute_from_grid(&self, grid: &SeenOccupancyGrid) -> Frontier {
        let voxel_size = grid.voxel_size();

        let raw = self.timed(Stage::Scan, || self.scanner.scan(grid), Vec::len);
        log::debug!("Scan: {} raw frontier points", raw.len());

        let oriented = self.timed(Stage::Normals, || self.orient(&raw, voxel_size), Vec::len);
        log::debug!("Normals: {} of {} points kept", oriented.len(), raw.len());

        let clusters = self.timed(
            Stage::Clusters,
            || self.cluster(oriented, voxel_size),
            ClusterSet::point_count,
        );
        log::debug!(
            "Clusters: {} clusters, {} points",
            clusters.cluster_count(),
            clusters.point_count()
        );

        self.timed(
            Stage::Assemble,
            || FrontierAssembler.assemble(&clusters, grid),
            Frontier::len,
        )
    }

    fn orient(&self, raw: &[Point3D], voxel_size: f32) -> Vec<OrientedPoint> {
        if self.config.normals.enabled {
            NormalFilter::from_config(&self.config.normals, voxel_size).apply(&self.estimator, raw)
        } else {
            NormalFilter::bypass(raw)
        }
    }

    fn cluster(&self, points: Vec<OrientedPoint>, voxel_size: f32) -> ClusterSet {
        if self.config.clustering.enabled {
            ClusterFilter::from_config(&self.config.clustering, voxel_size)
                .apply(&self.clusterer, &points)
        } else {
            ClusterFilter::bypass(points)
        }
    }

    fn timed<T>(&self, stage: Stage, run: impl FnOnce() -> T, len: impl Fn(&T) -> usize) -> T {
        let start = Instant::now();
        let output = run();
        if let Some(observer) = &self.observer {
            observer.stage_completed(&StageTiming {
                stage,
                elapsed: start.elapsed(),
                output_len: len(&output),
            });
        }
        output
    }
}
