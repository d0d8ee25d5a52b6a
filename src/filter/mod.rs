//! Geometric filter stages between the raw scan and the assembled frontier.
//!
//! - [`NormalFilter`]: drops floor/ceiling-facing frontier using a
//!   [`NormalEstimator`] service (default [`PcaNormalEstimator`])
//! - [`ClusterFilter`]: groups contiguous points and drops small groups
//!   using a [`Clusterer`] service (default [`EuclideanClusterer`])
//!
//! Both services are traits so either stage can run against deterministic
//! fakes.

mod cluster;
mod normal;
mod spatial_index;

pub use cluster::{ClusterFilter, ClusterParams, ClusterSet, Clusterer, EuclideanClusterer};
pub use normal::{NormalEstimator, NormalFilter, OrientedPoint, PcaNormalEstimator};
pub use spatial_index::PointIndex;
