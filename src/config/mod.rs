//! Configuration loading for vastu-frontier.
//!
//! All settings live in a single YAML file; every field has a default, so a
//! partial file (or none at all) is valid.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_frontier::config::FrontierConfig;
//!
//! // Load from default path (configs/frontier.yaml)
//! let config = FrontierConfig::load_default()?;
//!
//! // Or use built-in defaults with the ground-plane rule
//! let config = FrontierConfig::default().with_ground_plane(true);
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Padding, occupancy threshold, free distance |
//! | [`ScanSection`] | Adjacency rule, parallel scan |
//! | [`NormalSection`] | Verticality filter, search radius, viewpoint |
//! | [`ClusterSection`] | Cluster tolerance and size range |
//!
//! ## Example YAML
//!
//! ```yaml
//! scan:
//!   rule: ground_plane
//! normals:
//!   max_normal_z: 0.4
//!   search_radius_factor: 2.1
//! clustering:
//!   tolerance_factor: 1.5   # joins face diagonals
//!   min_size: 50
//! ```

mod defaults;
mod frontier;
mod sections;

pub use frontier::FrontierConfig;
pub use sections::{ClusterSection, GridSection, NormalSection, ScanSection};
