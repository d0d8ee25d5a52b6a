//! Result transport.
//!
//! Frontier positions are published as a flat XYZ point cloud in the layout
//! ROS `sensor_msgs/PointCloud2` uses, so any PointCloud2-aware consumer can
//! display them. The message is serde-serializable; YAML helpers are
//! included for logging and fixtures.
//!
//! ```rust,ignore
//! use vastu_frontier::io::FrontierCloudMessage;
//!
//! let msg = FrontierCloudMessage::from_frontier(&frontier, "map");
//! let points = msg.positions()?;
//! ```

mod cloud;

pub use cloud::{FLOAT32, FrontierCloudMessage, PointField};
