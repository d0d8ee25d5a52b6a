//! XYZ point cloud message.

use serde::{Deserialize, Serialize};

use crate::core::Point3D;
use crate::error::{FrontierError, Result};
use crate::frontier::Frontier;

/// PointCloud2 datatype tag for `f32` fields.
pub const FLOAT32: u8 = 7;

/// Bytes per XYZ point.
const POINT_STEP: u32 = 12;

/// One named field of a point record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointField {
    /// Field name (`x`, `y`, `z`)
    pub name: String,
    /// Byte offset inside the point record
    pub offset: u32,
    /// Datatype tag ([`FLOAT32`])
    pub datatype: u8,
    /// Elements per field
    pub count: u32,
}

impl PointField {
    fn float32(name: &str, offset: u32) -> Self {
        Self {
            name: name.to_string(),
            offset,
            datatype: FLOAT32,
            count: 1,
        }
    }
}

/// `(width, row_step)` for `count` points, saturated to the `u32` header fields.
///
/// Clouds too large for the header decode as a length mismatch.
fn row_dims(count: usize) -> (u32, u32) {
    let width = u32::try_from(count).unwrap_or(u32::MAX);
    let row_step = count
        .checked_mul(POINT_STEP as usize)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .unwrap_or(u32::MAX);
    (width, row_step)
}

fn xyz_fields() -> Vec<PointField> {
    vec![
        PointField::float32("x", 0),
        PointField::float32("y", 4),
        PointField::float32("z", 8),
    ]
}

/// Unorganized XYZ cloud of frontier positions.
///
/// Only positions are carried; normals and cluster ids stay in the
/// [`Frontier`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrontierCloudMessage {
    /// Coordinate frame of the positions
    pub frame_id: String,
    /// Number of points
    pub width: u32,
    /// Always 1 (unorganized cloud)
    pub height: u32,
    /// Point record layout
    pub fields: Vec<PointField>,
    /// Bytes per point
    pub point_step: u32,
    /// Bytes per row (`width * point_step`)
    pub row_step: u32,
    /// Little-endian point records
    pub data: Vec<u8>,
    /// True when no point contains NaN or infinity
    pub is_dense: bool,
}

impl FrontierCloudMessage {
    /// Build a message from the frontier list, in list order.
    pub fn from_frontier(frontier: &Frontier, frame_id: &str) -> Self {
        Self::from_points(frontier.list.iter().map(|v| v.position), frame_id)
    }

    /// Build a message from arbitrary positions.
    pub fn from_points<I>(points: I, frame_id: &str) -> Self
    where
        I: IntoIterator<Item = Point3D>,
    {
        let mut data = Vec::new();
        let mut count = 0usize;
        let mut is_dense = true;
        for p in points {
            is_dense &= p.is_finite();
            for v in p.to_array() {
                data.extend_from_slice(&v.to_le_bytes());
            }
            count += 1;
        }
        let (width, row_step) = row_dims(count);

        Self {
            frame_id: frame_id.to_string(),
            width,
            height: 1,
            fields: xyz_fields(),
            point_step: POINT_STEP,
            row_step,
            data,
            is_dense,
        }
    }

    /// Number of points described by the header.
    pub fn len(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// True if the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode positions.
    ///
    /// Fails if the header does not describe packed little-endian XYZ
    /// `f32` records or if the data length disagrees with it.
    pub fn positions(&self) -> Result<Vec<Point3D>> {
        if self.fields != xyz_fields() {
            return Err(FrontierError::Message(format!(
                "expected x/y/z float32 fields, got {:?}",
                self.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
            )));
        }
        if self.point_step != POINT_STEP {
            return Err(FrontierError::Message(format!(
                "expected point_step {}, got {}",
                POINT_STEP, self.point_step
            )));
        }
        let expected = self.len().checked_mul(POINT_STEP as usize);
        if expected != Some(self.data.len()) {
            return Err(FrontierError::Message(format!(
                "expected {} points ({} bytes each), got {} data bytes",
                self.len(),
                POINT_STEP,
                self.data.len()
            )));
        }

        Ok(self
            .data
            .chunks_exact(POINT_STEP as usize)
            .map(|record| {
                let f = |i: usize| {
                    f32::from_le_bytes([
                        record[i],
                        record[i + 1],
                        record[i + 2],
                        record[i + 3],
                    ])
                };
                Point3D::new(f(0), f(4), f(8))
            })
            .collect())
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
