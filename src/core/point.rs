//! Point and coordinate types for the voxel grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Voxel coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelCoord {
    /// X index
    pub x: i32,
    /// Y index
    pub y: i32,
    /// Z index (vertical)
    pub z: i32,
}

impl VoxelCoord {
    /// Create a new voxel coordinate
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the 6 face neighbors (+X, -X, +Y, -Y, +Z, -Z)
    #[inline]
    pub fn neighbors_6(&self) -> [VoxelCoord; 6] {
        [
            VoxelCoord::new(self.x + 1, self.y, self.z),
            VoxelCoord::new(self.x - 1, self.y, self.z),
            VoxelCoord::new(self.x, self.y + 1, self.z),
            VoxelCoord::new(self.x, self.y - 1, self.z),
            VoxelCoord::new(self.x, self.y, self.z + 1),
            VoxelCoord::new(self.x, self.y, self.z - 1),
        ]
    }

    /// Get the 4 in-plane neighbors (+X, -X, +Y, -Y)
    #[inline]
    pub fn neighbors_4(&self) -> [VoxelCoord; 4] {
        [
            VoxelCoord::new(self.x + 1, self.y, self.z),
            VoxelCoord::new(self.x - 1, self.y, self.z),
            VoxelCoord::new(self.x, self.y + 1, self.z),
            VoxelCoord::new(self.x, self.y - 1, self.z),
        ]
    }
}

impl Add for VoxelCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        VoxelCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for VoxelCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        VoxelCoord::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Grid dimensions in voxels along each axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    /// Voxels along X
    pub x: usize,
    /// Voxels along Y
    pub y: usize,
    /// Voxels along Z
    pub z: usize,
}

impl GridSize {
    /// Create a new grid size
    #[inline]
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of voxels
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }
}

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters (up)
    pub z: f32,
}

impl Point3D {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero point (origin)
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalize(&self) -> Point3D {
        let len = self.length();
        if len > 0.0 { *self * (1.0 / len) } else { *self }
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &Point3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// True if every component is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(&self, other: &Point3D) -> Point3D {
        Point3D::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(&self, other: &Point3D) -> Point3D {
        Point3D::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// As an `[x, y, z]` array (R-tree key layout)
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Point3D {
    #[inline]
    fn from(p: [f32; 3]) -> Self {
        Point3D::new(p[0], p[1], p[2])
    }
}

impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point3D::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}
