//! Axis-aligned bounding box in 3D.
//!
//! [`Bounds3D`] tracks the spatial extent of an occupancy source so the
//! voxel grid can be sized to cover it.
//!
//! ```rust
//! use vastu_frontier::core::{Bounds3D, Point3D};
//!
//! let mut bounds = Bounds3D::empty();
//! bounds.expand_to_include(Point3D::new(1.0, 1.0, 0.0));
//! bounds.expand_to_include(Point3D::new(-2.0, 3.0, 0.5));
//! assert_eq!(bounds.min, Point3D::new(-2.0, 1.0, 0.0));
//! assert_eq!(bounds.max, Point3D::new(1.0, 3.0, 0.5));
//! ```

use super::point::Point3D;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds3D {
    /// Minimum corner (smallest x, y and z values).
    pub min: Point3D,
    /// Maximum corner (largest x, y and z values).
    pub max: Point3D,
}

impl Bounds3D {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty bounds has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point3D::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3D::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Check if the bounds are empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Create bounds from a single point.
    #[inline]
    pub fn from_point(point: Point3D) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Tight bounds over a set of points, in a single pass.
    ///
    /// Returns empty bounds if there are no points.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3D>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(p);
        }
        bounds
    }

    /// Grow the bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: Point3D) {
        self.min = self.min.min(&point);
        self.max = self.max.max(&point);
    }

    /// Size along each axis.
    #[inline]
    pub fn extent(&self) -> Point3D {
        self.max - self.min
    }

    /// Check if a point is inside (inclusive on both corners).
    #[inline]
    pub fn contains(&self, point: Point3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Bounds grown by `margin` on every face.
    #[inline]
    pub fn padded(&self, margin: f32) -> Self {
        let m = Point3D::new(margin, margin, margin);
        Self::new(self.min - m, self.max + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let b = Bounds3D::empty();
        assert!(b.is_empty());
        assert!(!b.contains(Point3D::ZERO));
    }

    #[test]
    fn test_from_points() {
        let b = Bounds3D::from_points([
            Point3D::new(0.0, 5.0, 1.0),
            Point3D::new(2.0, -1.0, 0.0),
            Point3D::new(1.0, 0.0, 3.0),
        ]);
        assert_eq!(b.min, Point3D::new(0.0, -1.0, 0.0));
        assert_eq!(b.max, Point3D::new(2.0, 5.0, 3.0));
        assert!(b.contains(Point3D::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_padded() {
        let b = Bounds3D::from_point(Point3D::ZERO).padded(0.5);
        assert_eq!(b.min, Point3D::new(-0.5, -0.5, -0.5));
        assert_eq!(b.extent(), Point3D::new(1.0, 1.0, 1.0));
    }
}
