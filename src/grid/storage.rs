//! Dense voxel grid storage.
//!
//! A flat owned buffer addressed by a computed linear index:
//!
//! ```text
//! idx = x + y * nx + z * nx * ny
//! ```
//!
//! Voxel `(x, y, z)` covers the world-space box from
//! `min_bounds + (x, y, z) * voxel_size` to `min_bounds + (x+1, y+1, z+1) * voxel_size`
//! and is represented by its centre.

use crate::core::{Bounds3D, GridSize, Point3D, VoxelCoord, VoxelState};

/// Dense 3D grid of `T` with world <-> index conversion.
#[derive(Clone, Debug)]
pub struct VoxelGrid<T> {
    voxels: Vec<T>,
    size: GridSize,
    voxel_size: f32,
    /// Pre-computed 1.0 / voxel_size for faster world-to-grid conversion.
    inv_voxel_size: f32,
    min_bounds: Point3D,
}

/// Whether `voxel_size` can address a grid (finite and positive).
#[inline]
pub fn is_valid_voxel_size(voxel_size: f32) -> bool {
    voxel_size.is_finite() && voxel_size > 0.0
}

impl<T: Clone> VoxelGrid<T> {
    /// Create a grid of the given dimensions, every voxel set to `fill`.
    pub fn new(voxel_size: f32, size: GridSize, min_bounds: Point3D, fill: T) -> Self {
        Self {
            voxels: vec![fill; size.cell_count()],
            size,
            voxel_size,
            inv_voxel_size: 1.0 / voxel_size,
            min_bounds,
        }
    }

    /// Create a grid covering `[min, max]`, at least one voxel per axis.
    ///
    /// A zero, negative or non-finite `voxel_size` gives a single-voxel grid.
    pub fn from_bounds(voxel_size: f32, min: Point3D, max: Point3D, fill: T) -> Self {
        if !is_valid_voxel_size(voxel_size) {
            log::debug!("Invalid voxel size {}, using a single-voxel grid", voxel_size);
            return Self::new(voxel_size, GridSize::new(1, 1, 1), min, fill);
        }
        let cells = |lo: f32, hi: f32| (((hi - lo) / voxel_size).ceil().max(1.0)) as usize;
        let size = GridSize::new(
            cells(min.x, max.x),
            cells(min.y, max.y),
            cells(min.z, max.z),
        );
        Self::new(voxel_size, size, min, fill)
    }

    /// Create a grid with the same geometry as `other`, every voxel set to `fill`.
    pub fn with_geometry_of<U>(other: &VoxelGrid<U>, fill: T) -> Self {
        Self::new(other.voxel_size, other.size, other.min_bounds, fill)
    }

    /// Overwrite every voxel with `value`.
    pub fn set_all(&mut self, value: T) {
        self.voxels.fill(value);
    }
}

impl<T> VoxelGrid<T> {
    // === Basic Properties ===

    /// Edge length of a voxel in meters.
    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Grid dimensions in voxels.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// World position of the minimum corner of voxel (0, 0, 0).
    #[inline]
    pub fn min_bounds(&self) -> Point3D {
        self.min_bounds
    }

    /// Total number of voxels.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.voxels.len()
    }

    /// World bounds covered by the grid.
    pub fn bounds(&self) -> Bounds3D {
        let max = Point3D::new(
            self.min_bounds.x + self.size.x as f32 * self.voxel_size,
            self.min_bounds.y + self.size.y as f32 * self.voxel_size,
            self.min_bounds.z + self.size.z as f32 * self.voxel_size,
        );
        Bounds3D::new(self.min_bounds, max)
    }

    /// All voxels in linear-index order.
    #[inline]
    pub fn voxels(&self) -> &[T] {
        &self.voxels
    }

    // === Coordinate Conversion ===

    /// Convert world coordinates to voxel coordinates (unchecked range).
    #[inline]
    pub fn world_to_coord(&self, point: Point3D) -> VoxelCoord {
        VoxelCoord::new(
            ((point.x - self.min_bounds.x) * self.inv_voxel_size).floor() as i32,
            ((point.y - self.min_bounds.y) * self.inv_voxel_size).floor() as i32,
            ((point.z - self.min_bounds.z) * self.inv_voxel_size).floor() as i32,
        )
    }

    /// Convert voxel coordinates to world coordinates (voxel centre).
    #[inline]
    pub fn coord_to_world(&self, coord: VoxelCoord) -> Point3D {
        Point3D::new(
            self.min_bounds.x + (coord.x as f32 + 0.5) * self.voxel_size,
            self.min_bounds.y + (coord.y as f32 + 0.5) * self.voxel_size,
            self.min_bounds.z + (coord.z as f32 + 0.5) * self.voxel_size,
        )
    }

    /// Check if voxel coordinates are within the grid.
    #[inline]
    pub fn is_valid_coord(&self, coord: VoxelCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as usize) < self.size.x
            && (coord.y as usize) < self.size.y
            && (coord.z as usize) < self.size.z
    }

    /// Voxel containing `point`, or `None` if the point is non-finite or
    /// outside the grid.
    #[inline]
    pub fn coord_of(&self, point: Point3D) -> Option<VoxelCoord> {
        if !point.is_finite() {
            return None;
        }
        let coord = self.world_to_coord(point);
        self.is_valid_coord(coord).then_some(coord)
    }

    /// Check if a world point falls inside the grid.
    #[inline]
    pub fn contains_point(&self, point: Point3D) -> bool {
        self.coord_of(point).is_some()
    }

    /// Convert voxel coordinates to a linear index.
    #[inline]
    pub fn coord_to_index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(
                coord.x as usize
                    + coord.y as usize * self.size.x
                    + coord.z as usize * self.size.x * self.size.y,
            )
        } else {
            None
        }
    }

    /// Convert a linear index to voxel coordinates.
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> VoxelCoord {
        let plane = self.size.x * self.size.y;
        VoxelCoord::new(
            (index % self.size.x) as i32,
            ((index % plane) / self.size.x) as i32,
            (index / plane) as i32,
        )
    }

    /// World position (voxel centre) of a linear index.
    #[inline]
    pub fn index_to_position(&self, index: usize) -> Point3D {
        self.coord_to_world(self.index_to_coord(index))
    }

    // === Voxel Access ===

    /// Voxel at voxel coordinates.
    #[inline]
    pub fn get(&self, coord: VoxelCoord) -> Option<&T> {
        self.coord_to_index(coord).map(|i| &self.voxels[i])
    }

    /// Mutable voxel at voxel coordinates.
    #[inline]
    pub fn get_mut(&mut self, coord: VoxelCoord) -> Option<&mut T> {
        self.coord_to_index(coord).map(|i| &mut self.voxels[i])
    }

    /// Voxel containing a world point.
    #[inline]
    pub fn get_world(&self, point: Point3D) -> Option<&T> {
        self.coord_of(point).and_then(|c| self.get(c))
    }

    /// Voxel at a linear index.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.voxels.get(index)
    }

    /// Set the voxel at voxel coordinates. Returns false if out of bounds.
    #[inline]
    pub fn set(&mut self, coord: VoxelCoord, value: T) -> bool {
        match self.get_mut(coord) {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }

    /// Set the voxel containing a world point. Returns false if the point is
    /// outside the grid or non-finite.
    #[inline]
    pub fn set_world(&mut self, point: Point3D, value: T) -> bool {
        match self.coord_of(point) {
            Some(coord) => self.set(coord, value),
            None => false,
        }
    }

    /// Iterate over all voxels with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &T)> + '_ {
        self.voxels
            .iter()
            .enumerate()
            .map(|(i, v)| (self.index_to_coord(i), v))
    }
}

/// Seen/occupied exploration state over a dense grid.
pub type SeenOccupancyGrid = VoxelGrid<VoxelState>;

/// Voxel counts for each exploration state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoxelCounts {
    /// Never observed
    pub unseen: usize,
    /// Seen and free
    pub free: usize,
    /// Seen and occupied
    pub occupied: usize,
}

impl VoxelCounts {
    /// Total observed voxels
    pub fn seen(&self) -> usize {
        self.free + self.occupied
    }
}

impl VoxelGrid<VoxelState> {
    /// Count voxels by exploration state.
    pub fn count_states(&self) -> VoxelCounts {
        let mut counts = VoxelCounts::default();
        for v in &self.voxels {
            match (v.seen, v.occupied) {
                (false, _) => counts.unseen += 1,
                (true, false) => counts.free += 1,
                (true, true) => counts.occupied += 1,
            }
        }
        counts
    }
}
