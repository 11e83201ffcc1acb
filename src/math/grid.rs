use crate::error::OperationError;

use super::Point3;

/// A uniform axis-aligned grid of cubic cells.
///
/// Cells are indexed `(i, j, k)` from the grid origin; nodes (cell corners)
/// run one further along each axis.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid {
    origin: Point3,
    cell_size: f64,
    dims: [usize; 3],
}

impl SampleGrid {
    /// Builds a grid covering `[min, max]` with `padding` extra cells on
    /// every side.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell size is not positive, the bounds are not
    /// finite, or the grid would exceed `max_cells` cells.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn covering(
        min: &Point3,
        max: &Point3,
        cell_size: f64,
        padding: usize,
        max_cells: usize,
    ) -> Result<Self, OperationError> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "grid cell size must be positive, got {cell_size}"
            )));
        }
        if !min.iter().chain(max.iter()).all(|c| c.is_finite()) {
            return Err(OperationError::InvalidInput(
                "grid bounds must be finite".into(),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let pad = padding as f64 * cell_size;
        let origin = min - nalgebra::Vector3::repeat(pad);

        let mut dims = [0usize; 3];
        let mut total: usize = 1;
        for axis in 0..3 {
            let span = (max[axis] - min[axis]).max(0.0);
            let n = ((span / cell_size).ceil() as usize).max(1) + 2 * padding;
            dims[axis] = n;
            total = total.saturating_mul(n);
        }
        if total > max_cells {
            return Err(OperationError::InvalidInput(format!(
                "sampling grid of {total} cells exceeds the budget of {max_cells}"
            )));
        }

        Ok(Self {
            origin,
            cell_size,
            dims,
        })
    }

    /// Cell counts along x, y, z.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Edge length of a cell.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Linear index of a cell.
    #[must_use]
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    /// Center of a cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Point3 {
        let h = self.cell_size;
        Point3::new(
            self.origin.x + (i as f64 + 0.5) * h,
            self.origin.y + (j as f64 + 0.5) * h,
            self.origin.z + (k as f64 + 0.5) * h,
        )
    }

    /// Node (cell corner) position; valid for indices up to `dims` inclusive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn node(&self, i: usize, j: usize, k: usize) -> Point3 {
        let h = self.cell_size;
        Point3::new(
            self.origin.x + i as f64 * h,
            self.origin.y + j as f64 * h,
            self.origin.z + k as f64 * h,
        )
    }

    /// Linear index of a node.
    #[must_use]
    pub fn node_index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * (self.dims[1] + 1) + j) * (self.dims[0] + 1) + i
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        (self.dims[0] + 1) * (self.dims[1] + 1) * (self.dims[2] + 1)
    }

    /// Iterates all cell indices in linear order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let [nx, ny, nz] = self.dims;
        (0..nz).flat_map(move |k| {
            (0..ny).flat_map(move |j| (0..nx).map(move |i| (i, j, k)))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn covers_bounds_with_padding() {
        let grid =
            SampleGrid::covering(&p(0.0, 0.0, 0.0), &p(1.0, 0.5, 0.25), 0.25, 1, 1000).unwrap();
        assert_eq!(grid.dims(), [6, 4, 3]);
        let first = grid.cell_center(0, 0, 0);
        assert!((first.x - (-0.125)).abs() < 1e-12);
        assert_eq!(grid.cell_index(5, 3, 2), grid.cell_count() - 1);
    }

    #[test]
    fn cells_iterate_in_linear_order() {
        let grid = SampleGrid::covering(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0), 0.5, 0, 100).unwrap();
        for (n, (i, j, k)) in grid.cells().enumerate() {
            assert_eq!(grid.cell_index(i, j, k), n);
        }
    }

    #[test]
    fn budget_is_enforced() {
        let result = SampleGrid::covering(&p(0.0, 0.0, 0.0), &p(10.0, 10.0, 10.0), 0.01, 0, 1000);
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_cell_size_fails() {
        assert!(SampleGrid::covering(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0), 0.0, 0, 10).is_err());
    }
}
