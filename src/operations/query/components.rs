use std::collections::VecDeque;

use crate::csg::{SolidId, SolidStore};
use crate::error::Result;

use super::{grid_for, SamplingParams};

/// Counts the connected components of a solid.
///
/// Occupied sampling cells are grouped by 6-connectivity (shared faces).
/// Gaps narrower than a cell may be bridged, so the cell size must resolve
/// the thinnest wall of interest.
pub struct Components {
    solid: SolidId,
    params: SamplingParams,
}

impl Components {
    /// Creates a new `Components` query with default sampling.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: SamplingParams::default(),
        }
    }

    /// Sets custom sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the number of components.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the grid exceeds its budget.
    pub fn execute(&self, store: &SolidStore) -> Result<usize> {
        let node = &store.solid(self.solid)?.node;
        let Some(grid) = grid_for(node, self.params, 1)? else {
            return Ok(0);
        };

        let mut occupied = vec![false; grid.cell_count()];
        for (i, j, k) in grid.cells() {
            occupied[grid.cell_index(i, j, k)] = node.contains(&grid.cell_center(i, j, k));
        }

        let [nx, ny, nz] = grid.dims();
        let mut visited = vec![false; occupied.len()];
        let mut queue = VecDeque::new();
        let mut components = 0;

        for (i, j, k) in grid.cells() {
            let start = grid.cell_index(i, j, k);
            if !occupied[start] || visited[start] {
                continue;
            }
            components += 1;
            visited[start] = true;
            queue.push_back((i, j, k));

            while let Some((ci, cj, ck)) = queue.pop_front() {
                let mut visit = |ni: usize, nj: usize, nk: usize| {
                    let idx = grid.cell_index(ni, nj, nk);
                    if occupied[idx] && !visited[idx] {
                        visited[idx] = true;
                        queue.push_back((ni, nj, nk));
                    }
                };
                if ci > 0 {
                    visit(ci - 1, cj, ck);
                }
                if ci + 1 < nx {
                    visit(ci + 1, cj, ck);
                }
                if cj > 0 {
                    visit(ci, cj - 1, ck);
                }
                if cj + 1 < ny {
                    visit(ci, cj + 1, ck);
                }
                if ck > 0 {
                    visit(ci, cj, ck - 1);
                }
                if ck + 1 < nz {
                    visit(ci, cj, ck + 1);
                }
            }
        }

        Ok(components)
    }
}
