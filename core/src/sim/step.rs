use std::sync::Arc;

use super::rule::{LifeRule, LIFE};
use crate::pattern::Grid;
use crate::topology::NeighborTopology;

/// Advances a grid by one generation.
///
/// Every cell of the next generation is computed from the same input grid, so
/// no cell ever observes another cell's next state.
#[derive(Debug, Clone)]
pub struct StepFunction {
    topology: Arc<NeighborTopology>,
    rule: LifeRule,
}

impl StepFunction {
    /// Constructs a step function from a topology and a rule.
    pub fn new(topology: Arc<NeighborTopology>, rule: LifeRule) -> Self {
        Self { topology, rule }
    }
    /// Constructs a step function for Conway's Game of Life on a `side` ×
    /// `side` grid.
    pub fn life(side: usize) -> Self {
        Self::new(NeighborTopology::shared(side), LIFE)
    }

    /// Returns the neighbor topology.
    pub fn topology(&self) -> &NeighborTopology {
        &self.topology
    }
    /// Returns the rule.
    pub fn rule(&self) -> LifeRule {
        self.rule
    }

    /// Returns the generation after `grid`.
    ///
    /// # Panics
    ///
    /// This method panics if the grid does not have the same side length as
    /// the topology.
    pub fn step(&self, grid: &Grid) -> Grid {
        assert_eq!(
            self.topology.side(),
            grid.side(),
            "Grid does not match topology"
        );
        let mut next = Grid::dead(grid.side());
        self.step_cells(grid.cells(), next.cells_mut());
        next
    }

    /// Writes the generation after `current` into `next`.
    #[inline]
    pub(crate) fn step_cells(&self, current: &[bool], next: &mut [bool]) {
        debug_assert_eq!(current.len(), next.len());
        for (i, cell) in next.iter_mut().enumerate() {
            let live_neighbors = self.topology.live_neighbors(current, i);
            *cell = self.rule.next_state(current[i], live_neighbors);
        }
    }
}
