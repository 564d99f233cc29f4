#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Invasion-route planning over the tile grid.
//!
//! Bridges the generic goal-directed search to the battlefield: cells are
//! nodes, cardinal moves between walkable tiles are edges, and the castle
//! cell is the goal. The castle itself is never walkable ground, so the
//! goal cell is proposed to the search regardless of its tile flags.

use std::cmp::Ordering;

use castle_defence_core::{CellCoord, TileLookup};
use castle_defence_search::{
    AStarData, AStarGraph, AStarNeighbor, AStarNode, AStarPathfinder, AStarStart, SearchOutcome,
};

/// Cost of entering any cell.
const STEP_COST: f32 = 1.0;

/// Path-length cost figure carried through the search.
///
/// Wraps `f32` with the IEEE total ordering so costs can key the search
/// boundary; the value is always a finite sum of step costs and
/// heuristic distances in practice.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCost(f32);

impl PathCost {
    /// The zero cost a search starts from.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw cost value.
    #[must_use]
    pub fn new(cost: f32) -> Self {
        Self(cost)
    }

    /// The raw cost value.
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl PartialEq for PathCost {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for PathCost {}

impl PartialOrd for PathCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The battlefield as a searchable graph.
///
/// Neighbour cells must carry tile data with enemy walking allowed; the
/// goal cell bypasses that check because the castle stands on it.
pub struct InvasionGrid<'a, T: TileLookup> {
    goal: CellCoord,
    tiles: &'a T,
}

impl<'a, T: TileLookup> InvasionGrid<'a, T> {
    /// Creates a grid view aimed at the provided goal cell.
    #[must_use]
    pub fn new(goal: CellCoord, tiles: &'a T) -> Self {
        Self { goal, tiles }
    }

    /// The goal cell this grid is aimed at.
    #[must_use]
    pub fn goal(&self) -> CellCoord {
        self.goal
    }

    fn heuristic(&self, cell: CellCoord) -> PathCost {
        PathCost::new(cell.euclidean_distance(self.goal))
    }
}

impl<T: TileLookup> Clone for InvasionGrid<'_, T> {
    fn clone(&self) -> Self {
        Self {
            goal: self.goal,
            tiles: self.tiles,
        }
    }
}

impl<T: TileLookup> AStarGraph for InvasionGrid<'_, T> {
    type NodeId = CellCoord;
    type Cost = PathCost;
    type NodeData = ();
    type EdgeData = ();

    fn neighbors(&self, parent: &AStarNode<Self>) -> Vec<AStarNeighbor<Self>> {
        let path_cost = PathCost::new(parent.path_cost().get() + STEP_COST);
        parent
            .id()
            .cardinal_neighbors()
            .filter(|&cell| {
                cell == self.goal
                    || self
                        .tiles
                        .tile_info(cell)
                        .is_some_and(|tile| tile.can_enemies_walk())
            })
            .map(|cell| AStarNeighbor {
                id: cell,
                data: AStarData {
                    path_cost,
                    heuristic_cost: self.heuristic(cell),
                    data: (),
                },
                edge_data: (),
            })
            .collect()
    }

    fn combine(&self, path_cost: &PathCost, heuristic_cost: &PathCost) -> PathCost {
        PathCost::new(path_cost.get() + heuristic_cost.get())
    }

    // Float heuristics rarely land on an exact zero, so the goal is
    // matched by identity.
    fn found_goal(&self, node: &AStarNode<Self>) -> bool {
        *node.id() == self.goal
    }
}

/// Plans an invasion route from `start` to `goal`, both inclusive.
///
/// Returns the cell sequence of the cheapest route, or an empty vector
/// when the goal cannot be reached or a malformed neighbourhood aborts
/// the search; either failure is logged, never panicked on.
pub fn find_path<T: TileLookup>(start: CellCoord, goal: CellCoord, tiles: &T) -> Vec<CellCoord> {
    log::debug!("planning invasion route from {start:?} to {goal:?}");

    let grid = InvasionGrid::new(goal, tiles);
    let heuristic_cost = grid.heuristic(start);
    let seed = AStarStart {
        id: start,
        data: AStarData {
            path_cost: PathCost::ZERO,
            heuristic_cost,
            data: (),
        },
    };

    let mut pathfinder = match AStarPathfinder::new(grid, seed) {
        Ok(pathfinder) => pathfinder,
        Err(error) => {
            log::error!("invasion route search from {start:?} to {goal:?} failed: {error}");
            return Vec::new();
        }
    };

    match pathfinder.step_until_goal() {
        Ok(SearchOutcome::FoundGoal { node }) => {
            pathfinder.path_to(node.id()).unwrap_or_default()
        }
        Ok(SearchOutcome::BoundaryExhausted) => {
            log::warn!("no invasion route from {start:?} reaches the castle at {goal:?}");
            Vec::new()
        }
        Err(error) => {
            log::error!("invasion route search from {start:?} to {goal:?} failed: {error}");
            Vec::new()
        }
    }
}
