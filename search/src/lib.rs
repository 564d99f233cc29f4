#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generic incremental graph search for Castle Defence.
//!
//! The crate is organised in four layers, leaves first:
//!
//! * [`priority_queue`] — a multi-value priority queue with FIFO ordering
//!   among values that share a key, backing the open boundary.
//! * [`graph`] — the pluggable [`Graph`] capability a searchable problem
//!   implements, together with the node records the search maintains and
//!   the neighbour-integrity error taxonomy.
//! * [`pathfinder`] — the incremental [`Pathfinder`] state machine: one
//!   discrete unit of work per [`Pathfinder::step`], each reported as a
//!   tagged [`StepEvent`].
//! * [`astar`] — the A* layer: heuristic-ranked boundary ordering and goal
//!   detection on top of the generic pathfinder.
//!
//! The crate knows nothing about grids, tiles, or games; concrete
//! policies such as the invasion-path grid adapter live in the
//! `castle-defence-system-navigation` crate.

pub mod astar;
pub mod graph;
pub mod pathfinder;
pub mod priority_queue;

pub use astar::{
    AStarAdapter, AStarData, AStarGraph, AStarNeighbor, AStarNode, AStarPathfinder, AStarStart,
    AStarStepEvent, SearchOutcome,
};
pub use graph::{Edge, Graph, Neighbor, NeighborError, Node, NodeState};
pub use pathfinder::{Pathfinder, Start, StepEvent};
pub use priority_queue::PriorityQueue;
