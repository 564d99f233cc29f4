//! Goal-directed search layered on top of the incremental pathfinder.
//!
//! An [`AStarGraph`] keeps path cost and heuristic cost as separate
//! figures on every node and combines them into the single ranking cost
//! the underlying boundary orders by. The layer also watches every step
//! for a goal node and pins the search once one is explored.

use std::fmt;

use crate::graph::{Graph, Neighbor, NeighborError, Node};
use crate::pathfinder::{Pathfinder, Start, StepEvent};

/// A graph searched under A* ordering.
///
/// Implementations describe neighbours with explicit path and heuristic
/// costs; [`AStarGraph::combine`] folds the pair into the ranking cost.
/// Goal detection defaults to a zero heuristic, which suits admissible
/// heuristics that only vanish at the goal; override
/// [`AStarGraph::found_goal`] for exact-identity checks.
pub trait AStarGraph: Sized {
    /// Identity of a node.
    type NodeId: Clone + Eq + std::hash::Hash + fmt::Debug;
    /// Cost figure used for path, heuristic and combined costs alike.
    type Cost: Clone + Ord + Default + fmt::Debug;
    /// Domain payload carried by every node.
    type NodeData: Clone + fmt::Debug;
    /// Domain payload carried by every discovery edge.
    type EdgeData: Clone + fmt::Debug;

    /// Enumerates the neighbours of an explored node.
    fn neighbors(&self, parent: &AStarNode<Self>) -> Vec<AStarNeighbor<Self>>;

    /// Folds a path cost and a heuristic cost into one ranking cost.
    fn combine(&self, path_cost: &Self::Cost, heuristic_cost: &Self::Cost) -> Self::Cost;

    /// Reports whether an explored node is a goal.
    fn found_goal(&self, node: &AStarNode<Self>) -> bool {
        *node.heuristic_cost() == Self::Cost::default()
    }

    /// Policy for malformed neighbour enumerations; the default fails
    /// the search.
    fn handle_neighbor_error(
        &self,
        _parent: &Self::NodeId,
        error: NeighborError<Self::NodeId>,
    ) -> Result<(), NeighborError<Self::NodeId>> {
        Err(error)
    }
}

/// Per-node payload an A* search tracks: the two cost figures plus the
/// domain payload.
pub struct AStarData<G: AStarGraph> {
    /// Accumulated cost of the discovery path from the start.
    pub path_cost: G::Cost,
    /// Estimated remaining cost to the goal.
    pub heuristic_cost: G::Cost,
    /// Domain payload.
    pub data: G::NodeData,
}

impl<G: AStarGraph> Clone for AStarData<G> {
    fn clone(&self) -> Self {
        Self {
            path_cost: self.path_cost.clone(),
            heuristic_cost: self.heuristic_cost.clone(),
            data: self.data.clone(),
        }
    }
}

impl<G: AStarGraph> fmt::Debug for AStarData<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AStarData")
            .field("path_cost", &self.path_cost)
            .field("heuristic_cost", &self.heuristic_cost)
            .field("data", &self.data)
            .finish()
    }
}

/// Neighbour proposal under A*: both cost figures are explicit and the
/// ranking cost is derived by [`AStarGraph::combine`].
pub struct AStarNeighbor<G: AStarGraph> {
    /// Identity of the proposed neighbour.
    pub id: G::NodeId,
    /// Cost figures and payload the neighbour would be recorded with.
    pub data: AStarData<G>,
    /// Payload for the discovery edge from the enumerating parent.
    pub edge_data: G::EdgeData,
}

/// Seed for an A* search.
pub struct AStarStart<G: AStarGraph> {
    /// Identity of the node the search begins from.
    pub id: G::NodeId,
    /// Cost figures and payload the start node is seeded with.
    pub data: AStarData<G>,
}

/// Bridge presenting an [`AStarGraph`] as a plain [`Graph`] whose node
/// payload is [`AStarData`] and whose ranking cost is the combined cost.
pub struct AStarAdapter<G: AStarGraph> {
    graph: G,
}

impl<G: AStarGraph> AStarAdapter<G> {
    /// The wrapped domain graph.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }
}

impl<G: AStarGraph> Graph for AStarAdapter<G> {
    type NodeId = G::NodeId;
    type Cost = G::Cost;
    type NodeData = AStarData<G>;
    type EdgeData = G::EdgeData;

    fn neighbors(&self, parent: &Node<Self>) -> Vec<Neighbor<Self>> {
        self.graph
            .neighbors(parent)
            .into_iter()
            .map(|proposal| {
                let total_cost = self
                    .graph
                    .combine(&proposal.data.path_cost, &proposal.data.heuristic_cost);
                Neighbor {
                    id: proposal.id,
                    total_cost,
                    node_data: proposal.data,
                    edge_data: proposal.edge_data,
                }
            })
            .collect()
    }

    fn handle_neighbor_error(
        &self,
        parent: &Self::NodeId,
        error: NeighborError<Self::NodeId>,
    ) -> Result<(), NeighborError<Self::NodeId>> {
        self.graph.handle_neighbor_error(parent, error)
    }
}

/// A node explored by an A* search.
pub type AStarNode<G> = Node<AStarAdapter<G>>;

impl<G: AStarGraph> Node<AStarAdapter<G>> {
    /// Accumulated cost of this node's discovery path.
    #[must_use]
    pub fn path_cost(&self) -> &G::Cost {
        &self.data().path_cost
    }

    /// Estimated remaining cost from this node to the goal.
    #[must_use]
    pub fn heuristic_cost(&self) -> &G::Cost {
        &self.data().heuristic_cost
    }
}

/// One unit of A* work, distinguishing ordinary progress from the step
/// that discovered a goal.
pub enum AStarStepEvent<G: AStarGraph> {
    /// The search advanced without reaching a goal.
    Searching(StepEvent<AStarAdapter<G>>),
    /// The wrapped event explored or improved a goal node. Terminal and
    /// idempotent: further steps keep reporting the goal.
    FoundGoal(StepEvent<AStarAdapter<G>>),
}

impl<G: AStarGraph> AStarStepEvent<G> {
    /// The underlying pathfinder event.
    #[must_use]
    pub fn inner(&self) -> &StepEvent<AStarAdapter<G>> {
        match self {
            AStarStepEvent::Searching(event) | AStarStepEvent::FoundGoal(event) => event,
        }
    }

    /// Reports whether this event discovered (or re-reported) a goal.
    #[must_use]
    pub fn is_found_goal(&self) -> bool {
        matches!(self, AStarStepEvent::FoundGoal(_))
    }
}

impl<G: AStarGraph> Clone for AStarStepEvent<G> {
    fn clone(&self) -> Self {
        match self {
            AStarStepEvent::Searching(event) => AStarStepEvent::Searching(event.clone()),
            AStarStepEvent::FoundGoal(event) => AStarStepEvent::FoundGoal(event.clone()),
        }
    }
}

impl<G: AStarGraph> fmt::Debug for AStarStepEvent<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AStarStepEvent::Searching(event) => {
                formatter.debug_tuple("Searching").field(event).finish()
            }
            AStarStepEvent::FoundGoal(event) => {
                formatter.debug_tuple("FoundGoal").field(event).finish()
            }
        }
    }
}

/// How a run-to-completion A* search ended.
pub enum SearchOutcome<G: AStarGraph> {
    /// A goal node was explored; the snapshot carries its state at the
    /// moment the search stopped.
    FoundGoal {
        /// The goal node.
        node: AStarNode<G>,
    },
    /// The boundary ran dry without reaching a goal.
    BoundaryExhausted,
}

impl<G: AStarGraph> fmt::Debug for SearchOutcome<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::FoundGoal { node } => formatter
                .debug_struct("FoundGoal")
                .field("node", node)
                .finish(),
            SearchOutcome::BoundaryExhausted => formatter.write_str("BoundaryExhausted"),
        }
    }
}

/// Incremental goal-directed search over an [`AStarGraph`].
///
/// Wraps a [`Pathfinder`] running on the [`AStarAdapter`] bridge and
/// checks every explored or replaced node against
/// [`AStarGraph::found_goal`]. Once a goal is found the search pins it:
/// further steps report the goal instead of doing more work, so the
/// boundary is left exactly as it was at discovery.
pub struct AStarPathfinder<G: AStarGraph> {
    inner: Pathfinder<AStarAdapter<G>>,
    goal: Option<G::NodeId>,
}

impl<G: AStarGraph> AStarPathfinder<G> {
    /// Creates the search and performs the first unit of work. The start
    /// node itself is checked against the goal test, so a search seeded
    /// at the goal is complete before the constructor returns.
    pub fn new(graph: G, start: AStarStart<G>) -> Result<Self, NeighborError<G::NodeId>> {
        let adapter = AStarAdapter { graph };
        let total_cost = adapter
            .graph
            .combine(&start.data.path_cost, &start.data.heuristic_cost);
        let inner = Pathfinder::new(
            adapter,
            Start {
                id: start.id,
                total_cost,
                data: start.data,
            },
        )?;

        let mut pathfinder = Self { inner, goal: None };
        if let StepEvent::Explored { node } = pathfinder.inner.latest_event() {
            if pathfinder.inner.graph().graph.found_goal(node) {
                pathfinder.goal = Some(node.id().clone());
            }
        }
        Ok(pathfinder)
    }

    /// Performs one discrete unit of work, or re-reports the goal if one
    /// has already been found.
    pub fn step(&mut self) -> Result<AStarStepEvent<G>, NeighborError<G::NodeId>> {
        if self.goal.is_some() {
            return Ok(AStarStepEvent::FoundGoal(self.inner.latest_event().clone()));
        }

        let event = self.inner.step()?;
        let goal_id = match event.node() {
            Some(node) if self.inner.graph().graph.found_goal(node) => Some(node.id().clone()),
            _ => None,
        };
        // A discarded rediscovery never flips the goal state.
        if matches!(event, StepEvent::DidNotReplace { .. }) {
            return Ok(AStarStepEvent::Searching(event));
        }
        match goal_id {
            Some(id) => {
                self.goal = Some(id);
                Ok(AStarStepEvent::FoundGoal(event))
            }
            None => Ok(AStarStepEvent::Searching(event)),
        }
    }

    /// Steps until a goal is found or the boundary is exhausted.
    pub fn step_until_goal(&mut self) -> Result<SearchOutcome<G>, NeighborError<G::NodeId>> {
        loop {
            if let Some(node) = self.goal_node() {
                return Ok(SearchOutcome::FoundGoal { node: node.clone() });
            }
            if self.inner.latest_event().is_boundary_exhausted() {
                return Ok(SearchOutcome::BoundaryExhausted);
            }
            let _ = self.step()?;
        }
    }

    /// Runs the search to completion and hands back the goal node, or
    /// `None` when the boundary drains first.
    pub fn find_goal(&mut self) -> Result<Option<AStarNode<G>>, NeighborError<G::NodeId>> {
        match self.step_until_goal()? {
            SearchOutcome::FoundGoal { node } => Ok(Some(node)),
            SearchOutcome::BoundaryExhausted => Ok(None),
        }
    }

    /// The discovered goal node, if a goal has been found.
    #[must_use]
    pub fn goal_node(&self) -> Option<&AStarNode<G>> {
        self.goal.as_ref().and_then(|id| self.inner.node(id))
    }

    /// The event produced by the most recent unit of work.
    #[must_use]
    pub fn latest_event(&self) -> &StepEvent<AStarAdapter<G>> {
        self.inner.latest_event()
    }

    /// The explored node recorded under the provided identity, if any.
    #[must_use]
    pub fn node(&self, id: &G::NodeId) -> Option<&AStarNode<G>> {
        self.inner.node(id)
    }

    /// Number of explored nodes.
    #[must_use]
    pub fn explored_len(&self) -> usize {
        self.inner.explored_len()
    }

    /// Number of entries waiting in the open boundary.
    #[must_use]
    pub fn boundary_len(&self) -> usize {
        self.inner.boundary_len()
    }

    /// The domain graph being searched.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.inner.graph().graph
    }

    /// Reconstructs the discovery path from the start to the provided
    /// identity, both inclusive.
    #[must_use]
    pub fn path_to(&self, id: &G::NodeId) -> Option<Vec<G::NodeId>> {
        self.inner.path_to(id)
    }
}
