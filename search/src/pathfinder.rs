//! The incremental search state machine driving one discrete step at a
//! time over an explored map and an open boundary.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::graph::{Graph, NeighborError, Node, NodeState};
use crate::priority_queue::PriorityQueue;

/// Caller-supplied seed for a search.
pub struct Start<G: Graph> {
    /// Identity of the node the search begins from.
    pub id: G::NodeId,
    /// Ranking cost the start node is seeded with.
    pub total_cost: G::Cost,
    /// Payload carried by the start node.
    pub data: G::NodeData,
}

/// Result of one discrete unit of search work.
///
/// Events carry owned snapshots of the nodes they describe, so a caller
/// can hold an event while the search keeps running; the live records
/// stay in the pathfinder's explored map.
pub enum StepEvent<G: Graph> {
    /// A boundary candidate with an unexplored identity was recorded as
    /// explored and its neighbours were enqueued.
    Explored {
        /// Snapshot of the node at the moment it was explored.
        node: Node<G>,
    },
    /// A boundary candidate rediscovered an explored identity with a
    /// strictly lower cost; the explored record's state was replaced in
    /// place and its neighbours re-enqueued.
    Replaced {
        /// Snapshot of the node carrying its replacement state.
        node: Node<G>,
        /// State the node held before the replacement.
        previous: NodeState<G>,
    },
    /// A boundary candidate rediscovered an explored identity without
    /// improving on it and was discarded.
    DidNotReplace {
        /// Snapshot of the surviving explored node.
        node: Node<G>,
        /// The discarded candidate.
        ignored: Node<G>,
    },
    /// The boundary was empty; the search is exhausted. Terminal and
    /// idempotent: further steps keep producing this event.
    BoundaryExhausted,
}

impl<G: Graph> StepEvent<G> {
    /// The node this event concerns, if it concerns one.
    ///
    /// `None` for [`StepEvent::BoundaryExhausted`]; the surviving node
    /// for [`StepEvent::DidNotReplace`].
    #[must_use]
    pub fn node(&self) -> Option<&Node<G>> {
        match self {
            StepEvent::Explored { node }
            | StepEvent::Replaced { node, .. }
            | StepEvent::DidNotReplace { node, .. } => Some(node),
            StepEvent::BoundaryExhausted => None,
        }
    }

    /// Reports whether this is the terminal exhausted-boundary event.
    #[must_use]
    pub fn is_boundary_exhausted(&self) -> bool {
        matches!(self, StepEvent::BoundaryExhausted)
    }
}

impl<G: Graph> Clone for StepEvent<G> {
    fn clone(&self) -> Self {
        match self {
            StepEvent::Explored { node } => StepEvent::Explored { node: node.clone() },
            StepEvent::Replaced { node, previous } => StepEvent::Replaced {
                node: node.clone(),
                previous: previous.clone(),
            },
            StepEvent::DidNotReplace { node, ignored } => StepEvent::DidNotReplace {
                node: node.clone(),
                ignored: ignored.clone(),
            },
            StepEvent::BoundaryExhausted => StepEvent::BoundaryExhausted,
        }
    }
}

impl<G: Graph> fmt::Debug for StepEvent<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Explored { node } => formatter
                .debug_struct("Explored")
                .field("node", node)
                .finish(),
            StepEvent::Replaced { node, previous } => formatter
                .debug_struct("Replaced")
                .field("node", node)
                .field("previous", previous)
                .finish(),
            StepEvent::DidNotReplace { node, ignored } => formatter
                .debug_struct("DidNotReplace")
                .field("node", node)
                .field("ignored", ignored)
                .finish(),
            StepEvent::BoundaryExhausted => formatter.write_str("BoundaryExhausted"),
        }
    }
}

/// Incremental single-source search over a [`Graph`].
///
/// The pathfinder owns the explored-node map and the open boundary
/// exclusively; independent searches never share these collections.
/// Construction performs the first unit of work: the start node is
/// recorded as explored and its neighbours are enqueued before the
/// constructor returns. Each [`Pathfinder::step`] afterwards is one
/// synchronous unit of work; callers decide pacing, and cancellation is
/// simply ceasing to step.
pub struct Pathfinder<G: Graph> {
    graph: G,
    explored: HashMap<G::NodeId, Node<G>>,
    boundary: PriorityQueue<G::Cost, Node<G>>,
    latest: StepEvent<G>,
}

impl<G: Graph> Pathfinder<G> {
    /// Creates a pathfinder and performs the first unit of work: the
    /// start node becomes explored and its neighbours enter the boundary.
    pub fn new(graph: G, start: Start<G>) -> Result<Self, NeighborError<G::NodeId>> {
        let start_node = Node::<G>::start(start.id, start.total_cost, start.data);
        let start_id = start_node.id().clone();
        let latest = StepEvent::Explored {
            node: start_node.clone(),
        };
        let mut pathfinder = Self {
            graph,
            explored: HashMap::new(),
            boundary: PriorityQueue::new(),
            latest,
        };
        let _ = pathfinder.explored.insert(start_id.clone(), start_node);
        pathfinder.process_neighbors(&start_id)?;
        Ok(pathfinder)
    }

    /// Performs one discrete unit of work and reports what happened.
    pub fn step(&mut self) -> Result<StepEvent<G>, NeighborError<G::NodeId>> {
        let Some(candidate) = self.boundary.dequeue() else {
            self.latest = StepEvent::BoundaryExhausted;
            return Ok(StepEvent::BoundaryExhausted);
        };
        self.resolve(candidate)
    }

    /// Steps until the boundary is exhausted, producing the full
    /// single-source search tree.
    pub fn step_until_boundary_exhausted(&mut self) -> Result<(), NeighborError<G::NodeId>> {
        while !self.latest.is_boundary_exhausted() {
            let _ = self.step()?;
        }
        Ok(())
    }

    fn resolve(&mut self, candidate: Node<G>) -> Result<StepEvent<G>, NeighborError<G::NodeId>> {
        let id = candidate.id().clone();
        let event = if let Some(existing) = self.explored.get_mut(&id) {
            if candidate.total_cost() < existing.total_cost() {
                let previous = existing.replace_state(candidate.into_state());
                let node = existing.clone();
                self.process_neighbors(&id)?;
                StepEvent::Replaced { node, previous }
            } else {
                StepEvent::DidNotReplace {
                    node: existing.clone(),
                    ignored: candidate,
                }
            }
        } else {
            let node = candidate.clone();
            let _ = self.explored.insert(id.clone(), candidate);
            self.process_neighbors(&id)?;
            StepEvent::Explored { node }
        };
        self.latest = event.clone();
        Ok(event)
    }

    /// Enumerates and enqueues the neighbours of an explored node.
    ///
    /// A proposal aimed back at the parent or repeating a destination id
    /// within the same enumeration is routed through the graph's error
    /// policy; surviving proposals become boundary entries keyed by their
    /// ranking cost.
    fn process_neighbors(&mut self, parent_id: &G::NodeId) -> Result<(), NeighborError<G::NodeId>> {
        let proposals = match self.explored.get(parent_id) {
            Some(parent) => self.graph.neighbors(parent),
            None => return Ok(()),
        };

        let mut seen: HashSet<G::NodeId> = HashSet::with_capacity(proposals.len());
        for proposal in proposals {
            if proposal.id == *parent_id {
                self.graph.handle_neighbor_error(
                    parent_id,
                    NeighborError::SelfLoop {
                        neighbor: proposal.id.clone(),
                    },
                )?;
                continue;
            }
            if seen.contains(&proposal.id) {
                self.graph.handle_neighbor_error(
                    parent_id,
                    NeighborError::Duplicate {
                        neighbor: proposal.id.clone(),
                    },
                )?;
                continue;
            }
            let _ = seen.insert(proposal.id.clone());
            let node = Node::from_neighbor(parent_id.clone(), proposal);
            let key = node.total_cost().clone();
            self.boundary.add(key, node);
        }
        Ok(())
    }

    /// The event produced by the most recent unit of work.
    #[must_use]
    pub fn latest_event(&self) -> &StepEvent<G> {
        &self.latest
    }

    /// The explored node recorded under the provided identity, if any.
    #[must_use]
    pub fn node(&self, id: &G::NodeId) -> Option<&Node<G>> {
        self.explored.get(id)
    }

    /// Number of explored nodes.
    #[must_use]
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Number of entries waiting in the open boundary.
    #[must_use]
    pub fn boundary_len(&self) -> usize {
        self.boundary.len()
    }

    /// The graph being searched.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Reconstructs the discovery path from the start to the provided
    /// identity, both inclusive, by walking parent edges backwards.
    ///
    /// Returns `None` if the identity was never explored.
    #[must_use]
    pub fn path_to(&self, id: &G::NodeId) -> Option<Vec<G::NodeId>> {
        let mut node = self.explored.get(id)?;
        let mut path = vec![node.id().clone()];
        while let Some(parent_id) = node.parent_id() {
            node = self.explored.get(parent_id)?;
            path.push(node.id().clone());
        }
        path.reverse();
        Some(path)
    }
}
