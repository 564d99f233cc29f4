//! The pluggable search-graph capability and the node records the search
//! maintains on its behalf.

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// Capability set required of any graph being searched.
///
/// A graph supplies node identity, cost ordering, neighbour-edge
/// generation, and the policy applied to malformed neighbour
/// enumerations. Identity equality is the `Eq`/`Hash` implementation of
/// [`Graph::NodeId`]; cost ordering is the `Ord` implementation of
/// [`Graph::Cost`] — adapters needing a non-natural ordering (floats, for
/// instance) supply a newtype with the ordering they want.
pub trait Graph: Sized {
    /// Opaque identity of a search vertex; used as a map key and for
    /// de-duplication, never mutated.
    type NodeId: Clone + Eq + Hash + fmt::Debug;
    /// Ranking value for boundary ordering; accumulated path cost or a
    /// heuristic-augmented total.
    type Cost: Clone + Ord + fmt::Debug;
    /// Payload carried by every node alongside its cost.
    type NodeData: Clone + fmt::Debug;
    /// Payload carried by every discovery edge.
    type EdgeData: Clone + fmt::Debug;

    /// Enumerates the neighbour proposals of an explored node.
    ///
    /// The enumeration must be finite, must not include the parent
    /// itself, and must not repeat a destination id within one call; the
    /// pathfinder reports violations through
    /// [`Graph::handle_neighbor_error`].
    fn neighbors(&self, parent: &Node<Self>) -> Vec<Neighbor<Self>>;

    /// Policy hook invoked when a neighbour enumeration is malformed.
    ///
    /// The default re-raises the error, failing the step. Returning
    /// `Ok(())` instead drops the offending proposal and lets the
    /// enumeration continue.
    fn handle_neighbor_error(
        &self,
        _parent: &Self::NodeId,
        error: NeighborError<Self::NodeId>,
    ) -> Result<(), NeighborError<Self::NodeId>> {
        Err(error)
    }
}

/// Integrity violations a neighbour enumeration can commit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NeighborError<I: fmt::Debug> {
    /// A parent proposed an edge back to itself.
    #[error("neighbor {neighbor:?} loops back to its parent")]
    SelfLoop {
        /// Identity of the offending neighbour.
        neighbor: I,
    },
    /// A parent proposed the same destination twice in one enumeration.
    #[error("neighbor {neighbor:?} was proposed twice by the same parent")]
    Duplicate {
        /// Identity of the offending neighbour.
        neighbor: I,
    },
}

/// Neighbour proposal produced by [`Graph::neighbors`].
pub struct Neighbor<G: Graph> {
    /// Identity of the proposed destination.
    pub id: G::NodeId,
    /// Ranking cost the destination enters the boundary with.
    pub total_cost: G::Cost,
    /// Payload stored on the destination node.
    pub node_data: G::NodeData,
    /// Payload stored on the discovery edge back to the parent.
    pub edge_data: G::EdgeData,
}

/// Discovery edge from a node back to the parent that proposed it.
///
/// The parent is referenced by identity; the owned parent record lives in
/// the pathfinder's explored map, so replacing the parent's state leaves
/// every child edge valid.
pub struct Edge<G: Graph> {
    parent: G::NodeId,
    data: G::EdgeData,
}

impl<G: Graph> Edge<G> {
    pub(crate) fn new(parent: G::NodeId, data: G::EdgeData) -> Self {
        Self { parent, data }
    }

    /// Identity of the parent that discovered this node.
    #[must_use]
    pub fn parent_id(&self) -> &G::NodeId {
        &self.parent
    }

    /// Payload recorded on the edge.
    #[must_use]
    pub fn data(&self) -> &G::EdgeData {
        &self.data
    }
}

impl<G: Graph> Clone for Edge<G> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            data: self.data.clone(),
        }
    }
}

impl<G: Graph> fmt::Debug for Edge<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Edge")
            .field("parent", &self.parent)
            .field("data", &self.data)
            .finish()
    }
}

/// The mutable part of a node: its discovery edge, ranking cost, and
/// payload. Replacing a node's state swaps this tuple atomically; the
/// node's identity never changes.
pub struct NodeState<G: Graph> {
    edge: Option<Edge<G>>,
    total_cost: G::Cost,
    data: G::NodeData,
}

impl<G: Graph> NodeState<G> {
    pub(crate) fn new(edge: Option<Edge<G>>, total_cost: G::Cost, data: G::NodeData) -> Self {
        Self {
            edge,
            total_cost,
            data,
        }
    }

    /// Discovery edge back to the parent; `None` only for the start node.
    #[must_use]
    pub fn edge(&self) -> Option<&Edge<G>> {
        self.edge.as_ref()
    }

    /// Ranking cost used to order the node in the open boundary.
    #[must_use]
    pub fn total_cost(&self) -> &G::Cost {
        &self.total_cost
    }

    /// Payload carried by the node.
    #[must_use]
    pub fn data(&self) -> &G::NodeData {
        &self.data
    }
}

impl<G: Graph> Clone for NodeState<G> {
    fn clone(&self) -> Self {
        Self {
            edge: self.edge.clone(),
            total_cost: self.total_cost.clone(),
            data: self.data.clone(),
        }
    }
}

impl<G: Graph> fmt::Debug for NodeState<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeState")
            .field("edge", &self.edge)
            .field("total_cost", &self.total_cost)
            .field("data", &self.data)
            .finish()
    }
}

/// A search vertex: immutable identity plus its current [`NodeState`].
pub struct Node<G: Graph> {
    id: G::NodeId,
    state: NodeState<G>,
}

impl<G: Graph> Node<G> {
    pub(crate) fn start(id: G::NodeId, total_cost: G::Cost, data: G::NodeData) -> Self {
        Self {
            id,
            state: NodeState::new(None, total_cost, data),
        }
    }

    pub(crate) fn from_neighbor(parent: G::NodeId, neighbor: Neighbor<G>) -> Self {
        Self {
            id: neighbor.id,
            state: NodeState::new(
                Some(Edge::new(parent, neighbor.edge_data)),
                neighbor.total_cost,
                neighbor.node_data,
            ),
        }
    }

    pub(crate) fn replace_state(&mut self, state: NodeState<G>) -> NodeState<G> {
        std::mem::replace(&mut self.state, state)
    }

    pub(crate) fn into_state(self) -> NodeState<G> {
        self.state
    }

    /// Identity of the node.
    #[must_use]
    pub fn id(&self) -> &G::NodeId {
        &self.id
    }

    /// Current state of the node.
    #[must_use]
    pub fn state(&self) -> &NodeState<G> {
        &self.state
    }

    /// Ranking cost of the node's current state.
    #[must_use]
    pub fn total_cost(&self) -> &G::Cost {
        self.state.total_cost()
    }

    /// Payload of the node's current state.
    #[must_use]
    pub fn data(&self) -> &G::NodeData {
        self.state.data()
    }

    /// Discovery edge of the node's current state.
    #[must_use]
    pub fn edge(&self) -> Option<&Edge<G>> {
        self.state.edge()
    }

    /// Reports whether the node has a discovery edge.
    ///
    /// False exactly for the node that started the search.
    #[must_use]
    pub fn has_edge(&self) -> bool {
        self.state.edge().is_some()
    }

    /// Identity of the parent that discovered this node, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<&G::NodeId> {
        self.state.edge().map(Edge::parent_id)
    }
}

impl<G: Graph> Clone for Node<G> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            state: self.state.clone(),
        }
    }
}

impl<G: Graph> fmt::Debug for Node<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}
