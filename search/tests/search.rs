//! End-to-end behaviour of the incremental search stack: monotonic
//! improvement of explored records and guaranteed termination.

use std::collections::HashMap;

use castle_defence_search::{
    AStarData, AStarGraph, AStarNeighbor, AStarNode, AStarPathfinder, AStarStart, Graph, Neighbor,
    Node, Pathfinder, SearchOutcome, Start, StepEvent,
};

struct WeightedGraph {
    edges: HashMap<&'static str, Vec<(&'static str, u32)>>,
}

impl WeightedGraph {
    fn new(edges: &[(&'static str, &[(&'static str, u32)])]) -> Self {
        Self {
            edges: edges
                .iter()
                .map(|(from, to)| (*from, to.to_vec()))
                .collect(),
        }
    }
}

impl Graph for WeightedGraph {
    type NodeId = &'static str;
    type Cost = u32;
    type NodeData = ();
    type EdgeData = ();

    fn neighbors(&self, parent: &Node<Self>) -> Vec<Neighbor<Self>> {
        self.edges
            .get(parent.id())
            .into_iter()
            .flatten()
            .map(|&(id, step_cost)| Neighbor {
                id,
                total_cost: parent.total_cost() + step_cost,
                node_data: (),
                edge_data: (),
            })
            .collect()
    }
}

/// Quotes boundary totals verbatim instead of accumulating them, so a
/// later enumeration can undercut an already-explored node.
struct QuotedGraph {
    edges: HashMap<&'static str, Vec<(&'static str, u32)>>,
}

impl Graph for QuotedGraph {
    type NodeId = &'static str;
    type Cost = u32;
    type NodeData = ();
    type EdgeData = ();

    fn neighbors(&self, parent: &Node<Self>) -> Vec<Neighbor<Self>> {
        self.edges
            .get(parent.id())
            .into_iter()
            .flatten()
            .map(|&(id, total_cost)| Neighbor {
                id,
                total_cost,
                node_data: (),
                edge_data: (),
            })
            .collect()
    }
}

#[test]
fn explored_costs_only_ever_improve() {
    // "b" is first explored at 3, then undercut at 2 once "a" gets its
    // turn; no step may ever raise the recorded cost of an explored node.
    let graph = QuotedGraph {
        edges: [
            ("start", vec![("b", 3), ("a", 4)]),
            ("a", vec![("b", 2)]),
            ("b", vec![]),
        ]
        .into_iter()
        .collect(),
    };
    let mut finder = Pathfinder::new(
        graph,
        Start {
            id: "start",
            total_cost: 0,
            data: (),
        },
    )
    .expect("construction");

    let mut recorded: HashMap<&'static str, u32> = HashMap::new();
    let mut saw_replacement = false;
    loop {
        let event = finder.step().expect("step");
        match event {
            StepEvent::Explored { node } => {
                assert!(recorded.insert(*node.id(), *node.total_cost()).is_none());
            }
            StepEvent::Replaced { node, previous } => {
                saw_replacement = true;
                assert!(node.total_cost() < previous.total_cost());
                let known = recorded
                    .insert(*node.id(), *node.total_cost())
                    .expect("replacement targets an explored node");
                assert!(*node.total_cost() < known);
            }
            StepEvent::DidNotReplace { node, ignored } => {
                assert!(ignored.total_cost() >= node.total_cost());
            }
            StepEvent::BoundaryExhausted => break,
        }
    }

    assert!(saw_replacement, "the cheaper route via a never landed");
    assert_eq!(recorded.get("b"), Some(&2));
    assert_eq!(finder.path_to(&"b"), Some(vec!["start", "a", "b"]));
}

#[test]
fn exhaustive_search_terminates_on_a_cyclic_component() {
    // "left" and "right" form a cycle; rediscoveries at equal or higher
    // cost are discarded, so the boundary must still drain.
    let graph = WeightedGraph::new(&[
        ("start", &[("left", 1)]),
        ("left", &[("right", 1)]),
        ("right", &[("left", 1)]),
        ("island", &[("start", 1)]),
    ]);
    let mut finder = Pathfinder::new(
        graph,
        Start {
            id: "start",
            total_cost: 0,
            data: (),
        },
    )
    .expect("construction");

    finder
        .step_until_boundary_exhausted()
        .expect("exhaustive search");

    // The disconnected node is never reached.
    assert_eq!(finder.explored_len(), 3);
    assert!(finder.node(&"island").is_none());
    assert_eq!(finder.boundary_len(), 0);
    assert!(finder.latest_event().is_boundary_exhausted());
}

struct HintedGraph {
    inner: WeightedGraph,
    heuristics: HashMap<&'static str, u32>,
}

impl AStarGraph for HintedGraph {
    type NodeId = &'static str;
    type Cost = u32;
    type NodeData = ();
    type EdgeData = ();

    fn neighbors(&self, parent: &AStarNode<Self>) -> Vec<AStarNeighbor<Self>> {
        self.inner
            .edges
            .get(parent.id())
            .into_iter()
            .flatten()
            .map(|&(id, step_cost)| AStarNeighbor {
                id,
                data: AStarData {
                    path_cost: parent.path_cost() + step_cost,
                    heuristic_cost: self.heuristics.get(id).copied().unwrap_or(0),
                    data: (),
                },
                edge_data: (),
            })
            .collect()
    }

    fn combine(&self, path_cost: &u32, heuristic_cost: &u32) -> u32 {
        path_cost + heuristic_cost
    }
}

#[test]
fn goal_directed_search_reconstructs_the_cheapest_route() {
    // Two routes to the goal: direct at 5, via "mid" at 4.
    let graph = HintedGraph {
        inner: WeightedGraph::new(&[
            ("start", &[("goal", 5), ("mid", 2)]),
            ("mid", &[("goal", 2)]),
            ("goal", &[]),
        ]),
        heuristics: [("start", 3), ("mid", 2), ("goal", 0)]
            .into_iter()
            .collect(),
    };
    let mut finder = AStarPathfinder::new(
        graph,
        AStarStart {
            id: "start",
            data: AStarData {
                path_cost: 0,
                heuristic_cost: 3,
                data: (),
            },
        },
    )
    .expect("construction");

    match finder.step_until_goal().expect("search") {
        SearchOutcome::FoundGoal { node } => {
            assert_eq!(*node.id(), "goal");
            assert_eq!(*node.path_cost(), 4);
        }
        SearchOutcome::BoundaryExhausted => panic!("goal is reachable"),
    }
    assert_eq!(
        finder.path_to(&"goal"),
        Some(vec!["start", "mid", "goal"])
    );
}
