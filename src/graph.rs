//! Graph builder: assemble the interaction graph from edges and scores.
//!
//! Nodes are participants with their activity score; edges are canonical
//! pairs with a log-scaled weight. The graph is undirected and simple by
//! construction (the aggregator already collapsed parallel conversations),
//! backed by `petgraph` with a `UserId → NodeIndex` map for O(1) lookups.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::activity::log_scale;
use crate::aggregate::EdgeWeights;
use crate::source::UserId;

/// Node payload: a participant and their activity score.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// The participant. Stringified for the output label/ID.
    pub user: UserId,
    /// `log10(1 + public post count)`.
    pub log_posts: f64,
}

/// Edge payload: log-scaled interaction strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge {
    /// `log10(1 + summed reply count)`.
    pub weight: f64,
}

/// The weighted undirected interaction graph.
pub struct MessageGraph {
    graph: UnGraph<GraphNode, GraphEdge>,
    node_index: HashMap<UserId, NodeIndex>,
}

impl MessageGraph {
    /// Build the graph from the aggregated edges and per-participant scores.
    ///
    /// Every participant in `scores` becomes a node; every entry in `edges`
    /// becomes one edge with weight `log10(1 + summed replies)`. Both inputs
    /// are ordered maps, so node and edge insertion order (and therefore
    /// serialized output order) is deterministic.
    pub fn build(edges: &EdgeWeights, scores: &BTreeMap<UserId, f64>) -> Self {
        let mut graph = UnGraph::with_capacity(scores.len(), edges.len());
        let mut node_index = HashMap::with_capacity(scores.len());

        for (&user, &log_posts) in scores {
            let idx = graph.add_node(GraphNode { user, log_posts });
            node_index.insert(user, idx);
        }

        for (pair, &replies) in edges {
            // participants of retained edges always have a score entry
            let (Some(&a), Some(&b)) = (node_index.get(&pair.lo()), node_index.get(&pair.hi()))
            else {
                continue;
            };
            graph.add_edge(
                a,
                b,
                GraphEdge {
                    weight: log_scale(replies),
                },
            );
        }

        Self { graph, node_index }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up a node payload by participant.
    pub fn node(&self, user: UserId) -> Option<&GraphNode> {
        self.node_index.get(&user).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion (ascending `UserId`) order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion (ascending canonical pair) order, as
    /// `(source node, target node, payload)`.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, &GraphEdge)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }
}
