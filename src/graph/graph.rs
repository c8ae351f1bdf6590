use super::network::{Edge, Node};
use crate::algorithm;
use log::{debug, info, warn};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use std::collections::HashMap;

pub(crate) type Index = NodeIndex<usize>;

/// The routable network: node table plus directed adjacency.
///
/// Every node has a vertex in `graph` (possibly without edges) and every
/// vertex belongs to a node, so the adjacency never has dangling keys.
/// Built once by [`GraphBuilder`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    nodes: HashMap<i64, Node>,
    index: HashMap<i64, Index>,
    graph: Graph<i64, f64, Directed, usize>,
}

impl RoadGraph {
    pub fn node(&self, id: i64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Outgoing edges of `id` in the order the builder emitted them.
    /// `None` if `id` is not in the graph.
    pub fn edges_from(&self, id: i64) -> Option<Vec<Edge>> {
        let from = *self.index.get(&id)?;
        let mut edges: Vec<Edge> = self
            .graph
            .edges(from)
            .map(|e| Edge::new(id, self.graph[e.target()], *e.weight()))
            .collect();
        // petgraph walks a vertex's edge list newest first
        edges.reverse();
        Some(edges)
    }

    /// Brute force lookup of the node closest to `(lat, lon)`.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<&Node> {
        algorithm::nearest_node(lat, lon, self.nodes.values())
    }

    pub(crate) fn index_of(&self, id: i64) -> Option<Index> {
        self.index.get(&id).copied()
    }

    pub(crate) fn inner(&self) -> &Graph<i64, f64, Directed, usize> {
        &self.graph
    }
}

/// Exclusively owned, mutable state of a build. [`GraphBuilder::finish`]
/// freezes it into a [`RoadGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<i64, Node>,
    index: HashMap<i64, Index>,
    graph: Graph<i64, f64, Directed, usize>,
    duplicate_nodes: usize,
    dropped_edges: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Insert a node, a node with a known id replaces the old one.
    pub fn add_node(&mut self, node: Node) {
        if self.nodes.insert(node.id, node).is_some() {
            self.duplicate_nodes += 1;
        }
    }

    pub fn has_node(&self, id: i64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add the arcs of one road segment `a - b`.
    ///
    /// `a -> b` is skipped for reverse-only roads and `b -> a` for
    /// forward-only roads. Both arcs share the haversine length. Returns the
    /// number of arcs added; a pair with an unknown endpoint adds none.
    pub fn add_segment(&mut self, a: i64, b: i64, forward_only: bool, reverse_only: bool) -> usize {
        let (na, nb) = match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(na), Some(nb)) => (*na, *nb),
            _ => {
                self.dropped_edges += 1;
                return 0;
            }
        };
        let weight = algorithm::haversine_distance(na.lat, na.lon, nb.lat, nb.lon);
        let mut added = 0;
        if !reverse_only {
            self.add_edge(Edge::new(a, b, weight));
            added += 1;
        }
        if !forward_only {
            self.add_edge(Edge::new(b, a, weight));
            added += 1;
        }
        added
    }

    /// Add a single arc. Arcs touching unknown nodes, and arcs without a
    /// finite non-negative weight, are dropped.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !(edge.weight >= 0.0 && edge.weight.is_finite()) {
            warn!("rejecting edge {} -> {} with weight {}", edge.from, edge.to, edge.weight);
            return false;
        }
        if !self.has_node(edge.from) || !self.has_node(edge.to) {
            self.dropped_edges += 1;
            return false;
        }
        let from = self.vertex(edge.from);
        let to = self.vertex(edge.to);
        self.graph.add_edge(from, to, edge.weight);
        true
    }

    pub fn duplicate_nodes(&self) -> usize {
        self.duplicate_nodes
    }

    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Give every edgeless node its vertex and freeze the graph.
    pub fn finish(mut self) -> RoadGraph {
        let mut ids: Vec<i64> = self
            .nodes
            .keys()
            .filter(|id| !self.index.contains_key(*id))
            .copied()
            .collect();
        // keep vertex numbering independent of hash order
        ids.sort_unstable();
        for id in ids {
            self.vertex(id);
        }
        debug!(
            "graph frozen: {} vertices, {} duplicate nodes, {} dropped segments",
            self.graph.node_count(),
            self.duplicate_nodes,
            self.dropped_edges
        );
        info!(
            "road graph ready: {} nodes, {} edges",
            self.nodes.len(),
            self.graph.edge_count()
        );
        RoadGraph {
            nodes: self.nodes,
            index: self.index,
            graph: self.graph,
        }
    }

    fn vertex(&mut self, id: i64) -> Index {
        if let Some(ix) = self.index.get(&id) {
            return *ix;
        }
        let ix = self.graph.add_node(id);
        self.index.insert(id, ix);
        ix
    }
}
