use super::output::Route;
use crate::graph::graph::Index;
use crate::graph::RoadGraph;
use log::debug;
use petgraph::visit::{EdgeRef, VisitMap, Visitable};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Shortest path queries over a frozen [`RoadGraph`].
///
/// The router only borrows the graph. Every query allocates its own search
/// state, so one router (or many copies of it) can serve queries from any
/// number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    graph: &'a RoadGraph,
}

// heap entry, ordered so that BinaryHeap pops the smallest cost
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    vertex: Index,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<'a> Router<'a> {
    pub fn new(graph: &'a RoadGraph) -> Self {
        Router { graph }
    }

    /// Node ids of the shortest path from `source` to `target`, both included.
    ///
    /// `source == target` gives `[source]` whether or not the node exists.
    /// An unknown endpoint or an unreachable target gives an empty path.
    pub fn shortest_path(&self, source: i64, target: i64) -> Vec<i64> {
        if source == target {
            return vec![source];
        }
        match self.search(source, target) {
            Some((path, _)) => path.into_iter().map(|ix| self.graph.inner()[ix]).collect(),
            None => Vec::new(),
        }
    }

    /// Length in meters of the shortest path, `None` when there is none.
    pub fn shortest_distance(&self, source: i64, target: i64) -> Option<f64> {
        if source == target {
            return Some(0.0);
        }
        self.search(source, target).map(|(_, distance)| distance)
    }

    /// Shortest path with its coordinates and length.
    pub fn route(&self, source: i64, target: i64) -> Option<Route> {
        if source == target {
            let node = self.graph.node(source)?;
            return Some(Route::new(vec![source], vec![(node.lat, node.lon)], 0.0));
        }
        let (path, distance) = self.search(source, target)?;
        let ids: Vec<i64> = path.into_iter().map(|ix| self.graph.inner()[ix]).collect();
        let coordinates = ids
            .iter()
            .filter_map(|id| self.graph.node(*id))
            .map(|n| (n.lat, n.lon))
            .collect();
        Some(Route::new(ids, coordinates, distance))
    }

    // Dijkstra without decrease-key: improved distances are pushed again and
    // stale heap entries are skipped through the visited set.
    fn search(&self, source: i64, target: i64) -> Option<(Vec<Index>, f64)> {
        let graph = self.graph.inner();
        let from = self.graph.index_of(source)?;
        let to = self.graph.index_of(target)?;

        let mut dist = vec![f64::INFINITY; graph.node_count()];
        let mut prev: Vec<Option<Index>> = vec![None; graph.node_count()];
        let mut visited = graph.visit_map();
        let mut heap = BinaryHeap::new();
        let mut settled = 0usize;

        dist[from.index()] = 0.0;
        heap.push(State {
            cost: 0.0,
            vertex: from,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if !visited.visit(vertex) {
                continue;
            }
            settled += 1;
            if vertex == to {
                break;
            }
            for edge in graph.edges(vertex) {
                let next = edge.target();
                let alt = cost + *edge.weight();
                if alt < dist[next.index()] {
                    dist[next.index()] = alt;
                    prev[next.index()] = Some(vertex);
                    heap.push(State {
                        cost: alt,
                        vertex: next,
                    });
                }
            }
        }

        prev[to.index()]?;
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = prev[current.index()]?;
            path.push(current);
        }
        path.reverse();
        debug!(
            "route {} -> {}: {} nodes, {:.1} m, {} vertices settled",
            source,
            target,
            path.len(),
            dist[to.index()],
            settled
        );
        Some((path, dist[to.index()]))
    }
}
