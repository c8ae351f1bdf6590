pub mod network;
pub use network::*;
pub mod graph;
pub use graph::*;
pub mod osm;
pub use osm::BuildConfig;

// test
#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::log;

    #[test]
    fn test_builder_freezes_isolated_nodes() {
        log::test_log_init();
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new(1, 0.0, 0.0));
        builder.add_node(Node::new(2, 0.0, 0.001));
        builder.add_node(Node::new(3, 5.0, 5.0));
        assert_eq!(builder.add_segment(1, 2, false, false), 2);
        let graph = builder.finish();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_from(3), Some(vec![]));
        assert!(graph.edges_from(4).is_none());
    }

    #[test]
    fn test_builder_segment_directions() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new(1, 0.0, 0.0));
        builder.add_node(Node::new(2, 0.0, 0.001));
        assert_eq!(builder.add_segment(1, 2, true, false), 1);
        assert_eq!(builder.add_segment(1, 2, false, true), 1);
        assert_eq!(builder.add_segment(1, 2, true, true), 0);
        assert_eq!(builder.add_segment(1, 7, false, false), 0);
        assert_eq!(builder.dropped_edges(), 1);
        let graph = builder.finish();

        let out1: Vec<i64> = graph.edges_from(1).unwrap().iter().map(|e| e.to).collect();
        let out2: Vec<i64> = graph.edges_from(2).unwrap().iter().map(|e| e.to).collect();
        assert_eq!(out1, vec![2]);
        assert_eq!(out2, vec![1]);
    }

    #[test]
    fn test_builder_drops_dangling_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new(1, 0.0, 0.0));
        assert!(!builder.add_edge(Edge::new(1, 2, 10.0)));
        assert!(!builder.add_edge(Edge::new(2, 1, 10.0)));
        let graph = builder.finish();
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains(2));
    }

    #[test]
    fn test_edges_keep_emission_order() {
        let mut builder = GraphBuilder::new();
        for id in 1..=4 {
            builder.add_node(Node::new(id, 0.0, id as f64 * 0.001));
        }
        assert!(builder.add_edge(Edge::new(1, 3, 5.0)));
        assert!(builder.add_edge(Edge::new(1, 2, 1.0)));
        assert!(builder.add_edge(Edge::new(1, 4, 2.0)));
        let graph = builder.finish();
        assert_eq!(
            graph.edges_from(1),
            Some(vec![
                Edge::new(1, 3, 5.0),
                Edge::new(1, 2, 1.0),
                Edge::new(1, 4, 2.0)
            ])
        );
    }

    #[test]
    fn test_graph_nearest_node() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new(10, 48.0, 11.0));
        builder.add_node(Node::new(11, 48.5, 11.5));
        let graph = builder.finish();
        assert_eq!(graph.nearest_node(48.4, 11.4).map(|n| n.id), Some(11));
        assert!(GraphBuilder::new().finish().nearest_node(0.0, 0.0).is_none());
    }
}
