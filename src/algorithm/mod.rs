use crate::graph::Node;
use geo::algorithm::haversine_distance::HaversineDistance;
use geo::Point;

/// 两点间的半正矢距离 (meters)
///
/// Arguments are in degrees, latitude first. geo wants `x = lon, y = lat`.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Point::new(lon1, lat1).haversine_distance(&Point::new(lon2, lat2))
}

/// Linear scan for the node closest to `(lat, lon)`.
/// The first node at the minimal distance wins.
pub fn nearest_node<'a, I>(lat: f64, lon: f64, nodes: I) -> Option<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut best: Option<(&Node, f64)> = None;
    for node in nodes {
        let d = haversine_distance(lat, lon, node.lat, node.lon);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((node, d)),
        }
    }
    best.map(|(node, _)| node)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(haversine_distance(48.137, 11.575, 48.137, 11.575), 0.0);
        assert_eq!(haversine_distance(-33.9, 151.2, -33.9, 151.2), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_distance(52.5200, 13.4050, 48.8566, 2.3522);
        let ba = haversine_distance(48.8566, 2.3522, 52.5200, 13.4050);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_known_distance() {
        // Berlin -> Paris is roughly 878 km
        let d = haversine_distance(52.5200, 13.4050, 48.8566, 2.3522);
        assert!((d - 878_000.0).abs() < 5_000.0, "got {}", d);

        // one degree of latitude is about 111.2 km
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 50.0, "got {}", d);
    }

    #[test]
    fn test_nearest_node() {
        let nodes = vec![
            Node::new(1, 0.0, 0.0),
            Node::new(2, 0.0, 0.01),
            Node::new(3, 0.0, 0.02),
        ];
        assert_eq!(nearest_node(0.0, 0.012, &nodes).map(|n| n.id), Some(2));
        assert_eq!(nearest_node(1.0, 1.0, &nodes).map(|n| n.id), Some(3));
        assert!(nearest_node(0.0, 0.0, &Vec::<Node>::new()).is_none());
    }

    #[test]
    fn test_nearest_node_first_minimum_wins() {
        let nodes = vec![Node::new(7, 0.0, -0.01), Node::new(8, 0.0, 0.01)];
        assert_eq!(nearest_node(0.0, 0.0, &nodes).map(|n| n.id), Some(7));
    }
}
