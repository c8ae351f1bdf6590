/**
 * @file network.rs
 * Road network primitives: points read from the map and the directed,
 * distance weighted arcs between them.
 */

/// A point of the map. Identity is `id`, the id used in the source document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64, // degrees
    pub lon: f64, // degrees
}

impl Node {
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Node { id, lat, lon }
    }
}

/// A directed arc `from -> to`. `weight` is the length in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: i64,
    pub to: i64,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: i64, to: i64, weight: f64) -> Self {
        Edge { from, to, weight }
    }
}
