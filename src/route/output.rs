/**
 * @file output.rs
 * A found route and its GeoJSON / WKT renderings.
 */
use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<i64>,
    pub coordinates: Vec<(f64, f64)>, // (lat, lon) of each node
    pub distance: f64,                // meters
}

impl Route {
    pub fn new(nodes: Vec<i64>, coordinates: Vec<(f64, f64)>, distance: f64) -> Self {
        Route {
            nodes,
            coordinates,
            distance,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `LineString` feature in `[lon, lat]` order. A single node route is a `Point`.
    pub fn to_geojson(&self) -> Feature {
        let value = match self.coordinates.as_slice() {
            [(lat, lon)] => Value::Point(vec![*lon, *lat]),
            coords => Value::LineString(coords.iter().map(|(lat, lon)| vec![*lon, *lat]).collect()),
        };
        let mut properties = JsonObject::new();
        properties.insert("distance_m".to_string(), JsonValue::from(self.distance));
        properties.insert("count".to_string(), JsonValue::from(self.nodes.len()));
        properties.insert("nodes".to_string(), JsonValue::from(self.nodes.clone()));
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// WKT text, x is longitude.
    pub fn to_wkt(&self) -> String {
        use wkt::types::{Coord, LineString, Point};
        let coord = |&(lat, lon): &(f64, f64)| Coord {
            x: lon,
            y: lat,
            z: None,
            m: None,
        };
        let geometry: wkt::Geometry<f64> = match self.coordinates.as_slice() {
            [single] => wkt::Geometry::Point(Point(Some(coord(single)))),
            coords => wkt::Geometry::LineString(LineString(coords.iter().map(coord).collect())),
        };
        geometry.to_string()
    }
}
