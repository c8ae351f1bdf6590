/**
 * @file osm.rs
 * Streaming reader for OpenStreetMap XML exports.
 *
 * One forward pass over the document. Nodes go into the builder as soon as
 * they are read; a way only keeps its flags and node references until its
 * closing tag, where its segments become edges.
 */
use super::graph::{GraphBuilder, RoadGraph};
use super::network::Node;
use crate::error::{self, ParseError};
use log::{debug, info, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Which tags make a way routable and one-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// A way carrying this key (any value) is part of the road network.
    pub traversable_key: String,
    /// Directionality key, `yes`/`true`/`1` is forward-only and `-1` reverse-only.
    pub oneway_key: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            traversable_key: "highway".to_string(),
            oneway_key: "oneway".to_string(),
        }
    }
}

// accumulated while inside <way>...</way>
#[derive(Debug, Default)]
struct WayState {
    traversable: bool,
    forward_only: bool,
    reverse_only: bool,
    refs: Vec<i64>,
}

impl WayState {
    fn reset(&mut self) {
        self.traversable = false;
        self.forward_only = false;
        self.reverse_only = false;
        self.refs.clear();
    }
}

struct OsmReader<'c> {
    config: &'c BuildConfig,
    builder: GraphBuilder,
    way: WayState,
    in_way: bool,
    ways: usize,
    road_ways: usize,
}

impl<'c> OsmReader<'c> {
    fn new(config: &'c BuildConfig) -> Self {
        OsmReader {
            config,
            builder: GraphBuilder::new(),
            way: WayState::default(),
            in_way: false,
            ways: 0,
            road_ways: 0,
        }
    }

    fn open(&mut self, e: &BytesStart, position: u64) -> Result<(), ParseError> {
        check_attributes(e, position)?;
        match e.name().as_ref() {
            b"node" => {
                let id = required(e, "node", "id", position)?;
                let lat = coordinate(e, "lat", position)?;
                let lon = coordinate(e, "lon", position)?;
                self.builder.add_node(Node::new(id, lat, lon));
            }
            b"way" => {
                self.in_way = true;
                self.way.reset();
            }
            b"nd" if self.in_way => {
                if let Some(raw) = attribute(e, "ref", position)? {
                    let id = number(raw, "nd", "ref", position)?;
                    self.way.refs.push(id);
                }
            }
            b"tag" if self.in_way => {
                let key = match attribute(e, "k", position)? {
                    Some(key) => key,
                    None => return Ok(()),
                };
                if key == self.config.traversable_key {
                    self.way.traversable = true;
                }
                if key == self.config.oneway_key {
                    match attribute(e, "v", position)?.as_deref() {
                        Some("-1") => self.way.reverse_only = true,
                        Some(v)
                            if v.eq_ignore_ascii_case("yes")
                                || v.eq_ignore_ascii_case("true")
                                || v == "1" =>
                        {
                            self.way.forward_only = true
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close_way(&mut self) {
        self.in_way = false;
        self.ways += 1;
        if !self.way.traversable || self.way.refs.len() < 2 {
            return;
        }
        self.road_ways += 1;
        let (forward_only, reverse_only) = (self.way.forward_only, self.way.reverse_only);
        for pair in self.way.refs.windows(2) {
            self.builder
                .add_segment(pair[0], pair[1], forward_only, reverse_only);
        }
    }

    fn finish(self) -> RoadGraph {
        debug!(
            "read {} ways, {} of them routable",
            self.ways, self.road_ways
        );
        if self.builder.duplicate_nodes() > 0 {
            debug!(
                "{} node ids were defined more than once, kept the last definition",
                self.builder.duplicate_nodes()
            );
        }
        if self.builder.dropped_edges() > 0 {
            warn!(
                "skipped {} way segments referencing undefined nodes",
                self.builder.dropped_edges()
            );
        }
        self.builder.finish()
    }
}

/// Build a [`RoadGraph`] from an OSM XML stream.
///
/// Fails on malformed XML, on unclosed elements, on an empty document, on
/// content outside the single root element and on nodes with missing or non
/// numeric coordinates. Unknown elements and tags
/// are ignored.
pub fn parse<R: BufRead>(reader: R, config: &BuildConfig) -> Result<RoadGraph, ParseError> {
    info!(
        "parsing map document, routable key `{}`, oneway key `{}`",
        config.traversable_key, config.oneway_key
    );
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut osm = OsmReader::new(config);
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| ParseError::Xml { position, source })?;
        match event {
            Event::Start(e) => {
                if root_closed {
                    return Err(misplaced("element after the root element", position));
                }
                depth += 1;
                seen_root = true;
                osm.open(&e, position)?;
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(misplaced("element after the root element", position));
                }
                seen_root = true;
                root_closed = depth == 0;
                osm.open(&e, position)?;
                if e.name().as_ref() == b"way" {
                    osm.close_way();
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
                if e.name().as_ref() == b"way" && osm.in_way {
                    osm.close_way();
                }
            }
            Event::Text(t) if depth == 0 => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(misplaced("text outside the root element", position));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(misplaced("CDATA outside the root element", position));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth > 0 {
        return Err(ParseError::Unclosed(depth));
    }
    if !seen_root {
        return Err(ParseError::NoRoot);
    }
    Ok(osm.finish())
}

impl RoadGraph {
    pub fn from_reader<R: BufRead>(reader: R, config: &BuildConfig) -> Result<Self, ParseError> {
        parse(reader, config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, config: &BuildConfig) -> error::Result<Self> {
        let path = path.as_ref();
        debug!("loading map from {}", path.display());
        let file = File::open(path)?;
        let graph = parse(BufReader::new(file), config)?;
        info!("loaded map {}", path.display());
        Ok(graph)
    }
}

fn misplaced(what: &'static str, position: u64) -> ParseError {
    ParseError::Misplaced { what, position }
}

// walks every attribute so syntax errors and repeated names surface
fn check_attributes(e: &BytesStart, position: u64) -> Result<(), ParseError> {
    for attr in e.attributes() {
        if let Err(err) = attr {
            return Err(ParseError::Xml {
                position,
                source: err.into(),
            });
        }
    }
    Ok(())
}

fn attribute(
    e: &BytesStart,
    name: &'static str,
    position: u64,
) -> Result<Option<String>, ParseError> {
    let attr = match e.try_get_attribute(name) {
        Ok(Some(attr)) => attr,
        Ok(None) => return Ok(None),
        Err(e) => {
            return Err(ParseError::Xml {
                position,
                source: e.into(),
            })
        }
    };
    let value = attr.unescape_value().map_err(|e| ParseError::Xml {
        position,
        source: e.into(),
    })?;
    Ok(Some(value.into_owned()))
}

fn required<T: FromStr>(
    e: &BytesStart,
    element: &'static str,
    name: &'static str,
    position: u64,
) -> Result<T, ParseError> {
    match attribute(e, name, position)? {
        Some(raw) => number(raw, element, name, position),
        None => Err(ParseError::MissingAttribute {
            element,
            name,
            position,
        }),
    }
}

fn number<T: FromStr>(
    raw: String,
    element: &'static str,
    name: &'static str,
    position: u64,
) -> Result<T, ParseError> {
    match raw.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) => Err(ParseError::InvalidAttribute {
            element,
            name,
            value: raw,
            position,
        }),
    }
}

// NaN and infinities would poison the edge weights
fn coordinate(e: &BytesStart, name: &'static str, position: u64) -> Result<f64, ParseError> {
    let v: f64 = required(e, "node", name, position)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidAttribute {
            element: "node",
            name,
            value: v.to_string(),
            position,
        })
    }
}
