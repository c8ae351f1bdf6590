pub mod algorithm;
pub mod error;
pub mod graph;
pub mod route;
pub mod utils;

pub use error::{Error, ParseError};
pub use graph::{BuildConfig, Edge, Node, RoadGraph};
pub use route::{Route, Router};
