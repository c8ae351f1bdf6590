use thiserror::Error;

/// Failures while reading an `.osm` document. Any of these aborts the build,
/// no partial graph is handed out.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed map document at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("map document ended with {0} unclosed element(s)")]
    Unclosed(usize),

    #[error("map document has no root element")]
    NoRoot,

    #[error("{what} at byte {position}")]
    Misplaced { what: &'static str, position: u64 },

    #[error("<{element}> at byte {position} is missing attribute `{name}`")]
    MissingAttribute {
        element: &'static str,
        name: &'static str,
        position: u64,
    },

    #[error("<{element}> at byte {position} has invalid `{name}` value {value:?}")]
    InvalidAttribute {
        element: &'static str,
        name: &'static str,
        value: String,
        position: u64,
    },
}

/// Errors of the file based entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open map file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
