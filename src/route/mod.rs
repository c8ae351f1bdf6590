pub mod output;
pub mod router;

pub use output::Route;
pub use router::Router;
