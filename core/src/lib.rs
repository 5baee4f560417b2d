pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod io;
pub mod types;

pub use api::{analyze, TumorAnalyzer};
pub use cli::report::TextReport;
pub use error::{Result, TumorscanError};
pub use types::*;
