pub mod api;
pub mod builder;
pub mod error;
pub mod model;
pub mod names;
pub mod query;
pub mod raw;
pub mod resolver;
pub mod utils;

pub use api::{analyze, analyze_file, analyze_value, analyze_with, AnalyzeOptions};
pub use model::Model;
