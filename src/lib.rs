pub mod args;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod utils;
