pub mod cigar;
pub mod cli;
pub mod config;
pub mod error;
pub mod genes;
pub mod junctions;
pub mod pipeline;
pub mod readers;
pub mod report;
pub mod summary;
pub mod types;
mod utils;

pub use error::JunctionError;
pub use pipeline::run;
