//! Parse CorfuDB profiler logs and turn them into charts, summaries and
//! Chrome traces.

pub mod analysis;
pub mod config;
pub mod error;
pub mod render;
pub mod styling;
pub mod trace;

pub use error::ProfilerError;
