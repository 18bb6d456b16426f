pub mod config;
pub mod help;
pub mod plot;
pub mod summary;
pub mod trace;
