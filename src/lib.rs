pub mod cli;
pub mod config;
pub mod datasets;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod picker;
pub mod report;
