/// Command-line parsing and command execution
pub mod cli;
/// Storage layout constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Batch validation progress display
pub mod progress;
/// Plain-text rule summaries
pub mod summary;
