/// Command-line parsing and batch file processing
pub mod cli;
/// Defaults and runtime constants
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, resizing and PNG export
pub mod image;
/// Stderr logger for the `log` facade
pub mod logger;
/// Terminal progress bars
pub mod progress;
/// Layer capture and GIF export
pub mod visualization;
