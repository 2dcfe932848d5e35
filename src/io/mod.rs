/// Session statistics gathered from engine events
pub mod analysis;
/// Command-line interface and session runner
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Board image export
pub mod image;
/// Progress display
pub mod progress;
