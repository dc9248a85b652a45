/// Expose the word API client and error types for integration tests.
/// The bot, daemon and CLI wiring live only in the binary crate.
pub mod api;
pub mod error;
