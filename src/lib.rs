//! Quick Capture — fills in summaries for links captured in a markdown note.
//!
//! The binary in `main.rs` only handles startup; everything it drives lives
//! here so integration tests can reach it.

pub mod core;
pub mod bootstrap;
pub mod llm;
pub mod note;
pub mod processor;
pub mod summary;

pub use self::core::{config, error};
pub use bootstrap::logger;
