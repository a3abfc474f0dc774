//! Bootstrap layer — runs before the processor starts.
//!
//! - **logger** — tracing-subscriber initialisation.

pub mod logger;
