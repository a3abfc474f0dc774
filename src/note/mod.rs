//! The quick-capture note: entry extraction, rewrite, persistence.

pub mod entry;
pub mod rewrite;
pub mod store;

pub use entry::{find_unprocessed, Entry};
pub use rewrite::rewrite;
pub use store::NoteFile;
