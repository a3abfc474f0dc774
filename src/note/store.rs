//! Reading and persisting the note file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Handle on the quick-capture note. Holds only the path: the content is
/// read fresh every time so each step sees the previous rewrite and any
/// edits made outside this process.
#[derive(Debug, Clone)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// Replace the note's content atomically: write a sibling temp file,
    /// then rename it over the original.
    pub fn write(&self, content: &str) -> io::Result<()> {
        let tmp = self.temp_path();
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!(path = %self.path.display(), bytes = content.len(), "note written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "note".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
