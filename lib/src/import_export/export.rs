use super::codec::codec_for_path;
use crate::config::Config;
use crate::error::Result;
use crate::models::bookmark::Bookmark;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What an export did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The user dismissed the file chooser
    Cancelled,
    Written { path: PathBuf, count: usize },
}

/// Write `bookmarks` to `path` as a single blob, replacing any existing file
pub fn write_bookmarks(bookmarks: &[Bookmark], path: &Path, config: &Config) -> Result<()> {
    let bytes = codec_for_path(path, config).encode(bookmarks)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}
