//! File chooser seam.
//!
//! The editor never opens windows itself: the host supplies a [`FileChooser`]
//! and the editor describes what it needs through a [`DialogRequest`].
//! [`DialogState`] is the persistence hosts use to remember the last directory
//! per dialog name.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_DIALOG: &str = "export_viewer_bookmarks";
pub const IMPORT_DIALOG: &str = "import_viewer_bookmarks";

/// A named group of extensions shown by a chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn saved_bookmarks(extension: &str) -> Self {
        Self {
            label: "Saved Bookmarks".to_string(),
            extensions: vec![extension.to_string()],
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// Key under which the chooser remembers its last directory
    pub name: &'static str,
    pub title: &'static str,
    pub filter: FileFilter,
}

impl DialogRequest {
    pub fn export(extension: &str) -> Self {
        Self {
            name: EXPORT_DIALOG,
            title: "Export Bookmarks",
            filter: FileFilter::saved_bookmarks(extension),
        }
    }

    pub fn import(extension: &str) -> Self {
        Self {
            name: IMPORT_DIALOG,
            title: "Import Bookmarks",
            filter: FileFilter::saved_bookmarks(extension),
        }
    }
}

/// Host-provided save/open dialogs. `None` means the user cancelled.
pub trait FileChooser {
    fn choose_save_file(&mut self, request: &DialogRequest) -> Option<PathBuf>;

    /// Single-file open dialog
    fn choose_open_file(&mut self, request: &DialogRequest) -> Option<PathBuf>;
}

/// Last directory used by each named dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    #[serde(default)]
    pub directories: BTreeMap<String, PathBuf>,
}

impl DialogState {
    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("dialogs.yml")
    }

    /// Load remembered directories; a missing file is an empty state
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn last_dir(&self, name: &str) -> Option<&Path> {
        self.directories.get(name).map(PathBuf::as_path)
    }

    /// Interpret a user-typed answer against the remembered directory
    pub fn resolve(&self, name: &str, answer: &Path) -> PathBuf {
        match self.last_dir(name) {
            Some(dir) if answer.is_relative() => dir.join(answer),
            _ => answer.to_path_buf(),
        }
    }

    /// Record the directory of a confirmed path
    pub fn remember(&mut self, name: &str, chosen: &Path) {
        if let Some(dir) = chosen.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.directories.insert(name.to_string(), dir.to_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("saved.json", true)]
    #[case("saved.JSON", true)]
    #[case("saved.yaml", false)]
    #[case("saved", false)]
    fn test_filter_matches(#[case] path: &str, #[case] expected: bool) {
        let filter = FileFilter::saved_bookmarks("json");
        assert_eq!(filter.matches(Path::new(path)), expected);
    }

    #[test]
    fn test_requests() {
        let export = DialogRequest::export("json");
        assert_eq!(export.name, EXPORT_DIALOG);
        assert_eq!(export.title, "Export Bookmarks");
        assert_eq!(export.filter.label, "Saved Bookmarks");

        let import = DialogRequest::import("yml");
        assert_eq!(import.name, IMPORT_DIALOG);
        assert_eq!(import.filter.extensions, vec!["yml".to_string()]);
    }

    #[test]
    fn test_remember_and_resolve() {
        let mut state = DialogState::default();
        assert_eq!(
            state.resolve(EXPORT_DIALOG, Path::new("out.json")),
            PathBuf::from("out.json")
        );

        state.remember(EXPORT_DIALOG, Path::new("/data/books/out.json"));
        assert_eq!(state.last_dir(EXPORT_DIALOG), Some(Path::new("/data/books")));
        assert_eq!(
            state.resolve(EXPORT_DIALOG, Path::new("next.json")),
            PathBuf::from("/data/books/next.json")
        );
        assert_eq!(
            state.resolve(EXPORT_DIALOG, Path::new("/tmp/abs.json")),
            PathBuf::from("/tmp/abs.json")
        );
        // Dialogs do not share directories
        assert_eq!(state.last_dir(IMPORT_DIALOG), None);
    }

    #[test]
    fn test_bare_file_name_is_not_remembered() {
        let mut state = DialogState::default();
        state.remember(IMPORT_DIALOG, Path::new("saved.json"));
        assert!(state.directories.is_empty());
    }

    #[test]
    fn test_state_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dialogs.yml");

        assert_eq!(DialogState::load_from_path(&path).unwrap(), DialogState::default());

        let mut state = DialogState::default();
        state.remember(IMPORT_DIALOG, Path::new("/srv/bookmarks/a.json"));
        state.save_to_path(&path).unwrap();

        let loaded = DialogState::load_from_path(&path).unwrap();
        assert_eq!(loaded, state);
    }
}
