use crate::config::Config;
use crate::dialog::{DialogRequest, FileChooser};
use crate::error::{EditorError, Result};
use crate::import_export::{
    merge_unique, read_candidates, strip_current_page_markers, write_bookmarks, ExportOutcome,
    Format, ImportOutcome, ImportValidation, MergeReport,
};
use crate::models::bookmark::Bookmark;
use crate::utils;
use std::path::{Path, PathBuf};

/// Editable, ordered list of bookmarks behind the bookmark manager dialog.
///
/// Row order is the order handed back by [`BookmarkEditor::bookmarks`]. The
/// label of a row is always the title of its record; an inline rename that has
/// begun but not been committed is held in a separate pending slot.
#[derive(Debug, Clone)]
pub struct BookmarkEditor {
    original: Vec<Bookmark>,
    rows: Vec<Bookmark>,
    selected: Option<usize>,
    pending_edit: Option<usize>,
    config: Config,
}

impl BookmarkEditor {
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self::with_config(bookmarks, Config::default())
    }

    pub fn with_config(bookmarks: Vec<Bookmark>, config: Config) -> Self {
        let mut editor = Self {
            original: bookmarks,
            rows: Vec::new(),
            selected: None,
            pending_edit: None,
            config,
        };
        editor.reset(None);
        editor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The snapshot the editor was opened with
    pub fn original(&self) -> &[Bookmark] {
        &self.original
    }

    /// Rebuild all rows from `bookmarks`, or from the original snapshot.
    /// The first row, if any, becomes the selected row.
    pub fn reset(&mut self, bookmarks: Option<Vec<Bookmark>>) {
        self.rows = bookmarks.unwrap_or_else(|| self.original.clone());
        self.pending_edit = None;
        self.selected = if self.rows.is_empty() { None } else { Some(0) };
        log::debug!("Reset editor with {} row(s)", self.rows.len());
    }

    /// Discard every edit made during the session
    pub fn revert(&mut self) {
        self.reset(None);
    }

    pub fn rows(&self) -> &[Bookmark] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn label(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|b| b.title.as_str())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        self.selected = Some(row);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Begin an inline rename of the selected row, returning its index
    pub fn edit_selected(&mut self) -> Option<usize> {
        let row = self.selected?;
        self.pending_edit = Some(row);
        Some(row)
    }

    /// Row currently being renamed, if any
    pub fn pending_edit(&self) -> Option<usize> {
        self.pending_edit
    }

    /// Finish the pending rename with `text`, returning the stored title.
    /// `Ok(None)` when no rename was pending.
    pub fn commit_edit(&mut self, text: &str) -> Result<Option<String>> {
        match self.pending_edit.take() {
            Some(row) => self.commit_title_edit(row, text).map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.pending_edit = None;
    }

    /// Store `text` as the title of `row`. Blank text becomes the placeholder.
    pub fn commit_title_edit(&mut self, row: usize, text: &str) -> Result<String> {
        self.check_row(row)?;
        let title = if text.trim().is_empty() {
            self.config.placeholder_title.clone()
        } else {
            text.to_string()
        };
        log::debug!("Row {} renamed to {:?}", row, title);
        self.rows[row].title = title.clone();
        Ok(title)
    }

    /// Remove the selected row. The row that takes its place becomes selected.
    pub fn delete_selected(&mut self) -> Option<Bookmark> {
        let row = self.selected?;
        let removed = self.rows.remove(row);
        self.pending_edit = None;
        self.selected = if self.rows.is_empty() {
            None
        } else {
            Some(row.min(self.rows.len() - 1))
        };
        log::debug!("Deleted row {} ({:?})", row, removed.title);
        Some(removed)
    }

    /// Drag-and-drop reorder: move the row at `from` so it ends up at `to`
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_row(from)?;
        self.check_row(to)?;
        if from == to {
            return Ok(());
        }

        let bookmark = self.rows.remove(from);
        self.rows.insert(to, bookmark);

        let shift = |idx: usize| -> usize {
            if idx == from {
                to
            } else if from < idx && idx <= to {
                idx - 1
            } else if to <= idx && idx < from {
                idx + 1
            } else {
                idx
            }
        };
        self.selected = self.selected.map(shift);
        self.pending_edit = self.pending_edit.map(shift);
        log::debug!("Moved row {} to {}", from, to);
        Ok(())
    }

    /// Current bookmarks, in row order
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.rows.clone()
    }

    pub fn export_request(&self) -> DialogRequest {
        DialogRequest::export(&self.config.extension)
    }

    pub fn import_request(&self) -> DialogRequest {
        DialogRequest::import(&self.config.extension)
    }

    /// Ask the host for a destination and write the current list there
    pub fn export_bookmarks(&self, chooser: &mut dyn FileChooser) -> Result<ExportOutcome> {
        match chooser.choose_save_file(&self.export_request()) {
            Some(path) => self.export_to_path(&path),
            None => Ok(ExportOutcome::Cancelled),
        }
    }

    /// Write the current list to `path`. A path whose extension names a codec
    /// is kept as is; any other path gets the configured extension appended.
    pub fn export_to_path(&self, path: &Path) -> Result<ExportOutcome> {
        if path.as_os_str().is_empty() {
            return Err(EditorError::InvalidInput("export path is empty".to_string()));
        }
        let names_codec = utils::extension_of(path)
            .and_then(|ext| Format::from_extension(&ext))
            .is_some();
        let path: PathBuf = if names_codec {
            path.to_path_buf()
        } else {
            utils::ensure_extension(path, &self.config.extension)
        };
        let bookmarks = self.bookmarks();
        write_bookmarks(&bookmarks, &path, &self.config)?;
        log::info!("Exported {} bookmark(s) to {:?}", bookmarks.len(), path);
        Ok(ExportOutcome::Written {
            path,
            count: bookmarks.len(),
        })
    }

    /// Ask the host for a saved list and merge it into the rows
    pub fn import_bookmarks(&mut self, chooser: &mut dyn FileChooser) -> Result<ImportOutcome> {
        match chooser.choose_open_file(&self.import_request()) {
            Some(path) => self.import_from_path(&path),
            None => Ok(ImportOutcome::Cancelled),
        }
    }

    /// Merge the list saved at `path` into the rows.
    ///
    /// On success the rows are rebuilt from the merged list without any
    /// current page marker. A rejected document leaves the rows untouched.
    pub fn import_from_path(&mut self, path: &Path) -> Result<ImportOutcome> {
        let imported = match read_candidates(path, &self.config)? {
            ImportValidation::Valid(imported) => imported,
            ImportValidation::Empty => return Ok(ImportOutcome::Empty),
            ImportValidation::Invalid(rejection) => {
                log::warn!("Rejected import from {:?}: {}", path, rejection);
                return Ok(ImportOutcome::Rejected(rejection));
            }
        };

        // Rows that survive the rebuild; everything beyond them is new
        let kept = self.rows.len() - self.visible_markers();
        let (mut merged, _, duplicates) = merge_unique(self.bookmarks(), imported);
        let hidden = strip_current_page_markers(&mut merged);
        let report = MergeReport {
            added: merged.len() - kept,
            duplicates,
            hidden,
        };
        self.reset(Some(merged));
        log::info!(
            "Imported from {:?}: {} new, {} duplicate(s), {} hidden",
            path,
            report.added,
            report.duplicates,
            report.hidden
        );
        Ok(ImportOutcome::Merged(report))
    }

    fn visible_markers(&self) -> usize {
        self.rows.iter().filter(|b| b.is_current_page_marker()).count()
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(EditorError::RowOutOfRange(row))
        }
    }
}
