use crate::models::bookmark::Bookmark;

/// Counts describing a completed import merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// New rows that are visible after the merge
    pub added: usize,
    /// Imported records already present (structurally equal)
    pub duplicates: usize,
    /// Current page markers dropped from the rebuilt rows
    pub hidden: usize,
}

/// Append every imported record that is not already in `current`.
///
/// The membership test runs against the growing list, so repeats inside the
/// imported batch collapse as well. Returns the merged list with the number of
/// records added and skipped.
pub fn merge_unique(mut current: Vec<Bookmark>, imported: Vec<Bookmark>) -> (Vec<Bookmark>, usize, usize) {
    let mut added = 0;
    let mut duplicates = 0;
    for bookmark in imported {
        if current.contains(&bookmark) {
            duplicates += 1;
        } else {
            current.push(bookmark);
            added += 1;
        }
    }
    (current, added, duplicates)
}

/// Drop current page markers, returning how many were removed
pub fn strip_current_page_markers(bookmarks: &mut Vec<Bookmark>) -> usize {
    let before = bookmarks.len();
    bookmarks.retain(|b| !b.is_current_page_marker());
    before - bookmarks.len()
}
