pub mod codec;
pub mod export;
pub mod import;
pub mod merge;

// Re-export main functions for convenience
pub use codec::{codec_for_path, BookmarkCodec, Format};
pub use export::{write_bookmarks, ExportOutcome};
pub use import::{read_candidates, validate_import, ImportOutcome, ImportRejection, ImportValidation};
pub use merge::{merge_unique, strip_current_page_markers, MergeReport};
