pub mod config;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod import_export;
pub mod models;
pub mod utils;

// Re-export the types hosts reach for first
pub use editor::BookmarkEditor;
pub use error::EditorError;
pub use models::bookmark::Bookmark;
