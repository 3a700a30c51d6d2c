use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Title of the marker record the viewer maintains for the last read position.
/// It is never surfaced as an editable row after an import.
pub const CURRENT_PAGE_SENTINEL: &str = "calibre_current_page_bookmark";

/// Title given to a row whose title was edited down to nothing
pub const PLACEHOLDER_TITLE: &str = "Unknown";

/// A bookmark: a required title plus whatever positional data the viewer
/// attached to it.
///
/// On the wire the extra keys sit next to `title` in a single mapping, so a
/// record written by the viewer as `{"title": "...", "pos": ...}` round-trips
/// unchanged. Equality is structural over the title and every extra key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub title: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Bookmark {
    /// Create a bookmark with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach an extra key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, returning the previous value.
    ///
    /// `title` never lands in the extra keys: it replaces the title, so a
    /// record always serializes with exactly one `title`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if key == "title" {
            let title = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Some(Value::String(std::mem::replace(&mut self.title, title)));
        }
        self.extra.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.extra.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Keys other than `title`
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Whether this is the viewer's auto-tracked current page marker
    pub fn is_current_page_marker(&self) -> bool {
        self.title == CURRENT_PAGE_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bookmark_creation() {
        let bookmark = Bookmark::new("Chapter 1").with("pos", "epubcfi(/6/4)");

        assert_eq!(bookmark.title, "Chapter 1");
        assert_eq!(bookmark.get("pos"), Some(&json!("epubcfi(/6/4)")));
        assert_eq!(bookmark.get("missing"), None);
    }

    #[test]
    fn test_extra_keys_are_flattened() {
        let bookmark = Bookmark::new("Intro")
            .with("pos", 42)
            .with("data", vec![120u8, 120, 120]);

        let value = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(
            value,
            json!({"title": "Intro", "pos": 42, "data": [120, 120, 120]})
        );
    }

    #[test]
    fn test_unknown_keys_survive_deserialization() {
        let value = json!({"title": "Marked", "pos": {"spine": 3, "frac": 0.25}, "type": "legacy"});
        let bookmark: Bookmark = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(bookmark.title, "Marked");
        assert_eq!(bookmark.extra().len(), 2);
        assert_eq!(serde_json::to_value(&bookmark).unwrap(), value);
    }

    #[test]
    fn test_title_key_replaces_title() {
        let bookmark = Bookmark::new("A").with("title", "B").with("pos", 1);
        assert_eq!(bookmark.title, "B");
        assert!(bookmark.get("title").is_none());

        let text = serde_json::to_string(&bookmark).unwrap();
        assert_eq!(text.matches("\"title\"").count(), 1);
        let back: Bookmark = serde_json::from_str(&text).unwrap();
        assert_eq!(back, bookmark);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut bookmark = Bookmark::new("A");
        assert_eq!(bookmark.insert("pos", 3), None);
        assert_eq!(bookmark.insert("pos", 4), Some(json!(3)));
        assert_eq!(bookmark.insert("title", 7), Some(json!("A")));
        assert_eq!(bookmark.title, "7");
        assert_eq!(bookmark.remove("pos"), Some(json!(4)));
        assert!(bookmark.extra().is_empty());
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Bookmark::new("A").with("pos", 1);
        let same = Bookmark::new("A").with("pos", 1);
        let moved = Bookmark::new("A").with("pos", 2);
        let renamed = Bookmark::new("B").with("pos", 1);

        assert_eq!(a, same);
        assert_ne!(a, moved);
        assert_ne!(a, renamed);
    }

    #[test]
    fn test_current_page_marker() {
        assert!(Bookmark::new(CURRENT_PAGE_SENTINEL).is_current_page_marker());
        assert!(!Bookmark::new("calibre").is_current_page_marker());
    }
}
