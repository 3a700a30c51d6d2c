use bmkedit::BookmarkEditor;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
    fn to_plain(&self) -> String;
}

/// One row of the dialog's list as a terminal line
pub struct ColorizeRow<'a> {
    pub number: usize,
    pub title: &'a str,
    pub selected: bool,
    pub extra_keys: usize,
}

impl<'a> Colorize for ColorizeRow<'a> {
    fn to_colored(&self) -> String {
        let marker = if self.selected { ">" } else { " " };
        let mut s = format!(
            "{} {}. {}",
            marker.red(),
            self.number.bright_blue(),
            self.title.bold().green()
        );
        if self.extra_keys > 0 {
            s.push_str(&format!(" {}", format!("(+{})", self.extra_keys).dimmed()));
        }
        s
    }

    fn to_plain(&self) -> String {
        let marker = if self.selected { ">" } else { " " };
        let mut s = format!("{} {}. {}", marker, self.number, self.title);
        if self.extra_keys > 0 {
            s.push_str(&format!(" (+{})", self.extra_keys));
        }
        s
    }
}

/// Render every row of `editor`, one per line, numbered from 1
pub fn render_rows(editor: &BookmarkEditor, color: bool) -> String {
    if editor.is_empty() {
        return "(no bookmarks)\n".to_string();
    }
    let mut out = String::new();
    for (idx, bookmark) in editor.rows().iter().enumerate() {
        let row = ColorizeRow {
            number: idx + 1,
            title: &bookmark.title,
            selected: editor.selected() == Some(idx),
            extra_keys: bookmark.extra().len(),
        };
        out.push_str(&if color { row.to_colored() } else { row.to_plain() });
        out.push('\n');
    }
    out
}
