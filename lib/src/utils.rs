use std::ffi::OsString;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bmkedit";

/// Directory holding `config.yml` and `dialogs.yml`.
///
/// `$BMKEDIT_CONFIG_DIR` wins, then the XDG location, then `~/.config`, then
/// `%APPDATA%` on Windows, then the working directory. Empty variables are
/// treated as unset.
pub fn get_config_dir() -> PathBuf {
    let var = |key: &str| {
        std::env::var_os(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };
    var("BMKEDIT_CONFIG_DIR")
        .or_else(|| var("XDG_CONFIG_HOME").map(|p| p.join(APP_DIR)))
        .or_else(|| var("HOME").map(|p| p.join(".config").join(APP_DIR)))
        .or_else(|| {
            var("APPDATA")
                .filter(|_| cfg!(windows))
                .map(|p| p.join(APP_DIR))
        })
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Append `.ext` to `path` unless it already ends with that extension.
///
/// The suffix is appended, never substituted, so `notes.bak` becomes
/// `notes.bak.json`.
pub fn ensure_extension(path: &Path, ext: &str) -> PathBuf {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() || path.extension().is_some_and(|e| e == ext) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Lowercased extension of a path, if any
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
