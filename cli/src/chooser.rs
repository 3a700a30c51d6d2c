use bmkedit::dialog::{DialogRequest, DialogState, FileChooser};
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};

/// File chooser that asks for a path on the terminal.
///
/// A path given with the command skips the prompt. Relative answers are
/// resolved against the directory the same dialog used last.
pub struct PromptChooser<'a> {
    pub rl: &'a mut DefaultEditor,
    pub state: &'a mut DialogState,
    pub preset: Option<PathBuf>,
}

impl<'a> PromptChooser<'a> {
    fn ask(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        let answer = match self.preset.take() {
            Some(path) => path,
            None => {
                let prompt = prompt_for(request, self.state.last_dir(request.name));
                let line = self.rl.readline(&prompt).ok()?;
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                PathBuf::from(line)
            }
        };
        let path = self.state.resolve(request.name, &answer);
        self.state.remember(request.name, &path);
        Some(path)
    }
}

impl<'a> FileChooser for PromptChooser<'a> {
    fn choose_save_file(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        self.ask(request)
    }

    fn choose_open_file(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        let path = self.ask(request)?;
        if !request.filter.matches(&path) {
            log::debug!("{:?} is outside the {} filter", path, request.filter.label);
        }
        Some(path)
    }
}

pub fn prompt_for(request: &DialogRequest, last_dir: Option<&Path>) -> String {
    let patterns: Vec<String> = request
        .filter
        .extensions
        .iter()
        .map(|e| format!("*.{}", e))
        .collect();
    let mut prompt = format!(
        "{} [{} ({})]",
        request.title,
        request.filter.label,
        patterns.join(" ")
    );
    if let Some(dir) = last_dir {
        prompt.push_str(&format!(" in {}", dir.display()));
    }
    prompt.push_str(", empty to cancel: ");
    prompt
}
