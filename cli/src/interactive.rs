use crate::chooser::PromptChooser;
use crate::output::colorize::render_rows;
use bmkedit::dialog::DialogState;
use bmkedit::error::{EditorError, Result};
use bmkedit::import_export::{ExportOutcome, ImportOutcome};
use bmkedit::BookmarkEditor;
use rustyline::error::ReadlineError;
use rustyline::{Behavior, DefaultEditor};
use std::path::PathBuf;

/// One dialog affordance, as typed at the prompt. Row numbers are 0-based here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(usize),
    Edit,
    Rename(usize, String),
    Delete,
    Move(usize, usize),
    Revert,
    Export(Option<PathBuf>),
    Import(Option<PathBuf>),
    Help,
    Quit,
}

fn parse_row(arg: Option<&str>, usage: &str) -> std::result::Result<usize, String> {
    let arg = arg.ok_or_else(|| format!("Usage: {}", usage))?;
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Invalid row number '{}'", arg)),
    }
}

/// Parse one line of input. Row numbers are typed 1-based.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();
    let path = || (!rest.is_empty()).then(|| PathBuf::from(rest));

    let command = match cmd {
        "ls" | "l" => Command::List,
        "sel" | "s" => Command::Select(parse_row(args.next(), "sel <row>")?),
        "e" | "edit" => Command::Edit,
        "rename" | "r" => {
            let row = parse_row(args.next(), "rename <row> <title>")?;
            // Everything after the row number is the title, blanks included
            let title = rest
                .split_once(char::is_whitespace)
                .map(|(_, t)| t.trim_start().to_string())
                .unwrap_or_default();
            Command::Rename(row, title)
        }
        "d" | "del" | "delete" => Command::Delete,
        "mv" | "move" => {
            let from = parse_row(args.next(), "mv <from> <to>")?;
            let to = parse_row(args.next(), "mv <from> <to>")?;
            Command::Move(from, to)
        }
        "revert" => Command::Revert,
        "export" => Command::Export(path()),
        "import" => Command::Import(path()),
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" | "done" => Command::Quit,
        other => return Err(format!("Unknown command '{}', type '?' for help", other)),
    };
    Ok(command)
}

/// Run the dialog until the user closes it.
///
/// Everything shown to the user goes to stderr.
pub fn run(editor: &mut BookmarkEditor, state: &mut DialogState, color: bool) -> Result<()> {
    // Prompts go to the terminal, listings to stderr: stdout carries only the final list
    let config = rustyline::Config::builder()
        .behavior(Behavior::PreferTerm)
        .build();
    let mut rl =
        DefaultEditor::with_config(config).map_err(|e| EditorError::InvalidInput(e.to_string()))?;

    eprintln!("bmkedit - type '?' for help");
    eprint!("{}", render_rows(editor, color));

    loop {
        let readline = rl.readline("bookmarks> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)
                    .map_err(|e| EditorError::InvalidInput(e.to_string()))?;

                match parse_command(line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = handle_command(editor, state, &mut rl, command, color) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(msg) => eprintln!("{}", msg),
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                eprintln!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn handle_command(
    editor: &mut BookmarkEditor,
    state: &mut DialogState,
    rl: &mut DefaultEditor,
    command: Command,
    color: bool,
) -> Result<()> {
    match command {
        Command::List => eprint!("{}", render_rows(editor, color)),
        Command::Select(row) => {
            editor.select(row)?;
            eprint!("{}", render_rows(editor, color));
        }
        Command::Edit => {
            let Some(row) = editor.edit_selected() else {
                eprintln!("No bookmark selected");
                return Ok(());
            };
            let current = editor.label(row).unwrap_or_default().to_string();
            match rl.readline_with_initial("title> ", (current.as_str(), "")) {
                Ok(text) => {
                    if let Some(title) = editor.commit_edit(&text)? {
                        eprintln!("✓ Renamed to {}", title);
                    }
                }
                Err(_) => {
                    editor.cancel_edit();
                    eprintln!("Rename cancelled");
                }
            }
        }
        Command::Rename(row, text) => {
            let title = editor.commit_title_edit(row, &text)?;
            eprintln!("✓ Renamed to {}", title);
        }
        Command::Delete => match editor.delete_selected() {
            Some(removed) => {
                eprintln!("✓ Deleted {}", removed.title);
                eprint!("{}", render_rows(editor, color));
            }
            None => eprintln!("No bookmark selected"),
        },
        Command::Move(from, to) => {
            editor.move_row(from, to)?;
            eprint!("{}", render_rows(editor, color));
        }
        Command::Revert => {
            editor.revert();
            eprintln!("✓ Reverted to the original bookmarks");
            eprint!("{}", render_rows(editor, color));
        }
        Command::Export(preset) => {
            let mut chooser = PromptChooser { rl, state, preset };
            match editor.export_bookmarks(&mut chooser)? {
                ExportOutcome::Cancelled => {}
                ExportOutcome::Written { path, count } => {
                    eprintln!("✓ Exported {} bookmark(s) to {}", count, path.display())
                }
            }
        }
        Command::Import(preset) => {
            let mut chooser = PromptChooser { rl, state, preset };
            match editor.import_bookmarks(&mut chooser)? {
                ImportOutcome::Cancelled => {}
                ImportOutcome::Empty => eprintln!("Nothing to import"),
                ImportOutcome::Rejected(rejection) => {
                    eprintln!("Import rejected: {}", rejection)
                }
                ImportOutcome::Merged(report) => {
                    eprintln!(
                        "✓ Imported {} new bookmark(s), skipped {} duplicate(s)",
                        report.added, report.duplicates
                    );
                    eprint!("{}", render_rows(editor, color));
                }
            }
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        "
BOOKMARK EDITOR COMMANDS:

    ls                     List bookmarks (> marks the selected row)
    sel <row>              Select a row
    e | edit               Rename the selected row inline
    rename <row> <title>   Rename a row directly (blank title becomes 'Unknown')
    d | del                Delete the selected row
    mv <from> <to>         Move a row (drag and drop)
    revert                 Discard all changes made in this session
    export [file]          Save the list to a file (asks when no file is given)
    import [file]          Merge bookmarks from a saved file

    ?  or help             Show this help
    q  or quit or done     Close and hand back the edited list
    ^D or ^C               Same as quit
"
    );
}
