mod chooser;
mod cli;
mod interactive;
mod output;

use bmkedit::dialog::DialogState;
use bmkedit::error::Result;
use bmkedit::{config, BookmarkEditor};
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.version {
        println!("bmkedit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let bookmarks = cli::load_initial(&args, &cfg)?;
    let mut editor = BookmarkEditor::with_config(bookmarks, cfg);

    let state_path = DialogState::default_path();
    let mut state = DialogState::load_from_path(&state_path).unwrap_or_else(|e| {
        log::warn!("Ignoring dialog state in {:?}: {}", state_path, e);
        DialogState::default()
    });

    interactive::run(&mut editor, &mut state, !args.nc)?;

    if let Err(e) = state.save_to_path(&state_path) {
        log::warn!("Could not save dialog state to {:?}: {}", state_path, e);
    }

    cli::write_result(
        &editor.bookmarks(),
        args.output.as_deref(),
        editor.config(),
        &mut std::io::stdout().lock(),
    )
}
