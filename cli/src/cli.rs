use bmkedit::config::Config;
use bmkedit::error::{EditorError, Result};
use bmkedit::import_export::{read_candidates, write_bookmarks, ImportValidation};
use bmkedit::Bookmark;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Edit a document viewer's bookmark list", long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Bookmark list to open (JSON or YAML)
    #[arg(name = "INPUT", conflicts_with = "demo")]
    pub input: Option<PathBuf>,

    /// Where to write the edited list (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Start with a few sample bookmarks
    #[arg(long)]
    pub demo: bool,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,
}

/// Sample records matching what the viewer stores
pub fn demo_bookmarks() -> Vec<Bookmark> {
    (1..5)
        .map(|i| Bookmark::new(format!("Bookmark #{}", i)).with("data", "xxxxx"))
        .collect()
}

/// Bookmarks the dialog opens with
pub fn load_initial(args: &Cli, config: &Config) -> Result<Vec<Bookmark>> {
    if args.demo {
        return Ok(demo_bookmarks());
    }
    let Some(path) = &args.input else {
        return Ok(Vec::new());
    };
    match read_candidates(path, config)? {
        ImportValidation::Valid(bookmarks) => Ok(bookmarks),
        ImportValidation::Empty => Ok(Vec::new()),
        ImportValidation::Invalid(rejection) => Err(EditorError::InvalidInput(format!(
            "{}: {}",
            path.display(),
            rejection
        ))),
    }
}

/// Hand the final list back: to `output` with its codec, or as JSON on `stdout`.
/// Nothing but the list is ever written to `stdout`.
pub fn write_result(
    bookmarks: &[Bookmark],
    output: Option<&Path>,
    config: &Config,
    stdout: &mut dyn Write,
) -> Result<()> {
    match output {
        Some(path) => {
            write_bookmarks(bookmarks, path, config)?;
            eprintln!("✓ Wrote {} bookmark(s) to {}", bookmarks.len(), path.display());
        }
        None => {
            serde_json::to_writer_pretty(&mut *stdout, bookmarks)?;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn parse_args(args: &str) -> std::result::Result<Cli, clap::Error> {
        let args_vec: Vec<&str> = args.split_whitespace().collect();
        Cli::try_parse_from(std::iter::once("bmkedit").chain(args_vec))
    }

    fn parse_args_ok(args: &str) -> Cli {
        parse_args(args).expect("Failed to parse valid arguments")
    }

    #[test]
    fn test_no_args() {
        let cli = parse_args_ok("");
        assert!(!cli.version);
        assert_eq!(cli.input, None);
        assert_eq!(cli.output, None);
        assert!(!cli.demo);
        assert!(!cli.nc);
        assert!(!cli.debug);
    }

    #[rstest]
    #[case("--version", true)]
    #[case("-v", true)]
    #[case("", false)]
    fn test_version_flag(#[case] args: &str, #[case] expected: bool) {
        assert_eq!(parse_args_ok(args).version, expected);
    }

    #[rstest]
    #[case("--debug", true)]
    #[case("-g", true)]
    #[case("", false)]
    fn test_debug_flag(#[case] args: &str, #[case] expected: bool) {
        assert_eq!(parse_args_ok(args).debug, expected);
    }

    #[test]
    fn test_input_and_output() {
        let cli = parse_args_ok("saved.json -o edited.json --nc");
        assert_eq!(cli.input, Some(PathBuf::from("saved.json")));
        assert_eq!(cli.output, Some(PathBuf::from("edited.json")));
        assert!(cli.nc);
    }

    #[test]
    fn test_demo_conflicts_with_input() {
        assert!(parse_args("--demo saved.json").is_err());
    }

    #[test]
    fn test_load_demo() {
        let cli = parse_args_ok("--demo");
        let bookmarks = load_initial(&cli, &Config::default()).unwrap();
        assert_eq!(bookmarks.len(), 4);
        assert_eq!(bookmarks[3].title, "Bookmark #4");
    }

    #[test]
    fn test_load_without_input_is_empty() {
        let cli = parse_args_ok("");
        assert!(load_initial(&cli, &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_load_invalid_input_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{"pos": 1}]"#).unwrap();

        let cli = Cli::try_parse_from(["bmkedit", path.to_str().unwrap()]).unwrap();
        let err = load_initial(&cli, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("has no title"));
    }

    #[test]
    fn test_stdout_holds_only_the_list() {
        let mut stdout = Vec::new();
        write_result(&demo_bookmarks(), None, &Config::default(), &mut stdout).unwrap();

        let parsed: Vec<Bookmark> = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(parsed, demo_bookmarks());
        assert!(String::from_utf8(stdout).unwrap().starts_with('['));
    }

    #[test]
    fn test_write_result_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");
        let mut stdout = Vec::new();
        write_result(&demo_bookmarks(), Some(&path), &Config::default(), &mut stdout).unwrap();
        assert!(stdout.is_empty());

        assert!(!fs::read_to_string(&path).unwrap().trim_start().starts_with('['));
        let validation = read_candidates(&path, &Config::default()).unwrap();
        assert_eq!(validation, ImportValidation::Valid(demo_bookmarks()));
    }
}
