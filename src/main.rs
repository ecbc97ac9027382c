use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use parsley::{Config, ConfigError, OptionsUpdate};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory when `--config` is absent.
const LOCAL_CONFIG: &str = "parsley.toml";

#[derive(Parser)]
#[command(name = "parsley")]
#[command(about = "Convert Markdown to an HTML fragment")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output HTML file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./parsley.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Turn every newline inside a paragraph into <br>
    #[arg(long)]
    breaks: bool,

    /// Disable GitHub-flavoured extensions flag
    #[arg(long)]
    no_gfm: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error reading {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Error writing {path}: {source}")]
    Write { path: String, source: io::Error },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    parsley::set_options(config.markdown.into());
    parsley::set_options(OptionsUpdate {
        gfm: cli.no_gfm.then_some(false),
        breaks: cli.breaks.then_some(true),
    });

    let markdown = read_input(cli.input.as_deref())?;
    let html = parsley::parse(&markdown);

    match &cli.output {
        Some(path) => {
            fs::write(path, &html).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            info!("Created {}", path.display());
        }
        None => io::stdout()
            .write_all(html.as_bytes())
            .map_err(|source| CliError::Write {
                path: "stdout".to_string(),
                source,
            })?,
    }

    Ok(())
}

/// An explicit `--config` must load; the local file is optional and falls
/// back to defaults when unusable.
fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            debug!("looking for {LOCAL_CONFIG}");
            Ok(Config::load_or_default(Path::new(LOCAL_CONFIG)))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .map_err(|source| CliError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(markdown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["parsley", "in.md", "-o", "out.html", "--breaks", "-vv"]);
        assert_eq!(cli.input.as_deref(), Some(Path::new("in.md")));
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.html")));
        assert!(cli.breaks);
        assert!(!cli.no_gfm);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn explicit_config_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/parsley.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Read { .. })));
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = read_input(Some(Path::new("/nonexistent/input.md"))).unwrap_err();
        assert!(err.to_string().starts_with("Error reading /nonexistent/input.md"));
    }
}
