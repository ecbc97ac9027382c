use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Conversion options shared by every parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// GitHub-flavoured extensions. Tables, strikethrough and task lists are
    /// always recognized; the flag is kept so existing configs stay valid.
    pub gfm: bool,
    /// Render every newline inside a paragraph as `<br>`.
    pub breaks: bool,
}

impl Options {
    pub const DEFAULT: Options = Options {
        gfm: true,
        breaks: false,
    };

    /// Overwrite the fields that are present in `update`.
    pub fn merge(&mut self, update: OptionsUpdate) {
        if let Some(gfm) = update.gfm {
            self.gfm = gfm;
        }
        if let Some(breaks) = update.breaks {
            self.breaks = breaks;
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A partial [`Options`] record; absent keys leave the current value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OptionsUpdate {
    pub gfm: Option<bool>,
    pub breaks: Option<bool>,
}

impl From<Options> for OptionsUpdate {
    fn from(options: Options) -> Self {
        Self {
            gfm: Some(options.gfm),
            breaks: Some(options.breaks),
        }
    }
}

/// Contents of a `parsley.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markdown: Options,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown: Options::DEFAULT,
        }
    }
}

impl Config {
    /// The config bundled with the crate (checked by `build.rs`).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load config from a TOML file, or return the compiled defaults if it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::compiled_default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!("{e}, using defaults");
            Self::compiled_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_builtin_options() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: Config = toml::from_str("[markdown]\nbreaks = true\n").unwrap();
        assert_eq!(
            config.markdown,
            Options {
                gfm: true,
                breaks: true
            }
        );
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn merge_only_touches_present_keys() {
        let mut options = Options::default();
        options.merge(OptionsUpdate {
            breaks: Some(true),
            ..OptionsUpdate::default()
        });
        assert_eq!(
            options,
            Options {
                gfm: true,
                breaks: true
            }
        );

        options.merge(OptionsUpdate::default());
        assert!(options.breaks);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/parsley.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/parsley.toml"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[markdown]\ngfm = false").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.markdown,
            Options {
                gfm: false,
                breaks: false
            }
        );
    }

    #[test]
    fn load_reports_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[markdown]\nbreaks = \"yes\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(Config::load_or_default(file.path()), Config::default());
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        assert_eq!(
            Config::load_or_default(Path::new("/nonexistent/parsley.toml")),
            Config::default()
        );
    }

    #[test]
    fn update_from_options_sets_every_key() {
        let update = OptionsUpdate::from(Options {
            gfm: false,
            breaks: true,
        });
        assert_eq!(update.gfm, Some(false));
        assert_eq!(update.breaks, Some(true));
    }
}
