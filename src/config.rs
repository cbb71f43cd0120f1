//! Run settings, resolved once at startup.
//!
//! Each setting is taken from the first place that provides it:
//! command-line flags, then environment variables (`BF_FILE`, or its alias
//! `GM_BF_FILE`, then `BF_MAX_STEPS`, `BF_EOF`), then the `[run]` section of `$XDG_CONFIG_HOME/bf.toml`, then
//! built-in defaults. Nothing below `main` reads the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;

use crate::error::ConfigError;
use crate::interpreter::EofBehavior;
use crate::loader::SourceSpec;

pub const ENV_FILE: &str = "BF_FILE";
/// Consulted only when `BF_FILE` is unset.
pub const ENV_FILE_ALIAS: &str = "GM_BF_FILE";
pub const ENV_MAX_STEPS: &str = "BF_MAX_STEPS";
pub const ENV_EOF: &str = "BF_EOF";

/// Everything a single run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceSpec,
    /// File feeding `,`; stdin when unset.
    pub input: Option<PathBuf>,
    pub max_steps: Option<usize>,
    pub eof: EofBehavior,
    pub debug: bool,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub code: Vec<String>,
    pub input: Option<PathBuf>,
    pub max_steps: Option<usize>,
    pub eof: Option<EofBehavior>,
    pub debug: bool,
}

/// Settings read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub max_steps: Option<usize>,
    pub eof: Option<EofBehavior>,
}

impl Config {
    /// Resolve against the real process environment and config file.
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        let file = load_file_settings().unwrap_or_default();
        Self::resolve_with(overrides, |key| env::var(key).ok(), file)
    }

    /// Resolve with an explicit environment lookup and file settings.
    pub fn resolve_with<E>(
        overrides: Overrides,
        env: E,
        file: FileSettings,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let source = if let Some(path) = overrides.file {
            SourceSpec::File(path)
        } else if !overrides.code.is_empty() {
            SourceSpec::Inline(overrides.code.join(""))
        } else if let Some((name, path)) = [ENV_FILE, ENV_FILE_ALIAS]
            .into_iter()
            .find_map(|name| env(name).map(|path| (name, path)))
        {
            log::debug!("using program file from {name}");
            SourceSpec::File(PathBuf::from(path))
        } else {
            SourceSpec::Stdin
        };

        let max_steps = match overrides.max_steps {
            Some(n) => Some(n),
            None => match env(ENV_MAX_STEPS) {
                Some(value) => Some(value.trim().parse::<usize>().map_err(|_| {
                    ConfigError::InvalidMaxSteps {
                        value,
                        origin: ENV_MAX_STEPS,
                    }
                })?),
                None => file.max_steps,
            },
        };

        let eof = match overrides.eof {
            Some(eof) => eof,
            None => match env(ENV_EOF) {
                Some(value) => value.parse()?,
                None => file.eof.unwrap_or_default(),
            },
        };

        let config = Self {
            source,
            input: overrides.input,
            max_steps,
            eof,
            debug: overrides.debug,
        };
        log::debug!("resolved config: {config:?}");
        Ok(config)
    }
}

/// Path of the optional config file.
pub fn config_file_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn load_file_settings() -> Option<FileSettings> {
    load_settings_from(&config_file_path()?)
}

/// Read and parse a config file; `None` if it cannot be read.
pub fn load_settings_from(path: &Path) -> Option<FileSettings> {
    let content = fs::read_to_string(path).ok()?;
    log::debug!("reading settings from {}", path.display());
    Some(parse_settings(&content))
}

/// Very small hand-rolled parser: look for the `[run]` section and
/// `key = value` pairs. Unknown keys are ignored; bad values are skipped
/// with a warning.
pub fn parse_settings(content: &str) -> FileSettings {
    let mut settings = FileSettings::default();
    let mut in_run = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_run = &line[1..line.len() - 1] == "run";
            continue;
        }
        if !in_run {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        match key {
            "max_steps" => match value.parse::<usize>() {
                Ok(n) => settings.max_steps = Some(n),
                Err(_) => log::warn!("ignoring invalid max_steps '{value}' in config file"),
            },
            "eof" => match value.parse::<EofBehavior>() {
                Ok(eof) => settings.eof = Some(eof),
                Err(e) => log::warn!("ignoring config file entry: {e}"),
            },
            _ => {}
        }
    }

    settings
}
