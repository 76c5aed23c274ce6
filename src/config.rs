use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{
    LocalizationSource, PassOptions,
    matcher::{DEFAULT_FUNCTION_NAME, DEFAULT_PLURAL_FUNCTION_NAME},
    parsers::json::{flatten_messages, load_locale_file},
};

pub const CONFIG_FILE_NAME: &str = ".i18nrc.json";

/// A localization table: a path to a JSON locale file, or the table inline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocalizationConfig {
    File(String),
    Inline(Map<String, Value>),
}

impl LocalizationConfig {
    /// Load the table; file paths are relative to `root_dir`.
    pub fn load(&self, root_dir: &Path) -> Result<LocalizationSource> {
        let table = match self {
            LocalizationConfig::File(path) => load_locale_file(&root_dir.join(path))?,
            LocalizationConfig::Inline(map) => flatten_messages(map),
        };
        Ok(LocalizationSource::Map(table))
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localization: Option<LocalizationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_localization: Option<LocalizationConfig>,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_plural_function_name")]
    pub plural_function_name: String,
    #[serde(default)]
    pub fail_on_missing: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}

fn default_plural_function_name() -> String {
    DEFAULT_PLURAL_FUNCTION_NAME.to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_out_dir() -> String {
    "./dist".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            localization: None,
            plural_localization: None,
            function_name: default_function_name(),
            plural_function_name: default_plural_function_name(),
            fail_on_missing: false,
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: default_ignores(),
            out_dir: default_out_dir(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid or the trigger names
    /// are empty or identical.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.function_name.is_empty() || self.plural_function_name.is_empty() {
            bail!("'functionName' and 'pluralFunctionName' must not be empty");
        }
        if self.function_name == self.plural_function_name {
            bail!(
                "'functionName' and 'pluralFunctionName' must differ (both are \"{}\")",
                self.function_name
            );
        }

        Ok(())
    }

    /// Build pass options, loading locale files relative to `root_dir`.
    pub fn pass_options(&self, root_dir: &Path) -> Result<PassOptions> {
        let localization = self
            .localization
            .as_ref()
            .map(|l| l.load(root_dir))
            .transpose()
            .context("Failed to load 'localization'")?;
        let plural_localization = self
            .plural_localization
            .as_ref()
            .map(|l| l.load(root_dir))
            .transpose()
            .context("Failed to load 'pluralLocalization'")?;

        Ok(PassOptions {
            localization,
            plural_localization,
            function_name: self.function_name.clone(),
            plural_function_name: self.plural_function_name.clone(),
            fail_on_missing: self.fail_on_missing,
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against: the
    /// config file's directory, or the start directory without a file.
    pub root_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
