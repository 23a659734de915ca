//! Generator configuration.
//!
//! Handles loading, validating, and merging `swiftdoc.toml`. Configuration is
//! layered: stock defaults are overridden by an optional `swiftdoc.toml` in the
//! working directory, which is in turn overridden by command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "docs"           # Output directory
//! # module_name = "MyKit"   # Overrides the name in the symbol manifest
//!
//! [format]
//! kind = "commonmark"       # "commonmark" (wiki pages) or "html"
//! base_url = "/"            # Prefix for links between pages
//!
//! [access]
//! minimum = "public"        # private | fileprivate | internal | public | open
//!
//! [processing]
//! max_processes = 4         # Max parallel writers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::route::BaseUrl;
use crate::types::AccessLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "swiftdoc.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Output format of the generated pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// GitHub-wiki style markdown, with `_Sidebar` and `_Footer` pages
    #[default]
    Commonmark,
    /// Static HTML site with a shared stylesheet
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Commonmark => "md",
            OutputFormat::Html => "html",
        }
    }
}

/// Generator configuration loaded from `swiftdoc.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocConfig {
    /// Module name shown in page titles. Falls back to the symbol manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    /// Output directory.
    pub output: String,
    pub format: FormatConfig,
    pub access: AccessConfig,
    pub processing: ProcessingConfig,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            module_name: None,
            output: "docs".to_string(),
            format: FormatConfig::default(),
            access: AccessConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl DocConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.format.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "format.base_url must not be empty".into(),
            ));
        }
        BaseUrl::parse(&self.format.base_url)
            .map_err(|e| ConfigError::Validation(format!("format.base_url: {e}")))?;
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Output format and link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub kind: OutputFormat,
    /// Prefix composed with routes to form links between pages.
    pub base_url: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            kind: OutputFormat::Commonmark,
            base_url: "/".to_string(),
        }
    }
}

/// Which declarations get documented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    /// Symbols at or above this level are documented.
    pub minimum: AccessLevel,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            minimum: AccessLevel::Public,
        }
    }
}

/// Parallel writing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page writers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DocConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `swiftdoc.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<DocConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: DocConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `swiftdoc.toml` in `dir`, with `cli` applied on top.
///
/// `cli` is a sparse table built from command-line flags; pass an empty table
/// when no flags override anything.
pub fn load_config(dir: &Path, cli: toml::Value) -> Result<DocConfig, ConfigError> {
    let base = stock_defaults_value();
    let file = load_raw_config(dir)?;
    resolve_config(base, file.into_iter().chain(std::iter::once(cli)))
}

/// Returns a fully-commented stock `swiftdoc.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# swiftdoc configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# Output directory for generated pages.
output = "docs"

# Module name used in page titles. Defaults to the name recorded in the
# symbol manifest.
# module_name = "MyKit"

# ---------------------------------------------------------------------------
# Output format
# ---------------------------------------------------------------------------
[format]
# "commonmark" writes GitHub-wiki style pages (Home.md, _Sidebar.md, _Footer.md).
# "html" writes a static site (index.html per page plus all.css).
kind = "commonmark"

# Prefix for links between pages. Either a path ("/", "/docs/") or an
# absolute URL ("https://example.com/MyKit/").
base_url = "/"

# ---------------------------------------------------------------------------
# Access control
# ---------------------------------------------------------------------------
[access]
# Document declarations at or above this level:
# private < fileprivate < internal < public < open
minimum = "public"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page writers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
