use serde::Deserialize;

use heustics_base::{FilePath, HeusticsResult, PalHandle, ResultExt};

/// Optional configuration for the dirty package search.
///
/// ```toml
/// [ignore]
/// use_defaults = true
/// patterns = ['.*\.txt$']
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Which changed files are ignored when computing dirty directories.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Keep the built-in README/markdown/LICENSE/docs rules.
    #[serde(default = "default_use_defaults")]
    pub use_defaults: bool,
    /// Additional regex patterns, matched from the start of the path.
    #[serde(default)]
    pub patterns: Vec<String>,
}

fn default_use_defaults() -> bool {
    true
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            patterns: Vec::new(),
        }
    }
}

pub fn load_config(pal: &PalHandle, path: &FilePath) -> HeusticsResult<Config> {
    let content = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config {}", path))?;
    toml::from_str(&content)
        .map_err(|e| heustics_base::err!("Failed to parse config {}: {}", path, e))
}
