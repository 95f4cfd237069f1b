use regex::Regex;

use heustics_base::HeusticsResult;

use crate::config::IgnoreConfig;

/// Changed files matching these patterns never make a directory dirty.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] = [
    r".*README$",   // README
    r".*\.md$",     // Markdown
    r".*LICENSE$",  // LICENSE
    r".*/docs/.+",  // files in a /docs subfolder
];

/// Compiled set of ignore patterns. A path is ignored when any pattern matches at its start.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    pub fn new<I, S>(patterns: I) -> HeusticsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
                    heustics_base::err!("Invalid ignore pattern '{}': {}", pattern, e)
                })
            })
            .collect::<HeusticsResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn defaults() -> HeusticsResult<Self> {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }

    pub fn from_config(config: &IgnoreConfig) -> HeusticsResult<Self> {
        let defaults: &[&str] = if config.use_defaults {
            &DEFAULT_IGNORE_PATTERNS[..]
        } else {
            &[]
        };
        Self::new(
            defaults
                .iter()
                .copied()
                .chain(config.patterns.iter().map(String::as_str)),
        )
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
