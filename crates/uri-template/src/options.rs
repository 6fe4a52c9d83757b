// File: src/options.rs
// Purpose: Template table options, parsed from TOML

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Registration behaviour of a [`TemplateTable`](crate::TemplateTable)
///
/// ```toml
/// allow_duplicates = false
/// ignore_trailing_slash = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Accept templates equivalent to one already registered (default: false)
    #[serde(default = "default_false")]
    pub allow_duplicates: bool,

    /// Treat `/a/{x}` and `/a/{x}/` as the same template (default: true)
    #[serde(default = "default_true")]
    pub ignore_trailing_slash: bool,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            ignore_trailing_slash: true,
        }
    }
}

impl TableOptions {
    /// Parses options from TOML text; empty text gives the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> AnyResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse options file: {:?}", path))
    }
}
