//! Resolved engine settings shared across crates.
//!
//! Raw TOML structs stay private in `fuelswitch-config`; the loader resolves
//! them into these types at the parse boundary.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// What happens to a switchable container when a saved assembly is loaded.
///
/// Stray contents are always stripped first. `Reapply` then resets the
/// container to exactly the persisted selection; `SanitizeOnly` keeps the
/// stored amounts of the items that belong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    #[default]
    Reapply,
    SanitizeOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown load policy '{0}' (expected 'reapply' or 'sanitize_only')")]
pub struct LoadPolicyParseError(String);

impl FromStr for LoadPolicy {
    type Err = LoadPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reapply" => Ok(Self::Reapply),
            "sanitize_only" | "sanitize-only" => Ok(Self::SanitizeOnly),
            other => Err(LoadPolicyParseError(other.to_string())),
        }
    }
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reapply => "reapply",
            Self::SanitizeOnly => "sanitize_only",
        })
    }
}

/// Engine behavior knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSettings {
    load_policy: LoadPolicy,
}

impl EngineSettings {
    #[must_use]
    pub fn new(load_policy: LoadPolicy) -> Self {
        Self { load_policy }
    }

    #[must_use]
    pub fn load_policy(&self) -> LoadPolicy {
        self.load_policy
    }
}
