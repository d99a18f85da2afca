//! Showcase configuration with YAML schema and validation.
//!
//! Mistakes are caught in two passes:
//! - Field constraints via `validator`
//! - Cross-field checks (non-empty demo list, unique copy keys)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::error::{ShowcaseError, ShowcaseResult};
use crate::sequencer::{CommandDemo, SequencerTiming};

/// Built-in HEXA CLI showcase.
const EMBEDDED_YAML: &str = include_str!("../../assets/showcase.yaml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Prompt shown before echoed commands.
    #[validate(length(min = 1, max = 80))]
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Cycle timing.
    #[validate(nested)]
    #[serde(default)]
    pub timing: SequencerTiming,

    /// Demos in play order.
    #[validate(nested)]
    pub demos: Vec<CommandDemo>,

    /// Strings the page offers to copy, by key.
    #[validate(nested)]
    #[serde(default)]
    pub copy_targets: Vec<CopyTarget>,
}

/// A copyable snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CopyTarget {
    /// Identifies the UI element that owns the flag.
    #[validate(length(min = 1, max = 64))]
    pub key: String,
    /// Text placed on the clipboard.
    pub text: String,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_prompt() -> String {
    "user@dev:~/project$".to_string()
}

impl ShowcaseConfig {
    /// Load from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> ShowcaseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ShowcaseResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// The built-in HEXA CLI showcase.
    ///
    /// # Errors
    ///
    /// Only if the embedded asset is broken.
    pub fn embedded() -> ShowcaseResult<Self> {
        Self::from_yaml(EMBEDDED_YAML)
    }

    /// Load `path` if given, otherwise the embedded showcase.
    ///
    /// # Errors
    ///
    /// Same as [`ShowcaseConfig::load`].
    pub fn load_or_embedded(path: Option<&Path>) -> ShowcaseResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Start building a configuration in code.
    #[must_use]
    pub fn builder() -> ShowcaseConfigBuilder {
        ShowcaseConfigBuilder::default()
    }

    /// Look up a copy target by key.
    #[must_use]
    pub fn copy_target(&self, key: &str) -> Option<&CopyTarget> {
        self.copy_targets.iter().find(|target| target.key == key)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if encoding fails.
    pub fn to_yaml(&self) -> ShowcaseResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate_semantic(&self) -> ShowcaseResult<()> {
        if self.demos.is_empty() {
            return Err(ShowcaseError::config("at least one demo is required"));
        }

        let mut seen = HashSet::new();
        for target in &self.copy_targets {
            if !seen.insert(target.key.as_str()) {
                return Err(ShowcaseError::config(format!(
                    "duplicate copy target key '{}'",
                    target.key
                )));
            }
        }

        if self.timing.cycle_pause_ms == 0 {
            return Err(ShowcaseError::config("cycle_pause_ms must be positive"));
        }

        Ok(())
    }
}

/// Programmatic construction, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct ShowcaseConfigBuilder {
    prompt: Option<String>,
    timing: Option<SequencerTiming>,
    demos: Vec<CommandDemo>,
    copy_targets: Vec<CopyTarget>,
}

impl ShowcaseConfigBuilder {
    /// Set the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the timing.
    #[must_use]
    pub const fn timing(mut self, timing: SequencerTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Append a demo.
    #[must_use]
    pub fn demo(mut self, demo: CommandDemo) -> Self {
        self.demos.push(demo);
        self
    }

    /// Append a copy target.
    #[must_use]
    pub fn copy_target(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.copy_targets.push(CopyTarget {
            key: key.into(),
            text: text.into(),
        });
        self
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns error if the result would not pass [`ShowcaseConfig::from_yaml`].
    pub fn build(self) -> ShowcaseResult<ShowcaseConfig> {
        let config = ShowcaseConfig {
            schema_version: default_schema_version(),
            prompt: self.prompt.unwrap_or_else(default_prompt),
            timing: self.timing.unwrap_or_default(),
            demos: self.demos,
            copy_targets: self.copy_targets,
        };
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}
