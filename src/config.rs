//! YAML configuration file support.
//!
//! One file holds the settings of every stage: word normalization, grading
//! policy, highlight markers and paragraph splitting. Sections that are left
//! out fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "narration review"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   lowercase: true
//!
//! grading:
//!   correctness_threshold: 80
//!   page_size: 50
//!
//! markup:
//!   wrong_class: "wrong-word"
//!   missing_class: "missing-word"
//!   extra_class: "extra-word"
//!   escape_html: true
//!
//! paragraphs:
//!   force_single_paragraph: false
//! ```

use std::fs;
use std::path::Path;

use canonical::CanonicalizeConfig;
use grader::{GradeConfig, GradeError, Grader, MarkupConfig, ParagraphOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    #[serde(default)]
    pub grading: GradeConfig,

    #[serde(default)]
    pub markup: MarkupConfig,

    #[serde(default)]
    pub paragraphs: ParagraphOptions,
}

impl AnalysisConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the format version and every section.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|err| section_error("canonical", err))?;
        self.grading
            .validate()
            .map_err(|err| section_error("grading", err))?;
        self.markup
            .validate()
            .map_err(|err| section_error("markup", err))?;

        Ok(())
    }

    /// Build a [`Grader`] from the normalization, grading and markup sections.
    pub fn grader(&self) -> Result<Grader, GradeError> {
        Grader::new(
            self.canonical.clone(),
            self.grading.clone(),
            self.markup.clone(),
        )
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.grading.correctness_threshold = threshold;
        self
    }

    pub fn with_single_paragraph(mut self, force_single_paragraph: bool) -> Self {
        self.paragraphs.force_single_paragraph = force_single_paragraph;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalizeConfig::default(),
            grading: GradeConfig::default(),
            markup: MarkupConfig::default(),
            paragraphs: ParagraphOptions::default(),
        }
    }
}

fn section_error(section: &str, err: impl std::fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(format!("{section}: {err}"))
}
