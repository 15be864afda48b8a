//! Configuration management for the resume checker

use crate::error::{Result, ResumeCheckerError};
use crate::processing::scoring::ScoringWeights;
use crate::processing::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Every table and key is optional; anything absent takes its default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub vocabulary: VocabularyConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub keywords_weight: f64,
    pub structure_weight: f64,
    pub contacts_weight: f64,
    pub experience_weight: f64,
}

/// Terms appended to the built-in skill tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub extra_technical_skills: Vec<String>,
    pub extra_soft_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();

        Self {
            keywords_weight: weights.keywords,
            structure_weight: weights.structure,
            contacts_weight: weights.contacts,
            experience_weight: weights.experience,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the default location.
    ///
    /// A missing explicit path is an error; a missing default file is created
    /// with default values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ResumeCheckerError::Configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::read_from(path)?
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::read_from(&config_path)?
                } else {
                    let config = Self::default();
                    config.save()?;
                    config
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ResumeCheckerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeCheckerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-checker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring_weights().validate()?;

        if self.input.max_file_size_bytes == 0 {
            return Err(ResumeCheckerError::Configuration(
                "input.max_file_size_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            keywords: self.scoring.keywords_weight,
            structure: self.scoring.structure_weight,
            contacts: self.scoring.contacts_weight,
            experience: self.scoring.experience_weight,
        }
    }

    /// Built-in tables extended with the configured extra skills
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::default().with_extra_skills(
            &self.vocabulary.extra_technical_skills,
            &self.vocabulary.extra_soft_skills,
        )
    }
}
