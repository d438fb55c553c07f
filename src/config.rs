//! Configuration types
//!
//! Server settings assembled from the command line, and the YAML seed file
//! used to populate categories and questions.

use crate::error::{Error, Result, ResultExt};
use crate::types::{Category, NewQuestion, MAX_DIFFICULTY, MIN_DIFFICULTY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Database location (file path or `:memory:`)
    pub database: String,
    /// Optional seed file loaded before serving
    pub seed: Option<PathBuf>,
}

impl ServerConfig {
    /// Socket address to bind
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// ============================================================================
// Seed Data
// ============================================================================

/// Contents of a seed file
///
/// ```yaml
/// categories:
///   - id: 1
///     type: Science
/// questions:
///   - question: What is the heaviest organ in the human body?
///     answer: The Liver
///     difficulty: 4
///     category: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

impl SeedData {
    /// Parse seed data from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let seed: Self = serde_yaml::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load seed data from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid seed file '{}'", path.display()))
    }

    /// Check ids, text and difficulty before anything reaches the store
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for category in &self.categories {
            if category.id <= 0 {
                return Err(Error::config(format!(
                    "category id must be positive, got {}",
                    category.id
                )));
            }
            if !ids.insert(category.id) {
                return Err(Error::config(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.question.trim().is_empty() || question.answer.trim().is_empty() {
                return Err(Error::config(format!(
                    "question #{} has empty question or answer text",
                    index + 1
                )));
            }
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&question.difficulty) {
                return Err(Error::config(format!(
                    "question #{} has difficulty {} outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY}",
                    index + 1,
                    question.difficulty
                )));
            }
        }
        Ok(())
    }
}
