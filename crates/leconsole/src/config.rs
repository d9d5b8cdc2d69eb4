// Project Configuration
//
// *La Configuration* (The Configuration) - Rendering defaults for LeRendu

use anyhow::{anyhow, Context, Result};
use lerendu::grammar::LanguageId;
use lerendu::render::{OutputShape, RenderOptions, Traversal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".lerendu/config.toml";

/// Project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Rendering defaults
    pub render: RenderConfig,

    /// Language detection overrides
    pub languages: LanguageConfig,
}

impl ProjectConfig {
    /// Load configuration from a directory
    ///
    /// Looks for `.lerendu/config.toml` in the project directory.
    /// If not found, returns default configuration.
    pub fn load<P: AsRef<Path>>(project_path: P) -> Result<Self> {
        let config_path = project_path.as_ref().join(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        Self::load_file(&config_path)
    }

    /// Load configuration from an explicit file path
    pub fn load_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to a directory
    ///
    /// Creates `.lerendu` directory if it doesn't exist.
    pub fn save<P: AsRef<Path>>(&self, project_path: P) -> Result<()> {
        let config_dir = project_path.as_ref().join(".lerendu");
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

        let config_path = config_dir.join("config.toml");

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&config_path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Renderer options described by the `[render]` section
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            shape: OutputShape::Records,
            show_field_names: self.render.show_field_names,
            hide_unnamed: self.render.hide_unnamed,
            traversal: if self.render.iterative {
                Traversal::Iterative
            } else {
                Traversal::Recursive
            },
            indent: String::new(),
        }
    }

    /// Resolve `[languages.aliases]` into language ids
    pub fn aliases(&self) -> Result<HashMap<String, LanguageId>> {
        self.languages
            .aliases
            .iter()
            .map(|(ext, name)| {
                let id = LanguageId::from_name(name).ok_or_else(|| {
                    anyhow!(
                        "Unknown language {:?} for extension {:?} in [languages.aliases]",
                        name,
                        ext
                    )
                })?;
                Ok((ext.trim_start_matches('.').to_lowercase(), id))
            })
            .collect()
    }
}

/// Output format for rendered trees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text, one line per node
    #[default]
    Text,
    /// JSON array of records per file
    Json,
    /// HTML list per file
    Html,
}

/// Rendering defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Annotate nodes with the field they occupy in their parent
    pub show_field_names: bool,

    /// Skip anonymous nodes (punctuation, keywords)
    pub hide_unnamed: bool,

    /// Walk trees with an explicit stack instead of recursion
    pub iterative: bool,

    /// Output format
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_field_names: false,
            hide_unnamed: true,
            iterative: false,
            format: OutputFormat::Text,
        }
    }
}

/// Language detection overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LanguageConfig {
    /// File extension -> language name
    pub aliases: HashMap<String, String>,
}
