use crate::roll::{
    AcceptStringify, MarkdownStringifier, RenderOptions, Resolution, SimpleStringifier, Stringify,
};
use serde::Deserialize;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Plain,
    Markdown,
}

/// Defaults for how rolls are made and shown.
///
/// ```toml
/// style = "markdown"
/// include_total = false
/// resolution = "advantage"
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub style: Style,
    pub include_total: bool,
    /// Applied to every roll that does not pick its own.
    pub resolution: Option<Resolution>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: Style::default(),
            include_total: RenderOptions::default().include_total,
            resolution: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_total: self.include_total,
        }
    }

    /// Renders with the configured style.
    pub fn render<A: AcceptStringify + ?Sized>(&self, a: &A) -> String {
        let options = self.render_options();
        match self.style {
            Style::Plain => SimpleStringifier::new().stringify(a, options),
            Style::Markdown => MarkdownStringifier::new().stringify(a, options),
        }
    }
}
