//! Dispatcher configuration parsed from environment variables.

use crate::graphviz::{LayoutEngine, OutputFormat};

pub const ENGINE_ENV: &str = "GVLAYOUT_ENGINE";
pub const JSON_FORMAT_ENV: &str = "GVLAYOUT_JSON_FORMAT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The structured path only understands the `json` / `json0` envelope.
    #[error("unsupported GVLAYOUT_JSON_FORMAT: {0} (expected 'json' or 'json0')")]
    UnsupportedJsonFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizConfig {
    /// Engine used by [`crate::GraphViz::layout_default`].
    pub engine: LayoutEngine,
    /// Format requested when a [`crate::Graph`] is wanted.
    pub json_format: OutputFormat,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self { engine: LayoutEngine::Dot, json_format: OutputFormat::Json }
    }
}

impl GraphvizConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `GVLAYOUT_ENGINE`: default `dot`; any name is forwarded verbatim
    /// - `GVLAYOUT_JSON_FORMAT`: `json` (default, with draw commands) or `json0`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedJsonFormat`] for any other format.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`GraphvizConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let engine = lookup(ENGINE_ENV)
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map_or(LayoutEngine::Dot, |raw| LayoutEngine::from_name(&raw));
        let json_format = parse_json_format(lookup(JSON_FORMAT_ENV).as_deref())?;
        Ok(Self { engine, json_format })
    }
}

fn parse_json_format(raw: Option<&str>) -> Result<OutputFormat, ConfigError> {
    match raw.map(str::trim).unwrap_or("json") {
        "json" => Ok(OutputFormat::Json),
        "json0" => Ok(OutputFormat::Json0),
        other => Err(ConfigError::UnsupportedJsonFormat(other.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
