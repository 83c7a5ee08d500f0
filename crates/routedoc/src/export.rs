/*!
Serialization of finished documents.

Everything here works on in-memory text; writing the result somewhere is up
to the caller.
*/

use crate::{error::OpenApiResult, specification::Document};
use serde_json::Value;

/// Output format for rendered documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl Document {
    /// Render as JSON text
    pub fn to_json(&self, pretty: bool) -> OpenApiResult<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Render as YAML text
    pub fn to_yaml(&self) -> OpenApiResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Convert into a generic JSON value
    pub fn to_value(&self) -> OpenApiResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Render in `format`; `pretty` only affects JSON
    pub fn render(&self, format: OutputFormat, pretty: bool) -> OpenApiResult<String> {
        match format {
            OutputFormat::Json => self.to_json(pretty),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }

    /// Parse a previously rendered document, detecting JSON or YAML
    pub fn parse(text: &str) -> OpenApiResult<Self> {
        if text.trim_start().starts_with('{') {
            Ok(serde_json::from_str(text)?)
        } else {
            Ok(serde_yaml::from_str(text)?)
        }
    }
}
