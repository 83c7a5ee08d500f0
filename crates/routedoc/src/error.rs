use thiserror::Error;

/// Result type for OpenAPI operations
pub type OpenApiResult<T> = Result<T, OpenApiError>;

/// Errors that can occur around document assembly.
///
/// Building a document never fails; these errors come from exporting a
/// finished document, parsing configuration text, path template helpers, and
/// from resolver internals (which the resolver chain swallows and logs).
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A resolver failed internally while translating a value type
    #[error("Schema resolution error: {0}")]
    Resolution(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path template could not be interpreted
    #[error("Path template error: {0}")]
    PathTemplate(String),

    /// Generic error with context
    #[error("OpenAPI error: {0}")]
    Generic(String),
}

impl OpenApiError {
    /// Create a new schema resolution error
    pub fn resolution_error<T: ToString>(msg: T) -> Self {
        Self::Resolution(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config_error<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    /// Create a new path template error
    pub fn path_template_error<T: ToString>(msg: T) -> Self {
        Self::PathTemplate(msg.to_string())
    }

    /// Create a generic error
    pub fn generic<T: ToString>(msg: T) -> Self {
        Self::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OpenApiError::resolution_error("no translation for Foo");
        assert_eq!(err.to_string(), "Schema resolution error: no translation for Foo");

        let err = OpenApiError::config_error("title must not be empty");
        assert_eq!(err.to_string(), "Configuration error: title must not be empty");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: OpenApiError = parse.unwrap_err().into();
        assert!(matches!(err, OpenApiError::Json(_)));
    }
}
