use crate::{
    descriptions::DEFAULT_FALLBACK_DESCRIPTION,
    error::{OpenApiError, OpenApiResult},
    specification::{ApiInfo, SecurityScheme, Server, ServerVariable, Tag, DEFAULT_OPENAPI_VERSION},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for document generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    /// OpenAPI specification version written to the document
    pub openapi_version: String,

    /// API information
    pub info: ApiInfo,

    /// Servers, either bare URLs or structured entries
    pub servers: Vec<ServerConfig>,

    /// Security schemes registered before any route is processed
    pub security_schemes: IndexMap<String, SecurityScheme>,

    /// Top-level tags
    pub tags: Vec<Tag>,

    /// Description for responses whose status code and class are unknown
    pub fallback_response_description: String,

    /// Extra top-level document keys (`externalDocs`, `x-*`, ...)
    pub extensions: IndexMap<String, Value>,
}

/// Server configuration: a literal URL or a structured server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerConfig {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        variables: IndexMap<String, ServerVariable>,
    },
}

impl ServerConfig {
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Detailed { url, .. } => url,
        }
    }

    /// Server object as written to the document
    pub fn to_server(&self) -> Server {
        match self {
            Self::Url(url) => Server {
                url: url.clone(),
                description: None,
                variables: IndexMap::new(),
            },
            Self::Detailed {
                url,
                description,
                variables,
            } => Server {
                url: url.clone(),
                description: description.clone(),
                variables: variables.clone(),
            },
        }
    }
}

impl From<&str> for ServerConfig {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<Server> for ServerConfig {
    fn from(server: Server) -> Self {
        Self::Detailed {
            url: server.url,
            description: server.description,
            variables: server.variables,
        }
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            info: ApiInfo {
                title: "API".to_string(),
                description: None,
                version: "1.0.0".to_string(),
                terms_of_service: None,
                contact: None,
                license: None,
            },
            servers: Vec::new(),
            security_schemes: IndexMap::new(),
            tags: Vec::new(),
            fallback_response_description: DEFAULT_FALLBACK_DESCRIPTION.to_string(),
            extensions: IndexMap::new(),
        }
    }
}

impl OpenApiConfig {
    /// Create a new configuration with custom API info
    pub fn new(title: &str, version: &str) -> Self {
        let mut config = Self::default();
        config.info.title = title.to_string();
        config.info.version = version.to_string();
        config
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> OpenApiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> OpenApiResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a document header
    pub fn validate(&self) -> OpenApiResult<()> {
        if self.info.title.trim().is_empty() {
            return Err(OpenApiError::config_error("info.title must not be empty"));
        }
        if self.info.version.trim().is_empty() {
            return Err(OpenApiError::config_error("info.version must not be empty"));
        }
        if !self.openapi_version.starts_with('3') {
            return Err(OpenApiError::config_error(format!(
                "unsupported OpenAPI version {}",
                self.openapi_version
            )));
        }
        Ok(())
    }

    /// Set the OpenAPI version string
    pub fn with_openapi_version(mut self, version: &str) -> Self {
        self.openapi_version = version.to_string();
        self
    }

    /// Set the API description
    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = Some(description.to_string());
        self
    }

    /// Add a server, given as a URL or a [`Server`]
    pub fn add_server(mut self, server: impl Into<ServerConfig>) -> Self {
        self.servers.push(server.into());
        self
    }

    /// Add a security scheme to pre-register
    pub fn add_security_scheme(mut self, name: &str, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.to_string(), scheme);
        self
    }

    /// Add a tag
    pub fn add_tag(mut self, name: &str, description: Option<&str>) -> Self {
        self.tags.push(Tag {
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            external_docs: None,
        });
        self
    }

    /// Set the description used when a status code is entirely unknown
    pub fn with_fallback_response_description(mut self, description: &str) -> Self {
        self.fallback_response_description = description.to_string();
        self
    }

    /// Add an extra top-level document key
    pub fn add_extension(mut self, key: &str, value: Value) -> Self {
        self.extensions.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = OpenApiConfig::default();
        assert_eq!(config.openapi_version, "3.1.0");
        assert_eq!(config.info.title, "API");
        assert_eq!(config.info.version, "1.0.0");
        assert_eq!(config.fallback_response_description, "Response");
        assert!(config.servers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = OpenApiConfig::new("Pets", "2.0.0")
            .with_description("Pet store")
            .add_server("https://api.example.com")
            .add_security_scheme("bearer", SecurityScheme::bearer(Some("JWT")))
            .add_tag("pets", Some("Pet operations"))
            .add_extension("x-internal", json!(false));

        assert_eq!(config.info.title, "Pets");
        assert_eq!(config.servers[0].url(), "https://api.example.com");
        assert!(config.security_schemes.contains_key("bearer"));
        assert_eq!(config.tags[0].name, "pets");
        assert_eq!(config.extensions["x-internal"], json!(false));
    }

    #[test]
    fn test_from_toml() {
        let config = OpenApiConfig::from_toml_str(
            r#"
            openapi_version = "3.0.3"
            fallback_response_description = "Something happened"
            servers = [
                "https://a.example.com",
                { url = "https://{region}.example.com", description = "Regional", variables = { region = { default = "eu" } } },
            ]

            [info]
            title = "Inventory"
            version = "0.3.0"

            [security_schemes.basic]
            type = "http"
            scheme = "basic"
            "#,
        )
        .unwrap();

        assert_eq!(config.openapi_version, "3.0.3");
        assert_eq!(config.info.title, "Inventory");
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers[0], ServerConfig::Url("https://a.example.com".to_string()));
        let regional = config.servers[1].to_server();
        assert_eq!(regional.description.as_deref(), Some("Regional"));
        assert_eq!(regional.variables["region"].default, "eu");
        assert_eq!(config.security_schemes["basic"], SecurityScheme::basic());
        assert_eq!(config.fallback_response_description, "Something happened");
    }

    #[test]
    fn test_from_json_rejects_empty_title() {
        let result = OpenApiConfig::from_json_str(r#"{ "info": { "title": " ", "version": "1" } }"#);
        assert!(matches!(result, Err(OpenApiError::Config(_))));
    }

    #[test]
    fn test_from_toml_reports_parse_errors() {
        let result = OpenApiConfig::from_toml_str("info = [");
        assert!(matches!(result, Err(OpenApiError::Toml(_))));
    }
}
