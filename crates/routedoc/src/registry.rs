//! Document-scoped component registry.

use crate::specification::{Header, Parameter, Schema, SecurityScheme};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Document-scoped table of reusable components.
///
/// Serialized as the document's `components` object. Resolvers receive it by
/// mutable reference and register the named shapes they discover. Schema,
/// header and parameter names are plain map keys: registering a name twice
/// keeps the first position and the last definition. Security schemes
/// referenced from operations are only added when the name is still free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentRegistry {
    /// Reusable schemas
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub schemas: IndexMap<String, Schema>,

    /// Reusable headers
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub headers: IndexMap<String, Header>,

    /// Reusable parameters
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub parameters: IndexMap<String, Parameter>,

    /// Security schemes
    #[serde(rename = "securitySchemes", skip_serializing_if = "IndexMap::is_empty", default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.headers.is_empty()
            && self.parameters.is_empty()
            && self.security_schemes.is_empty()
    }

    /// Register a schema under `name`, replacing any previous definition
    pub fn register_schema(&mut self, name: &str, schema: Schema) -> Option<Schema> {
        let previous = self.schemas.insert(name.to_string(), schema);
        match &previous {
            Some(old) if Some(old) != self.schemas.get(name) => {
                tracing::warn!("Schema component '{}' redefined; keeping the latest definition", name);
            }
            Some(_) => {}
            None => tracing::debug!("Registered schema component '{}'", name),
        }
        previous
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn contains_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Register a header under `name`, replacing any previous definition.
    ///
    /// The built-in resolvers never call this; it is for caller resolvers
    /// that publish shared headers.
    pub fn register_header(&mut self, name: &str, header: Header) -> Option<Header> {
        tracing::debug!("Registered header component '{}'", name);
        self.headers.insert(name.to_string(), header)
    }

    /// Register a parameter under `name`, replacing any previous definition.
    ///
    /// Like [`register_header`](Self::register_header), only caller resolvers use it.
    pub fn register_parameter(&mut self, name: &str, parameter: Parameter) -> Option<Parameter> {
        tracing::debug!("Registered parameter component '{}'", name);
        self.parameters.insert(name.to_string(), parameter)
    }

    /// Set a security scheme unconditionally
    pub fn set_security_scheme(&mut self, name: &str, scheme: SecurityScheme) {
        self.security_schemes.insert(name.to_string(), scheme);
    }

    /// Add a security scheme unless one with the same name exists.
    ///
    /// Returns whether the scheme was added.
    pub fn register_security_scheme(&mut self, name: &str, scheme: &SecurityScheme) -> bool {
        if self.security_schemes.contains_key(name) {
            return false;
        }
        tracing::debug!("Registered security scheme '{}'", name);
        self.security_schemes.insert(name.to_string(), scheme.clone());
        true
    }
}
