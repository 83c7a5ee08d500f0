use crate::{metadata::HttpMethod, registry::ComponentRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OpenAPI version emitted when the configuration does not say otherwise
pub const DEFAULT_OPENAPI_VERSION: &str = "3.1.0";

/// Complete OpenAPI 3.x document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI specification version
    pub openapi: String,

    /// API metadata
    pub info: ApiInfo,

    /// Server URLs
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub servers: Vec<Server>,

    /// API paths and operations, keyed by the original path template
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components shared by the whole document
    #[serde(skip_serializing_if = "ComponentRegistry::is_empty", default)]
    pub components: ComponentRegistry,

    /// Tags for grouping operations
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<Tag>,

    /// Additional top-level keys (`externalDocs`, `x-*` extensions, ...)
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// API metadata information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    /// API title
    pub title: String,

    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Terms of service URL
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,

    /// Contact information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// API version
    pub version: String,
}

/// Contact information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Server entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,

    /// Server description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Variable substitutions for server URL
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub variables: IndexMap<String, ServerVariable>,
}

/// Server URL variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Default value
    pub default: String,

    /// Allowed values
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Path item holding one slot per HTTP method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathItem {
    /// Optional summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// CONNECT operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<Operation>,

    /// GET operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    /// PUT operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    /// POST operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    /// DELETE operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    /// OPTIONS operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    /// HEAD operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    /// PATCH operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    /// TRACE operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    /// Common parameters for all operations on this path
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Connect => &mut self.connect,
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Trace => &mut self.trace,
        }
    }

    /// Operation stored for `method`, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Connect => self.connect.as_ref(),
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Store `operation` under `method`, returning the one it replaced
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    /// Methods that currently hold an operation, in canonical order
    pub fn methods(&self) -> Vec<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(|method| self.operation(*method).is_some())
            .collect()
    }
}

/// HTTP operation (GET, POST, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Operation {
    /// Tags for grouping
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,

    /// Short summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// External documentation
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    /// Unique operation ID
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Parameters
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,

    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    /// Possible responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,

    /// Deprecated flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Security requirements
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<SecurityRequirement>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// Parameter serialization style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    Matrix,
    Label,
    Simple,
    Form,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

/// Parameter for operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Parameter location (query, header, path, cookie)
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Deprecated flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Allow sending an empty value
    #[serde(rename = "allowEmptyValue", skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    /// Serialization style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    /// Explode arrays/objects into separate parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    /// Schema defining the parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Named examples
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub examples: IndexMap<String, Example>,
}

impl Parameter {
    /// Create a parameter with only a name and a location
    pub fn new(name: &str, location: ParameterLocation) -> Self {
        Self {
            name: name.to_string(),
            location,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            style: None,
            explode: None,
            schema: None,
            example: None,
            examples: IndexMap::new(),
        }
    }

    /// Create a required `path` parameter with a string schema
    pub fn path(name: &str) -> Self {
        Self {
            required: Some(true),
            schema: Some(Schema::string()),
            ..Self::new(name, ParameterLocation::Path)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Request body specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Media type content
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub content: IndexMap<String, MediaType>,

    /// Required flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Responses of one operation.
///
/// Status codes are serialized as sibling keys of `default` rather than
/// under a nested `codes` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Responses {
    /// Response used for codes not listed explicitly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Response>,

    /// Responses keyed by status code (`"200"`, `"4XX"`, ...)
    #[serde(flatten)]
    pub codes: IndexMap<String, Response>,
}

impl Responses {
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.codes.is_empty()
    }

    /// Response for `code`, with the literal `default` mapped to the default slot
    pub fn get(&self, code: &str) -> Option<&Response> {
        if code == "default" {
            self.default.as_ref()
        } else {
            self.codes.get(code)
        }
    }

    /// Response for `code`, created empty on first access
    pub fn entry(&mut self, code: &str) -> &mut Response {
        if code == "default" {
            self.default.get_or_insert_with(Response::default)
        } else {
            self.codes.entry(code.to_string()).or_default()
        }
    }
}

/// Response specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Response {
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Headers
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub headers: IndexMap<String, Header>,

    /// Content
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub content: IndexMap<String, MediaType>,
}

/// Header specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(rename = "allowEmptyValue", skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub examples: IndexMap<String, Example>,
}

/// Media type specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaType {
    /// Schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Multiple examples
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub examples: IndexMap<String, Example>,
}

/// Example specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "externalValue", skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl Example {
    /// Example carrying only a value
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }
}

/// A JSON Schema fragment.
///
/// Kept as a raw JSON object so whatever the resolvers produce passes through
/// untouched. `{}` is the empty, type-blind schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Map<String, Value>);

impl Schema {
    /// The empty schema `{}`
    pub fn empty() -> Self {
        Self::default()
    }

    /// `{"type": "string"}`
    pub fn string() -> Self {
        let mut schema = Self::empty();
        schema.insert("type", Value::String("string".to_string()));
        schema
    }

    /// `$ref` to a named schema under `#/components/schemas/`
    pub fn reference(name: &str) -> Self {
        let mut schema = Self::empty();
        schema.insert(
            "$ref",
            Value::String(format!("#/components/schemas/{}", name)),
        );
        schema
    }

    /// Interpret a JSON value as a schema.
    ///
    /// `true` is the same as `{}`; `false` becomes `{"not": {}}`. Any other
    /// non-object value is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            Value::Bool(true) => Some(Self::empty()),
            Value::Bool(false) => {
                let mut schema = Self::empty();
                schema.insert("not", Value::Object(Map::new()));
                Some(schema)
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Schema {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Location of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// Security scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "http")]
    Http {
        scheme: String,
        #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "mutualTLS")]
    MutualTls {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: OAuth2Flows,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "openIdConnect")]
    OpenIdConnect {
        #[serde(rename = "openIdConnectUrl")]
        open_id_connect_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SecurityScheme {
    /// HTTP basic authentication
    pub fn basic() -> Self {
        Self::Http {
            scheme: "basic".to_string(),
            bearer_format: None,
            description: None,
        }
    }

    /// HTTP bearer authentication with an optional token format hint
    pub fn bearer(format: Option<&str>) -> Self {
        Self::Http {
            scheme: "bearer".to_string(),
            bearer_format: format.map(str::to_string),
            description: None,
        }
    }

    /// API key carried in a header, query string or cookie
    pub fn api_key(name: &str, location: ApiKeyLocation) -> Self {
        Self::ApiKey {
            name: name.to_string(),
            location,
            description: None,
        }
    }
}

/// OAuth2 flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OAuth2Flows {
    #[serde(rename = "implicit", skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuth2Flow>,
    #[serde(rename = "password", skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuth2Flow>,
    #[serde(rename = "clientCredentials", skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuth2Flow>,
    #[serde(rename = "authorizationCode", skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuth2Flow>,
}

/// OAuth2 flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Flow {
    #[serde(rename = "authorizationUrl", skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(rename = "tokenUrl", skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(rename = "refreshUrl", skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

/// Security requirement: scheme name to required scopes
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Tag for grouping operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
}

/// External documentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExternalDocumentation {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl From<&str> for ExternalDocumentation {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl Document {
    /// Create an empty document
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: ApiInfo {
                title: title.to_string(),
                description: None,
                terms_of_service: None,
                contact: None,
                license: None,
                version: version.to_string(),
            },
            servers: Vec::new(),
            paths: IndexMap::new(),
            components: ComponentRegistry::new(),
            tags: Vec::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Operation documented for `path` and `method`
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_responses_flatten_status_codes() {
        let mut responses = Responses::default();
        responses.entry("200").description = Some("OK".to_string());
        responses.entry("default").description = Some("Unexpected".to_string());

        let value = serde_json::to_value(&responses).unwrap();
        assert_eq!(
            value,
            json!({
                "default": { "description": "Unexpected" },
                "200": { "description": "OK" }
            })
        );
        assert!(value.get("codes").is_none());
    }

    #[test]
    fn test_responses_entry_is_created_once() {
        let mut responses = Responses::default();
        responses.entry("404").description = Some("Missing".to_string());
        responses.entry("404").headers.insert("X-Trace".to_string(), Header::default());

        assert_eq!(responses.codes.len(), 1);
        let response = responses.get("404").unwrap();
        assert_eq!(response.description.as_deref(), Some("Missing"));
        assert!(response.headers.contains_key("X-Trace"));
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let operation = Operation {
            parameters: vec![Parameter::new("q", ParameterLocation::Query)],
            ..Default::default()
        };

        let value = serde_json::to_value(&operation).unwrap();
        assert_eq!(value, json!({ "parameters": [{ "name": "q", "in": "query" }] }));
    }

    #[test]
    fn test_empty_schema_is_still_emitted() {
        let parameter = Parameter::new("blob", ParameterLocation::Header).with_schema(Schema::empty());
        let value = serde_json::to_value(&parameter).unwrap();
        assert_eq!(value["schema"], json!({}));
    }

    #[test]
    fn test_path_item_method_slots() {
        let mut item = PathItem::default();
        assert!(item.set_operation(HttpMethod::Post, Operation::default()).is_none());
        assert!(item.set_operation(HttpMethod::Get, Operation::default()).is_none());
        assert!(item.set_operation(HttpMethod::Get, Operation::default()).is_some());

        assert_eq!(item.methods(), vec![HttpMethod::Get, HttpMethod::Post]);
    }

    #[test]
    fn test_schema_from_value() {
        assert_eq!(Schema::from_value(json!(true)), Some(Schema::empty()));
        assert_eq!(
            Schema::from_value(json!(false)).unwrap().into_value(),
            json!({ "not": {} })
        );
        assert!(Schema::from_value(json!("string")).is_none());
        assert_eq!(
            Schema::reference("User").into_value(),
            json!({ "$ref": "#/components/schemas/User" })
        );
    }

    #[test]
    fn test_security_scheme_serialization() {
        let value = serde_json::to_value(SecurityScheme::bearer(Some("JWT"))).unwrap();
        assert_eq!(
            value,
            json!({ "type": "http", "scheme": "bearer", "bearerFormat": "JWT" })
        );

        let value =
            serde_json::to_value(SecurityScheme::api_key("X-Api-Key", ApiKeyLocation::Header))
                .unwrap();
        assert_eq!(
            value,
            json!({ "type": "apiKey", "name": "X-Api-Key", "in": "header" })
        );
    }
}
