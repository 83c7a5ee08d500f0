/*!
Route records and the documentation metadata attached to their handlers.

Everything here is produced outside the builder (by annotations, framework
adapters or hand-written code) and is read-only input to a build.
*/

use crate::{
    error::OpenApiError,
    specification::{Example, ExternalDocumentation, Parameter, ParameterStyle, SecurityScheme},
};
use indexmap::IndexMap;
use schemars::{gen::SchemaGenerator, JsonSchema};
use serde_json::Value;
use std::{any::TypeId, borrow::Cow, fmt, str::FromStr};

/// HTTP method of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Connect,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// All methods in processing order
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Connect,
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Position of the method in processing order
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used for path item keys
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = OpenApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpenApiError::generic(format!("Unsupported HTTP method: {}", s)))
    }
}

type SubschemaFn = fn(&mut SchemaGenerator) -> schemars::schema::Schema;

fn subschema<T: ?Sized + JsonSchema>(gen: &mut SchemaGenerator) -> schemars::schema::Schema {
    gen.subschema_for::<T>()
}

fn is_binary_type(id: TypeId) -> bool {
    id == TypeId::of::<Vec<u8>>()
        || id == TypeId::of::<[u8]>()
        || id == TypeId::of::<Box<[u8]>>()
        || id == TypeId::of::<&'static [u8]>()
}

/// Opaque descriptor of a value's declared type.
///
/// The builder never looks inside; it only hands the descriptor to the
/// resolver chain. Resolvers inspect it through [`ValueType::is`],
/// [`ValueType::type_name`] and [`ValueType::is_binary`].
#[derive(Clone)]
pub struct ValueType {
    type_id: Option<TypeId>,
    type_name: Cow<'static, str>,
    binary: bool,
    generator: Option<SubschemaFn>,
}

impl ValueType {
    /// Descriptor for a type the structural generator can translate
    pub fn of<T: ?Sized + JsonSchema + 'static>() -> Self {
        Self {
            generator: Some(subschema::<T>),
            ..Self::opaque::<T>()
        }
    }

    /// Descriptor carrying only the identity of `T`
    pub fn opaque<T: ?Sized + 'static>() -> Self {
        let type_id = TypeId::of::<T>();
        Self {
            type_id: Some(type_id),
            type_name: Cow::Borrowed(std::any::type_name::<T>()),
            binary: is_binary_type(type_id),
            generator: None,
        }
    }

    /// Descriptor for a name with no Rust type behind it
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_id: None,
            type_name: name.into(),
            binary: false,
            generator: None,
        }
    }

    /// Raw bytes
    pub fn binary() -> Self {
        Self::of::<Vec<u8>>()
    }

    /// Mark a wrapper type as carrying raw bytes
    pub fn treated_as_binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }

    /// Whether the value is a raw byte payload
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Run the attached schema generator, if the descriptor has one
    pub fn generate(&self, gen: &mut SchemaGenerator) -> Option<schemars::schema::Schema> {
        self.generator.map(|generate| generate(gen))
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueType")
            .field("type_name", &self.type_name)
            .field("binary", &self.binary)
            .field("translatable", &self.generator.is_some())
            .finish()
    }
}

/// Opaque identity of the handler a route dispatches to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef(Cow<'static, str>);

impl HandlerRef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized route as produced by a framework adapter
#[derive(Debug, Clone)]
pub struct RouteRecord {
    /// Path template, e.g. `/users/{id}`
    pub path: String,
    pub method: HttpMethod,
    pub handler: HandlerRef,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Pre-built parameters, usually the path parameters of the template
    pub parameters: Vec<Parameter>,
    /// Documentation facts attached to the handler, in attachment order
    pub metadata: Vec<MetadataEntry>,
}

impl RouteRecord {
    pub fn new(method: HttpMethod, path: &str, handler: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.to_string(),
            method,
            handler: HandlerRef::new(handler),
            summary: None,
            description: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Attach a documentation entry after the ones already attached
    pub fn document(mut self, entry: impl Into<MetadataEntry>) -> Self {
        self.metadata.push(entry.into());
        self
    }
}

/// One documentation fact attached to a handler
#[derive(Debug, Clone)]
pub enum MetadataEntry {
    Request(RequestDocs),
    Response(ResponseDocs),
    OperationDocs(OperationDocs),
    SecurityRequirement(SecurityDocs),
}

impl From<RequestDocs> for MetadataEntry {
    fn from(docs: RequestDocs) -> Self {
        Self::Request(docs)
    }
}

impl From<ResponseDocs> for MetadataEntry {
    fn from(docs: ResponseDocs) -> Self {
        Self::Response(docs)
    }
}

impl From<OperationDocs> for MetadataEntry {
    fn from(docs: OperationDocs) -> Self {
        Self::OperationDocs(docs)
    }
}

impl From<SecurityDocs> for MetadataEntry {
    fn from(docs: SecurityDocs) -> Self {
        Self::SecurityRequirement(docs)
    }
}

/// A request or response body as seen by the resolver chain
#[derive(Debug, Clone)]
pub struct Body {
    pub value_type: ValueType,
    pub media_type: Option<String>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
}

/// Query string parameter
#[derive(Debug, Clone)]
pub struct QueryParam {
    pub value_type: ValueType,
    /// Written into the schema's `default` keyword
    pub default: Option<Value>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub style: Option<ParameterStyle>,
    pub explode: Option<bool>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
}

impl QueryParam {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            default: None,
            required: None,
            description: None,
            deprecated: None,
            allow_empty_value: None,
            style: None,
            explode: None,
            example: None,
            examples: IndexMap::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_style(mut self, style: ParameterStyle, explode: bool) -> Self {
        self.style = Some(style);
        self.explode = Some(explode);
        self
    }

    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

impl Default for QueryParam {
    fn default() -> Self {
        Self::new(ValueType::of::<String>())
    }
}

impl From<ValueType> for QueryParam {
    fn from(value_type: ValueType) -> Self {
        Self::new(value_type)
    }
}

/// Request or response header
#[derive(Debug, Clone)]
pub struct HeaderParam {
    pub value_type: ValueType,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
}

impl HeaderParam {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            example: None,
            examples: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

impl Default for HeaderParam {
    fn default() -> Self {
        Self::new(ValueType::of::<String>())
    }
}

impl From<&str> for HeaderParam {
    fn from(description: &str) -> Self {
        Self::default().with_description(description)
    }
}

/// Cookie parameter
#[derive(Debug, Clone)]
pub struct CookieParam {
    pub value_type: ValueType,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
}

impl CookieParam {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            example: None,
            examples: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

impl Default for CookieParam {
    fn default() -> Self {
        Self::new(ValueType::of::<String>())
    }
}

impl From<&str> for CookieParam {
    fn from(description: &str) -> Self {
        Self::default().with_description(description)
    }
}

/// Request documentation: body plus query, header and cookie parameters
#[derive(Debug, Clone, Default)]
pub struct RequestDocs {
    pub body: Option<ValueType>,
    pub media_type: Option<String>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
    pub query_params: IndexMap<String, QueryParam>,
    pub headers: IndexMap<String, HeaderParam>,
    pub cookies: IndexMap<String, CookieParam>,
}

impl RequestDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, value_type: ValueType) -> Self {
        self.body = Some(value_type);
        self
    }

    pub fn media_type(mut self, media_type: &str) -> Self {
        self.media_type = Some(media_type.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn named_example(mut self, name: &str, example: Example) -> Self {
        self.examples.insert(name.to_string(), example);
        self
    }

    pub fn query(mut self, name: &str, param: impl Into<QueryParam>) -> Self {
        self.query_params.insert(name.to_string(), param.into());
        self
    }

    pub fn header(mut self, name: &str, header: impl Into<HeaderParam>) -> Self {
        self.headers.insert(name.to_string(), header.into());
        self
    }

    pub fn cookie(mut self, name: &str, cookie: impl Into<CookieParam>) -> Self {
        self.cookies.insert(name.to_string(), cookie.into());
        self
    }

    /// The body as a resolver target, when a body type was declared
    pub fn to_body(&self) -> Option<Body> {
        self.body.as_ref().map(|value_type| Body {
            value_type: value_type.clone(),
            media_type: self.media_type.clone(),
            required: self.required,
            description: self.description.clone(),
            example: self.example.clone(),
            examples: self.examples.clone(),
        })
    }
}

/// HTTP status code key, or the literal `default`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpCode(String);

impl HttpCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u16> for HttpCode {
    fn from(code: u16) -> Self {
        Self(code.to_string())
    }
}

impl From<&str> for HttpCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for HttpCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for HttpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response documentation for one status code
#[derive(Debug, Clone)]
pub struct ResponseDocs {
    pub http_code: HttpCode,
    pub body: Option<ValueType>,
    pub media_type: Option<String>,
    pub description: Option<String>,
    pub headers: IndexMap<String, HeaderParam>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
}

impl ResponseDocs {
    pub fn new(http_code: impl Into<HttpCode>) -> Self {
        Self {
            http_code: http_code.into(),
            body: None,
            media_type: None,
            description: None,
            headers: IndexMap::new(),
            example: None,
            examples: IndexMap::new(),
        }
    }

    pub fn body(mut self, value_type: ValueType) -> Self {
        self.body = Some(value_type);
        self
    }

    pub fn media_type(mut self, media_type: &str) -> Self {
        self.media_type = Some(media_type.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn header(mut self, name: &str, header: impl Into<HeaderParam>) -> Self {
        self.headers.insert(name.to_string(), header.into());
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn named_example(mut self, name: &str, example: Example) -> Self {
        self.examples.insert(name.to_string(), example);
        self
    }

    /// The body as a resolver target; response bodies are always required
    pub fn to_body(&self) -> Option<Body> {
        self.body.as_ref().map(|value_type| Body {
            value_type: value_type.clone(),
            media_type: self.media_type.clone(),
            required: Some(true),
            description: self.description.clone(),
            example: self.example.clone(),
            examples: self.examples.clone(),
        })
    }
}

impl Default for ResponseDocs {
    fn default() -> Self {
        Self::new(200)
    }
}

/// Operation-level documentation
#[derive(Debug, Clone, Default)]
pub struct OperationDocs {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub external_docs: Option<ExternalDocumentation>,
    pub operation_id: Option<String>,
    pub deprecated: Option<bool>,
}

impl OperationDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn external_docs(mut self, docs: impl Into<ExternalDocumentation>) -> Self {
        self.external_docs = Some(docs.into());
        self
    }

    pub fn operation_id(mut self, operation_id: &str) -> Self {
        self.operation_id = Some(operation_id.to_string());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = Some(deprecated);
        self
    }
}

/// A security scheme referenced by a requirement, with its required scopes
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredScheme {
    pub scheme: SecurityScheme,
    pub scopes: Vec<String>,
}

/// Schemes documented together; each one becomes an alternative requirement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeRequirement {
    pub schemes: IndexMap<String, RequiredScheme>,
}

impl SchemeRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(self, name: &str, scheme: SecurityScheme) -> Self {
        self.scheme_with_scopes(name, scheme, &[])
    }

    pub fn scheme_with_scopes(mut self, name: &str, scheme: SecurityScheme, scopes: &[&str]) -> Self {
        self.schemes.insert(
            name.to_string(),
            RequiredScheme {
                scheme,
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }
}

/// Security documentation; `None` clears whatever was set before
#[derive(Debug, Clone, Default)]
pub struct SecurityDocs {
    pub requirements: Option<Vec<SchemeRequirement>>,
}

impl SecurityDocs {
    pub fn new(requirements: Vec<SchemeRequirement>) -> Self {
        Self {
            requirements: Some(requirements),
        }
    }

    /// Security documentation requiring a single scheme
    pub fn single(name: &str, scheme: SecurityScheme) -> Self {
        Self::new(vec![SchemeRequirement::new().scheme(name, scheme)])
    }

    pub fn cleared() -> Self {
        Self { requirements: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_order_and_parsing() {
        assert!(HttpMethod::Connect.rank() < HttpMethod::Get.rank());
        assert!(HttpMethod::Delete.rank() < HttpMethod::Head.rank());
        assert_eq!(HttpMethod::Trace.rank(), 8);

        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("BREW".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn test_value_type_identity() {
        let value_type = ValueType::of::<String>();
        assert!(value_type.is::<String>());
        assert!(!value_type.is::<i32>());
        assert!(!value_type.is_binary());

        let named = ValueType::named("Upload");
        assert_eq!(named.type_name(), "Upload");
        assert!(!named.is::<String>());
    }

    #[test]
    fn test_binary_value_types() {
        assert!(ValueType::binary().is_binary());
        assert!(ValueType::of::<Vec<u8>>().is_binary());
        assert!(ValueType::opaque::<[u8]>().is_binary());
        assert!(ValueType::opaque::<Box<[u8]>>().is_binary());
        assert!(!ValueType::of::<Vec<u16>>().is_binary());

        struct Payload;
        assert!(ValueType::opaque::<Payload>().treated_as_binary().is_binary());
    }

    #[test]
    fn test_route_record_builder() {
        let route = RouteRecord::new(HttpMethod::Get, "/users/{id}", "get_user")
            .with_summary("Get user")
            .with_tag("users")
            .with_parameter(Parameter::path("id"))
            .document(ResponseDocs::new(200).description("The user"))
            .document(OperationDocs::new().deprecated(true));

        assert_eq!(route.handler.name(), "get_user");
        assert_eq!(route.parameters.len(), 1);
        assert!(matches!(route.metadata[0], MetadataEntry::Response(_)));
        assert!(matches!(route.metadata[1], MetadataEntry::OperationDocs(_)));
    }

    #[test]
    fn test_response_body_is_required() {
        let docs = ResponseDocs::new("201").body(ValueType::of::<String>());
        let body = docs.to_body().unwrap();
        assert_eq!(body.required, Some(true));
        assert_eq!(docs.http_code.as_str(), "201");
    }
}
