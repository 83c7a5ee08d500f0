/*!
Schema resolution chain.

A value type is turned into a JSON Schema fragment by asking an ordered list
of resolvers. The first one that does not decline wins; nothing is merged.
Caller-supplied resolvers come first, the built-in fallbacks last:

1. [`BinaryBodyResolver`] - raw byte bodies get the empty schema
2. [`MediaTypeGuesser`] - only answers media type queries
3. [`StructuralSchemaResolver`] - `schemars` based translation of the type
*/

use crate::{
    error::{OpenApiError, OpenApiResult},
    metadata::{Body, CookieParam, HeaderParam, QueryParam, ValueType},
    registry::ComponentRegistry,
    specification::Schema,
};
use schemars::gen::SchemaSettings;

/// Media type used when nothing better is known
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Media type inferred for raw byte bodies
pub const BINARY_MEDIA_TYPE: &str = "application/octet-stream";

/// The thing a schema is being resolved for
#[derive(Debug, Clone, Copy)]
pub enum SchemaTarget<'a> {
    Body(&'a Body),
    Query { name: &'a str, param: &'a QueryParam },
    Header { name: &'a str, header: &'a HeaderParam },
    Cookie { name: &'a str, cookie: &'a CookieParam },
}

impl<'a> SchemaTarget<'a> {
    pub fn value_type(&self) -> &'a ValueType {
        match *self {
            Self::Body(body) => &body.value_type,
            Self::Query { param, .. } => &param.value_type,
            Self::Header { header, .. } => &header.value_type,
            Self::Cookie { cookie, .. } => &cookie.value_type,
        }
    }

    /// Parameter or header name; bodies have none
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Self::Body(_) => None,
            Self::Query { name, .. } | Self::Header { name, .. } | Self::Cookie { name, .. } => {
                Some(name)
            }
        }
    }
}

/// Outcome of asking one resolver
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Schema),
    Declined,
}

/// A strategy in the resolution chain.
///
/// Both methods default to "no opinion", so a resolver only implements the
/// queries it cares about. Returning `Err` from [`SchemaResolver::resolve`]
/// is treated as a decline by the chain.
pub trait SchemaResolver: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Translate the target's value type, registering any named sub-schemas
    /// in `registry` before returning.
    fn resolve(
        &self,
        _target: &SchemaTarget<'_>,
        _registry: &mut ComponentRegistry,
    ) -> OpenApiResult<Resolution> {
        Ok(Resolution::Declined)
    }

    /// Infer the media type of a body whose schema is already resolved
    fn media_type(&self, _body: &Body, _schema: &Schema) -> Option<String> {
        None
    }
}

/// Gives raw byte bodies the empty schema so they are not described as
/// arrays of integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryBodyResolver;

impl SchemaResolver for BinaryBodyResolver {
    fn name(&self) -> &str {
        "binary-body"
    }

    fn resolve(
        &self,
        target: &SchemaTarget<'_>,
        _registry: &mut ComponentRegistry,
    ) -> OpenApiResult<Resolution> {
        match target {
            SchemaTarget::Body(body) if body.value_type.is_binary() => {
                Ok(Resolution::Resolved(Schema::empty()))
            }
            _ => Ok(Resolution::Declined),
        }
    }
}

/// Octet-stream for schemaless byte bodies, JSON for everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaTypeGuesser;

impl SchemaResolver for MediaTypeGuesser {
    fn name(&self) -> &str {
        "media-type-guesser"
    }

    fn media_type(&self, body: &Body, schema: &Schema) -> Option<String> {
        if schema.is_empty() && body.value_type.is_binary() {
            Some(BINARY_MEDIA_TYPE.to_string())
        } else {
            Some(DEFAULT_MEDIA_TYPE.to_string())
        }
    }
}

/// JSON Schema dialect produced by [`StructuralSchemaResolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaDialect {
    /// JSON Schema 2019-09 style, as used by OpenAPI 3.1
    #[default]
    OpenApi31,
    /// OpenAPI 3.0 schema objects (`nullable` instead of null types)
    OpenApi30,
}

/// Generic structural generator backed by `schemars`.
///
/// Every definition the generator discovers is registered as a schema
/// component, so the returned fragment can point at it with `$ref`. Types
/// without a generator (see [`ValueType::opaque`]) are declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSchemaResolver {
    dialect: SchemaDialect,
}

impl StructuralSchemaResolver {
    pub fn new(dialect: SchemaDialect) -> Self {
        Self { dialect }
    }

    fn settings(&self) -> SchemaSettings {
        let mut settings = match self.dialect {
            SchemaDialect::OpenApi31 => SchemaSettings::draft2019_09(),
            SchemaDialect::OpenApi30 => SchemaSettings::openapi3(),
        };
        settings.definitions_path = "#/components/schemas/".to_string();
        settings.meta_schema = None;
        settings
    }
}

fn to_fragment(schema: &schemars::schema::Schema) -> OpenApiResult<Schema> {
    let value = serde_json::to_value(schema)?;
    Schema::from_value(value)
        .ok_or_else(|| OpenApiError::resolution_error("generator produced a non-object schema"))
}

impl SchemaResolver for StructuralSchemaResolver {
    fn name(&self) -> &str {
        "structural"
    }

    fn resolve(
        &self,
        target: &SchemaTarget<'_>,
        registry: &mut ComponentRegistry,
    ) -> OpenApiResult<Resolution> {
        let mut gen = self.settings().into_generator();
        let root = match target.value_type().generate(&mut gen) {
            Some(root) => root,
            None => return Ok(Resolution::Declined),
        };

        for (name, definition) in gen.take_definitions() {
            registry.register_schema(&name, to_fragment(&definition)?);
        }

        let mut schema = to_fragment(&root)?;
        if let SchemaTarget::Query { param, .. } = target {
            if let Some(default) = &param.default {
                schema.insert("default", default.clone());
            }
        }
        Ok(Resolution::Resolved(schema))
    }
}

/// Ordered list of resolvers consulted for every schema and media type
pub struct ResolverChain {
    resolvers: Vec<Box<dyn SchemaResolver>>,
    custom: usize,
}

impl ResolverChain {
    /// Chain with `custom` resolvers ahead of the built-in fallbacks
    pub fn new(custom: Vec<Box<dyn SchemaResolver>>) -> Self {
        Self::with_dialect(custom, SchemaDialect::default())
    }

    /// Like [`ResolverChain::new`], with the structural generator emitting `dialect`
    pub fn with_dialect(custom: Vec<Box<dyn SchemaResolver>>, dialect: SchemaDialect) -> Self {
        let custom_len = custom.len();
        let mut resolvers = custom;
        resolvers.push(Box::new(BinaryBodyResolver));
        resolvers.push(Box::new(MediaTypeGuesser));
        resolvers.push(Box::new(StructuralSchemaResolver::new(dialect)));
        Self {
            resolvers,
            custom: custom_len,
        }
    }

    /// Add a caller resolver after the ones already added, ahead of the built-ins
    pub fn push(&mut self, resolver: Box<dyn SchemaResolver>) {
        self.resolvers.insert(self.custom, resolver);
        self.custom += 1;
    }

    /// Dialect matching an `openapi` version string
    pub fn dialect_for(openapi_version: &str) -> SchemaDialect {
        if openapi_version.starts_with("3.0") {
            SchemaDialect::OpenApi30
        } else {
            SchemaDialect::OpenApi31
        }
    }

    /// Chain made of the built-in fallbacks only
    pub fn builtin() -> Self {
        Self::new(Vec::new())
    }

    /// Resolver names in consultation order
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    /// First schema produced by the chain, or `None` if every resolver declined
    pub fn resolve(
        &self,
        target: &SchemaTarget<'_>,
        registry: &mut ComponentRegistry,
    ) -> Option<Schema> {
        for resolver in &self.resolvers {
            match resolver.resolve(target, registry) {
                Ok(Resolution::Resolved(schema)) => return Some(schema),
                Ok(Resolution::Declined) => {
                    tracing::trace!(
                        "Resolver '{}' declined {}",
                        resolver.name(),
                        target.value_type().type_name()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Resolver '{}' failed on {}, treating as declined: {}",
                        resolver.name(),
                        target.value_type().type_name(),
                        e
                    );
                }
            }
        }
        None
    }

    /// Like [`ResolverChain::resolve`], substituting `{}` when nothing matched
    pub fn resolve_or_empty(
        &self,
        target: &SchemaTarget<'_>,
        registry: &mut ComponentRegistry,
    ) -> Schema {
        self.resolve(target, registry).unwrap_or_else(|| {
            tracing::debug!(
                "No resolver handled {}, using the empty schema",
                target.value_type().type_name()
            );
            Schema::empty()
        })
    }

    /// First media type any resolver infers for `body`
    pub fn media_type(&self, body: &Body, schema: &Schema) -> String {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.media_type(body, schema))
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string())
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{body_of, Node, User};
    use pretty_assertions::assert_eq;
    use schemars::JsonSchema;
    use serde_json::json;

    struct FixedResolver(Schema);

    impl SchemaResolver for FixedResolver {
        fn name(&self) -> &str {
            "fixed"
        }

        fn resolve(
            &self,
            _target: &SchemaTarget<'_>,
            _registry: &mut ComponentRegistry,
        ) -> OpenApiResult<Resolution> {
            Ok(Resolution::Resolved(self.0.clone()))
        }
    }

    struct FailingResolver;

    impl SchemaResolver for FailingResolver {
        fn resolve(
            &self,
            _target: &SchemaTarget<'_>,
            _registry: &mut ComponentRegistry,
        ) -> OpenApiResult<Resolution> {
            Err(OpenApiError::resolution_error("boom"))
        }

        fn media_type(&self, _body: &Body, _schema: &Schema) -> Option<String> {
            Some("text/plain".to_string())
        }
    }

    #[test]
    fn test_builtin_chain_order() {
        let chain = ResolverChain::new(vec![Box::new(FixedResolver(Schema::string()))]);
        assert_eq!(
            chain.names(),
            vec!["fixed", "binary-body", "media-type-guesser", "structural"]
        );
    }

    #[test]
    fn test_pushed_resolvers_keep_insertion_order() {
        let mut chain = ResolverChain::with_dialect(Vec::new(), SchemaDialect::OpenApi30);
        chain.push(Box::new(FixedResolver(Schema::string())));
        chain.push(Box::new(FailingResolver));
        let names = chain.names();
        assert_eq!(names[0], "fixed");
        assert!(names[1].ends_with("FailingResolver"));
        assert_eq!(&names[2..], ["binary-body", "media-type-guesser", "structural"]);
    }

    #[test]
    fn test_dialect_for_version() {
        assert_eq!(ResolverChain::dialect_for("3.0.3"), SchemaDialect::OpenApi30);
        assert_eq!(ResolverChain::dialect_for("3.1.0"), SchemaDialect::OpenApi31);
    }

    #[test]
    fn test_custom_resolver_takes_priority() {
        let chain = ResolverChain::new(vec![Box::new(FixedResolver(Schema::string()))]);
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::of::<User>());

        let schema = chain.resolve(&SchemaTarget::Body(&body), &mut registry);
        assert_eq!(schema, Some(Schema::string()));
        // The structural generator never ran
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failing_resolver_is_treated_as_decline() {
        let chain = ResolverChain::new(vec![Box::new(FailingResolver)]);
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::of::<i32>());

        let schema = chain.resolve(&SchemaTarget::Body(&body), &mut registry).unwrap();
        assert_eq!(schema.get("type"), Some(&json!("integer")));
    }

    #[test]
    fn test_unresolvable_type_yields_empty_schema() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::named("Mystery"));

        assert!(chain.resolve(&SchemaTarget::Body(&body), &mut registry).is_none());
        assert_eq!(
            chain.resolve_or_empty(&SchemaTarget::Body(&body), &mut registry),
            Schema::empty()
        );
    }

    #[test]
    fn test_binary_body_media_type() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::binary());

        let schema = chain.resolve_or_empty(&SchemaTarget::Body(&body), &mut registry);
        assert!(schema.is_empty());
        assert_eq!(chain.media_type(&body, &schema), BINARY_MEDIA_TYPE);
    }

    #[test]
    fn test_binary_query_param_is_not_special() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let param = QueryParam::new(ValueType::binary());

        let schema = chain.resolve_or_empty(
            &SchemaTarget::Query { name: "data", param: &param },
            &mut registry,
        );
        assert_eq!(schema.get("type"), Some(&json!("array")));
    }

    #[test]
    fn test_non_binary_body_media_type() {
        let chain = ResolverChain::builtin();
        let body = body_of(ValueType::of::<String>());
        assert_eq!(chain.media_type(&body, &Schema::empty()), DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_media_type_query_uses_first_answer() {
        let chain = ResolverChain::new(vec![Box::new(FailingResolver)]);
        let body = body_of(ValueType::binary());
        assert_eq!(chain.media_type(&body, &Schema::empty()), "text/plain");
    }

    #[test]
    fn test_structural_resolver_registers_definitions() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::of::<User>());

        let schema = chain.resolve_or_empty(&SchemaTarget::Body(&body), &mut registry);
        assert_eq!(schema, Schema::reference("User"));

        let user = registry.schema("User").unwrap();
        assert_eq!(user.get("type"), Some(&json!("object")));
        assert!(user.as_map()["properties"].get("name").is_some());
    }

    #[test]
    fn test_recursive_type_resolves_through_registry() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::of::<Node>());

        let schema = chain.resolve_or_empty(&SchemaTarget::Body(&body), &mut registry);
        assert_eq!(schema, Schema::reference("Node"));

        let node = registry.schema("Node").unwrap().clone().into_value();
        assert_eq!(
            node["properties"]["children"]["items"],
            json!({ "$ref": "#/components/schemas/Node" })
        );
    }

    #[test]
    fn test_query_default_is_written_into_schema() {
        let chain = ResolverChain::builtin();
        let mut registry = ComponentRegistry::new();
        let param = QueryParam::new(ValueType::of::<u32>()).with_default(20);

        let schema = chain.resolve_or_empty(
            &SchemaTarget::Query { name: "limit", param: &param },
            &mut registry,
        );
        assert_eq!(schema.get("default"), Some(&json!(20)));
        assert_eq!(schema.get("type"), Some(&json!("integer")));
    }

    #[test]
    fn test_openapi30_dialect_marks_nullable() {
        #[derive(JsonSchema)]
        #[allow(dead_code)]
        struct Maybe {
            note: Option<String>,
        }

        let resolver = StructuralSchemaResolver::new(SchemaDialect::OpenApi30);
        let mut registry = ComponentRegistry::new();
        let body = body_of(ValueType::of::<Maybe>());

        let resolution = resolver.resolve(&SchemaTarget::Body(&body), &mut registry).unwrap();
        assert_eq!(resolution, Resolution::Resolved(Schema::reference("Maybe")));
        let maybe = registry.schema("Maybe").unwrap().clone().into_value();
        assert_eq!(maybe["properties"]["note"]["nullable"], json!(true));
    }
}
