use crate::{
    config::OpenApiConfig,
    merge::RouteMerger,
    metadata::RouteRecord,
    schema::{ResolverChain, SchemaResolver},
    specification::Document,
};

/// Top-level keys the document produces itself
const RESERVED_KEYS: [&str; 6] = ["openapi", "info", "servers", "paths", "components", "tags"];

/// Main document builder.
///
/// Routes are processed sorted by path, then by method in the order
/// `connect, get, post, put, patch, delete, head, options, trace`, so the
/// output does not depend on the order routes were registered in.
pub struct SpecBuilder {
    /// Configuration
    config: OpenApiConfig,
    /// Resolution chain shared by every route
    chain: ResolverChain,
    /// Document under construction
    document: Option<Document>,
}

impl SpecBuilder {
    /// Create a new builder
    pub fn new(config: OpenApiConfig) -> Self {
        let dialect = ResolverChain::dialect_for(&config.openapi_version);
        Self {
            chain: ResolverChain::with_dialect(Vec::new(), dialect),
            document: None,
            config,
        }
    }

    /// Consult `resolver` before the built-in resolvers and any resolver added later
    pub fn with_resolver(mut self, resolver: impl SchemaResolver + 'static) -> Self {
        self.chain.push(Box::new(resolver));
        self
    }

    /// Merge into an existing document instead of a fresh one.
    ///
    /// Configuration values are not applied to a reused document.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Resolver names in consultation order
    pub fn resolvers(&self) -> Vec<&str> {
        self.chain.names()
    }

    /// Merge a batch of routes into the document
    pub fn feed_routes(&mut self, routes: impl IntoIterator<Item = RouteRecord>) {
        let mut routes: Vec<RouteRecord> = routes.into_iter().collect();
        routes.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.rank().cmp(&b.method.rank()))
        });

        if self.document.is_none() {
            self.document = Some(self.create_document());
        }
        let Some(document) = self.document.as_mut() else {
            return;
        };

        for route in &routes {
            tracing::debug!(
                "Processing route {} {} ({})",
                route.method,
                route.path,
                route.handler
            );

            let operation = RouteMerger::new(
                &self.chain,
                &mut document.components,
                &self.config.fallback_response_description,
            )
            .merge(route);

            let path_item = document.paths.entry(route.path.clone()).or_default();
            if path_item.set_operation(route.method, operation).is_some() {
                tracing::warn!(
                    "Operation {} {} documented twice; keeping the later one",
                    route.method,
                    route.path
                );
            }
        }
    }

    /// Document built so far, if any routes have been fed
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Hand over the finished document
    pub fn finish(self) -> Document {
        match self.document {
            Some(document) => document,
            None => self.create_document(),
        }
    }

    /// Build a document from `routes` in one step
    pub fn build(mut self, routes: impl IntoIterator<Item = RouteRecord>) -> Document {
        self.feed_routes(routes);
        self.finish()
    }

    /// Fresh document carrying everything the configuration declares
    fn create_document(&self) -> Document {
        let config = &self.config;
        let mut document = Document::new(&config.info.title, &config.info.version);
        document.openapi = config.openapi_version.clone();
        document.info = config.info.clone();
        document.servers = config.servers.iter().map(|server| server.to_server()).collect();
        document.tags = config.tags.clone();

        for (name, scheme) in &config.security_schemes {
            document.components.set_security_scheme(name, scheme.clone());
        }

        for (key, value) in &config.extensions {
            if RESERVED_KEYS.contains(&key.as_str()) {
                tracing::warn!("Ignoring extension key '{}': produced by the document", key);
                continue;
            }
            document.extensions.entry(key.clone()).or_insert_with(|| value.clone());
        }

        document
    }
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new(OpenApiConfig::default())
    }
}

/// Build a document from `routes` with the built-in resolvers only
pub fn build_spec(routes: impl IntoIterator<Item = RouteRecord>, config: OpenApiConfig) -> Document {
    SpecBuilder::new(config).build(routes)
}
