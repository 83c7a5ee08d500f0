/*!
Route merge engine.

Folds the metadata entries attached to one route, in attachment order, into a
single [`Operation`]. Schemas are resolved through the [`ResolverChain`] and
any named shapes the chain discovers land in the shared
[`ComponentRegistry`].
*/

use crate::{
    descriptions::default_response_description,
    metadata::{
        Body, CookieParam, HeaderParam, MetadataEntry, OperationDocs, QueryParam, RequestDocs,
        ResponseDocs, RouteRecord, SecurityDocs,
    },
    registry::ComponentRegistry,
    schema::{ResolverChain, SchemaTarget},
    specification::{
        Example, Header, MediaType, Operation, Parameter, ParameterLocation, RequestBody,
        Responses, Schema, SecurityRequirement,
    },
};
use indexmap::IndexMap;
use serde_json::Value;

/// Builds operations for routes of one document
pub struct RouteMerger<'a> {
    chain: &'a ResolverChain,
    components: &'a mut ComponentRegistry,
    fallback_description: &'a str,
}

impl<'a> RouteMerger<'a> {
    pub fn new(
        chain: &'a ResolverChain,
        components: &'a mut ComponentRegistry,
        fallback_description: &'a str,
    ) -> Self {
        Self {
            chain,
            components,
            fallback_description,
        }
    }

    /// Build the operation for `route` from its own fields and its metadata
    pub fn merge(&mut self, route: &RouteRecord) -> Operation {
        let mut operation = Operation {
            summary: route.summary.clone(),
            description: route.description.clone(),
            tags: route.tags.clone(),
            parameters: route.parameters.clone(),
            ..Operation::default()
        };

        for entry in &route.metadata {
            match entry {
                MetadataEntry::Request(docs) => self.apply_request(&mut operation, docs),
                MetadataEntry::Response(docs) => {
                    let responses = operation.responses.get_or_insert_with(Responses::default);
                    self.apply_response(responses, docs);
                }
                MetadataEntry::OperationDocs(docs) => apply_operation_docs(&mut operation, docs),
                MetadataEntry::SecurityRequirement(docs) => {
                    operation.security = self.security_requirements(docs);
                }
            }
        }

        if operation.responses.as_ref().is_some_and(Responses::is_empty) {
            operation.responses = None;
        }
        operation
    }

    fn apply_request(&mut self, operation: &mut Operation, docs: &RequestDocs) {
        if docs.body.is_some() || docs.media_type.is_some() {
            let request_body = operation.request_body.get_or_insert_with(RequestBody::default);
            if let Some(description) = &docs.description {
                request_body.description = Some(description.clone());
            }
            if let Some(required) = docs.required {
                request_body.required = Some(required);
            }
            let body = docs.to_body();
            if let Some((media_type, content)) = self.content(
                body.as_ref(),
                docs.media_type.as_deref(),
                &docs.example,
                &docs.examples,
            ) {
                request_body.content.insert(media_type, content);
            }
        }

        for (name, param) in &docs.query_params {
            operation.parameters.push(self.query_parameter(name, param));
        }
        for (name, header) in &docs.headers {
            operation.parameters.push(self.header_parameter(name, header));
        }
        for (name, cookie) in &docs.cookies {
            operation.parameters.push(self.cookie_parameter(name, cookie));
        }
    }

    fn apply_response(&mut self, responses: &mut Responses, docs: &ResponseDocs) {
        let code = docs.http_code.as_str();

        let headers = docs
            .headers
            .iter()
            .map(|(name, header)| (name.clone(), self.response_header(name, header)))
            .collect::<IndexMap<_, _>>();
        let body = docs.to_body();
        let content = self.content(
            body.as_ref(),
            docs.media_type.as_deref(),
            &docs.example,
            &docs.examples,
        );

        let response = responses.entry(code);
        if !headers.is_empty() {
            response.headers = headers;
        }
        match &docs.description {
            Some(description) => response.description = Some(description.clone()),
            None if response.description.is_none() => {
                response.description =
                    Some(default_response_description(code, self.fallback_description));
            }
            None => {}
        }
        if let Some((media_type, content)) = content {
            response.content.insert(media_type, content);
        }
    }

    /// Media type entry for a body, or for a bare media type with no body.
    ///
    /// Returns `None` when neither was documented.
    fn content(
        &mut self,
        body: Option<&Body>,
        explicit_media_type: Option<&str>,
        example: &Option<Value>,
        examples: &IndexMap<String, Example>,
    ) -> Option<(String, MediaType)> {
        let (schema, media_type) = match (body, explicit_media_type) {
            (Some(body), explicit) => {
                let schema = self
                    .chain
                    .resolve_or_empty(&SchemaTarget::Body(body), self.components);
                let media_type = match explicit {
                    Some(media_type) => media_type.to_string(),
                    None => self.chain.media_type(body, &schema),
                };
                (schema, media_type)
            }
            (None, Some(media_type)) => (Schema::empty(), media_type.to_string()),
            (None, None) => return None,
        };

        Some((
            media_type,
            MediaType {
                schema: Some(schema),
                example: example.clone(),
                examples: examples.clone(),
            },
        ))
    }

    fn query_parameter(&mut self, name: &str, param: &QueryParam) -> Parameter {
        let schema = self
            .chain
            .resolve_or_empty(&SchemaTarget::Query { name, param }, self.components);
        Parameter {
            description: param.description.clone(),
            required: param.required,
            deprecated: param.deprecated,
            allow_empty_value: param.allow_empty_value,
            style: param.style,
            explode: param.explode,
            schema: Some(schema),
            example: param.example.clone(),
            examples: param.examples.clone(),
            ..Parameter::new(name, ParameterLocation::Query)
        }
    }

    fn header_parameter(&mut self, name: &str, header: &HeaderParam) -> Parameter {
        let schema = self
            .chain
            .resolve_or_empty(&SchemaTarget::Header { name, header }, self.components);
        Parameter {
            description: header.description.clone(),
            required: header.required,
            deprecated: header.deprecated,
            allow_empty_value: header.allow_empty_value,
            schema: Some(schema),
            example: header.example.clone(),
            examples: header.examples.clone(),
            ..Parameter::new(name, ParameterLocation::Header)
        }
    }

    fn cookie_parameter(&mut self, name: &str, cookie: &CookieParam) -> Parameter {
        let schema = self
            .chain
            .resolve_or_empty(&SchemaTarget::Cookie { name, cookie }, self.components);
        Parameter {
            description: cookie.description.clone(),
            required: cookie.required,
            deprecated: cookie.deprecated,
            allow_empty_value: cookie.allow_empty_value,
            schema: Some(schema),
            example: cookie.example.clone(),
            examples: cookie.examples.clone(),
            ..Parameter::new(name, ParameterLocation::Cookie)
        }
    }

    fn response_header(&mut self, name: &str, header: &HeaderParam) -> Header {
        let schema = self
            .chain
            .resolve_or_empty(&SchemaTarget::Header { name, header }, self.components);
        Header {
            schema: Some(schema),
            description: header.description.clone(),
            required: header.required,
            deprecated: header.deprecated,
            allow_empty_value: header.allow_empty_value,
            example: header.example.clone(),
            examples: header.examples.clone(),
        }
    }

    /// Requirement objects for `docs`, registering every referenced scheme.
    ///
    /// Each scheme becomes its own requirement object, so the schemes listed
    /// together are alternatives.
    fn security_requirements(&mut self, docs: &SecurityDocs) -> Vec<SecurityRequirement> {
        let Some(requirements) = &docs.requirements else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for requirement in requirements {
            for (name, required) in &requirement.schemes {
                if !self.components.register_security_scheme(name, &required.scheme) {
                    tracing::trace!("Security scheme '{}' already registered", name);
                }
                let mut object = SecurityRequirement::new();
                object.insert(name.clone(), required.scopes.clone());
                result.push(object);
            }
        }
        result
    }
}

fn apply_operation_docs(operation: &mut Operation, docs: &OperationDocs) {
    if let Some(summary) = &docs.summary {
        operation.summary = Some(summary.clone());
    }
    if let Some(description) = &docs.description {
        operation.description = Some(description.clone());
    }
    operation.tags.extend(docs.tags.iter().cloned());
    if let Some(external_docs) = &docs.external_docs {
        operation.external_docs = Some(external_docs.clone());
    }
    if let Some(operation_id) = &docs.operation_id {
        operation.operation_id = Some(operation_id.clone());
    }
    if let Some(deprecated) = docs.deprecated {
        operation.deprecated = Some(deprecated);
    }
}
