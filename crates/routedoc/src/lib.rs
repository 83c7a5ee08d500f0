/*!
# routedoc

OpenAPI 3.x document assembly from per-route documentation metadata.

Framework adapters turn their route tables into [`RouteRecord`]s and attach
documentation entries (request, response, operation and security facts) to
them. The builder folds those entries into a single [`Document`], resolving
value types into JSON Schema through a pluggable [`ResolverChain`] and
collecting reusable schemas in the document's [`ComponentRegistry`].

## Features

- Deterministic route processing order and multi-method path merging
- Ordered resolver chain with caller strategies ahead of built-in fallbacks
- `schemars` backed structural schemas registered as reusable components
- Media type and response description inference
- JSON and YAML export

## Usage

```rust
use routedoc::{build_spec, HttpMethod, OpenApiConfig, ResponseDocs, RouteRecord};

let routes = vec![
    RouteRecord::new(HttpMethod::Get, "/ping", "ping").document(ResponseDocs::new(200)),
];
let document = build_spec(routes, OpenApiConfig::new("Ping", "1.0.0"));
assert_eq!(
    document.to_value().unwrap()["paths"]["/ping"]["get"]["responses"]["200"]["description"],
    "OK"
);
```
*/

// Re-export main types
pub use crate::{
    config::{OpenApiConfig, ServerConfig},
    error::{OpenApiError, OpenApiResult},
    export::OutputFormat,
    generator::{build_spec, SpecBuilder},
    metadata::{
        Body, CookieParam, HeaderParam, HttpCode, HttpMethod, MetadataEntry, OperationDocs,
        QueryParam, RequestDocs, ResponseDocs, RouteRecord, SchemeRequirement, SecurityDocs,
        ValueType,
    },
    registry::ComponentRegistry,
    schema::{Resolution, ResolverChain, SchemaResolver, SchemaTarget},
    specification::{Document, Schema},
};

// Core modules
pub mod config;
pub mod error;
pub mod generator;
pub mod specification;

// Inputs and assembly
pub mod merge;
pub mod metadata;
pub mod registry;
pub mod schema;

// Defaults and helpers
pub mod descriptions;
pub mod path;

// Export functionality
pub mod export;

// Test utilities
#[cfg(test)]
mod test_utils;
