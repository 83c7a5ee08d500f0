#[cfg(test)]
pub mod test_utils {
    use crate::{
        config::OpenApiConfig,
        metadata::{
            Body, HttpMethod, OperationDocs, RequestDocs, ResponseDocs, RouteRecord, SecurityDocs,
            ValueType,
        },
        specification::{Parameter, SecurityScheme, Server},
    };
    use indexmap::IndexMap;
    use schemars::JsonSchema;
    use serde_json::json;

    /// Account used as request and response body
    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct User {
        pub id: u64,
        pub name: String,
        pub email: Option<String>,
    }

    /// Self-referencing tree
    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct Node {
        pub label: String,
        pub children: Vec<Node>,
    }

    /// Wrap a value type as a body with nothing else documented
    pub fn body_of(value_type: ValueType) -> Body {
        Body {
            value_type,
            media_type: None,
            required: None,
            description: None,
            example: None,
            examples: IndexMap::new(),
        }
    }

    /// Create a test configuration
    #[allow(dead_code)]
    pub fn create_test_config() -> OpenApiConfig {
        OpenApiConfig::new("Test API", "1.0.0")
            .with_description("A test API for document assembly")
            .add_server(Server {
                url: "http://localhost:3000".to_string(),
                description: Some("Development server".to_string()),
                variables: IndexMap::new(),
            })
            .add_security_scheme("bearerAuth", SecurityScheme::bearer(Some("JWT")))
            .add_tag("Users", Some("User management operations"))
            .add_extension("x-audience", json!("internal"))
    }

    /// Routes of a small user service, deliberately out of order
    #[allow(dead_code)]
    pub fn sample_routes() -> Vec<RouteRecord> {
        vec![
            RouteRecord::new(HttpMethod::Delete, "/users/{id}", "delete_user")
                .with_parameter(Parameter::path("id"))
                .document(ResponseDocs::new(204))
                .document(SecurityDocs::single("bearerAuth", SecurityScheme::bearer(None))),
            RouteRecord::new(HttpMethod::Post, "/users", "create_user")
                .with_tag("Users")
                .document(RequestDocs::new().body(ValueType::of::<User>()).required(true))
                .document(ResponseDocs::new(201).body(ValueType::of::<User>())),
            RouteRecord::new(HttpMethod::Get, "/users/{id}", "get_user")
                .with_parameter(Parameter::path("id"))
                .document(OperationDocs::new().summary("Get user by ID").tag("Users"))
                .document(ResponseDocs::new(200).body(ValueType::of::<User>()))
                .document(ResponseDocs::new(404)),
            RouteRecord::new(HttpMethod::Get, "/ping", "ping").document(ResponseDocs::new(200)),
            RouteRecord::new(HttpMethod::Put, "/users/{id}", "replace_user")
                .with_parameter(Parameter::path("id"))
                .document(RequestDocs::new().body(ValueType::of::<User>()))
                .document(ResponseDocs::new(200).body(ValueType::of::<User>())),
        ]
    }
}
