//! Path template normalization for framework adapters.

use crate::{
    error::{OpenApiError, OpenApiResult},
    specification::{Parameter, Schema},
};
use regex::Regex;
use serde_json::Value;

fn parameter_name() -> OpenApiResult<Regex> {
    Regex::new(r"^[^{}/:\s]+$").map_err(|e| {
        OpenApiError::path_template_error(format!("Failed to compile parameter name regex: {}", e))
    })
}

/// Split a route template into its OpenAPI path and its path parameters.
///
/// `{name}` and `{name:regex}` placeholders both become `{name}`; a regex
/// ends up as the `pattern` of the parameter's string schema. Braces inside a
/// regex (`{code:\d{3}}`) belong to the pattern.
///
/// ```
/// use routedoc::path::extract_path_parameters;
///
/// let (path, parameters) = extract_path_parameters("/users/{id:\\d+}/posts/{slug}").unwrap();
/// assert_eq!(path, "/users/{id}/posts/{slug}");
/// assert_eq!(parameters.len(), 2);
/// ```
pub fn extract_path_parameters(template: &str) -> OpenApiResult<(String, Vec<Parameter>)> {
    let name_regex = parameter_name()?;
    let mut normalized = String::with_capacity(template.len());
    let mut parameters: Vec<Parameter> = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (index, ch) in template.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = index + 1;
                }
                depth += 1;
            }
            '}' if depth == 0 => {
                return Err(OpenApiError::path_template_error(format!(
                    "unbalanced braces in '{}'",
                    template
                )));
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let inner = &template[start..index];
                    let parameter = placeholder_parameter(inner, &name_regex, template)?;
                    if parameters.iter().any(|existing| existing.name == parameter.name) {
                        return Err(OpenApiError::path_template_error(format!(
                            "parameter '{}' appears twice in '{}'",
                            parameter.name, template
                        )));
                    }
                    normalized.push('{');
                    normalized.push_str(&parameter.name);
                    normalized.push('}');
                    parameters.push(parameter);
                }
            }
            _ if depth == 0 => normalized.push(ch),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(OpenApiError::path_template_error(format!(
            "unbalanced braces in '{}'",
            template
        )));
    }

    Ok((normalized, parameters))
}

/// Path parameter for the text between one placeholder's outer braces
fn placeholder_parameter(
    inner: &str,
    name_regex: &Regex,
    template: &str,
) -> OpenApiResult<Parameter> {
    let (name, pattern) = match inner.split_once(':') {
        Some((name, pattern)) => (name.trim(), Some(pattern)),
        None => (inner.trim(), None),
    };
    if !name_regex.is_match(name) {
        return Err(OpenApiError::path_template_error(format!(
            "invalid parameter name '{}' in '{}'",
            name, template
        )));
    }

    let mut schema = Schema::string();
    if let Some(pattern) = pattern {
        schema.insert("pattern", Value::String(pattern.to_string()));
    }
    Ok(Parameter::path(name).with_schema(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::ParameterLocation;
    use serde_json::json;

    #[test]
    fn test_plain_placeholders() {
        let (path, parameters) = extract_path_parameters("/users/{id}").unwrap();
        assert_eq!(path, "/users/{id}");
        assert_eq!(parameters, vec![Parameter::path("id")]);
        assert_eq!(parameters[0].location, ParameterLocation::Path);
        assert_eq!(parameters[0].required, Some(true));
    }

    #[test]
    fn test_regex_placeholders() {
        let (path, parameters) =
            extract_path_parameters("/files/{name:[a-z]+}/{version:\\d+}").unwrap();
        assert_eq!(path, "/files/{name}/{version}");
        let schema = parameters[1].schema.as_ref().unwrap();
        assert_eq!(schema.get("pattern"), Some(&json!("\\d+")));
        assert_eq!(schema.get("type"), Some(&json!("string")));
    }

    #[test]
    fn test_regex_with_quantifier_braces() {
        let (path, parameters) = extract_path_parameters("/codes/{code:\\d{3}}/{slug}").unwrap();
        assert_eq!(path, "/codes/{code}/{slug}");
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "code");
        let schema = parameters[0].schema.as_ref().unwrap();
        assert_eq!(schema.get("pattern"), Some(&json!("\\d{3}")));
        assert_eq!(parameters[1].name, "slug");
    }

    #[test]
    fn test_static_path() {
        let (path, parameters) = extract_path_parameters("/health").unwrap();
        assert_eq!(path, "/health");
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_malformed_templates() {
        assert!(matches!(
            extract_path_parameters("/users/{id"),
            Err(OpenApiError::PathTemplate(_))
        ));
        assert!(matches!(
            extract_path_parameters("/a/{id}/b/{id}"),
            Err(OpenApiError::PathTemplate(_))
        ));
        assert!(matches!(
            extract_path_parameters("/users/id}"),
            Err(OpenApiError::PathTemplate(_))
        ));
        assert!(matches!(
            extract_path_parameters("/users/{:\\d+}"),
            Err(OpenApiError::PathTemplate(_))
        ));
        assert!(matches!(
            extract_path_parameters("/codes/{code:\\d{3}"),
            Err(OpenApiError::PathTemplate(_))
        ));
    }
}
