use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::naming::{is_path_param, route_to_name};
use crate::schema::JsonSchema;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "options")]
    Options,
    #[serde(alias = "head")]
    Head,
    #[serde(alias = "trace")]
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            "TRACE" => Ok(HttpMethod::Trace),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// A path/query/header/cookie parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonSchema>,
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// One (method, path) operation, as reported by the spec analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    pub method: HttpMethod,

    pub path: String,

    #[serde(default)]
    pub operation_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<JsonSchema>,

    /// Status code → response body schema (`None` for an empty body).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Option<JsonSchema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterInfo>,
}

impl EndpointInfo {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: String::new(),
            summary: None,
            description: None,
            tags: Vec::new(),
            request_schema: None,
            responses: IndexMap::new(),
            security: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = operation_id.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_request_schema(mut self, schema: JsonSchema) -> Self {
        self.request_schema = Some(schema);
        self
    }

    pub fn with_response(mut self, status: impl Into<String>, schema: Option<JsonSchema>) -> Self {
        self.responses.insert(status.into(), schema);
        self
    }

    pub fn with_security(mut self, scheme: impl Into<String>) -> Self {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(scheme.into(), Vec::new());
        self.security.push(requirement);
        self
    }

    /// The operationId, or a route-derived name when the analyzer left it empty.
    pub fn operation_name(&self) -> String {
        if self.operation_id.is_empty() {
            route_to_name(self.method.as_str(), &self.path)
        } else {
            self.operation_id.clone()
        }
    }

    /// `"METHOD /path"`, used in log lines and allow-lists.
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Names of the `{param}` segments of the path, in order.
    pub fn path_params(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter(|seg| is_path_param(seg))
            .map(|seg| &seg[1..seg.len() - 1])
            .collect()
    }

    pub fn has_path_params(&self) -> bool {
        !self.path_params().is_empty()
    }

    pub fn requires_auth(&self) -> bool {
        !self.security.is_empty()
    }

    /// The smallest declared 2xx status, falling back to the method's
    /// conventional success status.
    pub fn success_status(&self) -> u16 {
        self.success_response()
            .map(|(status, _)| status)
            .unwrap_or_else(|| match self.method {
                HttpMethod::Post => 201,
                HttpMethod::Delete => 204,
                _ => 200,
            })
    }

    /// Body schema of the smallest declared 2xx response, if any.
    pub fn success_schema(&self) -> Option<&JsonSchema> {
        self.success_response().and_then(|(_, schema)| schema)
    }

    fn success_response(&self) -> Option<(u16, Option<&JsonSchema>)> {
        self.responses
            .iter()
            .filter_map(|(status, schema)| {
                let code = status.trim().parse::<u16>().ok()?;
                (200..300)
                    .contains(&code)
                    .then_some((code, schema.as_ref()))
            })
            .min_by_key(|(code, _)| *code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let ep = EndpointInfo::new(HttpMethod::Get, "/users/{userId}/posts/{postId}");
        assert_eq!(ep.path_params(), vec!["userId", "postId"]);
        assert!(ep.has_path_params());
        assert!(!EndpointInfo::new(HttpMethod::Post, "/users").has_path_params());
    }

    #[test]
    fn test_success_status_prefers_smallest_2xx() {
        let ep = EndpointInfo::new(HttpMethod::Post, "/users")
            .with_response("400", None)
            .with_response("202", None)
            .with_response("200", None);
        assert_eq!(ep.success_status(), 200);
    }

    #[test]
    fn test_success_status_fallbacks() {
        assert_eq!(EndpointInfo::new(HttpMethod::Post, "/a").success_status(), 201);
        assert_eq!(EndpointInfo::new(HttpMethod::Get, "/a").success_status(), 200);
        assert_eq!(EndpointInfo::new(HttpMethod::Put, "/a").success_status(), 200);
        assert_eq!(EndpointInfo::new(HttpMethod::Patch, "/a").success_status(), 200);
        assert_eq!(EndpointInfo::new(HttpMethod::Delete, "/a").success_status(), 204);

        let only_errors = EndpointInfo::new(HttpMethod::Delete, "/a").with_response("default", None);
        assert_eq!(only_errors.success_status(), 204);
    }

    #[test]
    fn test_operation_name_fallback() {
        let named = EndpointInfo::new(HttpMethod::Get, "/users").with_operation_id("listAll");
        assert_eq!(named.operation_name(), "listAll");

        let unnamed = EndpointInfo::new(HttpMethod::Get, "/users/{id}");
        assert_eq!(unnamed.operation_name(), "getUser");
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }
}
