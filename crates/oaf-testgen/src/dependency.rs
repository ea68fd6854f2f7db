//! Cross-endpoint dependencies inferred from path conventions, and the
//! happy-path step sequence built from them.

use indexmap::IndexMap;
use oaf_core::analyzer::is_auth_path;
use oaf_core::{AuthenticationFlow, CaseCategory, EndpointInfo, GeneratedStep, HttpMethod};
use oaf_synth::DataSynthesizer;
use serde::Serialize;

use crate::request::{AUTH_TOKEN_VAR, RESOURCE_ID_VAR, step_for};
use crate::verbs::{VerbTable, step_name, verb_table};

/// Resource type for paths with no literal segment.
pub const UNKNOWN_RESOURCE: &str = "unknown";

/// Happy-path method order within one resource.
const METHOD_PRECEDENCE: [HttpMethod; 5] = [
    HttpMethod::Post,
    HttpMethod::Get,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
];

/// The first non-parameter segment of a path.
/// e.g. "/users/{id}/posts" → "users", "/{id}" → "unknown"
pub fn resource_type(path: &str) -> String {
    path.split('/')
        .find(|s| !s.is_empty() && !oaf_core::naming::is_path_param(s))
        .unwrap_or(UNKNOWN_RESOURCE)
        .to_string()
}

/// A resource-creation endpoint: `POST` on a path without parameters.
pub fn is_creation(endpoint: &EndpointInfo) -> bool {
    endpoint.method == HttpMethod::Post && !endpoint.has_path_params()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Requires,
    Modifies,
    Deletes,
}

impl EdgeType {
    fn for_method(method: HttpMethod) -> Option<Self> {
        match method {
            HttpMethod::Get => Some(EdgeType::Requires),
            HttpMethod::Put | HttpMethod::Patch => Some(EdgeType::Modifies),
            HttpMethod::Delete => Some(EdgeType::Deletes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub operation_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub resource_type: String,
}

/// `from` creates the resource that `to` operates on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Literal name of the first path parameter of `to`.
    pub variable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Edges leaving `operation_id`.
    pub fn dependents_of<'a>(&'a self, operation_id: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.edges.iter().filter(move |e| e.from == operation_id)
    }
}

/// Build the dependency graph. Edges only leave creation endpoints and
/// only reach parameterized endpoints of the same resource type.
pub fn analyze_dependencies(endpoints: &[EndpointInfo]) -> DependencyGraph {
    let nodes: Vec<DependencyNode> = endpoints
        .iter()
        .map(|ep| DependencyNode {
            operation_id: ep.operation_name(),
            method: ep.method,
            path: ep.path.clone(),
            resource_type: resource_type(&ep.path),
        })
        .collect();

    let mut edges = Vec::new();
    for (i, creator) in endpoints.iter().enumerate() {
        if !is_creation(creator) {
            continue;
        }
        for (j, target) in endpoints.iter().enumerate() {
            if i == j || nodes[i].resource_type != nodes[j].resource_type {
                continue;
            }
            let Some(variable) = target.path_params().first().map(|p| p.to_string()) else {
                continue;
            };
            let Some(edge_type) = EdgeType::for_method(target.method) else {
                log::debug!("no dependency edge for {}", target.route());
                continue;
            };
            edges.push(DependencyEdge {
                from: nodes[i].operation_id.clone(),
                to: nodes[j].operation_id.clone(),
                edge_type,
                variable,
            });
        }
    }

    DependencyGraph { nodes, edges }
}

/// Orders endpoints into a create-then-use happy path.
pub struct DependencyResolver {
    synthesizer: DataSynthesizer,
    verbs: &'static dyn VerbTable,
    auth_flow: Option<AuthenticationFlow>,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new(DataSynthesizer::default())
    }
}

impl DependencyResolver {
    /// Step names use the synthesizer's locale.
    pub fn new(synthesizer: DataSynthesizer) -> Self {
        let verbs = verb_table(synthesizer.locale());
        Self {
            synthesizer,
            verbs,
            auth_flow: None,
        }
    }

    pub fn with_verbs(mut self, verbs: &'static dyn VerbTable) -> Self {
        self.verbs = verbs;
        self
    }

    /// Treat `flow.operation_id` as the login step and capture its token
    /// from `flow.token_field`.
    pub fn with_authentication_flow(mut self, flow: Option<AuthenticationFlow>) -> Self {
        self.auth_flow = flow;
        self
    }

    /// Group endpoints by resource type in first-seen order and emit each
    /// group in method precedence. Groups without a creation endpoint emit
    /// nothing.
    pub fn resolve_execution_order(&self, endpoints: &[EndpointInfo]) -> Vec<GeneratedStep> {
        let mut groups: IndexMap<String, Vec<&EndpointInfo>> = IndexMap::new();
        for ep in endpoints {
            groups.entry(resource_type(&ep.path)).or_default().push(ep);
        }

        let mut rng = self.synthesizer.rng();
        let mut steps = Vec::new();

        for (resource, members) in &groups {
            if !members.iter().any(|ep| is_creation(ep)) {
                log::debug!("skipping resource `{resource}`: no creation endpoint");
                continue;
            }

            for ep in members {
                if !METHOD_PRECEDENCE.contains(&ep.method) {
                    log::debug!("skipping {} in happy path", ep.route());
                }
            }

            for method in METHOD_PRECEDENCE {
                for ep in members.iter().filter(|ep| ep.method == method) {
                    steps.push(self.build_step(ep, &mut rng));
                }
            }
        }

        steps
    }

    fn build_step(&self, endpoint: &EndpointInfo, rng: &mut impl rand::Rng) -> GeneratedStep {
        let name = step_name(endpoint, self.verbs);
        let mut step = step_for(endpoint, name, CaseCategory::Success, endpoint.success_status());

        if let Some(schema) = &endpoint.request_schema {
            let body = self.synthesizer.synthesize_with(rng, schema, None, None);
            step = step.with_body(body);
        }

        if is_creation(endpoint) {
            step = match self.login_token_field(endpoint) {
                Some(token_field) => step.with_capture(AUTH_TOKEN_VAR, token_field),
                None => step.with_capture(RESOURCE_ID_VAR, "id"),
            };
        }

        let fields: Vec<String> = endpoint
            .success_schema()
            .map(|schema| schema.properties().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();
        step.with_body_fields(fields)
    }

    /// The response field holding the token when `endpoint` logs in.
    fn login_token_field(&self, endpoint: &EndpointInfo) -> Option<String> {
        if let Some(flow) = &self.auth_flow {
            if flow.operation_id == endpoint.operation_name() {
                return Some(flow.token_field.clone());
            }
        }
        is_auth_path(&endpoint.path).then(|| "token".to_string())
    }
}

/// [`DependencyResolver::resolve_execution_order`] with default options.
pub fn resolve_execution_order(endpoints: &[EndpointInfo]) -> Vec<GeneratedStep> {
    DependencyResolver::default().resolve_execution_order(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaf_core::JsonSchema;
    use oaf_core::schema::StringSchema;
    use serde_json::json;

    use crate::request::AUTHORIZATION_HEADER;

    fn ep(method: HttpMethod, path: &str, op: &str) -> EndpointInfo {
        EndpointInfo::new(method, path).with_operation_id(op)
    }

    fn resolver() -> DependencyResolver {
        DependencyResolver::new(DataSynthesizer::seeded(7))
    }

    #[test]
    fn test_resource_type() {
        assert_eq!(resource_type("/users"), "users");
        assert_eq!(resource_type("/users/{id}"), "users");
        assert_eq!(resource_type("/{tenant}/orders/{id}"), "orders");
        assert_eq!(resource_type("/"), UNKNOWN_RESOURCE);
        assert_eq!(resource_type("/{id}"), UNKNOWN_RESOURCE);
        assert_eq!(resource_type(""), UNKNOWN_RESOURCE);
    }

    #[test]
    fn test_resource_type_is_idempotent() {
        for path in ["/users/{id}", "/auth/login", "/{a}/{b}", "//logs//"] {
            assert_eq!(resource_type(path), resource_type(path));
        }
    }

    #[test]
    fn test_analyze_dependencies_edges() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/users", "createUser"),
            ep(HttpMethod::Get, "/users", "listUsers"),
            ep(HttpMethod::Get, "/users/{userId}", "getUser"),
            ep(HttpMethod::Patch, "/users/{userId}", "patchUser"),
            ep(HttpMethod::Delete, "/users/{userId}", "deleteUser"),
            ep(HttpMethod::Get, "/posts/{id}", "getPost"),
        ];
        let graph = analyze_dependencies(&endpoints);

        assert_eq!(graph.nodes.len(), 6);
        assert_eq!(graph.nodes[5].resource_type, "posts");

        let edges: Vec<(&str, EdgeType, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.to.as_str(), e.edge_type, e.variable.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("getUser", EdgeType::Requires, "userId"),
                ("patchUser", EdgeType::Modifies, "userId"),
                ("deleteUser", EdgeType::Deletes, "userId"),
            ]
        );
        assert!(graph.edges.iter().all(|e| e.from == "createUser"));
        assert_eq!(graph.dependents_of("getPost").count(), 0);
    }

    #[test]
    fn test_no_edges_without_creation() {
        let endpoints = vec![
            ep(HttpMethod::Get, "/logs/{id}", "getLog"),
            ep(HttpMethod::Post, "/logs/{id}/archive", "archiveLog"),
        ];
        assert!(analyze_dependencies(&endpoints).edges.is_empty());
    }

    #[test]
    fn test_graph_serializes_edge_type() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/users", "createUser"),
            ep(HttpMethod::Put, "/users/{id}", "updateUser"),
        ];
        let value = serde_json::to_value(analyze_dependencies(&endpoints)).unwrap();
        assert_eq!(value["edges"][0]["type"], json!("modifies"));
        assert_eq!(value["nodes"][0]["resourceType"], json!("users"));
    }

    #[test]
    fn test_two_step_flow() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/users", "createUser"),
            ep(HttpMethod::Get, "/users/{id}", "getUser"),
        ];
        let steps = resolver().resolve_execution_order(&endpoints);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].request.method, HttpMethod::Post);
        assert_eq!(steps[0].capture[0].variable_name, RESOURCE_ID_VAR);
        assert_eq!(steps[0].capture[0].path, "id");
        assert_eq!(steps[1].request.method, HttpMethod::Get);
        assert_eq!(steps[1].request.path, "/users/{{resourceId}}");
        assert!(steps[1].capture.is_empty());
    }

    #[test]
    fn test_method_precedence() {
        let endpoints = vec![
            ep(HttpMethod::Delete, "/items/{id}", "deleteItem"),
            ep(HttpMethod::Patch, "/items/{id}", "patchItem"),
            ep(HttpMethod::Head, "/items", "headItems"),
            ep(HttpMethod::Get, "/items/{id}", "getItem"),
            ep(HttpMethod::Put, "/items/{id}", "putItem"),
            ep(HttpMethod::Post, "/items", "createItem"),
        ];
        let ops: Vec<String> = resolver()
            .resolve_execution_order(&endpoints)
            .into_iter()
            .map(|s| s.operation_id)
            .collect();
        assert_eq!(ops, ["createItem", "getItem", "putItem", "patchItem", "deleteItem"]);
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let endpoints = vec![
            ep(HttpMethod::Get, "/posts/{id}", "getPost"),
            ep(HttpMethod::Post, "/users", "createUser"),
            ep(HttpMethod::Post, "/posts", "createPost"),
        ];
        let ops: Vec<String> = resolver()
            .resolve_execution_order(&endpoints)
            .into_iter()
            .map(|s| s.operation_id)
            .collect();
        assert_eq!(ops, ["createPost", "getPost", "createUser"]);
    }

    #[test]
    fn test_read_only_resource_has_no_steps() {
        let endpoints = vec![ep(HttpMethod::Get, "/logs/{id}", "getLog")];
        assert!(resolver().resolve_execution_order(&endpoints).is_empty());
    }

    #[test]
    fn test_login_captures_auth_token() {
        let endpoints = vec![ep(HttpMethod::Post, "/auth/login", "login")];
        let steps = resolver().resolve_execution_order(&endpoints);
        assert_eq!(steps[0].capture[0].variable_name, AUTH_TOKEN_VAR);
        assert_eq!(steps[0].capture[0].path, "token");
    }

    #[test]
    fn test_authentication_flow_overrides_capture() {
        let endpoints = vec![ep(HttpMethod::Post, "/sessions", "openSession")];
        let flow = AuthenticationFlow {
            operation_id: "openSession".into(),
            credential_fields: vec!["username".into()],
            token_field: "data.accessToken".into(),
        };
        let steps = resolver()
            .with_authentication_flow(Some(flow))
            .resolve_execution_order(&endpoints);
        assert_eq!(steps[0].capture[0].variable_name, AUTH_TOKEN_VAR);
        assert_eq!(steps[0].capture[0].path, "data.accessToken");
    }

    #[test]
    fn test_bodies_and_headers() {
        let body = JsonSchema::object([("title", JsonSchema::string(StringSchema::default()))], &["title"]);
        let endpoints = vec![
            ep(HttpMethod::Post, "/notes", "createNote")
                .with_request_schema(body.clone())
                .with_security("bearerAuth"),
            ep(HttpMethod::Put, "/notes/{id}", "updateNote").with_request_schema(body),
            ep(HttpMethod::Delete, "/notes/{id}", "deleteNote"),
        ];
        let steps = resolver().resolve_execution_order(&endpoints);

        assert!(steps[0].body_object().unwrap().contains_key("title"));
        assert_eq!(steps[0].request.headers[AUTHORIZATION_HEADER], "Bearer {{authToken}}");
        assert_eq!(steps[0].request.headers["Content-Type"], "application/json");

        assert!(steps[1].body_object().unwrap().contains_key("title"));
        assert!(!steps[1].request.headers.contains_key(AUTHORIZATION_HEADER));

        assert!(steps[2].request.body.is_none());
        assert_eq!(steps[2].expect.status, 204);
    }

    #[test]
    fn test_naming_and_status() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/users", "createUser").with_summary("建立使用者"),
            ep(HttpMethod::Get, "/users/{id}", "getUser").with_summary("取得使用者"),
        ];
        let steps = resolver().resolve_execution_order(&endpoints);
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["建立使用者", "取得使用者"]);
        assert_eq!(steps[0].expect.status, 201);
        assert_eq!(steps[1].expect.status, 200);
    }

    #[test]
    fn test_declared_success_status_wins() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/jobs", "createJob")
                .with_response("400", None)
                .with_response("202", None),
        ];
        let steps = resolver().resolve_execution_order(&endpoints);
        assert_eq!(steps[0].expect.status, 202);
    }

    #[test]
    fn test_verb_table_override() {
        let endpoints = vec![
            ep(HttpMethod::Post, "/users", "createUser"),
            ep(HttpMethod::Delete, "/users/{id}", "deleteUser").with_summary("Remove a user"),
        ];
        let zh: Vec<String> = resolver()
            .resolve_execution_order(&endpoints)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(zh, ["建立 createUser", "刪除 Remove a user"]);

        let en: Vec<String> = resolver()
            .with_verbs(&crate::verbs::EnVerbs)
            .resolve_execution_order(&endpoints)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(en, ["Create createUser", "Remove a user"]);
    }
}
