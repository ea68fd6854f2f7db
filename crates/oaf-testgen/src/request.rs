//! Request scaffolding shared by every generator.

use oaf_core::naming::is_path_param;
use oaf_core::{CaseCategory, EndpointInfo, GeneratedStep};

/// Variable bound by creation steps and substituted into later paths.
pub const RESOURCE_ID_VAR: &str = "resourceId";
/// Variable bound by the login step.
pub const AUTH_TOKEN_VAR: &str = "authToken";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Rewrite `{param}` segments into runtime interpolation tokens. The first
/// parameter always becomes `{{resourceId}}`; later ones keep their name.
///
/// `/users/{id}/posts/{postId}` → `/users/{{resourceId}}/posts/{{postId}}`
pub fn interpolate_path(path: &str) -> String {
    let mut first = true;
    path.split('/')
        .map(|segment| {
            if !is_path_param(segment) {
                return segment.to_string();
            }
            let name = if first {
                first = false;
                RESOURCE_ID_VAR
            } else {
                &segment[1..segment.len() - 1]
            };
            format!("{{{{{name}}}}}")
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `Bearer {{authToken}}`
pub fn bearer_token() -> String {
    format!("Bearer {{{{{AUTH_TOKEN_VAR}}}}}")
}

/// A step against `endpoint` with an interpolated path, carrying the bearer
/// header when the endpoint is secured.
pub fn step_for(
    endpoint: &EndpointInfo,
    name: impl Into<String>,
    category: CaseCategory,
    status: u16,
) -> GeneratedStep {
    let step = unauthenticated_step(endpoint, name, category, status);
    if endpoint.requires_auth() {
        step.with_header(AUTHORIZATION_HEADER, bearer_token())
    } else {
        step
    }
}

/// Like [`step_for`] but never attaches credentials.
pub fn unauthenticated_step(
    endpoint: &EndpointInfo,
    name: impl Into<String>,
    category: CaseCategory,
    status: u16,
) -> GeneratedStep {
    GeneratedStep::new(
        name,
        endpoint.operation_name(),
        category,
        endpoint.method,
        interpolate_path(&endpoint.path),
        status,
    )
}
