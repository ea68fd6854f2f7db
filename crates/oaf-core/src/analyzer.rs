use serde::{Deserialize, Serialize};

use crate::endpoint::{EndpointInfo, HttpMethod};
use crate::error::LoadError;

/// Response fields that conventionally carry a bearer token.
const TOKEN_FIELDS: &[&str] = &["token", "accessToken", "access_token"];

/// How a client obtains credentials for the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationFlow {
    pub operation_id: String,
    pub credential_fields: Vec<String>,
    pub token_field: String,
}

/// The spec-analysis collaborator that turns an OpenAPI document into
/// endpoint records.
pub trait SpecAnalyzer {
    fn extract_endpoints(&self) -> Vec<EndpointInfo>;

    fn authentication_flow(&self) -> Option<AuthenticationFlow> {
        detect_authentication_flow(&self.extract_endpoints())
    }
}

/// Whether a path looks like a login/token endpoint.
pub fn is_auth_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.contains("login") || lower.contains("auth")
}

/// Find the first `POST` endpoint whose path looks like a login endpoint.
pub fn detect_authentication_flow(endpoints: &[EndpointInfo]) -> Option<AuthenticationFlow> {
    let login = endpoints
        .iter()
        .find(|ep| ep.method == HttpMethod::Post && is_auth_path(&ep.path))?;

    let credential_fields = login
        .request_schema
        .as_ref()
        .map(|schema| schema.required().to_vec())
        .unwrap_or_default();

    let token_field = login
        .success_schema()
        .and_then(|schema| {
            TOKEN_FIELDS
                .iter()
                .find(|field| schema.properties().any(|(name, _)| name == **field))
        })
        .copied()
        .unwrap_or("token")
        .to_string();

    Some(AuthenticationFlow {
        operation_id: login.operation_name(),
        credential_fields,
        token_field,
    })
}

/// An in-memory endpoint list, typically the analyzer's serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointInfo>,
}

impl EndpointCatalog {
    pub fn new(endpoints: Vec<EndpointInfo>) -> Self {
        Self { endpoints }
    }

    /// Load a JSON array of endpoint records.
    pub fn from_json(input: &str) -> Result<Self, LoadError> {
        let catalog: Self = serde_json::from_str(input)?;
        log::debug!("loaded {} endpoints from JSON", catalog.endpoints.len());
        Ok(catalog)
    }

    /// Load a YAML sequence of endpoint records.
    pub fn from_yaml(input: &str) -> Result<Self, LoadError> {
        let catalog: Self = serde_yaml_ng::from_str(input)?;
        log::debug!("loaded {} endpoints from YAML", catalog.endpoints.len());
        Ok(catalog)
    }

    pub fn endpoints(&self) -> &[EndpointInfo] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl SpecAnalyzer for EndpointCatalog {
    fn extract_endpoints(&self) -> Vec<EndpointInfo> {
        self.endpoints.clone()
    }

    fn authentication_flow(&self) -> Option<AuthenticationFlow> {
        detect_authentication_flow(&self.endpoints)
    }
}
