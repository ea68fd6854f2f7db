use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::HttpMethod;

/// Which family of test case a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseCategory {
    Success,
    EdgeCase,
    MissingField,
    InvalidFormat,
    AuthError,
}

/// The HTTP request a step issues. `path` carries `{{variable}}` tokens,
/// never raw `{param}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRequest {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// What the runtime should assert about the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepExpectation {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_fields: Vec<String>,
}

/// Extract `path` from the response body and bind it to `variable_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRule {
    pub variable_name: String,
    pub path: String,
}

/// One generated test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStep {
    pub name: String,
    pub operation_id: String,
    pub category: CaseCategory,
    pub request: StepRequest,
    pub expect: StepExpectation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capture: Vec<CaptureRule>,
}

impl GeneratedStep {
    pub fn new(
        name: impl Into<String>,
        operation_id: impl Into<String>,
        category: CaseCategory,
        method: HttpMethod,
        path: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            operation_id: operation_id.into(),
            category,
            request: StepRequest {
                method,
                path: path.into(),
                headers: IndexMap::new(),
                body: None,
            },
            expect: StepExpectation {
                status,
                body_fields: Vec::new(),
            },
            capture: Vec::new(),
        }
    }

    /// Attach a JSON body and the matching `Content-Type` header.
    pub fn with_body(mut self, body: Value) -> Self {
        self.request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.request.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_capture(mut self, variable_name: impl Into<String>, path: impl Into<String>) -> Self {
        self.capture.push(CaptureRule {
            variable_name: variable_name.into(),
            path: path.into(),
        });
        self
    }

    pub fn with_body_fields(mut self, fields: Vec<String>) -> Self {
        self.expect.body_fields = fields;
        self
    }

    /// The request body as an object, if it is one.
    pub fn body_object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.request.body.as_ref().and_then(Value::as_object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub endpoints: Vec<String>,
    pub total_tests: usize,
}

/// The generated flow handed to the execution runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<GeneratedStep>,
    pub summary: FlowSummary,
}

impl FlowDocument {
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Steps of a single category, in flow order.
    pub fn steps_in(&self, category: CaseCategory) -> impl Iterator<Item = &GeneratedStep> {
        self.steps.iter().filter(move |s| s.category == category)
    }
}
