//! Negative cases: omitted required fields, constraint violations and
//! missing credentials.

use oaf_core::{CaseCategory, EndpointInfo, ErrorCaseConfig, GeneratedStep, StepGenerator};
use oaf_synth::{DataSynthesizer, invalid_value};
use serde_json::{Map, Value};

use crate::edge_cases::REJECTED_STATUS;
use crate::request::{step_for, unauthenticated_step};

pub const UNAUTHORIZED_STATUS: u16 = 401;

#[derive(Debug, Clone, Default)]
pub struct ErrorCaseGenerator {
    synthesizer: DataSynthesizer,
    config: ErrorCaseConfig,
}

impl ErrorCaseGenerator {
    pub fn new(synthesizer: DataSynthesizer, config: ErrorCaseConfig) -> Self {
        Self {
            synthesizer,
            config,
        }
    }

    pub fn config(&self) -> ErrorCaseConfig {
        self.config
    }

    /// One step per required field, each omitting exactly that field.
    pub fn generate_missing_field_cases(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        let Some(schema) = &endpoint.request_schema else {
            return Vec::new();
        };
        let required = schema.required();
        if required.is_empty() {
            return Vec::new();
        }

        let valid = self.valid_body(endpoint);
        let op = endpoint.operation_name();
        required
            .iter()
            .map(|field| {
                let mut body = valid.clone();
                body.shift_remove(field);
                step_for(
                    endpoint,
                    format!("{op}: missing required field {field}"),
                    CaseCategory::MissingField,
                    REJECTED_STATUS,
                )
                .with_body(Value::Object(body))
            })
            .collect()
    }

    /// One step per property with a constraint that can be violated. Fields
    /// that could only be given the wrong type are skipped.
    pub fn generate_invalid_format_cases(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        let Some(schema) = &endpoint.request_schema else {
            return Vec::new();
        };

        let valid = self.valid_body(endpoint);
        let op = endpoint.operation_name();
        schema
            .properties()
            .filter_map(|(field, prop)| {
                let invalid = invalid_value(prop);
                if invalid.is_placeholder() {
                    return None;
                }
                let mut body = valid.clone();
                body.insert(field.clone(), invalid.value);
                let step = step_for(
                    endpoint,
                    format!("{op}: invalid {field} ({})", invalid.violation.describe()),
                    CaseCategory::InvalidFormat,
                    REJECTED_STATUS,
                );
                Some(step.with_body(Value::Object(body)))
            })
            .collect()
    }

    /// A single credential-less request for secured endpoints, however many
    /// schemes they accept.
    pub fn generate_auth_error_cases(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        if !endpoint.requires_auth() {
            return Vec::new();
        }
        let op = endpoint.operation_name();
        vec![unauthenticated_step(
            endpoint,
            format!("{op}: missing authentication"),
            CaseCategory::AuthError,
            UNAUTHORIZED_STATUS,
        )]
    }

    fn valid_body(&self, endpoint: &EndpointInfo) -> Map<String, Value> {
        let Some(schema) = &endpoint.request_schema else {
            return Map::new();
        };
        match self.synthesizer.synthesize(schema, None) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl StepGenerator for ErrorCaseGenerator {
    /// The enabled families, in missing-field, invalid-format, auth order.
    fn generate(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        let mut steps = Vec::new();
        if self.config.include_missing_fields {
            steps.extend(self.generate_missing_field_cases(endpoint));
        }
        if self.config.include_invalid_formats {
            steps.extend(self.generate_invalid_format_cases(endpoint));
        }
        if self.config.include_auth_errors {
            steps.extend(self.generate_auth_error_cases(endpoint));
        }
        steps
    }
}
