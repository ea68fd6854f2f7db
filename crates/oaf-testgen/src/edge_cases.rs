//! Boundary values for constrained request fields.

use oaf_core::schema::{NumberSchema, SchemaKind, StringSchema};
use oaf_core::{CaseCategory, EndpointInfo, GeneratedStep, StepGenerator};
use oaf_synth::{DataSynthesizer, MAX_STRING_LEN, effective_bounds, number_value};
use rand::Rng;
use serde_json::{Map, Value};

use crate::request::step_for;

/// Status expected when a boundary value falls outside the schema.
pub const REJECTED_STATUS: u16 = 400;

/// Emits one step per boundary of every constrained top-level property of
/// the request body. Each step starts from the same synthesized body and
/// overrides only the targeted property.
#[derive(Debug, Clone, Default)]
pub struct EdgeCaseGenerator {
    synthesizer: DataSynthesizer,
}

impl EdgeCaseGenerator {
    pub fn new(synthesizer: DataSynthesizer) -> Self {
        Self { synthesizer }
    }

    pub fn generate_edge_cases(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        let Some(schema) = &endpoint.request_schema else {
            return Vec::new();
        };
        let Some(object) = schema.as_object() else {
            return Vec::new();
        };

        let mut rng = self.synthesizer.rng();
        let base = match self.synthesizer.synthesize_with(&mut rng, schema, None, None) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut boundaries = Vec::new();
        for (field, prop) in &object.properties {
            match &prop.kind {
                SchemaKind::String(s) => self.string_boundaries(&mut rng, field, s, &mut boundaries),
                SchemaKind::Integer(n) => number_boundaries(field, n, true, &mut boundaries),
                SchemaKind::Number(n) => number_boundaries(field, n, false, &mut boundaries),
                _ => {}
            }
        }

        let op = endpoint.operation_name();
        boundaries
            .into_iter()
            .map(|boundary| {
                let status = if boundary.rejected {
                    REJECTED_STATUS
                } else {
                    endpoint.success_status()
                };
                let mut body = base.clone();
                body.insert(boundary.field, boundary.value);
                step_for(endpoint, format!("{op}: {}", boundary.label), CaseCategory::EdgeCase, status)
                    .with_body(Value::Object(body))
            })
            .collect()
    }

    fn string_boundaries<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        field: &str,
        s: &StringSchema,
        out: &mut Vec<Boundary>,
    ) {
        let mut push = |len: usize, label: String, rejected: bool| {
            if len > MAX_STRING_LEN {
                log::warn!("skipping `{field}` boundary of length {len}");
                return;
            }
            let value = if rejected {
                self.synthesizer.string_of_length(rng, s, Some(field), len)
            } else {
                self.synthesizer
                    .string_within(rng, s, Some(field), Some(len), Some(len))
            };
            out.push(Boundary {
                field: field.to_string(),
                value: Value::String(value),
                label,
                rejected,
            });
        };

        if let Some(max) = s.max_length {
            push(max, format!("{field} at maximum length ({max})"), false);
            if let Some(over) = max.checked_add(1) {
                push(over, format!("{field} exceeds maximum length ({over})"), true);
            }
        }
        if let Some(min) = s.min_length {
            push(min, format!("{field} at minimum length ({min})"), false);
        }
    }
}

impl StepGenerator for EdgeCaseGenerator {
    fn generate(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep> {
        self.generate_edge_cases(endpoint)
    }
}

struct Boundary {
    field: String,
    value: Value,
    label: String,
    rejected: bool,
}

fn number_boundaries(field: &str, n: &NumberSchema, integer: bool, out: &mut Vec<Boundary>) {
    let (lower, upper) = effective_bounds(n, integer);
    let mut at_value = |bound: f64, which: &str| {
        let value = number_value(bound, integer);
        out.push(Boundary {
            field: field.to_string(),
            label: format!("{field} at {which} ({value})"),
            value,
            rejected: false,
        });
    };

    if let Some(min) = lower {
        at_value(min, "minimum");
    }
    if let Some(max) = upper {
        at_value(max, "maximum");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaf_core::{HttpMethod, JsonSchema};
    use serde_json::json;

    fn endpoint(body: Value) -> EndpointInfo {
        EndpointInfo::new(HttpMethod::Post, "/users")
            .with_operation_id("createUser")
            .with_request_schema(serde_json::from_value::<JsonSchema>(body).unwrap())
    }

    fn generator() -> EdgeCaseGenerator {
        EdgeCaseGenerator::new(DataSynthesizer::seeded(11))
    }

    #[test]
    fn test_max_length_boundaries() {
        let ep = endpoint(json!({
            "type": "object",
            "properties": {
                "username": { "type": "string", "maxLength": 20 },
                "bio": { "type": "string" },
                "active": { "type": "boolean" }
            },
            "required": ["username", "bio"]
        }));
        let steps = generator().generate_edge_cases(&ep);
        assert_eq!(steps.len(), 2);

        let exact = steps[0].body_object().unwrap();
        assert_eq!(exact["username"].as_str().unwrap().chars().count(), 20);
        assert!(exact.contains_key("bio"));
        assert_eq!(steps[0].expect.status, 201);

        let over = steps[1].body_object().unwrap();
        assert_eq!(over["username"].as_str().unwrap().chars().count(), 21);
        assert_eq!(steps[1].expect.status, REJECTED_STATUS);
        assert!(steps[1].name.contains("exceeds maximum"));
        assert!(steps.iter().all(|s| s.category == CaseCategory::EdgeCase));
    }

    #[test]
    fn test_min_length_and_numeric_bounds() {
        let ep = endpoint(json!({
            "type": "object",
            "properties": {
                "code": { "type": "string", "minLength": 4 },
                "age": { "type": "integer", "minimum": 18, "maximum": 120 },
                "ratio": { "type": "number", "minimum": 0, "exclusiveMinimum": true }
            },
            "required": ["code"]
        }));
        let steps = generator().generate_edge_cases(&ep);
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "createUser: code at minimum length (4)",
                "createUser: age at minimum (18)",
                "createUser: age at maximum (120)",
                "createUser: ratio at minimum (1)",
            ]
        );
        assert_eq!(steps[0].body_object().unwrap()["code"].as_str().unwrap().chars().count(), 4);
        assert_eq!(steps[1].body_object().unwrap()["age"], json!(18));
        assert_eq!(steps[2].body_object().unwrap()["age"], json!(120));
        assert!(steps.iter().all(|s| s.expect.status == 201));
    }

    #[test]
    fn test_only_the_targeted_field_changes() {
        let ep = endpoint(json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "maxLength": 8 },
                "count": { "type": "integer", "minimum": 1 }
            },
            "required": ["title", "count"]
        }));
        let steps = generator().generate_edge_cases(&ep);
        assert_eq!(steps.len(), 3);

        // Steps for `title` keep the synthesized `count`
        for step in &steps[..2] {
            assert_eq!(step.body_object().unwrap()["count"], json!(1));
        }
        let title = steps[2].body_object().unwrap()["title"].as_str().unwrap();
        assert!(title.chars().count() <= 8);
    }

    #[test]
    fn test_no_steps_without_constraints() {
        let unconstrained = endpoint(json!({
            "type": "object",
            "properties": { "note": { "type": "string" } }
        }));
        assert!(generator().generate(&unconstrained).is_empty());

        let empty = endpoint(json!({ "type": "object" }));
        assert!(generator().generate(&empty).is_empty());

        let none = EndpointInfo::new(HttpMethod::Get, "/users");
        assert!(generator().generate(&none).is_empty());
    }

    #[test]
    fn test_email_at_maximum_keeps_its_domain() {
        let ep = endpoint(json!({
            "type": "object",
            "properties": {
                "email": { "type": "string", "format": "email", "maxLength": 24 }
            },
            "required": ["email"]
        }));
        let steps = generator().generate_edge_cases(&ep);
        assert_eq!(steps.len(), 2);

        let at_max = steps[0].body_object().unwrap()["email"].as_str().unwrap();
        assert_eq!(at_max.chars().count(), 24);
        assert_eq!(at_max.matches('@').count(), 1, "{at_max}");
        assert!(at_max.split_once('@').unwrap().1.contains('.'));

        let over = steps[1].body_object().unwrap()["email"].as_str().unwrap();
        assert_eq!(over.chars().count(), 25);
    }

    #[test]
    fn test_unreachable_max_length_is_skipped() {
        let ep = endpoint(json!({
            "type": "object",
            "properties": {
                "blob": { "type": "string", "minLength": 2, "maxLength": u64::MAX }
            },
            "required": ["blob"]
        }));
        let steps = generator().generate_edge_cases(&ep);
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["createUser: blob at minimum length (2)"]);
        assert_eq!(steps[0].body_object().unwrap()["blob"].as_str().unwrap().chars().count(), 2);
    }

    #[test]
    fn test_path_and_auth_carry_over() {
        let ep = EndpointInfo::new(HttpMethod::Put, "/users/{id}")
            .with_operation_id("updateUser")
            .with_security("bearerAuth")
            .with_request_schema(
                serde_json::from_value(json!({
                    "type": "object",
                    "properties": { "nickname": { "type": "string", "maxLength": 12 } }
                }))
                .unwrap(),
            );
        let steps = generator().generate(&ep);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].request.path, "/users/{{resourceId}}");
        assert_eq!(steps[0].expect.status, 200);
        assert!(steps[0].request.headers.contains_key("Authorization"));
    }
}
