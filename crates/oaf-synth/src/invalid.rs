//! Deliberately invalid counterparts for negative testing.
//!
//! Every value here is a constant or derived from the schema alone, so
//! negative cases are reproducible without a seed.

use oaf_core::schema::{JsonSchema, NumberSchema, SchemaKind, StringSchema};
use serde_json::{Value, json};

use crate::formats::StringFormat;
use crate::synthesizer::{MAX_STRING_LEN, number_value};

/// Stands in for a string field.
pub const NON_STRING_SENTINEL: i64 = 12345;
/// Stands in for a number/integer field.
pub const NON_NUMERIC_SENTINEL: &str = "not-a-number";
pub const NON_BOOLEAN_SENTINEL: &str = "not-a-boolean";
pub const NON_ARRAY_SENTINEL: &str = "not-an-array";
/// Stands in for an object field, wrapped in an array.
pub const NON_OBJECT_SENTINEL: &str = "not-an-object";
/// Used for `null` and opaque nodes.
pub const GENERIC_SENTINEL: &str = "invalid";
/// Outside any sensible enum.
pub const NOT_IN_ENUM_SENTINEL: &str = "__not_in_enum__";

/// Which constraint an invalid value breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Format,
    BelowMinLength,
    AboveMaxLength,
    NotInEnum,
    BelowMinimum,
    AboveMaximum,
    TooFewItems,
    /// No constraint to violate; the value simply has the wrong JSON type.
    TypeMismatch,
}

impl Violation {
    /// Short label used in step names.
    pub fn describe(self) -> &'static str {
        match self {
            Violation::Format => "malformed format",
            Violation::BelowMinLength => "below minimum length",
            Violation::AboveMaxLength => "above maximum length",
            Violation::NotInEnum => "not in enum",
            Violation::BelowMinimum => "below minimum",
            Violation::AboveMaximum => "above maximum",
            Violation::TooFewItems => "too few items",
            Violation::TypeMismatch => "wrong type",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidValue {
    pub value: Value,
    pub violation: Violation,
}

impl InvalidValue {
    fn new(value: Value, violation: Violation) -> Self {
        Self { value, violation }
    }

    fn mismatch(value: Value) -> Self {
        Self::new(value, Violation::TypeMismatch)
    }

    /// Whether this is only the type-mismatch fallback rather than a
    /// violation of a declared constraint.
    pub fn is_placeholder(&self) -> bool {
        self.violation == Violation::TypeMismatch
    }
}

/// Produce a value that violates `schema`, preferring a declared constraint
/// over a type mismatch.
pub fn invalid_value(schema: &JsonSchema) -> InvalidValue {
    match &schema.kind {
        SchemaKind::String(s) => invalid_string(s),
        SchemaKind::Integer(n) => invalid_number(n, true),
        SchemaKind::Number(n) => invalid_number(n, false),
        SchemaKind::Boolean(_) => InvalidValue::mismatch(json!(NON_BOOLEAN_SENTINEL)),
        SchemaKind::Array(a) => match a.min_items {
            Some(min) if min > 0 => InvalidValue::new(json!([]), Violation::TooFewItems),
            _ => InvalidValue::mismatch(json!(NON_ARRAY_SENTINEL)),
        },
        SchemaKind::Object(_) => InvalidValue::mismatch(json!([NON_OBJECT_SENTINEL])),
        SchemaKind::Null | SchemaKind::Any => InvalidValue::mismatch(json!(GENERIC_SENTINEL)),
    }
}

fn invalid_string(s: &StringSchema) -> InvalidValue {
    if let Some(format) = s.format.as_deref().and_then(StringFormat::parse) {
        return InvalidValue::new(json!(format.malformed()), Violation::Format);
    }
    if let Some(min) = s.min_length.filter(|min| (1..=MAX_STRING_LEN + 1).contains(min)) {
        return InvalidValue::new(json!("a".repeat(min - 1)), Violation::BelowMinLength);
    }
    // Bounds too large to exceed in practice fall through to the next rule
    let over_max = s.max_length.and_then(|max| max.checked_add(1));
    if let Some(over) = over_max.filter(|over| *over <= MAX_STRING_LEN) {
        return InvalidValue::new(json!("a".repeat(over)), Violation::AboveMaxLength);
    }
    if !s.enum_values.is_empty() {
        return InvalidValue::new(json!(NOT_IN_ENUM_SENTINEL), Violation::NotInEnum);
    }
    InvalidValue::mismatch(json!(NON_STRING_SENTINEL))
}

fn invalid_number(n: &NumberSchema, integer: bool) -> InvalidValue {
    if let Some(min) = n.minimum {
        return InvalidValue::new(number_value(min - 1.0, integer), Violation::BelowMinimum);
    }
    if let Some(max) = n.maximum {
        return InvalidValue::new(number_value(max + 1.0, integer), Violation::AboveMaximum);
    }
    InvalidValue::mismatch(json!(NON_NUMERIC_SENTINEL))
}
