use indexmap::IndexMap;
use oaf_core::schema::{ArraySchema, JsonSchema, NumberSchema, ObjectSchema, SchemaKind, StringSchema};
use oaf_core::{Locale, SynthesizerOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

use crate::formats::{FieldHint, StringFormat};
use crate::invalid::invalid_value;
use crate::locale::{data, pick};

/// Length floor for strings without any length constraint.
pub const MIN_UNCONSTRAINED_LEN: usize = 3;

/// Longest string ever materialized. Larger length bounds are clamped to it
/// and boundary values beyond it are not produced.
pub const MAX_STRING_LEN: usize = 1 << 16;

/// Domain used when an address must fit a `maxLength` its sampled domain
/// leaves no room for.
const SHORT_EMAIL_DOMAIN: &str = "e.co";

/// Placeholder produced for nodes whose type is unknown.
pub const OPAQUE_VALUE: &str = "unknown";

/// Caller-supplied examples, keyed by property name. Values may be bare or
/// wrapped as `{ "value": ... }`.
pub type Examples = IndexMap<String, Value>;

/// Produces example values from JSON schemas.
///
/// The synthesizer holds only configuration. Each convenience entry point
/// draws from its own freshly seeded [`StdRng`], so one instance can be
/// shared across threads; `*_with` variants take an injected generator.
#[derive(Debug, Clone, Default)]
pub struct DataSynthesizer {
    options: SynthesizerOptions,
}

impl DataSynthesizer {
    pub fn new(options: SynthesizerOptions) -> Self {
        Self { options }
    }

    /// A synthesizer with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SynthesizerOptions {
            seed: Some(seed),
            ..SynthesizerOptions::default()
        })
    }

    pub fn options(&self) -> &SynthesizerOptions {
        &self.options
    }

    pub fn locale(&self) -> Locale {
        self.options.locale
    }

    /// A generator for one call context.
    pub fn rng(&self) -> StdRng {
        match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Synthesize a valid value for `schema`.
    pub fn synthesize(&self, schema: &JsonSchema, examples: Option<&Examples>) -> Value {
        self.synthesize_with(&mut self.rng(), schema, None, examples)
    }

    /// Synthesize a valid value for a named property, so name hints apply.
    pub fn synthesize_field(&self, name: &str, schema: &JsonSchema) -> Value {
        self.synthesize_with(&mut self.rng(), schema, Some(name), None)
    }

    /// A value violating `schema`; see [`invalid_value`].
    pub fn synthesize_invalid(&self, schema: &JsonSchema) -> Value {
        invalid_value(schema).value
    }

    pub fn synthesize_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        schema: &JsonSchema,
        field_name: Option<&str>,
        examples: Option<&Examples>,
    ) -> Value {
        if self.options.use_examples {
            let supplied = field_name.and_then(|name| examples.and_then(|ex| ex.get(name)));
            if let Some(example) = supplied {
                return unwrap_example(example).clone();
            }
            if let Some(example) = schema.examples.first() {
                return example.clone();
            }
        }
        if self.options.use_defaults {
            if let Some(default) = &schema.default {
                return default.clone();
            }
        }

        match &schema.kind {
            SchemaKind::String(s) => Value::String(self.string_value(rng, s, field_name)),
            SchemaKind::Integer(n) => self.number(rng, n, true),
            SchemaKind::Number(n) => self.number(rng, n, false),
            SchemaKind::Boolean(b) => match b.enum_values.first() {
                Some(first) if self.options.use_enums => first.clone(),
                _ => Value::Bool(true),
            },
            SchemaKind::Array(a) => self.array(rng, a, examples),
            SchemaKind::Object(o) => self.object(rng, o, examples),
            SchemaKind::Null => Value::Null,
            SchemaKind::Any => json!(OPAQUE_VALUE),
        }
    }

    /// A string for `schema` of exactly `len` characters, padded or cut
    /// without regard for its format. Used for values meant to be rejected.
    pub fn string_of_length<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        schema: &StringSchema,
        field_name: Option<&str>,
        len: usize,
    ) -> String {
        let (base, _) = self.base_string(rng, schema, field_name);
        fit_length(base, Some(len), Some(len))
    }

    /// A valid string for `schema` fitted between `min` and `max` while
    /// keeping its format. Fixed-shape formats such as `uuid` keep their
    /// sample length when the bounds cannot be met.
    pub fn string_within<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        schema: &StringSchema,
        field_name: Option<&str>,
        min: Option<usize>,
        max: Option<usize>,
    ) -> String {
        let (base, shape) = self.base_string(rng, schema, field_name);
        shape.fit(base, min, max)
    }

    fn string_value<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        s: &StringSchema,
        field_name: Option<&str>,
    ) -> String {
        if self.options.use_enums {
            if let Some(first) = s.enum_values.first() {
                return match first {
                    Value::String(v) => v.clone(),
                    other => other.to_string(),
                };
            }
        }
        self.string_within(rng, s, field_name, s.min_length, s.max_length)
    }

    fn base_string<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        s: &StringSchema,
        field_name: Option<&str>,
    ) -> (String, Shape) {
        let locale = self.locale();
        if let Some(format) = s.format.as_deref().and_then(StringFormat::parse) {
            return (format.generate(rng, locale), Shape::of_format(format));
        }
        if let Some(hint) = field_name.and_then(FieldHint::detect) {
            let shape = match hint {
                FieldHint::Email => Shape::Email,
                _ => Shape::Plain,
            };
            return (hint.generate(rng, locale), shape);
        }
        (pick(rng, data(locale).words).to_string(), Shape::Plain)
    }

    fn number<R: Rng + ?Sized>(&self, rng: &mut R, n: &NumberSchema, integer: bool) -> Value {
        if self.options.use_enums {
            if let Some(first) = n.enum_values.first() {
                return first.clone();
            }
        }

        let (lower, upper) = effective_bounds(n, integer);
        let candidate = match (lower, upper) {
            (Some(lo), Some(hi)) if lo < hi => {
                if integer {
                    rng.gen_range(lo as i64..=hi as i64) as f64
                } else {
                    (rng.gen_range(lo..=hi) * 100.0).round().clamp(lo * 100.0, hi * 100.0) / 100.0
                }
            }
            // The one-unit adjustment crossed over a narrow range
            (Some(lo), Some(hi)) if lo > hi => {
                match (n.minimum, n.maximum) {
                    (Some(min), Some(max)) => (min + max) / 2.0,
                    _ => lo,
                }
            }
            (Some(lo), _) => lo,
            (None, Some(hi)) => hi.min(1.0),
            (None, None) => 1.0,
        };

        let value = match n.multiple_of {
            Some(step) => align_to_multiple(candidate, step, lower, upper),
            None => candidate,
        };
        number_value(value, integer)
    }

    fn array<R: Rng + ?Sized>(&self, rng: &mut R, a: &ArraySchema, examples: Option<&Examples>) -> Value {
        let Some(items) = &a.items else {
            return Value::Array(Vec::new());
        };
        let count = a
            .min_items
            .unwrap_or(1)
            .min(a.max_items.unwrap_or(usize::MAX));
        Value::Array(
            (0..count)
                .map(|_| self.synthesize_with(rng, items, None, examples))
                .collect(),
        )
    }

    fn object<R: Rng + ?Sized>(&self, rng: &mut R, o: &ObjectSchema, examples: Option<&Examples>) -> Value {
        let mut out = Map::new();
        for (name, prop) in &o.properties {
            if o.is_required(name) || prop.default.is_some() {
                let value = self.synthesize_with(rng, prop, Some(name), examples);
                out.insert(name.clone(), value);
            }
        }
        for name in &o.required {
            if !o.properties.contains_key(name) {
                log::warn!("required property `{name}` has no schema, using a placeholder");
                let value = self.synthesize_with(rng, &JsonSchema::default(), Some(name), examples);
                out.insert(name.clone(), value);
            }
        }
        Value::Object(out)
    }
}

/// How a generated string may grow or shrink without losing its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Plain,
    /// Only the local part before `@` changes.
    Email,
    /// Grows by appending the character; never cut.
    Padded(char),
    /// Kept as generated.
    Fixed,
}

impl Shape {
    fn of_format(format: StringFormat) -> Self {
        match format {
            StringFormat::Email => Shape::Email,
            StringFormat::Uri => Shape::Padded('a'),
            _ => Shape::Fixed,
        }
    }

    fn fit(self, value: String, min: Option<usize>, max: Option<usize>) -> String {
        match self {
            Shape::Plain => fit_length(value, min, max),
            Shape::Email => fit_email(value, min, max),
            Shape::Padded(fill) => {
                let floor = min.unwrap_or(0).min(MAX_STRING_LEN);
                let len = value.chars().count();
                if len >= floor {
                    return value;
                }
                let mut out = value;
                out.extend(std::iter::repeat_n(fill, floor - len));
                out
            }
            Shape::Fixed => value,
        }
    }
}

/// Repeat `value` up to `min` characters and cut it at `max`. With neither
/// bound, the floor is [`MIN_UNCONSTRAINED_LEN`].
pub fn fit_length(value: String, min: Option<usize>, max: Option<usize>) -> String {
    let mut floor = match (min, max) {
        (None, None) => MIN_UNCONSTRAINED_LEN,
        _ => min.unwrap_or(0),
    };
    if floor > MAX_STRING_LEN {
        log::warn!("minimum length {floor} clamped to {MAX_STRING_LEN}");
        floor = MAX_STRING_LEN;
    }

    let mut out = value;
    let mut len = out.chars().count();
    if len < floor {
        let unit = if out.is_empty() { "x".to_string() } else { out.clone() };
        let unit_len = unit.chars().count();
        while len < floor {
            out.push_str(&unit);
            len += unit_len;
        }
    }
    match max {
        Some(max) if len > max => out.chars().take(max).collect(),
        _ => out,
    }
}

/// Fit an address by resizing its local part. `@domain` stays whole unless
/// `max` leaves no room for it, in which case a short domain replaces it.
fn fit_email(value: String, min: Option<usize>, max: Option<usize>) -> String {
    let Some((local, domain)) = value.split_once('@') else {
        return fit_length(value, min, max);
    };
    let domain = match max {
        Some(max) if max < domain.chars().count() + 2 => SHORT_EMAIL_DOMAIN,
        _ => domain,
    };
    let taken = domain.chars().count() + 1;
    let local_min = min.map_or(1, |m| m.saturating_sub(taken).max(1));
    let local_max = max.map(|m| m.saturating_sub(taken).max(1));
    let local = fit_length(local.to_string(), Some(local_min), local_max);
    format!("{local}@{domain}")
}

/// The inclusive range a number schema admits. Exclusive bounds move one
/// unit inward; integer bounds are rounded toward the inside.
pub fn effective_bounds(n: &NumberSchema, integer: bool) -> (Option<f64>, Option<f64>) {
    let mut lower = n
        .minimum
        .map(|m| if n.exclusive_minimum { m + 1.0 } else { m });
    let mut upper = n
        .maximum
        .map(|m| if n.exclusive_maximum { m - 1.0 } else { m });
    if integer {
        lower = lower.map(f64::ceil);
        upper = upper.map(f64::floor);
    }
    (lower, upper)
}

/// Emit integral values as JSON integers.
pub fn number_value(value: f64, integer: bool) -> Value {
    if (integer || value.fract() == 0.0) && value.abs() < 9.0e15 {
        json!(value.round() as i64)
    } else {
        json!(value)
    }
}

fn align_to_multiple(candidate: f64, step: f64, lower: Option<f64>, upper: Option<f64>) -> f64 {
    let start = lower.map_or(candidate, |lo| candidate.max(lo));
    let mut aligned = (start / step).ceil() * step;
    if let Some(hi) = upper {
        if aligned > hi {
            let below = (hi / step).floor() * step;
            if lower.is_none_or(|lo| below >= lo) {
                aligned = below;
            }
        }
    }
    // Trim float noise such as 0.30000000000000004
    (aligned * 1e9).round() / 1e9
}

fn unwrap_example(example: &Value) -> &Value {
    match example {
        Value::Object(map) if map.contains_key("value") => &map["value"],
        other => other,
    }
}
