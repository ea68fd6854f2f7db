use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// `exclusiveMinimum` / `exclusiveMaximum`: a flag (OpenAPI 3.0) or a bound
/// of its own (OpenAPI 3.1 / JSON Schema 2020-12).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Bound(f64),
}

/// The keyword shape of a schema node as the spec analyzer writes it.
///
/// This is only a wire format; everything downstream works on [`JsonSchema`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// A list (JSON Schema) or a named map (seen in the wild in 3.0 documents).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    // Numeric constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,

    // String constraints
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawSchema>>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, RawSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// A schema node. `kind` is keyed on the JSON type and carries only the
/// constraints meaningful for that type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawSchema", into = "RawSchema")]
pub struct JsonSchema {
    pub kind: SchemaKind,
    pub default: Option<Value>,
    pub examples: Vec<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SchemaKind {
    String(StringSchema),
    Number(NumberSchema),
    Integer(NumberSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Null,
    /// Unknown or absent `type`.
    #[default]
    Any,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringSchema {
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberSchema {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BooleanSchema {
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    pub items: Option<Box<JsonSchema>>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, JsonSchema>,
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl JsonSchema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn string(schema: StringSchema) -> Self {
        Self::new(SchemaKind::String(schema))
    }

    pub fn integer(schema: NumberSchema) -> Self {
        Self::new(SchemaKind::Integer(schema))
    }

    pub fn number(schema: NumberSchema) -> Self {
        Self::new(SchemaKind::Number(schema))
    }

    pub fn object<I, S>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (S, JsonSchema)>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Object(ObjectSchema {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            required: required.iter().map(|r| r.to_string()).collect(),
        }))
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// The JSON type this node describes, `None` for an opaque node.
    pub fn schema_type(&self) -> Option<SchemaType> {
        match self.kind {
            SchemaKind::String(_) => Some(SchemaType::String),
            SchemaKind::Number(_) => Some(SchemaType::Number),
            SchemaKind::Integer(_) => Some(SchemaType::Integer),
            SchemaKind::Boolean(_) => Some(SchemaType::Boolean),
            SchemaKind::Array(_) => Some(SchemaType::Array),
            SchemaKind::Object(_) => Some(SchemaType::Object),
            SchemaKind::Null => Some(SchemaType::Null),
            SchemaKind::Any => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Top-level properties in declaration order; empty for non-objects.
    pub fn properties(&self) -> impl Iterator<Item = (&String, &JsonSchema)> {
        self.as_object()
            .into_iter()
            .flat_map(|obj| obj.properties.iter())
    }

    /// Required property names; empty for non-objects.
    pub fn required(&self) -> &[String] {
        self.as_object()
            .map(|obj| obj.required.as_slice())
            .unwrap_or_default()
    }
}

impl From<RawSchema> for JsonSchema {
    fn from(raw: RawSchema) -> Self {
        let RawSchema {
            schema_type,
            format,
            pattern,
            description,
            default_value,
            example,
            examples,
            enum_values,
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            multiple_of,
            min_length,
            max_length,
            items,
            min_items,
            max_items,
            properties,
            required,
        } = raw;

        let resolved_type = match schema_type {
            Some(TypeSet::Single(t)) => Some(t),
            Some(TypeSet::Multiple(types)) => types
                .iter()
                .copied()
                .find(|t| *t != SchemaType::Null)
                .or_else(|| types.first().copied()),
            // No type specified: infer from structural keywords
            None if !properties.is_empty() => Some(SchemaType::Object),
            None if items.is_some() => Some(SchemaType::Array),
            None => None,
        };

        let numeric = || {
            let (minimum, exclusive_minimum) = resolve_bound(minimum, exclusive_minimum);
            let (maximum, exclusive_maximum) = resolve_bound(maximum, exclusive_maximum);
            NumberSchema {
                minimum,
                maximum,
                exclusive_minimum,
                exclusive_maximum,
                multiple_of: multiple_of.filter(|m| *m > 0.0),
                enum_values: enum_values.clone(),
            }
        };

        let kind = match resolved_type {
            Some(SchemaType::String) => SchemaKind::String(StringSchema {
                format,
                pattern,
                min_length,
                max_length,
                enum_values: enum_values.clone(),
            }),
            Some(SchemaType::Number) => SchemaKind::Number(numeric()),
            Some(SchemaType::Integer) => SchemaKind::Integer(numeric()),
            Some(SchemaType::Boolean) => SchemaKind::Boolean(BooleanSchema {
                enum_values: enum_values.clone(),
            }),
            Some(SchemaType::Array) => SchemaKind::Array(ArraySchema {
                items: items.map(|i| Box::new(JsonSchema::from(*i))),
                min_items,
                max_items,
            }),
            Some(SchemaType::Object) => SchemaKind::Object(ObjectSchema {
                properties: properties
                    .into_iter()
                    .map(|(name, prop)| (name, JsonSchema::from(prop)))
                    .collect(),
                required,
            }),
            Some(SchemaType::Null) => SchemaKind::Null,
            None => SchemaKind::Any,
        };

        Self {
            kind,
            default: default_value,
            examples: collect_examples(examples, example),
            description,
        }
    }
}

impl From<JsonSchema> for RawSchema {
    fn from(schema: JsonSchema) -> Self {
        let mut raw = RawSchema {
            schema_type: schema.schema_type().map(TypeSet::Single),
            description: schema.description,
            default_value: schema.default,
            examples: (!schema.examples.is_empty()).then(|| Value::Array(schema.examples)),
            ..RawSchema::default()
        };

        match schema.kind {
            SchemaKind::String(s) => {
                raw.format = s.format;
                raw.pattern = s.pattern;
                raw.min_length = s.min_length;
                raw.max_length = s.max_length;
                raw.enum_values = s.enum_values;
            }
            SchemaKind::Number(n) | SchemaKind::Integer(n) => {
                raw.minimum = n.minimum;
                raw.maximum = n.maximum;
                raw.exclusive_minimum = n.exclusive_minimum.then_some(ExclusiveBound::Flag(true));
                raw.exclusive_maximum = n.exclusive_maximum.then_some(ExclusiveBound::Flag(true));
                raw.multiple_of = n.multiple_of;
                raw.enum_values = n.enum_values;
            }
            SchemaKind::Boolean(b) => raw.enum_values = b.enum_values,
            SchemaKind::Array(a) => {
                raw.items = a.items.map(|i| Box::new(RawSchema::from(*i)));
                raw.min_items = a.min_items;
                raw.max_items = a.max_items;
            }
            SchemaKind::Object(o) => {
                raw.properties = o
                    .properties
                    .into_iter()
                    .map(|(name, prop)| (name, RawSchema::from(prop)))
                    .collect();
                raw.required = o.required;
            }
            SchemaKind::Null | SchemaKind::Any => {}
        }

        raw
    }
}

/// Fold the two exclusive-bound dialects into `(bound, exclusive)`.
fn resolve_bound(value: Option<f64>, exclusive: Option<ExclusiveBound>) -> (Option<f64>, bool) {
    match exclusive {
        Some(ExclusiveBound::Bound(bound)) => (Some(bound), true),
        Some(ExclusiveBound::Flag(flag)) => (value, flag && value.is_some()),
        None => (value, false),
    }
}

fn collect_examples(examples: Option<Value>, example: Option<Value>) -> Vec<Value> {
    let mut out = match examples {
        Some(Value::Array(list)) => list,
        Some(Value::Object(named)) => named.into_iter().map(|(_, v)| v).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };
    if let Some(example) = example {
        out.push(example);
    }
    out
}
