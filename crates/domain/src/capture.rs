//! Capture records produced by the conversational intake and by planning storage.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Scalar value carried by a captured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value, emitted by planning storage for form flags.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Free text.
    Text(String),
}

impl FieldValue {
    /// Converts a JSON scalar. Null, arrays and objects have no field value.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }

    /// Returns whether this is text that is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Returns whether this is the empty string.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Returns the text slice when the value is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Interprets the value as an integer.
    ///
    /// Text is trimmed before parsing; fractional numbers are truncated toward zero.
    #[must_use]
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.is_finite())
                    .map(|value| value.trunc() as i64)
            }),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed.parse::<i64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .map(|value| value.trunc() as i64)
                })
            }
            Self::Bool(_) => None,
        }
    }

    /// Interprets the value as a yes/no answer.
    #[must_use]
    pub fn to_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Number(number) => match number.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Self::Text(text) => match text.trim().to_lowercase().as_str() {
                "yes" | "y" | "true" | "1" => Some(true),
                "no" | "n" | "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Text(text) => formatter.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

/// One captured datum: a field name and its value.
///
/// Both members are optional on the wire; records missing either are skipped
/// by every converter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatField {
    /// Captured field name.
    #[serde(default)]
    pub field_name: Option<String>,
    /// Captured value.
    #[serde(default)]
    pub field_value: Option<FieldValue>,
}

impl FlatField {
    /// Creates a complete field record.
    #[must_use]
    pub fn new(field_name: impl Into<String>, field_value: impl Into<FieldValue>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            field_value: Some(field_value.into()),
        }
    }

    /// Reads a field record from a JSON object, ignoring unsupported members.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            field_name: object
                .get("field_name")
                .and_then(Value::as_str)
                .map(str::to_owned),
            field_value: object.get("field_value").and_then(FieldValue::from_json),
        })
    }

    /// Returns the name and value when both are present and the value is not blank.
    #[must_use]
    pub fn captured(&self) -> Option<(&str, &FieldValue)> {
        let name = self.field_name.as_deref()?;
        let value = self.field_value.as_ref()?;
        (!value.is_blank()).then_some((name, value))
    }
}

/// Capture grouped by planning domain (`ceremony`, `reception`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedCapture(Map<String, Value>);

impl NestedCapture {
    /// Wraps a JSON object.
    #[must_use]
    pub fn new(domains: Map<String, Value>) -> Self {
        Self(domains)
    }

    /// Returns the fields captured for a domain, if the domain is an object.
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }
}

/// Intake payload tagged by shape at the boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CapturePayload {
    /// Array of field records.
    FieldArray(Vec<FlatField>),
    /// Object keyed by planning domain.
    Nested(NestedCapture),
    /// Anything else; converters treat it as "nothing to prefill".
    #[default]
    Unrecognized,
}

impl CapturePayload {
    /// Classifies a raw JSON document.
    ///
    /// Array members that are not objects are dropped.
    #[must_use]
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                Self::FieldArray(items.iter().filter_map(FlatField::from_json).collect())
            }
            Value::Object(domains) => Self::Nested(NestedCapture::new(domains.clone())),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Self::Unrecognized
            }
        }
    }

    /// Returns the field records, or an empty slice for any other shape.
    #[must_use]
    pub fn fields(&self) -> &[FlatField] {
        match self {
            Self::FieldArray(fields) => fields.as_slice(),
            Self::Nested(_) | Self::Unrecognized => &[],
        }
    }

    /// Returns a short label for the payload shape.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::FieldArray(_) => "field_array",
            Self::Nested(_) => "nested",
            Self::Unrecognized => "unrecognized",
        }
    }
}
