//! Variable domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Type tag of an engine variable
///
/// The engine knows a fixed set of tags; anything else is kept verbatim
/// in [`VariableType::Other`] so custom serializers on the server keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariableType {
    String,
    Short,
    Integer,
    Long,
    Double,
    Boolean,
    Date,
    Instant,
    LocalDate,
    LocalDateTime,
    Json,
    Other(String),
}

impl VariableType {
    /// The tag as sent on the wire
    pub fn as_str(&self) -> &str {
        match self {
            VariableType::String => "string",
            VariableType::Short => "short",
            VariableType::Integer => "integer",
            VariableType::Long => "long",
            VariableType::Double => "double",
            VariableType::Boolean => "boolean",
            VariableType::Date => "date",
            VariableType::Instant => "instant",
            VariableType::LocalDate => "localDate",
            VariableType::LocalDateTime => "localDateTime",
            VariableType::Json => "json",
            VariableType::Other(tag) => tag,
        }
    }
}

impl From<&str> for VariableType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => VariableType::String,
            "short" => VariableType::Short,
            "integer" => VariableType::Integer,
            "long" => VariableType::Long,
            "double" => VariableType::Double,
            "boolean" => VariableType::Boolean,
            "date" => VariableType::Date,
            "instant" => VariableType::Instant,
            "localDate" => VariableType::LocalDate,
            "localDateTime" => VariableType::LocalDateTime,
            "json" => VariableType::Json,
            other => VariableType::Other(other.to_string()),
        }
    }
}

impl From<String> for VariableType {
    fn from(tag: String) -> Self {
        VariableType::from(tag.as_str())
    }
}

impl From<VariableType> for String {
    fn from(var_type: VariableType) -> Self {
        match var_type {
            VariableType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed engine variable
///
/// When `value_url` is set the content is stored outside the payload and
/// `value` is usually null. Fetching it is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub value: JsonValue,
    #[serde(default)]
    pub value_url: Option<String>,
}

impl Variable {
    /// Creates an inline variable
    pub fn new(
        name: impl Into<String>,
        value: impl Into<JsonValue>,
        var_type: impl Into<VariableType>,
    ) -> Self {
        Self {
            name: name.into(),
            var_type: var_type.into(),
            value: value.into(),
            value_url: None,
        }
    }

    /// Whether the value has to be fetched from `value_url`
    pub fn is_external(&self) -> bool {
        self.value_url.is_some()
    }
}
