use serde::Serialize;
use std::fmt;

/// Primitive value kinds in the generated schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Json,
}

/// A column in the generated schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    #[serde(rename = "type")]
    pub kind: ValueKind,

    /// True if the column may be absent or null on the client.
    pub optional: bool,

    /// Opaque custom-type marker, passed through from the source column.
    pub custom_type: Option<String>,
}

impl ValueKind {
    /// The kind's literal spelling in the generated schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
