use crate::schema::zero::ValueKind;
use serde::Deserialize;
use std::fmt;

/// A column in a source table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    /// The column name. Unique within the table.
    pub name: String,

    /// The primitive kind of the column.
    #[serde(rename = "type")]
    pub ty: ColumnType,

    /// True if the column can hold NULL.
    #[serde(default)]
    pub nullable: bool,

    /// True if the column is part of the table's primary key.
    #[serde(default)]
    pub primary_key: bool,

    /// Opaque custom-type marker carried through to the generated schema.
    #[serde(default)]
    pub custom_type: Option<String>,

    /// Foreign key target, if this column references another table. Used for
    /// junction inference when resolving many-to-many relations.
    #[serde(default)]
    pub references: Option<ColumnRef>,
}

/// A reference to a column in another table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

/// Primitive column kinds understood by the source ORM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Number,
    #[serde(rename = "bigint")]
    BigInt,
    Numeric,
    Text,
    Date,
    Timestamp,
    Boolean,
    Json,
}

impl ColumnType {
    /// Maps the source primitive kind to the target schema's primitive kind.
    ///
    /// Total: the numeric family (including temporal kinds, which the target
    /// stores as epoch numbers) collapses to `Number`; an unrecognized kind
    /// never reaches this point because deserialization rejects it.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Number | Self::BigInt | Self::Numeric | Self::Date | Self::Timestamp => {
                ValueKind::Number
            }
            Self::Text => ValueKind::String,
            Self::Boolean => ValueKind::Boolean,
            Self::Json => ValueKind::Json,
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
