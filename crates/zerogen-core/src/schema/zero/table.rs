use super::{ColumnSpec, Relationship};
use indexmap::IndexMap;
use serde::Serialize;

/// A resolved table descriptor in the generated schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    /// Name of the backing table.
    pub table_name: String,

    /// Selected columns, in source declaration order.
    pub columns: IndexMap<String, ColumnSpec>,

    /// Primary key column names, in source declaration order.
    pub primary_key: Vec<String>,

    /// Resolved relationships, keyed by relation name.
    pub relationships: IndexMap<String, Relationship>,
}

impl TableSpec {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }
}
