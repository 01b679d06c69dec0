use super::{Column, Relation};
use serde::Deserialize;

/// A table in the source schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    /// The table name. Unique within the schema.
    pub name: String,

    /// Columns in declaration order.
    #[serde(rename = "column")]
    pub columns: Vec<Column>,

    /// Relations declared on this table.
    #[serde(default, rename = "relation")]
    pub relations: Vec<Relation>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Iterate over the columns forming the table's primary key, in
    /// declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// Iterate over the foreign-key columns referencing `target`.
    pub fn references_to<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Column> {
        self.columns.iter().filter(move |column| {
            column
                .references
                .as_ref()
                .is_some_and(|reference| reference.table == target)
        })
    }
}
