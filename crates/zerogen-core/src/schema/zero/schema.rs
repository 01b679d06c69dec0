use super::TableSpec;
use indexmap::IndexMap;
use serde::Serialize;

/// The generated schema handed to the output materializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub version: u32,

    /// Resolved table descriptors, in source declaration order.
    pub tables: IndexMap<String, TableSpec>,
}

impl Schema {
    /// Resolve a lazy destination reference.
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.values()
    }
}
