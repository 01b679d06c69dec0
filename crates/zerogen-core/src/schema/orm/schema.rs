use super::{Relation, Table};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// The full source schema: every table the ORM declares, in declaration
/// order, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub tables: IndexMap<String, Table>,
}

/// On-disk shape of the schema document.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(rename = "table")]
    tables: Vec<Table>,
}

impl Schema {
    /// Load a schema document from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            crate::err!(
                "failed to read schema document at {}: {err}",
                path.display()
            )
        })?;
        contents.parse()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Check structural invariants: unique column names, a primary key on
    /// every table, and no dangling relation endpoints or foreign-key
    /// targets.
    pub fn verify(&self) -> Result<()> {
        for table in self.tables() {
            self.verify_table(table)?;
        }
        Ok(())
    }

    fn verify_table(&self, table: &Table) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` declares column `{}` more than once",
                    table.name, column.name
                )));
            }

            if let Some(reference) = &column.references {
                let Some(target) = self.table(&reference.table) else {
                    return Err(Error::invalid_schema(format!(
                        "column `{}.{}` references unknown table `{}`",
                        table.name, column.name, reference.table
                    )));
                };
                if target.column(&reference.column).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "column `{}.{}` references unknown column `{}`",
                        table.name, column.name, reference
                    )));
                }
            }
        }

        if table.primary_key_columns().next().is_none() {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no primary key",
                table.name
            )));
        }

        let mut names = HashSet::new();
        for relation in &table.relations {
            if !names.insert(relation.name()) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` declares relation `{}` more than once",
                    table.name,
                    relation.name()
                )));
            }
            self.verify_relation(table, relation)?;
        }

        Ok(())
    }

    fn verify_relation(&self, table: &Table, relation: &Relation) -> Result<()> {
        let Some(dest) = self.table(relation.dest_table()) else {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` targets unknown table `{}`",
                table.name,
                relation.name(),
                relation.dest_table()
            )));
        };

        match relation {
            Relation::One(direct) | Relation::Many(direct) => {
                if table.column(&direct.source_field).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}.{}` uses unknown source column `{}`",
                        table.name, direct.name, direct.source_field
                    )));
                }
                if dest.column(&direct.dest_field).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}.{}` uses unknown destination column `{}.{}`",
                        table.name, direct.name, dest.name, direct.dest_field
                    )));
                }
            }
            Relation::ManyToMany(many_to_many) => {
                if let Some(junction) = &many_to_many.junction {
                    if self.table(junction).is_none() {
                        return Err(Error::invalid_schema(format!(
                            "relation `{}.{}` names unknown junction table `{}`",
                            table.name, many_to_many.name, junction
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(s)?;

        let mut tables = IndexMap::with_capacity(file.tables.len());
        for table in file.tables {
            let name = table.name.clone();
            if tables.insert(name.clone(), table).is_some() {
                return Err(Error::invalid_schema(format!(
                    "schema declares table `{name}` more than once"
                )));
            }
        }

        Ok(Self { tables })
    }
}
