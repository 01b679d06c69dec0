use super::{orm, zero};
use crate::config::{Config, JunctionConfig, JunctionHop, TableSelection};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Resolves a source schema and a caller configuration into the generated
/// schema.
#[derive(Debug, Default)]
pub struct Builder {}

/// Used to track state during the build process
struct BuildSchema<'a> {
    schema: &'a orm::Schema,
    config: &'a Config,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, schema: &orm::Schema, config: &Config) -> Result<zero::Schema> {
        schema.verify()?;

        let cx = BuildSchema { schema, config };
        cx.verify_config()?;

        let mut tables = IndexMap::new();

        // Schema declaration order, restricted to selected tables.
        for table in schema.tables() {
            let Some(selection) = config.selection(&table.name) else {
                continue;
            };
            tables.insert(table.name.clone(), cx.build_table(table, selection)?);
        }

        Ok(zero::Schema {
            version: config.version,
            tables,
        })
    }
}

impl BuildSchema<'_> {
    /// Reject configuration entries that do not line up with the source
    /// schema before resolving anything.
    fn verify_config(&self) -> Result<()> {
        for (name, selection) in &self.config.tables {
            let Some(table) = self.schema.table(name) else {
                return Err(Error::invalid_config(format!(
                    "configuration selects unknown table `{name}`"
                )));
            };

            // Every listed column must exist, whether it is selected or
            // explicitly excluded.
            if let TableSelection::Columns(columns) = selection {
                for column in columns.keys() {
                    if table.column(column).is_none() {
                        return Err(Error::invalid_config(format!(
                            "configuration names unknown column `{name}.{column}`"
                        )));
                    }
                }
            }
        }

        for (table_name, overrides) in &self.config.many_to_many {
            let Some(table) = self.schema.table(table_name) else {
                return Err(Error::invalid_config(format!(
                    "many-to-many override names unknown table `{table_name}`"
                )));
            };

            for relation_name in overrides.keys() {
                match table
                    .relations
                    .iter()
                    .find(|relation| relation.name() == relation_name)
                {
                    Some(relation) if relation.is_many_to_many() => {}
                    Some(_) => {
                        return Err(Error::invalid_config(format!(
                            "many-to-many override targets `{table_name}.{relation_name}`, \
                             which is not a many-to-many relation"
                        )));
                    }
                    None => {
                        return Err(Error::invalid_config(format!(
                            "many-to-many override names unknown relation \
                             `{table_name}.{relation_name}`"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn is_selected(&self, table: &str) -> bool {
        self.config.is_table_selected(table)
    }

    fn selects_column(&self, table: &str, column: &str) -> bool {
        self.config
            .selection(table)
            .is_some_and(|selection| selection.selects_column(column))
    }

    fn require_selected_column(&self, relation: &str, table: &str, column: &str) -> Result<()> {
        if self.selects_column(table, column) {
            Ok(())
        } else {
            Err(Error::invalid_config(format!(
                "relation `{relation}` uses column `{table}.{column}`, which is not selected"
            )))
        }
    }

    fn build_table(
        &self,
        table: &orm::Table,
        selection: &TableSelection,
    ) -> Result<zero::TableSpec> {
        let mut columns = IndexMap::new();

        // Output order is declaration order restricted to the allow-list.
        for column in &table.columns {
            if !selection.selects_column(&column.name) {
                if column.primary_key {
                    return Err(Error::invalid_config(format!(
                        "primary key column `{}.{}` must be selected",
                        table.name, column.name
                    )));
                }
                continue;
            }

            columns.insert(
                column.name.clone(),
                zero::ColumnSpec {
                    kind: column.ty.value_kind(),
                    optional: column.nullable,
                    custom_type: column.custom_type.clone(),
                },
            );
        }

        let primary_key = table
            .primary_key_columns()
            .map(|column| column.name.clone())
            .collect();

        let mut relationships = IndexMap::new();
        for relation in &table.relations {
            if let Some(relationship) = self.build_relationship(table, relation)? {
                relationships.insert(relation.name().to_string(), relationship);
            }
        }

        Ok(zero::TableSpec {
            table_name: table.name.clone(),
            columns,
            primary_key,
            relationships,
        })
    }

    /// Resolve one declared relation. Returns `None` when the relation is
    /// dropped because its destination (or inferred junction) table is not
    /// selected.
    fn build_relationship(
        &self,
        table: &orm::Table,
        relation: &orm::Relation,
    ) -> Result<Option<zero::Relationship>> {
        if !self.is_selected(relation.dest_table()) {
            return Ok(None);
        }

        match relation {
            orm::Relation::One(direct) => self
                .build_direct(table, direct, zero::Cardinality::One)
                .map(Some),
            orm::Relation::Many(direct) => self
                .build_direct(table, direct, zero::Cardinality::Many)
                .map(Some),
            orm::Relation::ManyToMany(many_to_many) => {
                self.build_many_to_many(table, many_to_many)
            }
        }
    }

    fn build_direct(
        &self,
        table: &orm::Table,
        direct: &orm::DirectRelation,
        cardinality: zero::Cardinality,
    ) -> Result<zero::Relationship> {
        self.require_selected_column(&direct.name, &table.name, &direct.source_field)?;
        self.require_selected_column(&direct.name, &direct.dest_table, &direct.dest_field)?;

        Ok(zero::Relationship::direct(zero::RelationshipHop {
            source_field: vec![direct.source_field.clone()],
            dest_field: vec![direct.dest_field.clone()],
            dest_table: direct.dest_table.clone(),
            cardinality,
        }))
    }

    fn build_many_to_many(
        &self,
        table: &orm::Table,
        relation: &orm::ManyToManyRelation,
    ) -> Result<Option<zero::Relationship>> {
        // A configuration override takes precedence over the schema's own
        // junction declaration.
        let junction_name = match self.config.junction_config(&table.name, &relation.name) {
            Some(JunctionConfig::Chain(hops)) => {
                return self.build_explicit_chain(table, relation, hops).map(Some);
            }
            Some(JunctionConfig::Junction(name)) => Some(name.as_str()),
            None => relation.junction.as_deref(),
        };

        let junction = match junction_name {
            Some(name) => {
                let Some(junction) = self.schema.table(name) else {
                    return Err(Error::invalid_config(format!(
                        "relation `{}.{}` names unknown junction table `{name}`",
                        table.name, relation.name
                    )));
                };
                junction
            }
            None => match self.infer_junction(table, relation)? {
                Some(junction) => junction,
                None => return Ok(None),
            },
        };

        // An excluded junction drops the relation, like any other excluded
        // table a relation points at.
        if !self.is_selected(&junction.name) {
            return Ok(None);
        }

        self.junction_hops(table, relation, junction).map(Some)
    }

    /// Locate the junction table for an implicit many-to-many relation: a
    /// selected table, other than the endpoints, whose foreign keys reference
    /// both of them. Anything but exactly one selected candidate is a
    /// configuration error.
    ///
    /// Returns `None` when only unselected tables qualify; the relation is
    /// then dropped, like any other relation through an excluded table.
    fn infer_junction(
        &self,
        table: &orm::Table,
        relation: &orm::ManyToManyRelation,
    ) -> Result<Option<&orm::Table>> {
        let self_referential = table.name == relation.dest_table;

        let (selected, unselected): (Vec<&orm::Table>, Vec<&orm::Table>) = self
            .schema
            .tables()
            .filter(|candidate| {
                candidate.name != table.name && candidate.name != relation.dest_table
            })
            .filter(|candidate| {
                if self_referential {
                    candidate.references_to(&table.name).count() >= 2
                } else {
                    candidate.references_to(&table.name).next().is_some()
                        && candidate.references_to(&relation.dest_table).next().is_some()
                }
            })
            .partition(|candidate| self.is_selected(&candidate.name));

        match &selected[..] {
            [junction] => Ok(Some(*junction)),
            [] if !unselected.is_empty() => Ok(None),
            [] => Err(Error::invalid_config(format!(
                "relation `{}.{}`: no junction table references both `{}` and `{}`",
                table.name, relation.name, table.name, relation.dest_table
            ))),
            _ => Err(Error::invalid_config(format!(
                "relation `{}.{}`: ambiguous junction, candidates: {}",
                table.name,
                relation.name,
                selected
                    .iter()
                    .map(|candidate| candidate.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Derive the two-hop chain from a junction table's foreign keys.
    fn junction_hops(
        &self,
        table: &orm::Table,
        relation: &orm::ManyToManyRelation,
        junction: &orm::Table,
    ) -> Result<zero::Relationship> {
        let (source_fk, dest_fk) = if table.name == relation.dest_table {
            // Self-referential: the junction references the table twice; the
            // first foreign key in declaration order is the near side.
            let mut references = junction.references_to(&table.name);
            match (references.next(), references.next()) {
                (Some(near), Some(far)) => (near, far),
                _ => {
                    return Err(Error::invalid_config(format!(
                        "relation `{}.{}`: junction `{}` must reference `{}` twice",
                        table.name, relation.name, junction.name, table.name
                    )));
                }
            }
        } else {
            (
                self.single_foreign_key(relation, junction, &table.name)?,
                self.single_foreign_key(relation, junction, &relation.dest_table)?,
            )
        };

        // Both columns came out of `references_to`, so the targets are set
        // and verified non-dangling by `Schema::verify`.
        let source_ref = source_fk.references.as_ref().expect("foreign key column");
        let dest_ref = dest_fk.references.as_ref().expect("foreign key column");

        self.require_selected_column(&relation.name, &table.name, &source_ref.column)?;
        self.require_selected_column(&relation.name, &junction.name, &source_fk.name)?;
        self.require_selected_column(&relation.name, &junction.name, &dest_fk.name)?;
        self.require_selected_column(&relation.name, &relation.dest_table, &dest_ref.column)?;

        Ok(zero::Relationship::junction(
            zero::RelationshipHop {
                source_field: vec![source_ref.column.clone()],
                dest_field: vec![source_fk.name.clone()],
                dest_table: junction.name.clone(),
                cardinality: zero::Cardinality::Many,
            },
            zero::RelationshipHop {
                source_field: vec![dest_fk.name.clone()],
                dest_field: vec![dest_ref.column.clone()],
                dest_table: relation.dest_table.clone(),
                cardinality: zero::Cardinality::Many,
            },
        ))
    }

    fn single_foreign_key<'a>(
        &self,
        relation: &orm::ManyToManyRelation,
        junction: &'a orm::Table,
        target: &'a str,
    ) -> Result<&'a orm::Column> {
        let mut references = junction.references_to(target);
        match (references.next(), references.next()) {
            (Some(column), None) => Ok(column),
            (None, _) => Err(Error::invalid_config(format!(
                "relation `{}`: junction `{}` has no foreign key to `{target}`",
                relation.name, junction.name
            ))),
            (Some(_), Some(_)) => Err(Error::invalid_config(format!(
                "relation `{}`: junction `{}` has more than one foreign key to `{target}`",
                relation.name, junction.name
            ))),
        }
    }

    /// Use a fully spelled-out two-hop chain from the configuration.
    fn build_explicit_chain(
        &self,
        table: &orm::Table,
        relation: &orm::ManyToManyRelation,
        hops: &[JunctionHop],
    ) -> Result<zero::Relationship> {
        let [first, second] = hops else {
            return Err(Error::invalid_config(format!(
                "relation `{}.{}`: explicit chain must have exactly two hops, got {}",
                table.name,
                relation.name,
                hops.len()
            )));
        };

        let Some(junction) = self.schema.table(&first.dest_table) else {
            return Err(Error::invalid_config(format!(
                "relation `{}.{}`: chain names unknown junction table `{}`",
                table.name, relation.name, first.dest_table
            )));
        };

        if second.dest_table != relation.dest_table {
            return Err(Error::invalid_config(format!(
                "relation `{}.{}`: chain ends at `{}`, expected `{}`",
                table.name, relation.name, second.dest_table, relation.dest_table
            )));
        }

        // The destination survived `Schema::verify`, which rejects relations
        // targeting unknown tables.
        let dest = self
            .schema
            .table(&relation.dest_table)
            .expect("destination table");

        // Chain fields come straight from the configuration, so unlike
        // derived hops they must be checked against the schema.
        for (owner, column) in [
            (table, &first.source_field),
            (junction, &first.dest_field),
            (junction, &second.source_field),
            (dest, &second.dest_field),
        ] {
            if owner.column(column).is_none() {
                return Err(Error::invalid_config(format!(
                    "relation `{}.{}`: chain names unknown column `{}.{column}`",
                    table.name, relation.name, owner.name
                )));
            }
        }

        self.require_selected_column(&relation.name, &table.name, &first.source_field)?;
        self.require_selected_column(&relation.name, &junction.name, &first.dest_field)?;
        self.require_selected_column(&relation.name, &junction.name, &second.source_field)?;
        self.require_selected_column(&relation.name, &relation.dest_table, &second.dest_field)?;

        Ok(zero::Relationship::junction(
            zero::RelationshipHop {
                source_field: vec![first.source_field.clone()],
                dest_field: vec![first.dest_field.clone()],
                dest_table: junction.name.clone(),
                cardinality: zero::Cardinality::Many,
            },
            zero::RelationshipHop {
                source_field: vec![second.source_field.clone()],
                dest_field: vec![second.dest_field.clone()],
                dest_table: relation.dest_table.clone(),
                cardinality: zero::Cardinality::Many,
            },
        ))
    }
}
