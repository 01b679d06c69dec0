use serde::Deserialize;

/// A relation declared on a source table.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    /// One-to-one: the source row points at at most one destination row.
    One(DirectRelation),

    /// One-to-many: the source row points at any number of destination rows.
    Many(DirectRelation),

    /// Many-to-many, mediated by a junction table.
    ManyToMany(ManyToManyRelation),
}

/// A foreign-key-based relation between two tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectRelation {
    /// Relation name. Unique within the declaring table.
    pub name: String,

    /// Column on the declaring table.
    pub source_field: String,

    /// The destination table.
    pub dest_table: String,

    /// Column on the destination table.
    pub dest_field: String,
}

/// A many-to-many relation. The two foreign-key hops are derived from the
/// junction table, which is either named explicitly or inferred from the
/// schema's foreign keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManyToManyRelation {
    /// Relation name. Unique within the declaring table.
    pub name: String,

    /// The far endpoint of the relation.
    pub dest_table: String,

    /// Explicit junction table. When absent, the resolver must find exactly
    /// one table holding foreign keys to both endpoints.
    #[serde(default)]
    pub junction: Option<String>,
}

impl Relation {
    /// The relation's name.
    pub fn name(&self) -> &str {
        match self {
            Self::One(rel) | Self::Many(rel) => &rel.name,
            Self::ManyToMany(rel) => &rel.name,
        }
    }

    /// The destination table name.
    pub fn dest_table(&self) -> &str {
        match self {
            Self::One(rel) | Self::Many(rel) => &rel.dest_table,
            Self::ManyToMany(rel) => &rel.dest_table,
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self, Self::ManyToMany(..))
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToManyRelation> {
        match self {
            Self::ManyToMany(rel) => Some(rel),
            _ => None,
        }
    }
}
