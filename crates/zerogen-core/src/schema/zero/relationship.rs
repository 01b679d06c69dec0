use serde::Serialize;

/// How many destination rows a hop can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

/// One foreign-key step of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipHop {
    /// Columns on the table the hop starts from.
    pub source_field: Vec<String>,

    /// Matching columns on the destination table.
    pub dest_field: Vec<String>,

    /// Destination table, referenced by name. The descriptor is looked up
    /// lazily through [`super::Schema::table`], never embedded, so
    /// self-referential relations do not expand infinitely.
    #[serde(rename = "destSchema")]
    pub dest_table: String,

    pub cardinality: Cardinality,
}

/// A resolved relationship: either a single foreign-key hop or a two-hop
/// chain through a junction table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Relationship {
    pub hops: Vec<RelationshipHop>,
}

impl Relationship {
    /// A direct, foreign-key-based relationship.
    pub fn direct(hop: RelationshipHop) -> Self {
        Self { hops: vec![hop] }
    }

    /// A junction-mediated relationship: source → junction → destination.
    pub fn junction(first: RelationshipHop, second: RelationshipHop) -> Self {
        Self {
            hops: vec![first, second],
        }
    }

    pub fn is_junction(&self) -> bool {
        self.hops.len() == 2
    }

    /// The table the relationship ultimately lands on.
    pub fn dest_table(&self) -> &str {
        &self
            .hops
            .last()
            .expect("relationship has at least one hop")
            .dest_table
    }
}
