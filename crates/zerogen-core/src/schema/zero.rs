//! Generated-side schema: the shape consumed by the client sync engine.
//!
//! Relationships reference their destination table by name rather than
//! embedding the destination descriptor, so self-referential and cyclic
//! relations stay finite. [`Schema::table`] performs the lazy lookup.

mod column;
pub use column::{ColumnSpec, ValueKind};

mod relationship;
pub use relationship::{Cardinality, Relationship, RelationshipHop};

mod schema;
pub use schema::Schema;

mod table;
pub use table::TableSpec;
