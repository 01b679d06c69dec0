//! Source-side ORM schema: the tables, columns and relations declared by the
//! schema document the generator reads.

mod column;
pub use column::{Column, ColumnRef, ColumnType};

mod relation;
pub use relation::{DirectRelation, ManyToManyRelation, Relation};

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;
