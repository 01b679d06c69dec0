pub mod orm;

mod builder;
pub use builder::Builder;

pub mod zero;
