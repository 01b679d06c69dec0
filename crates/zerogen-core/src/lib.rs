pub mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub mod schema;

/// A Result type alias that uses zerogen's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
