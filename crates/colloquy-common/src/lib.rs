pub mod errors;

pub use errors::{ColloquyError, ConfigError};

pub type Result<T> = std::result::Result<T, ColloquyError>;
