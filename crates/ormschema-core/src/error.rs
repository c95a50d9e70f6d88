use thiserror::Error;

/// Core error type shared across ormschema crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// A relationship or lookup named an entity the catalog does not hold.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}

/// Convenience alias for results returned by ormschema crates.
pub type Result<T> = std::result::Result<T, Error>;
