use thiserror::Error;

/// Invalid translation request. Raised before any schema class is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Include and exclude both select fields at the same entity scope.
    #[error("ambiguous field selection: include and exclude both apply to {scope}")]
    AmbiguousSelection { scope: String },
    /// The generated schema class needs an explicit, non-blank name.
    #[error("missing class name")]
    MissingClassName,
    /// An include path does not resolve against the source entity.
    #[error("unknown field: {entity} has no field path '{path}'")]
    UnknownField { entity: String, path: String },
    /// A field path is empty or has an empty segment.
    #[error("invalid field path: '{0}'")]
    InvalidPath(String),
    /// A relationship names an entity the catalog does not hold.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    /// A registered class name was requested with a different selection.
    #[error("class name already registered for a different request: {0}")]
    DuplicateClassName(String),
}

/// Result type for translation requests.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Failure to build a record of a generated class from a source object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PopulateError {
    #[error("missing required field: {path}")]
    MissingField { path: String },
    #[error("type mismatch at {path}: expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
}
