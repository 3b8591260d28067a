use thiserror::Error;

/// Failure turning an external description of classes into store definitions.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid model input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class `{name}` is declared more than once")]
    DuplicateClass { name: String },

    #[error("type parameter `{name}` is declared more than once on `{owner}`")]
    DuplicateTypeParameter { owner: String, name: String },

    #[error("unknown class `{name}`")]
    UnknownClass { name: String },

    #[error("invalid type reference `{reference}`: {reason}")]
    InvalidTypeRef { reference: String, reason: String },
}

/// The only failures that abort a model build. Per-class problems are recorded as skipped
/// declarations instead.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("the type store does not define `java.lang.Object`")]
    MissingRootType,

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
