use thiserror::Error;

/// Why a class could not be turned into a concrete type.
///
/// None of these are fatal to a model build: the caller skips the declaration and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("class #{0} is not defined in the type store")]
    UnknownClass(u32),

    #[error("no assignment of observed types satisfies the bounds of `{class}`")]
    Unresolvable { class: String },

    #[error(
        "bound of type parameter `{param}` in `{class}` references `{referenced}`, which is not declared before it"
    )]
    MalformedBoundGraph {
        class: String,
        param: String,
        referenced: String,
    },

    #[error("instantiating `{class}` exceeded the limit of {limit} candidate tuples")]
    TupleLimitExceeded { class: String, limit: usize },

    #[error("instantiation `{ty}` of `{class}` still has open type parameters")]
    StillGeneric { class: String, ty: String },
}

impl ResolveError {
    /// Short machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::UnknownClass(_) => "unknown-class",
            ResolveError::Unresolvable { .. } => "unresolvable",
            ResolveError::MalformedBoundGraph { .. } => "malformed-bound-graph",
            ResolveError::TupleLimitExceeded { .. } => "tuple-limit-exceeded",
            ResolveError::StillGeneric { .. } => "still-generic",
        }
    }
}
