//! Concrete instantiation of generic classes.
//!
//! Given a generic class whose type parameters carry (possibly inter-dependent) upper bounds and a
//! universe of observed concrete types, [`substitutions`] computes every simultaneous assignment
//! satisfying all bounds and [`Resolver`] picks one of them, producing a class type with no type
//! parameters left open.
//!
//! ```text
//! class Pair<T, U extends T>      universe = {Integer, Number, String}
//!
//!   T: [Integer] [Number] [String]
//!   U: [Integer, Integer] [Number, Integer] [Number, Number] [String, String]
//! ```

mod candidates;
mod error;
mod randomness;
mod resolver;
mod tuples;

pub use candidates::{select_candidates, select_independent_candidates, TypeUniverse};
pub use error::ResolveError;
pub use randomness::Randomness;
pub use resolver::{Instantiation, Resolver, ResolverOptions, SelectionMode, DEFAULT_MAX_TUPLES};
pub use tuples::{substitutions, substitutions_by_product, TupleLimitExceeded, TypeTupleSet};
