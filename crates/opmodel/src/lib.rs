//! The operation model: which concrete classes and operations a test generator may use.
//!
//! Extractors describe classes in a [`TypeStore`](opmodel_types::TypeStore) and contribute
//! [`ModelDelta`]s; [`ModelBuilder`] merges them, instantiates every generic class under test
//! through an [`opmodel_resolve::Resolver`] and collects the resulting [`Operation`]s.
//!
//! ```no_run
//! use opmodel::{ModelBuilder, ModelInput};
//! use opmodel_resolve::Resolver;
//! use opmodel_types::TypeStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = TypeStore::with_minimal_jdk();
//! let input = ModelInput::from_json(&std::fs::read_to_string("model.json")?)?;
//! let model = ModelBuilder::new()
//!     .extract(&input, &mut store)?
//!     .build(&store, &Resolver::default())?;
//! for op in model.operations() {
//!     println!("{}", op.signature(&store));
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod delta;
mod error;
mod extract;
mod input;
mod model;
mod operation;
mod report;

pub use builder::ModelBuilder;
pub use delta::ModelDelta;
pub use error::{ExtractError, ModelError};
pub use extract::Extractor;
pub use input::{
    ClassInput, ConstructorInput, MethodInput, ModelInput, OperationInput, TypeParamInput, TypeRef,
};
pub use model::{OperationModel, SkipReason, SkippedDeclaration};
pub use operation::{Operation, OperationKind};
pub use report::{ModelReport, SkippedReport};
