use opmodel::{ModelBuilder, ModelInput, OperationModel};
use opmodel_resolve::{Randomness, Resolver, ResolverOptions, SelectionMode};
use opmodel_types::TypeStore;

pub fn first_resolver() -> Resolver {
    Resolver::new(
        ResolverOptions {
            selection: SelectionMode::First,
            ..ResolverOptions::default()
        },
        Randomness::default(),
    )
}

/// Extract `json` into a minimal-JDK store and build with [`first_resolver`].
pub fn build(json: &str) -> (TypeStore, OperationModel) {
    let mut store = TypeStore::with_minimal_jdk();
    let input = ModelInput::from_json(json).expect("valid model input");
    let model = ModelBuilder::new()
        .extract(&input, &mut store)
        .expect("extraction succeeds")
        .build(&store, &first_resolver())
        .expect("model builds");
    (store, model)
}

pub fn signatures(store: &TypeStore, model: &OperationModel) -> Vec<String> {
    model.operations().map(|op| op.signature(store)).collect()
}
