use opmodel_types::TypeStore;

use crate::{ExtractError, ModelDelta};

/// A source of class definitions and model contributions.
///
/// Implementations define whatever classes they know about in `store` and describe, in the
/// returned delta, which of them are under test and which types they observed.
pub trait Extractor {
    fn extract(&self, store: &mut TypeStore) -> Result<ModelDelta, ExtractError>;
}

impl<E: Extractor + ?Sized> Extractor for &E {
    fn extract(&self, store: &mut TypeStore) -> Result<ModelDelta, ExtractError> {
        (**self).extract(store)
    }
}

/// Contributes a fixed delta without touching the store.
impl Extractor for ModelDelta {
    fn extract(&self, _store: &mut TypeStore) -> Result<ModelDelta, ExtractError> {
        Ok(self.clone())
    }
}
