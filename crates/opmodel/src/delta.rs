use opmodel_types::{ClassId, Type};

use crate::Operation;

/// What one extraction step contributed to the model. Deltas are merged in order by
/// [`crate::ModelBuilder`]; none of them is mutated after it has been produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelDelta {
    /// Classes whose operations should be modelled, in the order they were requested.
    pub classes_under_test: Vec<ClassId>,
    /// Classes a generated test must exercise to be kept; not necessarily under test.
    pub exercised_classes: Vec<ClassId>,
    /// Types seen in signatures or supplied by the user; the candidates for type parameters.
    pub input_types: Vec<Type>,
    /// Operations supplied directly rather than discovered through a class.
    pub operations: Vec<Operation>,
}

impl ModelDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: ClassId) -> Self {
        self.classes_under_test.push(class);
        self
    }

    pub fn with_exercised_class(mut self, class: ClassId) -> Self {
        self.exercised_classes.push(class);
        self
    }

    pub fn with_input_type(mut self, ty: Type) -> Self {
        self.input_types.push(ty);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.classes_under_test.is_empty()
            && self.exercised_classes.is_empty()
            && self.input_types.is_empty()
            && self.operations.is_empty()
    }
}
