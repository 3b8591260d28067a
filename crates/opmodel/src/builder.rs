use indexmap::IndexSet;
use opmodel_resolve::{ResolveError, Resolver, TypeUniverse};
use opmodel_types::{format_class_type, ClassId, ClassKind, ClassType, TypeEnv, TypeStore};

use crate::model::{OperationModel, SkipReason, SkippedDeclaration};
use crate::{Extractor, ModelDelta, ModelError, Operation};

/// Accumulates [`ModelDelta`]s and turns them into an [`OperationModel`].
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    classes: IndexSet<ClassId>,
    exercised: IndexSet<ClassId>,
    input_types: TypeUniverse,
    operations: Vec<Operation>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `delta` into the builder. Classes and input types keep their first-seen order.
    pub fn merge(&mut self, delta: ModelDelta) -> &mut Self {
        self.classes.extend(delta.classes_under_test);
        self.exercised.extend(delta.exercised_classes);
        self.input_types.extend(delta.input_types);
        self.operations.extend(delta.operations);
        self
    }

    /// Run `extractor` against `store` and merge what it produced.
    pub fn extract(
        &mut self,
        extractor: &dyn Extractor,
        store: &mut TypeStore,
    ) -> Result<&mut Self, ModelError> {
        let delta = extractor.extract(store)?;
        Ok(self.merge(delta))
    }

    pub fn input_types(&self) -> &TypeUniverse {
        &self.input_types
    }

    /// Instantiate every class under test and collect its operations.
    ///
    /// A class that cannot be instantiated is recorded in [`OperationModel::skipped`] and the
    /// build carries on. The only hard failure is a store without `java.lang.Object`.
    pub fn build(&self, env: &dyn TypeEnv, resolver: &Resolver) -> Result<OperationModel, ModelError> {
        let object = env.well_known().object;
        if env.class(object).is_none() {
            return Err(ModelError::MissingRootType);
        }

        let mut model = OperationModel {
            classes: IndexSet::new(),
            operations: IndexSet::new(),
            input_types: self.input_types.clone(),
            exercised: IndexSet::new(),
            skipped: Vec::new(),
            has_classes: false,
        };

        for class in self.classes.iter().copied() {
            match self.instantiate(env, resolver, class, &mut model) {
                Ok(()) => {}
                Err(reason) => {
                    let name = env
                        .class_name(class)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("<unknown#{}>", class.to_raw()));
                    tracing::warn!(
                        class = %name,
                        reason = reason.code(),
                        "skipping class: {reason}"
                    );
                    model.skipped.push(SkippedDeclaration {
                        class: name,
                        reason,
                    });
                }
            }
        }

        for class in self.exercised.iter().copied() {
            match env.class(class) {
                Some(def) if def.kind == ClassKind::Interface => {
                    tracing::warn!(class = %def.name, "ignoring interface given as exercised class");
                }
                Some(_) => {
                    model.exercised.insert(class);
                }
                None => tracing::warn!(
                    class = class.to_raw(),
                    "ignoring undefined exercised class"
                ),
            }
        }

        for op in &self.operations {
            if !op.is_concrete() {
                tracing::debug!(operation = %op.signature(env), "ignoring non-concrete operation");
                continue;
            }
            model.classes.insert(op.declaring.clone());
            model.operations.insert(op.clone());
        }

        let root = ClassType::new(object, vec![]);
        model.classes.insert(root.clone());
        model.operations.insert(Operation::constructor(root, vec![]));

        tracing::debug!(
            classes = model.classes.len(),
            operations = model.operations.len(),
            skipped = model.skipped.len(),
            "built operation model"
        );
        Ok(model)
    }

    fn instantiate(
        &self,
        env: &dyn TypeEnv,
        resolver: &Resolver,
        class: ClassId,
        model: &mut OperationModel,
    ) -> Result<(), SkipReason> {
        let Some(def) = env.class(class) else {
            return Err(SkipReason::Unresolved(ResolveError::UnknownClass(
                class.to_raw(),
            )));
        };
        if def.kind == ClassKind::Interface {
            return Err(SkipReason::Interface);
        }
        if def.is_abstract && def.kind != ClassKind::Enum {
            return Err(SkipReason::Abstract);
        }
        model.has_classes = true;

        let instantiation = resolver
            .instantiate(env, class, &self.input_types)
            .map_err(SkipReason::Unresolved)?;

        let declaring = &instantiation.class_type;
        let subst = &instantiation.substitution;
        let ops = def
            .constructors
            .iter()
            .map(|ctor| Some(Operation::for_constructor(declaring, ctor, subst)))
            .chain(
                def.methods
                    .iter()
                    .map(|method| Operation::for_method(declaring, method, subst)),
            );
        for op in ops {
            match op {
                Some(op) if op.is_concrete() => {
                    model.operations.insert(op);
                }
                _ => tracing::trace!(
                    class = %format_class_type(env, declaring),
                    "omitting generic operation"
                ),
            }
        }

        model.classes.insert(instantiation.class_type);
        Ok(())
    }
}
