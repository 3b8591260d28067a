use std::fmt;

use indexmap::{IndexMap, IndexSet};
use opmodel_resolve::{ResolveError, TypeUniverse};
use opmodel_types::{ClassId, ClassKind, ClassType, Type, TypeEnv};

use crate::Operation;

/// Why a class under test did not contribute a concrete type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Interface,
    /// Abstract classes other than enums.
    Abstract,
    Unresolved(ResolveError),
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::Interface => "interface",
            SkipReason::Abstract => "abstract",
            SkipReason::Unresolved(err) => err.code(),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Interface => f.write_str("interfaces cannot be instantiated"),
            SkipReason::Abstract => f.write_str("abstract classes cannot be instantiated"),
            SkipReason::Unresolved(err) => fmt::Display::fmt(err, f),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedDeclaration {
    pub class: String,
    pub reason: SkipReason,
}

/// The concrete classes and operations a test generator may use.
///
/// Produced once by [`crate::ModelBuilder::build`] and read-only afterwards.
#[derive(Clone, Debug)]
pub struct OperationModel {
    pub(crate) classes: IndexSet<ClassType>,
    pub(crate) operations: IndexSet<Operation>,
    pub(crate) input_types: TypeUniverse,
    pub(crate) exercised: IndexSet<ClassId>,
    pub(crate) skipped: Vec<SkippedDeclaration>,
    pub(crate) has_classes: bool,
}

impl OperationModel {
    /// Every concrete class type, including `java.lang.Object`.
    pub fn concrete_classes(&self) -> impl Iterator<Item = &ClassType> + '_ {
        self.classes.iter()
    }

    pub fn contains_class(&self, ty: &ClassType) -> bool {
        self.classes.contains(ty)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.operations.iter()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn input_types(&self) -> &TypeUniverse {
        &self.input_types
    }

    pub fn skipped(&self) -> &[SkippedDeclaration] {
        &self.skipped
    }

    /// Declarations whose use marks a generated test as worth keeping. Interfaces are never
    /// included.
    pub fn exercised_classes(&self) -> &IndexSet<ClassId> {
        &self.exercised
    }

    /// Whether at least one class under test was accepted, i.e. was neither an interface nor a
    /// non-enum abstract class. An accepted class that later failed to resolve still counts.
    pub fn has_classes(&self) -> bool {
        self.has_classes
    }

    /// Methods accepted by `is_observer` whose result can be checked without further calls: a
    /// primitive, `java.lang.String` or an enum. Grouped by declaring type.
    pub fn observers<F>(
        &self,
        env: &dyn TypeEnv,
        mut is_observer: F,
    ) -> IndexMap<ClassType, Vec<&Operation>>
    where
        F: FnMut(&Operation) -> bool,
    {
        let mut out: IndexMap<ClassType, Vec<&Operation>> = IndexMap::new();
        for op in &self.operations {
            if op.is_constructor() || !is_observable(env, &op.output) || !is_observer(op) {
                continue;
            }
            out.entry(op.declaring.clone()).or_default().push(op);
        }
        out
    }
}

fn is_observable(env: &dyn TypeEnv, ty: &Type) -> bool {
    match ty {
        Type::Primitive(_) => true,
        Type::Class(class) => {
            class.def == env.well_known().string
                || env
                    .class(class.def)
                    .is_some_and(|def| def.kind == ClassKind::Enum)
        }
        _ => false,
    }
}
