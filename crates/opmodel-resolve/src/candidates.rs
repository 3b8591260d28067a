use std::collections::HashMap;

use indexmap::IndexSet;
use opmodel_types::{ParameterBound, Type, TypeEnv, TypeVarId};

/// Types observed across the classes being modelled, in first-seen order.
///
/// The universe may hold anything the extractors saw (primitives included); only concrete
/// reference types are ever offered as candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeUniverse {
    types: IndexSet<Type>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the type was already present.
    pub fn insert(&mut self, ty: Type) -> bool {
        self.types.insert(ty)
    }

    pub fn contains(&self, ty: &Type) -> bool {
        self.types.contains(ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Type> + '_ {
        self.types.iter()
    }

    /// The types eligible to instantiate a type parameter.
    pub fn candidates(&self) -> impl Iterator<Item = &Type> + '_ {
        self.types
            .iter()
            .filter(|ty| ty.is_reference() && ty.is_concrete())
    }
}

impl FromIterator<Type> for TypeUniverse {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl Extend<Type> for TypeUniverse {
    fn extend<I: IntoIterator<Item = Type>>(&mut self, iter: I) {
        self.types.extend(iter);
    }
}

/// Universe types that may instantiate `param`, given the types already chosen for earlier
/// parameters in `assigned`. Universe order is preserved.
///
/// A bound that refers to `param` itself (`E extends Comparable<E>`) is evaluated with `param`
/// bound to each candidate in turn.
pub fn select_candidates(
    env: &dyn TypeEnv,
    param: TypeVarId,
    bound: &ParameterBound,
    universe: &TypeUniverse,
    assigned: &HashMap<TypeVarId, Type>,
) -> Vec<Type> {
    if !bound.referenced_vars().contains(&param) {
        return universe
            .candidates()
            .filter(|candidate| bound.is_satisfied_by(env, candidate, assigned))
            .cloned()
            .collect();
    }

    let mut with_self = assigned.clone();
    universe
        .candidates()
        .filter(|candidate| {
            with_self.insert(param, (*candidate).clone());
            bound.is_satisfied_by(env, candidate, &with_self)
        })
        .cloned()
        .collect()
}

/// Universe types admitted by `bound` when evaluated on its own. Dependent parts of the bound are
/// not checked, so this is an over-approximation of [`select_candidates`] under any assignment.
pub fn select_independent_candidates(
    env: &dyn TypeEnv,
    bound: &ParameterBound,
    universe: &TypeUniverse,
) -> Vec<Type> {
    universe
        .candidates()
        .filter(|candidate| bound.admits_independently(env, candidate))
        .cloned()
        .collect()
}
