use std::collections::HashMap;

use crate::{is_subtype, substitute, Type, TypeEnv, TypeVarId};

/// Restriction on the concrete types that may instantiate a type parameter.
///
/// A bound that mentions type variables is [`ParameterBound::Dependent`]: it can only be decided
/// once the referenced variables have been assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterBound {
    /// Any concrete reference type.
    Unconstrained,
    /// The candidate must be a subtype of this (variable-free) type.
    Concrete(Type),
    /// The candidate must be a subtype of `upper` after `on` have been substituted.
    Dependent { upper: Type, on: Vec<TypeVarId> },
    /// `T extends A & B`: every part must hold.
    Intersection(Vec<ParameterBound>),
}

impl ParameterBound {
    pub fn upper(ty: Type) -> Self {
        let on = ty.type_vars();
        if on.is_empty() {
            ParameterBound::Concrete(ty)
        } else {
            ParameterBound::Dependent { upper: ty, on }
        }
    }

    /// Build a bound from a declared `extends` list. An empty list is unconstrained.
    pub fn from_upper_bounds(bounds: Vec<Type>) -> Self {
        let mut bounds = bounds;
        match bounds.len() {
            0 => ParameterBound::Unconstrained,
            1 => ParameterBound::upper(bounds.remove(0)),
            _ => ParameterBound::Intersection(bounds.into_iter().map(Self::upper).collect()),
        }
    }

    pub fn is_dependent(&self) -> bool {
        !self.referenced_vars().is_empty()
    }

    /// Type variables this bound needs before it can be evaluated, in first-occurrence order.
    pub fn referenced_vars(&self) -> Vec<TypeVarId> {
        let mut out = Vec::new();
        self.collect_referenced_vars(&mut out);
        out
    }

    fn collect_referenced_vars(&self, out: &mut Vec<TypeVarId>) {
        match self {
            ParameterBound::Unconstrained | ParameterBound::Concrete(_) => {}
            ParameterBound::Dependent { on, .. } => {
                for var in on {
                    if !out.contains(var) {
                        out.push(*var);
                    }
                }
            }
            ParameterBound::Intersection(parts) => {
                for part in parts {
                    part.collect_referenced_vars(out);
                }
            }
        }
    }

    /// Upper-bound types as declared (before substitution).
    pub fn upper_types(&self) -> Vec<&Type> {
        match self {
            ParameterBound::Unconstrained => Vec::new(),
            ParameterBound::Concrete(ty) | ParameterBound::Dependent { upper: ty, .. } => vec![ty],
            ParameterBound::Intersection(parts) => {
                parts.iter().flat_map(ParameterBound::upper_types).collect()
            }
        }
    }

    /// Decide whether `candidate` satisfies this bound.
    ///
    /// `assigned` must map every variable in [`Self::referenced_vars`]; for a self-referential
    /// bound (`E extends Comparable<E>`) that includes the parameter being tested, mapped to
    /// `candidate`. A dependent bound that still mentions type variables after substitution is
    /// never satisfied.
    pub fn is_satisfied_by(
        &self,
        env: &dyn TypeEnv,
        candidate: &Type,
        assigned: &HashMap<TypeVarId, Type>,
    ) -> bool {
        match self {
            ParameterBound::Unconstrained => candidate.is_reference(),
            ParameterBound::Concrete(upper) => is_subtype(env, candidate, upper),
            ParameterBound::Dependent { upper, .. } => {
                let upper = substitute(upper, assigned);
                !upper.mentions_type_vars() && is_subtype(env, candidate, &upper)
            }
            ParameterBound::Intersection(parts) => parts
                .iter()
                .all(|part| part.is_satisfied_by(env, candidate, assigned)),
        }
    }

    /// Evaluate the bound with nothing assigned: independent parts are tested exactly, dependent
    /// parts accept every reference type. The result is a superset of what
    /// [`Self::is_satisfied_by`] accepts under any assignment.
    pub fn admits_independently(&self, env: &dyn TypeEnv, candidate: &Type) -> bool {
        match self {
            ParameterBound::Unconstrained | ParameterBound::Dependent { .. } => {
                candidate.is_reference()
            }
            ParameterBound::Concrete(upper) => is_subtype(env, candidate, upper),
            ParameterBound::Intersection(parts) => parts
                .iter()
                .all(|part| part.admits_independently(env, candidate)),
        }
    }
}
