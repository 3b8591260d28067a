//! Tuple extension: builds every bound-satisfying assignment of a generic class's type parameters,
//! one parameter at a time.
//!
//! Each step extends every surviving prefix with the candidates its parameter admits *given that
//! prefix*, so a restrictive early bound prunes the search before later parameters multiply it.

use std::collections::HashMap;

use opmodel_types::{ClassDef, ClassId, ParameterBound, Substitution, Type, TypeEnv, TypeVarId};

use crate::candidates::{select_candidates, select_independent_candidates, TypeUniverse};
use crate::ResolveError;

/// Returned by [`TypeTupleSet`] when an extension would exceed the configured ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleLimitExceeded {
    pub limit: usize,
}

/// A set of equal-length partial assignments. Starts with a single empty tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTupleSet {
    tuples: Vec<Vec<Type>>,
    limit: Option<usize>,
}

impl TypeTupleSet {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            tuples: vec![Vec::new()],
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Length of every tuple in the set (0 before the first extension).
    pub fn width(&self) -> usize {
        self.tuples.first().map_or(0, Vec::len)
    }

    pub fn tuples(&self) -> &[Vec<Type>] {
        &self.tuples
    }

    /// Replace every tuple `p` with `p + [c]` for each `c` in `candidates(p)`. A prefix with no
    /// candidates is dropped.
    pub fn extend_with<F>(&mut self, mut candidates: F) -> Result<(), TupleLimitExceeded>
    where
        F: FnMut(&[Type]) -> Vec<Type>,
    {
        let mut next = Vec::new();
        for prefix in &self.tuples {
            for candidate in candidates(prefix) {
                if let Some(limit) = self.limit {
                    if next.len() >= limit {
                        return Err(TupleLimitExceeded { limit });
                    }
                }
                let mut tuple = Vec::with_capacity(prefix.len() + 1);
                tuple.extend(prefix.iter().cloned());
                tuple.push(candidate);
                next.push(tuple);
            }
        }
        self.tuples = next;
        Ok(())
    }

    /// Unpruned Cartesian extension with the same candidates for every prefix.
    pub fn extend(&mut self, candidates: &[Type]) -> Result<(), TupleLimitExceeded> {
        self.extend_with(|_| candidates.to_vec())
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<Type>) -> bool,
    {
        self.tuples.retain(keep);
    }

    /// Zip every tuple positionally with `vars`. Tuples of the wrong width are skipped.
    pub fn into_substitutions(self, vars: &[TypeVarId]) -> Vec<Substitution> {
        self.tuples
            .into_iter()
            .filter_map(|types| Substitution::new(vars, types))
            .collect()
    }
}

/// Type parameters of `def` in declaration order with their bounds, after checking that every
/// bound only refers to itself or to parameters declared before it.
fn ordered_params<'env>(
    env: &'env dyn TypeEnv,
    def: &ClassDef,
) -> Result<Vec<(TypeVarId, &'env ParameterBound)>, ResolveError> {
    let param_name = |var: TypeVarId| {
        env.type_param(var)
            .map(|tp| tp.name.clone())
            .unwrap_or_else(|| format!("<tvar#{}>", var.to_raw()))
    };

    let mut out = Vec::with_capacity(def.type_params.len());
    for (position, var) in def.type_params.iter().copied().enumerate() {
        let Some(tp) = env.type_param(var) else {
            return Err(ResolveError::MalformedBoundGraph {
                class: def.name.clone(),
                param: param_name(var),
                referenced: param_name(var),
            });
        };
        // `T extends T` is cyclic; `T extends Comparable<T>` is not.
        let self_var = Type::TypeVar(var);
        if tp.bound.upper_types().into_iter().any(|upper| *upper == self_var) {
            return Err(ResolveError::MalformedBoundGraph {
                class: def.name.clone(),
                param: tp.name.clone(),
                referenced: tp.name.clone(),
            });
        }
        for referenced in tp.bound.referenced_vars() {
            let declared_at = def.type_params.iter().position(|p| *p == referenced);
            if !matches!(declared_at, Some(at) if at <= position) {
                return Err(ResolveError::MalformedBoundGraph {
                    class: def.name.clone(),
                    param: tp.name.clone(),
                    referenced: param_name(referenced),
                });
            }
        }
        out.push((var, &tp.bound));
    }
    Ok(out)
}

fn class_def(env: &dyn TypeEnv, class: ClassId) -> Result<&ClassDef, ResolveError> {
    env.class(class)
        .ok_or(ResolveError::UnknownClass(class.to_raw()))
}

/// Every assignment of universe types to the type parameters of `class` that satisfies all of
/// their bounds, in extension order.
///
/// A non-generic class yields one empty substitution. An empty result is not an error here;
/// callers decide what an uninstantiable class means.
pub fn substitutions(
    env: &dyn TypeEnv,
    class: ClassId,
    universe: &TypeUniverse,
    max_tuples: Option<usize>,
) -> Result<Vec<Substitution>, ResolveError> {
    let def = class_def(env, class)?;
    let params = ordered_params(env, def)?;

    let mut tuples = TypeTupleSet::new(max_tuples);
    let mut assigned: HashMap<TypeVarId, Type> = HashMap::with_capacity(params.len());
    for (position, (param, bound)) in params.iter().enumerate() {
        let earlier = &params[..position];
        tuples
            .extend_with(|prefix| {
                assigned.clear();
                for ((var, _), ty) in earlier.iter().zip(prefix) {
                    assigned.insert(*var, ty.clone());
                }
                select_candidates(env, *param, bound, universe, &assigned)
            })
            .map_err(|TupleLimitExceeded { limit }| {
                tracing::warn!(
                    class = %def.name,
                    limit,
                    position,
                    "tuple limit exceeded while instantiating type parameters"
                );
                ResolveError::TupleLimitExceeded {
                    class: def.name.clone(),
                    limit,
                }
            })?;

        tracing::trace!(
            class = %def.name,
            position,
            surviving = tuples.len(),
            "extended type parameter tuples"
        );
        if tuples.is_empty() {
            break;
        }
    }

    Ok(tuples.into_substitutions(&def.type_params))
}

/// Reference algorithm: the full Cartesian product of each parameter's independently selected
/// candidates, filtered afterwards by every bound under the complete assignment.
///
/// Produces the same set as [`substitutions`] (possibly in a different order); it exists to check
/// the pruning engine and is exponential without any early cut-off.
pub fn substitutions_by_product(
    env: &dyn TypeEnv,
    class: ClassId,
    universe: &TypeUniverse,
) -> Result<Vec<Substitution>, ResolveError> {
    let def = class_def(env, class)?;
    let params = ordered_params(env, def)?;

    let mut tuples = TypeTupleSet::new(None);
    for (_, bound) in &params {
        let candidates = select_independent_candidates(env, bound, universe);
        tuples
            .extend(&candidates)
            .map_err(|TupleLimitExceeded { limit }| ResolveError::TupleLimitExceeded {
                class: def.name.clone(),
                limit,
            })?;
    }

    tuples.retain(|tuple| {
        let full: HashMap<TypeVarId, Type> = params
            .iter()
            .map(|(var, _)| *var)
            .zip(tuple.iter().cloned())
            .collect();
        params
            .iter()
            .zip(tuple)
            .all(|((_, bound), ty)| bound.is_satisfied_by(env, ty, &full))
    });

    Ok(tuples.into_substitutions(&def.type_params))
}
