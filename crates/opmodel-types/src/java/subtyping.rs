use std::collections::{HashMap, HashSet, VecDeque};

use crate::{substitute, ClassId, ClassKind, ClassType, Type, TypeEnv, TypeVarId, WildcardBound};

/// Return `ty` viewed as `target` by walking the supertype graph and applying type argument
/// substitution along the way.
///
/// Example: `ArrayList<String>` instantiated as `List` returns `List<String>`. Missing class
/// metadata simply returns `None`.
pub fn instantiate_as_supertype(env: &dyn TypeEnv, ty: &Type, target: ClassId) -> Option<Type> {
    let Type::Class(ClassType { def, args }) = ty else {
        return None;
    };

    let mut queue: VecDeque<Type> = VecDeque::new();
    let mut seen: HashSet<(ClassId, Vec<Type>)> = HashSet::new();
    queue.push_back(Type::class(*def, args.clone()));

    while let Some(current) = queue.pop_front() {
        let Type::Class(ClassType { def, args }) = &current else {
            continue;
        };
        if !seen.insert((*def, args.clone())) {
            continue;
        }

        if *def == target {
            return Some(current);
        }

        let Some(class_def) = env.class(*def) else {
            continue;
        };

        // A raw instantiation (`List` rather than `List<String>`) erases its supertypes as well.
        let raw = args.is_empty() && !class_def.type_params.is_empty();

        let mut subst: HashMap<TypeVarId, Type> =
            HashMap::with_capacity(class_def.type_params.len());
        if !raw {
            for (idx, formal) in class_def.type_params.iter().copied().enumerate() {
                if let Some(arg) = args.get(idx) {
                    subst.insert(formal, arg.clone());
                }
            }
        }
        let view = |sup: &Type| -> Option<Type> {
            match sup {
                Type::Class(ClassType { def, .. }) if raw => Some(Type::class(*def, vec![])),
                Type::Class(_) => Some(substitute(sup, &subst)),
                _ => None,
            }
        };

        if let Some(sc) = class_def.super_class.as_ref().and_then(&view) {
            queue.push_back(sc);
        }
        for iface in class_def.interfaces.iter().filter_map(&view) {
            queue.push_back(iface);
        }

        // Every interface implicitly has `Object` as a supertype (JLS 4.10.2).
        if class_def.kind == ClassKind::Interface {
            queue.push_back(Type::class(env.well_known().object, vec![]));
        }
    }

    None
}

/// Java subtyping over the store's class graph (JLS 4.10), restricted to what instantiation
/// needs: class/interface inheritance with type-argument containment, array covariance, and type
/// variables through their declared bounds.
pub fn is_subtype(env: &dyn TypeEnv, sub: &Type, sup: &Type) -> bool {
    let mut seen = HashSet::new();
    is_subtype_inner(env, sub, sup, &mut seen)
}

fn is_subtype_inner(
    env: &dyn TypeEnv,
    sub: &Type,
    sup: &Type,
    seen_type_vars: &mut HashSet<TypeVarId>,
) -> bool {
    if sub == sup {
        return true;
    }

    let wk = env.well_known();

    if let Type::TypeVar(id) = sub {
        // Guard against `T extends Comparable<T>` style recursion.
        if !seen_type_vars.insert(*id) {
            return false;
        }
        let result = match env.type_param(*id) {
            Some(tp) => {
                let uppers = tp.bound.upper_types();
                if uppers.is_empty() {
                    is_object(wk.object, sup)
                } else {
                    uppers
                        .into_iter()
                        .any(|upper| is_subtype_inner(env, upper, sup, seen_type_vars))
                }
            }
            None => false,
        };
        seen_type_vars.remove(id);
        return result;
    }

    match (sub, sup) {
        (Type::Class(_) | Type::Array(_), sup) if is_object(wk.object, sup) => true,
        (Type::Array(sub_elem), Type::Array(sup_elem)) => {
            // Primitive arrays are only subtypes of themselves (handled by equality above).
            sub_elem.is_reference()
                && matches!(**sup_elem, Type::Class(_) | Type::Array(_) | Type::TypeVar(_))
                && is_subtype_inner(env, sub_elem, sup_elem, seen_type_vars)
        }
        (Type::Array(_), Type::Class(ClassType { def, args })) => {
            args.is_empty() && (*def == wk.cloneable || *def == wk.serializable)
        }
        (Type::Class(_), Type::Class(ClassType { def: target, args: sup_args })) => {
            let Some(Type::Class(ClassType { args: found, .. })) =
                instantiate_as_supertype(env, sub, *target)
            else {
                return false;
            };
            if sup_args.is_empty() {
                return true;
            }
            if found.len() != sup_args.len() {
                return false;
            }
            sup_args
                .iter()
                .zip(found.iter())
                .all(|(formal, actual)| contains_type_arg(env, formal, actual, seen_type_vars))
        }
        _ => false,
    }
}

fn is_object(object: ClassId, ty: &Type) -> bool {
    matches!(ty, Type::Class(ClassType { def, args }) if *def == object && args.is_empty())
}

/// Type argument containment (JLS 4.5.1): does `formal` contain `actual`?
fn contains_type_arg(
    env: &dyn TypeEnv,
    formal: &Type,
    actual: &Type,
    seen_type_vars: &mut HashSet<TypeVarId>,
) -> bool {
    match formal {
        Type::Wildcard(WildcardBound::Unbounded) => true,
        Type::Wildcard(WildcardBound::Extends(upper)) => match actual {
            Type::Wildcard(WildcardBound::Extends(actual_upper)) => {
                is_subtype_inner(env, actual_upper, upper, seen_type_vars)
            }
            Type::Wildcard(WildcardBound::Unbounded) => {
                is_object(env.well_known().object, upper)
            }
            Type::Wildcard(WildcardBound::Super(_)) => false,
            actual => is_subtype_inner(env, actual, upper, seen_type_vars),
        },
        Type::Wildcard(WildcardBound::Super(lower)) => match actual {
            Type::Wildcard(WildcardBound::Super(actual_lower)) => {
                is_subtype_inner(env, lower, actual_lower, seen_type_vars)
            }
            Type::Wildcard(_) => false,
            actual => is_subtype_inner(env, lower, actual, seen_type_vars),
        },
        formal => formal == actual,
    }
}
