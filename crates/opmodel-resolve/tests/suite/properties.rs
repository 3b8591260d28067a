use std::collections::HashMap;

use opmodel_resolve::{substitutions, substitutions_by_product, TypeUniverse};
use opmodel_types::{ClassId, Type, TypeEnv, TypeStore, TypeVarId};
use proptest::prelude::*;

use super::support::{class, declare_generic, tuple_set};

const MAX_PARAMS: usize = 3;

/// Candidate pool drawn from the minimal JDK, indexed by the strategies below.
fn pool(env: &TypeStore) -> Vec<Type> {
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let list = env.class_id("java.util.List").unwrap();
    let array_list = env.class_id("java.util.ArrayList").unwrap();
    let integer = class(env, "java.lang.Integer");
    vec![
        class(env, "java.lang.Object"),
        class(env, "java.lang.Number"),
        integer.clone(),
        class(env, "java.lang.Long"),
        class(env, "java.lang.String"),
        class(env, "java.lang.CharSequence"),
        Type::class(comparable, vec![integer.clone()]),
        Type::class(list, vec![integer.clone()]),
        Type::class(array_list, vec![integer.clone()]),
        Type::array(integer),
    ]
}

/// Shape of one parameter's bound; indices are reduced modulo the pool or the parameter position.
#[derive(Clone, Debug)]
enum BoundShape {
    Unconstrained,
    Concrete(usize),
    Earlier(usize),
    ComparableOfEarlier(usize),
    ListOfEarlier(usize),
    ComparableOfSelf,
    Both(usize, usize),
}

fn bound_shape() -> impl Strategy<Value = BoundShape> {
    prop_oneof![
        Just(BoundShape::Unconstrained),
        (0usize..10).prop_map(BoundShape::Concrete),
        (0usize..MAX_PARAMS).prop_map(BoundShape::Earlier),
        (0usize..MAX_PARAMS).prop_map(BoundShape::ComparableOfEarlier),
        (0usize..MAX_PARAMS).prop_map(BoundShape::ListOfEarlier),
        Just(BoundShape::ComparableOfSelf),
        ((0usize..10), (0usize..MAX_PARAMS)).prop_map(|(c, e)| BoundShape::Both(c, e)),
    ]
}

fn upper_bounds(
    env: &TypeStore,
    pool: &[Type],
    vars: &[TypeVarId],
    position: usize,
    shape: &BoundShape,
) -> Vec<Type> {
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let list = env.class_id("java.util.List").unwrap();
    // Parameter 0 has nothing earlier to depend on, so it degrades to an F-bound on itself.
    let earlier = |idx: usize| {
        if position == 0 {
            vars[0]
        } else {
            vars[idx % position]
        }
    };
    match shape {
        BoundShape::Unconstrained => vec![],
        BoundShape::Concrete(idx) => vec![pool[idx % pool.len()].clone()],
        BoundShape::Earlier(idx) if position == 0 => {
            vec![pool[idx % pool.len()].clone()]
        }
        BoundShape::Earlier(idx) => vec![Type::TypeVar(earlier(*idx))],
        BoundShape::ComparableOfEarlier(idx) => {
            vec![Type::class(comparable, vec![Type::TypeVar(earlier(*idx))])]
        }
        BoundShape::ListOfEarlier(idx) => {
            vec![Type::class(list, vec![Type::TypeVar(earlier(*idx))])]
        }
        BoundShape::ComparableOfSelf => {
            vec![Type::class(comparable, vec![Type::TypeVar(vars[position])])]
        }
        BoundShape::Both(concrete, idx) => vec![
            pool[concrete % pool.len()].clone(),
            Type::class(comparable, vec![Type::TypeVar(earlier(*idx))]),
        ],
    }
}

fn build(shapes: &[BoundShape], picks: &[usize]) -> (TypeStore, ClassId, TypeUniverse) {
    let mut env = TypeStore::with_minimal_jdk();
    let names: Vec<String> = (0..shapes.len()).map(|i| format!("T{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let (id, vars) = declare_generic(&mut env, "com.example.Generated", &names);

    let pool = pool(&env);
    for (position, shape) in shapes.iter().enumerate() {
        let uppers = upper_bounds(&env, &pool, &vars, position, shape);
        env.set_type_param_bounds(vars[position], uppers);
    }
    let universe = picks.iter().map(|idx| pool[idx % pool.len()].clone()).collect();
    (env, id, universe)
}

fn declaration() -> impl Strategy<Value = (Vec<BoundShape>, Vec<usize>)> {
    (
        prop::collection::vec(bound_shape(), 1..=MAX_PARAMS),
        prop::collection::vec(0usize..10, 0..=5),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pruned_extension_matches_product_then_filter((shapes, picks) in declaration()) {
        let (env, id, universe) = build(&shapes, &picks);
        let pruned = substitutions(&env, id, &universe, None).unwrap();
        let naive = substitutions_by_product(&env, id, &universe).unwrap();
        prop_assert_eq!(tuple_set(&pruned), tuple_set(&naive));
        // Extension never produces the same tuple twice.
        prop_assert_eq!(tuple_set(&pruned).len(), pruned.len());
    }

    #[test]
    fn every_substitution_is_total_and_satisfies_every_bound((shapes, picks) in declaration()) {
        let (env, id, universe) = build(&shapes, &picks);
        let def = env.class(id).unwrap();

        for subst in substitutions(&env, id, &universe, None).unwrap() {
            prop_assert_eq!(subst.vars(), def.type_params.as_slice());
            let full: HashMap<TypeVarId, Type> = subst.as_map().clone();
            for (var, ty) in subst.iter() {
                prop_assert!(universe.contains(ty));
                prop_assert!(ty.is_reference() && ty.is_concrete());
                let bound = &env.type_param(var).unwrap().bound;
                prop_assert!(bound.is_satisfied_by(&env, ty, &full));
            }
        }
    }

    #[test]
    fn unconstrained_parameters_multiply_by_the_candidate_count(
        width in 1usize..=MAX_PARAMS,
        picks in prop::collection::vec(0usize..10, 0..=5),
    ) {
        let shapes = vec![BoundShape::Unconstrained; width];
        let (env, id, universe) = build(&shapes, &picks);
        let candidates = universe.candidates().count();

        let subs = substitutions(&env, id, &universe, None).unwrap();
        prop_assert_eq!(subs.len(), candidates.pow(width as u32));
    }
}
