use std::collections::BTreeSet;

use opmodel_resolve::{
    substitutions, Randomness, Resolver, ResolverOptions, SelectionMode, TypeUniverse,
};
use opmodel_types::{ClassId, ClassType, Type, TypeStore};

use pretty_assertions::assert_eq;

use super::support::{class, declare_generic};

/// `Pair<T, U extends T>` over `{Integer, Number, String}`: four valid instantiations.
fn pair_fixture() -> (TypeStore, ClassId, TypeUniverse) {
    let mut env = TypeStore::with_minimal_jdk();
    let (pair, vars) = declare_generic(&mut env, "com.example.Pair", &["T", "U"]);
    env.set_type_param_bounds(vars[1], vec![Type::TypeVar(vars[0])]);
    let universe = ["java.lang.Integer", "java.lang.Number", "java.lang.String"]
        .into_iter()
        .map(|name| class(&env, name))
        .collect();
    (env, pair, universe)
}

fn seeded(seed: u64, selection: SelectionMode) -> Resolver {
    Resolver::new(
        ResolverOptions {
            selection,
            ..ResolverOptions::default()
        },
        Randomness::seeded(seed),
    )
}

#[test]
fn same_seed_gives_same_sequence_of_choices() {
    let (env, pair, universe) = pair_fixture();
    let first = seeded(7, SelectionMode::Random);
    let second = seeded(7, SelectionMode::Random);

    let run = |resolver: &Resolver| -> Vec<ClassType> {
        (0..16)
            .map(|_| resolver.resolve(&env, pair, &universe).unwrap())
            .collect()
    };
    assert_eq!(run(&first), run(&second));
}

#[test]
fn random_choices_come_from_the_valid_set_and_vary_with_the_seed() {
    let (env, pair, universe) = pair_fixture();
    let valid: BTreeSet<ClassType> = substitutions(&env, pair, &universe, None)
        .unwrap()
        .iter()
        .map(|s| ClassType::new(pair, s.types().to_vec()))
        .collect();

    let picked: BTreeSet<ClassType> = (0..64)
        .map(|seed| {
            seeded(seed, SelectionMode::Random)
                .resolve(&env, pair, &universe)
                .unwrap()
        })
        .collect();

    assert!(picked.is_subset(&valid));
    assert!(picked.len() > 1, "64 seeds all picked {picked:?}");
}

#[test]
fn first_mode_ignores_the_seed() {
    let (env, pair, universe) = pair_fixture();
    let expected = ClassType::new(
        pair,
        vec![class(&env, "java.lang.Integer"), class(&env, "java.lang.Integer")],
    );

    for seed in [0, 1, 42, u64::MAX] {
        let resolver = seeded(seed, SelectionMode::First);
        assert_eq!(resolver.resolve(&env, pair, &universe).unwrap(), expected);
        assert_eq!(resolver.resolve(&env, pair, &universe).unwrap(), expected);
    }
}

#[test]
fn instantiation_exposes_the_chosen_substitution() {
    let (env, pair, universe) = pair_fixture();
    let instantiation = seeded(3, SelectionMode::Random)
        .instantiate(&env, pair, &universe)
        .unwrap();

    assert_eq!(instantiation.substitution.len(), 2);
    assert_eq!(
        instantiation.class_type.args,
        instantiation.substitution.types().to_vec()
    );
    assert!(instantiation.class_type.is_concrete());
}

#[test]
fn universe_order_decides_first_mode() {
    let mut env = TypeStore::with_minimal_jdk();
    let (holder, _) = declare_generic(&mut env, "com.example.Holder", &["T"]);
    let string = class(&env, "java.lang.String");
    let universe: TypeUniverse = [
        Type::Primitive(opmodel_types::PrimitiveType::Int),
        string.clone(),
        class(&env, "java.lang.Integer"),
    ]
    .into_iter()
    .collect();

    let resolved = seeded(0, SelectionMode::First)
        .resolve(&env, holder, &universe)
        .unwrap();
    assert_eq!(resolved, ClassType::new(holder, vec![string]));
}
