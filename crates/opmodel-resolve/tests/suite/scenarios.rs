use std::collections::BTreeSet;

use opmodel_resolve::{
    substitutions, substitutions_by_product, ResolveError, Resolver, ResolverOptions, SelectionMode,
    TypeUniverse,
};
use opmodel_types::{ClassType, Type, TypeEnv, TypeStore};

use pretty_assertions::assert_eq;

use super::support::{class, declare_generic, tuple_set};

#[test]
fn box_of_number_picks_integer() {
    let mut env = TypeStore::with_minimal_jdk();
    let (boxed, vars) = declare_generic(&mut env, "com.example.Box", &["T"]);
    env.set_type_param_bounds(vars[0], vec![class(&env, "java.lang.Number")]);

    let integer = class(&env, "java.lang.Integer");
    let universe: TypeUniverse = [integer.clone(), class(&env, "java.lang.String")]
        .into_iter()
        .collect();

    let subs = substitutions(&env, boxed, &universe, None).unwrap();
    assert_eq!(tuple_set(&subs), BTreeSet::from([vec![integer.clone()]]));

    let resolved = Resolver::default().resolve(&env, boxed, &universe).unwrap();
    assert_eq!(resolved, ClassType::new(boxed, vec![integer]));
}

#[test]
fn pair_with_dependent_second_parameter() {
    let mut env = TypeStore::with_minimal_jdk();
    let (pair, vars) = declare_generic(&mut env, "com.example.Pair", &["T", "U"]);
    env.set_type_param_bounds(vars[1], vec![Type::TypeVar(vars[0])]);

    let integer = class(&env, "java.lang.Integer");
    let number = class(&env, "java.lang.Number");
    let string = class(&env, "java.lang.String");
    let universe: TypeUniverse = [integer.clone(), number.clone(), string.clone()]
        .into_iter()
        .collect();

    let subs = substitutions(&env, pair, &universe, None).unwrap();
    let found = tuple_set(&subs);

    assert!(found.contains(&vec![integer.clone(), integer.clone()]));
    assert!(found.contains(&vec![number.clone(), integer.clone()]));
    assert!(found.contains(&vec![number.clone(), number.clone()]));
    assert!(!found.contains(&vec![integer.clone(), number.clone()]));
    for tuple in &found {
        if tuple[1] == string {
            assert_eq!(tuple[0], string);
        }
    }
    assert_eq!(
        found,
        BTreeSet::from([
            vec![integer.clone(), integer.clone()],
            vec![number.clone(), integer],
            vec![number.clone(), number],
            vec![string.clone(), string],
        ])
    );
}

#[test]
fn unconstrained_holder_over_empty_universe_is_unresolvable() {
    let mut env = TypeStore::with_minimal_jdk();
    let (holder, _) = declare_generic(&mut env, "com.example.Holder", &["T"]);
    let universe = TypeUniverse::new();

    assert!(substitutions(&env, holder, &universe, None).unwrap().is_empty());
    assert_eq!(
        Resolver::default().resolve(&env, holder, &universe),
        Err(ResolveError::Unresolvable {
            class: "com.example.Holder".to_string()
        })
    );
}

#[test]
fn bounded_parameter_over_empty_universe_is_unresolvable() {
    let mut env = TypeStore::with_minimal_jdk();
    let (boxed, vars) = declare_generic(&mut env, "com.example.Box", &["T", "U"]);
    env.set_type_param_bounds(vars[0], vec![class(&env, "java.lang.Number")]);

    let err = Resolver::default()
        .resolve(&env, boxed, &TypeUniverse::new())
        .unwrap_err();
    assert_eq!(err.code(), "unresolvable");
}

#[test]
fn unconstrained_parameter_accepts_every_reference_type() {
    let mut env = TypeStore::with_minimal_jdk();
    let (holder, _) = declare_generic(&mut env, "com.example.Holder", &["T"]);
    let list = env.class_id("java.util.List").unwrap();

    let universe: TypeUniverse = [
        class(&env, "java.lang.String"),
        Type::array(class(&env, "java.lang.Integer")),
        Type::class(list, vec![class(&env, "java.lang.Long")]),
        class(&env, "java.lang.Object"),
    ]
    .into_iter()
    .collect();

    let subs = substitutions(&env, holder, &universe, None).unwrap();
    let found: Vec<Type> = subs.iter().map(|s| s.types()[0].clone()).collect();
    let expected: Vec<Type> = universe.iter().cloned().collect();
    assert_eq!(found, expected);
}

#[test]
fn self_referential_bound_is_evaluated_against_the_candidate() {
    let mut env = TypeStore::with_minimal_jdk();
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let (sorted, vars) = declare_generic(&mut env, "com.example.Sorted", &["T"]);
    env.set_type_param_bounds(vars[0], vec![Type::class(comparable, vec![Type::TypeVar(vars[0])])]);

    let integer = class(&env, "java.lang.Integer");
    let string = class(&env, "java.lang.String");
    let universe: TypeUniverse = [integer.clone(), class(&env, "java.lang.Number"), string.clone()]
        .into_iter()
        .collect();

    let subs = substitutions(&env, sorted, &universe, None).unwrap();
    assert_eq!(
        tuple_set(&subs),
        BTreeSet::from([vec![integer], vec![string]])
    );
}

#[test]
fn forward_reference_is_a_malformed_bound_graph() {
    let mut env = TypeStore::with_minimal_jdk();
    let (bad, vars) = declare_generic(&mut env, "com.example.Bad", &["T", "U"]);
    env.set_type_param_bounds(vars[0], vec![Type::TypeVar(vars[1])]);

    let universe: TypeUniverse = [class(&env, "java.lang.Integer")].into_iter().collect();
    assert_eq!(
        substitutions(&env, bad, &universe, None),
        Err(ResolveError::MalformedBoundGraph {
            class: "com.example.Bad".to_string(),
            param: "T".to_string(),
            referenced: "U".to_string(),
        })
    );
}

#[test]
fn bound_on_itself_is_a_malformed_bound_graph() {
    let mut env = TypeStore::with_minimal_jdk();
    let (cyclic, vars) = declare_generic(&mut env, "com.example.Cyc", &["T"]);
    env.set_type_param_bounds(vars[0], vec![Type::TypeVar(vars[0])]);

    let universe: TypeUniverse = [class(&env, "java.lang.Integer")].into_iter().collect();
    assert_eq!(
        substitutions(&env, cyclic, &universe, None),
        Err(ResolveError::MalformedBoundGraph {
            class: "com.example.Cyc".to_string(),
            param: "T".to_string(),
            referenced: "T".to_string(),
        })
    );
    assert!(substitutions_by_product(&env, cyclic, &universe).is_err());
}

#[test]
fn reference_to_foreign_type_parameter_is_malformed() {
    let mut env = TypeStore::with_minimal_jdk();
    let foreign = env.add_type_param("X", vec![]);
    let (bad, vars) = declare_generic(&mut env, "com.example.Bad", &["T"]);
    env.set_type_param_bounds(vars[0], vec![Type::TypeVar(foreign)]);

    let err = substitutions(&env, bad, &TypeUniverse::new(), None).unwrap_err();
    assert_eq!(err.code(), "malformed-bound-graph");
}

#[test]
fn tuple_ceiling_aborts_the_declaration() {
    let mut env = TypeStore::with_minimal_jdk();
    let (triple, _) = declare_generic(&mut env, "com.example.Triple", &["A", "B", "C"]);
    let universe: TypeUniverse = [
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Double",
        "java.lang.String",
        "java.lang.Number",
    ]
    .into_iter()
    .map(|name| class(&env, name))
    .collect();

    assert_eq!(
        substitutions(&env, triple, &universe, None).unwrap().len(),
        125
    );

    let resolver = Resolver::new(
        ResolverOptions {
            selection: SelectionMode::Random,
            max_tuples: Some(20),
        },
        Default::default(),
    );
    assert_eq!(
        resolver.resolve(&env, triple, &universe),
        Err(ResolveError::TupleLimitExceeded {
            class: "com.example.Triple".to_string(),
            limit: 20,
        })
    );
}

#[test]
fn non_generic_class_resolves_to_itself() {
    let env = TypeStore::with_minimal_jdk();
    let string = env.well_known().string;

    let instantiation = Resolver::default()
        .instantiate(&env, string, &TypeUniverse::new())
        .unwrap();
    assert_eq!(instantiation.class_type, ClassType::new(string, vec![]));
    assert!(instantiation.substitution.is_empty());
}

#[test]
fn undefined_class_is_reported() {
    let mut env = TypeStore::with_minimal_jdk();
    let missing = env.intern_class_id("com.example.Missing");
    let err = Resolver::default()
        .resolve(&env, missing, &TypeUniverse::new())
        .unwrap_err();
    assert_eq!(err, ResolveError::UnknownClass(missing.to_raw()));
}
