use std::collections::HashMap;

use opmodel_types::{ParameterBound, Type, TypeEnv, TypeStore};

#[test]
fn f_bounded_parameter_accepts_self_comparable_types() {
    let mut env = TypeStore::with_minimal_jdk();
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let integer = Type::class(env.well_known().integer, vec![]);
    let number = Type::class(env.well_known().number, vec![]);

    // <T extends Comparable<T>>
    let t = env.add_type_param("T", vec![]);
    env.set_type_param_bounds(t, vec![Type::class(comparable, vec![Type::TypeVar(t)])]);
    let bound = env.type_param(t).unwrap().bound.clone();

    let mut assigned = HashMap::new();
    assigned.insert(t, integer.clone());
    assert!(bound.is_satisfied_by(&env, &integer, &assigned));

    assigned.insert(t, number.clone());
    assert!(!bound.is_satisfied_by(&env, &number, &assigned));
}

#[test]
fn intersection_requires_every_part() {
    let env = TypeStore::with_minimal_jdk();
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);
    let string = Type::class(env.well_known().string, vec![]);

    // <T extends Number & Comparable>
    let bound =
        ParameterBound::from_upper_bounds(vec![number.clone(), Type::class(comparable, vec![])]);
    assert!(matches!(bound, ParameterBound::Intersection(_)));
    assert!(bound.is_satisfied_by(&env, &integer, &HashMap::new()));
    assert!(!bound.is_satisfied_by(&env, &number, &HashMap::new()));
    assert!(!bound.is_satisfied_by(&env, &string, &HashMap::new()));
}

#[test]
fn unconstrained_rejects_primitives() {
    let env = TypeStore::with_minimal_jdk();
    let bound = ParameterBound::Unconstrained;
    assert!(bound.is_satisfied_by(
        &env,
        &Type::class(env.well_known().string, vec![]),
        &HashMap::new()
    ));
    assert!(!bound.is_satisfied_by(
        &env,
        &Type::Primitive(opmodel_types::PrimitiveType::Int),
        &HashMap::new()
    ));
}
