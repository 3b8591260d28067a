// Run locally (from the repo root):
//   cargo +nightly fuzz run fuzz_resolve_pair -- -runs=10000
//
// Decodes bytes into a small generic declaration and universe, then checks that pruned tuple
// extension agrees with the unpruned product-then-filter enumeration.
#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use opmodel_resolve::{substitutions, substitutions_by_product, TypeUniverse};
use opmodel_types::{ClassDef, ClassKind, Type, TypeEnv, TypeStore};

const POOL: &[&str] = &[
    "java.lang.Object",
    "java.lang.Number",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.String",
    "java.lang.CharSequence",
    "java.lang.Comparable",
    "java.util.List",
];

fn pool_type(store: &TypeStore, byte: u8) -> Option<Type> {
    let name = POOL[usize::from(byte) % POOL.len()];
    store.class_id(name).map(|id| Type::class(id, vec![]))
}

fuzz_target!(|data: &[u8]| {
    let Some((&header, rest)) = data.split_first() else {
        return;
    };
    let width = usize::from(header % 3) + 1;
    let universe_len = usize::from((header >> 2) % 6);
    if rest.len() < width * 2 + universe_len {
        return;
    }
    let (shape, rest) = rest.split_at(width * 2);

    let mut store = TypeStore::with_minimal_jdk();
    let comparable = store.class_id("java.lang.Comparable");
    let vars: Vec<_> = (0..width)
        .map(|i| store.add_type_param(format!("T{i}"), vec![]))
        .collect();

    for (position, pair) in shape.chunks_exact(2).enumerate() {
        // A bare variable bound must name an earlier parameter; the first one gets an F-bound.
        let earlier = vars[usize::from(pair[1]) % position.max(1)];
        let uppers = match pair[0] % 4 {
            0 => vec![],
            1 => pool_type(&store, pair[1]).into_iter().collect(),
            2 if position > 0 => vec![Type::TypeVar(earlier)],
            _ => comparable
                .map(|id| Type::class(id, vec![Type::TypeVar(earlier)]))
                .into_iter()
                .collect(),
        };
        store.set_type_param_bounds(vars[position], uppers);
    }

    let object = Type::class(store.well_known().object, vec![]);
    let class = store.add_class(ClassDef {
        name: "fuzz.Generated".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vars,
        super_class: Some(object),
        interfaces: vec![],
        constructors: vec![],
        methods: vec![],
    });
    let universe: TypeUniverse = rest[..universe_len]
        .iter()
        .filter_map(|byte| pool_type(&store, *byte))
        .collect();

    let pruned = substitutions(&store, class, &universe, None).expect("bounds only look backwards");
    let naive = substitutions_by_product(&store, class, &universe).expect("same declaration");

    let pruned: BTreeSet<Vec<Type>> = pruned.iter().map(|s| s.types().to_vec()).collect();
    let naive: BTreeSet<Vec<Type>> = naive.iter().map(|s| s.types().to_vec()).collect();
    assert_eq!(pruned, naive);
    assert!(store.class(class).is_some());
});
