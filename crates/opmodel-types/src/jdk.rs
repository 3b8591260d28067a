use crate::{
    ClassDef, ClassKind, ConstructorDef, MethodDef, PrimitiveType, Type, TypeEnv, TypeStore,
};

fn class(name: &str, kind: ClassKind, super_class: Option<Type>, interfaces: Vec<Type>) -> ClassDef {
    ClassDef {
        name: name.to_string(),
        kind,
        is_abstract: kind == ClassKind::Interface,
        type_params: vec![],
        super_class,
        interfaces,
        constructors: vec![],
        methods: vec![],
    }
}

fn method(name: &str, params: Vec<Type>, return_type: Type) -> MethodDef {
    MethodDef {
        name: name.to_string(),
        type_params: vec![],
        params,
        return_type,
        is_static: false,
    }
}

fn no_arg_constructor() -> ConstructorDef {
    ConstructorDef { params: vec![] }
}

impl TypeStore {
    /// A store holding the handful of `java.lang`/`java.util` types instantiation commonly needs:
    /// the boxed numerics, `String`, `Comparable`, `Enum` and the core collection interfaces.
    pub fn with_minimal_jdk() -> Self {
        let mut store = TypeStore::default();
        let wk = store.well_known().clone();

        let object = Type::class(wk.object, vec![]);
        let string = Type::class(wk.string, vec![]);
        let int = Type::Primitive(PrimitiveType::Int);
        let boolean = Type::Primitive(PrimitiveType::Boolean);

        let mut object_def = class("java.lang.Object", ClassKind::Class, None, vec![]);
        object_def.constructors.push(no_arg_constructor());
        object_def.methods = vec![
            method("hashCode", vec![], int.clone()),
            method("toString", vec![], string.clone()),
            method("equals", vec![object.clone()], boolean.clone()),
        ];
        store.define_class(wk.object, object_def);

        store.define_class(
            wk.cloneable,
            class("java.lang.Cloneable", ClassKind::Interface, None, vec![]),
        );
        store.define_class(
            wk.serializable,
            class("java.io.Serializable", ClassKind::Interface, None, vec![]),
        );
        let serializable = Type::class(wk.serializable, vec![]);
        let cloneable = Type::class(wk.cloneable, vec![]);

        // interface Comparable<T> { int compareTo(T o); }
        let comparable = store.intern_class_id("java.lang.Comparable");
        let comparable_t = store.add_type_param("T", vec![]);
        let mut comparable_def = class("java.lang.Comparable", ClassKind::Interface, None, vec![]);
        comparable_def.type_params = vec![comparable_t];
        comparable_def.methods = vec![method(
            "compareTo",
            vec![Type::TypeVar(comparable_t)],
            int.clone(),
        )];
        store.define_class(comparable, comparable_def);
        let comparable_of = |ty: Type| Type::class(comparable, vec![ty]);

        let char_sequence = store.add_class(ClassDef {
            methods: vec![method("length", vec![], int.clone())],
            ..class("java.lang.CharSequence", ClassKind::Interface, None, vec![])
        });

        let mut string_def = class(
            "java.lang.String",
            ClassKind::Class,
            Some(object.clone()),
            vec![
                serializable.clone(),
                comparable_of(string.clone()),
                Type::class(char_sequence, vec![]),
            ],
        );
        string_def.constructors.push(no_arg_constructor());
        string_def.methods = vec![
            method("length", vec![], int.clone()),
            method("isEmpty", vec![], boolean.clone()),
            method("concat", vec![string.clone()], string.clone()),
        ];
        store.define_class(wk.string, string_def);

        let mut number_def = class(
            "java.lang.Number",
            ClassKind::Class,
            Some(object.clone()),
            vec![serializable.clone()],
        );
        number_def.is_abstract = true;
        number_def.constructors.push(no_arg_constructor());
        number_def.methods = vec![method("intValue", vec![], int.clone())];
        store.define_class(wk.number, number_def);
        let number = Type::class(wk.number, vec![]);

        let boxed = [
            ("java.lang.Integer", PrimitiveType::Int, true),
            ("java.lang.Long", PrimitiveType::Long, true),
            ("java.lang.Double", PrimitiveType::Double, true),
            ("java.lang.Boolean", PrimitiveType::Boolean, false),
            ("java.lang.Character", PrimitiveType::Char, false),
        ];
        for (name, primitive, numeric) in boxed {
            let id = store.intern_class_id(name);
            let self_ty = Type::class(id, vec![]);
            let super_class = if numeric { number.clone() } else { object.clone() };
            let mut def = class(
                name,
                ClassKind::Class,
                Some(super_class),
                vec![serializable.clone(), comparable_of(self_ty.clone())],
            );
            def.constructors.push(ConstructorDef {
                params: vec![Type::Primitive(primitive)],
            });
            def.methods = vec![MethodDef {
                is_static: true,
                ..method("valueOf", vec![Type::Primitive(primitive)], self_ty.clone())
            }];
            store.define_class(id, def);
        }

        // abstract class Enum<E extends Enum<E>> implements Comparable<E>, Serializable
        let enum_id = store.intern_class_id("java.lang.Enum");
        let enum_e = store.add_type_param("E", vec![]);
        store.set_type_param_bounds(enum_e, vec![Type::class(enum_id, vec![Type::TypeVar(enum_e)])]);
        let mut enum_def = class(
            "java.lang.Enum",
            ClassKind::Class,
            Some(object.clone()),
            vec![comparable_of(Type::TypeVar(enum_e)), serializable.clone()],
        );
        enum_def.is_abstract = true;
        enum_def.type_params = vec![enum_e];
        enum_def.methods = vec![
            method("name", vec![], string.clone()),
            method("ordinal", vec![], int.clone()),
        ];
        store.define_class(enum_id, enum_def);

        // Collections.
        let iterable = store.intern_class_id("java.lang.Iterable");
        let iterable_t = store.add_type_param("T", vec![]);
        store.define_class(
            iterable,
            ClassDef {
                type_params: vec![iterable_t],
                ..class("java.lang.Iterable", ClassKind::Interface, None, vec![])
            },
        );

        let collection = store.intern_class_id("java.util.Collection");
        let collection_e = store.add_type_param("E", vec![]);
        store.define_class(
            collection,
            ClassDef {
                type_params: vec![collection_e],
                methods: vec![
                    method("size", vec![], int.clone()),
                    method("add", vec![Type::TypeVar(collection_e)], boolean.clone()),
                ],
                ..class(
                    "java.util.Collection",
                    ClassKind::Interface,
                    None,
                    vec![Type::class(iterable, vec![Type::TypeVar(collection_e)])],
                )
            },
        );

        let list = store.intern_class_id("java.util.List");
        let list_e = store.add_type_param("E", vec![]);
        store.define_class(
            list,
            ClassDef {
                type_params: vec![list_e],
                methods: vec![method("get", vec![int.clone()], Type::TypeVar(list_e))],
                ..class(
                    "java.util.List",
                    ClassKind::Interface,
                    None,
                    vec![Type::class(collection, vec![Type::TypeVar(list_e)])],
                )
            },
        );

        let array_list = store.intern_class_id("java.util.ArrayList");
        let array_list_e = store.add_type_param("E", vec![]);
        store.define_class(
            array_list,
            ClassDef {
                type_params: vec![array_list_e],
                constructors: vec![no_arg_constructor()],
                methods: vec![
                    method("add", vec![Type::TypeVar(array_list_e)], boolean.clone()),
                    method("get", vec![int.clone()], Type::TypeVar(array_list_e)),
                    method("size", vec![], int.clone()),
                ],
                ..class(
                    "java.util.ArrayList",
                    ClassKind::Class,
                    Some(object.clone()),
                    vec![
                        Type::class(list, vec![Type::TypeVar(array_list_e)]),
                        cloneable.clone(),
                        serializable.clone(),
                    ],
                )
            },
        );

        let map = store.intern_class_id("java.util.Map");
        let map_k = store.add_type_param("K", vec![]);
        let map_v = store.add_type_param("V", vec![]);
        store.define_class(
            map,
            ClassDef {
                type_params: vec![map_k, map_v],
                ..class("java.util.Map", ClassKind::Interface, None, vec![])
            },
        );

        let hash_map = store.intern_class_id("java.util.HashMap");
        let hash_map_k = store.add_type_param("K", vec![]);
        let hash_map_v = store.add_type_param("V", vec![]);
        store.define_class(
            hash_map,
            ClassDef {
                type_params: vec![hash_map_k, hash_map_v],
                constructors: vec![no_arg_constructor()],
                methods: vec![
                    method(
                        "put",
                        vec![Type::TypeVar(hash_map_k), Type::TypeVar(hash_map_v)],
                        Type::TypeVar(hash_map_v),
                    ),
                    method("get", vec![object.clone()], Type::TypeVar(hash_map_v)),
                ],
                ..class(
                    "java.util.HashMap",
                    ClassKind::Class,
                    Some(object),
                    vec![
                        Type::class(map, vec![Type::TypeVar(hash_map_k), Type::TypeVar(hash_map_v)]),
                        cloneable,
                        serializable,
                    ],
                )
            },
        );

        store
    }
}
