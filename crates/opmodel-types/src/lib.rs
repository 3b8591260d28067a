//! Java-flavoured type model used by the operation model.
//!
//! The store in this crate is deliberately small: it knows about classes, their type parameters
//! and the members the (external) signature parser produced for them. There is no source-level
//! information here, only what is needed to decide whether a concrete type may instantiate a type
//! parameter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod bound;
mod jdk;
pub mod java;
mod substitution;

pub use bound::ParameterBound;
pub use java::format::{format_class_type, format_type};
pub use java::subtyping::{instantiate_as_supertype, is_subtype};
pub use substitution::Substitution;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "char" => PrimitiveType::Char,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

/// A (possibly parameterized) class or interface type. Equality is structural over the interned
/// class identity and the argument list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<Type>,
}

impl ClassType {
    pub fn new(def: ClassId, args: Vec<Type>) -> Self {
        Self { def, args }
    }

    pub fn is_concrete(&self) -> bool {
        self.args.iter().all(Type::is_concrete_arg)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Void,
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    TypeVar(TypeVarId),
    Wildcard(WildcardBound),
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Self {
        Type::Class(ClassType { def, args })
    }

    pub fn array(elem: Type) -> Self {
        Type::Array(Box::new(elem))
    }

    /// Class and array types. Type variables are not counted: they are placeholders, not values.
    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn mentions_type_vars(&self) -> bool {
        match self {
            Type::TypeVar(_) => true,
            Type::Class(ClassType { args, .. }) => args.iter().any(Type::mentions_type_vars),
            Type::Array(elem) => elem.mentions_type_vars(),
            Type::Wildcard(WildcardBound::Extends(t) | WildcardBound::Super(t)) => {
                t.mentions_type_vars()
            }
            Type::Wildcard(WildcardBound::Unbounded) | Type::Void | Type::Primitive(_) => false,
        }
    }

    /// Type variables mentioned by this type, in first-occurrence order and without duplicates.
    pub fn type_vars(&self) -> Vec<TypeVarId> {
        let mut out = Vec::new();
        self.collect_type_vars(&mut out);
        out
    }

    pub fn collect_type_vars(&self, out: &mut Vec<TypeVarId>) {
        match self {
            Type::TypeVar(id) => {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            Type::Class(ClassType { args, .. }) => {
                for arg in args {
                    arg.collect_type_vars(out);
                }
            }
            Type::Array(elem) => elem.collect_type_vars(out),
            Type::Wildcard(WildcardBound::Extends(t) | WildcardBound::Super(t)) => {
                t.collect_type_vars(out)
            }
            Type::Wildcard(WildcardBound::Unbounded) | Type::Void | Type::Primitive(_) => {}
        }
    }

    /// A type a value can actually have: no open type variables and not a bare wildcard.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Type::Wildcard(_)) && !self.mentions_type_vars()
    }

    fn is_concrete_arg(&self) -> bool {
        !self.mentions_type_vars()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamDef {
    pub name: String,
    pub bound: ParameterBound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDef {
    pub params: Vec<Type>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub type_params: Vec<TypeVarId>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub constructors: Vec<ConstructorDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// The declaration viewed as a type over its own formal parameters, e.g. `Box<T>`.
    pub fn declared_type(&self, id: ClassId) -> ClassType {
        ClassType::new(
            id,
            self.type_params.iter().copied().map(Type::TypeVar).collect(),
        )
    }
}

/// Class ids that the rest of the system needs to name directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub number: ClassId,
    pub integer: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
}

/// Read access to class and type-parameter definitions.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn class_name(&self, id: ClassId) -> Option<&str>;
    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;
    fn well_known(&self) -> &WellKnownTypes;
}

/// Owned class table. Class ids are interned by binary name and are stable for the lifetime of the
/// store; a class can be interned (e.g. to build a self-referential bound) before it is defined.
#[derive(Clone, Debug)]
pub struct TypeStore {
    class_names: Vec<String>,
    classes: Vec<Option<ClassDef>>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        let mut store = TypeStore {
            class_names: Vec::new(),
            classes: Vec::new(),
            class_by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownTypes {
                object: ClassId(0),
                string: ClassId(0),
                number: ClassId(0),
                integer: ClassId(0),
                cloneable: ClassId(0),
                serializable: ClassId(0),
            },
        };
        // Well-known ids are always interned; only `with_minimal_jdk` defines them.
        store.well_known = WellKnownTypes {
            object: store.intern_class_id("java.lang.Object"),
            string: store.intern_class_id("java.lang.String"),
            number: store.intern_class_id("java.lang.Number"),
            integer: store.intern_class_id("java.lang.Integer"),
            cloneable: store.intern_class_id("java.lang.Cloneable"),
            serializable: store.intern_class_id("java.io.Serializable"),
        };
        store
    }
}

impl TypeStore {
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let id = ClassId(self.class_names.len() as u32);
        self.class_names.push(name.to_string());
        self.classes.push(None);
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        if let Some(slot) = self.classes.get_mut(id.index()) {
            *slot = Some(def);
        }
    }

    /// Intern `def.name` and define it, replacing any previous definition.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    pub fn add_type_param(&mut self, name: impl Into<String>, upper_bounds: Vec<Type>) -> TypeVarId {
        let id = TypeVarId(self.type_params.len() as u32);
        self.type_params.push(TypeParamDef {
            name: name.into(),
            bound: ParameterBound::from_upper_bounds(upper_bounds),
        });
        id
    }

    pub fn define_type_param(&mut self, id: TypeVarId, def: TypeParamDef) {
        if let Some(slot) = self.type_params.get_mut(id.index()) {
            *slot = def;
        }
    }

    pub fn set_type_param_bounds(&mut self, id: TypeVarId, upper_bounds: Vec<Type>) {
        if let Some(slot) = self.type_params.get_mut(id.index()) {
            slot.bound = ParameterBound::from_upper_bounds(upper_bounds);
        }
    }

    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index()).and_then(Option::as_ref)
    }

    fn class_name(&self, id: ClassId) -> Option<&str> {
        self.class_names.get(id.index()).map(String::as_str)
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.index())
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

/// Replace every type variable in `ty` that has a mapping in `subst`. Unmapped variables are kept.
pub fn substitute(ty: &Type, subst: &HashMap<TypeVarId, Type>) -> Type {
    match ty {
        Type::TypeVar(id) => subst.get(id).cloned().unwrap_or_else(|| ty.clone()),
        Type::Class(ClassType { def, args }) => Type::class(
            *def,
            args.iter().map(|arg| substitute(arg, subst)).collect(),
        ),
        Type::Array(elem) => Type::array(substitute(elem, subst)),
        Type::Wildcard(WildcardBound::Extends(upper)) => {
            Type::Wildcard(WildcardBound::Extends(Box::new(substitute(upper, subst))))
        }
        Type::Wildcard(WildcardBound::Super(lower)) => {
            Type::Wildcard(WildcardBound::Super(Box::new(substitute(lower, subst))))
        }
        Type::Wildcard(WildcardBound::Unbounded) | Type::Void | Type::Primitive(_) => ty.clone(),
    }
}
