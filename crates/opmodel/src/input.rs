//! Declarative model input.
//!
//! A JSON document listing class declarations (already reduced to signatures), the classes under
//! test and any extra observed types:
//!
//! ```json
//! {
//!   "classes": [
//!     {
//!       "name": "com.example.Box",
//!       "type_params": [{ "name": "T", "bounds": ["java.lang.Number"] }],
//!       "constructors": [{ "params": ["T"] }],
//!       "methods": [{ "name": "get", "returns": "T" }]
//!     }
//!   ],
//!   "classes_under_test": ["com.example.Box"],
//!   "exercised_classes": ["java.lang.Integer"],
//!   "input_types": ["java.lang.Integer", "java.lang.String"]
//! }
//! ```
//!
//! Type references are strings (`java.lang.String`, `T`, `int`, `?`, `java.lang.Integer[]`) or
//! objects: `{ "name": "java.util.List", "args": ["T"] }`, `{ "extends": "T" }` and
//! `{ "super": "T" }`.

use std::collections::HashMap;

use opmodel_types::{
    ClassDef, ClassId, ClassKind, ConstructorDef, MethodDef, PrimitiveType, Type, TypeEnv,
    TypeStore, TypeVarId, WildcardBound,
};
use serde::{Deserialize, Serialize};

use crate::{ExtractError, Extractor, ModelDelta, Operation};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelInput {
    #[serde(default)]
    pub classes: Vec<ClassInput>,
    #[serde(default)]
    pub classes_under_test: Vec<String>,
    /// Classes a generated test must exercise to be kept. Need not be under test.
    #[serde(default)]
    pub exercised_classes: Vec<String>,
    #[serde(default)]
    pub input_types: Vec<TypeRef>,
    #[serde(default)]
    pub operations: Vec<OperationInput>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassInput {
    pub name: String,
    #[serde(default)]
    pub kind: Option<ClassKind>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParamInput>,
    #[serde(default)]
    pub super_class: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub constructors: Vec<ConstructorInput>,
    #[serde(default)]
    pub methods: Vec<MethodInput>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeParamInput {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorInput {
    #[serde(default)]
    pub params: Vec<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodInput {
    pub name: String,
    #[serde(default)]
    pub type_params: Vec<TypeParamInput>,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    /// Defaults to `void`.
    #[serde(default)]
    pub returns: Option<TypeRef>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// An operation given by signature rather than discovered through a class. Without `method` it
/// is a constructor of `class`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationInput {
    #[serde(rename = "class")]
    pub declaring: TypeRef,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub returns: Option<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Parameterized {
        name: String,
        #[serde(default)]
        args: Vec<TypeRef>,
    },
    Extends {
        extends: Box<TypeRef>,
    },
    Super {
        #[serde(rename = "super")]
        lower: Box<TypeRef>,
    },
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Name(name.to_string())
    }
}

impl ModelInput {
    pub fn from_json(text: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ExtractError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Extractor for ModelInput {
    /// Defines every class of the input in `store`, replacing earlier definitions of the same
    /// name. Type parameters of all classes are created before any bound or member is read, so
    /// declarations may refer to each other and to themselves in any order.
    ///
    /// The input is applied to a copy of `store`; on error `store` is left untouched.
    fn extract(&self, store: &mut TypeStore) -> Result<ModelDelta, ExtractError> {
        let mut staged = store.clone();
        let delta = self.define_all(&mut staged)?;
        *store = staged;
        Ok(delta)
    }
}

impl ModelInput {
    fn define_all(&self, store: &mut TypeStore) -> Result<ModelDelta, ExtractError> {
        let mut declared: HashMap<String, (ClassId, usize)> = HashMap::new();
        for class in &self.classes {
            if declared.contains_key(&class.name) {
                return Err(ExtractError::DuplicateClass {
                    name: class.name.clone(),
                });
            }
            let id = store.intern_class_id(&class.name);
            declared.insert(class.name.clone(), (id, class.type_params.len()));
        }

        let mut scopes = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            scopes.push(declare_type_params(store, &class.name, &class.type_params, &[])?);
        }
        for (class, scope) in self.classes.iter().zip(&scopes) {
            bind_bounds(store, &declared, scope, &class.type_params)?;
        }
        for (class, scope) in self.classes.iter().zip(&scopes) {
            let def = define_class(store, &declared, scope, class)?;
            let (id, _) = declared[&class.name];
            store.define_class(id, def);
        }

        let lookup = Lookup {
            store,
            declared: &declared,
            scope: &[],
        };
        let mut delta = ModelDelta::new();
        for name in &self.classes_under_test {
            let (id, _) = lookup.class(name)?;
            delta.classes_under_test.push(id);
        }
        for name in &self.exercised_classes {
            let (id, _) = lookup.class(name)?;
            delta.exercised_classes.push(id);
        }
        for ty in &self.input_types {
            delta.input_types.push(lookup.resolve(ty, Position::Value)?);
        }
        for op in &self.operations {
            delta.operations.push(lookup.operation(op)?);
        }

        // Parameter types of the classes under test are observed inputs as well.
        for id in &delta.classes_under_test {
            let Some(def) = store.class(*id) else {
                continue;
            };
            let params = def
                .constructors
                .iter()
                .flat_map(|ctor| ctor.params.iter())
                .chain(def.methods.iter().flat_map(|m| m.params.iter()));
            for param in params {
                if param.is_concrete() && !delta.input_types.contains(param) {
                    delta.input_types.push(param.clone());
                }
            }
        }

        tracing::debug!(
            classes = self.classes.len(),
            under_test = delta.classes_under_test.len(),
            input_types = delta.input_types.len(),
            "extracted model input"
        );
        Ok(delta)
    }
}

type Scope = Vec<(String, TypeVarId)>;

/// Create placeholder type parameters; `outer` stays visible behind them.
fn declare_type_params(
    store: &mut TypeStore,
    owner: &str,
    params: &[TypeParamInput],
    outer: &[(String, TypeVarId)],
) -> Result<Scope, ExtractError> {
    let mut scope: Scope = outer.to_vec();
    for param in params {
        if scope[outer.len()..].iter().any(|(name, _)| *name == param.name) {
            return Err(ExtractError::DuplicateTypeParameter {
                owner: owner.to_string(),
                name: param.name.clone(),
            });
        }
        let var = store.add_type_param(param.name.clone(), vec![]);
        scope.push((param.name.clone(), var));
    }
    Ok(scope)
}

/// Set the bounds of the last `params.len()` variables of `scope`.
fn bind_bounds(
    store: &mut TypeStore,
    declared: &HashMap<String, (ClassId, usize)>,
    scope: &[(String, TypeVarId)],
    params: &[TypeParamInput],
) -> Result<(), ExtractError> {
    let own = &scope[scope.len() - params.len()..];
    let bounds = {
        let lookup = Lookup {
            store,
            declared,
            scope,
        };
        params
            .iter()
            .map(|param| {
                param
                    .bounds
                    .iter()
                    .map(|bound| lookup.resolve(bound, Position::Value))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?
    };
    for ((_, var), uppers) in own.iter().zip(bounds) {
        store.set_type_param_bounds(*var, uppers);
    }
    Ok(())
}

fn define_class(
    store: &mut TypeStore,
    declared: &HashMap<String, (ClassId, usize)>,
    scope: &[(String, TypeVarId)],
    class: &ClassInput,
) -> Result<ClassDef, ExtractError> {
    let mut method_scopes = Vec::with_capacity(class.methods.len());
    for method in &class.methods {
        let owner = format!("{}.{}", class.name, method.name);
        let method_scope = declare_type_params(store, &owner, &method.type_params, scope)?;
        bind_bounds(store, declared, &method_scope, &method.type_params)?;
        method_scopes.push(method_scope);
    }

    let kind = class.kind.unwrap_or(ClassKind::Class);
    let class_vars: Vec<TypeVarId> = scope.iter().map(|(_, var)| *var).collect();
    let lookup = Lookup {
        store,
        declared,
        scope,
    };

    let super_class = match &class.super_class {
        Some(ty) => Some(lookup.resolve(ty, Position::Value)?),
        None if kind == ClassKind::Interface || class.name == "java.lang.Object" => None,
        None => Some(Type::class(store.well_known().object, vec![])),
    };
    let interfaces = class
        .interfaces
        .iter()
        .map(|ty| lookup.resolve(ty, Position::Value))
        .collect::<Result<Vec<_>, _>>()?;
    let constructors = class
        .constructors
        .iter()
        .map(|ctor| {
            Ok(ConstructorDef {
                params: lookup.resolve_all(&ctor.params)?,
            })
        })
        .collect::<Result<Vec<_>, ExtractError>>()?;

    let mut methods = Vec::with_capacity(class.methods.len());
    for (method, method_scope) in class.methods.iter().zip(&method_scopes) {
        let lookup = Lookup {
            store,
            declared,
            scope: method_scope,
        };
        let return_type = match &method.returns {
            Some(ty) => lookup.resolve(ty, Position::Return)?,
            None => Type::Void,
        };
        methods.push(MethodDef {
            name: method.name.clone(),
            type_params: method_scope[scope.len()..]
                .iter()
                .map(|(_, var)| *var)
                .collect(),
            params: lookup.resolve_all(&method.params)?,
            return_type,
            is_static: method.is_static,
        });
    }

    Ok(ClassDef {
        name: class.name.clone(),
        kind,
        is_abstract: class.is_abstract || kind == ClassKind::Interface,
        type_params: class_vars,
        super_class,
        interfaces,
        constructors,
        methods,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    /// Something a value can have: parameters, bounds, supertypes.
    Value,
    /// Inside `<...>`: wildcards allowed, primitives not.
    Argument,
    /// A method result: like `Value`, plus `void`.
    Return,
}

struct Lookup<'a> {
    store: &'a TypeStore,
    declared: &'a HashMap<String, (ClassId, usize)>,
    scope: &'a [(String, TypeVarId)],
}

impl Lookup<'_> {
    /// A class declared by this input or already defined in the store, with its arity.
    fn class(&self, name: &str) -> Result<(ClassId, usize), ExtractError> {
        if let Some(found) = self.declared.get(name) {
            return Ok(*found);
        }
        self.store
            .class_id(name)
            .and_then(|id| self.store.class(id).map(|def| (id, def.type_params.len())))
            .ok_or_else(|| ExtractError::UnknownClass {
                name: name.to_string(),
            })
    }

    fn resolve_all(&self, refs: &[TypeRef]) -> Result<Vec<Type>, ExtractError> {
        refs.iter()
            .map(|ty| self.resolve(ty, Position::Value))
            .collect()
    }

    fn resolve(&self, ty: &TypeRef, position: Position) -> Result<Type, ExtractError> {
        match ty {
            TypeRef::Name(text) => self.named(text, position),
            TypeRef::Parameterized { name, args } => {
                let (id, arity) = self.class(name)?;
                if !args.is_empty() && args.len() != arity {
                    return Err(invalid(
                        name,
                        format!("expected {arity} type arguments, found {}", args.len()),
                    ));
                }
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, Position::Argument))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Type::class(id, args))
            }
            TypeRef::Extends { extends } => {
                self.expect_argument(ty, position)?;
                let upper = self.resolve(extends, Position::Value)?;
                Ok(Type::Wildcard(WildcardBound::Extends(Box::new(upper))))
            }
            TypeRef::Super { lower } => {
                self.expect_argument(ty, position)?;
                let lower = self.resolve(lower, Position::Value)?;
                Ok(Type::Wildcard(WildcardBound::Super(Box::new(lower))))
            }
        }
    }

    fn named(&self, text: &str, position: Position) -> Result<Type, ExtractError> {
        let name = text.trim();
        if let Some(elem) = name.strip_suffix("[]") {
            return Ok(Type::array(self.named(elem, Position::Value)?));
        }
        match name {
            "" => return Err(invalid(text, "empty type name")),
            "?" if position == Position::Argument => {
                return Ok(Type::Wildcard(WildcardBound::Unbounded))
            }
            "?" => return Err(invalid(text, "wildcards are only allowed as type arguments")),
            "void" if position == Position::Return => return Ok(Type::Void),
            "void" => return Err(invalid(text, "`void` is only allowed as a return type")),
            _ => {}
        }
        if let Some(primitive) = PrimitiveType::from_keyword(name) {
            if position == Position::Argument {
                return Err(invalid(text, "primitive types cannot be type arguments"));
            }
            return Ok(Type::Primitive(primitive));
        }
        if name.contains(['<', '>', ',']) {
            return Err(invalid(
                text,
                "parameterized types are written as {\"name\": ..., \"args\": [...]}",
            ));
        }
        // Innermost declaration wins, so method type parameters shadow class ones.
        if let Some((_, var)) = self.scope.iter().rev().find(|(param, _)| param == name) {
            return Ok(Type::TypeVar(*var));
        }
        let (id, _) = self.class(name)?;
        Ok(Type::class(id, vec![]))
    }

    fn expect_argument(&self, ty: &TypeRef, position: Position) -> Result<(), ExtractError> {
        if position == Position::Argument {
            return Ok(());
        }
        let reference = serde_json::to_string(ty).unwrap_or_default();
        Err(invalid(
            &reference,
            "wildcards are only allowed as type arguments",
        ))
    }

    fn operation(&self, op: &OperationInput) -> Result<Operation, ExtractError> {
        let Type::Class(declaring) = self.resolve(&op.declaring, Position::Value)? else {
            let reference = serde_json::to_string(&op.declaring).unwrap_or_default();
            return Err(invalid(&reference, "operations must be declared by a class"));
        };
        let params = self.resolve_all(&op.params)?;
        Ok(match &op.method {
            None => Operation::constructor(declaring, params),
            Some(name) => {
                let output = match &op.returns {
                    Some(ty) => self.resolve(ty, Position::Return)?,
                    None => Type::Void,
                };
                Operation::method(declaring, name.clone(), op.is_static, params, output)
            }
        })
    }
}

fn invalid(reference: &str, reason: impl Into<String>) -> ExtractError {
    ExtractError::InvalidTypeRef {
        reference: reference.to_string(),
        reason: reason.into(),
    }
}
