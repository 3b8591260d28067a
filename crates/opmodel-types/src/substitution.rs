use std::collections::HashMap;

use crate::{substitute, ClassType, Type, TypeVarId};

/// A total assignment of concrete types to a declaration's type parameters, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    vars: Vec<TypeVarId>,
    types: Vec<Type>,
    map: HashMap<TypeVarId, Type>,
}

impl Substitution {
    /// Zip `vars` with `types` positionally. Returns `None` when the lengths differ.
    pub fn new(vars: &[TypeVarId], types: Vec<Type>) -> Option<Self> {
        if vars.len() != types.len() {
            return None;
        }
        let map = vars.iter().copied().zip(types.iter().cloned()).collect();
        Some(Self {
            vars: vars.to_vec(),
            types,
            map,
        })
    }

    /// The substitution of a non-generic declaration.
    pub fn empty() -> Self {
        Self {
            vars: Vec::new(),
            types: Vec::new(),
            map: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn vars(&self) -> &[TypeVarId] {
        &self.vars
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn get(&self, var: TypeVarId) -> Option<&Type> {
        self.map.get(&var)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeVarId, &Type)> + '_ {
        self.vars.iter().copied().zip(self.types.iter())
    }

    pub fn as_map(&self) -> &HashMap<TypeVarId, Type> {
        &self.map
    }

    pub fn apply(&self, ty: &Type) -> Type {
        substitute(ty, &self.map)
    }

    pub fn apply_class(&self, ty: &ClassType) -> ClassType {
        ClassType::new(ty.def, ty.args.iter().map(|arg| self.apply(arg)).collect())
    }
}
