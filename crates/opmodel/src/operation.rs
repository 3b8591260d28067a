use std::fmt::Write as _;

use opmodel_types::{
    format_class_type, format_type, ClassType, ConstructorDef, MethodDef, Substitution, Type,
    TypeEnv,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Constructor,
    Method { name: String, is_static: bool },
}

/// A callable member of a concrete class type.
///
/// `inputs` lists every value the call consumes: for an instance method the receiver comes first,
/// followed by the declared parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    pub declaring: ClassType,
    pub kind: OperationKind,
    pub inputs: Vec<Type>,
    pub output: Type,
}

impl Operation {
    pub fn constructor(declaring: ClassType, params: Vec<Type>) -> Self {
        let output = Type::Class(declaring.clone());
        Self {
            declaring,
            kind: OperationKind::Constructor,
            inputs: params,
            output,
        }
    }

    pub fn method(
        declaring: ClassType,
        name: impl Into<String>,
        is_static: bool,
        params: Vec<Type>,
        output: Type,
    ) -> Self {
        let mut inputs = Vec::with_capacity(params.len() + 1);
        if !is_static {
            inputs.push(Type::Class(declaring.clone()));
        }
        inputs.extend(params);
        Self {
            declaring,
            kind: OperationKind::Method {
                name: name.into(),
                is_static,
            },
            inputs,
            output,
        }
    }

    /// Constructor `def` of `declaring` with `subst` applied to its parameters.
    pub(crate) fn for_constructor(
        declaring: &ClassType,
        def: &ConstructorDef,
        subst: &Substitution,
    ) -> Self {
        Self::constructor(
            declaring.clone(),
            def.params.iter().map(|p| subst.apply(p)).collect(),
        )
    }

    /// Returns `None` for generic methods; those have no single concrete signature.
    pub(crate) fn for_method(
        declaring: &ClassType,
        def: &MethodDef,
        subst: &Substitution,
    ) -> Option<Self> {
        if !def.type_params.is_empty() {
            return None;
        }
        Some(Self::method(
            declaring.clone(),
            def.name.clone(),
            def.is_static,
            def.params.iter().map(|p| subst.apply(p)).collect(),
            subst.apply(&def.return_type),
        ))
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            OperationKind::Constructor => "<init>",
            OperationKind::Method { name, .. } => name,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, OperationKind::Constructor)
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, OperationKind::Method { is_static: true, .. })
    }

    /// Declared parameters, without the receiver.
    pub fn params(&self) -> &[Type] {
        match self.kind {
            OperationKind::Method {
                is_static: false, ..
            } => self.inputs.get(1..).unwrap_or(&[]),
            _ => &self.inputs,
        }
    }

    /// Nothing left for a caller to choose: the declaring type, every input and the output are
    /// free of type variables and wildcards.
    pub fn is_concrete(&self) -> bool {
        self.declaring.is_concrete()
            && self.inputs.iter().all(Type::is_concrete)
            && self.output.is_concrete()
    }

    /// `java.util.ArrayList<java.lang.String>.add(java.lang.String) -> boolean`
    pub fn signature(&self, env: &dyn TypeEnv) -> String {
        let mut out = String::new();
        if self.is_static() {
            out.push_str("static ");
        }
        let _ = write!(
            out,
            "{}.{}(",
            format_class_type(env, &self.declaring),
            self.name()
        );
        for (idx, param) in self.params().iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(&format_type(env, param));
        }
        let _ = write!(out, ") -> {}", format_type(env, &self.output));
        out
    }
}
