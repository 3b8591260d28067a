use crate::{ClassType, Type, TypeEnv, WildcardBound};

/// Render `ty` the way it would be spelled in Java source, using binary class names.
///
/// Classes missing from the store are rendered as `<unknown#id>` rather than failing.
pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    let mut out = String::new();
    write_type(env, ty, &mut out);
    out
}

pub fn format_class_type(env: &dyn TypeEnv, ty: &ClassType) -> String {
    let mut out = String::new();
    write_class_type(env, ty, &mut out);
    out
}

fn write_type(env: &dyn TypeEnv, ty: &Type, out: &mut String) {
    match ty {
        Type::Void => out.push_str("void"),
        Type::Primitive(p) => out.push_str(p.keyword()),
        Type::Class(class) => write_class_type(env, class, out),
        Type::Array(elem) => {
            write_type(env, elem, out);
            out.push_str("[]");
        }
        Type::TypeVar(id) => match env.type_param(*id) {
            Some(tp) => out.push_str(&tp.name),
            None => out.push_str(&format!("<tvar#{}>", id.to_raw())),
        },
        Type::Wildcard(WildcardBound::Unbounded) => out.push('?'),
        Type::Wildcard(WildcardBound::Extends(upper)) => {
            out.push_str("? extends ");
            write_type(env, upper, out);
        }
        Type::Wildcard(WildcardBound::Super(lower)) => {
            out.push_str("? super ");
            write_type(env, lower, out);
        }
    }
}

fn write_class_type(env: &dyn TypeEnv, ty: &ClassType, out: &mut String) {
    match env.class_name(ty.def) {
        Some(name) => out.push_str(name),
        None => out.push_str(&format!("<unknown#{}>", ty.def.to_raw())),
    }
    if ty.args.is_empty() {
        return;
    }
    out.push('<');
    for (idx, arg) in ty.args.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_type(env, arg, out);
    }
    out.push('>');
}
