//! The type-IR verifier. Independent of the compile pipeline: it validates
//! that a [`Type`] is well-formed, either as a standalone testing tool or as
//! a check the instantiator runs on every concrete type it produces (see
//! `DESIGN.md` for why this pipeline calls it there rather than right after
//! declared-type registration, where a `TypeRef` to another declaration is
//! still expected and would otherwise trip the "no unresolved reference"
//! rule below).

use std::collections::HashSet;

use velac_ast::types::{Type, TypeVariable, VALID_FLOAT_SIZES, VALID_INT_SIZES};
use velac_util::{Span, Symbol};

use crate::error::{CompileError, CompileResult};

fn no_duplicates<'a>(names: impl Iterator<Item = &'a Symbol>, what: &str) -> CompileResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CompileError::ty(format!("duplicate {what} '{name}'"), Span::DUMMY));
        }
    }
    Ok(())
}

fn verify_scoped_parameters(type_parameters: &[TypeVariable]) -> CompileResult<()> {
    no_duplicates(type_parameters.iter().map(|p| &p.name), "type variable")
}

/// Recursively validates a `Type`. A raw `TypeRef` or free `TypeVariable`
/// surviving to this point is itself the failure: by the time a type is
/// concrete, every reference should have been resolved by the instantiator.
pub fn verify(ty: &Type) -> CompileResult<()> {
    match ty {
        Type::Bool | Type::Symbol | Type::Void => Ok(()),
        Type::Int(i) => {
            if !VALID_INT_SIZES.contains(&i.size) {
                return Err(CompileError::ty(format!("integer size must be one of {VALID_INT_SIZES:?}"), Span::DUMMY));
            }
            Ok(())
        }
        Type::Float(f) => {
            if !VALID_FLOAT_SIZES.contains(&f.size) {
                return Err(CompileError::ty(format!("float size must be one of {VALID_FLOAT_SIZES:?}"), Span::DUMMY));
            }
            Ok(())
        }
        Type::Enum(e) => no_duplicates(e.variants.iter(), "enum variant"),
        Type::TypeVariable(v) => Err(CompileError::reference(format!("type variable '{}' is not defined", v.name), Span::DUMMY)),
        Type::TypeRef(r) => Err(CompileError::reference(format!("type '{}' is not defined", r.name), Span::DUMMY)),
        Type::Tuple(t) => t.elements.iter().try_for_each(verify),
        // `length` is a `u64`: unlike the source this was modeled on, the
        // type system already rules out a negative array length.
        Type::Array(a) => verify(&a.element_type),
        Type::Slice(s) => verify(&s.element_type),
        Type::NewType(n) => {
            verify_scoped_parameters(&n.type_parameters)?;
            verify(&n.inner_type)
        }
        Type::Struct(s) => {
            verify_scoped_parameters(&s.type_parameters)?;
            no_duplicates(s.fields.iter().map(|(name, _)| name), "field")?;
            s.fields.iter().try_for_each(|(_, ty)| verify(ty))
        }
        Type::Union(u) => {
            verify_scoped_parameters(&u.type_parameters)?;
            no_duplicates(u.variants.iter().map(|(name, _)| name), "union variant")?;
            u.variants.iter().try_for_each(|(_, ty)| verify(ty))
        }
        Type::Function(f) => {
            verify_scoped_parameters(&f.type_parameters)?;
            no_duplicates(f.parameters.iter().map(|(name, _)| name), "parameter")?;
            verify(&f.return_type)?;
            f.parameters.iter().try_for_each(|(_, ty)| verify(ty))
        }
    }
}
