//! The declared-type resolver: walks the top-level declarations once,
//! building the declared-type table (seeded from the primitives table) by
//! lowering each declaration's shape into the type IR.

use std::collections::HashSet;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use velac_ast::decl::{Declaration, UnionVariantData};
use velac_ast::program::Program;
use velac_ast::types::{FunctionType, NewType, StructType, Type, TypeVariable, UnionType};
use velac_util::{Span, Symbol};

use crate::error::{CompileError, CompileResult};
use crate::lower::generate_type;
use crate::primitives;

pub type DeclaredTypes = FxHashMap<Symbol, Type>;

fn type_parameters(names: &[Symbol], decl_span: Span) -> CompileResult<Vec<TypeVariable>> {
    let mut seen = HashSet::with_capacity(names.len());
    for &name in names {
        if !seen.insert(name) {
            return Err(CompileError::ty(format!("duplicate type parameter '{name}'"), decl_span));
        }
    }
    Ok(names.iter().map(|&name| TypeVariable { name }).collect())
}

fn insert(table: &mut DeclaredTypes, name: Symbol, ty: Type, span: Span) -> CompileResult<()> {
    if table.contains_key(&name) {
        return Err(CompileError::ty(format!("redeclaration of type '{name}'"), span));
    }
    table.insert(name, ty);
    Ok(())
}

pub fn resolve_declared_types(program: &Program) -> CompileResult<DeclaredTypes> {
    let mut table = primitives::seed();

    for decl in &program.declarations {
        match decl {
            Declaration::NewType(n) => {
                let type_parameters = type_parameters(&n.generic_parameters, n.span)?;
                let inner_type = generate_type(&n.inner_type);
                let ty = Type::NewType(Rc::new(NewType {
                    name: n.name,
                    inner_type,
                    type_parameters,
                    type_arguments: vec![],
                }));
                insert(&mut table, n.name, ty, n.span)?;
            }
            Declaration::StructType(s) => {
                let type_parameters = type_parameters(&s.generic_parameters, s.span)?;
                let fields = s.fields.iter().map(|f| (f.name, generate_type(&f.type_expr))).collect();
                let ty = Type::Struct(Rc::new(StructType {
                    name: s.name,
                    fields,
                    type_parameters,
                    type_arguments: vec![],
                }));
                insert(&mut table, s.name, ty, s.span)?;
            }
            Declaration::UnionType(u) => {
                let type_parameters = type_parameters(&u.generic_parameters, u.span)?;
                let variants = u
                    .variants
                    .iter()
                    .map(|v| (v.name, union_variant_payload(v.name, &v.data)))
                    .collect();
                let ty = Type::Union(Rc::new(UnionType {
                    name: u.name,
                    variants,
                    type_parameters,
                    type_arguments: vec![],
                }));
                insert(&mut table, u.name, ty, u.span)?;
            }
            Declaration::EnumType(e) => {
                let ty = Type::Enum(velac_ast::types::EnumType { name: e.name, variants: e.variants.clone() });
                insert(&mut table, e.name, ty, e.span)?;
            }
            Declaration::Function(f) => {
                let type_parameters = type_parameters(&f.generic_parameters, f.span)?;
                let return_type = generate_type(&f.return_type);
                let parameters =
                    f.parameters.iter().map(|p| (p.name, generate_type(&p.type_expr))).collect();
                let ty = Type::Function(Rc::new(FunctionType {
                    name: Some(f.name),
                    return_type,
                    parameters,
                    type_parameters,
                    type_arguments: vec![],
                }));
                insert(&mut table, f.name, ty, f.span)?;
            }
            Declaration::Variable(_) => {
                // Top-level variables don't register a named type; they're
                // bound during expression annotation instead.
            }
        }
    }

    Ok(table)
}

/// Encodes a union variant's payload as a concrete `Type`: a bare symbol
/// variant has no payload (`VoidType`), a tuple variant is a `TupleType`,
/// and a struct variant is an anonymous `StructType` named after the
/// variant itself.
fn union_variant_payload(variant_name: Symbol, data: &UnionVariantData) -> Type {
    match data {
        UnionVariantData::Symbol => Type::Void,
        UnionVariantData::Tuple(elements) => {
            Type::Tuple(velac_ast::types::TupleType { elements: elements.iter().map(generate_type).collect() })
        }
        UnionVariantData::Struct(fields) => Type::Struct(Rc::new(StructType {
            name: variant_name,
            fields: fields.iter().map(|f| (f.name, generate_type(&f.type_expr))).collect(),
            type_parameters: vec![],
            type_arguments: vec![],
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_ast::decl::{Field, StructTypeDeclaration, UnionTypeDeclaration, UnionVariant};
    use velac_ast::ty_expr::{NamedTypeExpression, SliceTypeExpression, TypeExpression};

    fn named(name: &str) -> TypeExpression {
        TypeExpression::Named(NamedTypeExpression { name: Symbol::intern(name), generic_arguments: vec![], span: Span::DUMMY })
    }

    #[test]
    fn nominal_struct_registers_with_its_field_type() {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Greeter"),
            generic_parameters: vec![],
            fields: vec![Field {
                name: Symbol::intern("name"),
                type_expr: TypeExpression::Slice(SliceTypeExpression { element: Box::new(named("uint8")), span: Span::DUMMY }),
                span: Span::DUMMY,
            }],
            span: Span::DUMMY,
        })]);

        let table = resolve_declared_types(&program).unwrap();
        let ty = table.get(&Symbol::intern("Greeter")).unwrap();
        match ty {
            Type::Struct(s) => {
                assert_eq!(s.fields.len(), 1);
                assert_eq!(s.fields[0].0, Symbol::intern("name"));
            }
            other => panic!("expected StructType, got {other:?}"),
        }
    }

    #[test]
    fn redeclaring_a_type_name_is_a_type_error() {
        let decl = || {
            Declaration::StructType(StructTypeDeclaration {
                name: Symbol::intern("Foo"),
                generic_parameters: vec![],
                fields: vec![],
                span: Span::DUMMY,
            })
        };
        let program = Program::new(vec![decl(), decl()]);
        let err = resolve_declared_types(&program).unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn union_tuple_variant_payload_is_a_tuple_type() {
        let program = Program::new(vec![Declaration::UnionType(UnionTypeDeclaration {
            name: Symbol::intern("Result"),
            generic_parameters: vec![Symbol::intern("T"), Symbol::intern("U")],
            variants: vec![
                UnionVariant {
                    name: Symbol::intern("Ok"),
                    data: UnionVariantData::Tuple(vec![named("T_placeholder")]),
                    span: Span::DUMMY,
                },
                UnionVariant { name: Symbol::intern("Err"), data: UnionVariantData::Symbol, span: Span::DUMMY },
            ],
            span: Span::DUMMY,
        })]);

        let table = resolve_declared_types(&program).unwrap();
        match table.get(&Symbol::intern("Result")).unwrap() {
            Type::Union(u) => {
                assert!(matches!(u.variants[0].1, Type::Tuple(_)));
                assert_eq!(u.variants[1].1, Type::Void);
            }
            other => panic!("expected UnionType, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_generic_parameter_names_are_rejected() {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Pair"),
            generic_parameters: vec![Symbol::intern("T"), Symbol::intern("T")],
            fields: vec![],
            span: Span::DUMMY,
        })]);
        let err = resolve_declared_types(&program).unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }
}
