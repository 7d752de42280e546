//! The type-expression instantiator: replaces every `TypeExpression` still
//! attached to a declaration or parameter list with an
//! `InstantiatedTypeExpression` whose payload is a fully resolved
//! [`velac_ast::Type`] -- substituting type arguments through nested
//! aggregate and scoped constructs along the way.
//!
//! `instantiate` and `instantiate_scoped` mirror the shape of the type IR
//! itself rather than the AST: they operate on already-lowered `Type`
//! values (see [`crate::lower`]), not on `TypeExpression` nodes. The AST
//! pass below (`instantiate_type_expressions`) is the only caller that
//! bridges the two, via `instantiate_named`.

use std::rc::Rc;

use indexmap::IndexMap;
use velac_ast::decl::{Declaration, FunctionDeclaration, VariableDeclaration};
use velac_ast::mapper::Mapper;
use velac_ast::program::Program;
use velac_ast::ty_expr::{InstantiatedTypeExpression, NamedTypeExpression, TypeExpression};
use velac_ast::types::{
    ArrayType, FunctionType, NewType, SliceType, StructType, Type, TupleType, TypeVariable,
    UnionType,
};
use velac_util::{Span, Symbol};

use crate::error::{CompileError, CompileResult};
use crate::primitives;
use crate::resolve::DeclaredTypes;
use crate::verify;

/// Substitutes `arguments` through `ty`, resolving any `TypeRef` it
/// encounters against `declared_types` along the way.
///
/// A scoped type with `type_arguments` already populated (a previously
/// instantiated template) has each argument re-substituted -- this is what
/// makes `instantiate` idempotent on concrete types, where no argument
/// contains a free variable to replace. An uninstantiated scoped type
/// (`type_arguments` empty) is filled in from `arguments`' own values,
/// matching them positionally against its `type_parameters`.
pub fn instantiate(ty: &Type, arguments: &IndexMap<Symbol, Type>, declared_types: &DeclaredTypes) -> CompileResult<Type> {
    if let Some((_, type_arguments)) = ty.scoped_parts() {
        let new_arguments: Vec<Type> = if !type_arguments.is_empty() {
            type_arguments
                .iter()
                .map(|arg| match arg {
                    Type::TypeVariable(v) => Ok(arguments.get(&v.name).cloned().unwrap_or_else(|| arg.clone())),
                    other => instantiate(other, arguments, declared_types),
                })
                .collect::<CompileResult<_>>()?
        } else {
            arguments.values().cloned().collect()
        };
        instantiate_scoped(ty, new_arguments, declared_types)
    } else {
        instantiate_unscoped(ty, arguments, declared_types)
    }
}

fn instantiate_unscoped(ty: &Type, arguments: &IndexMap<Symbol, Type>, declared_types: &DeclaredTypes) -> CompileResult<Type> {
    match ty {
        Type::Bool | Type::Symbol | Type::Void | Type::Int(_) | Type::Float(_) | Type::Enum(_) => Ok(ty.clone()),
        Type::TypeVariable(v) => Ok(arguments.get(&v.name).cloned().unwrap_or_else(|| ty.clone())),
        // The `TypeRef`'s own (unresolved) type arguments are discarded here:
        // once the name resolves to its template, substitution proceeds
        // using the caller's `arguments` map, not whatever was written at
        // the reference site. A field like `f: Box<T>` inside a generic
        // struct relies on the struct's own zipped arguments already
        // carrying the right binding for `T`.
        Type::TypeRef(r) => {
            let target = declared_types
                .get(&r.name)
                .cloned()
                .ok_or_else(|| CompileError::reference(format!("type '{}' not found", r.name), Span::DUMMY))?;
            instantiate(&target, arguments, declared_types)
        }
        Type::Tuple(t) => Ok(Type::Tuple(TupleType {
            elements: t.elements.iter().map(|e| instantiate(e, arguments, declared_types)).collect::<CompileResult<_>>()?,
        })),
        Type::Array(a) => Ok(Type::Array(ArrayType {
            length: a.length,
            element_type: Box::new(instantiate(&a.element_type, arguments, declared_types)?),
        })),
        Type::Slice(s) => Ok(Type::Slice(SliceType {
            element_type: Box::new(instantiate(&s.element_type, arguments, declared_types)?),
        })),
        Type::NewType(_) | Type::Struct(_) | Type::Union(_) | Type::Function(_) => {
            unreachable!("scoped types are dispatched through instantiate_scoped")
        }
    }
}

/// Zips `params` against `arguments` positionally, requiring exact arity:
/// fewer arguments than parameters names the first missing parameter, more
/// arguments than parameters is rejected outright.
fn zip_type_variables(params: &[TypeVariable], arguments: &[Type]) -> CompileResult<IndexMap<Symbol, Type>> {
    if arguments.len() < params.len() {
        let missing = &params[arguments.len()];
        return Err(CompileError::ty(format!("missing type argument {}", missing.name), Span::DUMMY));
    }
    if arguments.len() > params.len() {
        return Err(CompileError::ty("too many type arguments".to_string(), Span::DUMMY));
    }
    Ok(params.iter().map(|p| p.name).zip(arguments.iter().cloned()).collect())
}

fn instantiate_scoped(template: &Type, arguments: Vec<Type>, declared_types: &DeclaredTypes) -> CompileResult<Type> {
    let (type_parameters, _) = template.scoped_parts().expect("instantiate_scoped called on a non-scoped type");
    let zipped = zip_type_variables(type_parameters, &arguments)?;

    match template {
        Type::NewType(n) => Ok(Type::NewType(Rc::new(NewType {
            name: n.name,
            inner_type: instantiate(&n.inner_type, &zipped, declared_types)?,
            type_parameters: n.type_parameters.clone(),
            type_arguments: arguments,
        }))),
        Type::Struct(s) => {
            let fields = s
                .fields
                .iter()
                .map(|(name, ty)| Ok((*name, instantiate(ty, &zipped, declared_types)?)))
                .collect::<CompileResult<_>>()?;
            Ok(Type::Struct(Rc::new(StructType {
                name: s.name,
                fields,
                type_parameters: s.type_parameters.clone(),
                type_arguments: arguments,
            })))
        }
        Type::Union(u) => {
            let variants = u
                .variants
                .iter()
                .map(|(name, ty)| Ok((*name, instantiate(ty, &zipped, declared_types)?)))
                .collect::<CompileResult<_>>()?;
            Ok(Type::Union(Rc::new(UnionType {
                name: u.name,
                variants,
                type_parameters: u.type_parameters.clone(),
                type_arguments: arguments,
            })))
        }
        Type::Function(f) => {
            let parameters = f
                .parameters
                .iter()
                .map(|(name, ty)| Ok((*name, instantiate(ty, &zipped, declared_types)?)))
                .collect::<CompileResult<_>>()?;
            Ok(Type::Function(Rc::new(FunctionType {
                name: f.name,
                return_type: instantiate(&f.return_type, &zipped, declared_types)?,
                parameters,
                type_parameters: f.type_parameters.clone(),
                type_arguments: arguments,
            })))
        }
        _ => unreachable!("scoped_parts only returns Some for the four scoped kinds"),
    }
}

/// Resolves one source-level `TypeExpression` into a concrete `Type`,
/// recursing through tuples/arrays/slices and dispatching named references
/// through [`instantiate_named`].
///
/// `pub(crate)` so the annotator can resolve a parameter's or variable's
/// declared type the same way, rather than binding the scope to the raw,
/// unresolved output of [`crate::lower::generate_type`].
pub(crate) fn instantiate_type_expression(type_expr: TypeExpression, declared_types: &DeclaredTypes) -> CompileResult<Type> {
    match type_expr {
        TypeExpression::Named(n) => instantiate_named(n, declared_types),
        TypeExpression::Tuple(t) => Ok(Type::Tuple(TupleType {
            elements: t.elements.into_iter().map(|e| instantiate_type_expression(e, declared_types)).collect::<CompileResult<_>>()?,
        })),
        TypeExpression::Array(a) => Ok(Type::Array(ArrayType {
            length: a.length,
            element_type: Box::new(instantiate_type_expression(*a.element, declared_types)?),
        })),
        TypeExpression::Slice(s) => Ok(Type::Slice(SliceType {
            element_type: Box::new(instantiate_type_expression(*s.element, declared_types)?),
        })),
        TypeExpression::Instantiated(i) => Ok(i.ty),
    }
}

/// Implements the named-type-expression visitor contract (see the crate
/// root docs): a primitive name rejects any generic arguments outright; a
/// declared name's arguments are instantiated and threaded through exact
/// arity checking in [`instantiate_scoped`]; an unknown name is a reference
/// error.
fn instantiate_named(n: NamedTypeExpression, declared_types: &DeclaredTypes) -> CompileResult<Type> {
    if primitives::is_primitive(n.name) {
        if !n.generic_arguments.is_empty() {
            return Err(CompileError::ty(format!("type '{}' is not generic", n.name), n.span));
        }
        return Ok(primitives::lookup(n.name).expect("is_primitive implies lookup succeeds").clone());
    }

    let template = declared_types
        .get(&n.name)
        .cloned()
        .ok_or_else(|| CompileError::reference(format!("type '{}' not found", n.name), n.span))?;

    let instantiated_args = n
        .generic_arguments
        .into_iter()
        .map(|arg| instantiate_type_expression(arg, declared_types))
        .collect::<CompileResult<Vec<_>>>()?;

    match template.scoped_parts() {
        Some(_) => instantiate_scoped(&template, instantiated_args, declared_types),
        None => {
            if !instantiated_args.is_empty() {
                return Err(CompileError::ty(format!("type '{}' is not generic", n.name), n.span));
            }
            Ok(template)
        }
    }
}

struct Instantiator<'a> {
    declared_types: &'a DeclaredTypes,
    error: Option<CompileError>,
}

impl Instantiator<'_> {
    fn fail(&mut self, error: CompileError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Mapper for Instantiator<'_> {
    fn map_type_expression(&mut self, ty: TypeExpression) -> TypeExpression {
        if self.error.is_some() {
            return ty;
        }
        let span = ty.span();
        match ty {
            TypeExpression::Instantiated(_) => ty,
            other => match instantiate_type_expression(other, self.declared_types) {
                Ok(concrete) => {
                    if let Err(err) = verify::verify(&concrete) {
                        self.fail(err);
                    }
                    TypeExpression::Instantiated(InstantiatedTypeExpression { ty: concrete, span })
                }
                Err(err) => {
                    self.fail(err);
                    TypeExpression::Instantiated(InstantiatedTypeExpression { ty: Type::Void, span })
                }
            },
        }
    }

    fn map_declaration(&mut self, decl: Declaration) -> Declaration {
        if self.error.is_some() {
            return decl;
        }
        match decl {
            Declaration::Variable(v) => Declaration::Variable(VariableDeclaration {
                type_expr: self.map_type_expression(v.type_expr),
                ..v
            }),
            Declaration::Function(f) => Declaration::Function(self.map_function(f)),
            // Type declarations are left untouched: their fields are
            // templates, not usage sites, and may legitimately name their
            // own type parameters -- instantiating them here would try (and
            // fail) to resolve `T` against the declared-type table.
            unchanged @ (Declaration::NewType(_)
            | Declaration::StructType(_)
            | Declaration::UnionType(_)
            | Declaration::EnumType(_)) => unchanged,
        }
    }

    fn map_function(&mut self, f: FunctionDeclaration) -> FunctionDeclaration {
        if self.error.is_some() {
            return f;
        }
        // A generic function's body is opaque at this pass: it is not
        // walked until a caller instantiates it with concrete type
        // arguments (see the type checker, which rejects it outright with
        // `NotImplementedError` rather than try to check unsubstituted
        // types).
        if !f.generic_parameters.is_empty() {
            return f;
        }
        velac_ast::mapper::map_function_default(self, f)
    }
}

pub fn instantiate_type_expressions(program: Program, declared_types: &DeclaredTypes) -> CompileResult<Program> {
    let mut instantiator = Instantiator { declared_types, error: None };
    let mapped = instantiator.map_program(program);
    match instantiator.error {
        Some(error) => Err(error),
        None => Ok(mapped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_ast::decl::{Field, FunctionDeclaration, Param, StructTypeDeclaration, UnionTypeDeclaration, UnionVariant, UnionVariantData};
    use velac_ast::expr::{Expression, IntegerLiteralExpr};
    use velac_ast::stmt::{ReturnStatement, Statement};
    use velac_ast::ty_expr::{NamedTypeExpression, SliceTypeExpression};
    use velac_util::Symbol;

    fn named(name: &str, args: Vec<TypeExpression>) -> TypeExpression {
        TypeExpression::Named(NamedTypeExpression { name: Symbol::intern(name), generic_arguments: args, span: Span::DUMMY })
    }

    #[test]
    fn primitive_instantiates_to_itself() {
        let table = crate::primitives::seed();
        let resolved = instantiate_named(
            NamedTypeExpression { name: Symbol::intern("int32"), generic_arguments: vec![], span: Span::DUMMY },
            &table,
        )
        .unwrap();
        assert_eq!(resolved, Type::int(32, true));
    }

    #[test]
    fn primitive_with_generic_arguments_is_a_type_error() {
        let table = crate::primitives::seed();
        let err = instantiate_named(
            NamedTypeExpression { name: Symbol::intern("int32"), generic_arguments: vec![named("int64", vec![])], span: Span::DUMMY },
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn unknown_name_is_a_reference_error() {
        let table = crate::primitives::seed();
        let err = instantiate_named(
            NamedTypeExpression { name: Symbol::intern("Nowhere"), generic_arguments: vec![], span: Span::DUMMY },
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Reference { .. }));
    }

    #[test]
    fn generic_union_instantiates_variants_with_both_arguments() {
        let program = Program::new(vec![Declaration::UnionType(UnionTypeDeclaration {
            name: Symbol::intern("Result"),
            generic_parameters: vec![Symbol::intern("T"), Symbol::intern("U")],
            variants: vec![
                UnionVariant { name: Symbol::intern("Ok"), data: UnionVariantData::Tuple(vec![named("T", vec![])]), span: Span::DUMMY },
                UnionVariant { name: Symbol::intern("Err"), data: UnionVariantData::Tuple(vec![named("U", vec![])]), span: Span::DUMMY },
            ],
            span: Span::DUMMY,
        })]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();

        let resolved = instantiate_named(
            NamedTypeExpression {
                name: Symbol::intern("Result"),
                generic_arguments: vec![named("int32", vec![]), named("uint8", vec![])],
                span: Span::DUMMY,
            },
            &table,
        )
        .unwrap();

        match resolved {
            Type::Union(u) => {
                assert_eq!(u.type_arguments, vec![Type::int(32, true), Type::int(8, false)]);
                assert_eq!(u.variants[0].1, Type::Tuple(TupleType { elements: vec![Type::int(32, true)] }));
                assert_eq!(u.variants[1].1, Type::Tuple(TupleType { elements: vec![Type::int(8, false)] }));
            }
            other => panic!("expected UnionType, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_argument_names_the_missing_parameter() {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Pair"),
            generic_parameters: vec![Symbol::intern("A"), Symbol::intern("B")],
            fields: vec![
                Field { name: Symbol::intern("a"), type_expr: named("A", vec![]), span: Span::DUMMY },
                Field { name: Symbol::intern("b"), type_expr: named("B", vec![]), span: Span::DUMMY },
            ],
            span: Span::DUMMY,
        })]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();

        let err = instantiate_named(
            NamedTypeExpression { name: Symbol::intern("Pair"), generic_arguments: vec![named("int32", vec![])], span: Span::DUMMY },
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn too_many_type_arguments_is_rejected() {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Box"),
            generic_parameters: vec![Symbol::intern("T")],
            fields: vec![Field { name: Symbol::intern("value"), type_expr: named("T", vec![]), span: Span::DUMMY }],
            span: Span::DUMMY,
        })]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();

        let err = instantiate_named(
            NamedTypeExpression {
                name: Symbol::intern("Box"),
                generic_arguments: vec![named("int32", vec![]), named("int64", vec![])],
                span: Span::DUMMY,
            },
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn idempotent_on_an_already_concrete_instantiation() {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Box"),
            generic_parameters: vec![Symbol::intern("T")],
            fields: vec![Field { name: Symbol::intern("value"), type_expr: named("T", vec![]), span: Span::DUMMY }],
            span: Span::DUMMY,
        })]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();
        let template = table.get(&Symbol::intern("Box")).unwrap().clone();

        let once = instantiate(&template, &IndexMap::from([(Symbol::intern("T"), Type::int(32, true))]), &table).unwrap();
        let twice = instantiate(&once, &IndexMap::new(), &table).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn nominal_struct_field_resolves_end_to_end_through_the_ast_pass() {
        let program = Program::new(vec![
            Declaration::StructType(StructTypeDeclaration {
                name: Symbol::intern("Greeter"),
                generic_parameters: vec![],
                fields: vec![Field {
                    name: Symbol::intern("name"),
                    type_expr: TypeExpression::Slice(SliceTypeExpression { element: Box::new(named("uint8", vec![])), span: Span::DUMMY }),
                    span: Span::DUMMY,
                }],
                span: Span::DUMMY,
            }),
            Declaration::Function(FunctionDeclaration {
                name: Symbol::intern("greet"),
                generic_parameters: vec![],
                parameters: vec![Param { name: Symbol::intern("g"), type_expr: named("Greeter", vec![]), span: Span::DUMMY }],
                return_type: TypeExpression::Slice(SliceTypeExpression { element: Box::new(named("uint8", vec![])), span: Span::DUMMY }),
                body: vec![Statement::Return(ReturnStatement {
                    value: Some(Expression::IntegerLiteral(IntegerLiteralExpr { value: 0, span: Span::DUMMY })),
                    span: Span::DUMMY,
                })],
                span: Span::DUMMY,
            }),
        ]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();
        let instantiated = instantiate_type_expressions(program, &table).unwrap();

        let Declaration::Function(f) = &instantiated.declarations[1] else { panic!() };
        match &f.return_type {
            TypeExpression::Instantiated(i) => assert_eq!(i.ty, Type::Slice(SliceType { element_type: Box::new(Type::int(8, false)) })),
            other => panic!("expected InstantiatedTypeExpression, got {other:?}"),
        }
    }

    /// Idempotence of instantiation on an already-concrete type (§8
    /// property 3), over an arbitrary choice of the template's own type
    /// argument rather than the single `int32` example above.
    #[quickcheck_macros::quickcheck]
    fn instantiation_is_idempotent_on_any_concrete_primitive_argument(use_float: bool) -> bool {
        let program = Program::new(vec![Declaration::StructType(StructTypeDeclaration {
            name: Symbol::intern("Box"),
            generic_parameters: vec![Symbol::intern("T")],
            fields: vec![Field { name: Symbol::intern("value"), type_expr: named("T", vec![]), span: Span::DUMMY }],
            span: Span::DUMMY,
        })]);
        let table = crate::resolve::resolve_declared_types(&program).unwrap();
        let template = table.get(&Symbol::intern("Box")).unwrap().clone();
        let argument = if use_float { Type::float(64) } else { Type::int(32, true) };

        let once = instantiate(&template, &IndexMap::from([(Symbol::intern("T"), argument)]), &table).unwrap();
        let twice = instantiate(&once, &IndexMap::new(), &table).unwrap();
        once == twice
    }
}
