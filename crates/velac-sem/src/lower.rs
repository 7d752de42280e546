//! `generate_type`: lowers an AST type expression into the type IR, without
//! resolving any name. The result always contains an unresolved
//! [`velac_ast::types::TypeRef`] wherever the source named a type; it is
//! never a `NewType`/`StructType`/`UnionType`/`EnumType`, those only arise
//! as resolver output.

use velac_ast::ty_expr::TypeExpression;
use velac_ast::types::{ArrayType, SliceType, Type, TupleType, TypeRef};

pub fn generate_type(type_expr: &TypeExpression) -> Type {
    match type_expr {
        TypeExpression::Named(named) => Type::TypeRef(TypeRef {
            name: named.name,
            type_arguments: named.generic_arguments.iter().map(generate_type).collect(),
        }),
        TypeExpression::Tuple(tuple) => {
            Type::Tuple(TupleType { elements: tuple.elements.iter().map(generate_type).collect() })
        }
        TypeExpression::Array(array) => Type::Array(ArrayType {
            length: array.length,
            element_type: Box::new(generate_type(&array.element)),
        }),
        TypeExpression::Slice(slice) => {
            Type::Slice(SliceType { element_type: Box::new(generate_type(&slice.element)) })
        }
        TypeExpression::Instantiated(instantiated) => {
            // Lowering only ever runs on source-level type expressions,
            // before the instantiator has produced this variant.
            instantiated.ty.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_ast::ty_expr::{ArrayTypeExpression, NamedTypeExpression, SliceTypeExpression, TupleTypeExpression};
    use velac_util::{Span, Symbol};

    fn named(name: &str, args: Vec<TypeExpression>) -> TypeExpression {
        TypeExpression::Named(NamedTypeExpression { name: Symbol::intern(name), generic_arguments: args, span: Span::DUMMY })
    }

    #[test]
    fn named_type_lowers_to_type_ref() {
        let lowered = generate_type(&named("int32", vec![]));
        assert_eq!(lowered, Type::TypeRef(TypeRef { name: Symbol::intern("int32"), type_arguments: vec![] }));
    }

    #[test]
    fn generic_arguments_are_lowered_recursively() {
        let lowered = generate_type(&named("Box", vec![named("int32", vec![])]));
        match lowered {
            Type::TypeRef(r) => {
                assert_eq!(r.name, Symbol::intern("Box"));
                assert_eq!(r.type_arguments.len(), 1);
            }
            other => panic!("expected TypeRef, got {other:?}"),
        }
    }

    #[test]
    fn tuple_type_expression_lowers_elementwise() {
        let tuple = TypeExpression::Tuple(TupleTypeExpression {
            elements: vec![named("int32", vec![]), named("bool", vec![])],
            span: Span::DUMMY,
        });
        match generate_type(&tuple) {
            Type::Tuple(t) => assert_eq!(t.elements.len(), 2),
            other => panic!("expected TupleType, got {other:?}"),
        }
    }

    #[test]
    fn array_and_slice_carry_length_and_element() {
        let array = TypeExpression::Array(ArrayTypeExpression {
            element: Box::new(named("uint8", vec![])),
            length: 4,
            span: Span::DUMMY,
        });
        assert_eq!(generate_type(&array), Type::Array(ArrayType { length: 4, element_type: Box::new(Type::TypeRef(TypeRef { name: Symbol::intern("uint8"), type_arguments: vec![] })) }));

        let slice = TypeExpression::Slice(SliceTypeExpression { element: Box::new(named("uint8", vec![])), span: Span::DUMMY });
        assert_eq!(generate_type(&slice), Type::Slice(SliceType { element_type: Box::new(Type::TypeRef(TypeRef { name: Symbol::intern("uint8"), type_arguments: vec![] })) }));
    }
}
