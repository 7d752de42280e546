//! The primitives table: a process-wide constant mapping from name to
//! [`velac_ast::Type`], seeded once and never mutated afterwards. The
//! declared-type table (see [`crate::resolve`]) is initialized as a copy
//! of this table.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use velac_ast::types::{FloatType, IntType, Type, VALID_FLOAT_SIZES, VALID_INT_SIZES};
use velac_util::Symbol;

fn build() -> FxHashMap<Symbol, Type> {
    let mut table = FxHashMap::default();
    table.insert(Symbol::intern("bool"), Type::Bool);
    table.insert(Symbol::intern("symbol"), Type::Symbol);
    table.insert(Symbol::intern("void"), Type::Void);

    for &size in VALID_INT_SIZES {
        table.insert(Symbol::intern(&format!("int{size}")), Type::Int(IntType { size, signed: true }));
        table.insert(Symbol::intern(&format!("uint{size}")), Type::Int(IntType { size, signed: false }));
    }
    for &size in VALID_FLOAT_SIZES {
        table.insert(Symbol::intern(&format!("float{size}")), Type::Float(FloatType { size }));
    }
    table
}

fn table() -> &'static FxHashMap<Symbol, Type> {
    static TABLE: OnceLock<FxHashMap<Symbol, Type>> = OnceLock::new();
    TABLE.get_or_init(build)
}

pub fn lookup(name: Symbol) -> Option<&'static Type> {
    table().get(&name)
}

pub fn is_primitive(name: Symbol) -> bool {
    table().contains_key(&name)
}

/// A fresh copy of the primitives table, seeding the declared-type table.
pub fn seed() -> FxHashMap<Symbol, Type> {
    table().clone()
}
