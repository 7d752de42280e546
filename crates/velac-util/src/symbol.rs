//! String interning.
//!
//! The compiler never carries owned `String`s through the pipeline; every
//! identifier is interned once into a [`Symbol`], a cheap `Copy` handle that
//! compares in O(1). The pipeline is single-threaded (there is no lexer or
//! codegen stage running concurrently with semantic analysis), so the table
//! is a plain `RefCell`-guarded map rather than a lock-free structure.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;

/// An interned string.
///
/// Two symbols are equal iff the strings they were interned from are equal;
/// comparison never touches the underlying bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

// Keywords and punctuation-like names this language's grammar actually uses.
// Pre-interning them gives stable indices and avoids an allocation for every
// occurrence of `let` or `return` in a program. Indices must match
// `KNOWN_SYMBOLS`'s order exactly.
impl Symbol {
    pub const KW_LET: Symbol = Symbol(0);
    pub const KW_FN: Symbol = Symbol(1);
    pub const KW_STRUCT: Symbol = Symbol(2);
    pub const KW_UNION: Symbol = Symbol(3);
    pub const KW_ENUM: Symbol = Symbol(4);
    pub const KW_NEWTYPE: Symbol = Symbol(5);
    pub const KW_RETURN: Symbol = Symbol(6);
    pub const KW_BREAK: Symbol = Symbol(7);
    pub const KW_CONTINUE: Symbol = Symbol(8);
    pub const KW_MAIN: Symbol = Symbol(9);
}

const KNOWN_SYMBOLS: &[&str] = &[
    "let", "fn", "struct", "union", "enum", "newtype", "return", "break", "continue", "main",
];

thread_local! {
    static TABLE: RefCell<Interner> = RefCell::new(Interner::with_known_symbols());
}

struct Interner {
    names: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn with_known_symbols() -> Self {
        let mut interner = Interner { names: FxHashMap::default(), strings: Vec::new() };
        for s in KNOWN_SYMBOLS {
            interner.intern(s);
        }
        interner
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&idx) = self.names.get(string) {
            return Symbol(idx);
        }
        let idx = self.strings.len() as u32;
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        self.names.insert(leaked, idx);
        self.strings.push(leaked);
        Symbol(idx)
    }

    fn resolve(&self, symbol: Symbol) -> &'static str {
        self.strings[symbol.0 as usize]
    }
}

impl Symbol {
    pub fn intern(string: &str) -> Symbol {
        TABLE.with(|table| table.borrow_mut().intern(string))
    }

    pub fn as_str(self) -> &'static str {
        TABLE.with(|table| table.borrow().resolve(self))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::intern(value)
    }
}
