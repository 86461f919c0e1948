//! Identifier interning.
//!
//! Every field, method, parameter and type name is stored once and referenced
//! by a [`Symbol`]. Comparing two names is then a `u32` comparison.

use rustc_hash::FxHashMap;

/// An interned string handle (compact identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Simple string interner.
///
/// - `intern(&str) -> Symbol` deduplicates identifiers.
/// - `resolve(Symbol) -> &str` retrieves the original text.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, Symbol>,
    vec: Vec<Box<str>>,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves capacity for additional symbols.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
        self.vec.reserve(additional);
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let boxed: Box<str> = s.into();
        let sym = Symbol(self.vec.len() as u32);
        self.map.insert(boxed.clone(), sym);
        self.vec.push(boxed);
        sym
    }

    /// Looks up a string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    /// Resolves a symbol back to its string.
    ///
    /// # Panics
    /// Panics if the symbol was produced by a different interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

/// Reports whether `name` is exported: its first character is an upper-case
/// letter.
#[inline]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
