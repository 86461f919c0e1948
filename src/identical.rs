//! Type identity.
//!
//! Declared types are identical only when they come from the same declaration.
//! All other types are identical when their shapes agree, recursively.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::TypeArena;
use crate::types::{FuncId, QualifiedName, Tuple, Type, TypeId};

impl TypeArena {
    /// Reports whether `x` and `y` are identical types.
    pub fn identical(&self, x: TypeId, y: TypeId) -> bool {
        if x == y {
            return true;
        }

        match &self[x] {
            // Basic types are singletons except for the byte and rune aliases,
            // so the id check above is not enough.
            Type::Basic(x) => match &self[y] {
                Type::Basic(y) => x.kind == y.kind,
                _ => false,
            },

            Type::Array(x) => match &self[y] {
                Type::Array(y) => x.len == y.len && self.identical(x.elem, y.elem),
                _ => false,
            },

            Type::Slice(x) => match &self[y] {
                Type::Slice(y) => self.identical(x.elem, y.elem),
                _ => false,
            },

            // Same field sequence: pairwise equal embedding, tags and names, and
            // identical field types. Two embedded fields count as equally named.
            Type::Struct(x) => match &self[y] {
                Type::Struct(y) => {
                    x.num_fields() == y.num_fields()
                        && x.fields.iter().zip(&y.fields).all(|(f, g)| {
                            f.anonymous == g.anonymous
                                && f.tag == g.tag
                                && (f.anonymous || f.is_match(g.pkg, g.name))
                                && self.identical(f.typ, g.typ)
                        })
                }
                _ => false,
            },

            Type::Pointer(x) => match &self[y] {
                Type::Pointer(y) => self.identical(x.base, y.base),
                _ => false,
            },

            // Parameter and result names are not required to match.
            Type::Signature(x) => match &self[y] {
                Type::Signature(y) => {
                    x.variadic == y.variadic
                        && self.identical_tuples(&x.params, &y.params)
                        && self.identical_tuples(&x.results, &y.results)
                }
                _ => false,
            },

            Type::Interface(x) => match &self[y] {
                Type::Interface(y) => self.identical_methods(x.methods(), y.methods()),
                _ => false,
            },

            Type::Map(x) => match &self[y] {
                Type::Map(y) => self.identical(x.key, y.key) && self.identical(x.elem, y.elem),
                _ => false,
            },

            Type::Chan(x) => match &self[y] {
                Type::Chan(y) => x.dir == y.dir && self.identical(x.elem, y.elem),
                _ => false,
            },

            Type::Named(x) => match &self[y] {
                Type::Named(y) => x.obj == y.obj,
                _ => false,
            },
        }
    }

    /// Reports whether `a` and `b` have the same length and pairwise identical
    /// variable types.
    pub fn identical_tuples(&self, a: &Tuple, b: &Tuple) -> bool {
        a.len() == b.len()
            && a
                .vars()
                .iter()
                .zip(b.vars())
                .all(|(x, y)| self.identical(x.typ, y.typ))
    }

    /// Reports whether `a` and `b` hold the same methods, by qualified name and
    /// identical signature, in any order.
    ///
    /// # Panics
    /// Panics if either list holds two methods with the same qualified name.
    /// The right-hand list is checked too: with equal lengths, a duplicate on
    /// that side would otherwise hide a method missing from it.
    pub fn identical_methods(&self, a: &[FuncId], b: &[FuncId]) -> bool {
        if a.len() != b.len() {
            return false;
        }

        let mut by_name: FxHashMap<QualifiedName, FuncId> = FxHashMap::default();
        by_name.reserve(a.len());
        for &x in a {
            let prev = by_name.insert(self[x].qualified_name(), x);
            assert!(
                prev.is_none(),
                "method list has duplicate entries for {}",
                self.resolve(self[x].name)
            );
        }

        let mut seen: FxHashSet<QualifiedName> = FxHashSet::default();
        seen.reserve(b.len());
        for &y in b {
            let key = self[y].qualified_name();
            assert!(
                seen.insert(key),
                "method list has duplicate entries for {}",
                self.resolve(self[y].name)
            );
            match by_name.get(&key) {
                Some(&x) if self.identical(self[x].sig, self[y].sig) => {}
                _ => return false,
            }
        }

        true
    }
}
