//! Method and field lookup by qualified name, including names promoted
//! through embedded struct fields.

use rustc_hash::FxHashSet;
use smallvec::{SmallVec, smallvec};

use crate::arena::TypeArena;
use crate::types::{FuncId, QualifiedName, Type, TypeId};

/// What a selector `x.name` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Method(FuncId),
    Field { typ: TypeId },
}

impl Selection {
    /// Type compared against an interface method: the method's signature or
    /// the field's type.
    #[inline]
    pub fn typ(&self, arena: &TypeArena) -> TypeId {
        match *self {
            Selection::Method(func) => arena[func].sig,
            Selection::Field { typ } => typ,
        }
    }
}

/// Resolves a qualified name on a type.
pub trait MethodLookup {
    fn lookup(&self, arena: &TypeArena, typ: TypeId, name: QualifiedName) -> Option<Selection>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupConfig {
    /// Embedded fields deeper than this are not searched.
    pub max_embedding_depth: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_embedding_depth: 32,
        }
    }
}

/// Lookup through declared methods, struct fields and embedded fields.
///
/// The search runs breadth-first over embedding depth. A name found exactly
/// once at the shallowest depth wins; found more than once it is ambiguous and
/// the lookup fails. A declared type embedded along two paths of the same
/// length (`struct { A; B }` where both embed `C`) counts once per path.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingLookup {
    config: LookupConfig,
}

impl EmbeddingLookup {
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }
}

/// A type to search at the current depth. `multiples` is set when the same
/// type was reached through more than one embedding path at this depth.
#[derive(Debug, Clone, Copy)]
struct Embedded {
    typ: TypeId,
    multiples: bool,
}

impl MethodLookup for EmbeddingLookup {
    fn lookup(&self, arena: &TypeArena, typ: TypeId, name: QualifiedName) -> Option<Selection> {
        // *T has the methods of T; a pointer to an interface has none.
        let start = match &arena[typ] {
            Type::Pointer(p) if arena.as_interface(p.base).is_some() => return None,
            Type::Pointer(p) => p.base,
            _ => typ,
        };

        let mut current: SmallVec<[Embedded; 4]> = smallvec![Embedded {
            typ: start,
            multiples: false,
        }];
        let mut seen = FxHashSet::default();

        for depth in 0..=self.config.max_embedding_depth {
            if current.is_empty() {
                break;
            }

            let mut found = None;
            let mut count = 0usize;
            let mut next: SmallVec<[Embedded; 4]> = SmallVec::new();

            for e in &current {
                // a match on a type reached twice is already ambiguous
                let hits = if e.multiples { 2 } else { 1 };
                let mut t = e.typ;
                if let Type::Named(n) = &arena[t] {
                    // entries are unique per depth, so this only skips
                    // declarations already searched at a shallower depth
                    if !seen.insert(n.obj) {
                        continue;
                    }
                    if let Some(m) = arena.named_method(n, name) {
                        count += hits;
                        found = Some(Selection::Method(m));
                        continue;
                    }
                    t = arena.underlying(t);
                }

                match &arena[t] {
                    Type::Struct(s) => {
                        for f in &s.fields {
                            if f.is_match(name.pkg, name.name) {
                                count += hits;
                                found = Some(Selection::Field { typ: f.typ });
                                continue;
                            }
                            if f.anonymous && count == 0 {
                                let typ = match &arena[f.typ] {
                                    Type::Pointer(p) => p.base,
                                    _ => f.typ,
                                };
                                next.push(Embedded {
                                    typ,
                                    multiples: e.multiples,
                                });
                            }
                        }
                    }
                    Type::Interface(i) => {
                        if let Some(m) = arena.interface_method(i, name) {
                            count += hits;
                            found = Some(Selection::Method(m));
                        }
                    }
                    Type::Basic(_)
                    | Type::Array(_)
                    | Type::Slice(_)
                    | Type::Pointer(_)
                    | Type::Signature(_)
                    | Type::Map(_)
                    | Type::Chan(_)
                    | Type::Named(_) => {}
                }
            }

            match count {
                0 => current = consolidate(arena, next),
                1 => return found,
                _ => {
                    tracing::debug!(
                        name = arena.resolve(name.name),
                        depth,
                        count,
                        "ambiguous selector"
                    );
                    return None;
                }
            }
        }

        None
    }
}

/// Merges entries for identical types, marking the survivors as reached more
/// than once.
fn consolidate(arena: &TypeArena, list: SmallVec<[Embedded; 4]>) -> SmallVec<[Embedded; 4]> {
    let mut out: SmallVec<[Embedded; 4]> = SmallVec::with_capacity(list.len());
    for e in list {
        match out.iter_mut().find(|o| arena.identical(o.typ, e.typ)) {
            Some(o) => o.multiples = true,
            None => out.push(e),
        }
    }
    out
}
