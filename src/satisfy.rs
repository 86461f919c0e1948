//! Interface satisfaction.

use core::fmt;

use crate::arena::TypeArena;
use crate::lookup::{EmbeddingLookup, MethodLookup};
use crate::types::{FuncId, Interface, TypeId};

/// First interface method a type fails to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingMethod {
    pub method: FuncId,
    /// The method exists but its type differs from the interface's.
    pub wrong_type: bool,
}

impl MissingMethod {
    pub fn display<'a>(&self, arena: &'a TypeArena) -> MissingMethodDisplay<'a> {
        MissingMethodDisplay {
            arena,
            missing: *self,
        }
    }
}

pub struct MissingMethodDisplay<'a> {
    arena: &'a TypeArena,
    missing: MissingMethod,
}

impl fmt::Display for MissingMethodDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let func = &self.arena[self.missing.method];
        let what = if self.missing.wrong_type {
            "wrong type for method"
        } else {
            "missing method"
        };
        write!(
            f,
            "{what} {}{}",
            self.arena.resolve(func.name),
            self.arena.display_method(func.sig)
        )
    }
}

impl TypeArena {
    /// Returns `None` if `typ` implements `iface`, otherwise the first method of
    /// `iface` (in its declaration order) that `typ` lacks or has with a
    /// different signature.
    pub fn missing_method(&self, typ: TypeId, iface: &Interface) -> Option<MissingMethod> {
        self.missing_method_with(typ, iface, &EmbeddingLookup::default())
    }

    /// Like [`missing_method`](Self::missing_method) with a caller-provided
    /// method lookup for concrete types.
    ///
    /// An interface type only has to avoid conflicting signatures: a method it
    /// does not have at all is not a failure.
    #[tracing::instrument(level = "trace", skip_all, fields(typ = %self.display(typ)))]
    pub fn missing_method_with(
        &self,
        typ: TypeId,
        iface: &Interface,
        lookup: &dyn MethodLookup,
    ) -> Option<MissingMethod> {
        if iface.is_empty() {
            return None;
        }

        if let Some(ityp) = self.as_interface(typ) {
            for &m in iface.methods() {
                let want = &self[m];
                if let Some(have) = self.interface_method(ityp, want.qualified_name()) {
                    if !self.identical(self[have].sig, want.sig) {
                        tracing::trace!(method = self.resolve(want.name), "conflicting signature");
                        return Some(MissingMethod {
                            method: m,
                            wrong_type: true,
                        });
                    }
                }
            }
            return None;
        }

        for &m in iface.methods() {
            let want = &self[m];
            let Some(sel) = lookup.lookup(self, typ, want.qualified_name()) else {
                tracing::trace!(method = self.resolve(want.name), "method not found");
                return Some(MissingMethod {
                    method: m,
                    wrong_type: false,
                });
            };
            if !self.identical(sel.typ(self), want.sig) {
                tracing::trace!(method = self.resolve(want.name), "wrong method type");
                return Some(MissingMethod {
                    method: m,
                    wrong_type: true,
                });
            }
        }

        None
    }

    /// Reports whether `typ` implements `iface`.
    #[inline]
    pub fn implements(&self, typ: TypeId, iface: &Interface) -> bool {
        self.missing_method(typ, iface).is_none()
    }
}
