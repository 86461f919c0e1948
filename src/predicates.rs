//! Category predicates over the underlying shape of a type.

use rustc_hash::FxHashSet;

use crate::arena::TypeArena;
use crate::types::{BasicInfo, BasicKind, Type, TypeId, TypeNameId};

impl TypeArena {
    /// Category flags of the basic type underlying `typ`, if any.
    #[inline]
    pub fn basic_info(&self, typ: TypeId) -> Option<BasicInfo> {
        match &self[self.underlying(typ)] {
            Type::Basic(b) => Some(b.info),
            _ => None,
        }
    }

    #[inline]
    fn has_info(&self, typ: TypeId, flags: BasicInfo) -> bool {
        self.basic_info(typ).is_some_and(|info| info.intersects(flags))
    }

    #[inline]
    pub fn is_boolean(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::BOOLEAN)
    }

    #[inline]
    pub fn is_integer(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::INTEGER)
    }

    #[inline]
    pub fn is_unsigned(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::UNSIGNED)
    }

    #[inline]
    pub fn is_float(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::FLOAT)
    }

    #[inline]
    pub fn is_complex(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::COMPLEX)
    }

    #[inline]
    pub fn is_numeric(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::NUMERIC)
    }

    #[inline]
    pub fn is_string(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::STRING)
    }

    #[inline]
    pub fn is_untyped(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::UNTYPED)
    }

    #[inline]
    pub fn is_ordered(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::ORDERED)
    }

    #[inline]
    pub fn is_const_type(&self, typ: TypeId) -> bool {
        self.has_info(typ, BasicInfo::CONST_TYPE)
    }

    /// Reports whether `typ` has a name of its own: a basic or declared type.
    ///
    /// Looks at `typ` itself, not at its underlying type.
    pub fn is_named(&self, typ: TypeId) -> bool {
        match &self[typ] {
            Type::Basic(_) | Type::Named(_) => true,
            Type::Array(_)
            | Type::Slice(_)
            | Type::Struct(_)
            | Type::Pointer(_)
            | Type::Signature(_)
            | Type::Interface(_)
            | Type::Map(_)
            | Type::Chan(_) => false,
        }
    }

    /// Reports whether values of `typ` can be compared with `==`.
    pub fn is_comparable(&self, typ: TypeId) -> bool {
        self.comparable(typ, &mut FxHashSet::default())
    }

    // A declaration re-entered while its own comparability is still being
    // decided counts as comparable; any non-comparable part elsewhere in the
    // type decides the answer.
    fn comparable(&self, typ: TypeId, seen: &mut FxHashSet<TypeNameId>) -> bool {
        let typ = match &self[typ] {
            Type::Named(n) => {
                if !seen.insert(n.obj) {
                    return true;
                }
                self.underlying(typ)
            }
            _ => typ,
        };
        match &self[typ] {
            Type::Basic(b) => !matches!(b.kind, BasicKind::Invalid | BasicKind::UntypedNil),
            // compared by identity, not by content
            Type::Pointer(_) | Type::Interface(_) | Type::Chan(_) => true,
            Type::Struct(s) => s.fields.iter().all(|f| self.comparable(f.typ, seen)),
            Type::Array(a) => self.comparable(a.elem, seen),
            Type::Slice(_) | Type::Signature(_) | Type::Map(_) => false,
            Type::Named(_) => unreachable!("underlying type is never declared"),
        }
    }

    /// Reports whether the zero value of `typ` is `nil`.
    pub fn has_nil(&self, typ: TypeId) -> bool {
        match &self[self.underlying(typ)] {
            Type::Slice(_)
            | Type::Pointer(_)
            | Type::Signature(_)
            | Type::Interface(_)
            | Type::Map(_)
            | Type::Chan(_) => true,
            Type::Basic(_) | Type::Array(_) | Type::Struct(_) | Type::Named(_) => false,
        }
    }
}
