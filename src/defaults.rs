use crate::arena::TypeArena;
use crate::types::{BasicKind, Type, TypeId};

impl TypeArena {
    /// Default type of an untyped constant type; any other type is returned
    /// unchanged.
    ///
    /// `untyped nil` has no default type. Callers must report it before
    /// asking; it maps to the invalid type.
    pub fn default_type(&self, typ: TypeId) -> TypeId {
        let Type::Basic(b) = &self[typ] else {
            return typ;
        };
        debug_assert_ne!(
            b.kind,
            BasicKind::UntypedNil,
            "untyped nil has no default type"
        );
        match b.kind {
            BasicKind::UntypedBool => self.basic(BasicKind::Bool),
            BasicKind::UntypedInt => self.basic(BasicKind::Int),
            BasicKind::UntypedRune => self.rune(),
            BasicKind::UntypedFloat => self.basic(BasicKind::Float64),
            BasicKind::UntypedComplex => self.basic(BasicKind::Complex128),
            BasicKind::UntypedString => self.basic(BasicKind::String),
            BasicKind::UntypedNil => self.invalid(),
            _ => typ,
        }
    }
}
