//! Go syntax rendering of types, for diagnostics and logs.

use core::fmt::{self, Write};

use crate::arena::TypeArena;
use crate::types::{ChanDir, QualifiedName, Signature, Tuple, Type, TypeId};

/// Renders a type the way Go source would spell it.
#[derive(Clone, Copy)]
pub struct TypeDisplay<'a> {
    arena: &'a TypeArena,
    id: TypeId,
    method: bool,
}

impl TypeArena {
    #[inline]
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay {
            arena: self,
            id,
            method: false,
        }
    }

    /// Renders a signature without the `func` keyword: `(p []byte) (int, error)`.
    #[inline]
    pub fn display_method(&self, sig: TypeId) -> TypeDisplay<'_> {
        TypeDisplay {
            arena: self,
            id: sig,
            method: true,
        }
    }

    /// `Name` for exported names, `path.name` otherwise.
    pub fn display_qualified(&self, name: QualifiedName) -> String {
        match name.pkg {
            Some(pkg) => format!("{}.{}", self.package_path(pkg), self.resolve(name.name)),
            None => self.resolve(name.name).to_owned(),
        }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = Writer { arena: self.arena };
        match (&self.arena[self.id], self.method) {
            (Type::Signature(sig), true) => w.signature(f, sig),
            _ => w.typ(f, self.id),
        }
    }
}

impl fmt::Debug for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

struct Writer<'a> {
    arena: &'a TypeArena,
}

impl Writer<'_> {
    fn typ(&self, f: &mut fmt::Formatter<'_>, id: TypeId) -> fmt::Result {
        let a = self.arena;
        match &a[id] {
            Type::Basic(b) => f.write_str(b.name),
            Type::Array(t) => {
                write!(f, "[{}]", t.len)?;
                self.typ(f, t.elem)
            }
            Type::Slice(t) => {
                f.write_str("[]")?;
                self.typ(f, t.elem)
            }
            Type::Struct(t) => {
                f.write_str("struct{")?;
                for (i, field) in t.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if !field.anonymous {
                        write!(f, "{} ", a.resolve(field.name))?;
                    }
                    self.typ(f, field.typ)?;
                    if !field.tag.is_empty() {
                        write!(f, " {:?}", field.tag)?;
                    }
                }
                f.write_char('}')
            }
            Type::Pointer(t) => {
                f.write_char('*')?;
                self.typ(f, t.base)
            }
            Type::Signature(sig) => {
                f.write_str("func")?;
                self.signature(f, sig)
            }
            Type::Interface(t) => {
                f.write_str("interface{")?;
                for (i, &m) in t.methods().iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    let func = &a[m];
                    f.write_str(a.resolve(func.name))?;
                    match &a[func.sig] {
                        Type::Signature(sig) => self.signature(f, sig)?,
                        _ => self.typ(f, func.sig)?,
                    }
                }
                f.write_char('}')
            }
            Type::Map(t) => {
                f.write_str("map[")?;
                self.typ(f, t.key)?;
                f.write_char(']')?;
                self.typ(f, t.elem)
            }
            Type::Chan(t) => {
                let prefix = match t.dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                };
                f.write_str(prefix)?;
                // chan (<-chan T) must keep its parentheses
                let paren = t.dir == ChanDir::Both
                    && matches!(&a[t.elem], Type::Chan(c) if c.dir == ChanDir::Recv);
                if paren {
                    f.write_char('(')?;
                }
                self.typ(f, t.elem)?;
                if paren {
                    f.write_char(')')?;
                }
                Ok(())
            }
            Type::Named(t) => {
                let obj = &a[t.obj];
                if let Some(pkg) = obj.pkg {
                    write!(f, "{}.", a.package_path(pkg))?;
                }
                f.write_str(a.resolve(obj.name))
            }
        }
    }

    fn signature(&self, f: &mut fmt::Formatter<'_>, sig: &Signature) -> fmt::Result {
        self.tuple(f, &sig.params, sig.variadic)?;
        match sig.results.vars() {
            [] => Ok(()),
            [only] if only.name.is_none() => {
                f.write_char(' ')?;
                self.typ(f, only.typ)
            }
            _ => {
                f.write_char(' ')?;
                self.tuple(f, &sig.results, false)
            }
        }
    }

    fn tuple(&self, f: &mut fmt::Formatter<'_>, tuple: &Tuple, variadic: bool) -> fmt::Result {
        let a = self.arena;
        f.write_char('(')?;
        let last = tuple.len().saturating_sub(1);
        for (i, var) in tuple.vars().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(name) = var.name {
                write!(f, "{} ", a.resolve(name))?;
            }
            match &a[var.typ] {
                Type::Slice(s) if variadic && i == last => {
                    f.write_str("...")?;
                    self.typ(f, s.elem)?;
                }
                _ => self.typ(f, var.typ)?,
            }
        }
        f.write_char(')')
    }
}
