//! Central storage for types, declarations and names.
//!
//! All types are allocated here and referenced via typed ids. The arena is
//! filled while declarations are processed and read-only afterwards; every
//! query in this crate takes `&TypeArena`, so a completed arena can be shared
//! across threads.

use core::ops::Index;

use la_arena::Arena;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::DeclError;
use crate::intern::{Interner, Symbol, is_exported};
use crate::types::*;

/// Owner of every type, declaration and identifier of one compilation.
#[derive(Debug)]
pub struct TypeArena {
    types: Arena<Type>,
    funcs: Arena<Func>,
    type_names: Arena<TypeName>,
    packages: Arena<Package>,
    package_paths: FxHashMap<Box<str>, PackageId>,
    interner: Interner,
    universe: [TypeId; BasicKind::COUNT],
    byte: TypeId,
    rune: TypeId,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Creates an arena holding only the predeclared basic types.
    pub fn new() -> Self {
        Self::with_types(Arena::new())
    }

    /// Creates an arena with room for `additional` types beyond the universe.
    pub fn with_capacity(additional: usize) -> Self {
        let mut arena = Self::with_types(Arena::with_capacity(
            BasicKind::COUNT + 2 + additional,
        ));
        arena.interner.reserve(additional);
        arena
    }

    fn with_types(mut types: Arena<Type>) -> Self {
        let universe =
            core::array::from_fn(|i| types.alloc(Type::Basic(BASIC_TYPES[i])));
        let byte = types.alloc(Type::Basic(BYTE));
        let rune = types.alloc(Type::Basic(RUNE));
        Self {
            types,
            funcs: Arena::new(),
            type_names: Arena::new(),
            packages: Arena::new(),
            package_paths: FxHashMap::default(),
            interner: Interner::new(),
            universe,
            byte,
            rune,
        }
    }

    // Universe

    #[inline]
    pub fn basic(&self, kind: BasicKind) -> TypeId {
        self.universe[kind as usize]
    }

    #[inline]
    pub fn byte(&self) -> TypeId {
        self.byte
    }

    #[inline]
    pub fn rune(&self) -> TypeId {
        self.rune
    }

    #[inline]
    pub fn invalid(&self) -> TypeId {
        self.basic(BasicKind::Invalid)
    }

    // Names and packages

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    #[inline]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Returns the package with import path `path`, creating it on first use.
    pub fn package(&mut self, path: &str, name: &str) -> PackageId {
        if let Some(&id) = self.package_paths.get(path) {
            return id;
        }
        let id = self.packages.alloc(Package {
            path: path.into(),
            name: name.into(),
        });
        self.package_paths.insert(path.into(), id);
        id
    }

    #[inline]
    pub fn lookup_package(&self, path: &str) -> Option<PackageId> {
        self.package_paths.get(path).copied()
    }

    #[inline]
    pub fn package_path(&self, id: PackageId) -> &str {
        &self.packages[id].path
    }

    /// Qualified name for `name` as seen from `pkg`.
    pub fn qualified_name(&mut self, pkg: Option<PackageId>, name: &str) -> QualifiedName {
        QualifiedName {
            pkg: if is_exported(name) { None } else { pkg },
            name: self.intern(name),
        }
    }

    // Composite shapes

    pub fn new_array(&mut self, elem: TypeId, len: u64) -> TypeId {
        self.types.alloc(Type::Array(Array { elem, len }))
    }

    pub fn new_slice(&mut self, elem: TypeId) -> TypeId {
        self.types.alloc(Type::Slice(Slice { elem }))
    }

    pub fn new_field(&mut self, pkg: Option<PackageId>, name: &str, typ: TypeId) -> Field {
        Field {
            pkg,
            name: self.intern(name),
            exported: is_exported(name),
            typ,
            tag: "".into(),
            anonymous: false,
        }
    }

    /// Embedded field; its name is the name of `typ` (through one pointer).
    pub fn new_embedded_field(&mut self, pkg: Option<PackageId>, typ: TypeId) -> Field {
        let base = match &self.types[typ] {
            Type::Pointer(p) => p.base,
            _ => typ,
        };
        let name = match &self.types[base] {
            Type::Named(n) => self.type_names[n.obj].name,
            Type::Basic(b) => self.interner.intern(b.name),
            other => panic!("embedded field of unnamed {} type", other.shape()),
        };
        Field {
            pkg,
            name,
            exported: is_exported(self.interner.resolve(name)),
            typ,
            tag: "".into(),
            anonymous: true,
        }
    }

    pub fn new_struct(&mut self, fields: impl IntoIterator<Item = Field>) -> TypeId {
        self.types.alloc(Type::Struct(Struct {
            fields: fields.into_iter().collect(),
        }))
    }

    pub fn new_pointer(&mut self, base: TypeId) -> TypeId {
        self.types.alloc(Type::Pointer(Pointer { base }))
    }

    /// Parameter or result variable; `""` yields an unnamed variable.
    pub fn new_var(&mut self, name: &str, typ: TypeId) -> Var {
        let name = (!name.is_empty()).then(|| self.intern(name));
        Var { name, typ }
    }

    pub fn new_signature(&mut self, params: Tuple, results: Tuple, variadic: bool) -> TypeId {
        debug_assert!(
            !variadic
                || params
                    .vars()
                    .last()
                    .is_some_and(|v| matches!(self.types[v.typ], Type::Slice(_))),
            "variadic signature must end in a slice parameter"
        );
        self.types.alloc(Type::Signature(Signature {
            params,
            results,
            variadic,
        }))
    }

    pub fn new_func(&mut self, pkg: Option<PackageId>, name: &str, sig: TypeId) -> FuncId {
        debug_assert!(matches!(self.types[sig], Type::Signature(_)));
        self.funcs.alloc(Func {
            pkg,
            name: self.interner.intern(name),
            exported: is_exported(name),
            sig,
        })
    }

    pub fn new_interface(&mut self, methods: impl IntoIterator<Item = FuncId>) -> TypeId {
        self.types.alloc(Type::Interface(Interface {
            methods: methods.into_iter().collect(),
        }))
    }

    pub fn new_map(&mut self, key: TypeId, elem: TypeId) -> TypeId {
        self.types.alloc(Type::Map(Map { key, elem }))
    }

    pub fn new_chan(&mut self, dir: ChanDir, elem: TypeId) -> TypeId {
        self.types.alloc(Type::Chan(Chan { dir, elem }))
    }

    // Declared types

    pub fn new_type_name(&mut self, pkg: Option<PackageId>, name: &str) -> TypeNameId {
        let name = self.intern(name);
        self.type_names.alloc(TypeName { pkg, name })
    }

    /// Allocates a declared type for `obj`.
    ///
    /// Without `underlying` the type starts out invalid and must be completed
    /// with [`set_underlying`](Self::set_underlying), which is how recursive
    /// declarations refer to themselves.
    pub fn new_named(&mut self, obj: TypeNameId, underlying: Option<TypeId>) -> TypeId {
        let underlying = underlying.map(|typ| self.resolve_declared(typ));
        self.types.alloc(Type::Named(Named {
            obj,
            underlying,
            methods: SmallVec::new(),
        }))
    }

    /// Declares `type name underlying` in one step.
    pub fn declare(
        &mut self,
        pkg: Option<PackageId>,
        name: &str,
        underlying: Option<TypeId>,
    ) -> TypeId {
        let obj = self.new_type_name(pkg, name);
        self.new_named(obj, underlying)
    }

    /// Completes a declared type with the underlying type of `typ`.
    ///
    /// `typ` may be a declaration that is not complete yet (`type A B` seen
    /// before `type B int`); `named` then resolves through it once it is.
    pub fn set_underlying(&mut self, named: TypeId, typ: TypeId) -> Result<(), DeclError> {
        let underlying = self.resolve_declared(typ);
        match &self.types[named] {
            Type::Named(n) if n.underlying.is_some() => {
                return Err(DeclError::UnderlyingAlreadySet {
                    name: self.named_name(named),
                });
            }
            Type::Named(_) => {}
            other => {
                return Err(DeclError::NotNamed {
                    shape: other.shape(),
                });
            }
        }
        // `type T T`, or a longer chain of plain declarations leading back to T
        if underlying == named {
            return Err(DeclError::InvalidRecursiveType {
                name: self.named_name(named),
            });
        }
        if let Type::Named(n) = &mut self.types[named] {
            n.underlying = Some(underlying);
        }
        Ok(())
    }

    /// Follows `typ` through completed declarations. Stops at the first
    /// undeclared shape or at the first declaration still incomplete.
    fn resolve_declared(&self, mut typ: TypeId) -> TypeId {
        while let Type::Named(n) = &self.types[typ] {
            match n.underlying {
                Some(next) => typ = next,
                None => break,
            }
        }
        typ
    }

    /// Attaches method `func` to the declared type `named`.
    pub fn add_method(&mut self, named: TypeId, func: FuncId) -> Result<(), DeclError> {
        let key = self.funcs[func].qualified_name();
        let Type::Named(n) = &self.types[named] else {
            return Err(DeclError::NotNamed {
                shape: self.types[named].shape(),
            });
        };
        if n
            .methods
            .iter()
            .any(|&m| self.funcs[m].qualified_name() == key)
        {
            let name = format!(
                "{}.{}",
                self.named_name(named),
                self.resolve(self.funcs[func].name)
            );
            return Err(DeclError::DuplicateMethod { name });
        }
        if let Type::Named(n) = &mut self.types[named] {
            n.methods.push(func);
        }
        Ok(())
    }

    fn named_name(&self, id: TypeId) -> String {
        match &self.types[id] {
            Type::Named(n) => self.resolve(self.type_names[n.obj].name).to_owned(),
            other => other.shape().to_owned(),
        }
    }

    // Accessors

    #[inline]
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id]
    }

    #[inline]
    pub fn func(&self, id: FuncId) -> &Func {
        &self.funcs[id]
    }

    #[inline]
    pub fn type_name(&self, id: TypeNameId) -> &TypeName {
        &self.type_names[id]
    }

    #[inline]
    pub fn package_info(&self, id: PackageId) -> &Package {
        &self.packages[id]
    }

    /// Structural shape of `id`: a declared type unwraps to its underlying
    /// type, every other type is its own underlying type.
    ///
    /// A declaration that is not complete yet, directly or through the
    /// declaration it refers to, has the invalid type as its underlying type.
    #[inline]
    pub fn underlying(&self, id: TypeId) -> TypeId {
        let typ = self.resolve_declared(id);
        match &self.types[typ] {
            Type::Named(_) => self.invalid(),
            _ => typ,
        }
    }

    /// Reports whether `id` is a declared type whose underlying type is known.
    pub fn is_complete(&self, id: TypeId) -> bool {
        matches!(self.types[id], Type::Named(_))
            && !matches!(self.types[self.resolve_declared(id)], Type::Named(_))
    }

    /// Interface behind `id`, looking through a declared type.
    #[inline]
    pub fn as_interface(&self, id: TypeId) -> Option<&Interface> {
        match &self.types[self.underlying(id)] {
            Type::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// Method of `iface` with qualified name `name`.
    pub fn interface_method(&self, iface: &Interface, name: QualifiedName) -> Option<FuncId> {
        iface
            .methods()
            .iter()
            .copied()
            .find(|&m| self.funcs[m].qualified_name() == name)
    }

    /// Declared method of `named` with qualified name `name`.
    pub fn named_method(&self, named: &Named, name: QualifiedName) -> Option<FuncId> {
        named
            .methods
            .iter()
            .copied()
            .find(|&m| self.funcs[m].qualified_name() == name)
    }

    /// Number of allocated types, universe included.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Index<TypeId> for TypeArena {
    type Output = Type;
    fn index(&self, id: TypeId) -> &Type {
        &self.types[id]
    }
}

impl Index<FuncId> for TypeArena {
    type Output = Func;
    fn index(&self, id: FuncId) -> &Func {
        &self.funcs[id]
    }
}

impl Index<TypeNameId> for TypeArena {
    type Output = TypeName;
    fn index(&self, id: TypeNameId) -> &TypeName {
        &self.type_names[id]
    }
}
