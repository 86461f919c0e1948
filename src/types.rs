//! # Go Type Model
//!
//! The closed set of type shapes the checker reasons about. Every type lives in
//! a [`TypeArena`](crate::TypeArena) and is referenced through a typed index.
//!
//! ## Identity Handles
//!
//! - [`TypeId`]: one allocated type. Equal ids are trivially identical types.
//! - [`TypeNameId`]: one type *declaration*. Two `Named` types are identical iff
//!   they share a `TypeNameId`, never because their shapes agree.
//! - [`FuncId`]: one method or function symbol.
//! - [`PackageId`]: one package, interned by import path.
//!
//! Shapes are built bottom-up (children are allocated before their parents), so
//! anonymous shapes cannot form cycles. Recursion in a type graph always passes
//! through a `Named` declaration.

use bitflags::bitflags;
use la_arena::Idx;
use smallvec::SmallVec;

use crate::intern::Symbol;

pub type TypeId = Idx<Type>;
pub type FuncId = Idx<Func>;
pub type TypeNameId = Idx<TypeName>;
pub type PackageId = Idx<Package>;

// =============================================================================
// Basic Types
// =============================================================================

/// Kind of a basic (predeclared) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BasicKind {
    Invalid,

    // Predeclared types
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,

    // Types for untyped values
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    pub const COUNT: usize = 26;

    pub const ALL: [BasicKind; Self::COUNT] = [
        BasicKind::Invalid,
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
        BasicKind::UnsafePointer,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedRune,
        BasicKind::UntypedFloat,
        BasicKind::UntypedComplex,
        BasicKind::UntypedString,
        BasicKind::UntypedNil,
    ];

    /// Canonical basic type for this kind.
    #[inline]
    pub fn basic(self) -> Basic {
        BASIC_TYPES[self as usize]
    }

    #[inline]
    pub fn info(self) -> BasicInfo {
        self.basic().info
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.basic().name
    }
}

bitflags! {
    /// Category properties of a basic type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BasicInfo: u16 {
        const BOOLEAN = 1 << 0;
        const INTEGER = 1 << 1;
        const UNSIGNED = 1 << 2;
        const FLOAT = 1 << 3;
        const COMPLEX = 1 << 4;
        const STRING = 1 << 5;
        const UNTYPED = 1 << 6;

        const ORDERED = Self::INTEGER.bits() | Self::FLOAT.bits() | Self::STRING.bits();
        const NUMERIC = Self::INTEGER.bits() | Self::FLOAT.bits() | Self::COMPLEX.bits();
        const CONST_TYPE = Self::BOOLEAN.bits() | Self::NUMERIC.bits() | Self::STRING.bits();
    }
}

/// A basic type: `bool`, `int`, `string`, `untyped float`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Basic {
    pub kind: BasicKind,
    pub info: BasicInfo,
    pub name: &'static str,
}

const fn basic(kind: BasicKind, info: BasicInfo, name: &'static str) -> Basic {
    Basic { kind, info, name }
}

const UNSIGNED_INT: BasicInfo = BasicInfo::INTEGER.union(BasicInfo::UNSIGNED);

/// Predeclared basic types, indexed by [`BasicKind`].
pub static BASIC_TYPES: [Basic; BasicKind::COUNT] = [
    basic(BasicKind::Invalid, BasicInfo::empty(), "invalid type"),
    basic(BasicKind::Bool, BasicInfo::BOOLEAN, "bool"),
    basic(BasicKind::Int, BasicInfo::INTEGER, "int"),
    basic(BasicKind::Int8, BasicInfo::INTEGER, "int8"),
    basic(BasicKind::Int16, BasicInfo::INTEGER, "int16"),
    basic(BasicKind::Int32, BasicInfo::INTEGER, "int32"),
    basic(BasicKind::Int64, BasicInfo::INTEGER, "int64"),
    basic(BasicKind::Uint, UNSIGNED_INT, "uint"),
    basic(BasicKind::Uint8, UNSIGNED_INT, "uint8"),
    basic(BasicKind::Uint16, UNSIGNED_INT, "uint16"),
    basic(BasicKind::Uint32, UNSIGNED_INT, "uint32"),
    basic(BasicKind::Uint64, UNSIGNED_INT, "uint64"),
    basic(BasicKind::Uintptr, UNSIGNED_INT, "uintptr"),
    basic(BasicKind::Float32, BasicInfo::FLOAT, "float32"),
    basic(BasicKind::Float64, BasicInfo::FLOAT, "float64"),
    basic(BasicKind::Complex64, BasicInfo::COMPLEX, "complex64"),
    basic(BasicKind::Complex128, BasicInfo::COMPLEX, "complex128"),
    basic(BasicKind::String, BasicInfo::STRING, "string"),
    basic(BasicKind::UnsafePointer, BasicInfo::empty(), "Pointer"),
    basic(
        BasicKind::UntypedBool,
        BasicInfo::BOOLEAN.union(BasicInfo::UNTYPED),
        "untyped bool",
    ),
    basic(
        BasicKind::UntypedInt,
        BasicInfo::INTEGER.union(BasicInfo::UNTYPED),
        "untyped int",
    ),
    basic(
        BasicKind::UntypedRune,
        BasicInfo::INTEGER.union(BasicInfo::UNTYPED),
        "untyped rune",
    ),
    basic(
        BasicKind::UntypedFloat,
        BasicInfo::FLOAT.union(BasicInfo::UNTYPED),
        "untyped float",
    ),
    basic(
        BasicKind::UntypedComplex,
        BasicInfo::COMPLEX.union(BasicInfo::UNTYPED),
        "untyped complex",
    ),
    basic(
        BasicKind::UntypedString,
        BasicInfo::STRING.union(BasicInfo::UNTYPED),
        "untyped string",
    ),
    basic(BasicKind::UntypedNil, BasicInfo::UNTYPED, "untyped nil"),
];

/// `byte` is an alias for `uint8`.
pub const BYTE: Basic = basic(BasicKind::Uint8, UNSIGNED_INT, "byte");

/// `rune` is an alias for `int32`.
pub const RUNE: Basic = basic(BasicKind::Int32, BasicInfo::INTEGER, "rune");

// =============================================================================
// Declarations
// =============================================================================

/// A package, interned by import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub path: Box<str>,
    pub name: Box<str>,
}

/// Key under which methods and fields are compared.
///
/// Exported names are package-independent (`pkg == None`). Unexported names
/// carry their declaring package, so `p.m` and `q.m` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub pkg: Option<PackageId>,
    pub name: Symbol,
}

/// The declaration a `Named` type originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub pkg: Option<PackageId>,
    pub name: Symbol,
}

/// A method or function symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub pkg: Option<PackageId>,
    pub name: Symbol,
    pub exported: bool,
    /// Always a [`Type::Signature`].
    pub sig: TypeId,
}

impl Func {
    /// # Panics
    /// Panics for an unexported function without package information.
    pub fn qualified_name(&self) -> QualifiedName {
        if self.exported {
            return QualifiedName {
                pkg: None,
                name: self.name,
            };
        }
        match self.pkg {
            Some(pkg) => QualifiedName {
                pkg: Some(pkg),
                name: self.name,
            },
            None => panic!("unexported function without package information"),
        }
    }
}

// =============================================================================
// Composite Shapes
// =============================================================================

/// Fixed-length array: `[N]T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Array {
    pub elem: TypeId,
    pub len: u64,
}

/// Slice: `[]T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub elem: TypeId,
}

/// Struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub pkg: Option<PackageId>,
    pub name: Symbol,
    pub exported: bool,
    pub typ: TypeId,
    /// Empty when the field carries no tag.
    pub tag: Box<str>,
    /// True for embedded fields; `name` is then the embedded type's name.
    pub anonymous: bool,
}

impl Field {
    pub fn with_tag(mut self, tag: impl Into<Box<str>>) -> Self {
        self.tag = tag.into();
        self
    }

    #[inline]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName {
            pkg: if self.exported { None } else { self.pkg },
            name: self.name,
        }
    }

    /// Reports whether this field is selected by `name` declared in `pkg`.
    ///
    /// Textually equal unexported names only match within one package.
    #[inline]
    pub fn is_match(&self, pkg: Option<PackageId>, name: Symbol) -> bool {
        self.name == name && (self.exported || self.pkg == pkg)
    }
}

/// Struct: `struct { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Struct {
    pub fields: Vec<Field>,
}

impl Struct {
    #[inline]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn tag(&self, i: usize) -> &str {
        &self.fields[i].tag
    }
}

/// Pointer: `*T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub base: TypeId,
}

/// Parameter or result variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var {
    pub name: Option<Symbol>,
    pub typ: TypeId,
}

impl Var {
    #[inline]
    pub const fn unnamed(typ: TypeId) -> Self {
        Self { name: None, typ }
    }
}

/// Ordered parameter or result list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple {
    vars: SmallVec<[Var; 4]>,
}

impl Tuple {
    #[inline]
    pub fn new(vars: impl IntoIterator<Item = Var>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tuple of unnamed variables.
    pub fn of(types: impl IntoIterator<Item = TypeId>) -> Self {
        Self::new(types.into_iter().map(Var::unnamed))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[inline]
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }
}

/// Function signature: `func(params) results`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub params: Tuple,
    pub results: Tuple,
    /// The last parameter is `...T`; its type is `[]T`.
    pub variadic: bool,
}

/// Interface: `interface { ... }`
///
/// Methods keep declaration order; comparisons never depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interface {
    pub methods: SmallVec<[FuncId; 4]>,
}

impl Interface {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    #[inline]
    pub fn methods(&self) -> &[FuncId] {
        &self.methods
    }
}

/// Map: `map[K]V`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Map {
    pub key: TypeId,
    pub elem: TypeId,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// Bidirectional: `chan T`
    Both,
    /// Send-only: `chan<- T`
    Send,
    /// Receive-only: `<-chan T`
    Recv,
}

/// Channel: `chan T`, `chan<- T`, `<-chan T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chan {
    pub dir: ChanDir,
    pub elem: TypeId,
}

/// Declared type: `type T U`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named {
    pub obj: TypeNameId,
    /// `None` until the declaration is completed. Otherwise an undeclared
    /// shape, or another declaration that was still incomplete at the time;
    /// [`TypeArena::underlying`](crate::TypeArena::underlying) follows such
    /// chains.
    pub underlying: Option<TypeId>,
    pub methods: SmallVec<[FuncId; 4]>,
}

// =============================================================================
// Type
// =============================================================================

/// Type node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Basic(Basic),
    Array(Array),
    Slice(Slice),
    Struct(Struct),
    Pointer(Pointer),
    Signature(Signature),
    Interface(Interface),
    Map(Map),
    Chan(Chan),
    Named(Named),
}

impl Type {
    /// Shape name, for diagnostics and logs.
    pub const fn shape(&self) -> &'static str {
        match self {
            Type::Basic(_) => "basic",
            Type::Array(_) => "array",
            Type::Slice(_) => "slice",
            Type::Struct(_) => "struct",
            Type::Pointer(_) => "pointer",
            Type::Signature(_) => "signature",
            Type::Interface(_) => "interface",
            Type::Map(_) => "map",
            Type::Chan(_) => "chan",
            Type::Named(_) => "named",
        }
    }
}
