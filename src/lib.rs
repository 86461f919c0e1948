//! Go 1.25 type identity and interface satisfaction.
//!
//! - Types live in a [`TypeArena`] and are referenced by typed ids (`la_arena`).
//! - Declared types are identical only by declaration; everything else is
//!   compared structurally.
//! - Interface satisfaction reports the first missing or mismatched method.
//!
//! Building types is single-threaded. Once built, the arena is immutable and
//! every query takes `&TypeArena`.

pub mod arena;
mod defaults;
mod display;
pub mod error;
mod identical;
pub mod intern;
pub mod lookup;
mod predicates;
pub mod satisfy;
pub mod types;

// Re-exports for convenience
pub use arena::TypeArena;
pub use display::TypeDisplay;
pub use error::DeclError;
pub use intern::{Interner, Symbol, is_exported};
pub use lookup::{EmbeddingLookup, LookupConfig, MethodLookup, Selection};
pub use satisfy::{MissingMethod, MissingMethodDisplay};
pub use types::*;
