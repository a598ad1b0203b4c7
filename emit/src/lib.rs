//! Delta Emit
//!
//! Renders a compiled container as an smem bulk-add file:
//! - Banner and open/close markers from `EmitConfig`
//! - One block per problem-space, its WM tree and its rules
//! - One aggregated block of condition Prims
//!
//! Identifiers come from a `SymbolTable` filled in traversal order, so the
//! same container always renders to the same bytes.

mod serializer;
mod symbols;

pub use serializer::{render, Serializer};
pub use symbols::{SymbolKey, SymbolTable};
