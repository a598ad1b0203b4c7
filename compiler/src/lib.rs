//! Delta Compiler
//!
//! Transform parsed problem-spaces into a container of compiled contexts.
//!
//! Responsibilities:
//! - Merge every rule's reference chains into one shared WM tree per context
//! - Bind rule variables to tree nodes
//! - Link conditions into Prims
//! - Commit each context only once it compiled completely

mod compiler;
mod error;
mod linker;
mod refgraph;

pub use compiler::{compile, CompiledContext, CompiledRule, Compiler, Container, Unresolved};
pub use error::{CompileError, CompileResult};
pub use linker::{link, Prim, PrimArg, Target};
pub use refgraph::{merge, Bindings, MergeOutcome, Unreachable, WmTree};
