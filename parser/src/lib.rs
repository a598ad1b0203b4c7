//! Delta Parser
//!
//! This crate turns instruction text into problem-spaces:
//! - Reading (parenthesized text into a `ListTree`)
//! - Semantic parsing (problem-space, ins, ref, condition, operator, description)
//! - Error handling with line information and the enclosing scope names

mod error;
mod model;
mod parser;
mod reader;

pub use error::*;
pub use model::*;
pub use parser::{
    is_variable, parse_instructions, parse_into, Collector, Command, ContextSink, Parser,
};
pub use reader::{read, ListNode, ListNodeId, ListTree, Reader, Span};
