//! Delta Core Types
//!
//! This crate provides the foundational types shared by every Delta stage:
//! - Identity types (WmNodeId, PrimId)
//! - Operator tables (OperatorSymbol, PrimKind, Arity)
//! - Configuration (DeltaConfig, EmitConfig, UnresolvedPolicy)
//! - Error classification (ErrorKind)

mod config;
mod error;
mod id;
mod operator;

pub use config::*;
pub use error::*;
pub use id::*;
pub use operator::*;
