//! Condition linker: resolves a rule's conditions into Prims.

use crate::refgraph::Bindings;
use crate::{CompileError, CompileResult};
use delta_core::{DeltaConfig, PrimKind, WmNodeId};
use delta_parser::{Operand, Rule};
use std::fmt;

/// What a Prim operand points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A node of the context's merged tree.
    Node(WmNodeId),
    /// The owning rule's constant table.
    Constants,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Node(id) => write!(f, "{}", id),
            Target::Constants => f.write_str("const"),
        }
    }
}

/// One resolved (target, attribute) operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimArg {
    pub target: Target,
    pub attr: String,
}

/// A resolved condition primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prim {
    pub kind: PrimKind,
    pub first: PrimArg,
    pub second: Option<PrimArg>,
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} {}", self.kind, self.first.target, self.first.attr)?;
        if let Some(second) = &self.second {
            write!(f, ", {} {}", second.target, second.attr)?;
        }
        f.write_str(")")
    }
}

/// Resolve every condition of `rule` through its bindings.
///
/// Fails on the first variable with no binding.
pub fn link(
    context: &str,
    rule: &Rule,
    bindings: &Bindings,
    config: &DeltaConfig,
) -> CompileResult<Vec<Prim>> {
    let resolve = |operand: &Operand| -> CompileResult<PrimArg> {
        let target = if operand.constant {
            Target::Constants
        } else if config.is_state_root(&operand.var) {
            bindings
                .get(&config.state_root)
                .map(Target::Node)
                .ok_or_else(|| CompileError::unbound_variable(context, &rule.name, &operand.var))?
        } else {
            bindings
                .get(&operand.var)
                .map(Target::Node)
                .ok_or_else(|| CompileError::unbound_variable(context, &rule.name, &operand.var))?
        };
        Ok(PrimArg {
            target,
            attr: operand.attr.clone(),
        })
    };

    rule.conditions
        .iter()
        .map(|condition| {
            Ok(Prim {
                kind: condition.kind,
                first: resolve(&condition.lhs)?,
                second: condition.rhs.as_ref().map(&resolve).transpose()?,
            })
        })
        .collect()
}
