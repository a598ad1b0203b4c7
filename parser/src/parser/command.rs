//! Command decoding.

use delta_core::OperatorSymbol;
use std::fmt;

/// Closed set of commands that may lead a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    InstructElabs,
    ProblemSpace,
    Ins,
    Ref,
    Condition,
    Operator,
    Description,
    /// A condition primitive such as `==` or `?`.
    Prim(OperatorSymbol),
}

impl Command {
    /// Decode a leading atom. Returns `None` for unknown commands.
    pub fn decode(head: &str) -> Option<Self> {
        let command = match head {
            "instruct-elabs" => Command::InstructElabs,
            "problem-space" => Command::ProblemSpace,
            "ins" => Command::Ins,
            "ref" => Command::Ref,
            "condition" => Command::Condition,
            "operator" => Command::Operator,
            "description" => Command::Description,
            other => Command::Prim(OperatorSymbol::parse(other)?),
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::InstructElabs => "instruct-elabs",
            Command::ProblemSpace => "problem-space",
            Command::Ins => "ins",
            Command::Ref => "ref",
            Command::Condition => "condition",
            Command::Operator => "operator",
            Command::Description => "description",
            Command::Prim(op) => op.symbol(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
