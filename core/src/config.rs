//! Configuration for a conversion.

use crate::OperatorSymbol;
use serde::{Deserialize, Serialize};

/// What the reference-graph compiler does with addresses whose source
/// variable never becomes bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Leave them unbound; report them on the compiled context.
    #[default]
    DropUnresolved,
    /// Fail the conversion with a resolution error.
    ErrorUnresolved,
}

/// Which of a rule's addresses are paired positionally with the same-label
/// children of a bound node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateGrouping {
    /// Addresses sharing both the source variable and the first segment.
    #[default]
    SourceAndHead,
    /// Addresses sharing the first segment, whatever their source. Every
    /// member is placed under the node of the address being processed.
    Head,
}

/// Configuration for a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaConfig {
    /// Marker naming the root of every merged tree (matched case-insensitively).
    pub state_root: String,
    /// Reserved reference naming a rule's constant table.
    pub const_ref: String,
    /// Symbols accepted as the head of a `condition` entry.
    pub condition_operators: Vec<OperatorSymbol>,
    /// Policy for addresses that never become reachable.
    pub unresolved: UnresolvedPolicy,
    /// Candidate grouping used by the reference-graph merge.
    pub grouping: CandidateGrouping,
    /// Output text constants.
    pub emit: EmitConfig,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            state_root: "S1".to_string(),
            const_ref: "const".to_string(),
            condition_operators: vec![
                OperatorSymbol::Eq,
                OperatorSymbol::NotEq,
                OperatorSymbol::Question,
                OperatorSymbol::Minus,
                OperatorSymbol::Lt,
                OperatorSymbol::Gt,
                OperatorSymbol::LtEq,
                OperatorSymbol::GtEq,
            ],
            unresolved: UnresolvedPolicy::default(),
            grouping: CandidateGrouping::default(),
            emit: EmitConfig::default(),
        }
    }
}

impl DeltaConfig {
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    pub fn with_condition_operators(mut self, ops: Vec<OperatorSymbol>) -> Self {
        self.condition_operators = ops;
        self
    }

    pub fn with_grouping(mut self, grouping: CandidateGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.emit.line_ending = line_ending.into();
        self
    }

    pub fn accepts_condition(&self, op: OperatorSymbol) -> bool {
        self.condition_operators.contains(&op)
    }

    /// Whether `token` names the state root.
    pub fn is_state_root(&self, token: &str) -> bool {
        token.eq_ignore_ascii_case(&self.state_root)
    }
}

/// Literal text wrapped around the serialized body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub banner: Vec<String>,
    pub open_marker: String,
    pub close_marker: String,
    pub line_ending: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        let rule = "#".repeat(77);
        Self {
            banner: vec![
                rule.clone(),
                "# THIS FILE TRANSLATES INSTRUCTIONS INTO SMEM FORMAT FOR A SOAR PROPS AGENT #"
                    .to_string(),
                rule,
            ],
            open_marker: "smem --add {".to_string(),
            close_marker: "}".to_string(),
            line_ending: "\r\n".to_string(),
        }
    }
}
