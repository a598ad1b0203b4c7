//! Deterministic identifier issuing.

use delta_core::{PrimId, WmNodeId};
use std::collections::HashMap;

/// An entity that needs an smem identifier.
///
/// Contexts and rules are keyed by position, tree nodes by their context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKey {
    Context(usize),
    Rule { context: usize, rule: usize },
    Node { context: usize, node: WmNodeId },
    Constants { context: usize, rule: usize },
    Prim { id: PrimId, condition: bool },
}

impl SymbolKey {
    fn prefix(self) -> &'static str {
        match self {
            SymbolKey::Context(_) => "elab-context-",
            SymbolKey::Rule { .. } => "drule-",
            SymbolKey::Node { .. } => "wm-",
            SymbolKey::Constants { .. } => "Q",
            SymbolKey::Prim { condition: true, .. } => "prop-C",
            SymbolKey::Prim {
                condition: false, ..
            } => "prop-A",
        }
    }
}

/// Issues `<prefix-N>` names, numbering each prefix from 1 in request order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    issued: HashMap<SymbolKey, u32>,
    counters: HashMap<&'static str, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for `key`, issuing the next one for its prefix on first use.
    pub fn number(&mut self, key: SymbolKey) -> u32 {
        if let Some(&n) = self.issued.get(&key) {
            return n;
        }
        let counter = self.counters.entry(key.prefix()).or_insert(0);
        *counter += 1;
        let n = *counter;
        self.issued.insert(key, n);
        n
    }

    /// Bracketed variable name, e.g. `<wm-3>`.
    pub fn var(&mut self, key: SymbolKey) -> String {
        let n = self.number(key);
        format!("<{}{}>", key.prefix(), n)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
