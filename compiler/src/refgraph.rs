//! Reference-graph merge.
//!
//! Every rule of a context declares its own chains of addresses
//! `(<src> a.b.c <bound>)`. The merge folds all of them into one shared
//! attribute tree rooted at the state root and records, per rule, which tree
//! node each bound variable names.
//!
//! Multi-valued attributes are handled positionally: when a rule declares
//! `k` addresses with the same first segment (and, under
//! `CandidateGrouping::SourceAndHead`, the same source), they pair with the
//! first `k` existing children of that label and only the excess creates new
//! siblings.

use delta_core::{CandidateGrouping, WmNodeId};
use delta_parser::{Rule, WmeAddress};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

// ==================== TREE ====================

/// Arena tree of attribute labels with an id→parent table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmTree {
    labels: Vec<String>,
    children: Vec<Vec<WmNodeId>>,
    parents: Vec<Option<WmNodeId>>,
}

impl WmTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            labels: vec![root_label.into()],
            children: vec![Vec::new()],
            parents: vec![None],
        }
    }

    pub fn root(&self) -> WmNodeId {
        WmNodeId::new(0)
    }

    pub fn label(&self, id: WmNodeId) -> &str {
        &self.labels[id.index()]
    }

    /// Children in insertion order.
    pub fn children(&self, id: WmNodeId) -> &[WmNodeId] {
        &self.children[id.index()]
    }

    pub fn parent(&self, id: WmNodeId) -> Option<WmNodeId> {
        self.parents[id.index()]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Children of `id` carrying `label`, in insertion order.
    pub fn children_labeled(&self, id: WmNodeId, label: &str) -> Vec<WmNodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.label(c) == label)
            .collect()
    }

    pub fn add_child(&mut self, parent: WmNodeId, label: impl Into<String>) -> WmNodeId {
        let id = WmNodeId::new(self.labels.len() as u32);
        self.labels.push(label.into());
        self.children.push(Vec::new());
        self.parents.push(Some(parent));
        self.children[parent.index()].push(id);
        id
    }

    /// Walk `segments` from `from`, reusing the first child with a matching
    /// label at each step and creating one when none exists.
    pub fn descend(&mut self, from: WmNodeId, segments: &[String]) -> WmNodeId {
        let mut node = from;
        for segment in segments {
            let existing = self
                .children(node)
                .iter()
                .copied()
                .find(|&c| self.label(c) == segment.as_str());
            node = match existing {
                Some(child) => child,
                None => self.add_child(node, segment.as_str()),
            };
        }
        node
    }

    /// Dotted label path from the root, e.g. `S1.foo.bar`.
    pub fn path(&self, id: WmNodeId) -> String {
        let mut labels = vec![self.label(id)];
        let mut cursor = id;
        while let Some(parent) = self.parent(cursor) {
            labels.push(self.label(parent));
            cursor = parent;
        }
        labels.reverse();
        labels.join(".")
    }
}

// ==================== BINDINGS ====================

/// Variable → tree node map of one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    nodes: BTreeMap<String, WmNodeId>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, var: impl Into<String>, node: WmNodeId) {
        self.nodes.insert(var.into(), node);
    }

    pub fn get(&self, var: &str) -> Option<WmNodeId> {
        self.nodes.get(var).copied()
    }

    pub fn contains(&self, var: &str) -> bool {
        self.nodes.contains_key(var)
    }

    /// Bindings ordered by variable name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, WmNodeId)> {
        self.nodes.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ==================== MERGE ====================

/// An address whose source variable never became bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unreachable {
    /// Index of the declaring rule within the context.
    pub rule: usize,
    pub address: WmeAddress,
}

/// Result of merging one context's reference chains.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub tree: WmTree,
    /// One entry per rule, in rule order.
    pub bindings: Vec<Bindings>,
    /// Addresses left unbound, in declaration order.
    pub unreachable: Vec<Unreachable>,
    /// Number of passes over the deferred worklist.
    pub passes: usize,
}

/// Merge the reference chains of `rules` into one tree rooted at `state_root`.
pub fn merge(rules: &[Rule], state_root: &str, grouping: CandidateGrouping) -> MergeOutcome {
    let mut tree = WmTree::new(state_root);
    let mut bindings: Vec<Bindings> = rules
        .iter()
        .map(|_| {
            let mut b = Bindings::new();
            b.bind(state_root, tree.root());
            b
        })
        .collect();

    let mut pending: Vec<(usize, usize)> = rules
        .iter()
        .enumerate()
        .flat_map(|(r, rule)| (0..rule.refs.len()).map(move |a| (r, a)))
        .collect();
    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut passes = 0;

    while !pending.is_empty() {
        passes += 1;
        let mut progress = false;
        let mut deferred = Vec::new();

        for (r, a) in pending {
            if visited.contains(&(r, a)) {
                continue;
            }
            let refs = rules[r].refs.addresses();
            let address = &refs[a];
            let Some(anchor) = bindings[r].get(&address.source) else {
                deferred.push((r, a));
                continue;
            };

            // Same head, not yet placed: declaration order.
            let candidates: Vec<usize> = (0..refs.len())
                .filter(|&i| {
                    !visited.contains(&(r, i))
                        && refs[i].head() == address.head()
                        && match grouping {
                            CandidateGrouping::SourceAndHead => {
                                refs[i].source == address.source
                            }
                            CandidateGrouping::Head => true,
                        }
                })
                .collect();
            let slots = tree.children_labeled(anchor, address.head());

            for (k, &i) in candidates.iter().enumerate() {
                let candidate = &refs[i];
                let start = match slots.get(k) {
                    Some(&slot) => slot,
                    None => tree.add_child(anchor, candidate.head()),
                };
                let node = tree.descend(start, candidate.tail());
                trace!(
                    rule = %rules[r].name,
                    address = %candidate,
                    node = %tree.path(node),
                    "bound"
                );
                bindings[r].bind(candidate.bound.as_str(), node);
                visited.insert((r, i));
            }
            progress = true;
        }

        if !progress {
            pending = deferred;
            break;
        }
        pending = deferred;
    }

    let unreachable: Vec<Unreachable> = pending
        .into_iter()
        .filter(|item| !visited.contains(item))
        .map(|(rule, a)| Unreachable {
            rule,
            address: rules[rule].refs.addresses()[a].clone(),
        })
        .collect();

    debug!(
        rules = rules.len(),
        nodes = tree.len(),
        passes,
        unreachable = unreachable.len(),
        "reference graph merged"
    );

    MergeOutcome {
        tree,
        bindings,
        unreachable,
        passes,
    }
}

// ==================== TESTS ====================
