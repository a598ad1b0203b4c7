//! Main compiler implementation.

use crate::linker::{link, Prim};
use crate::refgraph::{merge, Bindings, WmTree};
use crate::{CompileError, CompileResult};
use delta_core::{DeltaConfig, PrimId, UnresolvedPolicy};
use delta_parser::{parse_into, ConstTable, ContextSink, ElaborationContext, Span, WmeAddress};
use tracing::{debug, warn};

// ==================== CONTAINER ====================

/// A rule after compilation: its bindings and the Prims it owns.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub action: String,
    pub description: String,
    pub consts: ConstTable,
    pub bindings: Bindings,
    /// Indices into `Container::prims`, in condition order.
    pub prims: Vec<PrimId>,
    pub span: Span,
}

/// An address dropped under `UnresolvedPolicy::DropUnresolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub rule: String,
    pub address: WmeAddress,
}

/// A problem-space after compilation, owning its merged tree.
#[derive(Debug, Clone)]
pub struct CompiledContext {
    pub name: String,
    pub tree: WmTree,
    pub rules: Vec<CompiledRule>,
    pub unresolved: Vec<Unresolved>,
}

impl CompiledContext {
    pub fn rule(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Ordered compiled contexts plus the flat Prim sequence they reference.
#[derive(Debug, Clone, Default)]
pub struct Container {
    contexts: Vec<CompiledContext>,
    prims: Vec<Prim>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contexts(&self) -> &[CompiledContext] {
        &self.contexts
    }

    pub fn context(&self, name: &str) -> Option<&CompiledContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn prims(&self) -> &[Prim] {
        &self.prims
    }

    pub fn prim(&self, id: PrimId) -> Option<&Prim> {
        self.prims.get(id.index())
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    fn push_prim(&mut self, prim: Prim) -> PrimId {
        let id = PrimId::new(self.prims.len() as u32);
        self.prims.push(prim);
        id
    }
}

// ==================== COMPILER ====================

/// The Compiler turns each parsed problem-space into a compiled context.
///
/// It is the parser's `ContextSink`: a context reaches the container only
/// once every rule in it merged and linked.
pub struct Compiler<'c> {
    config: &'c DeltaConfig,
    container: Container,
}

impl<'c> Compiler<'c> {
    /// Create a new compiler.
    pub fn new(config: &'c DeltaConfig) -> Self {
        Self {
            config,
            container: Container::new(),
        }
    }

    /// Merge, bind and link one context, then commit it.
    pub fn compile_context(&mut self, context: ElaborationContext) -> CompileResult<()> {
        let merged = merge(
            &context.rules,
            &self.config.state_root,
            self.config.grouping,
        );

        let mut unresolved = Vec::new();
        for item in merged.unreachable {
            let rule = &context.rules[item.rule];
            match self.config.unresolved {
                UnresolvedPolicy::DropUnresolved => {
                    warn!(
                        context = %context.name,
                        rule = %rule.name,
                        address = %item.address,
                        "dropping unreachable address"
                    );
                    unresolved.push(Unresolved {
                        rule: rule.name.clone(),
                        address: item.address,
                    });
                }
                UnresolvedPolicy::ErrorUnresolved => {
                    return Err(CompileError::unreachable_address(
                        &context.name,
                        &rule.name,
                        &item.address,
                    ));
                }
            }
        }

        // Link everything before touching the container.
        let mut linked = Vec::with_capacity(context.rules.len());
        for (rule, bindings) in context.rules.iter().zip(&merged.bindings) {
            linked.push(link(&context.name, rule, bindings, self.config)?);
        }

        let mut rules = Vec::with_capacity(context.rules.len());
        for ((rule, bindings), prims) in context
            .rules
            .into_iter()
            .zip(merged.bindings)
            .zip(linked)
        {
            let prims: Vec<PrimId> = prims
                .into_iter()
                .map(|prim| self.container.push_prim(prim))
                .collect();
            rules.push(CompiledRule {
                name: rule.name,
                action: rule.action,
                description: rule.description,
                consts: rule.consts,
                bindings,
                prims,
                span: rule.span,
            });
        }

        debug!(
            context = %context.name,
            rules = rules.len(),
            nodes = merged.tree.len(),
            prims = self.container.prims.len(),
            "context compiled"
        );

        self.container.contexts.push(CompiledContext {
            name: context.name,
            tree: merged.tree,
            rules,
            unresolved,
        });
        Ok(())
    }

    /// The compiled container.
    pub fn finish(self) -> Container {
        self.container
    }
}

impl ContextSink for Compiler<'_> {
    type Error = CompileError;

    fn commit(&mut self, context: ElaborationContext) -> CompileResult<()> {
        self.compile_context(context)
    }
}

/// Compile instruction text into a container.
pub fn compile(source: &str, config: &DeltaConfig) -> CompileResult<Container> {
    let mut compiler = Compiler::new(config);
    parse_into(source, config, &mut compiler)?;
    Ok(compiler.finish())
}

// ==================== TESTS ====================
