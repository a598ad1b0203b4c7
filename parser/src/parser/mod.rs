//! Semantic parser for Delta instruction trees.
//!
//! This module is organized into submodules by parsing category:
//! - `command`: Command decoding (closed set of leading atoms)
//! - `rule`: Rule element parsing (ref, condition, operator, description)
//!
//! The descent threads two open scopes, the current problem-space and the
//! current rule. `instruct-elabs` holds problem-spaces, a problem-space holds
//! `ins` rules, and a rule holds its elements. Finished problem-spaces are
//! handed to a `ContextSink` one at a time.

mod command;
mod rule;

pub use command::Command;
pub use rule::is_variable;

use crate::error::{ParseError, ParseResult, StructuralKind};
use crate::model::{ElaborationContext, Rule};
use crate::reader::{read, ListNodeId, ListTree};
use delta_core::DeltaConfig;
use tracing::debug;

// ==================== SINK ====================

/// Receives each problem-space once all of its rules have parsed.
pub trait ContextSink {
    type Error: From<ParseError>;

    fn commit(&mut self, context: ElaborationContext) -> Result<(), Self::Error>;
}

/// Sink that keeps parsed contexts as they are.
#[derive(Debug, Default)]
pub struct Collector {
    contexts: Vec<ElaborationContext>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_contexts(self) -> Vec<ElaborationContext> {
        self.contexts
    }
}

impl ContextSink for Collector {
    type Error = ParseError;

    fn commit(&mut self, context: ElaborationContext) -> ParseResult<()> {
        self.contexts.push(context);
        Ok(())
    }
}

// ==================== PARSER STATE ====================

/// Scopes open at the current point of the descent.
#[derive(Debug, Default)]
struct Scope {
    context: Option<ElaborationContext>,
    rule: Option<Rule>,
}

impl Scope {
    fn context_name(&self) -> Option<&str> {
        self.context.as_ref().map(|c| c.name.as_str())
    }

    fn rule_name(&self) -> Option<&str> {
        self.rule.as_ref().map(|r| r.name.as_str())
    }
}

/// Parser over a list tree.
pub struct Parser<'t> {
    tree: &'t ListTree,
    config: &'t DeltaConfig,
}

impl<'t> Parser<'t> {
    pub fn new(tree: &'t ListTree, config: &'t DeltaConfig) -> Self {
        Self { tree, config }
    }

    /// Parse the whole tree, committing each problem-space to `sink`.
    ///
    /// The tree root acts as an implicit `instruct-elabs`.
    pub fn parse_into<S: ContextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        let mut scope = Scope::default();
        self.parse_body(self.tree.root(), 0, "problem-space", &mut scope, sink)
    }
}

// ==================== DESCENT ====================

impl<'t> Parser<'t> {
    /// Parse every child of `id` from `start` on as a command form.
    fn parse_body<S: ContextSink>(
        &self,
        id: ListNodeId,
        start: usize,
        expected: &str,
        scope: &mut Scope,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        for &child in self.tree.children(id).iter().skip(start) {
            if let Some(text) = self.tree.atom(child) {
                return Err(self
                    .error(
                        StructuralKind::MalformedForm,
                        scope,
                        format!("expected ({} ...) form, found atom '{}'", expected, text),
                        child,
                    )
                    .into());
            }
            self.parse_form(child, scope, sink)?;
        }
        Ok(())
    }

    fn parse_form<S: ContextSink>(
        &self,
        id: ListNodeId,
        scope: &mut Scope,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let command = self.decode_head(id, scope)?;

        match command {
            Command::InstructElabs => {
                if scope.context.is_some() {
                    return Err(self
                        .error(
                            StructuralKind::IllegalNesting,
                            scope,
                            "instruct-elabs is only legal at the top level",
                            id,
                        )
                        .into());
                }
                self.parse_body(id, 1, "problem-space", scope, sink)
            }
            Command::ProblemSpace => self.parse_problem_space(id, scope, sink),
            Command::Ins => self.parse_ins(id, scope, sink),
            Command::Ref | Command::Condition | Command::Operator | Command::Description => {
                let context = scope.context.as_ref().map(|c| c.name.as_str());
                let Some(rule) = scope.rule.as_mut() else {
                    return Err(ParseError::structural(
                        StructuralKind::MisplacedCommand,
                        context,
                        None,
                        format!("'{}' is only legal inside (ins ...)", command),
                        self.tree.span(id),
                    )
                    .into());
                };
                match command {
                    Command::Ref => self.parse_ref(id, context, rule)?,
                    Command::Condition => self.parse_condition(id, context, rule)?,
                    Command::Operator => {
                        rule.action = self.single_arg(id, command, context, rule)?;
                    }
                    _ => {
                        rule.description = self.single_arg(id, command, context, rule)?;
                    }
                }
                Ok(())
            }
            Command::Prim(op) => Err(self
                .error(
                    StructuralKind::MisplacedCommand,
                    scope,
                    format!("'{}' is only legal inside (condition ...)", op),
                    id,
                )
                .into()),
        }
    }

    fn parse_problem_space<S: ContextSink>(
        &self,
        id: ListNodeId,
        scope: &mut Scope,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        if scope.context.is_some() {
            return Err(self
                .error(
                    StructuralKind::IllegalNesting,
                    scope,
                    "nested problem-space command",
                    id,
                )
                .into());
        }

        let name = self.name_arg(id, Command::ProblemSpace, scope)?;
        scope.context = Some(ElaborationContext::new(name, self.tree.span(id)));

        self.parse_body(id, 2, "ins", scope, sink)?;

        if let Some(context) = scope.context.take() {
            debug!(
                context = %context.name,
                rules = context.rules.len(),
                "problem-space parsed"
            );
            sink.commit(context)?;
        }
        Ok(())
    }

    fn parse_ins<S: ContextSink>(
        &self,
        id: ListNodeId,
        scope: &mut Scope,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        if scope.rule.is_some() {
            return Err(self
                .error(StructuralKind::IllegalNesting, scope, "nested 'ins' command", id)
                .into());
        }
        if scope.context.is_none() {
            return Err(self
                .error(
                    StructuralKind::MisplacedCommand,
                    scope,
                    format!("'ins' outside a problem-space: {}", self.tree.render(id)),
                    id,
                )
                .into());
        }

        let name = self.name_arg(id, Command::Ins, scope)?;
        scope.rule = Some(Rule::new(name, self.tree.span(id)));

        self.parse_body(id, 2, "ref|condition|operator|description", scope, sink)?;

        if let (Some(rule), Some(context)) = (scope.rule.take(), scope.context.as_mut()) {
            context.add_rule(rule);
        }
        Ok(())
    }

    /// Decode the leading atom of a form.
    fn decode_head(&self, id: ListNodeId, scope: &Scope) -> ParseResult<Command> {
        let Some(head) = self.tree.child(id, 0) else {
            return Err(self.error(StructuralKind::MalformedForm, scope, "empty form", id));
        };
        let Some(text) = self.tree.atom(head) else {
            return Err(self.error(
                StructuralKind::MalformedForm,
                scope,
                format!("command must be an atom, found {}", self.tree.render(id)),
                id,
            ));
        };
        Command::decode(text).ok_or_else(|| {
            self.error(
                StructuralKind::UnknownCommand,
                scope,
                format!("unexpected command '{}'", text),
                id,
            )
        })
    }

    /// The name following a scope-opening command.
    fn name_arg(&self, id: ListNodeId, command: Command, scope: &Scope) -> ParseResult<String> {
        let Some(arg) = self.tree.child(id, 1) else {
            return Err(self.error(
                StructuralKind::WrongArity,
                scope,
                format!("'{}' requires a name", command),
                id,
            ));
        };
        match self.tree.atom(arg) {
            Some(name) => Ok(name.to_string()),
            None => Err(self.error(
                StructuralKind::MalformedForm,
                scope,
                format!("'{}' name must be an atom, found (...)", command),
                arg,
            )),
        }
    }

    fn error(
        &self,
        kind: StructuralKind,
        scope: &Scope,
        detail: impl Into<String>,
        at: ListNodeId,
    ) -> ParseError {
        ParseError::structural(
            kind,
            scope.context_name(),
            scope.rule_name(),
            detail,
            self.tree.span(at),
        )
    }
}

// ==================== PUBLIC API ====================

/// Parse instruction text into problem-spaces without compiling them.
pub fn parse_instructions(
    input: &str,
    config: &DeltaConfig,
) -> ParseResult<Vec<ElaborationContext>> {
    let mut collector = Collector::new();
    parse_into(input, config, &mut collector)?;
    Ok(collector.into_contexts())
}

/// Read and parse instruction text, committing each problem-space to `sink`.
pub fn parse_into<S: ContextSink>(
    input: &str,
    config: &DeltaConfig,
    sink: &mut S,
) -> Result<(), S::Error> {
    let tree = read(input)?;
    Parser::new(&tree, config).parse_into(sink)
}

// ==================== TESTS ====================
