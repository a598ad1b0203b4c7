//! Rule element parsing: ref, condition, operator, description.

use super::{Command, Parser};
use crate::error::{ParseError, ParseResult, StructuralKind};
use crate::model::{AddOutcome, Condition, Operand, Rule, WmeAddress};
use crate::reader::ListNodeId;
use delta_core::{Arity, OperatorSymbol};
use regex_lite::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Whether `token` is a rule variable such as `<b>`.
pub fn is_variable(token: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^<[^<>()\s]+>$").expect("variable pattern is valid"))
        .is_match(token)
}

impl<'t> Parser<'t> {
    /// `(ref (<id> attr.path <label>) ...)`
    pub(super) fn parse_ref(
        &self,
        id: ListNodeId,
        context: Option<&str>,
        rule: &mut Rule,
    ) -> ParseResult<()> {
        let entries = &self.tree.children(id)[1..];
        if entries.is_empty() {
            return Err(self.rule_error(
                StructuralKind::MalformedForm,
                context,
                rule,
                "ref requires at least one (<id> attr.path <label>) entry",
                id,
            ));
        }

        for &entry in entries {
            if let Some(text) = self.tree.atom(entry) {
                return Err(self.rule_error(
                    StructuralKind::MalformedForm,
                    context,
                    rule,
                    format!("expected (<id> attr.path <label>), found atom '{}'", text),
                    entry,
                ));
            }
            let elements = self.tree.children(entry);
            if elements.len() != 3 {
                return Err(self.rule_error(
                    StructuralKind::WrongArity,
                    context,
                    rule,
                    format!(
                        "ref entry {} has {} elements, expected (<id> attr.path <label>)",
                        self.tree.render(entry),
                        elements.len()
                    ),
                    entry,
                ));
            }
            let [source, path, bound] = self.atoms::<3>(elements, context, rule)?;

            let source = if self.config.is_state_root(source) {
                self.config.state_root.as_str()
            } else if is_variable(source) {
                source
            } else {
                return Err(self.rule_error(
                    StructuralKind::MalformedForm,
                    context,
                    rule,
                    format!(
                        "a ref entry must start at '{}' or a variable, found '{}'",
                        self.config.state_root, source
                    ),
                    entry,
                ));
            };

            if self.config.is_state_root(bound) {
                return Err(self.rule_error(
                    StructuralKind::DuplicateBinding,
                    context,
                    rule,
                    format!("the state root '{}' cannot be rebound", bound),
                    entry,
                ));
            }

            let Some(address) = WmeAddress::parse(source, path, bound) else {
                return Err(self.rule_error(
                    StructuralKind::MalformedForm,
                    context,
                    rule,
                    format!("attribute path '{}' has an empty segment", path),
                    entry,
                ));
            };

            match rule.refs.add(address) {
                AddOutcome::Added => trace!(rule = %rule.name, bound, "ref entry"),
                AddOutcome::Duplicate => {
                    debug!(rule = %rule.name, bound, "ignoring repeated ref entry")
                }
                AddOutcome::Conflict(existing) => {
                    let previous = rule
                        .refs
                        .get(existing)
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    return Err(self.rule_error(
                        StructuralKind::DuplicateBinding,
                        context,
                        rule,
                        format!("variable '{}' is already bound by {}", bound, previous),
                        entry,
                    ));
                }
            }
        }
        Ok(())
    }

    /// `(condition (<op> ...) ...)`
    pub(super) fn parse_condition(
        &self,
        id: ListNodeId,
        context: Option<&str>,
        rule: &mut Rule,
    ) -> ParseResult<()> {
        let entries = &self.tree.children(id)[1..];
        if entries.is_empty() {
            return Err(self.rule_error(
                StructuralKind::MalformedForm,
                context,
                rule,
                "condition requires at least one operator form",
                id,
            ));
        }

        for &entry in entries {
            let head = match self.tree.child(entry, 0) {
                Some(head) if self.tree.is_list(entry) => self.tree.atom(head),
                _ => None,
            };
            let Some(head) = head else {
                return Err(self.rule_error(
                    StructuralKind::MalformedForm,
                    context,
                    rule,
                    format!("expected (<op> ...), found {}", self.tree.render(entry)),
                    entry,
                ));
            };

            match Command::decode(head) {
                Some(Command::Prim(op)) if self.config.accepts_condition(op) => {
                    self.parse_prim(entry, op, context, rule)?;
                }
                Some(Command::Prim(op)) => {
                    return Err(self.rule_error(
                        StructuralKind::UnknownCommand,
                        context,
                        rule,
                        format!("'{}' is not an accepted condition operator", op),
                        entry,
                    ));
                }
                Some(other) => {
                    return Err(self.rule_error(
                        StructuralKind::MisplacedCommand,
                        context,
                        rule,
                        format!("'{}' is not legal inside (condition ...)", other),
                        entry,
                    ));
                }
                None => {
                    return Err(self.rule_error(
                        StructuralKind::UnknownCommand,
                        context,
                        rule,
                        format!("unexpected condition operator '{}'", head),
                        entry,
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_prim(
        &self,
        entry: ListNodeId,
        op: OperatorSymbol,
        context: Option<&str>,
        rule: &mut Rule,
    ) -> ParseResult<()> {
        let args = &self.tree.children(entry)[1..];
        let arity = op.arity();
        if args.len() != arity.element_count() {
            let shape = match arity {
                Arity::Unary => "<ref> <attr>",
                Arity::Binary => "<ref1> <attr1> <ref2> <attr2>",
            };
            return Err(self.rule_error(
                StructuralKind::WrongArity,
                context,
                rule,
                format!(
                    "'{}' takes {} arguments ({} {}), found {}",
                    op,
                    arity.element_count(),
                    op,
                    shape,
                    args.len()
                ),
                entry,
            ));
        }

        let Some(kind) = op.prim_kind() else {
            return Err(self.rule_error(
                StructuralKind::UnknownCommand,
                context,
                rule,
                format!("operator '{}' has no condition primitive", op),
                entry,
            ));
        };

        let condition = match arity {
            Arity::Unary => {
                let [var, attr] = self.atoms::<2>(args, context, rule)?;
                Condition::unary(op, kind, Operand::new(var, attr))
            }
            Arity::Binary => {
                let [var1, attr1, var2, attr2] = self.atoms::<4>(args, context, rule)?;
                let lhs = self.operand(var1, attr1, rule);
                let rhs = self.operand(var2, attr2, rule);
                Condition::binary(op, kind, lhs, rhs)
            }
        };
        trace!(rule = %rule.name, condition = %condition, "condition");
        rule.add_condition(condition);
        Ok(())
    }

    /// Build a binary operand, moving a `const` literal into the constant table.
    ///
    /// Unary operands never name the table; a unary `const` stays an ordinary
    /// variable and must resolve through the rule's bindings.
    fn operand(&self, var: &str, attr: &str, rule: &mut Rule) -> Operand {
        if var == self.config.const_ref {
            Operand::constant(var, rule.consts.add(attr))
        } else {
            Operand::new(var, attr)
        }
    }

    /// The single atom argument of `operator` or `description`.
    pub(super) fn single_arg(
        &self,
        id: ListNodeId,
        command: Command,
        context: Option<&str>,
        rule: &Rule,
    ) -> ParseResult<String> {
        let args = &self.tree.children(id)[1..];
        if args.len() != 1 {
            return Err(self.rule_error(
                StructuralKind::WrongArity,
                context,
                rule,
                format!("'{}' takes exactly 1 argument, found {}", command, args.len()),
                id,
            ));
        }
        let [value] = self.atoms::<1>(args, context, rule)?;
        Ok(value.to_string())
    }

    /// Require every element of `ids` to be an atom.
    fn atoms<const N: usize>(
        &self,
        ids: &[ListNodeId],
        context: Option<&str>,
        rule: &Rule,
    ) -> ParseResult<[&'t str; N]> {
        let mut out = [""; N];
        for (slot, &id) in out.iter_mut().zip(ids) {
            *slot = self.tree.atom(id).ok_or_else(|| {
                self.rule_error(
                    StructuralKind::MalformedForm,
                    context,
                    rule,
                    format!("expected an atom, found {}", self.tree.render(id)),
                    id,
                )
            })?;
        }
        Ok(out)
    }

    fn rule_error(
        &self,
        kind: StructuralKind,
        context: Option<&str>,
        rule: &Rule,
        detail: impl Into<String>,
        at: ListNodeId,
    ) -> ParseError {
        ParseError::structural(kind, context, Some(&rule.name), detail, self.tree.span(at))
    }
}
