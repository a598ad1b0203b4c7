//! Container serialization.

use crate::symbols::{SymbolKey, SymbolTable};
use delta_compiler::{CompiledContext, Container, Prim, PrimArg, Target};
use delta_core::{EmitConfig, PrimId};
use tracing::debug;

const PROBLEM_SPACES_HEADER: &str = "##################### PROBLEM-SPACES #####################";
const PRIMS_HEADER: &str = "###################### CONDITION PRIMS ####################";
const WM_SPACE_HEADER: &str = "### WM-SPACE ###";
const RULES_HEADER: &str = "### RULES ###";

/// Renders one container. Consumed by `render`.
pub struct Serializer<'a> {
    emit: &'a EmitConfig,
    symbols: SymbolTable,
    lines: Vec<String>,
}

impl<'a> Serializer<'a> {
    pub fn new(emit: &'a EmitConfig) -> Self {
        Self {
            emit,
            symbols: SymbolTable::new(),
            lines: Vec::new(),
        }
    }

    pub fn render(mut self, container: &Container) -> String {
        // Header
        self.lines.extend(self.emit.banner.iter().cloned());
        self.lines.push(String::new());
        self.lines.push(self.emit.open_marker.clone());
        self.lines.push(String::new());

        // Problem-spaces
        self.lines.push(PROBLEM_SPACES_HEADER.to_string());
        self.lines.push(String::new());
        let owners = prim_owners(container);
        for (c, context) in container.contexts().iter().enumerate() {
            self.context(c, context, container.prims());
        }

        // Prims
        self.lines.push(PRIMS_HEADER.to_string());
        self.lines.push(String::new());
        for (i, prim) in container.prims().iter().enumerate() {
            if let Some(owner) = owners[i] {
                self.prim(PrimId::new(i as u32), prim, owner);
            }
        }

        self.lines.push(self.emit.close_marker.clone());
        self.lines.push(String::new());

        debug!(
            contexts = container.contexts().len(),
            prims = container.prims().len(),
            symbols = self.symbols.len(),
            "container rendered"
        );

        let mut out = self.lines.join(&self.emit.line_ending);
        out.push_str(&self.emit.line_ending);
        out
    }

    fn context(&mut self, c: usize, context: &CompiledContext, prims: &[Prim]) {
        self.lines.push("###".to_string());
        self.lines.push(format!("# {}", context.name.to_uppercase()));
        self.lines.push("###".to_string());

        let var = self.symbols.var(SymbolKey::Context(c));
        let deltas: Vec<String> = (0..context.rules.len())
            .map(|rule| {
                format!(
                    "^delta {} ",
                    self.symbols.var(SymbolKey::Rule { context: c, rule })
                )
            })
            .collect();
        self.block(
            format!("({} ^elab-context-name |{}|", var, context.name),
            deltas,
        );
        self.lines.push(String::new());

        self.lines.push(WM_SPACE_HEADER.to_string());
        self.tree(c, context);

        self.lines.push(RULES_HEADER.to_string());
        self.rules(c, context, prims);
        self.lines.push(String::new());
    }

    /// Pre-order dump of the merged tree.
    fn tree(&mut self, c: usize, context: &CompiledContext) {
        let tree = &context.tree;
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            let var = self.symbols.var(SymbolKey::Node { context: c, node: id });
            let children: Vec<String> = tree
                .children(id)
                .iter()
                .map(|&node| {
                    format!(
                        "^child {}",
                        self.symbols.var(SymbolKey::Node { context: c, node })
                    )
                })
                .collect();
            self.block(format!("({} ^attribute {}", var, tree.label(id)), children);
            stack.extend(tree.children(id).iter().rev());
        }
    }

    fn rules(&mut self, c: usize, context: &CompiledContext, prims: &[Prim]) {
        for (r, rule) in context.rules.iter().enumerate() {
            let var = self.symbols.var(SymbolKey::Rule { context: c, rule: r });
            let mut attrs = Vec::new();
            if !rule.description.is_empty() {
                attrs.push(format!("^description |{}|", rule.description));
            }
            let consts = (!rule.consts.is_empty())
                .then(|| self.symbols.var(SymbolKey::Constants { context: c, rule: r }));
            if let Some(consts) = &consts {
                attrs.push(format!("^const {}", consts));
            }
            for &id in &rule.prims {
                let condition = prims
                    .get(id.index())
                    .map_or(true, |prim| prim.kind.is_condition());
                attrs.push(format!(
                    "^prop {}",
                    self.symbols.var(SymbolKey::Prim { id, condition })
                ));
            }
            self.block(format!("({} ^op-name |{}|", var, rule.action), attrs);

            if let Some(consts) = consts {
                let values = rule
                    .consts
                    .iter()
                    .enumerate()
                    .map(|(i, value)| format!("^{} {}", i, value))
                    .collect();
                self.block(format!("({}", consts), values);
            }
        }
    }

    fn prim(&mut self, id: PrimId, prim: &Prim, owner: (usize, usize)) {
        let key = SymbolKey::Prim {
            id,
            condition: prim.kind.is_condition(),
        };
        let var = self.symbols.var(key);
        let name = format!(
            "|_P{}{}|",
            if prim.kind.is_condition() { "C" } else { "A" },
            self.symbols.number(key)
        );

        let mut attrs = vec![format!("^prop-type {}", prim.kind)];
        attrs.extend(self.operand(1, &prim.first, owner));
        if let Some(second) = &prim.second {
            attrs.extend(self.operand(2, second, owner));
        }
        self.block(format!("({} ^name {}", var, name), attrs);
    }

    fn operand(&mut self, n: usize, arg: &PrimArg, (context, rule): (usize, usize)) -> [String; 2] {
        let address = match arg.target {
            Target::Node(node) => self.symbols.var(SymbolKey::Node { context, node }),
            Target::Constants => self.symbols.var(SymbolKey::Constants { context, rule }),
        };
        [
            format!("^attr{} {}", n, arg.attr),
            format!("^address{} {}", n, address),
        ]
    }

    /// Push `head`, one tab-indented line per attribute, and close the block.
    fn block(&mut self, head: String, attrs: Vec<String>) {
        self.lines.push(head);
        self.lines.extend(attrs.into_iter().map(|attr| format!("\t{}", attr)));
        if let Some(last) = self.lines.last_mut() {
            last.push_str(") ");
        }
    }
}

/// (context, rule) owning each Prim.
fn prim_owners(container: &Container) -> Vec<Option<(usize, usize)>> {
    let mut owners = vec![None; container.prims().len()];
    for (c, context) in container.contexts().iter().enumerate() {
        for (r, rule) in context.rules.iter().enumerate() {
            for id in &rule.prims {
                if let Some(slot) = owners.get_mut(id.index()) {
                    *slot = Some((c, r));
                }
            }
        }
    }
    owners
}

/// Render `container` with the given output constants.
pub fn render(container: &Container, emit: &EmitConfig) -> String {
    Serializer::new(emit).render(container)
}
