//! List reader for Delta instruction text.
//!
//! Turns raw text into a generic tree of atoms and nested lists. The reader
//! knows nothing about commands; that is the semantic parser's job.

use crate::{ParseError, ParseResult};
use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Index of a node in a `ListTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListNodeId(u32);

impl ListNodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node is exactly one of atom or list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    Atom(String),
    List(Vec<ListNodeId>),
}

/// Arena of list nodes with a separate parent table.
///
/// Node 0 is a synthetic root list holding the document's top-level forms.
#[derive(Debug, Clone)]
pub struct ListTree {
    nodes: Vec<ListNode>,
    parents: Vec<Option<ListNodeId>>,
    spans: Vec<Span>,
}

impl Default for ListTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ListTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ListNode::List(Vec::new())],
            parents: vec![None],
            spans: vec![Span::new(0, 0, 1, 1)],
        }
    }

    pub fn root(&self) -> ListNodeId {
        ListNodeId(0)
    }

    /// Top-level forms in document order.
    pub fn forms(&self) -> &[ListNodeId] {
        self.children(self.root())
    }

    pub fn node(&self, id: ListNodeId) -> &ListNode {
        &self.nodes[id.index()]
    }

    pub fn parent(&self, id: ListNodeId) -> Option<ListNodeId> {
        self.parents[id.index()]
    }

    pub fn span(&self, id: ListNodeId) -> Span {
        self.spans[id.index()]
    }

    pub fn is_list(&self, id: ListNodeId) -> bool {
        matches!(self.node(id), ListNode::List(_))
    }

    pub fn atom(&self, id: ListNodeId) -> Option<&str> {
        match self.node(id) {
            ListNode::Atom(text) => Some(text),
            ListNode::List(_) => None,
        }
    }

    /// Children of a list; an atom has none.
    pub fn children(&self, id: ListNodeId) -> &[ListNodeId] {
        match self.node(id) {
            ListNode::List(items) => items,
            ListNode::Atom(_) => &[],
        }
    }

    pub fn child(&self, id: ListNodeId, index: usize) -> Option<ListNodeId> {
        self.children(id).get(index).copied()
    }

    /// Element count: list length, 1 for an atom.
    pub fn len(&self, id: ListNodeId) -> usize {
        match self.node(id) {
            ListNode::List(items) => items.len(),
            ListNode::Atom(_) => 1,
        }
    }

    pub fn is_empty(&self, id: ListNodeId) -> bool {
        self.len(id) == 0
    }

    /// Append an atom under `parent`.
    pub fn push_atom(&mut self, parent: ListNodeId, text: impl Into<String>, span: Span) -> ListNodeId {
        self.alloc(parent, ListNode::Atom(text.into()), span)
    }

    /// Open an empty list under `parent` and return it.
    pub fn open_list(&mut self, parent: ListNodeId, span: Span) -> ListNodeId {
        self.alloc(parent, ListNode::List(Vec::new()), span)
    }

    fn alloc(&mut self, parent: ListNodeId, node: ListNode, span: Span) -> ListNodeId {
        self.ensure_list(parent);
        let id = self.insert(node, Some(parent), span);
        if let ListNode::List(items) = &mut self.nodes[parent.index()] {
            items.push(id);
        }
        id
    }

    fn insert(&mut self, node: ListNode, parent: Option<ListNodeId>, span: Span) -> ListNodeId {
        let id = ListNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.parents.push(parent);
        self.spans.push(span);
        id
    }

    /// Convert an atom into a list whose first element is that atom.
    fn ensure_list(&mut self, id: ListNodeId) {
        let text = match &self.nodes[id.index()] {
            ListNode::Atom(text) => text.clone(),
            ListNode::List(_) => return,
        };
        let span = self.span(id);
        let first = self.insert(ListNode::Atom(text), Some(id), span);
        self.nodes[id.index()] = ListNode::List(vec![first]);
    }

    /// Short rendering for diagnostics; nested lists collapse to `(...)`.
    pub fn render(&self, id: ListNodeId) -> String {
        match self.node(id) {
            ListNode::Atom(text) => text.clone(),
            ListNode::List(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|&child| match self.node(child) {
                        ListNode::Atom(text) => text.clone(),
                        ListNode::List(_) => "(...)".to_string(),
                    })
                    .collect();
                format!("({})", parts.join(" "))
            }
        }
    }

    fn fmt_node(&self, id: ListNodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node(id) {
            ListNode::Atom(text) => f.write_str(text),
            ListNode::List(items) => {
                f.write_str("(")?;
                for (i, &child) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    self.fmt_node(child, f)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ListTree {
    /// Full rendering of every top-level form, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &form) in self.forms().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            self.fmt_node(form, f)?;
        }
        Ok(())
    }
}

/// Reader state.
pub struct Reader<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Read all input into a tree.
    pub fn read(mut self) -> ParseResult<ListTree> {
        let mut tree = ListTree::new();
        let mut focus = tree.root();

        loop {
            self.skip_whitespace();

            let start = self.pos;
            let start_line = self.line;
            let start_col = self.column;

            let Some(c) = self.next_char() else {
                break;
            };

            match c {
                '(' => {
                    focus = tree.open_list(focus, self.span_from(start, start_line, start_col));
                }
                ')' => {
                    focus = tree.parent(focus).ok_or_else(|| {
                        ParseError::syntax(
                            "unbalanced parentheses: unexpected ')'",
                            self.span_from(start, start_line, start_col),
                        )
                    })?;
                }
                '"' => {
                    let text = self.scan_quoted(start, start_line, start_col)?;
                    let span = self.span_from(start, start_line, start_col);
                    tree.push_atom(focus, text, span);
                }
                ';' => self.skip_line(),
                _ => {
                    let text = self.scan_bare(c);
                    let span = self.span_from(start, start_line, start_col);
                    tree.push_atom(focus, text, span);
                }
            }
        }

        if focus != tree.root() {
            let open = tree.span(focus);
            return Err(ParseError::syntax(
                "unbalanced parentheses: '(' is never closed",
                open,
            ));
        }

        Ok(tree)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Bare token: runs to whitespace or a parenthesis.
    fn scan_bare(&mut self, first: char) -> String {
        let mut text = String::from(first);
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            text.push(c);
            self.next_char();
        }
        text
    }

    /// Quoted token: runs to the closing quote, whitespace included.
    fn scan_quoted(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<String> {
        let mut text = String::new();
        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::syntax(
                        "malformed quoted atom: missing closing '\"'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') => return Ok(text),
                Some(c) => text.push(c),
            }
        }
    }
}

/// Read instruction text into a list tree.
pub fn read(input: &str) -> ParseResult<ListTree> {
    Reader::new(input).read()
}
