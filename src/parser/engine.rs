//! Generic depth-first symbol discovery over a tree-sitter cursor.
//!
//! The engine owns all traversal state (containment-path stack, in-class
//! flag, output catalogs) and asks the language adapter to classify nodes.
//! Classes recurse into their bodies; functions and methods are leaves with
//! respect to symbol discovery.

use tracing::warn;
use tree_sitter::{Node, Parser, TreeCursor};

use crate::error::IndexError;

use super::{
    node_text, normalize_whitespace, LanguageCapabilities, SymbolCatalogs, SymbolKind,
    SymbolRecord,
};

/// Longest rendered variable value; longer values keep 18 chars per end.
const MAX_VALUE_LEN: usize = 40;
const VALUE_EDGE_LEN: usize = MAX_VALUE_LEN / 2 - 2;

/// Parse `source` with the adapter's grammar and run one traversal.
pub fn extract(
    caps: &dyn LanguageCapabilities,
    source: &str,
) -> Result<SymbolCatalogs, IndexError> {
    let mut parser = Parser::new();
    parser
        .set_language(&caps.grammar())
        .map_err(|source| IndexError::Grammar {
            language: caps.language_id(),
            source,
        })?;

    let Some(tree) = parser.parse(source, None) else {
        warn!(language = caps.language_id(), "parser produced no tree");
        return Ok(SymbolCatalogs::default());
    };

    let engine = TraversalEngine::new(source, caps);
    let mut cursor = tree.walk();
    Ok(engine.run(&mut cursor))
}

/// One-shot traversal over a single parsed file.
pub struct TraversalEngine<'a> {
    source: &'a str,
    caps: &'a dyn LanguageCapabilities,
    path: Vec<String>,
    within_class: bool,
    catalogs: SymbolCatalogs,
}

impl<'a> TraversalEngine<'a> {
    pub fn new(source: &'a str, caps: &'a dyn LanguageCapabilities) -> Self {
        Self {
            source,
            caps,
            path: Vec::new(),
            within_class: false,
            catalogs: SymbolCatalogs::default(),
        }
    }

    /// Walk the whole tree starting at the cursor's node and return the
    /// populated catalogs.
    pub fn run(mut self, cursor: &mut TreeCursor) -> SymbolCatalogs {
        self.walk(cursor);
        self.catalogs
    }

    /// Classify the current node, then continue with its next sibling.
    /// First match wins; unmatched nodes are skipped but their siblings are
    /// still visited.
    fn walk(&mut self, cursor: &mut TreeCursor) {
        loop {
            let node = cursor.node();
            if self.caps.is_class(&node) {
                self.parse_class(cursor);
            } else if self.caps.is_function(&node) {
                self.parse_function(cursor);
            } else if self.caps.is_generic(&node) {
                self.parse_generic(cursor);
            } else if self.caps.is_variable(&node) {
                self.parse_variable(cursor);
            }
            if !cursor.goto_next_sibling() {
                return;
            }
        }
    }

    /// Traverse into children without touching the path stack or flag.
    fn parse_generic(&mut self, cursor: &mut TreeCursor) {
        if cursor.goto_first_child() {
            self.walk(cursor);
            cursor.goto_parent();
        }
    }

    fn parse_class(&mut self, cursor: &mut TreeCursor) {
        let class_node = cursor.node();
        let mut record = SymbolRecord::new(
            class_node.start_byte() as u32,
            class_node.end_byte() as u32,
        );
        let mut found_body = false;

        if !cursor.goto_first_child() {
            return;
        }
        // Accumulate the header until the class body child shows up.
        self.collect_class_definition(&cursor.node(), &mut record);
        while cursor.goto_next_sibling() {
            let node = cursor.node();
            if node.is_named() && self.caps.is_class_body(&node) {
                found_body = true;
                break;
            }
            self.collect_class_definition(&node, &mut record);
        }

        if found_body && !record.name.is_empty() {
            self.path.push(record.name.clone());
            let was_within_class = self.within_class;
            self.within_class = true;
            // Cursor sits on the class body; only classes recurse.
            self.parse_generic(cursor);
            self.within_class = was_within_class;

            cursor.goto_parent();
            self.path.pop();
            self.finalize(&mut record, &cursor.node(), SymbolKind::Class);
            self.catalogs.classes.insert(record.name.clone(), record);
        } else {
            // No name or no body: not actually a symbol, drop the candidate.
            cursor.goto_parent();
        }
    }

    fn parse_function(&mut self, cursor: &mut TreeCursor) {
        let function_node = cursor.node();
        let mut record = SymbolRecord::new(
            function_node.start_byte() as u32,
            function_node.end_byte() as u32,
        );
        let mut found_body = false;

        if !cursor.goto_first_child() {
            return;
        }
        self.collect_function_definition(&cursor.node(), &mut record);
        while cursor.goto_next_sibling() {
            let node = cursor.node();
            if node.is_named() && self.caps.is_function_body(&node) {
                found_body = true;
                break;
            }
            self.collect_function_definition(&node, &mut record);
        }

        if found_body && !record.name.is_empty() {
            // Function bodies are never traversed for further symbols, so
            // the containment path is left untouched.
            cursor.goto_parent();
            let kind = if self.within_class {
                SymbolKind::Method
            } else {
                SymbolKind::Function
            };
            self.finalize(&mut record, &cursor.node(), kind);
            if kind == SymbolKind::Method {
                self.catalogs.methods.insert(record.name.clone(), record);
            } else {
                self.catalogs.functions.insert(record.name.clone(), record);
            }
        } else {
            cursor.goto_parent();
        }
    }

    fn parse_variable(&mut self, cursor: &mut TreeCursor) {
        let variable_node = cursor.node();
        let mut record = SymbolRecord::new(
            variable_node.start_byte() as u32,
            variable_node.end_byte() as u32,
        );
        let mut found_value = false;

        if !cursor.goto_first_child() {
            return;
        }
        self.collect_variable_definition(&cursor.node(), &mut record);
        while cursor.goto_next_sibling() {
            let node = cursor.node();
            if node.is_named() && self.caps.is_variable_value(&node) {
                found_value = true;
                break;
            }
            self.collect_variable_definition(&node, &mut record);
        }

        if found_value && !record.name.is_empty() {
            let value_node = cursor.node();
            let value_is_function = self.caps.variable_value_is_function(&value_node);
            if value_is_function {
                record
                    .definition
                    .push_str(&self.caps.render_function_variable_value(&value_node, self.source));
            } else {
                record.definition.push_str(&self.pretty_variable_value(&value_node));
            }

            cursor.goto_parent();
            let node = cursor.node();
            if value_is_function {
                // Anonymous-function-valued variables surface as functions.
                self.finalize(&mut record, &node, SymbolKind::FunctionAsVariable);
                self.catalogs.functions.insert(record.name.clone(), record);
            } else {
                self.finalize(&mut record, &node, SymbolKind::Variable);
                self.catalogs.variables.insert(record.name.clone(), record);
            }
        } else {
            cursor.goto_parent();
        }
    }

    fn collect_class_definition(&self, node: &Node, record: &mut SymbolRecord) {
        let text = node_text(node, self.source);
        let is_name = self.caps.is_class_name(node);
        if !is_name && !self.caps.include_in_class_definition(node, text) {
            return;
        }
        if !record.definition.is_empty() {
            record.definition.push(' ');
        }
        record.definition.push_str(text);
        if is_name {
            record.name = text.to_string();
        }
    }

    fn collect_function_definition(&self, node: &Node, record: &mut SymbolRecord) {
        let text = node_text(node, self.source);
        let is_name = self.caps.is_function_name(node);
        if !is_name && !self.caps.include_in_function_definition(node, text) {
            return;
        }
        // Only the name chunk gets a separating space, so parameter lists
        // stay glued to the name: `helloWorld(a, b)`.
        if is_name && !record.definition.is_empty() {
            record.definition.push(' ');
        }
        record.definition.push_str(text);
        if is_name {
            record.name = text.to_string();
        }
    }

    fn collect_variable_definition(&self, node: &Node, record: &mut SymbolRecord) {
        let text = node_text(node, self.source);
        let is_name = self.caps.is_variable_name(node);
        if !is_name && !self.caps.include_in_variable_definition(node, text) {
            return;
        }
        record.definition.push_str(text);
        if !record.definition.ends_with(' ') {
            record.definition.push(' ');
        }
        if is_name {
            record.name = text.to_string();
        }
    }

    /// Apply the dotted-path rewrite (exactly once per record), tag the kind
    /// and prepend any adapter-supplied definition prefix.
    fn finalize(&self, record: &mut SymbolRecord, node: &Node, kind: SymbolKind) {
        record.kind = kind;
        if !self.path.is_empty() {
            record.name = format!("{}.{}", self.path.join("."), record.name);
        }
        if let Some(prefix) = self.caps.definition_prefix(node, self.source) {
            record.definition.insert_str(0, &prefix);
        }
    }

    fn pretty_variable_value(&self, node: &Node) -> String {
        let value = normalize_whitespace(node_text(node, self.source));
        let chars: Vec<char> = value.chars().collect();
        if chars.len() > MAX_VALUE_LEN {
            let head: String = chars[..VALUE_EDGE_LEN].iter().collect();
            let tail: String = chars[chars.len() - VALUE_EDGE_LEN..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            value
        }
    }
}
