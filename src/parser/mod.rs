//! Symbol extraction from concrete syntax trees.
//!
//! The generic traversal engine lives in [`engine`]; each supported language
//! contributes a [`LanguageCapabilities`] adapter with pure predicates over
//! tree positions. Adding a language means writing only a new adapter.

pub mod engine;
pub mod javascript;
pub mod python;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tree_sitter::{Language, Node};

pub use engine::TraversalEngine;
pub use javascript::JavaScriptCapabilities;
pub use python::PythonCapabilities;

/// Kinds of symbols the engine discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A class definition
    Class,
    /// A free function
    Function,
    /// A function defined inside a class body
    Method,
    /// A plain variable with a value
    Variable,
    /// A variable whose value is an anonymous function literal
    FunctionAsVariable,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Variable => "variable",
            SymbolKind::FunctionAsVariable => "function_as_variable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "class" => Some(SymbolKind::Class),
            "function" => Some(SymbolKind::Function),
            "method" => Some(SymbolKind::Method),
            "variable" => Some(SymbolKind::Variable),
            "function_as_variable" => Some(SymbolKind::FunctionAsVariable),
            _ => None,
        }
    }
}

/// One discovered symbol.
///
/// `name` starts out as the bare identifier and is rewritten exactly once,
/// when the record is finalized, to the dot-joined containment path
/// (e.g. `Outer.Inner.method`). `definition` is the accumulated header text,
/// not the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub kind: SymbolKind,
    pub name: String,
    pub definition: String,
    pub start_byte: u32,
    pub end_byte: u32,
}

impl SymbolRecord {
    fn new(start_byte: u32, end_byte: u32) -> Self {
        Self {
            kind: SymbolKind::Variable,
            name: String::new(),
            definition: String::new(),
            start_byte,
            end_byte,
        }
    }
}

/// The four per-file symbol catalogs, keyed by finalized dotted name.
///
/// Key collisions within one file (e.g. variable reassignment) resolve
/// last-write-wins in source order. BTreeMap keeps iteration deterministic
/// across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolCatalogs {
    pub classes: BTreeMap<String, SymbolRecord>,
    pub functions: BTreeMap<String, SymbolRecord>,
    pub methods: BTreeMap<String, SymbolRecord>,
    pub variables: BTreeMap<String, SymbolRecord>,
}

impl SymbolCatalogs {
    pub fn symbol_count(&self) -> usize {
        self.classes.len() + self.functions.len() + self.methods.len() + self.variables.len()
    }
}

/// Per-language structural classifiers driving the generic traversal engine.
///
/// Every predicate is pure and side-effect free; the engine owns all traversal
/// state. Default hooks cover the common case so adapters only override what
/// their grammar needs.
pub trait LanguageCapabilities: Send + Sync {
    /// Language identifier, e.g. "javascript".
    fn language_id(&self) -> &'static str;

    /// The tree-sitter grammar used to parse sources for this language.
    fn grammar(&self) -> Language;

    /// Node is a syntactic wrapper to traverse into without recording a
    /// symbol (program/module nodes, export statements, declaration lists).
    fn is_generic(&self, node: &Node) -> bool;

    fn is_class(&self, node: &Node) -> bool;
    fn is_class_body(&self, node: &Node) -> bool;
    fn is_class_name(&self, node: &Node) -> bool;

    fn is_function(&self, node: &Node) -> bool;
    fn is_function_body(&self, node: &Node) -> bool;
    fn is_function_name(&self, node: &Node) -> bool;

    fn is_variable(&self, node: &Node) -> bool;
    fn is_variable_name(&self, node: &Node) -> bool;
    fn is_variable_value(&self, node: &Node) -> bool;

    /// Veto individual header tokens from the class definition text.
    fn include_in_class_definition(&self, _node: &Node, _text: &str) -> bool {
        true
    }

    fn include_in_function_definition(&self, _node: &Node, _text: &str) -> bool {
        true
    }

    fn include_in_variable_definition(&self, _node: &Node, _text: &str) -> bool {
        true
    }

    /// Whether a variable's value node is an anonymous function literal.
    fn variable_value_is_function(&self, _node: &Node) -> bool {
        false
    }

    /// Compact rendering of a function-literal variable value (e.g. just the
    /// parameter list of an arrow function).
    fn render_function_variable_value(&self, _node: &Node, _source: &str) -> String {
        String::new()
    }

    /// Leading source text outside the matched node that semantically
    /// modifies it (export keywords, stacked decorators). Computed from the
    /// immediate parent chain; the engine prepends it to the definition.
    fn definition_prefix(&self, _node: &Node, _source: &str) -> Option<String> {
        None
    }
}

/// Maps file extensions to shared capability adapters.
///
/// The distinct set of registered extensions also drives file discovery.
pub struct LanguageRegistry {
    by_extension: HashMap<&'static str, Arc<dyn LanguageCapabilities>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            by_extension: HashMap::new(),
        };

        let javascript: Arc<dyn LanguageCapabilities> = Arc::new(JavaScriptCapabilities);
        for ext in ["js", "jsx", "mjs", "cjs"] {
            registry.by_extension.insert(ext, Arc::clone(&javascript));
        }

        let python: Arc<dyn LanguageCapabilities> = Arc::new(PythonCapabilities);
        registry.by_extension.insert("py", python);

        registry
    }

    pub fn get(&self, extension: &str) -> Option<Arc<dyn LanguageCapabilities>> {
        self.by_extension.get(extension).cloned()
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.by_extension.contains_key(extension)
    }

    pub fn extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<_> = self.by_extension.keys().copied().collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a node's text from the original source.
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}
