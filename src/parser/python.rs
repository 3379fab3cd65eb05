//! Capability adapter for the Python grammar.
//!
//! Colon-delimited headers (the `:` token is vetoed from definitions),
//! decorated definitions handled through the parent chain, and assignment
//! names restricted to a leading identifier, which excludes tuple unpacking.

use tree_sitter::{Language, Node};

use super::{normalize_whitespace, LanguageCapabilities};

pub struct PythonCapabilities;

impl LanguageCapabilities for PythonCapabilities {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn grammar(&self) -> Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn is_generic(&self, node: &Node) -> bool {
        matches!(
            node.kind(),
            "module" | "decorated_definition" | "expression_statement"
        )
    }

    fn is_class(&self, node: &Node) -> bool {
        node.kind() == "class_definition"
    }

    fn is_class_body(&self, node: &Node) -> bool {
        node.kind() == "block"
    }

    fn is_class_name(&self, node: &Node) -> bool {
        node.kind() == "identifier"
    }

    fn include_in_class_definition(&self, _node: &Node, text: &str) -> bool {
        text != ":"
    }

    fn is_function(&self, node: &Node) -> bool {
        node.kind() == "function_definition"
    }

    fn is_function_body(&self, node: &Node) -> bool {
        node.kind() == "block"
    }

    fn is_function_name(&self, node: &Node) -> bool {
        node.kind() == "identifier"
    }

    fn include_in_function_definition(&self, _node: &Node, text: &str) -> bool {
        text != ":"
    }

    fn is_variable(&self, node: &Node) -> bool {
        node.kind() == "assignment"
    }

    fn is_variable_name(&self, node: &Node) -> bool {
        // Leading identifier only: `a, b = ...` unpacking has a pattern_list
        // on the left and yields no name, so the candidate is dropped.
        node.kind() == "identifier" && node.prev_sibling().is_none()
    }

    fn is_variable_value(&self, node: &Node) -> bool {
        node.next_sibling().is_none()
    }

    fn definition_prefix(&self, node: &Node, source: &str) -> Option<String> {
        let parent = node.parent()?;
        if parent.kind() != "decorated_definition" {
            return None;
        }
        let prefix = source.get(parent.start_byte()..node.start_byte())?;
        Some(normalize_whitespace(prefix))
    }
}
