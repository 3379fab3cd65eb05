//! Capability adapter for the JavaScript grammar.
//!
//! Recognizes class/function declarations, export wrappers, arrow-function
//! values and class fields. Decorators are ordinary header children of the
//! declaration node, so they accumulate into the definition on their own.

use tree_sitter::{Language, Node};

use super::{node_text, normalize_whitespace, LanguageCapabilities};

pub struct JavaScriptCapabilities;

impl LanguageCapabilities for JavaScriptCapabilities {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn grammar(&self) -> Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn is_generic(&self, node: &Node) -> bool {
        matches!(
            node.kind(),
            "program" | "export_statement" | "lexical_declaration" | "variable_declaration"
        )
    }

    fn is_class(&self, node: &Node) -> bool {
        matches!(node.kind(), "class_declaration" | "class")
    }

    fn is_class_body(&self, node: &Node) -> bool {
        node.kind() == "class_body"
    }

    fn is_class_name(&self, node: &Node) -> bool {
        node.kind() == "identifier"
    }

    fn is_function(&self, node: &Node) -> bool {
        matches!(
            node.kind(),
            "function_declaration" | "function_expression" | "method_definition"
        )
    }

    fn is_function_body(&self, node: &Node) -> bool {
        node.kind() == "statement_block"
    }

    fn is_function_name(&self, node: &Node) -> bool {
        matches!(node.kind(), "identifier" | "property_identifier")
    }

    fn is_variable(&self, node: &Node) -> bool {
        // field_definition is the current grammar's name for class fields;
        // public_field_definition covers older grammar versions.
        matches!(
            node.kind(),
            "variable_declarator" | "field_definition" | "public_field_definition"
        )
    }

    fn is_variable_name(&self, node: &Node) -> bool {
        matches!(node.kind(), "identifier" | "property_identifier")
    }

    fn is_variable_value(&self, node: &Node) -> bool {
        node.next_sibling().is_none()
    }

    fn variable_value_is_function(&self, node: &Node) -> bool {
        node.kind() == "arrow_function"
    }

    fn render_function_variable_value(&self, node: &Node, source: &str) -> String {
        // Just the parameter list of the arrow function.
        node.child(0)
            .map(|child| node_text(&child, source).to_string())
            .unwrap_or_default()
    }

    fn definition_prefix(&self, node: &Node, source: &str) -> Option<String> {
        // export / export default / export const ... sits outside the
        // matched node, one or two levels up.
        let parent = node.parent()?;
        let prefix_start = match parent.kind() {
            "lexical_declaration" | "variable_declaration" => match parent.parent() {
                Some(grandparent) if grandparent.kind() == "export_statement" => grandparent,
                _ => parent,
            },
            "export_statement" => parent,
            _ => return None,
        };
        let prefix = source.get(prefix_start.start_byte()..node.start_byte())?;
        Some(normalize_whitespace(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{engine, SymbolCatalogs, SymbolKind};

    fn parse_javascript(source: &str) -> SymbolCatalogs {
        engine::extract(&JavaScriptCapabilities, source).expect("extraction failed")
    }

    #[test]
    fn class_detected() {
        let catalogs = parse_javascript("class Stuff { }\n");

        assert_eq!(catalogs.classes.len(), 1);
        let record = &catalogs.classes["Stuff"];
        assert_eq!(record.kind, SymbolKind::Class);
        assert_eq!(record.definition, "class Stuff");
    }

    #[test]
    fn export_class_detected() {
        let catalogs = parse_javascript("export class Stuff {}\n");

        let record = &catalogs.classes["Stuff"];
        assert_eq!(record.definition, "export class Stuff");
    }

    #[test]
    fn export_default_class_detected() {
        let catalogs = parse_javascript("export default class Stuff {}\n");

        let record = &catalogs.classes["Stuff"];
        assert_eq!(record.definition, "export default class Stuff");
    }

    #[test]
    fn class_with_heritage() {
        let catalogs = parse_javascript("class Stuff2 extends Stuff { }\n");

        let record = &catalogs.classes["Stuff2"];
        assert_eq!(record.definition, "class Stuff2 extends Stuff");
    }

    #[test]
    fn method_detected() {
        let catalogs = parse_javascript("class Stuff {\n\thelloWorld (a, b) {}\n}\n");

        assert_eq!(catalogs.classes.len(), 1);
        assert_eq!(catalogs.methods.len(), 1);
        assert!(catalogs.functions.is_empty());
        let record = &catalogs.methods["Stuff.helloWorld"];
        assert_eq!(record.kind, SymbolKind::Method);
        assert_eq!(record.definition, "helloWorld(a, b)");
    }

    #[test]
    fn static_method_detected() {
        let catalogs = parse_javascript("class Stuff {\n\tstatic helloWorld (a, b) {}\n}\n");

        let record = &catalogs.methods["Stuff.helloWorld"];
        assert_eq!(record.definition, "static helloWorld(a, b)");
    }

    #[test]
    fn decorated_method_detected() {
        // Decorators are header children of the method node, so they glue
        // together; only the name chunk gets a separating space.
        let catalogs = parse_javascript(
            "class Stuff {\n\t@mydecorator\n\t@mysecondDecorator\n\thelloWorld (a, b) {}\n}\n",
        );

        let record = &catalogs.methods["Stuff.helloWorld"];
        assert_eq!(record.definition, "@mydecorator@mysecondDecorator helloWorld(a, b)");
    }

    #[test]
    fn class_field_detected() {
        let catalogs = parse_javascript("class Stuff {\n\tsize = 10;\n}\n");

        assert_eq!(catalogs.variables.len(), 1);
        let record = &catalogs.variables["Stuff.size"];
        assert_eq!(record.kind, SymbolKind::Variable);
        assert_eq!(record.definition, "size = 10");
    }

    #[test]
    fn static_class_field_detected() {
        let catalogs = parse_javascript("class Stuff {\n\tstatic size = 10;\n}\n");

        let record = &catalogs.variables["Stuff.size"];
        assert_eq!(record.definition, "static size = 10");
    }

    #[test]
    fn function_detected() {
        let source = "function stuff (a, b) {\n\tconsole.log(a, b);\n}\n";
        let catalogs = parse_javascript(source);

        assert_eq!(catalogs.functions.len(), 1);
        let record = &catalogs.functions["stuff"];
        assert_eq!(record.kind, SymbolKind::Function);
        assert_eq!(record.definition, "function stuff(a, b)");
        assert_eq!(record.start_byte as usize, 0);
        assert_eq!(record.end_byte as usize, source.len() - 1);
    }

    #[test]
    fn export_function_detected() {
        let catalogs = parse_javascript("export function stuff (a, b) {}\n");

        let record = &catalogs.functions["stuff"];
        assert_eq!(record.definition, "export function stuff(a, b)");
    }

    #[test]
    fn export_default_function_detected() {
        let catalogs = parse_javascript("export default function stuff (a, b) {}\n");

        let record = &catalogs.functions["stuff"];
        assert_eq!(record.definition, "export default function stuff(a, b)");
    }

    #[test]
    fn variable_declarations_detected() {
        for keyword in ["const", "let", "var"] {
            let catalogs = parse_javascript(&format!("{} stuff = 10;\n", keyword));

            assert_eq!(catalogs.variables.len(), 1);
            let record = &catalogs.variables["stuff"];
            assert_eq!(record.definition, format!("{} stuff = 10", keyword));
        }
    }

    #[test]
    fn export_variable_detected() {
        let catalogs = parse_javascript("export const stuff1 = 10;\nexport let stuff2 = 20;\n");

        assert_eq!(catalogs.variables.len(), 2);
        assert_eq!(catalogs.variables["stuff1"].definition, "export const stuff1 = 10");
        assert_eq!(catalogs.variables["stuff2"].definition, "export let stuff2 = 20");
    }

    #[test]
    fn arrow_function_variable_lands_in_functions() {
        let catalogs = parse_javascript("const stuff = (a, b) => {\n\tconsole.log(a, b);\n}\n");

        assert!(catalogs.variables.is_empty());
        assert_eq!(catalogs.functions.len(), 1);
        let record = &catalogs.functions["stuff"];
        assert_eq!(record.kind, SymbolKind::FunctionAsVariable);
        assert_eq!(record.definition, "const stuff = (a, b)");
    }

    #[test]
    fn export_arrow_function_variable() {
        let catalogs = parse_javascript("export const stuff = (a, b) => {}\n");

        let record = &catalogs.functions["stuff"];
        assert_eq!(record.definition, "export const stuff = (a, b)");
    }

    #[test]
    fn long_variable_value_truncated() {
        let source = concat!(
            "const stuff = {\n",
            "\t\"value one\": {\"label\": \"Hello world 1\", \"value\": 1},\n",
            "\t\"value two\": {\"label\": \"Hello world 2\", \"value\": 2},\n",
            "\t\"value three\": {\"label\": \"Hello world 3\", \"value\": 3}\n",
            "}\n",
        );
        let catalogs = parse_javascript(source);

        let record = &catalogs.variables["stuff"];
        // first 18 + "..." + last 18 of the normalized value
        let value = record.definition.strip_prefix("const stuff = ").unwrap();
        assert_eq!(value.chars().count(), 39);
        assert!(value.contains("..."));
        assert!(value.starts_with("{ \"value one\": {\"l"));
    }

    #[test]
    fn short_variable_value_verbatim() {
        let catalogs = parse_javascript("const stuff = [1, 2,\n 3];\n");

        // Whitespace collapses; 40 chars or less renders verbatim.
        assert_eq!(catalogs.variables["stuff"].definition, "const stuff = [1, 2, 3]");
    }

    #[test]
    fn declaration_without_value_is_dropped() {
        let catalogs = parse_javascript("let stuff;\n");

        assert!(catalogs.variables.is_empty());
    }

    #[test]
    fn plain_reassignment_keeps_declaration() {
        // `stuff = 20;` is not a declarator node, so the declaration wins.
        let catalogs = parse_javascript("let stuff = 10;\nstuff = 20;\n");

        assert_eq!(catalogs.variables.len(), 1);
        assert_eq!(catalogs.variables["stuff"].definition, "let stuff = 10");
    }

    #[test]
    fn multiple_classes_detected() {
        let source = "\
export class Stuff {\n\thelloWorld() {}\n}\n\
class Stuff2 extends Stuff {\n\thelloWorld2() {}\n}\n\
export default class Stuff3 extends Stuff2 {\n\thelloWorld3() {}\n}\n";
        let catalogs = parse_javascript(source);

        assert_eq!(catalogs.classes.len(), 3);
        assert!(catalogs.classes.contains_key("Stuff"));
        assert!(catalogs.classes.contains_key("Stuff2"));
        assert!(catalogs.classes.contains_key("Stuff3"));
        assert_eq!(catalogs.methods.len(), 3);
    }

    #[test]
    fn function_body_is_not_traversed() {
        let catalogs = parse_javascript("function outer() {\n\tfunction inner() {}\n}\n");

        assert_eq!(catalogs.functions.len(), 1);
        assert!(catalogs.functions.contains_key("outer"));
    }
}
