//! Core AST node definitions.

use serde::{Deserialize, Serialize};

/// A syntax tree node.
///
/// Statements, class members and expressions share one tagged union, as the
/// parser emits them; which kinds are valid where is decided by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all_fields = "camelCase")]
pub enum Node {
    /// The root of a compilation unit.
    #[serde(rename = "N_PROGRAM")]
    Program { statements: Vec<Node> },

    #[serde(rename = "N_CLASS_STATEMENT")]
    ClassStatement {
        class_name: Box<Node>,
        #[serde(default)]
        members: Vec<Node>,
    },
    #[serde(rename = "N_ECHO_STATEMENT")]
    EchoStatement { expression: Box<Node> },
    #[serde(rename = "N_EXPRESSION_STATEMENT")]
    ExpressionStatement { expression: Box<Node> },
    #[serde(rename = "N_FOREACH_STATEMENT")]
    ForeachStatement {
        array: Box<Node>,
        #[serde(default)]
        key: Option<Box<Node>>,
        value: Box<Node>,
        #[serde(default)]
        statements: Vec<Node>,
    },
    #[serde(rename = "N_FUNCTION_STATEMENT")]
    FunctionStatement {
        func: String,
        #[serde(default)]
        args: Vec<Node>,
        #[serde(default)]
        statements: Vec<Node>,
    },
    #[serde(rename = "N_IF_STATEMENT")]
    IfStatement {
        condition: Box<Node>,
        #[serde(default)]
        consequent_statements: Vec<Node>,
        #[serde(default)]
        alternate_statements: Vec<Node>,
    },
    /// Raw text outside of the script tags, echoed verbatim.
    #[serde(rename = "N_INLINE_HTML_STATEMENT")]
    InlineHtmlStatement { html: String },
    #[serde(rename = "N_RETURN_STATEMENT")]
    ReturnStatement {
        #[serde(default)]
        expression: Option<Box<Node>>,
    },

    #[serde(rename = "N_METHOD_DEFINITION")]
    MethodDefinition {
        func: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
        #[serde(default)]
        statements: Vec<Node>,
    },
    #[serde(rename = "N_PROPERTY_DEFINITION")]
    PropertyDefinition {
        variable: Box<Node>,
        #[serde(default)]
        value: Option<Box<Node>>,
    },

    #[serde(rename = "N_ARRAY_INDEX")]
    ArrayIndex {
        array: Box<Node>,
        indices: Vec<Index>,
        #[serde(default)]
        reference: bool,
    },
    #[serde(rename = "N_ARRAY_LITERAL")]
    ArrayLiteral {
        #[serde(default)]
        elements: Vec<Node>,
    },
    #[serde(rename = "N_BOOLEAN")]
    Boolean { bool: bool },
    /// An operand followed by a left-to-right chain of binary operations.
    #[serde(rename = "N_EXPRESSION")]
    Expression {
        left: Box<Node>,
        #[serde(default)]
        right: Vec<Operation>,
    },
    #[serde(rename = "N_FLOAT")]
    Float { number: f64 },
    #[serde(rename = "N_FUNCTION_CALL")]
    FunctionCall {
        func: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
    },
    #[serde(rename = "N_INTEGER")]
    Integer { number: i64 },
    #[serde(rename = "N_KEY_VALUE_PAIR")]
    KeyValuePair { key: Box<Node>, value: Box<Node> },
    /// Destructuring target, `list($a, $b)`.
    #[serde(rename = "N_LIST")]
    List { elements: Vec<Node> },
    #[serde(rename = "N_METHOD_CALL")]
    MethodCall { object: Box<Node>, calls: Vec<Call> },
    #[serde(rename = "N_NEW_EXPRESSION")]
    NewExpression {
        class_name: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
    },
    #[serde(rename = "N_OBJECT_PROPERTY")]
    ObjectProperty {
        object: Box<Node>,
        properties: Vec<Property>,
        #[serde(default)]
        reference: bool,
    },
    /// A bare word: function and class names, constants such as `null`.
    #[serde(rename = "N_STRING")]
    String { string: String },
    /// A quoted string literal, still carrying its escape sequences.
    #[serde(rename = "N_STRING_LITERAL")]
    StringLiteral { string: String },
    #[serde(rename = "N_TERNARY")]
    Ternary {
        condition: Box<Node>,
        options: Vec<TernaryOption>,
    },
    #[serde(rename = "N_UNARY_EXPRESSION")]
    UnaryExpression {
        operator: String,
        operand: Box<Node>,
        #[serde(default = "default_prefix")]
        prefix: bool,
    },
    #[serde(rename = "N_VARIABLE")]
    Variable {
        variable: String,
        #[serde(default)]
        reference: bool,
    },
    /// An omitted slot, e.g. the hole in `list(, $b)`.
    #[serde(rename = "N_VOID")]
    Void,
}

fn default_prefix() -> bool {
    true
}

/// One `[...]` step of an array access; `None` is the append form `$a[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub index: Option<Box<Node>>,
}

/// One `->name` step of a property access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property: Box<Node>,
}

/// One `->name(...)` step of a method call chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub func: Box<Node>,
    #[serde(default)]
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operator: String,
    pub operand: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryOption {
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

impl Node {
    /// The parser's tag for this node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program { .. } => "N_PROGRAM",
            Node::ClassStatement { .. } => "N_CLASS_STATEMENT",
            Node::EchoStatement { .. } => "N_ECHO_STATEMENT",
            Node::ExpressionStatement { .. } => "N_EXPRESSION_STATEMENT",
            Node::ForeachStatement { .. } => "N_FOREACH_STATEMENT",
            Node::FunctionStatement { .. } => "N_FUNCTION_STATEMENT",
            Node::IfStatement { .. } => "N_IF_STATEMENT",
            Node::InlineHtmlStatement { .. } => "N_INLINE_HTML_STATEMENT",
            Node::ReturnStatement { .. } => "N_RETURN_STATEMENT",
            Node::MethodDefinition { .. } => "N_METHOD_DEFINITION",
            Node::PropertyDefinition { .. } => "N_PROPERTY_DEFINITION",
            Node::ArrayIndex { .. } => "N_ARRAY_INDEX",
            Node::ArrayLiteral { .. } => "N_ARRAY_LITERAL",
            Node::Boolean { .. } => "N_BOOLEAN",
            Node::Expression { .. } => "N_EXPRESSION",
            Node::Float { .. } => "N_FLOAT",
            Node::FunctionCall { .. } => "N_FUNCTION_CALL",
            Node::Integer { .. } => "N_INTEGER",
            Node::KeyValuePair { .. } => "N_KEY_VALUE_PAIR",
            Node::List { .. } => "N_LIST",
            Node::MethodCall { .. } => "N_METHOD_CALL",
            Node::NewExpression { .. } => "N_NEW_EXPRESSION",
            Node::ObjectProperty { .. } => "N_OBJECT_PROPERTY",
            Node::String { .. } => "N_STRING",
            Node::StringLiteral { .. } => "N_STRING_LITERAL",
            Node::Ternary { .. } => "N_TERNARY",
            Node::UnaryExpression { .. } => "N_UNARY_EXPRESSION",
            Node::Variable { .. } => "N_VARIABLE",
            Node::Void => "N_VOID",
        }
    }

    /// Function and class declarations, which are hoisted within their block.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Node::FunctionStatement { .. } | Node::ClassStatement { .. }
        )
    }

    /// Whether the node carries the `&` bind-by-reference marker.
    pub fn is_reference(&self) -> bool {
        match self {
            Node::Variable { reference, .. }
            | Node::ArrayIndex { reference, .. }
            | Node::ObjectProperty { reference, .. } => *reference,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serialized_tag() {
        let node = Node::Variable {
            variable: "a".to_string(),
            reference: false,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["name"], node.kind());
    }

    #[test]
    fn test_declarations() {
        let function = Node::FunctionStatement {
            func: "f".to_string(),
            args: vec![],
            statements: vec![],
        };
        let echo = Node::EchoStatement {
            expression: Box::new(Node::Integer { number: 1 }),
        };
        assert!(function.is_declaration());
        assert!(!echo.is_declaration());
    }

    #[test]
    fn test_reference_marker() {
        let plain = Node::Variable {
            variable: "a".to_string(),
            reference: false,
        };
        let by_reference = Node::Variable {
            variable: "a".to_string(),
            reference: true,
        };
        assert!(!plain.is_reference());
        assert!(by_reference.is_reference());
        assert!(!Node::Void.is_reference());
    }

    #[test]
    fn test_unary_defaults_to_prefix() {
        let node: Node = serde_json::from_str(
            r#"{"name": "N_UNARY_EXPRESSION", "operator": "-", "operand": {"name": "N_INTEGER", "number": 1}}"#,
        )
        .unwrap();
        assert!(matches!(node, Node::UnaryExpression { prefix: true, .. }));
    }
}
