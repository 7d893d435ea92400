//! Small constructors for building syntax trees by hand.
//!
//! Used by tests and benchmarks in place of a parser.

use crate::nodes::{Call, Index, Node, Operation, Property, TernaryOption};

pub fn program(statements: Vec<Node>) -> Node {
    Node::Program { statements }
}

pub fn echo(expression: Node) -> Node {
    Node::EchoStatement {
        expression: Box::new(expression),
    }
}

pub fn expr_stmt(expression: Node) -> Node {
    Node::ExpressionStatement {
        expression: Box::new(expression),
    }
}

pub fn ret(expression: Option<Node>) -> Node {
    Node::ReturnStatement {
        expression: expression.map(Box::new),
    }
}

pub fn inline_html(html: &str) -> Node {
    Node::InlineHtmlStatement {
        html: html.to_string(),
    }
}

pub fn if_(condition: Node, consequent: Vec<Node>, alternate: Vec<Node>) -> Node {
    Node::IfStatement {
        condition: Box::new(condition),
        consequent_statements: consequent,
        alternate_statements: alternate,
    }
}

pub fn foreach(array: Node, key: Option<Node>, value: Node, statements: Vec<Node>) -> Node {
    Node::ForeachStatement {
        array: Box::new(array),
        key: key.map(Box::new),
        value: Box::new(value),
        statements,
    }
}

/// `function name($params...) { statements }`
pub fn function(name: &str, params: &[&str], statements: Vec<Node>) -> Node {
    Node::FunctionStatement {
        func: name.to_string(),
        args: params.iter().map(|param| var(param)).collect(),
        statements,
    }
}

pub fn class(name: &str, members: Vec<Node>) -> Node {
    Node::ClassStatement {
        class_name: Box::new(bare(name)),
        members,
    }
}

pub fn method(name: &str, params: &[&str], statements: Vec<Node>) -> Node {
    Node::MethodDefinition {
        func: Box::new(bare(name)),
        args: params.iter().map(|param| var(param)).collect(),
        statements,
    }
}

pub fn property(name: &str, value: Option<Node>) -> Node {
    Node::PropertyDefinition {
        variable: Box::new(var(name)),
        value: value.map(Box::new),
    }
}

pub fn var(name: &str) -> Node {
    Node::Variable {
        variable: name.to_string(),
        reference: false,
    }
}

/// A variable carrying the `&` marker.
pub fn ref_var(name: &str) -> Node {
    Node::Variable {
        variable: name.to_string(),
        reference: true,
    }
}

pub fn int(number: i64) -> Node {
    Node::Integer { number }
}

pub fn float(number: f64) -> Node {
    Node::Float { number }
}

pub fn boolean(value: bool) -> Node {
    Node::Boolean { bool: value }
}

/// A bare word such as a function name or `null`.
pub fn bare(string: &str) -> Node {
    Node::String {
        string: string.to_string(),
    }
}

/// A quoted string literal; escapes are kept as written.
pub fn string_literal(string: &str) -> Node {
    Node::StringLiteral {
        string: string.to_string(),
    }
}

pub fn void() -> Node {
    Node::Void
}

/// `left op right`
pub fn binary(left: Node, operator: &str, right: Node) -> Node {
    chain(left, vec![(operator, right)])
}

/// `left op1 a op2 b ...`, applied left to right.
pub fn chain(left: Node, operations: Vec<(&str, Node)>) -> Node {
    Node::Expression {
        left: Box::new(left),
        right: operations
            .into_iter()
            .map(|(operator, operand)| Operation {
                operator: operator.to_string(),
                operand,
            })
            .collect(),
    }
}

pub fn assign(target: Node, value: Node) -> Node {
    binary(target, "=", value)
}

/// `$target =& $source`
pub fn assign_ref(target: Node, source: Node) -> Node {
    binary(target, "=", with_reference(source))
}

pub fn prefix(operator: &str, operand: Node) -> Node {
    Node::UnaryExpression {
        operator: operator.to_string(),
        operand: Box::new(operand),
        prefix: true,
    }
}

pub fn suffix(operator: &str, operand: Node) -> Node {
    Node::UnaryExpression {
        operator: operator.to_string(),
        operand: Box::new(operand),
        prefix: false,
    }
}

pub fn call(name: &str, args: Vec<Node>) -> Node {
    Node::FunctionCall {
        func: Box::new(bare(name)),
        args,
    }
}

pub fn array(elements: Vec<Node>) -> Node {
    Node::ArrayLiteral { elements }
}

pub fn pair(key: Node, value: Node) -> Node {
    Node::KeyValuePair {
        key: Box::new(key),
        value: Box::new(value),
    }
}

pub fn list(elements: Vec<Node>) -> Node {
    Node::List { elements }
}

/// `base[i][j]...`; a `None` index is the append form `[]`.
pub fn index(base: Node, indices: Vec<Option<Node>>) -> Node {
    Node::ArrayIndex {
        array: Box::new(base),
        indices: indices
            .into_iter()
            .map(|index| Index {
                index: index.map(Box::new),
            })
            .collect(),
        reference: false,
    }
}

/// `object->a->b...`
pub fn prop(object: Node, names: &[&str]) -> Node {
    Node::ObjectProperty {
        object: Box::new(object),
        properties: names
            .iter()
            .map(|name| Property {
                property: Box::new(bare(name)),
            })
            .collect(),
        reference: false,
    }
}

pub fn new_(class_name: &str, args: Vec<Node>) -> Node {
    Node::NewExpression {
        class_name: Box::new(bare(class_name)),
        args,
    }
}

/// `object->name(args)`
pub fn method_call(object: Node, name: &str, args: Vec<Node>) -> Node {
    Node::MethodCall {
        object: Box::new(object),
        calls: vec![Call {
            func: Box::new(bare(name)),
            args,
        }],
    }
}

/// `condition ? consequent : alternate`
pub fn ternary(condition: Node, consequent: Node, alternate: Node) -> Node {
    Node::Ternary {
        condition: Box::new(condition),
        options: vec![TernaryOption {
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }],
    }
}

/// Sets the `&` marker on variables, index and property accesses.
pub fn with_reference(node: Node) -> Node {
    match node {
        Node::Variable { variable, .. } => Node::Variable {
            variable,
            reference: true,
        },
        Node::ArrayIndex { array, indices, .. } => Node::ArrayIndex {
            array,
            indices,
            reference: true,
        },
        Node::ObjectProperty {
            object, properties, ..
        } => Node::ObjectProperty {
            object,
            properties,
            reference: true,
        },
        other => other,
    }
}
