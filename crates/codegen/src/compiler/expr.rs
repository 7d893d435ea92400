//! Expression compilation: values, places and assignment chains

use crate::compiler::context::{CompilationContext, NodeContext};
use crate::error::{CompileError, CompileResult, Position};
use crate::ir::{ArrayElement, Base, Expr, Place, Source, UnaryOperand};
use crate::operators::{BinaryOperation, binary_operation, unary_method};
use ember_ast::{Call, Node, Operation, TernaryOption};
use ember_runtime::AssignMethod;

/// The result of compiling one expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Value(Expr),
    Place(Place),
}

impl Fragment {
    /// The fragment as a value, loading from it if it is a place.
    pub fn into_expr(self) -> Expr {
        match self {
            Fragment::Value(expr) => expr,
            Fragment::Place(place) => Expr::load(place),
        }
    }

    /// The fragment as a place; `kind` names the node for the error.
    pub fn into_place(self, kind: &'static str) -> CompileResult<Place> {
        match self {
            Fragment::Place(place) => Ok(place),
            Fragment::Value(_) => Err(CompileError::InvalidAssignmentTarget { kind }),
        }
    }
}

/// Variable names may arrive with or without their sigil.
pub fn variable_name(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// Expands the `\n` escape of a quoted string literal.
pub fn unescape_string(text: &str) -> String {
    text.replace("\\n", "\n")
}

pub struct ExprCompiler;

impl ExprCompiler {
    pub fn compile(
        ctx: &mut CompilationContext,
        node: &Node,
        flags: NodeContext,
    ) -> CompileResult<Fragment> {
        match node {
            Node::Variable { variable, .. } => {
                let name = variable_name(variable);
                if flags.is_assignment_target {
                    ctx.declare(name);
                }
                let place = Place::Variable(name.to_string());
                Ok(if flags.wants_value {
                    Fragment::Value(Expr::load(place))
                } else {
                    Fragment::Place(place)
                })
            }
            Node::ArrayIndex { array, indices, .. } => {
                let keys = indices.iter().map(|index| index.index.as_deref()).collect();
                Self::access(ctx, array, keys, node.kind(), flags)
            }
            Node::ObjectProperty {
                object, properties, ..
            } => {
                let keys = properties
                    .iter()
                    .map(|property| Some(property.property.as_ref()))
                    .collect();
                Self::access(ctx, object, keys, node.kind(), flags)
            }
            Node::Expression { left, right } => Self::expression(ctx, left, right, flags),
            Node::UnaryExpression {
                operator,
                operand,
                prefix,
            } => {
                let method = unary_method(operator, *prefix)?;
                let operand = if method.needs_location() {
                    UnaryOperand::Place(Self::compile_place(ctx, operand, NodeContext::TARGET)?)
                } else {
                    UnaryOperand::Value(Self::compile_value(ctx, operand)?)
                };
                Ok(Fragment::Value(Expr::Unary {
                    method,
                    operand: Box::new(operand),
                }))
            }
            Node::FunctionCall { func, args } => Ok(Fragment::Value(Expr::Call {
                function: Box::new(Self::compile_value(ctx, func)?),
                args: Self::compile_values(ctx, args)?,
            })),
            Node::MethodCall { object, calls } => Self::method_calls(ctx, object, calls),
            Node::NewExpression { class_name, args } => Ok(Fragment::Value(Expr::New {
                class: Box::new(Self::compile_value(ctx, class_name)?),
                args: Self::compile_values(ctx, args)?,
            })),
            Node::Ternary { condition, options } => Self::ternary(ctx, condition, options),
            Node::ArrayLiteral { elements } => {
                let elements = elements
                    .iter()
                    .map(|element| match element {
                        Node::KeyValuePair { key, value } => Ok(ArrayElement::Pair {
                            key: Self::compile_value(ctx, key)?,
                            value: Self::compile_value(ctx, value)?,
                        }),
                        other => Ok(ArrayElement::Value(Self::compile_value(ctx, other)?)),
                    })
                    .collect::<CompileResult<Vec<_>>>()?;
                Ok(Fragment::Value(Expr::Array(elements)))
            }
            Node::List { elements } => {
                if flags.wants_value {
                    return Err(CompileError::unsupported(node.kind(), Position::Expression));
                }
                let places = elements
                    .iter()
                    .map(|element| Self::compile_place(ctx, element, flags))
                    .collect::<CompileResult<Vec<_>>>()?;
                Ok(Fragment::Place(Place::List(places)))
            }
            Node::Integer { number } => Ok(Fragment::Value(Expr::Integer(*number))),
            Node::Float { number } => Ok(Fragment::Value(Expr::Float(*number))),
            Node::Boolean { bool } => Ok(Fragment::Value(Expr::Boolean(*bool))),
            Node::String { string } => Ok(Fragment::Value(match string.as_str() {
                "null" => Expr::Null,
                other => Expr::String(other.to_string()),
            })),
            Node::StringLiteral { string } => {
                Ok(Fragment::Value(Expr::String(unescape_string(string))))
            }
            Node::Void => Ok(Fragment::Place(Place::NullReference)),

            Node::KeyValuePair { .. }
            | Node::Program { .. }
            | Node::ClassStatement { .. }
            | Node::EchoStatement { .. }
            | Node::ExpressionStatement { .. }
            | Node::ForeachStatement { .. }
            | Node::FunctionStatement { .. }
            | Node::IfStatement { .. }
            | Node::InlineHtmlStatement { .. }
            | Node::ReturnStatement { .. }
            | Node::MethodDefinition { .. }
            | Node::PropertyDefinition { .. } => {
                Err(CompileError::unsupported(node.kind(), Position::Expression))
            }
        }
    }

    pub fn compile_value(ctx: &mut CompilationContext, node: &Node) -> CompileResult<Expr> {
        Ok(Self::compile(ctx, node, NodeContext::VALUE)?.into_expr())
    }

    /// Compiles `node` as a location; `flags.wants_value` is forced off.
    pub fn compile_place(
        ctx: &mut CompilationContext,
        node: &Node,
        flags: NodeContext,
    ) -> CompileResult<Place> {
        Self::compile(ctx, node, flags.with_value(false))?.into_place(node.kind())
    }

    fn compile_values(ctx: &mut CompilationContext, nodes: &[Node]) -> CompileResult<Vec<Expr>> {
        nodes
            .iter()
            .map(|node| Self::compile_value(ctx, node))
            .collect()
    }

    /// Index and property chains, `$a[i][j]` and `$o->p->q`.
    fn access(
        ctx: &mut CompilationContext,
        base: &Node,
        keys: Vec<Option<&Node>>,
        kind: &'static str,
        flags: NodeContext,
    ) -> CompileResult<Fragment> {
        let Some((&final_key, inner_keys)) = keys.split_last() else {
            return Err(CompileError::unsupported(kind, Position::Expression));
        };

        if flags.is_assignment_target {
            let mut base = match Self::compile(ctx, base, flags.with_value(false))? {
                Fragment::Place(place) => Base::Implied(place),
                Fragment::Value(expr) => Base::Value(expr),
            };
            for &key in inner_keys {
                let key = Self::compile_optional_key(ctx, key)?;
                base = Base::Implied(Place::element(base, key));
            }
            let key = Self::compile_optional_key(ctx, final_key)?;
            return Ok(Fragment::Place(Place::element(base, key)));
        }

        let mut container = Self::compile(ctx, base, flags.with_value(true))?.into_expr();
        for &key in inner_keys {
            let Some(key) = key else {
                return Err(CompileError::unsupported(kind, Position::IndexRead));
            };
            let key = Self::compile_key(ctx, key)?;
            container = Expr::load(Place::element(Base::Value(container), Some(key)));
        }
        if final_key.is_none() && flags.wants_value {
            return Err(CompileError::unsupported(kind, Position::IndexRead));
        }

        let key = Self::compile_optional_key(ctx, final_key)?;
        let place = Place::element(Base::Value(container), key);
        Ok(if flags.wants_value {
            Fragment::Value(Expr::load(place))
        } else {
            Fragment::Place(place)
        })
    }

    fn compile_key(ctx: &mut CompilationContext, key: &Node) -> CompileResult<Expr> {
        Ok(Self::compile(ctx, key, NodeContext::LOCATION)?.into_expr())
    }

    fn compile_optional_key(
        ctx: &mut CompilationContext,
        key: Option<&Node>,
    ) -> CompileResult<Option<Expr>> {
        key.map(|key| Self::compile_key(ctx, key)).transpose()
    }

    /// `left op operand op operand ...`, applied left to right. When the
    /// chain opens with `=`, the left operand is an assignment target.
    fn expression(
        ctx: &mut CompilationContext,
        left: &Node,
        operations: &[Operation],
        flags: NodeContext,
    ) -> CompileResult<Fragment> {
        let Some(first) = operations.first() else {
            return Self::compile(ctx, left, flags);
        };
        let is_assignment = first.operator == "=";

        let mut result = if is_assignment {
            Fragment::Place(Self::compile_place(ctx, left, NodeContext::TARGET)?)
        } else {
            Fragment::Value(Self::compile_value(ctx, left)?)
        };

        for operation in operations {
            let is_reference = is_assignment && operation.operand.is_reference();
            result = match binary_operation(&operation.operator, is_reference)? {
                BinaryOperation::Method(method) => Fragment::Value(Expr::Binary {
                    left: Box::new(result.into_expr()),
                    method,
                    right: Box::new(Self::compile_value(ctx, &operation.operand)?),
                }),
                BinaryOperation::Assign(method) => {
                    let Fragment::Place(target) = result else {
                        return Err(CompileError::InvalidAssignmentTarget {
                            kind: "N_EXPRESSION",
                        });
                    };
                    let source = match method {
                        AssignMethod::SetReference => Source::Reference(Self::compile_place(
                            ctx,
                            &operation.operand,
                            NodeContext::TARGET,
                        )?),
                        AssignMethod::SetValue => {
                            Source::Value(Self::compile_value(ctx, &operation.operand)?)
                        }
                    };
                    Fragment::Value(Expr::Assign {
                        target: Box::new(target),
                        source: Box::new(source),
                    })
                }
            };
        }

        Ok(result)
    }

    fn method_calls(
        ctx: &mut CompilationContext,
        object: &Node,
        calls: &[Call],
    ) -> CompileResult<Fragment> {
        let mut result = Self::compile_value(ctx, object)?;
        for call in calls {
            result = Expr::CallMethod {
                object: Box::new(result),
                method: Box::new(Self::compile_value(ctx, &call.func)?),
                args: Self::compile_values(ctx, &call.args)?,
            };
        }
        Ok(Fragment::Value(result))
    }

    /// Each option tests the result of the previous one.
    fn ternary(
        ctx: &mut CompilationContext,
        condition: &Node,
        options: &[TernaryOption],
    ) -> CompileResult<Fragment> {
        let mut result = Self::compile_value(ctx, condition)?;
        for option in options {
            result = Expr::Conditional {
                condition: Box::new(result),
                consequent: Box::new(Self::compile_value(ctx, &option.consequent)?),
                alternate: Box::new(Self::compile_value(ctx, &option.alternate)?),
            };
        }
        Ok(Fragment::Value(result))
    }
}
