//! Operator tables: source tokens to runtime methods

use crate::error::{CompileError, CompileResult, Fix};
use ember_runtime::{AssignMethod, BinaryMethod, UnaryMethod};

/// What a binary operator token compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperation {
    Method(BinaryMethod),
    Assign(AssignMethod),
}

/// Looks up a binary operator. Assignment depends on whether the right-hand
/// operand is bound by reference.
pub fn binary_operation(operator: &str, is_reference: bool) -> CompileResult<BinaryOperation> {
    let method = match operator {
        "+" => BinaryMethod::Add,
        "-" => BinaryMethod::Subtract,
        "*" => BinaryMethod::Multiply,
        "/" => BinaryMethod::Divide,
        "%" => BinaryMethod::Modulo,
        "." => BinaryMethod::Concat,
        "<<" => BinaryMethod::ShiftLeftBy,
        ">>" => BinaryMethod::ShiftRightBy,
        "==" => BinaryMethod::IsEqualTo,
        "!=" => BinaryMethod::IsNotEqualTo,
        "===" => BinaryMethod::IsIdenticalTo,
        "!==" => BinaryMethod::IsNotIdenticalTo,
        "<" => BinaryMethod::IsLessThan,
        "<=" => BinaryMethod::IsLessThanOrEqual,
        ">" => BinaryMethod::IsGreaterThan,
        ">=" => BinaryMethod::IsGreaterThanOrEqual,
        "=" => {
            return Ok(BinaryOperation::Assign(if is_reference {
                AssignMethod::SetReference
            } else {
                AssignMethod::SetValue
            }));
        }
        _ => return Err(unsupported(operator, Fix::Binary)),
    };
    Ok(BinaryOperation::Method(method))
}

pub fn unary_method(operator: &str, prefix: bool) -> CompileResult<UnaryMethod> {
    let method = if prefix {
        match operator {
            "+" => UnaryMethod::ToPositive,
            "-" => UnaryMethod::ToNegative,
            "++" => UnaryMethod::PreIncrement,
            "--" => UnaryMethod::PreDecrement,
            "~" => UnaryMethod::OnesComplement,
            "!" => UnaryMethod::LogicalNot,
            _ => return Err(unsupported(operator, Fix::Prefix)),
        }
    } else {
        match operator {
            "++" => UnaryMethod::PostIncrement,
            "--" => UnaryMethod::PostDecrement,
            _ => return Err(unsupported(operator, Fix::Suffix)),
        }
    };
    Ok(method)
}

fn unsupported(operator: &str, fix: Fix) -> CompileError {
    CompileError::UnsupportedOperator {
        operator: operator.to_string(),
        fix,
    }
}
