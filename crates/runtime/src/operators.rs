//! Operations a compiled program can apply to values and locations.
//!
//! Each variant carries the runtime method name it is known by, which is
//! what compiled code and IR listings refer to.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryMethod {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
    ShiftLeftBy,
    ShiftRightBy,
    IsEqualTo,
    IsNotEqualTo,
    IsIdenticalTo,
    IsNotIdenticalTo,
    IsLessThan,
    IsLessThanOrEqual,
    IsGreaterThan,
    IsGreaterThanOrEqual,
}

impl BinaryMethod {
    pub fn name(self) -> &'static str {
        match self {
            BinaryMethod::Add => "add",
            BinaryMethod::Subtract => "subtract",
            BinaryMethod::Multiply => "multiply",
            BinaryMethod::Divide => "divide",
            BinaryMethod::Modulo => "modulo",
            BinaryMethod::Concat => "concat",
            BinaryMethod::ShiftLeftBy => "shiftLeftBy",
            BinaryMethod::ShiftRightBy => "shiftRightBy",
            BinaryMethod::IsEqualTo => "isEqualTo",
            BinaryMethod::IsNotEqualTo => "isNotEqualTo",
            BinaryMethod::IsIdenticalTo => "isIdenticalTo",
            BinaryMethod::IsNotIdenticalTo => "isNotIdenticalTo",
            BinaryMethod::IsLessThan => "isLessThan",
            BinaryMethod::IsLessThanOrEqual => "isLessThanOrEqual",
            BinaryMethod::IsGreaterThan => "isGreaterThan",
            BinaryMethod::IsGreaterThanOrEqual => "isGreaterThanOrEqual",
        }
    }

    /// The source operator, used in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryMethod::Add => "+",
            BinaryMethod::Subtract => "-",
            BinaryMethod::Multiply => "*",
            BinaryMethod::Divide => "/",
            BinaryMethod::Modulo => "%",
            BinaryMethod::Concat => ".",
            BinaryMethod::ShiftLeftBy => "<<",
            BinaryMethod::ShiftRightBy => ">>",
            BinaryMethod::IsEqualTo => "==",
            BinaryMethod::IsNotEqualTo => "!=",
            BinaryMethod::IsIdenticalTo => "===",
            BinaryMethod::IsNotIdenticalTo => "!==",
            BinaryMethod::IsLessThan => "<",
            BinaryMethod::IsLessThanOrEqual => "<=",
            BinaryMethod::IsGreaterThan => ">",
            BinaryMethod::IsGreaterThanOrEqual => ">=",
        }
    }
}

/// How an assignment stores into its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignMethod {
    SetValue,
    SetReference,
}

impl AssignMethod {
    pub fn name(self) -> &'static str {
        match self {
            AssignMethod::SetValue => "setValue",
            AssignMethod::SetReference => "setReference",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryMethod {
    ToPositive,
    ToNegative,
    OnesComplement,
    LogicalNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryMethod {
    pub fn name(self) -> &'static str {
        match self {
            UnaryMethod::ToPositive => "toPositive",
            UnaryMethod::ToNegative => "toNegative",
            UnaryMethod::OnesComplement => "onesComplement",
            UnaryMethod::LogicalNot => "logicalNot",
            UnaryMethod::PreIncrement => "preIncrement",
            UnaryMethod::PreDecrement => "preDecrement",
            UnaryMethod::PostIncrement => "postIncrement",
            UnaryMethod::PostDecrement => "postDecrement",
        }
    }

    /// Increments and decrements write back, so they operate on a location.
    pub fn needs_location(self) -> bool {
        matches!(
            self,
            UnaryMethod::PreIncrement
                | UnaryMethod::PreDecrement
                | UnaryMethod::PostIncrement
                | UnaryMethod::PostDecrement
        )
    }
}

impl fmt::Display for BinaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for AssignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for UnaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
