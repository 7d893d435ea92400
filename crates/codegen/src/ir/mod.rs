//! Executable intermediate representation
//!
//! The compiler lowers the syntax tree into three sorts of node:
//!
//! - [`Stmt`]: executed for effect
//! - [`Expr`]: evaluated to a value
//! - [`Place`]: resolved to a location that can be read, assigned or bound
//!   by reference
//!
//! `Display` renders the tree as a method-call listing (`ember --dump-ir`).

mod display;

pub use display::Listing;

use ember_runtime::{AssignMethod, BinaryMethod, UnaryMethod};
use indexmap::IndexMap;
use std::rc::Rc;

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Declares names in the current scope.
    DefineVariables(Vec<String>),
    /// Copies the call's argument at `index` into a parameter variable.
    BindArgument { name: String, index: usize },
    /// Binds `$this` to the receiving object of a method call.
    BindThis,
    Echo(Expr),
    InlineHtml(String),
    Expression(Expr),
    If {
        condition: Expr,
        consequent: Block,
        alternate: Block,
    },
    Foreach(Box<Foreach>),
    Return(Option<Expr>),
    DefineFunction(Rc<FunctionDefinition>),
    DefineClass(Rc<ClassDefinition>),
    /// Runs the block with a fresh scope pushed, popping it on every exit.
    Scoped(Block),
}

/// A `foreach` loop. `slot` numbers the loop's temporaries (`array_N`,
/// `length_N`, `pointer_N`) within the enclosing function.
#[derive(Debug, Clone, PartialEq)]
pub struct Foreach {
    pub slot: usize,
    pub array: Expr,
    pub key: Option<Place>,
    pub value: Place,
    pub by_reference: bool,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Block,
    /// Number of loop temporaries the body needs.
    pub loop_slots: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition {
    pub name: Expr,
    pub properties: IndexMap<String, Expr>,
    pub methods: IndexMap<String, Rc<FunctionDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ArrayElement>),
    /// The current value at a place.
    Load(Box<Place>),
    Binary {
        left: Box<Expr>,
        method: BinaryMethod,
        right: Box<Expr>,
    },
    Assign {
        target: Box<Place>,
        source: Box<Source>,
    },
    Unary {
        method: UnaryMethod,
        operand: Box<UnaryOperand>,
    },
    Call {
        function: Box<Expr>,
        args: Vec<Expr>,
    },
    CallMethod {
        object: Box<Expr>,
        method: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        class: Box<Expr>,
        args: Vec<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    Value(Expr),
    Pair { key: Expr, value: Expr },
}

/// The right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Value(Expr),
    Reference(Place),
}

impl Source {
    pub fn method(&self) -> AssignMethod {
        match self {
            Source::Value(_) => AssignMethod::SetValue,
            Source::Reference(_) => AssignMethod::SetReference,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOperand {
    Value(Expr),
    Place(Place),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// A variable of the current scope.
    Variable(String),
    /// An array element or object property; `key: None` appends.
    Element {
        base: Box<Base>,
        key: Option<Box<Expr>>,
    },
    /// A detached null slot.
    NullReference,
    List(Vec<Place>),
}

/// The container an element is looked up in.
#[derive(Debug, Clone, PartialEq)]
pub enum Base {
    Value(Expr),
    /// A place whose null value is replaced by an empty array first.
    Implied(Place),
}

impl Expr {
    pub fn load(place: Place) -> Expr {
        Expr::Load(Box::new(place))
    }
}

impl Place {
    pub fn element(base: Base, key: Option<Expr>) -> Place {
        Place::Element {
            base: Box::new(base),
            key: key.map(Box::new),
        }
    }
}
