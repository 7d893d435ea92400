//! Method-call listing of the IR

use super::{ArrayElement, Base, ClassDefinition, Expr, Foreach, FunctionDefinition, Place, Source, Stmt, UnaryOperand};
use std::fmt;

const INDENT: &str = "    ";

/// Displays a statement sequence, one statement per line.
pub struct Listing<'a>(pub &'a [Stmt]);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer { f, depth: 0 };
        self.0.iter().try_for_each(|stmt| printer.stmt(stmt))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { f, depth: 0 }.stmt(self)
    }
}

struct Printer<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    depth: usize,
}

impl Printer<'_, '_> {
    fn line(&mut self, text: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.f.write_str(INDENT)?;
        }
        self.f.write_fmt(text)?;
        self.f.write_str("\n")
    }

    fn block(&mut self, statements: &[Stmt]) -> fmt::Result {
        self.depth += 1;
        let result = statements.iter().try_for_each(|stmt| self.stmt(stmt));
        self.depth -= 1;
        result
    }

    fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::DefineVariables(names) => {
                let quoted: Vec<String> = names.iter().map(|name| format!("{:?}", name)).collect();
                self.line(format_args!(
                    "scope.defineVariables([{}]);",
                    quoted.join(", ")
                ))
            }
            Stmt::BindArgument { name, index } => {
                self.line(format_args!("${}.setValue(arguments[{}]);", name, index))
            }
            Stmt::BindThis => self.line(format_args!("$this.setValue(this);")),
            Stmt::Echo(expr) => self.line(format_args!("stdout.write({}.coerceToString());", expr)),
            Stmt::InlineHtml(html) => self.line(format_args!("stdout.write({:?});", html)),
            Stmt::Expression(expr) => self.line(format_args!("{};", expr)),
            Stmt::If {
                condition,
                consequent,
                alternate,
            } => {
                self.line(format_args!("if ({}.coerceToBoolean()) {{", condition))?;
                self.block(consequent)?;
                self.line(format_args!("}} else {{"))?;
                self.block(alternate)?;
                self.line(format_args!("}}"))
            }
            Stmt::Foreach(foreach) => self.foreach(foreach),
            Stmt::Return(Some(expr)) => self.line(format_args!("return {};", expr)),
            Stmt::Return(None) => self.line(format_args!("return;")),
            Stmt::DefineFunction(function) => {
                self.line(format_args!(
                    "namespace.defineFunction({:?}, function ({}) {{",
                    function.name,
                    parameter_list(function)
                ))?;
                self.block(&function.body)?;
                self.line(format_args!("}});"))
            }
            Stmt::DefineClass(class) => self.class(class),
            Stmt::Scoped(body) => {
                self.line(format_args!("try {{"))?;
                self.depth += 1;
                self.line(format_args!("scopeChain.push(new Scope());"))?;
                self.depth -= 1;
                self.block(body)?;
                self.line(format_args!("}} finally {{"))?;
                self.depth += 1;
                self.line(format_args!("scopeChain.pop();"))?;
                self.depth -= 1;
                self.line(format_args!("}}"))
            }
        }
    }

    fn foreach(&mut self, foreach: &Foreach) -> fmt::Result {
        let n = foreach.slot;
        self.line(format_args!("array_{n} = {}.reset();", foreach.array))?;
        self.line(format_args!("length_{n} = array_{n}.getLength();"))?;
        self.line(format_args!("pointer_{n} = 0;"))?;
        self.line(format_args!("while (pointer_{n} < length_{n}) {{"))?;
        self.depth += 1;
        if let Some(key) = &foreach.key {
            self.line(format_args!(
                "{}.setValue(array_{n}.getKeyByIndex(pointer_{n}));",
                key
            ))?;
        }
        if foreach.by_reference {
            self.line(format_args!(
                "{}.setReference(array_{n}.getElementByIndex(pointer_{n}).getReference());",
                foreach.value
            ))?;
        } else {
            self.line(format_args!(
                "{}.setValue(array_{n}.getElementByIndex(pointer_{n}).getValue());",
                foreach.value
            ))?;
        }
        self.line(format_args!("pointer_{n}++;"))?;
        self.depth -= 1;
        self.block(&foreach.body)?;
        self.line(format_args!("}}"))
    }

    fn class(&mut self, class: &ClassDefinition) -> fmt::Result {
        self.line(format_args!("namespace.defineClass({}, {{", class.name))?;
        self.depth += 1;
        self.line(format_args!("properties: {{"))?;
        self.depth += 1;
        for (name, default) in &class.properties {
            self.line(format_args!("{:?}: {},", name, default))?;
        }
        self.depth -= 1;
        self.line(format_args!("}},"))?;
        self.line(format_args!("methods: {{"))?;
        self.depth += 1;
        for (name, method) in &class.methods {
            self.line(format_args!(
                "{:?}: function ({}) {{",
                name,
                parameter_list(method)
            ))?;
            self.block(&method.body)?;
            self.line(format_args!("}},"))?;
        }
        self.depth -= 1;
        self.line(format_args!("}},"))?;
        self.depth -= 1;
        self.line(format_args!("}});"))
    }
}

fn parameter_list(function: &FunctionDefinition) -> String {
    function
        .parameters
        .iter()
        .map(|name| format!("${}", name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Null => f.write_str("null"),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::Float(x) => write!(f, "{:?}", x),
            Expr::String(s) => write!(f, "{:?}", s),
            Expr::Array(elements) => write!(f, "[{}]", join(elements)),
            Expr::Load(place) => write!(f, "{}.getValue()", place),
            Expr::Binary {
                left,
                method,
                right,
            } => write!(f, "{}.{}({})", left, method, right),
            Expr::Assign { target, source } => match source.as_ref() {
                Source::Value(value) => write!(f, "{}.setValue({})", target, value),
                Source::Reference(place) => {
                    write!(f, "{}.setReference({}.getReference())", target, place)
                }
            },
            Expr::Unary { method, operand } => match operand.as_ref() {
                UnaryOperand::Value(value) => write!(f, "{}.{}()", value, method),
                UnaryOperand::Place(place) => write!(f, "{}.{}()", place, method),
            },
            Expr::Call { function, args } => {
                write!(f, "namespace.getFunction({})({})", function, join(args))
            }
            Expr::CallMethod {
                object,
                method,
                args,
            } => write!(f, "{}.callMethod({}, [{}])", object, method, join(args)),
            Expr::New { class, args } => write!(f, "createInstance({}, [{}])", class, join(args)),
            Expr::Conditional {
                condition,
                consequent,
                alternate,
            } => write!(
                f,
                "({}.coerceToBoolean() ? {} : {})",
                condition, consequent, alternate
            ),
        }
    }
}

impl fmt::Display for ArrayElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayElement::Value(value) => write!(f, "{}", value),
            ArrayElement::Pair { key, value } => write!(f, "{} => {}", key, value),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Variable(name) => write!(f, "${}", name),
            Place::Element { base, key: Some(key) } => {
                write!(f, "{}.getElementByKey({})", base, key)
            }
            Place::Element { base, key: None } => write!(f, "{}.pushElement()", base),
            Place::NullReference => f.write_str("nullReference"),
            Place::List(elements) => write!(f, "list({})", join(elements)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Value(value) => write!(f, "{}", value),
            Base::Implied(place) => write!(f, "implyArray({})", place),
        }
    }
}
