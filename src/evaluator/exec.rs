//! IR interpreter

use super::function::UserFunction;
use ember_codegen::ir::{
  ArrayElement, Base, ClassDefinition, Expr, Foreach, Place, Source, Stmt, UnaryOperand,
};
use ember_runtime::{
  ArrayValue, Class, Element, Host, Key, KeyValuePair, List, Location, RuntimeResult, Scope,
  Value,
};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// How a statement finished.
#[derive(Debug)]
pub enum Flow {
  Normal,
  Return(Value),
}

/// Temporaries of one running foreach loop.
#[derive(Debug)]
struct LoopState {
  array: Rc<RefCell<ArrayValue>>,
  length: usize,
  pointer: usize,
}

/// Per-invocation state: the call's arguments, its receiver, and one
/// slot per foreach loop in the body.
#[derive(Debug, Default)]
pub struct Frame {
  arguments: Vec<Value>,
  this: Option<Value>,
  loops: SmallVec<[Option<LoopState>; 4]>,
}

impl Frame {
  pub fn new(loop_slots: usize, arguments: Vec<Value>, this: Option<Value>) -> Self {
    let mut loops = SmallVec::with_capacity(loop_slots);
    loops.resize_with(loop_slots, || None);
    Self {
      arguments,
      this,
      loops,
    }
  }

  fn loop_state(&mut self, slot: usize) -> &mut Option<LoopState> {
    if slot >= self.loops.len() {
      self.loops.resize_with(slot + 1, || None);
    }
    &mut self.loops[slot]
  }
}

pub struct Executor<'h> {
  host: &'h Host,
}

impl<'h> Executor<'h> {
  pub fn new(host: &'h Host) -> Self {
    Self { host }
  }

  pub fn exec_block(&self, statements: &[Stmt], frame: &mut Frame) -> RuntimeResult<Flow> {
    for stmt in statements {
      if let Flow::Return(value) = self.exec_stmt(stmt, frame)? {
        return Ok(Flow::Return(value));
      }
    }
    Ok(Flow::Normal)
  }

  fn exec_stmt(&self, stmt: &Stmt, frame: &mut Frame) -> RuntimeResult<Flow> {
    match stmt {
      Stmt::DefineVariables(names) => {
        self.host.current_scope()?.define_variables(names);
      }

      Stmt::BindArgument { name, index } => {
        let argument = frame.arguments.get(*index).cloned().unwrap_or_default();
        self
          .host
          .current_scope()?
          .define_variable(name)
          .set_value(argument);
      }

      Stmt::BindThis => {
        let this = frame.this.clone().unwrap_or_default();
        self
          .host
          .current_scope()?
          .define_variable("this")
          .set_value(this);
      }

      Stmt::Echo(expr) => {
        let text = self.eval_expr(expr, frame)?.coerce_to_string();
        self.host.streams().stdout.write(&text)?;
      }

      Stmt::InlineHtml(html) => {
        self.host.streams().stdout.write(html)?;
      }

      Stmt::Expression(expr) => {
        self.eval_expr(expr, frame)?;
      }

      Stmt::If {
        condition,
        consequent,
        alternate,
      } => {
        let branch = if self.eval_expr(condition, frame)?.coerce_to_boolean() {
          consequent
        } else {
          alternate
        };
        return self.exec_block(branch, frame);
      }

      Stmt::Foreach(foreach) => return self.exec_foreach(foreach, frame),

      Stmt::Return(expr) => {
        let value = match expr {
          Some(expr) => self.eval_expr(expr, frame)?,
          None => Value::Null,
        };
        // The caller gets its own copy of a returned array.
        return Ok(Flow::Return(value.copied()));
      }

      Stmt::DefineFunction(definition) => {
        let function = UserFunction::new(definition.clone());
        self
          .host
          .namespace()
          .define_function(&definition.name, Rc::new(function));
      }

      Stmt::DefineClass(definition) => {
        let class = self.build_class(definition, frame)?;
        self.host.namespace().define_class(class);
      }

      Stmt::Scoped(body) => {
        let _scope = self.host.scope_chain().push(Rc::new(Scope::new()));
        return self.exec_block(body, frame);
      }
    }

    Ok(Flow::Normal)
  }

  fn exec_foreach(&self, foreach: &Foreach, frame: &mut Frame) -> RuntimeResult<Flow> {
    let Value::Array(source) = self.eval_expr(&foreach.array, frame)? else {
      warn!("Invalid argument supplied for foreach()");
      return Ok(Flow::Normal);
    };

    // By-value loops walk a snapshot; by-reference loops the array itself.
    source.borrow_mut().reset();
    let array = if foreach.by_reference {
      source
    } else {
      Rc::new(RefCell::new(source.borrow().copied()))
    };
    let length = array.borrow().len();

    *frame.loop_state(foreach.slot) = Some(LoopState {
      array,
      length,
      pointer: 0,
    });

    let flow = self.run_foreach(foreach, frame);
    *frame.loop_state(foreach.slot) = None;
    flow
  }

  fn run_foreach(&self, foreach: &Foreach, frame: &mut Frame) -> RuntimeResult<Flow> {
    loop {
      let Some((array, position)) = frame.loop_state(foreach.slot).as_mut().and_then(|state| {
        if state.pointer >= state.length {
          return None;
        }
        let position = state.pointer;
        state.pointer += 1;
        Some((state.array.clone(), position))
      }) else {
        return Ok(Flow::Normal);
      };

      let (key, element) = {
        let mut array = array.borrow_mut();
        match (array.key_at(position), array.element_at(position)) {
          (Some(key), Some(element)) => {
            array.advance();
            (key, element)
          }
          _ => return Ok(Flow::Normal),
        }
      };

      if let Some(key_place) = &foreach.key {
        self.eval_place(key_place, frame)?.set_value(key.to_value())?;
      }
      let value_location = self.eval_place(&foreach.value, frame)?;
      if foreach.by_reference {
        value_location.set_reference(element)?;
      } else {
        value_location.set_value(element.get())?;
      }

      if let Flow::Return(value) = self.exec_block(&foreach.body, frame)? {
        return Ok(Flow::Return(value));
      }
    }
  }

  fn build_class(&self, definition: &ClassDefinition, frame: &mut Frame) -> RuntimeResult<Class> {
    let name = self.eval_expr(&definition.name, frame)?.coerce_to_string();
    let mut class = Class::new(name);
    for (property, default) in &definition.properties {
      let default = self.eval_expr(default, frame)?;
      class.define_property(property.clone(), default);
    }
    for (method_name, method) in &definition.methods {
      class.define_method(method_name, Rc::new(UserFunction::new(method.clone())));
    }
    Ok(class)
  }

  pub fn eval_expr(&self, expr: &Expr, frame: &mut Frame) -> RuntimeResult<Value> {
    match expr {
      Expr::Null => Ok(Value::Null),
      Expr::Boolean(b) => Ok(Value::Boolean(*b)),
      Expr::Integer(n) => Ok(Value::Integer(*n)),
      Expr::Float(f) => Ok(Value::Float(*f)),
      Expr::String(s) => Ok(Value::String(s.clone())),

      Expr::Array(elements) => {
        let mut entries = Vec::with_capacity(elements.len());
        for element in elements {
          entries.push(match element {
            ArrayElement::Value(value) => {
              ember_runtime::ArrayElement::Value(self.eval_expr(value, frame)?)
            }
            ArrayElement::Pair { key, value } => {
              let key = self.eval_expr(key, frame)?;
              let value = self.eval_expr(value, frame)?;
              ember_runtime::ArrayElement::Pair(KeyValuePair::new(key, value))
            }
          });
        }
        Ok(Value::new_array(ArrayValue::from_elements(entries)?))
      }

      Expr::Load(place) => self.eval_place(place, frame)?.get_value(),

      Expr::Binary {
        left,
        method,
        right,
      } => {
        let left = self.eval_expr(left, frame)?;
        let right = self.eval_expr(right, frame)?;
        left.apply_binary(*method, &right)
      }

      Expr::Assign { target, source } => {
        let target = self.eval_place(target, frame)?;
        match source.as_ref() {
          Source::Value(value) => {
            let value = self.eval_expr(value, frame)?;
            target.set_value(value)
          }
          Source::Reference(place) => {
            let reference = self.eval_place(place, frame)?.get_reference()?;
            target.set_reference(reference)
          }
        }
      }

      Expr::Unary { method, operand } => match operand.as_ref() {
        UnaryOperand::Value(value) => self.eval_expr(value, frame)?.apply_unary(*method),
        UnaryOperand::Place(place) => self.eval_place(place, frame)?.apply_unary(*method),
      },

      Expr::Call { function, args } => {
        let name = self.eval_expr(function, frame)?.coerce_to_string();
        let function = self.host.namespace().get_function(&name)?;
        let args = self.eval_args(args, frame)?;
        function.call(self.host, None, args)
      }

      Expr::CallMethod {
        object,
        method,
        args,
      } => {
        let object = self.eval_expr(object, frame)?;
        let method = self.eval_expr(method, frame)?.coerce_to_string();
        let args = self.eval_args(args, frame)?;
        self.host.call_method(&object, &method, args)
      }

      Expr::New { class, args } => {
        let class = self.eval_expr(class, frame)?.coerce_to_string();
        let args = self.eval_args(args, frame)?;
        self.host.instantiate(&class, args)
      }

      Expr::Conditional {
        condition,
        consequent,
        alternate,
      } => {
        if self.eval_expr(condition, frame)?.coerce_to_boolean() {
          self.eval_expr(consequent, frame)
        } else {
          self.eval_expr(alternate, frame)
        }
      }
    }
  }

  fn eval_args(&self, args: &[Expr], frame: &mut Frame) -> RuntimeResult<Vec<Value>> {
    args.iter().map(|arg| self.eval_expr(arg, frame)).collect()
  }

  pub fn eval_place(&self, place: &Place, frame: &mut Frame) -> RuntimeResult<Location> {
    match place {
      Place::Variable(name) => Ok(Location::Variable(
        self.host.current_scope()?.get_variable(name),
      )),

      Place::Element { base, key } => {
        let container = match base.as_ref() {
          Base::Value(expr) => self.eval_expr(expr, frame)?,
          Base::Implied(place) => self.eval_place(place, frame)?.imply_array()?,
        };
        let key = match key {
          Some(key) => Some(Key::from_value(&self.eval_expr(key, frame)?)?),
          None => None,
        };
        Ok(Location::Element(Element::new(container, key)))
      }

      Place::NullReference => Ok(Location::null_reference()),

      Place::List(elements) => {
        let locations = elements
          .iter()
          .map(|element| self.eval_place(element, frame))
          .collect::<RuntimeResult<Vec<_>>>()?;
        Ok(Location::List(List::new(locations)))
      }
    }
  }
}
