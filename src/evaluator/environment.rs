use super::{ModuleResult, evaluate_module};
use crate::config::Config;
use crate::error::{EvalError, EvalResult};
use ember_ast::Node;
use ember_runtime::{Namespace, NamespaceCollection, Scope, Streams};
use ember_stdlib::{BuiltinRegistry, Internals};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// What outlives a single program: the global scope, the namespaces and the
/// builtins installed into them.
pub struct State {
  global_scope: Rc<Scope>,
  namespaces: NamespaceCollection,
  builtins: BuiltinRegistry,
  builtins_installed: Cell<bool>,
  config: Config,
}

impl State {
  pub fn new(config: Config) -> Self {
    Self::with_builtins(config, BuiltinRegistry::new())
  }

  pub fn with_builtins(config: Config, builtins: BuiltinRegistry) -> Self {
    Self {
      global_scope: Rc::new(Scope::new()),
      namespaces: NamespaceCollection::new(),
      builtins,
      builtins_installed: Cell::new(false),
      config,
    }
  }

  pub fn global_scope(&self) -> &Rc<Scope> {
    &self.global_scope
  }

  pub fn namespaces(&self) -> &NamespaceCollection {
    &self.namespaces
  }

  /// The namespace programs declare into.
  pub fn root_namespace(&self) -> Rc<Namespace> {
    self.namespaces.get(&self.config.root_namespace)
  }

  pub fn builtins(&self) -> &BuiltinRegistry {
    &self.builtins
  }

  /// Installs the builtins into the root namespace on first use. Later
  /// programs keep whatever earlier ones declared over them.
  pub fn install_builtins(&self, streams: &Streams) {
    if self.builtins_installed.replace(true) {
      return;
    }
    debug!(namespace = %self.config.root_namespace, "installing builtins");
    self
      .builtins
      .install(&self.root_namespace(), &Internals::from_streams(streams));
  }

  pub fn config(&self) -> &Config {
    &self.config
  }
}

impl Default for State {
  fn default() -> Self {
    Self::new(Config::default())
  }
}

/// A [`State`] plus the streams its programs talk to. Evaluating several
/// programs in one environment shares globals, functions and classes.
pub struct Environment {
  state: State,
  streams: Streams,
}

impl Environment {
  pub fn new(state: State, streams: Streams) -> Self {
    Self { state, streams }
  }

  /// An environment bound to the process's stdin, stdout and stderr.
  pub fn with_stdio(config: Config) -> Self {
    Self::new(State::new(config), Streams::stdio())
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn streams(&self) -> &Streams {
    &self.streams
  }

  pub fn evaluate(&self, program: &Node) -> EvalResult<ModuleResult> {
    if !matches!(program, Node::Program { .. }) {
      return Err(EvalError::NotAProgram(program.kind()));
    }
    let compiled = ember_codegen::compile(program)?;
    Ok(evaluate_module(&self.state, &compiled, &self.streams)?)
  }

  /// Loads the parser's JSON output and evaluates it.
  pub fn evaluate_json(&self, json: &str) -> EvalResult<ModuleResult> {
    let program = ember_ast::from_json(json)?;
    self.evaluate(&program)
  }
}
