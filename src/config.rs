use ember_runtime::host::DEFAULT_MAX_CALL_DEPTH;
use ember_runtime::namespace::ROOT_NAMESPACE;

/// Evaluation settings shared by every program run in one [`crate::State`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Maximum nesting of user function and method calls
  pub max_call_depth: usize,
  /// Namespace that builtins and top-level declarations land in
  pub root_namespace: String,
}

impl Config {
  pub fn new() -> Self {
    Config {
      max_call_depth: DEFAULT_MAX_CALL_DEPTH,
      root_namespace: ROOT_NAMESPACE.to_string(),
    }
  }

  /// A configuration for untrusted input: shallow recursion only.
  pub fn sandboxed() -> Self {
    Config {
      max_call_depth: 64,
      ..Self::new()
    }
  }

  pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
    self.max_call_depth = max_call_depth;
    self
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}
