//! # Ember AST
//!
//! Node definitions for the PHP-dialect syntax tree handed to the Ember
//! compiler. Parsing is done elsewhere; this crate only fixes the shape of the
//! tree and how it is read from the parser's JSON output.
//!
//! Every node carries a kind tag (`name`, e.g. `N_PROGRAM`) and kind-specific
//! fields, so a tree serialised by the parser deserialises straight into
//! [`Node`]:
//!
//! ```rust
//! use ember_ast::{Node, from_json};
//!
//! let program = from_json(r#"{
//!     "name": "N_PROGRAM",
//!     "statements": [
//!         {"name": "N_RETURN_STATEMENT", "expression": {"name": "N_INTEGER", "number": 5}}
//!     ]
//! }"#).unwrap();
//!
//! assert!(matches!(program, Node::Program { .. }));
//! ```

pub mod build;
pub mod nodes;

pub use nodes::{Call, Index, Node, Operation, Property, TernaryOption};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AstError {
    #[error("Malformed AST: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AstResult<T> = Result<T, AstError>;

/// Read a syntax tree from the parser's JSON representation.
pub fn from_json(text: &str) -> AstResult<Node> {
    Ok(serde_json::from_str(text)?)
}

/// Read a syntax tree from any JSON reader (files, pipes).
pub fn from_reader<R: std::io::Read>(reader: R) -> AstResult<Node> {
    Ok(serde_json::from_reader(reader)?)
}
