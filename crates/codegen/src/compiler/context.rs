//! Compilation context holding state during IR generation

use indexmap::IndexSet;
use std::collections::HashMap;

/// Per-node flags. Children receive a derived copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeContext {
    /// The node is being assigned to.
    pub is_assignment_target: bool,
    /// The node should produce a value rather than a location.
    pub wants_value: bool,
}

impl NodeContext {
    /// A plain rvalue.
    pub const VALUE: NodeContext = NodeContext {
        is_assignment_target: false,
        wants_value: true,
    };

    /// The left-hand side of an assignment.
    pub const TARGET: NodeContext = NodeContext {
        is_assignment_target: true,
        wants_value: false,
    };

    /// A location read without dereferencing, e.g. to bind by reference.
    pub const LOCATION: NodeContext = NodeContext {
        is_assignment_target: false,
        wants_value: false,
    };

    pub fn with_value(self, wants_value: bool) -> Self {
        Self {
            wants_value,
            ..self
        }
    }

    pub fn with_assignment_target(self, is_assignment_target: bool) -> Self {
        Self {
            is_assignment_target,
            ..self
        }
    }
}

impl Default for NodeContext {
    fn default() -> Self {
        Self::VALUE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Foreach,
}

/// State shared by every node of one function body or program.
#[derive(Debug, Default)]
pub struct CompilationContext {
    pub local_variable_names: IndexSet<String>,
    pub loop_depth: HashMap<LoopKind, usize>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the local set, as parameters do.
    pub fn with_locals<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            local_variable_names: names.into_iter().map(Into::into).collect(),
            loop_depth: HashMap::new(),
        }
    }

    pub fn declare(&mut self, name: &str) {
        if !self.local_variable_names.contains(name) {
            self.local_variable_names.insert(name.to_string());
        }
    }

    /// Allocates the next temporary slot for a loop of `kind`.
    pub fn next_loop_slot(&mut self, kind: LoopKind) -> usize {
        let depth = self.loop_depth.entry(kind).or_insert(0);
        let slot = *depth;
        *depth += 1;
        slot
    }

    pub fn loop_slots(&self, kind: LoopKind) -> usize {
        self.loop_depth.get(&kind).copied().unwrap_or(0)
    }

    pub fn local_names(&self) -> Vec<String> {
        self.local_variable_names.iter().cloned().collect()
    }
}
