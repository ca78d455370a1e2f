//! Single-pass depth-first tree traversal with per-node-kind dispatch.
//!
//! A [`Walker`] maps [`NodeKind`] tags to handler functions. Nodes without
//! a registered handler get the default behavior: descend into children.
//! A registered handler runs instead of the default and decides via
//! [`Flow`] whether the walker continues into the subtree or skips it,
//! treating the node as atomic.
//!
//! Traversal is synchronous and single-threaded. Handlers record findings
//! in the shared state `S` and never mutate the tree.

use crate::tree::{NodeKind, SyntaxNode};
use std::collections::HashMap;

/// What the walker does with a node's subtree after its handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue depth-first into the node's children.
    Descend,
    /// Advance past the entire subtree without firing child handlers.
    Skip,
}

/// Handler invoked for every node of a registered kind, pre-order.
///
/// Receives the walker itself so it can traverse selected children
/// manually; returning [`Flow::Skip`] afterwards prevents the default
/// descent from visiting them a second time.
pub type Handler<S> = fn(&mut S, &Walker<S>, &SyntaxNode) -> Flow;

/// Depth-first, pre-order tree walker with per-kind handlers.
pub struct Walker<S> {
    handlers: HashMap<NodeKind, Handler<S>>,
}

impl<S> Default for Walker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Walker<S> {
    /// Creates a walker with no handlers; every node gets default descent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for a node kind, replacing any previous one.
    #[must_use]
    pub fn on(mut self, kind: NodeKind, handler: Handler<S>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Walks `node` and its subtree, dispatching per node kind.
    pub fn walk(&self, state: &mut S, node: &SyntaxNode) {
        let flow = match self.handlers.get(&node.kind) {
            Some(handler) => handler(state, self, node),
            None => Flow::Descend,
        };
        match flow {
            Flow::Descend => self.walk_children(state, node),
            Flow::Skip => {}
        }
    }

    /// Walks each child of `node` in source order.
    ///
    /// Handlers that traversed children themselves must return
    /// [`Flow::Skip`] to avoid revisiting them.
    pub fn walk_children(&self, state: &mut S, node: &SyntaxNode) {
        for child in &node.children {
            self.walk(state, child);
        }
    }
}
