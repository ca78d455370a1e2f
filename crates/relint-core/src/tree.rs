//! Generic syntax tree consumed by the walker.
//!
//! The core never parses source text itself. A frontend (such as
//! `relint-syn`) lowers its language-specific AST into this shape, tagging
//! each node with a [`NodeKind`] and a byte [`Span`] into the original
//! text. Nodes the frontend has no tag for are flattened: their children
//! attach to the nearest tagged ancestor.

use crate::types::Span;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tag identifying the shape of a syntax node.
///
/// Deliberately coarse: rules match on the shapes they care about and
/// treat everything else structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NodeKind {
    /// Root of a file.
    Root,
    /// Function item.
    Function,
    /// Brace-delimited block.
    Block,
    /// Expression statement (expression followed by `;`).
    ExprStmt,
    /// `let` binding.
    Let,
    /// Function call expression.
    Call,
    /// Method call expression.
    MethodCall,
    /// Element access expression (`x[...]`).
    Index,
    /// Field access expression (`x.f`).
    FieldAccess,
    /// Path or identifier expression.
    Path,
    /// String literal.
    StrLit,
    /// Integer literal.
    IntLit,
    /// `return` expression.
    Return,
    /// Any other tagged construct.
    Other,
}

/// One node of the generic tree: kind tag, span, ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// Shape tag used for walker dispatch.
    pub kind: NodeKind,
    /// Byte range this node covers in the original text.
    pub span: Span,
    /// Child nodes in source order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Creates a node with children.
    #[must_use]
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// First child, if any.
    #[must_use]
    pub fn first_child(&self) -> Option<&SyntaxNode> {
        self.children.first()
    }

    /// Number of nodes in this subtree, including self.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SyntaxNode::subtree_len).sum::<usize>()
    }
}

/// One parsed source file: path, original text, lowered tree.
///
/// Read-only for the duration of a lint pass; rules and the fix resolver
/// only ever borrow it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the file was loaded from.
    pub path: PathBuf,
    /// Full original text.
    pub text: String,
    /// Root of the lowered tree.
    pub root: SyntaxNode,
}

impl SourceFile {
    /// Creates a source file from its parts.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, root: SyntaxNode) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            root,
        }
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the original text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text a span covers, clamped to the file.
    #[must_use]
    pub fn text_of(&self, span: Span) -> &str {
        let start = span.start.min(self.text.len());
        let end = span.end.min(self.text.len());
        &self.text[start..end]
    }

    /// Resolves a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// Columns count bytes from the start of the line; offsets past the
    /// end of the text resolve to the last position.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let mut line = 1;
        let mut line_start = 0;
        for (i, b) in self.text.bytes().enumerate() {
            if i >= offset {
                break;
            }
            if b == b'\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        (line, offset - line_start + 1)
    }
}
