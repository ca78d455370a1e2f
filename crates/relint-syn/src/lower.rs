//! Lowering of `syn` ASTs into the core's generic tree.
//!
//! Spans from `proc-macro2` are line/column pairs; a [`LineIndex`] maps
//! them back to byte offsets into the original text so every lowered node
//! carries a byte [`Span`]. Constructs without a [`NodeKind`] tag are
//! flattened: their children attach to the nearest tagged ancestor.

use proc_macro2::LineColumn;
use relint_core::{NodeKind, SourceFile, Span, SyntaxNode};
use std::path::Path;
use syn::spanned::Spanned;
use syn::visit::Visit;

/// Byte offsets of line starts, for span conversion.
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    /// Byte offset of a 1-indexed line / 0-indexed character column pair.
    pub(crate) fn offset(&self, lc: LineColumn, text: &str) -> usize {
        let Some(&line_start) = self.line_starts.get(lc.line.saturating_sub(1)) else {
            return self.text_len;
        };
        // Columns count characters, not bytes.
        text[line_start..]
            .char_indices()
            .nth(lc.column)
            .map_or(self.text_len, |(i, _)| line_start + i)
    }
}

struct Lowerer<'a> {
    text: &'a str,
    index: LineIndex,
    stack: Vec<SyntaxNode>,
}

impl<'a> Lowerer<'a> {
    fn new(text: &'a str) -> Self {
        let root = SyntaxNode::new(NodeKind::Root, Span::new(0, text.len()));
        Self {
            text,
            index: LineIndex::new(text),
            stack: vec![root],
        }
    }

    fn span_of<T: Spanned>(&self, spanned: &T) -> Span {
        let span = spanned.span();
        Span::new(
            self.index.offset(span.start(), self.text),
            self.index.offset(span.end(), self.text),
        )
    }

    fn open(&mut self, kind: NodeKind, span: Span) {
        self.stack.push(SyntaxNode::new(kind, span));
    }

    fn close(&mut self) {
        // The root never closes, so a parent always exists.
        if let Some(node) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(node);
            }
        }
    }

    fn finish(mut self) -> SyntaxNode {
        self.stack.pop().unwrap_or_else(|| {
            SyntaxNode::new(NodeKind::Root, Span::new(0, self.text.len()))
        })
    }

    /// Surfaces string literal tokens inside macro invocations, which
    /// `syn` keeps as raw tokens rather than expressions.
    fn macro_literals(&mut self, tokens: proc_macro2::TokenStream) {
        for tree in tokens {
            match tree {
                proc_macro2::TokenTree::Group(group) => self.macro_literals(group.stream()),
                proc_macro2::TokenTree::Literal(lit) => {
                    let rendered = lit.to_string();
                    let is_string = rendered.starts_with('"')
                        || rendered.starts_with("r\"")
                        || rendered.starts_with("r#")
                        || rendered.starts_with("b\"")
                        || rendered.starts_with("br");
                    if is_string {
                        let span = self.span_of(&lit);
                        self.open(NodeKind::StrLit, span);
                        self.close();
                    }
                }
                _ => {}
            }
        }
    }
}

impl<'ast> Visit<'ast> for Lowerer<'_> {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        let span = self.span_of(node);
        self.open(NodeKind::Function, span);
        syn::visit::visit_item_fn(self, node);
        self.close();
    }

    fn visit_block(&mut self, node: &'ast syn::Block) {
        let span = self.span_of(node);
        self.open(NodeKind::Block, span);
        syn::visit::visit_block(self, node);
        self.close();
    }

    fn visit_stmt(&mut self, node: &'ast syn::Stmt) {
        match node {
            // Expression followed by `;`
            syn::Stmt::Expr(_, Some(_)) => {
                let span = self.span_of(node);
                self.open(NodeKind::ExprStmt, span);
                syn::visit::visit_stmt(self, node);
                self.close();
            }
            syn::Stmt::Local(_) => {
                let span = self.span_of(node);
                self.open(NodeKind::Let, span);
                syn::visit::visit_stmt(self, node);
                self.close();
            }
            _ => syn::visit::visit_stmt(self, node),
        }
    }

    fn visit_expr_call(&mut self, node: &'ast syn::ExprCall) {
        let span = self.span_of(node);
        self.open(NodeKind::Call, span);
        syn::visit::visit_expr_call(self, node);
        self.close();
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        let span = self.span_of(node);
        self.open(NodeKind::MethodCall, span);
        syn::visit::visit_expr_method_call(self, node);
        self.close();
    }

    fn visit_expr_index(&mut self, node: &'ast syn::ExprIndex) {
        let span = self.span_of(node);
        self.open(NodeKind::Index, span);
        syn::visit::visit_expr_index(self, node);
        self.close();
    }

    fn visit_expr_field(&mut self, node: &'ast syn::ExprField) {
        let span = self.span_of(node);
        self.open(NodeKind::FieldAccess, span);
        syn::visit::visit_expr_field(self, node);
        self.close();
    }

    fn visit_expr_path(&mut self, node: &'ast syn::ExprPath) {
        let span = self.span_of(node);
        self.open(NodeKind::Path, span);
        syn::visit::visit_expr_path(self, node);
        self.close();
    }

    fn visit_expr_return(&mut self, node: &'ast syn::ExprReturn) {
        let span = self.span_of(node);
        self.open(NodeKind::Return, span);
        syn::visit::visit_expr_return(self, node);
        self.close();
    }

    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        self.macro_literals(node.tokens.clone());
        syn::visit::visit_macro(self, node);
    }

    fn visit_lit_str(&mut self, node: &'ast syn::LitStr) {
        let span = self.span_of(node);
        self.open(NodeKind::StrLit, span);
        self.close();
    }

    fn visit_lit_int(&mut self, node: &'ast syn::LitInt) {
        let span = self.span_of(node);
        self.open(NodeKind::IntLit, span);
        self.close();
    }
}

/// Lowers an already-parsed file into a [`SourceFile`].
#[must_use]
pub fn lower_file(path: &Path, text: &str, ast: &syn::File) -> SourceFile {
    let mut lowerer = Lowerer::new(text);
    lowerer.visit_file(ast);
    SourceFile::new(path, text, lowerer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(text: &str) -> SourceFile {
        let ast = syn::parse_file(text).expect("test source must parse");
        lower_file(Path::new("test.rs"), text, &ast)
    }

    fn find<'a>(node: &'a SyntaxNode, kind: NodeKind) -> Option<&'a SyntaxNode> {
        if node.kind == kind {
            return Some(node);
        }
        node.children.iter().find_map(|c| find(c, kind))
    }

    #[test]
    fn line_index_maps_columns_to_byte_offsets() {
        let text = "ab\ncdef\ng";
        let index = LineIndex::new(text);
        let lc = |line, column| LineColumn { line, column };
        assert_eq!(index.offset(lc(1, 0), text), 0);
        assert_eq!(index.offset(lc(2, 0), text), 3);
        assert_eq!(index.offset(lc(2, 3), text), 6);
        assert_eq!(index.offset(lc(3, 1), text), 9);
    }

    #[test]
    fn index_expression_lowers_with_exact_spans() {
        let text = "fn f(x: M) { x[\"id\"]; }\n";
        let file = lower(text);

        let index = find(&file.root, NodeKind::Index).expect("index node");
        assert_eq!(file.text_of(index.span), "x[\"id\"]");

        let lit = find(index, NodeKind::StrLit).expect("string literal node");
        assert_eq!(file.text_of(lit.span), "\"id\"");

        let stmt = find(&file.root, NodeKind::ExprStmt).expect("expr statement");
        assert_eq!(file.text_of(stmt.span), "x[\"id\"];");
    }

    #[test]
    fn call_statement_structure() {
        let text = "fn main() { helper(1); }\nfn helper(n: i32) -> i32 { n }\n";
        let file = lower(text);

        let stmt = find(&file.root, NodeKind::ExprStmt).expect("expr statement");
        let call = stmt.first_child().expect("call child");
        assert_eq!(call.kind, NodeKind::Call);
        assert_eq!(file.text_of(call.span), "helper(1)");
        // Callee path is the call's first child.
        let callee = call.first_child().expect("callee");
        assert_eq!(callee.kind, NodeKind::Path);
        assert_eq!(file.text_of(callee.span), "helper");
    }

    #[test]
    fn untagged_constructs_flatten_into_parent() {
        // The `if` expression has no tag; its call child attaches to the
        // enclosing block.
        let text = "fn f() { if cond() { } }\n";
        let file = lower(text);
        let block = find(&file.root, NodeKind::Block).expect("outer block");
        assert!(find(block, NodeKind::Call).is_some());
    }

    #[test]
    fn macro_string_tokens_surface_as_literals() {
        let text = "fn main() {\n    println!(\"template {}\", 1);\n}\n";
        let file = lower(text);
        let lit = find(&file.root, NodeKind::StrLit).expect("macro string literal");
        assert_eq!(file.text_of(lit.span), "\"template {}\"");
    }

    #[test]
    fn let_binding_gets_its_own_node() {
        let text = "fn f() { let value = source[\"key\"]; }\n";
        let file = lower(text);
        let let_node = find(&file.root, NodeKind::Let).expect("let node");
        assert_eq!(file.text_of(let_node.span), "let value = source[\"key\"];");
        assert!(find(let_node, NodeKind::Index).is_some());
    }
}
