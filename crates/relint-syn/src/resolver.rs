//! A file-local type-resolution context.
//!
//! Real type information needs a full compiler; for the common case of
//! calls to free functions declared in the same file, the declared return
//! types are enough. [`SignatureTable`] collects them and answers the
//! core's [`TypeResolver`] queries; unknown callees resolve to `None`,
//! which semantic rules treat as "do not report".

use quote::ToTokens;
use relint_core::TypeResolver;
use std::collections::HashMap;
use std::path::Path;
use syn::ReturnType;

/// Return types of a file's free functions, keyed by function name.
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    returns: HashMap<String, String>,
}

impl SignatureTable {
    /// Creates an empty table that resolves nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects signatures from a parsed file.
    #[must_use]
    pub fn from_file(ast: &syn::File) -> Self {
        let mut table = Self::new();
        for item in &ast.items {
            if let syn::Item::Fn(item_fn) = item {
                let name = item_fn.sig.ident.to_string();
                let rendered = render_return_type(&item_fn.sig.output);
                table.returns.insert(name, rendered);
            }
        }
        table
    }

    /// Parses source text and collects its signatures.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoadError::Parse`] when the text is not valid
    /// Rust.
    pub fn from_source(path: &Path, text: &str) -> Result<Self, crate::LoadError> {
        let ast = syn::parse_file(text).map_err(|e| crate::LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_file(&ast))
    }

    /// Records one signature by hand, for embedders and tests.
    pub fn insert(&mut self, name: impl Into<String>, return_type: impl Into<String>) {
        self.returns.insert(name.into(), return_type.into());
    }
}

impl TypeResolver for SignatureTable {
    fn return_type_of(&self, callee: &str) -> Option<String> {
        self.returns.get(callee).cloned()
    }
}

/// Renders a return type as whitespace-free token text; no annotation
/// renders as the unit type.
fn render_return_type(output: &ReturnType) -> String {
    match output {
        ReturnType::Default => "()".to_string(),
        ReturnType::Type(_, ty) => ty.to_token_stream().to_string().replace(' ', ""),
    }
}
