//! # relint-syn
//!
//! `syn`-based frontend for the relint engine. The core consumes an
//! already-built generic tree; this crate builds it:
//!
//! - [`parse_source`] / [`load_files`] parse Rust text and lower the AST
//!   into `relint_core::SourceFile` trees with byte-offset spans
//! - [`scan_switches`] scans a parsed file's comment trivia for
//!   `relint:disable` / `relint:enable` suppression directives, with
//!   string-literal spans masked out
//! - [`SignatureTable`] implements the core's `TypeResolver` from a
//!   file's own function signatures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod directives;
mod loader;
mod lower;
mod resolver;

pub use directives::scan_switches;
pub use loader::{load_files, parse_source, LoadError};
pub use lower::lower_file;
pub use resolver::SignatureTable;
