//! File loading with fail-closed batch semantics.

use crate::lower::lower_file;
use relint_core::SourceFile;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors loading or parsing source files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or more input files do not exist. Reported before any lint
    /// work begins; a batch with unresolved inputs is never partially
    /// processed.
    #[error("unable to open file(s): {}", format_paths(.0))]
    Missing(Vec<PathBuf>),

    /// IO error reading a file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not parseable Rust.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses one file's text into a lowered [`SourceFile`].
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when the text is not valid Rust.
pub fn parse_source(path: &Path, text: &str) -> Result<SourceFile, LoadError> {
    let ast = syn::parse_file(text).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(lower_file(path, text, &ast))
}

/// Loads and parses a batch of files.
///
/// Checks that every input exists before reading any of them.
///
/// # Errors
///
/// Returns [`LoadError::Missing`] listing every absent input, or the
/// first read/parse failure.
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>, LoadError> {
    let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.exists()).cloned().collect();
    if !missing.is_empty() {
        return Err(LoadError::Missing(missing));
    }

    paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "loading");
            let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
                path: path.clone(),
                source: e,
            })?;
            parse_source(path, &text)
        })
        .collect()
}
