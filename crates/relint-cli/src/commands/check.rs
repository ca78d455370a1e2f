//! Check command implementation.

use anyhow::{Context, Result};
use relint_core::{fixer, Config, FileReport, LintSession, SourceFile};
use relint_rules::builtin_registry;
use relint_syn::{load_files, scan_switches, SignatureTable};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    fix: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let source = config_resolver::resolve(path, config_path);
    let mut config = match source.path() {
        Some(p) => Config::from_file(p)
            .with_context(|| format!("Failed to load config: {}", p.display()))?,
        None => default_config(),
    };

    if let Some(filter) = rules_filter {
        let keep: HashSet<&str> = filter.split(',').map(str::trim).collect();
        for name in &keep {
            if !config.rules.contains_key(*name) {
                tracing::warn!("Rule not in configuration: {}", name);
            }
        }
        config.rules.retain(|name, _| keep.contains(name.as_str()));
    }

    let inputs = collect_inputs(path)?;
    tracing::info!("Checking {} file(s) with {} rule(s)", inputs.len(), config.rules.len());

    let files = load_files(&inputs)?;

    let registry = builtin_registry();
    let session = LintSession::new(&registry, config);

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let switches = scan_switches(file);
        let types = SignatureTable::from_source(file.path(), &file.text)?;
        reports.push(session.lint_file(file, &switches, Some(&types))?);
    }

    super::output::print(&files, &reports, format)?;

    if fix {
        apply_fix_pass(&files, &reports)?;
    }

    let clean = reports
        .iter()
        .all(|r| r.matches.is_empty() && r.errors.is_empty());
    if !clean {
        std::process::exit(1);
    }

    Ok(())
}

/// With no config file, every built-in rule runs.
fn default_config() -> Config {
    tracing::info!("No configuration found; enabling all built-in rules");
    builtin_registry()
        .names()
        .iter()
        .fold(Config::new(), |c, name| c.with_enabled_rule(*name))
}

/// The files a target resolves to: the file itself, or every `.rs` file
/// under a directory, in sorted order.
fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = path.join("**").join("*.rs");
    let pattern = pattern.to_string_lossy().into_owned();
    let mut inputs = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid search pattern")? {
        inputs.push(entry?);
    }
    inputs.sort();
    Ok(inputs)
}

/// Writes a `<name>.fix.rs` sibling for every file with applicable fixes.
///
/// The original file is never modified.
fn apply_fix_pass(files: &[SourceFile], reports: &[FileReport]) -> Result<()> {
    for (file, report) in files.iter().zip(reports) {
        if !report.matches.iter().any(relint_core::Match::has_fix) {
            continue;
        }

        let patched = fixer::apply_fixes(&file.text, &report.matches);
        if patched.applied == 0 {
            continue;
        }

        let out = file.path().with_extension("fix.rs");
        std::fs::write(&out, &patched.text)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        println!(
            "Applied {} fix(es) to {} -> {}",
            patched.applied,
            file.path().display(),
            out.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_enables_every_builtin() {
        let config = default_config();
        let registry = builtin_registry();
        assert_eq!(config.rules.len(), registry.names().len());
    }

    #[test]
    fn collect_inputs_on_a_file_returns_just_it() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("main.rs");
        fs::write(&source, "fn main() {}\n").unwrap();
        assert_eq!(collect_inputs(&source).unwrap(), vec![source]);
    }

    #[test]
    fn collect_inputs_walks_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("zeta.rs"), "").unwrap();
        fs::write(tmp.path().join("sub/alpha.rs"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let inputs = collect_inputs(tmp.path()).unwrap();
        assert_eq!(
            inputs,
            vec![tmp.path().join("sub/alpha.rs"), tmp.path().join("zeta.rs")]
        );
    }
}
