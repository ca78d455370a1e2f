//! Shared output formatting for lint reports.

use anyhow::Result;
use miette::NamedSource;
use relint_core::{FileReport, Match, MatchDiagnostic, SourceFile};
use serde::Serialize;

use crate::OutputFormat;

/// Print lint reports in the specified format.
///
/// `files` and `reports` are parallel: `reports[i]` covers `files[i]`.
pub fn print(files: &[SourceFile], reports: &[FileReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(files, reports),
        OutputFormat::Json => return print_json(files, reports),
        OutputFormat::Compact => print_compact(files, reports),
    }
    Ok(())
}

fn print_text(files: &[SourceFile], reports: &[FileReport]) {
    let mut findings = 0;
    let mut fixable = 0;
    let mut errors = 0;

    for (file, report) in files.iter().zip(reports) {
        for m in &report.matches {
            findings += 1;
            if m.has_fix() {
                fixable += 1;
            }
            let rendered = miette::Report::new(MatchDiagnostic::from(m)).with_source_code(
                NamedSource::new(file.path().display().to_string(), file.text.clone()),
            );
            println!("{rendered:?}");
        }
        for e in &report.errors {
            errors += 1;
            println!("\x1b[31merror\x1b[0m: {e}");
        }
    }

    let summary_color = if findings + errors > 0 {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    println!(
        "{}Found {} problem(s) ({} fixable) in {} file(s)\x1b[0m",
        summary_color,
        findings + errors,
        fixable,
        files.len()
    );
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    matches: Vec<&'a Match>,
    errors: Vec<String>,
}

fn print_json(files: &[SourceFile], reports: &[FileReport]) -> Result<()> {
    let report = JsonReport {
        files_checked: files.len(),
        matches: reports.iter().flat_map(|r| r.matches.iter()).collect(),
        errors: reports
            .iter()
            .flat_map(|r| r.errors.iter().map(ToString::to_string))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(files: &[SourceFile], reports: &[FileReport]) {
    for (file, report) in files.iter().zip(reports) {
        for m in &report.matches {
            let (line, column) = file.line_col(m.span.start);
            println!(
                "{}:{}:{}: [{}] {}",
                m.file.display(),
                line,
                column,
                m.rule_name,
                m.message,
            );
        }
    }
}
