//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is an inventory of the module's API, not a file listing. Each page
//! leads with its positional index, title and kind; the file it lands in is
//! shown after `→`, relative to the output directory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Module MyKit
//! Inputs
//!     001 /project/Sources/MyKit (12 swift files)
//! 34 symbols
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Foo (class) → Models/Foo.md
//! 002 MyKit (home) → Home.md
//! 003 bar (function) → bar.md
//!
//! Generated 3 pages in docs
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::{EmptyHint, RunPlan};
use crate::plan::Target;
use crate::scan::ScanResult;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Display `path` relative to `root` when it lies beneath it.
fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(scan: &ScanResult) -> Vec<String> {
    let mut lines = vec![format!("Module {}", scan.module)];

    lines.push("Inputs".to_string());
    if scan.roots.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, root) in scan.roots.iter().enumerate() {
        lines.push(format!(
            "    {} {} ({})",
            format_index(i + 1),
            root.path.display(),
            plural(root.swift_files, "swift file", "swift files")
        ));
    }

    lines.push(plural(scan.symbols.len(), "symbol", "symbols"));
    lines
}

pub fn print_scan_output(scan: &ScanResult) {
    for line in format_scan_output(scan) {
        println!("{}", line);
    }
}

// ============================================================================
// Plan / Generate
// ============================================================================

/// One line per planned page in route order, then the stylesheet.
pub fn format_plan_lines(run: &RunPlan, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for write in &run.writes {
        let path = relative_display(&write.path, output_root);
        match &write.target {
            Target::Page { route } => {
                position += 1;
                let Some(indexed) = run.index.get(route) else {
                    continue;
                };
                lines.push(format!(
                    "{} {} ({}) \u{2192} {}",
                    format_index(position),
                    indexed.page.title(),
                    indexed.page.kind_label(),
                    path
                ));
            }
            Target::Stylesheet => lines.push(format!("Stylesheet \u{2192} {}", path)),
        }
    }
    lines
}

/// Listing for a dry run: what would be written and where.
pub fn format_check_output(run: &RunPlan, output_root: &Path) -> Vec<String> {
    let mut lines = format_plan_lines(run, output_root);
    lines.push(String::new());
    lines.push(format!(
        "Would generate {} in {}",
        plural(run.index.len(), "page", "pages"),
        output_root.display()
    ));
    lines
}

pub fn print_check_output(run: &RunPlan, output_root: &Path) {
    for line in format_check_output(run, output_root) {
        println!("{}", line);
    }
}

pub fn format_generate_output(run: &RunPlan, output_root: &Path) -> Vec<String> {
    let mut lines = format_plan_lines(run, output_root);
    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        plural(run.index.len(), "page", "pages"),
        output_root.display()
    ));
    lines
}

pub fn print_generate_output(run: &RunPlan, output_root: &Path) {
    for line in format_generate_output(run, output_root) {
        println!("{}", line);
    }
}

/// Explanation for a run that produced no pages.
pub fn format_empty_hint(hint: EmptyHint) -> &'static str {
    match hint {
        EmptyHint::LowerAccessLevel => {
            "No documentation generated: every declaration is below the minimum access level. \
             Try a lower level with --minimum-access-level."
        }
        EmptyHint::NoPublicApi => {
            "No documentation generated: the module declares nothing that can be documented."
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
