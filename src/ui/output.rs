use crate::build::BuildReport;
use crate::ui::{summary_table, theme, Icons};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `SPARKDB_QUIET=1` (or `true`) suppresses success output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("SPARKDB_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{}{}", theme().prefix(Icons::CHECK), label.style(theme().success.clone()));
}

/// Warnings go to stdout and are never silenced
pub fn warn(label: &str) {
    println!("{}{}", theme().prefix(Icons::WARN), label.style(theme().warn.clone()));
}

pub fn warn_invalid_source(source: &Path) {
    warn(&invalid_source_message(source));
}

fn invalid_source_message(source: &Path) -> String {
    format!("Warning: {} is not a valid file or directory.", source.display())
}

/// Confirmation line plus the summary table
pub fn summary(report: &BuildReport) {
    success(&format!("Database created at {}", report.output.display()));
    if is_quiet() {
        return;
    }
    let table = summary_table(report);
    println!("{}{}", theme().prefix(Icons::DATABASE), report.output.display().style(theme().dim.clone()));
    println!("{}", table);
}
