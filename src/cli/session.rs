//! CLI commands that replay session scripts
//!
//! Each handler loads a script, replays it and prints a view of the result.
//! The `render_*` functions build the text so it can be tested without a
//! terminal.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::{LedgerPaths, Settings};
use crate::display::format_summary_table;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_budget, import_from_json, import_from_yaml, ExportFormat};
use crate::services::Budget;
use crate::session::{RunOptions, Session, SessionRunner, SessionScript};

/// Load and replay a script
pub fn load_session(script: &Path, options: RunOptions) -> LedgerResult<Session> {
    let script = SessionScript::load(script)?;
    SessionRunner::new(options).run(&script)
}

/// Rebuild a budget from a JSON or YAML snapshot written by `ledger export`
pub fn load_snapshot(path: &Path) -> LedgerResult<Budget> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        LedgerError::Io(format!("Failed to read snapshot {}: {}", path.display(), e))
    })?;

    let export = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => import_from_json(&text)?,
        _ => import_from_yaml(&text)?,
    };
    export.into_budget()
}

/// Every ledger dump, followed by the spend chart over all categories
pub fn render_budget(budget: &Budget, show_chart: bool) -> LedgerResult<String> {
    let mut sections: Vec<String> = budget.categories().iter().map(ToString::to_string).collect();
    if show_chart && !budget.is_empty() {
        sections.push(budget.spend_chart()?.format_terminal());
    }
    Ok(sections.join("\n\n"))
}

/// Ledger dumps, the optional spend chart and any rejected operations
pub fn render_run(session: &Session, show_chart: bool) -> LedgerResult<String> {
    let mut sections: Vec<String> = session
        .budget
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect();

    if show_chart && !session.budget.is_empty() {
        sections.push(session.spend_chart()?.format_terminal());
    }

    if session.report.rejected_count() > 0 {
        let mut rejected = String::from("Rejected (insufficient funds):");
        for outcome in session.report.rejected() {
            rejected.push_str(&format!("\n  #{} {}", outcome.index + 1, outcome.operation));
        }
        sections.push(rejected);
    }

    Ok(sections.join("\n\n"))
}

/// Handle `ledger run`
pub fn handle_run_command(
    settings: &Settings,
    script: &Path,
    strict: bool,
    no_chart: bool,
) -> LedgerResult<()> {
    let session = load_session(script, RunOptions { strict })?;
    println!("{}", render_run(&session, settings.show_chart && !no_chart)?);
    Ok(())
}

/// Handle `ledger chart`
///
/// With `csv`, prints the per-category shares instead of the drawing.
pub fn handle_chart_command(script: &Path, csv: bool) -> LedgerResult<()> {
    let session = load_session(script, RunOptions::default())?;
    let chart = session.spend_chart()?;
    if csv {
        chart.export_csv(std::io::stdout().lock())?;
    } else {
        println!("{}", chart.format_terminal());
    }
    Ok(())
}

/// Handle `ledger show`
pub fn handle_show_command(settings: &Settings, snapshot: &Path) -> LedgerResult<()> {
    let budget = load_snapshot(snapshot)?;
    println!("{}", render_budget(&budget, settings.show_chart)?);
    Ok(())
}

/// File in the exports directory named after the script, e.g. `exports/june.json`
pub fn exports_dir_target(
    paths: &LedgerPaths,
    script: &Path,
    format: ExportFormat,
) -> LedgerResult<PathBuf> {
    paths.ensure_directories()?;
    let stem = script
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("session");
    Ok(paths
        .exports_dir()
        .join(format!("{}.{}", stem, format.extension())))
}

/// Handle `ledger summary`
pub fn handle_summary_command(script: &Path) -> LedgerResult<()> {
    let session = load_session(script, RunOptions::default())?;
    println!("{}", format_summary_table(&session.budget.summary()));
    Ok(())
}

/// Handle `ledger export`
///
/// Writes to `output` when given, into the exports directory when `paths`
/// is given, otherwise to stdout.
pub fn handle_export_command(
    settings: &Settings,
    script: &Path,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    paths: Option<&LedgerPaths>,
) -> LedgerResult<()> {
    let session = load_session(script, RunOptions::default())?;
    let format = format.unwrap_or(settings.default_export_format);
    let output = match (output, paths) {
        (Some(path), _) => Some(path),
        (None, Some(paths)) => Some(exports_dir_target(paths, script, format)?),
        (None, None) => None,
    };

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        export_budget(&session.budget, format, &mut writer)?;
        println!("Exported {} to: {}", format, path.display());
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        export_budget(&session.budget, format, &mut handle)?;
    }

    Ok(())
}
