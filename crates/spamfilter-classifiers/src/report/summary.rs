//! Markdown summary and plain-text metrics files.
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::evaluation::ClassifierEvaluation;

/// Evaluation of one classifier together with the artifacts written for it.
/// Figure and model paths are stored as they should appear in the summary,
/// usually relative to the summary file.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub evaluation: ClassifierEvaluation,
    pub confusion_figure: String,
    /// `None` when no ROC figure was produced.
    pub roc_figure: Option<String>,
    pub model_path: Option<String>,
}

fn format_auc(auc: Option<f64>) -> String {
    match auc {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}

/// Markdown document listing each classifier's scores and figure links.
pub fn render_summary(entries: &[ReportEntry]) -> String {
    let mut out = String::from("# CML Report\n");
    for entry in entries {
        let eval = &entry.evaluation;
        let _ = writeln!(out, "\n## {}\n", eval.display_name);
        let _ = writeln!(out, "- Accuracy: **{:.4}**", eval.accuracy);
        let _ = writeln!(out, "- Precision: {:.4}", eval.precision);
        let _ = writeln!(out, "- Recall: {:.4}", eval.recall);
        let _ = writeln!(out, "- F1: {:.4}", eval.f1);
        let _ = writeln!(out, "- AUC: {}", format_auc(eval.auc()));
        if let Some(model) = &entry.model_path {
            let _ = writeln!(out, "- Model: `{}`", model);
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "[{} Confusion]({})",
            eval.display_name, entry.confusion_figure
        );
        if let Some(roc) = &entry.roc_figure {
            let _ = writeln!(out, "[{} ROC]({})", eval.display_name, roc);
        }
    }
    out
}

/// Fixed-format metrics file, one `[name]` block per classifier.
pub fn render_metrics(entries: &[ReportEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let eval = &entry.evaluation;
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", eval.name);
        let _ = writeln!(out, "Accuracy: {:.4}", eval.accuracy);
        let _ = writeln!(out, "Precision: {:.4}", eval.precision);
        let _ = writeln!(out, "Recall: {:.4}", eval.recall);
        let _ = writeln!(out, "F1: {:.4}", eval.f1);
        let _ = writeln!(out, "AUC: {}", format_auc(eval.auc()));
    }
    out
}

fn write_text(destination: &Path, text: &str, what: &str) -> Result<()> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(destination, text)
        .with_context(|| format!("Failed to write {}: {}", what, destination.display()))?;
    log::info!("Wrote {} to {}", what, destination.display());
    Ok(())
}

/// Write the markdown summary, overwriting `destination`.
pub fn write_summary<P: AsRef<Path>>(entries: &[ReportEntry], destination: P) -> Result<()> {
    write_text(destination.as_ref(), &render_summary(entries), "summary")
}

/// Write the metrics file, overwriting `destination`.
pub fn write_metrics<P: AsRef<Path>>(entries: &[ReportEntry], destination: P) -> Result<()> {
    write_text(destination.as_ref(), &render_metrics(entries), "metrics")
}
