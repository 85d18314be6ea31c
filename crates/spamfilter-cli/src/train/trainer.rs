use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use maud::html;

use spamfilter_classifiers::dataset::{Label, Split};
use spamfilter_classifiers::error::DatasetError;
use spamfilter_classifiers::evaluation::{evaluate, ClassifierEvaluation};
use spamfilter_classifiers::io::{persist, read_corpus_with_config};
use spamfilter_classifiers::models::{build_classifier, TextClassifier};
use spamfilter_classifiers::report::plots::{plot_confusion_matrix, plot_roc_curve};
use spamfilter_classifiers::report::{
    render_confusion, render_roc, write_metrics, write_summary, Report, ReportEntry,
    ReportSection,
};

use crate::train::input::TrainConfig;
use crate::util::relative_to;

pub const SUMMARY_FILE: &str = "cml-report.md";
pub const METRICS_FILE: &str = "metrics.txt";
pub const HTML_REPORT_FILE: &str = "report.html";

/// Run the full pipeline: load, split, clean, then train, evaluate, persist
/// and plot every configured classifier before writing the reports.
pub fn run_training(config: &TrainConfig) -> Result<Vec<ReportEntry>> {
    let start_time = Instant::now();

    let corpus = read_corpus_with_config(&config.data_path, &config.reader)?;
    corpus.log_summary("Full");

    let split = corpus
        .train_test_split(config.test_size, config.seed)?
        .clean(config.min_message_chars);
    for (side, part) in [("train", &split.train), ("test", &split.test)] {
        if part.is_empty() {
            return Err(DatasetError::EmptySplit {
                total: corpus.len(),
                side,
            })
            .context("No messages left after cleaning");
        }
        part.log_summary(side);
    }

    let output_dir = PathBuf::from(&config.output_dir);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let models_dir = output_dir.join(&config.models_dir);

    let mut entries = Vec::with_capacity(config.classifiers.len());
    for model_config in &config.classifiers {
        let mut classifier = build_classifier(model_config);
        log::info!("Training {}", classifier.display_name());

        evaluate(
            &mut classifier,
            &split.train.messages,
            &split.train.labels,
            &split.test.messages,
            &split.test.labels,
        )
        .with_context(|| format!("Failed to evaluate {}", classifier.display_name()))?;
        let evaluation =
            ClassifierEvaluation::compute(&classifier, &split.test.messages, &split.test.labels)?;

        let model_path = models_dir.join(format!("{}_model.json", classifier.name()));
        persist(&classifier, &model_path)?;

        let confusion_path = output_dir.join(format!("{}_confusion.html", classifier.name()));
        render_confusion(
            &split.test.labels,
            &evaluation.predictions,
            &format!("{} - Confusion", classifier.display_name()),
            &confusion_path,
        )?;

        let roc_path = output_dir.join(format!("{}_roc.html", classifier.name()));
        let roc = render_roc(
            &classifier,
            &split.test.messages,
            &split.test.labels,
            &format!("{} - ROC", classifier.display_name()),
            &roc_path,
        )?;

        entries.push(ReportEntry {
            evaluation,
            confusion_figure: relative_to(&confusion_path, &output_dir),
            roc_figure: roc.map(|_| relative_to(&roc_path, &output_dir)),
            model_path: Some(relative_to(&model_path, &output_dir)),
        });
    }

    write_summary(&entries, output_dir.join(SUMMARY_FILE))?;
    write_metrics(&entries, output_dir.join(METRICS_FILE))?;

    if config.html_report {
        write_html_report(config, &split, &entries, &output_dir.join(HTML_REPORT_FILE))?;
    }

    log::info!("Pipeline completed in {:?}", start_time.elapsed());
    Ok(entries)
}

fn write_html_report(
    config: &TrainConfig,
    split: &Split,
    entries: &[ReportEntry],
    path: &Path,
) -> Result<()> {
    let mut report = Report::new(
        "spamfilter",
        &config.version,
        None,
        "Spam Filter Training Report",
    );

    /* Section 1: Dataset */
    {
        let mut dataset_section = ReportSection::new("Dataset");
        let (train_ham, train_spam) = split.train.class_counts();
        let (test_ham, test_spam) = split.test.class_counts();
        dataset_section.add_content(html! {
            p {
                "Messages read from " code { (config.data_path) } ", split with seed "
                (config.seed) " holding out " (format!("{:.0}%", config.test_size * 100.0))
                " for evaluation. Messages of " (config.min_message_chars)
                " or fewer characters were dropped after splitting."
            }
            table {
                tr { th { "" } th { (Label::Ham) } th { (Label::Spam) } th { "total" } }
                tr { td { "train" } td { (train_ham) } td { (train_spam) } td { (split.train.len()) } }
                tr { td { "test" } td { (test_ham) } td { (test_spam) } td { (split.test.len()) } }
            }
        });
        report.add_section(dataset_section);
    }

    /* Section 2: one per classifier */
    for entry in entries {
        let eval = &entry.evaluation;
        let mut section = ReportSection::new(&eval.display_name);
        section.add_content(html! {
            table {
                tr { th { "Accuracy" } th { "Precision" } th { "Recall" } th { "F1" } th { "AUC" } }
                tr {
                    td { (format!("{:.4}", eval.accuracy)) }
                    td { (format!("{:.4}", eval.precision)) }
                    td { (format!("{:.4}", eval.recall)) }
                    td { (format!("{:.4}", eval.f1)) }
                    td {
                        @match eval.auc() {
                            Some(auc) => (format!("{:.4}", auc)),
                            None => "n/a",
                        }
                    }
                }
            }
            @if let Some(model) = &entry.model_path {
                p { "Model: " code { (model) } }
            }
        });
        section.add_plot(plot_confusion_matrix(
            &eval.confusion,
            &format!("{} - Confusion", eval.display_name),
        ));
        if let Some(roc) = &eval.roc {
            section.add_plot(plot_roc_curve(roc, &format!("{} - ROC", eval.display_name)));
        }
        report.add_section(section);
    }

    /* Section 3: Configuration */
    {
        let mut config_section = ReportSection::new("Configuration");
        config_section.add_content(html! {
            style {
                ".code-container {
                    background-color: #f5f5f5;
                    padding: 10px;
                    border-radius: 5px;
                    overflow-x: auto;
                    font-family: monospace;
                    white-space: pre-wrap;
                }"
            }
            div class="code-container" {
                pre {
                    code { (serde_json::to_string_pretty(&config)?) }
                }
            }
        });
        report.add_section(config_section);
    }

    report.save_to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamfilter_classifiers::dataset::Corpus;

    #[test]
    fn configuration_section_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HTML_REPORT_FILE);
        let config = TrainConfig {
            data_path: "x<script>alert(1)</script>.csv".to_string(),
            ..TrainConfig::default()
        };
        let corpus = Corpus::new(
            vec!["free prize now".into(), "see you soon".into()],
            vec![Label::Spam, Label::Ham],
        )
        .unwrap();
        let split = corpus.train_test_split(0.5, 42).unwrap();

        write_html_report(&config, &split, &[], &path).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("x&lt;script&gt;alert(1)&lt;/script&gt;.csv"));
    }
}
