use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plotly::common::{ColorScale, ColorScalePalette, DashType, Line, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{HeatMap, Plot, Scatter};

use crate::dataset::Label;
use crate::evaluation::ranking_scores;
use crate::error::MetricsError;
use crate::metrics::{roc_curve, ConfusionMatrix, RocCurve};
use crate::models::TextClassifier;

/// Heatmap of a confusion matrix: rows are actual labels, columns predicted.
pub fn plot_confusion_matrix(confusion: &ConfusionMatrix, title: &str) -> Plot {
    let names: Vec<String> = Label::ALL
        .iter()
        .map(|l| {
            let s = l.to_string();
            s[..1].to_uppercase() + &s[1..]
        })
        .collect();
    let z: Vec<Vec<usize>> = Label::ALL
        .iter()
        .map(|&actual| {
            Label::ALL
                .iter()
                .map(|&predicted| confusion.get(actual, predicted))
                .collect()
        })
        .collect();

    let trace = HeatMap::new(names.clone(), names, z)
        .color_scale(ColorScale::Palette(ColorScalePalette::Blues));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Predicted"))
        .y_axis(Axis::new().title("Actual"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// ROC line with its AUC in the legend and a dashed no-skill diagonal.
pub fn plot_roc_curve(roc: &RocCurve, title: &str) -> Plot {
    let legend = format!("AUC = {:.2}", roc.auc());
    let curve = Scatter::new(roc.fpr.clone(), roc.tpr.clone())
        .mode(Mode::Lines)
        .name(legend.as_str());

    let reference_line = Scatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
        .mode(Mode::Lines)
        .name("No skill")
        .line(Line::new().color("black").dash(DashType::Dash));

    let mut plot = Plot::new();
    plot.add_trace(curve);
    plot.add_trace(reference_line);
    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("False Positive Rate"))
            .y_axis(Axis::new().title("True Positive Rate")),
    );
    plot
}

/// Write `plot` as a standalone HTML figure, overwriting `destination`.
pub fn write_plot<P: AsRef<Path>>(plot: &Plot, destination: P) -> Result<()> {
    let path = destination.as_ref();
    fs::write(path, plot.to_html())
        .with_context(|| format!("Failed to write figure: {}", path.display()))?;
    log::debug!("Wrote figure {}", path.display());
    Ok(())
}

/// Compute the 2x2 confusion matrix of `y_true` vs `y_pred` and render it to
/// `destination`.
pub fn render_confusion<P: AsRef<Path>>(
    y_true: &[Label],
    y_pred: &[Label],
    title: &str,
    destination: P,
) -> Result<ConfusionMatrix> {
    let confusion = ConfusionMatrix::from_labels(y_true, y_pred)?;
    write_plot(&plot_confusion_matrix(&confusion, title), destination)?;
    Ok(confusion)
}

/// Render the ROC curve of a trained classifier on `x_test` / `y_test`.
///
/// Uses the decision margin when the classifier has one and the spam
/// probability otherwise. When neither exists, or the test labels hold a
/// single class, a warning is logged, nothing is written and `Ok(None)` is
/// returned.
pub fn render_roc<C, P>(
    classifier: &C,
    x_test: &[String],
    y_test: &[Label],
    title: &str,
    destination: P,
) -> Result<Option<RocCurve>>
where
    C: TextClassifier + ?Sized,
    P: AsRef<Path>,
{
    let Some((_, scores)) = ranking_scores(classifier, x_test)? else {
        log::warn!(
            "{} exposes neither margins nor probabilities; skipping ROC figure {}",
            classifier.display_name(),
            destination.as_ref().display()
        );
        return Ok(None);
    };

    let roc = match roc_curve(y_test, &scores) {
        Ok(roc) => roc,
        Err(MetricsError::SingleClass) => {
            log::warn!(
                "Test labels hold a single class; skipping ROC figure {}",
                destination.as_ref().display()
            );
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    write_plot(&plot_roc_curve(&roc, title), destination)?;
    Ok(Some(roc))
}
