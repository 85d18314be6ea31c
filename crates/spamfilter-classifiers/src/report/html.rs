use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// A titled block of an HTML report holding free-form markup and plots.
#[derive(Debug, Clone)]
pub struct ReportSection {
    title: String,
    content: Vec<Markup>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_content(&mut self, markup: Markup) {
        self.content.push(markup);
    }

    /// Embed `plot` inline; the plotly bundle is loaded once by the report.
    pub fn add_plot(&mut self, plot: Plot) {
        let div_id = format!(
            "plot-{}-{}",
            self.title.to_lowercase().replace(' ', "-"),
            self.content.len()
        );
        let inline = plot.to_inline_html(Some(&div_id));
        self.content.push(html! {
            div class="plot" { (PreEscaped(inline)) }
        });
    }

    fn render(&self) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for block in &self.content {
                    (block)
                }
            }
        }
    }
}

/// Single-page HTML report made of sections.
#[derive(Debug, Clone)]
pub struct Report {
    software_name: String,
    version: String,
    logo: Option<String>,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(software_name: &str, version: &str, logo: Option<&str>, title: &str) -> Self {
        Self {
            software_name: software_name.to_string(),
            version: version.to_string(),
            logo: logo.map(str::to_string),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn render(&self) -> Markup {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        "body { font-family: sans-serif; margin: 2em auto; max-width: 1100px; }
                        header { display: flex; align-items: center; gap: 1em; }
                        header img { height: 48px; }
                        section { margin-top: 2em; }
                        table { border-collapse: collapse; }
                        th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: right; }
                        footer { margin-top: 3em; color: #777; font-size: 0.9em; }"
                    }
                }
                body {
                    header {
                        @if let Some(logo) = &self.logo {
                            img src=(logo) alt=(self.software_name);
                        }
                        h1 { (self.title) }
                    }
                    @for section in &self.sections {
                        (section.render())
                    }
                    footer {
                        "Generated by " (self.software_name) " v" (self.version) " on " (generated)
                    }
                }
            }
        }
    }

    /// Render and write the report, overwriting `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render().into_string())
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        log::info!("Report saved to {}", path.display());
        Ok(())
    }
}
