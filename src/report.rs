use crate::config::Config;
use crate::error::DocumentError;
use crate::output::Output;
use crate::render::{html_escape, PolicyRenderer, ReportSink};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Field that paginated exports wrap their policy list in
const PAGED_LIST_FIELD: &str = "value";

const REPORT_STYLE: &str = r#"<style>
    body { font-family: 'Segoe UI', Tahoma, sans-serif; color: #222; font-size: 13px; }
    h1 {
        color: #B00020;
        border-bottom: 3px solid #B00020;
        padding-bottom: 8px;
        margin-top: 50px;
        font-size: 24px;
        text-transform: uppercase;
        letter-spacing: 1px;
    }
    h2 {
        color: #003366;
        margin-top: 30px;
        margin-bottom: 10px;
        font-size: 18px;
        border-left: 6px solid #0078d4;
        padding: 5px 0 5px 10px;
        background-color: #f4f9ff;
    }
    table {
        border-collapse: collapse;
        width: auto;
        min-width: 50%;
        margin-bottom: 20px;
        border: 1px solid #bbb;
        box-shadow: 2px 2px 5px rgba(0,0,0,0.05);
    }
    th, td { padding: 5px 10px; border: 1px solid #ccc; vertical-align: top; text-align: left; }
    th { background-color: #eaeaea; font-weight: 700; white-space: nowrap; }
    td:first-child { font-weight: 600; color: #444; white-space: nowrap; background-color: #fafafa; }
    td { word-wrap: break-word; max-width: 800px; white-space: pre-wrap; }
    tr:nth-child(even) { background-color: #fcfcfc; }
</style>"#;

/// Counters collected while building a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Folders that produced a category heading
    pub categories: usize,
    /// JSON files that parsed successfully
    pub files: usize,
    /// JSON files left out because they could not be read or parsed
    pub skipped_files: usize,
    /// Policy sections rendered
    pub policies: usize,
    pub output_path: PathBuf,
}

/// A fully assembled report that has not been written yet
#[derive(Debug)]
pub struct BuiltReport {
    pub html: String,
    pub summary: ReportSummary,
}

/// Walks the input folder and assembles the HTML audit report
pub struct ReportBuilder {
    config: Config,
    renderer: PolicyRenderer,
    verbose: bool,
}

impl ReportBuilder {
    pub fn new(config: Config) -> Self {
        let renderer = PolicyRenderer::new(config.ignore_keys.clone());
        ReportBuilder {
            config,
            renderer,
            verbose: false,
        }
    }

    /// Log categories, files and skipped documents while building
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the report and writes it to the configured output path,
    /// creating missing parent directories and replacing any existing file.
    pub fn generate(&self) -> Result<ReportSummary> {
        let output_path = &self.config.output_path;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
            }
        }

        let report = self.build()?;
        fs::write(output_path, report.html.as_bytes())
            .with_context(|| format!("Failed to write report {}", output_path.display()))?;

        Ok(report.summary)
    }

    /// Builds the report in memory without touching the output path
    pub fn build(&self) -> Result<BuiltReport> {
        let root = &self.config.input_root;
        if !root.is_dir() {
            anyhow::bail!("Input folder {} does not exist or is not a directory", root.display());
        }

        let mut summary = ReportSummary {
            output_path: self.config.output_path.clone(),
            ..Default::default()
        };
        let mut sink = ReportSink::new();
        self.write_preamble(&mut sink);

        // Categories are the subfolders; files directly under the root are not reported.
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk input folder {}", root.display()))?;
            if entry.file_type().is_dir() {
                self.process_category(entry.path(), &mut sink, &mut summary)?;
            }
        }

        sink.append("</body></html>");

        Ok(BuiltReport {
            html: sink.finish(),
            summary,
        })
    }

    fn write_preamble(&self, sink: &mut ReportSink) {
        sink.append(format!(
            "<html><head><meta charset=\"utf-8\"><title>{}</title>{}</head><body>",
            html_escape(&self.config.title),
            REPORT_STYLE
        ));
        sink.append(format!(
            "<div style='font-size: 30px; font-weight: bold; margin-bottom: 20px;'>{}</div>",
            html_escape(&self.config.title)
        ));
        sink.append(format!(
            "<p>Source Data: {}</p>",
            html_escape(self.config.input_root.display().to_string())
        ));
    }

    fn process_category(&self, dir: &Path, sink: &mut ReportSink, summary: &mut ReportSummary) -> Result<()> {
        let files = json_files(dir)?;
        if files.is_empty() {
            return Ok(());
        }

        let category = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        if self.verbose {
            Output::category(&category, files.len());
        }

        sink.append(format!("<h1>{}</h1>", html_escape(&category)));
        summary.categories += 1;

        for path in files {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let document = match load_document(&path) {
                Ok(document) => document,
                Err(e) => {
                    if self.verbose {
                        Output::warning(&format!("Skipping {}: {}", e.path().display(), e));
                    }
                    summary.skipped_files += 1;
                    continue;
                }
            };
            summary.files += 1;

            let mut rendered = 0;
            for item in policy_items(&document) {
                if self.renderer.render_policy(item, &file_name, sink) {
                    rendered += 1;
                }
            }
            summary.policies += rendered;

            if self.verbose {
                Output::file_info(&file_name, rendered);
            }
        }

        Ok(())
    }
}

/// Files directly inside `dir` whose name ends in `.json`, sorted by name
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(".json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads and parses one export file. A leading UTF-8 byte-order mark is ignored.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    serde_json::from_str(content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The policy documents held by one parsed file: every element of a top-level
/// list, every element of a paged `value` list, or the object itself.
/// Scalars hold no policies.
pub fn policy_items(document: &Value) -> &[Value] {
    match document {
        Value::Array(items) => items,
        Value::Object(map) => match map.get(PAGED_LIST_FIELD) {
            Some(Value::Array(items)) => items,
            _ => std::slice::from_ref(document),
        },
        _ => &[],
    }
}
