use crate::flatten::{flatten, FlatValue};
use crate::key_format::format_key;
use serde_json::Value;

/// Fields checked, in order, for a policy's display name
const NAME_FIELDS: &[&str] = &["displayName", "name", "description"];

pub(crate) fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Append-only sequence of HTML fragments that make up a report
#[derive(Debug, Default)]
pub struct ReportSink {
    fragments: Vec<String>,
}

impl ReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Joins all fragments with newlines
    pub fn finish(self) -> String {
        self.fragments.join("\n")
    }
}

/// Renders single policy documents as a heading plus a Setting/Value table
#[derive(Debug, Clone)]
pub struct PolicyRenderer {
    ignore_keys: Vec<String>,
}

impl PolicyRenderer {
    pub fn new(ignore_keys: Vec<String>) -> Self {
        PolicyRenderer { ignore_keys }
    }

    /// True if the flattened path contains any ignored key as a substring.
    /// `id` therefore also hides paths such as `androidSettings / ...`.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore_keys.iter().any(|key| path.contains(key.as_str()))
    }

    /// Appends the section for `item` to `sink`. Returns false (and appends
    /// nothing) when `item` is not a JSON object.
    pub fn render_policy(&self, item: &Value, file_name: &str, sink: &mut ReportSink) -> bool {
        let Value::Object(map) = item else {
            return false;
        };

        // The first field that is present wins, even when its value is null.
        let name = NAME_FIELDS
            .iter()
            .find_map(|field| map.get(*field))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| file_name.to_string());

        sink.append(format!("<h2>{}</h2>", html_escape(&name)));
        sink.append("<table><thead><tr><th>Setting</th><th>Value</th></tr></thead><tbody>");

        for (path, value) in flatten(item) {
            if self.is_ignored(&path) || path.trim().is_empty() {
                continue;
            }
            sink.append(render_row(&path, &value));
        }

        sink.append("</tbody></table>");
        true
    }
}

fn render_row(path: &str, value: &FlatValue) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td></tr>",
        html_escape(format_key(path)),
        html_escape(value.to_string())
    )
}
