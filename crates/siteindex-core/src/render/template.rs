use regex::Regex;
use siteindex_domain::{ProjectEntry, ProjectStore};

use super::{escape, RenderError};

pub const CATEGORY_TEMPLATE_ID: &str = "category-template";
pub const PROJECT_TEMPLATE_ID: &str = "project-template";
pub const START_MARKER: &str = "PROJECTS:START";
pub const END_MARKER: &str = "PROJECTS:END";
pub const PROJECTS_PLACEHOLDER: &str = "{{projects}}";

const DESCRIPTION_PLACEHOLDER: &str = "{{description}}";

/// Re-renders the marker region of `document` from its own `<template>`
/// fragments. Everything outside the region is returned untouched.
pub fn render_template(document: &str, store: &ProjectStore) -> Result<String, RenderError> {
    let category = Fragment::find(document, CATEGORY_TEMPLATE_ID)?;
    let project = Fragment::find(document, PROJECT_TEMPLATE_ID)?;
    if !category
        .lines
        .iter()
        .any(|line| line.contains(PROJECTS_PLACEHOLDER))
    {
        return Err(RenderError::MissingSlot {
            id: CATEGORY_TEMPLATE_ID,
            placeholder: PROJECTS_PLACEHOLDER,
        });
    }
    let region = MarkerRegion::find(document)?;

    let mut lines = Vec::new();
    for group in store.by_category() {
        let mut project_lines = Vec::new();
        for entry in &group.projects {
            project_lines.extend(project.render_project(group.name, entry));
        }
        lines.extend(category.render_category(group.name, &project_lines));
    }
    Ok(region.splice(document, &lines))
}

/// Dedented body of a `<template>` element, one entry per line.
#[derive(Debug)]
struct Fragment {
    lines: Vec<String>,
}

impl Fragment {
    fn find(document: &str, id: &'static str) -> Result<Self, RenderError> {
        let pattern = format!(
            r#"(?s)<template\b[^>]*?\sid\s*=\s*["']{}["'][^>]*>(.*?)</template>"#,
            regex::escape(id)
        );
        let body = Regex::new(&pattern)
            .ok()
            .and_then(|re| re.captures(document))
            .and_then(|captures| captures.get(1))
            .ok_or(RenderError::MissingTemplate { id })?;
        Ok(Self {
            lines: dedent(body.as_str()),
        })
    }

    fn render_project(&self, category: &str, entry: &ProjectEntry<'_>) -> Vec<String> {
        let description = entry.record.description.as_deref();
        self.lines
            .iter()
            // no description: drop the whole line that would have held it
            .filter(|line| description.is_some() || !line.contains(DESCRIPTION_PLACEHOLDER))
            .map(|line| {
                substitute(line, |key| match key {
                    "category" => Some(escape(category)),
                    "path" => Some(escape(entry.path)),
                    "title" => Some(escape(&entry.record.title)),
                    "description" => description.map(escape),
                    _ => None,
                })
            })
            .collect()
    }

    fn render_category(&self, category: &str, projects: &[String]) -> Vec<String> {
        let mut out = Vec::new();
        for line in &self.lines {
            if line.contains(PROJECTS_PLACEHOLDER) {
                let indent = leading_whitespace(line);
                out.extend(projects.iter().map(|project| indented(indent, project)));
            } else {
                out.push(substitute(line, |key| {
                    (key == "category").then(|| escape(category))
                }));
            }
        }
        out
    }
}

/// Byte offsets of the generated block inside the document.
#[derive(Debug)]
struct MarkerRegion<'a> {
    /// Just past the start marker comment.
    content_start: usize,
    /// Start of the end marker comment.
    content_end: usize,
    indent: &'a str,
    /// Line ending of the start marker's line.
    newline: &'static str,
}

impl<'a> MarkerRegion<'a> {
    fn find(document: &'a str) -> Result<Self, RenderError> {
        let start = marker_pattern(START_MARKER)
            .and_then(|re| re.find(document))
            .ok_or(RenderError::MissingMarkers)?;
        let end = marker_pattern(END_MARKER)
            .and_then(|re| re.find_at(document, start.end()))
            .ok_or(RenderError::MissingMarkers)?;

        let line_start = document[..start.start()]
            .rfind('\n')
            .map_or(0, |idx| idx + 1);
        let prefix = &document[line_start..start.start()];
        let indent = if prefix.trim().is_empty() { prefix } else { "" };

        let after = &document[start.end()..];
        let newline = match after.find('\n') {
            Some(idx) if after[..idx].ends_with('\r') => "\r\n",
            _ => "\n",
        };

        Ok(Self {
            content_start: start.end(),
            content_end: end.start(),
            indent,
            newline,
        })
    }

    fn splice(&self, document: &str, lines: &[String]) -> String {
        let mut out = String::with_capacity(document.len() + lines.len() * 64);
        out.push_str(&document[..self.content_start]);
        out.push_str(self.newline);
        for line in lines {
            out.push_str(&indented(self.indent, line));
            out.push_str(self.newline);
        }
        out.push_str(self.indent);
        out.push_str(&document[self.content_end..]);
        out
    }
}

fn marker_pattern(marker: &str) -> Option<Regex> {
    Regex::new(&format!(r"<!--\s*{}\s*-->", regex::escape(marker))).ok()
}

/// Replaces `{{key}}` tokens via `lookup`; unknown keys are left verbatim.
fn substitute(line: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);
        match lookup(&after[..close]) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn dedent(text: &str) -> Vec<String> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.get(indent..).unwrap_or(line.trim_start()).to_string()
            }
        })
        .collect()
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn indented(indent: &str, line: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{indent}{line}")
    }
}
