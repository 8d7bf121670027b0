//! Content pages: one heading, then the chosen section (or a fallback).

use super::{examples, resources};
use crate::detection::match_license_text;
use crate::sinks::book::{Book, PageContent, PageSpec};
use crate::source::{heading_title, Document, Project, Section, SectionKey};
use crate::transform::Transformer;
use std::path::Path;

/// Drop the first non-blank line if it's a top-level heading.
pub fn strip_first_heading(text: &str) -> &str {
    let trimmed = text.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    if heading_title(first, 1).is_some() {
        rest.trim_start()
    } else {
        trimmed
    }
}

/// Put `title` above `body`, or above `fallback` if the body is blank.
pub fn assemble(title: &str, body: Option<&str>, fallback: &str) -> String {
    let body = body.map(|b| strip_first_heading(b).trim()).unwrap_or_default();
    let body = if body.is_empty() { fallback } else { body };
    format!("# {title}\n\n{body}\n")
}

fn introduction(project: &Project) -> Option<&Section> {
    project.registry.best(&["introduction"]).or_else(|| {
        project
            .registry
            .get(SectionKey::MAIN)
            .filter(|main| main.source.components().count() == 1 && main.has_content())
    })
}

/// The README at `path`, matched case-insensitively on its relative path.
fn document<'a>(project: &'a Project, path: &Path) -> Option<&'a Document> {
    let normalize = |path: &Path| path.to_string_lossy().replace('\\', "/").to_lowercase();
    let wanted = normalize(path);
    project.documents.iter().find(|doc| normalize(&doc.path) == wanted)
}

fn license(project: &Project, transformer: &Transformer, depth: usize) -> Option<String> {
    if let Some(text) = project.license.as_deref().filter(|t| !t.trim().is_empty()) {
        let mut body = text.trim().to_string();
        if let Some(spdx) = match_license_text(text) {
            body.push_str(&format!(
                "\n\n---\n\n*This project is licensed under the {spdx} license; see the LICENSE file for details.*"
            ));
        }
        return Some(body);
    }

    project
        .registry
        .best(&["license", "licence"])
        .map(|section| transformer.transform(&section.body, depth))
}

/// Render one page of the book.
pub fn render(book: &Book, page: &PageSpec, project: &Project, transformer: &Transformer) -> String {
    let depth = page.depth();
    let title = page.title.as_deref().unwrap_or(&project.title);

    let body = match &page.content {
        PageContent::Introduction => {
            introduction(project).map(|section| transformer.transform(&section.body, depth))
        }
        PageContent::Sections { keys } => project
            .registry
            .best(keys.as_slice())
            .map(|section| transformer.transform(&section.body, depth)),
        PageContent::Document { path, keys } => match project.registry.best(keys.as_slice()) {
            Some(section) => Some(transformer.transform(&section.body, depth)),
            None => document(project, path).map(|doc| transformer.transform(&doc.contents, depth)),
        },
        PageContent::ExampleIndex { keys } => {
            examples::index(book, keys.as_slice(), project, transformer, depth)
        }
        PageContent::CodeSamples { platform } => examples::listings(project, *platform),
        PageContent::License => license(project, transformer, depth),
        PageContent::Resources => Some(resources::render(book, project, &page.fallback, depth)),
    };

    if body.is_none() {
        log::info!("No content for {}, using fallback", page.path.display());
    }
    assemble(title, body.as_deref(), &page.fallback)
}
