use super::{extract, heading_title, Section, SectionKey, SectionRegistry, Synonyms};
use std::path::PathBuf;

/// A README read from the repository. Never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the repository root
    pub path: PathBuf,
    pub contents: String,
    pub rank: u8,
}

impl Document {
    pub fn new<P: Into<PathBuf>, S: ToString>(path: P, contents: S, rank: u8) -> Document {
        Document {
            path: path.into(),
            contents: contents.to_string(),
            rank,
        }
    }

    /// The first top-level (`# `) heading outside of code fences.
    pub fn title(&self) -> Option<String> {
        let mut in_fence = false;
        for line in self.contents.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(title) = heading_title(line, 1) {
                if !title.is_empty() {
                    return Some(title.to_string());
                }
            }
        }
        None
    }

    /// Split into sections and key them. The preamble is stored under `main`;
    /// repeated keys within one document keep their first occurrence.
    pub fn registry(&self, depth: usize, synonyms: &Synonyms) -> SectionRegistry {
        let extracted = extract(&self.contents, depth);
        let mut registry = SectionRegistry::default();

        registry.insert(Section {
            key: SectionKey::main(),
            title: String::new(),
            body: extracted.preamble,
            source: self.path.clone(),
            rank: self.rank,
        });

        for raw in extracted.sections {
            registry.insert(Section {
                key: SectionKey::from_title(&raw.title, synonyms),
                title: super::clean_title(&raw.title),
                body: raw.body,
                source: self.path.clone(),
                rank: self.rank,
            });
        }

        log::debug!(
            "found {} sections in {}",
            registry.len().saturating_sub(1),
            self.path.display()
        );
        registry
    }
}
