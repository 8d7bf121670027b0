//! Splitting markdown documents into titled sections.
//!
//! A section starts at a heading of the configured depth (`##` by default) and
//! runs until the next heading of that depth or the end of the file. Deeper
//! headings stay inside their parent's body, and nothing inside a fenced code
//! block is ever treated as a heading. Text before the first heading is kept
//! as the document's preamble under the `main` key.

use derive_builder::Builder;
use std::borrow::Borrow;
use std::fmt;
use std::path::PathBuf;

use super::Synonyms;

/// Normalized registry key of a section (e.g. `"pinout"`, `"getting_started"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionKey(String);

impl SectionKey {
    pub const MAIN: &'static str = "main";

    /// Build a key from a heading title, resolving synonyms.
    pub fn from_title(title: &str, synonyms: &Synonyms) -> SectionKey {
        synonyms.resolve(normalize_title(title))
    }

    pub fn main() -> SectionKey {
        SectionKey(SectionKey::MAIN.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for SectionKey {
    fn from(key: String) -> Self {
        SectionKey(key)
    }
}

impl From<&str> for SectionKey {
    fn from(key: &str) -> Self {
        SectionKey(key.to_string())
    }
}

impl Borrow<str> for SectionKey {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A titled block of markdown, tagged with the document it came from.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct Section {
    pub key: SectionKey,
    /// Heading text with emoji removed, original case
    #[builder(default)]
    pub title: String,
    #[builder(default)]
    pub body: String,
    /// Source document, relative to the repository root
    pub source: PathBuf,
    pub rank: u8,
}

impl Section {
    /// Blank bodies count as "no content"
    pub fn has_content(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// A heading-delimited chunk of a document before it is keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub title: String,
    pub body: String,
}

/// The result of splitting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub preamble: String,
    pub sections: Vec<RawSection>,
}

/// Split `text` on headings of exactly `depth` `#` characters.
pub fn extract(text: &str, depth: usize) -> ExtractedDocument {
    let mut preamble: Vec<&str> = Vec::new();
    let mut sections: Vec<RawSection> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut fence: Option<&'static str> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
        } else if trimmed.starts_with("```") {
            fence = Some("```");
        } else if trimmed.starts_with("~~~") {
            fence = Some("~~~");
        } else if let Some(title) = heading_title(line, depth) {
            if let Some((title, lines)) = current.take() {
                sections.push(RawSection {
                    title,
                    body: lines.join("\n").trim().to_string(),
                });
            }
            current = Some((title.to_string(), Vec::new()));
            continue;
        }

        match current.as_mut() {
            Some((_, lines)) => lines.push(line),
            None => preamble.push(line),
        }
    }

    if let Some((title, lines)) = current {
        sections.push(RawSection {
            title,
            body: lines.join("\n").trim().to_string(),
        });
    }

    ExtractedDocument {
        preamble: preamble.join("\n").trim().to_string(),
        sections,
    }
}

/// If `line` is a heading of exactly `depth`, return its title text.
pub fn heading_title(line: &str, depth: usize) -> Option<&str> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes != depth {
        return None;
    }

    let rest = &trimmed[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    // closing hashes are optional in ATX headings
    Some(rest.trim().trim_end_matches('#').trim_end())
}

fn is_symbol(c: char) -> bool {
    matches!(c,
        '\u{1F000}'..='\u{1F9FF}'
        | '\u{2600}'..='\u{26FF}'
        | '\u{2700}'..='\u{27BF}'
        | '\u{FE0F}'
        | '\u{200D}')
}

/// Remove emoji and symbol characters, collapse whitespace.
///
/// Returns the input unchanged (trimmed) if nothing would be left.
pub fn clean_title(title: &str) -> String {
    let cleaned: String = title.chars().filter(|&c| !is_symbol(c)).collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        title.trim().to_string()
    } else {
        cleaned
    }
}

/// Lower-cased, underscore-separated form of a heading title.
pub fn normalize_title(title: &str) -> String {
    clean_title(title).to_lowercase().replace([' ', '-'], "_")
}
