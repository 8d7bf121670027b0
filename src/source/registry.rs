//! The section registry: one winning section per normalized key.
//!
//! Each README produces its own registry; registries are merged in document
//! order and a section only replaces an existing one when its source has a
//! strictly better (lower) rank. Because documents arrive sorted by rank and
//! then by a sorted traversal, the merged result never depends on the order
//! the filesystem happens to list directories in.

use super::{normalize_title, Section, SectionKey};
use std::collections::{BTreeMap, HashMap};

/// Maps alternative section names onto a canonical key, so that "Pin Layout"
/// and "Pin Configuration" both land in the `pinout` slot.
#[derive(Debug, Clone, Default)]
pub struct Synonyms {
    aliases: HashMap<String, String>,
}

impl Synonyms {
    /// Build from a `canonical -> [aliases]` table. Both sides are normalized
    /// the same way heading titles are.
    pub fn from_table(table: &BTreeMap<String, Vec<String>>) -> Synonyms {
        let mut aliases = HashMap::new();
        for (canonical, names) in table {
            let canonical = normalize_title(canonical);
            for name in names {
                aliases.insert(normalize_title(name), canonical.clone());
            }
        }
        Synonyms { aliases }
    }

    /// Resolve an already-normalized key.
    pub fn resolve(&self, normalized: String) -> SectionKey {
        match self.aliases.get(&normalized) {
            Some(canonical) => SectionKey::from(canonical.clone()),
            None => SectionKey::from(normalized),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: BTreeMap<SectionKey, Section>,
}

impl SectionRegistry {
    /// Insert `section` unless a section with the same key and an equal or
    /// better rank is already present. Returns whether it was stored.
    pub fn insert(&mut self, section: Section) -> bool {
        match self.sections.get(&section.key) {
            Some(existing) if existing.rank <= section.rank => {
                log::debug!(
                    "kept '{}' from {} over {}",
                    section.key,
                    existing.source.display(),
                    section.source.display()
                );
                false
            }
            Some(existing) => {
                log::debug!(
                    "replaced '{}' from {} with higher priority {}",
                    section.key,
                    existing.source.display(),
                    section.source.display()
                );
                self.sections.insert(section.key.clone(), section);
                true
            }
            None => {
                self.sections.insert(section.key.clone(), section);
                true
            }
        }
    }

    /// Fold another registry into this one using the same priority rule.
    pub fn merge(&mut self, other: SectionRegistry) {
        for section in other.sections.into_values() {
            self.insert(section);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    /// First key in `keys` that has a section with content.
    pub fn best<S: AsRef<str>>(&self, keys: &[S]) -> Option<&Section> {
        keys.iter()
            .filter_map(|key| self.sections.get(key.as_ref()))
            .find(|section| section.has_content())
    }

    /// Sections whose key or body mentions any of `keywords`, in key order.
    pub fn find_by_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<&Section> {
        self.sections
            .values()
            .filter(|section| {
                let body = section.body.to_lowercase();
                keywords.iter().any(|keyword| {
                    let keyword = keyword.as_ref().to_lowercase();
                    section.key.as_str().contains(&keyword) || body.contains(&keyword)
                })
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }
}
