//! Priority ordering for discovered README documents.
//!
//! When the same section appears in several READMEs, the one closest to the
//! repository root should win. Every document gets a numeric rank (lower is
//! more important) from a small table of path rules, and documents are then
//! stably sorted by rank so that equal ranks keep their traversal order.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A path rule: any relative path whose lower-cased form contains `contains`
/// receives `rank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRule {
    pub contains: String,
    pub rank: u8,
}

impl PriorityRule {
    pub fn new<S: ToString>(contains: S, rank: u8) -> PriorityRule {
        PriorityRule {
            contains: contains.to_string(),
            rank,
        }
    }
}

/// Ranking table for README documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityTable {
    /// Rank of the README sitting directly in the repository root
    pub root: u8,
    /// Rules checked in order, first match wins
    pub rules: Vec<PriorityRule>,
    /// Rank for anything no rule matched
    pub fallback: u8,
}

impl Default for PriorityTable {
    fn default() -> Self {
        PriorityTable {
            root: 1,
            rules: vec![
                PriorityRule::new("hardware", 2),
                PriorityRule::new("software", 3),
                PriorityRule::new("examples", 4),
            ],
            fallback: 5,
        }
    }
}

impl PriorityTable {
    /// Rank a path relative to the repository root.
    pub fn rank_of(&self, relative: &Path) -> u8 {
        let is_root_file = relative.components().count() == 1
            && relative
                .to_str()
                .map(|s| s.eq_ignore_ascii_case("README.md"))
                .unwrap_or(false);
        if is_root_file {
            return self.root;
        }

        // match on forward slashes so rules behave the same on every platform
        let lowered = relative.to_string_lossy().replace('\\', "/").to_lowercase();
        self.rules
            .iter()
            .find(|rule| lowered.contains(&rule.contains.to_lowercase()))
            .map(|rule| rule.rank)
            .unwrap_or(self.fallback)
    }
}

/// Stable sort by rank; items with the same rank keep their relative order.
pub fn sort_by_rank<T, F>(items: &mut [T], rank: F)
where
    F: Fn(&T) -> u8,
{
    items.sort_by_key(|item| rank(item));
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn can_rank_default_locations() {
        let table = PriorityTable::default();
        assert_eq!(table.rank_of(Path::new("README.md")), 1);
        assert_eq!(table.rank_of(Path::new("readme.MD")), 1);
        assert_eq!(table.rank_of(Path::new("hardware/README.md")), 2);
        assert_eq!(table.rank_of(Path::new("software/README.md")), 3);
        assert_eq!(table.rank_of(Path::new("software/examples/README.md")), 3);
        assert_eq!(table.rank_of(Path::new("examples/README.md")), 4);
        assert_eq!(table.rank_of(Path::new("docs/README.md")), 5);
    }

    #[test]
    fn rules_are_case_insensitive() {
        let table = PriorityTable::default();
        assert_eq!(table.rank_of(Path::new("Hardware/Rev2/README.md")), 2);
    }

    #[test]
    fn sort_keeps_traversal_order_for_ties() {
        let table = PriorityTable::default();
        let mut paths = vec![
            PathBuf::from("docs/b/README.md"),
            PathBuf::from("software/README.md"),
            PathBuf::from("docs/a/README.md"),
            PathBuf::from("README.md"),
            PathBuf::from("hardware/README.md"),
        ];
        sort_by_rank(&mut paths, |p| table.rank_of(p));

        assert_eq!(
            paths,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("hardware/README.md"),
                PathBuf::from("software/README.md"),
                PathBuf::from("docs/b/README.md"),
                PathBuf::from("docs/a/README.md"),
            ]
        );
    }
}
