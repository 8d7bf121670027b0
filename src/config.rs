//! `hwdocs.toml` configuration.
//!
//! Every field has a default, so an empty (or missing) file is a valid
//! configuration.

use crate::file_ordering::PriorityTable;
use crate::sinks::{Book, Datasheet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "hwdocs.toml";

/// Complete configuration for an hwdocs project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub sections: SectionsConfig,
    pub transform: TransformConfig,
    pub resources: ResourcesConfig,
    pub book: Book,
    pub datasheet: Datasheet,
}

impl Configuration {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log::info!("{} not found, using defaults", path.display());
            return Ok(Configuration::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string(self).with_context(|| "Failed to serialize configuration")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Used when the root README has no top-level heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link to the source repository shown on the resources page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Repository root; discovered from the working directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub excluded_dirs: Vec<String>,
    pub block_globs: Vec<String>,
    pub priorities: PriorityTable,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            excluded_dirs: [
                ".git",
                "node_modules",
                "__pycache__",
                ".vscode",
                "build",
                "target",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            block_globs: Vec::default(),
            priorities: PriorityTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Number of `#` characters that start a section
    pub heading_depth: usize,
    /// Canonical key -> alternative heading names
    pub synonyms: BTreeMap<String, Vec<String>>,
}

fn synonym_table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(canonical, aliases)| {
            (
                canonical.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for SectionsConfig {
    fn default() -> Self {
        SectionsConfig {
            heading_depth: 2,
            synonyms: synonym_table(&[
                (
                    "features",
                    &["key features", "main features", "technical features"],
                ),
                (
                    "pinout",
                    &[
                        "pin configuration",
                        "pin layout",
                        "pins",
                        "pin description",
                        "pin & connector layout",
                        "pinout diagram",
                    ],
                ),
                (
                    "specifications",
                    &[
                        "specs",
                        "electrical characteristics",
                        "electrical specs",
                        "tech specs",
                        "technical specifications",
                    ],
                ),
                (
                    "dimensions",
                    &[
                        "board dimensions",
                        "mechanical dimensions",
                        "mechanical drawing",
                    ],
                ),
                (
                    "schematic",
                    &["schematics", "schematic diagram", "circuit diagram"],
                ),
                (
                    "components",
                    &["component reference", "parts list", "bill of materials"],
                ),
                ("usage", &["usage examples", "how to use"]),
                ("getting_started", &["quick start", "quickstart"]),
                ("applications", &["typical applications", "use cases"]),
                (
                    "interfaces",
                    &["communication interfaces", "connectivity"],
                ),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Regexes of template boilerplate to delete. A named group `keep` is
    /// put back in place of the match.
    pub template_phrases: Vec<String>,
    pub markdown_image_max_width: String,
    pub html_image_max_width: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        let rule = "=".repeat(40);
        TransformConfig {
            template_phrases: vec![
                r"(?is)This file serves as an input.*?(?P<keep>\n#|\n\n|\z)".to_string(),
                r"(?is)Fill in each section.*?(?P<keep>\n#|\n\n|\z)".to_string(),
                r"(?i)FILL HERE\S*".to_string(),
                format!("(?s){rule}.*?{rule}"),
                r"(?i)Edita los valores\S*".to_string(),
                r"(?i)El formato se mantendrá\S*".to_string(),
            ],
            markdown_image_max_width: "70%".to_string(),
            html_image_max_width: "80%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Where referenced files are looked up, in order, relative to the root
    pub candidate_dirs: Vec<String>,
    pub product_glob: String,
    pub schematic_glob: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        ResourcesConfig {
            candidate_dirs: vec![
                "hardware/resources".to_string(),
                "hardware".to_string(),
                "docs".to_string(),
            ],
            product_glob: "*product*.pdf".to_string(),
            schematic_glob: "*sch*.pdf".to_string(),
        }
    }
}
