mod section;
pub use section::*;

mod registry;
pub use registry::*;

mod document;
pub use document::*;

mod scanner;
pub use scanner::*;

mod code_sample;
pub use code_sample::*;

mod resources;
pub use resources::*;

use crate::config::Configuration;
use crate::detection;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything we know about a hardware repository before rendering it
pub struct Project {
    /// Repository root on disk
    pub root: PathBuf,
    /// Root README heading, else the configured title, else the directory name
    pub title: String,
    /// README documents in priority order
    pub documents: Vec<Document>,
    /// Merged sections of every document
    pub registry: SectionRegistry,
    /// Contents of the LICENSE file, if there is one
    pub license: Option<String>,
    pub code_samples: Vec<CodeSample>,
    pub resources: ResourceIndex,
    /// Official product datasheet PDF
    pub product_pdf: Option<PathBuf>,
    pub schematic_pdf: Option<PathBuf>,
    pub repository_url: Option<String>,
}

impl Project {
    /// Scan `root` and merge everything it documents. `extra_excluded` names
    /// directories to skip on top of the configured ones (e.g. the output).
    pub fn discover(
        config: &Configuration,
        root: &Path,
        extra_excluded: &[String],
    ) -> Result<Project> {
        let mut builder = ScannerBuilder::default();
        builder
            .root(root)
            .priorities(config.scan.priorities.clone());
        for dir in config.scan.excluded_dirs.iter().chain(extra_excluded) {
            builder.exclude(dir.as_str());
        }
        builder.blocked(block_set(config.scan.block_globs.as_slice())?);
        let scanner = builder
            .build()
            .with_context(|| format!("Failed to scan {}", root.display()))?;

        let documents = scanner.documents();
        let synonyms = Synonyms::from_table(&config.sections.synonyms);
        let mut registry = SectionRegistry::default();
        for document in &documents {
            registry.merge(document.registry(config.sections.heading_depth, &synonyms));
        }
        log::info!("Merged {} section(s)", registry.len());

        let title = documents
            .iter()
            .find(|doc| doc.path.components().count() == 1)
            .and_then(Document::title)
            .or_else(|| config.project.title.clone())
            .or_else(|| detection::detect_title(root))
            .unwrap_or_else(|| "Hardware Module".to_string());

        let license = detection::find_license_file(root).and_then(|path| {
            std::fs::read_to_string(&path)
                .map_err(|e| log::warn!("Could not read {}: {e}", path.display()))
                .ok()
        });

        let resources = ResourceIndex::new(root, &config.resources.candidate_dirs);
        let product_pdf = resources.find_matching(&config.resources.product_glob)?;
        let schematic_pdf = resources.find_matching(&config.resources.schematic_glob)?;

        Ok(Project {
            root: root.to_path_buf(),
            title,
            documents,
            registry,
            license,
            code_samples: code_sample::discover(root),
            resources,
            product_pdf,
            schematic_pdf,
            repository_url: config
                .project
                .repository_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        })
    }

    /// The README sitting in the repository root
    pub fn root_document(&self) -> Option<&Document> {
        self.documents
            .iter()
            .find(|doc| doc.path.components().count() == 1)
    }

    pub fn samples_for(&self, platform: Platform) -> impl Iterator<Item = &CodeSample> {
        self.code_samples
            .iter()
            .filter(move |sample| sample.platform == platform)
    }
}
