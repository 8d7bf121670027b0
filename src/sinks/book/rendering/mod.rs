//! mdBook rendering orchestration.
//!
//! Every configured page is rendered and written under `<outdir>/src`, followed
//! by `SUMMARY.md`. A page that fails to write is recorded in the report and
//! the remaining pages are still written. Referenced images and PDFs are then
//! copied next to the pages and `extraction_report.json` is saved in the book
//! directory.

mod examples;
mod pages;
mod resources;
mod summary;

use super::config::Book;
use crate::copier::copy_resources;
use crate::report::ExtractionReport;
use crate::source::{references, Project};
use crate::transform::Transformer;
use anyhow::{Context, Result};
use indicatif::ProgressBar;

impl Book {
    pub fn render(
        &self,
        project: &Project,
        transformer: &Transformer,
        progress: &ProgressBar,
    ) -> Result<ExtractionReport> {
        let book_dir = project.root.join(&self.outdir);
        let src = self.src_dir(&project.root);
        std::fs::create_dir_all(&src)
            .with_context(|| format!("Failed to create output directory {}", src.display()))?;

        let mut report = ExtractionReport::default();
        progress.set_length(self.pages.len() as u64 + 1);

        for page in &self.pages {
            let label = page.path.to_string_lossy().replace('\\', "/");
            progress.set_message(label.clone());
            let contents = pages::render(self, page, project, transformer);
            report.write_file(&src.join(&page.path), &label, &contents);
            progress.inc(1);
        }

        progress.set_message("SUMMARY.md");
        let summary = summary::render(&self.pages, &project.title);
        report.write_file(&src.join("SUMMARY.md"), "SUMMARY.md", &summary);
        progress.inc(1);

        let mut referenced: Vec<String> = Vec::new();
        for document in &project.documents {
            for name in references(&document.contents) {
                if !referenced.contains(&name) {
                    referenced.push(name);
                }
            }
        }
        progress.set_message("Copying resources...");
        let stats = copy_resources(&project.root, &project.resources, &referenced, &src);
        report.resources_copied = stats.files;

        report
            .save(&book_dir.join("extraction_report.json"))
            .with_context(|| "Failed to save extraction report")?;
        progress.finish_with_message("Book written");

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use crate::config::Configuration;
    use crate::report::ExtractionReport;
    use crate::source::{heading_title, Project};
    use crate::transform::Transformer;
    use indicatif::ProgressBar;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, path: &str, contents: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("can create dirs");
        fs::write(path, contents).expect("can write file");
    }

    fn render(root: &Path) -> ExtractionReport {
        let config = Configuration::default();
        let project = Project::discover(&config, root, &[]).expect("can discover project");
        let transformer = Transformer::new(&config.transform).expect("can build transformer");
        config
            .book
            .render(&project, &transformer, &ProgressBar::hidden())
            .expect("can render book")
    }

    fn page(root: &Path, path: &str) -> String {
        fs::read_to_string(root.join("software/book/src").join(path)).expect("page was written")
    }

    #[test]
    fn can_render_example_repository() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "README.md", "# Widget\n\n## Introduction\nHello.\n");
        write(
            root,
            "hardware/README.md",
            "## Pinout\n| Pin | Desc |\n|---|---|\n| 1 | VCC |\n",
        );

        let report = render(root);
        assert!(report.is_success());
        assert_eq!(report.files_created.len(), 13);

        assert_eq!(page(root, "introduction.md"), "# Widget\n\nHello.\n");
        let pinout = page(root, "hardware/pinout.md");
        assert!(pinout.starts_with("# Pinout\n\n| Pin | Desc |\n"));
        assert!(pinout.contains("| 1 | VCC |"));

        let summary = page(root, "SUMMARY.md");
        assert!(summary.contains("[Widget](./introduction.md)"));
        assert!(root.join("software/book/extraction_report.json").is_file());
    }

    #[test]
    fn empty_repository_gets_every_page_with_fallbacks() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        let report = render(root);
        assert!(report.is_success());

        let book = Configuration::default().book;
        for spec in &book.pages {
            let contents = page(root, &spec.path.to_string_lossy());
            assert!(
                contents.contains(&spec.fallback),
                "{} is missing its fallback",
                spec.path.display()
            );
        }
        assert!(page(root, "hardware/pinout.md").contains("No pinout information available."));
        assert_eq!(report.resources_copied, 0);
    }

    #[test]
    fn pages_have_a_single_top_level_heading() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(
            root,
            "README.md",
            "<!-- template -->\n# Widget\n\nLead.\n\n## Overview\n# Overview\n\nBoard.\n",
        );
        render(root);

        for path in ["introduction.md", "hardware/overview.md"] {
            let contents = page(root, path);
            let headings = contents
                .lines()
                .filter(|line| heading_title(line, 1).is_some())
                .count();
            assert_eq!(headings, 1, "{path}: {contents}");
        }
    }

    #[test]
    fn readme_content_fills_overview_and_getting_started() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(
            root,
            "hardware/README.md",
            "# Widget Hardware\n\nThe board carries an ESP32 and a USB-C port.\n\n## Features\n- Wi-Fi\n\n## Pinout\n| Pin | Desc |\n|---|---|\n| 1 | VCC |\n",
        );
        write(
            root,
            "software/README.md",
            "# Software\n\nFlash the firmware with esptool, then open a REPL.\n\n## Requirements\n- Python 3\n",
        );
        render(root);

        let overview = page(root, "hardware/overview.md");
        assert!(overview.starts_with("# Hardware Overview\n\nThe board carries an ESP32"));
        assert!(!overview.contains("# Widget Hardware"));
        assert!(!overview.contains("No hardware documentation found."));

        let getting_started = page(root, "software/getting-started.md");
        assert!(getting_started.starts_with("# Getting Started\n\nFlash the firmware with esptool"));
        assert!(getting_started.contains("- Python 3"));
    }

    #[test]
    fn named_sections_take_precedence_over_readme_content() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "README.md", "# Widget\n\n## Usage\nPlug it in.\n");
        write(root, "software/README.md", "# Software\n\nWhole readme.\n");
        render(root);

        let getting_started = page(root, "software/getting-started.md");
        assert!(getting_started.contains("Plug it in."));
        assert!(!getting_started.contains("Whole readme."));
    }

    #[test]
    fn synonyms_produce_one_pinout_page() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "hardware/README.md", "## Pin Layout\nfrom hardware\n");
        write(root, "software/README.md", "## Pin Configuration\nfrom software\n");
        render(root);

        let pinout = page(root, "hardware/pinout.md");
        assert!(pinout.contains("from hardware"));
        assert!(!pinout.contains("from software"));
        assert!(!root.join("software/book/src/hardware/pin_layout.md").exists());
    }

    #[test]
    fn can_render_code_samples_and_resources() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "README.md", "# Widget\n\n![Top](hardware/resources/unit_top.png)\n");
        write(root, "hardware/resources/unit_top.png", "png");
        write(root, "hardware/unit_product_widget.pdf", "%PDF");
        write(root, "hardware/unit_sch_widget.pdf", "%PDF");
        write(root, "software/examples/c/blink/blink.ino", "void setup() {}\nvoid loop() {}\n");
        write(root, "software/examples/micropython/main.py", "print('hi')\n");

        let report = render(root);
        assert_eq!(report.resources_copied, 3);

        let intro = page(root, "introduction.md");
        assert!(intro.contains(r#"<img src="resources/unit_top.png""#));
        assert!(root.join("software/book/src/resources/unit_top.png").is_file());

        let arduino = page(root, "software/examples/arduino.md");
        assert!(arduino.contains("## blink: blink.ino"));
        assert!(arduino.contains("```cpp\nvoid setup() {}\nvoid loop() {}\n```"));

        let examples = page(root, "software/examples.md");
        assert!(examples.contains("## MicroPython Examples"));
        assert!(examples.contains("(../software/examples/micropython.md)"));

        let resources = page(root, "resources.md");
        assert!(resources.contains("[Download Product Datasheet](resources/unit_product_widget.pdf)"));
        assert!(resources.contains("[Schematic Diagram](resources/unit_sch_widget.pdf)"));
        assert!(!resources.contains("Product datasheet not found"));
    }
}
