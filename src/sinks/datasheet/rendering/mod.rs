mod images;
mod product_code;
mod specs;
mod tables;
mod template;

use super::config::Datasheet;
use crate::report::ExtractionReport;
use crate::source::Project;
use crate::transform::Transformer;
use anyhow::{Context, Result};
use images::ImageSet;
use indicatif::ProgressBar;

impl Datasheet {
    fn page(&self, project: &Project, transformer: &Transformer) -> template::Page {
        let registry = &project.registry;

        let title = project
            .root_document()
            .and_then(|doc| doc.title())
            .filter(|title| title.chars().count() > 3)
            .unwrap_or_else(|| project.title.clone());

        let section_text = registry
            .iter()
            .map(|section| section.body.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let product_code = match &self.product_code {
            Some(code) => code.clone(),
            None => product_code::detect(&title, &self.subtitle, &section_text),
        };

        let mut tables = Vec::new();
        for section in registry.iter() {
            for table in tables::parse_tables(&transformer.clean(&section.body)) {
                let kind = tables::classify(section.key.as_str(), &table);
                let heading = match section.title.as_str() {
                    "" => "Technical Information".to_string(),
                    title => title.to_string(),
                };
                tables.push((heading, tables::to_html(&table, kind)));
            }
        }

        let readmes = project
            .documents
            .iter()
            .map(|doc| doc.contents.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let images = ImageSet::discover(&readmes, &project.root.join("hardware/resources"))
            .iter()
            .map(|(role, name)| {
                (
                    role,
                    images::image_source(name, &project.resources, self.embed_images),
                )
            })
            .collect();

        template::Page {
            title,
            subtitle: self.subtitle.clone(),
            version: self.version.clone(),
            description: specs::description(registry).unwrap_or_else(|| self.description.clone()),
            product_code,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            introduction: specs::introduction(registry),
            specs: specs::electrical_specs(registry),
            features: specs::features(registry),
            applications: specs::applications(registry),
            tables,
            images,
        }
    }

    pub fn render(
        &self,
        project: &Project,
        transformer: &Transformer,
        progress: &ProgressBar,
    ) -> Result<ExtractionReport> {
        let outfile = project.root.join(&self.outfile);
        let outdir = match outfile.parent() {
            Some(parent) => parent.to_path_buf(),
            None => project.root.clone(),
        };
        std::fs::create_dir_all(&outdir)
            .with_context(|| format!("Failed to create output directory {}", outdir.display()))?;

        let mut report = ExtractionReport::default();
        progress.set_length(2);

        progress.set_message("Collecting datasheet content...");
        let page = self.page(project, transformer);
        progress.inc(1);

        let label = self.outfile.to_string_lossy().replace('\\', "/");
        progress.set_message(label.clone());
        report.write_file(&outfile, &label, &page.to_html());
        progress.inc(1);

        report
            .save(&outdir.join("extraction_report.json"))
            .with_context(|| "Failed to save extraction report")?;
        progress.finish_with_message("Datasheet written");

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use crate::config::Configuration;
    use crate::report::ExtractionReport;
    use crate::source::Project;
    use crate::transform::Transformer;
    use indicatif::ProgressBar;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, path: &str, contents: &[u8]) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("can create dirs");
        fs::write(path, contents).expect("can write file");
    }

    fn render(root: &Path, config: &Configuration) -> ExtractionReport {
        let project = Project::discover(config, root, &[]).expect("can discover project");
        let transformer = Transformer::new(&config.transform).expect("can build transformer");
        config
            .datasheet
            .render(&project, &transformer, &ProgressBar::hidden())
            .expect("can render datasheet")
    }

    fn datasheet(root: &Path) -> String {
        fs::read_to_string(root.join("software/documentation/build/datasheet.html"))
            .expect("datasheet was written")
    }

    #[test]
    fn can_render_datasheet() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(
            root,
            "README.md",
            b"# UE0099 Light Sensor\n\n## Introduction\nThe light sensor measures ambient light for small projects.\n\n## Features\n- **Interface**: I2C\n",
        );
        write(
            root,
            "hardware/README.md",
            b"## Pinout\n<!-- fill in -->\n| Pin | Name | Description |\n|---|---|---|\n| 1 | VCC | Power |\n| 2 | GND | Ground |\n| 3 | SDA | Data |\n",
        );
        write(root, "hardware/resources/unit_top.png", b"png");

        let report = render(root, &Configuration::default());
        assert!(report.is_success());
        assert_eq!(
            report.files_created,
            vec!["software/documentation/build/datasheet.html".to_string()]
        );
        assert!(root
            .join("software/documentation/build/extraction_report.json")
            .is_file());

        let html = datasheet(root);
        assert!(html.contains("<h1 class=\"product-title\">UE0099 Light Sensor</h1>"));
        assert!(html.contains("<div class=\"product-code\">UE0099</div>"));
        assert!(html.contains("The light sensor measures ambient light for small projects."));
        assert!(html.contains("professional-table pinout-table"));
        assert!(html.contains("<tr><td>VCC</td><td>Power</td></tr>"));
        assert!(!html.contains("fill in"));
        assert!(html.contains("<span class=\"spec-name\">Interface</span><span>I2C</span>"));
        assert!(html.contains("data:image/png;base64,cG5n"));
    }

    #[test]
    fn empty_repository_gets_fallbacks() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();

        let mut config = Configuration::default();
        config.project.title = Some("Bare Board".to_string());
        let report = render(root, &config);
        assert!(report.is_success());

        let html = datasheet(root);
        assert!(html.contains("Advanced electronic module for various applications"));
        assert!(html.contains("Operating Voltage"));
        assert!(html.contains("Environmental monitoring systems"));
        assert!(html.contains("<div class=\"product-code\">BARE</div>"));
    }

    #[test]
    fn configured_product_code_wins() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "README.md", b"# XY123 Board\n");

        let mut config = Configuration::default();
        config.datasheet.product_code = Some("CUSTOM1".to_string());
        config.datasheet.embed_images = false;
        render(root, &config);

        assert!(datasheet(root).contains("<div class=\"product-code\">CUSTOM1</div>"));
    }
}
