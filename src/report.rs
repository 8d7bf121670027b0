use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one run, written as `extraction_report.json` next to the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub files_created: Vec<String>,
    pub files_failed: Vec<String>,
    pub resources_copied: usize,
}

impl ExtractionReport {
    /// True when every output file was written.
    pub fn is_success(&self) -> bool {
        self.files_failed.is_empty()
    }

    /// Write `contents` to `path`, creating parent directories. Failures are
    /// logged and recorded instead of returned so that one bad file doesn't
    /// stop the rest.
    pub fn write_file(&mut self, path: &Path, label: &str, contents: &str) {
        let result = path
            .parent()
            .map(std::fs::create_dir_all)
            .transpose()
            .and_then(|_| std::fs::write(path, contents));

        match result {
            Ok(()) => {
                log::debug!("wrote {}", path.display());
                self.files_created.push(label.to_string());
            }
            Err(e) => {
                log::error!("Failed to write {}: {e}", path.display());
                self.files_failed.push(label.to_string());
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn report_json_shape() {
        let report = ExtractionReport {
            files_created: vec!["introduction.md".to_string()],
            files_failed: vec![],
            resources_copied: 3,
        };
        let value = serde_json::to_value(&report).expect("can serialize report");
        assert_eq!(
            value,
            serde_json::json!({
                "files_created": ["introduction.md"],
                "files_failed": [],
                "resources_copied": 3
            })
        );
    }

    #[test]
    fn failed_writes_are_recorded() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").expect("can write");

        let mut report = ExtractionReport::default();
        report.write_file(&dir.path().join("ok/page.md"), "ok/page.md", "# Ok");
        report.write_file(&blocker.join("page.md"), "blocker/page.md", "# Nope");

        assert_eq!(report.files_created, vec!["ok/page.md"]);
        assert_eq!(report.files_failed, vec!["blocker/page.md"]);
        assert!(!report.is_success());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("ok/page.md")).expect("page exists"),
            "# Ok"
        );
    }
}
