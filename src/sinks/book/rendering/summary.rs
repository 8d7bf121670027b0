use crate::sinks::book::PageSpec;

/// mdBook `SUMMARY.md`. Pages without a part that come before the first part
/// are prefix chapters; nested paths are indented under their parent.
pub fn render(pages: &[PageSpec], project_title: &str) -> String {
    let mut out = String::from("# Summary\n\n");
    let mut current_part: Option<&str> = None;

    for page in pages {
        let title = page.title.as_deref().unwrap_or(project_title);
        let path = page.path.to_string_lossy().replace('\\', "/");

        match (page.part.as_deref(), current_part) {
            (None, None) => {
                out.push_str(&format!("[{title}](./{path})\n\n"));
                continue;
            }
            (Some(part), current) if current != Some(part) => {
                if current.is_some() {
                    out.push('\n');
                }
                out.push_str(&format!("# {part}\n\n"));
                current_part = Some(part);
            }
            _ => {}
        }

        let indent = "  ".repeat(page.path.components().count().saturating_sub(2));
        out.push_str(&format!("{indent}- [{title}](./{path})\n"));
    }

    out
}
