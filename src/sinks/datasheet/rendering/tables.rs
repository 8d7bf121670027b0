//! Markdown pipe tables.

use regex::Regex;
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").unwrap());
static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Pinout,
    Specs,
    Components,
    Applications,
}

impl TableKind {
    fn class(&self) -> &'static str {
        match self {
            TableKind::Pinout => "pinout-table",
            TableKind::Specs => "specs-table",
            TableKind::Components => "components-table",
            TableKind::Applications => "applications-table",
        }
    }
}

fn is_row(line: &str) -> bool {
    let line = line.trim();
    line.len() > 1 && line.starts_with('|') && line.ends_with('|')
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let inner = line
        .strip_prefix('|')
        .and_then(|l| l.strip_suffix('|'))
        .unwrap_or(line);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell))
}

/// Every pipe table in `text`. Data rows whose cell count differs from the
/// header are dropped.
pub fn parse_tables(text: &str) -> Vec<Table> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tables = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_row(lines[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < lines.len() && is_row(lines[i]) {
            i += 1;
        }
        let block = &lines[start..i];
        if block.len() < 2 || !is_separator(&split_row(block[1])) {
            continue;
        }

        let headers = split_row(block[0]);
        let rows = block[2..]
            .iter()
            .map(|line| split_row(line))
            .filter(|cells| cells.len() == headers.len())
            .collect();
        tables.push(Table { headers, rows });
    }

    tables
}

/// Decide how a table from the section `key` should be presented.
pub fn classify(key: &str, table: &Table) -> TableKind {
    let key = key.to_lowercase();
    let has_ref_header = table
        .headers
        .iter()
        .any(|h| h.to_lowercase().contains("ref"));

    if key.contains("pin") {
        TableKind::Pinout
    } else if key.contains("overview") {
        TableKind::Specs
    } else if key.contains("component") || has_ref_header {
        TableKind::Components
    } else if key.contains("application") || key.contains("use_case") {
        TableKind::Applications
    } else {
        TableKind::Specs
    }
}

/// Link text only, images and bold markers removed.
pub fn strip_markdown(text: &str) -> String {
    let text = MARKDOWN_IMAGE.replace_all(text, "");
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    text.replace("**", "").trim().to_string()
}

fn render_cell(text: &str, kind: TableKind) -> String {
    if kind == TableKind::Applications {
        let text = MARKDOWN_IMAGE.replace_all(text, "");
        let escaped = html_escape::encode_text(&text).replace("**", "");
        MARKDOWN_LINK
            .replace_all(&escaped, r#"<a href="$2" target="_blank">$1</a>"#)
            .into_owned()
    } else {
        html_escape::encode_text(&strip_markdown(text)).into_owned()
    }
}

/// `<table>` markup for `table`. Pinout tables lose their first (pin number)
/// column.
pub fn to_html(table: &Table, kind: TableKind) -> String {
    let skip = if kind == TableKind::Pinout && table.headers.len() > 1 {
        1
    } else {
        0
    };

    let mut html = format!(
        "<table class=\"professional-table {}\">\n<thead>\n<tr>",
        kind.class()
    );
    for header in table.headers.iter().skip(skip) {
        html.push_str(&format!("<th>{}</th>", render_cell(header, kind)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row.iter().skip(skip) {
            html.push_str(&format!("<td>{}</td>", render_cell(cell, kind)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

#[cfg(test)]
mod test {
    use super::*;

    const PINS: &str = "Intro text\n\n| Pin | Name | Description |\n|:---:|------|-------------|\n| 1 | VCC | Power **3.3V** |\n| 2 | GND | Ground |\n| 3 | SDA | [I2C](https://i2c.info) data |\n\nAfter.";

    #[test]
    fn can_parse_tables() {
        let tables = parse_tables(PINS);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["Pin", "Name", "Description"]);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[0].rows[2], vec!["3", "SDA", "[I2C](https://i2c.info) data"]);
    }

    #[test]
    fn mismatched_rows_are_dropped() {
        let tables = parse_tables("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 |\n| 4 | 5 | 6 |");
        assert_eq!(tables[0].rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn lines_without_separator_are_not_tables() {
        assert!(parse_tables("| just | pipes |\n| more | pipes |").is_empty());
    }

    #[test]
    fn three_rows_round_trip_to_html() {
        let table = &parse_tables(PINS)[0];
        let html = to_html(table, TableKind::Specs);

        assert_eq!(html.matches("<tr>").count(), 4);
        assert_eq!(html.matches("<th>").count(), 3);
        for value in ["Pin", "Name", "Description", "1", "VCC", "2", "GND", "3", "SDA", "Ground", "I2C"] {
            assert!(html.contains(value), "missing {value}");
        }
        assert!(html.contains("<td>Power 3.3V</td>"));
        assert!(html.contains("<td>I2C data</td>"));
    }

    #[test]
    fn pinout_tables_drop_first_column() {
        let table = &parse_tables(PINS)[0];
        let html = to_html(table, classify("pinout", table));
        assert!(html.contains("pinout-table"));
        assert!(!html.contains("<th>Pin</th>"));
        assert!(html.contains("<tr><td>VCC</td><td>Power 3.3V</td></tr>"));
    }

    #[test]
    fn can_classify_tables() {
        let table = Table {
            headers: vec!["Ref".to_string(), "Part".to_string()],
            rows: vec![],
        };
        let plain = Table {
            headers: vec!["Item".to_string()],
            rows: vec![],
        };
        assert_eq!(classify("pin_description", &plain), TableKind::Pinout);
        assert_eq!(classify("overview", &table), TableKind::Specs);
        assert_eq!(classify("notes", &table), TableKind::Components);
        assert_eq!(classify("components", &plain), TableKind::Components);
        assert_eq!(classify("applications", &plain), TableKind::Applications);
        assert_eq!(classify("specifications", &plain), TableKind::Specs);
    }

    #[test]
    fn application_cells_keep_links_and_escape_text() {
        let table = &parse_tables("| Use | Link |\n|---|---|\n| A & B | [Guide](https://x.io/g) |")[0];
        let html = to_html(table, TableKind::Applications);
        assert!(html.contains("<td>A &amp; B</td>"));
        assert!(html.contains(r#"<a href="https://x.io/g" target="_blank">Guide</a>"#));
    }
}
