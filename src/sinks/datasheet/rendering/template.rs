//! The fixed datasheet page layout.

use super::images::ImageRole;
use super::specs::Feature;
use html_escape::encode_text as escape;

const STYLE: &str = r#"
:root {
    --accent: #1e3a8a;
    --accent-light: #dbeafe;
    --text: #1f2937;
    --muted: #6b7280;
    --border: #d1d5db;
}
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: "Helvetica Neue", Arial, sans-serif;
    font-size: 11pt;
    line-height: 1.5;
    color: var(--text);
    background: #f3f4f6;
}
.container {
    max-width: 210mm;
    margin: 20px auto;
    padding: 15mm;
    background: #ffffff;
    box-shadow: 0 2px 12px rgba(0, 0, 0, 0.1);
}
.header {
    display: grid;
    grid-template-columns: auto 1fr auto;
    gap: 20px;
    align-items: center;
    padding-bottom: 12px;
    border-bottom: 3px solid var(--accent);
}
.product-code {
    font-size: 22pt;
    font-weight: 700;
    color: var(--accent);
    letter-spacing: 1px;
}
.product-title { margin: 0; font-size: 16pt; }
.product-subtitle { margin: 0; color: var(--muted); }
.version-badge {
    padding: 4px 10px;
    border-radius: 4px;
    background: var(--accent);
    color: #ffffff;
    font-weight: 600;
    text-align: center;
}
.generated { font-size: 8pt; color: var(--muted); text-align: right; }
.section-title {
    margin: 24px 0 10px;
    padding-bottom: 4px;
    font-size: 13pt;
    text-transform: uppercase;
    color: var(--accent);
    border-bottom: 1px solid var(--border);
}
.description { font-style: italic; color: var(--muted); }
.views-grid, .features-grid, .applications-grid {
    display: grid;
    grid-template-columns: repeat(2, 1fr);
    gap: 12px;
}
.view-card, .feature-card, .app-card {
    padding: 10px;
    border: 1px solid var(--border);
    border-radius: 6px;
}
.view-card img, .figure img { max-width: 100%; height: auto; }
.view-title, .feature-title { font-weight: 700; color: var(--accent); }
.figure { text-align: center; margin: 12px 0; }
.figure-caption { font-size: 9pt; color: var(--muted); }
.key-specs {
    padding: 12px;
    background: var(--accent-light);
    border-left: 4px solid var(--accent);
}
.spec-item {
    display: flex;
    justify-content: space-between;
    padding: 3px 0;
    border-bottom: 1px dotted var(--border);
}
.spec-name { font-weight: 600; }
.professional-table {
    width: 100%;
    margin: 8px 0 16px;
    border-collapse: collapse;
    font-size: 9.5pt;
}
.professional-table th {
    padding: 6px;
    background: var(--accent);
    color: #ffffff;
    text-align: left;
}
.professional-table td { padding: 5px 6px; border-bottom: 1px solid var(--border); }
.professional-table tr:nth-child(even) td { background: #f9fafb; }
.footer {
    margin-top: 24px;
    padding-top: 8px;
    font-size: 8pt;
    color: var(--muted);
    border-top: 1px solid var(--border);
    text-align: center;
}
@media print {
    @page { size: A4; margin: 12mm; }
    body { background: #ffffff; font-size: 10pt; }
    .container { margin: 0; padding: 0; max-width: none; box-shadow: none; }
    .section-title { page-break-after: avoid; }
    .professional-table, .figure, .view-card { page-break-inside: avoid; }
    a { color: inherit; text-decoration: none; }
}
"#;

/// Everything the layout needs, already HTML-ready where noted.
#[derive(Debug, Default)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub version: String,
    pub description: String,
    pub product_code: String,
    pub date: String,
    pub introduction: Vec<String>,
    pub specs: Vec<(String, String)>,
    pub features: Vec<Feature>,
    pub applications: Vec<String>,
    /// `(heading, table markup)`
    pub tables: Vec<(String, String)>,
    /// `(role, img src)`
    pub images: Vec<(ImageRole, String)>,
}

impl Page {
    fn image(&self, role: ImageRole) -> Option<&str> {
        self.images
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, src)| src.as_str())
    }

    fn img(&self, role: ImageRole) -> Option<String> {
        self.image(role).map(|src| {
            format!(
                r#"<img src="{}" alt="{}">"#,
                html_escape::encode_double_quoted_attribute(src),
                role.caption()
            )
        })
    }

    fn header(&self) -> String {
        format!(
            r#"<div class="header">
<div class="product-code">{code}</div>
<div>
<h1 class="product-title">{title}</h1>
<p class="product-subtitle">{subtitle}</p>
</div>
<div>
<div class="version-badge">v{version}</div>
<div class="generated">{date}</div>
</div>
</div>
<p class="description">{description}</p>
"#,
            code = escape(&self.product_code),
            title = escape(&self.title),
            subtitle = escape(&self.subtitle),
            version = escape(&self.version),
            date = escape(&self.date),
            description = escape(&self.description),
        )
    }

    fn overview(&self) -> String {
        let mut html = String::from("<h2 class=\"section-title\">Product Overview</h2>\n");
        for paragraph in &self.introduction {
            html.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
        }
        html
    }

    fn views(&self) -> String {
        let cards: Vec<String> = [ImageRole::Top, ImageRole::Bottom]
            .into_iter()
            .filter_map(|role| {
                self.img(role).map(|img| {
                    format!(
                        "<div class=\"view-card\">\n<div class=\"view-title\">{}</div>\n{img}\n</div>\n",
                        role.caption()
                    )
                })
            })
            .collect();
        if cards.is_empty() {
            return String::new();
        }
        format!(
            "<h2 class=\"section-title\">Product Views</h2>\n<div class=\"views-grid\">\n{}</div>\n",
            cards.concat()
        )
    }

    fn key_specs(&self) -> String {
        let mut html = String::from(
            "<h2 class=\"section-title\">Key Technical Specifications</h2>\n<div class=\"key-specs\">\n",
        );
        for (name, value) in &self.specs {
            html.push_str(&format!(
                "<div class=\"spec-item\"><span class=\"spec-name\">{}</span><span>{}</span></div>\n",
                escape(name),
                escape(value)
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn tables(&self) -> String {
        self.tables
            .iter()
            .map(|(heading, table)| {
                format!(
                    "<h2 class=\"section-title\">{}</h2>\n{table}\n",
                    escape(heading)
                )
            })
            .collect()
    }

    fn features(&self) -> String {
        let mut html = String::from(
            "<h2 class=\"section-title\">Key Features</h2>\n<div class=\"features-grid\">\n",
        );
        for feature in &self.features {
            html.push_str(&format!(
                "<div class=\"feature-card\">\n<div class=\"feature-title\">{}</div>\n<div>{}</div>\n</div>\n",
                escape(&feature.title),
                escape(&feature.description)
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn applications(&self) -> String {
        let mut html = String::from(
            "<h2 class=\"section-title\">Typical Applications</h2>\n<div class=\"applications-grid\">\n",
        );
        for app in &self.applications {
            html.push_str(&format!("<div class=\"app-card\">{}</div>\n", escape(app)));
        }
        html.push_str("</div>\n");
        html
    }

    fn figures(&self) -> String {
        let figures: Vec<String> = [
            ImageRole::Pinout,
            ImageRole::Dimensions,
            ImageRole::Topology,
            ImageRole::Schematic,
        ]
        .into_iter()
        .filter_map(|role| {
            self.img(role).map(|img| {
                format!(
                    "<h2 class=\"section-title\">{caption}</h2>\n<div class=\"figure\">\n{img}\n<div class=\"figure-caption\">{caption}</div>\n</div>\n",
                    caption = role.caption()
                )
            })
        })
        .collect();
        figures.concat()
    }

    /// The complete HTML document.
    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - Datasheet</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
{header}{overview}{views}{key_specs}{tables}{features}{applications}{figures}<div class="footer">{code} &middot; {title} &middot; Version {version} &middot; {date}</div>
</div>
</body>
</html>
"#,
            title = escape(&self.title),
            header = self.header(),
            overview = self.overview(),
            views = self.views(),
            key_specs = self.key_specs(),
            tables = self.tables(),
            features = self.features(),
            applications = self.applications(),
            figures = self.figures(),
            code = escape(&self.product_code),
            version = escape(&self.version),
            date = escape(&self.date),
        )
    }
}
