//! Serializes a `PreviewDocument` as a standalone A4 HTML page. This is the
//! page the export collaborator rasterizes.

use std::fmt::Write;

use crate::preview::render::{PreviewDocument, PreviewItem, PreviewSection};

const STYLE: &str = "\
body{margin:0;background:#fff;color:#111;}\
#resume-preview{box-sizing:border-box;width:210mm;min-height:297mm;padding:3rem;font-family:Georgia,'Times New Roman',serif;}\
header{text-align:center;border-bottom:2px solid #e5e7eb;padding-bottom:1rem;margin-bottom:2rem;}\
h1{font-size:2.25rem;font-weight:700;letter-spacing:.05em;text-transform:uppercase;margin:0;}\
.contact{display:flex;justify-content:center;flex-wrap:wrap;gap:.25rem 1rem;font-size:.875rem;margin-top:.5rem;}\
section{margin-bottom:2rem;}\
h2{font-size:1.25rem;font-weight:700;border-bottom:2px solid #e5e7eb;padding-bottom:.5rem;margin:0 0 .75rem;text-transform:uppercase;letter-spacing:.05em;}\
.item{margin-bottom:1rem;}\
.row{display:flex;justify-content:space-between;align-items:baseline;}\
h3{font-size:1.125rem;font-weight:700;margin:0;}\
h4{font-size:1rem;font-weight:600;font-style:italic;margin:0;}\
.aside{font-size:.875rem;}\
.sub-aside{font-size:.875rem;font-style:italic;}\
p{font-size:.875rem;margin:0;}\
.pre{white-space:pre-wrap;}\
a{color:#2563eb;text-decoration:underline;}";

/// Escapes text for element content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Relative URLs and `http`, `https` and `mailto` links are safe to put in an
/// `href`. Browsers drop whitespace and control characters inside a scheme,
/// so those are ignored when reading it.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match cleaned.find([':', '/', '?', '#']) {
        Some(i) if cleaned[i..].starts_with(':') => {
            matches!(
                cleaned[..i].to_ascii_lowercase().as_str(),
                "http" | "https" | "mailto"
            )
        }
        _ => true,
    }
}

/// Writes `url` as a link, or as plain text when its scheme is not allowed.
fn write_link(out: &mut String, class: Option<&str>, url: &str) {
    let text = escape_html(url);
    let class = class.map(|c| format!(" class=\"{c}\"")).unwrap_or_default();
    if is_safe_url(url) {
        let _ = write!(out, "<a{class} href=\"{text}\">{text}</a>");
    } else {
        let _ = write!(out, "<span{class}>{text}</span>");
    }
}

fn write_item(out: &mut String, item: &PreviewItem) {
    // Writing into a String never fails.
    let _ = write!(out, "<div class=\"item\"><div class=\"row\"><h3>{}</h3>", escape_html(&item.heading));
    if let Some(aside) = &item.heading_aside {
        let _ = write!(out, "<span class=\"aside\">{}</span>", escape_html(aside));
    }
    if let Some(link) = &item.link {
        write_link(out, Some("aside"), link);
    }
    out.push_str("</div>");

    if let Some(subheading) = &item.subheading {
        let _ = write!(out, "<div class=\"row\"><h4>{}</h4>", escape_html(subheading));
        if let Some(aside) = &item.subheading_aside {
            let _ = write!(out, "<span class=\"sub-aside\">{}</span>", escape_html(aside));
        }
        out.push_str("</div>");
    }

    if let Some(body) = &item.body {
        let _ = write!(out, "<p class=\"pre\">{}</p>", escape_html(body));
    }
    out.push_str("</div>");
}

fn write_section(out: &mut String, section: &PreviewSection) {
    let _ = write!(out, "<section><h2>{}</h2>", escape_html(section.title));
    if let Some(text) = &section.text {
        let _ = write!(out, "<p>{}</p>", escape_html(text));
    }
    for item in &section.items {
        write_item(out, item);
    }
    out.push_str("</section>");
}

pub fn to_html(doc: &PreviewDocument) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape_html(&doc.header.name)
    );
    out.push_str("<div id=\"resume-preview\"><header>");
    let _ = write!(
        out,
        "<h1>{}</h1><div class=\"contact\"><span>{}</span><span>|</span><span>{}</span>",
        escape_html(&doc.header.name),
        escape_html(&doc.header.email),
        escape_html(&doc.header.phone)
    );
    if let Some(website) = &doc.header.website {
        out.push_str("<span>|</span>");
        write_link(&mut out, None, website);
    }
    out.push_str("</div></header>");

    for section in &doc.sections {
        write_section(&mut out, section);
    }

    out.push_str("</div></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeRecord;
    use crate::preview::render::render;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_blank_record_page() {
        let html = to_html(&render(&ResumeRecord::default()));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"resume-preview\">"));
        assert!(html.contains("<h1>Your Name</h1>"));
        assert!(html.contains("width:210mm"));
        assert!(!html.contains("<section>"));
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut record = ResumeRecord::default();
        record.full_name = "<script>x</script>".to_string();
        record.experience[0].title = "R&D Lead".to_string();
        record.experience[0].responsibilities = "Line one\nLine two".to_string();

        let html = to_html(&render(&record));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h3>R&amp;D Lead</h3>"));
        assert!(html.contains("<p class=\"pre\">Line one\nLine two</p>"));
    }

    #[test]
    fn test_website_is_linked() {
        let mut record = ResumeRecord::default();
        record.website = "github.com/janedoe".to_string();

        let html = to_html(&render(&record));
        assert!(html.contains("<a href=\"github.com/janedoe\">github.com/janedoe</a>"));
    }

    #[test]
    fn test_script_urls_are_not_linked() {
        let mut record = ResumeRecord::default();
        record.website = "javascript:alert(1)".to_string();
        record.projects[0].name = "Compiler".to_string();
        record.projects[0].link = " JavaScript\t:alert(2)".to_string();

        let html = to_html(&render(&record));
        assert!(!html.contains("href=\"javascript"));
        assert!(!html.contains("href=\" JavaScript"));
        assert!(html.contains("<span>javascript:alert(1)</span>"));
        assert!(html.contains("<span class=\"aside\">"));
    }

    #[test]
    fn test_project_link_with_https_is_linked() {
        let mut record = ResumeRecord::default();
        record.projects[0].name = "Compiler".to_string();
        record.projects[0].link = "https://github.com/jane/compiler".to_string();

        let html = to_html(&render(&record));
        assert!(html.contains(
            "<a class=\"aside\" href=\"https://github.com/jane/compiler\">https://github.com/jane/compiler</a>"
        ));
    }

    #[test]
    fn test_is_safe_url() {
        for url in [
            "github.com/janedoe",
            "/relative/path",
            "#top",
            "https://example.com",
            "HTTP://example.com",
            "mailto:jane@example.com",
            "example.com/a:b",
        ] {
            assert!(is_safe_url(url), "{url}");
        }
        for url in [
            "javascript:alert(1)",
            "JAVASCRIPT:alert(1)",
            "java\nscript:alert(1)",
            "data:text/html,<script>",
            "vbscript:msgbox",
        ] {
            assert!(!is_safe_url(url), "{url}");
        }
    }
}
