use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::preview::html::is_safe_url;

/// Renders assistant markdown to an HTML fragment. Raw HTML in the source is
/// escaped rather than passed through, and link or image targets with a
/// disallowed scheme are emptied.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_headings_and_lists() {
        let html = render_markdown("## Summary\n\n- Strong verbs\n- Add metrics\n");
        assert!(html.contains("<h2>Summary</h2>"));
        assert!(html.contains("<li>Strong verbs</li>"));
    }

    #[test]
    fn test_renders_emphasis() {
        assert_eq!(render_markdown("**Great** start!"), "<p><strong>Great</strong> start!</p>\n");
    }

    #[test]
    fn test_escapes_raw_html() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_link_target_is_emptied() {
        assert_eq!(
            render_markdown("[click](javascript:alert(document.cookie))"),
            "<p><a href=\"\">click</a></p>\n"
        );
        let html = render_markdown("![x](JavaScript:alert(1))");
        assert!(!html.to_ascii_lowercase().contains("javascript"));
    }

    #[test]
    fn test_web_links_are_kept() {
        assert_eq!(
            render_markdown("[guide](https://example.com/resume-tips)"),
            "<p><a href=\"https://example.com/resume-tips\">guide</a></p>\n"
        );
        assert!(render_markdown("<mailto:jane@example.com>").contains("href=\"mailto:jane@example.com\""));
    }
}
