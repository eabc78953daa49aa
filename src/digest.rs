//! Digest formatting: structured digest -> Telegram HTML markup, and
//! markup -> plain text for paginated rendering.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::Digest;

/// Escape user- and service-supplied text for Telegram's HTML dialect.
/// Link targets are never passed through this; only visible text is.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a digest as Telegram HTML. Items appear in the order supplied,
/// separated by a blank line, each ending with a clickable source line.
#[must_use]
pub fn render_markup(digest: &Digest) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "<b>Research Summary for:</b> {}\n",
        escape_html(&digest.topic)
    ));
    for item in digest.items() {
        lines.push(format!("<b>{}</b>", escape_html(&item.title)));
        lines.push(escape_html(&item.summary));
        lines.push(format!(
            "<b>Source link:</b> <a href=\"{}\">{}</a>\n",
            item.link,
            escape_html(&item.link)
        ));
    }
    lines.join("\n")
}

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a\s+href="([^"]*)"[^>]*>.*?</a>"#).expect("anchor regex compiles")
});

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<br\s*/?>").expect("line break regex compiles"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("tag regex compiles"));

/// Strip markup down to plain text suitable for the PDF body: hyperlinks
/// become `Read more: <url>`, line-break elements become newlines, any
/// remaining tags are dropped, and leftover emphasis characters are removed.
/// Idempotent on text that is already free of markup.
#[must_use]
pub fn render_plain(markup: &str) -> String {
    let text = ANCHOR_RE.replace_all(markup, "Read more: $1");
    let text = LINE_BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    text.replace(['*', '`'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_significant_characters() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn anchors_become_read_more_lines() {
        let markup = r#"See <a href="https://example.com/a_b">the page</a> now"#;
        assert_eq!(
            render_plain(markup),
            "See Read more: https://example.com/a_b now"
        );
    }

    #[test]
    fn plain_rendering_is_idempotent() {
        let markup = "<b>Title</b><br/>body *emphasis* <a href=\"https://x.io\">x</a>";
        let once = render_plain(markup);
        assert_eq!(render_plain(&once), once);
    }
}
