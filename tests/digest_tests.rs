use scout::core::models::{Digest, SummarizedItem};
use scout::digest::{escape_html, render_markup, render_plain};

fn item(title: &str, link: &str, summary: &str) -> SummarizedItem {
    SummarizedItem {
        title: title.to_string(),
        link: link.to_string(),
        summary: summary.to_string(),
    }
}

fn sample_digest() -> Digest {
    Digest::from_items(
        "rust <async>",
        vec![
            item("First & Foremost", "https://example.com/a", "Covers a & b"),
            item("Second", "https://example.com/b?x=1&y=2", "Plain summary"),
            item("Third", "https://example.com/c", "Another one"),
        ],
    )
    .expect("three items build a digest")
}

#[test]
fn digest_requires_exactly_three_items() {
    assert!(Digest::from_items("t", vec![]).is_none());
    assert!(
        Digest::from_items(
            "t",
            vec![item("a", "l", "s"), item("b", "l", "s")],
        )
        .is_none()
    );
    assert!(
        Digest::from_items(
            "t",
            (0..4).map(|i| item(&i.to_string(), "l", "s")).collect(),
        )
        .is_none()
    );
}

#[test]
fn markup_escapes_text_but_not_link_targets() {
    let markup = render_markup(&sample_digest());

    assert!(markup.contains("<b>Research Summary for:</b> rust &lt;async&gt;"));
    assert!(markup.contains("<b>First &amp; Foremost</b>"));
    assert!(markup.contains("Covers a &amp; b"));
    // The href keeps the raw URL; only the visible link text is escaped.
    assert!(markup.contains(r#"<a href="https://example.com/b?x=1&y=2">"#));
    assert!(markup.contains("https://example.com/b?x=1&amp;y=2</a>"));
}

#[test]
fn markup_keeps_items_in_order_separated_by_blank_lines() {
    let markup = render_markup(&sample_digest());

    let first = markup.find("First").expect("first item present");
    let second = markup.find("Second").expect("second item present");
    let third = markup.find("Third").expect("third item present");
    assert!(first < second && second < third);
    assert!(markup.contains("</a>\n\n<b>Second</b>"));
}

#[test]
fn plain_rendering_replaces_anchors_and_strips_tags() {
    let markup = render_markup(&sample_digest());
    let plain = render_plain(&markup);

    assert!(plain.contains("Read more: https://example.com/a"));
    assert!(!plain.contains("<b>"));
    assert!(!plain.contains("</a>"));
    assert!(plain.contains("Research Summary for: rust &lt;async&gt;"));
}

#[test]
fn plain_rendering_is_idempotent() {
    let markup = render_markup(&sample_digest());
    let once = render_plain(&markup);
    assert_eq!(render_plain(&once), once);

    // Already-plain text passes through untouched.
    let plain = "just a paragraph\nwith two lines";
    assert_eq!(render_plain(plain), plain);
}

#[test]
fn escape_html_touches_only_markup_characters() {
    assert_eq!(escape_html("tom & jerry <3"), "tom &amp; jerry &lt;3");
    assert_eq!(escape_html("nothing special"), "nothing special");
}
