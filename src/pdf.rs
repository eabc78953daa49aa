//! Paginated PDF rendering of a plain-text digest.
//!
//! Letter pages with one-inch margins, a bold title line, and the body
//! flowed line-by-line. When a page runs out of vertical space a new page
//! starts at the top margin with the body font restored; arbitrarily long
//! input paginates instead of failing.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::core::models::RenderedDocument;
use crate::errors::BotError;

// Helvetica 12pt fits roughly this many characters across a Letter page
// with one-inch margins.
const MAX_LINE_CHARS: usize = 88;

pub fn render_pdf(plain_text: &str, topic: &str) -> Result<RenderedDocument, BotError> {
    // Letter: 215.9 x 279.4 mm, one-inch (25.4 mm) margins.
    let page_width = Mm(215.9);
    let page_height = Mm(279.4);
    let margin = Mm(25.4);

    let (doc, first_page, first_layer) =
        PdfDocument::new("Research Summary", page_width, page_height, "body");
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| BotError::PdfError(e.to_string()))?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| BotError::PdfError(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = Mm(page_height.0 - margin.0);

    layer.use_text(
        format!("Research Summary for: {}", topic),
        18.0,
        margin,
        y,
        &title_font,
    );
    y = Mm(y.0 - 14.0);

    for raw_line in plain_text.lines() {
        for line in wrap_line(raw_line, MAX_LINE_CHARS) {
            if y.0 < margin.0 {
                let (page, new_layer) = doc.add_page(page_width, page_height, "body");
                layer = doc.get_page(page).get_layer(new_layer);
                y = Mm(page_height.0 - margin.0);
            }
            layer.use_text(line, 12.0, margin, y, &body_font);
            y = Mm(y.0 - 6.0);
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| BotError::PdfError(e.to_string()))?;
    Ok(RenderedDocument(bytes))
}

/// Word-wrap a single source line to at most `max_chars` per output line.
/// Words longer than the limit are hard-split; an empty line stays a single
/// empty line so paragraph spacing survives.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            out.push(std::mem::take(&mut current));
        }
        if word_len > max_chars {
            // Hard-split oversized tokens (long URLs, mostly).
            let mut chunk = String::new();
            for c in word.chars() {
                if chunk.chars().count() == max_chars {
                    out.push(std::mem::take(&mut chunk));
                }
                chunk.push(c);
            }
            current = chunk;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
