//! Naive paginated PDF rendering.
//!
//! # Responsibility
//! - Lay note text out on A4 pages with fixed margins and line height.
//! - Emit a self-contained single-font PDF document in memory.
//!
//! # Invariants
//! - Lines wrap by character count, with no word-wrap awareness.
//! - A page break happens whenever the cursor would cross the bottom
//!   margin; blank source lines still advance the cursor.

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 48.0;
const LINE_HEIGHT: f64 = 14.0;
const FONT_SIZE: f64 = 12.0;
const WRAP_COLUMNS: usize = 120;

/// A text chunk positioned at a baseline y coordinate.
type PlacedLine = (f64, String);

/// Renders the full PDF byte stream for `text`.
pub(crate) fn render_pdf(text: &str) -> Vec<u8> {
    let pages = paginate(text);

    // Object layout: 1 catalog, 2 page tree, 3 font, then one page object
    // and one content stream per page.
    let mut objects: Vec<Vec<u8>> = Vec::new();

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", 4 + 2 * index))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [ {kids} ] /Count {} >>",
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

    for (index, page) in pages.iter().enumerate() {
        let content_id = 5 + 2 * index;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R \
                 /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> \
                 /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );

        let mut stream = format!("BT\n/F1 {FONT_SIZE} Tf\n");
        for (y, chunk) in page {
            stream.push_str(&format!(
                "1 0 0 1 {MARGIN} {y:.2} Tm ({}) Tj\n",
                escape_pdf_text(chunk)
            ));
        }
        stream.push_str("ET\n");

        let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        content.extend_from_slice(stream.as_bytes());
        content.extend_from_slice(b"endstream");
        objects.push(content);
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    out
}

/// Splits text into pages of positioned line chunks.
fn paginate(text: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages = Vec::new();
    let mut current: Vec<PlacedLine> = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    let source_lines: Vec<&str> = if text.is_empty() {
        vec![""]
    } else {
        text.lines().collect()
    };

    for raw_line in source_lines {
        let line = raw_line.trim_end();
        if line.is_empty() {
            if y <= MARGIN {
                pages.push(std::mem::take(&mut current));
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= LINE_HEIGHT;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + WRAP_COLUMNS).min(chars.len());
            let chunk: String = chars[start..end].iter().collect();
            start = end;

            if y <= MARGIN {
                pages.push(std::mem::take(&mut current));
                y = PAGE_HEIGHT - MARGIN;
            }
            current.push((y, chunk));
            y -= LINE_HEIGHT;
        }
    }

    pages.push(current);
    pages
}

/// Escapes the characters with special meaning in PDF literal strings.
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_pdf_text, paginate, render_pdf, LINE_HEIGHT, MARGIN, PAGE_HEIGHT};

    #[test]
    fn single_short_note_fits_on_one_page() {
        let pages = paginate("hello\nworld");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 2);
        assert_eq!(pages[0][0].1, "hello");
        assert!(pages[0][0].0 > pages[0][1].0);
    }

    #[test]
    fn long_lines_wrap_by_character_count() {
        let long = "x".repeat(250);
        let pages = paginate(&long);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[0][0].1.len(), 120);
        assert_eq!(pages[0][2].1.len(), 10);
    }

    #[test]
    fn overflow_starts_a_new_page() {
        let per_page = ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize + 1;
        let text = vec!["line"; per_page + 5].join("\n");
        let pages = paginate(&text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 5);
    }

    #[test]
    fn rendered_document_has_pdf_framing() {
        let bytes = render_pdf("one line");
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("/Count 1"));
        assert!(body.contains("(one line) Tj"));
    }

    #[test]
    fn parentheses_and_backslashes_are_escaped() {
        assert_eq!(escape_pdf_text(r"a(b)c\d"), r"a\(b\)c\\d");
    }
}
