// PDF rendering: optimized resume text -> paginated A4 document
use anyhow::Result;
use printpdf::*;
use tracing::debug;

const WRAP_COLUMNS: usize = 90;

/// Render plain text into a single PDF byte stream: A4 pages, builtin
/// Helvetica at 11pt, fixed left margin, left-aligned lines, automatic page
/// breaks. Characters outside the builtin font's repertoire are substituted
/// rather than failing the render.
pub fn render_pdf(text: &str) -> Result<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Optimized Resume",
        Mm(210.0), // A4 width
        Mm(297.0), // A4 height
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let mut current_layer = doc.get_page(page1).get_layer(layer1);
    let mut current_y = Mm(277.0);
    let mut page_count = 1;

    for raw_line in text.lines() {
        let line = sanitize_line(raw_line);
        for segment in wrap_line(&line, WRAP_COLUMNS) {
            if current_y < Mm(20.0) {
                let (page, layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                current_layer = doc.get_page(page).get_layer(layer);
                current_y = Mm(277.0);
                page_count += 1;
            }
            if !segment.is_empty() {
                current_layer.use_text(&segment, 11.0, Mm(20.0), current_y, &font);
            }
            current_y -= Mm(5.5);
        }
    }

    debug!(pages = page_count, "Rendered PDF");

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}

/// Map a line onto the repertoire the builtin fonts can encode. Common
/// typographic characters get ASCII equivalents, Latin-1 passes through,
/// anything else becomes '?'.
fn sanitize_line(line: &str) -> String {
    line.chars().map(substitute_char).collect()
}

fn substitute_char(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        '\u{2022}' | '\u{2023}' | '\u{25CF}' | '\u{25AA}' => '*',
        '\u{2026}' => '.',
        '\u{00A0}' | '\t' => ' ',
        c if (c as u32) >= 0x20 && (c as u32) < 0x7F => c,
        c if (c as u32) >= 0xA1 && (c as u32) <= 0xFF => c,
        _ => '?',
    }
}

/// Word-wrap one logical line to the column width. Blank lines survive as a
/// single empty segment so vertical spacing is preserved. Words longer than
/// the column width are emitted on their own line rather than split.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in line.split_whitespace() {
        if !current_line.is_empty()
            && current_line.chars().count() + word.chars().count() + 1 > max_chars
        {
            lines.push(std::mem::take(&mut current_line));
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}
