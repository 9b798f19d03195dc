//! Minimal PDF 1.4 writer for reports.
//!
//! Uses the standard Helvetica faces, so no font program is embedded. Text is
//! WinAnsi encoded; characters outside that code page print as `?`. Content
//! streams are scaled to millipoints so layout stays in integer arithmetic.

use std::io::{self, Write};

use tracing::debug;

use crate::domain::Report;
use crate::domain::ports::{RenderError, ReportRenderer};

use super::{Block, outline};

/// A4 in millipoints.
const PAGE_WIDTH: u32 = 595_276;
const PAGE_HEIGHT: u32 = 841_890;
const MEDIA_BOX: &str = "[0 0 595.276 841.89]";
/// 2 cm.
const MARGIN: u32 = 56_693;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN;
const REPLACEMENT: u8 = b'?';

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    fn glyph(self, ch: char) -> u32 {
        let table = match self {
            Self::Regular => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        };
        let index = u32::from(ch).checked_sub(32).and_then(|i| usize::try_from(i).ok());
        index
            .and_then(|i| table.get(i))
            .map_or(556, |width| u32::from(*width))
    }

    /// Advance of `text` at `size` points, in millipoints.
    fn measure(self, text: &str, size: u32) -> u64 {
        text.chars()
            .map(|ch| u64::from(self.glyph(ch)))
            .fold(0_u64, u64::saturating_add)
            .saturating_mul(u64::from(size))
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: u32,
    leading: u32,
    indent: u32,
    space_before: u32,
    space_after: u32,
}

const BODY: Style = Style {
    font: Font::Regular,
    size: 10,
    leading: 13_000,
    indent: 0,
    space_before: 0,
    space_after: 2_000,
};

impl Style {
    const fn of(block: &Block) -> Self {
        match block {
            Block::Title(_) => Self {
                font: Font::Bold,
                size: 16,
                leading: 20_000,
                space_after: 14_000,
                ..BODY
            },
            Block::Paragraph(_) => Self {
                space_after: 14_000,
                ..BODY
            },
            Block::Heading(_) => Self {
                font: Font::Bold,
                size: 13,
                leading: 17_000,
                space_before: 6_000,
                space_after: 4_000,
                ..BODY
            },
            Block::Bullet(_) => Self {
                indent: 6_000,
                ..BODY
            },
        }
    }
}

/// Greedy word wrap that keeps the spacing inside a line.
///
/// Breaks fall on spaces, which are dropped at the break. Words wider than
/// `width` are split between characters.
fn wrap(text: &str, font: Font, size: u32, width: u32) -> Vec<String> {
    let limit = u64::from(width);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for token in paragraph.split_inclusive(' ') {
            let word = token.trim_end_matches(' ');
            let needed = font
                .measure(&line, size)
                .saturating_add(font.measure(word, size));
            if needed <= limit {
                line.push_str(token);
                continue;
            }
            if word.is_empty() {
                continue;
            }
            if !line.trim_start().is_empty() {
                lines.push(line.trim_end_matches(' ').to_owned());
                line.clear();
            }
            for ch in token.chars() {
                line.push(ch);
                let overflow = font.measure(line.trim_end_matches(' '), size) > limit;
                if overflow && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }
        lines.push(line.trim_end_matches(' ').to_owned());
    }
    lines
}

/// Encode as a WinAnsi literal string body, escaping delimiters.
fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                u8::try_from(ch).unwrap_or(REPLACEMENT)
            }
            '\t' => b' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(ch).unwrap_or(REPLACEMENT),
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => REPLACEMENT,
        };
        out.push(byte);
    }
    out
}

/// Content streams being filled top to bottom.
struct Pages {
    finished: Vec<Vec<u8>>,
    current: Vec<u8>,
    cursor: u32,
    lines_on_page: usize,
}

impl Pages {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: page_prologue(),
            cursor: PAGE_HEIGHT - MARGIN,
            lines_on_page: 0,
        }
    }

    fn break_page(&mut self) {
        let done = std::mem::replace(&mut self.current, page_prologue());
        self.finished.push(done);
        self.cursor = PAGE_HEIGHT - MARGIN;
        self.lines_on_page = 0;
    }

    /// Start a new page unless `height` still fits above the bottom margin.
    fn reserve(&mut self, height: u32) {
        let fits = self
            .cursor
            .checked_sub(height)
            .is_some_and(|bottom| bottom >= MARGIN);
        if !fits && self.lines_on_page > 0 {
            self.break_page();
        }
    }

    /// Vertical space; dropped at the top of a page.
    fn skip(&mut self, amount: u32) {
        if self.lines_on_page > 0 {
            self.cursor = self.cursor.saturating_sub(amount).max(MARGIN);
        }
    }

    fn line(&mut self, style: Style, text: &str) -> io::Result<()> {
        self.reserve(style.leading);
        self.cursor = self.cursor.saturating_sub(style.leading);
        write!(
            self.current,
            "BT /{} {} Tf {} {} Td (",
            style.font.resource(),
            style.size * 1000,
            MARGIN + style.indent,
            self.cursor,
        )?;
        self.current.extend_from_slice(&encode(text));
        self.current.extend_from_slice(b") Tj ET\n");
        self.lines_on_page += 1;
        Ok(())
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        self.finished.push(self.current);
        self.finished
    }
}

/// Every page works in millipoints.
fn page_prologue() -> Vec<u8> {
    b"0.001 0 0 0.001 0 0 cm\n".to_vec()
}

fn font_object(base_font: &str) -> Vec<u8> {
    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>")
        .into_bytes()
}

/// Wrap page content streams into a complete file with a cross-reference table.
fn assemble(pages: Vec<Vec<u8>>, title: &str) -> io::Result<Vec<u8>> {
    let page_count = pages.len();
    let first_page = 6;
    let kids = (0..page_count)
        .map(|index| format!("{} 0 R", first_page + 2 * index))
        .collect::<Vec<_>>()
        .join(" ");

    let mut info = b"<< /Title (".to_vec();
    info.extend_from_slice(&encode(title));
    info.extend_from_slice(b") /Producer (pupil-tracker) >>");

    let mut objects = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").into_bytes(),
        font_object("Helvetica"),
        font_object("Helvetica-Bold"),
        info,
    ];
    for (index, content) in pages.into_iter().enumerate() {
        let content_id = first_page + 2 * index + 1;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox {MEDIA_BOX} \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        writeln!(out, "{} 0 obj", index + 1)?;
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref = out.len();
    let size = objects.len() + 1;
    write!(out, "xref\n0 {size}\n0000000000 65535 f \n")?;
    for offset in offsets {
        write!(out, "{offset:010} 00000 n \n")?;
    }
    write!(
        out,
        "trailer\n<< /Size {size} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref}\n%%EOF\n"
    )?;
    Ok(out)
}

fn layout_error(error: io::Error) -> RenderError {
    RenderError::layout(error.to_string())
}

/// Renders reports as A4 PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        let mut pages = Pages::new();
        for block in outline(report) {
            let style = Style::of(&block);
            pages.skip(style.space_before);
            if matches!(block, Block::Heading(_)) {
                // Keep a heading on the same page as its first entry.
                pages.reserve(style.leading + BODY.leading);
            }
            for line in wrap(block.text(), style.font, style.size, TEXT_WIDTH - style.indent) {
                pages.line(style, &line).map_err(layout_error)?;
            }
            pages.skip(style.space_after);
        }
        let pages = pages.finish();
        let page_count = pages.len();
        let bytes = assemble(pages, &format!("Development Report: {}", report.pupil_name))
            .map_err(layout_error)?;
        debug!(pupil_id = %report.pupil_id, page_count, size = bytes.len(), "rendered pdf report");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::super::test_support::sample_report;
    use super::*;

    fn render_text(report: &Report) -> String {
        let bytes = PdfRenderer.render(report).expect("render succeeds");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn document_has_header_and_trailer() {
        let text = render_text(&sample_report(&[("Work Behavior", "Focused", Some("B"))]));

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("(Development Report: Max Mustermann) Tj"));
        assert!(text.contains("(Period: 2024-09-01 - 2024-09-30) Tj"));
        assert!(text.contains("(Work Behavior) Tj"));
        assert!(text.contains("([2024-09-01] Focused \\(Grade: B\\)) Tj"));
        assert!(!text.contains("Math"));
    }

    #[test]
    fn startxref_points_at_the_table() {
        let bytes = PdfRenderer
            .render(&sample_report(&[("Work Behavior", "Focused", None)]))
            .expect("render succeeds");
        let text = String::from_utf8_lossy(&bytes);
        let offset: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|line| line.parse().ok())
            .expect("startxref offset");

        assert_eq!(bytes.get(offset..offset + 4), Some(&b"xref"[..]));
    }

    #[test]
    fn long_reports_break_across_pages() {
        let entries: Vec<(&str, &str, Option<&str>)> = (0..120)
            .map(|_| ("Work Behavior", "Completed the weekly reading log", None))
            .collect();
        let text = render_text(&sample_report(&entries));

        assert!(text.matches("/Type /Page /Parent").count() >= 3);
    }

    #[rstest]
    #[case("plain", b"plain".to_vec())]
    #[case("a (b) \\", b"a \\(b\\) \\\\".to_vec())]
    #[case("Müller", b"M\xfcller".to_vec())]
    #[case("Selbstständigkeit", b"Selbstst\xe4ndigkeit".to_vec())]
    #[case("–", vec![0x96])]
    #[case("日本", b"??".to_vec())]
    fn encodes_win_ansi(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(encode(input), expected);
    }

    #[test]
    fn wrapping_respects_the_width() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, Font::Regular, 10, TEXT_WIDTH);

        assert!(lines.len() > 1);
        assert!(
            lines
                .iter()
                .all(|line| Font::Regular.measure(line, 10) <= u64::from(TEXT_WIDTH))
        );
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn unbroken_words_are_split() {
        let text = "x".repeat(400);
        let lines = wrap(&text, Font::Bold, 13, TEXT_WIDTH);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn inner_spacing_is_kept() {
        assert_eq!(
            wrap("  indented  twice", Font::Regular, 10, TEXT_WIDTH),
            vec!["  indented  twice"]
        );
    }

    #[test]
    fn measuring_huge_text_does_not_overflow() {
        let text = "@".repeat(500_000);
        assert_eq!(Font::Regular.measure(&text, 10), 500_000 * 1015 * 10);
    }

    #[test]
    fn huge_unbroken_entry_renders() {
        let text = "@".repeat(500_000);
        let report = sample_report(&[("Work Behavior", text.as_str(), None)]);
        let rendered = PdfRenderer.render(&report).expect("render succeeds");
        assert!(rendered.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn blank_lines_survive() {
        assert_eq!(wrap("one\n\ntwo", Font::Regular, 10, TEXT_WIDTH), vec!["one", "", "two"]);
    }
}
