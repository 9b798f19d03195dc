//! Office Open XML (`.docx`) report packages.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::Report;
use crate::domain::ports::{RenderError, ReportRenderer};

use super::{Block, outline};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
    r#"</Types>"#,
);

/// Paragraph styles referenced from the document body.
const STYLES: &str = concat!(
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/>"#,
    r#"<w:pPr><w:spacing w:after="120"/></w:pPr><w:rPr><w:sz w:val="22"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:next w:val="Normal"/><w:pPr><w:spacing w:after="240"/></w:pPr>"#,
    r#"<w:rPr><w:b/><w:sz w:val="48"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="0"/></w:pPr>"#,
    r#"<w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr></w:style>"#,
);

const NUMBERING: &str = concat!(
    r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
    r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/>"#,
    r#"<w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>"#,
    r#"</w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
);

/// A4 with 2 cm margins, in twentieths of a point.
const SECTION: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
    r#"<w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="708" w:footer="708" w:gutter="0"/>"#,
    r#"</w:sectPr>"#,
);

/// Escape text for XML character data and attribute values.
///
/// Characters XML 1.0 cannot carry are dropped.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// One run per line; embedded newlines become explicit breaks.
fn runs(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)))
        .collect::<Vec<_>>()
        .join("<w:br/>")
}

fn paragraph(block: &Block) -> String {
    let style = match block {
        Block::Title(_) => Some("Title"),
        Block::Paragraph(_) => None,
        Block::Heading(_) => Some("Heading1"),
        Block::Bullet(_) => Some("ListBullet"),
    };
    let properties = style
        .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{id}"/></w:pPr>"#))
        .unwrap_or_default();
    format!("<w:p>{properties}<w:r>{}</w:r></w:p>", runs(block.text()))
}

fn document_xml(report: &Report) -> String {
    let body: String = outline(report).iter().map(paragraph).collect();
    format!(r#"{XML_DECLARATION}<w:document xmlns:w="{WORD_NS}"><w:body>{body}{SECTION}</w:body></w:document>"#)
}

fn package_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{OFFICE_REL}/officeDocument" Target="word/document.xml"/></Relationships>"#
    )
}

fn document_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{OFFICE_REL}/styles" Target="styles.xml"/><Relationship Id="rId2" Type="{OFFICE_REL}/numbering" Target="numbering.xml"/></Relationships>"#
    )
}

fn wrap_part(root: &str, body: &str) -> String {
    format!(r#"{XML_DECLARATION}<w:{root} xmlns:w="{WORD_NS}">{body}</w:{root}>"#)
}

fn package_error(error: impl std::fmt::Display) -> RenderError {
    RenderError::package(error.to_string())
}

/// Renders reports as word-processor documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    fn package(report: &Report) -> Result<Vec<u8>, RenderError> {
        let parts = [
            (
                "[Content_Types].xml",
                format!("{XML_DECLARATION}{CONTENT_TYPES}"),
            ),
            ("_rels/.rels", package_relationships()),
            ("word/document.xml", document_xml(report)),
            ("word/_rels/document.xml.rels", document_relationships()),
            ("word/styles.xml", wrap_part("styles", STYLES)),
            ("word/numbering.xml", wrap_part("numbering", NUMBERING)),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, body) in parts {
            zip.start_file(name, opts).map_err(package_error)?;
            zip.write_all(body.as_bytes()).map_err(package_error)?;
        }
        let cursor = zip.finish().map_err(package_error)?;
        Ok(cursor.into_inner())
    }
}

impl ReportRenderer for DocxRenderer {
    fn media_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        let bytes = Self::package(report)?;
        debug!(pupil_id = %report.pupil_id, size = bytes.len(), "rendered docx report");
        Ok(bytes)
    }
}
