//! Office Open XML (`.docx`) encoder for laid-out blocks.
//!
//! Writes the minimal package Word needs: content types, package and
//! document relationships, styles, the main document part and, when a
//! logo is present, its media part.

use super::layout::{Align, Block, Logo, TableStyle};
use crate::error::Result;
use std::io::{Cursor, Write};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING_COLOR: &str = "0B1C3F";
const STYLES_REL_ID: &str = "rId1";
const LOGO_REL_ID: &str = "rId2";
const LOGO_PART: &str = "media/logo.png";
/// Printable width of an A4 page with 1 inch margins, in twentieths of a point
const TEXT_WIDTH_TWIPS: u32 = 9026;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub struct DocxWriter {
    font_family: String,
}

impl DocxWriter {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }

    /// Encodes `blocks` as a `.docx` package.
    ///
    /// Entry timestamps are fixed so identical blocks give identical bytes.
    pub fn write(&self, blocks: &[Block]) -> Result<Vec<u8>> {
        Ok(self.write_package(blocks)?)
    }

    fn write_package(&self, blocks: &[Block]) -> ZipResult<Vec<u8>> {
        let logo = blocks.iter().find_map(|block| match block {
            Block::Image { logo, .. } => Some(logo),
            _ => None,
        });

        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

        let options = FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types().as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(package_rels().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(document_rels(logo.is_some()).as_bytes())?;

        zip.start_file("word/styles.xml", options)?;
        zip.write_all(self.styles().as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(self.document(blocks).as_bytes())?;

        if let Some(logo) = logo {
            // PNG is already compressed
            let stored = options.compression_method(zip::CompressionMethod::Stored);
            zip.start_file(format!("word/{}", LOGO_PART), stored)?;
            zip.write_all(&logo.bytes)?;
        }

        zip.finish()?;
        drop(zip);

        Ok(buffer)
    }

    fn document(&self, blocks: &[Block]) -> String {
        let mut body = String::new();
        let mut drawing_id = 0u32;

        for block in blocks {
            match block {
                Block::Image { logo, align } => {
                    drawing_id += 1;
                    body.push_str(&image_paragraph(logo, *align, drawing_id));
                }
                Block::Title(text) => {
                    body.push_str(&self.paragraph(text, Some("Title"), Align::Center, None));
                }
                Block::Heading { level, text } => {
                    let style = format!("Heading{}", level);
                    let color = (*level >= 2).then_some(HEADING_COLOR);
                    body.push_str(&self.paragraph(text, Some(style.as_str()), Align::Left, color));
                }
                Block::Paragraph { text, align } => {
                    body.push_str(&self.paragraph(text, None, *align, None));
                }
                Block::Table {
                    style,
                    header,
                    rows,
                } => body.push_str(&self.table(*style, header, rows)),
            }
        }

        format!(
            concat!(
                "{decl}<w:document xmlns:w=\"{w}\" xmlns:r=\"{r}\" xmlns:wp=\"{wp}\" ",
                "xmlns:a=\"{a}\" xmlns:pic=\"{pic}\"><w:body>{body}",
                "<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>",
                "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" ",
                "w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/></w:sectPr>",
                "</w:body></w:document>"
            ),
            decl = XML_DECL,
            w = NS_W,
            r = NS_R,
            wp = NS_WP,
            a = NS_A,
            pic = NS_PIC,
            body = body,
        )
    }

    fn paragraph(
        &self,
        text: &str,
        style: Option<&str>,
        align: Align,
        color: Option<&str>,
    ) -> String {
        let mut ppr = String::new();
        if let Some(style) = style {
            ppr.push_str(&format!("<w:pStyle w:val=\"{}\"/>", style));
        }
        if align != Align::Left {
            ppr.push_str(&format!("<w:jc w:val=\"{}\"/>", align_value(align)));
        }

        let ppr = if ppr.is_empty() {
            ppr
        } else {
            format!("<w:pPr>{}</w:pPr>", ppr)
        };
        format!("<w:p>{}{}</w:p>", ppr, self.run(text, false, color))
    }

    fn run(&self, text: &str, bold: bool, color: Option<&str>) -> String {
        let font = escape(&self.font_family);
        let mut rpr = format!(
            "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:eastAsia=\"{0}\"/>",
            font
        );
        if bold {
            rpr.push_str("<w:b/>");
        }
        if let Some(color) = color {
            rpr.push_str(&format!("<w:color w:val=\"{}\"/>", color));
        }

        // Word ignores raw newlines inside w:t
        let content = text
            .split('\n')
            .map(|line| {
                format!(
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape(line.trim_end_matches('\r'))
                )
            })
            .collect::<Vec<_>>()
            .join("<w:br/>");

        format!("<w:r><w:rPr>{}</w:rPr>{}</w:r>", rpr, content)
    }

    fn table(&self, style: TableStyle, header: &[String], rows: &[Vec<String>]) -> String {
        let columns = header.len().max(1);
        let col_width = TEXT_WIDTH_TWIPS / columns as u32;

        let mut xml = format!(
            concat!(
                "<w:tbl><w:tblPr><w:tblStyle w:val=\"{}\"/><w:tblW w:w=\"5000\" w:type=\"pct\"/>",
                "<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" ",
                "w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/></w:tblPr><w:tblGrid>"
            ),
            table_style_id(style)
        );
        for _ in 0..columns {
            xml.push_str(&format!("<w:gridCol w:w=\"{}\"/>", col_width));
        }
        xml.push_str("</w:tblGrid>");

        xml.push_str(&self.table_row(header, columns, col_width, true));
        for row in rows {
            xml.push_str(&self.table_row(row, columns, col_width, false));
        }

        xml.push_str("</w:tbl>");
        xml
    }

    fn table_row(
        &self,
        cells: &[String],
        columns: usize,
        col_width: u32,
        is_header: bool,
    ) -> String {
        let mut xml = String::from("<w:tr>");
        if is_header {
            xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for i in 0..columns {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            xml.push_str(&format!(
                "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"dxa\"/></w:tcPr><w:p>{}</w:p></w:tc>",
                col_width,
                self.run(text, is_header, None)
            ));
        }
        xml.push_str("</w:tr>");
        xml
    }

    fn styles(&self) -> String {
        let font = escape(&self.font_family);
        format!(
            concat!(
                "{decl}<w:styles xmlns:w=\"{w}\">",
                "<w:docDefaults><w:rPrDefault><w:rPr>",
                "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:eastAsia=\"{font}\" w:cs=\"{font}\"/>",
                "<w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/><w:lang w:val=\"en-US\" w:eastAsia=\"zh-TW\"/>",
                "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
                "<w:spacing w:after=\"120\" w:line=\"276\" w:lineRule=\"auto\"/>",
                "</w:pPr></w:pPrDefault></w:docDefaults>",
                "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">",
                "<w:name w:val=\"Normal\"/><w:qFormat/></w:style>",
                "<w:style w:type=\"paragraph\" w:styleId=\"Title\"><w:name w:val=\"Title\"/>",
                "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/><w:qFormat/>",
                "<w:pPr><w:spacing w:after=\"240\"/></w:pPr>",
                "<w:rPr><w:b/><w:color w:val=\"{color}\"/><w:sz w:val=\"48\"/><w:szCs w:val=\"48\"/></w:rPr></w:style>",
                "<w:style w:type=\"paragraph\" w:styleId=\"Heading1\"><w:name w:val=\"heading 1\"/>",
                "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/><w:qFormat/>",
                "<w:pPr><w:keepNext/><w:spacing w:before=\"360\" w:after=\"120\"/><w:outlineLvl w:val=\"0\"/></w:pPr>",
                "<w:rPr><w:b/><w:sz w:val=\"32\"/><w:szCs w:val=\"32\"/></w:rPr></w:style>",
                "<w:style w:type=\"paragraph\" w:styleId=\"Heading2\"><w:name w:val=\"heading 2\"/>",
                "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/><w:qFormat/>",
                "<w:pPr><w:keepNext/><w:spacing w:before=\"240\" w:after=\"80\"/><w:outlineLvl w:val=\"1\"/></w:pPr>",
                "<w:rPr><w:b/><w:sz w:val=\"26\"/><w:szCs w:val=\"26\"/></w:rPr></w:style>",
                "<w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\">",
                "<w:name w:val=\"Normal Table\"/><w:tblPr><w:tblInd w:w=\"0\" w:type=\"dxa\"/>",
                "<w:tblCellMar><w:top w:w=\"0\" w:type=\"dxa\"/><w:left w:w=\"108\" w:type=\"dxa\"/>",
                "<w:bottom w:w=\"0\" w:type=\"dxa\"/><w:right w:w=\"108\" w:type=\"dxa\"/></w:tblCellMar>",
                "</w:tblPr></w:style>",
                "<w:style w:type=\"table\" w:styleId=\"TableGrid\"><w:name w:val=\"Table Grid\"/>",
                "<w:basedOn w:val=\"TableNormal\"/><w:tblPr><w:tblBorders>",
                "<w:top w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "<w:left w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "<w:bottom w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "<w:right w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "<w:insideH w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "<w:insideV w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                "</w:tblBorders></w:tblPr></w:style>",
                "<w:style w:type=\"table\" w:styleId=\"LightShadingAccent1\">",
                "<w:name w:val=\"Light Shading Accent 1\"/><w:basedOn w:val=\"TableNormal\"/>",
                "<w:rPr><w:color w:val=\"365F91\"/></w:rPr><w:tblPr><w:tblBorders>",
                "<w:top w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"4F81BD\"/>",
                "<w:bottom w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"4F81BD\"/>",
                "</w:tblBorders></w:tblPr>",
                "<w:tblStylePr w:type=\"firstRow\"><w:rPr><w:b/></w:rPr><w:tcPr><w:tcBorders>",
                "<w:bottom w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"4F81BD\"/>",
                "</w:tcBorders></w:tcPr></w:tblStylePr>",
                "<w:tblStylePr w:type=\"band1Horz\"><w:tcPr>",
                "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"D3DFEE\"/></w:tcPr></w:tblStylePr>",
                "</w:style></w:styles>"
            ),
            decl = XML_DECL,
            w = NS_W,
            font = font,
            color = HEADING_COLOR,
        )
    }
}

fn content_types() -> String {
    format!(
        concat!(
            "{decl}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
            "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
            "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
            "<Default Extension=\"png\" ContentType=\"image/png\"/>",
            "<Override PartName=\"/word/document.xml\" ContentType=\"{mime}.main+xml\"/>",
            "<Override PartName=\"/word/styles.xml\" ",
            "ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>",
            "</Types>"
        ),
        decl = XML_DECL,
        mime = DOCX_MIME,
    )
}

fn package_rels() -> String {
    format!(
        concat!(
            "{decl}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
            "<Relationship Id=\"rId1\" Type=\"{base}/officeDocument\" Target=\"word/document.xml\"/>",
            "</Relationships>"
        ),
        decl = XML_DECL,
        base = REL_BASE,
    )
}

fn document_rels(with_logo: bool) -> String {
    let mut rels = format!(
        "<Relationship Id=\"{}\" Type=\"{}/styles\" Target=\"styles.xml\"/>",
        STYLES_REL_ID, REL_BASE
    );
    if with_logo {
        rels.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}/image\" Target=\"{}\"/>",
            LOGO_REL_ID, REL_BASE, LOGO_PART
        ));
    }
    format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
        XML_DECL, rels
    )
}

fn image_paragraph(logo: &Logo, align: Align, drawing_id: u32) -> String {
    let (cx, cy) = logo.extent_emu();
    format!(
        concat!(
            "<w:p><w:pPr><w:jc w:val=\"{jc}\"/></w:pPr><w:r><w:drawing>",
            "<wp:inline distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\">",
            "<wp:extent cx=\"{cx}\" cy=\"{cy}\"/><wp:docPr id=\"{id}\" name=\"Logo {id}\"/>",
            "<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect=\"1\"/></wp:cNvGraphicFramePr>",
            "<a:graphic><a:graphicData uri=\"{pic}\"><pic:pic>",
            "<pic:nvPicPr><pic:cNvPr id=\"0\" name=\"logo.png\"/><pic:cNvPicPr/></pic:nvPicPr>",
            "<pic:blipFill><a:blip r:embed=\"{rel}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>",
            "<pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>",
            "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr>",
            "</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"
        ),
        jc = align_value(align),
        cx = cx,
        cy = cy,
        id = drawing_id,
        pic = NS_PIC,
        rel = LOGO_REL_ID,
    )
}

fn align_value(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn table_style_id(style: TableStyle) -> &'static str {
    match style {
        TableStyle::Shaded => "LightShadingAccent1",
        TableStyle::Grid => "TableGrid",
    }
}

/// Escapes XML text and drops characters outside the XML 1.0 `Char` range
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
