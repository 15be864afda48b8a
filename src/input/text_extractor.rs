//! Text extraction from various file formats

use crate::error::{Result, ResumeCheckerError};
use encoding_rs::{WINDOWS_1251, WINDOWS_1252};
use pulldown_cmark::{Event as MarkdownEvent, Parser, Tag};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeCheckerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })?;

        if text.trim().is_empty() {
            return Err(ResumeCheckerError::PdfExtraction(
                "PDF contains no extractable text".to_string(),
            ));
        }
        Ok(text)
    }
}

/// UTF-8 text, falling back to Windows-1251 (then Windows-1252) for legacy files
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.strip_prefix('\u{FEFF}').unwrap_or(text).to_string()),
            Err(_) => decode_legacy(bytes),
        }
    }
}

/// The one byte Windows-1251 leaves unassigned
const CP1251_UNASSIGNED: u8 = 0x98;

/// Bytes Windows-1252 leaves undefined
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decode legacy single-byte text: Windows-1251 first, then Windows-1252
pub fn decode_legacy(bytes: &[u8]) -> Result<String> {
    if !bytes.contains(&CP1251_UNASSIGNED) {
        let (text, _) = WINDOWS_1251.decode_without_bom_handling(bytes);
        return Ok(text.into_owned());
    }

    if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
        return Err(ResumeCheckerError::Decoding(
            "Could not detect text encoding".to_string(),
        ));
    }

    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}

/// Markdown flattened to plain lines of text
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let mut text = String::new();
        for event in Parser::new(&markdown_content) {
            match event {
                MarkdownEvent::Text(t) | MarkdownEvent::Code(t) => text.push_str(&t),
                MarkdownEvent::SoftBreak | MarkdownEvent::HardBreak => text.push('\n'),
                MarkdownEvent::End(Tag::Paragraph)
                | MarkdownEvent::End(Tag::Heading(..))
                | MarkdownEvent::End(Tag::Item)
                | MarkdownEvent::End(Tag::CodeBlock(_))
                | MarkdownEvent::End(Tag::TableRow)
                | MarkdownEvent::End(Tag::TableHead) => text.push('\n'),
                MarkdownEvent::End(Tag::TableCell) => text.push(' '),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

const DOCX_BODY: &str = "word/document.xml";

/// Word 2007+ documents: body paragraphs first, then the text of every table cell
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeCheckerError::DocxExtraction(format!("Not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY)
            .map_err(|e| ResumeCheckerError::DocxExtraction(format!("Missing {}: {}", DOCX_BODY, e)))?
            .read_to_string(&mut xml)?;

        let body = parse_docx_body(&xml)?;
        let parts: Vec<String> = body.paragraphs.into_iter().chain(body.cells).collect();

        if parts.is_empty() {
            return Err(ResumeCheckerError::DocxExtraction(
                "DOCX contains no text".to_string(),
            ));
        }
        Ok(parts.join("\n"))
    }
}

#[derive(Debug, Default)]
struct DocxBody {
    /// Non-blank paragraphs outside tables, in document order
    paragraphs: Vec<String>,
    /// Non-blank table cells, row by row; a cell's paragraphs are joined by newlines
    cells: Vec<String>,
}

fn parse_docx_body(xml: &str) -> Result<DocxBody> {
    let mut reader = Reader::from_str(xml);
    let mut body = DocxBody::default();

    let mut table_depth = 0usize;
    let mut in_text = false;
    let mut paragraph = String::new();
    let mut cell: Option<Vec<String>> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ResumeCheckerError::DocxExtraction(format!("Malformed document XML: {}", e)))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tc" if table_depth == 1 => cell = Some(Vec::new()),
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" | b"cr" => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ResumeCheckerError::DocxExtraction(e.to_string()))?;
                paragraph.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = std::mem::take(&mut paragraph);
                    match cell.as_mut() {
                        Some(cell_paragraphs) => cell_paragraphs.push(text),
                        None if table_depth == 0 && !text.trim().is_empty() => body.paragraphs.push(text),
                        None => {}
                    }
                }
                b"tc" if table_depth == 1 => {
                    if let Some(cell_paragraphs) = cell.take() {
                        let text = cell_paragraphs.join("\n");
                        if !text.trim().is_empty() {
                            body.cells.push(text);
                        }
                    }
                }
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(body)
}

/// Legacy binary Word documents are recognized but not read
pub struct LegacyDocExtractor;

impl TextExtractor for LegacyDocExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<String> {
        Err(ResumeCheckerError::UnsupportedFormat(
            "Legacy .doc files are not supported, please save the document as DOCX or PDF".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_utf8() {
        let content = "Тестовый текст в UTF-8".as_bytes();
        assert_eq!(PlainTextExtractor.extract(content).unwrap(), "Тестовый текст в UTF-8");
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let content = "\u{FEFF}Резюме".as_bytes();
        assert_eq!(PlainTextExtractor.extract(content).unwrap(), "Резюме");
    }

    #[test]
    fn test_plain_text_windows_1251() {
        // "Тестовый текст" in Windows-1251
        let content = [
            0xD2, 0xE5, 0xF1, 0xF2, 0xEE, 0xE2, 0xFB, 0xE9, 0x20, 0xF2, 0xE5, 0xEA, 0xF1, 0xF2,
        ];
        assert_eq!(PlainTextExtractor.extract(&content).unwrap(), "Тестовый текст");
    }

    #[test]
    fn test_windows_1251_yo_and_punctuation() {
        assert_eq!(decode_legacy(&[0xA8, 0xB8, 0x96, 0xB9]).unwrap(), "Ёё–№");
    }

    #[test]
    fn test_windows_1252_fallback() {
        // 0x98 is unassigned in Windows-1251 but is a small tilde in Windows-1252
        assert_eq!(decode_legacy(&[0x41, 0x98, 0xE9]).unwrap(), "A\u{02DC}é");
        assert_eq!(PlainTextExtractor.extract(&[0x98]).unwrap(), "\u{02DC}");
    }

    #[test]
    fn test_undecodable_bytes() {
        assert!(matches!(
            decode_legacy(&[0x98, 0x81]),
            Err(ResumeCheckerError::Decoding(_))
        ));
    }

    #[test]
    fn test_markdown_flattened() {
        let md = "# Иван Иванов\n\n## Опыт работы\n\n- **Python** разработка\n- Работа с `Docker`\n";
        let text = MarkdownExtractor.extract(md.as_bytes()).unwrap();

        assert_eq!(text, "Иван Иванов\nОпыт работы\nPython разработка\nРабота с Docker");
    }

    fn docx(document_xml: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCX_BODY, zip::write::FileOptions::default()).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Иван Иванов</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Навыки</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>Python,</w:t></w:r><w:r><w:t xml:space="preserve"> Docker</w:t></w:r></w:p><w:p><w:r><w:t>Git</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr><w:tc><w:p/></w:tc></w:tr>
    </w:tbl>
    <w:p><w:r><w:t>Опыт работы</w:t><w:tab/><w:t>R&amp;D</w:t></w:r></w:p>
    <w:p><w:r><w:t>   </w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_then_table_cells() {
        let text = DocxExtractor.extract(&docx(DOCUMENT)).unwrap();
        assert_eq!(text, "Иван Иванов\nОпыт работы\tR&D\nНавыки\nPython, Docker\nGit");
    }

    #[test]
    fn test_docx_without_text() {
        let empty = docx(r#"<w:document xmlns:w="w"><w:body><w:p/></w:body></w:document>"#);
        assert!(matches!(
            DocxExtractor.extract(&empty),
            Err(ResumeCheckerError::DocxExtraction(_))
        ));
    }

    #[test]
    fn test_docx_requires_zip_archive() {
        assert!(matches!(
            DocxExtractor.extract(b"PK\x03\x04"),
            Err(ResumeCheckerError::DocxExtraction(_))
        ));
    }

    #[test]
    fn test_legacy_doc_rejected() {
        assert!(matches!(
            LegacyDocExtractor.extract(b"\xD0\xCF\x11\xE0"),
            Err(ResumeCheckerError::UnsupportedFormat(_))
        ));
    }
}
