//! Format-specific text extraction
//!
//! One converter per `DocumentFormat`, each deterministic for identical
//! bytes. Unknown formats never reach this module; detection fails first.

use crate::error::{Error, Result};

use super::detector::DocumentFormat;

/// Multi-format text extractor
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from document bytes
    pub fn extract(format: DocumentFormat, data: &[u8]) -> Result<String> {
        match format {
            DocumentFormat::Pdf => Self::extract_pdf(data),
            DocumentFormat::Docx => Self::extract_docx(data),
            DocumentFormat::Txt => Ok(Self::extract_txt(data)),
            DocumentFormat::Eml => Self::extract_eml(data),
        }
    }

    /// Extract PDF text page by page.
    ///
    /// Pages with no extractable text (scanned images) are skipped silently;
    /// surviving pages are joined with newlines.
    fn extract_pdf(data: &[u8]) -> Result<String> {
        let pages = match pdf_extract::extract_text_from_mem_by_pages(data) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!("pdf-extract failed: {}, trying fallback", e);
                return Self::extract_pdf_fallback(data);
            }
        };

        let mut kept = Vec::new();
        for (number, page) in pages.iter().enumerate() {
            let page = page.trim();
            if page.is_empty() {
                tracing::debug!("page {} has no extractable text, skipping", number + 1);
                continue;
            }
            kept.push(page.to_string());
        }

        if kept.is_empty() {
            return Err(Error::UnsupportedFormat(
                "PDF has no extractable text (may be scanned images)".to_string(),
            ));
        }

        Ok(kept.join("\n"))
    }

    /// Fallback PDF extraction using lopdf directly
    fn extract_pdf_fallback(data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extract("pdf", format!("failed to load PDF: {}", e)))?;

        let mut kept = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) if !text.trim().is_empty() => kept.push(text.trim().to_string()),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("could not extract text for page {}: {}", page_number, e);
                }
            }
        }

        if kept.is_empty() {
            return Err(Error::UnsupportedFormat(
                "PDF has no extractable text (may be scanned images)".to_string(),
            ));
        }

        Ok(kept.join("\n"))
    }

    /// Extract DOCX paragraph text in document order.
    ///
    /// Tables, headers, and footers are not extracted.
    fn extract_docx(data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::extract("docx", e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                let mut line = String::new();
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(text) = child {
                                line.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        Ok(paragraphs.join("\n"))
    }

    /// Decode plain text with heuristic encoding detection.
    ///
    /// Undecodable byte sequences are dropped, never an error.
    fn extract_txt(data: &[u8]) -> String {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(data, true);
        let encoding = detector.guess(None, true);

        let (text, _, had_errors) = encoding.decode(data);
        if had_errors {
            text.chars()
                .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                .collect()
        } else {
            text.into_owned()
        }
    }

    /// Extract text from a MIME message.
    ///
    /// Walks all parts: text/plain parts are appended decoded (the parser
    /// applies each part's declared charset, defaulting to UTF-8); text/html
    /// parts are decoded then stripped to plain text; everything else is
    /// ignored. Parts are joined with newlines.
    fn extract_eml(data: &[u8]) -> Result<String> {
        let message = mail_parser::MessageParser::default()
            .parse(data)
            .ok_or_else(|| Error::extract("eml", "not a parseable MIME message"))?;

        let mut parts = Vec::new();
        for part in &message.parts {
            match &part.body {
                mail_parser::PartType::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        parts.push(text.to_string());
                    }
                }
                mail_parser::PartType::Html(html) => {
                    let text = Self::strip_html(html);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
                _ => {}
            }
        }

        Ok(parts.join("\n"))
    }

    /// Strip HTML markup down to its text content
    fn strip_html(html: &str) -> String {
        let document = scraper::Html::parse_document(html);

        let mut content = String::new();
        for piece in document.root_element().text() {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !content.is_empty() {
                content.push(' ');
            }
            content.push_str(trimmed);
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_decodes_utf8() {
        let text = TextExtractor::extract(DocumentFormat::Txt, "knee surgery in Pune".as_bytes())
            .unwrap();
        assert_eq!(text, "knee surgery in Pune");
    }

    #[test]
    fn txt_decodes_legacy_encodings() {
        // "café" in Windows-1252
        let bytes = b"caf\xe9 policy";
        let text = TextExtractor::extract(DocumentFormat::Txt, bytes).unwrap();
        assert_eq!(text, "caf\u{e9} policy");
    }

    #[test]
    fn txt_extraction_is_deterministic() {
        let bytes = b"grace period of thirty days";
        let first = TextExtractor::extract(DocumentFormat::Txt, bytes).unwrap();
        let second = TextExtractor::extract(DocumentFormat::Txt, bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn eml_collects_plain_and_html_parts() {
        let raw = concat!(
            "From: insurer@example.com\r\n",
            "To: holder@example.com\r\n",
            "Subject: Policy terms\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/alternative; boundary=\"b1\"\r\n",
            "\r\n",
            "--b1\r\n",
            "Content-Type: text/plain; charset=\"utf-8\"\r\n",
            "\r\n",
            "Knee surgery is covered for ages 40-60.\r\n",
            "--b1\r\n",
            "Content-Type: text/html; charset=\"utf-8\"\r\n",
            "\r\n",
            "<html><body><p>Knee surgery is <b>covered</b> for ages 40-60.</p></body></html>\r\n",
            "--b1--\r\n",
        );

        let text = TextExtractor::extract(DocumentFormat::Eml, raw.as_bytes()).unwrap();

        assert!(text.contains("Knee surgery is covered for ages 40-60."));
        // The HTML part contributes stripped text, not markup.
        assert!(text.contains("Knee surgery is covered for ages 40-60"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn eml_ignores_binary_parts() {
        let raw = concat!(
            "From: insurer@example.com\r\n",
            "Subject: Card\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/mixed; boundary=\"b2\"\r\n",
            "\r\n",
            "--b2\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "See attachment.\r\n",
            "--b2\r\n",
            "Content-Type: application/octet-stream\r\n",
            "Content-Transfer-Encoding: base64\r\n",
            "\r\n",
            "AAECAwQ=\r\n",
            "--b2--\r\n",
        );

        let text = TextExtractor::extract(DocumentFormat::Eml, raw.as_bytes()).unwrap();
        assert_eq!(text, "See attachment.");
    }

    #[test]
    fn strip_html_flattens_markup() {
        let text = TextExtractor::strip_html("<p>Pre-existing <b>diseases</b></p><p>excluded</p>");
        assert_eq!(text, "Pre-existing diseases excluded");
    }
}
