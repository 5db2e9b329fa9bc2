//! Document format detection from content-type hints and locator suffixes

/// Supported document formats.
///
/// Closed set: adding a format means extending this enum and providing its
/// extractor, not adding another string comparison at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Email message (RFC 822 / MIME)
    Eml,
}

impl DocumentFormat {
    /// Classify a byte stream from its transport hint and locator.
    ///
    /// The content-type hint wins when it maps to a known MIME string;
    /// otherwise the locator's final path segment (query stripped) is
    /// matched case-insensitively on a recognized suffix. `None` means the
    /// format is unknown, which is terminal for extraction; no content
    /// sniffing happens beyond these two signals.
    pub fn detect(content_type: Option<&str>, locator: &str) -> Option<Self> {
        if let Some(hint) = content_type {
            if let Some(format) = Self::from_mime(hint) {
                return Some(format);
            }
        }

        Self::from_extension(extension_from_locator(locator)?)
    }

    /// Map a MIME string (parameters stripped) to a format
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            "message/rfc822" => Some(Self::Eml),
            _ => None,
        }
    }

    /// Map a file extension to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "eml" => Some(Self::Eml),
            _ => None,
        }
    }

    /// Lowercase name for logging and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Eml => "eml",
        }
    }
}

/// Extension of the locator's final path segment, with query parameters stripped
fn extension_from_locator(locator: &str) -> Option<&str> {
    let path = locator.split(['?', '#']).next().unwrap_or(locator);
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_hint_wins() {
        let format = DocumentFormat::detect(Some("application/pdf"), "https://example.com/blob");
        assert_eq!(format, Some(DocumentFormat::Pdf));
    }

    #[test]
    fn hint_parameters_are_stripped() {
        let format = DocumentFormat::detect(Some("text/plain; charset=utf-8"), "whatever");
        assert_eq!(format, Some(DocumentFormat::Txt));
    }

    #[test]
    fn empty_hint_falls_back_to_extension() {
        let format = DocumentFormat::detect(Some(""), "https://example.com/files/policy.docx?x=1");
        assert_eq!(format, Some(DocumentFormat::Docx));
    }

    #[test]
    fn generic_hint_falls_back_to_extension() {
        let format = DocumentFormat::detect(
            Some("application/octet-stream"),
            "https://example.com/policy.pdf?sig=abc",
        );
        assert_eq!(format, Some(DocumentFormat::Pdf));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let format = DocumentFormat::detect(None, "/tmp/POLICY.EML");
        assert_eq!(format, Some(DocumentFormat::Eml));
    }

    #[test]
    fn unknown_hint_and_suffix_is_none() {
        let format = DocumentFormat::detect(Some("text/unknown"), "https://example.com/download");
        assert_eq!(format, None);
    }

    #[test]
    fn query_only_dots_do_not_confuse_detection() {
        let format = DocumentFormat::detect(None, "https://example.com/doc?name=x.pdf");
        assert_eq!(format, None);
    }
}
