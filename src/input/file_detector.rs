//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Docx,
    Doc,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "docx" => FileType::Docx,
            "doc" => FileType::Doc,
            _ => FileType::Unknown,
        }
    }

    pub fn from_mime(content_type: &str) -> Self {
        match content_type.trim().to_lowercase().as_str() {
            "text/plain" => FileType::Text,
            "text/markdown" => FileType::Markdown,
            "application/pdf" => FileType::Pdf,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => FileType::Docx,
            "application/msword" => FileType::Doc,
            _ => FileType::Unknown,
        }
    }

    /// MIME type wins when it is recognized, otherwise the file extension decides
    pub fn detect(content_type: Option<&str>, path: &Path) -> Self {
        let by_mime = content_type.map(Self::from_mime).unwrap_or(FileType::Unknown);
        if by_mime != FileType::Unknown {
            return by_mime;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}
