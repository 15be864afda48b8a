//! Input manager for handling different file types

use crate::error::{Result, ResumeCheckerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, LegacyDocExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor,
    TextExtractor,
};
use log::info;
use std::path::Path;

pub struct InputManager {
    max_file_size_bytes: u64,
}

impl InputManager {
    pub fn new(max_file_size_bytes: u64) -> Self {
        Self { max_file_size_bytes }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ResumeCheckerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let size = tokio::fs::metadata(path).await?.len();
        self.check_size(size)?;

        let file_type = FileType::detect(None, path);
        if file_type == FileType::Unknown {
            return Err(ResumeCheckerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        info!(
            "Reading {:?} file {} ({})",
            file_type,
            path.display(),
            format_file_size(size)
        );

        let bytes = tokio::fs::read(path).await?;
        self.extract_bytes(&bytes, file_type)
    }

    /// Extract text from an in-memory upload whose type is already known
    pub fn extract_bytes(&self, bytes: &[u8], file_type: FileType) -> Result<String> {
        self.check_size(bytes.len() as u64)?;

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(bytes)?,
            FileType::Text => PlainTextExtractor.extract(bytes)?,
            FileType::Markdown => MarkdownExtractor.extract(bytes)?,
            FileType::Docx => DocxExtractor.extract(bytes)?,
            FileType::Doc => LegacyDocExtractor.extract(bytes)?,
            FileType::Unknown => {
                return Err(ResumeCheckerError::UnsupportedFormat(
                    "Unsupported file type".to_string(),
                ));
            }
        };

        if text.trim().is_empty() {
            return Err(ResumeCheckerError::InvalidInput(
                "No text could be extracted from the file".to_string(),
            ));
        }

        info!("Extracted {} characters", text.chars().count());
        Ok(text)
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size == 0 {
            return Err(ResumeCheckerError::InvalidInput("File is empty".to_string()));
        }
        if size > self.max_file_size_bytes {
            return Err(ResumeCheckerError::FileTooLarge {
                size,
                limit: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}

/// Human-readable size with one decimal, e.g. "1.5 MB"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
