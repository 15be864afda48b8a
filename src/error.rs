//! Error handling for the resume checker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeCheckerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    Decoding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeCheckerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeCheckerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeCheckerError::AnalysisFailed(err.to_string())
    }
}

impl From<regex::Error> for ResumeCheckerError {
    fn from(err: regex::Error) -> Self {
        ResumeCheckerError::Processing(format!("Invalid pattern: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_conversion() {
        let err: ResumeCheckerError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ResumeCheckerError::AnalysisFailed(ref msg) if msg == "boom"));
    }

    #[test]
    fn test_file_too_large_message() {
        let err = ResumeCheckerError::FileTooLarge { size: 10, limit: 5 };
        assert_eq!(err.to_string(), "File too large: 10 bytes (limit 5 bytes)");
    }
}
