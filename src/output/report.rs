//! Report structures wrapping an analysis result with run metadata

use crate::processing::analyzer::AnalysisResult;
use crate::processing::scoring::ScoringWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub weights: ScoringWeights,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub checker_version: String,
    /// Resume file analyzed
    pub resume_source: String,
    /// Vacancy file analyzed
    pub vacancy_source: String,
}

impl ReportMetadata {
    pub fn new(resume_source: &Path, vacancy_source: &Path, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            processing_time_ms,
            checker_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: resume_source.display().to_string(),
            vacancy_source: vacancy_source.display().to_string(),
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl AnalysisReport {
    pub fn new(metadata: ReportMetadata, weights: ScoringWeights, result: AnalysisResult) -> Self {
        Self {
            metadata,
            weights,
            result,
        }
    }
}

/// Verdict band for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "ОТЛИЧНО",
            ScoreBand::Good => "ХОРОШО",
            ScoreBand::Fair => "УДОВЛЕТВОРИТЕЛЬНО",
            ScoreBand::Poor => "СЛАБО",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }
}
