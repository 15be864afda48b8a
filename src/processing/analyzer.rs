//! Analysis engine: resume text + vacancy text in, scored result out.
//!
//! The analyzer owns only read-only tables and compiled patterns, so one
//! instance can be shared across threads; every call builds its own
//! intermediate data.

use crate::error::{Result, ResumeCheckerError};
use crate::processing::keyword_matcher::match_keywords;
use crate::processing::normalizer::TextViews;
use crate::processing::recommendations::{generate_recommendations, Recommendation, RecommendationContext};
use crate::processing::requirements::{RequirementExtractor, VacancyRequirements};
use crate::processing::resume_parser::{ParsedResume, ResumeParser};
use crate::processing::scoring::{self, ScoreBreakdown, ScoringWeights};
use crate::processing::vocabulary::{SectionKind, Vocabulary};
use log::debug;
use serde::{Deserialize, Serialize};

/// Sections counted by the compatibility summary
const EXPECTED_SECTIONS: [SectionKind; 4] = [
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Contacts,
];

const ATS_FRIENDLY_SCORE: u8 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Weighted aggregate, 0-100
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<Recommendation>,
    pub parsed_resume: ParsedResume,
    pub matched_keywords: Vec<String>,
    /// At most ten entries
    pub missing_keywords: Vec<String>,
    pub ats_compatibility: AtsCompatibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCompatibility {
    pub parsing_success: bool,
    pub standard_sections_found: usize,
    pub total_sections_expected: usize,
    pub ats_friendly: bool,
}

pub struct ResumeAnalyzer {
    parser: ResumeParser,
    extractor: RequirementExtractor,
    weights: ScoringWeights,
    vocabulary: Vocabulary,
}

impl ResumeAnalyzer {
    /// Analyzer with the built-in vocabulary and default weights
    pub fn new() -> Result<Self> {
        Self::with_settings(Vocabulary::default(), ScoringWeights::default())
    }

    pub fn with_settings(vocabulary: Vocabulary, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;

        Ok(Self {
            parser: ResumeParser::new(&vocabulary)?,
            extractor: RequirementExtractor::new(&vocabulary)?,
            weights,
            vocabulary,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a resume against a vacancy.
    ///
    /// Fails only when either text is blank after whitespace normalization.
    pub fn analyze(&self, resume_text: &str, vacancy_text: &str) -> Result<AnalysisResult> {
        let resume_views = TextViews::new(resume_text);
        if resume_views.is_blank() {
            return Err(ResumeCheckerError::InvalidInput(
                "Resume text is empty".to_string(),
            ));
        }

        let vacancy_views = TextViews::verbatim(vacancy_text);
        if vacancy_views.is_blank() {
            return Err(ResumeCheckerError::InvalidInput(
                "Vacancy text is empty".to_string(),
            ));
        }

        let resume = self.parser.parse(&resume_views);
        let requirements = self.extractor.extract(&vacancy_views);

        Ok(self.score(resume, &requirements))
    }

    fn score(&self, resume: ParsedResume, requirements: &VacancyRequirements) -> AnalysisResult {
        let keyword_match = match_keywords(&resume, requirements);

        let breakdown = ScoreBreakdown {
            keywords: keyword_match.score,
            structure: scoring::score_structure(&resume),
            contacts: scoring::score_contacts(&resume),
            experience: scoring::score_experience(&resume, requirements),
        };
        let score = self.weights.aggregate(&breakdown);

        debug!("Score {} with breakdown {:?}", score, breakdown);

        let recommendations = generate_recommendations(&RecommendationContext {
            breakdown: &breakdown,
            resume: &resume,
            keywords: &keyword_match,
        });

        let ats_compatibility = AtsCompatibility {
            parsing_success: true,
            standard_sections_found: EXPECTED_SECTIONS
                .iter()
                .filter(|kind| resume.sections.contains(*kind))
                .count(),
            total_sections_expected: EXPECTED_SECTIONS.len(),
            ats_friendly: score >= ATS_FRIENDLY_SCORE,
        };

        AnalysisResult {
            score,
            breakdown,
            recommendations,
            missing_keywords: keyword_match.reported_missing(),
            matched_keywords: keyword_match.matched,
            parsed_resume: resume,
            ats_compatibility,
        }
    }
}
