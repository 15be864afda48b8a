//! Keyword coverage of vacancy requirements by the resume text

use crate::processing::requirements::VacancyRequirements;
use crate::processing::resume_parser::ParsedResume;
use serde::{Deserialize, Serialize};

/// Upper bound on the externally reported missing keywords
pub const MISSING_KEYWORDS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Coverage, 0-100
    pub score: u8,
    pub matched: Vec<String>,
    /// Every unmatched requirement, uncapped
    pub missing: Vec<String>,
}

impl KeywordMatch {
    /// Missing keywords as reported to the caller
    pub fn reported_missing(&self) -> Vec<String> {
        self.missing
            .iter()
            .take(MISSING_KEYWORDS_LIMIT)
            .cloned()
            .collect()
    }
}

/// Test every requirement (duplicates across lists included) against the resume text.
///
/// A term listed both as a skill and as a frequent keyword counts twice in
/// the denominator and, when present, twice in the numerator.
pub fn match_keywords(resume: &ParsedResume, requirements: &VacancyRequirements) -> KeywordMatch {
    let all_requirements = requirements.combined();

    if all_requirements.is_empty() {
        return KeywordMatch {
            score: 100,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let resume_lower = resume.raw_text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = all_requirements
        .into_iter()
        .cloned()
        .partition(|requirement| resume_lower.contains(&requirement.to_lowercase()));

    let total = matched.len() + missing.len();
    // integer half-up rounding of matched / total * 100
    let score = ((matched.len() * 200 + total) / (2 * total)).min(100) as u8;

    KeywordMatch {
        score,
        matched,
        missing,
    }
}
