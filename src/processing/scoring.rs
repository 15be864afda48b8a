//! Dimension scorers and the weighted aggregate

use crate::error::{Result, ResumeCheckerError};
use crate::processing::requirements::VacancyRequirements;
use crate::processing::resume_parser::ParsedResume;
use crate::processing::vocabulary::SectionKind;
use serde::{Deserialize, Serialize};

/// Sections every resume is expected to have
pub const CORE_SECTIONS: [SectionKind; 3] = [
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
];

/// Per-dimension scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: u8,
    pub structure: u8,
    pub contacts: u8,
    pub experience: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keywords: f64,
    pub structure: f64,
    pub contacts: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keywords: 0.40,
            structure: 0.30,
            contacts: 0.15,
            experience: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.keywords + self.structure + self.contacts + self.experience
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [self.keywords, self.structure, self.contacts, self.experience];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(ResumeCheckerError::Configuration(
                "Scoring weights must lie between 0 and 1".to_string(),
            ));
        }
        if (self.total() - 1.0).abs() > 0.001 {
            return Err(ResumeCheckerError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                self.total()
            )));
        }
        Ok(())
    }

    /// Weighted sum of the breakdown, rounded to the nearest integer
    pub fn aggregate(&self, breakdown: &ScoreBreakdown) -> u8 {
        let total = f64::from(breakdown.keywords) * self.keywords
            + f64::from(breakdown.structure) * self.structure
            + f64::from(breakdown.contacts) * self.contacts
            + f64::from(breakdown.experience) * self.experience;

        total.round().clamp(0.0, 100.0) as u8
    }
}

/// 70 points spread over the core sections, 15 for a contacts section,
/// 15 for a resume broken into more than five lines
pub fn score_structure(resume: &ParsedResume) -> u8 {
    let found = CORE_SECTIONS
        .iter()
        .filter(|kind| resume.sections.contains(*kind))
        .count();

    let mut score = found as f64 / CORE_SECTIONS.len() as f64 * 70.0;

    if resume.sections.contains(&SectionKind::Contacts) {
        score += 15.0;
    }

    if resume.line_count > 5 {
        score += 15.0;
    }

    // truncated, not rounded: two of three sections give 46, not 47
    score.min(100.0) as u8
}

pub fn score_contacts(resume: &ParsedResume) -> u8 {
    let mut score = 0;

    if resume.email.is_some() {
        score += 40;
    }
    if resume.phone.is_some() {
        score += 40;
    }
    if resume.name.is_some() {
        score += 20;
    }

    score
}

pub fn score_experience(resume: &ParsedResume, requirements: &VacancyRequirements) -> u8 {
    if resume.experience_text.is_empty() {
        return 0;
    }

    let mut score: u32 = 40;

    let length = resume.experience_text.chars().count();
    score += match length {
        l if l > 200 => 30,
        l if l > 100 => 20,
        l if l > 50 => 10,
        _ => 0,
    };

    let experience_lower = resume.experience_text.to_lowercase();
    let relevant = requirements
        .technical_skills
        .iter()
        .filter(|skill| experience_lower.contains(&skill.to_lowercase()))
        .count() as u32;

    score += (relevant * 5).min(30);

    score.min(100) as u8
}
