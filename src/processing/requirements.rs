//! Vacancy requirement extraction

use crate::error::Result;
use crate::processing::normalizer::TextViews;
use crate::processing::vocabulary::{TermMatcher, Vocabulary};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximal runs of three or more Cyrillic letters
const KEYWORD_PATTERN: &str = r"[а-яё]{3,}";
const MAX_KEYWORDS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyRequirements {
    /// Vocabulary order, not frequency order
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    /// Repeated vacancy words, most frequent first
    pub keywords: Vec<String>,
}

impl VacancyRequirements {
    /// All three lists concatenated, overlaps kept
    pub fn combined(&self) -> Vec<&String> {
        self.technical_skills
            .iter()
            .chain(self.soft_skills.iter())
            .chain(self.keywords.iter())
            .collect()
    }
}

pub struct RequirementExtractor {
    technical_skills: Vec<String>,
    soft_skills: Vec<String>,
    technical_matcher: TermMatcher,
    soft_matcher: TermMatcher,
    keyword_regex: Regex,
}

impl RequirementExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(Self {
            technical_matcher: TermMatcher::new(&vocabulary.technical_skills)?,
            soft_matcher: TermMatcher::new(&vocabulary.soft_skills)?,
            technical_skills: vocabulary.technical_skills.clone(),
            soft_skills: vocabulary.soft_skills.clone(),
            keyword_regex: Regex::new(KEYWORD_PATTERN)?,
        })
    }

    pub fn extract(&self, vacancy: &TextViews) -> VacancyRequirements {
        let requirements = VacancyRequirements {
            technical_skills: Self::present_terms(&self.technical_matcher, &self.technical_skills, &vacancy.lowercase),
            soft_skills: Self::present_terms(&self.soft_matcher, &self.soft_skills, &vacancy.lowercase),
            keywords: self.frequent_keywords(&vacancy.lowercase),
        };

        debug!(
            "Vacancy requirements: {} technical, {} soft, {} keywords",
            requirements.technical_skills.len(),
            requirements.soft_skills.len(),
            requirements.keywords.len()
        );

        requirements
    }

    fn present_terms(matcher: &TermMatcher, terms: &[String], lowercase_text: &str) -> Vec<String> {
        matcher
            .presence(lowercase_text)
            .into_iter()
            .zip(terms)
            .filter(|(present, _)| *present)
            .map(|(_, term)| term.clone())
            .collect()
    }

    /// Words seen more than once, by descending frequency; ties keep first-seen order
    pub fn frequent_keywords(&self, lowercase_text: &str) -> Vec<String> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for mat in self.keyword_regex.find_iter(lowercase_text) {
            let word = mat.as_str();
            match slots.get(word) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(word, counts.len());
                    counts.push((word, 1));
                }
            }
        }

        // stable sort keeps insertion order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .take(MAX_KEYWORDS)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}
