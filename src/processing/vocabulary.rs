//! Skill and section vocabularies shared by the resume parser and the
//! vacancy requirement extractor.
//!
//! The built-in tables target the Russian-language IT job market. Every
//! component receives a [`Vocabulary`] value instead of reaching for global
//! state, so tests can substitute their own tables.

use crate::error::{Result, ResumeCheckerError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard resume section categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Contacts,
    About,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Contacts,
        SectionKind::About,
    ];

    /// Heading name shown to the candidate in recommendations
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Experience => "опыт работы",
            SectionKind::Education => "образование",
            SectionKind::Skills => "навыки",
            SectionKind::Contacts => "контакты",
            SectionKind::About => "о себе",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Contacts => "contacts",
            SectionKind::About => "about",
        };
        write!(f, "{}", name)
    }
}

/// Keywords whose presence marks a section category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMarkers {
    pub kind: SectionKind,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub sections: Vec<SectionMarkers>,
    pub position_labels: Vec<String>,
}

const TECHNICAL_SKILLS: &[&str] = &[
    "python", "java", "javascript", "react", "angular", "vue", "node.js", "express",
    "django", "flask", "spring", "hibernate", "sql", "postgresql", "mysql", "mongodb",
    "redis", "docker", "kubernetes", "aws", "azure", "git", "jenkins", "ci/cd",
    "html", "css", "typescript", "php", "laravel", "symfony", "c++", "c#", ".net",
    "go", "rust", "scala", "kotlin", "swift", "flutter", "react native", "android",
    "ios", "linux", "windows", "macos", "nginx", "apache", "elasticsearch", "kafka",
];

const SOFT_SKILLS: &[&str] = &[
    "коммуникация", "командная работа", "лидерство", "управление проектами",
    "аналитическое мышление", "решение проблем", "креативность", "инициативность",
    "адаптивность", "обучаемость", "стрессоустойчивость", "внимательность к деталям",
];

const SECTION_MARKERS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Experience,
        &["опыт работы", "опыт", "карьера", "работа", "трудовая деятельность", "профессиональный опыт"],
    ),
    (
        SectionKind::Education,
        &["образование", "учеба", "обучение", "квалификация"],
    ),
    (
        SectionKind::Skills,
        &["навыки", "ключевые навыки", "технологии", "компетенции", "умения", "профессиональные навыки"],
    ),
    (
        SectionKind::Contacts,
        &["контакты", "контактная информация", "связь", "контактные данные"],
    ),
    (
        SectionKind::About,
        &["о себе", "обо мне", "личная информация", "краткая информация", "резюме"],
    ),
];

const POSITION_LABELS: &[&str] = &["должность", "позиция", "специальность", "профессия", "цель"];

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            technical_skills: owned(TECHNICAL_SKILLS),
            soft_skills: owned(SOFT_SKILLS),
            sections: SECTION_MARKERS
                .iter()
                .map(|(kind, keywords)| SectionMarkers {
                    kind: *kind,
                    keywords: owned(keywords),
                })
                .collect(),
            position_labels: owned(POSITION_LABELS),
        }
    }
}

impl Vocabulary {
    /// Append extra skills after the existing ones; blank terms are dropped
    pub fn with_extra_skills(mut self, technical: &[String], soft: &[String]) -> Self {
        let clean = |terms: &[String]| -> Vec<String> {
            terms
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        };

        self.technical_skills.extend(clean(technical));
        self.soft_skills.extend(clean(soft));
        self
    }

    /// Keywords for one section category (empty if the category has no markers)
    pub fn section_keywords(&self, kind: SectionKind) -> &[String] {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Technical skills followed by soft skills, in table order
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.technical_skills.iter().chain(self.soft_skills.iter())
    }
}

/// Case-insensitive substring presence test for a fixed list of terms.
///
/// Runs one overlapping Aho-Corasick pass over the lowercased text, which
/// reports every term that occurs anywhere, including terms nested inside
/// other terms ("go" inside "mongodb").
pub struct TermMatcher {
    automaton: AhoCorasick,
    // pattern id -> index of the term it came from; empty terms get no pattern
    term_index: Vec<usize>,
    term_count: usize,
}

impl TermMatcher {
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        let mut term_index = Vec::new();
        let mut term_count = 0;

        for (idx, term) in terms.into_iter().enumerate() {
            term_count += 1;
            let pattern = term.as_ref().to_lowercase();
            if !pattern.is_empty() {
                patterns.push(pattern);
                term_index.push(idx);
            }
        }

        let automaton = AhoCorasick::new(&patterns)
            .map_err(|e| ResumeCheckerError::Processing(format!("Failed to build term matcher: {}", e)))?;

        Ok(Self {
            automaton,
            term_index,
            term_count,
        })
    }

    /// Presence flag per term, indexed like the input terms.
    /// `lowercase_text` must already be lowercased.
    pub fn presence(&self, lowercase_text: &str) -> Vec<bool> {
        let mut present = vec![false; self.term_count];
        for mat in self.automaton.find_overlapping_iter(lowercase_text) {
            present[self.term_index[mat.pattern().as_usize()]] = true;
        }
        present
    }

    pub fn term_count(&self) -> usize {
        self.term_count
    }
}
