//! Structural resume parsing: contacts, desired position, skills,
//! detected sections and the experience / education blocks.

use crate::error::Result;
use crate::processing::normalizer::TextViews;
use crate::processing::vocabulary::{SectionKind, TermMatcher, Vocabulary};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the checker "sees" in a resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub skills: BTreeSet<String>,
    pub experience_text: String,
    pub education_text: String,
    pub sections: BTreeSet<SectionKind>,
    pub raw_text: String,
    pub line_count: usize,
}

const NAME_PATTERN: &str = r"^([А-ЯЁ][а-яё]+(?:\s+[А-ЯЁ][а-яё]+){1,2})(?:\s|$)";
const NAME_LINE_LIMIT: usize = 5;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

const PHONE_PATTERNS: &[&str] = &[
    r"\+7[\s\-\(\)]*\d{3}[\s\-\(\)]*\d{3}[\s\-]*\d{2}[\s\-]*\d{2}",
    r"8[\s\-\(\)]*\d{3}[\s\-\(\)]*\d{3}[\s\-]*\d{2}[\s\-]*\d{2}",
    r"\d{3}[\s\-\(\)]*\d{3}[\s\-]*\d{2}[\s\-]*\d{2}",
];

const POSITION_LINE_LIMIT: usize = 10;

/// One way of pulling a single field out of a text
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, text: &TextViews) -> Option<String>;
}

/// First match of a pattern anywhere in the single-line view
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl FieldExtractor for PatternExtractor {
    fn extract(&self, text: &TextViews) -> Option<String> {
        self.pattern
            .find(&text.normalized)
            .map(|m| m.as_str().to_string())
    }
}

/// First capture of a pattern within the leading lines
pub struct LeadingLineExtractor {
    pattern: Regex,
    line_limit: usize,
}

impl LeadingLineExtractor {
    pub fn new(pattern: &str, line_limit: usize) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            line_limit,
        })
    }
}

impl FieldExtractor for LeadingLineExtractor {
    fn extract(&self, text: &TextViews) -> Option<String> {
        text.lines
            .iter()
            .take(self.line_limit)
            .find_map(|line| self.pattern.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Value after the first colon of a leading line that mentions one of the labels.
///
/// The split happens on the first colon of the whole line, so with
/// "Город: Москва, должность: аналитик" the value is taken from the wrong field.
/// An empty value after the colon ends the search with nothing found.
pub struct LabelledLineExtractor {
    labels: Vec<String>,
    line_limit: usize,
}

impl LabelledLineExtractor {
    pub fn new(labels: &[String], line_limit: usize) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_lowercase()).collect(),
            line_limit,
        }
    }
}

impl FieldExtractor for LabelledLineExtractor {
    fn extract(&self, text: &TextViews) -> Option<String> {
        for line in text.lines.iter().take(self.line_limit) {
            let lower = line.to_lowercase();
            if !self.labels.iter().any(|label| lower.contains(label.as_str())) {
                continue;
            }
            // the first labelled line with a colon decides, even when its value is empty
            if let Some((_, value)) = line.split_once(':') {
                let value = value.trim();
                return (!value.is_empty()).then(|| value.to_string());
            }
        }
        None
    }
}

/// Ordered extractors tried in turn; the first one that finds something wins
pub struct ExtractorChain {
    extractors: Vec<Box<dyn FieldExtractor>>,
}

impl ExtractorChain {
    pub fn new(extractors: Vec<Box<dyn FieldExtractor>>) -> Self {
        Self { extractors }
    }

    pub fn first_match(&self, text: &TextViews) -> Option<String> {
        self.extractors.iter().find_map(|e| e.extract(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    Inside,
    Closed,
}

pub struct ResumeParser {
    name: ExtractorChain,
    email: ExtractorChain,
    phone: ExtractorChain,
    position: ExtractorChain,
    skills: Vec<String>,
    skill_matcher: TermMatcher,
    // owner category of every keyword fed to `section_matcher`
    section_owners: Vec<SectionKind>,
    section_matcher: TermMatcher,
}

impl ResumeParser {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let name = ExtractorChain::new(vec![Box::new(LeadingLineExtractor::new(
            NAME_PATTERN,
            NAME_LINE_LIMIT,
        )?)]);

        let email = ExtractorChain::new(vec![Box::new(PatternExtractor::new(EMAIL_PATTERN)?)]);

        let mut phone_extractors: Vec<Box<dyn FieldExtractor>> = Vec::new();
        for pattern in PHONE_PATTERNS {
            phone_extractors.push(Box::new(PatternExtractor::new(pattern)?));
        }
        let phone = ExtractorChain::new(phone_extractors);

        let position = ExtractorChain::new(vec![Box::new(LabelledLineExtractor::new(
            &vocabulary.position_labels,
            POSITION_LINE_LIMIT,
        ))]);

        let skills: Vec<String> = vocabulary.all_skills().cloned().collect();
        let skill_matcher = TermMatcher::new(&skills)?;

        let mut section_owners = Vec::new();
        let mut section_keywords = Vec::new();
        for markers in &vocabulary.sections {
            for keyword in &markers.keywords {
                section_owners.push(markers.kind);
                section_keywords.push(keyword.as_str());
            }
        }
        let section_matcher = TermMatcher::new(section_keywords)?;

        Ok(Self {
            name,
            email,
            phone,
            position,
            skills,
            skill_matcher,
            section_owners,
            section_matcher,
        })
    }

    pub fn parse(&self, text: &TextViews) -> ParsedResume {
        let resume = ParsedResume {
            name: self.extract_name(text),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            position: self.extract_position(text),
            skills: self.extract_skills(&text.lowercase),
            experience_text: self.extract_block(&text.lines, SectionKind::Experience),
            education_text: self.extract_block(&text.lines, SectionKind::Education),
            sections: self.detect_sections(&text.lowercase),
            raw_text: text.normalized.clone(),
            line_count: text.non_blank_line_count(),
        };

        debug!(
            "Parsed resume: name={}, email={}, phone={}, {} skills, sections {:?}",
            resume.name.is_some(),
            resume.email.is_some(),
            resume.phone.is_some(),
            resume.skills.len(),
            resume.sections
        );

        resume
    }

    pub fn extract_name(&self, text: &TextViews) -> Option<String> {
        self.name.first_match(text)
    }

    pub fn extract_email(&self, text: &TextViews) -> Option<String> {
        self.email.first_match(text)
    }

    pub fn extract_phone(&self, text: &TextViews) -> Option<String> {
        self.phone.first_match(text)
    }

    pub fn extract_position(&self, text: &TextViews) -> Option<String> {
        self.position.first_match(text)
    }

    /// Vocabulary skills occurring anywhere in the text
    pub fn extract_skills(&self, lowercase_text: &str) -> BTreeSet<String> {
        self.skill_matcher
            .presence(lowercase_text)
            .into_iter()
            .zip(&self.skills)
            .filter(|(present, _)| *present)
            .map(|(_, skill)| skill.clone())
            .collect()
    }

    /// Categories with at least one marker keyword anywhere in the text
    pub fn detect_sections(&self, lowercase_text: &str) -> BTreeSet<SectionKind> {
        self.section_matcher
            .presence(lowercase_text)
            .into_iter()
            .zip(&self.section_owners)
            .filter(|(present, _)| *present)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Lines following the first heading of `kind`, up to the next line that
    /// carries another category's marker. Only the first block is captured.
    pub fn extract_block(&self, lines: &[String], kind: SectionKind) -> String {
        let mut state = BlockState::Outside;
        let mut collected: Vec<&str> = Vec::new();

        for line in lines {
            let marks = self.detect_sections(&line.to_lowercase());
            let own = marks.contains(&kind);
            let other = marks.iter().any(|k| *k != kind);

            state = match state {
                BlockState::Outside if own => BlockState::Inside,
                BlockState::Outside => BlockState::Outside,
                // a repeated heading of the same category is skipped, not collected
                BlockState::Inside if own => BlockState::Inside,
                BlockState::Inside if other => BlockState::Closed,
                BlockState::Inside => {
                    if !line.is_empty() {
                        collected.push(line);
                    }
                    BlockState::Inside
                }
                BlockState::Closed => BlockState::Closed,
            };

            if state == BlockState::Closed {
                break;
            }
        }

        collected.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ResumeParser {
        ResumeParser::new(&Vocabulary::default()).unwrap()
    }

    #[test]
    fn test_extract_name_from_leading_lines() {
        let text = TextViews::new("\n    Анна Смирнова\n    Python разработчик");
        assert_eq!(parser().extract_name(&text).as_deref(), Some("Анна Смирнова"));
    }

    #[test]
    fn test_name_not_found_beyond_fifth_line() {
        let text = TextViews::new("a\nb\nc\nd\ne\nИван Иванов");
        assert_eq!(parser().extract_name(&text), None);
    }

    #[test]
    fn test_name_requires_two_capitalized_words() {
        let text = TextViews::new("Иван\nразработчик Python");
        assert_eq!(parser().extract_name(&text), None);
    }

    #[test]
    fn test_extract_email() {
        let text = TextViews::new("Иван Иванов\nТелефон: +7 123 456 78 90\nEmail: ivan.ivanov@example.com");
        assert_eq!(
            parser().extract_email(&text).as_deref(),
            Some("ivan.ivanov@example.com")
        );
    }

    #[test]
    fn test_extract_phone_international() {
        let text = TextViews::new("Контакты:\n+7 (123) 456-78-90");
        assert_eq!(parser().extract_phone(&text).as_deref(), Some("+7 (123) 456-78-90"));
    }

    #[test]
    fn test_extract_phone_prefers_earlier_pattern() {
        // the bare pattern would match "123 456 78 90" first, the national one wins
        let text = TextViews::new("тел. 123 456 78 90, моб. 8 (999) 111-22-33");
        assert_eq!(parser().extract_phone(&text).as_deref(), Some("8 (999) 111-22-33"));
    }

    #[test]
    fn test_extract_phone_bare_digits() {
        let text = TextViews::new("звоните 999-111-22-33");
        assert_eq!(parser().extract_phone(&text).as_deref(), Some("999-111-22-33"));
    }

    #[test]
    fn test_extract_position_after_colon() {
        let text = TextViews::new("Иван Иванов\nЖелаемая должность:  Backend разработчик ");
        assert_eq!(
            parser().extract_position(&text).as_deref(),
            Some("Backend разработчик")
        );
    }

    #[test]
    fn test_position_splits_on_first_colon() {
        let text = TextViews::new("Город: Москва, должность: аналитик");
        assert_eq!(
            parser().extract_position(&text).as_deref(),
            Some("Москва, должность: аналитик")
        );
    }

    #[test]
    fn test_empty_labelled_line_stops_search() {
        let text = TextViews::new("Цель:\nДолжность: Аналитик");
        assert_eq!(parser().extract_position(&text), None);
    }

    #[test]
    fn test_position_without_colon_is_skipped() {
        let text = TextViews::new("Цель карьерный рост");
        assert_eq!(parser().extract_position(&text), None);
    }

    #[test]
    fn test_extract_skills() {
        let text = TextViews::new("Навыки: Python, JavaScript, React, коммуникация");
        let skills = parser().extract_skills(&text.lowercase);

        assert!(skills.contains("python"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("react"));
        assert!(skills.contains("коммуникация"));
        // substring containment also reports "java" inside "javascript"
        assert!(skills.contains("java"));
    }

    #[test]
    fn test_detect_sections() {
        let text = TextViews::new(
            "Иван Иванов\n\nОпыт работы:\n2020-2023 Разработчик Python\n\nОбразование:\n2016-2020 МГУ\n\nКлючевые навыки:\nPython, Django",
        );
        let sections = parser().detect_sections(&text.lowercase);

        assert!(sections.contains(&SectionKind::Experience));
        assert!(sections.contains(&SectionKind::Education));
        assert!(sections.contains(&SectionKind::Skills));
        assert!(!sections.contains(&SectionKind::Contacts));
    }

    #[test]
    fn test_experience_block_stops_at_next_section() {
        let text = TextViews::new(
            "Опыт работы:\n2020-2023 ООО \"Компания\"\n\n- Разработка на Django\nОбразование:\nМГУ",
        );
        let parser = parser();

        assert_eq!(
            parser.extract_block(&text.lines, SectionKind::Experience),
            "2020-2023 ООО \"Компания\"\n- Разработка на Django"
        );
        assert_eq!(parser.extract_block(&text.lines, SectionKind::Education), "МГУ");
    }

    #[test]
    fn test_block_is_not_reentered() {
        let text = TextViews::new("Образование:\nМГУ\nНавыки:\nPython\nОбразование:\nМФТИ");
        assert_eq!(
            parser().extract_block(&text.lines, SectionKind::Education),
            "МГУ"
        );
    }

    #[test]
    fn test_block_empty_without_heading() {
        let text = TextViews::new("Иван Иванов\nPython, Docker");
        assert_eq!(parser().extract_block(&text.lines, SectionKind::Experience), "");
    }

    #[test]
    fn test_parse_counts_non_blank_lines() {
        let text = TextViews::new("\nИван Иванов\n\nivan@mail.ru\n");
        let resume = parser().parse(&text);

        assert_eq!(resume.line_count, 2);
        assert_eq!(resume.raw_text, "Иван Иванов ivan@mail.ru");
        assert!(resume.sections.is_empty());
    }
}
