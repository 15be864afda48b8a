//! Improvement suggestions derived from the score breakdown

use crate::processing::keyword_matcher::KeywordMatch;
use crate::processing::resume_parser::ParsedResume;
use crate::processing::scoring::{ScoreBreakdown, CORE_SECTIONS};
use serde::{Deserialize, Serialize};

const KEYWORDS_THRESHOLD: u8 = 70;
const STRUCTURE_THRESHOLD: u8 = 70;
const CONTACTS_THRESHOLD: u8 = 80;
const EXPERIENCE_THRESHOLD: u8 = 60;
const SHORT_EXPERIENCE_CHARS: usize = 100;
const KEYWORD_EXAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Critical,
    Warning,
    Improvement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub example: Option<String>,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: &str, description: String, example: Option<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            example,
        }
    }
}

/// Everything the rules may inspect
pub struct RecommendationContext<'a> {
    pub breakdown: &'a ScoreBreakdown,
    pub resume: &'a ParsedResume,
    pub keywords: &'a KeywordMatch,
}

type Rule = fn(&RecommendationContext<'_>) -> Option<Recommendation>;

/// Evaluated in this order; every rule that fires contributes one entry
const RULES: [Rule; 4] = [
    missing_keywords_rule,
    missing_sections_rule,
    missing_contacts_rule,
    experience_rule,
];

pub fn generate_recommendations(context: &RecommendationContext<'_>) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES.iter().filter_map(|rule| rule(context)).collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation::new(
            RecommendationKind::Improvement,
            "Отличная работа!",
            "Ваше резюме хорошо оптимизировано для ATS систем".to_string(),
            Some("Продолжайте обновлять резюме актуальными навыками и достижениями".to_string()),
        ));
    }

    recommendations
}

fn missing_keywords_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    let missing = &context.keywords.missing;
    if context.breakdown.keywords >= KEYWORDS_THRESHOLD || missing.is_empty() {
        return None;
    }

    let examples: Vec<&str> = missing.iter().take(KEYWORD_EXAMPLES).map(String::as_str).collect();

    Some(Recommendation::new(
        RecommendationKind::Critical,
        "Добавьте ключевые слова из вакансии",
        format!(
            "Ваше резюме не содержит {} важных ключевых слов. ATS системы ищут точные совпадения.",
            missing.len()
        ),
        Some(format!("Добавьте: {}", examples.join(", "))),
    ))
}

fn missing_sections_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    if context.breakdown.structure >= STRUCTURE_THRESHOLD {
        return None;
    }

    let missing: Vec<&str> = CORE_SECTIONS
        .iter()
        .filter(|kind| !context.resume.sections.contains(*kind))
        .map(|kind| kind.label())
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(Recommendation::new(
        RecommendationKind::Warning,
        "Добавьте стандартные разделы",
        format!(
            "ATS системы ожидают стандартную структуру резюме. Отсутствуют разделы: {}",
            missing.join(", ")
        ),
        Some("Используйте заголовки: \"Опыт работы\", \"Образование\", \"Ключевые навыки\"".to_string()),
    ))
}

fn missing_contacts_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    if context.breakdown.contacts >= CONTACTS_THRESHOLD {
        return None;
    }

    let resume = context.resume;
    let mut missing = Vec::new();
    if resume.email.is_none() {
        missing.push("email");
    }
    if resume.phone.is_none() {
        missing.push("телефон");
    }
    if resume.name.is_none() {
        missing.push("ФИО");
    }

    if missing.is_empty() {
        return None;
    }

    Some(Recommendation::new(
        RecommendationKind::Critical,
        "Добавьте контактную информацию",
        format!("Отсутствуют важные контактные данные: {}", missing.join(", ")),
        Some("Укажите ФИО, телефон и email в начале резюме".to_string()),
    ))
}

fn experience_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    if context.breakdown.experience >= EXPERIENCE_THRESHOLD {
        return None;
    }

    let experience = &context.resume.experience_text;
    if experience.is_empty() {
        Some(Recommendation::new(
            RecommendationKind::Warning,
            "Детально опишите опыт работы",
            "Раздел опыта работы отсутствует или слишком краткий".to_string(),
            Some("Укажите компании, должности, период работы и основные обязанности".to_string()),
        ))
    } else if experience.chars().count() < SHORT_EXPERIENCE_CHARS {
        Some(Recommendation::new(
            RecommendationKind::Improvement,
            "Расширьте описание опыта",
            "Описание опыта работы слишком краткое для эффективного анализа ATS".to_string(),
            Some("Добавьте конкретные достижения, проекты и используемые технологии".to_string()),
        ))
    } else {
        None
    }
}
