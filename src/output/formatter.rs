//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeCheckerError};
use crate::output::report::{AnalysisReport, ScoreBand};
use crate::processing::recommendations::{Recommendation, RecommendationKind};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Анализ резюме для ATS</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .score-breakdown {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 15px;
        }
        .score-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .recommendation {
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #28a745;
            background: #f8f9fa;
        }
        .kind-critical { border-left-color: #dc3545; }
        .kind-warning { border-left-color: #ffc107; }
        .keyword { display: inline-block; padding: 2px 8px; margin: 2px; border-radius: 4px; }
        .matched { background: #d4edda; }
        .missing { background: #f8d7da; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>📊 Анализ резюме для ATS</h1>
            <p>Создан: {{ generated_at }} | Время обработки: {{ processing_time }} мс</p>
        </div>

        <h2>Общая оценка: {{ score }}/100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        <p>Разделов найдено: {{ sections_found }} из {{ sections_expected }}{% if ats_friendly %} | ✅ Резюме подходит для ATS{% endif %}</p>

        <div class="score-breakdown">
            {% for item in breakdown %}
            <div class="score-item">
                <h4>{{ item.label }}</h4>
                <p><strong>{{ item.score }}/100</strong> (вес: {{ item.weight }}%)</p>
            </div>
            {% endfor %}
        </div>

        <h2>📋 Рекомендации</h2>
        {% for rec in recommendations %}
        <div class="recommendation kind-{{ rec.kind }}">
            <h4>{{ rec.icon }} {{ rec.title }}</h4>
            <p>{{ rec.description }}</p>
            {% if rec.has_example %}<p><em>{{ rec.example }}</em></p>{% endif %}
        </div>
        {% endfor %}

        <h2>🔍 Ключевые слова</h2>
        <p>
        {% for keyword in matched_keywords %}<span class="keyword matched">{{ keyword }}</span>{% endfor %}
        {% for keyword in missing_keywords %}<span class="keyword missing">{{ keyword }}</span>{% endfor %}
        </p>

        <div class="metadata">
            <p><strong>ℹ️ resume-checker v{{ version }}</strong></p>
            <p><strong>Резюме:</strong> {{ resume_source }} | <strong>Вакансия:</strong> {{ vacancy_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    score: u8,
    score_class: &'static str,
    score_label: &'static str,
    sections_found: usize,
    sections_expected: usize,
    ats_friendly: bool,
    breakdown: Vec<HtmlScoreItem>,
    recommendations: Vec<HtmlRecommendation>,
    matched_keywords: Vec<String>,
    missing_keywords: Vec<String>,
    version: String,
    resume_source: String,
    vacancy_source: String,
}

struct HtmlScoreItem {
    label: &'static str,
    score: u8,
    weight: String,
}

struct HtmlRecommendation {
    kind: &'static str,
    icon: &'static str,
    title: String,
    description: String,
    has_example: bool,
    example: String,
}

/// (label, score, weight) rows in display order
fn breakdown_rows(report: &AnalysisReport) -> [(&'static str, u8, f64); 4] {
    let breakdown = &report.result.breakdown;
    let weights = &report.weights;
    [
        ("Ключевые слова", breakdown.keywords, weights.keywords),
        ("Структура", breakdown.structure, weights.structure),
        ("Контакты", breakdown.contacts, weights.contacts),
        ("Опыт работы", breakdown.experience, weights.experience),
    ]
}

fn kind_icon(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Critical => "🚨",
        RecommendationKind::Warning => "⚠️",
        RecommendationKind::Improvement => "💡",
    }
}

fn kind_name(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Critical => "critical",
        RecommendationKind::Warning => "warning",
        RecommendationKind::Improvement => "improvement",
    }
}

fn source_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_kind_icon(&self, kind: RecommendationKind) -> &'static str {
        if self.use_colors {
            kind_icon(kind)
        } else {
            match kind {
                RecommendationKind::Critical => "[!]",
                RecommendationKind::Warning => "[*]",
                RecommendationKind::Improvement => "[+]",
            }
        }
    }

    fn format_recommendation(&self, index: usize, rec: &Recommendation) -> String {
        let title_color = match rec.kind {
            RecommendationKind::Critical => Color::Red,
            RecommendationKind::Warning => Color::Yellow,
            RecommendationKind::Improvement => Color::Green,
        };

        let mut output = format!(
            "{}. {} {}\n   {}\n",
            index + 1,
            self.format_kind_icon(rec.kind),
            self.colorize(&rec.title, title_color),
            rec.description
        );
        if let Some(example) = &rec.example {
            output.push_str(&format!("   {} {}\n", self.colorize("→", Color::Cyan), example));
        }
        output
    }

    fn format_parsed_resume(&self, report: &AnalysisReport) -> String {
        let resume = &report.result.parsed_resume;
        let field = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| self.colorize("не найдено", Color::BrightBlack))
        };

        let mut output = self.format_header("Распознанное резюме", 2);
        output.push_str(&format!("ФИО: {}\n", field(&resume.name)));
        output.push_str(&format!("Email: {}\n", field(&resume.email)));
        output.push_str(&format!("Телефон: {}\n", field(&resume.phone)));
        output.push_str(&format!("Должность: {}\n", field(&resume.position)));

        let sections: Vec<&str> = resume.sections.iter().map(|kind| kind.label()).collect();
        output.push_str(&format!("Разделы: {}\n", sections.join(", ")));

        let skills: Vec<&str> = resume.skills.iter().map(String::as_str).collect();
        output.push_str(&format!("Навыки: {}\n", skills.join(", ")));
        output.push_str(&format!(
            "Опыт работы: {} символов, образование: {} символов, строк: {}\n",
            resume.experience_text.chars().count(),
            resume.education_text.chars().count(),
            resume.line_count
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 АНАЛИЗ РЕЗЮМЕ ДЛЯ ATS", 1));
        output.push_str(&format!(
            "Создан: {} | Время обработки: {} мс\n",
            report.metadata.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Итог", 2));
        output.push_str(&format!(
            "Общая оценка: {}/100 {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));
        let ats = &result.ats_compatibility;
        output.push_str(&format!(
            "Стандартных разделов: {} из {}\n",
            ats.standard_sections_found, ats.total_sections_expected
        ));

        output.push_str(&self.format_header("Детализация", 3));
        for (label, score, weight) in breakdown_rows(report) {
            output.push_str(&format!("{}: {}/100 (вес: {:.0}%)\n", label, score, weight * 100.0));
        }

        output.push_str(&self.format_header("📋 Рекомендации", 2));
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&self.format_recommendation(i, rec));
        }

        if !result.matched_keywords.is_empty() {
            output.push_str(&self.format_header("✅ Найденные ключевые слова", 3));
            output.push_str(&format!(
                "{}\n",
                self.colorize(&result.matched_keywords.join(", "), Color::Green)
            ));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str(&self.format_header("❌ Отсутствующие ключевые слова", 3));
            output.push_str(&format!(
                "{}\n",
                self.colorize(&result.missing_keywords.join(", "), Color::Red)
            ));
        }

        if self.detailed {
            output.push_str(&self.format_parsed_resume(report));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let result = &report.result;
        let band = ScoreBand::from_score(result.score);

        let breakdown = breakdown_rows(report)
            .into_iter()
            .map(|(label, score, weight)| HtmlScoreItem {
                label,
                score,
                weight: format!("{:.0}", weight * 100.0),
            })
            .collect();

        let recommendations = result
            .recommendations
            .iter()
            .map(|rec| HtmlRecommendation {
                kind: kind_name(rec.kind),
                icon: kind_icon(rec.kind),
                title: rec.title.clone(),
                description: rec.description.clone(),
                has_example: rec.example.is_some(),
                example: rec.example.clone().unwrap_or_default(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            score: result.score,
            score_class: band.css_class(),
            score_label: band.label(),
            sections_found: result.ats_compatibility.standard_sections_found,
            sections_expected: result.ats_compatibility.total_sections_expected,
            ats_friendly: result.ats_compatibility.ats_friendly,
            breakdown,
            recommendations,
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            version: report.metadata.checker_version.clone(),
            resume_source: source_name(&report.metadata.resume_source),
            vacancy_source: source_name(&report.metadata.vacancy_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeCheckerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => "🟢",
            ScoreBand::Good => "🔵",
            ScoreBand::Fair => "🟡",
            ScoreBand::Poor => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Анализ резюме для ATS\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Создан:** {} | **Время обработки:** {} мс\n",
                report.metadata.generated_at_display(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Резюме:** `{}` | **Вакансия:** `{}`\n\n",
                source_name(&report.metadata.resume_source),
                source_name(&report.metadata.vacancy_source)
            ));
        }

        output.push_str(&format!(
            "## Общая оценка: {}/100 {} {}\n\n",
            result.score,
            Self::markdown_score_badge(result.score),
            ScoreBand::from_score(result.score).label()
        ));

        output.push_str("| Критерий | Оценка | Вес |\n");
        output.push_str("|----------|--------|-----|\n");
        for (label, score, weight) in breakdown_rows(report) {
            output.push_str(&format!("| {} | {} | {:.0}% |\n", label, score, weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Рекомендации\n\n");
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} **{}**\n   {}\n",
                i + 1,
                kind_icon(rec.kind),
                rec.title,
                rec.description
            ));
            if let Some(example) = &rec.example {
                output.push_str(&format!("   > {}\n", example));
            }
        }
        output.push('\n');

        output.push_str("## Ключевые слова\n\n");
        output.push_str(&format!(
            "- **Найдены:** {}\n",
            if result.matched_keywords.is_empty() {
                "нет".to_string()
            } else {
                result.matched_keywords.join(", ")
            }
        ));
        output.push_str(&format!(
            "- **Отсутствуют:** {}\n",
            if result.missing_keywords.is_empty() {
                "нет".to_string()
            } else {
                result.missing_keywords.join(", ")
            }
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}
