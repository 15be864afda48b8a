//! Integration tests for the resume checker

use resume_checker::input::manager::InputManager;
use resume_checker::processing::recommendations::RecommendationKind;
use resume_checker::processing::vocabulary::SectionKind;
use resume_checker::{ResumeAnalyzer, ResumeCheckerError};
use std::io::Write;
use std::sync::Arc;
use std::thread;

const SENIOR_RESUME: &str = r#"
    Анна Смирнова
    Python разработчик
    Email: anna.smirnova@email.com
    Телефон: +7 (901) 234-56-78

    Опыт работы:
    2019-2023 Старший Python разработчик
    ООО "ТехКомпания"
    - Разработка backend приложений на Django
    - Проектирование REST API
    - Работа с PostgreSQL и Redis
    - Настройка CI/CD процессов

    2017-2019 Junior Python разработчик
    Стартап "Инновации"
    - Веб-разработка на Flask
    - Интеграция с внешними сервисами
    - Написание unit тестов

    Образование:
    2013-2017 СПбГУ
    Факультет математики и механики
    Прикладная математика и информатика

    Ключевые навыки:
    Python, Django, Flask, PostgreSQL, Redis, Git, Docker, Linux
    REST API, unit testing, agile
"#;

const SENIOR_VACANCY: &str = r#"
    Вакансия: Senior Python Developer

    Мы ищем опытного Python разработчика для работы над крупными проектами.

    Требования:
    - Опыт работы с Python от 3 лет
    - Глубокие знания Django или Flask
    - Опыт работы с реляционными БД (PostgreSQL, MySQL)
    - Знание принципов REST API
    - Опыт работы с Git
    - Понимание принципов SOLID
    - Опыт unit тестирования

    Будет плюсом:
    - Знание Docker
    - Опыт работы с Redis
    - Знание Linux
    - Опыт CI/CD
    - Agile/Scrum опыт
"#;

const FRONTEND_RESUME: &str = r#"
    Петр Петров
    Веб-разработчик
    Email: petr@example.com
    Телефон: +7 999 888 77 66

    Опыт работы:
    2021-2023 Frontend разработчик
    Компания ABC
    - Разработка на React
    - Работа с JavaScript
    - Верстка HTML/CSS

    Образование:
    2017-2021 МГТУ им. Баумана

    Навыки:
    JavaScript, React, HTML, CSS, Git
"#;

const FRONTEND_VACANCY: &str = r#"
    Требования к кандидату:
    - Опыт работы с JavaScript от 2 лет
    - Знание React
    - Опыт верстки HTML/CSS
    - Умение работать с Git
"#;

#[test]
fn test_complete_analysis_flow() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let result = analyzer.analyze(SENIOR_RESUME, SENIOR_VACANCY).unwrap();

    let parsed = &result.parsed_resume;
    assert_eq!(parsed.name.as_deref(), Some("Анна Смирнова"));
    assert_eq!(parsed.email.as_deref(), Some("anna.smirnova@email.com"));
    assert_eq!(parsed.phone.as_deref(), Some("+7 (901) 234-56-78"));
    assert!(parsed.skills.contains("python"));
    assert!(parsed.skills.contains("django"));

    assert!(result.matched_keywords.iter().any(|k| k == "python"));
    assert!(result.matched_keywords.iter().any(|k| k == "django"));
    assert!(result.missing_keywords.iter().any(|k| k == "mysql"));

    assert_eq!(result.breakdown.contacts, 100);
    assert_eq!(result.breakdown.structure, 85);
    assert!(result.breakdown.keywords >= 60);
    assert!(result.breakdown.experience >= 60);
    assert!(result.score >= 80);

    // every dimension clears its threshold
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].title, "Отличная работа!");
    assert_eq!(result.ats_compatibility.standard_sections_found, 3);
    assert!(result.ats_compatibility.ats_friendly);
}

#[test]
fn test_frontend_resume_scores_well() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let result = analyzer.analyze(FRONTEND_RESUME, FRONTEND_VACANCY).unwrap();

    assert!(result.score > 50);
    assert_eq!(result.parsed_resume.name.as_deref(), Some("Петр Петров"));
    assert_eq!(result.parsed_resume.email.as_deref(), Some("petr@example.com"));
    assert!(result.matched_keywords.iter().any(|k| k == "react"));
    assert!(result.missing_keywords.is_empty());
    assert_eq!(result.breakdown.keywords, 100);
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let first = analyzer.analyze(SENIOR_RESUME, SENIOR_VACANCY).unwrap();
    let second = analyzer.analyze(SENIOR_RESUME, SENIOR_VACANCY).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_missing_keywords_capped_at_ten() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let vacancy = "Java Kotlin Scala Swift Flutter Android iOS Kubernetes Jenkins Angular Symfony Laravel";
    let result = analyzer.analyze("Иван Иванов\nБухгалтер", vacancy).unwrap();

    assert_eq!(result.breakdown.keywords, 0);
    assert_eq!(result.missing_keywords.len(), 10);

    let critical = &result.recommendations[0];
    assert_eq!(critical.kind, RecommendationKind::Critical);
    // the description counts every missing requirement, not just the reported ten
    assert!(critical.description.contains("12"));
}

#[test]
fn test_contacts_are_additive() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let vacancy = "Нужен Python";

    let cases = [
        ("python", 0),
        ("Иван Иванов\npython", 20),
        ("ivan@example.com python", 40),
        ("+7 900 123 45 67 python", 40),
        ("Иван Иванов\nivan@example.com\n+7 900 123 45 67\npython", 100),
    ];

    for (resume, expected) in cases {
        let result = analyzer.analyze(resume, vacancy).unwrap();
        assert_eq!(result.breakdown.contacts, expected, "resume: {:?}", resume);
    }
}

#[test]
fn test_resume_without_sections() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let resume = "Иван Иванов\nPython\nDocker\nGit\nLinux\nSQL\nNginx";
    let result = analyzer.analyze(resume, "Python и Docker").unwrap();

    assert!(result.parsed_resume.sections.is_empty());
    assert!(result.breakdown.structure <= 15);
    assert_eq!(result.breakdown.experience, 0);
    assert!(result.recommendations.iter().any(|r| r.kind == RecommendationKind::Warning));
    assert_eq!(result.ats_compatibility.standard_sections_found, 0);
}

#[test]
fn test_scores_stay_in_bounds() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let inputs = [
        ("a", "b"),
        (SENIOR_RESUME, FRONTEND_VACANCY),
        (FRONTEND_RESUME, SENIOR_VACANCY),
        ("опыт опыт опыт", "опыт опыт навыки навыки"),
    ];

    for (resume, vacancy) in inputs {
        let result = analyzer.analyze(resume, vacancy).unwrap();
        for score in [
            result.score,
            result.breakdown.keywords,
            result.breakdown.structure,
            result.breakdown.contacts,
            result.breakdown.experience,
        ] {
            assert!(score <= 100);
        }
        assert!(!result.recommendations.is_empty());
    }
}

#[test]
fn test_sections_detected_case_insensitively() {
    let analyzer = ResumeAnalyzer::new().unwrap();
    let result = analyzer
        .analyze("ОПЫТ РАБОТЫ\nОБРАЗОВАНИЕ\nКОНТАКТЫ", "Python")
        .unwrap();

    let sections = &result.parsed_resume.sections;
    assert!(sections.contains(&SectionKind::Experience));
    assert!(sections.contains(&SectionKind::Education));
    assert!(sections.contains(&SectionKind::Contacts));
    assert!(!sections.contains(&SectionKind::Skills));
}

#[test]
fn test_analyzer_shared_across_threads() {
    let analyzer = Arc::new(ResumeAnalyzer::new().unwrap());
    let expected = analyzer.analyze(SENIOR_RESUME, SENIOR_VACANCY).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze(SENIOR_RESUME, SENIOR_VACANCY).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

fn temp_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::new(5 * 1024 * 1024);
    let file = temp_file(".txt", FRONTEND_RESUME.as_bytes());

    let text = manager.extract_text(file.path()).await.unwrap();
    assert!(text.contains("Петр Петров"));
    assert!(text.contains("JavaScript"));
}

#[tokio::test]
async fn test_text_extraction_from_windows_1251() {
    let manager = InputManager::new(1024);
    // "Опыт работы" in Windows-1251
    let content = [0xCE, 0xEF, 0xFB, 0xF2, 0x20, 0xF0, 0xE0, 0xE1, 0xEE, 0xF2, 0xFB];
    let file = temp_file(".txt", &content);

    assert_eq!(manager.extract_text(file.path()).await.unwrap(), "Опыт работы");
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let manager = InputManager::new(1024 * 1024);
    let file = temp_file(
        ".md",
        "# Петр Петров\n\n## Навыки\n\n- JavaScript\n- **React**\n".as_bytes(),
    );

    let text = manager.extract_text(file.path()).await.unwrap();
    assert_eq!(text, "Петр Петров\nНавыки\nJavaScript\nReact");
}

fn docx_bytes(document_xml: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let manager = InputManager::new(1024 * 1024);
    let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Петр Петров</w:t></w:r></w:p>
    <w:p><w:r><w:t>Email: petr@example.com</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Навыки</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>JavaScript, React</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;
    let file = temp_file(".docx", &docx_bytes(document));

    let text = manager.extract_text(file.path()).await.unwrap();
    assert_eq!(
        text,
        "Петр Петров\nEmail: petr@example.com\nНавыки\nJavaScript, React"
    );

    let analyzer = ResumeAnalyzer::new().unwrap();
    let result = analyzer
        .analyze(&text, "Ищем фронтенд разработчика: JavaScript и React")
        .unwrap();
    assert_eq!(result.parsed_resume.name.as_deref(), Some("Петр Петров"));
    assert!(result.matched_keywords.contains(&"javascript".to_string()));
    assert!(result.matched_keywords.contains(&"react".to_string()));
}

#[tokio::test]
async fn test_rejected_inputs() {
    let manager = InputManager::new(64);

    let missing = manager
        .extract_text(std::path::Path::new("does/not/exist.txt"))
        .await;
    assert!(matches!(missing, Err(ResumeCheckerError::InvalidInput(_))));

    let empty = temp_file(".txt", b"");
    assert!(matches!(
        manager.extract_text(empty.path()).await,
        Err(ResumeCheckerError::InvalidInput(_))
    ));

    let blank = temp_file(".txt", b"   \n\t\n");
    assert!(matches!(
        manager.extract_text(blank.path()).await,
        Err(ResumeCheckerError::InvalidInput(_))
    ));

    let large = temp_file(".txt", &[b'a'; 100]);
    assert!(matches!(
        manager.extract_text(large.path()).await,
        Err(ResumeCheckerError::FileTooLarge { size: 100, limit: 64 })
    ));

    let doc = temp_file(".doc", b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1");
    assert!(matches!(
        manager.extract_text(doc.path()).await,
        Err(ResumeCheckerError::UnsupportedFormat(_))
    ));

    let broken_docx = temp_file(".docx", b"PK\x03\x04");
    assert!(matches!(
        manager.extract_text(broken_docx.path()).await,
        Err(ResumeCheckerError::DocxExtraction(_))
    ));

    let unknown = temp_file(".rtf", b"{\\rtf1}");
    assert!(matches!(
        manager.extract_text(unknown.path()).await,
        Err(ResumeCheckerError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_file_to_analysis_pipeline() {
    let manager = InputManager::new(1024 * 1024);
    let resume = temp_file(".txt", SENIOR_RESUME.as_bytes());
    let vacancy = temp_file(".md", SENIOR_VACANCY.as_bytes());

    let resume_text = manager.extract_text(resume.path()).await.unwrap();
    let vacancy_text = manager.extract_text(vacancy.path()).await.unwrap();

    let analyzer = ResumeAnalyzer::new().unwrap();
    let result = analyzer.analyze(&resume_text, &vacancy_text).unwrap();
    assert_eq!(result.parsed_resume.name.as_deref(), Some("Анна Смирнова"));
    assert!(result.score >= 60);
}
