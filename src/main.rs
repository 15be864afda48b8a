//! Resume checker: ATS compatibility check of a resume against a vacancy

use clap::Parser;
use log::{error, info};
use resume_checker::cli::{self, Cli, Commands, ConfigAction};
use resume_checker::input::InputManager;
use resume_checker::output::{save_report_to_file, AnalysisReport, ReportGenerator, ReportMetadata};
use resume_checker::processing::vocabulary::Vocabulary;
use resume_checker::{Config, Result, ResumeAnalyzer, ResumeCheckerError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            vacancy,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeCheckerError::InvalidInput)?,
                None => config.output.format,
            };
            analyze(&config, &resume, &vacancy, output_format, save.as_deref(), detailed).await?;
        }

        Commands::Vocabulary {
            technical,
            soft,
            sections,
        } => {
            let show_all = !(technical || soft || sections);
            print_vocabulary(&config.vocabulary(), show_all || technical, show_all || soft, show_all || sections);
        }

        Commands::Config { action } => {
            let config_path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    println!("Scoring Weights:");
                    println!("  Keywords: {:.1}%", config.scoring.keywords_weight * 100.0);
                    println!("  Structure: {:.1}%", config.scoring.structure_weight * 100.0);
                    println!("  Contacts: {:.1}%", config.scoring.contacts_weight * 100.0);
                    println!("  Experience: {:.1}%", config.scoring.experience_weight * 100.0);
                    println!("\nExtra technical skills: {}", config.vocabulary.extra_technical_skills.join(", "));
                    println!("Extra soft skills: {}", config.vocabulary.extra_soft_skills.join(", "));
                    println!("\nMax file size: {}", resume_checker::input::manager::format_file_size(config.input.max_file_size_bytes));
                    println!("Output format: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

async fn analyze(
    config: &Config,
    resume: &Path,
    vacancy: &Path,
    output_format: resume_checker::config::OutputFormat,
    save: Option<&Path>,
    detailed: bool,
) -> Result<()> {
    info!("Starting ATS analysis of {}", resume.display());
    let started = Instant::now();

    let input_manager = InputManager::new(config.input.max_file_size_bytes);
    let resume_text = input_manager.extract_text(resume).await?;
    let vacancy_text = input_manager.extract_text(vacancy).await?;

    let analyzer = ResumeAnalyzer::with_settings(config.vocabulary(), config.scoring_weights())?;
    let result = analyzer.analyze(&resume_text, &vacancy_text)?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!("Analysis completed in {}ms with score {}", elapsed_ms, result.score);

    let report = AnalysisReport::new(
        ReportMetadata::new(resume, vacancy, elapsed_ms),
        *analyzer.weights(),
        result,
    );

    // colors never go to a file
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        detailed || config.output.detailed,
        config.output.pretty_json,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, output_format)?;

    match save {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn print_vocabulary(vocabulary: &Vocabulary, technical: bool, soft: bool, sections: bool) {
    if technical {
        println!("🛠  Technical skills ({}):", vocabulary.technical_skills.len());
        println!("  {}\n", vocabulary.technical_skills.join(", "));
    }

    if soft {
        println!("🤝 Soft skills ({}):", vocabulary.soft_skills.len());
        println!("  {}\n", vocabulary.soft_skills.join(", "));
    }

    if sections {
        println!("📑 Section headings:");
        for markers in &vocabulary.sections {
            println!("  {}: {}", markers.kind.label(), markers.keywords.join(", "));
        }
    }
}
