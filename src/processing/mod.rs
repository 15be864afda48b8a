//! Resume analysis engine

pub mod normalizer;
pub mod vocabulary;
pub mod resume_parser;
pub mod requirements;
pub mod keyword_matcher;
pub mod scoring;
pub mod recommendations;
pub mod analyzer;

pub use analyzer::{AnalysisResult, AtsCompatibility, ResumeAnalyzer};
