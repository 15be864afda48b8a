//! Resume checker library
//!
//! Estimates how well a resume matches a job vacancy the way keyword-driven
//! applicant tracking systems screen candidates.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ResumeCheckerError};
pub use config::Config;
pub use processing::{AnalysisResult, ResumeAnalyzer};
