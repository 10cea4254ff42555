use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_range, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "destino")]
#[command(about = "Lectura esotérica: quirología + ciclos vitales + oráculo generativo")]
pub struct CliConfig {
    /// The user's question for the reading
    #[arg(long)]
    pub question: String,

    /// Birth date in YYYY-MM-DD format
    #[arg(long)]
    pub birth_date: String,

    /// Hand photo files (first one drives the heuristic analysis)
    #[arg(long, value_delimiter = ',')]
    pub photos: Vec<String>,

    /// Reference year for the personal-year cycle; defaults to the current year
    #[arg(long)]
    pub reference_year: Option<i32>,

    #[arg(long, help = "Skip the generative-model call (automatic analysis only)")]
    pub offline: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("question", &self.question)?;
        validate_non_empty_string("birth_date", &self.birth_date)?;
        validate_file_extensions("photos", &self.photos, &["jpg", "jpeg", "png"])?;
        if let Some(year) = self.reference_year {
            validate_range("reference_year", year, 1, 9999)?;
        }
        Ok(())
    }
}
