use crate::core::knowledge::KnowledgeBase;
use crate::core::{composer, cycles, lines, shape};
use crate::domain::model::{
    HandPhoto, Interpretation, LineReading, OracleOutcome, PersonalYear, ShapeLabel,
};
use crate::domain::ports::Oracle;
use crate::utils::error::{ReadingError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;

/// One consultation: everything the core needs, passed explicitly. No ambient
/// request state.
#[derive(Debug, Clone)]
pub struct ReadingRequest {
    pub question: String,
    pub birth_date: NaiveDate,
    pub reference_year: i32,
    pub photos: Vec<HandPhoto>,
    pub consult_oracle: bool,
}

/// The complete result of a consultation. Either this record is produced in
/// full (possibly with degraded analysis fields) or `run` returns an error;
/// never a partial reading.
#[derive(Debug, Clone)]
pub struct Reading {
    pub personal_year: PersonalYear,
    pub interpretation: Interpretation,
    pub oracle: OracleOutcome,
}

/// Drives one consultation end to end: heuristic analysis of the photos,
/// cycle lookup, narrative composition and the optional oracle call.
pub struct ReadingEngine<'k, O: Oracle> {
    oracle: O,
    knowledge: &'k KnowledgeBase,
}

impl<'k, O: Oracle> ReadingEngine<'k, O> {
    pub fn new(oracle: O, knowledge: &'k KnowledgeBase) -> Self {
        Self { oracle, knowledge }
    }

    pub async fn run(&self, request: &ReadingRequest) -> Result<Reading> {
        validate_non_empty_string("question", &request.question).map_err(|_| {
            ReadingError::ValidationError {
                message: "question must not be empty".to_string(),
            }
        })?;

        tracing::info!("Starting reading");

        let personal_year = cycles::personal_year(request.birth_date, request.reference_year)?;
        tracing::debug!("Personal year: {}", personal_year);

        let (shape_label, line_reading) = analyze_photos(&request.photos);
        tracing::debug!(
            "Hand analysis: shape={}, lines={:?}",
            shape_label,
            line_reading
        );

        let interpretation = composer::compose(
            shape_label,
            line_reading.as_ref(),
            personal_year.get(),
            self.knowledge,
        );

        let oracle = if request.consult_oracle {
            let payload = composer::build_payload(
                &request.question,
                personal_year.get(),
                self.knowledge,
                &request.photos,
            );
            tracing::info!(
                "Consulting generative model with {} attachment(s)",
                payload.attachments.len()
            );
            match self.oracle.generate(&payload).await {
                Ok(text) => OracleOutcome::Text(text),
                Err(e) => {
                    tracing::warn!("Generative model call failed: {}", e);
                    OracleOutcome::Unavailable {
                        message: e.to_string(),
                    }
                }
            }
        } else {
            OracleOutcome::Skipped
        };

        tracing::info!("Reading completed");
        Ok(Reading {
            personal_year,
            interpretation,
            oracle,
        })
    }
}

// Only the first uploaded palm drives the heuristics; further photos travel
// to the oracle as attachments.
fn analyze_photos(photos: &[HandPhoto]) -> (ShapeLabel, Option<LineReading>) {
    match photos.first() {
        Some(photo) => (
            shape::classify_bytes(&photo.bytes),
            Some(lines::detect_bytes(&photo.bytes)),
        ),
        None => (ShapeLabel::Indeterminate, None),
    }
}
