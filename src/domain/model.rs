use crate::utils::error::{ReadingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hand-shape archetype assigned by the classifier. Exactly one label per
/// analyzed photo; `Error` signals analysis failure, `Indeterminate` signals
/// that no hand contour was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeLabel {
    Square,
    Conic,
    Philosophic,
    Spatulate,
    Indeterminate,
    Error,
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeLabel::Square => "cuadrada",
            ShapeLabel::Conic => "conica",
            ShapeLabel::Philosophic => "filosofica",
            ShapeLabel::Spatulate => "espatulada",
            ShapeLabel::Indeterminate => "indeterminada",
            ShapeLabel::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// The four palm lines read by the service. Fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineName {
    Life,
    Head,
    Heart,
    Destiny,
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineName::Life => "vida",
            LineName::Head => "cabeza",
            LineName::Heart => "corazon",
            LineName::Destiny => "destino",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePresence {
    Present,
    Absent,
    Indeterminate,
}

impl fmt::Display for LinePresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinePresence::Present => "presente",
            LinePresence::Absent => "ausente",
            LinePresence::Indeterminate => "indeterminada",
        };
        write!(f, "{}", name)
    }
}

/// Presence state of the four palm lines. The struct guarantees the detector
/// invariant: all four lines are always populated, no partial readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReading {
    pub life: LinePresence,
    pub head: LinePresence,
    pub heart: LinePresence,
    pub destiny: LinePresence,
}

impl LineReading {
    pub fn uniform(presence: LinePresence) -> Self {
        Self {
            life: presence,
            head: presence,
            heart: presence,
            destiny: presence,
        }
    }

    pub fn indeterminate() -> Self {
        Self::uniform(LinePresence::Indeterminate)
    }

    pub fn get(&self, line: LineName) -> LinePresence {
        match line {
            LineName::Life => self.life,
            LineName::Head => self.head,
            LineName::Heart => self.heart,
            LineName::Destiny => self.destiny,
        }
    }

    pub fn entries(&self) -> [(LineName, LinePresence); 4] {
        [
            (LineName::Life, self.life),
            (LineName::Head, self.head),
            (LineName::Heart, self.heart),
            (LineName::Destiny, self.destiny),
        ]
    }
}

/// Numerological personal year, always within 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalYear(u8);

impl PersonalYear {
    pub fn new(value: u8) -> Result<Self> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReadingError::ValidationError {
                message: format!("personal year must be within 1..=9, got {}", value),
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PersonalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meaning of one personal-year cycle: {name, description, advice}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleMeaning {
    pub name: String,
    pub description: String,
    pub advice: String,
}

/// One uploaded hand photograph: raw bytes plus declared MIME type.
/// Ephemeral; consumed by the analysis and attached to the oracle payload,
/// never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandPhoto {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl HandPhoto {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Reads a photo from disk, deriving the MIME type from the extension.
    pub fn from_file(path: &str) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(bytes, mime_for_path(path)))
    }
}

fn mime_for_path(path: &str) -> &'static str {
    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}

/// The composed reading. Built fresh per request, immutable after
/// construction. `lines` is `None` when no photo was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub shape: ShapeLabel,
    pub lines: Option<LineReading>,
    pub cycle: CycleMeaning,
    pub narrative_text: String,
}

/// Prepared request for the external generative model: one instruction text
/// block followed by the inline image attachments, in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePayload {
    pub instruction_text: String,
    pub attachments: Vec<HandPhoto>,
}

/// Outcome of the external generative-model consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "detail")]
pub enum OracleOutcome {
    /// The model produced a reading.
    Text(String),
    /// The call failed; the message explains why. Never a crash.
    Unavailable { message: String },
    /// The caller asked for the automatic analysis only.
    Skipped,
}

/// Reason codes for heuristic-analysis failures, so callers can distinguish
/// "no hand detected" from "image unreadable" from an internal bug. These are
/// absorbed into degraded labels before leaving the analysis layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    #[error("image could not be decoded: {0}")]
    ImageUnreadable(String),
    #[error("no hand contour found in the photo")]
    NoHandDetected,
    #[error("analysis failed: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_year_bounds() {
        assert!(PersonalYear::new(0).is_err());
        assert!(PersonalYear::new(10).is_err());
        assert_eq!(PersonalYear::new(9).unwrap().get(), 9);
        assert_eq!(PersonalYear::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_line_reading_always_has_four_entries() {
        let reading = LineReading::indeterminate();
        assert_eq!(reading.entries().len(), 4);
        for (_, presence) in reading.entries() {
            assert_eq!(presence, LinePresence::Indeterminate);
        }
    }

    #[test]
    fn test_spanish_display_names() {
        assert_eq!(ShapeLabel::Square.to_string(), "cuadrada");
        assert_eq!(LineName::Heart.to_string(), "corazon");
        assert_eq!(LinePresence::Absent.to_string(), "ausente");
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path("palma.JPG"), "image/jpeg");
        assert_eq!(mime_for_path("palma.jpeg"), "image/jpeg");
        assert_eq!(mime_for_path("palma.png"), "image/png");
    }
}
