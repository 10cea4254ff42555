pub mod composer;
pub mod cycles;
pub mod knowledge;
pub mod lines;
pub mod reading;
pub mod shape;

pub use crate::domain::model::{
    HandPhoto, Interpretation, LineReading, OracleOutcome, PersonalYear, ShapeLabel,
};
pub use crate::domain::ports::Oracle;
pub use crate::utils::error::Result;
