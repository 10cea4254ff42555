pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::gemini::GeminiClient;
pub use crate::config::AppConfig;
pub use crate::core::knowledge::KnowledgeBase;
pub use crate::core::reading::{Reading, ReadingEngine, ReadingRequest};
pub use crate::utils::error::{ReadingError, Result};
