use crate::domain::model::OraclePayload;
use crate::utils::error::Result;
use async_trait::async_trait;

/// External generative-AI collaborator: accepts an instruction text plus
/// ordered inline image attachments, returns a single text result or fails.
/// The core never calls the network directly; adapters implement this port.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, payload: &OraclePayload) -> Result<String>;
}
