use thiserror::Error;

use perioscope_bedrock::error::{BedrockError, InvokeError};
use perioscope_core::error::CoreError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid diagnostic input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("model quota exhausted after {attempts} attempts: {message}")]
    QuotaExhausted { attempts: u32, message: String },

    #[error("model service error: {0}")]
    Service(String),

    #[error("prompt construction failed: {0}")]
    Prompt(#[from] BedrockError),
}

impl From<InvokeError> for PipelineError {
    fn from(e: InvokeError) -> Self {
        match e {
            InvokeError::RetriesExhausted { attempts, message } => {
                PipelineError::QuotaExhausted { attempts, message }
            }
            InvokeError::Service(message) => PipelineError::Service(message),
        }
    }
}
