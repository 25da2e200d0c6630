//! The generative-model seam and its Bedrock Converse implementation.

use std::future::Future;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::http::HttpResponse;
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::info;

use crate::error::{BedrockError, CallError};

/// One external text-generation call.
///
/// Implementations perform exactly one request per `generate` call and
/// classify quota exhaustion as [`CallError::RateLimited`]; retrying is
/// the rate limiter's job.
pub trait GenerativeModel: Send + Sync {
    fn model_id(&self) -> &str;

    fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, CallError>> + Send;
}

/// Claude on Bedrock via the Converse API.
pub struct BedrockModel {
    client: Client,
    model_id: String,
}

impl BedrockModel {
    /// Build a runtime client with SDK retries disabled, so the rate
    /// limiter sees every throttling response.
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        let runtime_config = aws_sdk_bedrockruntime::config::Builder::from(config)
            .retry_config(RetryConfig::disabled())
            .build();
        Self {
            client: Client::from_conf(runtime_config),
            model_id: model_id.into(),
        }
    }

    async fn converse(&self, system_prompt: &str, prompt: &str) -> Result<String, BedrockError> {
        info!(model_id = %self.model_id, prompt_len = prompt.len(), "invoking model");

        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .send()
            .await
            .map_err(classify_converse_error)?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            info!(
                model_id = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "model invocation complete"
            );
        }

        Ok(text)
    }
}

impl GenerativeModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, CallError> {
        self.converse(system_prompt, prompt)
            .await
            .map_err(CallError::from)
    }
}

/// Throttling (HTTP 429, `ThrottlingException` or
/// `ServiceQuotaExceededException`) becomes [`BedrockError::Throttled`];
/// everything else is an invocation failure.
fn classify_converse_error(err: SdkError<ConverseError, HttpResponse>) -> BedrockError {
    let too_many_requests = err
        .raw_response()
        .is_some_and(|raw| raw.status().as_u16() == 429);

    let service_error = err.into_service_error();
    if too_many_requests
        || service_error.is_throttling_exception()
        || service_error.code() == Some("ServiceQuotaExceededException")
    {
        BedrockError::Throttled(service_error.to_string())
    } else {
        BedrockError::Invocation(service_error.to_string())
    }
}
