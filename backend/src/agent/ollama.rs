//! Ollama-backed slot extractor
//!
//! Calls the Ollama chat API in JSON mode with deterministic sampling.

use super::extractor::{
    confirmation_prompt, extraction_prompt, parse_confirmation, parse_extraction, Extraction,
    ExtractorError, SlotExtractor,
};
use super::slots::Slots;
use crate::config::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token budget of an extraction call
const EXTRACTION_NUM_PREDICT: u32 = 500;
/// Token budget of a confirmation call
const CONFIRMATION_NUM_PREDICT: u32 = 50;

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    format: &'static str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

/// `SlotExtractor` talking to an Ollama server
pub struct OllamaExtractor {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OllamaExtractor {
    /// Create an extractor with its own HTTP client
    ///
    /// # Errors
    /// * Returns `ExtractorError::Request` if the client cannot be built
    pub fn new(config: LlmConfig) -> Result<Self, ExtractorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractorError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Run one chat completion and return the raw message content
    async fn chat(
        &self,
        system: &str,
        prompt: &str,
        num_predict: u32,
    ) -> Result<String, ExtractorError> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        let request = OllamaChatRequest {
            model: &self.config.model,
            messages: vec![
                OllamaMessage {
                    role: "system",
                    content: system,
                },
                OllamaMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            format: "json",
            stream: false,
            options: OllamaOptions {
                temperature: 0.0,
                num_predict,
            },
        };

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Calling Ollama"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractorError::Request(format!("Failed to reach Ollama: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(ExtractorError::Request(format!(
                "Ollama returned error status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractorError::Request(format!("Malformed Ollama response: {}", e)))?;

        let content = parsed.message.content.trim().to_string();
        tracing::debug!(response = %content, "Ollama response");
        Ok(content)
    }
}

#[async_trait]
impl SlotExtractor for OllamaExtractor {
    async fn extract(
        &self,
        slots: &Slots,
        last_question: &str,
        user_message: &str,
    ) -> Result<Extraction, ExtractorError> {
        let today = chrono::Local::now().date_naive();
        let prompt = extraction_prompt(today, slots, last_question, user_message);
        let raw = self
            .chat(
                "Output ONLY complete valid JSON ending with }}. No text before or after JSON.",
                &prompt,
                EXTRACTION_NUM_PREDICT,
            )
            .await?;
        parse_extraction(&raw, slots)
    }

    async fn detect_confirmation(
        &self,
        last_question: &str,
        user_message: &str,
    ) -> Result<bool, ExtractorError> {
        let prompt = confirmation_prompt(last_question, user_message);
        let raw = self
            .chat("Output ONLY valid JSON.", &prompt, CONFIRMATION_NUM_PREDICT)
            .await?;
        parse_confirmation(&raw)
    }
}
