//! HTTP client for an OpenAI-compatible chat completions endpoint, with a
//! primary/fallback model chain.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{Result, ResumeMatcherError};
use crate::llm::prompts::SYSTEM_PROMPT;
use crate::llm::response::{parse_analysis, RawAnalysis};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        if config.models.is_empty() {
            return Err(ResumeMatcherError::Configuration(
                "no generative models configured".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            models: config.models.clone(),
            temperature: config.temperature,
        })
    }

    /// Send the prompt to each configured model in order, returning the
    /// first parseable analysis. Transport and parse failures both fall
    /// through to the next model.
    pub async fn analyze(&self, prompt: &str) -> Result<RawAnalysis> {
        let mut last_err = None;
        for model in &self.models {
            log::debug!("requesting analysis from {}", model);
            match self.chat(model, prompt).await.and_then(|c| parse_analysis(&c)) {
                Ok(analysis) => return Ok(analysis),
                Err(e) => {
                    log::warn!("model {} failed: {}", model, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            ResumeMatcherError::LlmService("no model produced a response".to_string())
        }))
    }

    async fn chat(&self, model: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResumeMatcherError::LlmService(format!(
                "{} returned HTTP {}",
                model,
                response.status()
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ResumeMatcherError::LlmService("empty choices array".to_string()))
    }
}
