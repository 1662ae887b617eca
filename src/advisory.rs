//! Health advisories from a hosted language model
//!
//! The prompt embeds the live weather and PM2.5 reading together with the
//! user's condition and is sent as a single user message to an
//! OpenAI-compatible chat completions endpoint (Groq by default).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::AdvisoryConfig;
use crate::error::AirAwareError;
use crate::models::{LocationQuery, WeatherSnapshot, format_pm2_5};

// Chat completions message format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Chat completions request format
#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

// Chat completions response format
#[derive(Debug, Deserialize, Clone)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Choice {
    pub message: ChatMessage,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> crate::Result<ChatResponse>;
}

/// HTTP transport for the Groq chat completions API
pub struct GroqTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GroqTransport {
    pub fn new(config: &AdvisoryConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| AirAwareError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for GroqTransport {
    async fn chat(&self, req: &ChatRequest) -> crate::Result<ChatResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                AirAwareError::advisory(format!("Failed to send request to Groq API: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AirAwareError::advisory(format!(
                "Groq API error {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            AirAwareError::advisory(format!("Failed to parse Groq API response: {e}"))
        })
    }
}

/// Sends advisory prompts and returns the model's reply
#[derive(Clone)]
pub struct AdvisoryClient {
    tx: Arc<dyn Transport>,
    model: String,
    timeout: Duration,
}

impl AdvisoryClient {
    pub fn new(tx: Arc<dyn Transport>, model: String, timeout: Duration) -> Self {
        Self { tx, model, timeout }
    }

    /// Build a client backed by [`GroqTransport`]
    pub fn from_config(config: &AdvisoryConfig) -> crate::Result<Self> {
        let tx = GroqTransport::new(config)?;
        Ok(Self::new(
            Arc::new(tx),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds.into()),
        ))
    }

    /// Submit one non-streaming completion and return the first choice verbatim
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn advise(&self, prompt: &str) -> crate::Result<String> {
        let start_time = Instant::now();
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let response = tokio::time::timeout(self.timeout, self.tx.chat(&request))
            .await
            .map_err(|_| {
                warn!("Advisory request timed out after {:?}", self.timeout);
                AirAwareError::advisory(format!(
                    "request timed out after {} seconds",
                    self.timeout.as_secs_f64()
                ))
            })??;

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(AirAwareError::advisory("Groq API returned empty choices"));
        };

        info!(
            "Received advisory ({} chars) in {:.3}s",
            choice.message.content.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(choice.message.content)
    }
}

/// Natural-language prompt asking for precautions
#[must_use]
pub fn build_prompt(query: &LocationQuery, snapshot: &WeatherSnapshot, disease: &str) -> String {
    format!(
        "I am in {}, an area of {}. The weather is {} and the AQI is {}. I have {}. Please provide immediate precautionary measures.",
        query.area,
        query.city,
        snapshot.description,
        format_pm2_5(snapshot.pm2_5),
        disease
    )
}
