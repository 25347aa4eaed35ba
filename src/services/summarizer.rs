use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("Summarizer is not configured")]
    NotConfigured,

    #[error("Summarizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarizer API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed summarizer response: {0}")]
    MalformedResponse(String),
}

/// Turns a blob of journal text into a free-text summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;
}

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Summarizer backed by the Anthropic Messages API.
pub struct ClaudeSummarizer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeSummarizer {
    pub fn from_config(config: &Config) -> Result<Self, SummarizerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.summarizer_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.claude_api_url.clone(),
            api_key: config.claude_api_key.clone(),
            model: config.claude_model.clone(),
            max_tokens: config.claude_max_tokens,
        })
    }
}

#[async_trait]
impl Summarizer for ClaudeSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        if self.api_key.is_empty() {
            return Err(SummarizerError::NotConfigured);
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{
                    "role": "user",
                    "content": build_prompt(text)
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Api { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body)
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the user's journal patterns and provide:
- Stress triggers
- Anxiety patterns
- Mood cycles
- Behavioral insights
- Personalized coping strategies

Text:
{}"#,
        text
    )
}

fn extract_text(body: &serde_json::Value) -> Result<String, SummarizerError> {
    body["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SummarizerError::MalformedResponse("missing content[0].text".into()))
}
