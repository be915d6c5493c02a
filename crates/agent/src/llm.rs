use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use gifting_core::config::{LlmConfig, LlmProvider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.7;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Single-turn completion client over the provider's HTTP API.
pub struct HttpLlmClient {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl HttpLlmClient {
    /// Returns `Ok(None)` when the provider lacks credentials, so callers can
    /// run without a generator.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build llm http client")?;

        Ok(Some(Self {
            provider: config.provider,
            endpoint: endpoint(config.provider, config.base_url.as_deref()),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
        }))
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> &str {
        self.api_key.as_ref().map(|key| key.expose_secret()).unwrap_or_default()
    }

    async fn complete_openai(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: TEMPERATURE,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key())
            .json(&body)
            .send()
            .await
            .context("openai request failed")?;

        let parsed: ChatResponse = checked(response).await?.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("openai response contained no choices"))
    }

    async fn complete_anthropic(&self, prompt: &str) -> Result<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", self.api_key())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("anthropic request failed")?;

        let parsed: MessagesResponse = checked(response).await?.json().await?;
        parsed
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or_else(|| anyhow!("anthropic response contained no text block"))
    }

    async fn complete_ollama(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest { model: &self.model, prompt, stream: false };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?;

        let parsed: GenerateResponse = checked(response).await?.json().await?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAi => self.complete_openai(prompt).await,
            LlmProvider::Anthropic => self.complete_anthropic(prompt).await,
            LlmProvider::Ollama => self.complete_ollama(prompt).await,
        }
    }
}

/// Completion URL for a provider; `base_url` replaces the public API root.
pub fn endpoint(provider: LlmProvider, base_url: Option<&str>) -> String {
    let base = base_url.map(|url| url.trim().trim_end_matches('/')).filter(|url| !url.is_empty());
    match provider {
        LlmProvider::OpenAi => format!("{}/chat/completions", base.unwrap_or(OPENAI_API_BASE)),
        LlmProvider::Anthropic => format!("{}/messages", base.unwrap_or(ANTHROPIC_API_BASE)),
        LlmProvider::Ollama => format!("{}/api/generate", base.unwrap_or("http://localhost:11434")),
    }
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("llm provider returned {status}: {body}"))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}
