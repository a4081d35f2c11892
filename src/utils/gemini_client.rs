//! Client for the Gemini `generateContent` endpoint of the generative-language API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::GeminiConfig;

/// Errors that can occur while asking Gemini for an answer.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// Error during HTTP request communication.
    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("Unable to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint URL could not be built from the configured base.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The API returned an error object.
    #[error("Refused to complete request: {0}")]
    Refusal(String),

    /// The prompt was blocked by the safety filters.
    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    /// A candidate came back without any text.
    #[error("The model returned no text")]
    EmptyAnswer,
}

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    max_output_tokens: Option<u32>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> GeminiResult<Self> {
        let endpoint = config
            .api_base
            .join(&format!("v1beta/models/{}:generateContent", config.model))?;
        debug!("Gemini endpoint: {}", endpoint);

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Sends `prompt` as a single user turn and returns the generated text.
    pub async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        info!("Sending prompt to Gemini ({} chars)", prompt.chars().count());

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self
                .max_output_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Gemini responded with status {}", status);

        let parsed: GenerateResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                error!("Gemini returned {} with an unreadable body", status);
                return Err(GeminiError::Refusal(format!("HTTP {status}: {}", text.trim())));
            }
            Err(e) => return Err(e.into()),
        };

        extract_answer(parsed)
    }
}

fn extract_answer(response: GenerateResponse) -> GeminiResult<String> {
    if let Some(err) = response.error {
        warn!("Gemini refused the request: {}", err.message);
        return Err(GeminiError::Refusal(err.message));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        warn!("Gemini blocked the prompt: {}", reason);
        return Err(GeminiError::Blocked(reason));
    };

    let answer: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if answer.is_empty() {
        warn!(
            "Gemini candidate had no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
        return Err(GeminiError::EmptyAnswer);
    }

    debug!("Received answer of {} chars", answer.chars().count());
    Ok(answer)
}
