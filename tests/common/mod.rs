//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across different test categories

pub mod mocks;

use std::time::Duration;

use askbot::Data;
use askbot::config::GeminiConfig;
use askbot::utils::gemini_client::GeminiClient;
use url::Url;
use wiremock::MockServer;

/// Model name the fake Gemini endpoint is mounted under.
pub const TEST_MODEL: &str = "test-model";

/// Path of `generateContent` for [`TEST_MODEL`].
pub fn generate_path() -> String {
    format!("/v1beta/models/{TEST_MODEL}:generateContent")
}

/// Builds bot data whose Gemini client talks to `mock_server`.
pub fn data_for(mock_server: &MockServer, max_message_length: usize) -> Data {
    Data {
        gemini: gemini_for(mock_server),
        #[cfg(feature = "webhook")]
        webhook: None,
        max_message_length,
    }
}

/// Like [`data_for`], with webhook notifications posted to `/hook` on `webhook_server`.
#[cfg(feature = "webhook")]
pub fn data_with_webhook(gemini_server: &MockServer, webhook_server: &MockServer) -> Data {
    use askbot::utils::webhook::WebhookNotifier;

    let url = Url::parse(&format!("{}/hook", webhook_server.uri()))
        .expect("Failed to parse webhook server URI");

    Data {
        gemini: gemini_for(gemini_server),
        webhook: Some(
            WebhookNotifier::new(url, Duration::from_secs(5)).expect("Failed to build notifier"),
        ),
        max_message_length: 2000,
    }
}

fn gemini_for(mock_server: &MockServer) -> GeminiClient {
    let config = GeminiConfig {
        api_key: "test-key".to_string(),
        model: TEST_MODEL.to_string(),
        api_base: Url::parse(&mock_server.uri()).expect("Failed to parse mock server URI"),
        max_output_tokens: None,
        timeout: Duration::from_secs(5),
    };

    GeminiClient::new(&config).expect("Failed to build Gemini client")
}
