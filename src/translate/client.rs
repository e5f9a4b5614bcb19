use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::TranslationFailure;
use super::interface::TranslateInterface;

pub const SOURCE_LANG: &str = "ru";
pub const TARGET_LANG: &str = "en";
pub const FORMAT: &str = "text";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Google Cloud Translation v2 client, fixed to ru -> en plain text
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateEnvelope {
    data: TranslationsData,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GoogleTranslateClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        info!(
            "Initialized GoogleTranslateClient: base_url={}, {} -> {}, format={}, api_key={}",
            base_url,
            SOURCE_LANG,
            TARGET_LANG,
            FORMAT,
            if api_key.is_some() { "set" } else { "unset" }
        );
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/language/translate/v2", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslateInterface for GoogleTranslateClient {
    async fn translate(&self, text: &str) -> Result<String, TranslationFailure> {
        let body = TranslateBody {
            q: text,
            source: SOURCE_LANG,
            target: TARGET_LANG,
            format: FORMAT,
        };

        // The key travels in a header so it never appears in a request URL
        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!("Sending translate request: chars={}", text.chars().count());
        let response = request.send().await.map_err(TranslationFailure::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(TranslationFailure::from_reqwest)?;

        if !status.is_success() {
            return Err(TranslationFailure::Api {
                status: status.as_u16(),
                message: api_error_message(status, body),
            });
        }

        let envelope: TranslateEnvelope = serde_json::from_str(&body)?;
        envelope
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(TranslationFailure::EmptyResponse)
    }
}

/// Extract the message from Google's error envelope, falling back to the raw body
fn api_error_message(status: reqwest::StatusCode, body: String) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
        return envelope.error.message;
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    }
}
