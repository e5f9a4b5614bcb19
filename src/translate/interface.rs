use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::TranslationFailure;

/// Body of `POST /translate`. Only `text` is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
}

/// `null` reads as missing, other non-string values are forwarded as their JSON text
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

impl TranslationRequest {
    /// Read the request body the way a JSON body parser would.
    ///
    /// Bodies without a JSON content type, empty bodies and JSON that is not
    /// an object all yield an empty `text`. Only malformed JSON is an error.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, TranslationFailure> {
        if !content_type.is_some_and(is_json_content_type) {
            return Ok(Self::default());
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            TranslationFailure::InvalidRequest(format!("Failed to parse the request body as JSON: {}", e))
        })?;
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Self::default()),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Result of one translation call, mapped 1:1 to an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationOutcome {
    Success { result: String },
    Failure { error: String },
}

impl TranslationOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            TranslationOutcome::Success { .. } => StatusCode::OK,
            TranslationOutcome::Failure { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<Result<String, TranslationFailure>> for TranslationOutcome {
    fn from(result: Result<String, TranslationFailure>) -> Self {
        match result {
            Ok(result) => TranslationOutcome::Success { result },
            Err(e) => TranslationOutcome::Failure {
                error: e.to_string(),
            },
        }
    }
}

impl IntoResponse for TranslationOutcome {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Translation capability with a fixed source/target pair
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `text`. The call is attempted exactly once.
    async fn translate(&self, text: &str) -> Result<String, TranslationFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let ok = TranslationOutcome::Success {
            result: "hello".to_string(),
        };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"result":"hello"}"#);
        assert_eq!(ok.status(), StatusCode::OK);

        let failed = TranslationOutcome::from(Err::<String, _>(TranslationFailure::Api {
            status: 400,
            message: "empty text".to_string(),
        }));
        assert_eq!(
            serde_json::to_string(&failed).unwrap(),
            r#"{"error":"Error: empty text"}"#
        );
        assert_eq!(failed.status(), StatusCode::BAD_REQUEST);
    }

    const JSON: Option<&str> = Some("application/json");

    fn text_of(content_type: Option<&str>, body: &str) -> String {
        TranslationRequest::from_body(content_type, body.as_bytes())
            .unwrap()
            .text
    }

    #[test]
    fn test_request_ignores_extra_fields() {
        assert_eq!(text_of(JSON, r#"{"text":"привет","from":"de"}"#), "привет");
        assert_eq!(text_of(JSON, "{}"), "");
    }

    #[test]
    fn test_request_text_is_lenient() {
        assert_eq!(text_of(JSON, r#"{"text":null}"#), "");
        assert_eq!(text_of(JSON, r#"{"text":123}"#), "123");
        assert_eq!(text_of(JSON, r#"{"text":true}"#), "true");
        assert_eq!(text_of(JSON, r#"["привет"]"#), "");
        assert_eq!(text_of(JSON, r#""привет""#), "");
        assert_eq!(text_of(JSON, "   "), "");
    }

    #[test]
    fn test_non_json_content_type_reads_as_empty() {
        assert_eq!(text_of(None, r#"{"text":"привет"}"#), "");
        assert_eq!(text_of(Some("text/plain"), r#"{"text":"привет"}"#), "");
        assert_eq!(text_of(Some("text/plain"), "{not json"), "");
        assert_eq!(
            text_of(Some("application/json; charset=utf-8"), r#"{"text":"привет"}"#),
            "привет"
        );
        assert_eq!(
            text_of(Some("application/vnd.api+json"), r#"{"text":"привет"}"#),
            "привет"
        );
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = TranslationRequest::from_body(JSON, b"{not json").unwrap_err();
        assert!(matches!(err, TranslationFailure::InvalidRequest(_)));
        assert!(err
            .to_string()
            .starts_with("Error: Failed to parse the request body as JSON"));
    }
}
