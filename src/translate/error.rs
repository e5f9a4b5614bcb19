/// Every way a translation can fail. All variants reach the caller as
/// HTTP 400 with the `Display` text as the `error` field.
#[derive(thiserror::Error, Debug)]
pub enum TranslationFailure {
    #[error("Error: {message}")]
    Api { status: u16, message: String },
    #[error("Error: {0}")]
    Request(reqwest::Error),
    #[error("Error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Error: translation response contained no translations")]
    EmptyResponse,
    #[error("Error: {0}")]
    InvalidRequest(String),
}

impl TranslationFailure {
    /// Wrap a transport error with its URL stripped, so request details
    /// never reach the response body or the logs
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        TranslationFailure::Request(e.without_url())
    }
}
