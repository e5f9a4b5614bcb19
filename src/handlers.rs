use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info};

use crate::state::AppState;
use crate::translate::{TranslationFailure, TranslationOutcome, TranslationRequest};

const GREETING: &str = "Hello, kappa";

pub async fn hello() -> &'static str {
    GREETING
}

/// Any GET gets the greeting; other methods get a 404 naming the route
pub async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::GET || method == Method::HEAD {
        return (StatusCode::OK, GREETING).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", method, uri.path()),
    )
        .into_response()
}

/// `POST /translate`: one awaited translation call, mapped to 200 or 400
pub async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> TranslationOutcome {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let outcome = match TranslationRequest::from_body(content_type, &body) {
        Ok(request) => {
            debug!("Translating: {:?}", request.text);
            let result = state.translator.translate(&request.text).await;
            if let Err(TranslationFailure::Api { status, .. }) = &result {
                debug!("Translation API responded with status {}", status);
            }
            TranslationOutcome::from(result)
        }
        Err(e) => TranslationOutcome::from(Err::<String, _>(e)),
    };

    match &outcome {
        TranslationOutcome::Success { .. } => info!("POST /translate - 200"),
        TranslationOutcome::Failure { error } => error!("POST /translate - 400: {}", error),
    }
    outcome
}
