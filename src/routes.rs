use axum::{
    extract::Request,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, Span};
use uuid::Uuid;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // GET is answered by the catch-all, even on /translate
        .route("/translate", post(handlers::translate).get(handlers::hello))
        .fallback(handlers::fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "request",
                        id = %Uuid::new_v4(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|request: &Request, _span: &Span| {
                    debug!("Incoming {} {}", request.method(), request.uri().path());
                }),
        )
}
