use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{domains::user::rest::user_routes, error::AppError, state::AppState};

pub fn create_app<S: AppState>(state: S) -> Router {
  Router::new()
    .nest("/api", user_routes::<S>())
    .fallback(not_found_handler)
    // The route table is method+path; a known path with the wrong method
    // is just as unmatched as an unknown path.
    .method_not_allowed_fallback(not_found_handler)
    .with_state(state)
    .layer(CorsLayer::permissive())
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
          let method = req.method().clone();
          let uri = req.uri().clone();
          tracing::info_span!("http_request", %method, uri = %uri)
        })
        .on_response(
          |res: &axum::http::Response<_>, _latency: std::time::Duration, _span: &tracing::Span| {
            let status = res.status();
            if status.is_server_error() {
              tracing::error!(%status, "response");
            } else {
              tracing::info!(%status, "response");
            }
          },
        ),
    )
}

pub async fn not_found_handler() -> AppError {
  AppError::not_found("Not found")
}
