use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{Request, Response},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::state::AppState;
use crate::{foods, logs, routes};

/// Every resource route, mounted under `/api/v1` by `build_app`.
fn api_router() -> Router<AppState> {
    Router::new()
        .merge(logs::router())
        .merge(foods::router())
        .merge(routes::router())
        .route("/health", get(|| async { "ok" }))
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            // one span per request; status is recorded once the response is ready
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|res: &Response<_>, latency: Duration, span: &Span| {
                    let status = res.status();
                    span.record("status", status.as_u16());
                    if status.is_server_error() {
                        tracing::error!(%status, ?latency, "request failed");
                    } else {
                        tracing::debug!(%status, ?latency, "request served");
                    }
                }),
        )
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "nutrilog listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_api_under_versioned_prefix() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_app(AppState::fake())).await.unwrap()
        });
        let http = reqwest::Client::new();

        let health = http
            .get(format!("http://{}/api/v1/health", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(health.status(), 200);
        assert_eq!(health.text().await.unwrap(), "ok");

        let resolved: serde_json::Value = http
            .get(format!("http://{}/api/v1/nutrition/resolve", addr))
            .query(&[("food", "apple"), ("quantity_g", "200")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resolved["estimated"], false);
        assert_eq!(resolved["profile"]["calories"], 104.0);

        let unversioned = http.get(format!("http://{}/health", addr)).send().await.unwrap();
        assert_eq!(unversioned.status(), 404);
    }
}
