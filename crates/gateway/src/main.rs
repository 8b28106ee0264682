//! PaperLens API Gateway
//!
//! The HTTP surface over the corpus query engine. Handles:
//! - Loading the corpus snapshot once at startup
//! - Request routing
//! - Observability (logging, metrics, tracing)

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use paperlens_common::{config::AppConfig, metrics, Corpus};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub corpus: Arc<Corpus>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    let config = Arc::new(config);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.observability.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting PaperLens API Gateway v{}", paperlens_common::VERSION);

    // Initialize metrics
    if config.observability.metrics_port > 0 {
        PrometheusBuilder::new()
            .with_http_listener(SocketAddr::from((
                [0, 0, 0, 0],
                config.observability.metrics_port,
            )))
            .install()?;
    }
    metrics::register_metrics();

    // Load the corpus snapshot; a malformed dataset aborts startup
    info!(path = %config.dataset.path, "Loading corpus...");
    let corpus = Corpus::load(&config.dataset.path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load corpus");
        anyhow::anyhow!(e.to_string())
    })?;
    info!(records = corpus.len(), "Corpus loaded");
    metrics::record_corpus_size(corpus.len());

    // Create app state
    let state = AppState {
        config: config.clone(),
        corpus: Arc::new(corpus),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // The core query operation
        .route("/query", post(handlers::query::query))
        // Paper detail and source facet
        .route("/papers/{id}", get(handlers::papers::get_paper))
        .route("/sources", get(handlers::sources::list_sources));

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use paperlens_common::model::{PaperRecord, Source};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let records = vec![
            PaperRecord {
                id: "p1".to_string(),
                title: "Deep learning for antibody design".to_string(),
                authors: vec!["A. Researcher".to_string()],
                abstract_text: "Generative models for CDR loops.".to_string(),
                year: Some(2022),
                source: Source::Arxiv,
                citations: 40,
                url: Some("https://example.org/p1".to_string()),
                pdf_url: None,
                rank: 2,
            },
            PaperRecord {
                id: "p2".to_string(),
                title: "Antibody affinity maturation".to_string(),
                authors: vec![],
                abstract_text: String::new(),
                year: None,
                source: Source::PubMed,
                citations: 40,
                url: None,
                pdf_url: None,
                rank: 1,
            },
            PaperRecord {
                id: "p3".to_string(),
                title: "Protein language models".to_string(),
                authors: vec![],
                abstract_text: "Unrelated to antibodies? Not quite.".to_string(),
                year: Some(2020),
                source: Source::SciSpace,
                citations: 3,
                url: None,
                pdf_url: None,
                rank: 3,
            },
        ];
        AppState {
            config: Arc::new(AppConfig::default()),
            corpus: Arc::new(Corpus::from_records(records).unwrap()),
        }
    }

    async fn json_request(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "GET", "/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_reports_corpus() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "GET", "/v1/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"]["corpus"]["records"], 3);
    }

    #[tokio::test]
    async fn test_query_default_relevance_order() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "POST", "/v1/query", Some(serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 3);
        assert_eq!(body["stats"]["count"], 3);
        assert_eq!(body["items"][0]["id"], "p2");
        assert_eq!(body["items"][1]["id"], "p1");
    }

    #[tokio::test]
    async fn test_query_unknown_sort_falls_back_to_relevance() {
        let app = create_router(test_state());
        let (status, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"sort": "best_match"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sort"], "relevance");
    }

    #[tokio::test]
    async fn test_query_citation_tie_breaks_by_rank() {
        let app = create_router(test_state());
        let (_, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"sort": "citations_desc"})),
        )
        .await;
        // p1 and p2 both have 40 citations; p2 carries the lower rank.
        assert_eq!(body["items"][0]["id"], "p2");
        assert_eq!(body["items"][1]["id"], "p1");
        assert_eq!(body["items"][2]["id"], "p3");
    }

    #[tokio::test]
    async fn test_query_unknown_sources_ignored() {
        let app = create_router(test_state());
        let (status, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"sources": ["arXiv", "Semantic Scholar"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Only the recognized arXiv filter applies.
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_query_year_bound_excludes_unknown_year() {
        let app = create_router(test_state());
        let (_, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"year_from": 2021})),
        )
        .await;
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["id"], "p1");
        assert_eq!(body["stats"]["count"], 1);
    }

    #[tokio::test]
    async fn test_query_reversed_year_bounds_rejected() {
        let app = create_router(test_state());
        let (status, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"year_from": 2024, "year_to": 2020})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
        assert_eq!(body["error"]["field"], "year_from");
    }

    #[tokio::test]
    async fn test_query_zero_page_size_rejected() {
        let app = create_router(test_state());
        let (status, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"page_size": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PAGE_SIZE");
    }

    #[tokio::test]
    async fn test_query_out_of_range_page_clamps() {
        let app = create_router(test_state());
        let (status, body) = json_request(
            app,
            "POST",
            "/v1/query",
            Some(serde_json::json!({"page_size": 2, "page": 9999})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 2);
        assert_eq!(body["total_pages"], 2);
    }

    #[tokio::test]
    async fn test_get_paper_detail_includes_abstract() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "GET", "/v1/papers/p1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Deep learning for antibody design");
        assert_eq!(body["abstract"], "Generative models for CDR loops.");
    }

    #[tokio::test]
    async fn test_get_paper_not_found() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "GET", "/v1/papers/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "PAPER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_sources_covers_enumeration() {
        let app = create_router(test_state());
        let (status, body) = json_request(app, "GET", "/v1/sources", None).await;
        assert_eq!(status, StatusCode::OK);
        let sources = body["sources"].as_array().unwrap();
        assert_eq!(sources.len(), 5);
        let arxiv = sources
            .iter()
            .find(|s| s["name"] == "arXiv")
            .expect("arXiv facet present");
        assert_eq!(arxiv["count"], 1);
    }
}
