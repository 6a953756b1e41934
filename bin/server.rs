// Platform Evolution Sankey - Web Server
// Serves the computed layout to a browser-side renderer

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use platform_sankey::{diagram_from_config, SankeyConfig};

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Arc<SankeyConfig>,
}

/// API Response wrapper
#[derive(serde::Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/diagram - The renderer input, rebuilt per request so a
/// wall-clock reference month stays current
async fn get_diagram(State(state): State<AppState>) -> impl IntoResponse {
    match diagram_from_config(&state.config) {
        Ok(diagram) => (StatusCode::OK, Json(ApiResponse::ok(diagram))).into_response(),
        Err(e) => {
            eprintln!("Error building diagram: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("{:#}", e))),
            )
                .into_response()
        }
    }
}

/// GET /api/config - The loaded configuration
async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.config.as_ref().clone()))
}

/// GET / - Serve the renderer page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Platform Evolution Sankey - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Load configuration from the first argument, or the sample
    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match SankeyConfig::from_json_file(path) {
            Ok(config) => {
                println!("✓ Configuration loaded: {}", path);
                config
            }
            Err(e) => {
                eprintln!("❌ Failed to load {}: {:#}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("✓ Using built-in sample dataset");
            SankeyConfig::sample()
        }
    };

    // Create shared state
    let state = AppState {
        config: Arc::new(config),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/diagram", get(get_diagram))
        .route("/config", get(get_config))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/diagram");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
