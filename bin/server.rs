// SplitSmart - Web Server
// JSON API over the split engine plus the single-page calculator

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use split_smart::{
    init_logging, input, load_settings, BillState, Currency, Page, Participant, ParticipantSet,
    Settings, SplitSummary, TIP_PRESETS,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
struct AppState {
    settings: Arc<Settings>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn bad_request(message: String) -> Response {
    warn!(%message, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(message))).into_response()
}

/// Split request (everything optional falls back to settings)
#[derive(Debug, Deserialize)]
struct SplitRequest {
    #[serde(default)]
    total_bill: Option<f64>,
    #[serde(default)]
    tip_percentage: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    participants: Vec<Participant>,
    #[serde(default)]
    exempt_index: Option<usize>,
}

#[derive(Serialize)]
struct CurrencyResponse {
    code: &'static str,
    symbol: &'static str,
    label: String,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            code: currency.code(),
            symbol: currency.symbol(),
            label: currency.label(),
        }
    }
}

#[derive(Serialize)]
struct PageResponse {
    id: &'static str,
    title: &'static str,
    body: Vec<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/currencies - Supported currencies
async fn get_currencies() -> impl IntoResponse {
    let currencies: Vec<CurrencyResponse> = Currency::ALL.into_iter().map(Into::into).collect();
    Json(ApiResponse::ok(currencies))
}

/// GET /api/tip-presets - Preset tip percentages
async fn get_tip_presets() -> impl IntoResponse {
    Json(ApiResponse::ok(TIP_PRESETS))
}

/// POST /api/split - Compute a split
async fn post_split(State(state): State<AppState>, Json(request): Json<SplitRequest>) -> Response {
    let settings = &state.settings;

    let currency = match request.currency.as_deref() {
        Some(code) => match code.parse::<Currency>() {
            Ok(currency) => currency,
            Err(e) => return bad_request(e.to_string()),
        },
        None => settings.default_currency,
    };

    let total_bill = request
        .total_bill
        .map(input::sanitize_bill)
        .unwrap_or(settings.default_bill);
    let tip = request.tip_percentage.unwrap_or(settings.default_tip);
    let bill = BillState::new(total_bill, tip, currency);

    let participants = if request.participants.is_empty() {
        ParticipantSet::with_defaults(settings.initial_people)
    } else {
        ParticipantSet::new(request.participants)
    };

    if let Err(e) = settings.check_people(participants.len()) {
        return bad_request(e.to_string());
    }

    if let Some(index) = request.exempt_index {
        if index >= participants.len() {
            return bad_request(format!(
                "exempt_index {} is out of range for {} participants",
                index,
                participants.len()
            ));
        }
    }

    let summary = SplitSummary::build(&bill, &participants, request.exempt_index);
    info!(people = participants.len(), exempt = ?request.exempt_index, "split computed");

    (StatusCode::OK, Json(ApiResponse::ok(summary))).into_response()
}

/// GET /api/pages/:page - Static page text
async fn get_page(Path(page): Path<String>) -> Response {
    match page.parse::<Page>() {
        Ok(page) => {
            let response = PageResponse {
                id: page.id(),
                title: page.title(),
                body: page.body(),
            };
            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        Err(e) => {
            let message = e.to_string();
            (StatusCode::NOT_FOUND, Json(ApiResponse::err(message))).into_response()
        }
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

fn build_router(state: AppState) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/currencies", get(get_currencies))
        .route("/tip-presets", get(get_tip_presets))
        .route("/split", post(post_split))
        .route("/pages/:page", get(get_page))
        .with_state(state);

    // Build main router
    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info");

    println!("🌐 SplitSmart - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let settings = load_settings()?;
    let addr = settings.server_bind.clone();

    let state = AppState {
        settings: Arc::new(settings),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(%addr, error = %e, "failed to bind");
        anyhow::anyhow!("Failed to bind to {}: {}", addr, e)
    })?;

    info!(%addr, "server listening");
    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/split", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState {
            settings: Arc::new(Settings::default()),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_split_with_exemption() {
        let request = post_json(
            "/api/split",
            json!({
                "total_bill": 100.0,
                "tip_percentage": 15.0,
                "currency": "USD",
                "participants": [{"name": "Ana", "share": 50.0}, {"name": "Ben", "share": 50.0}],
                "exempt_index": 0
            }),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["lines"][0]["amount"]["kind"], "exempt");
        assert_eq!(body["data"]["lines"][1]["display"], "$115.00");
    }

    #[tokio::test]
    async fn test_split_defaults_from_settings() {
        let (status, body) = send(post_json("/api/split", json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lines"][0]["display"], "$57.50");
        assert_eq!(body["data"]["lines"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_split_zero_shares_is_undefined() {
        let request = post_json(
            "/api/split",
            json!({"participants": [{"name": "A", "share": 0.0}, {"name": "B", "share": 0.0}]}),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lines"][0]["amount"]["kind"], "undefined");
        assert_eq!(body["data"]["lines"][0]["display"], "--");
    }

    #[tokio::test]
    async fn test_split_rejects_bad_input() {
        let (status, body) = send(post_json("/api/split", json!({"currency": "XYZ"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(post_json("/api/split", json!({"exempt_index": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_split_rejects_participant_count_outside_bounds() {
        let single = json!({"participants": [{"name": "Solo", "share": 100.0}]});
        let (status, body) = send(post_json("/api/split", single)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let crowd: Vec<Value> = (0..51).map(|i| json!({"name": format!("P{}", i), "share": 1.0})).collect();
        let (status, _) = send(post_json("/api/split", json!({"participants": crowd}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let full: Vec<Value> = (0..50).map(|i| json!({"name": format!("P{}", i), "share": 1.0})).collect();
        let (status, _) = send(post_json("/api/split", json!({"participants": full}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_renders_user_text_as_text() {
        let response = app().oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("textContent"));
        assert!(!page.contains(".innerHTML ="));
        assert!(!page.contains(".innerHTML="));
    }

    #[tokio::test]
    async fn test_pages() {
        let (status, body) = send(Request::get("/api/pages/contact").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Contact");

        let (status, _) = send(Request::get("/api/pages/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_currencies() {
        let (_, body) = send(Request::get("/api/currencies").body(Body::empty()).unwrap()).await;
        let list = body["data"].as_array().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[4]["symbol"], "C$");
    }
}
