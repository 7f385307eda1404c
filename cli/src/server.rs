#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post, put},
        Router,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tally::serializers::to_json;
    use tally::{Line, Sheet};
    use tokio::sync::RwLock;
    use tower_http::cors::CorsLayer;
    use tracing::{debug, info, warn};

    type SharedSheet = Arc<RwLock<Sheet>>;

    type ApiResult = Result<Json<Value>, (StatusCode, Json<ErrorResponse>)>;

    #[derive(Debug, Deserialize)]
    struct EvaluateRequest {
        lines: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct LineRequest {
        input: String,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub async fn start_server(sheet: Sheet, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(Arc::new(RwLock::new(sheet)));

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Tally server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn router(sheet: SharedSheet) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/sheet", get(get_sheet).post(evaluate_sheet))
            .route(
                "/sheet/lines/:index",
                put(update_line).post(insert_line).delete(remove_line),
            )
            .route("/sheet/append", post(append_line))
            .route("/sheet/clear", post(clear_sheet))
            .route("/sheet/variables", get(get_variables))
            .layer(CorsLayer::permissive())
            .with_state(sheet)
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "tally",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    fn snapshot(sheet: &Sheet, lines: &[Line]) -> Json<Value> {
        let failed = lines.iter().filter(|line| line.result.is_error()).count();
        debug!(lines = lines.len(), failed, "evaluated sheet");
        Json(to_json(lines, sheet.scope()))
    }

    fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
        warn!("{}", message);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
    }

    fn check_growth(sheet: &Sheet, line_count: usize) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
        if sheet.can_hold(line_count) {
            return Ok(());
        }
        Err(bad_request(format!(
            "Sheet is limited to {} line(s)",
            sheet.limits().max_lines
        )))
    }

    async fn get_sheet(State(sheet): State<SharedSheet>) -> ApiResult {
        let sheet = sheet.read().await;
        Ok(snapshot(&sheet, sheet.lines()))
    }

    async fn evaluate_sheet(
        State(sheet): State<SharedSheet>,
        Json(payload): Json<EvaluateRequest>,
    ) -> ApiResult {
        let mut sheet = sheet.write().await;
        let lines = sheet.evaluate(&payload.lines);
        info!("Evaluated sheet with {} line(s)", lines.len());
        Ok(snapshot(&sheet, &lines))
    }

    async fn update_line(
        State(sheet): State<SharedSheet>,
        Path(index): Path<usize>,
        Json(payload): Json<LineRequest>,
    ) -> ApiResult {
        let mut sheet = sheet.write().await;
        check_growth(&sheet, index.saturating_add(1))?;
        let lines = sheet.update_line(index, &payload.input);
        Ok(snapshot(&sheet, &lines))
    }

    async fn insert_line(
        State(sheet): State<SharedSheet>,
        Path(index): Path<usize>,
        Json(payload): Json<LineRequest>,
    ) -> ApiResult {
        let mut sheet = sheet.write().await;
        check_growth(&sheet, sheet.len() + 1)?;
        let lines = sheet.insert_line(index, &payload.input);
        Ok(snapshot(&sheet, &lines))
    }

    async fn remove_line(State(sheet): State<SharedSheet>, Path(index): Path<usize>) -> ApiResult {
        let mut sheet = sheet.write().await;
        if index >= sheet.len() {
            return Err(bad_request(format!(
                "Line index {} is out of range (sheet has {} line(s))",
                index,
                sheet.len()
            )));
        }
        let lines = sheet.remove_line(index);
        Ok(snapshot(&sheet, &lines))
    }

    async fn append_line(
        State(sheet): State<SharedSheet>,
        Json(payload): Json<LineRequest>,
    ) -> ApiResult {
        let mut sheet = sheet.write().await;
        check_growth(&sheet, sheet.len() + 1)?;
        let lines = sheet.append_line(&payload.input);
        Ok(snapshot(&sheet, &lines))
    }

    async fn clear_sheet(State(sheet): State<SharedSheet>) -> ApiResult {
        let mut sheet = sheet.write().await;
        let lines = sheet.clear();
        info!("Cleared sheet");
        Ok(snapshot(&sheet, &lines))
    }

    async fn get_variables(State(sheet): State<SharedSheet>) -> ApiResult {
        let sheet = sheet.read().await;
        serde_json::to_value(sheet.scope().variables())
            .map(Json)
            .map_err(|e| bad_request(format!("Failed to serialize variables: {}", e)))
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(_sheet: tally::Sheet, _host: &str, _port: u16) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
