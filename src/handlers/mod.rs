pub mod images;
pub mod pinterest;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/health — always 200; reports store reachability alongside.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let store_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = ?e, "Health check: store ping failed");
            false
        }
    };

    Json(json!({
        "status": "OK",
        "message": "Server is running",
        "service": "printpress-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": if store_ok { "ok" } else { "unavailable" },
    }))
}
