use axum::extract::State;
use axum::Json;
use chrono::Utc;
use std::time::Duration;
use tracing::warn;

use crate::state::AppState;
use crate::types::{HealthResponse, HealthServices, ServiceHealth};

/// Upper bound on the cache ping so a dead Redis cannot stall health checks
const CACHE_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Liveness plus informational backend status.
///
/// Always 200: a dead cache is reported per service, not through `status`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis = match tokio::time::timeout(CACHE_PING_TIMEOUT, state.cache.ping()).await {
        Ok(Ok(())) => ServiceHealth::Healthy,
        Ok(Err(e)) => {
            warn!(error = %e, "Cache health check failed");
            ServiceHealth::Unhealthy
        }
        Err(_) => {
            warn!("Cache health check timed out");
            ServiceHealth::Unhealthy
        }
    };

    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        services: HealthServices {
            redis,
            dynamodb: state.table_name.clone(),
            s3: state.data_bucket.clone(),
        },
    })
}
