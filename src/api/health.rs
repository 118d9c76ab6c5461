use poem_openapi::{payload::Json, Object, OpenApi, Tags};
use serde::{Deserialize, Serialize};

#[derive(Tags)]
enum HealthTags {
    /// Service health
    Health,
}

/// Response model for the health probe
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service is able to answer
    pub status: String,

    /// Service identifier
    pub service: String,
}

/// Liveness endpoint, deliberately free of database access
pub struct HealthApi;

#[OpenApi]
impl HealthApi {
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
            service: "careportal-auth".to_string(),
        })
    }
}
