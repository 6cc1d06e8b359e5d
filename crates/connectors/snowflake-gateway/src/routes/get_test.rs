use axum::Json;
use serde_derive::Serialize;

pub const TEST_MESSAGE: &str = "If you see this, CURL and Mangum are working!";

#[derive(Serialize)]
pub struct TestResponse {
    message: &'static str,
}

/// Liveness probe. Never touches the warehouse.
pub async fn get_test() -> Json<TestResponse> {
    Json(TestResponse {
        message: TEST_MESSAGE,
    })
}
