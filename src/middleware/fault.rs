use std::any::Any;

use axum::response::Response;

use crate::error::fault_response;

/// `CatchPanicLayer` handler: log the panic under a correlation id and return
/// the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    fault_response(&format!("Unhandled panic: {}", detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn panic_bodies_carry_a_correlation_id() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errorMessage"], "An error occurred while processing your request");
        assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    }
}
