use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Json;
use axum::routing::{get, patch, post};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assignment/batch")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_transition_endpoint_rejects_unknown_status() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/delivery/00000000-0000-0000-0000-000000000000/status")
                .header("authorization", "Bearer stub-token")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"target_status":"reprogramado"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Un estado fuera del enum cerrado no llega al dominio: lo rechaza la
    // deserialización del request.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// App de test con la misma forma de la API real: /test público y rutas
// /api protegidas por un chequeo de Authorization. Los handlers protegidos
// son stubs; acá se prueba el contorno HTTP, la lógica de dominio se prueba
// junto a cada módulo.
fn create_test_app() -> Router {
    async fn health() -> Json<Value> {
        Json(json!({
            "message": "¡Delivery Dispatch funcionando correctamente!",
            "status": "ok",
        }))
    }

    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct TransitionBody {
        target_status: StubStatus,
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "snake_case")]
    #[allow(dead_code)]
    enum StubStatus {
        Pending,
        InProgress,
        Completed,
        Cancelled,
    }

    async fn guarded(
        headers: axum::http::HeaderMap,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        check_auth(&headers)?;
        Ok(Json(json!({ "success": true })))
    }

    async fn guarded_transition(
        headers: axum::http::HeaderMap,
        Json(_body): Json<TransitionBody>,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        check_auth(&headers)?;
        Ok(Json(json!({ "success": true })))
    }

    fn check_auth(
        headers: &axum::http::HeaderMap,
    ) -> Result<(), (StatusCode, Json<Value>)> {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("Bearer "))
            .unwrap_or(false);
        if authorized {
            Ok(())
        } else {
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Token de autorización requerido",
                    "code": "UNAUTHORIZED",
                })),
            ))
        }
    }

    Router::new()
        .route("/test", get(health))
        .route("/api/assignment/batch", post(guarded))
        .route("/api/delivery/:id/status", patch(guarded_transition))
}
