//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing destination: {0}")]
    MissingDestination(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    #[error("Already terminal: {0}")]
    AlreadyTerminal(String),

    #[error("Store write failed: {0}")]
    StoreWrite(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(msg) => {
                eprintln!("Validation failed: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Failed".to_string(),
                        message: msg,
                        details: None,
                        code: Some("VALIDATION_FAILED".to_string()),
                    },
                )
            }

            AppError::MissingDestination(msg) => {
                eprintln!("Missing destination: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Missing Destination".to_string(),
                        message: msg,
                        details: None,
                        code: Some("MISSING_DESTINATION".to_string()),
                    },
                )
            }

            AppError::Lookup(msg) => {
                eprintln!("Lookup failed: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Lookup Failed".to_string(),
                        message: "Could not read directory data, retry later".to_string(),
                        details: Some(json!({ "lookup_error": msg })),
                        code: Some("LOOKUP_FAILED".to_string()),
                    },
                )
            }

            AppError::IllegalTransition(msg) => {
                eprintln!("Illegal transition: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Illegal Transition".to_string(),
                        message: msg,
                        details: None,
                        code: Some("ILLEGAL_TRANSITION".to_string()),
                    },
                )
            }

            AppError::AlreadyTerminal(msg) => {
                eprintln!("Already terminal: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Already Terminal".to_string(),
                        message: msg,
                        details: None,
                        code: Some("ALREADY_TERMINAL".to_string()),
                    },
                )
            }

            AppError::StoreWrite(msg) => {
                eprintln!("Store write failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Store Write Failed".to_string(),
                        message: "The store rejected the write".to_string(),
                        details: Some(json!({ "store_error": msg })),
                        code: Some("STORE_WRITE_FAILED".to_string()),
                    },
                )
            }

            AppError::Database(msg) => {
                eprintln!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": msg })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                eprintln!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                eprintln!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                eprintln!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("faltan campos".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transition_errors_map_to_conflict() {
        let illegal = AppError::IllegalTransition("planned -> completed".to_string()).into_response();
        assert_eq!(illegal.status(), StatusCode::CONFLICT);

        let terminal = AppError::AlreadyTerminal("cancelled".to_string()).into_response();
        assert_eq!(terminal.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_lookup_is_retryable_service_unavailable() {
        let response = AppError::Lookup("pool timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_found_helper() {
        let err = not_found_error("Trip", "abc");
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains("Trip") && msg.contains("abc")));
    }
}
