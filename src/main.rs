mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Delivery Dispatch - Directorio y motor de viajes/repartos");
    info!("============================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    // Rutas protegidas: toda escritura exige identidad autenticada
    let protected = Router::new()
        .nest(
            "/api/directory",
            routes::directory_routes::create_directory_router(),
        )
        .nest(
            "/api/assignment",
            routes::assignment_routes::create_assignment_router(),
        )
        .nest(
            "/api/delivery",
            routes::delivery_routes::create_delivery_router(),
        )
        .nest("/api/trip", routes::trip_routes::create_trip_router())
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // CORS permisivo solo cuando no hay orígenes configurados
    let cors = if app_state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(app_state.config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .merge(protected)
        .layer(cors)
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("📒 Endpoints - Directorio:");
    info!("   GET  /api/directory/companies - Empresas ordenadas por nombre");
    info!("   GET  /api/directory/companies/:id/clients - Clientes de una empresa");
    info!("   GET  /api/directory/drivers - Conductores activos");
    info!("📦 Endpoints - Asignación y repartos:");
    info!("   POST /api/assignment/batch - Asignar repartos en lote");
    info!("   POST /api/delivery - Crear reparto individual (con su viaje)");
    info!("   GET  /api/delivery - Listar repartos");
    info!("   PATCH /api/delivery/:id/status - Transicionar reparto");
    info!("🗺  Endpoints - Viajes:");
    info!("   GET  /api/trip - Listar viajes con total de repartos");
    info!("   GET  /api/trip/:id - Detalle del viaje con sus repartos");
    info!("   PATCH /api/trip/:id/status - Transicionar viaje");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡Delivery Dispatch funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
