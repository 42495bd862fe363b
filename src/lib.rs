//! Anonymous feedback backend.
//!
//! Visitors submit free-text feedback with no account; an admin holding the
//! shared token lists, searches, sorts, paginates, and deletes submissions.
//!
//! # Endpoints
//!
//! - `POST /feedback` - open submission, validated and trimmed
//! - `GET /feedback` - admin listing with `limit`/`offset`/`sort`/`search`
//! - `DELETE /feedback` - admin removal by id
//!
//! Submissions live in a single SQLite table. The [`sentiment`] module is a
//! display-side helper and takes no part in the HTTP contract.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::post,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod sentiment;
pub mod state;
pub mod utils;

use routes::{delete_feedback_handler, list_feedback_handler, submit_feedback_handler};
use state::AppState;

/// Router over the shared state; the binary and the integration tests both
/// build the app through here.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/feedback",
            post(submit_feedback_handler)
                .get(list_feedback_handler)
                .delete(delete_feedback_handler),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
