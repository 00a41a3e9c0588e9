use api::routes::routes;
use api::ws::active_groups::emit;
use api::{auth::middleware::log_request, ws::ws_routes};
use axum::{Router, middleware::from_fn};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use services::{scheduled_checkout::ScheduledCheckoutService, session::SessionService};
use std::{net::SocketAddr, time::Duration};
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::{config, state::AppState, ws::WebSocketManager};

#[tokio::main]
async fn main() {
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    if config::jwt_secret().is_empty() {
        panic!("JWT_SECRET must be set");
    }

    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(env = %config::env(), "database ready");

    let app_state = AppState::new(db, WebSocketManager::new());

    spawn_scheduled_checkout_processor(app_state.clone());
    spawn_session_timeout_sweeper(app_state.clone());

    let cors = CorsLayer::very_permissive();

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .nest("/ws", ws_routes(app_state.clone()))
        .layer(from_fn(log_request))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}

/// Periodically executes due scheduled checkouts. An interval of `0`
/// disables the task.
fn spawn_scheduled_checkout_processor(app_state: AppState) {
    let every = config::scheduled_checkout_interval_secs();
    if every == 0 {
        tracing::info!("scheduled checkout processor disabled");
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(every));
        loop {
            ticker.tick().await;
            let now = Utc::now();
            match ScheduledCheckoutService::process_due(app_state.db(), now).await {
                Ok(result) => {
                    for outcome in &result.executed {
                        emit::checkout_outcome(app_state.ws(), outcome, now, true).await;
                    }
                }
                Err(e) => tracing::error!(error = %e, "scheduled checkout run failed"),
            }
        }
    });
}

/// Periodically ends sessions that have been idle past their timeout. An
/// interval of `0` disables the task.
fn spawn_session_timeout_sweeper(app_state: AppState) {
    let every = config::session_timeout_interval_secs();
    if every == 0 {
        tracing::info!("session timeout sweep disabled");
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(every));
        loop {
            ticker.tick().await;
            match SessionService::process_session_timeouts(app_state.db(), Utc::now()).await {
                Ok(ended) => {
                    for session in &ended {
                        emit::session_ended(app_state.ws(), session, true).await;
                    }
                }
                Err(e) => tracing::error!(error = %e, "session timeout sweep failed"),
            }
        }
    });
}
