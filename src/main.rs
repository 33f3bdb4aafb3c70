use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod docs;
mod model;
mod models;
mod pipeline;
mod routes;
mod upstream;

use api::state::DashboardState;
use config::Config;
use upstream::cache::CachedBackend;
use upstream::client::{AttendanceBackend, UpstreamClient};
use upstream::context::{QueryContext, StaticTokenProvider};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance dashboard is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "dashboard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        tenant = %config.tenant_code,
        reference_date = %config.reference_date,
        upstream = %config.upstream_base_url,
        "Server starting..."
    );

    let context = QueryContext::new(
        config.tenant_code.clone(),
        Arc::new(StaticTokenProvider::new(config.upstream_token.clone())),
        config.reference_date,
    );

    // The client signs requests with the same provider the queries are built for.
    let client = UpstreamClient::new(
        config.upstream_base_url.clone(),
        config.upstream_timeout,
        context.auth_provider.clone(),
    )
    .context("Failed to build upstream HTTP client")?;
    let backend: Arc<dyn AttendanceBackend> = Arc::new(CachedBackend::new(
        Arc::new(client),
        config.cache_max_entries,
        config.cache_ttl,
    ));

    // One state for all workers so request tracking spans every worker.
    let state = Data::new(DashboardState::new(backend, context));
    let config_data = Data::new(config.clone());
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .app_data(config_data.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await
    .context("Server error")
}
