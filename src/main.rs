use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taxsync::config::Config;
use taxsync::middleware::RequestId;
use taxsync::modules::items::repositories::{ItemRepository, MySqlItemRepository};
use taxsync::modules::items::services::ItemService;
use taxsync::modules::reports::repositories::{MySqlVatReportRepository, VatReportRepository};
use taxsync::modules::reports::services::VatReportService;
use taxsync::modules::settings::repositories::{
    MySqlVatSettingsRepository, VatSettingsRepository,
};
use taxsync::modules::tax_templates::repositories::{
    MySqlTaxTemplateRepository, TaxTemplateReader,
};
use taxsync::modules::{items, reports, tax_templates};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taxsync=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting taxsync");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and bring the schema up to date
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Wire repositories and services
    let items: Arc<dyn ItemRepository> = Arc::new(MySqlItemRepository::new(db_pool.clone()));
    let templates: Arc<dyn TaxTemplateReader> =
        Arc::new(MySqlTaxTemplateRepository::new(db_pool.clone()));
    let settings: Arc<dyn VatSettingsRepository> =
        Arc::new(MySqlVatSettingsRepository::new(db_pool.clone()));
    let invoices: Arc<dyn VatReportRepository> =
        Arc::new(MySqlVatReportRepository::new(db_pool));

    let item_service = Arc::new(ItemService::new(items, templates.clone()));
    let report_service = Arc::new(VatReportService::new(settings, invoices));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .app_data(web::Data::new(item_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(templates.clone()))
            .configure(items::controllers::configure)
            .configure(tax_templates::controllers::configure)
            .configure(reports::controllers::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "taxsync"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "taxsync",
        "version": "0.1.0",
        "status": "running"
    }))
}
