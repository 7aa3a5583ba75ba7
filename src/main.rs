use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taller_reports::config::{Config, LogFormat};
use taller_reports::dashboard::{DashboardService, MySqlDashboardRepository};
use taller_reports::middleware::RequestId;
use taller_reports::modules;
use taller_reports::reports::{MySqlReportRepository, ReportService};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("taller_reports={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting Taller Reports API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Report time zone: {}", config.reports.timezone);
    tracing::info!(
        summary_window = %config.reports.summary_window,
        series_window = %config.reports.series_window,
        series_order = %config.reports.series_order,
        "Report window rules"
    );

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let report_service = Arc::new(ReportService::new(
        Arc::new(MySqlReportRepository::new(db_pool.clone())),
        config.reports.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(MySqlDashboardRepository::new(db_pool.clone())),
        config.reports.timezone,
    ));

    let bind_address = config.server.bind_address();
    let cors_origin = config.server.cors_allowed_origin.clone();

    let server = HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET"])
                .allow_any_header()
                .max_age(3600),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
