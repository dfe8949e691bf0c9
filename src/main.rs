use std::{env, sync::Arc};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use portfolio_api::{
    background_task::start_cache_sweep_task,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    repositories::sqlx_repo::SqlxProjectRepo,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("MODE")
        .map(|mode| mode.eq_ignore_ascii_case("prod") || mode.eq_ignore_ascii_case("production"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.database_url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.run_migrations {
        if let Err(e) = run_migrations(&pool).await {
            tracing::error!("Failed to run migrations: {}", e);
            std::process::exit(1);
        }
    }

    let app_state = web::Data::new(
        AppState::new(&config, Arc::new(SqlxProjectRepo::new(pool.clone())))
    );

    let sweep_task = app_state.cache().is_enabled().then(|| {
        start_cache_sweep_task(app_state.cache().clone(), config.cache_sweep_interval())
    });

    let server_addr = config.server_addr();
    let static_dir = app_state.static_dir.clone();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, &static_dir))
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    let result = tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    };

    if let Some(task) = sweep_task {
        task.abort();
    }
    pool.close().await;
    tracing::info!("Shutdown complete");

    result
}
