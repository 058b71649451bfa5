//! Backend entry-point: loads settings, prepares persistence, and serves the
//! REST API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use alumni_connect::inbound::http::health::HealthState;
use alumni_connect::inbound::http::session_config::{BuildMode, session_settings_from_env};
use alumni_connect::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            let applied = run_pending_migrations(pool_config.database_url())
                .await
                .wrap_err("database migrations failed")?;
            info!(applied, "database schema up to date");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("ALUMNI_DATABASE_URL not set; serving fixture data and discarding writes");
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    info!(addr = %config.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("alumni_connect")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}
