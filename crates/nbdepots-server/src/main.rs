mod api;
mod middleware;

use std::sync::Arc;

use nbdepots_db::{PgDepotCache, PgGeoCache, PgPaintStore};
use nbdepots_locator::{DepotAggregator, LocatorSettings, Sources};
use nbdepots_scraper::{ElectronicsClient, NominatimClient, OilListingSource};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, load_places, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = nbdepots_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting nbdepots-server");

    let pool_config = nbdepots_db::PoolConfig::from_app_config(&config);
    let pool = nbdepots_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = nbdepots_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let timeout = config.upstream_timeout_secs;
    let sources = Sources {
        geocoder: Arc::new(NominatimClient::new(
            &config.geocoder_url,
            timeout,
            &config.user_agent,
        )?),
        geo_cache: Arc::new(PgGeoCache::new(pool.clone())),
        depot_cache: Arc::new(PgDepotCache::new(pool.clone())),
        paint: Arc::new(PgPaintStore::new(pool.clone())),
        listings: Arc::new(OilListingSource::new(
            &config.oil_source_url,
            timeout,
            &config.user_agent,
        )?),
        electronics: Arc::new(ElectronicsClient::new(
            &config.electronics_url,
            &config.province_code,
            &config.province_name,
            &config.country,
            timeout,
            &config.user_agent,
        )?),
    };
    let aggregator = DepotAggregator::new(sources, LocatorSettings::from_app_config(&config));

    let places = load_places(&config.places_path);
    let app = build_app(AppState {
        aggregator: Arc::new(aggregator),
        pool,
        places: Arc::new(places),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
