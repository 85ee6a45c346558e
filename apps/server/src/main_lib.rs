use std::sync::Arc;

use coinboard_core::{
    cache::{FileStore, FreshnessCache},
    checkout::{CheckoutService, CheckoutServiceTrait},
    refresh::{RefreshService, RefreshServiceTrait, SystemClock},
    table::TableProjector,
};
use coinboard_market_data::{CoinGeckoProvider, MarketsQuery, SnapshotFetcher};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub refresh_service: Arc<dyn RefreshServiceTrait>,
    pub checkout_service: Arc<dyn CheckoutServiceTrait>,
    pub projector: TableProjector,
}

pub fn init_tracing() {
    let log_format = std::env::var("CB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let settings = &config.settings;
    settings.validate()?;

    let store = Arc::new(FileStore::open(&config.cache_path)?);
    tracing::info!("Snapshot cache file: {}", config.cache_path.display());
    let cache = FreshnessCache::new(store, settings.freshness_window);

    let provider = CoinGeckoProvider::with_base_url(&config.api_base_url, config.request_timeout)
        .with_api_key(config.api_key.clone());
    let fetcher = SnapshotFetcher::new(Arc::new(provider))
        .with_policy(settings.retry.clone())
        .with_query(MarketsQuery::with_per_page(settings.per_page));

    let refresh_service: Arc<dyn RefreshServiceTrait> = Arc::new(RefreshService::new(
        Arc::new(fetcher),
        cache,
        Arc::new(SystemClock),
    ));
    let checkout_service: Arc<dyn CheckoutServiceTrait> = Arc::new(CheckoutService::new());
    let projector = TableProjector::new(settings.page_size, settings.thresholds);

    Ok(Arc::new(AppState {
        refresh_service,
        checkout_service,
        projector,
    }))
}
