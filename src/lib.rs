// src/lib.rs

pub mod config;
pub mod display;
pub mod error;
pub mod jobs;
pub mod models;

pub mod services {
    pub mod coingecko;
    pub mod fixed_point;
    pub mod formatter;
    pub mod historical_volume;
    pub mod price_utils;
    pub mod subgraph;
    pub mod volume_aggregator;
    pub mod volume_service;
}

pub use config::AppConfig;
pub use error::{Result, VolumeError};

/// Install the tracing subscriber shared by every binary
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bridge_volume_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
