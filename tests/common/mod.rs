#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bridge_volume_tracker::config::{AppConfig, ENV_COINGECKO_BASE_URL, ENV_SUBGRAPH_BASE_URL};
use bridge_volume_tracker::display::CounterDisplay;
use bridge_volume_tracker::models::Chain;
use bridge_volume_tracker::services::volume_service::VolumeService;

pub const USDC_ADDRESS: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const USDT_ADDRESS: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";
pub const DAI_ADDRESS: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
pub const MATIC_ADDRESS: &str = "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0";
pub const WETH_ADDRESS: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock server failed");
    });

    format!("http://{}", addr)
}

pub fn volume(token: &str, amount: &str) -> Value {
    json!({ "id": format!("{}-{}", token, amount), "amount": amount, "token": token })
}

pub fn daily_volume(token: &str, amount: &str, date: i64) -> Value {
    json!({ "id": format!("{}-{}", token, date), "amount": amount, "token": token, "date": date })
}

/// Subgraph endpoint for one chain.
///
/// `volumes` answers the cumulative query; `daily` answers the daily query,
/// filtered by the request's token and date variables.
pub fn subgraph_route(
    router: Router,
    chain: Chain,
    status: StatusCode,
    volumes: Vec<Value>,
    daily: Vec<Value>,
) -> Router {
    let path = format!("/hop-{}", chain.subgraph_name());

    router.route(
        &path,
        post(move |Json(body): Json<Value>| {
            let volumes = volumes.clone();
            let daily = daily.clone();
            async move {
                let query = body["query"].as_str().unwrap_or_default();
                if !query.contains("dailyVolumes") {
                    return (status, Json(json!({ "data": { "volumes": volumes } })));
                }

                let vars = &body["variables"];
                let token = vars["token"].as_str().unwrap_or_default();
                let start = vars["startDate"].as_i64().unwrap_or(i64::MIN);
                let end = vars["endDate"].as_i64().unwrap_or(i64::MAX);

                let matching: Vec<Value> = daily
                    .into_iter()
                    .filter(|d| d["token"] == token)
                    .filter(|d| {
                        let date = d["date"].as_i64().unwrap_or_default();
                        date >= start && date <= end
                    })
                    .collect();

                (status, Json(json!({ "data": { "dailyVolumes": matching } })))
            }
        }),
    )
}

/// Subgraph answering every chain with GraphQL errors
pub fn failing_graphql_route(router: Router, chain: Chain) -> Router {
    router.route(
        &format!("/hop-{}", chain.subgraph_name()),
        post(|| async { Json(json!({ "errors": [{ "message": "indexing_error" }] })) }),
    )
}

/// CoinGecko spot + market chart endpoints
pub fn coingecko_routes(
    router: Router,
    token_prices: Value,
    market_charts: HashMap<String, Vec<(i64, f64)>>,
) -> Router {
    router
        .route(
            "/simple/token_price/ethereum",
            get(move || {
                let token_prices = token_prices.clone();
                async move { Json(token_prices) }
            }),
        )
        .route(
            "/coins/{id}/market_chart",
            get(move |Path(id): Path<String>| {
                let market_charts = market_charts.clone();
                async move {
                    let prices = market_charts.get(&id).cloned().unwrap_or_default();
                    Json(json!({ "prices": prices, "market_caps": [], "total_volumes": [] }))
                }
            }),
        )
}

/// Counts requests in flight against the slow mock
#[derive(Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
    total: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Most requests ever open at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

/// Empty subgraphs for every chain plus the spot price route, each answering
/// after `delay`
pub fn slow_routes(delay: Duration, in_flight: Arc<InFlight>) -> Router {
    let router = Chain::ALL.iter().fold(Router::new(), |router, chain| {
        let in_flight = in_flight.clone();
        router.route(
            &format!("/hop-{}", chain.subgraph_name()),
            post(move || {
                let in_flight = in_flight.clone();
                async move {
                    in_flight.enter();
                    tokio::time::sleep(delay).await;
                    in_flight.exit();
                    Json(json!({ "data": { "volumes": [] } }))
                }
            }),
        )
    });

    router.route(
        "/simple/token_price/ethereum",
        get(move || {
            let in_flight = in_flight.clone();
            async move {
                in_flight.enter();
                tokio::time::sleep(delay).await;
                in_flight.exit();
                Json(all_token_prices())
            }
        }),
    )
}

/// `/simple/token_price` body for the given `(address, usd)` pairs
pub fn token_prices(prices: &[(&str, f64)]) -> Value {
    let body: serde_json::Map<String, Value> = prices
        .iter()
        .map(|(address, usd)| (address.to_string(), json!({ "usd": usd })))
        .collect();
    Value::Object(body)
}

pub fn all_token_prices() -> Value {
    token_prices(&[
        (USDC_ADDRESS, 1.0),
        (USDT_ADDRESS, 1.0),
        (DAI_ADDRESS, 1.0),
        (MATIC_ADDRESS, 1.5),
        (WETH_ADDRESS, 2000.0),
    ])
}

/// Build a service whose subgraph and CoinGecko roots point at `base_url`
pub fn service_for(base_url: &str, extra: &[(&str, &str)]) -> VolumeService {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert(ENV_SUBGRAPH_BASE_URL.to_string(), base_url.to_string());
    vars.insert(ENV_COINGECKO_BASE_URL.to_string(), base_url.to_string());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config");
    VolumeService::from_config(&config)
}

/// Display that records every render
#[derive(Default)]
pub struct RecordingDisplay {
    pub renders: Mutex<Vec<(String, String)>>,
    pub render_times: Mutex<Vec<Instant>>,
}

impl RecordingDisplay {
    pub fn texts(&self) -> Vec<String> {
        self.renders
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl CounterDisplay for RecordingDisplay {
    async fn render(&self, element_id: &str, text: &str) -> bridge_volume_tracker::Result<()> {
        self.renders
            .lock()
            .unwrap()
            .push((element_id.to_string(), text.to_string()));
        self.render_times.lock().unwrap().push(Instant::now());
        Ok(())
    }
}

pub fn shared_display() -> Arc<RecordingDisplay> {
    Arc::new(RecordingDisplay::default())
}
