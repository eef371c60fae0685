//! Hop Protocol subgraph client
//!
//! One subgraph per chain at `{base_url}/hop-{chain}`. Queries are plain
//! GraphQL-over-HTTP POSTs; responses are `{ data, errors }` envelopes.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, VolumeError};
use crate::models::{Chain, DailyVolumeRecord, VolumeRecord};

/// Page size of the daily volume query. Windows with more buckets are truncated.
pub const DAILY_VOLUME_LIMIT: usize = 1000;

const VOLUME_QUERY: &str = r#"
    query Volume {
      volumes(
        orderDirection: desc
      ) {
        id
        amount
        token
      }
    }
"#;

const DAILY_VOLUME_QUERY: &str = r#"
    query DailyVolume($token: String, $startDate: Int, $endDate: Int, $first: Int) {
      dailyVolumes(
        where: {
          token: $token,
          date_gte: $startDate,
          date_lte: $endDate
        },
        first: $first,
        orderBy: date,
        orderDirection: desc
      ) {
        id
        amount
        token
        date
      }
    }
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct VolumesData {
    volumes: Vec<VolumeRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyVolumesData {
    daily_volumes: Vec<DailyVolumeRecord>,
}

#[derive(Clone)]
pub struct SubgraphClient {
    client: Client,
    base_url: String,
}

impl SubgraphClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, chain: Chain) -> String {
        format!("{}/hop-{}", self.base_url, chain.subgraph_name())
    }

    async fn query<T: DeserializeOwned>(&self, chain: Chain, query: &str, variables: Value) -> Result<T> {
        let url = self.url(chain);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VolumeError::http_status("Subgraph", status, &error_text));
        }

        let body: GraphQlResponse<T> = response.json().await?;

        if !body.errors.is_empty() {
            let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(VolumeError::MalformedResponse(format!(
                "{} subgraph errors: {}",
                chain,
                messages.join("; ")
            )));
        }

        body.data.ok_or_else(|| {
            VolumeError::MalformedResponse(format!("{} subgraph response has no data", chain))
        })
    }

    /// All cumulative volume records for `chain`
    pub async fn fetch_volume(&self, chain: Chain) -> Result<Vec<VolumeRecord>> {
        let data: VolumesData = self.query(chain, VOLUME_QUERY, json!({})).await?;

        tracing::debug!(chain = %chain, records = data.volumes.len(), "Fetched volumes");

        Ok(data.volumes)
    }

    /// Daily buckets for `token` with `start_date <= date <= end_date`, newest
    /// first, capped at [`DAILY_VOLUME_LIMIT`].
    pub async fn fetch_daily_volume(
        &self,
        chain: Chain,
        token: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<Vec<DailyVolumeRecord>> {
        let variables = json!({
            "token": token,
            "startDate": start_date,
            "endDate": end_date,
            "first": DAILY_VOLUME_LIMIT,
        });

        let data: DailyVolumesData = self.query(chain, DAILY_VOLUME_QUERY, variables).await?;

        if data.daily_volumes.len() >= DAILY_VOLUME_LIMIT {
            tracing::warn!(
                chain = %chain,
                token = token,
                "Daily volume query hit the {} record cap, window is truncated",
                DAILY_VOLUME_LIMIT
            );
        }

        Ok(data.daily_volumes)
    }
}
