//! Tracking-server run logging: create a run, attach params and metrics,
//! mark it finished.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::info;

use crate::client::{RegistryError, check};

/// Client for the tracking server's run endpoints.
pub struct TrackingClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CreateRunResponse {
    run: Run,
}

#[derive(Deserialize)]
struct Run {
    info: RunInfo,
}

#[derive(Deserialize)]
struct RunInfo {
    run_id: String,
}

impl TrackingClient {
    /// Create a client for the given tracking server base URL (no trailing
    /// slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Start a new run under an experiment and return its id.
    pub async fn create_run(&self, experiment_id: &str) -> Result<String, RegistryError> {
        let url = format!("{}/api/2.0/mlflow/runs/create", self.base_url);
        let body = serde_json::json!({
            "experiment_id": experiment_id,
            "start_time": now_millis(),
        });

        let resp = check(self.client.post(&url).json(&body).send().await?).await?;
        let parsed: CreateRunResponse = resp.json().await?;

        info!(run_id = %parsed.run.info.run_id, experiment_id, "run created");
        Ok(parsed.run.info.run_id)
    }

    /// Log a string parameter on a run.
    pub async fn log_param(
        &self,
        run_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), RegistryError> {
        let url = format!("{}/api/2.0/mlflow/runs/log-parameter", self.base_url);
        let body = serde_json::json!({ "run_id": run_id, "key": key, "value": value });
        check(self.client.post(&url).json(&body).send().await?).await?;
        Ok(())
    }

    /// Log a numeric metric on a run.
    pub async fn log_metric(
        &self,
        run_id: &str,
        key: &str,
        value: f64,
    ) -> Result<(), RegistryError> {
        let url = format!("{}/api/2.0/mlflow/runs/log-metric", self.base_url);
        let body = serde_json::json!({
            "run_id": run_id,
            "key": key,
            "value": value,
            "timestamp": now_millis(),
            "step": 0,
        });
        check(self.client.post(&url).json(&body).send().await?).await?;
        Ok(())
    }

    /// Mark a run as FINISHED.
    pub async fn finish_run(&self, run_id: &str) -> Result<(), RegistryError> {
        let url = format!("{}/api/2.0/mlflow/runs/update", self.base_url);
        let body = serde_json::json!({
            "run_id": run_id,
            "status": "FINISHED",
            "end_time": now_millis(),
        });
        check(self.client.post(&url).json(&body).send().await?).await?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
