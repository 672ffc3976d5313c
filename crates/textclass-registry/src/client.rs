//! Model registry client: resolve a registered model version and download
//! its artifact from the tracking server.

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("registry returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A registered model version as reported by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelVersion {
    pub name: String,
    pub version: String,
    pub run_id: String,
    pub source: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct GetModelVersionResponse {
    model_version: ModelVersion,
}

/// Client for the registry's model-version and artifact endpoints.
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client for the given registry base URL.
    ///
    /// `base_url` should be like `https://tracking.example.com` (no trailing
    /// slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a model name + version to its registry record.
    pub async fn resolve(&self, name: &str, version: u32) -> Result<ModelVersion, RegistryError> {
        let url = format!("{}/api/2.0/mlflow/model-versions/get", self.base_url);
        let version_param = version.to_string();

        info!(model = name, version, "resolving model version");
        let resp = self
            .client
            .get(&url)
            .query(&[("name", name), ("version", version_param.as_str())])
            .send()
            .await?;
        let resp = check(resp).await?;

        let parsed: GetModelVersionResponse = resp.json().await?;
        Ok(parsed.model_version)
    }

    /// Download an artifact file from a run.
    pub async fn download_artifact(
        &self,
        run_id: &str,
        path: &str,
    ) -> Result<Vec<u8>, RegistryError> {
        let url = format!("{}/get-artifact", self.base_url);

        info!(run_id = %run_id, path = %path, "downloading artifact");
        let resp = self
            .client
            .get(&url)
            .query(&[("run_id", run_id), ("path", path)])
            .send()
            .await?;
        let resp = check(resp).await?;

        let bytes = resp.bytes().await?;
        info!(bytes = bytes.len(), "artifact downloaded");
        Ok(bytes.to_vec())
    }

    /// Resolve a model version, then download the given artifact from its
    /// run.
    pub async fn fetch_model(
        &self,
        name: &str,
        version: u32,
        artifact_path: &str,
    ) -> Result<Vec<u8>, RegistryError> {
        let mv = self.resolve(name, version).await?;
        self.download_artifact(&mv.run_id, artifact_path).await
    }
}

/// Surface non-2xx responses as typed errors carrying status and body.
pub(crate) async fn check(resp: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(RegistryError::Server {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn trims_trailing_slash() {
        let client = RegistryClient::new("http://localhost:5000/".into());
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn resolve_returns_model_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/2.0/mlflow/model-versions/get")
                .query_param("name", "my_model")
                .query_param("version", "2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "model_version": {
                        "name": "my_model",
                        "version": "2",
                        "run_id": "abc123",
                        "source": "mlflow-artifacts:/0/abc123/artifacts/model",
                        "status": "READY"
                    }
                }));
        });

        let client = RegistryClient::new(server.base_url());
        let mv = client.resolve("my_model", 2).await.unwrap();

        mock.assert();
        assert_eq!(mv.name, "my_model");
        assert_eq!(mv.version, "2");
        assert_eq!(mv.run_id, "abc123");
        assert_eq!(mv.status.as_deref(), Some("READY"));
    }

    #[tokio::test]
    async fn resolve_surfaces_server_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/2.0/mlflow/model-versions/get");
            then.status(404).body("RESOURCE_DOES_NOT_EXIST");
        });

        let client = RegistryClient::new(server.base_url());
        let err = client.resolve("nope", 1).await.unwrap_err();

        match err {
            RegistryError::Server { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "RESOURCE_DOES_NOT_EXIST");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn download_artifact_returns_bytes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/get-artifact")
                .query_param("run_id", "abc123")
                .query_param("path", "model/model.json");
            then.status(200).body(r#"{"classes":[]}"#);
        });

        let client = RegistryClient::new(server.base_url());
        let bytes = client
            .download_artifact("abc123", "model/model.json")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(bytes, br#"{"classes":[]}"#);
    }

    #[tokio::test]
    async fn fetch_model_resolves_then_downloads() {
        let server = MockServer::start();
        let resolve_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/2.0/mlflow/model-versions/get")
                .query_param("name", "my_model")
                .query_param("version", "2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "model_version": {
                        "name": "my_model",
                        "version": "2",
                        "run_id": "run42",
                        "source": "runs:/run42/model"
                    }
                }));
        });
        let artifact_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/get-artifact")
                .query_param("run_id", "run42")
                .query_param("path", "model/model.json");
            then.status(200).body("model-bytes");
        });

        let client = RegistryClient::new(server.base_url());
        let bytes = client
            .fetch_model("my_model", 2, "model/model.json")
            .await
            .unwrap();

        resolve_mock.assert();
        artifact_mock.assert();
        assert_eq!(bytes, b"model-bytes");
    }
}
