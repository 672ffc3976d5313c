use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use textclass_core::Normalizer;
use textclass_model::{LinearModel, Pipeline, Vectorizer};
use textclass_registry::RegistryClient;
use textclass_web::{AppState, router};

#[derive(Parser)]
#[command(name = "textclass", about = "Text classification web front-end")]
struct Args {
    /// Base URL of the model registry / tracking server.
    #[arg(long, env = "TEXTCLASS_REGISTRY_URL", default_value = "http://localhost:5000")]
    registry_url: String,

    /// Registered model name.
    #[arg(long, default_value = "my_model")]
    model_name: String,

    /// Registered model version.
    #[arg(long, default_value_t = 2)]
    model_version: u32,

    /// Artifact path of the model JSON within the run.
    #[arg(long, default_value = "model/model.json")]
    artifact_path: String,

    /// Load the model from a local file instead of the registry.
    #[arg(long)]
    model_file: Option<PathBuf>,

    /// Path to the serialized bag-of-words vectorizer.
    #[arg(long, default_value = "models/vectorizer.json")]
    vectorizer: PathBuf,

    /// Address to serve on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let model = match &args.model_file {
        Some(path) => LinearModel::from_json_file(path)
            .with_context(|| format!("loading model from {}", path.display()))?,
        None => {
            let registry = RegistryClient::new(args.registry_url.clone());
            let bytes = registry
                .fetch_model(&args.model_name, args.model_version, &args.artifact_path)
                .await
                .context("fetching model from registry")?;
            LinearModel::from_json_slice(&bytes).context("parsing model artifact")?
        }
    };

    let vectorizer = Vectorizer::from_json_file(&args.vectorizer)
        .with_context(|| format!("loading vectorizer from {}", args.vectorizer.display()))?;
    let normalizer = Normalizer::new().context("compiling normalizer")?;
    let pipeline = Pipeline::new(normalizer, vectorizer, model)?;

    let state = Arc::new(AppState::new(pipeline)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("binding {}", args.addr))?;
    tracing::info!(addr = %args.addr, "textclass v{} listening", env!("CARGO_PKG_VERSION"));
    axum::serve(listener, app).await?;
    Ok(())
}
