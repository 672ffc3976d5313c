//! Smoke-test the tracking server by logging a throwaway run with one
//! parameter and one metric, the same check the original setup notebook
//! performed against a fresh registry.

use clap::Parser;
use textclass_registry::TrackingClient;

#[derive(Parser)]
#[command(name = "track-demo", about = "Log a demo run against the tracking server")]
struct Args {
    /// Base URL of the tracking server.
    #[arg(long, env = "TEXTCLASS_REGISTRY_URL", default_value = "http://localhost:5000")]
    registry_url: String,

    /// Experiment to create the run under.
    #[arg(long, default_value = "0")]
    experiment_id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let tracking = TrackingClient::new(args.registry_url);
    let run_id = tracking.create_run(&args.experiment_id).await?;
    tracking.log_param(&run_id, "parameter name", "value").await?;
    tracking.log_metric(&run_id, "metric name", 1.0).await?;
    tracking.finish_run(&run_id).await?;

    tracing::info!(run_id = %run_id, "demo run logged");
    Ok(())
}
