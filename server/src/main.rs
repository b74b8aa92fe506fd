/// Scout API Server
///
/// HTTP host for the bounded channel fetch probe. POST /api/fetch runs a
/// single discover-retrieve-account invocation against the configured
/// channel and answers with a JSON report. `--once` runs one invocation
/// from the command line and prints the body instead of serving.
mod accounting;
mod routes;
mod runner;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use tracing::info;

use scout_extractor::YtDlpFetcher;
use scout_shared::config::FetchConfig;
use scout_shared::fetch::MediaFetcher;

/// Shared application state for all handlers.
pub struct AppState {
    pub config: FetchConfig,
    pub fetcher: Arc<dyn MediaFetcher>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_server=info,tower_http=info".into()),
        )
        .init();

    // Config
    let config = FetchConfig::from_env();
    let api_host = std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let api_port: u16 = std::env::var("API_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    std::fs::create_dir_all(&config.download_dir)?;

    let fetcher: Arc<dyn MediaFetcher> = Arc::new(YtDlpFetcher::new(config.ytdlp_bin.clone()));
    let state = Arc::new(AppState { config, fetcher });

    // One-shot mode: run a single invocation and print its wire body.
    if std::env::args().any(|arg| arg == "--once") {
        return run_once(state).await;
    }

    // Router
    let app = routes::router(state);

    // Bind
    let addr = format!("{}:{}", api_host, api_port);
    info!("Scout API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run one invocation and print the JSON body to stdout. Exits nonzero
/// on failure, after printing the structured error body.
async fn run_once(state: Arc<AppState>) -> anyhow::Result<()> {
    let invocation_id = uuid::Uuid::new_v4().to_string();
    let request = state.config.request_for(&invocation_id);
    let job = runner::FetchJobRunner::new(state.fetcher.clone());

    match job.run(&request).await {
        Ok(report) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&routes::success_body(&report))?
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&routes::error_body(&e))?
            );
            anyhow::bail!("fetch probe failed: {}", e)
        }
    }
}
