/// The fetch job runner: one bounded, single-shot fetch-and-report.
///
/// Phases: Idle -> Validating -> Discovering -> Retrieving -> Accounting
/// -> Succeeded | Failed. No retries, no resumption; nothing survives
/// the invocation.
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use scout_shared::errors::{ScoutError, ScoutResult};
use scout_shared::fetch::{MediaFetcher, RetrieveOptions, Selection};
use scout_shared::models::{FetchPhase, FetchReport, FetchRequest};

use crate::accounting;

/// Runs one fetch invocation against a media-fetch capability.
pub struct FetchJobRunner {
    fetcher: Arc<dyn MediaFetcher>,
}

impl FetchJobRunner {
    pub fn new(fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self { fetcher }
    }

    /// Execute the full phase sequence for `request`.
    pub async fn run(&self, request: &FetchRequest) -> ScoutResult<FetchReport> {
        match self.run_phases(request).await {
            Ok(report) => {
                info!(
                    "Phase: {} ({} file(s), {} bytes)",
                    FetchPhase::Succeeded,
                    report.downloaded_count,
                    report.total_size_bytes
                );
                Ok(report)
            }
            Err(e) => {
                error!("Phase: {} ({})", FetchPhase::Failed, e);
                Err(e)
            }
        }
    }

    async fn run_phases(&self, request: &FetchRequest) -> ScoutResult<FetchReport> {
        self.enter(FetchPhase::Validating);
        request.validate()?;
        info!("Starting fetch probe: {}", request.channel_url);

        self.enter(FetchPhase::Discovering);
        let items = self.fetcher.discover(&request.channel_url).await?;
        if items.is_empty() {
            return Err(ScoutError::NoContent("no items found on channel".into()));
        }
        let total_discovered = items.len();
        info!("Found {} item(s) on channel", total_discovered);

        self.enter(FetchPhase::Retrieving);
        std::fs::create_dir_all(&request.destination_dir)?;
        if request.max_items > 0 {
            let options = RetrieveOptions {
                output_dir: request.destination_dir.clone(),
                container: request.output_container.clone(),
                write_info_json: request.write_info_json,
            };
            self.fetcher
                .retrieve(
                    &request.channel_url,
                    Selection::First(request.max_items),
                    &options,
                )
                .await?;
        }

        self.enter(FetchPhase::Accounting);
        let outputs =
            accounting::collect_output_files(&request.destination_dir, &request.output_container)?;
        let mut total_size_bytes: u64 = 0;
        for file in &outputs {
            info!(
                "{}: {:.1} MB",
                file.name,
                file.size_bytes as f64 / (1024.0 * 1024.0)
            );
            total_size_bytes += file.size_bytes;
        }

        Ok(FetchReport {
            total_discovered,
            downloaded_count: outputs.len(),
            total_size_bytes,
            files: outputs.into_iter().map(|f| f.name).collect(),
            completed_at: Utc::now(),
        })
    }

    fn enter(&self, phase: FetchPhase) {
        info!("Phase: {}", phase);
    }
}
