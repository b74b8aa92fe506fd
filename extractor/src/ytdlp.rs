/// yt-dlp subprocess adapter.
///
/// Discovery runs `yt-dlp --flat-playlist --dump-json` and parses one
/// JSON object per stdout line. Retrieval hands the bounded playlist
/// range to the binary and lets `--ignore-errors` skip broken items.
/// Stderr is forwarded to tracing logs.
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use scout_shared::errors::TransferError;
use scout_shared::fetch::{MediaFetcher, RetrieveOptions, Selection};
use scout_shared::models::ItemDescriptor;

/// Output filename template. Title plus id keeps files identifiable
/// while avoiding collisions between same-titled uploads.
const OUTPUT_TEMPLATE: &str = "%(title)s_%(id)s.%(ext)s";

/// Media fetcher that shells out to a yt-dlp binary.
pub struct YtDlpFetcher {
    bin: String,
}

impl YtDlpFetcher {
    /// Create a fetcher around the given binary name or path.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

/// Arguments for flat-playlist discovery (no content transfer).
fn discover_args(source_url: &str) -> Vec<String> {
    vec![
        "--flat-playlist".to_string(),
        "--dump-json".to_string(),
        "--ignore-errors".to_string(),
        "--no-warnings".to_string(),
        source_url.to_string(),
    ]
}

/// Arguments for bounded retrieval of the leading playlist range.
fn retrieve_args(source_url: &str, selection: Selection, options: &RetrieveOptions) -> Vec<String> {
    let outtmpl = options.output_dir.join(OUTPUT_TEMPLATE);
    let mut args = vec![
        "-f".to_string(),
        format!("best[ext={}]/best", options.container),
        "-o".to_string(),
        outtmpl.to_string_lossy().into_owned(),
        "--playlist-items".to_string(),
        selection.playlist_range(),
        "--ignore-errors".to_string(),
        "--no-warnings".to_string(),
        "--quiet".to_string(),
    ];
    if options.write_info_json {
        args.push("--write-info-json".to_string());
    }
    args.push(source_url.to_string());
    args
}

/// Parse flat-playlist stdout. Malformed lines are logged and skipped;
/// discovery order is preserved.
fn parse_flat_playlist(stdout: &str) -> Vec<ItemDescriptor> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<ItemDescriptor>(line) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(
                    "Skipping invalid playlist entry: {} (line: {})",
                    e,
                    &line[..line.len().min(120)]
                );
                None
            }
        })
        .collect()
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn discover(&self, source_url: &str) -> Result<Vec<ItemDescriptor>, TransferError> {
        info!("Discovering channel items: {}", source_url);

        let output = Command::new(&self.bin)
            .args(discover_args(source_url))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| TransferError::SpawnFailed(format!("{}: {}", self.bin, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let items = parse_flat_playlist(&stdout);

        // With --ignore-errors a partial enumeration still exits zero;
        // a non-zero exit with nothing parsed is a capability failure.
        if !output.status.success() && items.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransferError::ExitStatus {
                code: output.status.code().unwrap_or(-1),
                detail: stderr.trim().chars().take(500).collect(),
            });
        }

        debug!("Discovery parsed {} entries", items.len());
        Ok(items)
    }

    async fn retrieve(
        &self,
        source_url: &str,
        selection: Selection,
        options: &RetrieveOptions,
    ) -> Result<(), TransferError> {
        if selection.count() == 0 {
            debug!("Empty selection, skipping retrieval");
            return Ok(());
        }

        info!(
            "Starting retrieval of first {} item(s): {}",
            selection.count(),
            source_url
        );

        let mut child = Command::new(&self.bin)
            .args(retrieve_args(source_url, selection, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TransferError::SpawnFailed(format!("{}: {}", self.bin, e)))?;

        // Forward fetcher stderr to logs while it runs, keeping the last
        // line as the failure detail.
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut tail = String::new();
            if let Some(stderr) = stderr {
                let reader = BufReader::new(stderr);
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "yt_dlp", "{}", line);
                    tail = line;
                }
            }
            tail
        });

        let status = child
            .wait()
            .await
            .map_err(|e| TransferError::StreamEnded(e.to_string()))?;
        let tail = stderr_task.await.unwrap_or_default();

        if !status.success() {
            return Err(TransferError::ExitStatus {
                code: status.code().unwrap_or(-1),
                detail: tail,
            });
        }

        Ok(())
    }
}
