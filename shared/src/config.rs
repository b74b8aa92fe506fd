/// Invocation configuration resolved from the environment.
///
/// All reads go through a single lookup closure so tests can inject
/// values without mutating process-wide state.
use std::path::PathBuf;

use crate::models::FetchRequest;

pub const DEFAULT_MAX_ITEMS: usize = 2;
pub const DEFAULT_OUTPUT_CONTAINER: &str = "mp4";
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";

/// Process-wide configuration for fetch invocations.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Channel URL to probe. May be empty here; the runner rejects blank
    /// values before any work starts.
    pub channel_url: String,
    /// Upper bound on items transferred per invocation.
    pub max_items: usize,
    /// Base directory under which invocation directories are created.
    pub download_dir: PathBuf,
    /// Container extension the capability is asked to emit, and the one
    /// accounting counts.
    pub output_container: String,
    /// Whether to ask the capability for sidecar info JSON files.
    pub write_info_json: bool,
    /// Fetcher binary name or path.
    pub ytdlp_bin: String,
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let channel_url = lookup("CHANNEL_URL").unwrap_or_default();
        let max_items = lookup("MAX_ITEMS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ITEMS);
        let download_dir = lookup("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("scout-videos"));
        let output_container =
            lookup("OUTPUT_CONTAINER").unwrap_or_else(|| DEFAULT_OUTPUT_CONTAINER.to_string());
        let write_info_json = lookup("WRITE_INFO_JSON")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        let ytdlp_bin = lookup("YTDLP_BIN").unwrap_or_else(|| DEFAULT_YTDLP_BIN.to_string());

        Self {
            channel_url,
            max_items,
            download_dir,
            output_container,
            write_info_json,
            ytdlp_bin,
        }
    }

    /// Per-invocation destination directory.
    /// Structure: <download_dir>/<invocation_id>/
    pub fn invocation_dir(&self, invocation_id: &str) -> PathBuf {
        self.download_dir.join(invocation_id)
    }

    /// Build the request for one invocation.
    pub fn request_for(&self, invocation_id: &str) -> FetchRequest {
        FetchRequest {
            channel_url: self.channel_url.clone(),
            max_items: self.max_items,
            destination_dir: self.invocation_dir(invocation_id),
            output_container: self.output_container.clone(),
            write_info_json: self.write_info_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = FetchConfig::from_lookup(|_| None);
        assert!(config.channel_url.is_empty());
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
        assert_eq!(config.output_container, "mp4");
        assert_eq!(config.ytdlp_bin, "yt-dlp");
        assert!(config.write_info_json);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = FetchConfig::from_lookup(lookup_from(&[
            ("CHANNEL_URL", "https://example.com/@chan"),
            ("MAX_ITEMS", "5"),
            ("DOWNLOAD_DIR", "/data/scout"),
            ("OUTPUT_CONTAINER", "webm"),
            ("WRITE_INFO_JSON", "false"),
            ("YTDLP_BIN", "/usr/local/bin/yt-dlp"),
        ]));
        assert_eq!(config.channel_url, "https://example.com/@chan");
        assert_eq!(config.max_items, 5);
        assert_eq!(config.download_dir, PathBuf::from("/data/scout"));
        assert_eq!(config.output_container, "webm");
        assert!(!config.write_info_json);
        assert_eq!(config.ytdlp_bin, "/usr/local/bin/yt-dlp");
    }

    #[test]
    fn test_unparsable_max_items_falls_back() {
        let config = FetchConfig::from_lookup(lookup_from(&[("MAX_ITEMS", "lots")]));
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn test_invocation_dirs_are_distinct() {
        let config = FetchConfig::from_lookup(lookup_from(&[("DOWNLOAD_DIR", "/data/scout")]));
        let a = config.invocation_dir("inv-a");
        let b = config.invocation_dir("inv-b");
        assert_ne!(a, b);
        assert_eq!(a, PathBuf::from("/data/scout/inv-a"));
    }

    #[test]
    fn test_request_for_carries_config() {
        let config = FetchConfig::from_lookup(lookup_from(&[
            ("CHANNEL_URL", "https://example.com/@chan"),
            ("DOWNLOAD_DIR", "/data/scout"),
        ]));
        let request = config.request_for("inv-1");
        assert_eq!(request.channel_url, "https://example.com/@chan");
        assert_eq!(request.destination_dir, PathBuf::from("/data/scout/inv-1"));
        assert_eq!(request.max_items, DEFAULT_MAX_ITEMS);
    }
}
