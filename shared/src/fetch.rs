/// Media-fetch capability contract.
///
/// Discovery enumerates items without transferring content; retrieval
/// writes the selected items into an output directory. Everything behind
/// this trait (protocol handling, format negotiation, per-item retry) is
/// a black box to the runner, which lets tests substitute a fake that
/// returns canned descriptors and writes fixture files.
use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::TransferError;
use crate::models::ItemDescriptor;

/// Which discovered items to transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The first n items in discovery order. Order is whatever the
    /// capability defines; this component does not control it.
    First(usize),
}

impl Selection {
    pub fn count(&self) -> usize {
        match self {
            Selection::First(n) => *n,
        }
    }

    /// 1-based inclusive playlist range, e.g. "1-2". Callers must not
    /// ask for a range of zero items.
    pub fn playlist_range(&self) -> String {
        match self {
            Selection::First(n) => format!("1-{}", n),
        }
    }
}

/// Output options for retrieval.
#[derive(Debug, Clone)]
pub struct RetrieveOptions {
    pub output_dir: PathBuf,
    pub container: String,
    pub write_info_json: bool,
}

/// The one external collaborator of the fetch job runner.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Enumerate items reachable from `source_url` without transferring
    /// content.
    async fn discover(&self, source_url: &str) -> Result<Vec<ItemDescriptor>, TransferError>;

    /// Transfer the selected items, writing files matching `options`
    /// into `options.output_dir`. Individual item failures must not
    /// abort the batch; only capability-level failures are errors.
    async fn retrieve(
        &self,
        source_url: &str,
        selection: Selection,
        options: &RetrieveOptions,
    ) -> Result<(), TransferError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_range() {
        assert_eq!(Selection::First(2).playlist_range(), "1-2");
        assert_eq!(Selection::First(10).playlist_range(), "1-10");
    }

    #[test]
    fn test_selection_count() {
        assert_eq!(Selection::First(3).count(), 3);
        assert_eq!(Selection::First(0).count(), 0);
    }
}
