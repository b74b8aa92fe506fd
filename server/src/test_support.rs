/// Test doubles for the media-fetch capability.
use async_trait::async_trait;

use scout_shared::errors::TransferError;
use scout_shared::fetch::{MediaFetcher, RetrieveOptions, Selection};
use scout_shared::models::ItemDescriptor;

/// Fake capability: canned discovery, retrieval that writes fixture
/// files into the requested output directory.
pub struct FakeFetcher {
    items: Vec<ItemDescriptor>,
    file_sizes: Vec<u64>,
    fail_transfer: bool,
}

impl FakeFetcher {
    /// Fake with `n` discoverable items and no retrievable files.
    pub fn with_items(n: usize) -> Self {
        let items = (0..n)
            .map(|i| ItemDescriptor {
                id: format!("vid{:03}", i),
                title: Some(format!("Video {}", i)),
                url: Some(format!("https://example.com/v/vid{:03}", i)),
            })
            .collect();
        Self {
            items,
            file_sizes: Vec::new(),
            fail_transfer: false,
        }
    }

    /// Sizes of the files a retrieval writes. Fewer entries than the
    /// selection bound simulates per-item failures the capability
    /// tolerated.
    pub fn writing(mut self, sizes: &[u64]) -> Self {
        self.file_sizes = sizes.to_vec();
        self
    }

    /// Make retrieval fail at the capability level.
    pub fn failing_transfer(mut self) -> Self {
        self.fail_transfer = true;
        self
    }
}

#[async_trait]
impl MediaFetcher for FakeFetcher {
    async fn discover(&self, _source_url: &str) -> Result<Vec<ItemDescriptor>, TransferError> {
        Ok(self.items.clone())
    }

    async fn retrieve(
        &self,
        _source_url: &str,
        selection: Selection,
        options: &RetrieveOptions,
    ) -> Result<(), TransferError> {
        if self.fail_transfer {
            return Err(TransferError::Unavailable("simulated outage".into()));
        }

        std::fs::create_dir_all(&options.output_dir).unwrap();
        for (i, size) in self.file_sizes.iter().take(selection.count()).enumerate() {
            let name = format!("video{:02}.{}", i, options.container);
            std::fs::write(options.output_dir.join(name), vec![0u8; *size as usize]).unwrap();
            if options.write_info_json {
                let sidecar = format!("video{:02}.info.json", i);
                std::fs::write(options.output_dir.join(sidecar), b"{}").unwrap();
            }
        }
        Ok(())
    }
}
