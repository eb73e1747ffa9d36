//! Asset byte cache: fetch once per source, hand out defensive copies.
//!
//! Several mounts share one binary asset. The runtime may consume or mutate
//! the buffer it is given, so the cache never lends out its own copy; every
//! caller gets a fresh clone of the cached bytes.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch asset '{src}': {message}")]
    Fetch { src: String, message: String },
}

/// The actual transport (network, filesystem, embedded blob). Out of the
/// core's scope; supplied by the host.
pub trait AssetFetcher {
    fn fetch_bytes(&mut self, src: &str) -> Result<Vec<u8>, AssetError>;
}

/// Process-lifetime cache keyed by source identifier.
pub struct AssetCache {
    fetcher: Box<dyn AssetFetcher>,
    cached: HashMap<String, Vec<u8>>,
}

impl AssetCache {
    pub fn new(fetcher: Box<dyn AssetFetcher>) -> Self {
        Self {
            fetcher,
            cached: HashMap::new(),
        }
    }

    /// Bytes for `src`, fetching on first use. Always returns a copy.
    pub fn bytes(&mut self, src: &str) -> Result<Vec<u8>, AssetError> {
        if let Some(bytes) = self.cached.get(src) {
            return Ok(bytes.clone());
        }
        let bytes = self.fetcher.fetch_bytes(src)?;
        log::debug!("asset cache: fetched '{}' ({} bytes)", src, bytes.len());
        self.cached.insert(src.to_string(), bytes.clone());
        Ok(bytes)
    }

    pub fn is_cached(&self, src: &str) -> bool {
        self.cached.contains_key(src)
    }
}
