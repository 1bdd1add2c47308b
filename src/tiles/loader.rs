use async_trait::async_trait;
use futures::future::try_join_all;
use image::RgbaImage;
use once_cell::sync::Lazy;

use super::grid::TileDescriptor;
use super::source::PlannedTile;
use crate::core::constants::{TILE_REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::{MapError, Result};

/// Shared async HTTP client for tile fetching. Building the client once avoids
/// the cost of TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(TILE_REQUEST_TIMEOUT_SECS))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// Fetches and decodes a tile image.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load the image at `url`
    async fn load(&self, url: &str) -> Result<RgbaImage>;
}

/// Loads tiles over HTTP(S) and decodes them with the `image` crate
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl HttpImageLoader {
    /// Create a loader using the shared HTTP client
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Create a loader with a caller-configured client (proxies, headers, timeouts)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MapError::TileFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(MapError::TileFetch {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| MapError::TileFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<RgbaImage> {
        let data = self.fetch_bytes(url).await?;
        log::debug!("downloaded tile {} ({} bytes)", url, data.len());
        decode_tile(url, &data)
    }
}

/// Decode raw tile bytes (PNG, JPEG or WebP) into RGBA pixels
pub fn decode_tile(url: &str, data: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(data)
        .map(|img| img.to_rgba8())
        .map_err(|source| MapError::TileDecode {
            url: url.to_string(),
            source,
        })
}

/// Fetch every planned tile concurrently.
///
/// All requests are in flight together on the caller's task. The first failure
/// aborts the whole batch and drops the remaining requests; on success the
/// images come back in the same order as `tiles`.
pub async fn load_all(
    loader: &dyn ImageLoader,
    tiles: &[PlannedTile],
) -> Result<Vec<(TileDescriptor, RgbaImage)>> {
    let requests = tiles.iter().map(|tile| async move {
        match loader.load(&tile.url).await {
            Ok(image) => Ok((tile.descriptor, image)),
            Err(e) => {
                log::warn!("tile {} failed: {}", tile.descriptor.coord, e);
                Err(e)
            }
        }
    });

    try_join_all(requests).await
}
