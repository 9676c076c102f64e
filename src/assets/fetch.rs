//! Sample downloads over HTTP

use futures_util::StreamExt;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::debug;

/// Environment variable that forbids all network access
pub const OFFLINE_ENV: &str = "EASYOCR_DEMO_OFFLINE";

/// A failed download
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("offline mode: refusing to download {0}")]
    Offline(String),
    #[error("download failed with status {status}: {url}")]
    Status { status: u16, url: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can copy a URL to a local file.
///
/// Implementations must either leave a complete file at `dest` or leave
/// `dest` untouched.
pub trait SampleFetcher: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Blocking fetcher backed by `reqwest` on a private tokio runtime
pub struct HttpFetcher {
    timeout: Duration,
    offline: bool,
}

impl HttpFetcher {
    /// Offline mode follows `EASYOCR_DEMO_OFFLINE`
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            offline: std::env::var_os(OFFLINE_ENV).is_some(),
        }
    }

    /// Override offline mode
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    async fn download(&self, url: &str, temp_path: &Path) -> Result<u64, FetchError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        debug!("Download size for {}: {:?} bytes", url, response.content_length());

        let mut file = std::fs::File::create(temp_path)?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            written += chunk.len() as u64;
        }

        file.flush()?;
        Ok(written)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl SampleFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        if self.offline {
            return Err(FetchError::Offline(url.to_string()));
        }

        // Unique sibling so concurrent downloads of the same sample never share a file
        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = dest.with_file_name(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4()));

        let rt = Runtime::new()?;
        let result = rt.block_on(self.download(url, &temp_path));

        match result {
            Ok(written) => {
                std::fs::rename(&temp_path, dest)?;
                Ok(written)
            }
            Err(e) => {
                std::fs::remove_file(&temp_path).ok();
                Err(e)
            }
        }
    }
}
