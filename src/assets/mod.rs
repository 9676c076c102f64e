//! Sample asset provisioning
//!
//! Makes sure the example gallery images exist locally, downloading any that
//! are missing. Files are never re-validated: presence by name is enough.

pub mod fetch;

pub use fetch::{FetchError, HttpFetcher, SampleFetcher};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{SampleSource, SamplesConfig};

/// Provisioning failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not create samples directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sample images unavailable: {}", describe_failures(.0))]
    Unavailable(Vec<(String, FetchError)>),
}

fn describe_failures(failures: &[(String, FetchError)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("{} ({})", name, err))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A declared sample image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAsset {
    pub filename: String,
    pub url: String,
}

impl From<&SampleSource> for SampleAsset {
    fn from(source: &SampleSource) -> Self {
        Self {
            filename: source.filename.clone(),
            url: source.url.clone(),
        }
    }
}

/// What a provisioning pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Files downloaded during this pass
    pub fetched: Vec<String>,
    /// Files that were already on disk
    pub present: Vec<String>,
}

/// Ensures sample images are available in a local directory
pub struct AssetProvisioner {
    dir: PathBuf,
    assets: Vec<SampleAsset>,
    fetcher: Arc<dyn SampleFetcher>,
}

impl AssetProvisioner {
    pub fn new(dir: PathBuf, assets: Vec<SampleAsset>, fetcher: Arc<dyn SampleFetcher>) -> Self {
        Self {
            dir,
            assets,
            fetcher,
        }
    }

    /// Build a provisioner that downloads over HTTP
    pub fn from_config(config: &SamplesConfig) -> Self {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.download_timeout_secs));
        Self::new(
            config.dir.clone(),
            config.sources.iter().map(SampleAsset::from).collect(),
            Arc::new(fetcher),
        )
    }

    /// Samples directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Declared samples
    pub fn assets(&self) -> &[SampleAsset] {
        &self.assets
    }

    /// Local path for a sample filename. Does not check that it exists.
    pub fn sample_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Whether every declared sample is on disk
    pub fn all_present(&self) -> bool {
        self.assets
            .iter()
            .all(|asset| self.sample_path(&asset.filename).exists())
    }

    /// Download every missing sample.
    ///
    /// Idempotent: files that already exist are skipped without touching the
    /// network. A failed download does not stop the pass; the failures are
    /// reported together and those files are retried on the next call.
    pub fn ensure_samples(&self) -> Result<ProvisionReport, AssetError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| AssetError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let mut report = ProvisionReport::default();
        let mut failures = Vec::new();

        for asset in &self.assets {
            let target = self.sample_path(&asset.filename);
            if target.exists() {
                debug!("Sample {} already present", asset.filename);
                report.present.push(asset.filename.clone());
                continue;
            }

            info!("Downloading sample {} from {}", asset.filename, asset.url);
            match self.fetcher.fetch(&asset.url, &target) {
                Ok(bytes) => {
                    info!("Downloaded sample {} ({} bytes)", asset.filename, bytes);
                    report.fetched.push(asset.filename.clone());
                }
                Err(e) => {
                    warn!("Failed to download sample {}: {}", asset.filename, e);
                    failures.push((asset.filename.clone(), e));
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(AssetError::Unavailable(failures))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    /// Writes a fixed payload instead of downloading; fails for listed URLs
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        pub calls: Mutex<Vec<String>>,
        pub failing: Vec<String>,
    }

    impl FakeFetcher {
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl SampleFetcher for FakeFetcher {
        fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
            self.calls.lock().push(url.to_string());
            if self.failing.iter().any(|f| f == url) {
                return Err(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                });
            }
            std::fs::write(dest, b"sample")?;
            Ok(6)
        }
    }

    fn assets() -> Vec<SampleAsset> {
        vec![
            SampleAsset {
                filename: "english.png".to_string(),
                url: "https://example.test/english.png".to_string(),
            },
            SampleAsset {
                filename: "thai.jpg".to_string(),
                url: "https://example.test/thai.jpg".to_string(),
            },
        ]
    }

    #[test]
    fn test_sample_path_does_not_touch_disk() {
        let provisioner = AssetProvisioner::new(
            PathBuf::from("/nonexistent/samples"),
            assets(),
            Arc::new(FakeFetcher::default()),
        );
        assert_eq!(
            provisioner.sample_path("english.png"),
            PathBuf::from("/nonexistent/samples/english.png")
        );
        assert!(!provisioner.all_present());
    }

    #[test]
    fn test_ensure_samples_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let samples_dir = dir.path().join("demo_samples");
        let fetcher = Arc::new(FakeFetcher::default());
        let provisioner = AssetProvisioner::new(samples_dir.clone(), assets(), fetcher.clone());

        let first = provisioner.ensure_samples().unwrap();
        assert_eq!(first.fetched, vec!["english.png", "thai.jpg"]);
        assert!(first.present.is_empty());
        assert_eq!(fetcher.call_count(), 2);
        assert!(samples_dir.join("thai.jpg").exists());

        let second = provisioner.ensure_samples().unwrap();
        assert!(second.fetched.is_empty());
        assert_eq!(second.present.len(), 2);
        assert_eq!(fetcher.call_count(), 2);
        assert!(provisioner.all_present());
    }

    #[test]
    fn test_only_missing_files_are_fetched() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("english.png"), b"local").unwrap();
        let fetcher = Arc::new(FakeFetcher::default());
        let provisioner = AssetProvisioner::new(dir.path().to_path_buf(), assets(), fetcher.clone());

        let report = provisioner.ensure_samples().unwrap();
        assert_eq!(report.fetched, vec!["thai.jpg"]);
        assert_eq!(report.present, vec!["english.png"]);
        assert_eq!(*fetcher.calls.lock(), vec!["https://example.test/thai.jpg"]);
        // Existing files are never overwritten
        assert_eq!(std::fs::read(dir.path().join("english.png")).unwrap(), b"local");
    }

    #[test]
    fn test_failed_fetch_is_retried_next_time() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(FakeFetcher {
            failing: vec!["https://example.test/english.png".to_string()],
            ..Default::default()
        });
        let provisioner = AssetProvisioner::new(dir.path().to_path_buf(), assets(), fetcher.clone());

        let err = provisioner.ensure_samples().unwrap_err();
        match &err {
            AssetError::Unavailable(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, "english.png");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("english.png"));
        // The other sample was still downloaded
        assert!(dir.path().join("thai.jpg").exists());
        assert!(!dir.path().join("english.png").exists());

        let _ = provisioner.ensure_samples();
        let calls = fetcher.calls.lock();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], "https://example.test/english.png");
    }
}
