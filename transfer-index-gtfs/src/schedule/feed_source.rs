use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use super::schedule_error::ScheduleError;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// where a GTFS feed comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FeedSource {
    /// remote zip archive, cached at `cache_path` after the first download
    Url { url: String, cache_path: PathBuf },
    /// local zip archive or extracted feed directory
    Local { path: PathBuf },
}

impl FeedSource {
    /// interprets a feed location: http(s) URLs download into `cache_path`, anything
    /// else is a local path.
    pub fn new(location: &str, cache_path: &Path) -> FeedSource {
        if location.starts_with("http://") || location.starts_with("https://") {
            FeedSource::Url {
                url: location.to_string(),
                cache_path: cache_path.to_path_buf(),
            }
        } else {
            FeedSource::Local {
                path: PathBuf::from(location),
            }
        }
    }

    /// the local path of the feed, downloading it first if needed.
    ///
    /// # Arguments
    ///
    /// * `force_download` - if true, replace a cached download instead of reusing it
    pub fn resolve(&self, force_download: bool) -> Result<PathBuf, ScheduleError> {
        match self {
            FeedSource::Local { path } => {
                if path.exists() {
                    Ok(path.clone())
                } else {
                    Err(ScheduleError::InvalidData(format!(
                        "GTFS feed not found at {}",
                        path.display()
                    )))
                }
            }
            FeedSource::Url { url, cache_path } => {
                if cache_path.exists() && !force_download {
                    log::info!("using cached GTFS feed at {}", cache_path.display());
                } else {
                    download(url, cache_path)?;
                }
                Ok(cache_path.clone())
            }
        }
    }
}

/// downloads a feed archive to `destination`, creating parent directories as needed.
pub fn download(url: &str, destination: &Path) -> Result<(), ScheduleError> {
    log::info!("downloading GTFS from {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| ScheduleError::Download(format!("failure building http client: {e}")))?;
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| ScheduleError::Download(format!("request to {url} failed: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| ScheduleError::Download(format!("failure reading body from {url}: {e}")))?;
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(destination)?;
    file.write_all(&bytes)?;
    log::info!(
        "downloaded {} bytes to {}",
        bytes.len(),
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_location_kinds() {
        let cache = Path::new("data/feed.zip");
        assert_eq!(
            FeedSource::new("https://example.org/GTFS.zip", cache),
            FeedSource::Url {
                url: String::from("https://example.org/GTFS.zip"),
                cache_path: PathBuf::from("data/feed.zip")
            }
        );
        assert_eq!(
            FeedSource::new("data/gtfs", cache),
            FeedSource::Local {
                path: PathBuf::from("data/gtfs")
            }
        );
    }

    #[test]
    fn test_missing_local_feed() {
        let source = FeedSource::new("/definitely/not/a/feed.zip", Path::new("unused"));
        assert!(matches!(
            source.resolve(false),
            Err(ScheduleError::InvalidData(_))
        ));
    }

    #[test]
    fn test_cached_download_is_reused() {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("test/mini_feed/stops.txt");
        // an unreachable url never gets requested while the cache file exists
        let source = FeedSource::new("http://127.0.0.1:9/feed.zip", &fixture);
        assert_eq!(source.resolve(false).expect("cached"), fixture);
    }
}
