use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Temporary-file globs that mark a download still in flight
///
/// `.crdownload` is Chrome's convention, `.part` Firefox's; both are checked
/// so a hand-pointed download directory shared with another browser still
/// settles correctly.
const IN_PROGRESS_PATTERNS: &[&str] = &["*.crdownload", "*.part"];

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Observes a download directory for in-flight and finished downloads
///
/// The directory is written by the external browser process and only ever
/// read here. Completion is inferred from the absence of in-progress marker
/// files, a best-effort signal rather than a guarantee.
pub struct DownloadWatcher {
    dir: PathBuf,
    poll_interval: Duration,
}

impl DownloadWatcher {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(dir: PathBuf, poll_interval: Duration) -> Self {
        Self { dir, poll_interval }
    }

    /// Snapshot the file names currently present in the download directory
    pub fn snapshot(&self) -> std::io::Result<HashSet<String>> {
        let mut names = HashSet::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Marker files for downloads still in flight
    pub fn in_progress_downloads(&self) -> Vec<PathBuf> {
        let mut markers = Vec::new();
        for pattern in IN_PROGRESS_PATTERNS {
            let glob_pattern = self.dir.join(pattern).to_string_lossy().into_owned();
            match glob::glob(&glob_pattern) {
                Ok(paths) => markers.extend(paths.filter_map(std::result::Result::ok)),
                Err(e) => {
                    tracing::warn!("Invalid download marker pattern {}: {}", glob_pattern, e);
                }
            }
        }
        markers
    }

    pub fn is_download_in_progress(&self) -> bool {
        !self.in_progress_downloads().is_empty()
    }

    /// Poll until no in-progress markers remain or the timeout elapses
    ///
    /// Returns `true` when the directory looks settled, `false` on timeout.
    pub async fn wait_until_settled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.is_download_in_progress() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Files present after a navigation that were not present before, sorted
    pub fn new_files(before: &HashSet<String>, after: &HashSet<String>) -> Vec<String> {
        let mut new: Vec<String> = after.difference(before).cloned().collect();
        new.sort();
        new
    }
}
