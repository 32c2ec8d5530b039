use crate::downloads::DownloadWatcher;
use crate::session::DownloadSession;
use crate::{ChromeFinder, ChromeLauncher, Result};
use chrono::Utc;
use pmcfetch_core::report::{RunSummary, UrlOutcome, UrlReport};
use std::path::{Path, PathBuf};
use std::process::Child;
use std::time::Duration;

/// Time given to the browser to start a download after navigation
const DOWNLOAD_START_DELAY: Duration = Duration::from_secs(3);
/// First settle-wait budget
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);
/// Extended settle-wait budget, used when the first one times out
const EXTENDED_SETTLE_TIMEOUT: Duration = Duration::from_secs(120);
/// Politeness delay after each URL, to avoid server-side rate limiting
const POLITENESS_DELAY: Duration = Duration::from_secs(2);
/// Additional pause between consecutive URLs
const NEXT_URL_DELAY: Duration = Duration::from_secs(1);

/// Driver configuration, passed in explicitly so runs don't share state
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Where Chrome saves the PDFs; normalized to an absolute path at run start
    pub download_dir: PathBuf,
    pub headless: bool,
    /// Explicit Chrome binary, bypassing discovery
    pub chrome_path: Option<PathBuf>,
}

/// Sequential download driver: one browser session, one URL at a time
pub struct PdfFetcher {
    config: FetchConfig,
}

impl PdfFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Fetch every URL in order, one at a time
    ///
    /// Session setup failure is fatal. Per-URL failures are recorded in the
    /// returned summary and never abort the run. The browser session is torn
    /// down exactly once, on every path.
    pub async fn run(&self, urls: &[String]) -> Result<RunSummary> {
        let download_dir = resolve_download_dir(&self.config.download_dir)?;
        tracing::info!(
            "Fetching {} link(s) into {}",
            urls.len(),
            download_dir.display()
        );

        let chrome_binary = ChromeFinder::new(self.config.chrome_path.clone()).find()?;
        tracing::info!("Using Chrome at {}", chrome_binary.display());

        let launcher =
            ChromeLauncher::new(chrome_binary, download_dir.clone(), self.config.headless)?;
        let mut chrome_process = launcher.launch()?;

        let session =
            match DownloadSession::connect(launcher.debugging_port(), &download_dir).await {
                Ok(session) => session,
                Err(e) => {
                    // Chrome is already running; don't leave it behind
                    kill_chrome(&mut chrome_process);
                    return Err(e);
                }
            };

        let watcher = DownloadWatcher::new(download_dir.clone());
        let started_at = Utc::now().to_rfc3339();
        let mut reports = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            let index = i + 1;
            tracing::info!("Processing {}/{}: {}", index, urls.len(), url);

            let outcome = match self.process_url(&session, &watcher, url).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("Error while processing {}: {}", url, e);
                    UrlOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            match &outcome {
                UrlOutcome::Completed { new_files } => {
                    tracing::info!("New file(s): {}", new_files.join(", "));
                }
                UrlOutcome::NoFileDetected => {
                    tracing::warn!(
                        "No new file detected for {} (download may have failed, or the page \
                         did not trigger one)",
                        url
                    );
                }
                UrlOutcome::Failed { reason } => {
                    tracing::warn!("Failed {}: {}", url, reason);
                }
            }

            reports.push(UrlReport {
                index,
                url: url.clone(),
                outcome,
            });

            tokio::time::sleep(NEXT_URL_DELAY).await;
        }

        session.close().await;
        kill_chrome(&mut chrome_process);

        Ok(RunSummary {
            started_at,
            finished_at: Utc::now().to_rfc3339(),
            download_dir,
            reports,
        })
    }

    /// Handle a single URL: snapshot, navigate, wait, diff
    async fn process_url(
        &self,
        session: &DownloadSession,
        watcher: &DownloadWatcher,
        url: &str,
    ) -> Result<UrlOutcome> {
        let before = watcher.snapshot()?;

        let mut navigation_error = None;
        if let Err(e) = session.navigate(url).await {
            let message = e.to_string();
            if message.contains("ERR_ABORTED") {
                // Chrome aborts the navigation when a download takes it over;
                // for direct-to-disk PDFs this is the expected path.
                tracing::debug!("Navigation aborted by download for {}", url);
            } else {
                navigation_error = Some(message);
            }
        }

        if navigation_error.is_none() {
            tokio::time::sleep(DOWNLOAD_START_DELAY).await;

            if !watcher.wait_until_settled(SETTLE_TIMEOUT).await {
                tracing::info!("Download still in flight, extending wait...");
                if !watcher.wait_until_settled(EXTENDED_SETTLE_TIMEOUT).await {
                    // Best effort only; the directory diff below still runs
                    tracing::warn!("Download did not settle within the extended wait");
                }
            }
        }

        // The diff runs even after a failed navigation; a download can land
        // without the navigation itself succeeding
        let after = watcher.snapshot()?;
        let new_files = DownloadWatcher::new_files(&before, &after);

        tokio::time::sleep(POLITENESS_DELAY).await;

        if let Some(reason) = navigation_error {
            if !new_files.is_empty() {
                tracing::info!(
                    "File(s) appeared despite the navigation error: {}",
                    new_files.join(", ")
                );
            }
            return Ok(UrlOutcome::Failed { reason });
        }

        if new_files.is_empty() {
            Ok(UrlOutcome::NoFileDetected)
        } else {
            Ok(UrlOutcome::Completed { new_files })
        }
    }
}

/// Normalize the download directory to an absolute path and create it
///
/// Chrome requires an absolute download path, so a relative one is resolved
/// against the current working directory.
fn resolve_download_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    };

    std::fs::create_dir_all(&absolute)?;

    Ok(absolute)
}

fn kill_chrome(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("Chrome already exited: {}", e);
    }
    match child.wait() {
        Ok(status) => tracing::debug!("Chrome exited with {}", status),
        Err(e) => tracing::debug!("Failed to reap Chrome: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_download_dir_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_download_dir(dir.path()).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_resolve_download_dir_absolutizes_relative_paths() {
        let resolved = resolve_download_dir(Path::new("target/test-download-dir")).unwrap();

        assert!(resolved.is_absolute());
        assert!(resolved.exists());

        std::fs::remove_dir_all(&resolved).unwrap();
    }

    #[test]
    fn test_resolve_download_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("pdfs").join("run-1");

        let resolved = resolve_download_dir(&target).unwrap();

        assert!(resolved.exists());
        assert!(resolved.is_dir());
    }
}
