use crate::Result;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_RETRIES: usize = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A CDP connection to a running Chrome, configured for unattended downloads
pub struct DownloadSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl DownloadSession {
    /// Connect to Chrome on the given debugging port
    ///
    /// Chrome may not be ready right after spawn, so the connection is retried
    /// a few times before giving up. Connection failure is fatal to the run.
    pub async fn connect(debugging_port: u16, download_dir: &Path) -> Result<Self> {
        let ws_url = format!("http://localhost:{}", debugging_port);
        tracing::info!("Connecting to Chrome on port {}", debugging_port);

        let (browser, mut handler) = {
            let mut retries = CONNECT_RETRIES;
            loop {
                tracing::debug!("Attempting CDP connection to {}...", ws_url);
                match Browser::connect(&ws_url).await {
                    Ok(result) => {
                        tracing::debug!("CDP connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(crate::Error::Cdp(format!(
                                "Failed to connect to Chrome after {} attempts: {}",
                                CONNECT_RETRIES, e
                            )));
                        }
                        tracing::debug!("CDP connection attempt failed, retrying ({} left)", retries);
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        // The handler stream must be drained for any CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        // Give Chrome a moment to create its initial page
        tokio::time::sleep(Duration::from_millis(500)).await;

        let page = if let Some(page) = browser.pages().await?.first() {
            tracing::debug!("Reusing Chrome's initial page");
            page.clone()
        } else {
            tracing::debug!("No existing pages, creating one");
            browser.new_page("about:blank").await?
        };

        // Route downloads to the target directory on the CDP side as well;
        // the profile preferences only cover the browser-side save path.
        let behavior = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(download_dir.display().to_string())
            .build()
            .map_err(crate::Error::Cdp)?;
        browser.execute(behavior).await?;

        tracing::info!(
            "Browser session ready, downloads routed to {}",
            download_dir.display()
        );

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Navigate the session's page to a URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    /// Tear the session down
    ///
    /// Consumes the session so teardown can only happen once per run.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close returned an error (ignored): {}", e);
        }
        self.handler_task.abort();
    }
}
