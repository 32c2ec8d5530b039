use anyhow::Result;
use pmcfetch_browser::{FetchConfig, PdfFetcher};
use pmcfetch_core::manifest::Manifest;
use std::path::{Path, PathBuf};

pub fn execute(
    manifest_path: &Path,
    download_dir: Option<PathBuf>,
    headed: bool,
    chrome_path: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    let download_dir = super::resolve_download_dir_arg(download_dir)?;

    let manifest = Manifest::read_from(manifest_path)?;
    if manifest.is_empty() {
        println!(
            "⚠️  Manifest {} holds no links, nothing to download.",
            manifest_path.display()
        );
        return Ok(());
    }

    println!(
        "📄 {} link(s) to download into {}",
        manifest.len(),
        download_dir.display()
    );

    tracing::debug!(
        "Driver config: download_dir={}, headed={}, chrome_path={:?}",
        download_dir.display(),
        headed,
        chrome_path
    );

    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result: Result<()> = runtime.block_on(async {
        let fetcher = PdfFetcher::new(FetchConfig {
            download_dir,
            headless: !headed,
            chrome_path,
        });

        let summary = fetcher.run(manifest.urls()).await?;

        super::print_summary(&summary);

        if let Some(report_path) = report {
            super::write_report(&summary, &report_path)?;
        }

        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
