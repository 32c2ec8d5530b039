use super::download;
use anyhow::Result;
use pmcfetch_core::extract::LinkExtractor;
use std::path::{Path, PathBuf};

pub fn execute(
    source: &Path,
    manifest: &Path,
    download_dir: Option<PathBuf>,
    headed: bool,
    chrome_path: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    println!("📄 Step 1/2: extracting PMC links from {}...", source.display());

    let links = LinkExtractor::extract(source, manifest)?;
    if links.is_empty() {
        println!("⚠️  No PMC identifiers found, nothing to download.");
        return Ok(());
    }

    println!(
        "✅ Found {} PMC link(s) -> written to {}",
        links.len(),
        manifest.display()
    );
    println!();
    println!("📥 Step 2/2: downloading PDFs...");

    // The downloader re-reads the manifest it is handed; extraction and
    // download stay decoupled so a hand-edited manifest works the same way.
    download::execute(manifest, download_dir, headed, chrome_path, report)
}
