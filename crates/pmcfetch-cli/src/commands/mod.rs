pub mod completion;
pub mod download;
pub mod extract;
pub mod run;

use anyhow::Result;
use console::style;
use pmcfetch_core::report::RunSummary;
use std::path::{Path, PathBuf};

/// Pick the download directory: explicit flag first, platform default second
pub(crate) fn resolve_download_dir_arg(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => dirs::download_dir().ok_or_else(|| {
            anyhow::anyhow!("Could not determine a download directory. Pass --download-dir.")
        }),
    }
}

pub(crate) fn print_summary(summary: &RunSummary) {
    println!();
    println!("🎉 Run finished: {} link(s) processed", summary.total());
    println!(
        "   {} completed, {} without a detected file, {} failed",
        style(summary.completed()).green(),
        style(summary.no_file()).yellow(),
        style(summary.failed()).red()
    );
    println!("   Check {} for the PDFs", summary.download_dir.display());
}

pub(crate) fn write_report(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    println!("📝 Run report written to {}", path.display());
    Ok(())
}
