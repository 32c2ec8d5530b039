use anyhow::Result;
use pmcfetch_core::extract::LinkExtractor;
use std::path::Path;

pub fn execute(source: &Path, manifest: &Path) -> Result<()> {
    println!("🔎 Extracting PMC links from {}...", source.display());

    let links = LinkExtractor::extract(source, manifest)?;

    if links.is_empty() {
        println!("⚠️  No PMC identifiers found (an empty manifest was still written).");
    } else {
        println!(
            "✅ {} link(s) written to {}",
            links.len(),
            manifest.display()
        );
    }

    Ok(())
}
