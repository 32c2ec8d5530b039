use crate::manifest::Manifest;
use crate::pmc::PmcId;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct LinkExtractor;

impl LinkExtractor {
    /// Scan a PubMed text export for PMC identifiers and persist the derived
    /// PDF URLs to a manifest file
    ///
    /// URLs are produced in file order, one per matching line, without
    /// deduplication. The manifest is written even when no identifier is
    /// found, and the list is also returned so the caller can short-circuit
    /// on empty.
    pub fn extract(source: &Path, manifest_path: &Path) -> Result<Vec<String>> {
        tracing::debug!("Extracting PMC links from: {}", source.display());

        if !source.exists() {
            return Err(Error::SourceNotFound(source.to_path_buf()));
        }

        let file = File::open(source)?;
        let reader = BufReader::new(file);

        let mut urls = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(id) = PmcId::from_line(&line) {
                tracing::debug!("Matched identifier: {}", id);
                urls.push(id.pdf_url());
            }
        }

        Manifest::new(urls.clone()).write_to(manifest_path)?;

        tracing::info!(
            "Extracted {} PMC link(s) from {}",
            urls.len(),
            source.display()
        );

        Ok(urls)
    }
}
