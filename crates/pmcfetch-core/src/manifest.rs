use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use url::Url;

/// Ordered list of retrieval URLs, persisted one per line
///
/// The manifest is the only handoff between extraction and download. It may
/// also be hand-authored by the operator, so reading tolerates blank lines and
/// skips anything that does not parse as a URL.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    urls: Vec<String>,
}

impl Manifest {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Write the manifest to a file, one URL per line, LF-terminated
    ///
    /// Parent directories are created as needed and an existing file is
    /// overwritten. An empty manifest still produces an (empty) file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        tracing::debug!("Writing manifest to: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for url in &self.urls {
            writer.write_all(url.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::info!(
            "Wrote manifest with {} link(s) to {}",
            self.urls.len(),
            path.display()
        );

        Ok(())
    }

    /// Read a manifest from a file
    ///
    /// Lines are trimmed, empty lines are dropped, and lines that do not parse
    /// as a URL are skipped with a warning. Order is preserved.
    pub fn read_from(path: &Path) -> Result<Self> {
        tracing::debug!("Reading manifest from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut urls = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Url::parse(line) {
                Ok(_) => urls.push(line.to_string()),
                Err(e) => {
                    tracing::warn!("Skipping manifest line that is not a URL ({}): {}", e, line);
                }
            }
        }

        tracing::info!(
            "Read manifest with {} link(s) from {}",
            urls.len(),
            path.display()
        );

        Ok(Self { urls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");

        let urls = vec![
            "https://pmc.ncbi.nlm.nih.gov/articles/PMC123/pdf/".to_string(),
            "https://pmc.ncbi.nlm.nih.gov/articles/PMC456/pdf/".to_string(),
            "https://pmc.ncbi.nlm.nih.gov/articles/PMC789/pdf/".to_string(),
        ];

        Manifest::new(urls.clone()).write_to(&path).unwrap();
        let read_back = Manifest::read_from(&path).unwrap();

        assert_eq!(read_back.urls(), urls.as_slice());
    }

    #[test]
    fn test_write_is_lf_terminated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");

        let manifest = Manifest::new(vec!["https://example.com/a".to_string()]);
        manifest.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "https://example.com/a\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");

        Manifest::new(vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ])
        .write_to(&path)
        .unwrap();

        Manifest::new(vec!["https://example.com/c".to_string()])
            .write_to(&path)
            .unwrap();

        let read_back = Manifest::read_from(&path).unwrap();
        assert_eq!(read_back.urls(), ["https://example.com/c".to_string()]);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("links.txt");

        Manifest::new(vec![]).write_to(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_empty_manifest_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");

        Manifest::new(vec![]).write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_read_trims_and_drops_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        std::fs::write(&path, "  https://example.com/a  \n\n\nhttps://example.com/b\n").unwrap();

        let manifest = Manifest::read_from(&path).unwrap();
        assert_eq!(
            manifest.urls(),
            [
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string()
            ]
        );
    }

    #[test]
    fn test_read_skips_non_url_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        std::fs::write(&path, "https://example.com/a\nnot a url\nhttps://example.com/b\n").unwrap();

        let manifest = Manifest::read_from(&path).unwrap();
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Manifest::read_from(&dir.path().join("missing.txt"));
        assert!(result.is_err());
    }
}
