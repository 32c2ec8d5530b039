use serde::Serialize;
use std::path::PathBuf;

/// What happened to a single manifest URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlOutcome {
    /// Navigation ran and new files showed up in the download directory
    Completed { new_files: Vec<String> },
    /// Navigation ran but no new file was detected; the server may not have
    /// triggered an automatic download
    NoFileDetected,
    /// Navigation or bookkeeping failed for this URL
    Failed { reason: String },
}

/// Per-URL record within a run, with a 1-based sequence index
#[derive(Debug, Clone, Serialize)]
pub struct UrlReport {
    pub index: usize,
    pub url: String,
    pub outcome: UrlOutcome,
}

/// Summary of one sequential download run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// RFC 3339 timestamp for run start
    pub started_at: String,
    /// RFC 3339 timestamp for run end
    pub finished_at: String,
    pub download_dir: PathBuf,
    pub reports: Vec<UrlReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn completed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, UrlOutcome::Completed { .. }))
            .count()
    }

    pub fn no_file(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, UrlOutcome::NoFileDetected))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, UrlOutcome::Failed { .. }))
            .count()
    }
}
