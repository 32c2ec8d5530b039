use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tempfile::TempDir;

const DEBUGGING_PORT: u16 = 9222;

/// Manages the Chrome process used for PDF downloads
///
/// Each launcher owns a throwaway profile directory, seeded with the download
/// preferences that make Chrome save PDFs straight to disk instead of opening
/// its viewer. The profile is removed when the launcher is dropped.
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    download_dir: PathBuf,
    headless: bool,
    debugging_port: u16,
    profile: TempDir,
}

impl ChromeLauncher {
    /// Create a launcher targeting the given download directory
    ///
    /// `download_dir` must already be absolute; Chrome silently ignores
    /// relative download paths.
    pub fn new(chrome_path: PathBuf, download_dir: PathBuf, headless: bool) -> Result<Self> {
        let profile = tempfile::tempdir().map_err(Error::Io)?;

        Ok(Self {
            chrome_path,
            download_dir,
            headless,
            debugging_port: DEBUGGING_PORT,
            profile,
        })
    }

    /// Launch the Chrome process
    pub fn launch(&self) -> Result<Child> {
        self.write_profile_preferences()?;

        let args = self.build_args();
        tracing::debug!("Launching {} {}", self.chrome_path.display(), args.join(" "));

        Command::new(&self.chrome_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    /// Seed the profile with download preferences
    ///
    /// `always_open_pdf_externally` disables the in-browser PDF viewer and
    /// `prompt_for_download = false` suppresses the save-as dialog, so every
    /// navigation to a PDF lands directly in the download directory.
    fn write_profile_preferences(&self) -> Result<()> {
        let default_dir = self.profile.path().join("Default");
        std::fs::create_dir_all(&default_dir)?;

        let prefs = serde_json::json!({
            "plugins": {
                "always_open_pdf_externally": true,
            },
            "download": {
                "default_directory": self.download_dir.display().to_string(),
                "prompt_for_download": false,
                "directory_upgrade": true,
            },
        });

        let content = serde_json::to_string(&prefs)
            .map_err(|e| Error::Browser(format!("Failed to encode Chrome preferences: {}", e)))?;
        std::fs::write(default_dir.join("Preferences"), content)?;

        Ok(())
    }

    /// Build Chrome command-line arguments
    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.profile.path().display()),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
        }

        args.push("about:blank".to_string());

        args
    }

    /// Profile directory used for this launch
    pub fn profile_path(&self) -> &Path {
        self.profile.path()
    }

    /// Get the debugging port
    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}
