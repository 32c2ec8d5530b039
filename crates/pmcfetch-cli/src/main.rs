use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "pmcfetch")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Bulk-download open-access PMC PDFs referenced in a PubMed export",
    long_about = "pmcfetch extracts PMC identifiers from a PubMed text export, derives the \
                  PDF link for each article, and drives a Chrome session that downloads the \
                  PDFs one at a time into a target directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract PMC PDF links from a PubMed text export
    Extract {
        /// Path to the PubMed export file
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Where to write the link manifest
        #[arg(short, long, default_value = "pmc_links.txt")]
        manifest: PathBuf,
    },

    /// Download the PDF behind every link in a manifest
    Download {
        /// Path to the link manifest (one URL per line, may be hand-edited)
        #[arg(value_name = "FILE")]
        manifest: PathBuf,

        /// Directory the PDFs are saved into (defaults to the platform download directory)
        #[arg(short, long)]
        download_dir: Option<PathBuf>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Extract links and download the PDFs in one pass
    Run {
        /// Path to the PubMed export file
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Where to write the link manifest
        #[arg(short, long, default_value = "pmc_links.txt")]
        manifest: PathBuf,

        /// Directory the PDFs are saved into (defaults to the platform download directory)
        #[arg(short, long)]
        download_dir: Option<PathBuf>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Extract { source, manifest } => commands::extract::execute(&source, &manifest),
        Commands::Download {
            manifest,
            download_dir,
            headed,
            chrome_path,
            report,
        } => commands::download::execute(&manifest, download_dir, headed, chrome_path, report),
        Commands::Run {
            source,
            manifest,
            download_dir,
            headed,
            chrome_path,
            report,
        } => commands::run::execute(
            &source,
            &manifest,
            download_dir,
            headed,
            chrome_path,
            report,
        ),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pmcfetch=debug,pmcfetch_core=debug,pmcfetch_browser=debug")
    } else {
        EnvFilter::new("pmcfetch=info,pmcfetch_core=info,pmcfetch_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
