//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use itmo_advisor_discovery::DiscoveryOptions;
use itmo_advisor_extractor::{
    DownloadOptions, DriveClient, ExtractReport, PdfTextExtractor, ProgressReporter,
};
use itmo_advisor_service::{
    Advisor, CurriculumIndex, ElectiveTable, TelegramOptions, TelegramTransport,
};
use itmo_advisor_shared::{
    AppConfig, Program, init_config, load_config, load_config_from, load_curricula,
    load_link_set, resolve_bot_token, write_json,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// itmo-advisor: scrape ITMO curricula and answer questions about them.
#[derive(Parser)]
#[command(
    name = "itmo-advisor",
    version,
    about = "Scrape ITMO master's curricula and serve a rule-based advisor bot.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.itmo-advisor/itmo-advisor.toml.
    #[arg(long, global = true, env = "ITMO_ADVISOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Collect curriculum document ids from the program pages.
    Discover {
        /// Where to write the link set (defaults to paths.links_file).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Download the discovered documents and extract course lines.
    Extract {
        /// Link set produced by `discover` (defaults to paths.links_file).
        #[arg(long)]
        links: Option<PathBuf>,

        /// Where to write the curricula (defaults to paths.curricula_file).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep downloaded PDFs in this directory.
        #[arg(long)]
        pdf_dir: Option<PathBuf>,
    },

    /// Run the advisor bot (Telegram long polling).
    Serve {
        /// Curricula file (defaults to paths.curricula_file).
        #[arg(long)]
        curricula: Option<PathBuf>,
    },

    /// Answer a single message locally and print the reply.
    Ask {
        /// Curricula file (defaults to paths.curricula_file).
        #[arg(long)]
        curricula: Option<PathBuf>,

        /// Message text, e.g. `какие выборные дисциплины? -> ml engineer`.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "itmo_advisor=info",
        1 => "itmo_advisor=debug",
        _ => "itmo_advisor=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `ask` output stays clean on stdout.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Discover { out } => cmd_discover(&config, out).await,
        Command::Extract {
            links,
            out,
            pdf_dir,
        } => cmd_extract(&config, links, out, pdf_dir).await,
        Command::Serve { curricula } => cmd_serve(&config, curricula).await,
        Command::Ask { curricula, message } => cmd_ask(&config, curricula, &message.join(" ")),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_discover(config: &AppConfig, out: Option<PathBuf>) -> Result<()> {
    let out = out.unwrap_or_else(|| config.paths.links_file.clone());
    let opts = DiscoveryOptions {
        timeout_secs: config.http.page_timeout_secs,
    };

    info!(out = %out.display(), "discovering curriculum links");
    let links = itmo_advisor_discovery::discover_all(&config.programs.pages(), &opts).await?;
    write_json(&out, &links)?;

    println!();
    for (program, ids) in &links {
        println!("  {program:<12} {} document(s)", ids.len());
    }
    println!("  Saved:       {}", out.display());
    println!();

    Ok(())
}

async fn cmd_extract(
    config: &AppConfig,
    links: Option<PathBuf>,
    out: Option<PathBuf>,
    pdf_dir: Option<PathBuf>,
) -> Result<()> {
    let links_path = links.unwrap_or_else(|| config.paths.links_file.clone());
    let out = out.unwrap_or_else(|| config.paths.curricula_file.clone());

    let links = load_link_set(&links_path)?;

    let downloader = DriveClient::new(DownloadOptions {
        base_url: config.http.drive_base_url.clone(),
        timeout_secs: config.http.download_timeout_secs,
        cache_dir: pdf_dir.or_else(|| config.paths.pdf_dir.clone()),
    })?;

    info!(links = %links_path.display(), out = %out.display(), "extracting curricula");

    let reporter = CliProgress::new();
    let report =
        itmo_advisor_extractor::extract_all(&links, &downloader, &PdfTextExtractor, &reporter)
            .await;

    // Partial results are still written.
    write_json(&out, &report.store)?;

    println!();
    println!("  Documents: {}", report.documents());
    println!("  Courses:   {}", report.courses());
    println!("  Failed:    {}", report.failures.len());
    for (file_id, error) in &report.failures {
        println!("    {file_id}: {error}");
    }
    println!("  Saved:     {}", out.display());
    println!("  Time:      {:.1}s", report.duration.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_serve(config: &AppConfig, curricula: Option<PathBuf>) -> Result<()> {
    // Checked before anything else so a missing token never reaches the loop.
    let token = resolve_bot_token(config)?;

    let advisor = build_advisor(config, curricula.as_deref())?;

    let mut transport = TelegramTransport::new(TelegramOptions {
        api_base_url: config.telegram.api_base_url.clone(),
        token,
        poll_timeout_secs: config.telegram.poll_timeout_secs,
    })?;

    info!("bot starting (polling)");
    itmo_advisor_service::serve(&mut transport, &advisor, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}

fn cmd_ask(config: &AppConfig, curricula: Option<PathBuf>, message: &str) -> Result<()> {
    let advisor = build_advisor(config, curricula.as_deref())?;

    match advisor.handle(message) {
        Some(reply) => println!("{}", reply.render()),
        None => return Err(eyre!("'{message}' is a command the advisor does not answer")),
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

/// Load the curriculum snapshot and build the advisor around it.
fn build_advisor(config: &AppConfig, curricula: Option<&Path>) -> Result<Advisor> {
    let path = curricula.unwrap_or(config.paths.curricula_file.as_path());
    let store = load_curricula(path)?;
    let index = CurriculumIndex::new(store);

    info!(path = %path.display(), courses = index.len(), "curricula loaded");
    Ok(Advisor::new(index, ElectiveTable::default()))
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn program(&self, program: Program, documents: usize) {
        self.spinner
            .set_message(format!("{program}: {documents} document(s)"));
    }

    fn document(&self, file_id: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Downloading [{current}/{total}] {file_id}"));
    }

    fn done(&self, _report: &ExtractReport) {
        self.spinner.finish_and_clear();
    }
}
