use clap::Parser;
use quill_engine::action_log::ActionLog;
use quill_engine::config::ConfigLoader;
use quill_engine::driver::Driver;
use quill_engine::error::QuillError;
use quill_engine::formatter::format_report;
use quill_engine::runner::{self, Capability, RunReport};
use quill_wd::{BrowserKind, WebDriverBackend};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "quill",
    version,
    about = "Extract and verify quotes across every layout of the fixture site"
)]
struct Args {
    /// Root URL of the fixture site (default http://quotes.toscrape.com).
    /// Overrides the config file.
    #[arg(long = "base_url")]
    base_url: Option<String>,

    /// WebDriver endpoint that owns the browser
    #[arg(long = "remote_url", default_value = "http://localhost:4444")]
    remote_url: String,

    /// Browser to request: chrome or firefox
    #[arg(long, default_value = "chrome")]
    driver: String,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Config file. Defaults to ./quill.yaml, then ~/.quill/config.yaml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run only these capabilities, comma separated
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report.
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    // Bad arguments fail before a browser session opens.
    let browser: BrowserKind = args.driver.parse()?;
    let capabilities = if args.only.is_empty() {
        Capability::ALL.to_vec()
    } else {
        let mut selected = args
            .only
            .iter()
            .map(|name| name.trim().parse())
            .collect::<Result<Vec<Capability>, QuillError>>()?;
        selected.sort();
        selected.dedup();
        selected
    };

    let mut config = ConfigLoader::load(args.config.as_deref()).await?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    info!("Target site: {}", config.base_url);

    let started = Instant::now();
    let mut driver = WebDriverBackend::new(args.remote_url, browser, args.headless);
    let mut log = ActionLog::new();

    let outcome = match driver.launch().await {
        Ok(()) => runner::run(&mut driver, &config, &mut log, &capabilities).await,
        Err(e) => Err(QuillError::from(e)),
    };
    if let Err(e) = driver.close().await {
        error!("Failed to close browser session: {}", e);
    }

    let result = match outcome {
        Ok(report) => {
            println!("{}", format_report(&report, &log));
            Ok(())
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            let partial = RunReport {
                outcomes: Vec::new(),
                authors: 0,
                passed: false,
            };
            println!("{}", format_report(&partial, &log));
            Err(e.into())
        }
    };
    println!("Elapsed: {:.2?}", started.elapsed());
    result
}
