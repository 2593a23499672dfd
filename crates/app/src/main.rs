use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, CatalogService, Clock, DEFAULT_FETCH_TIMEOUT_SECS, PracticeConfig,
    PracticeLoopService, ProgressService,
};
use storage::{ApiConfig, DEFAULT_API_URL, Storage};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::{App, UiApp, build_app_context};

mod offline;

/// Desktop client for spaced-repetition math practice.
#[derive(Debug, Parser)]
#[command(name = "math-practice", version, about)]
struct Cli {
    /// Base URL of the practice server.
    #[arg(long, env = "PRACTICE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds to wait for the next problem before showing the empty state.
    #[arg(
        long,
        env = "PRACTICE_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    fetch_timeout_secs: u64,

    /// Practice against a built-in demo set instead of the server.
    #[arg(long)]
    offline: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn practice_config(&self) -> PracticeConfig {
        PracticeConfig::with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn,practice_core=info,services=info,storage=info,ui=info,app=info",
            1 => "info,practice_core=debug,services=debug,storage=debug,ui=debug,app=debug",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn init_tracing(cli: &Cli) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn practice(&self) -> Arc<PracticeLoopService> {
        self.services.practice()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

fn build_storage(cli: &Cli, clock: Clock) -> Result<Storage, Box<dyn std::error::Error>> {
    if cli.offline {
        tracing::info!("running offline against the demo problem set");
        return Ok(Storage::from_backend(offline::demo_repository(clock)?));
    }
    let config = ApiConfig::new(&cli.api_url)?;
    tracing::info!(api_url = %config.base(), "using practice server");
    Ok(Storage::http(config)?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::default_clock();
    let storage = build_storage(&cli, clock)?;
    let services = AppServices::new(&storage, clock, cli.practice_config());

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some tao setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Math Practice")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "failed to start");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
