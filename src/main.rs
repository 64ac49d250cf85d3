//! FactFinder - terminal panel for the FactFinder backend
//!
//! Binary entry point: parses arguments, sets up logging and configuration,
//! connects to the backend bridge and hands the engine to the TUI.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Section;
use tracing::{info, warn};

use factfinder_app::config::load_settings;
use factfinder_app::{BridgeProviderRegistry, Engine};
use factfinder_bridge::{BridgeClient, EventBus};

/// FactFinder - live emulator and split-tracker facts in your terminal
#[derive(Parser, Debug)]
#[command(name = "factfinder")]
#[command(about = "Terminal panel for the FactFinder backend", long_about = None)]
struct Args {
    /// Backend bridge WebSocket URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path to a config.toml (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = factfinder_core::logging::init() {
        eprintln!("Logging disabled: {e}");
    }

    let mut settings = load_settings(args.config.as_deref());
    if let Some(url) = args.url {
        info!("Bridge URL overridden on the command line");
        settings.bridge.url = url;
    }

    let bus = EventBus::new();
    let client = BridgeClient::connect(
        &settings.bridge.url,
        bus.clone(),
        settings.bridge.request_timeout(),
    )
    .await
    .wrap_err_with(|| format!("Could not reach the backend at {}", settings.bridge.url))?;

    let registry = BridgeProviderRegistry::new(client.request_handle());
    let engine = Engine::new(settings, bus, registry);

    let result = factfinder_tui::run(engine);

    client.disconnect().await;
    if let Err(e) = &result {
        warn!("Exiting with error: {}", e);
    }
    result
        .wrap_err("Terminal UI failed")
        .with_note(|| {
            format!(
                "Logs are in {}",
                factfinder_core::logging::log_directory().display()
            )
        })
}
