mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{config::timeout_from_secs, load_settings, SettlePolicy};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::RandomGuiApp;

#[derive(Parser, Debug)]
#[command(name = "qrng-gui", about = "Desktop client for a QRNG service")]
struct Args {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    settle_policy: Option<SettlePolicy>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
    if let Some(policy) = args.settle_policy {
        settings.settle_policy = policy;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Quantum RNG")
            .with_inner_size([760.0, 620.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Quantum RNG",
        options,
        Box::new(|_cc| Ok(Box::new(RandomGuiApp::new(cmd_tx, ui_rx)))),
    )
}
