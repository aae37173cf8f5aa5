//! iptsd entry point.
//!
//! Loads the config, wires the decoders to an output sink, opens the IPTS
//! device (or a capture file) and runs the ingestion loop until the source
//! closes or Ctrl-C is pressed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                 -- TOML + defaults
//!  └─ TracingSink                   -- InputSink
//!  └─ DecodePayloadUseCase ┐
//!     DecodeHidUseCase     ┴─ ProtocolDispatcher
//!  └─ open_report_source()          -- device node or capture replay
//!  └─ IngestionLoop::run()          -- read → dispatch → log
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipts_core::ProtocolDispatcher;
use iptsd::application::{
    decode_hid::DecodeHidUseCase, decode_payload::DecodePayloadUseCase, ingest::IngestionLoop,
    sink::InputSink,
};
use iptsd::infrastructure::{
    output::TracingSink,
    storage::config::{config_file_path, load_config},
    transport::open_report_source,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.daemon.log_level)),
        )
        .init();

    info!("iptsd starting");
    if let Ok(path) = config_file_path() {
        info!("configuration: {}", path.display());
    }

    // ── Decoders ──────────────────────────────────────────────────────────────
    let sink: Arc<dyn InputSink> = Arc::new(TracingSink::new());
    let payload = Arc::new(DecodePayloadUseCase::new(
        Arc::clone(&sink),
        config.decode_options(),
    ));
    let hid = Arc::new(DecodeHidUseCase::new(Arc::clone(&sink), config.touch.enabled));
    let dispatcher = ProtocolDispatcher::new(payload, hid);

    // ── Source ────────────────────────────────────────────────────────────────
    let mut source = open_report_source(&config.device)
        .await
        .context("failed to open report source")?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    // ── Ingestion ─────────────────────────────────────────────────────────────
    let mut ingestion = IngestionLoop::new(dispatcher, config.device.buffer_size);
    let stats = ingestion
        .run(source.as_mut(), &running)
        .await
        .context("report source failed")?;

    info!(
        reports = stats.reports,
        decoded = stats.decoded,
        ignored = stats.ignored,
        unknown_kinds = stats.unknown_kinds,
        failed = stats.failed,
        "iptsd stopped"
    );
    Ok(())
}
