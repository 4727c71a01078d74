use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wordpeek_capture::HotkeyManager;
use wordpeek_core::LookupService;
use wordpeek_dictionary::DictionaryClient;

mod controller;
mod io;
mod profile;
mod state;


use self::controller::AppController;
use self::state::AppState;

/// How long to wait for background tasks after the UI loop ends
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    // A missing .env is the normal case
    dotenvy::dotenv().ok();
    init_tracing();

    let config = profile::load_config();
    tracing::info!(
        "Starting WordPeek (hotkey {}, api {})",
        config.hotkey.combination,
        config.lookup.api_url
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("wordpeek-worker")
        .build()
        .context("Failed to build tokio runtime")?;

    let lookup: Arc<dyn LookupService> =
        Arc::new(DictionaryClient::new(&config.lookup).context("Failed to create dictionary client")?);

    // Registered here, on the thread that will run the UI event loop
    let hotkey = HotkeyManager::register(&config.hotkey.combination);
    let listener = match &hotkey {
        Ok(manager) => Ok(manager.listener()),
        Err(e) => Err(anyhow::anyhow!("{e:#}")),
    };

    let ui_config = config.ui.clone();
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(runtime.handle(), listener);

    let (inbox_tx, inbox_rx) = controller.inbox();
    // Slint must own the main thread
    let result = wordpeek_ui::ui_loop(inbox_tx, inbox_rx, lookup, runtime.handle().clone(), &ui_config);

    controller.shutdown();
    runtime.block_on(async {
        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("Task exited with error: {:#}", e),
                    Err(e) => tracing::error!("Task panicked: {}", e),
                }
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!("Background tasks still running at shutdown");
        }
    });
    runtime.shutdown_background();
    // Unregister on the thread that registered
    drop(hotkey);

    tracing::info!("WordPeek stopped");
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("WORDPEEK_LOG_JSON").is_ok_and(|v| v == "1");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    // Ignore the error if a subscriber is already installed
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
