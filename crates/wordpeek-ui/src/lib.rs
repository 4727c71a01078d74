use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::runtime::Handle;
use wordpeek_config::ui::UiConfig;
use wordpeek_core::{EventRouter, LookupService, Presenter};
use wordpeek_types::{AppEvent, Notice};

mod bridge;
mod presenter;
mod state;
mod tray;

pub use presenter::SlintPresenter;
pub use tray::TrayHandle;

slint::include_modules!();

const TRAY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the UI thread until the router processes `Quit`.
///
/// Must be called from the main thread. Lookups are spawned on `runtime`.
pub fn ui_loop(
    inbox_tx: AsyncSender<AppEvent>,
    inbox_rx: AsyncReceiver<AppEvent>,
    lookup: Arc<dyn LookupService>,
    runtime: Handle,
    config: &UiConfig,
) -> anyhow::Result<()> {
    let tray = create_tray();
    let presenter = SlintPresenter::new(inbox_tx.clone(), config.always_on_top, tray.clone());

    if config.startup_notice {
        presenter.notify(Notice::info(
            "WordPeek",
            "WordPeek is now running.\nPress the hotkey to look up selected text.",
        ));
    }

    let router = EventRouter::new(presenter, lookup, runtime, inbox_tx.clone());

    // Tray menu events arrive on a global channel; pump them from the UI thread
    let tray_timer = slint::Timer::default();
    if let Some(tray) = tray {
        let tx = inbox_tx.clone();
        tray_timer.start(slint::TimerMode::Repeated, TRAY_POLL_INTERVAL, move || {
            if tray.quit_requested() {
                bridge::post(&tx, AppEvent::Quit);
            }
        });
    }

    slint::spawn_local(async move {
        if let Err(e) = router.run(inbox_rx).await {
            tracing::error!("[SLINT] Router stopped with error: {}", e);
            slint::quit_event_loop().ok();
        }
    })?;

    tracing::info!("[SLINT] Entering event loop");
    // Windows come and go; only an explicit quit ends the loop
    slint::run_event_loop_until_quit()?;
    tracing::info!("[SLINT] Event loop finished");

    tray_timer.stop();
    Ok(())
}

fn create_tray() -> Option<Rc<TrayHandle>> {
    match TrayHandle::new("WordPeek") {
        Ok(tray) => Some(Rc::new(tray)),
        Err(e) => {
            tracing::warn!("[TRAY] Failed to create tray icon: {:#}", e);
            None
        }
    }
}
