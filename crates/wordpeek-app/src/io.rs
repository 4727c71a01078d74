use std::sync::Arc;
use std::thread;

use kanal::AsyncSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wordpeek_capture::{
    Capture, ClipboardSource, CopyKeystroke, HotkeyListener, SelectionCapture, SystemClipboard,
    SystemKeystroke,
};
use wordpeek_types::AppEvent;

use crate::state::AppState;

/// Report the hotkey registration, then turn every press into a capture.
///
/// Registration itself happens on the main thread (see
/// [`HotkeyManager`](wordpeek_capture::HotkeyManager)); only polling runs
/// here. The report reaches the router exactly once, success or not.
pub async fn watcher_io(
    state: Arc<AppState>,
    registration: anyhow::Result<HotkeyListener>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (hotkey, capture) = {
        let config = state.config.read().await;
        (config.hotkey.clone(), config.capture.clone())
    };
    let poll_interval = hotkey.poll_interval();
    let settle_delay = capture.settle_delay();
    let combination = hotkey.combination;

    let report = registration_event(&combination, &registration);
    if let Err(e) = event_tx.send(report).await {
        tracing::warn!("[HOTKEY] Router inbox closed: {}", e);
    }
    let Ok(listener) = registration else {
        return Ok(());
    };

    let poller = tokio::task::spawn_blocking(move || {
        tracing::info!("[HOTKEY] Listening for {}", combination);

        while !cancel.is_cancelled() {
            if listener.poll() {
                tracing::info!("[HOTKEY] Pressed, capturing selection");
                spawn_capture(
                    move || {
                        SelectionCapture::new(
                            SystemKeystroke::new(),
                            SystemClipboard::new(),
                            settle_delay,
                        )
                    },
                    event_tx.clone(),
                );
            }

            // Sleep briefly to avoid busy loop
            thread::sleep(poll_interval);
        }

        tracing::info!("[HOTKEY] Listener stopping");
    });

    poller.await?;
    Ok(())
}

/// Map the outcome of registering `combination` to the router's report
pub fn registration_event<T>(combination: &str, result: &anyhow::Result<T>) -> AppEvent {
    match result {
        Ok(_) => AppEvent::HotkeyRegistered {
            combination: combination.to_string(),
        },
        Err(e) => {
            tracing::error!("[HOTKEY] Registration of {} failed: {:#}", combination, e);
            AppEvent::HotkeyFailed {
                combination: combination.to_string(),
                reason: format!("{e:#}"),
            }
        }
    }
}

/// Run one capture on the blocking pool and post its result.
///
/// Each press gets its own capture, so a slow clipboard never delays the
/// next press. `make` runs on the worker thread, which lets the OS handles
/// stay off the sending thread.
pub fn spawn_capture<F, K, C>(make: F, event_tx: AsyncSender<AppEvent>) -> JoinHandle<()>
where
    F: FnOnce() -> SelectionCapture<K, C> + Send + 'static,
    K: CopyKeystroke,
    C: ClipboardSource,
{
    tokio::task::spawn_blocking(move || {
        let event = match make().capture() {
            Capture::Selected(selection) => AppEvent::SelectionCaptured(selection),
            Capture::NoSelection => AppEvent::SelectionEmpty,
        };
        send_event(&event_tx, event);
    })
}

fn send_event(event_tx: &AsyncSender<AppEvent>, event: AppEvent) {
    if let Err(e) = event_tx.as_sync().send(event) {
        tracing::warn!("[HOTKEY] Router inbox closed: {}", e);
    }
}
