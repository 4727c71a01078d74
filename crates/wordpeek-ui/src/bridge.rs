use std::time::Duration;

use kanal::AsyncSender;
use wordpeek_types::AppEvent;

/// Post an event from a synchronous UI callback to the router inbox
pub fn post(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    let tx = tx.clone();
    let spawned = slint::spawn_local(async move {
        if let Err(e) = tx.send(event).await {
            tracing::warn!("[SLINT] Router inbox closed: {}", e);
        }
    });

    if let Err(e) = spawned {
        tracing::error!("[SLINT] Failed to post UI event: {}", e);
    }
}

/// Drop a window handle on the next event loop turn, outside of its own callback
pub fn release<T: 'static>(handle: T) {
    slint::Timer::single_shot(Duration::ZERO, move || drop(handle));
}
