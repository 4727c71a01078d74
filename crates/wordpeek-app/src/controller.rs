use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordpeek_capture::HotkeyListener;
use wordpeek_types::AppEvent;

use crate::io::watcher_io;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    /// Everything the router reacts to: hotkey reports, captures, UI
    /// answers and lookup outcomes
    pub inbox: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            inbox: kanal::bounded_async(256),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn inbox(&self) -> (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>) {
        (self.channels.inbox.0.clone(), self.channels.inbox.1.clone())
    }

    /// Spawn the background tasks. The router itself runs on the UI thread.
    /// `hotkey` is the registration made on the main thread.
    pub fn spawn_tasks(
        &self,
        runtime: &Handle,
        hotkey: anyhow::Result<HotkeyListener>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Hotkey polling and capture
        tasks.spawn_on(
            watcher_io(
                self.state.clone(),
                hotkey,
                self.cancel_token.child_token(),
                self.channels.inbox.0.clone(),
            ),
            runtime,
        );

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
