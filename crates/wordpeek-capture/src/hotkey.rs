use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::HotKey,
};

/// Parse an accelerator such as "CmdOrCtrl+Shift+D"
pub fn parse_hotkey(combination: &str) -> Result<HotKey> {
    combination
        .parse::<HotKey>()
        .with_context(|| format!("Invalid hotkey '{combination}'"))
}

/// Owns the OS registration.
///
/// Create it on the main thread before the UI event loop starts: Windows
/// delivers hotkey messages to the creating thread's message loop and macOS
/// only accepts registration from the main thread. Polling happens elsewhere
/// through a [`HotkeyListener`].
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    /// Register `combination` globally. May fail without OS permissions or
    /// when another app already owns the combination.
    pub fn register(combination: &str) -> Result<Self> {
        let hotkey = parse_hotkey(combination)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .context("Failed to register hotkey")?;

        Ok(Self { manager, hotkey })
    }

    pub fn listener(&self) -> HotkeyListener {
        HotkeyListener {
            id: self.hotkey.id(),
        }
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}

/// Press detection for a registered hotkey; safe to move to a worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyListener {
    id: u32,
}

impl HotkeyListener {
    /// Check if the hotkey went down since the last poll (non-blocking).
    /// Drains all pending events; key releases are ignored.
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut pressed = false;

        while let Ok(event) = receiver.try_recv() {
            if self.is_press(&event) {
                tracing::debug!("[HOTKEY] Pressed, id {}", event.id);
                pressed = true;
            }
        }

        pressed
    }

    fn is_press(&self, event: &GlobalHotKeyEvent) -> bool {
        event.id == self.id && event.state == HotKeyState::Pressed
    }
}
