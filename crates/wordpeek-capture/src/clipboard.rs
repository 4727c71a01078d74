use anyhow::Context;
use arboard::Clipboard;

/// Source of the text left behind by the synthetic copy
pub trait ClipboardSource {
    fn read_text(&mut self) -> anyhow::Result<String>;
}

/// OS clipboard through arboard.
///
/// The handle is opened lazily so that a missing clipboard only fails the
/// read, not construction.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> anyhow::Result<String> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().context("Failed to open clipboard")?);
        }

        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.get_text().context("Failed to read clipboard text"),
            None => anyhow::bail!("Clipboard unavailable"),
        }
    }
}
