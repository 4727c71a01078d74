use std::thread;
use std::time::Duration;

use wordpeek_types::SelectionEvent;

use crate::clipboard::ClipboardSource;
use crate::keystroke::CopyKeystroke;

/// Result of one capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Selected(SelectionEvent),
    NoSelection,
}

/// Copies the current selection and reads it back from the clipboard.
///
/// Blocks for the settle delay; run it on a worker thread, never the UI thread.
pub struct SelectionCapture<K, C> {
    keystroke: K,
    clipboard: C,
    settle_delay: Duration,
}

impl<K: CopyKeystroke, C: ClipboardSource> SelectionCapture<K, C> {
    pub fn new(keystroke: K, clipboard: C, settle_delay: Duration) -> Self {
        Self {
            keystroke,
            clipboard,
            settle_delay,
        }
    }

    /// Every step may fail; failures only ever narrow the result to `NoSelection`.
    pub fn capture(&mut self) -> Capture {
        self.release_modifiers();
        if let Err(e) = self.keystroke.send_combined() {
            tracing::debug!("[CAPTURE] Combined copy failed ({}), trying key by key", e);
            self.release_modifiers();
            if let Err(e) = self.keystroke.send_stepwise() {
                // The clipboard may still hold text from a real copy
                tracing::warn!("[CAPTURE] Copy keystroke failed: {}", e);
            }
        }

        // Clipboard is written asynchronously after the synthetic keystroke
        thread::sleep(self.settle_delay);

        let raw = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[CAPTURE] Clipboard read failed: {}", e);
                String::new()
            }
        };

        match SelectionEvent::new(&raw) {
            Some(selection) => {
                tracing::debug!("[CAPTURE] Got {} chars", selection.text().chars().count());
                Capture::Selected(selection)
            }
            None => Capture::NoSelection,
        }
    }

    fn release_modifiers(&mut self) {
        if let Err(e) = self.keystroke.release_modifiers() {
            tracing::debug!("[CAPTURE] Could not release modifiers: {}", e);
        }
    }
}
