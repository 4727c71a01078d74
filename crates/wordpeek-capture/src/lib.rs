mod clipboard;
mod hotkey;
mod keystroke;
mod selection;

pub use clipboard::{ClipboardSource, SystemClipboard};
pub use hotkey::{HotkeyListener, HotkeyManager, parse_hotkey};
pub use keystroke::{CopyKeystroke, SystemKeystroke};
pub use selection::{Capture, SelectionCapture};
