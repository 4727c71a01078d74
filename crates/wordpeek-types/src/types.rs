use std::fmt;

use serde::{Deserialize, Serialize};

/// Messages consumed by the event router on the UI thread.
///
/// Background workers (hotkey listener, captures, lookups) and UI callbacks
/// only ever talk to the router by posting one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    HotkeyRegistered {
        combination: String,
    },
    HotkeyFailed {
        combination: String,
        reason: String,
    },
    SelectionCaptured(SelectionEvent),
    SelectionEmpty,
    ConfirmationAnswered {
        request: RequestId,
        choice: UserChoice,
    },
    LookupFinished {
        request: RequestId,
        outcome: LookupOutcome,
    },
    SurfaceDismissed(SurfaceId),
    Quit,
}

/// Text grabbed from the user's selection. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SelectionEvent {
    text: String,
}

impl SelectionEvent {
    /// Returns `None` when nothing but whitespace is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for SelectionEvent {
    type Error = EmptySelection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(EmptySelection)
    }
}

impl From<SelectionEvent> for String {
    fn from(value: SelectionEvent) -> Self {
        value.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("selection is empty")]
pub struct EmptySelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    Success(String),
    NotFound,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserChoice {
    Yes,
    No,
}

/// Identifies one hotkey press as it moves through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Identifies one open result window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// One open result window as tracked by the router's registry
#[derive(Debug, Clone)]
pub struct ResultSurface {
    pub id: SurfaceId,
    pub source_selection: SelectionEvent,
    pub outcome: LookupOutcome,
}

impl ResultSurface {
    /// Body text shown inside the window
    pub fn body(&self) -> &str {
        match &self.outcome {
            LookupOutcome::Success(text) => text,
            LookupOutcome::NotFound => "",
            LookupOutcome::Error(message) => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Critical,
}

/// Transient, dismissible message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn critical(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Critical,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn not_found(selection: &SelectionEvent) -> Self {
        Self::info(
            "Not found",
            format!("No such word exists: \"{}\"", selection.text()),
        )
    }

    pub fn lookup_error(selection: &SelectionEvent, message: &str) -> Self {
        Self::critical(
            "Lookup Error",
            format!(
                "Error while looking up \"{}\":\n{}",
                selection.text(),
                message
            ),
        )
    }

    pub fn no_selection() -> Self {
        Self::info(
            "No selection",
            "No text was selected (or nothing copied). Select text and press the hotkey again.",
        )
    }

    pub fn hotkey_failed(combination: &str, reason: &str) -> Self {
        Self::critical(
            "Hotkey Error",
            format!("Failed to register global hotkey ({combination}): {reason}"),
        )
    }
}
