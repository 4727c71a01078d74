/// Lifecycle of the global hotkey registration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HotkeyRegistration {
    #[default]
    Pending,
    Active {
        combination: String,
    },
    Failed {
        combination: String,
        reason: String,
    },
}

impl HotkeyRegistration {
    pub fn is_active(&self) -> bool {
        matches!(self, HotkeyRegistration::Active { .. })
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, HotkeyRegistration::Pending)
    }

    /// Tray tooltip for the current state
    pub fn status_line(&self) -> String {
        match self {
            HotkeyRegistration::Pending => "WordPeek - registering hotkey...".to_string(),
            HotkeyRegistration::Active { combination } => {
                format!("WordPeek - press {combination} to look up selection")
            }
            HotkeyRegistration::Failed { .. } => "WordPeek - hotkey inactive".to_string(),
        }
    }
}
