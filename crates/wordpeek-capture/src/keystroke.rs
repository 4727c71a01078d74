use std::thread;
use std::time::Duration;

use anyhow::Context;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

/// Delay between individual key events in the step-by-step fallback
const STEP_DELAY: Duration = Duration::from_millis(30);

/// Time for the target app to see the modifiers go up before the copy chord
const RELEASE_DELAY: Duration = Duration::from_millis(50);

/// Synthesizes the platform copy shortcut
pub trait CopyKeystroke {
    /// Let go of modifiers the user may still hold from the hotkey, so the
    /// chord reaches the focused app as a plain copy
    fn release_modifiers(&mut self) -> anyhow::Result<()>;

    /// Modifier and key sent as one chord
    fn send_combined(&mut self) -> anyhow::Result<()>;

    /// Press and hold the modifier, tap the key, release
    fn send_stepwise(&mut self) -> anyhow::Result<()>;
}

/// Copy shortcut through enigo: Command+C on macOS, Control+C elsewhere
#[derive(Default)]
pub struct SystemKeystroke {
    enigo: Option<Enigo>,
}

impl SystemKeystroke {
    pub fn new() -> Self {
        Self::default()
    }

    fn modifier() -> Key {
        if cfg!(target_os = "macos") {
            Key::Meta
        } else {
            Key::Control
        }
    }

    /// Released in this order before every copy attempt
    fn held_modifiers() -> [Key; 3] {
        [Key::Shift, Key::Alt, Self::modifier()]
    }

    fn enigo(&mut self) -> anyhow::Result<&mut Enigo> {
        if self.enigo.is_none() {
            let enigo = Enigo::new(&Settings::default()).context("Failed to create input simulator")?;
            self.enigo = Some(enigo);
        }

        self.enigo
            .as_mut()
            .context("Input simulator unavailable")
    }
}

impl CopyKeystroke for SystemKeystroke {
    fn release_modifiers(&mut self) -> anyhow::Result<()> {
        let enigo = self.enigo()?;

        for key in Self::held_modifiers() {
            enigo.key(key, Direction::Release)?;
        }
        thread::sleep(RELEASE_DELAY);

        Ok(())
    }

    fn send_combined(&mut self) -> anyhow::Result<()> {
        let enigo = self.enigo()?;

        enigo.key(Self::modifier(), Direction::Press)?;
        let tapped = enigo.key(Key::Unicode('c'), Direction::Click);
        // Always let go of the modifier, even if the tap failed
        enigo.key(Self::modifier(), Direction::Release)?;
        tapped?;

        Ok(())
    }

    fn send_stepwise(&mut self) -> anyhow::Result<()> {
        let enigo = self.enigo()?;

        enigo.key(Self::modifier(), Direction::Press)?;
        thread::sleep(STEP_DELAY);
        enigo.key(Key::Unicode('c'), Direction::Press)?;
        thread::sleep(STEP_DELAY);
        enigo.key(Key::Unicode('c'), Direction::Release)?;
        thread::sleep(STEP_DELAY);
        enigo.key(Self::modifier(), Direction::Release)?;

        Ok(())
    }
}
