use anyhow::Result;
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Tray icon with a tooltip and a Quit item.
///
/// On Linux the icon lives on its own gtk thread, since tray-icon needs a
/// running gtk main loop there; tooltip updates are forwarded to it.
pub struct TrayHandle {
    quit_id: MenuId,
    backend: Backend,
}

#[cfg(not(target_os = "linux"))]
type Backend = TrayIcon;

#[cfg(target_os = "linux")]
type Backend = std::sync::mpsc::Sender<String>;

impl TrayHandle {
    #[cfg(not(target_os = "linux"))]
    pub fn new(tooltip: &str) -> Result<Self> {
        let (tray, quit_id) = build_tray(tooltip)?;
        Ok(Self {
            quit_id,
            backend: tray,
        })
    }

    #[cfg(target_os = "linux")]
    pub fn new(tooltip: &str) -> Result<Self> {
        let (quit_id, backend) = gtk_thread::spawn(tooltip)?;
        Ok(Self { quit_id, backend })
    }

    pub fn set_tooltip(&self, tooltip: &str) {
        #[cfg(not(target_os = "linux"))]
        if let Err(e) = self.backend.set_tooltip(Some(tooltip)) {
            tracing::warn!("[TRAY] Failed to update tooltip: {}", e);
        }

        #[cfg(target_os = "linux")]
        if self.backend.send(tooltip.to_string()).is_err() {
            tracing::warn!("[TRAY] Tray thread is gone, tooltip not updated");
        }
    }

    /// Non-blocking poll of menu clicks
    pub fn quit_requested(&self) -> bool {
        let mut quit = false;
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if is_quit(&event, &self.quit_id) {
                tracing::info!("[TRAY] Quit clicked");
                quit = true;
            }
        }
        quit
    }
}

fn is_quit(event: &MenuEvent, quit_id: &MenuId) -> bool {
    event.id() == quit_id
}

fn build_tray(tooltip: &str) -> Result<(TrayIcon, MenuId)> {
    let menu = Menu::new();
    let quit_item = MenuItem::new("Quit", true, None);
    menu.append(&quit_item)?;

    let tray = TrayIconBuilder::new()
        .with_tooltip(tooltip)
        .with_menu(Box::new(menu))
        .with_icon(default_icon()?)
        .build()?;

    Ok((tray, quit_item.id().clone()))
}

#[cfg(target_os = "linux")]
mod gtk_thread {
    use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
    use std::thread;
    use std::time::Duration;

    use anyhow::{Context, Result, anyhow};
    use gtk::glib;
    use tray_icon::menu::MenuId;

    const TOOLTIP_POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// Start gtk on a dedicated thread and build the tray there.
    ///
    /// The thread ends its main loop once the returned sender is dropped.
    pub fn spawn(tooltip: &str) -> Result<(MenuId, Sender<String>)> {
        let (tooltip_tx, tooltip_rx) = mpsc::channel::<String>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<MenuId, String>>(1);
        let tooltip = tooltip.to_string();

        thread::Builder::new()
            .name("wordpeek-tray".into())
            .spawn(move || run(&tooltip, tooltip_rx, ready_tx))
            .context("Failed to spawn tray thread")?;

        let quit_id = ready_rx
            .recv()
            .context("Tray thread exited during startup")?
            .map_err(|e| anyhow!(e))?;

        Ok((quit_id, tooltip_tx))
    }

    fn run(
        tooltip: &str,
        tooltip_rx: Receiver<String>,
        ready_tx: mpsc::SyncSender<Result<MenuId, String>>,
    ) {
        if let Err(e) = gtk::init() {
            let _ = ready_tx.send(Err(format!("Failed to initialize gtk: {e}")));
            return;
        }

        let tray = match super::build_tray(tooltip) {
            Ok((tray, quit_id)) => {
                let _ = ready_tx.send(Ok(quit_id));
                tray
            }
            Err(e) => {
                let _ = ready_tx.send(Err(format!("{e:#}")));
                return;
            }
        };

        glib::timeout_add_local(TOOLTIP_POLL_INTERVAL, move || loop {
            match tooltip_rx.try_recv() {
                Ok(tooltip) => {
                    if let Err(e) = tray.set_tooltip(Some(tooltip)) {
                        tracing::warn!("[TRAY] Failed to update tooltip: {}", e);
                    }
                }
                Err(TryRecvError::Empty) => return glib::ControlFlow::Continue,
                Err(TryRecvError::Disconnected) => {
                    gtk::main_quit();
                    return glib::ControlFlow::Break;
                }
            }
        });

        tracing::debug!("[TRAY] gtk main loop running");
        gtk::main();
        tracing::debug!("[TRAY] gtk main loop finished");
    }
}

/// 16x16 filled dot
fn default_icon() -> Result<Icon> {
    const SIZE: u32 = 16;
    let center = (SIZE as f32 - 1.0) / 2.0;
    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);

    for y in 0..SIZE {
        for x in 0..SIZE {
            let (dx, dy) = (x as f32 - center, y as f32 - center);
            let inside = dx * dx + dy * dy <= center * center;
            rgba.extend_from_slice(&[0x2B, 0x6C, 0xB0, if inside { 0xFF } else { 0x00 }]);
        }
    }

    Ok(Icon::from_rgba(rgba, SIZE, SIZE)?)
}
