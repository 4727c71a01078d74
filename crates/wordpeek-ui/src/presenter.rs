use std::rc::Rc;

use kanal::AsyncSender;
use slint::{CloseRequestResponse, ComponentHandle};
use wordpeek_core::Presenter;
use wordpeek_types::{AppEvent, Notice, NoticeLevel, RequestId, ResultSurface, UserChoice};

use crate::bridge;
use crate::state::UiState;
use crate::tray::TrayHandle;
use crate::{ConfirmWindow, LoadingWindow, NoticeWindow, ResultWindow};

/// Slint-backed presentation. Lives on the UI thread only.
pub struct SlintPresenter {
    inbox: AsyncSender<AppEvent>,
    pinned: bool,
    state: UiState,
    tray: Option<Rc<TrayHandle>>,
}

impl SlintPresenter {
    pub fn new(inbox: AsyncSender<AppEvent>, pinned: bool, tray: Option<Rc<TrayHandle>>) -> Self {
        Self {
            inbox,
            pinned,
            state: UiState::new(),
            tray,
        }
    }

    fn open_confirmation(&self, request: RequestId, text: &str) -> anyhow::Result<ConfirmWindow> {
        let window = ConfirmWindow::new()?;
        window.set_selection(text.into());
        window.set_pinned(self.pinned);

        // Resolves the prompt once; later clicks find nothing to remove
        let answer = Rc::new({
            let confirmations = Rc::clone(&self.state.confirmations);
            let tx = self.inbox.clone();
            move |choice: UserChoice| {
                let Some(window) = confirmations.borrow_mut().remove(&request) else {
                    return;
                };
                window.hide().ok();
                bridge::release(window);
                tracing::debug!("[SLINT] {} answered {:?}", request, choice);
                bridge::post(&tx, AppEvent::ConfirmationAnswered { request, choice });
            }
        });

        window.on_answered({
            let answer = Rc::clone(&answer);
            move |yes| answer(if yes { UserChoice::Yes } else { UserChoice::No })
        });
        window.window().on_close_requested(move || {
            answer(UserChoice::No);
            CloseRequestResponse::HideWindow
        });

        window.show()?;
        Ok(window)
    }

    fn open_notice(&self, notice: &Notice) -> anyhow::Result<(u64, NoticeWindow)> {
        let window = NoticeWindow::new()?;
        window.set_heading(notice.title.as_str().into());
        window.set_message(notice.message.as_str().into());
        window.set_critical(notice.level == NoticeLevel::Critical);
        window.set_pinned(self.pinned);

        let id = self.state.next_notice_id();
        let close = Rc::new({
            let notices = Rc::clone(&self.state.notices);
            move || {
                if let Some(window) = notices.borrow_mut().remove(&id) {
                    window.hide().ok();
                    bridge::release(window);
                }
            }
        });

        window.on_acknowledged({
            let close = Rc::clone(&close);
            move || close()
        });
        window.window().on_close_requested(move || {
            close();
            CloseRequestResponse::HideWindow
        });

        window.show()?;
        Ok((id, window))
    }
}

impl Presenter for SlintPresenter {
    type Surface = ResultWindow;
    type Indicator = LoadingWindow;

    fn set_status(&self, status: &str) {
        tracing::debug!("[SLINT] Status: {}", status);
        if let Some(tray) = &self.tray {
            tray.set_tooltip(status);
        }
    }

    fn request_confirmation(&self, request: RequestId, text: &str) {
        match self.open_confirmation(request, text) {
            Ok(window) => {
                self.state.confirmations.borrow_mut().insert(request, window);
            }
            Err(e) => {
                tracing::error!("[SLINT] Failed to open confirmation: {}", e);
                bridge::post(
                    &self.inbox,
                    AppEvent::ConfirmationAnswered {
                        request,
                        choice: UserChoice::No,
                    },
                );
            }
        }
    }

    fn show_indicator(&self, text: &str) -> anyhow::Result<LoadingWindow> {
        let window = LoadingWindow::new()?;
        window.set_selection(text.into());
        window.set_pinned(self.pinned);
        // Closing it by hand only hides the indicator; the lookup keeps going
        window
            .window()
            .on_close_requested(|| CloseRequestResponse::HideWindow);
        window.show()?;
        Ok(window)
    }

    fn close_indicator(&self, indicator: LoadingWindow) {
        indicator.hide().ok();
        bridge::release(indicator);
    }

    fn open_surface(&self, surface: &ResultSurface) -> anyhow::Result<ResultWindow> {
        let window = ResultWindow::new()?;
        window.set_heading(format!("Meaning: {}", surface.source_selection.text()).into());
        window.set_body(surface.body().into());
        window.set_pinned(self.pinned);

        let id = surface.id;
        window.on_dismiss({
            let tx = self.inbox.clone();
            move || bridge::post(&tx, AppEvent::SurfaceDismissed(id))
        });
        window.on_terminate({
            let tx = self.inbox.clone();
            move || bridge::post(&tx, AppEvent::Quit)
        });
        window.window().on_close_requested({
            let tx = self.inbox.clone();
            move || {
                bridge::post(&tx, AppEvent::SurfaceDismissed(id));
                CloseRequestResponse::HideWindow
            }
        });

        window.show()?;
        Ok(window)
    }

    fn close_surface(&self, surface: ResultWindow) {
        surface.hide().ok();
        bridge::release(surface);
    }

    fn notify(&self, notice: Notice) {
        match self.open_notice(&notice) {
            Ok((id, window)) => {
                self.state.notices.borrow_mut().insert(id, window);
            }
            Err(e) => {
                tracing::error!(
                    "[SLINT] Failed to show notice '{}: {}': {}",
                    notice.title,
                    notice.message,
                    e
                );
            }
        }
    }

    fn quit(&self) {
        for (_, window) in self.state.confirmations.borrow_mut().drain() {
            window.hide().ok();
        }
        for (_, window) in self.state.notices.borrow_mut().drain() {
            window.hide().ok();
        }

        if let Err(e) = slint::quit_event_loop() {
            tracing::error!("[SLINT] Failed to quit event loop: {}", e);
        }
    }
}
