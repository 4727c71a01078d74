use std::collections::HashMap;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::runtime::Handle;
use wordpeek_types::{
    AppEvent, LookupOutcome, Notice, RequestId, ResultSurface, SelectionEvent, SurfaceId,
    UserChoice,
};

use crate::lookup::LookupService;
use crate::presenter::Presenter;
use crate::registry::SurfaceRegistry;
use crate::state::HotkeyRegistration;

/// Where an in-flight request currently is. `Idle` and `Presenting` are
/// never stored: a request exists only between selection and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    AwaitingConfirmation,
    LookingUp,
}

/// Whether the router loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct PendingRequest<I> {
    selection: SelectionEvent,
    stage: Stage<I>,
}

enum Stage<I> {
    AwaitingConfirmation,
    LookingUp { indicator: Option<I> },
}

/// Process-wide coordinator living on the UI thread.
///
/// Owns the live-surface registry and the hotkey state; everything else
/// reaches it as an [`AppEvent`] through the inbox.
pub struct EventRouter<P: Presenter> {
    presenter: P,
    lookup: Arc<dyn LookupService>,
    runtime: Handle,
    inbox_tx: AsyncSender<AppEvent>,
    requests: HashMap<RequestId, PendingRequest<P::Indicator>>,
    surfaces: SurfaceRegistry<P::Surface>,
    hotkey: HotkeyRegistration,
    next_request: u64,
}

impl<P: Presenter> EventRouter<P> {
    /// `inbox_tx` must feed the receiver later passed to [`EventRouter::run`];
    /// lookup workers post their outcomes through it.
    pub fn new(
        presenter: P,
        lookup: Arc<dyn LookupService>,
        runtime: Handle,
        inbox_tx: AsyncSender<AppEvent>,
    ) -> Self {
        let hotkey = HotkeyRegistration::default();
        presenter.set_status(&hotkey.status_line());

        Self {
            presenter,
            lookup,
            runtime,
            inbox_tx,
            requests: HashMap::new(),
            surfaces: SurfaceRegistry::new(),
            hotkey,
            next_request: 1,
        }
    }

    /// Router main loop. Returns after `Quit` once everything is torn down.
    pub async fn run(mut self, inbox: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
        tracing::info!("[ROUTER] Starting, waiting for events");

        while let Ok(event) = inbox.recv().await {
            if self.handle(event) == Flow::Quit {
                break;
            }
        }

        self.teardown();
        Ok(())
    }

    /// Apply one event. Never blocks.
    pub fn handle(&mut self, event: AppEvent) -> Flow {
        tracing::debug!("[ROUTER] Event: {:?}", std::mem::discriminant(&event));

        match event {
            AppEvent::HotkeyRegistered { combination } => {
                self.on_hotkey_registered(combination);
            }
            AppEvent::HotkeyFailed {
                combination,
                reason,
            } => {
                self.on_hotkey_failed(combination, reason);
            }
            AppEvent::SelectionCaptured(selection) => {
                self.on_selection(selection);
            }
            AppEvent::SelectionEmpty => {
                tracing::info!("[ROUTER] Hotkey pressed with nothing selected");
                self.presenter.notify(Notice::no_selection());
            }
            AppEvent::ConfirmationAnswered { request, choice } => {
                self.on_confirmation(request, choice);
            }
            AppEvent::LookupFinished { request, outcome } => {
                self.on_lookup_finished(request, outcome);
            }
            AppEvent::SurfaceDismissed(id) => {
                self.dismiss_surface(id);
            }
            AppEvent::Quit => {
                tracing::info!("[ROUTER] Quit requested");
                return Flow::Quit;
            }
        }

        Flow::Continue
    }

    pub fn hotkey(&self) -> &HotkeyRegistration {
        &self.hotkey
    }

    pub fn phase(&self, request: RequestId) -> Option<RequestPhase> {
        self.requests.get(&request).map(|r| match r.stage {
            Stage::AwaitingConfirmation => RequestPhase::AwaitingConfirmation,
            Stage::LookingUp { .. } => RequestPhase::LookingUp,
        })
    }

    /// Requests between selection and presentation
    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    pub fn surfaces(&self) -> &SurfaceRegistry<P::Surface> {
        &self.surfaces
    }

    fn on_hotkey_registered(&mut self, combination: String) {
        if self.hotkey.is_settled() {
            tracing::warn!("[ROUTER] Duplicate hotkey registration report ignored");
            return;
        }

        tracing::info!("[ROUTER] Hotkey active: {}", combination);
        self.hotkey = HotkeyRegistration::Active { combination };
        self.presenter.set_status(&self.hotkey.status_line());
    }

    fn on_hotkey_failed(&mut self, combination: String, reason: String) {
        if self.hotkey.is_settled() {
            tracing::warn!("[ROUTER] Duplicate hotkey failure ignored: {}", reason);
            return;
        }

        tracing::error!("[ROUTER] Hotkey {} unavailable: {}", combination, reason);
        self.presenter
            .notify(Notice::hotkey_failed(&combination, &reason));
        self.hotkey = HotkeyRegistration::Failed {
            combination,
            reason,
        };
        self.presenter.set_status(&self.hotkey.status_line());
    }

    fn on_selection(&mut self, selection: SelectionEvent) {
        let request = RequestId(self.next_request);
        self.next_request += 1;

        tracing::info!(
            "[ROUTER] {} awaiting confirmation ({} chars)",
            request,
            selection.text().chars().count()
        );
        tracing::debug!("[ROUTER] {} selection '{}'", request, selection.text());
        self.presenter
            .request_confirmation(request, selection.text());
        self.requests.insert(
            request,
            PendingRequest {
                selection,
                stage: Stage::AwaitingConfirmation,
            },
        );
    }

    fn on_confirmation(&mut self, request: RequestId, choice: UserChoice) {
        let Some(pending) = self.requests.get_mut(&request) else {
            tracing::warn!("[ROUTER] Answer for unknown request {}", request);
            return;
        };
        if !matches!(pending.stage, Stage::AwaitingConfirmation) {
            tracing::warn!("[ROUTER] {} answered twice, ignoring", request);
            return;
        }

        match choice {
            UserChoice::No => {
                tracing::info!("[ROUTER] {} declined", request);
                self.requests.remove(&request);
            }
            UserChoice::Yes => {
                let text = pending.selection.text().to_string();
                let indicator = match self.presenter.show_indicator(&text) {
                    Ok(indicator) => Some(indicator),
                    Err(e) => {
                        tracing::warn!("[ROUTER] Could not show lookup indicator: {}", e);
                        None
                    }
                };
                pending.stage = Stage::LookingUp { indicator };

                tracing::info!("[ROUTER] {} looking up", request);
                self.dispatch_lookup(request, text);
            }
        }
    }

    /// Run the lookup on the runtime and post the outcome back to the inbox.
    /// A panicking lookup still yields exactly one `Error` outcome.
    fn dispatch_lookup(&self, request: RequestId, text: String) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.inbox_tx.clone();
        let runtime = self.runtime.clone();

        self.runtime.spawn(async move {
            let worker = runtime.spawn(async move { lookup.lookup(&text).await });

            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("[ROUTER] Lookup task for {} failed: {}", request, e);
                    LookupOutcome::Error(format!("Lookup task failed: {e}"))
                }
            };

            if let Err(e) = tx.send(AppEvent::LookupFinished { request, outcome }).await {
                tracing::warn!("[ROUTER] Dropping outcome for {}: {}", request, e);
            }
        });
    }

    fn on_lookup_finished(&mut self, request: RequestId, outcome: LookupOutcome) {
        let Some(pending) = self.requests.remove(&request) else {
            tracing::warn!("[ROUTER] Outcome for unknown request {}", request);
            return;
        };

        let PendingRequest { selection, stage } = pending;
        let indicator = match stage {
            Stage::LookingUp { indicator } => indicator,
            Stage::AwaitingConfirmation => {
                tracing::warn!("[ROUTER] {} finished before confirmation, ignoring", request);
                self.requests.insert(
                    request,
                    PendingRequest {
                        selection,
                        stage: Stage::AwaitingConfirmation,
                    },
                );
                return;
            }
        };

        if let Some(indicator) = indicator {
            self.presenter.close_indicator(indicator);
        }

        tracing::debug!("[ROUTER] {} presenting", request);
        self.present(selection, outcome);
    }

    fn present(&mut self, selection: SelectionEvent, outcome: LookupOutcome) {
        match outcome {
            LookupOutcome::Success(text) => {
                let surface = ResultSurface {
                    id: self.surfaces.next_id(),
                    source_selection: selection,
                    outcome: LookupOutcome::Success(text),
                };

                match self.presenter.open_surface(&surface) {
                    Ok(handle) => {
                        tracing::info!("[ROUTER] Opened {}", surface.id);
                        self.surfaces.insert(surface, handle);
                    }
                    Err(e) => {
                        tracing::error!("[ROUTER] Could not open result window: {}", e);
                        self.presenter.notify(Notice::lookup_error(
                            &surface.source_selection,
                            &format!("Could not open result window: {e}"),
                        ));
                    }
                }
            }
            LookupOutcome::NotFound => {
                self.presenter.notify(Notice::not_found(&selection));
            }
            LookupOutcome::Error(message) => {
                self.presenter
                    .notify(Notice::lookup_error(&selection, &message));
            }
        }
    }

    fn dismiss_surface(&mut self, id: SurfaceId) {
        match self.surfaces.remove(id) {
            Some((_, handle)) => {
                tracing::debug!("[ROUTER] Closing {}", id);
                self.presenter.close_surface(handle);
            }
            None => tracing::debug!("[ROUTER] {} already closed", id),
        }
    }

    fn teardown(&mut self) {
        for (surface, handle) in self.surfaces.drain() {
            tracing::debug!("[ROUTER] Closing {} on shutdown", surface.id);
            self.presenter.close_surface(handle);
        }

        for (_, pending) in self.requests.drain() {
            if let Stage::LookingUp {
                indicator: Some(indicator),
            } = pending.stage
            {
                self.presenter.close_indicator(indicator);
            }
        }

        tracing::info!("[ROUTER] Stopped");
        self.presenter.quit();
    }
}
