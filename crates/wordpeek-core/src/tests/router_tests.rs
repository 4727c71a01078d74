//! Router state machine driven with a recording presenter

use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use tokio::runtime::Handle;
use tokio::time::timeout;
use wordpeek_types::{AppEvent, LookupOutcome, NoticeLevel, SelectionEvent, UserChoice};

use super::fakes::{Call, FakePresenter, LogCapture, PanickingLookup, ScriptedLookup};
use crate::lookup::LookupService;
use crate::router::{EventRouter, Flow, RequestPhase};
use crate::state::HotkeyRegistration;

fn setup(
    lookup: impl LookupService + 'static,
) -> (EventRouter<FakePresenter>, FakePresenter, AsyncReceiver<AppEvent>) {
    let (tx, rx) = kanal::unbounded_async();
    let presenter = FakePresenter::default();
    let router = EventRouter::new(presenter.clone(), Arc::new(lookup), Handle::current(), tx);
    (router, presenter, rx)
}

fn selected(text: &str) -> AppEvent {
    AppEvent::SelectionCaptured(SelectionEvent::new(text).unwrap())
}

async fn next_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for router inbox")
        .expect("inbox closed")
}

const RUN_REPORT: &str =
    "Word: run\nPronunciation: /rʌn/\n\nPart of speech: verb\n  1. move fast\n     e.g., She ran.";

#[tokio::test]
async fn test_full_pipeline_opens_surface() {
    let lookup = ScriptedLookup::default().with(
        "run",
        Duration::ZERO,
        LookupOutcome::Success(RUN_REPORT.to_string()),
    );
    let (mut router, presenter, rx) = setup(lookup);

    router.handle(selected("run"));
    let request = presenter.confirmation_for("run");
    assert_eq!(router.phase(request), Some(RequestPhase::AwaitingConfirmation));

    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });
    assert_eq!(router.phase(request), Some(RequestPhase::LookingUp));

    let finished = next_event(&rx).await;
    assert!(matches!(finished, AppEvent::LookupFinished { request: r, .. } if r == request));
    router.handle(finished);

    assert_eq!(router.in_flight(), 0);
    assert_eq!(router.surfaces().len(), 1);

    let calls = presenter.calls();
    let show = calls
        .iter()
        .position(|c| *c == Call::ShowIndicator("run".into()))
        .unwrap();
    let close = calls
        .iter()
        .position(|c| *c == Call::CloseIndicator("run".into()))
        .unwrap();
    let open = calls
        .iter()
        .position(|c| matches!(c, Call::OpenSurface(..)))
        .unwrap();
    assert!(show < close && close < open);
    assert_eq!(presenter.opened_surfaces()[0].1, RUN_REPORT);
}

#[tokio::test]
async fn test_declined_leaves_no_trace() {
    let (mut router, presenter, rx) = setup(ScriptedLookup::default());

    router.handle(selected("run"));
    let request = presenter.confirmation_for("run");
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::No,
    });

    assert_eq!(router.in_flight(), 0);
    assert!(router.surfaces().is_empty());
    assert!(presenter.notices().is_empty());
    assert_eq!(presenter.count(|c| matches!(c, Call::ShowIndicator(_))), 0);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.is_empty());
}

#[tokio::test]
async fn test_not_found_shows_notice_without_surface() {
    let lookup = ScriptedLookup::default().with("xyzzyqq", Duration::ZERO, LookupOutcome::NotFound);
    let (mut router, presenter, rx) = setup(lookup);

    router.handle(selected("xyzzyqq"));
    let request = presenter.confirmation_for("xyzzyqq");
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });
    router.handle(next_event(&rx).await);

    let notices = presenter.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "No such word exists: \"xyzzyqq\"");
    assert!(router.surfaces().is_empty());
}

#[tokio::test]
async fn test_error_shows_critical_notice_and_router_recovers() {
    let lookup = ScriptedLookup::default()
        .with(
            "slow",
            Duration::ZERO,
            LookupOutcome::Error("Dictionary API timed out".to_string()),
        )
        .with("run", Duration::ZERO, LookupOutcome::Success(RUN_REPORT.to_string()));
    let (mut router, presenter, rx) = setup(lookup);

    router.handle(selected("slow"));
    let first = presenter.confirmation_for("slow");
    router.handle(AppEvent::ConfirmationAnswered {
        request: first,
        choice: UserChoice::Yes,
    });
    router.handle(next_event(&rx).await);

    let notices = presenter.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Critical);
    assert!(notices[0].message.contains("Dictionary API timed out"));
    assert_eq!(router.in_flight(), 0);

    // Next press goes through normally
    router.handle(selected("run"));
    let second = presenter.confirmation_for("run");
    assert_ne!(first, second);
    router.handle(AppEvent::ConfirmationAnswered {
        request: second,
        choice: UserChoice::Yes,
    });
    router.handle(next_event(&rx).await);

    assert_eq!(router.surfaces().len(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_own_outcomes() {
    let lookup = ScriptedLookup::default()
        .with(
            "run",
            Duration::from_millis(150),
            LookupOutcome::Success("Word: run".to_string()),
        )
        .with(
            "walk",
            Duration::from_millis(10),
            LookupOutcome::Success("Word: walk".to_string()),
        );
    let (mut router, presenter, rx) = setup(lookup);

    router.handle(selected("run"));
    router.handle(selected("walk"));
    let run = presenter.confirmation_for("run");
    let walk = presenter.confirmation_for("walk");
    assert_eq!(router.in_flight(), 2);

    router.handle(AppEvent::ConfirmationAnswered {
        request: run,
        choice: UserChoice::Yes,
    });
    router.handle(AppEvent::ConfirmationAnswered {
        request: walk,
        choice: UserChoice::Yes,
    });

    // walk is faster, so it lands first
    let first = next_event(&rx).await;
    assert!(matches!(first, AppEvent::LookupFinished { request, .. } if request == walk));
    router.handle(first);
    assert_eq!(router.phase(run), Some(RequestPhase::LookingUp));

    router.handle(next_event(&rx).await);

    let bodies: Vec<String> = presenter
        .opened_surfaces()
        .into_iter()
        .map(|(_, body)| body)
        .collect();
    assert_eq!(bodies, vec!["Word: walk".to_string(), "Word: run".to_string()]);
    assert_eq!(router.surfaces().len(), 2);
    assert_eq!(router.in_flight(), 0);
}

#[tokio::test]
async fn test_dismiss_is_idempotent_and_independent() {
    let lookup = ScriptedLookup::default()
        .with("run", Duration::ZERO, LookupOutcome::Success("Word: run".into()))
        .with("walk", Duration::ZERO, LookupOutcome::Success("Word: walk".into()));
    let (mut router, presenter, rx) = setup(lookup);

    for word in ["run", "walk"] {
        router.handle(selected(word));
        let request = presenter.confirmation_for(word);
        router.handle(AppEvent::ConfirmationAnswered {
            request,
            choice: UserChoice::Yes,
        });
        router.handle(next_event(&rx).await);
    }

    let opened = presenter.opened_surfaces();
    let (run_id, walk_id) = (opened[0].0, opened[1].0);

    router.handle(AppEvent::SurfaceDismissed(run_id));
    router.handle(AppEvent::SurfaceDismissed(run_id));

    assert_eq!(
        presenter.count(|c| *c == Call::CloseSurface(run_id)),
        1,
        "surface closed exactly once"
    );
    assert!(!router.surfaces().contains(run_id));
    assert!(router.surfaces().contains(walk_id));
}

#[tokio::test]
async fn test_failed_surface_falls_back_to_notice() {
    let lookup =
        ScriptedLookup::default().with("run", Duration::ZERO, LookupOutcome::Success("x".into()));
    let (tx, rx) = kanal::unbounded_async();
    let presenter = FakePresenter {
        fail_surfaces: true,
        ..FakePresenter::default()
    };
    let mut router = EventRouter::new(presenter.clone(), Arc::new(lookup), Handle::current(), tx);

    router.handle(selected("run"));
    let request = presenter.confirmation_for("run");
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });
    router.handle(next_event(&rx).await);

    assert!(router.surfaces().is_empty());
    let notices = presenter.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("Could not open result window"));
}

#[tokio::test]
async fn test_panicking_lookup_still_reports_error() {
    let (mut router, presenter, rx) = setup(PanickingLookup);

    router.handle(selected("run"));
    let request = presenter.confirmation_for("run");
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });

    match next_event(&rx).await {
        AppEvent::LookupFinished {
            outcome: LookupOutcome::Error(message),
            ..
        } => assert!(message.starts_with("Lookup task failed")),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_stale_answers_are_ignored() {
    let (mut router, presenter, rx) = setup(ScriptedLookup::default());

    router.handle(selected("run"));
    let request = presenter.confirmation_for("run");
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });
    router.handle(AppEvent::ConfirmationAnswered {
        request,
        choice: UserChoice::Yes,
    });

    assert_eq!(presenter.count(|c| matches!(c, Call::ShowIndicator(_))), 1);

    router.handle(next_event(&rx).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.is_empty(), "only one lookup dispatched");
}

#[tokio::test]
async fn test_hotkey_failure_reported_once() {
    let (mut router, presenter, _rx) = setup(ScriptedLookup::default());
    assert_eq!(router.hotkey(), &HotkeyRegistration::Pending);

    router.handle(AppEvent::HotkeyFailed {
        combination: "CmdOrCtrl+Shift+D".into(),
        reason: "already taken".into(),
    });
    router.handle(AppEvent::HotkeyFailed {
        combination: "CmdOrCtrl+Shift+D".into(),
        reason: "already taken".into(),
    });

    let notices = presenter.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Hotkey Error");
    assert_eq!(
        notices[0].message,
        "Failed to register global hotkey (CmdOrCtrl+Shift+D): already taken"
    );
    assert!(!router.hotkey().is_active());
    assert!(presenter
        .calls()
        .contains(&Call::Status("WordPeek - hotkey inactive".into())));

    // Pipeline still works with the hotkey down
    assert_eq!(router.handle(selected("run")), Flow::Continue);
    assert_eq!(router.in_flight(), 1);
}

#[tokio::test]
async fn test_hotkey_registered_updates_status() {
    let (mut router, presenter, _rx) = setup(ScriptedLookup::default());

    router.handle(AppEvent::HotkeyRegistered {
        combination: "Ctrl+Shift+D".into(),
    });

    assert!(router.hotkey().is_active());
    assert!(presenter.calls().contains(&Call::Status(
        "WordPeek - press Ctrl+Shift+D to look up selection".into()
    )));
    assert!(presenter.notices().is_empty());
}

#[tokio::test]
async fn test_empty_selection_notice() {
    let (mut router, presenter, _rx) = setup(ScriptedLookup::default());

    router.handle(AppEvent::SelectionEmpty);

    let notices = presenter.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "No selection");
    assert_eq!(router.in_flight(), 0);
}

#[tokio::test]
async fn test_run_loop_tears_down_on_quit() {
    let lookup = ScriptedLookup::default().with(
        "run",
        Duration::ZERO,
        LookupOutcome::Success("Word: run".into()),
    );
    let (tx, rx) = kanal::unbounded_async();
    let presenter = FakePresenter::default();
    let router = EventRouter::new(
        presenter.clone(),
        Arc::new(lookup),
        Handle::current(),
        tx.clone(),
    );

    let driver = {
        let presenter = presenter.clone();
        let tx = tx.clone();
        async move {
            tx.send(selected("run")).await.unwrap();
            tx.send(selected("walk")).await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            let request = presenter.confirmation_for("run");
            tx.send(AppEvent::ConfirmationAnswered {
                request,
                choice: UserChoice::Yes,
            })
            .await
            .unwrap();

            timeout(Duration::from_secs(2), async {
                while presenter.opened_surfaces().is_empty() {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            })
            .await
            .expect("surface never opened");

            tx.send(AppEvent::Quit).await.unwrap();
        }
    };

    let (result, ()) = tokio::join!(router.run(rx), driver);
    result.unwrap();

    let calls = presenter.calls();
    let surface = presenter.opened_surfaces()[0].0;
    assert!(calls.contains(&Call::CloseSurface(surface)));
    assert_eq!(calls.last(), Some(&Call::Quit));
}

#[tokio::test]
async fn test_selection_text_stays_out_of_info_logs() {
    let (logs, _guard) = LogCapture::install();
    let lookup = ScriptedLookup::default()
        .with("hunter2-secret", Duration::ZERO, LookupOutcome::NotFound)
        .with("correct-horse", Duration::ZERO, LookupOutcome::Success("Word: x".into()));
    let (mut router, presenter, rx) = setup(lookup);

    for text in ["hunter2-secret", "correct-horse"] {
        router.handle(selected(text));
        let request = presenter.confirmation_for(text);
        router.handle(AppEvent::ConfirmationAnswered {
            request,
            choice: UserChoice::Yes,
        });
        let finished = next_event(&rx).await;
        router.handle(finished);
    }

    let output = logs.output();
    assert!(output.contains("[ROUTER]"), "nothing captured: {output}");
    assert!(!output.contains("hunter2-secret"), "{output}");
    assert!(!output.contains("correct-horse"), "{output}");
}
