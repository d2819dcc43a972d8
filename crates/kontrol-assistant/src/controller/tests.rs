//! Tests for the controller state machine.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kontrol_common::{PanelVisibility, Role, Section, Theme, WidgetEvent};
use kontrol_config::schema::AssistantConfig;
use kontrol_config::MemoryPreferenceStore;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{oneshot, Notify};

use super::*;
use crate::hooks::WidgetHooks;
use crate::message::Message;
use crate::{Reply, Responder, ResponderError, Visualization};

// =============================================================================
// FAKES
// =============================================================================

/// Answers `re: <question>` immediately.
struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        Ok(Reply::text(format!("re: {question}")))
    }
}

/// Always fails.
struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn respond(&self, _question: &str) -> Result<Reply, ResponderError> {
        Err(ResponderError::Network("connection refused".into()))
    }
}

/// Holds every answer until the gate is opened.
struct GatedResponder {
    gate: Arc<Notify>,
}

#[async_trait]
impl Responder for GatedResponder {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        self.gate.notified().await;
        Ok(Reply::text(format!("late: {question}")))
    }
}

/// Panics instead of answering.
struct PanickingResponder;

#[async_trait]
impl Responder for PanickingResponder {
    async fn respond(&self, _question: &str) -> Result<Reply, ResponderError> {
        panic!("backend client bug");
    }
}

/// Waits for the gate, answers, then reports the question it answered.
struct ReportingResponder {
    gate: Arc<Notify>,
    done: Mutex<Option<oneshot::Sender<String>>>,
}

#[async_trait]
impl Responder for ReportingResponder {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        self.gate.notified().await;
        if let Some(done) = self.done.lock().unwrap().take() {
            let _ = done.send(question.to_string());
        }
        Ok(Reply::text(format!("late: {question}")))
    }
}

#[derive(Clone, Default)]
struct RecordingHooks {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingHooks {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl WidgetHooks for RecordingHooks {
    fn on_toggle(&mut self, visibility: PanelVisibility) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("toggle:{visibility:?}"));
    }

    fn on_submit(&mut self, message: &Message) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("submit:{}", message.content()));
    }

    fn on_dismiss(&mut self) {
        self.calls.lock().unwrap().push("dismiss".into());
    }
}

fn mount_with(responder: impl Responder + 'static) -> AssistantController {
    AssistantController::mount(AssistantConfig::default(), Arc::new(responder)).unwrap()
}

// =============================================================================
// MOUNTING
// =============================================================================

#[test]
fn mounts_collapsed_with_empty_transcript() {
    let controller = mount_with(EchoResponder);
    assert_eq!(controller.visibility(), PanelVisibility::Collapsed);
    assert!(controller.transcript().is_empty());
    assert!(!controller.awaiting_response());
    assert_eq!(controller.draft(), "");
}

#[test]
fn default_open_mounts_expanded() {
    let config = AssistantConfig {
        default_open: true,
        ..Default::default()
    };
    let controller = AssistantController::mount(config, Arc::new(EchoResponder)).unwrap();
    assert_eq!(controller.visibility(), PanelVisibility::Expanded);
}

#[test]
fn invalid_config_is_rejected_at_mount() {
    let config = AssistantConfig {
        max_input_len: 0,
        ..Default::default()
    };
    let err = AssistantController::mount(config, Arc::new(EchoResponder))
        .err()
        .unwrap();
    assert!(err.to_string().contains("assistant.max_input_len"));
}

#[test]
fn suggestions_default_to_section_copy() {
    let config = AssistantConfig {
        section: Section::Wallets,
        ..Default::default()
    };
    let controller = AssistantController::mount(config, Arc::new(EchoResponder)).unwrap();
    assert_eq!(controller.context().title, "Asistente de Wallets");
    assert_eq!(
        controller.visible_suggestions()[0],
        "Analiza mi red de wallets"
    );
}

#[test]
fn configured_suggestions_override_section_copy() {
    let config = AssistantConfig {
        suggested_questions: vec!["¿Cuál es mi PnL?".into()],
        ..Default::default()
    };
    let controller = AssistantController::mount(config, Arc::new(EchoResponder)).unwrap();
    assert_eq!(controller.visible_suggestions(), ["¿Cuál es mi PnL?"]);
}

#[test]
fn theme_is_read_from_store_on_mount() {
    let store = MemoryPreferenceStore::with_theme(Theme::Light);
    let controller = AssistantController::builder(AssistantConfig::default(), Arc::new(EchoResponder))
        .preferences(store)
        .mount()
        .unwrap();
    assert_eq!(controller.theme(), Theme::Light);
}

// =============================================================================
// PANEL
// =============================================================================

#[test]
fn toggle_twice_returns_to_collapsed() {
    let mut controller = mount_with(EchoResponder);
    assert_eq!(controller.toggle_panel(), PanelVisibility::Expanded);
    assert_eq!(controller.toggle_panel(), PanelVisibility::Collapsed);
}

#[test]
fn close_from_any_state_collapses() {
    let mut controller = mount_with(EchoResponder);
    assert_eq!(controller.close_panel(), PanelVisibility::Collapsed);

    controller.toggle_panel();
    assert_eq!(controller.close_panel(), PanelVisibility::Collapsed);
    assert_eq!(controller.visibility(), PanelVisibility::Collapsed);
}

#[tokio::test]
async fn panel_transitions_leave_transcript_alone() {
    let mut controller = mount_with(EchoResponder);
    controller.submit_message("hola");
    controller.toggle_panel();
    controller.close_panel();
    assert_eq!(controller.transcript().len(), 1);
    assert!(controller.awaiting_response());
}

#[tokio::test]
async fn message_activity_does_not_change_visibility() {
    let mut controller = mount_with(EchoResponder);
    controller.submit_message("hola");
    controller.next_settlement().await;
    assert_eq!(controller.visibility(), PanelVisibility::Collapsed);
}

#[test]
fn hooks_fire_on_toggle_and_dismiss() {
    let hooks = RecordingHooks::default();
    let mut controller = AssistantController::builder(AssistantConfig::default(), Arc::new(EchoResponder))
        .hooks(hooks.clone())
        .mount()
        .unwrap();

    controller.close_panel(); // already collapsed: no dismiss
    controller.toggle_panel();
    controller.close_panel();

    assert_eq!(hooks.calls(), vec!["toggle:Expanded", "dismiss"]);
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[tokio::test]
async fn successful_answer_is_appended() {
    let mut controller = mount_with(EchoResponder);

    let outcome = controller.submit_message("¿Cómo va mi cartera?");
    assert!(outcome.is_accepted());
    assert_eq!(controller.transcript().len(), 1);
    assert!(controller.awaiting_response());

    assert!(controller.next_settlement().await);

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role(), Role::User);
    assert_eq!(transcript[1].role(), Role::Assistant);
    assert_eq!(transcript[1].content(), "re: ¿Cómo va mi cartera?");
    assert!(!transcript[1].is_error());
    assert!(!controller.awaiting_response());
}

#[tokio::test]
async fn attachments_pass_through() {
    struct ChartResponder;

    #[async_trait]
    impl Responder for ChartResponder {
        async fn respond(&self, _question: &str) -> Result<Reply, ResponderError> {
            Ok(Reply::text("X").with_attachments(vec![Visualization::new(
                serde_json::json!({"kind": "pie", "series": [40, 60]}),
            )]))
        }
    }

    let mut controller = mount_with(ChartResponder);
    controller.submit_message("reparto");
    controller.next_settlement().await;

    let answer = &controller.transcript()[1];
    assert_eq!(answer.content(), "X");
    assert_eq!(answer.attachments().len(), 1);
    assert_eq!(answer.attachments()[0].as_value()["kind"], "pie");
    assert!(!answer.is_error());
}

#[tokio::test]
async fn failure_appends_fallback_and_clears_flag() {
    let mut controller = mount_with(FailingResponder);

    controller.submit_message("test");
    controller.next_settlement().await;

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].content(), "test");
    assert_eq!(transcript[1].role(), Role::Assistant);
    assert!(transcript[1].is_error());
    assert_eq!(
        transcript[1].content(),
        kontrol_config::schema::DEFAULT_FALLBACK_TEXT
    );
    assert!(!controller.awaiting_response());
}

#[tokio::test]
async fn custom_fallback_text_is_used() {
    let config = AssistantConfig {
        fallback_text: "Servicio no disponible".into(),
        ..Default::default()
    };
    let mut controller = AssistantController::mount(config, Arc::new(FailingResponder)).unwrap();
    controller.submit_message("test");
    controller.next_settlement().await;
    assert_eq!(controller.transcript()[1].content(), "Servicio no disponible");
}

#[tokio::test]
async fn controller_recovers_after_failure() {
    let mut controller = mount_with(FailingResponder);
    controller.submit_message("uno");
    controller.next_settlement().await;

    assert!(controller.submit_message("dos").is_accepted());
    controller.next_settlement().await;
    assert_eq!(controller.transcript().len(), 4);
}

#[tokio::test]
async fn submission_while_awaiting_is_rejected() {
    let gate = Arc::new(Notify::new());
    let mut controller = mount_with(GatedResponder { gate: gate.clone() });

    assert!(controller.submit_message("primera").is_accepted());
    let second = controller.submit_message("segunda");
    assert_eq!(second, SubmitOutcome::Rejected(RejectReason::AwaitingResponse));
    assert_eq!(controller.transcript().len(), 1);

    gate.notify_one();
    controller.next_settlement().await;
    assert_eq!(controller.transcript().len(), 2);
    assert_eq!(controller.transcript()[1].content(), "late: primera");
}

#[tokio::test]
async fn blank_and_oversized_text_is_rejected() {
    let config = AssistantConfig {
        max_input_len: 10,
        ..Default::default()
    };
    let mut controller = AssistantController::mount(config, Arc::new(EchoResponder)).unwrap();

    assert_eq!(
        controller.submit_message(""),
        SubmitOutcome::Rejected(RejectReason::Empty)
    );
    assert_eq!(
        controller.submit_message("   \n"),
        SubmitOutcome::Rejected(RejectReason::Empty)
    );
    assert_eq!(
        controller.submit_message("esto es demasiado largo"),
        SubmitOutcome::Rejected(RejectReason::TooLong)
    );
    assert!(controller.transcript().is_empty());
    assert!(!controller.awaiting_response());

    // Ten characters, multi-byte included, is still accepted
    assert!(controller.submit_message("¿qué tal?¿").is_accepted());
}

#[tokio::test]
async fn sequential_submissions_alternate_in_call_order() {
    let mut controller = mount_with(EchoResponder);
    let questions = ["uno", "dos", "tres", "cuatro", "cinco"];

    for q in questions {
        assert!(controller.submit_message(q).is_accepted());
        assert!(controller.next_settlement().await);
    }

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), questions.len() * 2);
    for (i, q) in questions.iter().enumerate() {
        let user = &transcript[i * 2];
        let answer = &transcript[i * 2 + 1];
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.content(), *q);
        assert_eq!(answer.role(), Role::Assistant);
        assert_eq!(answer.content(), format!("re: {q}"));
    }

    let ids: Vec<_> = transcript.iter().map(|m| m.id()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn next_settlement_without_request_returns_false() {
    let mut controller = mount_with(EchoResponder);
    assert!(!controller.next_settlement().await);
}

#[tokio::test]
async fn poll_settlements_applies_arrived_results() {
    let mut controller = mount_with(EchoResponder);
    controller.submit_message("hola");
    assert_eq!(controller.poll_settlements(), 0);

    let mut applied = 0;
    for _ in 0..50 {
        tokio::task::yield_now().await;
        applied = controller.poll_settlements();
        if applied > 0 {
            break;
        }
    }
    assert_eq!(applied, 1);
    assert_eq!(controller.transcript().len(), 2);
    assert!(!controller.awaiting_response());
}

#[tokio::test]
async fn unmount_mid_request_drops_late_reply() {
    let gate = Arc::new(Notify::new());
    let (done_tx, done_rx) = oneshot::channel();
    let responder = Arc::new(ReportingResponder {
        gate: gate.clone(),
        done: Mutex::new(Some(done_tx)),
    });
    let responder_dyn: Arc<dyn Responder> = responder.clone();
    let mut controller = AssistantController::mount(AssistantConfig::default(), responder_dyn).unwrap();
    let mut events = controller.subscribe();

    assert!(controller.submit_message("hola").is_accepted());
    controller.unmount();

    // The call is not cancelled by unmount and still runs to completion
    gate.notify_one();
    let answered = tokio::time::timeout(Duration::from_secs(1), done_rx)
        .await
        .expect("responder never finished")
        .unwrap();
    assert_eq!(answered, "hola");

    // Wait for the spawned call to release its responder handle
    for _ in 0..50 {
        tokio::task::yield_now().await;
        if Arc::strong_count(&responder) == 1 {
            break;
        }
    }
    assert_eq!(Arc::strong_count(&responder), 1);

    // Only the submission is visible; the late reply never reached the widget
    assert!(matches!(
        events.try_recv(),
        Ok(WidgetEvent::MessageAppended { role: Role::User, .. })
    ));
    assert!(matches!(events.try_recv(), Ok(WidgetEvent::AwaitingChanged(true))));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Closed)));
}

#[tokio::test]
async fn panicking_responder_settles_with_fallback() {
    let mut controller = mount_with(PanickingResponder);

    assert!(controller.submit_message("hola").is_accepted());
    let settled = tokio::time::timeout(Duration::from_secs(1), controller.next_settlement())
        .await
        .expect("controller stuck awaiting a panicked responder");
    assert!(settled);

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].role(), Role::Assistant);
    assert!(transcript[1].is_error());
    assert_eq!(
        transcript[1].content(),
        AssistantConfig::default().fallback_text
    );
    assert!(!controller.awaiting_response());

    assert!(controller.submit_message("otra vez").is_accepted());
}

#[tokio::test]
async fn on_submit_hook_sees_user_message() {
    let hooks = RecordingHooks::default();
    let mut controller = AssistantController::builder(AssistantConfig::default(), Arc::new(EchoResponder))
        .hooks(hooks.clone())
        .mount()
        .unwrap();

    controller.submit_message("hola");
    controller.next_settlement().await;
    controller.submit_message("");

    assert_eq!(hooks.calls(), vec!["submit:hola"]);
}

// =============================================================================
// DRAFT & SUGGESTIONS
// =============================================================================

#[tokio::test]
async fn suggestion_fills_draft_and_submits() {
    let mut controller = mount_with(EchoResponder);

    assert!(controller.apply_suggestion(1));
    assert_eq!(controller.draft(), "Detecta duplicados o errores");

    assert!(controller.submit_draft().is_accepted());
    assert_eq!(controller.draft(), "");
    controller.next_settlement().await;

    assert!(controller.visible_suggestions().is_empty());
    assert!(!controller.apply_suggestion(0));
}

#[test]
fn apply_suggestion_out_of_range() {
    let mut controller = mount_with(EchoResponder);
    assert!(!controller.apply_suggestion(3));
    assert_eq!(controller.draft(), "");
}

#[tokio::test]
async fn rejected_draft_is_kept() {
    let gate = Arc::new(Notify::new());
    let mut controller = mount_with(GatedResponder { gate: gate.clone() });
    controller.submit_message("primera");

    controller.set_draft("segunda");
    assert!(!controller.submit_draft().is_accepted());
    assert_eq!(controller.draft(), "segunda");

    gate.notify_one();
    controller.next_settlement().await;
    assert!(controller.submit_draft().is_accepted());
    assert_eq!(controller.draft(), "");
}

#[test]
fn draft_editing() {
    let mut controller = mount_with(EchoResponder);
    controller.append_draft("hol");
    controller.append_draft("aa");
    controller.backspace_draft();
    assert_eq!(controller.draft(), "hola");
    controller.set_draft("");
    controller.backspace_draft();
    assert_eq!(controller.draft(), "");
}

// =============================================================================
// THEME, EVENTS, SNAPSHOT
// =============================================================================

#[test]
fn set_theme_writes_store() {
    let store = MemoryPreferenceStore::new();
    let mut controller = AssistantController::builder(AssistantConfig::default(), Arc::new(EchoResponder))
        .preferences(store.clone())
        .mount()
        .unwrap();

    assert_eq!(controller.theme(), Theme::Dark);
    controller.set_theme(Theme::Light);
    assert_eq!(controller.theme(), Theme::Light);
    assert_eq!(store.stored(), Some(Theme::Light));
}

#[tokio::test]
async fn events_follow_state_changes() {
    let mut controller = mount_with(EchoResponder);
    let mut rx = controller.subscribe();

    controller.toggle_panel();
    controller.submit_message("hola");
    controller.next_settlement().await;

    let events: Vec<WidgetEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert!(matches!(
        events[0],
        WidgetEvent::VisibilityChanged(PanelVisibility::Expanded)
    ));
    assert!(matches!(
        events[1],
        WidgetEvent::MessageAppended { role: Role::User, .. }
    ));
    assert!(matches!(events[2], WidgetEvent::AwaitingChanged(true)));
    assert!(matches!(
        events[3],
        WidgetEvent::MessageAppended {
            role: Role::Assistant,
            is_error: false,
            ..
        }
    ));
    assert!(matches!(events[4], WidgetEvent::AwaitingChanged(false)));
    assert_eq!(events.len(), 5);
}

#[tokio::test]
async fn snapshot_reflects_state() {
    let mut controller = mount_with(EchoResponder);
    let snap = controller.snapshot();
    assert_eq!(snap.title, "Asistente del Dashboard");
    assert_eq!(snap.suggestions.len(), 3);
    assert!(snap.messages.is_empty());

    controller.toggle_panel();
    controller.submit_message("hola");
    let snap = controller.snapshot();
    assert_eq!(snap.visibility, PanelVisibility::Expanded);
    assert!(snap.awaiting_response);
    assert_eq!(snap.messages.len(), 1);
    assert!(snap.suggestions.is_empty());

    let json = controller.snapshot_json();
    assert_eq!(json["visibility"], "expanded");
    assert_eq!(json["awaiting_response"], true);
    assert_eq!(json["messages"][0]["content"], "hola");
    assert_eq!(json["position"], "bottom_right");
}
