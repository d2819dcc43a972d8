//! Controller struct, mounting, accessors and theme preference.

use std::sync::Arc;

use kontrol_common::{
    ConfigError, EventBus, PanelVisibility, Theme, WidgetEvent, WidgetId,
};
use kontrol_config::schema::AssistantConfig;
use kontrol_config::{validation, MemoryPreferenceStore, PreferenceStore};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::hooks::{NoopHooks, WidgetHooks};
use crate::message::Message;
use crate::sections::{context_for, SectionContext};
use crate::Responder;

use super::types::{Settlement, WidgetSnapshot};

/// Capacity of the outbound widget event channel.
const EVENT_CAPACITY: usize = 64;

/// One mounted assistant widget.
pub struct AssistantController {
    pub(super) id: WidgetId,
    pub(super) config: AssistantConfig,
    pub(super) context: &'static SectionContext,
    /// Suggestion chips: configured ones, or the section defaults.
    pub(super) suggestions: Vec<String>,
    pub(super) visibility: PanelVisibility,
    /// Append-only.
    pub(super) transcript: Vec<Message>,
    /// Request number of the outstanding responder call, if any.
    pub(super) in_flight: Option<u64>,
    pub(super) next_request: u64,
    pub(super) next_message: u64,
    pub(super) draft: String,
    pub(super) theme: Theme,
    pub(super) responder: Arc<dyn Responder>,
    pub(super) preferences: Box<dyn PreferenceStore>,
    pub(super) hooks: Box<dyn WidgetHooks>,
    pub(super) events: EventBus,
    pub(super) settle_tx: mpsc::UnboundedSender<Settlement>,
    pub(super) settle_rx: mpsc::UnboundedReceiver<Settlement>,
}

/// Collects a widget's collaborators before mounting it.
pub struct ControllerBuilder {
    config: AssistantConfig,
    responder: Arc<dyn Responder>,
    preferences: Box<dyn PreferenceStore>,
    hooks: Box<dyn WidgetHooks>,
}

impl ControllerBuilder {
    pub fn preferences(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.preferences = Box::new(store);
        self
    }

    pub fn hooks(mut self, hooks: impl WidgetHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Validate the options, read the stored theme and create the widget
    /// with an empty transcript.
    pub fn mount(self) -> Result<AssistantController, ConfigError> {
        validation::validate_assistant(&self.config)?;

        let theme = match self.preferences.load_theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "failed to read theme preference, using default");
                Theme::default()
            }
        };

        let context = context_for(self.config.section);
        let suggestions = if self.config.suggested_questions.is_empty() {
            context.suggestions.iter().map(|s| s.to_string()).collect()
        } else {
            self.config.suggested_questions.clone()
        };

        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let controller = AssistantController {
            id: WidgetId::new(),
            visibility: PanelVisibility::from_default_open(self.config.default_open),
            config: self.config,
            context,
            suggestions,
            transcript: Vec::new(),
            in_flight: None,
            next_request: 1,
            next_message: 1,
            draft: String::new(),
            theme,
            responder: self.responder,
            preferences: self.preferences,
            hooks: self.hooks,
            events: EventBus::new(EVENT_CAPACITY),
            settle_tx,
            settle_rx,
        };

        info!(
            widget = %controller.id,
            section = %controller.config.section,
            visibility = ?controller.visibility,
            "assistant widget mounted"
        );
        Ok(controller)
    }
}

impl AssistantController {
    /// Start building a widget. Defaults: in-memory preferences, no hooks.
    pub fn builder(config: AssistantConfig, responder: Arc<dyn Responder>) -> ControllerBuilder {
        ControllerBuilder {
            config,
            responder,
            preferences: Box::new(MemoryPreferenceStore::new()),
            hooks: Box::new(NoopHooks),
        }
    }

    /// Mount with default collaborators.
    pub fn mount(
        config: AssistantConfig,
        responder: Arc<dyn Responder>,
    ) -> Result<Self, ConfigError> {
        Self::builder(config, responder).mount()
    }

    /// Tear the widget down. A responder call still in flight runs to
    /// completion but its result is discarded.
    pub fn unmount(self) {
        if self.in_flight.is_some() {
            debug!(widget = %self.id, "unmounting with a request in flight");
        }
        info!(widget = %self.id, "assistant widget unmounted");
    }

    // -- Getters --

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn awaiting_response(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn context(&self) -> &'static SectionContext {
        self.context
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Suggestion chips to show; empty once the conversation has started.
    pub fn visible_suggestions(&self) -> &[String] {
        if self.transcript.is_empty() {
            &self.suggestions
        } else {
            &[]
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Change the theme and write it to the preference store.
    ///
    /// A failed write is logged; the new theme still applies to this mount.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        if let Err(e) = self.preferences.save_theme(theme) {
            warn!(widget = %self.id, error = %e, "failed to persist theme preference");
        }
        self.events.publish(WidgetEvent::ThemeChanged(theme));
    }

    /// Receive widget events (visibility, transcript, loading, theme).
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            widget_id: self.id.clone(),
            visibility: self.visibility,
            position: self.config.position,
            theme: self.theme,
            title: self.context.title.to_string(),
            greeting: self.context.greeting.to_string(),
            messages: self.transcript.clone(),
            awaiting_response: self.awaiting_response(),
            suggestions: self.visible_suggestions().to_vec(),
            draft: self.draft.clone(),
        }
    }

    /// Snapshot as JSON, for renderers fed over IPC.
    pub fn snapshot_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_else(|e| {
            warn!(widget = %self.id, error = %e, "failed to serialize widget snapshot");
            serde_json::Value::Null
        })
    }
}
