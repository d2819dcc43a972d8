use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::MessageId;
use crate::types::{PanelVisibility, Role, Theme};

/// State changes a widget publishes to subscribed renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WidgetEvent {
    VisibilityChanged(PanelVisibility),
    MessageAppended {
        id: MessageId,
        role: Role,
        is_error: bool,
    },
    AwaitingChanged(bool),
    ThemeChanged(Theme),
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: WidgetEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
