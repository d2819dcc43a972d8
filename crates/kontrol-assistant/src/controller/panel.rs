//! Panel visibility transitions.

use kontrol_common::{PanelVisibility, WidgetEvent};
use tracing::debug;

use super::manager::AssistantController;

impl AssistantController {
    /// Flip between collapsed and expanded.
    pub fn toggle_panel(&mut self) -> PanelVisibility {
        self.visibility = self.visibility.toggled();
        debug!(widget = %self.id, visibility = ?self.visibility, "panel toggled");
        self.events
            .publish(WidgetEvent::VisibilityChanged(self.visibility));
        self.hooks.on_toggle(self.visibility);
        self.visibility
    }

    /// Collapse the panel. No-op when already collapsed.
    pub fn close_panel(&mut self) -> PanelVisibility {
        if self.visibility == PanelVisibility::Expanded {
            self.visibility = PanelVisibility::Collapsed;
            debug!(widget = %self.id, "panel dismissed");
            self.events
                .publish(WidgetEvent::VisibilityChanged(self.visibility));
            self.hooks.on_dismiss();
        }
        self.visibility
    }
}
