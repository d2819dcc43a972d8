//! Capability callbacks a host passes into the widget.

use kontrol_common::PanelVisibility;

use crate::message::Message;

/// Host callbacks fired after the controller changes state.
///
/// Every method defaults to a no-op, so hosts implement only what they need.
pub trait WidgetHooks: Send {
    /// Panel visibility flipped through `toggle_panel`.
    fn on_toggle(&mut self, _visibility: PanelVisibility) {}

    /// A user message was accepted and appended.
    fn on_submit(&mut self, _message: &Message) {}

    /// An expanded panel was closed.
    fn on_dismiss(&mut self) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl WidgetHooks for NoopHooks {}
