//! Plain-text rendering of widget state for the terminal host.

use kontrol_assistant::{AssistantController, Message};
use kontrol_common::{PanelVisibility, Role};

/// One transcript line, prefixed by its author.
pub(crate) fn message_line(message: &Message) -> String {
    let label = match (message.role(), message.is_error()) {
        (Role::User, _) => "tú",
        (Role::Assistant, false) => "asistente",
        (Role::Assistant, true) => "asistente (error)",
    };
    let mut line = format!("[{label}] {}", message.content());
    let attachments = message.attachments().len();
    if attachments > 0 {
        line.push_str(&format!("  (+{attachments} visualizaciones)"));
    }
    line
}

/// Panel header, greeting and (while the conversation is empty) the
/// numbered suggestion chips.
pub(crate) fn panel(controller: &AssistantController) -> String {
    let ctx = controller.context();
    match controller.visibility() {
        PanelVisibility::Collapsed => "(asistente cerrado; /toggle para abrir)".to_string(),
        PanelVisibility::Expanded => {
            let mut out = format!("== {} ==\n{}\n", ctx.title, ctx.greeting);
            let suggestions = controller.visible_suggestions();
            if !suggestions.is_empty() {
                out.push_str("Preguntas sugeridas:\n");
                for (i, s) in suggestions.iter().enumerate() {
                    out.push_str(&format!("  {}. {s}\n", i + 1));
                }
            }
            for message in controller.transcript() {
                out.push_str(&message_line(message));
                out.push('\n');
            }
            if controller.awaiting_response() {
                out.push_str("...\n");
            }
            out
        }
    }
}
