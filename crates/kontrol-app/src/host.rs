//! Terminal host: one widget mount driven by stdin.
//!
//! Runs on a single thread. Input lines and responder settlements are
//! multiplexed with `select!`, so every controller mutation happens here.

use kontrol_assistant::{AssistantController, RejectReason, SubmitOutcome};
use kontrol_common::{PanelVisibility, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Toggle,
    Close,
    Suggest(usize),
    Theme(Theme),
    Show,
    Snapshot,
    Quit,
    Submit(String),
}

/// Lines starting with `/` are commands; anything else is a question.
pub(crate) fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Submit(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("toggle", None) => Ok(Command::Toggle),
        ("close", None) => Ok(Command::Close),
        ("show", None) => Ok(Command::Show),
        ("json", None) => Ok(Command::Snapshot),
        ("quit" | "exit", None) => Ok(Command::Quit),
        ("suggest", Some(n)) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| Command::Suggest(n - 1))
            .ok_or_else(|| format!("número de sugerencia inválido: {n}")),
        ("theme", Some(t)) => t.parse::<Theme>().map(Command::Theme),
        _ => Err(format!("comando desconocido: /{rest}")),
    }
}

pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Apply one input line to the widget and print the result.
pub(crate) fn handle_line(controller: &mut AssistantController, line: &str) -> Flow {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(msg) => {
            println!("{msg}");
            return Flow::Continue;
        }
    };

    match command {
        Command::Quit => return Flow::Quit,
        Command::Toggle => {
            controller.toggle_panel();
            println!("{}", render::panel(controller));
        }
        Command::Close => {
            controller.close_panel();
            println!("{}", render::panel(controller));
        }
        Command::Show => println!("{}", render::panel(controller)),
        Command::Snapshot => match serde_json::to_string_pretty(&controller.snapshot_json()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("failed to render snapshot: {e}"),
        },
        Command::Theme(theme) => {
            controller.set_theme(theme);
            println!("tema: {theme}");
        }
        Command::Suggest(index) => {
            if controller.apply_suggestion(index) {
                submit(controller);
            } else {
                println!("no hay sugerencia {}", index + 1);
            }
        }
        Command::Submit(text) => {
            controller.set_draft(text);
            submit(controller);
        }
    }
    Flow::Continue
}

fn submit(controller: &mut AssistantController) {
    if controller.visibility() == PanelVisibility::Collapsed {
        println!("{}", render::panel(controller));
        return;
    }
    match controller.submit_draft() {
        SubmitOutcome::Accepted(_) => {
            if let Some(message) = controller.transcript().last() {
                println!("{}", render::message_line(message));
            }
            println!("...");
        }
        SubmitOutcome::Rejected(RejectReason::AwaitingResponse) => {
            println!("espera a que llegue la respuesta anterior");
        }
        SubmitOutcome::Rejected(RejectReason::TooLong) => {
            println!("la pregunta es demasiado larga");
        }
        SubmitOutcome::Rejected(RejectReason::Empty) => {}
    }
}

/// Run until stdin closes or `/quit`.
pub(crate) async fn run(mut controller: AssistantController) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::panel(&controller));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = handle_line(&mut controller, &line) {
                    break;
                }
            }
            settled = controller.next_settlement(), if controller.awaiting_response() => {
                if settled {
                    if let Some(message) = controller.transcript().last() {
                        println!("{}", render::message_line(message));
                    }
                }
            }
        }
    }

    controller.unmount();
    Ok(())
}
