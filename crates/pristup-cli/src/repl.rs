//! Subcommand: `pristup run` -- interactive prompt.
//!
//! Each line is resolved, applied to an in-process presentation state, and
//! answered with a confirmation, the help menu, or a forwarding notice.

use std::io::{self, BufRead, Write as _};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use pristup_intent::{
    ActionDispatcher, HELP_SENTINEL, IntentResolutionEngine, PresentationState, RoutingDecision,
};

use crate::helpers::help_menu;

/// What the prompt prints for a routing decision.
pub fn respond(decision: &RoutingDecision, dispatcher: &ActionDispatcher) -> String {
    match decision {
        RoutingDecision::Execute(intent) => match dispatcher.apply(intent) {
            Some(message) if message == HELP_SENTINEL => help_menu(),
            Some(message) => message,
            None => forward_notice(),
        },
        RoutingDecision::Clarify => help_menu(),
        RoutingDecision::PassThrough => forward_notice(),
    }
}

fn forward_notice() -> String {
    "(nije zahtjev za pristupačnost, poruka se prosljeđuje razgovoru)".to_owned()
}

/// Run the interactive prompt until EOF or `quit`.
pub async fn cmd_run(engine: IntentResolutionEngine) -> Result<()> {
    let state = Arc::new(PresentationState::new());
    let dispatcher = ActionDispatcher::new(state.clone());

    println!();
    println!("  Pristup v{}", env!("CARGO_PKG_VERSION"));
    if !engine.has_analyzer() {
        println!("  Remote analysis is off; only the quick phrases are recognised.");
    }
    println!("  Type a message, 'state' to see the presentation, or 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read input")?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            info!("user requested exit");
            break;
        }
        if trimmed == "state" {
            let snapshot = state.snapshot();
            println!(
                "  font: {} ({:?}), family: {:?}, dark theme: {}",
                snapshot.font_scale.css_size(),
                snapshot.font_scale,
                snapshot.font_family,
                snapshot.dark_theme,
            );
            continue;
        }

        let decision = engine.resolve(trimmed).await;
        println!("{}", respond(&decision, &dispatcher));
    }

    Ok(())
}
