//! Main TUI runner - entry point and event loop
//!
//! The Engine owns state, the sync loop and the signal handler; this module
//! adds the terminal: draw, poll keys, feed messages back into the Engine.

use pivot_api::EngineApi;
use pivot_app::Engine;
use pivot_core::prelude::*;

use crate::{event, render};

/// Run the TUI until the user quits or a signal arrives
pub async fn run<A>(mut engine: Engine<A>) -> Result<()>
where
    A: EngineApi + Send + Sync + 'static,
{
    restore_terminal_on_panic();
    let mut term = ratatui::init();
    info!("TUI started");

    let result = run_loop(&mut term, &mut engine);
    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }

    engine.shutdown().await;
    ratatui::restore();
    info!("TUI stopped");

    result
}

/// Chain a panic hook that leaves raw mode and the alternate screen before
/// the default hook prints, so the panic message stays readable
fn restore_terminal_on_panic() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        previous(info);
    }));
}

/// Main event loop
fn run_loop<A>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<A>) -> Result<()>
where
    A: EngineApi + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Sync results, action outcomes and signals
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
