//! Main TUI runner - terminal lifecycle and event loop

use factfinder_app::{Engine, ProviderRegistry};
use factfinder_core::prelude::*;

use crate::{event, render, terminal};

/// Run the panel until the user quits or a shutdown signal arrives.
///
/// Mounts a panel on `engine`, drives the draw/poll loop, and always
/// unmounts and restores the terminal before returning.
pub fn run<R>(mut engine: Engine<R>) -> Result<()>
where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    engine.spawn_signal_handler();
    let panel_id = engine.mount_panel();
    info!("Mounted {}", panel_id);

    let result = run_loop(&mut term, &mut engine);
    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    engine.shutdown();
    terminal::restore();
    result
}

fn run_loop<R>(term: &mut ratatui::DefaultTerminal, engine: &mut Engine<R>) -> Result<()>
where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    while !engine.should_quit() {
        // Push events, fetch results and signals
        engine.drain_pending_messages();

        term.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
