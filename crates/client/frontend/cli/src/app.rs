//! Terminal application: wires the session to the screen and the keyboard.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use runtime::{FileStateRepository, GameSession, RuntimeConfig, SessionInput};
use tokio::sync::mpsc::Receiver;
use tokio::time;

use crate::CliConfig;
use crate::input::{InputHandler, KeyAction};
use crate::presentation::TerminalTarget;
use crate::presentation::terminal::{self, TerminalGuard};

const FRAME_INTERVAL_MS: u64 = 16;

/// Terminal host owning the game session for the lifetime of the process.
pub struct CliApp {
    cli: CliConfig,
    runtime: RuntimeConfig,
}

impl CliApp {
    pub fn new(cli: CliConfig, runtime: RuntimeConfig) -> Self {
        Self { cli, runtime }
    }

    pub async fn run(self) -> Result<()> {
        let repository = Arc::new(FileStateRepository::new(
            &self.runtime.persistence.save_dir,
        )?);
        tracing::info!(
            save_dir = %repository.base_dir().display(),
            "save slots ready"
        );
        let mut session = GameSession::new(self.runtime, repository)?;

        let tui = terminal::init()?;
        let _guard = TerminalGuard;
        let target = TerminalTarget::new(tui, self.cli.damage_display);

        // `_inputs` keeps the channel open; the surface listeners only hold
        // weak senders.
        let (_inputs, mut rx) = session.start(target.clone()).await?;
        let mut input = InputHandler::new(session.surface().size());
        session.surface_mut().emit_cell_enter(input.focus())?;
        session.pump(&mut rx).await?;
        target.flush();

        loop {
            time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;

            let mut dirty = false;
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let action = input.handle_key(key);
                        if action == KeyAction::Quit {
                            tracing::info!("quit requested");
                            return Ok(());
                        }
                        dirty |= dispatch(&mut session, action)?;
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            if dirty {
                settle(&mut session, &mut input, &mut rx).await?;
                target.flush();
            }
        }
    }
}

/// Forwards a key action to the surface as the matching pointer or menu event.
fn dispatch(session: &mut GameSession, action: KeyAction) -> Result<bool> {
    let surface = session.surface_mut();
    match action {
        KeyAction::Hover { from, to } => {
            surface.emit_cell_leave(from)?;
            surface.emit_cell_enter(to)?;
        }
        KeyAction::Click(index) => surface.emit_cell_click(index)?,
        KeyAction::NewGame => surface.emit_new_game()?,
        KeyAction::SaveGame => surface.emit_save_game()?,
        KeyAction::LoadGame => surface.emit_load_game()?,
        KeyAction::Quit | KeyAction::None => return Ok(false),
    }
    Ok(true)
}

/// Drains queued inputs, then re-enters the focus if a new game or a load
/// reset the hover state or changed the board size under it.
async fn settle(
    session: &mut GameSession,
    input: &mut InputHandler,
    rx: &mut Receiver<SessionInput>,
) -> Result<()> {
    session.pump(rx).await?;

    let size = session.surface().size();
    let focused = session
        .surface()
        .cell(input.focus())
        .map(|cell| cell.is_entered())
        .unwrap_or(false);
    if input.resize(size) || !focused {
        session.surface_mut().emit_cell_enter(input.focus())?;
        session.pump(rx).await?;
    }
    Ok(())
}
