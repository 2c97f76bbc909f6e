//! Game session: wires the surface, the controller, the automated side,
//! persistence and the event bus into one turn loop.
//!
//! The session runs on a single task. Surface listeners never call back into
//! the session; they forward [`SessionInput`]s into an mpsc queue that
//! [`GameSession::run`] or [`GameSession::pump`] drains, so every input is
//! handled to completion (animations included) before the next one starts.
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc::{self, Receiver, Sender, WeakSender, error::TryRecvError};

use game_core::{CellIndex, GameState, Side};

use crate::api::{GameRules, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::controller::{ClickOutcome, InteractionController, InteractionState};
use crate::events::{EventBus, SessionEvent, TurnEvent};
use crate::repository::StateRepository;
use crate::strategy::{StrategyOutcome, StrategyProcedure};
use crate::surface::{AnimationCanceller, BoardSurface, MessageLevel, RenderTarget};

/// Raw input forwarded from the surface's event channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionInput {
    CellEnter(CellIndex),
    CellLeave(CellIndex),
    CellClick(CellIndex),
    NewGame,
    SaveGame,
    LoadGame,
}

/// One match from first render to game over, plus its lifecycle.
pub struct GameSession {
    config: RuntimeConfig,
    surface: BoardSurface,
    state: GameState,
    interaction: InteractionState,
    strategy: Option<StrategyProcedure>,
    repository: Arc<dyn StateRepository>,
    events: EventBus,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Deals a fresh match according to `config`.
    pub fn new(config: RuntimeConfig, repository: Arc<dyn StateRepository>) -> Result<Self> {
        let mut rng = match config.strategy.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let state = GameState::new_game(&config.game, &mut rng)?;
        let surface =
            BoardSurface::new(state.board().size())?.with_projectile_settings(config.projectile);
        let strategy = config.strategy.automated.map(|side| {
            StrategyProcedure::new(side, config.strategy.kind, config.strategy.seed)
        });

        Ok(Self {
            events: EventBus::with_capacity(config.event_buffer),
            config,
            surface,
            state,
            interaction: InteractionState::Idle,
            strategy,
            repository,
            rng,
        })
    }

    /// Replaces the dealt match before `start`.
    pub fn with_state(mut self, state: GameState) -> Result<Self> {
        self.surface.resize(state.board().size())?;
        self.state = state;
        Ok(self)
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Binds and renders the surface, paints the placement, and wires the six
    /// surface channels into an input queue.
    ///
    /// Listeners hold only a weak handle on the queue: the returned sender
    /// keeps it open, and dropping it ends [`GameSession::run`].
    pub async fn start(
        &mut self,
        target: impl RenderTarget + 'static,
    ) -> Result<(Sender<SessionInput>, Receiver<SessionInput>)> {
        self.surface.bind(target);
        self.surface.render(self.config.theme)?;
        self.controller().redraw()?;

        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        self.register_listeners(tx.downgrade());

        tracing::info!(
            size = self.state.board().size(),
            characters = self.state.positions().len(),
            automated = ?self.config.strategy.automated,
            "session started"
        );
        self.play_automated().await?;
        Ok((tx, rx))
    }

    fn register_listeners(&mut self, queue: WeakSender<SessionInput>) {
        let q = queue.clone();
        self.surface
            .on_cell_enter(move |index| forward(&q, SessionInput::CellEnter(index)));
        let q = queue.clone();
        self.surface
            .on_cell_leave(move |index| forward(&q, SessionInput::CellLeave(index)));
        let q = queue.clone();
        self.surface
            .on_cell_click(move |index| forward(&q, SessionInput::CellClick(index)));
        let q = queue.clone();
        self.surface
            .on_new_game(move || forward(&q, SessionInput::NewGame));
        let q = queue.clone();
        self.surface
            .on_save_game(move || forward(&q, SessionInput::SaveGame));
        self.surface
            .on_load_game(move || forward(&queue, SessionInput::LoadGame));
    }

    /// Handles inputs until every sender is dropped.
    pub async fn run(&mut self, mut inputs: Receiver<SessionInput>) -> Result<()> {
        while let Some(input) = inputs.recv().await {
            self.handle(input).await?;
        }
        tracing::debug!("session input queue closed");
        Ok(())
    }

    /// Handles every input already queued and returns how many ran.
    pub async fn pump(&mut self, inputs: &mut Receiver<SessionInput>) -> Result<usize> {
        let mut handled = 0;
        loop {
            match inputs.try_recv() {
                Ok(input) => {
                    self.handle(input).await?;
                    handled += 1;
                }
                Err(TryRecvError::Empty) => return Ok(handled),
                Err(TryRecvError::Disconnected) => {
                    return if handled == 0 {
                        Err(RuntimeError::InputChannelClosed)
                    } else {
                        Ok(handled)
                    };
                }
            }
        }
    }

    /// Handles one input to completion.
    pub async fn handle(&mut self, input: SessionInput) -> Result<()> {
        tracing::trace!(?input, "session input");
        match input {
            SessionInput::CellEnter(index) => {
                let interaction = &self.interaction;
                InteractionController::new(&mut self.surface, &mut self.state)
                    .enter(interaction, index)
            }
            SessionInput::CellLeave(index) => {
                let interaction = &self.interaction;
                InteractionController::new(&mut self.surface, &mut self.state)
                    .leave(interaction, index)
            }
            SessionInput::CellClick(index) => self.click(index).await,
            SessionInput::NewGame => self.new_game().await,
            SessionInput::SaveGame => self.save_game(),
            SessionInput::LoadGame => self.load_game().await,
        }
    }

    async fn click(&mut self, index: CellIndex) -> Result<()> {
        if let Some(winner) = self.state.winner() {
            tracing::debug!(%index, %winner, "click after game over ignored");
            return Ok(());
        }
        if self.is_automated(self.state.acting_side()) {
            tracing::debug!(%index, "click during automated turn ignored");
            return Ok(());
        }

        let interaction = std::mem::take(&mut self.interaction);
        let mut ctl = InteractionController::new(&mut self.surface, &mut self.state);
        let (next, outcome) = match ctl.click(interaction, index).await {
            Ok(result) => result,
            Err(err) => {
                ctl.reset()?;
                return Err(err);
            }
        };
        self.interaction = next;

        if let ClickOutcome::Committed(record) = outcome {
            self.events.publish(TurnEvent::Committed {
                record,
                next: self.state.acting_side(),
            });
            if !self.check_game_over()? {
                self.play_automated().await?;
            }
        }
        Ok(())
    }

    /// Plays one autonomous turn for the strategy's side.
    ///
    /// Returns `None` when no strategy is configured or it is not that side's
    /// turn. A side with no legal action passes.
    pub async fn request_strategy(&mut self) -> Result<Option<StrategyOutcome>> {
        let Some(strategy) = self.strategy.as_mut() else {
            return Ok(None);
        };
        if self.state.acting_side() != strategy.side() {
            return Ok(None);
        }

        let interaction = std::mem::take(&mut self.interaction);
        let mut ctl = InteractionController::new(&mut self.surface, &mut self.state);
        let (next, outcome) = strategy.request_strategy(&mut ctl, interaction).await?;
        self.interaction = next;

        match outcome {
            StrategyOutcome::Committed(record) => {
                self.events.publish(TurnEvent::Committed {
                    record,
                    next: self.state.acting_side(),
                });
            }
            StrategyOutcome::NoLegalAction => self.pass(),
        }
        Ok(Some(outcome))
    }

    /// Runs automated turns until a human side holds the turn or the game
    /// ends. Two passes in a row end the loop as a stalemate.
    async fn play_automated(&mut self) -> Result<()> {
        let mut passes = 0;
        while self.state.winner().is_none() && passes < 2 {
            let acting = self.state.acting_side();
            if self.is_automated(acting) {
                match self.request_strategy().await? {
                    Some(StrategyOutcome::Committed(_)) => passes = 0,
                    Some(StrategyOutcome::NoLegalAction) => passes += 1,
                    None => break,
                }
            } else if self.side_can_act(acting) {
                break;
            } else {
                self.pass();
                passes += 1;
            }
        }

        if passes >= 2 {
            tracing::warn!("neither side can act");
            self.surface
                .show_message(MessageLevel::Info, "Stalemate: neither side can act")?;
        }
        self.check_game_over()?;
        Ok(())
    }

    fn pass(&mut self) {
        let side = self.state.acting_side();
        self.state.advance_turn();
        tracing::warn!(%side, "turn passed");
        self.events.publish(TurnEvent::Passed { side });
    }

    fn side_can_act(&self, side: Side) -> bool {
        self.state
            .owned_positions(side)
            .into_iter()
            .any(|from| !self.state.reach(from).is_empty())
    }

    fn is_automated(&self, side: Side) -> bool {
        self.strategy.as_ref().is_some_and(|s| s.side() == side)
    }

    fn check_game_over(&mut self) -> Result<bool> {
        let Some(winner) = self.state.winner() else {
            return Ok(false);
        };
        tracing::info!(%winner, turns = self.state.turns().len(), "game over");
        self.surface
            .show_message(MessageLevel::Info, &format!("Game over: {winner} wins"))?;
        self.events.publish(SessionEvent::GameOver { winner });
        Ok(true)
    }

    // ===== lifecycle =====

    async fn new_game(&mut self) -> Result<()> {
        self.surface.canceller().cancel();
        let state = match GameState::new_game(&self.config.game, &mut self.rng) {
            Ok(state) => state,
            Err(err) => return self.fail("new game", err.into()),
        };

        if let Err(err) = self.replace_state(state) {
            return self.fail("new game", err);
        }
        tracing::info!("new game dealt");
        self.events.publish(SessionEvent::NewGame);
        self.play_automated().await
    }

    fn save_game(&mut self) -> Result<()> {
        let slot = self.config.persistence.slot.clone();
        if let Err(err) = self.repository.save(&slot, &self.state) {
            return self.fail("save", err.into());
        }

        tracing::info!(%slot, "game saved");
        self.surface.show_message(MessageLevel::Info, "Game saved")?;
        self.events.publish(SessionEvent::Saved { slot });
        Ok(())
    }

    async fn load_game(&mut self) -> Result<()> {
        self.surface.canceller().cancel();
        let slot = self.config.persistence.slot.clone();
        let state = match self.repository.load(&slot) {
            Ok(Some(state)) => state,
            Ok(None) => {
                let message = format!("no saved game in slot {slot}");
                tracing::warn!("{message}");
                self.surface
                    .show_message(MessageLevel::Error, &format!("Load failed: {message}"))?;
                self.events.publish(SessionEvent::Failed {
                    operation: "load".into(),
                    error: message,
                });
                return Ok(());
            }
            Err(err) => return self.fail("load", err.into()),
        };

        if let Err(err) = self.replace_state(state) {
            return self.fail("load", err);
        }
        tracing::info!(%slot, "game loaded");
        self.surface.show_message(MessageLevel::Info, "Game loaded")?;
        self.events.publish(SessionEvent::Loaded { slot });
        self.play_automated().await
    }

    /// Installs `state` once every placement is known to fit its board.
    /// The current state is left untouched when validation fails.
    fn replace_state(&mut self, state: GameState) -> Result<()> {
        for positioned in state.positions() {
            state.board().check(positioned.position)?;
        }
        if state.board().size() != self.surface.size() {
            self.surface.resize(state.board().size())?;
            self.surface.render(self.config.theme)?;
        }
        self.state = state;

        let mut ctl = InteractionController::new(&mut self.surface, &mut self.state);
        self.interaction = ctl.reset()?;
        ctl.redraw()
    }

    /// Shows and publishes a user-facing failure. Non user-facing errors
    /// propagate.
    fn fail(&mut self, operation: &str, err: RuntimeError) -> Result<()> {
        if !err.is_user_facing() {
            return Err(err);
        }
        tracing::warn!(operation, error = %err, "lifecycle operation failed");
        self.surface
            .show_message(MessageLevel::Error, &format!("{operation} failed: {err}"))?;
        self.events.publish(SessionEvent::Failed {
            operation: operation.to_string(),
            error: err.to_string(),
        });
        Ok(())
    }

    // ===== accessors =====

    fn controller(&mut self) -> InteractionController<'_> {
        InteractionController::new(&mut self.surface, &mut self.state)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn surface(&self) -> &BoardSurface {
        &self.surface
    }

    /// Hosts raise raw events through the surface's `emit_*` methods.
    pub fn surface_mut(&mut self) -> &mut BoardSurface {
        &mut self.surface
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &dyn GameRules {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Handle for cancelling animations from outside the session task.
    ///
    /// The session drives each input to completion, so an animation is only
    /// ever in flight while a host holding this handle on another task can
    /// interrupt it. New-game and load-game bump the same generation before
    /// replacing the state.
    pub fn canceller(&self) -> AnimationCanceller {
        self.surface.canceller()
    }
}

fn forward(queue: &WeakSender<SessionInput>, input: SessionInput) {
    let Some(tx) = queue.upgrade() else {
        tracing::trace!(?input, "session input dropped: queue closed");
        return;
    };
    if let Err(err) = tx.try_send(input) {
        tracing::warn!(?input, error = %err, "session input dropped");
    }
}
