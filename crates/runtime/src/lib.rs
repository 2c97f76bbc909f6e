//! Interaction core of the tactics game.
//!
//! This crate turns raw cell events into committed game actions. A
//! [`BoardSurface`] owns the per-cell view state and broadcasts interaction
//! events; the [`InteractionController`] interprets clicks against the armed
//! action; a [`StrategyProcedure`] drives the same click entry point for an
//! automated side. [`GameSession`] wires them to persistence and the event bus.
//!
//! Modules are organized by responsibility:
//! - [`surface`] hosts the board view state, render target contract and animations
//! - [`controller`] implements the Idle/Armed click machine and hover feedback
//! - [`strategy`] plays automated turns
//! - [`session`] runs the turn loop and save/load lifecycle
//! - [`api`] exposes the error type and the rules collaborator contract
//! - [`events`] provides topic-based event bus for hosts
//! - [`repository`] persists match state
pub mod api;
pub mod config;
pub mod controller;
pub mod events;
pub mod repository;
pub mod session;
pub mod strategy;
pub mod surface;

pub use api::{GameRules, Result, RuntimeError};
pub use config::{PersistenceConfig, RuntimeConfig, StrategyConfig};
pub use controller::{ClickOutcome, IgnoreReason, InteractionController, InteractionState};
pub use events::{Event, EventBus, SessionEvent, Topic, TurnEvent};
pub use repository::{FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository};
pub use session::{GameSession, SessionInput};
pub use strategy::{StrategyKind, StrategyOutcome, StrategyProcedure};
pub use surface::{
    AnimationCanceller, AnimationOutcome, BoardLayout, BoardSurface, CellContent, CellFlags,
    CellView, ColorTag, Cursor, HeadlessTarget, MessageLevel, Point, ProjectileSettings,
    RenderTarget, Transient,
};
