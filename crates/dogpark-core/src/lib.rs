//! Scheduling, world orchestration, and the run loop for the Dog Park
//! simulation.
//!
//! This crate owns all mutable simulation state. Each step advances the
//! clock, activates every scheduled agent once in a random order, and then
//! gives one new dog the chance to arrive at the entrance.
//!
//! # Modules
//!
//! - [`clock`] -- Step counter ([`StepClock`]).
//! - [`config`] -- Configuration loading from `dogpark-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Bounded async run loop with a per-step callback.
//! - [`scheduler`] -- Agent registry and per-step random activation order.
//! - [`tick`] -- The per-step cycle: activation, dog turn resolution,
//!   arrivals.
//! - [`world`] -- [`World`]: construction, object placement and
//!   replenishment, dog admission, read-only queries.
//!
//! [`StepClock`]: clock::StepClock
//! [`World`]: world::World

pub mod clock;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod tick;
pub mod world;

pub use config::ParkConfig;
pub use runner::{NoOpCallback, RunBounds, SimulationEndReason, SimulationResult, TickCallback};
pub use tick::{TickError, TickSummary};
pub use world::{ArrivalOutcome, World, WorldError};
