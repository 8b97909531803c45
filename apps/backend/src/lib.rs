#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod realtime;
pub mod rooms;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::rules::{LeaderPolicy, MatchConfig, ScoreMode};
pub use domain::player_view::SeatView;
pub use domain::state::{Phase, Seat, TeamId};
pub use domain::Card;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use realtime::protocol::{Action, ActionError, Envelope, GameEvent};
pub use rooms::room::PlayerProfile;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    telemetry::init_test_logging();
}
