//! Match rule configuration.
//!
//! Defaults follow the San conventions the engine implements; everything a
//! deployment might reasonably vary (target score, leader hand-off, score
//! conversion) is an explicit knob rather than a buried constant.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::state::Seat;

/// Who leads the first trick of each new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderPolicy {
    /// The winner of the previous round's final trick leads the next round.
    FinalTrickWinner,
    /// The opening lead rotates one seat clockwise each round.
    Rotate,
}

/// How a round's captured card points convert into match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Raw abnat: captured card points (last-trick bonus included) are added
    /// to the match total as-is.
    Abnat,
    /// San conversion: abnat rounded to the nearest 10 (ties to even), then
    /// doubled and divided by 10.
    San,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Match ends when a team's total reaches this.
    pub target_score: u16,
    /// Bonus added to the team that takes the eighth trick.
    pub last_trick_bonus: u16,
    /// Seat that leads the first trick of the first round.
    pub first_leader: Seat,
    pub leader_policy: LeaderPolicy,
    pub score_mode: ScoreMode,
    /// Fixed base seed for reproducible matches; None draws from entropy.
    pub rng_seed: Option<i64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: 152,
            last_trick_bonus: 10,
            first_leader: 0,
            leader_policy: LeaderPolicy::FinalTrickWinner,
            score_mode: ScoreMode::Abnat,
            rng_seed: None,
        }
    }
}

impl MatchConfig {
    /// Build a config from `BACKEND_*` environment variables, falling back
    /// to defaults. Unparseable values are skipped with a warning rather
    /// than aborting startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = parsed_env::<u16>("BACKEND_TARGET_SCORE") {
            config.target_score = v;
        }
        if let Some(v) = parsed_env::<u16>("BACKEND_LAST_TRICK_BONUS") {
            config.last_trick_bonus = v;
        }
        if let Some(v) = parsed_env::<Seat>("BACKEND_FIRST_LEADER") {
            if v < 4 {
                config.first_leader = v;
            } else {
                warn!(value = v, "BACKEND_FIRST_LEADER out of range 0-3, ignoring");
            }
        }
        if let Ok(v) = std::env::var("BACKEND_LEADER_POLICY") {
            match v.as_str() {
                "final_trick_winner" => config.leader_policy = LeaderPolicy::FinalTrickWinner,
                "rotate" => config.leader_policy = LeaderPolicy::Rotate,
                other => warn!(value = other, "unknown BACKEND_LEADER_POLICY, ignoring"),
            }
        }
        if let Ok(v) = std::env::var("BACKEND_SCORE_MODE") {
            match v.as_str() {
                "abnat" => config.score_mode = ScoreMode::Abnat,
                "san" => config.score_mode = ScoreMode::San,
                other => warn!(value = other, "unknown BACKEND_SCORE_MODE, ignoring"),
            }
        }
        if let Some(v) = parsed_env::<i64>("BACKEND_RNG_SEED") {
            config.rng_seed = Some(v);
        }

        config
    }
}

fn parsed_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "unparseable value, ignoring");
            None
        }
    }
}
