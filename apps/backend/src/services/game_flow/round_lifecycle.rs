use tracing::{debug, info};

use super::{require_game_mut, GameFlowService};
use crate::config::rules::{LeaderPolicy, MatchConfig};
use crate::domain::state::{next_seat, require_leader, MatchState, Phase, RoundState, Seat};
use crate::domain::{deal_hands, derive_dealing_seed, scoring};
use crate::errors::domain::DomainError;
use crate::realtime::protocol::GameEvent;
use crate::rooms::room::RoomInner;

impl GameFlowService {
    /// Create the match container and deal the first round.
    pub(super) fn start_match(
        &self,
        inner: &mut RoomInner,
        config: &MatchConfig,
    ) -> Result<(), DomainError> {
        // Entropy at creation; every per-round deal derives from this seed,
        // so a fixed config seed makes the whole match reproducible.
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        inner.game = Some(MatchState::new(seed, config.clone()));
        self.deal_round(inner, config.first_leader)
    }

    /// Deal the next round: fresh shuffle, four hands, leader on turn.
    pub(super) fn deal_round(&self, inner: &mut RoomInner, leader: Seat) -> Result<(), DomainError> {
        let game = require_game_mut(inner)?;

        game.phase = Phase::Dealing;
        game.round_no += 1;
        let round_no = game.round_no;

        let dealing_seed = derive_dealing_seed(game.seed, round_no);
        let hands = deal_hands(dealing_seed);
        game.hands = hands.clone();
        game.round = RoundState::empty();
        game.round_first_leader = leader;
        game.leader = Some(leader);
        game.turn = Some(leader);
        game.phase = Phase::Trick { trick_no: 1 };

        info!(round_no, leader, "round dealt");
        debug!(round_no, "Transition: -> Trick(1)");

        inner.push_event(GameEvent::RoundStarted { round_no, leader });
        for (seat, cards) in hands.into_iter().enumerate() {
            inner.push_event(GameEvent::HandDealt {
                seat: seat as Seat,
                cards,
            });
        }
        Ok(())
    }

    /// Score a finished round, then either end the match or deal the next
    /// round. Runs in the same guarded mutation as the play that finished
    /// the round.
    pub(super) fn finish_round(
        &self,
        inner: &mut RoomInner,
        config: &MatchConfig,
    ) -> Result<(), DomainError> {
        let game = require_game_mut(inner)?;

        let added = scoring::apply_round_scoring(game);
        let [team_a_score, team_b_score] = game.scores;
        let winner = scoring::match_winner(game);

        // The previous round's final-trick winner is still recorded as
        // leader at this point.
        let next_leader = match config.leader_policy {
            LeaderPolicy::FinalTrickWinner => require_leader(game, "finish_round")?,
            LeaderPolicy::Rotate => next_seat(game.round_first_leader),
        };

        info!(
            round_no = game.round_no,
            added_a = added[0],
            added_b = added[1],
            team_a_score,
            team_b_score,
            "round scored"
        );

        if winner.is_some() {
            game.phase = Phase::MatchEnd;
            game.turn = None;
            game.leader = None;
        }

        inner.push_event(GameEvent::RoundEnded {
            team_a_score,
            team_b_score,
        });

        match winner {
            Some(winning_team) => {
                info!(?winning_team, "match ended");
                inner.push_event(GameEvent::MatchEnded { winning_team });
                Ok(())
            }
            None => self.deal_round(inner, next_leader),
        }
    }
}
