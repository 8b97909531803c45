use crate::config::rules::ScoreMode;
use crate::domain::state::{MatchState, Phase, Seat, TeamId};
use crate::domain::Card;

/// Card points of a trick: the point table summed over all four plays.
/// Points travel with the trick no matter which suit wins it.
pub fn trick_points(plays: &[(Seat, Card)]) -> u16 {
    plays.iter().map(|&(_, c)| c.points()).sum()
}

/// Convert a team's round abnat into match points.
pub fn round_points(abnat: u16, mode: ScoreMode) -> u16 {
    match mode {
        ScoreMode::Abnat => abnat,
        ScoreMode::San => san_rounded(abnat),
    }
}

/// San conversion: round abnat to the nearest 10 — ties go to the even
/// multiple — then double and divide by 10.
fn san_rounded(abnat: u16) -> u16 {
    let tens = abnat / 10;
    let rem = abnat % 10;
    let rounded_tens = match rem {
        0..=4 => tens,
        6..=9 => tens + 1,
        _ => {
            if tens % 2 == 0 {
                tens
            } else {
                tens + 1
            }
        }
    };
    rounded_tens * 2
}

/// Fold the finished round's abnat into the cumulative match score.
/// Returns the points added per team. No-op unless the round has ended.
pub fn apply_round_scoring(state: &mut MatchState) -> [u16; 2] {
    if state.phase != Phase::RoundEnd {
        return [0; 2];
    }
    let mode = state.config.score_mode;
    let added = [
        round_points(state.round.abnat[0], mode),
        round_points(state.round.abnat[1], mode),
    ];
    state.scores[0] += added[0];
    state.scores[1] += added[1];
    added
}

/// The winning team, if one has reached the target score.
///
/// Requires a strict maximum: if both teams cross the target with equal
/// totals, nobody has won yet and another round is played.
pub fn match_winner(state: &MatchState) -> Option<TeamId> {
    let target = state.config.target_score;
    let [a, b] = state.scores;
    if a < target && b < target {
        return None;
    }
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Some(TeamId::A),
        std::cmp::Ordering::Less => Some(TeamId::B),
        std::cmp::Ordering::Equal => None,
    }
}
