use crate::domain::rules::{SEATS, TRICKS_PER_ROUND};
use crate::domain::scoring::trick_points;
use crate::domain::state::{
    audit_card_partition, next_seat, require_turn, team_of, MatchState, Phase, RoundState, Seat,
};
use crate::domain::{card_beats, hand_has_suit, Card};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether a trick was completed (4 cards played).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Card points of the completed trick (last-trick bonus not included;
    /// that lands directly on the winning team's abnat).
    pub trick_points: u16,
    /// Whether the completed trick was the eighth of the round.
    pub is_last_trick: bool,
    /// Whether this play finished the round (all hands empty).
    pub round_complete: bool,
}

/// Compute the cards a hand may legally put into the current trick,
/// independent of turn enforcement: the lead-suit subset when the hand can
/// follow, otherwise the whole hand.
pub fn legal_moves(state: &MatchState, who: Seat) -> Vec<Card> {
    let Phase::Trick { .. } = state.phase else {
        return Vec::new();
    };

    let hand = &state.hands[who as usize];
    if hand.is_empty() {
        return Vec::new();
    }

    if let Some(lead) = state.round.trick_lead {
        if hand_has_suit(hand, lead) {
            let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
            v.sort();
            return v;
        }
    }

    let mut any = hand.clone();
    any.sort();
    any
}

/// Play a card into the current trick, enforcing turn, suit-following, and
/// phase. Rejections are atomic: on any error the state is untouched.
pub fn play_card(
    state: &mut MatchState,
    who: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    // Phase check
    let Phase::Trick { trick_no } = state.phase else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    };
    if trick_no != state.round.trick_no {
        return Err(DomainError::invariant(
            "round.trick_no must match Phase::Trick.trick_no",
        ));
    }

    // Turn check
    let turn = require_turn(state, "play_card")?;
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Not your turn",
        ));
    }

    // Card in hand (immutable check first to keep the rejection atomic)
    let pos_opt = state.hands[who as usize].iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(DomainError::validation(
            ValidationKind::CardNotHeld,
            "Card not in hand",
        ));
    };

    // Suit-following check using an immutable borrow only
    let legal = legal_moves(state, who);
    if !legal.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::SuitViolation,
            "Must follow suit",
        ));
    }

    // On first play, set lead + leader
    if state.round.trick_plays.is_empty() {
        state.round.trick_lead = Some(card.suit);
        state.leader = Some(who);
    }

    // Move card from hand to plays
    let removed = state.hands[who as usize].remove(pos);
    state.round.trick_plays.push((who, removed));

    // Advance turn explicitly
    state.turn = Some(next_seat(who));

    audit_card_partition(state)?;

    let trick_completed = state.round.trick_plays.len() == SEATS;
    let mut result = PlayCardResult {
        trick_completed,
        trick_winner: None,
        trick_points: 0,
        is_last_trick: false,
        round_complete: false,
    };

    if !trick_completed {
        return Ok(result);
    }

    // Resolve completed trick
    let winner = resolve_current_trick(&state.round)
        .ok_or_else(|| DomainError::invariant("completed trick must have a winner"))?;
    let points = trick_points(&state.round.trick_plays);
    let team = team_of(winner);

    state.round.abnat[team.index()] += points;
    state.round.tricks_taken[winner as usize] += 1;
    state
        .round
        .captured
        .extend(state.round.trick_plays.iter().map(|&(_, c)| c));
    state.round.trick_plays.clear();
    state.round.trick_lead = None;

    result.trick_winner = Some(winner);
    result.trick_points = points;
    result.is_last_trick = trick_no == TRICKS_PER_ROUND;

    if result.is_last_trick {
        // The eighth trick carries the last-trick bonus for the side that
        // takes it.
        state.round.abnat[team.index()] += state.config.last_trick_bonus;
    }

    // Winner leads the next trick
    state.leader = Some(winner);
    state.turn = Some(winner);

    if state.is_round_complete() {
        result.round_complete = true;
        state.phase = Phase::RoundEnd;
        state.turn = None;
        return Ok(result);
    }

    let next_trick_no = trick_no + 1;
    state.round.trick_no = next_trick_no;
    state.phase = Phase::Trick {
        trick_no: next_trick_no,
    };

    Ok(result)
}

/// Resolve the current trick winner if complete: the strongest lead-suit
/// play. Ranks are unique within a suit, so there is always exactly one.
pub fn resolve_current_trick(round: &RoundState) -> Option<Seat> {
    if round.trick_plays.len() < SEATS {
        return None;
    }
    let lead = round.trick_lead?;

    let mut best_idx = 0usize;
    for i in 1..SEATS {
        let (_, card_i) = round.trick_plays[i];
        let (_, card_best) = round.trick_plays[best_idx];
        if card_beats(card_i, card_best, lead) {
            best_idx = i;
        }
    }
    Some(round.trick_plays[best_idx].0)
}
