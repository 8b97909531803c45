//! Demo driver: seats four scripted players at one table and plays a full
//! match through the public engine API, printing the event stream a client
//! at seat 0 would receive.

use backend::{Action, AppState, DomainError, MatchConfig, Phase, PlayerProfile};

const ROOM_ID: &str = "demo";
const PLAY_GUARD: usize = 10_000;

#[tokio::main]
async fn main() -> Result<(), DomainError> {
    backend::telemetry::init_tracing();

    let config = MatchConfig::from_env();
    let state = AppState::new(config);

    for (i, name) in ["Aziz", "Badr", "Salem", "Fahad"].iter().enumerate() {
        let outcome = state.join_room(
            ROOM_ID,
            PlayerProfile {
                player_id: i as i64 + 1,
                name: (*name).to_string(),
            },
        )?;
        println!("{name} seated at {}", outcome.seat);
    }

    let (_conn, mut events) = state.subscribe(ROOM_ID, 0)?;

    for seat in 0..4 {
        state.mark_ready(ROOM_ID, seat)?;
    }

    // Scripted play: whoever is on turn plays their first legal card.
    let mut plays = 0usize;
    loop {
        let view = state.seat_view(ROOM_ID, 0)?;
        if view.phase == Phase::MatchEnd {
            println!(
                "match over after round {}: {} - {}",
                view.round_no, view.scores[0], view.scores[1]
            );
            break;
        }
        let Some(turn) = view.turn else {
            break;
        };
        let Some(card) = state.legal_plays(ROOM_ID, turn)?.first().copied() else {
            break;
        };
        state.submit_action(ROOM_ID, turn, Action::PlayCard { card })?;

        plays += 1;
        if plays >= PLAY_GUARD {
            eprintln!("demo exceeded {PLAY_GUARD} plays without finishing, giving up");
            break;
        }
    }

    // Everything seat 0 observed, in delivery order.
    while let Ok(envelope) = events.try_recv() {
        let json = serde_json::to_string(&envelope.event).unwrap_or_default();
        println!("{:>5}  {json}", envelope.seq);
    }

    Ok(())
}
