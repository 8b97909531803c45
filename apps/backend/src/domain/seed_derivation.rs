//! RNG seed derivation for deterministic dealing.
//!
//! A match stores one base seed; every round's deal derives its own seed
//! from it, so a whole match is reproducible from `(base seed, actions)`.

/// Derive the dealing seed for a round.
///
/// Unique per `(match seed, round_no)`; wrapping arithmetic keeps the
/// derivation total for any base seed.
pub fn derive_dealing_seed(match_seed: i64, round_no: u16) -> u64 {
    let base = match_seed as u64;
    base.wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(1)
}
