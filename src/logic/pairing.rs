//! Round-robin pairing (circle method).
//!
//! The working list holds `Option<PlayerId>`; an odd roster gets one `None` slot
//! appended, and any pairing against it is a bye that is never materialized.

use crate::models::{Draft, DraftError, GameMatch, PlayerId, Round};

/// Pairings of one round, before they are turned into matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundPairing {
    /// 1-based.
    pub number: u32,
    pub pairs: Vec<(PlayerId, PlayerId)>,
}

/// Reorder so that pairing position `i` with `len - 1 - i` yields 1v2, 3v4, 5v6, ...
///
/// Even-indexed entries in order, then odd-indexed entries reversed:
/// `[1,2,3,4,5,6]` becomes `[1,3,5,6,4,2]`.
pub fn inside_out<T: Clone>(players: &[T]) -> Vec<T> {
    let evens = players.iter().step_by(2);
    let odds_reversed = players.iter().skip(1).step_by(2).rev();
    evens.chain(odds_reversed).cloned().collect()
}

/// Rotate for the next round: first stays fixed, last moves to position 1.
///
/// `[1,2,3,4]` becomes `[1,4,2,3]`.
pub fn rotate<T: Clone>(players: &[T]) -> Vec<T> {
    match players {
        [] | [_] => players.to_vec(),
        [first, middle @ .., last] => std::iter::once(first)
            .chain(std::iter::once(last))
            .chain(middle)
            .cloned()
            .collect(),
    }
}

/// Build the full round-robin schedule for players given in seed order.
///
/// N even: N-1 rounds of N/2 matches. N odd: N rounds of (N-1)/2 matches, each
/// player sitting out exactly one. Fewer than two players: no rounds.
pub fn generate_pairing(player_ids: &[PlayerId]) -> Vec<RoundPairing> {
    let mut working: Vec<Option<PlayerId>> = player_ids.iter().copied().map(Some).collect();
    if working.len() % 2 != 0 {
        working.push(None);
    }
    let slots = working.len();
    if slots < 2 {
        return Vec::new();
    }

    let mut order = inside_out(&working);
    let mut rounds = Vec::with_capacity(slots - 1);
    for number in 1..slots as u32 {
        let pairs = (0..slots / 2)
            .filter_map(|i| match (order[i], order[slots - 1 - i]) {
                (Some(p1), Some(p2)) => Some((p1, p2)),
                _ => None,
            })
            .collect();
        rounds.push(RoundPairing { number, pairs });
        order = rotate(&order);
    }
    rounds
}

/// Generate rounds and matches for a draft from its seeded roster.
///
/// Pairing happens exactly once per draft: fails with `AlreadyGenerated` if the draft
/// already has rounds.
pub fn populate_draft(draft: &mut Draft) -> Result<(), DraftError> {
    if !draft.rounds.is_empty() {
        return Err(DraftError::AlreadyGenerated);
    }

    let rounds = generate_pairing(&draft.seeded_player_ids())
        .into_iter()
        .map(|pairing| -> Result<Round, DraftError> {
            let matches = pairing
                .pairs
                .into_iter()
                .map(|(p1, p2)| GameMatch::new(p1, p2))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Round::new(pairing.number, matches))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let match_count: usize = rounds.iter().map(|r| r.matches.len()).sum();
    log::info!(
        "Generated {} round(s) with {} match(es) for draft {:?} ({} players)",
        rounds.len(),
        match_count,
        draft.name,
        draft.draft_players.len()
    );
    draft.rounds = rounds;
    Ok(())
}

/// Player without a match in the given round (odd rosters only).
pub fn bye_for_round(draft: &Draft, number: u32) -> Result<Option<PlayerId>, DraftError> {
    let round = draft.round(number)?;
    Ok(draft
        .seeded_player_ids()
        .into_iter()
        .find(|&pid| !round.matches.iter().any(|m| m.involves(pid))))
}
