//! Standings: point aggregation and final places with one level of head-to-head.

use crate::models::{Draft, DraftError, DraftPlayer, GameMatch, PlayerId};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Sum of points per player over all matches with a recorded result.
pub fn tally_points<'a>(matches: impl IntoIterator<Item = &'a GameMatch>) -> HashMap<PlayerId, u32> {
    let mut points = HashMap::new();
    for (player_id, pts) in matches.into_iter().filter_map(GameMatch::points).flatten() {
        *points.entry(player_id).or_insert(0) += pts;
    }
    points
}

/// Full wins each player of `group` took against other members of `group`.
/// Matches involving anyone outside the group are ignored.
pub fn head_to_head_wins<'a>(
    group: &[PlayerId],
    matches: impl IntoIterator<Item = &'a GameMatch>,
) -> HashMap<PlayerId, u32> {
    let members: HashSet<PlayerId> = group.iter().copied().collect();
    let mut wins: HashMap<PlayerId, u32> = group.iter().map(|&pid| (pid, 0)).collect();
    for m in matches {
        if !(members.contains(&m.player_1) && members.contains(&m.player_2)) {
            continue;
        }
        if let Some(winner) = m.winner() {
            *wins.entry(winner).or_insert(0) += 1;
        }
    }
    wins
}

/// Recompute points and final places of `draft_players` from `matches`.
///
/// Players are ranked by points; equal-point groups are split once by head-to-head
/// wins inside the group. Whoever is still level shares a place, and the next place
/// skips by the size of the tie (1, 1, 1, 4). Nothing is modified on error.
pub fn resolve_standings(
    matches: &[GameMatch],
    draft_players: &mut [DraftPlayer],
) -> Result<(), DraftError> {
    let points = tally_points(matches);
    if let Some(&unknown) = points
        .keys()
        .find(|&&pid| !draft_players.iter().any(|dp| dp.player_id == pid))
    {
        return Err(DraftError::PlayerNotInDraft(unknown));
    }

    let mut ranked: Vec<(PlayerId, u32)> = draft_players
        .iter()
        .map(|dp| (dp.player_id, points.get(&dp.player_id).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by_key(|&(pid, pts)| (Reverse(pts), pid));

    let mut places: HashMap<PlayerId, u32> = HashMap::with_capacity(ranked.len());
    let mut next_place = 1;
    for group in ranked.chunk_by(|a, b| a.1 == b.1) {
        if let [(player_id, _)] = group {
            places.insert(*player_id, next_place);
            next_place += 1;
            continue;
        }

        let ids: Vec<PlayerId> = group.iter().map(|&(pid, _)| pid).collect();
        let wins = head_to_head_wins(&ids, matches);
        let mut by_wins: Vec<(PlayerId, u32)> = ids
            .iter()
            .map(|&pid| (pid, wins.get(&pid).copied().unwrap_or(0)))
            .collect();
        by_wins.sort_by_key(|&(pid, w)| (Reverse(w), pid));
        log::debug!(
            "Tie at {} points between {:?}, head-to-head wins {:?}",
            group[0].1,
            ids,
            by_wins
        );

        for sub_group in by_wins.chunk_by(|a, b| a.1 == b.1) {
            for &(player_id, _) in sub_group {
                places.insert(player_id, next_place);
            }
            next_place += sub_group.len() as u32;
        }
    }

    for dp in draft_players.iter_mut() {
        dp.points = points.get(&dp.player_id).copied().unwrap_or(0);
        dp.final_place = places.get(&dp.player_id).copied();
    }
    Ok(())
}

/// Recompute standings of a draft from its own matches. Safe to call repeatedly.
pub fn calculate_results(draft: &mut Draft) -> Result<(), DraftError> {
    let matches: Vec<GameMatch> = draft.matches().cloned().collect();
    let played = matches.iter().filter(|m| m.result.is_some()).count();
    resolve_standings(&matches, &mut draft.draft_players)?;
    log::info!(
        "Calculated standings for draft {:?}: {}/{} match(es) played",
        draft.name,
        played,
        matches.len()
    );
    Ok(())
}
