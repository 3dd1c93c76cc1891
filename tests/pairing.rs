//! Integration tests for round-robin pairing.

use chrono::NaiveDate;
use mtg_draft_web::{
    bye_for_round, generate_pairing, inside_out, populate_draft, rotate, Draft, DraftError,
    PlayerId,
};
use std::collections::HashSet;

fn seeded(n: u32) -> Vec<PlayerId> {
    (1..=n).collect()
}

fn draft_with_players(n: u32) -> Draft {
    let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
    Draft::new("Friday Night Draft", date, &seeded(n)).unwrap()
}

#[test]
fn rotate_keeps_first_and_moves_last_to_second() {
    assert_eq!(rotate::<u32>(&[]), Vec::<u32>::new());
    assert_eq!(rotate(&[1]), vec![1]);
    assert_eq!(rotate(&[1, 2]), vec![1, 2]);
    assert_eq!(rotate(&[1, 2, 3, 4]), vec![1, 4, 2, 3]);
    assert_eq!(rotate(&[1, 2, 3, 4, 5]), vec![1, 5, 2, 3, 4]);
}

#[test]
fn inside_out_orders_evens_then_reversed_odds() {
    assert_eq!(inside_out::<u32>(&[]), Vec::<u32>::new());
    assert_eq!(inside_out(&[1]), vec![1]);
    assert_eq!(inside_out(&[1, 2, 3, 4, 5, 6]), vec![1, 3, 5, 6, 4, 2]);
    assert_eq!(inside_out(&[1, 2, 3, 4, 5]), vec![1, 3, 5, 4, 2]);
}

#[test]
fn no_rounds_for_zero_or_one_player() {
    assert!(generate_pairing(&[]).is_empty());
    assert!(generate_pairing(&[7]).is_empty());
}

#[test]
fn two_players_meet_once() {
    let rounds = generate_pairing(&[7, 9]);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].pairs, vec![(7, 9)]);
}

#[test]
fn four_players_follow_seed_order_then_rotate() {
    let rounds = generate_pairing(&seeded(4));
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0].number, 1);
    assert_eq!(rounds[0].pairs, vec![(1, 2), (3, 4)]);
    assert_eq!(rounds[1].pairs, vec![(1, 4), (2, 3)]);
    assert_eq!(rounds[2].pairs, vec![(1, 3), (4, 2)]);
}

#[test]
fn five_players_get_one_bye_each() {
    let rounds = generate_pairing(&seeded(5));
    assert_eq!(rounds.len(), 5);
    assert_eq!(rounds[0].pairs, vec![(1, 2), (3, 4)]);
    assert_eq!(rounds[1].pairs, vec![(1, 4), (3, 5)]);
    assert_eq!(rounds[2].pairs, vec![(4, 5), (2, 3)]);
    assert_eq!(rounds[3].pairs, vec![(1, 5), (4, 2)]);
    assert_eq!(rounds[4].pairs, vec![(1, 3), (5, 2)]);
    for round in &rounds {
        assert_eq!(round.pairs.len(), 2);
    }
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=12u32 {
        let rounds = generate_pairing(&seeded(n));
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(rounds.len() as u32, expected_rounds, "rounds for {n} players");

        let mut seen = HashSet::new();
        for round in &rounds {
            assert_eq!(round.pairs.len() as u32, n / 2, "matches per round for {n} players");
            let mut in_round = HashSet::new();
            for &(a, b) in &round.pairs {
                assert_ne!(a, b);
                assert!(in_round.insert(a) && in_round.insert(b), "player twice in one round");
                assert!(seen.insert((a.min(b), a.max(b))), "pair {a}-{b} repeated");
            }
        }
        assert_eq!(seen.len() as u32, n * (n - 1) / 2);
    }
}

#[test]
fn populate_draft_materializes_rounds_and_matches() {
    let mut draft = draft_with_players(6);
    populate_draft(&mut draft).unwrap();
    assert_eq!(draft.rounds.len(), 5);
    assert_eq!(draft.matches().count(), 15);
    assert!(draft.matches().all(|m| m.result.is_none()));
    let numbers: Vec<u32> = draft.rounds.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn populate_draft_uses_seed_order_not_roster_order() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
    let mut draft = Draft::new("Seeded", date, &[10, 20, 30, 40]).unwrap();
    draft.draft_players[0].order = 4;
    draft.draft_players[3].order = 1;
    assert_eq!(draft.seeded_player_ids(), vec![40, 20, 30, 10]);

    populate_draft(&mut draft).unwrap();
    let first: Vec<(PlayerId, PlayerId)> = draft.rounds[0]
        .matches
        .iter()
        .map(|m| (m.player_1, m.player_2))
        .collect();
    assert_eq!(first, vec![(40, 20), (30, 10)]);
}

#[test]
fn populate_draft_twice_is_a_conflict() {
    let mut draft = draft_with_players(4);
    populate_draft(&mut draft).unwrap();
    let ids: Vec<_> = draft.matches().map(|m| m.id).collect();

    assert_eq!(populate_draft(&mut draft), Err(DraftError::AlreadyGenerated));
    let after: Vec<_> = draft.matches().map(|m| m.id).collect();
    assert_eq!(ids, after);
}

#[test]
fn populate_draft_with_one_player_is_empty() {
    let mut draft = draft_with_players(1);
    populate_draft(&mut draft).unwrap();
    assert!(draft.rounds.is_empty());
    assert!(!draft.has_matches());
}

#[test]
fn bye_is_reported_per_round() {
    let mut draft = draft_with_players(5);
    populate_draft(&mut draft).unwrap();
    let byes: Vec<Option<PlayerId>> = (1..=5).map(|n| bye_for_round(&draft, n).unwrap()).collect();
    assert_eq!(byes, vec![Some(5), Some(2), Some(1), Some(3), Some(4)]);
    assert_eq!(bye_for_round(&draft, 6), Err(DraftError::RoundNotFound(6)));

    let mut even = draft_with_players(4);
    populate_draft(&mut even).unwrap();
    assert_eq!(bye_for_round(&even, 1), Ok(None));
}
