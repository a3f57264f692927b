//! The full base-game card and noble tables, expressed as feed records so
//! the same setup path serves files and the built-in game alike.

use rand::Rng;

use crate::error::SetupError;
use crate::feed::{CardRecord, GameSetup};
use crate::game::Game;
use crate::token::TokenKind;

/// Cost arrays follow the feed order: diamond, sapphire, emerald, ruby, onyx.
type Row = ([u8; 5], TokenKind, u8);

const NOBLE_POINTS: u8 = 3;

fn rows_to_records(tier: u8, rows: &[Row]) -> impl Iterator<Item = CardRecord> + '_ {
    rows.iter().map(move |(cost, bonus, points)| CardRecord {
        tier,
        cost: *cost,
        points: *points,
        bonus: Some(*bonus),
    })
}

fn tier_one() -> Vec<Row> {
    vec![
        ([2, 2, 0, 0, 0], TokenKind::Emerald, 0),
        ([1, 1, 0, 1, 2], TokenKind::Emerald, 0),
        ([1, 1, 0, 1, 1], TokenKind::Emerald, 0),
        ([0, 0, 3, 0, 0], TokenKind::Onyx, 0),
        ([0, 4, 0, 0, 0], TokenKind::Onyx, 1),
        ([1, 2, 1, 1, 0], TokenKind::Onyx, 0),
        ([0, 1, 3, 1, 0], TokenKind::Sapphire, 0),
        ([1, 0, 1, 2, 1], TokenKind::Sapphire, 0),
        ([0, 0, 2, 0, 2], TokenKind::Sapphire, 0),
        ([0, 2, 0, 0, 2], TokenKind::Diamond, 0),
        ([3, 0, 0, 0, 0], TokenKind::Ruby, 0),
        ([0, 0, 0, 0, 4], TokenKind::Emerald, 1),
        ([1, 3, 1, 0, 0], TokenKind::Emerald, 0),
        ([0, 1, 0, 2, 2], TokenKind::Emerald, 0),
        ([1, 0, 0, 1, 3], TokenKind::Ruby, 0),
        ([4, 0, 0, 0, 0], TokenKind::Ruby, 1),
        ([0, 3, 0, 0, 0], TokenKind::Diamond, 0),
        ([0, 0, 2, 2, 0], TokenKind::Onyx, 0),
        ([0, 0, 1, 3, 1], TokenKind::Onyx, 0),
        ([2, 0, 2, 0, 0], TokenKind::Onyx, 0),
        ([1, 0, 1, 1, 1], TokenKind::Sapphire, 0),
        ([0, 0, 0, 4, 0], TokenKind::Sapphire, 1),
        ([2, 0, 1, 0, 2], TokenKind::Ruby, 0),
        ([2, 0, 0, 2, 0], TokenKind::Ruby, 0),
        ([0, 2, 1, 0, 0], TokenKind::Ruby, 0),
        ([2, 2, 0, 1, 0], TokenKind::Onyx, 0),
        ([1, 0, 2, 2, 0], TokenKind::Sapphire, 0),
        ([0, 0, 0, 0, 3], TokenKind::Sapphire, 0),
        ([2, 2, 0, 0, 1], TokenKind::Diamond, 0),
        ([0, 1, 1, 1, 1], TokenKind::Diamond, 0),
        ([1, 0, 0, 0, 2], TokenKind::Sapphire, 0),
        ([1, 1, 1, 1, 0], TokenKind::Onyx, 0),
        ([0, 2, 0, 2, 0], TokenKind::Emerald, 0),
        ([0, 0, 0, 3, 0], TokenKind::Emerald, 0),
        ([0, 1, 2, 1, 1], TokenKind::Diamond, 0),
        ([0, 0, 0, 2, 1], TokenKind::Diamond, 0),
        ([3, 1, 0, 0, 1], TokenKind::Diamond, 0),
        ([0, 0, 4, 0, 0], TokenKind::Diamond, 1),
        ([2, 1, 1, 0, 1], TokenKind::Ruby, 0),
        ([1, 1, 1, 0, 1], TokenKind::Ruby, 0),
    ]
}

fn tier_two() -> Vec<Row> {
    vec![
        ([3, 0, 3, 0, 2], TokenKind::Onyx, 1),
        ([3, 0, 2, 3, 0], TokenKind::Emerald, 1),
        ([0, 3, 0, 2, 3], TokenKind::Ruby, 1),
        ([0, 6, 0, 0, 0], TokenKind::Sapphire, 3),
        ([2, 0, 0, 1, 4], TokenKind::Sapphire, 2),
        ([2, 3, 0, 3, 0], TokenKind::Diamond, 1),
        ([4, 2, 0, 0, 1], TokenKind::Emerald, 2),
        ([0, 5, 0, 0, 0], TokenKind::Sapphire, 2),
        ([5, 0, 0, 0, 0], TokenKind::Onyx, 2),
        ([2, 0, 0, 2, 3], TokenKind::Ruby, 1),
        ([6, 0, 0, 0, 0], TokenKind::Diamond, 3),
        ([1, 4, 2, 0, 0], TokenKind::Ruby, 2),
        ([0, 0, 0, 5, 0], TokenKind::Diamond, 2),
        ([0, 0, 6, 0, 0], TokenKind::Emerald, 3),
        ([0, 0, 5, 0, 0], TokenKind::Emerald, 2),
        ([0, 0, 0, 0, 5], TokenKind::Ruby, 2),
        ([3, 2, 2, 0, 0], TokenKind::Onyx, 1),
        ([0, 0, 0, 0, 6], TokenKind::Onyx, 3),
        ([0, 0, 5, 3, 0], TokenKind::Onyx, 2),
        ([0, 5, 3, 0, 0], TokenKind::Emerald, 2),
        ([0, 2, 3, 0, 3], TokenKind::Sapphire, 1),
        ([0, 2, 2, 2, 0], TokenKind::Sapphire, 1),
        ([5, 3, 0, 0, 0], TokenKind::Sapphire, 2),
        ([2, 3, 0, 0, 2], TokenKind::Emerald, 1),
        ([0, 0, 0, 5, 3], TokenKind::Diamond, 2),
        ([0, 0, 1, 4, 2], TokenKind::Diamond, 2),
        ([0, 0, 4, 2, 1], TokenKind::Onyx, 2),
        ([0, 0, 3, 2, 2], TokenKind::Diamond, 1),
        ([0, 0, 0, 6, 0], TokenKind::Ruby, 3),
        ([3, 0, 0, 0, 5], TokenKind::Ruby, 2),
    ]
}

fn tier_three() -> Vec<Row> {
    vec![
        ([5, 3, 0, 3, 3], TokenKind::Emerald, 3),
        ([3, 0, 3, 3, 5], TokenKind::Sapphire, 3),
        ([3, 6, 3, 0, 0], TokenKind::Emerald, 4),
        ([3, 0, 0, 0, 7], TokenKind::Diamond, 5),
        ([0, 0, 0, 7, 0], TokenKind::Onyx, 4),
        ([0, 0, 3, 6, 3], TokenKind::Onyx, 4),
        ([6, 3, 0, 0, 3], TokenKind::Sapphire, 4),
        ([0, 0, 7, 0, 0], TokenKind::Ruby, 4),
        ([3, 5, 3, 0, 3], TokenKind::Ruby, 3),
        ([0, 3, 6, 3, 0], TokenKind::Ruby, 4),
        ([3, 0, 0, 3, 6], TokenKind::Diamond, 4),
        ([3, 3, 5, 3, 0], TokenKind::Onyx, 3),
        ([7, 3, 0, 0, 0], TokenKind::Sapphire, 5),
        ([0, 0, 7, 3, 0], TokenKind::Ruby, 5),
        ([0, 7, 3, 0, 0], TokenKind::Emerald, 5),
        ([0, 0, 0, 0, 7], TokenKind::Diamond, 4),
        ([0, 7, 0, 0, 0], TokenKind::Emerald, 4),
        ([0, 3, 3, 5, 3], TokenKind::Diamond, 3),
        ([7, 0, 0, 0, 0], TokenKind::Sapphire, 4),
        ([0, 0, 0, 7, 3], TokenKind::Onyx, 5),
    ]
}

fn noble_costs() -> Vec<[u8; 5]> {
    vec![
        [0, 4, 4, 0, 0],
        [4, 4, 0, 0, 0],
        [0, 0, 4, 4, 0],
        [4, 0, 0, 0, 4],
        [3, 0, 0, 3, 3],
        [0, 0, 3, 3, 3],
        [0, 3, 3, 3, 0],
        [0, 0, 0, 4, 4],
        [3, 3, 3, 0, 0],
        [3, 3, 0, 0, 3],
    ]
}

/// The complete base-game feed: 90 development cards and 10 nobles.
pub fn standard_records() -> Vec<CardRecord> {
    let one = tier_one();
    let two = tier_two();
    let three = tier_three();
    let mut records: Vec<CardRecord> = rows_to_records(1, &one)
        .chain(rows_to_records(2, &two))
        .chain(rows_to_records(3, &three))
        .collect();
    records.extend(noble_costs().into_iter().map(|cost| CardRecord {
        tier: 0,
        cost,
        points: NOBLE_POINTS,
        bonus: None,
    }));
    records
}

/// A ready-to-play base game for the named players.
pub fn standard_game<R: Rng>(names: &[String], rng: &mut R) -> Result<Game, SetupError> {
    GameSetup::from_records(&standard_records())?.build(names, rng)
}
