use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{DevelopmentCard, Noble, NobleId, Tier};
use crate::catalog::CardCatalog;
use crate::error::SetupError;
use crate::game::{starting_bank, Game};
use crate::nobles::NobleRegistry;
use crate::player::Player;
use crate::pool::ResourcePool;
use crate::token::TokenKind;

/// Cost field order in a feed record.
const FEED_GEMS: [TokenKind; 5] = [
    TokenKind::Diamond,
    TokenKind::Sapphire,
    TokenKind::Emerald,
    TokenKind::Ruby,
    TokenKind::Onyx,
];

/// One line of a card feed: `tier, diamond, sapphire, emerald, ruby, onyx,
/// points[, bonus]`. A record without a readable bonus kind defines a noble;
/// its tier field is carried but ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub tier: u8,
    pub cost: [u8; 5],
    pub points: u8,
    pub bonus: Option<TokenKind>,
}

impl CardRecord {
    fn cost_pool(&self) -> ResourcePool {
        let mut pool = ResourcePool::new();
        for (kind, count) in FEED_GEMS.iter().zip(self.cost) {
            pool.set(*kind, count);
        }
        pool
    }
}

fn parse_bonus(field: Option<&str>) -> Option<TokenKind> {
    let field = field?.trim();
    let mut chars = field.chars();
    let first = chars.next()?;
    // A single letter or a full kind name both work; anything else means
    // the record is a noble.
    if chars.next().is_none() {
        return TokenKind::from_letter(first).filter(TokenKind::is_gem);
    }
    TokenKind::GEMS
        .into_iter()
        .find(|kind| kind.to_string().eq_ignore_ascii_case(field))
}

/// Parses a whole feed. Blank lines are skipped; any malformed numeric field
/// makes the whole feed unusable.
pub fn parse_records(text: &str) -> Result<Vec<CardRecord>, SetupError> {
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 7 {
            return Err(SetupError::CardFeedUnavailable(format!(
                "line {}: expected at least 7 fields, got {}",
                number + 1,
                fields.len()
            )));
        }
        let mut numbers = [0u8; 7];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| {
                SetupError::CardFeedUnavailable(format!(
                    "line {}: unreadable number {field:?}",
                    number + 1
                ))
            })?;
        }
        records.push(CardRecord {
            tier: numbers[0],
            cost: [numbers[1], numbers[2], numbers[3], numbers[4], numbers[5]],
            points: numbers[6],
            bonus: parse_bonus(fields.get(7).copied()),
        });
    }
    Ok(records)
}

/// Reads and parses a feed file.
pub fn records_from_path(path: impl AsRef<Path>) -> Result<Vec<CardRecord>, SetupError> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|err| SetupError::CardFeedUnavailable(err.to_string()))?;
    parse_records(&text)
}

/// The sorted material of one game before shuffling: full tier decks and the
/// full noble table.
#[derive(Debug, Clone)]
pub struct GameSetup {
    decks: [Vec<DevelopmentCard>; 3],
    nobles: Vec<Noble>,
}

impl GameSetup {
    /// Splits a feed into development cards and nobles. Cards must carry a
    /// valid tier number; noble ids are assigned in feed order.
    pub fn from_records(records: &[CardRecord]) -> Result<Self, SetupError> {
        let mut decks: [Vec<DevelopmentCard>; 3] = Default::default();
        let mut nobles = Vec::new();
        for record in records {
            match record.bonus {
                Some(bonus) => {
                    let tier = Tier::from_number(record.tier).ok_or_else(|| {
                        SetupError::CardFeedUnavailable(format!(
                            "card with invalid tier {}",
                            record.tier
                        ))
                    })?;
                    decks[tier.index()].push(DevelopmentCard::new(
                        tier,
                        record.cost_pool(),
                        bonus,
                        record.points,
                    ));
                }
                None => {
                    let id = NobleId(nobles.len() as u8 + 1);
                    nobles.push(Noble::new(id, record.cost_pool(), record.points));
                }
            }
        }
        Ok(Self { decks, nobles })
    }

    pub fn deck(&self, tier: Tier) -> &[DevelopmentCard] {
        &self.decks[tier.index()]
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    /// Shuffles the decks, draws `player_count + 1` nobles, seeds the bank
    /// for the player count and deals the opening windows.
    pub fn build<R: Rng>(mut self, names: &[String], rng: &mut R) -> Result<Game, SetupError> {
        let bank = starting_bank(names.len())?;
        for deck in &mut self.decks {
            deck.shuffle(rng);
        }
        self.nobles.shuffle(rng);
        self.nobles.truncate(names.len() + 1);
        let players = names
            .iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name.clone()))
            .collect();
        Ok(Game::new(
            bank,
            CardCatalog::new(self.decks),
            NobleRegistry::new(self.nobles),
            players,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FEED: &str = "\
        1, 1, 2, 0, 0, 1, 0, Diamond\n\
        2, 0, 0, 3, 2, 2, 1, E\n\
        \n\
        3, 0, 0, 0, 7, 0, 4, ruby\n\
        0, 3, 3, 3, 0, 0, 3\n";

    #[test]
    fn records_carry_costs_in_feed_order() {
        let records = parse_records(FEED).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].tier, 1);
        assert_eq!(records[0].cost, [1, 2, 0, 0, 1]);
        assert_eq!(records[0].bonus, Some(TokenKind::Diamond));
        let pool = records[0].cost_pool();
        assert_eq!(pool.get(TokenKind::Sapphire), 2);
        assert_eq!(pool.get(TokenKind::Onyx), 1);
        assert_eq!(pool.get(TokenKind::Ruby), 0);
    }

    #[test]
    fn bonus_accepts_letters_and_names() {
        let records = parse_records(FEED).unwrap();
        assert_eq!(records[1].bonus, Some(TokenKind::Emerald));
        assert_eq!(records[2].bonus, Some(TokenKind::Ruby));
    }

    #[test]
    fn a_record_without_a_bonus_is_a_noble() {
        let records = parse_records(FEED).unwrap();
        assert_eq!(records[3].bonus, None);
        let setup = GameSetup::from_records(&records).unwrap();
        assert_eq!(setup.nobles().len(), 1);
        assert_eq!(setup.nobles()[0].points, 3);
        assert_eq!(setup.deck(Tier::One).len(), 1);
        assert_eq!(setup.deck(Tier::Three).len(), 1);
    }

    #[test]
    fn the_wildcard_is_not_a_bonus_kind() {
        let records = parse_records("1, 0, 0, 0, 0, 0, 1, J\n").unwrap();
        assert_eq!(records[0].bonus, None);
    }

    #[test]
    fn malformed_numbers_poison_the_whole_feed() {
        let result = parse_records("1, 1, x, 0, 0, 1, 0, Diamond\n");
        assert!(matches!(result, Err(SetupError::CardFeedUnavailable(_))));
        let short = parse_records("1, 2, 3\n");
        assert!(matches!(short, Err(SetupError::CardFeedUnavailable(_))));
    }

    #[test]
    fn a_card_with_an_unknown_tier_is_rejected() {
        let records = parse_records("5, 0, 0, 0, 0, 0, 0, Diamond\n").unwrap();
        assert!(matches!(
            GameSetup::from_records(&records),
            Err(SetupError::CardFeedUnavailable(_))
        ));
    }

    #[test]
    fn build_deals_windows_and_seeds_the_bank() {
        let mut feed = String::new();
        for _ in 0..6 {
            feed.push_str("1, 1, 0, 0, 0, 0, 0, Diamond\n");
            feed.push_str("2, 0, 2, 0, 0, 0, 1, Sapphire\n");
        }
        for _ in 0..5 {
            feed.push_str("0, 3, 3, 3, 0, 0, 3\n");
        }
        let records = parse_records(&feed).unwrap();
        let setup = GameSetup::from_records(&records).unwrap();
        let names = vec!["ada".to_string(), "grace".to_string(), "edsger".to_string()];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let game = setup.build(&names, &mut rng).unwrap();

        assert_eq!(game.players().len(), 3);
        assert_eq!(game.bank().get(TokenKind::Emerald), 5);
        assert_eq!(game.bank().get(TokenKind::Joker), 0);
        assert_eq!(game.nobles().remaining().len(), 4);
        assert_eq!(game.catalog().window(Tier::One).iter().flatten().count(), 4);
        assert_eq!(game.catalog().deck_len(Tier::One), 2);
        assert_eq!(game.catalog().window(Tier::Three).iter().flatten().count(), 0);
    }

    #[test]
    fn too_few_or_too_many_players_is_fatal() {
        let setup = GameSetup::from_records(&[]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = setup.build(&["solo".to_string()], &mut rng);
        assert!(matches!(result, Err(SetupError::InvalidPlayerCount(1))));
    }
}
