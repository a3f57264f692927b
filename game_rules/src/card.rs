use std::fmt;

use serde::Serialize;

use crate::pool::ResourcePool;
use crate::token::TokenKind;

/// A development card's difficulty band. Each tier has its own draw stack and
/// visible window on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// Zero-based index into per-tier storage.
    pub fn index(&self) -> usize {
        match self {
            Tier::One => 0,
            Tier::Two => 1,
            Tier::Three => 2,
        }
    }

    /// One-based number as written in card feeds and player input.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Tier> {
        match number {
            1 => Some(Tier::One),
            2 => Some(Tier::Two),
            3 => Some(Tier::Three),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A purchasable card. Immutable once created: the cost is paid in gem
/// tokens (never wildcards), the bonus is the gem kind granted permanently
/// to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevelopmentCard {
    pub tier: Tier,
    pub cost: ResourcePool,
    pub bonus: TokenKind,
    pub points: u8,
}

impl DevelopmentCard {
    pub fn new(tier: Tier, cost: ResourcePool, bonus: TokenKind, points: u8) -> Self {
        Self {
            tier,
            cost,
            bonus,
            points,
        }
    }
}

/// Identity of a noble within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NobleId(pub u8);

/// A noble bonus card. Its cost is expressed in *bonus* counts, not tokens;
/// claiming one consumes nothing. Immutable, and removed from play once
/// claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Noble {
    pub id: NobleId,
    pub cost: ResourcePool,
    pub points: u8,
}

impl Noble {
    pub fn new(id: NobleId, cost: ResourcePool, points: u8) -> Self {
        Self { id, cost, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_numbers_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_number(tier.number()), Some(tier));
        }
        assert_eq!(Tier::from_number(0), None);
        assert_eq!(Tier::from_number(4), None);
    }
}
