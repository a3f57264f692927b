use serde::Serialize;

use crate::card::{DevelopmentCard, Tier};
use crate::error::ActionError;

/// Width of the visible window of each tier.
pub const VISIBLE_COLUMNS: usize = 4;

/// The tiered card supply: one face-down stack per tier plus a four-column
/// visible window. Whenever a visible slot is vacated it is refilled from
/// that tier's stack at once; a slot stays empty only once the stack is
/// exhausted.
#[derive(Debug, Clone, Serialize)]
pub struct CardCatalog {
    decks: [Vec<DevelopmentCard>; 3],
    visible: [[Option<DevelopmentCard>; VISIBLE_COLUMNS]; 3],
}

impl CardCatalog {
    /// Builds the catalog from pre-shuffled stacks (top of stack = end of
    /// vec) and deals the initial windows.
    pub fn new(mut decks: [Vec<DevelopmentCard>; 3]) -> Self {
        let mut visible: [[Option<DevelopmentCard>; VISIBLE_COLUMNS]; 3] = Default::default();
        for (tier, deck) in decks.iter_mut().enumerate() {
            for column in 0..VISIBLE_COLUMNS {
                visible[tier][column] = deck.pop();
            }
        }
        Self { decks, visible }
    }

    /// Bounds-checked lookup into the visible window.
    pub fn card(&self, tier: Tier, column: usize) -> Result<&DevelopmentCard, ActionError> {
        if column >= VISIBLE_COLUMNS {
            return Err(ActionError::InvalidTierOrColumn {
                tier: tier.number() as usize,
                column: column + 1,
            });
        }
        self.visible[tier.index()][column]
            .as_ref()
            .ok_or(ActionError::EmptyCardSlot)
    }

    /// Pops the top of a tier's stack, or `None` once it is exhausted.
    pub fn draw(&mut self, tier: Tier) -> Option<DevelopmentCard> {
        self.decks[tier.index()].pop()
    }

    /// Removes a visible card and immediately refills the slot from the
    /// tier stack, keeping the window invariant by construction.
    pub fn take(&mut self, tier: Tier, column: usize) -> Result<DevelopmentCard, ActionError> {
        if column >= VISIBLE_COLUMNS {
            return Err(ActionError::InvalidTierOrColumn {
                tier: tier.number() as usize,
                column: column + 1,
            });
        }
        let card = self.visible[tier.index()][column]
            .take()
            .ok_or(ActionError::EmptyCardSlot)?;
        self.replace_slot(tier, column);
        Ok(card)
    }

    /// Refills a vacated slot from the tier stack. Calling this on a slot
    /// that still holds a card is a caller bug, not a game-rule failure.
    pub fn replace_slot(&mut self, tier: Tier, column: usize) {
        let slot = &mut self.visible[tier.index()][column];
        assert!(slot.is_none(), "replace_slot called on an occupied slot");
        *slot = self.decks[tier.index()].pop();
    }

    /// Flattened view of every non-empty visible slot, for rendering and
    /// for automated decision policies.
    pub fn visible_cards(&self) -> Vec<(Tier, usize, &DevelopmentCard)> {
        let mut cards = Vec::new();
        for tier in Tier::ALL {
            for (column, slot) in self.visible[tier.index()].iter().enumerate() {
                if let Some(card) = slot {
                    cards.push((tier, column, card));
                }
            }
        }
        cards
    }

    /// The visible window of one tier, empty slots included.
    pub fn window(&self, tier: Tier) -> &[Option<DevelopmentCard>; VISIBLE_COLUMNS] {
        &self.visible[tier.index()]
    }

    /// Cards left in a tier's face-down stack.
    pub fn deck_len(&self, tier: Tier) -> usize {
        self.decks[tier.index()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ResourcePool;
    use crate::token::TokenKind;

    fn card(points: u8) -> DevelopmentCard {
        let mut cost = ResourcePool::new();
        cost.set(TokenKind::Ruby, 1);
        DevelopmentCard::new(Tier::One, cost, TokenKind::Emerald, points)
    }

    fn catalog_with_tier_one(count: usize) -> CardCatalog {
        let deck: Vec<DevelopmentCard> = (0..count).map(|i| card(i as u8)).collect();
        CardCatalog::new([deck, vec![], vec![]])
    }

    #[test]
    fn deals_four_cards_per_tier_at_start() {
        let catalog = catalog_with_tier_one(6);
        assert_eq!(catalog.deck_len(Tier::One), 2);
        assert_eq!(catalog.visible_cards().len(), 4);
    }

    #[test]
    fn short_deck_leaves_trailing_slots_empty() {
        let catalog = catalog_with_tier_one(2);
        assert_eq!(catalog.deck_len(Tier::One), 0);
        assert_eq!(catalog.visible_cards().len(), 2);
        assert_eq!(catalog.card(Tier::One, 3), Err(ActionError::EmptyCardSlot));
    }

    #[test]
    fn take_refills_from_the_stack() {
        let mut catalog = catalog_with_tier_one(6);
        let taken = catalog.take(Tier::One, 0).unwrap();
        assert_eq!(taken.points, 5); // top of the dealt window
        assert_eq!(catalog.deck_len(Tier::One), 1);
        assert_eq!(catalog.visible_cards().len(), 4);
    }

    #[test]
    fn take_from_exhausted_stack_leaves_the_slot_empty() {
        let mut catalog = catalog_with_tier_one(4);
        catalog.take(Tier::One, 1).unwrap();
        assert_eq!(catalog.visible_cards().len(), 3);
        assert_eq!(catalog.card(Tier::One, 1), Err(ActionError::EmptyCardSlot));
    }

    #[test]
    fn out_of_range_column_is_an_input_error() {
        let catalog = catalog_with_tier_one(6);
        assert_eq!(
            catalog.card(Tier::One, 4),
            Err(ActionError::InvalidTierOrColumn { tier: 1, column: 5 })
        );
    }

    #[test]
    fn large_columns_report_their_real_position() {
        let catalog = catalog_with_tier_one(6);
        assert_eq!(
            catalog.card(Tier::One, 300),
            Err(ActionError::InvalidTierOrColumn {
                tier: 1,
                column: 301
            })
        );
    }

    #[test]
    fn draw_pops_until_exhausted() {
        let mut catalog = catalog_with_tier_one(5);
        assert!(catalog.draw(Tier::One).is_some());
        assert!(catalog.draw(Tier::One).is_none());
        assert!(catalog.draw(Tier::Two).is_none());
    }
}
