use crate::card::Tier;
use crate::error::ActionError;
use crate::game::Game;
use crate::pool::ResourcePool;
use crate::token::TokenKind;

/// Tokens granted by a "two of the same kind" pick.
pub const SAME_PICK_COUNT: u8 = 2;

/// Distinct kinds required by a "three different" pick.
pub const DIFFERENT_PICK_KINDS: usize = 3;

/// Where a card to buy lives: the visible window or a reserved slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLocation {
    Board { tier: Tier, column: usize },
    Reserved(usize),
}

/// One turn decision, parameters included. Human and automated players
/// produce the same variants; validation does not care who asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PickSameTokens(TokenKind),
    PickDifferentTokens([TokenKind; DIFFERENT_PICK_KINDS]),
    BuyCard(CardLocation),
    ReserveCard { tier: Tier, column: Option<usize> },
    Pass,
}

/// A validated action, ready to apply. Carries everything resolved during
/// validation (notably the exact payment) so that applying cannot make a
/// rule decision of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    TakeSame(TokenKind),
    TakeDifferent([TokenKind; DIFFERENT_PICK_KINDS]),
    Purchase {
        location: CardLocation,
        payment: ResourcePool,
    },
    Reserve {
        tier: Tier,
        column: Option<usize>,
    },
    Pass,
}

/// Phases of one turn. Validation failure loops back to selection; the
/// post-turn obligations run unconditionally once an effect is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    SelectingAction,
    ValidatingInput,
    ApplyingEffect,
    PostTurnDiscard,
    PostTurnNobleVisit,
    TurnComplete,
}

/// Checks an action against the current state without mutating anything.
pub fn validate(game: &Game, action: &Action) -> Result<Effect, ActionError> {
    let player = game.current_player();
    match action {
        Action::PickSameTokens(kind) => {
            if !kind.is_gem() {
                return Err(ActionError::InvalidInputFormat(
                    "the wildcard cannot be picked from the bank".into(),
                ));
            }
            if !game.bank().can_give_same(*kind) {
                return Err(ActionError::InsufficientResources);
            }
            Ok(Effect::TakeSame(*kind))
        }
        Action::PickDifferentTokens(kinds) => {
            if kinds.iter().any(|kind| !kind.is_gem()) {
                return Err(ActionError::InvalidInputFormat(
                    "the wildcard cannot be picked from the bank".into(),
                ));
            }
            if kinds[0] == kinds[1] || kinds[0] == kinds[2] || kinds[1] == kinds[2] {
                return Err(ActionError::InvalidInputFormat(
                    "the three kinds must be distinct".into(),
                ));
            }
            if !game.bank().can_give_different(kinds) {
                return Err(ActionError::InsufficientResources);
            }
            Ok(Effect::TakeDifferent(*kinds))
        }
        Action::BuyCard(location) => {
            let card = match location {
                CardLocation::Board { tier, column } => game.catalog().card(*tier, *column)?,
                CardLocation::Reserved(index) => player.reserved_card(*index)?,
            };
            let payment = player.payment_for(&card.cost)?;
            Ok(Effect::Purchase {
                location: *location,
                payment,
            })
        }
        Action::ReserveCard { tier, column } => {
            if !player.has_free_reserve_slot() {
                return Err(ActionError::ReservationLimitReached);
            }
            match column {
                Some(column) => {
                    game.catalog().card(*tier, *column)?;
                }
                // Reserving blind needs a card left in the stack.
                None => {
                    if game.catalog().deck_len(*tier) == 0 {
                        return Err(ActionError::EmptyCardSlot);
                    }
                }
            }
            Ok(Effect::Reserve {
                tier: *tier,
                column: *column,
            })
        }
        Action::Pass => Ok(Effect::Pass),
    }
}

/// Applies a validated effect. Errors here mean the effect was produced
/// against a different state, a caller bug; every fallible step runs before
/// the first mutation, so even that path leaves the ledgers unchanged.
pub fn apply(game: &mut Game, effect: Effect) -> Result<(), ActionError> {
    let acting = game.current_index();
    match effect {
        Effect::TakeSame(kind) => {
            game.bank_mut().update(kind, -(SAME_PICK_COUNT as i16));
            game.player_mut(acting)
                .tokens
                .update(kind, SAME_PICK_COUNT as i16);
        }
        Effect::TakeDifferent(kinds) => {
            for kind in kinds {
                game.bank_mut().update(kind, -1);
                game.player_mut(acting).tokens.update(kind, 1);
            }
        }
        Effect::Purchase { location, payment } => {
            let card = match location {
                CardLocation::Board { tier, column } => game.catalog_mut().take(tier, column)?,
                CardLocation::Reserved(index) => game.player_mut(acting).take_reserved(index)?,
            };
            for (kind, count) in payment.iter() {
                game.player_mut(acting).tokens.update(kind, -(count as i16));
                // Spent gems go back to the bank; spent wildcards are
                // destroyed, closing the mint-on-reserve loop.
                if kind.is_gem() {
                    game.bank_mut().update(kind, count as i16);
                }
            }
            game.player_mut(acting).add_purchase(card);
        }
        Effect::Reserve { tier, column } => {
            if !game.player(acting).has_free_reserve_slot() {
                return Err(ActionError::ReservationLimitReached);
            }
            let card = match column {
                Some(column) => game.catalog_mut().take(tier, column)?,
                None => game
                    .catalog_mut()
                    .draw(tier)
                    .ok_or(ActionError::EmptyCardSlot)?,
            };
            game.player_mut(acting).reserve(card)?;
        }
        Effect::Pass => {}
    }
    Ok(())
}
