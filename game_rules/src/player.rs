use serde::Serialize;

use crate::card::{DevelopmentCard, Noble};
use crate::error::ActionError;
use crate::pool::ResourcePool;
use crate::token::TokenKind;

/// How many cards a player may hold reserved at once.
pub const MAX_RESERVED_CARDS: usize = 3;

/// The hand limit: any excess must be discarded before the turn ends.
pub const TOKEN_LIMIT: u8 = 10;

/// One player's ledger: tokens held, purchased cards (the source of bonus
/// counts and points), claimed nobles, reserved slots and score.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub tokens: ResourcePool,
    owned: Vec<DevelopmentCard>,
    nobles: Vec<Noble>,
    reserved: [Option<DevelopmentCard>; MAX_RESERVED_CARDS],
    points: u8,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tokens: ResourcePool::new(),
            owned: Vec::new(),
            nobles: Vec::new(),
            reserved: Default::default(),
            points: 0,
        }
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn owned_cards(&self) -> &[DevelopmentCard] {
        &self.owned
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn reserved_slots(&self) -> &[Option<DevelopmentCard>; MAX_RESERVED_CARDS] {
        &self.reserved
    }

    /// Permanent bonus count for one kind, derived from the bonus kind of
    /// every purchased card. Reserved cards contribute nothing until bought.
    pub fn bonus_count(&self, kind: TokenKind) -> u8 {
        self.owned.iter().filter(|card| card.bonus == kind).count() as u8
    }

    /// All bonus counts at once, for noble eligibility checks.
    pub fn bonuses(&self) -> ResourcePool {
        let mut pool = ResourcePool::new();
        for card in &self.owned {
            pool.update(card.bonus, 1);
        }
        pool
    }

    /// Computes the tokens this player would spend to cover `cost`: bonuses
    /// first, then gem tokens, with wildcard tokens substituting one-for-one
    /// for whatever is still short. Fails without side effects if the cost
    /// cannot be met.
    pub fn payment_for(&self, cost: &ResourcePool) -> Result<ResourcePool, ActionError> {
        let mut payment = ResourcePool::new();
        let mut jokers_needed: u8 = 0;
        for kind in TokenKind::GEMS {
            let due = cost.get(kind).saturating_sub(self.bonus_count(kind));
            let from_tokens = due.min(self.tokens.get(kind));
            payment.set(kind, from_tokens);
            jokers_needed += due - from_tokens;
        }
        if jokers_needed > self.tokens.get(TokenKind::Joker) {
            return Err(ActionError::InsufficientResources);
        }
        payment.set(TokenKind::Joker, jokers_needed);
        Ok(payment)
    }

    pub fn can_afford(&self, card: &DevelopmentCard) -> bool {
        self.payment_for(&card.cost).is_ok()
    }

    pub fn has_free_reserve_slot(&self) -> bool {
        self.reserved.iter().any(|slot| slot.is_none())
    }

    /// Places a card in the first empty reserved slot and mints the one
    /// wildcard token the reservation grants.
    pub fn reserve(&mut self, card: DevelopmentCard) -> Result<(), ActionError> {
        let slot = self
            .reserved
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(ActionError::ReservationLimitReached)?;
        *slot = Some(card);
        self.tokens.update(TokenKind::Joker, 1);
        Ok(())
    }

    /// Bounds-checked lookup of a reserved card.
    pub fn reserved_card(&self, index: usize) -> Result<&DevelopmentCard, ActionError> {
        if index >= MAX_RESERVED_CARDS {
            return Err(ActionError::InvalidReservedIndex(index + 1));
        }
        self.reserved[index].as_ref().ok_or(ActionError::EmptyCardSlot)
    }

    /// Removes a reserved card for purchase, freeing the slot.
    pub fn take_reserved(&mut self, index: usize) -> Result<DevelopmentCard, ActionError> {
        if index >= MAX_RESERVED_CARDS {
            return Err(ActionError::InvalidReservedIndex(index + 1));
        }
        self.reserved[index].take().ok_or(ActionError::EmptyCardSlot)
    }

    /// Appends a purchased card and scores its points.
    pub fn add_purchase(&mut self, card: DevelopmentCard) {
        self.points += card.points;
        self.owned.push(card);
    }

    /// Records a claimed noble and scores its points. Nobles contribute no
    /// bonus counts and never interact with costs again.
    pub fn claim_noble(&mut self, noble: Noble) {
        self.points += noble.points;
        self.nobles.push(noble);
    }

    /// Tokens held across all kinds, wildcard included.
    pub fn total_tokens(&self) -> u8 {
        self.tokens.total()
    }

    /// How many tokens must be discarded before the turn may end.
    pub fn excess_to_discard(&self) -> u8 {
        self.total_tokens().saturating_sub(TOKEN_LIMIT)
    }
}
