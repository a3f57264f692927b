use std::collections::HashMap;

use serde::Serialize;

use crate::token::TokenKind;

/// Minimum pile size in the bank for a "take two of the same kind" pick.
pub const MIN_PILE_FOR_SAME_PICK: u8 = 4;

/// A token ledger: one non-negative count per kind. The bank and every
/// player's hand share this shape; tokens move between pools, they are never
/// duplicated.
///
/// Decrements clamp at zero. The clamp is a policy, not a correctness fix:
/// callers are expected to have validated sufficiency before withdrawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePool {
    counts: HashMap<TokenKind, u8>,
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourcePool {
    /// An empty pool, every kind at zero.
    pub fn new() -> Self {
        Self {
            counts: TokenKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
        }
    }

    /// A pool holding `count` of each of the five gems and no wildcards,
    /// the shape of a freshly seeded bank.
    pub fn uniform_gems(count: u8) -> Self {
        let mut pool = Self::new();
        for kind in TokenKind::GEMS {
            pool.set(kind, count);
        }
        pool
    }

    pub fn get(&self, kind: TokenKind) -> u8 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn set(&mut self, kind: TokenKind, count: u8) {
        self.counts.insert(kind, count);
    }

    /// Adds `delta` to the count for `kind`, clamping the result at zero.
    pub fn update(&mut self, kind: TokenKind, delta: i16) {
        let current = self.get(kind) as i16;
        let next = (current + delta).max(0);
        self.counts.insert(kind, next as u8);
    }

    /// Kinds currently held, in the fixed kind order.
    pub fn available_kinds(&self) -> Vec<TokenKind> {
        TokenKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.get(*kind) > 0)
            .collect()
    }

    /// True iff the pile for `kind` is deep enough to give two at once.
    pub fn can_give_same(&self, kind: TokenKind) -> bool {
        self.get(kind) >= MIN_PILE_FOR_SAME_PICK
    }

    /// True iff every listed kind has at least one token available.
    pub fn can_give_different(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().all(|kind| self.get(*kind) >= 1)
    }

    /// Total held across all kinds, wildcard included.
    pub fn total(&self) -> u8 {
        TokenKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    /// (kind, count) pairs in the fixed kind order, zero counts skipped.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, u8)> + '_ {
        TokenKind::ALL
            .iter()
            .map(|kind| (*kind, self.get(*kind)))
            .filter(|(_, count)| *count > 0)
    }

    /// True iff `self` covers `required` kind by kind.
    pub fn covers(&self, required: &ResourcePool) -> bool {
        TokenKind::ALL
            .iter()
            .all(|kind| self.get(*kind) >= required.get(*kind))
    }
}
