use serde::Serialize;

use crate::card::{Noble, NobleId};
use crate::pool::ResourcePool;

/// The pool of unclaimed nobles, sized to `player_count + 1` at setup.
/// A claimed noble is removed permanently and never revisited.
#[derive(Debug, Clone, Serialize)]
pub struct NobleRegistry {
    nobles: Vec<Noble>,
}

impl NobleRegistry {
    pub fn new(nobles: Vec<Noble>) -> Self {
        Self { nobles }
    }

    /// Every remaining noble whose cost is fully covered by the given bonus
    /// counts. The quantifier is "all": every kind in the noble's cost must
    /// be met or exceeded.
    pub fn eligible(&self, bonuses: &ResourcePool) -> Vec<&Noble> {
        self.nobles
            .iter()
            .filter(|noble| bonuses.covers(&noble.cost))
            .collect()
    }

    /// Removes a noble from the registry, handing it to the caller for the
    /// claiming player's ledger. `None` if it was already claimed.
    pub fn claim(&mut self, id: NobleId) -> Option<Noble> {
        let position = self.nobles.iter().position(|noble| noble.id == id)?;
        Some(self.nobles.remove(position))
    }

    pub fn remaining(&self) -> &[Noble] {
        &self.nobles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn noble(id: u8, emeralds: u8, rubies: u8) -> Noble {
        let mut cost = ResourcePool::new();
        cost.set(TokenKind::Emerald, emeralds);
        cost.set(TokenKind::Ruby, rubies);
        Noble::new(NobleId(id), cost, 3)
    }

    fn bonuses(emeralds: u8, rubies: u8) -> ResourcePool {
        let mut pool = ResourcePool::new();
        pool.set(TokenKind::Emerald, emeralds);
        pool.set(TokenKind::Ruby, rubies);
        pool
    }

    #[test]
    fn every_cost_kind_must_be_covered() {
        let registry = NobleRegistry::new(vec![noble(1, 3, 3)]);
        // Covering only one of the two kinds is not enough.
        assert!(registry.eligible(&bonuses(4, 0)).is_empty());
        assert!(registry.eligible(&bonuses(0, 4)).is_empty());
        assert_eq!(registry.eligible(&bonuses(3, 3)).len(), 1);
        assert_eq!(registry.eligible(&bonuses(5, 3)).len(), 1);
    }

    #[test]
    fn several_nobles_can_be_eligible_at_once() {
        let registry = NobleRegistry::new(vec![noble(1, 3, 0), noble(2, 0, 3), noble(3, 4, 4)]);
        let eligible = registry.eligible(&bonuses(3, 3));
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn claimed_nobles_never_come_back() {
        let mut registry = NobleRegistry::new(vec![noble(1, 3, 0), noble(2, 0, 3)]);
        let claimed = registry.claim(NobleId(1)).unwrap();
        assert_eq!(claimed.id, NobleId(1));
        assert!(registry.claim(NobleId(1)).is_none());
        // Even a player who covers the cost no longer sees it.
        let eligible = registry.eligible(&bonuses(9, 9));
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, NobleId(2));
    }
}
