use rand::seq::SliceRandom;
use rand::Rng;

use crate::action::{Action, CardLocation};
use crate::card::{Noble, NobleId, Tier};
use crate::error::ActionError;
use crate::game::Game;
use crate::player::MAX_RESERVED_CARDS;
use crate::token::TokenKind;

/// How a seat makes its decisions. The game loop calls back into the policy
/// at every decision point; a policy never mutates the game, it only answers.
/// Rejected answers are reported through [`DecisionPolicy::notify_rejected`]
/// and the same question is asked again.
pub trait DecisionPolicy {
    /// The action to attempt this turn.
    fn choose_action(&mut self, game: &Game, player: usize) -> Action;

    /// Exactly `excess` token kinds to give up, repeats allowed.
    fn choose_discard(&mut self, game: &Game, player: usize, excess: u8) -> Vec<TokenKind>;

    /// One noble out of several the player qualifies for.
    fn choose_noble(&mut self, game: &Game, player: usize, eligible: &[Noble]) -> NobleId;

    /// The previous answer was invalid; the next call repeats the question.
    fn notify_rejected(&mut self, _error: &ActionError) {}
}

/// An automated seat. Re-derives its candidates from the current state on
/// every call, so a rejection (possible only if the state shifted between
/// question and answer) simply produces a fresh valid pick. Deterministic
/// under a seeded RNG.
///
/// Preference ladder: buy the best affordable card, else take three
/// different gems, else two of a deep pile, else reserve, else pass.
pub struct RandomPolicy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Affordable purchases, visible window and reserved slots both,
    /// restricted to the highest tier that has one.
    fn buy_candidates(&self, game: &Game, player: usize) -> Vec<CardLocation> {
        let ledger = game.player(player);
        let mut candidates: Vec<(Tier, CardLocation)> = game
            .catalog()
            .visible_cards()
            .into_iter()
            .filter(|(_, _, card)| ledger.can_afford(card))
            .map(|(tier, column, _)| (tier, CardLocation::Board { tier, column }))
            .collect();
        for index in 0..MAX_RESERVED_CARDS {
            if let Ok(card) = ledger.reserved_card(index) {
                if ledger.can_afford(card) {
                    candidates.push((card.tier, CardLocation::Reserved(index)));
                }
            }
        }
        let Some(best) = candidates.iter().map(|(tier, _)| *tier).max_by_key(|t| t.index())
        else {
            return Vec::new();
        };
        candidates
            .into_iter()
            .filter(|(tier, _)| *tier == best)
            .map(|(_, location)| location)
            .collect()
    }
}

impl<R: Rng> DecisionPolicy for RandomPolicy<R> {
    fn choose_action(&mut self, game: &Game, player: usize) -> Action {
        let purchases = self.buy_candidates(game, player);
        if let Some(location) = purchases.choose(&mut self.rng) {
            return Action::BuyCard(*location);
        }

        let gems: Vec<TokenKind> = TokenKind::GEMS
            .iter()
            .copied()
            .filter(|kind| game.bank().get(*kind) >= 1)
            .collect();
        if gems.len() >= 3 {
            let mut picked: Vec<TokenKind> =
                gems.choose_multiple(&mut self.rng, 3).copied().collect();
            picked.shuffle(&mut self.rng);
            return Action::PickDifferentTokens([picked[0], picked[1], picked[2]]);
        }

        let deep: Vec<TokenKind> = TokenKind::GEMS
            .iter()
            .copied()
            .filter(|kind| game.bank().can_give_same(*kind))
            .collect();
        if let Some(kind) = deep.choose(&mut self.rng) {
            return Action::PickSameTokens(*kind);
        }

        if game.player(player).has_free_reserve_slot() {
            let visible = game.catalog().visible_cards();
            if let Some((tier, column, _)) = visible.choose(&mut self.rng) {
                return Action::ReserveCard {
                    tier: *tier,
                    column: Some(*column),
                };
            }
        }

        Action::Pass
    }

    fn choose_discard(&mut self, game: &Game, player: usize, excess: u8) -> Vec<TokenKind> {
        let mut held: Vec<TokenKind> = Vec::new();
        for (kind, count) in game.player(player).tokens.iter() {
            held.extend(std::iter::repeat(kind).take(count as usize));
        }
        held.choose_multiple(&mut self.rng, excess as usize)
            .copied()
            .collect()
    }

    fn choose_noble(&mut self, _game: &Game, _player: usize, eligible: &[Noble]) -> NobleId {
        eligible
            .choose(&mut self.rng)
            .map(|noble| noble.id)
            .unwrap_or(NobleId(0))
    }
}
