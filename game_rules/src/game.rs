use serde::Serialize;
use tracing::{debug, info, warn};

use crate::action::{apply, validate, TurnState};
use crate::catalog::CardCatalog;
use crate::error::{ActionError, SetupError};
use crate::nobles::NobleRegistry;
use crate::player::Player;
use crate::policy::DecisionPolicy;
use crate::pool::ResourcePool;
use crate::token::TokenKind;

/// Score at which the game ends (once the running round completes).
pub const WIN_THRESHOLD: u8 = 15;

/// Bank seeding per player count: how many of each gem the bank starts with.
/// Wildcards always start at zero; they enter play only through reservation.
pub fn starting_bank(player_count: usize) -> Result<ResourcePool, SetupError> {
    let per_gem = match player_count {
        2 => 4,
        3 => 5,
        4 => 7,
        other => return Err(SetupError::InvalidPlayerCount(other)),
    };
    Ok(ResourcePool::uniform_gems(per_gem))
}

/// The whole table: bank, card supply, unclaimed nobles, player ledgers and
/// whose turn it is. All rule decisions flow through [`validate`]/[`apply`]
/// and the post-turn obligations in [`Game::play_turn`].
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    bank: ResourcePool,
    catalog: CardCatalog,
    nobles: NobleRegistry,
    players: Vec<Player>,
    current: usize,
}

impl Game {
    pub fn new(
        bank: ResourcePool,
        catalog: CardCatalog,
        nobles: NobleRegistry,
        players: Vec<Player>,
    ) -> Self {
        Self {
            bank,
            catalog,
            nobles,
            players,
            current: 0,
        }
    }

    pub fn bank(&self) -> &ResourcePool {
        &self.bank
    }

    pub(crate) fn bank_mut(&mut self) -> &mut ResourcePool {
        &mut self.bank
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut CardCatalog {
        &mut self.catalog
    }

    pub fn nobles(&self) -> &NobleRegistry {
        &self.nobles
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub(crate) fn player_mut(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Runs one complete turn for the current player: action selection with
    /// retry on rejection, then the forced discard, then the noble visit.
    pub fn play_turn(&mut self, policy: &mut dyn DecisionPolicy) {
        let acting = self.current;
        debug!(player = %self.players[acting].name, "turn started");

        let mut state = TurnState::SelectingAction;
        while state != TurnState::ApplyingEffect {
            debug!(?state, "turn phase");
            let action = policy.choose_action(self, acting);
            state = TurnState::ValidatingInput;
            debug!(?state, "turn phase");
            match validate(self, &action).and_then(|effect| apply(self, effect)) {
                Ok(()) => state = TurnState::ApplyingEffect,
                Err(error) => {
                    warn!(player = %self.players[acting].name, %error, "action rejected");
                    policy.notify_rejected(&error);
                    state = TurnState::SelectingAction;
                }
            }
        }

        state = TurnState::PostTurnDiscard;
        debug!(?state, "post-turn obligations");
        self.settle_discard(acting, policy);

        state = TurnState::PostTurnNobleVisit;
        debug!(?state, "post-turn obligations");
        self.settle_noble_visit(acting, policy);

        state = TurnState::TurnComplete;
        debug!(?state, player = %self.players[acting].name, points = self.players[acting].points());
        self.current = (self.current + 1) % self.players.len();
    }

    /// Forces the acting player back down to the hand limit. The policy
    /// names the kinds to give up; an ill-formed list is rejected and asked
    /// again, exactly like a rejected action.
    fn settle_discard(&mut self, acting: usize, policy: &mut dyn DecisionPolicy) {
        loop {
            let excess = self.players[acting].excess_to_discard();
            if excess == 0 {
                return;
            }
            let kinds = policy.choose_discard(self, acting, excess);
            match self.check_discard(acting, excess, &kinds) {
                Ok(()) => {
                    for kind in kinds {
                        self.players[acting].tokens.update(kind, -1);
                        // Gems return to the bank; a discarded wildcard is
                        // destroyed, closing the mint-on-reserve loop.
                        if kind.is_gem() {
                            self.bank.update(kind, 1);
                        }
                    }
                    return;
                }
                Err(error) => {
                    warn!(player = %self.players[acting].name, %error, "discard rejected");
                    policy.notify_rejected(&error);
                }
            }
        }
    }

    fn check_discard(
        &self,
        acting: usize,
        excess: u8,
        kinds: &[TokenKind],
    ) -> Result<(), ActionError> {
        if kinds.len() != excess as usize {
            return Err(ActionError::InvalidInputFormat(format!(
                "expected {excess} tokens to discard, got {}",
                kinds.len()
            )));
        }
        let mut held = self.players[acting].tokens.clone();
        for kind in kinds {
            if held.get(*kind) == 0 {
                return Err(ActionError::InsufficientResources);
            }
            held.update(*kind, -1);
        }
        Ok(())
    }

    /// Awards at most one noble per turn. A single eligible noble is claimed
    /// automatically; among several the acting player chooses.
    fn settle_noble_visit(&mut self, acting: usize, policy: &mut dyn DecisionPolicy) {
        let bonuses = self.players[acting].bonuses();
        let eligible: Vec<_> = self
            .nobles
            .eligible(&bonuses)
            .into_iter()
            .cloned()
            .collect();
        let chosen = match eligible.len() {
            0 => return,
            1 => eligible[0].id,
            _ => loop {
                let id = policy.choose_noble(self, acting, &eligible);
                if eligible.iter().any(|noble| noble.id == id) {
                    break id;
                }
                let error =
                    ActionError::InvalidInputFormat("that noble is not claimable".into());
                warn!(player = %self.players[acting].name, %error, "noble choice rejected");
                policy.notify_rejected(&error);
            },
        };
        if let Some(noble) = self.nobles.claim(chosen) {
            info!(player = %self.players[acting].name, noble = chosen.0, "noble claimed");
            self.players[acting].claim_noble(noble);
        }
    }

    /// True once any player has reached the winning score. Checked between
    /// rounds, never mid-round, so trailing players get their last turn.
    pub fn is_game_over(&self) -> bool {
        self.players
            .iter()
            .any(|player| player.points() >= WIN_THRESHOLD)
    }

    /// Every player at or above the threshold once the game is over. More
    /// than one entry means a tie.
    pub fn winners(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.points() >= WIN_THRESHOLD)
            .collect()
    }

    /// Plays rounds until the game is over. `policies[i]` decides for
    /// `players[i]`; the running round always completes before the check.
    pub fn run(&mut self, policies: &mut [Box<dyn DecisionPolicy>]) {
        assert_eq!(
            policies.len(),
            self.players.len(),
            "one policy per player"
        );
        let mut round = 0u32;
        while !self.is_game_over() {
            round += 1;
            debug!(round, "round started");
            self.current = 0;
            for index in 0..self.players.len() {
                self.play_turn(policies[index].as_mut());
            }
        }
        let names: Vec<_> = self.winners().iter().map(|p| p.name.clone()).collect();
        info!(round, winners = ?names, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::card::{DevelopmentCard, Noble, NobleId, Tier};

    /// Replays a fixed script of decisions; panics if asked beyond it.
    struct ScriptPolicy {
        actions: Vec<Action>,
        discards: Vec<Vec<TokenKind>>,
        noble_choices: Vec<NobleId>,
        rejections: usize,
    }

    impl ScriptPolicy {
        fn new(actions: Vec<Action>) -> Self {
            Self {
                actions,
                discards: Vec::new(),
                noble_choices: Vec::new(),
                rejections: 0,
            }
        }

        fn with_discards(mut self, discards: Vec<Vec<TokenKind>>) -> Self {
            self.discards = discards;
            self
        }

        fn with_noble_choices(mut self, choices: Vec<NobleId>) -> Self {
            self.noble_choices = choices;
            self
        }
    }

    impl DecisionPolicy for ScriptPolicy {
        fn choose_action(&mut self, _game: &Game, _player: usize) -> Action {
            self.actions.remove(0)
        }

        fn choose_discard(&mut self, _game: &Game, _player: usize, _excess: u8) -> Vec<TokenKind> {
            self.discards.remove(0)
        }

        fn choose_noble(&mut self, _game: &Game, _player: usize, _eligible: &[Noble]) -> NobleId {
            self.noble_choices.remove(0)
        }

        fn notify_rejected(&mut self, _error: &ActionError) {
            self.rejections += 1;
        }
    }

    fn bonus_card(kind: TokenKind, points: u8) -> DevelopmentCard {
        DevelopmentCard::new(Tier::One, ResourcePool::new(), kind, points)
    }

    fn game_with(nobles: Vec<Noble>, players: usize) -> Game {
        let names = ["ada", "grace", "edsger", "barbara"];
        let players = (0..players)
            .map(|i| Player::new(i, names[i]))
            .collect();
        Game::new(
            ResourcePool::uniform_gems(4),
            CardCatalog::new([vec![], vec![], vec![]]),
            NobleRegistry::new(nobles),
            players,
        )
    }

    #[test]
    fn starting_bank_scales_with_player_count() {
        assert_eq!(starting_bank(2).unwrap().get(TokenKind::Ruby), 4);
        assert_eq!(starting_bank(3).unwrap().get(TokenKind::Ruby), 5);
        assert_eq!(starting_bank(4).unwrap().get(TokenKind::Ruby), 7);
        assert!(matches!(
            starting_bank(5),
            Err(SetupError::InvalidPlayerCount(5))
        ));
        assert_eq!(starting_bank(2).unwrap().get(TokenKind::Joker), 0);
    }

    #[test]
    fn rejected_action_is_retried_without_side_effects() {
        let mut game = game_with(vec![], 2);
        // First decision asks for two of a kind the bank cannot give.
        let mut policy = ScriptPolicy::new(vec![
            Action::PickSameTokens(TokenKind::Joker),
            Action::PickSameTokens(TokenKind::Ruby),
        ]);
        game.play_turn(&mut policy);
        assert_eq!(policy.rejections, 1);
        assert_eq!(game.player(0).tokens.get(TokenKind::Ruby), 2);
        assert_eq!(game.player(0).tokens.get(TokenKind::Joker), 0);
        assert_eq!(game.current_index(), 1);
    }

    #[test]
    fn turn_ending_above_the_limit_forces_a_discard() {
        // Player sits at 9 tokens, picks 3 more, and must give 2 back.
        let mut game = game_with(vec![], 2);
        for kind in [TokenKind::Diamond, TokenKind::Sapphire, TokenKind::Emerald] {
            game.player_mut(0).tokens.set(kind, 3);
        }
        assert_eq!(game.player(0).total_tokens(), 9);

        let mut policy = ScriptPolicy::new(vec![Action::PickDifferentTokens([
            TokenKind::Ruby,
            TokenKind::Onyx,
            TokenKind::Diamond,
        ])])
        .with_discards(vec![
            // First offer is one token short and is rejected.
            vec![TokenKind::Diamond],
            vec![TokenKind::Diamond, TokenKind::Ruby],
        ]);
        game.play_turn(&mut policy);

        assert_eq!(policy.rejections, 1);
        assert_eq!(game.player(0).total_tokens(), 10);
        // The discarded gems went back to the bank.
        assert_eq!(game.bank().get(TokenKind::Ruby), 4);
        assert_eq!(game.bank().get(TokenKind::Diamond), 4);
    }

    #[test]
    fn discarded_wildcards_are_destroyed() {
        let mut game = game_with(vec![], 2);
        game.player_mut(0).tokens.set(TokenKind::Joker, 3);
        for kind in [TokenKind::Diamond, TokenKind::Sapphire] {
            game.player_mut(0).tokens.set(kind, 4);
        }
        // 11 tokens held; pass, then shed the one excess as a wildcard.
        let mut policy = ScriptPolicy::new(vec![Action::Pass])
            .with_discards(vec![vec![TokenKind::Joker]]);
        game.play_turn(&mut policy);
        assert_eq!(game.player(0).total_tokens(), 10);
        assert_eq!(game.bank().get(TokenKind::Joker), 0);
    }

    #[test]
    fn a_single_eligible_noble_is_claimed_automatically() {
        let mut cost = ResourcePool::new();
        cost.set(TokenKind::Emerald, 2);
        let mut game = game_with(vec![Noble::new(NobleId(7), cost, 3)], 2);
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Emerald, 0));
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Emerald, 0));

        let mut policy = ScriptPolicy::new(vec![Action::Pass]);
        game.play_turn(&mut policy);

        assert_eq!(game.player(0).points(), 3);
        assert_eq!(game.player(0).nobles().len(), 1);
        assert!(game.nobles().remaining().is_empty());
    }

    #[test]
    fn the_player_chooses_among_several_eligible_nobles() {
        let mut cost_a = ResourcePool::new();
        cost_a.set(TokenKind::Ruby, 1);
        let mut cost_b = ResourcePool::new();
        cost_b.set(TokenKind::Ruby, 1);
        let nobles = vec![
            Noble::new(NobleId(1), cost_a, 3),
            Noble::new(NobleId(2), cost_b, 3),
        ];
        let mut game = game_with(nobles, 2);
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Ruby, 0));

        let mut policy = ScriptPolicy::new(vec![Action::Pass])
            // An id outside the eligible set is rejected and asked again.
            .with_noble_choices(vec![NobleId(9), NobleId(2)]);
        game.play_turn(&mut policy);

        assert_eq!(policy.rejections, 1);
        assert_eq!(game.player(0).nobles()[0].id, NobleId(2));
        // The unclaimed noble stays on the table.
        assert_eq!(game.nobles().remaining().len(), 1);
        assert_eq!(game.nobles().remaining()[0].id, NobleId(1));
    }

    #[test]
    fn one_noble_claim_per_turn_even_when_two_qualify() {
        let mut cost = ResourcePool::new();
        cost.set(TokenKind::Onyx, 1);
        let nobles = vec![
            Noble::new(NobleId(1), cost.clone(), 3),
            Noble::new(NobleId(2), cost, 3),
        ];
        let mut game = game_with(nobles, 2);
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Onyx, 0));

        let mut policy =
            ScriptPolicy::new(vec![Action::Pass]).with_noble_choices(vec![NobleId(1)]);
        game.play_turn(&mut policy);
        assert_eq!(game.player(0).points(), 3);
        assert_eq!(game.nobles().remaining().len(), 1);
    }

    #[test]
    fn the_round_finishes_before_winners_are_declared() {
        let mut game = game_with(vec![], 2);
        // Seed the first player one purchase away from the threshold.
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Ruby, 14));
        game.player_mut(1).add_purchase(bonus_card(TokenKind::Ruby, 14));

        let mut cost = ResourcePool::new();
        cost.set(TokenKind::Ruby, 1);
        let noble = Noble::new(NobleId(1), cost.clone(), 3);
        let noble_two = Noble::new(NobleId(2), cost, 3);
        game = Game::new(
            game.bank().clone(),
            CardCatalog::new([vec![], vec![], vec![]]),
            NobleRegistry::new(vec![noble, noble_two]),
            game.players().to_vec(),
        );

        let mut policies: Vec<Box<dyn DecisionPolicy>> = vec![
            Box::new(ScriptPolicy::new(vec![Action::Pass]).with_noble_choices(vec![NobleId(1)])),
            Box::new(ScriptPolicy::new(vec![Action::Pass]).with_noble_choices(vec![NobleId(2)])),
        ];
        game.run(&mut policies);

        // Both crossed 15 in the same round: both are winners.
        let winners = game.winners();
        assert_eq!(winners.len(), 2);
        assert!(winners.iter().all(|player| player.points() == 17));
    }

    #[test]
    fn no_winner_below_the_threshold() {
        let mut game = game_with(vec![], 2);
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Ruby, 14));
        assert!(!game.is_game_over());
        assert!(game.winners().is_empty());
        game.player_mut(0).add_purchase(bonus_card(TokenKind::Ruby, 1));
        assert!(game.is_game_over());
        assert_eq!(game.winners()[0].name, "ada");
    }
}
