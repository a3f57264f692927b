use std::io::BufRead;

use game_rules::action::Action;
use game_rules::card::{DevelopmentCard, Noble, NobleId};
use game_rules::error::ActionError;
use game_rules::game::Game;
use game_rules::input;
use game_rules::player::Player;
use game_rules::policy::DecisionPolicy;
use game_rules::pool::ResourcePool;
use game_rules::token::TokenKind;

/// Blocking source of input lines. `None` means the input is exhausted.
pub trait LineSource {
    fn next_line(&mut self) -> Option<String>;
}

/// Reads lines from the process's standard input.
pub struct StdinSource;

impl LineSource for StdinSource {
    fn next_line(&mut self) -> Option<String> {
        let mut buffer = String::new();
        let read = std::io::stdin().lock().read_line(&mut buffer).ok()?;
        if read == 0 {
            return None;
        }
        Some(buffer.trim().to_string())
    }
}

fn pool_summary(pool: &ResourcePool) -> String {
    let parts: Vec<String> = pool
        .iter()
        .map(|(kind, count)| format!("{}{}", count, kind.letter()))
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}

fn card_summary(card: &DevelopmentCard) -> String {
    format!(
        "{}pt {} for {}",
        card.points,
        card.bonus,
        pool_summary(&card.cost)
    )
}

fn noble_summary(noble: &Noble) -> String {
    format!(
        "noble {} ({}pt, needs {})",
        noble.id.0,
        noble.points,
        pool_summary(&noble.cost)
    )
}

fn player_summary(player: &Player) -> String {
    let reserved = player
        .reserved_slots()
        .iter()
        .flatten()
        .map(card_summary)
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "{}: {}pt | tokens {} | bonuses {} | reserved [{}]",
        player.name,
        player.points(),
        pool_summary(&player.tokens),
        pool_summary(&player.bonuses()),
        reserved
    )
}

/// The whole table as text: bank, nobles, tier windows and every ledger.
pub fn render(game: &Game) -> String {
    let mut out = String::new();
    out.push_str(&format!("bank: {}\n", pool_summary(game.bank())));
    for noble in game.nobles().remaining() {
        out.push_str(&format!("{}\n", noble_summary(noble)));
    }
    for tier in game_rules::card::Tier::ALL.iter().rev() {
        out.push_str(&format!(
            "tier {} ({} left):",
            tier,
            game.catalog().deck_len(*tier)
        ));
        for slot in game.catalog().window(*tier) {
            match slot {
                Some(card) => out.push_str(&format!(" [{}]", card_summary(card))),
                None => out.push_str(" [empty]"),
            }
        }
        out.push('\n');
    }
    for player in game.players() {
        out.push_str(&format!("{}\n", player_summary(player)));
    }
    out
}

const MENU: &str = "\
> A) take two tokens of one kind
> B) take three different tokens
> C) buy a card (\"tier column\" or \"R slot\")
> D) reserve a card (\"tier\" or \"tier column\")
> E) pass";

/// An interactive seat: prints the table, shows the menu and parses the
/// answers with the shared grammar. Local parse failures re-prompt on the
/// spot; rule rejections come back through `notify_rejected` and restart
/// the whole prompt.
pub struct PromptPolicy<S: LineSource> {
    source: S,
}

impl<S: LineSource> PromptPolicy<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        println!("> {prompt}");
        self.source.next_line()
    }

    fn action_from_menu(&mut self, choice: &str) -> Result<Option<Action>, ActionError> {
        match choice.trim().to_ascii_uppercase().as_str() {
            "A" => {
                let Some(line) = self.ask("which kind? (D/S/E/O/R)") else {
                    return Ok(None);
                };
                Ok(Some(Action::PickSameTokens(input::parse_pick_same(&line)?)))
            }
            "B" => {
                let Some(line) = self.ask("which three kinds?") else {
                    return Ok(None);
                };
                Ok(Some(Action::PickDifferentTokens(
                    input::parse_pick_different(&line)?,
                )))
            }
            "C" => {
                let Some(line) = self.ask("which card?") else {
                    return Ok(None);
                };
                Ok(Some(Action::BuyCard(input::parse_buy(&line)?)))
            }
            "D" => {
                let Some(line) = self.ask("which card?") else {
                    return Ok(None);
                };
                let (tier, column) = input::parse_reserve(&line)?;
                Ok(Some(Action::ReserveCard { tier, column }))
            }
            "E" => Ok(Some(Action::Pass)),
            other => Err(ActionError::InvalidInputFormat(format!(
                "{other:?} is not a menu choice"
            ))),
        }
    }

    /// Deterministic fallback once input is exhausted: shed from the largest
    /// piles so the game can still close its turn.
    fn forced_discard(player: &Player, excess: u8) -> Vec<TokenKind> {
        let mut held: Vec<(TokenKind, u8)> = player.tokens.iter().collect();
        held.sort_by(|a, b| b.1.cmp(&a.1));
        let mut kinds = Vec::new();
        'outer: loop {
            for (kind, count) in &mut held {
                if *count > 0 && kinds.len() < excess as usize {
                    *count -= 1;
                    kinds.push(*kind);
                } else if kinds.len() >= excess as usize {
                    break 'outer;
                }
            }
        }
        kinds
    }
}

impl<S: LineSource> DecisionPolicy for PromptPolicy<S> {
    fn choose_action(&mut self, game: &Game, player: usize) -> Action {
        println!("{}", render(game));
        println!("> {}: your move", game.player(player).name);
        loop {
            println!("{MENU}");
            let Some(choice) = self.source.next_line() else {
                return Action::Pass;
            };
            match self.action_from_menu(&choice) {
                Ok(Some(action)) => return action,
                Ok(None) => return Action::Pass,
                Err(error) => println!("> {error}"),
            }
        }
    }

    fn choose_discard(&mut self, game: &Game, player: usize, excess: u8) -> Vec<TokenKind> {
        let ledger = game.player(player);
        println!("> you hold {}", pool_summary(&ledger.tokens));
        loop {
            let prompt = format!("discard {excess} tokens (letters, J allowed)");
            let Some(line) = self.ask(&prompt) else {
                return Self::forced_discard(ledger, excess);
            };
            match input::parse_discard(&line, excess) {
                Ok(kinds) => return kinds,
                Err(error) => println!("> {error}"),
            }
        }
    }

    fn choose_noble(&mut self, _game: &Game, _player: usize, eligible: &[Noble]) -> NobleId {
        println!("> several nobles are ready to visit:");
        for (position, noble) in eligible.iter().enumerate() {
            println!(">   {}: {}", position + 1, noble_summary(noble));
        }
        loop {
            let Some(line) = self.ask("which one? (number)") else {
                return eligible[0].id;
            };
            match input::parse_choice(&line, eligible.len()) {
                Ok(position) => return eligible[position].id,
                Err(error) => println!("> {error}"),
            }
        }
    }

    fn notify_rejected(&mut self, error: &ActionError) {
        println!("> rejected: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::card::Tier;
    use game_rules::action::CardLocation;
    use game_rules::catalog::CardCatalog;
    use game_rules::nobles::NobleRegistry;

    struct Script(Vec<&'static str>);

    impl LineSource for Script {
        fn next_line(&mut self) -> Option<String> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0).to_string())
            }
        }
    }

    fn empty_game() -> Game {
        Game::new(
            ResourcePool::uniform_gems(4),
            CardCatalog::new([vec![], vec![], vec![]]),
            NobleRegistry::new(vec![]),
            vec![Player::new(0, "ada"), Player::new(1, "grace")],
        )
    }

    #[test]
    fn menu_choices_map_to_actions() {
        let game = empty_game();
        let mut policy = PromptPolicy::new(Script(vec!["a", "E", "c", "R 2", "e"]));
        assert_eq!(
            policy.choose_action(&game, 0),
            Action::PickSameTokens(TokenKind::Emerald)
        );
        assert_eq!(
            policy.choose_action(&game, 0),
            Action::BuyCard(CardLocation::Reserved(1))
        );
        assert_eq!(policy.choose_action(&game, 0), Action::Pass);
    }

    #[test]
    fn bad_menu_input_reprompts() {
        let game = empty_game();
        let mut policy = PromptPolicy::new(Script(vec!["z", "b", "D S E"]));
        assert_eq!(
            policy.choose_action(&game, 0),
            Action::PickDifferentTokens([
                TokenKind::Diamond,
                TokenKind::Sapphire,
                TokenKind::Emerald
            ])
        );
    }

    #[test]
    fn exhausted_input_passes() {
        let game = empty_game();
        let mut policy = PromptPolicy::new(Script(vec![]));
        assert_eq!(policy.choose_action(&game, 0), Action::Pass);
    }

    #[test]
    fn forced_discard_sheds_from_the_largest_piles() {
        let mut player = Player::new(0, "ada");
        player.tokens.set(TokenKind::Ruby, 7);
        player.tokens.set(TokenKind::Onyx, 4);
        player.tokens.set(TokenKind::Joker, 1);
        let kinds = PromptPolicy::<Script>::forced_discard(&player, 2);
        assert_eq!(kinds, vec![TokenKind::Ruby, TokenKind::Onyx]);
    }

    #[test]
    fn render_names_every_player() {
        let game = empty_game();
        let text = render(&game);
        assert!(text.contains("ada"));
        assert!(text.contains("grace"));
        assert!(text.contains("tier 3"));
        assert!(text.contains("bank: 4D 4S 4E 4O 4R"));
    }

    #[test]
    fn reserve_prompt_allows_a_blind_draw() {
        let game = empty_game();
        let mut policy = PromptPolicy::new(Script(vec!["d", "2"]));
        assert_eq!(
            policy.choose_action(&game, 0),
            Action::ReserveCard {
                tier: Tier::Two,
                column: None
            }
        );
    }
}
