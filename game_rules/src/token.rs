use std::fmt;

use serde::{Deserialize, Serialize};

/// One collectible token kind. The five gems are bankable and appear in card
/// costs; [`TokenKind::Joker`] is the wildcard, only ever minted by reserving
/// a card and never part of a cost.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum TokenKind {
    Diamond,
    Sapphire,
    Emerald,
    Onyx,
    Ruby,
    Joker,
}

impl TokenKind {
    /// The five gem kinds, without the wildcard.
    pub const GEMS: [TokenKind; 5] = [
        TokenKind::Diamond,
        TokenKind::Sapphire,
        TokenKind::Emerald,
        TokenKind::Onyx,
        TokenKind::Ruby,
    ];

    /// Every kind, wildcard included.
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Diamond,
        TokenKind::Sapphire,
        TokenKind::Emerald,
        TokenKind::Onyx,
        TokenKind::Ruby,
        TokenKind::Joker,
    ];

    /// Single-letter form used by the line input grammar.
    pub fn letter(&self) -> char {
        match self {
            TokenKind::Diamond => 'D',
            TokenKind::Sapphire => 'S',
            TokenKind::Emerald => 'E',
            TokenKind::Onyx => 'O',
            TokenKind::Ruby => 'R',
            TokenKind::Joker => 'J',
        }
    }

    pub fn from_letter(letter: char) -> Option<TokenKind> {
        match letter.to_ascii_uppercase() {
            'D' => Some(TokenKind::Diamond),
            'S' => Some(TokenKind::Sapphire),
            'E' => Some(TokenKind::Emerald),
            'O' => Some(TokenKind::Onyx),
            'R' => Some(TokenKind::Ruby),
            'J' => Some(TokenKind::Joker),
            _ => None,
        }
    }

    pub fn is_gem(&self) -> bool {
        *self != TokenKind::Joker
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Diamond => "Diamond",
            TokenKind::Sapphire => "Sapphire",
            TokenKind::Emerald => "Emerald",
            TokenKind::Onyx => "Onyx",
            TokenKind::Ruby => "Ruby",
            TokenKind::Joker => "Joker",
        };
        write!(f, "{}", name)
    }
}
