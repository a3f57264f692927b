use thiserror::Error;

use crate::player::MAX_RESERVED_CARDS;

/// A per-action validation failure. Always recoverable: the turn driver
/// surfaces it to the acting policy and asks for a new decision. No action
/// is ever partially applied, so a rejected action leaves every ledger
/// untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("invalid input: {0}")]
    InvalidInputFormat(String),

    #[error("there is no card slot at tier {tier}, column {column}")]
    InvalidTierOrColumn { tier: usize, column: usize },

    #[error("there is no reserved card slot number {0}")]
    InvalidReservedIndex(usize),

    #[error("that card slot is empty")]
    EmptyCardSlot,

    #[error("not enough tokens for this action")]
    InsufficientResources,

    #[error("you already hold {MAX_RESERVED_CARDS} reserved cards")]
    ReservationLimitReached,
}

/// A failure while constructing the game. Fatal: unlike action errors,
/// these abort startup instead of being retried.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("card feed unavailable: {0}")]
    CardFeedUnavailable(String),

    #[error("a game takes 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),
}
