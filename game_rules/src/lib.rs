pub mod action;
pub mod card;
pub mod catalog;
pub mod error;
pub mod feed;
pub mod game;
pub mod input;
pub mod nobles;
pub mod player;
pub mod policy;
pub mod pool;
pub mod token;

#[cfg(feature = "standard-game")]
pub mod standard;
