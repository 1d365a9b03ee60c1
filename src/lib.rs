//! blackjack-rs: single-deck blackjack rules engine
//!
//! Goals:
//! - One self-contained state machine per table: bet, deal, hit, stand, dealer play
//! - Injectable randomness; seeded decks replay exactly
//! - No panics for rejected actions; every failure is a `Result` and leaves state untouched
//!
//! ## Quick start: play a round
//! ```
//! use blackjack_rs::game::{Game, Phase};
//! use blackjack_rs::settlement::{MemoryStore, ProfileStore};
//!
//! let mut store = MemoryStore::new();
//! store.register("alice").unwrap();
//!
//! let mut game = Game::seeded(2024);
//! let balance = store.balance("alice").unwrap();
//! game.place_bet(100, balance).unwrap();
//! game.start_round().unwrap();
//! if game.phase() == Phase::Playing {
//!     game.stand().unwrap();
//! }
//!
//! let record = game.round_record("alice").unwrap();
//! let profile = store.settle(&record).unwrap();
//! assert_eq!(profile.rounds_played(), 1);
//! game.reset();
//! ```

pub mod cards;
pub mod chips;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod rules;
pub mod settlement;
pub mod snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
