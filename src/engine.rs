// Engine API boundary. This trait exposes the blackjack actions and queries so
// front-ends (terminal, web, spectator relays) can drive a table without
// depending on `Game` internals. It is implemented for the core `Game` type.

use crate::game::{ActionError, Game, Outcome, Phase};
use crate::hand::Hand;
use crate::settlement::Settlement;
use crate::snapshot::TableSnapshot;
use rand::Rng;

pub trait BlackjackEngine {
    // Round lifecycle
    fn place_bet(&mut self, amount: u64, balance: u64) -> Result<(), ActionError>;
    fn start_round(&mut self) -> Result<(), ActionError>;
    fn reset(&mut self);

    // Player actions
    fn hit(&mut self) -> Result<(), ActionError>;
    fn stand(&mut self) -> Result<(), ActionError>;

    // Queries
    fn result(&self) -> Option<Outcome>;
    fn payout(&self, outcome: Outcome) -> u64;
    fn settlement(&self) -> Option<Settlement>;
    fn player_hand(&self) -> &Hand;
    fn dealer_hand(&self) -> &Hand;
    fn phase(&self) -> Phase;
    fn bet(&self) -> u64;
    fn snapshot(&self) -> TableSnapshot;
}

impl<R: Rng> BlackjackEngine for Game<R> {
    fn place_bet(&mut self, amount: u64, balance: u64) -> Result<(), ActionError> {
        Game::place_bet(self, amount, balance)
    }
    fn start_round(&mut self) -> Result<(), ActionError> {
        Game::start_round(self)
    }
    fn reset(&mut self) {
        Game::reset(self)
    }

    fn hit(&mut self) -> Result<(), ActionError> {
        Game::hit(self)
    }
    fn stand(&mut self) -> Result<(), ActionError> {
        Game::stand(self)
    }

    fn result(&self) -> Option<Outcome> {
        Game::result(self)
    }
    fn payout(&self, outcome: Outcome) -> u64 {
        Game::payout(self, outcome)
    }
    fn settlement(&self) -> Option<Settlement> {
        Game::settlement(self)
    }
    fn player_hand(&self) -> &Hand {
        Game::player_hand(self)
    }
    fn dealer_hand(&self) -> &Hand {
        Game::dealer_hand(self)
    }
    fn phase(&self) -> Phase {
        Game::phase(self)
    }
    fn bet(&self) -> u64 {
        Game::bet(self)
    }
    fn snapshot(&self) -> TableSnapshot {
        Game::snapshot(self)
    }
}
