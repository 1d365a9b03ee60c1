use crate::deck::Deck;
use crate::hand::Hand;
use crate::rules::{Rules, RulesError};
use crate::settlement::{RoundRecord, Settlement};
use crate::snapshot::TableSnapshot;
use chrono::Utc;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Betting,
    Playing,
    DealerTurn,
    Finished,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Betting => "betting",
            Phase::Playing => "playing",
            Phase::DealerTurn => "dealer-turn",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a finished round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Push => "push",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rejected operation. The game is left exactly as it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("not allowed during {actual}, expected {expected}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("bet must be positive")]
    ZeroBet,
    #[error("bet exceeds balance: balance {balance}, got {got}")]
    InsufficientBalance { balance: u64, got: u64 },
    #[error("no bet placed")]
    NoBet,
    #[error("player hand is bust")]
    PlayerBust,
}

/// Single-player blackjack table.
///
/// The game owns the deck, both hands, the bet and the phase. Front-ends read it
/// through shared borrows or [`Game::snapshot`] and drive it only through its actions.
///
/// ```
/// use blackjack_rs::game::{Game, Phase};
///
/// let mut game = Game::seeded(11);
/// game.place_bet(100, 500).unwrap();
/// game.start_round().unwrap();
/// assert_eq!(game.player_hand().len(), 2);
///
/// while game.phase() == Phase::Playing && game.player_hand().total() < 17 {
///     game.hit().unwrap();
/// }
/// if game.phase() == Phase::Playing {
///     game.stand().unwrap();
/// }
/// assert_eq!(game.phase(), Phase::Finished);
/// let outcome = game.result().unwrap();
/// let _gross = game.payout(outcome);
/// ```
#[derive(Debug, Clone)]
pub struct Game<R = ChaCha8Rng> {
    rules: Rules,
    deck: Deck<R>,
    player: Hand,
    dealer: Hand,
    bet: u64,
    phase: Phase,
}

impl Game<ChaCha8Rng> {
    /// Standard rules, deck seeded from the thread-local entropy source.
    pub fn new() -> Self {
        Self::from_deck(Deck::new())
    }

    /// Standard rules with a reproducible shuffle sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::from_deck(Deck::seeded(seed))
    }
}

impl Default for Game<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Standard rules over a caller-supplied deck.
    pub fn from_deck(deck: Deck<R>) -> Self {
        Self {
            rules: Rules::default(),
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            phase: Phase::Betting,
        }
    }

    pub fn with_rules(rules: Rules, deck: Deck<R>) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules, ..Self::from_deck(deck) })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn deck(&self) -> &Deck<R> {
        &self.deck
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Chips wagered on the current round; 0 when no bet is placed.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Owned copy of the table state for presentation and spectator feeds.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            bet: self.bet,
            player: self.player.clone(),
            dealer: self.dealer.clone(),
            outcome: self.result(),
        }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), ActionError> {
        if self.phase != expected {
            tracing::debug!(%expected, actual = %self.phase, "action rejected");
            return Err(ActionError::WrongPhase { expected, actual: self.phase });
        }
        Ok(())
    }

    fn set_phase(&mut self, next: Phase) {
        tracing::debug!(from = %self.phase, to = %next, "phase change");
        self.phase = next;
    }

    /// Record a wager against the caller's available balance.
    ///
    /// Does not debit anything and does not start the round. Placing again while still
    /// betting replaces the earlier amount.
    pub fn place_bet(&mut self, amount: u64, balance: u64) -> Result<(), ActionError> {
        self.ensure_phase(Phase::Betting)?;
        if amount == 0 {
            return Err(ActionError::ZeroBet);
        }
        if amount > balance {
            return Err(ActionError::InsufficientBalance { balance, got: amount });
        }
        self.bet = amount;
        tracing::debug!(bet = amount, balance, "bet placed");
        Ok(())
    }

    /// Deal two cards each and either hand control to the player or, on a player
    /// blackjack, play the dealer out immediately.
    pub fn start_round(&mut self) -> Result<(), ActionError> {
        self.ensure_phase(Phase::Betting)?;
        if self.bet == 0 {
            return Err(ActionError::NoBet);
        }
        self.player.clear();
        self.dealer.clear();
        // alternate starting with the player; the dealer's second card is the hole card
        for _ in 0..2 {
            self.player.push(self.deck.draw());
            self.dealer.push(self.deck.draw());
        }
        tracing::debug!(
            player = self.player.total(),
            dealer = self.dealer.total(),
            "initial deal"
        );
        if self.player.is_blackjack() {
            self.set_phase(Phase::DealerTurn);
            self.play_dealer();
        } else {
            self.set_phase(Phase::Playing);
        }
        Ok(())
    }

    /// Draw one card for the player. Busting ends the round without a dealer turn.
    ///
    /// A bust hand is always `Finished`, so the phase check rejects it first; the
    /// explicit bust check only guards hands placed in `Playing` by other means.
    pub fn hit(&mut self) -> Result<(), ActionError> {
        self.ensure_phase(Phase::Playing)?;
        if self.player.is_bust() {
            return Err(ActionError::PlayerBust);
        }
        self.player.push(self.deck.draw());
        if self.player.is_bust() {
            tracing::debug!(total = self.player.total(), "player bust");
            self.set_phase(Phase::Finished);
        }
        Ok(())
    }

    /// End the player's turn and play the dealer out.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_phase(Phase::Playing)?;
        self.set_phase(Phase::DealerTurn);
        self.play_dealer();
        Ok(())
    }

    fn dealer_should_draw(&self) -> bool {
        let total = self.dealer.total();
        let stand_on = self.rules.dealer_stands_on;
        total < stand_on
            || (self.rules.dealer_hits_soft_17 && total == stand_on && self.dealer.is_soft())
    }

    fn play_dealer(&mut self) {
        while self.dealer_should_draw() {
            self.dealer.push(self.deck.draw());
        }
        tracing::debug!(
            total = self.dealer.total(),
            cards = self.dealer.len(),
            bust = self.dealer.is_bust(),
            "dealer stands"
        );
        self.set_phase(Phase::Finished);
    }

    /// The round's outcome, or `None` until the round is finished.
    pub fn result(&self) -> Option<Outcome> {
        if self.phase != Phase::Finished {
            return None;
        }
        let (p, d) = (&self.player, &self.dealer);
        let outcome = if p.is_bust() {
            Outcome::Loss
        } else if d.is_bust() {
            Outcome::Win
        } else if p.is_blackjack() && !d.is_blackjack() {
            Outcome::Win
        } else if d.is_blackjack() && !p.is_blackjack() {
            Outcome::Loss
        } else if p.total() > d.total() {
            Outcome::Win
        } else if p.total() < d.total() {
            Outcome::Loss
        } else {
            Outcome::Push
        };
        Some(outcome)
    }

    /// Gross chips returned to the player for `outcome`, stake included.
    pub fn payout(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Win if self.player.is_blackjack() => {
                let (num, den) = self.rules.blackjack_payout;
                self.bet.saturating_mul(num) / den.max(1)
            }
            Outcome::Win => self.bet.saturating_mul(2),
            Outcome::Push => self.bet,
            Outcome::Loss => 0,
        }
    }

    /// The (bet, outcome, payout) triple of a finished round.
    pub fn settlement(&self) -> Option<Settlement> {
        let outcome = self.result()?;
        Some(Settlement { bet: self.bet, outcome, payout: self.payout(outcome) })
    }

    /// Durable summary of a finished round, stamped with the current time.
    pub fn round_record(&self, bettor: impl Into<String>) -> Option<RoundRecord> {
        let settlement = self.settlement()?;
        Some(RoundRecord {
            bettor: bettor.into(),
            bet: settlement.bet,
            player_total: self.player.total(),
            dealer_total: self.dealer.total(),
            result: settlement.outcome,
            payout: settlement.payout,
            timestamp: Utc::now(),
        })
    }

    /// Clear the table for the next round. Safe from any phase; an unfinished round
    /// is abandoned.
    pub fn reset(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.bet = 0;
        if self.phase != Phase::Betting {
            self.set_phase(Phase::Betting);
        }
        if self.deck.len() < self.rules.reshuffle_below {
            self.deck.rebuild();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::SeedableRng;

    fn stacked(cards: &str) -> Game {
        let cards = parse_cards(cards).expect("valid cards");
        Game::from_deck(Deck::stacked(cards, ChaCha8Rng::seed_from_u64(0)))
    }

    fn finished(player: &str, dealer: &str, bet: u64) -> Game {
        let mut g = Game::seeded(0);
        g.player = player.parse().expect("valid hand");
        g.dealer = dealer.parse().expect("valid hand");
        g.bet = bet;
        g.phase = Phase::Finished;
        g
    }

    #[test]
    fn deal_order_alternates_player_then_dealer() {
        // player 9,7 dealer 10,8
        let mut g = stacked("9h 10s 7d 8c");
        g.place_bet(10, 10).unwrap();
        g.start_round().unwrap();
        assert_eq!(g.player.cards(), parse_cards("9h 7d").unwrap().as_slice());
        assert_eq!(g.dealer.cards(), parse_cards("10s 8c").unwrap().as_slice());
        assert_eq!(g.phase, Phase::Playing);
    }

    #[test]
    fn player_blackjack_skips_to_finished() {
        // dealer 10,6 must still draw to 17+
        let mut g = stacked("Ah 10s Kd 6c 5h");
        g.place_bet(100, 100).unwrap();
        g.start_round().unwrap();
        assert_eq!(g.phase, Phase::Finished);
        assert_eq!(g.dealer.len(), 3);
        assert_eq!(g.result(), Some(Outcome::Win));
        assert_eq!(g.payout(Outcome::Win), 250);
    }

    #[test]
    fn hit_on_bust_hand_is_rejected_without_drawing() {
        let mut g = Game::seeded(2);
        g.player = "10h 6s 8c".parse().expect("valid hand");
        g.bet = 10;
        g.phase = Phase::Playing;
        let before = g.deck.len();
        assert_eq!(g.hit(), Err(ActionError::PlayerBust));
        assert_eq!(g.deck.len(), before);
        assert_eq!(g.player.len(), 3);
        assert_eq!(g.phase, Phase::Playing);
    }

    #[test]
    fn start_round_requires_bet() {
        let mut g = Game::seeded(1);
        assert_eq!(g.start_round(), Err(ActionError::NoBet));
        assert_eq!(g.deck.len(), 52);
        assert!(g.player.is_empty());
    }

    #[test]
    fn dealer_hits_soft_17_only_when_configured() {
        // player 10,8 stands; dealer A,6 soft 17
        let cards = "10h Ad 8s 6c 3h";
        let mut g = stacked(cards);
        g.place_bet(5, 5).unwrap();
        g.start_round().unwrap();
        g.stand().unwrap();
        assert_eq!(g.dealer.len(), 2);
        assert_eq!(g.result(), Some(Outcome::Win));

        let deck = Deck::stacked(parse_cards(cards).unwrap(), ChaCha8Rng::seed_from_u64(0));
        let rules = Rules::default().with_dealer_hits_soft_17(true);
        let mut g = Game::with_rules(rules, deck).unwrap();
        g.place_bet(5, 5).unwrap();
        g.start_round().unwrap();
        g.stand().unwrap();
        assert_eq!(g.dealer.len(), 3);
        assert_eq!(g.dealer.total(), 20);
        assert_eq!(g.result(), Some(Outcome::Loss));
    }

    #[test]
    fn result_precedence() {
        // player bust loses even when dealer also busts
        assert_eq!(finished("10h 6s 8c", "10d 6d 9c", 10).result(), Some(Outcome::Loss));
        assert_eq!(finished("10h 8s", "10d 6d 9c", 10).result(), Some(Outcome::Win));
        assert_eq!(finished("Ah Ks", "10d 6d 5c", 10).result(), Some(Outcome::Win));
        assert_eq!(finished("10h 6s 5c", "Ad Kd", 10).result(), Some(Outcome::Loss));
        assert_eq!(finished("Ah Ks", "Ad Qd", 10).result(), Some(Outcome::Push));
        assert_eq!(finished("10h 9s", "10d 8d", 10).result(), Some(Outcome::Win));
        assert_eq!(finished("10h 7s", "10d 8d", 10).result(), Some(Outcome::Loss));
        assert_eq!(finished("10h 8s", "9d 9c", 10).result(), Some(Outcome::Push));
    }

    #[test]
    fn payout_floors_odd_blackjack_bets() {
        let g = finished("Ah Ks", "10d 7d", 25);
        assert_eq!(g.payout(Outcome::Win), 62);
    }

    #[test]
    fn settlement_and_record_carry_final_totals() {
        let g = finished("10h 9s", "10d 8d", 40);
        let s = g.settlement().unwrap();
        assert_eq!(s, Settlement { bet: 40, outcome: Outcome::Win, payout: 80 });

        let rec = g.round_record("alice").unwrap();
        assert_eq!(rec.bettor, "alice");
        assert_eq!((rec.player_total, rec.dealer_total), (19, 18));
        assert_eq!(rec.result, Outcome::Win);
        assert_eq!(rec.payout, 80);
    }

    #[test]
    fn reset_rebuilds_low_deck() {
        let mut g = Game::seeded(5);
        let _ = g.deck.draw_n(40);
        g.reset();
        assert_eq!(g.deck.len(), 52);
        assert_eq!(g.deck.epoch(), 1);

        let _ = g.deck.draw_n(10);
        g.reset();
        assert_eq!(g.deck.len(), 42);
    }

    #[test]
    fn reset_abandons_round_in_progress() {
        let mut g = stacked("9h 10s 7d 8c");
        g.place_bet(10, 10).unwrap();
        g.start_round().unwrap();
        g.reset();
        assert_eq!(g.phase, Phase::Betting);
        assert_eq!(g.bet, 0);
        assert!(g.player.is_empty() && g.dealer.is_empty());
    }
}
