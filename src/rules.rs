//! Table configuration.

use crate::deck::DECK_SIZE;
use crate::hand::BLACKJACK_TOTAL;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("reshuffle threshold {0} exceeds deck size")]
    ReshuffleThreshold(usize),
    #[error("dealer stand total must be within 2..=21, got {0}")]
    DealerStand(u16),
    #[error("blackjack payout ratio {num}/{den} must have a nonzero denominator and pay at least the stake")]
    BlackjackPayout { num: u64, den: u64 },
}

/// Rule knobs for a table. `Rules::default()` is the standard game.
///
/// ```
/// use blackjack_rs::rules::Rules;
///
/// let rules: Rules = serde_json::from_str(r#"{"dealer_hits_soft_17": true}"#).unwrap();
/// assert!(rules.dealer_hits_soft_17);
/// assert_eq!(rules.dealer_stands_on, 17);
/// rules.validate().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Rules {
    /// Reset rebuilds the deck when fewer cards than this remain.
    pub reshuffle_below: usize,
    /// Dealer draws while below this total.
    pub dealer_stands_on: u16,
    /// Dealer also draws on a soft total equal to `dealer_stands_on`.
    pub dealer_hits_soft_17: bool,
    /// Gross blackjack return as `num / den` of the bet, floored.
    pub blackjack_payout: (u64, u64),
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            reshuffle_below: 20,
            dealer_stands_on: 17,
            dealer_hits_soft_17: false,
            blackjack_payout: (5, 2),
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.reshuffle_below > DECK_SIZE {
            return Err(RulesError::ReshuffleThreshold(self.reshuffle_below));
        }
        if !(2..=BLACKJACK_TOTAL).contains(&self.dealer_stands_on) {
            return Err(RulesError::DealerStand(self.dealer_stands_on));
        }
        let (num, den) = self.blackjack_payout;
        if den == 0 || num < den {
            return Err(RulesError::BlackjackPayout { num, den });
        }
        Ok(())
    }

    /// Builder-style toggle for the soft-17 variant.
    pub fn with_dealer_hits_soft_17(mut self, on: bool) -> Self {
        self.dealer_hits_soft_17 = on;
        self
    }

    pub fn with_reshuffle_below(mut self, cards: usize) -> Self {
        self.reshuffle_below = cards;
        self
    }

    pub fn with_blackjack_payout(mut self, num: u64, den: u64) -> Self {
        self.blackjack_payout = (num, den);
        self
    }
}
