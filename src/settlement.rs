//! Round settlement against a chip balance.
//!
//! The game never touches balances. After a round finishes it hands out a
//! [`RoundRecord`], and a [`ProfileStore`] applies the stake and the payout in one step.

use crate::game::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Chips a new profile starts with.
pub const DEFAULT_STARTING_CHIPS: u64 = 5000;

/// Final money figures of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub bet: u64,
    pub outcome: Outcome,
    /// Gross return, stake included.
    pub payout: u64,
}

impl Settlement {
    /// Balance change once the stake is debited and the payout credited.
    pub fn net(&self) -> i64 {
        let payout = i64::try_from(self.payout).unwrap_or(i64::MAX);
        let bet = i64::try_from(self.bet).unwrap_or(i64::MAX);
        payout.saturating_sub(bet)
    }
}

/// Summary of one finished round, the shape persisted by history stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub bettor: String,
    pub bet: u64,
    pub player_total: u16,
    pub dealer_total: u16,
    pub result: Outcome,
    pub payout: u64,
    pub timestamp: DateTime<Utc>,
}

impl RoundRecord {
    pub fn settlement(&self) -> Settlement {
        Settlement { bet: self.bet, outcome: self.result, payout: self.payout }
    }
}

/// Chip balance and lifetime counters of one bettor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub chips: u64,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Profile {
    pub fn new(username: impl Into<String>, chips: u64) -> Self {
        Self { username: username.into(), chips, wins: 0, losses: 0, pushes: 0 }
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }

    fn apply(&mut self, s: &Settlement) -> Result<(), SettleError> {
        let after_stake = self.chips.checked_sub(s.bet).ok_or(SettleError::InsufficientChips {
            chips: self.chips,
            bet: s.bet,
        })?;
        self.chips = after_stake.saturating_add(s.payout);
        match s.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettleError {
    #[error("unknown bettor: '{0}'")]
    UnknownBettor(String),
    #[error("bettor already registered: '{0}'")]
    AlreadyRegistered(String),
    #[error("insufficient chips: have {chips}, bet {bet}")]
    InsufficientChips { chips: u64, bet: u64 },
    #[error("record has no stake")]
    ZeroBet,
}

/// Balance owner for bettors.
///
/// `settle` must be all-or-nothing: on error neither the profile nor the history
/// changes.
pub trait ProfileStore {
    fn profile(&self, bettor: &str) -> Option<Profile>;

    /// Available balance for validating a new bet.
    fn balance(&self, bettor: &str) -> Option<u64> {
        self.profile(bettor).map(|p| p.chips)
    }

    fn settle(&mut self, record: &RoundRecord) -> Result<Profile, SettleError>;
}

/// [`ProfileStore`] kept in process memory.
///
/// ```
/// use blackjack_rs::settlement::{MemoryStore, ProfileStore};
///
/// let mut store = MemoryStore::new();
/// store.register("alice").unwrap();
/// assert_eq!(store.balance("alice"), Some(5000));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    starting_chips: u64,
    profiles: HashMap<String, Profile>,
    history: Vec<RoundRecord>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_starting_chips(DEFAULT_STARTING_CHIPS)
    }

    pub fn with_starting_chips(starting_chips: u64) -> Self {
        Self { starting_chips, profiles: HashMap::new(), history: Vec::new() }
    }

    pub fn register(&mut self, username: impl Into<String>) -> Result<Profile, SettleError> {
        let username = username.into();
        if self.profiles.contains_key(&username) {
            return Err(SettleError::AlreadyRegistered(username));
        }
        let profile = Profile::new(username.clone(), self.starting_chips);
        self.profiles.insert(username, profile.clone());
        Ok(profile)
    }

    /// Settled rounds of `bettor`, most recent first.
    pub fn history(&self, bettor: &str, limit: usize) -> Vec<RoundRecord> {
        self.history.iter().rev().filter(|r| r.bettor == bettor).take(limit).cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl ProfileStore for MemoryStore {
    fn profile(&self, bettor: &str) -> Option<Profile> {
        self.profiles.get(bettor).cloned()
    }

    fn settle(&mut self, record: &RoundRecord) -> Result<Profile, SettleError> {
        if record.bet == 0 {
            return Err(SettleError::ZeroBet);
        }
        let current = self
            .profiles
            .get(&record.bettor)
            .ok_or_else(|| SettleError::UnknownBettor(record.bettor.clone()))?;
        // apply to a copy so a failure leaves the stored profile untouched
        let mut updated = current.clone();
        let settlement = record.settlement();
        updated.apply(&settlement)?;
        self.profiles.insert(record.bettor.clone(), updated.clone());
        self.history.push(record.clone());
        tracing::debug!(
            bettor = %record.bettor,
            result = %record.result,
            net = settlement.net(),
            chips = updated.chips,
            "round settled"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bettor: &str, bet: u64, result: Outcome, payout: u64) -> RoundRecord {
        RoundRecord {
            bettor: bettor.to_string(),
            bet,
            player_total: 20,
            dealer_total: 18,
            result,
            payout,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn net_is_payout_minus_stake() {
        let s = Settlement { bet: 100, outcome: Outcome::Win, payout: 250 };
        assert_eq!(s.net(), 150);
        let s = Settlement { bet: 100, outcome: Outcome::Loss, payout: 0 };
        assert_eq!(s.net(), -100);
        let s = Settlement { bet: 100, outcome: Outcome::Push, payout: 100 };
        assert_eq!(s.net(), 0);
    }

    #[test]
    fn settle_debits_stake_and_credits_payout() {
        let mut store = MemoryStore::with_starting_chips(500);
        store.register("bob").unwrap();

        let p = store.settle(&record("bob", 100, Outcome::Win, 200)).unwrap();
        assert_eq!(p.chips, 600);
        assert_eq!(p.wins, 1);

        let p = store.settle(&record("bob", 100, Outcome::Loss, 0)).unwrap();
        assert_eq!(p.chips, 500);
        assert_eq!(p.losses, 1);

        let p = store.settle(&record("bob", 100, Outcome::Push, 100)).unwrap();
        assert_eq!(p.chips, 500);
        assert_eq!(p.pushes, 1);
        assert_eq!(p.rounds_played(), 3);
        assert_eq!(store.history_len(), 3);
    }

    #[test]
    fn failed_settle_changes_nothing() {
        let mut store = MemoryStore::with_starting_chips(50);
        store.register("carol").unwrap();
        let err = store.settle(&record("carol", 100, Outcome::Win, 200)).unwrap_err();
        assert_eq!(err, SettleError::InsufficientChips { chips: 50, bet: 100 });
        assert_eq!(store.balance("carol"), Some(50));
        assert_eq!(store.profile("carol").unwrap().wins, 0);
        assert_eq!(store.history_len(), 0);

        let err = store.settle(&record("dave", 10, Outcome::Win, 20)).unwrap_err();
        assert!(matches!(err, SettleError::UnknownBettor(_)));
        assert!(matches!(
            store.settle(&record("carol", 0, Outcome::Push, 0)),
            Err(SettleError::ZeroBet)
        ));
    }

    #[test]
    fn register_twice_fails() {
        let mut store = MemoryStore::new();
        store.register("erin").unwrap();
        assert!(matches!(store.register("erin"), Err(SettleError::AlreadyRegistered(_))));
    }

    #[test]
    fn history_is_newest_first_and_limited() {
        let mut store = MemoryStore::new();
        store.register("f").unwrap();
        store.register("g").unwrap();
        store.settle(&record("f", 10, Outcome::Win, 20)).unwrap();
        store.settle(&record("g", 10, Outcome::Loss, 0)).unwrap();
        store.settle(&record("f", 30, Outcome::Push, 30)).unwrap();

        let h = store.history("f", 5);
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].bet, 30);
        assert_eq!(store.history("f", 1).len(), 1);
    }
}
