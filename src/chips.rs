use crate::game::ActionError;
use serde::{Deserialize, Serialize};

/// Chip denominations offered at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum Chip {
    Ten = 10,
    TwentyFive = 25,
    Fifty = 50,
    Hundred = 100,
    FiveHundred = 500,
    Thousand = 1000,
}

impl Chip {
    pub const ALL: [Chip; 6] =
        [Chip::Ten, Chip::TwentyFive, Chip::Fifty, Chip::Hundred, Chip::FiveHundred, Chip::Thousand];

    pub const fn value(self) -> u64 {
        self as u64
    }
}

/// A bet assembled chip by chip before it is placed.
///
/// ```
/// use blackjack_rs::chips::{BetSlip, Chip};
/// use blackjack_rs::game::Game;
///
/// let mut slip = BetSlip::new();
/// slip.add(Chip::Hundred, 150).unwrap();
/// slip.add(Chip::Fifty, 150).unwrap();
/// assert!(slip.add(Chip::Ten, 150).is_err());
///
/// let mut game = Game::seeded(1);
/// game.place_bet(slip.amount(), 150).unwrap();
/// assert_eq!(game.bet(), 150);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetSlip {
    amount: u64,
    chips: Vec<Chip>,
}

impl BetSlip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Add a chip unless the total would exceed `balance`. Returns the new total.
    pub fn add(&mut self, chip: Chip, balance: u64) -> Result<u64, ActionError> {
        let next = self.amount.saturating_add(chip.value());
        if next > balance {
            return Err(ActionError::InsufficientBalance { balance, got: next });
        }
        self.amount = next;
        self.chips.push(chip);
        Ok(next)
    }

    /// Take back the most recently added chip.
    pub fn undo(&mut self) -> Option<Chip> {
        let chip = self.chips.pop()?;
        self.amount -= chip.value();
        Some(chip)
    }

    pub fn clear(&mut self) {
        self.amount = 0;
        self.chips.clear();
    }
}
