use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Highest total that does not bust.
pub const BLACKJACK_TOTAL: u16 = 21;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// Derived indicators for a sequence of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u16,
    pub soft: bool,
    pub blackjack: bool,
    pub bust: bool,
}

/// Evaluate a card sequence from scratch.
///
/// Aces start at 11 and are demoted to 1, one at a time, while the total exceeds 21.
///
/// ```
/// use blackjack_rs::cards::parse_cards;
/// use blackjack_rs::hand::evaluate;
///
/// let v = evaluate(&parse_cards("Ah As 9c").unwrap());
/// assert_eq!(v.total, 21);
/// assert!(v.soft);
/// assert!(!v.blackjack);
/// ```
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut high_aces = 0usize;
    for c in cards {
        total += u16::from(c.points());
        if c.rank().is_ace() {
            high_aces += 1;
        }
    }
    while total > BLACKJACK_TOTAL && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }
    HandValue {
        total,
        soft: high_aces > 0 && total <= BLACKJACK_TOTAL,
        blackjack: cards.len() == 2 && total == BLACKJACK_TOTAL,
        bust: total > BLACKJACK_TOTAL,
    }
}

/// One side's cards plus their evaluation, kept in sync on every mutation.
///
/// ```
/// use blackjack_rs::hand::Hand;
///
/// let hand: Hand = "As Kd".parse().unwrap();
/// assert_eq!(hand.total(), 21);
/// assert!(hand.is_blackjack());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "HandCards")]
pub struct Hand {
    cards: Vec<Card>,
    value: HandValue,
}

/// Wire shape read back into a [`Hand`]; any serialized `value` is ignored.
#[derive(Deserialize)]
struct HandCards {
    cards: Vec<Card>,
}

impl From<HandCards> for Hand {
    fn from(repr: HandCards) -> Self {
        Hand::from_cards(repr.cards)
    }
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        let value = evaluate(&cards);
        Self { cards, value }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> HandValue {
        self.value
    }

    pub fn total(&self) -> u16 {
        self.value.total
    }

    pub fn is_soft(&self) -> bool {
        self.value.soft
    }

    pub fn is_blackjack(&self) -> bool {
        self.value.blackjack
    }

    pub fn is_bust(&self) -> bool {
        self.value.bust
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
        self.value = evaluate(&self.cards);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.value = HandValue::default();
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(Hand::from_cards(cards))
    }
}
