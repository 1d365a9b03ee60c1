use crate::cards::{Card, CardId, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in a full build.
pub const DECK_SIZE: usize = 52;

/// All 52 cards of one shuffle epoch, in suit-major order, unshuffled.
pub fn standard_cards(epoch: u32) -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for s in Suit::ALL {
        for r in Rank::ALL {
            let id = CardId::new(epoch, cards.len() as u8);
            cards.push(Card::with_id(r, s, id));
        }
    }
    cards
}

/// A single 52-card deck that refills itself.
///
/// Cards are drawn from the top (the end of the internal vector). When the deck runs
/// dry, [`Deck::draw`] rebuilds and reshuffles a full deck instead of failing, so a
/// long round may see the same (rank, suit) twice across epochs.
///
/// ```
/// use blackjack_rs::deck::Deck;
///
/// let mut deck = Deck::seeded(7);
/// assert_eq!(deck.len(), 52);
/// let _card = deck.draw();
/// assert_eq!(deck.len(), 51);
/// ```
#[derive(Debug, Clone)]
pub struct Deck<R = ChaCha8Rng> {
    cards: Vec<Card>,
    rng: R,
    epoch: u32,
}

impl Deck<ChaCha8Rng> {
    /// A shuffled deck seeded from the thread-local entropy source.
    pub fn new() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for Deck<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Deck<R> {
    /// A freshly built and shuffled deck driven by `rng`.
    pub fn with_rng(rng: R) -> Self {
        let mut deck = Self { cards: standard_cards(0), rng, epoch: 0 };
        deck.shuffle();
        deck
    }

    /// A deck that yields `cards` in the given order, then behaves like any other deck
    /// once exhausted.
    pub fn stacked(cards: Vec<Card>, rng: R) -> Self {
        let mut cards = cards;
        cards.reverse();
        Self { cards, rng, epoch: 0 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of rebuilds so far.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Remaining cards, top of the deck last.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Uniform Fisher-Yates shuffle of the remaining cards.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Replace the contents with a full, shuffled 52-card deck.
    pub fn rebuild(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        tracing::debug!(epoch = self.epoch, discarded = self.cards.len(), "rebuilding deck");
        self.cards = standard_cards(self.epoch);
        self.shuffle();
    }

    /// Draw one card from the top, rebuilding first if the deck is empty.
    pub fn draw(&mut self) -> Card {
        let card = loop {
            match self.cards.pop() {
                Some(card) => break card,
                None => self.rebuild(),
            }
        };
        tracing::trace!(card = %card, left = self.cards.len(), "draw");
        card
    }

    /// Draw `n` cards from the top, resupplying as needed.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.draw()).collect()
    }
}
