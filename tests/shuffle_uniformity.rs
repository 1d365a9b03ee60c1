use blackjack_rs::cards::{Rank, Suit};
use blackjack_rs::deck::{standard_cards, Deck, DECK_SIZE};
use std::collections::HashSet;

// 51 degrees of freedom; the p = 0.0001 critical value is about 96
const CHI_SQUARE_LIMIT: f64 = 100.0;

fn chi_square(counts: &[u32], expected: f64) -> f64 {
    counts.iter().map(|&c| (c as f64 - expected).powi(2) / expected).sum()
}

#[test]
fn fresh_build_is_the_full_standard_set() {
    let cards = standard_cards(0);
    let pairs: HashSet<(Rank, Suit)> = cards.iter().map(|c| c.to_tuple()).collect();
    assert_eq!(cards.len(), DECK_SIZE);
    for s in Suit::ALL {
        for r in Rank::ALL {
            assert!(pairs.contains(&(r, s)), "missing {r}{s}");
        }
    }
}

#[test]
fn shuffled_deck_is_a_permutation() {
    let deck = Deck::seeded(99);
    let pairs: HashSet<(Rank, Suit)> = deck.remaining().iter().map(|c| c.to_tuple()).collect();
    assert_eq!(pairs.len(), DECK_SIZE);
}

#[test]
fn card_positions_are_unbiased() {
    let trials = 52_000u32;
    let target = (Rank::Ace, Suit::Spades);
    let mut position_counts = vec![0u32; DECK_SIZE];
    let mut top_counts = vec![0u32; DECK_SIZE];
    let order: Vec<(Rank, Suit)> = standard_cards(0).iter().map(|c| c.to_tuple()).collect();

    let mut deck = Deck::seeded(12345);
    for _ in 0..trials {
        deck.shuffle();
        let cards = deck.remaining();
        let pos = cards.iter().position(|c| c.to_tuple() == target).expect("card present");
        position_counts[pos] += 1;
        let top = cards[DECK_SIZE - 1].to_tuple();
        let idx = order.iter().position(|&p| p == top).expect("card present");
        top_counts[idx] += 1;
    }

    let expected = trials as f64 / DECK_SIZE as f64;
    let by_position = chi_square(&position_counts, expected);
    let by_card = chi_square(&top_counts, expected);
    assert!(by_position < CHI_SQUARE_LIMIT, "position chi-square {by_position}");
    assert!(by_card < CHI_SQUARE_LIMIT, "top-card chi-square {by_card}");
}
