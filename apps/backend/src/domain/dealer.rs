//! Deterministic card dealing. Outside the C1–C4 core proper (the spec
//! treats lobby/dealing lifecycle as an external collaborator), but needed
//! to get a playable match off the ground; grounded directly on the
//! teacher's `domain/dealing.rs` SplitMix64 + Fisher-Yates approach, kept
//! unchanged in technique and adapted to a variable seat count (2..=4)
//! instead of a fixed 4.

use crate::domain::cards::{full_deck, Card};
use crate::domain::errors::DomainError;
use crate::domain::rules::{DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS};

/// SplitMix64: a fast, well-distributed deterministic generator. Used
/// instead of `rand`/`rand_chacha` so a match can be reproduced exactly
/// from an integer seed without pulling in a PRNG crate for it.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SplitMix64::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Deals the full deck as evenly as possible among `seat_count` seats
/// (2..=4, §2). With 4 seats every card is dealt (13 each); with 2 or 3
/// seats the deck doesn't divide evenly, so each seat gets
/// `DECK_SIZE / seat_count` cards and the remainder is left undealt —
/// there is no discard pile in this variant, those cards simply never
/// enter play. Hands are sorted for deterministic downstream comparisons.
pub fn deal_hands(seat_count: usize, seed: u64) -> Result<Vec<Vec<Card>>, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seat_count) {
        return Err(DomainError::StateMissing);
    }

    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);

    let hand_size = DECK_SIZE / seat_count;
    let mut hands = Vec::with_capacity(seat_count);
    for seat in 0..seat_count {
        let start = seat * hand_size;
        let end = start + hand_size;
        let mut hand = deck[start..end].to_vec();
        hand.sort();
        hands.push(hand);
    }
    Ok(hands)
}

/// The seat holding the three of diamonds, used to pick the leader of the
/// very first match (§4.1.2).
pub fn find_three_of_diamonds_holder(hands: &[Vec<Card>]) -> Option<usize> {
    hands.iter().position(|hand| {
        hand.iter().any(|c| {
            c.rank == crate::domain::cards::Rank::Three && c.suit == crate::domain::cards::Suit::Diamonds
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_seed() {
        let a = deal_hands(4, 12345).unwrap();
        let b = deal_hands(4, 12345).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = deal_hands(4, 1).unwrap();
        let b = deal_hands(4, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn four_seats_split_the_whole_deck_evenly() {
        let hands = deal_hands(4, 7).unwrap();
        assert_eq!(hands.iter().map(|h| h.len()).sum::<usize>(), 52);
        assert!(hands.iter().all(|h| h.len() == 13));
    }

    #[test]
    fn rejects_seat_counts_outside_range() {
        assert!(deal_hands(1, 1).is_err());
        assert!(deal_hands(5, 1).is_err());
    }

    #[test]
    fn three_of_diamonds_holder_is_found() {
        let hands = deal_hands(4, 99).unwrap();
        let holder = find_three_of_diamonds_holder(&hands).unwrap();
        assert!(hands[holder].iter().any(|c| {
            c.rank == crate::domain::cards::Rank::Three && c.suit == crate::domain::cards::Suit::Diamonds
        }));
    }
}
