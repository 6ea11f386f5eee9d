//! C1: the combination engine. Pure, deterministic, stateless.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, Rank, Suit};

/// Strength order matters: variants are listed weakest-first so that the
/// derived `Ord` gives `FourOfAKind > FullHouse > Flush > Straight` etc, as
/// required for 5-card kind comparisons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl Kind {
    /// Kind strength is only meaningful for cardinality-5 kinds; singles,
    /// pairs and triples never compare by kind (only by ranking key), but
    /// we give them places in the order anyway for Ord's sake.
    fn is_five_card(self) -> bool {
        matches!(
            self,
            Kind::Straight | Kind::Flush | Kind::FullHouse | Kind::FourOfAKind | Kind::StraightFlush
        )
    }
}

/// Canonical straight sequences (§6.5), the intended superset: `A` and `2`
/// function as low only when explicitly listed in a sequence.
pub const STRAIGHT_SEQUENCES: [[Rank; 5]; 10] = [
    [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five],
    [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six],
    [Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven],
    [Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight],
    [Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine],
    [Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten],
    [Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack],
    [Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen],
    [Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King],
    [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace],
];

/// A classified play: the kind plus the cards that make it up, sorted
/// ascending for deterministic downstream use (ranking key lookup, display).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub kind: Kind,
    pub cards: Vec<Card>,
}

/// `Classify(cards) -> Kind | Invalid`. Never fails; returns `None` (Invalid)
/// for any list that does not match a legal kind.
pub fn classify(cards: &[Card]) -> Option<Combination> {
    let mut sorted = cards.to_vec();
    sorted.sort();

    let kind = match sorted.len() {
        1 => Some(Kind::Single),
        2 => classify_pair(&sorted),
        3 => classify_triple(&sorted),
        5 => classify_five(&sorted),
        _ => None,
    }?;

    Some(Combination { kind, cards: sorted })
}

fn classify_pair(cards: &[Card]) -> Option<Kind> {
    (cards[0].rank == cards[1].rank).then_some(Kind::Pair)
}

fn classify_triple(cards: &[Card]) -> Option<Kind> {
    let all_same = cards[0].rank == cards[1].rank && cards[1].rank == cards[2].rank;
    all_same.then_some(Kind::Triple)
}

fn classify_five(cards: &[Card]) -> Option<Kind> {
    let is_straight = matches_straight_sequence(cards);
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    if is_straight && is_flush {
        return Some(Kind::StraightFlush);
    }

    let mut counts: Vec<(Rank, usize)> = Vec::new();
    for c in cards {
        if let Some(entry) = counts.iter_mut().find(|(r, _)| *r == c.rank) {
            entry.1 += 1;
        } else {
            counts.push((c.rank, 1));
        }
    }
    counts.sort_by_key(|(_, n)| std::cmp::Reverse(*n));

    match counts.as_slice() {
        [(_, 4), (_, 1)] => return Some(Kind::FourOfAKind),
        [(_, 3), (_, 2)] => return Some(Kind::FullHouse),
        _ => {}
    }

    if is_straight {
        return Some(Kind::Straight);
    }
    if is_flush {
        return Some(Kind::Flush);
    }
    None
}

fn matches_straight_sequence(sorted_cards: &[Card]) -> bool {
    let mut ranks: Vec<Rank> = sorted_cards.iter().map(|c| c.rank).collect();
    ranks.sort();
    STRAIGHT_SEQUENCES.iter().any(|seq| {
        let mut seq_sorted = *seq;
        seq_sorted.sort();
        seq_sorted.to_vec() == ranks
    })
}

/// `CompareHighest(combo) -> ranking_key`. The key is always a `(Rank,
/// Suit)` pair so all kinds compare on the same total order as §3's card
/// order, per the rules in §4.1.
pub fn ranking_key(combo: &Combination) -> (Rank, Suit) {
    match combo.kind {
        Kind::Single | Kind::Pair | Kind::Triple | Kind::Flush => {
            let top = combo.cards.iter().max().expect("non-empty combination");
            (top.rank, top.suit)
        }
        Kind::FullHouse => {
            let triple_rank = triple_rank_of(&combo.cards);
            let top_suit_of_triple = combo
                .cards
                .iter()
                .filter(|c| c.rank == triple_rank)
                .map(|c| c.suit)
                .max()
                .expect("full house has a triple");
            (triple_rank, top_suit_of_triple)
        }
        Kind::FourOfAKind => {
            let quad_rank = quad_rank_of(&combo.cards);
            let top_suit_of_quad = combo
                .cards
                .iter()
                .filter(|c| c.rank == quad_rank)
                .map(|c| c.suit)
                .max()
                .expect("four of a kind has a quad");
            (quad_rank, top_suit_of_quad)
        }
        Kind::Straight | Kind::StraightFlush => {
            let top = combo.cards.iter().max().expect("non-empty combination");
            (top.rank, top.suit)
        }
    }
}

fn triple_rank_of(cards: &[Card]) -> Rank {
    rank_with_count(cards, 3)
}

fn quad_rank_of(cards: &[Card]) -> Rank {
    rank_with_count(cards, 4)
}

fn rank_with_count(cards: &[Card], count: usize) -> Rank {
    let mut seen: Vec<(Rank, usize)> = Vec::new();
    for c in cards {
        if let Some(entry) = seen.iter_mut().find(|(r, _)| *r == c.rank) {
            entry.1 += 1;
        } else {
            seen.push((c.rank, 1));
        }
    }
    seen.into_iter()
        .find(|(_, n)| *n == count)
        .map(|(r, _)| r)
        .expect("caller guarantees a rank with the requested count")
}

/// `Beats(new_combo, last_combo) -> bool`.
pub fn beats(new_combo: &Combination, last_combo: &Combination) -> bool {
    if new_combo.cards.len() != last_combo.cards.len() {
        return false;
    }

    if new_combo.cards.len() == 5 && new_combo.kind != last_combo.kind {
        return new_combo.kind > last_combo.kind;
    }

    if new_combo.kind != last_combo.kind {
        // Same cardinality but different kind only happens at 5 cards,
        // handled above; anything else (e.g. a malformed comparison across
        // singles/pairs) is not a legal beat.
        return false;
    }

    ranking_key(new_combo) > ranking_key(last_combo)
}

/// Every unordered pair of equal rank in `cards`.
pub fn enumerate_pairs(cards: &[Card]) -> Vec<Combination> {
    let mut out = Vec::new();
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            if cards[i].rank == cards[j].rank {
                if let Some(combo) = classify(&[cards[i], cards[j]]) {
                    out.push(combo);
                }
            }
        }
    }
    out
}

/// Every unordered triple of equal rank in `cards`.
pub fn enumerate_triples(cards: &[Card]) -> Vec<Combination> {
    let mut out = Vec::new();
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            for k in (j + 1)..cards.len() {
                if cards[i].rank == cards[j].rank && cards[j].rank == cards[k].rank {
                    if let Some(combo) = classify(&[cards[i], cards[j], cards[k]]) {
                        out.push(combo);
                    }
                }
            }
        }
    }
    out
}

/// Every 5-card subset of `cards` that classifies as `kind`. `cards.len()`
/// is bounded by a single hand (≤ 13), so C(13, 5) = 1287 subsets is the
/// worst case — polynomial and small enough to enumerate eagerly.
pub fn enumerate_fives(cards: &[Card], kind: Kind) -> Vec<Combination> {
    let mut out = Vec::new();
    let n = cards.len();
    if n < 5 {
        return out;
    }
    let mut idx = [0usize; 5];
    for a in 0..n {
        idx[0] = a;
        for b in (a + 1)..n {
            idx[1] = b;
            for c in (b + 1)..n {
                idx[2] = c;
                for d in (c + 1)..n {
                    idx[3] = d;
                    for e in (d + 1)..n {
                        idx[4] = e;
                        let subset = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        if let Some(combo) = classify(&subset) {
                            if combo.kind == kind {
                                out.push(combo);
                            }
                        }
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;

    #[test]
    fn classifies_singles_pairs_triples() {
        assert_eq!(classify(&parse_cards(&["3D"])).unwrap().kind, Kind::Single);
        assert_eq!(classify(&parse_cards(&["3D", "3C"])).unwrap().kind, Kind::Pair);
        assert_eq!(
            classify(&parse_cards(&["3D", "3C", "3H"])).unwrap().kind,
            Kind::Triple
        );
        assert!(classify(&parse_cards(&["3D", "4C"])).is_none());
    }

    #[test]
    fn classifies_straight() {
        let hand = parse_cards(&["3D", "4C", "5H", "6S", "7D"]);
        assert_eq!(classify(&hand).unwrap().kind, Kind::Straight);
    }

    #[test]
    fn wraparound_straights_from_canonical_table() {
        let ace_low = parse_cards(&["AD", "2C", "3H", "4S", "5D"]);
        assert_eq!(classify(&ace_low).unwrap().kind, Kind::Straight);

        // 2,3,4,5,6 is in the canonical table too.
        let two_low = parse_cards(&["2D", "3C", "4H", "5S", "6D"]);
        assert_eq!(classify(&two_low).unwrap().kind, Kind::Straight);

        // Q,K,A,2,3 is NOT in the canonical list.
        let invalid = parse_cards(&["QD", "KC", "AH", "2S", "3D"]);
        assert!(classify(&invalid).is_none());
    }

    #[test]
    fn classifies_flush_full_house_quad_straight_flush() {
        assert_eq!(
            classify(&parse_cards(&["3D", "5D", "7D", "9D", "JD"])).unwrap().kind,
            Kind::Flush
        );
        assert_eq!(
            classify(&parse_cards(&["3D", "3C", "3H", "5S", "5D"])).unwrap().kind,
            Kind::FullHouse
        );
        assert_eq!(
            classify(&parse_cards(&["3D", "3C", "3H", "3S", "5D"])).unwrap().kind,
            Kind::FourOfAKind
        );
        assert_eq!(
            classify(&parse_cards(&["3D", "4D", "5D", "6D", "7D"])).unwrap().kind,
            Kind::StraightFlush
        );
    }

    #[test]
    fn beats_respects_cardinality_and_kind_strength() {
        let single_low = classify(&parse_cards(&["3D"])).unwrap();
        let single_high = classify(&parse_cards(&["4D"])).unwrap();
        assert!(beats(&single_high, &single_low));
        assert!(!beats(&single_low, &single_high));

        let pair = classify(&parse_cards(&["3D", "3C"])).unwrap();
        assert!(!beats(&single_high, &pair));

        let straight = classify(&parse_cards(&["3D", "4C", "5H", "6S", "7D"])).unwrap();
        let flush = classify(&parse_cards(&["3D", "5D", "7D", "9D", "JD"])).unwrap();
        assert!(beats(&flush, &straight));
        assert!(!beats(&straight, &flush));
    }

    #[test]
    fn invalid_never_beats_or_is_beaten() {
        assert!(classify(&parse_cards(&["3D", "4C"])).is_none());
    }

    #[test]
    fn beats_is_transitive_for_same_cardinality() {
        let a = classify(&parse_cards(&["5D"])).unwrap();
        let b = classify(&parse_cards(&["4D"])).unwrap();
        let c = classify(&parse_cards(&["3D"])).unwrap();
        assert!(beats(&a, &b));
        assert!(beats(&b, &c));
        assert!(beats(&a, &c));
    }

    #[test]
    fn enumerate_helpers_find_expected_counts() {
        let hand = parse_cards(&["3D", "3C", "3H", "4D", "4C"]);
        assert_eq!(enumerate_pairs(&hand).len(), 3 + 1); // 3 pairs of 3s + 1 pair of 4s
        assert_eq!(enumerate_triples(&hand).len(), 1);
    }

    proptest::proptest! {
        /// `classify` sorts its input before inspecting it, so the result
        /// must not depend on the order cards were passed in (§3: a
        /// combination is a set, not a sequence).
        #[test]
        fn classify_is_invariant_under_input_order(perm in proptest::sample::select(vec![
            [0usize, 1, 2, 3, 4], [4, 3, 2, 1, 0], [2, 0, 4, 1, 3], [1, 4, 0, 3, 2],
        ])) {
            let hand = parse_cards(&["3D", "4D", "5D", "6D", "7D"]);
            let permuted: Vec<Card> = perm.iter().map(|&i| hand[i]).collect();
            proptest::prop_assert_eq!(classify(&hand).map(|c| c.kind), classify(&permuted).map(|c| c.kind));
        }

        /// `beats` is strictly asymmetric for any two distinct same-cardinality
        /// combinations: at most one direction can hold.
        #[test]
        fn beats_is_asymmetric(lo in 3u8..13, hi in 3u8..13) {
            proptest::prop_assume!(lo != hi);
            let ranks = ["3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A", "2"];
            let low = classify(&parse_cards(&[format!("{}D", ranks[lo as usize % ranks.len()]).as_str()])).unwrap();
            let high = classify(&parse_cards(&[format!("{}D", ranks[hi as usize % ranks.len()]).as_str()])).unwrap();
            proptest::prop_assert!(!(beats(&low, &high) && beats(&high, &low)));
        }
    }
}
