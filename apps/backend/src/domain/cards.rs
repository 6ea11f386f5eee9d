use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::DomainError;

/// Suit order per the house rules: Diamonds is weakest, Spades strongest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

/// Rank order: the two is the strongest card in the deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

// Note: Ord/Eq on Card is only for stable sorting of a hand (rank then
// suit). Do not use it for combination comparison — that lives in
// `domain::combination` and follows the (rank, suit) total order directly
// per spec §3, which happens to coincide with this derivation, but callers
// should go through `combination::ranking_key` rather than relying on that.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.rank.cmp(&other.rank) {
            std::cmp::Ordering::Equal => self.suit.cmp(&other.suit),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rank_str = match self.rank {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
        };
        let suit_char = match self.suit {
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };
        serializer.serialize_str(&format!("{rank_str}{suit_char}"))
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_card_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

fn parse_card_str(s: &str) -> Result<Card, DomainError> {
    if s.len() < 2 || s.len() > 3 {
        return Err(DomainError::ParseCard(s.to_string()));
    }
    let (rank_part, suit_part) = s.split_at(s.len() - 1);
    let rank = match rank_part {
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        "A" => Rank::Ace,
        "2" => Rank::Two,
        _ => return Err(DomainError::ParseCard(s.to_string())),
    };
    let suit = match suit_part {
        "D" => Suit::Diamonds,
        "C" => Suit::Clubs,
        "H" => Suit::Hearts,
        "S" => Suit::Spades,
        _ => return Err(DomainError::ParseCard(s.to_string())),
    };
    Ok(Card { rank, suit })
}

/// Full 52-card deck, used by the highest-remaining detector to compute
/// `remaining = full_deck \ played_cards \ cards`.
pub fn full_deck() -> Vec<Card> {
    let suits = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];
    let ranks = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];
    let mut deck = Vec::with_capacity(52);
    for &rank in &ranks {
        for &suit in &suits {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

#[cfg(test)]
pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| serde_json::from_str::<Card>(&format!("\"{s}\"")).expect("valid card token"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let cases = [
            (Rank::Ace, Suit::Spades, "AS"),
            (Rank::Ten, Suit::Diamonds, "10D"),
            (Rank::Three, Suit::Hearts, "3H"),
            (Rank::Two, Suit::Clubs, "2C"),
        ];
        for (rank, suit, token) in cases {
            let c = Card { rank, suit };
            let s = serde_json::to_string(&c).unwrap();
            assert_eq!(s, format!("\"{token}\""));
            let decoded: Card = serde_json::from_str(&s).unwrap();
            assert_eq!(decoded, c);
        }
    }

    #[test]
    fn rejects_invalid_tokens() {
        for tok in ["1H", "ZZ", "", "AZ", "103"] {
            let res: Result<Card, _> = serde_json::from_str(&format!("\"{tok}\""));
            assert!(res.is_err(), "expected {tok} to be rejected");
        }
    }

    #[test]
    fn two_outranks_everything() {
        let two = Card {
            rank: Rank::Two,
            suit: Suit::Diamonds,
        };
        let ace = Card {
            rank: Rank::Ace,
            suit: Suit::Spades,
        };
        assert!(two > ace);
    }

    #[test]
    fn full_deck_has_52_unique_cards() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let mut sorted = deck.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 52);
    }
}
