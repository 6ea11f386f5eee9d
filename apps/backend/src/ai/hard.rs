//! The hard bot policy (§4.5): beyond Medium's weakest-sufficient-play
//! baseline, it (a) withholds its strongest combination while leading once
//! down to five cards or fewer, conserving it for the endgame instead of
//! burning it early; (b) won't pass the lead back to whichever other seat
//! holds the fewest cards, since that seat is closest to winning; and (c)
//! among otherwise-equal candidate plays, prefers the one that leaves the
//! fewest broken pairs/triples behind in hand. It still always takes an
//! immediate match win over any of the above. Grounded in `MediumBot`'s
//! weakest-by-`(cardinality, ranking_key)` shape, extended with the extra
//! tie-breaks and lead/follow branching these heuristics need.

use std::collections::HashMap;

use super::trait_def::{AiError, AiPlayer, BotDecision, Situation};
use crate::domain::cards::Rank;
use crate::domain::combination::{ranking_key, Combination};

pub struct HardBot;

impl HardBot {
    pub const NAME: &'static str = "hard";

    pub fn new() -> Self {
        Self
    }
}

impl Default for HardBot {
    fn default() -> Self {
        Self::new()
    }
}

fn is_a_two(combo: &Combination) -> bool {
    ranking_key(combo).0 == Rank::Two
}

/// How many ranks in `hand` would be left as an unpaired singleton if
/// `combo` were played — a cheap stand-in for "combinations this play
/// would leave trapped as a broken pair/triple" (§4.5 Hard heuristic (c)).
fn residual_breaks(hand: &[crate::domain::cards::Card], combo: &Combination) -> usize {
    let mut counts: HashMap<Rank, i32> = HashMap::new();
    for card in hand {
        *counts.entry(card.rank).or_insert(0) += 1;
    }
    for card in &combo.cards {
        if let Some(n) = counts.get_mut(&card.rank) {
            *n -= 1;
        }
    }
    counts.values().filter(|&&n| n == 1).count()
}

fn weakest<'a>(legal_moves: &'a [Combination], hand: &[crate::domain::cards::Card]) -> &'a Combination {
    legal_moves
        .iter()
        .min_by_key(|c| (c.cards.len(), ranking_key(c), residual_breaks(hand, c)))
        .expect("checked non-empty above")
}

fn strongest<'a>(legal_moves: &'a [Combination], hand: &[crate::domain::cards::Card]) -> &'a Combination {
    legal_moves
        .iter()
        .max_by_key(|c| (c.cards.len(), std::cmp::Reverse(ranking_key(c)), std::cmp::Reverse(residual_breaks(hand, c))))
        .expect("checked non-empty above")
}

/// Whether `last_play_seat` currently holds strictly the fewest cards of
/// any seat it's being compared against.
fn owner_has_fewest_cards(last_play_seat: Option<u8>, other_hand_sizes: &[(u8, usize)]) -> bool {
    let (Some(seat), Some(&fewest)) = (last_play_seat, other_hand_sizes.iter().map(|&(_, n)| n).min().as_ref()) else {
        return false;
    };
    other_hand_sizes.iter().any(|&(s, n)| s == seat && n == fewest)
}

impl AiPlayer for HardBot {
    fn decide(&self, situation: &Situation) -> Result<BotDecision, AiError> {
        let Situation { legal_moves, is_leading, can_pass, hand, other_hand_sizes, last_play_seat } = *situation;
        if legal_moves.is_empty() {
            if can_pass {
                return Ok(BotDecision::Pass);
            }
            return Err(AiError::InvalidMove("no legal moves and passing is not allowed".into()));
        }

        if let Some(winner) = legal_moves.iter().find(|c| c.cards.len() == hand.len()) {
            return Ok(BotDecision::Play(winner.clone()));
        }

        if is_leading {
            if hand.len() <= 5 {
                return Ok(BotDecision::Play(weakest(legal_moves, hand).clone()));
            }
            return Ok(BotDecision::Play(strongest(legal_moves, hand).clone()));
        }

        if owner_has_fewest_cards(last_play_seat, other_hand_sizes) {
            return Ok(BotDecision::Play(weakest(legal_moves, hand).clone()));
        }

        let candidate = weakest(legal_moves, hand);
        if can_pass && is_a_two(candidate) {
            if let Some(alt) = legal_moves.iter().find(|c| !is_a_two(c)) {
                return Ok(BotDecision::Play(alt.clone()));
            }
            return Ok(BotDecision::Pass);
        }

        Ok(BotDecision::Play(candidate.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::combination::classify;

    fn situation<'a>(
        legal_moves: &'a [Combination],
        is_leading: bool,
        can_pass: bool,
        hand: &'a [crate::domain::cards::Card],
        other_hand_sizes: &'a [(u8, usize)],
        last_play_seat: Option<u8>,
    ) -> Situation<'a> {
        Situation { legal_moves, is_leading, can_pass, hand, other_hand_sizes, last_play_seat }
    }

    #[test]
    fn takes_the_win_over_conservation() {
        let two = classify(&parse_cards(&["2D"])).unwrap();
        let hand = parse_cards(&["2D"]);
        let bot = HardBot::new();
        let moves = [two.clone()];
        let decision = bot.decide(&situation(&moves, false, true, &hand, &[], None)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, two),
            BotDecision::Pass => panic!("expected to take the winning move"),
        }
    }

    #[test]
    fn withholds_its_strongest_lead_once_down_to_five_cards() {
        let single = classify(&parse_cards(&["5D"])).unwrap();
        let ace = classify(&parse_cards(&["AD"])).unwrap();
        let hand = parse_cards(&["5D", "6D", "7D", "8D", "AD"]);
        let bot = HardBot::new();
        let moves = [ace, single.clone()];
        let decision = bot.decide(&situation(&moves, true, true, &hand, &[], None)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, single),
            BotDecision::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn leads_with_its_biggest_combination_while_hand_is_still_large() {
        let single = classify(&parse_cards(&["5D"])).unwrap();
        let ace = classify(&parse_cards(&["AD"])).unwrap();
        let hand = parse_cards(&["3D", "4D", "5D", "6D", "7D", "8D", "AD"]);
        let bot = HardBot::new();
        let moves = [single, ace.clone()];
        let decision = bot.decide(&situation(&moves, true, true, &hand, &[], None)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, ace),
            BotDecision::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn beats_the_seat_with_fewest_cards_instead_of_passing() {
        let six = classify(&parse_cards(&["6D"])).unwrap();
        let hand = parse_cards(&["6D", "7D", "8D"]);
        let bot = HardBot::new();
        let moves = [six.clone()];
        let decision = bot.decide(&situation(&moves, false, true, &hand, &[(1, 1), (2, 8)], Some(1))).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, six),
            BotDecision::Pass => panic!("expected to contest the seat closest to winning"),
        }
    }
}
