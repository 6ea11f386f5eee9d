//! The easy bot policy: deterministic, not randomized (§4.5). When
//! leading, plays the smallest legal combination containing its smallest
//! card — which, since every single is always a legal leading move, is
//! simply its lowest single (the 3♦ itself when that's required). When
//! following, plays the smallest legal combination that beats the current
//! play, or passes if none exists. Grounded on `MediumBot`'s
//! weakest-by-`(cardinality, ranking_key)` selection, minus its two-hoard
//! special case, which §4.5 reserves for `Medium`/`Hard`.

use super::trait_def::{AiError, AiPlayer, BotDecision, Situation};
use crate::domain::combination::ranking_key;

pub struct EasyBot;

impl EasyBot {
    pub const NAME: &'static str = "easy";

    pub fn new() -> Self {
        Self
    }
}

impl Default for EasyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for EasyBot {
    fn decide(&self, situation: &Situation) -> Result<BotDecision, AiError> {
        if situation.legal_moves.is_empty() {
            if situation.can_pass {
                return Ok(BotDecision::Pass);
            }
            return Err(AiError::InvalidMove("no legal moves and passing is not allowed".into()));
        }

        let smallest = situation
            .legal_moves
            .iter()
            .min_by_key(|c| (c.cards.len(), ranking_key(c)))
            .expect("checked non-empty above");
        Ok(BotDecision::Play(smallest.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::combination::{classify, Combination};

    fn situation<'a>(legal_moves: &'a [Combination], can_pass: bool) -> Situation<'a> {
        Situation { legal_moves, is_leading: !can_pass, can_pass, hand: &[], other_hand_sizes: &[], last_play_seat: None }
    }

    #[test]
    fn leads_with_the_single_of_its_smallest_card() {
        let three_diamonds = classify(&parse_cards(&["3D"])).unwrap();
        let pair = classify(&parse_cards(&["4D", "4C"])).unwrap();
        let bot = EasyBot::new();
        let moves = [pair, three_diamonds.clone()];
        let decision = bot.decide(&situation(&moves, false)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, three_diamonds),
            BotDecision::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn beats_with_the_weakest_sufficient_combination() {
        let six = classify(&parse_cards(&["6D"])).unwrap();
        let ten = classify(&parse_cards(&["10D"])).unwrap();
        let bot = EasyBot::new();
        let moves = [ten, six.clone()];
        let decision = bot.decide(&situation(&moves, true)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, six),
            BotDecision::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn passes_when_no_legal_move_beats_the_lead() {
        let bot = EasyBot::new();
        let decision = bot.decide(&situation(&[], true)).unwrap();
        assert!(matches!(decision, BotDecision::Pass));
    }

    #[test]
    fn decision_is_reproducible_without_a_seed() {
        let three_diamonds = classify(&parse_cards(&["3D"])).unwrap();
        let pair = classify(&parse_cards(&["4D", "4C"])).unwrap();
        let bot = EasyBot::new();
        let moves = [pair, three_diamonds];
        let first = bot.decide(&situation(&moves, false)).unwrap();
        let second = bot.decide(&situation(&moves, false)).unwrap();
        match (first, second) {
            (BotDecision::Play(a), BotDecision::Play(b)) => assert_eq!(a, b),
            _ => panic!("expected matching plays"),
        }
    }
}
