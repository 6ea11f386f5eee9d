//! The medium bot policy: always plays its weakest legal combination
//! rather than the strongest, so it doesn't burn high cards it could
//! otherwise hold in reserve — but never hoards a two past the point of
//! passing being illegal. Grounded in the teacher's pure, config-free
//! `ai/random.rs` shape (no DB access, deterministic given its inputs),
//! generalized from random choice to a simple ordering heuristic.

use super::trait_def::{AiError, AiPlayer, BotDecision, Situation};
use crate::domain::cards::Rank;
use crate::domain::combination::{ranking_key, Combination};

pub struct MediumBot;

impl MediumBot {
    pub const NAME: &'static str = "medium";

    pub fn new() -> Self {
        Self
    }
}

impl Default for MediumBot {
    fn default() -> Self {
        Self::new()
    }
}

fn is_a_two(combo: &Combination) -> bool {
    ranking_key(combo).0 == Rank::Two
}

impl AiPlayer for MediumBot {
    fn decide(&self, situation: &Situation) -> Result<BotDecision, AiError> {
        let Situation { legal_moves, can_pass, .. } = *situation;
        if legal_moves.is_empty() {
            if can_pass {
                return Ok(BotDecision::Pass);
            }
            return Err(AiError::InvalidMove("no legal moves and passing is not allowed".into()));
        }

        // Weakest by cardinality first (cheaper combinations before 5-card
        // hands), then by ranking key within the same cardinality.
        let weakest = legal_moves
            .iter()
            .min_by_key(|c| (c.cards.len(), ranking_key(c)))
            .expect("checked non-empty above");

        if can_pass && is_a_two(weakest) {
            let non_two = legal_moves.iter().find(|c| !is_a_two(c));
            if let Some(alt) = non_two {
                return Ok(BotDecision::Play(alt.clone()));
            }
            return Ok(BotDecision::Pass);
        }

        Ok(BotDecision::Play(weakest.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::combination::classify;

    fn situation<'a>(legal_moves: &'a [Combination], can_pass: bool) -> Situation<'a> {
        Situation { legal_moves, is_leading: !can_pass, can_pass, hand: &[], other_hand_sizes: &[], last_play_seat: None }
    }

    #[test]
    fn prefers_weakest_single_over_pair() {
        let single = classify(&parse_cards(&["5D"])).unwrap();
        let pair = classify(&parse_cards(&["4D", "4C"])).unwrap();
        let bot = MediumBot::new();
        let moves = [pair, single.clone()];
        let decision = bot.decide(&situation(&moves, false)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, single),
            BotDecision::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn hoards_a_two_when_an_alternative_and_passing_exist() {
        let two = classify(&parse_cards(&["2D"])).unwrap();
        let four = classify(&parse_cards(&["4D"])).unwrap();
        let bot = MediumBot::new();
        let moves = [two, four.clone()];
        let decision = bot.decide(&situation(&moves, true)).unwrap();
        match decision {
            BotDecision::Play(c) => assert_eq!(c, four),
            BotDecision::Pass => panic!("expected to play the non-two alternative"),
        }
    }
}
