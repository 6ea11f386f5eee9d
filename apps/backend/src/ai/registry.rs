//! How to register a new bot policy:
//! 1) Implement `AiPlayer` for the type in its own module.
//! 2) Add an `AiFactory` entry below with a stable `name`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//!
//! Grounded on the teacher's `ai/registry.rs` static-table-of-factories
//! pattern, trimmed to this crate's three difficulty tiers (§4.4.3) in
//! place of the teacher's five named strategies.

use super::easy::EasyBot;
use super::hard::HardBot;
use super::medium::MediumBot;
use super::trait_def::AiPlayer;

pub const DEFAULT_AI_NAME: &str = MediumBot::NAME;

pub struct AiFactory {
    pub name: &'static str,
    pub make: fn() -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory { name: EasyBot::NAME, make: make_easy },
    AiFactory { name: MediumBot::NAME, make: make_medium },
    AiFactory { name: HardBot::NAME, make: make_hard },
];

pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|f| f.name == name)
}

pub fn default_ai() -> Option<&'static AiFactory> {
    by_name(DEFAULT_AI_NAME)
}

fn make_easy() -> Box<dyn AiPlayer> {
    Box::new(EasyBot::new())
}

fn make_medium() -> Box<dyn AiPlayer> {
    Box::new(MediumBot::new())
}

fn make_hard() -> Box<dyn AiPlayer> {
    Box::new(HardBot::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_difficulties_are_registered() {
        assert!(by_name(EasyBot::NAME).is_some());
        assert!(by_name(MediumBot::NAME).is_some());
        assert!(by_name(HardBot::NAME).is_some());
        assert!(by_name("nonexistent").is_none());
    }

    #[test]
    fn default_ai_resolves() {
        assert!(default_ai().is_some());
    }
}
