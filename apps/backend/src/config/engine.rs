//! Environment-tunable overrides for the engine constants in
//! `domain::rules`. Net-new relative to the teacher, which has no
//! equivalent knob surface; follows the same "parse with a default"
//! pattern as `config::db`.

use std::env;
use std::time::Duration;

use rand::Rng;

use crate::domain::rules;

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub auto_pass_timer: Duration,
    pub bot_decision_delay_min: Duration,
    pub bot_decision_delay_max: Duration,
    pub bot_lease_duration: Duration,
    pub max_bot_moves_per_pass: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_pass_timer: rules::AUTO_PASS_TIMER,
            bot_decision_delay_min: rules::BOT_DECISION_DELAY_MIN,
            bot_decision_delay_max: rules::BOT_DECISION_DELAY_MAX,
            bot_lease_duration: rules::BOT_LEASE_DURATION,
            max_bot_moves_per_pass: rules::MAX_BOT_MOVES_PER_PASS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auto_pass_timer: secs_var("BIGTWO_AUTO_PASS_TIMER_SECS", defaults.auto_pass_timer),
            bot_decision_delay_min: millis_var("BIGTWO_BOT_DECISION_DELAY_MIN_MS", defaults.bot_decision_delay_min),
            bot_decision_delay_max: millis_var("BIGTWO_BOT_DECISION_DELAY_MAX_MS", defaults.bot_decision_delay_max),
            bot_lease_duration: secs_var("BIGTWO_BOT_LEASE_SECS", defaults.bot_lease_duration),
            max_bot_moves_per_pass: u32_var("BIGTWO_MAX_BOT_MOVES_PER_PASS", defaults.max_bot_moves_per_pass),
        }
    }

    /// Samples a single bot think-time delay uniformly from
    /// `[bot_decision_delay_min, bot_decision_delay_max]` (§4.4.1, §6.5):
    /// a fixed delay would make bot timing trivially distinguishable from
    /// a human's.
    pub fn sample_bot_decision_delay(&self) -> Duration {
        let min = self.bot_decision_delay_min.as_millis() as u64;
        let max = self.bot_decision_delay_max.as_millis() as u64;
        if min >= max {
            return self.bot_decision_delay_min;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

fn secs_var(name: &str, default: Duration) -> Duration {
    env::var(name).ok().and_then(|v| v.parse::<u64>().ok()).map(Duration::from_secs).unwrap_or(default)
}

fn millis_var(name: &str, default: Duration) -> Duration {
    env::var(name).ok().and_then(|v| v.parse::<u64>().ok()).map(Duration::from_millis).unwrap_or(default)
}

fn u32_var(name: &str, default: u32) -> u32 {
    env::var(name).ok().and_then(|v| v.parse::<u32>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_rules() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.auto_pass_timer, rules::AUTO_PASS_TIMER);
        assert_eq!(cfg.max_bot_moves_per_pass, rules::MAX_BOT_MOVES_PER_PASS);
        assert_eq!(cfg.bot_decision_delay_min, rules::BOT_DECISION_DELAY_MIN);
        assert_eq!(cfg.bot_decision_delay_max, rules::BOT_DECISION_DELAY_MAX);
    }

    #[test]
    fn sampled_bot_decision_delay_stays_within_configured_bounds() {
        let cfg = EngineConfig::default();
        for _ in 0..100 {
            let sampled = cfg.sample_bot_decision_delay();
            assert!(sampled >= cfg.bot_decision_delay_min);
            assert!(sampled <= cfg.bot_decision_delay_max);
        }
    }
}
