use crate::config::{RenameConfig, VersionStrategy};
use crate::error::RenameError;
use rand::Rng;

pub const DEFAULT_VERSION: f64 = 1.0;
const RANDOM_MIN: f64 = 0.1;
const RANDOM_MAX: f64 = 10.0;

/// Parsed version settings for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionGenerator {
    strategy: VersionStrategy,
    start: f64,
    increment: f64,
    start_counter: u64,
}

impl VersionGenerator {
    /// An unparsable `version_start` degrades to `1.0`; the error is handed back
    /// so the caller can report it once for the whole batch. The random
    /// strategy never reads the start value.
    pub fn from_config(config: &RenameConfig) -> (Self, Option<RenameError>) {
        let parsed = match config.version_strategy {
            VersionStrategy::Random => Some(DEFAULT_VERSION),
            VersionStrategy::Fixed | VersionStrategy::Incremental => {
                parse_version(&config.version_start)
            }
        };
        let (start, error) = match parsed {
            Some(start) => (start, None),
            None => (
                DEFAULT_VERSION,
                Some(RenameError::InvalidVersionFormat(
                    config.version_start.clone(),
                )),
            ),
        };
        let generator = Self {
            strategy: config.version_strategy,
            start,
            increment: config.version_increment,
            start_counter: config.start_counter,
        };
        (generator, error)
    }

    pub fn version_for<R: Rng + ?Sized>(&self, counter: u64, rng: &mut R) -> f64 {
        match self.strategy {
            VersionStrategy::Fixed => self.start,
            VersionStrategy::Incremental => {
                let steps = counter as f64 - self.start_counter as f64;
                round2(self.start + steps * self.increment)
            }
            VersionStrategy::Random => round2(rng.gen_range(RANDOM_MIN..=RANDOM_MAX)),
        }
    }
}

pub fn version_for<R: Rng + ?Sized>(
    counter: u64,
    config: &RenameConfig,
    rng: &mut R,
) -> (f64, Option<RenameError>) {
    let (generator, error) = VersionGenerator::from_config(config);
    (generator.version_for(counter, rng), error)
}

/// Shortest decimal form that still shows one fractional digit (`2.0`, `1.25`).
pub fn format_version(version: f64) -> String {
    format!("{version:?}")
}

fn parse_version(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Halves round away from zero: 0.125 becomes 0.13.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(strategy: VersionStrategy, start: &str, increment: f64) -> RenameConfig {
        RenameConfig {
            version_strategy: strategy,
            version_start: start.to_string(),
            version_increment: increment,
            ..RenameConfig::default()
        }
    }

    #[test]
    fn incremental_steps_from_start_counter() {
        let mut rng = StdRng::seed_from_u64(0);
        let (generator, error) =
            VersionGenerator::from_config(&config(VersionStrategy::Incremental, "1.0", 0.5));
        assert!(error.is_none());
        let versions: Vec<String> = (1..=3)
            .map(|counter| format_version(generator.version_for(counter, &mut rng)))
            .collect();
        assert_eq!(versions, ["1.0", "1.5", "2.0"]);
    }

    #[test]
    fn incremental_rounds_to_two_places() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut cfg = config(VersionStrategy::Incremental, "1.0", 0.1);
        cfg.start_counter = 5;
        let (version, _) = version_for(8, &cfg, &mut rng);
        assert_eq!(format_version(version), "1.3");
    }

    #[test]
    fn fixed_ignores_counter() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = config(VersionStrategy::Fixed, " 2 ", 0.5);
        assert_eq!(version_for(1, &cfg, &mut rng).0, 2.0);
        assert_eq!(version_for(99, &cfg, &mut rng).0, 2.0);
    }

    #[test]
    fn random_stays_in_range_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(9);
        let (generator, _) =
            VersionGenerator::from_config(&config(VersionStrategy::Random, "1.0", 0.1));
        for counter in 1..200 {
            let v = generator.version_for(counter, &mut rng);
            assert!((RANDOM_MIN..=RANDOM_MAX).contains(&v), "{v} out of range");
            assert_eq!(round2(v), v);
        }
    }

    #[test]
    fn invalid_start_falls_back_and_reports() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = config(VersionStrategy::Incremental, "v1", 0.5);
        let (version, error) = version_for(2, &cfg, &mut rng);
        assert_eq!(version, 1.5);
        assert!(matches!(error, Some(RenameError::InvalidVersionFormat(raw)) if raw == "v1"));
    }

    #[test]
    fn random_strategy_ignores_unparsable_start() {
        let mut rng = StdRng::seed_from_u64(4);
        let cfg = config(VersionStrategy::Random, "oops", 0.1);
        let (version, error) = version_for(1, &cfg, &mut rng);
        assert!(error.is_none());
        assert!((RANDOM_MIN..=RANDOM_MAX).contains(&version));
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn format_keeps_trailing_zero_only_for_whole_numbers() {
        assert_eq!(format_version(1.0), "1.0");
        assert_eq!(format_version(1.25), "1.25");
        assert_eq!(format_version(10.0), "10.0");
    }
}
