//! Best-score persistence
//!
//! Stored as a bare decimal integer under a single key.

use crate::platform::KeyValueStore;

/// The best score ever achieved on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "stackJumpHighScore";

    /// Read the stored value; absent or unparseable reads as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = store
            .get(Self::STORAGE_KEY)
            .map(|raw| parse_score(&raw))
            .unwrap_or(0);
        log::info!("High score: {}", best);
        Self { best }
    }

    /// Offer a finished run's score; persists and returns true only if it is a new best
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::info!("High score saved ({})", score);
        }
        true
    }
}

/// Lenient integer parse: leading digits count, anything else is 0
///
/// "12abc" reads as 12, "-3" and "" read as 0.
pub fn parse_score(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("17"), 17);
        assert_eq!(parse_score(" 17"), 17);
        assert_eq!(parse_score("17px"), 17);
        assert_eq!(parse_score(""), 0);
        assert_eq!(parse_score("abc"), 0);
        assert_eq!(parse_score("-4"), 0);
        assert_eq!(parse_score("99999999999999999999999"), 0);
    }

    #[test]
    fn test_missing_or_corrupt_reads_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);

        store.set("stackJumpHighScore", "garbage");
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_submit_only_raises() {
        let mut store = MemoryStore::new();
        let mut high = HighScore::load(&store);

        assert!(!high.submit(0, &mut store));
        assert_eq!(store.get("stackJumpHighScore"), None);

        assert!(high.submit(5, &mut store));
        assert!(!high.submit(5, &mut store));
        assert!(!high.submit(2, &mut store));
        assert_eq!(HighScore::load(&store).best, 5);
    }

    proptest! {
        #[test]
        fn persisted_value_is_running_max(scores in prop::collection::vec(0u64..1000, 0..30)) {
            let mut store = MemoryStore::new();
            let mut high = HighScore::load(&store);
            let mut expected = 0;

            for score in scores {
                high.submit(score, &mut store);
                expected = expected.max(score);
                prop_assert_eq!(HighScore::load(&store).best, expected);
            }
        }
    }
}
